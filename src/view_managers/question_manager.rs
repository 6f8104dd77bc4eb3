use crate::{App, log_util::log_debug, quiz_session::SessionPhase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) struct QuestionManager<'a> {
    app: &'a mut App,
}

impl<'a> QuestionManager<'a> {
    pub(crate) fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => self.next_choice(),
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => self.previous_choice(),
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('s')) => self.submit(),
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp)
            | (_, KeyCode::BackTab) => self.previous_question(),
            (
                KeyModifiers::NONE,
                KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown | KeyCode::Tab,
            ) => self.next_question(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(ch)) => {
                self.select_letter(ch)
            }
            _ => {}
        }
    }

    fn choice_count(&self) -> Option<usize> {
        let view = self.app.session.current_question()?;
        let count = view.parsed.choices.len();
        if count == 0 { None } else { Some(count) }
    }

    fn next_choice(&mut self) {
        let Some(count) = self.choice_count() else {
            return;
        };
        self.app.choice_index = (self.app.choice_index + 1) % count;
    }

    fn previous_choice(&mut self) {
        let Some(count) = self.choice_count() else {
            return;
        };
        if self.app.choice_index == 0 {
            self.app.choice_index = count - 1;
        } else {
            self.app.choice_index -= 1;
        }
    }

    fn select_letter(&mut self, ch: char) {
        let Some(view) = self.app.session.current_question() else {
            return;
        };
        let letter = ch.to_ascii_uppercase().to_string();
        if let Some(index) = view
            .parsed
            .choices
            .iter()
            .position(|choice| choice.letter == letter)
        {
            self.app.choice_index = index;
        }
    }

    fn submit(&mut self) {
        let Some(view) = self.app.session.current_question() else {
            return;
        };
        if view.parsed.is_degraded() {
            self.app.feedback =
                Some("No answer options available for this question.".to_string());
            log_debug(&format!(
                "App: submit ignored; question {} has no parsable choices",
                view.id
            ));
            return;
        }

        let index = self.app.choice_index.min(view.parsed.choices.len() - 1);
        let letter = view.parsed.choices[index].letter.clone();
        match self.app.session.submit(&letter) {
            Ok(outcome) => {
                self.app.feedback = Some(if outcome.correct {
                    "Correct!".to_string()
                } else {
                    format!("Incorrect. The correct answer is {}.", outcome.expected)
                });
                log_debug(&format!(
                    "App: showed feedback for choice {} on question {}",
                    outcome.selected, view.id
                ));
            }
            Err(err) => self.app.error = Some(err.to_string()),
        }
    }

    fn previous_question(&mut self) {
        let at_first = self.app.session.position() == 0;
        if let Err(err) = self.app.session.previous() {
            self.app.error = Some(err.to_string());
            return;
        }
        self.app.status = at_first.then(|| "Already at the first question.".to_string());
        self.reset_question_state();
    }

    fn next_question(&mut self) {
        if let Err(err) = self.app.session.next() {
            self.app.error = Some(err.to_string());
            return;
        }
        self.app.status = (self.app.session.phase() == SessionPhase::Summary)
            .then(|| "Quiz complete.".to_string());
        self.reset_question_state();
    }

    /// Clear feedback and put the cursor on the recorded answer, if any.
    fn reset_question_state(&mut self) {
        self.app.feedback = None;
        self.app.choice_index = self
            .app
            .session
            .current_question()
            .and_then(|view| {
                let recorded = view.recorded_answer?;
                view.parsed
                    .choices
                    .iter()
                    .position(|choice| choice.letter == recorded)
            })
            .unwrap_or(0);
    }
}
