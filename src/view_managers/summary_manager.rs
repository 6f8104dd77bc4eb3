use crate::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) struct SummaryManager<'a> {
    app: &'a mut App,
}

impl<'a> SummaryManager<'a> {
    pub(crate) fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('n')) =
            (key.modifiers, key.code)
        {
            self.start_new_quiz();
        }
    }

    fn start_new_quiz(&mut self) {
        match self.app.session.start_new_quiz() {
            Ok(()) => {
                self.app.choice_index = 0;
                self.app.feedback = None;
                self.app.error = None;
                self.app.status = Some("Choose tags for a new quiz.".to_string());
            }
            Err(err) => self.app.error = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{quiz_session::SessionPhase, test_support};
    use crossterm::event::KeyCode;

    #[test]
    fn new_quiz_returns_to_tag_selection_logged_in() {
        let mut app = test_support::answering_app();
        app.on_key_event(test_support::key(KeyCode::Enter));
        while app.session.phase() == SessionPhase::AnsweringQuestion {
            app.on_key_event(test_support::key(KeyCode::Char('n')));
        }
        assert_eq!(app.session.phase(), SessionPhase::Summary);

        app.on_key_event(test_support::key(KeyCode::Char('n')));

        assert_eq!(app.session.phase(), SessionPhase::SelectingTags);
        assert!(app.session.is_authenticated());
        assert!(app.session.answers().is_empty());
        assert_eq!(app.session.score().total, 0);
    }

    #[test]
    fn q_quits_from_summary() {
        let mut app = test_support::answering_app();
        while app.session.phase() == SessionPhase::AnsweringQuestion {
            app.on_key_event(test_support::key(KeyCode::Char('n')));
        }

        app.on_key_event(test_support::key(KeyCode::Char('q')));

        assert!(!app.running);
    }
}
