use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

use rand::{Rng, seq::SliceRandom};

use crate::{
    answer_parser::{self, ParsedQuestion},
    auth::Authenticator,
    errors::SessionError,
    log_util::log_debug,
    question_store::{Question, QuestionStore},
    scoring::{self, Score},
};

/// Screen the session is on. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    SelectingTags,
    AnsweringQuestion,
    Summary,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthenticated => "logged out",
            Self::SelectingTags => "selecting tags",
            Self::AnsweringQuestion => "answering a question",
            Self::Summary => "viewing the summary",
        };
        f.write_str(label)
    }
}

/// Result of submitting an answer for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub selected: String,
    pub expected: String,
}

/// What the question screen needs to render the current position.
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub position: usize,
    pub total: usize,
    pub id: String,
    pub tag: String,
    pub parsed: ParsedQuestion,
    pub recorded_answer: Option<String>,
}

/// State of a single user's quiz. One instance per user; the store stays shared.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    authenticated: bool,
    selection: Vec<Arc<Question>>,
    position: usize,
    answers: BTreeMap<usize, String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.authenticated {
            SessionPhase::Unauthenticated
        } else if self.selection.is_empty() {
            SessionPhase::SelectingTags
        } else if self.position < self.selection.len() {
            SessionPhase::AnsweringQuestion
        } else {
            SessionPhase::Summary
        }
    }

    pub fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        username: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        self.require(SessionPhase::Unauthenticated, "log in")?;
        if !authenticator.check_credentials(username, password) {
            log_debug(&format!("Session: login rejected for '{}'", username.trim()));
            return Err(SessionError::InvalidCredentials);
        }
        self.authenticated = true;
        log_debug(&format!("Session: '{}' logged in", username.trim()));
        Ok(())
    }

    /// Fetch, shuffle, and lock in the questions for `tags`. Returns the question count.
    pub fn start_quiz<R: Rng + ?Sized>(
        &mut self,
        store: &QuestionStore,
        tags: &BTreeSet<String>,
        rng: &mut R,
    ) -> Result<usize, SessionError> {
        self.require(SessionPhase::SelectingTags, "start a quiz")?;
        let mut questions = store.questions_by_tags(tags);
        if questions.is_empty() {
            log_debug(&format!(
                "Session: no questions for tags {:?}; staying on tag selection",
                tags
            ));
            return Err(SessionError::NoQuestionsForTags);
        }

        questions.shuffle(rng);
        self.selection = questions;
        self.position = 0;
        self.answers.clear();
        log_debug(&format!(
            "Session: started quiz with {} question(s) for tags {:?}",
            self.selection.len(),
            tags
        ));
        Ok(self.selection.len())
    }

    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.require(SessionPhase::AnsweringQuestion, "go to the previous question")?;
        if self.position > 0 {
            self.position -= 1;
            log_debug(&format!(
                "Session: moved back to question {} of {}",
                self.position + 1,
                self.selection.len()
            ));
        }
        Ok(())
    }

    /// Advance one question. From the last question this moves to the summary.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.require(SessionPhase::AnsweringQuestion, "go to the next question")?;
        let total = self.selection.len();
        if self.position + 1 < total {
            self.position += 1;
            log_debug(&format!(
                "Session: moved to question {} of {}",
                self.position + 1,
                total
            ));
        } else {
            self.position = total;
            log_debug("Session: reached quiz summary");
        }
        Ok(())
    }

    /// Record `letter` for the current question. Does not advance.
    /// Letters that are not among the parsed choices are rejected and nothing is recorded.
    pub fn submit(&mut self, letter: &str) -> Result<SubmitOutcome, SessionError> {
        self.require(SessionPhase::AnsweringQuestion, "submit an answer")?;
        let question = &self.selection[self.position];
        let selected = letter.trim().to_string();
        if answer_parser::parse(&question.stem_raw)
            .choice(&selected)
            .is_none()
        {
            return Err(SessionError::UnknownChoice { letter: selected });
        }
        let expected = question.answer.trim().to_string();
        let correct = selected == expected;

        log_debug(&format!(
            "Session: question {} ({}) answered {} (correct: {})",
            self.position + 1,
            question.id,
            selected,
            correct
        ));
        self.answers.insert(self.position, selected.clone());

        Ok(SubmitOutcome {
            correct,
            selected,
            expected,
        })
    }

    /// Drop the finished selection and return to tag selection. Stays logged in.
    pub fn start_new_quiz(&mut self) -> Result<(), SessionError> {
        self.require(SessionPhase::Summary, "start a new quiz")?;
        self.selection.clear();
        self.answers.clear();
        self.position = 0;
        log_debug("Session: cleared quiz; back to tag selection");
        Ok(())
    }

    pub fn current_question(&self) -> Option<QuestionView> {
        if self.phase() != SessionPhase::AnsweringQuestion {
            return None;
        }
        let question = &self.selection[self.position];
        Some(QuestionView {
            position: self.position,
            total: self.selection.len(),
            id: question.id.clone(),
            tag: question.tag.clone(),
            parsed: answer_parser::parse(&question.stem_raw),
            recorded_answer: self.answers.get(&self.position).cloned(),
        })
    }

    pub fn score(&self) -> Score {
        scoring::score(&self.selection, &self.answers)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn selection(&self) -> &[Arc<Question>] {
        &self.selection
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    fn require(&self, expected: SessionPhase, action: &'static str) -> Result<(), SessionError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition { action, phase })
        }
    }
}
