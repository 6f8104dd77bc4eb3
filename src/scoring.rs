use std::{collections::BTreeMap, sync::Arc};

use crate::question_store::Question;

/// Aggregate statistics for a quiz attempt, complete or in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Score {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub percent: f64,
}

impl Score {
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.percent)
    }
}

/// Score `answers` (position -> chosen letter) against `selection`.
pub fn score(selection: &[Arc<Question>], answers: &BTreeMap<usize, String>) -> Score {
    let total = selection.len();
    let answered = answers.len();
    let correct = selection
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            answers
                .get(index)
                .is_some_and(|letter| letter.trim() == question.answer)
        })
        .count();
    let percent = if total > 0 {
        100.0 * correct as f64 / total as f64
    } else {
        0.0
    };

    Score {
        total,
        answered,
        correct,
        incorrect: answered.saturating_sub(correct),
        percent,
    }
}
