use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::Arc,
};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::DataFormatError;

/// One multiple-choice question as loaded from the bank. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    /// Stem with the lettered choices still embedded.
    pub stem_raw: String,
    /// Letter of the correct choice, trimmed.
    pub answer: String,
    pub tag: String,
}

/// Read-only question bank shared by every quiz session.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: Vec<Arc<Question>>,
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawBank {
    data: Option<Vec<Map<String, Value>>>,
}

impl QuestionStore {
    /// Load and normalise the bank at `path`. The first malformed record fails the whole load.
    pub fn load(path: &Path) -> Result<Self, DataFormatError> {
        let contents = fs::read_to_string(path).map_err(|source| DataFormatError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, Some(path))
    }

    /// Build a store from JSON text. `origin` only feeds error messages.
    pub(crate) fn parse(contents: &str, origin: Option<&Path>) -> Result<Self, DataFormatError> {
        let bank: RawBank =
            serde_json::from_str(contents).map_err(|source| DataFormatError::Parse {
                path: origin.map(Path::to_path_buf),
                source,
            })?;
        Self::from_records(bank.data.ok_or(DataFormatError::MissingDataKey)?)
    }

    pub fn from_questions(questions: Vec<Question>) -> Self {
        let tags = questions
            .iter()
            .map(|question| question.tag.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            questions: questions.into_iter().map(Arc::new).collect(),
            tags,
        }
    }

    fn from_records(records: Vec<Map<String, Value>>) -> Result<Self, DataFormatError> {
        let questions = records
            .iter()
            .enumerate()
            .map(|(index, record)| normalize_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_questions(questions))
    }

    /// Distinct tags in ascending order. Contains `""` when some question is untagged.
    pub fn all_tags(&self) -> &[String] {
        &self.tags
    }

    /// Every question whose tag is in `tags`, in store order.
    pub fn questions_by_tags(&self, tags: &BTreeSet<String>) -> Vec<Arc<Question>> {
        if tags.is_empty() {
            return Vec::new();
        }
        self.questions
            .iter()
            .filter(|question| tags.contains(&question.tag))
            .cloned()
            .collect()
    }

    pub fn count_for_tags(&self, tags: &BTreeSet<String>) -> usize {
        self.questions
            .iter()
            .filter(|question| tags.contains(&question.tag))
            .count()
    }

    /// Every tag paired with the number of questions carrying it, in tag order.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for question in &self.questions {
            *counts.entry(question.tag.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn normalize_record(
    index: usize,
    record: &Map<String, Value>,
) -> Result<Question, DataFormatError> {
    let id = match required(index, record, "id")? {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return Err(DataFormatError::InvalidField { index, field: "id" }),
    };
    let stem_raw = required_string(index, record, "question")?;
    let answer = required_string(index, record, "answer")?.trim().to_string();
    let tag = match required(index, record, "tag")? {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        _ => return Err(DataFormatError::InvalidField { index, field: "tag" }),
    };

    Ok(Question {
        id,
        stem_raw,
        answer,
        tag,
    })
}

fn required<'a>(
    index: usize,
    record: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DataFormatError> {
    record
        .get(field)
        .ok_or(DataFormatError::MissingField { index, field })
}

fn required_string(
    index: usize,
    record: &Map<String, Value>,
    field: &'static str,
) -> Result<String, DataFormatError> {
    required(index, record, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(DataFormatError::InvalidField { index, field })
}
