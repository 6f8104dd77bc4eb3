//! Splits a raw question string into its stem and lettered answer choices.
//!
//! Choices are introduced by a marker: a capital letter `A` through `E`
//! immediately followed by a colon. The marker must open the text or follow a
//! character that is not an ASCII letter or digit, so abbreviations such as
//! `HbA:` stay inside the stem.

/// A single lettered answer option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub letter: String,
    pub text: String,
}

impl Choice {
    /// Display form used by the question screen, e.g. `A: Aspirin`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.letter, self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub stem: String,
    pub choices: Vec<Choice>,
}

impl ParsedQuestion {
    /// True when no choice marker was found and the whole text became the stem.
    pub fn is_degraded(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn choice(&self, letter: &str) -> Option<&Choice> {
        let letter = letter.trim();
        self.choices.iter().find(|choice| choice.letter == letter)
    }
}

/// Parse `raw` into a stem and its choices in source order.
pub fn parse(raw: &str) -> ParsedQuestion {
    let markers = marker_offsets(raw);
    let Some(&first) = markers.first() else {
        return ParsedQuestion {
            stem: raw.to_string(),
            choices: Vec::new(),
        };
    };

    let stem = raw[..first].trim().to_string();
    let choices = markers
        .iter()
        .enumerate()
        .map(|(position, &start)| {
            let end = markers.get(position + 1).copied().unwrap_or(raw.len());
            Choice {
                letter: raw[start..start + 1].to_string(),
                text: clean_choice_text(&raw[start + 2..end]),
            }
        })
        .collect();

    ParsedQuestion { stem, choices }
}

/// Byte offsets of every choice marker, in ascending order.
fn marker_offsets(raw: &str) -> Vec<usize> {
    let bytes = raw.as_bytes();
    let mut offsets = Vec::new();
    for index in 0..bytes.len().saturating_sub(1) {
        if !matches!(bytes[index], b'A'..=b'E') || bytes[index + 1] != b':' {
            continue;
        }
        let at_boundary = index == 0 || !bytes[index - 1].is_ascii_alphanumeric();
        if at_boundary {
            offsets.push(index);
        }
    }
    offsets
}

fn clean_choice_text(text: &str) -> String {
    text.trim().trim_end_matches(',').trim().to_string()
}
