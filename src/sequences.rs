use crate::error::{DrResult, DrillError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Minimum number of steps a newly authored sequence must have.
pub const MIN_STEPS: usize = 2;

/// Step vocabulary offered when authoring a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Action {
    Wall,
    Floor,
    Ramp,
    Cone,
    Edit,
    Lmb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    pub steps: Vec<String>,
}

impl Sequence {
    pub fn new<S: Into<String>>(name: &str, steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a sequence from user-typed step names, checking them against
    /// the authoring vocabulary.
    pub fn author(name: &str, steps: &[String]) -> DrResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DrillError::Validation("sequence name is empty".into()));
        }
        if steps.len() < MIN_STEPS {
            return Err(DrillError::Validation(format!(
                "a sequence needs at least {} steps, got {}",
                MIN_STEPS,
                steps.len()
            )));
        }

        let steps = steps
            .iter()
            .map(|s| {
                Action::from_str(s.trim())
                    .map(|a| a.to_string())
                    .map_err(|_| DrillError::Validation(format!("unknown step '{}'", s)))
            })
            .collect::<DrResult<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            steps,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

/// The persisted `sequences` array. Names are unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SequenceBook {
    sequences: Vec<Sequence>,
}

impl SequenceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.is_named(name))
    }

    pub fn add(&mut self, sequence: Sequence) -> DrResult<()> {
        if self.find(&sequence.name).is_some() {
            return Err(DrillError::Validation(format!(
                "a sequence named '{}' already exists",
                sequence.name
            )));
        }
        self.sequences.push(sequence);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Sequence> {
        let idx = self.sequences.iter().position(|s| s.is_named(name))?;
        Some(self.sequences.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl FromIterator<Sequence> for SequenceBook {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        let mut book = SequenceBook::new();
        for seq in iter {
            // Stored data may predate the uniqueness rule; first one wins.
            if book.find(&seq.name).is_none() {
                book.sequences.push(seq);
            }
        }
        book
    }
}
