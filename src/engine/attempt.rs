use super::accuracy::{StepMark, Verdict};
use super::mode::ArmMode;
use crate::stats::PERFECT;
use crate::token::PhysicalToken;
use std::time::Instant;

/// Inputs gathered for one attempt. The clock starts on the first token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    tokens: Vec<PhysicalToken>,
    started_at: Option<Instant>,
}

/// Where an attempt stands after accepting a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Partial(usize),
    Complete,
    /// Already complete; the token was not taken.
    Full,
}

impl Attempt {
    pub fn accept(&mut self, token: PhysicalToken, at: Instant, len: usize) -> Progress {
        if self.tokens.len() >= len {
            return Progress::Full;
        }
        if self.tokens.is_empty() {
            self.started_at = Some(at);
        }
        self.tokens.push(token);

        if self.tokens.len() == len {
            Progress::Complete
        } else {
            Progress::Partial(self.tokens.len())
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.started_at = None;
    }

    pub fn tokens(&self) -> &[PhysicalToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed_ms(&self, now: Instant) -> Option<u64> {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_millis() as u64)
    }
}

/// The engine's single state field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Idle,
    Armed { mode: ArmMode, attempt: Attempt },
}

impl EngineState {
    pub fn armed(mode: ArmMode) -> Self {
        EngineState::Armed {
            mode,
            attempt: Attempt::default(),
        }
    }
}

/// Observable position in the attempt state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Empty,
    Partial(usize),
}

/// Result of a completed attempt, kept as the last-completion readout.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub sequence: String,
    /// `None` only if the attempt never recorded a start time.
    pub elapsed_ms: Option<u64>,
    pub accuracy: u8,
    pub marks: Vec<StepMark>,
}

impl AttemptReport {
    pub fn is_perfect(&self) -> bool {
        self.accuracy == PERFECT
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::of(self.accuracy)
    }

    pub fn elapsed_sec(&self) -> Option<f64> {
        self.elapsed_ms.map(|ms| ms as f64 / 1000.0)
    }
}
