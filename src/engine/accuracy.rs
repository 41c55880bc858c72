use crate::resolver::ActionResolver;
use crate::stats::PERFECT;
use crate::token::PhysicalToken;
use strum_macros::Display;

/// Position-aligned accuracy as a rounded percentage.
///
/// Input `i` scores only if it resolves to exactly `steps[i]`; there is no
/// credit for right-action-wrong-slot.
pub fn accuracy(tokens: &[PhysicalToken], steps: &[String], resolver: &ActionResolver) -> u8 {
    if tokens.is_empty() || steps.is_empty() {
        return 0;
    }

    let matches = tokens
        .iter()
        .zip(steps)
        .filter(|(token, step)| resolver.resolve(token) == step.as_str())
        .count();

    ((matches as f64 / steps.len() as f64) * 100.0).round() as u8
}

/// One step of the expected sequence next to what was entered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMark {
    pub expected: String,
    /// Resolved action name of the input in this slot, if any.
    pub input: Option<String>,
    pub correct: bool,
}

pub fn marks(tokens: &[PhysicalToken], steps: &[String], resolver: &ActionResolver) -> Vec<StepMark> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let input = tokens.get(i).map(|t| resolver.resolve(t).to_string());
            StepMark {
                expected: step.clone(),
                correct: input.as_deref() == Some(step.as_str()),
                input,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Verdict {
    #[strum(to_string = "PERFECT!")]
    Perfect,
    #[strum(to_string = "MISTAKE!")]
    Mistake,
}

impl Verdict {
    pub fn of(accuracy: u8) -> Self {
        if accuracy == PERFECT {
            Verdict::Perfect
        } else {
            Verdict::Mistake
        }
    }
}
