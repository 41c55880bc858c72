use crate::keybinds::Role;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArmMode {
    /// Stop after one completed attempt.
    Single,
    /// Re-arm after every completion until stopped.
    Looping,
}

/// What happens once a completed attempt has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterCompletion {
    Halt,
    Continue,
}

impl ArmMode {
    pub fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Play => Some(ArmMode::Single),
            Role::PlayLoop => Some(ArmMode::Looping),
            _ => None,
        }
    }

    pub fn after_completion(self) -> AfterCompletion {
        match self {
            ArmMode::Single => AfterCompletion::Halt,
            ArmMode::Looping => AfterCompletion::Continue,
        }
    }

    /// Whether the previous completion readout stays up while the next
    /// attempt is in progress.
    pub fn keeps_last_readout(self) -> bool {
        self == ArmMode::Looping
    }
}
