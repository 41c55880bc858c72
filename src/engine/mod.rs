//! The practice engine: input capture, attempt matching, scoring, stats
//! commits and the loop policy, driven one input event at a time.
//!
//! ```text
//! Idle --arm--> Armed/Empty --token--> Armed/Partial(n) --last token--> Complete
//!   ^               ^   ^                    |                             |
//!   |               |   +-------reset--------+                             |
//!   |               +--------------- looping: commit, re-arm --------------+
//!   +--------------------- single: commit, halt / stop --------------------+
//! ```

pub mod accuracy;
pub mod attempt;
pub mod capture;
pub mod mode;

use self::accuracy::StepMark;
use self::attempt::{AttemptReport, EngineState, Phase, Progress};
use self::capture::{Captured, PassReason};
use self::mode::{AfterCompletion, ArmMode};
use crate::catalog::{Catalog, StoreEvent};
use crate::error::{DrResult, DrillError};
use crate::keybinds::Role;
use crate::sequences::Sequence;
use crate::stats::{DisplayStats, StatsBook};
use crate::store::Store;
use crate::token::{PhysicalToken, RawInput};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What handling one input event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// No effect; the platform's default action should go ahead.
    Passed,
    Accepted { count: usize, of: usize },
    Completed(AttemptReport),
    Reset,
    Stopped,
    Armed(ArmMode),
}

impl InputOutcome {
    /// Whether the platform default for this input should be suppressed.
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, InputOutcome::Passed)
    }
}

pub struct PracticeEngine<S: Store> {
    store: S,
    catalog: Catalog,
    stats: StatsBook,
    selected: Option<Sequence>,
    state: EngineState,
    last: Option<AttemptReport>,
}

impl<S: Store> PracticeEngine<S> {
    pub fn new(store: S) -> Self {
        let catalog = Catalog::load(&store);
        let stats = store.load_stats();
        info!(
            "Engine ready: {} sequences, {} stats records",
            catalog.sequences().len(),
            stats.len()
        );
        Self {
            store,
            catalog,
            stats,
            selected: None,
            state: EngineState::Idle,
            last: None,
        }
    }

    // --- Selection & arming ---

    /// Selects a sequence by name (case-insensitive). Any attempt in
    /// progress is discarded and the engine returns to idle.
    pub fn select(&mut self, name: &str) -> DrResult<&Sequence> {
        let sequence = self
            .catalog
            .sequences()
            .find(name)
            .cloned()
            .ok_or_else(|| DrillError::UnknownSequence(name.to_string()))?;

        self.stop();
        self.last = None;
        info!("Selected sequence '{}' ({} steps)", sequence.name, sequence.len());
        Ok(self.selected.insert(sequence))
    }

    /// Arms for a fresh attempt, replacing whatever attempt existed. The
    /// last completion readout stays until the first input of a single run.
    pub fn arm(&mut self, mode: ArmMode) -> DrResult<()> {
        let sequence = self
            .selected
            .as_ref()
            .ok_or_else(|| DrillError::Validation("no sequence selected".into()))?;
        if sequence.is_empty() {
            return Err(DrillError::Validation(format!(
                "sequence '{}' has no steps",
                sequence.name
            )));
        }

        info!("Armed '{}' ({})", sequence.name, mode);
        self.state = EngineState::armed(mode);
        Ok(())
    }

    /// Back to idle, discarding any uncommitted attempt.
    pub fn stop(&mut self) {
        if let EngineState::Armed { attempt, .. } = &self.state {
            info!("Stopped ({} inputs discarded)", attempt.len());
        }
        self.state = EngineState::Idle;
    }

    /// Clears the current attempt while staying armed. The last completion
    /// readout is kept. Returns false when not armed.
    pub fn reset_sequence(&mut self) -> bool {
        match &mut self.state {
            EngineState::Armed { attempt, .. } => {
                debug!("Attempt reset after {} inputs", attempt.len());
                attempt.clear();
                true
            }
            EngineState::Idle => false,
        }
    }

    // --- Input ---

    pub fn handle_input(&mut self, raw: RawInput, at: Instant) -> InputOutcome {
        match capture::classify(&raw, self.catalog.keybinds()) {
            Captured::Pass(reason) => {
                if reason == PassReason::UiControl {
                    debug!("Ignoring click on UI control");
                }
                InputOutcome::Passed
            }
            Captured::Control(role) => self.control(role),
            Captured::Practice(token) => self.accept(token, at),
        }
    }

    fn control(&mut self, role: Role) -> InputOutcome {
        if let Some(mode) = ArmMode::from_role(role) {
            return match self.arm(mode) {
                Ok(()) => InputOutcome::Armed(mode),
                Err(e) => {
                    debug!("'{}' ignored: {}", role, e);
                    InputOutcome::Passed
                }
            };
        }

        match (role, self.is_armed()) {
            (Role::Reset, true) => {
                self.reset_sequence();
                InputOutcome::Reset
            }
            (Role::Stop, true) => {
                self.stop();
                InputOutcome::Stopped
            }
            _ => InputOutcome::Passed,
        }
    }

    fn accept(&mut self, token: PhysicalToken, at: Instant) -> InputOutcome {
        let Some(sequence) = &self.selected else {
            return InputOutcome::Passed;
        };
        let EngineState::Armed { mode, attempt } = &mut self.state else {
            return InputOutcome::Passed;
        };

        if attempt.is_empty() && !mode.keeps_last_readout() {
            self.last = None;
        }

        debug!("Accepted '{}'", token);
        let len = sequence.len();
        match attempt.accept(token, at, len) {
            Progress::Partial(count) => InputOutcome::Accepted { count, of: len },
            Progress::Complete => self.complete(at),
            Progress::Full => InputOutcome::Passed,
        }
    }

    fn complete(&mut self, at: Instant) -> InputOutcome {
        let (EngineState::Armed { mode, attempt }, Some(sequence)) = (&self.state, &self.selected)
        else {
            return InputOutcome::Passed;
        };
        let mode = *mode;

        let resolver = self.catalog.resolver();
        let accuracy = accuracy::accuracy(attempt.tokens(), &sequence.steps, resolver);
        let report = AttemptReport {
            sequence: sequence.name.clone(),
            elapsed_ms: attempt.elapsed_ms(at),
            accuracy,
            marks: accuracy::marks(attempt.tokens(), &sequence.steps, resolver),
        };

        match report.elapsed_ms {
            Some(ms) => self.commit(&report.sequence, ms, accuracy),
            None => warn!("Attempt on '{}' completed without a start time", report.sequence),
        }

        self.state = match mode.after_completion() {
            AfterCompletion::Halt => EngineState::Idle,
            AfterCompletion::Continue => EngineState::armed(mode),
        };
        self.last = Some(report.clone());
        InputOutcome::Completed(report)
    }

    fn commit(&mut self, sequence: &str, elapsed_ms: u64, accuracy: u8) {
        let record = self.stats.commit(sequence, elapsed_ms, accuracy);
        info!(
            "Committed '{}': {}ms at {}% (attempt #{})",
            sequence, elapsed_ms, accuracy, record.total_attempts
        );
        if let Err(e) = self.store.save_stats(&self.stats) {
            warn!("Failed to persist stats: {}", e);
        }
    }

    // --- External updates ---

    /// Applies a change notification. Keybind changes drop a partial
    /// attempt; sequence changes stop the engine if the selected sequence
    /// was removed or edited.
    pub fn refresh(&mut self, event: StoreEvent) {
        self.catalog.refresh(&self.store, event);

        match event {
            StoreEvent::KeybindsUpdated => {
                if let EngineState::Armed { attempt, .. } = &mut self.state {
                    if !attempt.is_empty() {
                        debug!("Keybinds changed mid-attempt, resetting");
                        attempt.clear();
                    }
                }
            }
            StoreEvent::SequencesUpdated => {
                let Some(current) = &self.selected else {
                    return;
                };
                match self.catalog.sequences().find(&current.name) {
                    Some(fresh) if fresh == current => {}
                    Some(fresh) => {
                        info!("Sequence '{}' changed, stopping", fresh.name);
                        self.selected = Some(fresh.clone());
                        self.stop();
                    }
                    None => {
                        warn!("Sequence '{}' was removed, stopping", current.name);
                        self.selected = None;
                        self.stop();
                    }
                }
            }
        }
    }

    // --- Stats ---

    pub fn derive(&self, sequence: &str) -> Option<DisplayStats> {
        self.stats.derive(sequence)
    }

    /// Deletes the stats record for a sequence and persists the change.
    pub fn clear_stats(&mut self, sequence: &str) -> DrResult<bool> {
        let existed = self.stats.clear(sequence);
        if existed {
            self.store.save_stats(&self.stats)?;
            info!("Cleared stats for '{}'", sequence);
        }
        Ok(existed)
    }

    // --- Views ---

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, EngineState::Armed { .. })
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            EngineState::Idle => Phase::Idle,
            EngineState::Armed { attempt, .. } if attempt.is_empty() => Phase::Empty,
            EngineState::Armed { attempt, .. } => Phase::Partial(attempt.len()),
        }
    }

    pub fn mode(&self) -> Option<ArmMode> {
        match &self.state {
            EngineState::Armed { mode, .. } => Some(*mode),
            EngineState::Idle => None,
        }
    }

    pub fn selected(&self) -> Option<&Sequence> {
        self.selected.as_ref()
    }

    pub fn last_report(&self) -> Option<&AttemptReport> {
        self.last.as_ref()
    }

    /// Per-step view of the attempt in progress.
    pub fn marks(&self) -> Vec<StepMark> {
        let (Some(sequence), EngineState::Armed { attempt, .. }) = (&self.selected, &self.state)
        else {
            return Vec::new();
        };
        accuracy::marks(attempt.tokens(), &sequence.steps, self.catalog.resolver())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stats(&self) -> &StatsBook {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
