#![allow(dead_code)]

use drillforge::engine::mode::ArmMode;
use drillforge::engine::{InputOutcome, PracticeEngine};
use drillforge::keybinds::{KeybindTable, Role};
use drillforge::sequences::{Sequence, SequenceBook};
use drillforge::store::MemoryStore;
use drillforge::token::RawInput;
use std::time::{Duration, Instant};

/// Q/E/F/C/G for building pieces, R resets, Escape stops, P and L arm.
pub fn default_keybinds() -> KeybindTable {
    KeybindTable::new()
        .bind(Role::Wall, "q")
        .bind(Role::Floor, "e")
        .bind(Role::Ramp, "f")
        .bind(Role::Cone, "c")
        .bind(Role::Edit, "g")
        .bind(Role::Reset, "r")
        .bind(Role::Play, "p")
        .bind(Role::Stop, "Escape")
        .bind(Role::PlayLoop, "l")
}

pub fn book(sequences: &[(&str, &[&str])]) -> SequenceBook {
    sequences
        .iter()
        .map(|(name, steps)| Sequence::new(name, steps.iter().copied()))
        .collect()
}

pub fn default_book() -> SequenceBook {
    book(&[
        ("Wall Floor", &["wall", "floor"]),
        ("Ramp Rush", &["wall", "ramp", "floor", "cone"]),
        ("Edit Peek", &["wall", "edit", "lmb"]),
    ])
}

pub fn memory_store() -> MemoryStore {
    MemoryStore::new(default_keybinds(), default_book())
}

pub fn engine() -> PracticeEngine<MemoryStore> {
    PracticeEngine::new(memory_store())
}

/// Engine with `sequence` selected and armed in `mode`.
pub fn armed(sequence: &str, mode: ArmMode) -> PracticeEngine<MemoryStore> {
    let mut engine = engine();
    engine.select(sequence).unwrap();
    engine.arm(mode).unwrap();
    engine
}

/// Feeds keys one after another, `step_ms` apart, starting at `start`.
/// Returns the outcome of every input.
pub struct Feeder {
    pub clock: Instant,
    pub step: Duration,
}

impl Feeder {
    pub fn new(step_ms: u64) -> Self {
        Self {
            clock: Instant::now(),
            step: Duration::from_millis(step_ms),
        }
    }

    pub fn input(
        &mut self,
        engine: &mut PracticeEngine<MemoryStore>,
        raw: RawInput,
    ) -> InputOutcome {
        let outcome = engine.handle_input(raw, self.clock);
        self.clock += self.step;
        outcome
    }

    pub fn keys(&mut self, engine: &mut PracticeEngine<MemoryStore>, keys: &str) -> Vec<InputOutcome> {
        keys.chars()
            .map(|c| self.input(engine, RawInput::char(c)))
            .collect()
    }
}

pub fn completed(outcomes: &[InputOutcome]) -> usize {
    outcomes
        .iter()
        .filter(|o| matches!(o, InputOutcome::Completed(_)))
        .count()
}
