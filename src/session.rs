//! Listener lifecycle and the event pump that feeds the engine.

use crate::engine::mode::ArmMode;
use crate::engine::{InputOutcome, PracticeEngine};
use crate::error::DrResult;
use crate::store::Store;
use crate::token::RawInput;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Input(RawInput),
    /// The operator asked to leave the session.
    Quit,
}

/// A platform input source that listeners can be attached to.
pub trait InputSource {
    fn attach(&mut self) -> DrResult<()>;
    fn detach(&mut self);
    fn poll(&mut self, timeout: Duration) -> DrResult<Option<SourceEvent>>;
}

/// An attached source. Dropping it detaches exactly once.
pub struct Attached<'a, S: InputSource> {
    source: &'a mut S,
}

impl<'a, S: InputSource> Attached<'a, S> {
    pub fn attach(source: &'a mut S) -> DrResult<Self> {
        source.attach()?;
        debug!("Input listeners attached");
        Ok(Self { source })
    }

    pub fn poll(&mut self, timeout: Duration) -> DrResult<Option<SourceEvent>> {
        self.source.poll(timeout)
    }
}

impl<S: InputSource> Drop for Attached<'_, S> {
    fn drop(&mut self) {
        self.source.detach();
        debug!("Input listeners detached");
    }
}

/// Arms the engine and pumps events from `source` until the engine goes
/// idle or the operator quits. `observe` sees the initial `Armed` outcome
/// and then runs after every handled input.
///
/// Listeners are attached once for the whole armed span and detached on
/// every exit path, including errors.
pub fn run_session<S, I, F>(
    engine: &mut PracticeEngine<S>,
    source: &mut I,
    mode: ArmMode,
    poll: Duration,
    mut observe: F,
) -> DrResult<()>
where
    S: Store,
    I: InputSource,
    F: FnMut(&PracticeEngine<S>, &InputOutcome) -> DrResult<()>,
{
    engine.arm(mode)?;

    let result = Attached::attach(source).and_then(|mut listener| {
        observe(engine, &InputOutcome::Armed(mode))?;
        while engine.is_armed() {
            match listener.poll(poll)? {
                None => continue,
                Some(SourceEvent::Quit) => {
                    engine.stop();
                    observe(engine, &InputOutcome::Stopped)?;
                }
                Some(SourceEvent::Input(raw)) => {
                    let outcome = engine.handle_input(raw, Instant::now());
                    observe(engine, &outcome)?;
                }
            }
        }
        Ok(())
    });

    if result.is_err() {
        engine.stop();
    }
    result
}
