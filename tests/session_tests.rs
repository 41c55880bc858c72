mod common;

use drillforge::engine::mode::ArmMode;
use drillforge::engine::InputOutcome;
use drillforge::error::{DrResult, DrillError};
use drillforge::session::{run_session, Attached, InputSource, SourceEvent};
use drillforge::token::RawInput;
use std::collections::VecDeque;
use std::time::Duration;

/// Replays a fixed script and counts listener lifecycle calls.
#[derive(Default)]
struct ScriptedSource {
    script: VecDeque<DrResult<Option<SourceEvent>>>,
    attached: usize,
    detached: usize,
    fail_attach: bool,
}

impl ScriptedSource {
    fn keys(keys: &str) -> Self {
        Self {
            script: keys
                .chars()
                .map(|c| Ok(Some(SourceEvent::Input(RawInput::char(c)))))
                .collect(),
            ..Self::default()
        }
    }

    fn then(mut self, event: DrResult<Option<SourceEvent>>) -> Self {
        self.script.push_back(event);
        self
    }
}

impl InputSource for ScriptedSource {
    fn attach(&mut self) -> DrResult<()> {
        if self.fail_attach {
            return Err(DrillError::Terminal("no tty".into()));
        }
        self.attached += 1;
        Ok(())
    }

    fn detach(&mut self) {
        self.detached += 1;
    }

    fn poll(&mut self, _timeout: Duration) -> DrResult<Option<SourceEvent>> {
        // An exhausted script behaves like the operator quitting.
        self.script.pop_front().unwrap_or(Ok(Some(SourceEvent::Quit)))
    }
}

const POLL: Duration = Duration::from_millis(1);

#[test]
fn test_single_session_ends_on_completion() {
    let mut engine = common::engine();
    engine.select("Wall Floor").unwrap();
    let mut source = ScriptedSource::keys("qe");
    let mut seen = Vec::new();

    run_session(&mut engine, &mut source, ArmMode::Single, POLL, |_, o| {
        seen.push(o.clone());
        Ok(())
    })
    .unwrap();

    assert_eq!(seen[0], InputOutcome::Armed(ArmMode::Single));
    assert_eq!(common::completed(&seen), 1);
    assert_eq!(seen.len(), 3);
    assert!(!engine.is_armed());
    assert_eq!((source.attached, source.detached), (1, 1));
}

#[test]
fn test_looping_session_runs_until_quit() {
    let mut engine = common::engine();
    engine.select("Wall Floor").unwrap();
    let mut source = ScriptedSource::keys("qeqe").then(Ok(None)).then(Ok(Some(SourceEvent::Quit)));
    let mut seen = Vec::new();

    run_session(&mut engine, &mut source, ArmMode::Looping, POLL, |_, o| {
        seen.push(o.clone());
        Ok(())
    })
    .unwrap();

    assert_eq!(common::completed(&seen), 2);
    assert_eq!(seen.last(), Some(&InputOutcome::Stopped));
    assert_eq!(engine.store().stats_writes, 2);
    assert_eq!((source.attached, source.detached), (1, 1));
}

#[test]
fn test_source_error_detaches_and_stops() {
    let mut engine = common::engine();
    engine.select("Ramp Rush").unwrap();
    let mut source =
        ScriptedSource::keys("q").then(Err(DrillError::Terminal("read failed".into())));

    let result = run_session(&mut engine, &mut source, ArmMode::Looping, POLL, |_, _| Ok(()));

    assert!(matches!(result, Err(DrillError::Terminal(_))));
    assert!(!engine.is_armed());
    assert_eq!((source.attached, source.detached), (1, 1));
    assert_eq!(engine.store().stats_writes, 0);
}

#[test]
fn test_observer_error_detaches() {
    let mut engine = common::engine();
    engine.select("Wall Floor").unwrap();
    let mut source = ScriptedSource::keys("q");

    let result = run_session(&mut engine, &mut source, ArmMode::Single, POLL, |_, _| {
        Err(DrillError::Terminal("draw failed".into()))
    });

    assert!(result.is_err());
    assert!(!engine.is_armed());
    assert_eq!(source.detached, 1);
}

#[test]
fn test_failed_attach_never_detaches() {
    let mut engine = common::engine();
    engine.select("Wall Floor").unwrap();
    let mut source = ScriptedSource {
        fail_attach: true,
        ..ScriptedSource::default()
    };

    let result = run_session(&mut engine, &mut source, ArmMode::Single, POLL, |_, _| Ok(()));

    assert!(result.is_err());
    assert!(!engine.is_armed());
    assert_eq!((source.attached, source.detached), (0, 0));
}

#[test]
fn test_unselected_engine_never_attaches() {
    let mut engine = common::engine();
    let mut source = ScriptedSource::keys("qe");

    let result = run_session(&mut engine, &mut source, ArmMode::Single, POLL, |_, _| Ok(()));

    assert!(matches!(result, Err(DrillError::Validation(_))));
    assert_eq!(source.attached, 0);
}

#[test]
fn test_guard_detaches_on_drop() {
    let mut source = ScriptedSource::default();
    {
        let mut guard = Attached::attach(&mut source).unwrap();
        assert_eq!(guard.poll(POLL).unwrap(), Some(SourceEvent::Quit));
    }
    assert_eq!((source.attached, source.detached), (1, 1));
}
