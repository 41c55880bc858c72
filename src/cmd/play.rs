use crate::reports::{self, live::LiveScreen};
use clap::Args;
use drillforge::config::Config;
use drillforge::engine::mode::ArmMode;
use drillforge::engine::PracticeEngine;
use drillforge::error::DrResult;
use drillforge::session::run_session;
use drillforge::store::JsonStore;
use drillforge::terminal::TerminalInput;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Name of the sequence to practice (case-insensitive)
    pub sequence: String,

    /// Re-arm after every completion instead of stopping
    #[arg(short = 'l', long = "loop", default_value_t = false)]
    pub looping: bool,
}

pub fn run(args: PlayArgs, config: &Config) -> DrResult<()> {
    let mut engine = PracticeEngine::new(JsonStore::new(&config.store));
    let name = engine.select(&args.sequence)?.name.clone();

    let mode = if args.looping {
        ArmMode::Looping
    } else {
        ArmMode::Single
    };

    let mut screen = LiveScreen::new();
    let mut input = TerminalInput::new();
    let poll = config.capture.poll_interval();

    let session = run_session(&mut engine, &mut input, mode, poll, |engine, outcome| {
        screen.draw(engine, Some(outcome))
    });
    screen.finish()?;
    session?;

    info!("Session on '{}' ended", name);
    if let Some(report) = engine.last_report() {
        reports::print_report(report);
    }
    if let Some(display) = engine.derive(&name) {
        reports::print_stats_table(&[(name, display)]);
    }
    Ok(())
}
