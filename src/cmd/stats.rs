use crate::reports;
use clap::Args;
use drillforge::config::Config;
use drillforge::engine::PracticeEngine;
use drillforge::error::DrResult;
use drillforge::store::JsonStore;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Only report this sequence
    pub sequence: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    pub sequence: String,
}

pub fn run(args: StatsArgs, config: &Config) -> DrResult<()> {
    let engine = PracticeEngine::new(JsonStore::new(&config.store));

    let rows: Vec<_> = match &args.sequence {
        Some(filter) => {
            let name = canonical(&engine, filter);
            engine.derive(&name).map(|d| (name, d)).into_iter().collect()
        }
        None => engine
            .stats()
            .iter()
            .filter_map(|(name, s)| s.display().map(|d| (name.to_string(), d)))
            .collect(),
    };

    if rows.is_empty() {
        println!("No attempts recorded yet.");
        return Ok(());
    }
    reports::print_stats_table(&rows);
    Ok(())
}

pub fn clear(args: ClearArgs, config: &Config) -> DrResult<()> {
    let mut engine = PracticeEngine::new(JsonStore::new(&config.store));
    let name = canonical(&engine, &args.sequence);

    if engine.clear_stats(&name)? {
        println!("🧹 Cleared stats for '{}'", name);
    } else {
        println!("No stats recorded for '{}'", name);
    }
    Ok(())
}

/// Stats are keyed by the exact stored name; map user input onto it.
fn canonical<S: drillforge::store::Store>(engine: &PracticeEngine<S>, name: &str) -> String {
    engine
        .catalog()
        .sequences()
        .find(name)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| name.to_string())
}
