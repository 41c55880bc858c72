use crate::reports;
use clap::{Args, Subcommand};
use drillforge::config::Config;
use drillforge::error::{DrResult, DrillError};
use drillforge::sequences::Sequence;
use drillforge::store::{JsonStore, Store};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SequencesArgs {
    #[command(subcommand)]
    pub action: SequencesAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SequencesAction {
    /// List stored sequences
    List,
    /// Record a new sequence from step names (wall floor ramp cone edit lmb)
    Add {
        name: String,
        #[arg(required = true, num_args = 1..)]
        steps: Vec<String>,
    },
    /// Delete a sequence by name
    Remove { name: String },
}

pub fn run(args: SequencesArgs, config: &Config) -> DrResult<()> {
    let mut store = JsonStore::new(&config.store);
    let mut book = store.load_sequences();

    match args.action {
        SequencesAction::List => reports::print_sequences(&book),
        SequencesAction::Add { name, steps } => {
            let sequence = Sequence::author(&name, &steps)?;
            info!("Recording '{}' ({} steps)", sequence.name, sequence.len());
            let summary = format!("✅ Saved '{}': {}", sequence.name, sequence.steps.join(" > "));
            book.add(sequence)?;
            store.save_sequences(&book)?;
            println!("{}", summary);
        }
        SequencesAction::Remove { name } => {
            let removed = book
                .remove(&name)
                .ok_or_else(|| DrillError::UnknownSequence(name.clone()))?;
            store.save_sequences(&book)?;
            println!("🗑️  Removed '{}'", removed.name);
        }
    }
    Ok(())
}
