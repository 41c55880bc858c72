use crate::reports;
use clap::{Args, Subcommand};
use drillforge::config::Config;
use drillforge::error::DrResult;
use drillforge::keybinds::{KeybindTable, Role};
use drillforge::store::{JsonStore, Store};
use drillforge::token::PhysicalToken;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct KeybindsArgs {
    #[command(subcommand)]
    pub action: KeybindsAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum KeybindsAction {
    /// Show the current bindings
    Show,
    /// Bind a role (wall, floor, ramp, cone, edit, reset, play, stop, playLoop)
    Set {
        role: Role,
        /// Key character, key code or MouseN
        token: String,
    },
    /// Remove the binding of a role
    Unset { role: Role },
    /// Replace the comma-separated ignored list
    Ignore { list: String },
    /// Remove every binding and ignored key
    Clear,
}

pub fn run(args: KeybindsArgs, config: &Config) -> DrResult<()> {
    let mut store = JsonStore::new(&config.store);
    let mut table = store.load_keybinds();

    match args.action {
        KeybindsAction::Show => {
            reports::print_keybinds(&table);
            return Ok(());
        }
        KeybindsAction::Set { role, token } => {
            let token = PhysicalToken::from_binding(&token);
            if token.is_none() {
                warn!("Empty token, '{}' will be unbound", role);
            }
            table.set(role, token);
        }
        KeybindsAction::Unset { role } => table.set(role, None),
        KeybindsAction::Ignore { list } => table.set_ignored(&list),
        KeybindsAction::Clear => table = KeybindTable::new(),
    }

    for (token, roles) in table.conflicts() {
        warn!("'{}' is bound to {} roles, the last one wins", token, roles.len());
    }
    store.save_keybinds(&table)?;
    reports::print_keybinds(&table);
    Ok(())
}
