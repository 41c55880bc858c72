use crate::keybinds::{KeybindTable, Role};
use crate::token::PhysicalToken;
use std::collections::HashMap;
use tracing::warn;

/// Logical action every left click resolves to, whatever the table says.
pub const LMB: &str = "lmb";
const LEFT_CLICK: &str = "Mouse0";

/// Reverse view of a [`KeybindTable`]: physical token -> logical action name.
#[derive(Debug, Clone, Default)]
pub struct ActionResolver {
    reverse: HashMap<PhysicalToken, Role>,
}

impl ActionResolver {
    /// Builds the reverse map. When a token is bound to several roles the
    /// role visited last (declaration order) keeps it.
    pub fn new(table: &KeybindTable) -> Self {
        for (token, roles) in table.conflicts() {
            if let Some(winner) = roles.last() {
                warn!(
                    "Token '{}' is bound to {:?}; resolving to '{}'",
                    token, roles, winner
                );
            }
        }

        let mut reverse = HashMap::new();
        for (role, token) in table.bindings() {
            reverse.insert(token.clone(), role);
        }
        Self { reverse }
    }

    /// Maps a token to the action name it scores as. Unbound tokens pass
    /// through unchanged and so never match a step.
    pub fn resolve<'a>(&'a self, token: &'a PhysicalToken) -> &'a str {
        if token.as_str() == LEFT_CLICK {
            return LMB;
        }
        match self.reverse.get(token) {
            Some(role) => role.as_ref(),
            None => token.as_str(),
        }
    }

    pub fn role_of(&self, token: &PhysicalToken) -> Option<Role> {
        self.reverse.get(token).copied()
    }
}
