use crate::token::PhysicalToken;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Logical roles a physical input can be bound to.
///
/// Declaration order matters: it is the order in which bindings are visited
/// when the reverse lookup is built.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Wall,
    Floor,
    Ramp,
    Cone,
    Edit,
    Reset,
    Play,
    Stop,
    PlayLoop,
}

impl Role {
    /// Roles that drive the session instead of being practiced.
    pub fn is_control(self) -> bool {
        matches!(self, Role::Reset | Role::Play | Role::Stop | Role::PlayLoop)
    }
}

/// Persisted `keybinds` record. Every field is a string; empty means unbound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeybindsRecord {
    pub wall: String,
    pub floor: String,
    pub ramp: String,
    pub cone: String,
    pub edit: String,
    pub reset: String,
    pub play: String,
    pub stop: String,
    pub play_loop: String,
    pub ignored_keys: String,
}

impl KeybindsRecord {
    fn field(&self, role: Role) -> &str {
        match role {
            Role::Wall => &self.wall,
            Role::Floor => &self.floor,
            Role::Ramp => &self.ramp,
            Role::Cone => &self.cone,
            Role::Edit => &self.edit,
            Role::Reset => &self.reset,
            Role::Play => &self.play,
            Role::Stop => &self.stop,
            Role::PlayLoop => &self.play_loop,
        }
    }

    fn field_mut(&mut self, role: Role) -> &mut String {
        match role {
            Role::Wall => &mut self.wall,
            Role::Floor => &mut self.floor,
            Role::Ramp => &mut self.ramp,
            Role::Cone => &mut self.cone,
            Role::Edit => &mut self.edit,
            Role::Reset => &mut self.reset,
            Role::Play => &mut self.play,
            Role::Stop => &mut self.stop,
            Role::PlayLoop => &mut self.play_loop,
        }
    }
}

/// In-memory keybind table: role bindings plus the ignored-token set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeybindTable {
    bindings: BTreeMap<Role, PhysicalToken>,
    ignored: BTreeSet<PhysicalToken>,
}

impl KeybindTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: &KeybindsRecord) -> Self {
        let mut table = Self::new();
        for role in Role::iter() {
            table.set(role, PhysicalToken::from_binding(record.field(role)));
        }
        table.ignored = parse_ignored(&record.ignored_keys).into_iter().collect();
        table
    }

    pub fn to_record(&self) -> KeybindsRecord {
        let mut record = KeybindsRecord::default();
        for (role, token) in &self.bindings {
            *record.field_mut(*role) = token.to_string();
        }
        record.ignored_keys = self
            .ignored
            .iter()
            .map(PhysicalToken::as_str)
            .collect::<Vec<_>>()
            .join(",");
        record
    }

    /// Builder-style binding, handy for fixtures.
    pub fn bind(mut self, role: Role, token: &str) -> Self {
        self.set(role, PhysicalToken::from_binding(token));
        self
    }

    pub fn ignore(mut self, token: &str) -> Self {
        self.ignored.extend(parse_ignored(token));
        self
    }

    pub fn set(&mut self, role: Role, token: Option<PhysicalToken>) {
        match token {
            Some(t) => {
                self.bindings.insert(role, t);
            }
            None => {
                self.bindings.remove(&role);
            }
        }
    }

    pub fn set_ignored(&mut self, list: &str) {
        self.ignored = parse_ignored(list).into_iter().collect();
    }

    pub fn get(&self, role: Role) -> Option<&PhysicalToken> {
        self.bindings.get(&role)
    }

    /// Bound roles in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (Role, &PhysicalToken)> {
        self.bindings.iter().map(|(r, t)| (*r, t))
    }

    pub fn ignored(&self) -> impl Iterator<Item = &PhysicalToken> {
        self.ignored.iter()
    }

    pub fn is_ignored(&self, token: &PhysicalToken) -> bool {
        self.ignored.contains(token)
    }

    /// True when `token` is the one bound to `role`.
    pub fn is_bound_to(&self, role: Role, token: &PhysicalToken) -> bool {
        self.bindings.get(&role) == Some(token)
    }

    /// Tokens bound to more than one role, with every role that claims them.
    pub fn conflicts(&self) -> Vec<(PhysicalToken, Vec<Role>)> {
        let mut by_token: BTreeMap<&PhysicalToken, Vec<Role>> = BTreeMap::new();
        for (role, token) in &self.bindings {
            by_token.entry(token).or_default().push(*role);
        }
        by_token
            .into_iter()
            .filter(|(_, roles)| roles.len() > 1)
            .map(|(t, roles)| (t.clone(), roles))
            .collect()
    }
}

/// Parses the comma-separated ignored list into trimmed, non-empty tokens.
pub fn parse_ignored(list: &str) -> Vec<PhysicalToken> {
    list.split(',')
        .filter_map(|entry| PhysicalToken::from_binding(entry.trim()))
        .collect()
}
