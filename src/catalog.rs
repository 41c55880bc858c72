use crate::keybinds::KeybindTable;
use crate::resolver::ActionResolver;
use crate::sequences::SequenceBook;
use crate::store::Store;
use tracing::debug;

/// Change notifications raised by whoever edits the persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    KeybindsUpdated,
    SequencesUpdated,
}

/// Engine-owned snapshot of the externally edited records.
///
/// Only [`Catalog::refresh`] replaces the snapshot; nothing re-reads the
/// store behind the engine's back.
#[derive(Debug, Clone)]
pub struct Catalog {
    keybinds: KeybindTable,
    resolver: ActionResolver,
    keybinds_version: u64,
    sequences: SequenceBook,
}

impl Catalog {
    pub fn load<S: Store + ?Sized>(store: &S) -> Self {
        let keybinds = store.load_keybinds();
        let resolver = ActionResolver::new(&keybinds);
        Self {
            keybinds,
            resolver,
            keybinds_version: 0,
            sequences: store.load_sequences(),
        }
    }

    pub fn refresh<S: Store + ?Sized>(&mut self, store: &S, event: StoreEvent) {
        match event {
            StoreEvent::KeybindsUpdated => {
                self.keybinds = store.load_keybinds();
                self.resolver = ActionResolver::new(&self.keybinds);
                self.keybinds_version += 1;
                debug!("Keybinds refreshed (version {})", self.keybinds_version);
            }
            StoreEvent::SequencesUpdated => {
                self.sequences = store.load_sequences();
                debug!("Sequences refreshed ({} loaded)", self.sequences.len());
            }
        }
    }

    pub fn keybinds(&self) -> &KeybindTable {
        &self.keybinds
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    pub fn keybinds_version(&self) -> u64 {
        self.keybinds_version
    }

    pub fn sequences(&self) -> &SequenceBook {
        &self.sequences
    }
}
