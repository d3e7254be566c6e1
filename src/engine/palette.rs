// ==========================================
// Cycle Radar - branch visual keys
// ==========================================
// Explicit per-session branch -> visual key mapping.
// Built from the sequences passed in; nothing is cached between calls.
// ==========================================

use serde::Serialize;
use std::collections::HashMap;

/// Default palette: 20 distinct colour names
pub const DEFAULT_BRANCH_PALETTE: [&str; 20] = [
    "blue", "emerald", "violet", "amber", "rose", "cyan", "orange", "teal", "indigo", "pink",
    "lime", "fuchsia", "sky", "red", "green", "purple", "yellow", "slate", "stone", "zinc",
];

/// Branch id -> palette entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchKeyMap<K> {
    keys: HashMap<i64, K>,
}

impl<K: Clone> BranchKeyMap<K> {
    /// Assign palette entries round-robin, in first-seen order of `branch_ids`
    ///
    /// The same branch always keeps its first assignment; an empty palette
    /// yields an empty map.
    pub fn assign<I>(branch_ids: I, palette: &[K]) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut keys = HashMap::new();
        if palette.is_empty() {
            return Self { keys };
        }

        let mut next = 0usize;
        for branch_id in branch_ids {
            keys.entry(branch_id).or_insert_with(|| {
                let key = palette[next % palette.len()].clone();
                next += 1;
                key
            });
        }
        Self { keys }
    }

    /// Build with a lookup function instead of a palette
    pub fn from_lookup<I, F>(branch_ids: I, mut lookup: F) -> Self
    where
        I: IntoIterator<Item = i64>,
        F: FnMut(i64) -> K,
    {
        let mut keys = HashMap::new();
        for branch_id in branch_ids {
            keys.entry(branch_id).or_insert_with(|| lookup(branch_id));
        }
        Self { keys }
    }

    pub fn key_for(&self, branch_id: i64) -> Option<&K> {
        self.keys.get(&branch_id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
