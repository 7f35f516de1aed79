//! Session-lived cache of author display names.
//!
//! Rankings are computed with whatever names are cached at the time and
//! fall back to a shortened identifier. Callers resolve the identifiers
//! reported by [`UserNameCache::missing`] and feed the results back through
//! [`UserNameCache::insert`]; entries are never evicted or replaced.

use std::collections::{HashMap, HashSet};

use crate::types::UserId;

/// Number of identifier characters shown when no name is cached.
pub const FALLBACK_LABEL_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct UserNameCache {
    names: HashMap<UserId, String>,
}

impl UserNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &UserId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.names.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Record a resolved name. Returns `false` if the id was already cached,
    /// in which case the existing entry is kept.
    pub fn insert(&mut self, id: UserId, name: impl Into<String>) -> bool {
        if self.names.contains_key(&id) {
            return false;
        }
        self.names.insert(id, name.into());
        true
    }

    /// Identifiers not yet cached, deduplicated, in first-seen order.
    pub fn missing<'a, I>(&self, ids: I) -> Vec<UserId>
    where
        I: IntoIterator<Item = &'a UserId>,
    {
        let mut seen = HashSet::new();
        ids.into_iter()
            .filter(|id| !self.names.contains_key(id))
            .filter(|id| seen.insert(**id))
            .copied()
            .collect()
    }

    /// Display label for an author: the cached name or a shortened id.
    pub fn label_for(&self, id: &UserId) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_label(id))
    }
}

/// First [`FALLBACK_LABEL_LEN`] characters of the identifier.
pub fn fallback_label(id: &UserId) -> String {
    id.to_string().chars().take(FALLBACK_LABEL_LEN).collect()
}
