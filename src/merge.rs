//! Reconciles a local entry list with a remote snapshot.
//!
//! Entries are keyed by exact `text`. The remote side wins every category disagreement; texts
//! known to only one side are kept. The result holds exactly one entry per distinct text:
//! local order first, then remote-only entries in remote order. A text duplicated locally is
//! reported once, against its first occurrence whose category differs from the remote.

use std::collections::{HashMap, HashSet};

use crate::model::{Conflict, Entry};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: Vec<Entry>,
    pub conflicts: Vec<Conflict>,
}

impl MergeOutcome {
    /// True when `merged` is not identical to `local` (size, content or order).
    pub fn differs_from(&self, local: &[Entry]) -> bool {
        self.merged.as_slice() != local
    }
}

pub fn merge_entries(local: &[Entry], remote: &[Entry]) -> MergeOutcome {
    let mut remote_by_text: HashMap<&str, &Entry> = HashMap::with_capacity(remote.len());
    for entry in remote {
        remote_by_text.entry(entry.text.as_str()).or_insert(entry);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(local.len() + remote.len());
    let mut conflicted: HashSet<&str> = HashSet::new();
    let mut merged = Vec::with_capacity(local.len() + remote.len());
    let mut conflicts = Vec::new();

    for entry in local {
        let text = entry.text.as_str();
        let theirs = remote_by_text.get(text).copied();

        // Every local duplicate is checked; the first differing one is reported.
        if let Some(theirs) = theirs
            && theirs.category != entry.category
            && conflicted.insert(text)
        {
            conflicts.push(Conflict {
                text: entry.text.clone(),
                local_category: entry.category.clone(),
                server_category: theirs.category.clone(),
            });
        }

        if seen.insert(text) {
            merged.push(theirs.unwrap_or(entry).clone());
        }
    }

    for entry in remote {
        if seen.insert(entry.text.as_str()) {
            merged.push(entry.clone());
        }
    }

    MergeOutcome { merged, conflicts }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
