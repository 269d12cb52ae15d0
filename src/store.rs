use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

use crate::error::{QuoteError, QuoteResult};
use crate::kv::{
    KEY_LAST_FILTER, KEY_LAST_SYNC_TIME, KEY_LAST_VIEWED, KEY_PENDING_CHANGES, KEY_QUOTES,
    KeyValueStore,
};
use crate::model::{ALL_CATEGORIES, CategoryFilter, Entry, RejectReason, SyncState, default_entries};

mod random;

/// Result of a random pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pick {
    Quote(Entry),
    /// The active filter matches nothing.
    Empty,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Dropped elements with their index in the payload.
    pub rejected: Vec<(usize, RejectReason)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StoreStatus {
    pub entries: usize,
    pub filter: String,
    pub pending_changes: bool,
    pub last_sync_time: Option<String>,
}

/// Owns the entry list, the active filter and the sync bookkeeping.
///
/// Every mutation is written through to the key/value store before it becomes visible, so a
/// failed write leaves the entries and the filter untouched. A local edit raises the dirty flag
/// before saving the entries; when that save fails the flag stays raised, costing at most one
/// extra push.
pub struct EntryStore {
    kv: Arc<dyn KeyValueStore>,
    entries: Vec<Entry>,
    filter: CategoryFilter,
    sync: SyncState,
    // Bumped on every local add/import; lets a finished push tell whether newer edits arrived.
    revision: u64,
}

impl EntryStore {
    /// Loads persisted state, seeding (and persisting) the default quotes on first use.
    pub fn open(kv: Arc<dyn KeyValueStore>) -> QuoteResult<Self> {
        let entries = match kv.get(KEY_QUOTES)? {
            Some(raw) => {
                serde_json::from_str::<Vec<Entry>>(&raw).context("parse stored quotes")?
            }
            None => {
                let seeds = default_entries();
                save_entries(kv.as_ref(), &seeds)?;
                info!(count = seeds.len(), "seeded default quotes");
                seeds
            }
        };

        let filter = kv
            .get(KEY_LAST_FILTER)?
            .map(|s| CategoryFilter::parse(&s))
            .unwrap_or_default();

        let pending_changes = kv.get(KEY_PENDING_CHANGES)?.as_deref() == Some("true");

        let last_sync_time = match kv.get(KEY_LAST_SYNC_TIME)? {
            Some(s) => match OffsetDateTime::parse(s.trim(), &Rfc3339) {
                Ok(ts) => Some(ts),
                Err(err) => {
                    warn!(value = %s, error = %err, "ignoring unparsable last sync time");
                    None
                }
            },
            None => None,
        };

        debug!(
            entries = entries.len(),
            filter = %filter,
            pending_changes,
            "entry store opened"
        );

        Ok(Self {
            kv,
            entries,
            filter,
            sync: SyncState {
                pending_changes,
                last_sync_time,
            },
            revision: 0,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn pending_changes(&self) -> bool {
        self.sync.pending_changes
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add(&mut self, text: &str, category: &str) -> QuoteResult<Entry> {
        let entry = Entry::parse(text, category)?;
        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit_local(next)?;
        info!(category = %entry.category, "quote added");
        Ok(entry)
    }

    /// Appends every valid element of a JSON array. Invalid elements are skipped; a payload
    /// that is not an array, or has no valid element, is rejected as a whole.
    pub fn import_many(&mut self, raw: &serde_json::Value) -> QuoteResult<ImportReport> {
        let items = raw
            .as_array()
            .ok_or_else(|| QuoteError::Format("expected a JSON array of quotes".to_string()))?;

        let mut accepted = Vec::with_capacity(items.len());
        let mut report = ImportReport::default();
        for (idx, item) in items.iter().enumerate() {
            match Entry::from_json(item) {
                Ok(entry) => accepted.push(entry),
                Err(reason) => report.rejected.push((idx, reason)),
            }
        }
        if accepted.is_empty() {
            return Err(QuoteError::Format(format!(
                "no valid quotes found ({} element(s) rejected)",
                report.rejected.len()
            )));
        }

        report.imported = accepted.len();
        let mut next = self.entries.clone();
        next.extend(accepted);
        self.commit_local(next)?;
        info!(
            imported = report.imported,
            rejected = report.rejected.len(),
            "quotes imported"
        );
        Ok(report)
    }

    pub fn import_json_str(&mut self, raw: &str) -> QuoteResult<ImportReport> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| QuoteError::Format(format!("not valid JSON: {}", err)))?;
        self.import_many(&value)
    }

    /// Pretty-printed JSON array with two-space indentation.
    pub fn export_json(&self) -> QuoteResult<String> {
        let out = serde_json::to_string_pretty(&self.entries).context("serialize quotes")?;
        Ok(out)
    }

    pub fn set_filter(&mut self, category: &str) -> QuoteResult<()> {
        let filter = CategoryFilter::parse(category);
        self.kv.set(KEY_LAST_FILTER, filter.as_str())?;
        debug!(filter = %filter, "filter changed");
        self.filter = filter;
        Ok(())
    }

    pub fn clear_filter(&mut self) -> QuoteResult<()> {
        self.set_filter(ALL_CATEGORIES)
    }

    /// Entries matching the active filter, in list order.
    pub fn filtered(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().filter(|e| self.filter.matches(e))
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.category.as_str())
            .filter(move |c| seen.insert(*c))
    }

    /// `"all"` followed by the distinct categories, for category pickers.
    pub fn category_menu(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.categories())
            .map(str::to_string)
            .collect()
    }

    pub fn sorted_categories(&self) -> Vec<String> {
        let mut out: Vec<String> = self.categories().map(str::to_string).collect();
        out.sort();
        out
    }

    /// Uniform pick among the filtered entries. The pick is remembered as the last viewed quote.
    pub fn pick_random(&self) -> Pick {
        let pick = self.pick_with(random::unit_interval());
        if let Pick::Quote(entry) = &pick {
            self.remember_viewed(entry);
        }
        pick
    }

    /// Deterministic pick: index = floor(unit * N), with `unit` clamped into [0, 1).
    pub fn pick_with(&self, unit: f64) -> Pick {
        let candidates: Vec<&Entry> = self.filtered().collect();
        if candidates.is_empty() {
            return Pick::Empty;
        }
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let idx = ((unit * candidates.len() as f64).floor() as usize).min(candidates.len() - 1);
        Pick::Quote(candidates[idx].clone())
    }

    pub fn last_viewed(&self) -> QuoteResult<Option<Entry>> {
        let Some(raw) = self.kv.get(KEY_LAST_VIEWED)? else {
            return Ok(None);
        };
        let entry = serde_json::from_str(&raw).context("parse last viewed quote")?;
        Ok(Some(entry))
    }

    /// Replaces the list with a merge result. Not a local edit: the dirty flag is untouched.
    /// Returns whether anything changed.
    pub fn replace_entries(&mut self, merged: Vec<Entry>) -> QuoteResult<bool> {
        if merged == self.entries {
            return Ok(false);
        }
        save_entries(self.kv.as_ref(), &merged)?;
        debug!(before = self.entries.len(), after = merged.len(), "entries replaced");
        self.entries = merged;
        Ok(true)
    }

    /// Clears the dirty flag after a push of the list as it was at `pushed_revision`.
    /// Local edits made while the push was in flight keep the flag set.
    pub fn mark_pushed(&mut self, pushed_revision: u64) -> QuoteResult<bool> {
        if pushed_revision != self.revision {
            debug!(
                pushed_revision,
                revision = self.revision,
                "local edits arrived during push; staying dirty"
            );
            return Ok(false);
        }
        self.kv.set(KEY_PENDING_CHANGES, "false")?;
        self.sync.pending_changes = false;
        Ok(true)
    }

    pub fn record_sync(&mut self, at: OffsetDateTime) -> QuoteResult<()> {
        let formatted = at.format(&Rfc3339).context("format last sync time")?;
        self.kv.set(KEY_LAST_SYNC_TIME, &formatted)?;
        self.sync.last_sync_time = Some(at);
        Ok(())
    }

    pub fn status(&self) -> StoreStatus {
        StoreStatus {
            entries: self.entries.len(),
            filter: self.filter.to_string(),
            pending_changes: self.sync.pending_changes,
            last_sync_time: self
                .sync
                .last_sync_time
                .and_then(|ts| ts.format(&Rfc3339).ok()),
        }
    }

    fn commit_local(&mut self, next: Vec<Entry>) -> QuoteResult<()> {
        // Flag first: a dirty flag without a change only costs an extra push.
        if !self.sync.pending_changes {
            self.kv.set(KEY_PENDING_CHANGES, "true")?;
            self.sync.pending_changes = true;
        }
        save_entries(self.kv.as_ref(), &next)?;
        self.entries = next;
        self.revision += 1;
        Ok(())
    }

    fn remember_viewed(&self, entry: &Entry) {
        let res = serde_json::to_string(entry)
            .context("serialize last viewed quote")
            .and_then(|s| self.kv.set(KEY_LAST_VIEWED, &s));
        if let Err(err) = res {
            warn!(error = %format!("{:#}", err), "could not remember last viewed quote");
        }
    }
}

fn save_entries(kv: &dyn KeyValueStore, entries: &[Entry]) -> QuoteResult<()> {
    let raw = serde_json::to_string(entries).context("serialize quotes")?;
    kv.set(KEY_QUOTES, &raw)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
