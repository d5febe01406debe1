//! In-memory mirror of the remote program collection.
//!
//! The mirror is only ever replaced wholesale from a full fetch. Writes go
//! through [`crate::sync`], which reloads after every successful mutation
//! instead of patching the list locally.

use std::collections::HashSet;

use crate::error::{CatalogError, StoreError};
use crate::types::Program;

/// Sequence number handed out when a refresh starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// What happened to a completed refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetch result replaced the mirror; holds the record count.
    Applied(usize),
    /// A newer refresh already landed, so this result was dropped.
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    programs: Vec<Program>,
    issued: u64,
    applied: u64,
}

impl CatalogState {
    /// Records in store order (creation time descending).
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn get(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// True while at least one issued refresh has not been applied.
    pub fn is_refreshing(&self) -> bool {
        self.issued > self.applied
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply the result of the fetch started with `ticket`.
    ///
    /// Completions older than the last applied one are ignored. A failed
    /// fetch empties the mirror rather than leaving stale records visible.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Program>, StoreError>,
    ) -> Result<RefreshOutcome, CatalogError> {
        if ticket.0 <= self.applied {
            tracing::warn!(
                "Ignoring out-of-order refresh #{} (already applied #{})",
                ticket.0,
                self.applied
            );
            return Ok(RefreshOutcome::Stale);
        }
        self.applied = ticket.0;

        match result {
            Ok(programs) => {
                self.programs = dedup_by_id(programs);
                tracing::info!("Loaded {} programs", self.programs.len());
                Ok(RefreshOutcome::Applied(self.programs.len()))
            }
            Err(e) => {
                tracing::error!("Failed to load programs list: {}", e);
                self.programs.clear();
                Err(CatalogError::Load(e))
            }
        }
    }
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id(programs: Vec<Program>) -> Vec<Program> {
    let mut seen = HashSet::with_capacity(programs.len());
    programs
        .into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!("Duplicate program id {} in store response", p.id);
            }
            fresh
        })
        .collect()
}
