use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::scanner::engine::AllData;
use crate::scanner::opportunity::Opportunity;

/// One tick's published market data.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub timestamp: u64,
    pub data: AllData,
}

/// One tick's ranked opportunity list.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunitySet {
    pub timestamp: u64,
    pub items: Vec<Opportunity>,
}

/// Single-writer, many-reader holder of the latest published values.
/// Publication swaps whole `Arc`s, so readers always observe a complete
/// tick; `None` is the not-yet-produced sentinel. Timestamps are clamped
/// monotone non-decreasing across publications.
#[derive(Default)]
pub struct SnapshotStore {
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    opportunities: RwLock<Option<Arc<OpportunitySet>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(
        &self,
        mut snapshot: Snapshot,
        mut opportunities: OpportunitySet,
    ) -> (Arc<Snapshot>, Arc<OpportunitySet>) {
        let mut snap_slot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = snap_slot.as_ref() {
            snapshot.timestamp = snapshot.timestamp.max(prev.timestamp);
        }
        let snapshot = Arc::new(snapshot);
        *snap_slot = Some(Arc::clone(&snapshot));
        drop(snap_slot);

        let mut opp_slot = self
            .opportunities
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = opp_slot.as_ref() {
            opportunities.timestamp = opportunities.timestamp.max(prev.timestamp);
        }
        let opportunities = Arc::new(opportunities);
        *opp_slot = Some(Arc::clone(&opportunities));
        drop(opp_slot);

        (snapshot, opportunities)
    }

    pub fn latest_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn latest_opportunities(&self) -> Option<Arc<OpportunitySet>> {
        self.opportunities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
