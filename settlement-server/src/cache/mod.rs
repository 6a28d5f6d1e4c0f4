//! Live courier location cache
//!
//! The tracking service writes the latest GPS fix per courier; the engine only
//! ever evicts entries when a shift is force-closed.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Last known courier position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourierLocation {
    pub lat: f64,
    pub lon: f64,
    /// Unix millis
    pub updated_at: i64,
}

pub trait LocationCache: Send + Sync {
    fn get(&self, courier_id: i64) -> Option<CourierLocation>;
    fn set(&self, courier_id: i64, location: CourierLocation);
    /// Remove a courier's entry; returns whether one existed
    fn evict(&self, courier_id: i64) -> bool;
}

/// In-process cache keyed by courier id
#[derive(Debug, Default)]
pub struct MemoryLocationCache {
    entries: DashMap<i64, CourierLocation>,
}

impl MemoryLocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocationCache for MemoryLocationCache {
    fn get(&self, courier_id: i64) -> Option<CourierLocation> {
        self.entries.get(&courier_id).map(|e| *e)
    }

    fn set(&self, courier_id: i64, location: CourierLocation) {
        self.entries.insert(courier_id, location);
    }

    fn evict(&self, courier_id: i64) -> bool {
        self.entries.remove(&courier_id).is_some()
    }
}
