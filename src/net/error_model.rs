//! Receive-side error models.
//!
//! An error model decides whether an arriving frame is corrupt. The device
//! drops corrupt frames before any further processing.

use std::collections::HashSet;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::packet::Packet;

pub trait ErrorModel: Debug {
    /// Consulted once per arriving frame.
    fn is_corrupt(&mut self, frame: &Packet) -> bool;
}

/// Corrupts frames whose uid is in the list.
#[derive(Debug, Default, Clone)]
pub struct ListErrorModel {
    uids: HashSet<u64>,
    enabled: bool,
}

impl ListErrorModel {
    pub fn new(uids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            uids: uids.into_iter().collect(),
            enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

impl ErrorModel for ListErrorModel {
    fn is_corrupt(&mut self, frame: &Packet) -> bool {
        self.enabled && self.uids.contains(&frame.uid)
    }
}

/// Corrupts every `every`-th frame seen (1 = all frames).
#[derive(Debug, Clone)]
pub struct PeriodicErrorModel {
    every: u64,
    seen: u64,
    enabled: bool,
}

impl PeriodicErrorModel {
    /// # Panics
    /// If `every` is zero.
    pub fn new(every: u64) -> Self {
        assert!(every > 0, "PeriodicErrorModel period must be positive");
        Self {
            every,
            seen: 0,
            enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

impl ErrorModel for PeriodicErrorModel {
    fn is_corrupt(&mut self, _frame: &Packet) -> bool {
        if !self.enabled {
            return false;
        }
        self.seen = self.seen.saturating_add(1);
        self.seen % self.every == 0
    }
}

/// Serialisable error model selection for config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorModelSpec {
    List { uids: Vec<u64> },
    Periodic { every: u64 },
}

impl ErrorModelSpec {
    pub fn build(&self) -> Box<dyn ErrorModel> {
        match self {
            ErrorModelSpec::List { uids } => Box::new(ListErrorModel::new(uids.iter().copied())),
            ErrorModelSpec::Periodic { every } => Box::new(PeriodicErrorModel::new((*every).max(1))),
        }
    }
}
