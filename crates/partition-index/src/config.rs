//! Tuning knobs for the index containers.
//!
//! The index has no process-level configuration of its own. The structs
//! below are plain data with defaults, deserializable so the surrounding
//! server can embed them in its own config file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayTreeConfig {
    /// Slots reserved up front by a new array tree.
    pub initial_capacity: usize,
}

impl ArrayTreeConfig {
    pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
}

impl Default for ArrayTreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiMapConfig {
    /// When `false`, a second insert under a key replaces its value
    /// instead of promoting the entry to an ordered set.
    pub allow_duplicates: bool,
}

impl Default for MultiMapConfig {
    fn default() -> Self {
        Self {
            allow_duplicates: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
    /// Largest node count a snapshot may declare.
    pub max_node_count: u32,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            max_node_count: u32::MAX,
        }
    }
}

/// All index settings in one place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub array: ArrayTreeConfig,
    pub multimap: MultiMapConfig,
    pub marshal: MarshalConfig,
}
