//! Level completion tracking
//!
//! Pure data structure; where it gets stored (disk, LocalStorage) is the
//! host's business.

use serde::{Deserialize, Serialize};

/// Set of completed level ids, kept sorted for stable serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LevelProgress {
    pub completed: Vec<String>,
}

impl LevelProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a level as completed. Idempotent; returns true if this was the
    /// first completion.
    pub fn mark_completed(&mut self, level_id: &str) -> bool {
        match self.completed.binary_search_by(|c| c.as_str().cmp(level_id)) {
            Ok(_) => false,
            Err(pos) => {
                self.completed.insert(pos, level_id.to_string());
                true
            }
        }
    }

    pub fn is_completed(&self, level_id: &str) -> bool {
        self.completed
            .binary_search_by(|c| c.as_str().cmp(level_id))
            .is_ok()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Parse from JSON, falling back to empty progress on corruption
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
