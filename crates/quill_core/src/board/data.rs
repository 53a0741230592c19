//! Serialized project document shape and decode policy.
//!
//! # Responsibility
//! - Define the exact two-field JSON layout of the backing document.
//! - Decode leniently: anything that is not a project document becomes an
//!   empty project instead of an error.
//!
//! # Invariants
//! - Decoding never fails; malformed input yields the empty shape.
//! - Decoded sequences hold disjoint, non-repeating ids (first occurrence
//!   wins when the input repeats one).

use crate::model::task::Task;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Full persisted state of one project board.
///
/// Both fields are required on decode; a document missing either is treated
/// as "not a project document". Unknown extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    /// Active tasks, user-controlled order.
    pub tasks: Vec<Task>,
    /// Archived tasks, insertion order.
    pub archived: Vec<Task>,
}

impl ProjectData {
    /// Decodes document text into project data.
    ///
    /// The "corrupt or new document" case is treated as an empty project
    /// rather than an error; a parse failure never blocks the user.
    pub fn decode(text: &str) -> Self {
        match serde_json::from_str::<ProjectData>(text) {
            Ok(data) => data.deduplicated(),
            Err(err) => {
                warn!("event=board_decode module=board status=fallback reason=parse_error error={err}");
                Self::default()
            }
        }
    }

    /// Encodes the full store as one pretty-printed JSON document.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Returns whether `id` is present in either sequence.
    pub fn contains_id(&self, id: &str) -> bool {
        self.tasks.iter().chain(self.archived.iter()).any(|task| task.id == id)
    }

    /// Drops repeated ids across both sequences, keeping first occurrences.
    ///
    /// Restores the disjointness invariant for documents written by other
    /// tools without discarding the whole document.
    fn deduplicated(mut self) -> Self {
        let before = self.tasks.len() + self.archived.len();
        let mut seen = BTreeSet::new();
        self.tasks.retain(|task| seen.insert(task.id.clone()));
        self.archived.retain(|task| seen.insert(task.id.clone()));
        let dropped = before - self.tasks.len() - self.archived.len();
        if dropped > 0 {
            warn!("event=board_decode module=board status=normalized dropped_duplicates={dropped}");
        }
        self
    }
}
