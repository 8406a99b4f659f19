//! Best-time records
//!
//! One record matters: the fastest full traversal of every level. Loaded
//! once at startup, written back the moment it improves - never batched, so
//! a crash right after a win cannot lose it.

use serde::{Deserialize, Serialize};

use crate::persistence::KvStore;

const STORAGE_KEY: &str = "glissade_records";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Records {
    /// Fastest completion in seconds; `None` until the first win.
    pub best_time: Option<f64>,
}

impl Records {
    /// Read records from the store. Missing or corrupt payloads mean "no
    /// prior best", never a failure.
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(STORAGE_KEY) {
            Some(json) => match serde_json::from_str(&json) {
                Ok(records) => records,
                Err(err) => {
                    log::warn!("corrupt records ({err}); starting fresh");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Fold a finished run into the record. Persists synchronously when the
    /// time improves (an absent best counts as infinite). Returns the best
    /// time after the update.
    pub fn record_win(&mut self, elapsed_secs: f64, store: &mut dyn KvStore) -> f64 {
        let improved = self.best_time.is_none_or(|best| elapsed_secs < best);
        if improved {
            self.best_time = Some(elapsed_secs);
            self.save(store);
            log::info!("new best time: {}", format_seconds(elapsed_secs));
        }
        self.best_time.unwrap_or(elapsed_secs)
    }

    fn save(&self, store: &mut dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(STORAGE_KEY, &json),
            Err(err) => log::warn!("failed to encode records: {err}"),
        }
    }
}

/// The session's display format for times.
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.3} seconds")
}
