//! High score gate
//!
//! Runs once per game over: the in-memory record becomes
//! `max(previous, final)` and a new record is written through the store.

use crate::persistence::HighScoreStore;

/// Compare the final score against the record and persist a new best.
/// Returns true if the record was beaten.
pub fn record_final_score(
    high_score: &mut u64,
    final_score: u64,
    store: &mut dyn HighScoreStore,
) -> bool {
    if final_score <= *high_score {
        return false;
    }
    *high_score = final_score;
    store.save_high_score(final_score);
    true
}
