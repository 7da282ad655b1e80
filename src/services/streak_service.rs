use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::record::ActivityRecord;

/// Count consecutive calendar days ending at `as_of` that contain at least
/// one record. Stops on the first day without one, so a large day-wise gap
/// never turns into a calendar scan.
pub fn current_streak(records: &[ActivityRecord], as_of: NaiveDate) -> u32 {
    let active_days: HashSet<NaiveDate> = records
        .iter()
        .map(|record| record.recorded_at.date_naive())
        .collect();

    let mut streak = 0;
    let mut day = as_of;
    while active_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    streak
}
