use chrono::NaiveDate;
use tracing::warn;

use crate::models::record::{ActivityRecord, RecordCategory, TravelMode};
use crate::models::score::DailyTotals;

/// Reduce the record history to per-category totals for one calendar day.
/// A record belongs to the day its timestamp falls on, the same day
/// classification the streak and badge windows use.
///
/// Travel records additionally feed the per-mode breakdown; travel records
/// without a recognized mode stay in the travel total only. Negative amounts
/// are treated as 0 so a bad row can never drive a total negative.
pub fn daily_totals(records: &[ActivityRecord], date: NaiveDate) -> DailyTotals {
    let mut totals = DailyTotals::empty(date);

    for record in records {
        if record.recorded_at.date_naive() != date {
            continue;
        }

        let amount = if record.amount < 0.0 {
            warn!(
                target: "earthscore::aggregation",
                record_id = %record.id,
                amount = record.amount,
                "negative amount treated as 0"
            );
            0.0
        } else {
            record.amount
        };

        match record.category {
            RecordCategory::Water => totals.water += amount,
            RecordCategory::Electricity => totals.electricity += amount,
            RecordCategory::Travel { mode } => {
                totals.travel += amount;
                if let Some(mode) = mode {
                    match mode {
                        TravelMode::Walk => totals.travel_modes.walk += amount,
                        TravelMode::Bike => totals.travel_modes.bike += amount,
                        TravelMode::Bus => totals.travel_modes.bus += amount,
                        TravelMode::Car => totals.travel_modes.car += amount,
                    }
                }
            }
            RecordCategory::Waste => totals.waste += amount,
            RecordCategory::Recycle => totals.recycle += amount,
        }
    }

    totals
}
