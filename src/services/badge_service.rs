use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use tracing::info;

use crate::models::badge::BadgeRecord;
use crate::models::record::{ActivityRecord, RecordCategory};
use crate::services::aggregation_service;

type BadgePredicate = fn(&[ActivityRecord], NaiveDate) -> bool;

/// One entry of the achievement catalog. The predicate is a pure,
/// order-independent check over the full record history; adding a badge means
/// adding a definition here, nothing else.
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    predicate: BadgePredicate,
}

static CATALOG: Lazy<Vec<BadgeDefinition>> = Lazy::new(|| {
    vec![
        BadgeDefinition {
            id: "water_saver",
            name: "Water Saver",
            description: "Kept water use at or under 50L on each of the last 3 days",
            predicate: water_saver,
        },
        BadgeDefinition {
            id: "eco_rider",
            name: "Eco Rider",
            description: "Logged 5 eco-friendly trips within the last 7 days",
            predicate: eco_rider,
        },
        BadgeDefinition {
            id: "super_recycler",
            name: "Super Recycler",
            description: "Recycled at least 5 units within the last 30 days",
            predicate: super_recycler,
        },
        BadgeDefinition {
            id: "energy_conscious",
            name: "Energy Conscious",
            description: "Stayed under 3 kWh on 5 of the last 5 days",
            predicate: energy_conscious,
        },
        BadgeDefinition {
            id: "waste_warrior",
            name: "Waste Warrior",
            description: "Kept waste at or under 0.3kg on each of the last 7 days",
            predicate: waste_warrior,
        },
    ]
});

pub fn catalog() -> &'static [BadgeDefinition] {
    &CATALOG
}

/// Evaluate the catalog against the history and issue records for newly
/// satisfied badges. Badges already in `already_earned` are never re-emitted,
/// so repeated evaluation is idempotent.
pub fn evaluate(
    records: &[ActivityRecord],
    already_earned: &HashSet<String>,
    as_of: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<BadgeRecord> {
    let mut earned = Vec::new();

    for definition in catalog() {
        if already_earned.contains(definition.id) {
            continue;
        }

        if (definition.predicate)(records, as_of) {
            info!(
                target: "earthscore::badges",
                badge_id = definition.id,
                "badge newly earned"
            );
            earned.push(BadgeRecord {
                badge_id: definition.id.to_string(),
                earned_at: now,
            });
        }
    }

    earned
}

/// The `n` calendar days ending at `as_of`, oldest first.
fn trailing_days(as_of: NaiveDate, n: i64) -> impl Iterator<Item = NaiveDate> {
    (0..n).rev().map(move |offset| as_of - Duration::days(offset))
}

fn records_in_trailing_days<'a>(
    records: &'a [ActivityRecord],
    as_of: NaiveDate,
    n: i64,
) -> impl Iterator<Item = &'a ActivityRecord> {
    let first = as_of - Duration::days(n - 1);
    records.iter().filter(move |record| {
        let day = record.recorded_at.date_naive();
        day >= first && day <= as_of
    })
}

fn water_saver(records: &[ActivityRecord], as_of: NaiveDate) -> bool {
    trailing_days(as_of, 3)
        .all(|day| aggregation_service::daily_totals(records, day).water <= 50.0)
}

fn eco_rider(records: &[ActivityRecord], as_of: NaiveDate) -> bool {
    let eco_trips = records_in_trailing_days(records, as_of, 7)
        .filter(|record| {
            matches!(
                record.category,
                RecordCategory::Travel { mode: Some(mode) } if mode.is_eco()
            )
        })
        .count();

    eco_trips >= 5
}

fn super_recycler(records: &[ActivityRecord], as_of: NaiveDate) -> bool {
    let recycled: f64 = records_in_trailing_days(records, as_of, 30)
        .filter(|record| record.category == RecordCategory::Recycle)
        .map(|record| record.amount.max(0.0))
        .sum();

    recycled >= 5.0
}

fn energy_conscious(records: &[ActivityRecord], as_of: NaiveDate) -> bool {
    let low_days = trailing_days(as_of, 5)
        .filter(|day| aggregation_service::daily_totals(records, *day).electricity < 3.0)
        .count();

    low_days >= 5
}

fn waste_warrior(records: &[ActivityRecord], as_of: NaiveDate) -> bool {
    trailing_days(as_of, 7)
        .all(|day| aggregation_service::daily_totals(records, day).waste <= 0.3)
}
