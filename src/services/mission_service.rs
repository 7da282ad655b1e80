use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};

use crate::models::mission::{Mission, MissionCondition, MissionProgress};
use crate::models::record::{ActivityRecord, RecordCategory};
use crate::services::aggregation_service;

const WATER_LIMIT_PER_DAY: f64 = 75.0;
const LOW_WASTE_THRESHOLD: f64 = 0.3;

/// Monday 00:00 of the week containing `now`.
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let monday = now.date_naive().week(Weekday::Mon).first_day();
    Utc.from_utc_datetime(&monday.and_hms_opt(0, 0, 0).unwrap())
}

/// Count how many records/days of the current week satisfy the mission's
/// qualifying condition, capped at the mission target.
///
/// `WaterLimit` is the one rule that looks at the 7 trailing days ending
/// today instead of the Monday-aligned week.
pub fn progress(records: &[ActivityRecord], mission: &Mission, now: DateTime<Utc>) -> u32 {
    let start = week_start(now);
    let in_week = |record: &&ActivityRecord| {
        record.recorded_at >= start && record.recorded_at <= now
    };

    let raw = match mission.condition {
        MissionCondition::TravelEco => records
            .iter()
            .filter(in_week)
            .filter(|record| {
                matches!(
                    record.category,
                    RecordCategory::Travel { mode: Some(mode) } if mode.is_eco()
                )
            })
            .count(),
        MissionCondition::WaterLimit => {
            let today = now.date_naive();
            (0..7)
                .map(|offset| today - Duration::days(offset))
                .filter(|day| {
                    aggregation_service::daily_totals(records, *day).water < WATER_LIMIT_PER_DAY
                })
                .count()
        }
        MissionCondition::WasteReduction => records
            .iter()
            .filter(in_week)
            .filter(|record| match record.category {
                RecordCategory::Recycle => true,
                RecordCategory::Waste => record.amount < LOW_WASTE_THRESHOLD,
                _ => false,
            })
            .count(),
    };

    (raw as u32).min(mission.target)
}

/// Progress for every mission in the given catalog.
pub fn overview(
    records: &[ActivityRecord],
    missions: &[Mission],
    now: DateTime<Utc>,
) -> Vec<MissionProgress> {
    missions
        .iter()
        .map(|mission| {
            let progress = progress(records, mission, now);
            MissionProgress {
                mission_id: mission.id.clone(),
                title: mission.title.clone(),
                progress,
                target: mission.target,
                completed: progress >= mission.target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::TravelMode;

    fn record(timestamp: &str, category: RecordCategory, amount: f64) -> ActivityRecord {
        ActivityRecord {
            id: format!("{timestamp}-{amount}"),
            recorded_at: DateTime::parse_from_rfc3339(timestamp)
                .unwrap()
                .with_timezone(&Utc),
            category,
            amount,
            unit: "u".into(),
        }
    }

    // 2026-03-11 is a Wednesday; the week starts Monday 2026-03-09.
    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-11T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn mission(condition: MissionCondition, target: u32) -> Mission {
        Mission {
            id: "m".into(),
            title: "m".into(),
            target,
            condition,
        }
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(
            week_start(now()).to_rfc3339(),
            "2026-03-09T00:00:00+00:00"
        );
    }

    #[test]
    fn travel_eco_counts_only_in_week_eco_trips() {
        let eco = RecordCategory::Travel {
            mode: Some(TravelMode::Walk),
        };
        let car = RecordCategory::Travel {
            mode: Some(TravelMode::Car),
        };

        let records = vec![
            record("2026-03-09T08:00:00Z", eco, 1.0),
            record("2026-03-10T08:00:00Z", eco, 2.0),
            record("2026-03-10T09:00:00Z", car, 9.0),
            // Sunday before the week started.
            record("2026-03-08T08:00:00Z", eco, 3.0),
        ];

        let mission = mission(MissionCondition::TravelEco, 5);
        assert_eq!(progress(&records, &mission, now()), 2);
    }

    #[test]
    fn water_limit_counts_trailing_days_not_week_days() {
        // Heavy use on two of the trailing 7 days; the other five stay under.
        let records = vec![
            record("2026-03-11T08:00:00Z", RecordCategory::Water, 90.0),
            record("2026-03-06T08:00:00Z", RecordCategory::Water, 120.0),
            record("2026-03-07T08:00:00Z", RecordCategory::Water, 30.0),
        ];

        let mission = mission(MissionCondition::WaterLimit, 7);
        assert_eq!(progress(&records, &mission, now()), 5);
    }

    #[test]
    fn waste_reduction_mixes_recycle_and_low_waste() {
        let records = vec![
            record("2026-03-09T10:00:00Z", RecordCategory::Recycle, 1.0),
            record("2026-03-10T10:00:00Z", RecordCategory::Waste, 0.2),
            record("2026-03-10T11:00:00Z", RecordCategory::Waste, 0.8),
            record("2026-03-11T10:00:00Z", RecordCategory::Water, 10.0),
        ];

        let mission = mission(MissionCondition::WasteReduction, 7);
        assert_eq!(progress(&records, &mission, now()), 2);
    }

    #[test]
    fn raw_count_is_clamped_to_target() {
        let eco = RecordCategory::Travel {
            mode: Some(TravelMode::Bike),
        };
        let records: Vec<ActivityRecord> = (0..8)
            .map(|i| record(&format!("2026-03-10T0{i}:00:00Z"), eco, 1.0))
            .collect();

        let mission = mission(MissionCondition::TravelEco, 5);
        assert_eq!(progress(&records, &mission, now()), 5);
    }

    #[test]
    fn overview_flags_completed_missions() {
        let eco = RecordCategory::Travel {
            mode: Some(TravelMode::Bus),
        };
        let records: Vec<ActivityRecord> = (0..3)
            .map(|i| record(&format!("2026-03-10T0{i}:00:00Z"), eco, 1.0))
            .collect();

        let missions = vec![
            mission(MissionCondition::TravelEco, 3),
            mission(MissionCondition::WasteReduction, 4),
        ];

        let summary = overview(&records, &missions, now());
        assert_eq!(summary.len(), 2);
        assert!(summary[0].completed);
        assert_eq!(summary[1].progress, 0);
        assert!(!summary[1].completed);
    }
}
