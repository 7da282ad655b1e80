use chrono::{DateTime, NaiveDate, Utc};
use earthscore::db::DbPool;
use earthscore::error::AppError;
use earthscore::models::record::{RecordCategory, TravelMode};
use earthscore::models::settings::{Baselines, ScoringSettings, Weights};
use earthscore::{EarthScoreEngine, RecordInput};
use tempfile::tempdir;

fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

fn setup_engine() -> (EarthScoreEngine, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("earthscore.sqlite")).expect("db pool");
    (EarthScoreEngine::new(pool), dir)
}

#[test]
fn log_score_and_reconfigure_flow() {
    let (engine, _guard) = setup_engine();
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    // The documented worked example: 3 kWh, 50 L, 5 km walked, 0.25 kg waste.
    engine
        .log_record(RecordInput {
            category: RecordCategory::Electricity,
            amount: 3.0,
            unit: "kWh".into(),
            recorded_at: Some(at("2026-03-02T07:00:00Z")),
        })
        .expect("log electricity");
    engine
        .log_record(RecordInput {
            category: RecordCategory::Water,
            amount: 50.0,
            unit: "L".into(),
            recorded_at: Some(at("2026-03-02T08:00:00Z")),
        })
        .expect("log water");
    engine
        .log_record(RecordInput {
            category: RecordCategory::Travel {
                mode: Some(TravelMode::Walk),
            },
            amount: 5.0,
            unit: "km".into(),
            recorded_at: Some(at("2026-03-02T09:00:00Z")),
        })
        .expect("log travel");
    engine
        .log_record(RecordInput {
            category: RecordCategory::Waste,
            amount: 0.25,
            unit: "kg".into(),
            recorded_at: Some(at("2026-03-02T20:00:00Z")),
        })
        .expect("log waste");

    let result = engine.score_for_date(date).expect("score");
    assert_eq!(result.components.electricity, 75.0);
    assert_eq!(result.components.water, 75.0);
    assert_eq!(result.components.travel, 75.0);
    assert_eq!(result.components.waste, 75.0);
    assert!((result.bonus - 8.0).abs() < 1e-9);
    assert_eq!(result.score, 83);

    // A day with no records scores the zero-usage ceiling.
    let quiet_day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    let quiet = engine.score_for_date(quiet_day).expect("quiet score");
    assert_eq!(quiet.score, 100);
    assert_eq!(quiet.bonus, 0.0);

    // Defaults are served before any settings are stored.
    let settings = engine.settings().expect("settings");
    assert_eq!(settings, ScoringSettings::default());

    // Halving the water baseline saturates the water component for the same
    // day: 50 L against a 25 L baseline is 2x, scoring 0.
    engine
        .update_settings(ScoringSettings {
            baselines: Baselines {
                water_per_day: 25.0,
                ..Default::default()
            },
            weights: Weights::default(),
        })
        .expect("update settings");

    let rescored = engine.score_for_date(date).expect("rescore");
    assert_eq!(rescored.components.water, 0.0);
    // 75*0.35 + 0*0.25 + 75*0.30 + 75*0.10 + 8 = 64.25 -> 64
    assert_eq!(rescored.score, 64);
}

#[test]
fn invalid_inputs_are_rejected_at_ingestion() {
    let (engine, _guard) = setup_engine();

    let negative = engine.log_record(RecordInput {
        category: RecordCategory::Water,
        amount: -1.0,
        unit: "L".into(),
        recorded_at: None,
    });
    assert!(matches!(negative, Err(AppError::Validation { .. })));

    let unitless = engine.log_record(RecordInput {
        category: RecordCategory::Waste,
        amount: 0.5,
        unit: "  ".into(),
        recorded_at: None,
    });
    assert!(matches!(unitless, Err(AppError::Validation { .. })));

    let bad_settings = engine.update_settings(ScoringSettings {
        baselines: Baselines {
            travel_km_per_day: -5.0,
            ..Default::default()
        },
        weights: Weights::default(),
    });
    assert!(matches!(bad_settings, Err(AppError::Validation { .. })));
}

#[test]
fn history_survives_engine_restart() {
    let dir = tempdir().expect("temp dir");
    let db_path = dir.path().join("earthscore.sqlite");
    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    {
        let engine = EarthScoreEngine::new(DbPool::new(&db_path).expect("db pool"));
        engine
            .log_record(RecordInput {
                category: RecordCategory::Water,
                amount: 200.0,
                unit: "L".into(),
                recorded_at: Some(at("2026-03-02T08:00:00Z")),
            })
            .expect("log water");
    }

    let reopened = EarthScoreEngine::new(DbPool::new(&db_path).expect("db pool"));
    let result = reopened.score_for_date(date).expect("score");
    // 200 L against the 100 L baseline saturates the water component.
    assert_eq!(result.components.water, 0.0);
}
