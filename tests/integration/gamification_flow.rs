use chrono::{Duration, Utc};
use earthscore::db::DbPool;
use earthscore::models::mission::{Mission, MissionCondition};
use earthscore::models::record::{RecordCategory, TravelMode};
use earthscore::{EarthScoreEngine, RecordInput};
use tempfile::tempdir;

fn setup_engine() -> (EarthScoreEngine, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("earthscore.sqlite")).expect("db pool");
    (EarthScoreEngine::new(pool), dir)
}

fn log_water(engine: &EarthScoreEngine, days_ago: i64, amount: f64) {
    engine
        .log_record(RecordInput {
            category: RecordCategory::Water,
            amount,
            unit: "L".into(),
            recorded_at: Some(Utc::now() - Duration::days(days_ago)),
        })
        .expect("log water");
}

#[test]
fn streak_counts_consecutive_days_and_stops_at_gaps() {
    let (engine, _guard) = setup_engine();
    assert_eq!(engine.current_streak().expect("streak"), 0);

    log_water(&engine, 0, 10.0);
    log_water(&engine, 1, 12.0);
    log_water(&engine, 2, 8.0);
    // Gap at three days ago, then an older record that must not count.
    log_water(&engine, 4, 30.0);

    assert_eq!(engine.current_streak().expect("streak"), 3);
}

#[test]
fn badges_are_issued_once_and_never_re_emitted() {
    let (engine, _guard) = setup_engine();

    log_water(&engine, 0, 10.0);
    log_water(&engine, 1, 12.0);
    log_water(&engine, 2, 8.0);

    let first = engine.evaluate_badges().expect("first evaluation");
    assert!(first.iter().any(|badge| badge.badge_id == "water_saver"));

    // Evaluating again with the same history issues nothing new.
    let second = engine.evaluate_badges().expect("second evaluation");
    assert!(second.is_empty());

    // New qualifying history issues only the newly satisfied badge.
    engine
        .log_record(RecordInput {
            category: RecordCategory::Recycle,
            amount: 6.0,
            unit: "kg".into(),
            recorded_at: Some(Utc::now()),
        })
        .expect("log recycle");

    let third = engine.evaluate_badges().expect("third evaluation");
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].badge_id, "super_recycler");

    let earned = engine.earned_badges().expect("earned badges");
    assert!(earned.len() >= 2);
    let ids: Vec<&str> = earned.iter().map(|b| b.badge_id.as_str()).collect();
    assert!(ids.contains(&"water_saver"));
    assert!(ids.contains(&"super_recycler"));
}

#[test]
fn eco_rider_needs_five_recent_eco_trips() {
    let (engine, _guard) = setup_engine();

    for _ in 0..4 {
        engine
            .log_record(RecordInput {
                category: RecordCategory::Travel {
                    mode: Some(TravelMode::Bike),
                },
                amount: 3.0,
                unit: "km".into(),
                recorded_at: Some(Utc::now()),
            })
            .expect("log trip");
    }

    let first = engine.evaluate_badges().expect("first evaluation");
    assert!(!first.iter().any(|badge| badge.badge_id == "eco_rider"));

    engine
        .log_record(RecordInput {
            category: RecordCategory::Travel {
                mode: Some(TravelMode::Bus),
            },
            amount: 7.0,
            unit: "km".into(),
            recorded_at: Some(Utc::now()),
        })
        .expect("log trip");

    let second = engine.evaluate_badges().expect("second evaluation");
    assert!(second.iter().any(|badge| badge.badge_id == "eco_rider"));
}

#[test]
fn mission_progress_counts_and_clamps() {
    let (engine, _guard) = setup_engine();

    let eco_mission = Mission {
        id: "eco_commuter".into(),
        title: "Take 5 eco-friendly trips this week".into(),
        target: 5,
        condition: MissionCondition::TravelEco,
    };

    assert_eq!(engine.mission_progress(&eco_mission).expect("progress"), 0);

    // Eight qualifying trips; progress caps at the target.
    for _ in 0..8 {
        engine
            .log_record(RecordInput {
                category: RecordCategory::Travel {
                    mode: Some(TravelMode::Walk),
                },
                amount: 1.5,
                unit: "km".into(),
                recorded_at: Some(Utc::now()),
            })
            .expect("log trip");
    }

    assert_eq!(engine.mission_progress(&eco_mission).expect("progress"), 5);

    let waste_mission = Mission {
        id: "waste_less".into(),
        title: "Log low-waste actions".into(),
        target: 7,
        condition: MissionCondition::WasteReduction,
    };

    engine
        .log_record(RecordInput {
            category: RecordCategory::Waste,
            amount: 0.2,
            unit: "kg".into(),
            recorded_at: Some(Utc::now()),
        })
        .expect("log low waste");
    engine
        .log_record(RecordInput {
            category: RecordCategory::Waste,
            amount: 0.9,
            unit: "kg".into(),
            recorded_at: Some(Utc::now()),
        })
        .expect("log heavy waste");
    engine
        .log_record(RecordInput {
            category: RecordCategory::Recycle,
            amount: 1.0,
            unit: "kg".into(),
            recorded_at: Some(Utc::now()),
        })
        .expect("log recycle");

    assert_eq!(
        engine.mission_progress(&waste_mission).expect("progress"),
        2
    );

    let overview = engine.mission_overview().expect("overview");
    let eco = overview
        .iter()
        .find(|entry| entry.mission_id == "eco_commuter")
        .expect("eco mission in overview");
    assert_eq!(eco.progress, 5);
    assert!(eco.completed);
}
