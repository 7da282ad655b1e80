use serde::{Deserialize, Serialize};

/// Which rule qualifies a record or day for a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionCondition {
    /// In-week travel records with an eco-friendly mode.
    TravelEco,
    /// Trailing 7 days whose water total stays under 75, regardless of week
    /// alignment.
    WaterLimit,
    /// In-week recycle records, or waste records under 0.3.
    WasteReduction,
}

/// A weekly goal with a target count of qualifying actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub target: u32,
    pub condition: MissionCondition,
}

/// Progress snapshot for one mission, capped at the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionProgress {
    pub mission_id: String,
    pub title: String,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
}

/// Stock mission catalog. Callers may supply their own missions instead.
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission {
            id: "eco_commuter".into(),
            title: "Take 5 eco-friendly trips this week".into(),
            target: 5,
            condition: MissionCondition::TravelEco,
        },
        Mission {
            id: "water_watch".into(),
            title: "Keep water under 75L on 5 days".into(),
            target: 5,
            condition: MissionCondition::WaterLimit,
        },
        Mission {
            id: "waste_less".into(),
            title: "Log 7 low-waste or recycling actions".into(),
            target: 7,
            condition: MissionCondition::WasteReduction,
        },
    ]
}
