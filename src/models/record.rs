use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a travel leg was made. Walking, cycling and public transit count as
/// eco-friendly for bonus and mission purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    Bike,
    Bus,
    Car,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Bike => "bike",
            TravelMode::Bus => "bus",
            TravelMode::Car => "car",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "walk" => Some(TravelMode::Walk),
            "bike" => Some(TravelMode::Bike),
            "bus" => Some(TravelMode::Bus),
            "car" => Some(TravelMode::Car),
            _ => None,
        }
    }

    pub fn is_eco(self) -> bool {
        !matches!(self, TravelMode::Car)
    }
}

/// Activity category. Travel carries its mode so the travel-only constraint
/// is enforced by the type rather than by convention. `mode: None` means the
/// stored record had no recognized mode; such records still count toward the
/// travel total but not the mode breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum RecordCategory {
    Water,
    Electricity,
    Travel { mode: Option<TravelMode> },
    Waste,
    Recycle,
}

impl RecordCategory {
    pub fn type_str(&self) -> &'static str {
        match self {
            RecordCategory::Water => "water",
            RecordCategory::Electricity => "electricity",
            RecordCategory::Travel { .. } => "travel",
            RecordCategory::Waste => "waste",
            RecordCategory::Recycle => "recycle",
        }
    }
}

/// One logged consumption/activity event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub category: RecordCategory,
    pub amount: f64,
    pub unit: String,
}

/// Extra payload of a stored record. The only defined key today is `mode`
/// (travel records); unknown keys are preserved so older engines never choke
/// on newer data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Persisted record shape of the storage port:
/// `{ id, date, type, value, unit, meta?: { mode? } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RecordMeta>,
}

impl StoredRecord {
    pub fn from_record(record: &ActivityRecord) -> Self {
        let meta = match record.category {
            RecordCategory::Travel { mode: Some(mode) } => Some(RecordMeta {
                mode: Some(mode.as_str().to_string()),
                extra: Map::new(),
            }),
            _ => None,
        };

        Self {
            id: record.id.clone(),
            date: record.recorded_at.to_rfc3339(),
            record_type: record.category.type_str().to_string(),
            value: record.amount,
            unit: record.unit.clone(),
            meta,
        }
    }

    /// Decode into the domain record. Returns `None` when the timestamp does
    /// not parse or the type is unknown; unknown types are skipped rather
    /// than rejected so new categories can land before the engine learns them.
    pub fn into_record(self) -> Option<ActivityRecord> {
        let recorded_at = DateTime::parse_from_rfc3339(&self.date)
            .ok()?
            .with_timezone(&Utc);

        let category = match self.record_type.as_str() {
            "water" => RecordCategory::Water,
            "electricity" => RecordCategory::Electricity,
            "travel" => RecordCategory::Travel {
                mode: self
                    .meta
                    .as_ref()
                    .and_then(|meta| meta.mode.as_deref())
                    .and_then(TravelMode::parse),
            },
            "waste" => RecordCategory::Waste,
            "recycle" => RecordCategory::Recycle,
            _ => return None,
        };

        Some(ActivityRecord {
            id: self.id,
            recorded_at,
            category,
            amount: self.value,
            unit: self.unit,
        })
    }
}
