use tracing::warn;

use crate::models::score::{ComponentScores, DailyTotals, ScoreBreakdown, ScoreResult};
use crate::models::settings::{Baselines, ScoreTuning, Weights};

/// EarthScore engine: converts one day's totals into a bounded 0-100 score
/// with an auditable breakdown.
///
/// Per category, usage is normalized against `saturation_factor × baseline`:
/// zero usage scores 100, usage at the saturation point scores 0. The base
/// score is the weighted sum over electricity, water, travel and waste.
/// Recycling never enters the base score; it only feeds the bonus term, so
/// recycling is rewarded but never required.
pub struct ScoreEngine {
    tuning: ScoreTuning,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(ScoreTuning::default())
    }
}

impl ScoreEngine {
    pub fn new(tuning: ScoreTuning) -> Self {
        Self { tuning }
    }

    pub fn earth_score(
        &self,
        totals: &DailyTotals,
        baselines: &Baselines,
        weights: &Weights,
    ) -> ScoreResult {
        let components = ComponentScores {
            electricity: self.component(totals.electricity, baselines.electricity_per_day),
            water: self.component(totals.water, baselines.water_per_day),
            travel: self.component(totals.travel, baselines.travel_km_per_day),
            waste: self.component(totals.waste, baselines.waste_kg_per_day),
        };

        let breakdown = ScoreBreakdown {
            electricity: components.electricity * weights.electricity,
            water: components.water * weights.water,
            travel: components.travel * weights.travel,
            waste: components.waste * weights.waste,
            bonus: 0.0,
        };

        let base_score =
            breakdown.electricity + breakdown.water + breakdown.travel + breakdown.waste;

        let bonus = self.bonus(totals);
        let breakdown = ScoreBreakdown { bonus, ..breakdown };

        // Round half away from zero onto the integer scale.
        let score = (base_score + bonus).clamp(0.0, 100.0).round() as i64;

        ScoreResult {
            score,
            components,
            bonus,
            breakdown,
        }
    }

    /// Normalized category score in [0, 100]. A non-positive baseline would
    /// divide by zero; it scores the category 0 instead and flags the
    /// configuration.
    fn component(&self, total: f64, baseline: f64) -> f64 {
        if baseline <= 0.0 {
            warn!(
                target: "earthscore::score",
                baseline,
                "non-positive baseline, scoring component as 0"
            );
            return 0.0;
        }

        let ratio = total / (self.tuning.saturation_factor * baseline);
        ((1.0 - ratio) * 100.0).clamp(0.0, 100.0)
    }

    fn bonus(&self, totals: &DailyTotals) -> f64 {
        let travel_bonus = if totals.travel > 0.0 {
            let eco_share = totals.travel_modes.eco() / totals.travel;
            (eco_share * self.tuning.eco_travel_bonus_max)
                .clamp(0.0, self.tuning.eco_travel_bonus_max)
        } else {
            0.0
        };

        let recycle_bonus = (totals.recycle * self.tuning.recycle_bonus_per_unit)
            .clamp(0.0, self.tuning.recycle_bonus_max);

        (travel_bonus + recycle_bonus).clamp(0.0, self.tuning.bonus_max)
    }
}
