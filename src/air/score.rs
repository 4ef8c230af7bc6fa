//! Pollutant scoring and quality tiers.

use std::fmt;

use serde::Serialize;

use crate::config::PlannerConfig;
use crate::model::round2;

/// Score substituted whenever no meaningful value can be computed.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Converts raw PM2.5/PM10 averages into a bounded 0-100 score
/// (higher is better).
///
/// Absent readings count as 0, i.e. best case: sparse sensor data is biased
/// toward "excellent". Known limitation of the upstream data source, kept
/// as-is so scores stay comparable with the historical ones.
pub fn air_quality_score(config: &PlannerConfig, pm25: Option<f64>, pm10: Option<f64>) -> f64 {
    let pm25 = pm25.unwrap_or(0.0);
    let pm10 = pm10.unwrap_or(0.0);
    if !pm25.is_finite() || !pm10.is_finite() {
        return NEUTRAL_SCORE;
    }

    let pm25_score = (100.0 - pm25 * config.pm25_slope).clamp(0.0, 100.0);
    let pm10_score = (100.0 - pm10 * config.pm10_slope).clamp(0.0, 100.0);
    let overall = pm25_score * config.pm25_weight + pm10_score * config.pm10_weight;

    round2(overall.clamp(0.0, 100.0))
}

/// Discrete air-quality tier. The four tiers partition `[0, 100]` with
/// boundaries at 40/60/80, inclusive on the lower side of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl QualityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }

    /// Advisory wording matching the tier.
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent air quality. Ideal for outdoor activity.",
            Self::Good => "Good air quality. Travel as usual.",
            Self::Moderate => "Moderate air quality. Sensitive individuals should take precautions.",
            Self::Poor => "Poor air quality. Wear a mask and avoid strenuous activity.",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlannerConfig {
        PlannerConfig::default()
    }

    #[test]
    fn clean_air_scores_100() {
        assert_eq!(air_quality_score(&config(), Some(0.0), Some(0.0)), 100.0);
    }

    #[test]
    fn missing_readings_count_as_best_case() {
        assert_eq!(air_quality_score(&config(), None, None), 100.0);
        assert_eq!(air_quality_score(&config(), None, Some(40.0)), 94.0);
    }

    #[test]
    fn saturated_pm25_leaves_only_the_pm10_component() {
        // pm25 >= 50 clamps its component to 0, so only pm10 * 0.3 remains.
        assert_eq!(air_quality_score(&config(), Some(50.0), Some(40.0)), 24.0);
        assert_eq!(air_quality_score(&config(), Some(90.0), Some(40.0)), 24.0);
        assert_eq!(air_quality_score(&config(), Some(50.0), Some(0.0)), 30.0);
    }

    #[test]
    fn non_finite_input_yields_the_neutral_score() {
        assert_eq!(
            air_quality_score(&config(), Some(f64::NAN), Some(10.0)),
            NEUTRAL_SCORE
        );
        assert_eq!(
            air_quality_score(&config(), Some(5.0), Some(f64::INFINITY)),
            NEUTRAL_SCORE
        );
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_side() {
        assert_eq!(QualityLevel::from_score(100.0), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(80.0), QualityLevel::Excellent);
        assert_eq!(QualityLevel::from_score(79.99), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(60.0), QualityLevel::Good);
        assert_eq!(QualityLevel::from_score(59.99), QualityLevel::Moderate);
        assert_eq!(QualityLevel::from_score(40.0), QualityLevel::Moderate);
        assert_eq!(QualityLevel::from_score(39.99), QualityLevel::Poor);
        assert_eq!(QualityLevel::from_score(0.0), QualityLevel::Poor);
    }

    #[test]
    fn every_score_maps_to_exactly_one_tier() {
        for i in 0..=1000 {
            let score = f64::from(i) / 10.0;
            // from_score is total by construction; pin that it never panics
            // and always lands in one of the four tiers.
            let tier = QualityLevel::from_score(score);
            assert!(matches!(
                tier,
                QualityLevel::Excellent
                    | QualityLevel::Good
                    | QualityLevel::Moderate
                    | QualityLevel::Poor
            ));
        }
    }
}
