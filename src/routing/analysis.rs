//! Route-level air-quality aggregation.

use itertools::Itertools;
use log::debug;

use crate::air::{QualityLevel, nearest_within};
use crate::config::PlannerConfig;
use crate::model::{AirQualitySnapshot, RouteAirQuality, RouteNode, SamplePoint, round2};

/// Samples the path at regular node intervals, joins each sample to its
/// nearest sensor and aggregates the joined scores.
///
/// Samples with no sensor in radius are dropped from the aggregate, in
/// contrast to per-step evaluation which substitutes a neutral score.
/// The asymmetry is intentional: the route average should only reflect
/// real readings, while every step must render an air-quality block.
pub fn analyze_route_air_quality(
    config: &PlannerConfig,
    nodes: &[RouteNode],
    snapshot: &AirQualitySnapshot,
) -> RouteAirQuality {
    let Some(sensors) = snapshot.sensors() else {
        return RouteAirQuality::no_data("air quality telemetry is unavailable");
    };
    if sensors.is_empty() {
        return RouteAirQuality::no_data("no air quality sensors are registered");
    }

    let stride = (nodes.len() / config.route_sample_divisor).max(1);
    let mut scores = Vec::new();
    let mut sample_points = Vec::new();

    for node in nodes.iter().step_by(stride) {
        let Some((sensor, _)) =
            nearest_within(node.location, sensors, config.sensor_join_radius_km)
        else {
            continue;
        };
        let score = sensor.sample.score;
        scores.push(score);
        sample_points.push(SamplePoint {
            coordinates: node.location,
            score,
            quality_level: QualityLevel::from_score(score).to_string(),
            nearest_sensor: sensor.name.clone(),
        });
    }

    if scores.is_empty() {
        return RouteAirQuality::no_data("could not obtain air quality data along the route");
    }

    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    let (min_score, max_score) = scores
        .iter()
        .copied()
        .minmax_by(f64::total_cmp)
        .into_option()
        .unwrap_or((average, average));

    debug!(
        "route air quality: {} samples, average {average:.2}",
        scores.len()
    );

    sample_points.truncate(config.max_sample_points);
    let level = QualityLevel::from_score(average);
    RouteAirQuality::Analyzed {
        average_score: round2(average),
        quality_level: level.to_string(),
        samples_analyzed: scores.len(),
        min_score: round2(min_score),
        max_score: round2(max_score),
        sample_points,
        recommendation: level.recommendation().to_string(),
    }
}
