//! Reduces a node path to a bounded sequence of navigation steps.

use crate::air::{QualityLevel, nearest_within};
use crate::config::PlannerConfig;
use crate::model::{
    AirQualitySnapshot, GeoPoint, PointAirQuality, RouteNode, RouteStep, StepKind, TravelMode,
    round1, round2,
};

/// Synthesizes start/navigation/arrival steps for a non-empty node path.
///
/// Navigation steps report the great-circle distance from the route start,
/// not the cumulative path length; only the arrival step uses the true
/// total. The arrival figures can therefore jump by more than the last
/// leg. Kept as-is: consumers render both figures today.
pub fn synthesize_steps(
    config: &PlannerConfig,
    nodes: &[RouteNode],
    mode: TravelMode,
    total_distance_km: f64,
    snapshot: &AirQualitySnapshot,
) -> Vec<RouteStep> {
    if nodes.len() < 3 {
        return basic_steps(config, nodes, mode, total_distance_km, snapshot);
    }

    let start = nodes[0];
    let mut steps = vec![start_step(config, start.location, snapshot)];

    let num_segments = (nodes.len() / config.route_sample_divisor)
        .clamp(config.min_step_segments, config.max_step_segments);
    let segment_size = nodes.len() / num_segments;

    for segment_idx in 1..num_segments {
        let point_idx = segment_idx * segment_size;
        if point_idx >= nodes.len() {
            break;
        }

        let node = nodes[point_idx];
        let distance_from_start = start.location.distance_km(node.location);
        let progress = point_idx as f64 / nodes.len() as f64;

        steps.push(RouteStep {
            step_number: steps.len() + 1,
            instruction: segment_instruction(progress, mode),
            coordinates: node.location,
            distance_from_start_km: round2(distance_from_start),
            estimated_time_min: round1(distance_from_start / config.speed_kmh(mode) * 60.0),
            air_quality: evaluate_point(config, node.location, snapshot),
            kind: StepKind::Navigation,
        });
    }

    steps.push(arrival_step(
        config,
        nodes[nodes.len() - 1].location,
        mode,
        total_distance_km,
        steps.len() + 1,
        snapshot,
    ));
    steps
}

/// Air-quality estimate for a single route point. Unlike the route-level
/// analyzer, points with no attributable sensor still get a neutral block.
pub(crate) fn evaluate_point(
    config: &PlannerConfig,
    point: GeoPoint,
    snapshot: &AirQualitySnapshot,
) -> PointAirQuality {
    let Some(sensors) = snapshot.sensors() else {
        return PointAirQuality::no_data();
    };

    match nearest_within(point, sensors, config.sensor_join_radius_km) {
        Some((sensor, distance_km)) => PointAirQuality {
            score: sensor.sample.score,
            level: QualityLevel::from_score(sensor.sample.score).to_string(),
            nearest_sensor: Some(sensor.name.clone()),
            sensor_distance_km: Some(round2(distance_km)),
        },
        None => PointAirQuality::no_nearby_data(),
    }
}

fn start_step(
    config: &PlannerConfig,
    location: GeoPoint,
    snapshot: &AirQualitySnapshot,
) -> RouteStep {
    RouteStep {
        step_number: 1,
        instruction: "Start your trip from the origin point".to_string(),
        coordinates: location,
        distance_from_start_km: 0.0,
        estimated_time_min: 0.0,
        air_quality: evaluate_point(config, location, snapshot),
        kind: StepKind::Start,
    }
}

fn arrival_step(
    config: &PlannerConfig,
    location: GeoPoint,
    mode: TravelMode,
    total_distance_km: f64,
    step_number: usize,
    snapshot: &AirQualitySnapshot,
) -> RouteStep {
    RouteStep {
        step_number,
        instruction: "You have arrived at your destination".to_string(),
        coordinates: location,
        distance_from_start_km: round2(total_distance_km),
        estimated_time_min: round1(total_distance_km / config.speed_kmh(mode) * 60.0),
        air_quality: evaluate_point(config, location, snapshot),
        kind: StepKind::Arrival,
    }
}

fn segment_instruction(progress: f64, mode: TravelMode) -> String {
    let mode_name = mode.display_name();
    if progress < 0.3 {
        format!("Continue on the main route, {mode_name}")
    } else if progress < 0.6 {
        format!("Stay on this road, {mode_name}")
    } else if progress < 0.9 {
        format!("You are approaching your destination, {mode_name}")
    } else {
        "Prepare to arrive at your final destination".to_string()
    }
}

/// Degenerate paths: a start step, possibly a midpoint, and an arrival
/// step. The midpoint guard can never hold under the `< 3` branch above;
/// the check mirrors the historical behavior and the 2-step outcome is
/// pinned by a test.
fn basic_steps(
    config: &PlannerConfig,
    nodes: &[RouteNode],
    mode: TravelMode,
    total_distance_km: f64,
    snapshot: &AirQualitySnapshot,
) -> Vec<RouteStep> {
    let mut steps = Vec::new();
    if nodes.is_empty() {
        return steps;
    }

    let start = nodes[0];
    steps.push(start_step(config, start.location, snapshot));

    if nodes.len() > 2 {
        let midpoint = nodes[nodes.len() / 2];
        let distance = start.location.distance_km(midpoint.location);
        steps.push(RouteStep {
            step_number: steps.len() + 1,
            instruction: "Continue toward your destination".to_string(),
            coordinates: midpoint.location,
            distance_from_start_km: round2(distance),
            estimated_time_min: round1(distance / config.speed_kmh(mode) * 60.0),
            air_quality: evaluate_point(config, midpoint.location, snapshot),
            kind: StepKind::Navigation,
        });
    }

    steps.push(arrival_step(
        config,
        nodes[nodes.len() - 1].location,
        mode,
        total_distance_km,
        steps.len() + 1,
        snapshot,
    ));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AirQualitySample, SensorNode};

    fn straight_path(len: usize) -> Vec<RouteNode> {
        (0..len)
            .map(|i| RouteNode {
                node_id: i as i64,
                location: GeoPoint {
                    lat: 3.40 + i as f64 * 0.001,
                    lng: -76.54,
                },
            })
            .collect()
    }

    fn sensor(name: &str, location: GeoPoint, score: f64) -> SensorNode {
        SensorNode {
            name: name.to_string(),
            location,
            sample: AirQualitySample {
                device_id: format!("dev-{name}"),
                timestamp: None,
                pm2_5_avg: None,
                pm10_avg: None,
                score,
            },
        }
    }

    #[test]
    fn fifty_nodes_produce_six_contiguous_steps() {
        let config = PlannerConfig::default();
        let nodes = straight_path(50);
        let steps = synthesize_steps(
            &config,
            &nodes,
            TravelMode::Drive,
            6.0,
            &AirQualitySnapshot::Unavailable,
        );

        // clamp(50 / 10, 3, 8) = 5 segments: start + 4 navigation + arrival
        assert_eq!(steps.len(), 6);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i + 1);
        }
        assert_eq!(steps[0].kind, StepKind::Start);
        assert!(steps[1..5].iter().all(|s| s.kind == StepKind::Navigation));
        assert_eq!(steps[5].kind, StepKind::Arrival);
    }

    #[test]
    fn two_node_path_yields_start_and_arrival_only() {
        let config = PlannerConfig::default();
        let nodes = straight_path(2);
        let steps = synthesize_steps(
            &config,
            &nodes,
            TravelMode::Walk,
            0.2,
            &AirQualitySnapshot::Unavailable,
        );

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].kind, StepKind::Start);
        assert_eq!(steps[1].kind, StepKind::Arrival);
        assert_eq!(steps[1].distance_from_start_km, 0.2);
    }

    #[test]
    fn navigation_distances_and_times_never_decrease() {
        let config = PlannerConfig::default();
        let nodes = straight_path(80);
        let steps = synthesize_steps(
            &config,
            &nodes,
            TravelMode::Bike,
            9.5,
            &AirQualitySnapshot::Unavailable,
        );

        for pair in steps.windows(2) {
            assert!(pair[1].distance_from_start_km >= pair[0].distance_from_start_km);
            assert!(pair[1].estimated_time_min >= pair[0].estimated_time_min);
        }
    }

    #[test]
    fn instructions_follow_the_progress_thresholds() {
        let config = PlannerConfig::default();
        let nodes = straight_path(50);
        let steps = synthesize_steps(
            &config,
            &nodes,
            TravelMode::Drive,
            6.0,
            &AirQualitySnapshot::Unavailable,
        );

        // Navigation steps sit at indices 10/20/30/40 of 50
        assert!(steps[1].instruction.starts_with("Continue on the main route"));
        assert!(steps[2].instruction.starts_with("Stay on this road"));
        assert!(steps[4].instruction.starts_with("You are approaching"));
    }

    #[test]
    fn steps_default_to_neutral_air_quality_without_snapshot() {
        let config = PlannerConfig::default();
        let nodes = straight_path(2);
        let steps = synthesize_steps(
            &config,
            &nodes,
            TravelMode::Walk,
            0.2,
            &AirQualitySnapshot::Unavailable,
        );

        assert_eq!(steps[0].air_quality.score, 50.0);
        assert_eq!(steps[0].air_quality.level, "no data");
        assert!(steps[0].air_quality.nearest_sensor.is_none());
    }

    #[test]
    fn steps_pick_up_the_nearest_sensor_within_radius() {
        let config = PlannerConfig::default();
        let nodes = straight_path(2);
        let snapshot = AirQualitySnapshot::Ready(vec![
            sensor("near", nodes[0].location, 88.0),
            sensor(
                "far",
                GeoPoint { lat: 3.90, lng: -76.54 },
                12.0,
            ),
        ]);

        let steps = synthesize_steps(&config, &nodes, TravelMode::Walk, 0.2, &snapshot);
        assert_eq!(steps[0].air_quality.score, 88.0);
        assert_eq!(steps[0].air_quality.level, "excellent");
        assert_eq!(steps[0].air_quality.nearest_sensor.as_deref(), Some("near"));
    }

    #[test]
    fn sensors_beyond_radius_mark_points_as_no_nearby_data() {
        let config = PlannerConfig::default();
        let nodes = straight_path(2);
        let snapshot = AirQualitySnapshot::Ready(vec![sensor(
            "far",
            GeoPoint { lat: 3.90, lng: -76.54 },
            12.0,
        )]);

        let steps = synthesize_steps(&config, &nodes, TravelMode::Walk, 0.2, &snapshot);
        assert_eq!(steps[0].air_quality.score, 50.0);
        assert_eq!(steps[0].air_quality.level, "no nearby data");
    }
}
