//! Builds the per-request sensor snapshot from the telemetry provider.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::Error;
use crate::air::score::air_quality_score;
use crate::config::PlannerConfig;
use crate::model::{AirQualitySample, AirQualitySnapshot, SensorNode};
use crate::providers::TelemetryProvider;

/// Lists the sensor registry and fetches the latest reading for every
/// device. Registry rows without a device id, without readings for `date`,
/// or whose metric fetch fails are skipped; only a registry-level failure
/// is an error.
pub fn collect_snapshot<T: TelemetryProvider>(
    telemetry: &T,
    config: &PlannerConfig,
    date: NaiveDate,
) -> Result<Vec<SensorNode>, Error> {
    let metas = telemetry.list_sensor_nodes()?;
    debug!("sensor registry returned {} rows", metas.len());

    let mut sensors = Vec::new();
    for meta in metas {
        let Some(device_id) = meta.device_id else {
            continue;
        };
        match telemetry.latest_metrics(&device_id, date) {
            Ok(Some(reading)) => {
                let score = air_quality_score(config, reading.pm2_5_avg, reading.pm10_avg);
                sensors.push(SensorNode {
                    name: meta.name,
                    location: meta.location,
                    sample: AirQualitySample {
                        device_id,
                        timestamp: reading.timestamp,
                        pm2_5_avg: reading.pm2_5_avg,
                        pm10_avg: reading.pm10_avg,
                        score,
                    },
                });
            }
            Ok(None) => debug!("no readings for device {device_id} on {date}"),
            Err(err) => warn!("skipping device {device_id}: {err}"),
        }
    }

    debug!("{} sensors carry data for {date}", sensors.len());
    Ok(sensors)
}

/// [`collect_snapshot`], degraded to [`AirQualitySnapshot::Unavailable`]
/// instead of failing: missing telemetry never aborts a routing request.
pub fn air_quality_snapshot<T: TelemetryProvider>(
    telemetry: &T,
    config: &PlannerConfig,
    date: NaiveDate,
) -> AirQualitySnapshot {
    match collect_snapshot(telemetry, config, date) {
        Ok(sensors) => AirQualitySnapshot::Ready(sensors),
        Err(err) => {
            warn!("air quality telemetry unavailable: {err}");
            AirQualitySnapshot::Unavailable
        }
    }
}
