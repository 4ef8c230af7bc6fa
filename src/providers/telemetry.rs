//! Blocking client for the municipal air-quality API
//! (`apioac22.cali.gov.co`): a device registry plus per-device pollutant
//! time series.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::Error;
use crate::model::{GeoPoint, PollutantReading, SensorMeta};
use crate::providers::TelemetryProvider;

pub const DEFAULT_BASE_URL: &str = "https://apioac22.cali.gov.co";

/// Registry descriptions are free text; keep only a short prefix.
const MAX_DESCRIPTION_CHARS: usize = 100;

pub struct CaliAirApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl CaliAirApi {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// The API serves numbers both as JSON numbers and as quoted strings,
/// depending on the device firmware. Accept either.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    longitude: Option<f64>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, rename = "deviceId")]
    device_id: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricsRow {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default, rename = "massPM2_5Avg", deserialize_with = "lenient_f64")]
    pm2_5_avg: Option<f64>,
    #[serde(default, rename = "massPM10_0Avg", deserialize_with = "lenient_f64")]
    pm10_avg: Option<f64>,
}

impl TelemetryProvider for CaliAirApi {
    fn list_sensor_nodes(&self) -> Result<Vec<SensorMeta>, Error> {
        let url = format!("{}/nodes", self.base_url);
        let rows: Vec<RegistryRow> = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;

        let mut metas = Vec::with_capacity(rows.len());
        for row in rows {
            let (Some(lat), Some(lng)) = (row.latitude, row.longitude) else {
                continue;
            };
            let Ok(location) = GeoPoint::new(lat, lng) else {
                continue;
            };
            metas.push(SensorMeta {
                name: row.name.unwrap_or_default(),
                location,
                address: row.address.unwrap_or_default(),
                device_id: row.device_id,
                description: row
                    .description
                    .map(|d| d.chars().take(MAX_DESCRIPTION_CHARS).collect())
                    .unwrap_or_default(),
            });
        }
        Ok(metas)
    }

    fn latest_metrics(
        &self,
        device_id: &str,
        date: NaiveDate,
    ) -> Result<Option<PollutantReading>, Error> {
        let url = format!("{}/metrics/range_public", self.base_url);
        let start_date = date.format("%Y-%m-%d").to_string();
        let rows: Vec<MetricsRow> = self
            .client
            .get(&url)
            .query(&[("deviceId", device_id), ("start_date", &start_date)])
            .header("accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;

        // The series is chronological; the last row is the latest reading
        Ok(rows.into_iter().next_back().map(|row| PollutantReading {
            pm2_5_avg: row.pm2_5_avg,
            pm10_avg: row.pm10_avg,
            timestamp: row.timestamp,
        }))
    }
}
