#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default AIRAC cycle id.
pub const DEFAULT_AIRAC_PERIOD: u32 = 2505;

/// Default eAIP distribution directory name inside a cycle.
pub const DEFAULT_DIR_NAME: &str = "EAIP2025-05.V1.3";

/// One row of an airport's `index.json`.
///
/// `id` is a 1-based counter rendered as a string, scoped per airport and
/// assigned in directory-scan order. `sort` is the chart-type bucket, or
/// `"general"` for unclassified files in the airport root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartIndexEntry {
    pub id: String,
    pub code: String,
    pub name: String,
    pub path: String,
    pub sort: String,
}

/// One record of the external `AD.JSON` manifest.
///
/// The schema is owned by the eAIP distribution; unknown fields are
/// ignored and both fields may be absent in partial manifests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(rename = "pdfPath", default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// A chart-list query filter, in priority order: exact code match, then
/// filename substring, then a runway number or exact chart type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartQuery {
    All,
    Code(String),
    Filename(String),
    Search(String),
}

impl ChartQuery {
    pub fn describe(&self) -> String {
        match self {
            ChartQuery::All => "any chart".to_string(),
            ChartQuery::Code(code) => format!("code {}", code),
            ChartQuery::Filename(keyword) => format!("filename keyword {}", keyword),
            ChartQuery::Search(term) => format!("type or runway {}", term),
        }
    }
}

/// Plugin configuration, passed explicitly to every operation.
///
/// `AIRAC_PERIOD` and `DIR_NAME` are persisted by the host configuration
/// service; this struct is serde-serializable so the host can store it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EaipConfig {
    pub airac_period: u32,
    pub dir_name: String,
    pub data_path: PathBuf,
}

impl Default for EaipConfig {
    fn default() -> Self {
        Self {
            airac_period: DEFAULT_AIRAC_PERIOD,
            dir_name: DEFAULT_DIR_NAME.to_string(),
            data_path: PathBuf::from("data/AD"),
        }
    }
}

impl EaipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let airac_period = env::var("EAIP_AIRAC_PERIOD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_AIRAC_PERIOD);

        let dir_name =
            env::var("EAIP_DIR_NAME").unwrap_or_else(|_| DEFAULT_DIR_NAME.to_string());

        let data_path = env::var("EAIP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/AD"));

        Self {
            airac_period,
            dir_name,
            data_path,
        }
    }

    /// Set the AIRAC cycle id.
    pub fn airac_period(mut self, period: u32) -> Self {
        self.airac_period = period;
        self
    }

    /// Set the distribution directory name.
    pub fn dir_name<S: Into<String>>(mut self, name: S) -> Self {
        self.dir_name = name.into();
        self
    }

    /// Set the data root directory.
    pub fn data_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_path = path.into();
        self
    }

    /// Root directory of the configured cycle.
    pub fn cycle_path(&self) -> PathBuf {
        self.data_path.join(self.airac_period.to_string())
    }

    /// `Terminal` directory holding one folder per airport.
    pub fn terminal_path(&self) -> PathBuf {
        self.cycle_path()
            .join("Data")
            .join(&self.dir_name)
            .join("Terminal")
    }

    /// Path of the external `AD.JSON` manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.cycle_path().join("Data").join("JsonPath").join("AD.JSON")
    }

    /// Directory of a single airport.
    pub fn airport_path(&self, icao: &str) -> PathBuf {
        self.terminal_path().join(icao)
    }
}

/// Chart count for one airport, as reported after a cycle update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportSummary {
    pub icao: String,
    pub chart_count: usize,
}

/// Statistics returned by a successful period update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub airac_period: u32,
    pub airport_count: usize,
    pub chart_count: usize,
    pub airports: Vec<AirportSummary>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AIRAC Period: {}", self.airac_period)?;
        writeln!(f, "Total Airports: {}", self.airport_count)?;
        writeln!(f, "Total Charts: {}", self.chart_count)?;
        write!(f, "Airport Index:")?;
        for airport in &self.airports {
            write!(f, "\n{}: {} charts", airport.icao, airport.chart_count)?;
        }
        Ok(())
    }
}
