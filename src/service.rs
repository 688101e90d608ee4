#![allow(missing_docs)]

use chrono::Utc;
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{EaipError, Result};
use crate::processor::{ChartProcessor, UpdateAction};
use crate::render::ChartRenderer;
use crate::types::{AirportSummary, ChartIndexEntry, ChartQuery, EaipConfig, UpdateReport};

/// Query handler over the generated chart indices (TS parity: `EaipService`).
pub struct EaipService {
    config: EaipConfig,
    renderer: ChartRenderer,
    runway_regex: Regex,
}

impl EaipService {
    pub const SERVICE_TYPE: &'static str = "EAIP";
    pub const CAPABILITY_DESCRIPTION: &'static str =
        "Query, organize and render eAIP aeronautical charts";

    pub fn new(config: EaipConfig) -> Self {
        Self {
            config,
            renderer: ChartRenderer::new(),
            runway_regex: Regex::new(r"^\d{2}[LRC]?$").unwrap(),
        }
    }

    pub fn config(&self) -> &EaipConfig {
        &self.config
    }

    /// Switch to a new AIRAC cycle and refresh any airport whose index is
    /// missing. The period must be exactly four digits; nothing on disk
    /// is touched otherwise.
    pub async fn update_period(&mut self, period: &str) -> Result<UpdateReport> {
        if period.len() != 4 || !period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EaipError::InvalidPeriod(period.to_string()));
        }
        let airac: u32 = period
            .parse()
            .map_err(|_| EaipError::InvalidPeriod(period.to_string()))?;

        info!("Updating AIRAC period to {}", airac);
        self.config.airac_period = airac;

        let cycle_path = self.config.cycle_path();
        if !cycle_path.exists() {
            return Err(EaipError::CycleNotFound(airac));
        }

        // A directory with a stale but present index.json is never
        // refreshed; only a missing index triggers the pipeline.
        let terminal_path = self.config.terminal_path();
        let mut need_update = false;
        for entry in std::fs::read_dir(&terminal_path)? {
            let path = entry?.path();
            if path.is_dir() && !path.join("index.json").exists() {
                need_update = true;
                break;
            }
        }

        if need_update {
            let processor = ChartProcessor::new(self.config.clone())?;
            tokio::task::spawn_blocking(move || processor.update(&UpdateAction::ALL))
                .await
                .map_err(|e| EaipError::Config(format!("update task failed: {}", e)))??;
        } else {
            info!("All airport index files exist, no update needed");
        }

        let mut airports = Vec::new();
        let mut airport_count = 0;
        let mut chart_count = 0;
        for entry in std::fs::read_dir(&terminal_path)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            airport_count += 1;

            let index_path = path.join("index.json");
            if !index_path.exists() {
                continue;
            }
            let raw = tokio::fs::read_to_string(&index_path).await?;
            let entries: Vec<ChartIndexEntry> = serde_json::from_str(&raw)?;
            chart_count += entries.len();
            airports.push(AirportSummary {
                icao: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                chart_count: entries.len(),
            });
        }

        info!(
            "Period update successful: {} ({} airports, {} charts)",
            airac, airport_count, chart_count
        );

        Ok(UpdateReport {
            airac_period: airac,
            airport_count,
            chart_count,
            airports,
            updated_at: Utc::now(),
        })
    }

    /// Load an airport's chart list, filtered by the query.
    ///
    /// Filter priority: exact code match, else filename substring, else a
    /// runway number (matched against filenames) or exact chart type.
    pub async fn chart_list(
        &self,
        icao: &str,
        query: &ChartQuery,
    ) -> Result<Vec<ChartIndexEntry>> {
        let entries = self.load_index(icao).await?;

        let filtered: Vec<ChartIndexEntry> = match query {
            ChartQuery::All => entries,
            ChartQuery::Code(code) => entries
                .into_iter()
                .filter(|entry| entry.code.eq_ignore_ascii_case(code))
                .collect(),
            ChartQuery::Filename(keyword) => {
                let keyword = keyword.to_lowercase();
                entries
                    .into_iter()
                    .filter(|entry| entry.name.to_lowercase().contains(&keyword))
                    .collect()
            }
            ChartQuery::Search(term) => {
                if self.runway_regex.is_match(term) {
                    entries
                        .into_iter()
                        .filter(|entry| entry.name.contains(term.as_str()))
                        .collect()
                } else {
                    entries
                        .into_iter()
                        .filter(|entry| entry.sort == *term)
                        .collect()
                }
            }
        };

        if filtered.is_empty() {
            return Err(EaipError::ChartNotFound {
                icao: icao.to_string(),
                query: query.describe(),
            });
        }
        Ok(filtered)
    }

    /// Render a chart list as the `"{id}. [{sort}] {name}"` text block.
    pub fn format_chart_list(entries: &[ChartIndexEntry]) -> String {
        entries
            .iter()
            .map(|entry| {
                let sort = if entry.sort.is_empty() {
                    "Uncategorized"
                } else {
                    entry.sort.as_str()
                };
                format!("{}. [{}] {}", entry.id, sort, entry.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rasterize the chart with the given index id.
    pub async fn chart_by_id(&self, icao: &str, doc_id: &str) -> Result<Vec<u8>> {
        let entries = self.load_index(icao).await?;
        let entry = entries
            .iter()
            .find(|entry| entry.id == doc_id)
            .ok_or_else(|| EaipError::ChartNotFound {
                icao: icao.to_string(),
                query: format!("id {}", doc_id),
            })?;

        self.render_entry(icao, entry).await
    }

    /// Rasterize the chart at a 1-based position in the full list, as
    /// replied by a user after a listing prompt.
    pub async fn chart_by_selection(&self, icao: &str, selection: &str) -> Result<Vec<u8>> {
        let entries = self.load_index(icao).await?;

        let number: usize = selection
            .trim()
            .parse()
            .map_err(|_| EaipError::InvalidSelection(selection.to_string()))?;
        let index = number
            .checked_sub(1)
            .filter(|index| *index < entries.len())
            .ok_or_else(|| EaipError::InvalidSelection(selection.to_string()))?;

        self.render_entry(icao, &entries[index]).await
    }

    /// Rasterize the chart with an exact (case-insensitive) code match.
    pub async fn chart_by_code(&self, icao: &str, code: &str) -> Result<Vec<u8>> {
        let entries = self.load_index(icao).await?;
        let entry = entries
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| EaipError::ChartNotFound {
                icao: icao.to_string(),
                query: format!("code {}", code),
            })?;

        self.render_entry(icao, entry).await
    }

    /// Read and parse an airport's `index.json`.
    pub async fn load_index(&self, icao: &str) -> Result<Vec<ChartIndexEntry>> {
        let airport_path = self.config.airport_path(icao);
        if !airport_path.exists() {
            return Err(EaipError::AirportNotFound(icao.to_string()));
        }

        let index_path = airport_path.join("index.json");
        if !index_path.exists() {
            return Err(EaipError::IndexNotFound(icao.to_string()));
        }

        debug!("Loading index {}", index_path.display());
        let raw = tokio::fs::read_to_string(&index_path).await?;
        let entries: Vec<ChartIndexEntry> = serde_json::from_str(&raw)?;
        Ok(entries)
    }

    async fn render_entry(&self, icao: &str, entry: &ChartIndexEntry) -> Result<Vec<u8>> {
        let pdf_path: PathBuf = self.config.airport_path(icao).join(&entry.path);
        if !pdf_path.exists() {
            return Err(EaipError::MissingFile(entry.path.clone()));
        }
        self.renderer.render_first_page(&pdf_path).await
    }
}
