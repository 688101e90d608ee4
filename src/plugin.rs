#![allow(missing_docs)]

use tracing::error;

use crate::command::{EaipCommand, USAGE};
use crate::service::EaipService;
use crate::types::{ChartIndexEntry, ChartQuery, EaipConfig};

/// What the host framework should send back to the user.
///
/// Listings carry the structured entries so the host can render them
/// either as plain text (`raw`) or through its HTML-template picture
/// pipeline; [`EaipService::format_chart_list`] produces the text form.
#[derive(Debug, Clone)]
pub enum EaipResponse {
    Text(String),
    Listing {
        icao: String,
        entries: Vec<ChartIndexEntry>,
        raw: bool,
    },
    Image(Vec<u8>),
}

/// eAIP plugin boundary.
///
/// Every failure below this point is converted into a user-facing
/// [`EaipResponse::Text`]; no error propagates to the host dispatcher.
pub struct EaipPlugin {
    service: EaipService,
}

impl EaipPlugin {
    pub fn new(config: EaipConfig) -> Self {
        Self {
            service: EaipService::new(config),
        }
    }

    pub fn default_plugin() -> Self {
        Self::new(EaipConfig::default())
    }

    pub fn service(&self) -> &EaipService {
        &self.service
    }

    pub fn config(&self) -> &EaipConfig {
        self.service.config()
    }

    /// Handle the argument text of an `eaip` command.
    ///
    /// `is_admin` reflects the host framework's permission check; only
    /// the `set` subcommand consults it.
    pub async fn handle_command(&mut self, input: &str, is_admin: bool) -> EaipResponse {
        let command = match EaipCommand::parse(input) {
            Ok(command) => command,
            Err(e) => return EaipResponse::Text(format!("{}\n{}", e, USAGE)),
        };

        match command {
            EaipCommand::SetPeriod { period } => {
                if !is_admin {
                    return EaipResponse::Text(
                        "Only administrators may update the AIRAC period".to_string(),
                    );
                }
                match self.service.update_period(&period).await {
                    Ok(report) => EaipResponse::Text(report.to_string()),
                    Err(e) => {
                        error!("Period update failed: {}", e);
                        EaipResponse::Text(format!("Update failed: {}", e))
                    }
                }
            }
            EaipCommand::Query { icao, raw, search } => {
                let query = search.map(ChartQuery::Search).unwrap_or(ChartQuery::All);
                self.listing(icao, query, raw).await
            }
            EaipCommand::ByFilename { icao, keyword, raw } => {
                self.listing(icao, ChartQuery::Filename(keyword), raw).await
            }
            EaipCommand::Select { icao, doc_id } => {
                match self.service.chart_by_id(&icao, &doc_id).await {
                    Ok(bytes) => EaipResponse::Image(bytes),
                    Err(e) => EaipResponse::Text(e.to_string()),
                }
            }
            EaipCommand::ByCode { icao, code } => {
                match self.service.chart_by_code(&icao, &code).await {
                    Ok(bytes) => EaipResponse::Image(bytes),
                    Err(e) => EaipResponse::Text(e.to_string()),
                }
            }
        }
    }

    /// Resolve the numeric reply a user sends after a listing prompt.
    pub async fn select_from_listing(&self, icao: &str, selection: &str) -> EaipResponse {
        match self.service.chart_by_selection(icao, selection).await {
            Ok(bytes) => EaipResponse::Image(bytes),
            Err(e) => EaipResponse::Text(e.to_string()),
        }
    }

    async fn listing(&self, icao: String, query: ChartQuery, raw: bool) -> EaipResponse {
        match self.service.chart_list(&icao, &query).await {
            Ok(entries) => EaipResponse::Listing { icao, entries, raw },
            Err(e) => EaipResponse::Text(e.to_string()),
        }
    }
}

pub fn create_plugin(config: EaipConfig) -> EaipPlugin {
    EaipPlugin::new(config)
}

pub fn get_eaip_plugin() -> EaipPlugin {
    EaipPlugin::default_plugin()
}
