use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::processor::{CHART_TYPES, SPECIAL_CHART_TYPES};

#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn position(&self) -> i32;
    async fn get(&self, params: ProviderParams) -> ProviderResult;
}

pub struct ProviderParams {
    pub conversation_id: String,
    pub agent_id: String,
}

#[derive(Debug, Clone)]
pub struct ProviderResult {
    pub values: HashMap<String, String>,
    pub text: String,
    pub data: Value,
}

/// Supported chart types provider.
pub struct ChartTypesProvider;

#[async_trait]
impl Provider for ChartTypesProvider {
    fn name(&self) -> &'static str {
        "CHART_TYPES"
    }

    fn description(&self) -> &'static str {
        "Provides the chart-type buckets supported by the eAIP chart query plugin"
    }

    fn position(&self) -> i32 {
        50
    }

    async fn get(&self, _params: ProviderParams) -> ProviderResult {
        let values = HashMap::from([
            ("chartTypeCount".to_string(), CHART_TYPES.len().to_string()),
            (
                "mergedTypeCount".to_string(),
                SPECIAL_CHART_TYPES.len().to_string(),
            ),
        ]);

        let text = format!(
            "Supported eAIP chart types: {}. Multi-page types served as one merged PDF: {}.",
            CHART_TYPES.join(", "),
            SPECIAL_CHART_TYPES.join(", ")
        );

        let data = serde_json::json!({
            "chartTypes": CHART_TYPES,
            "mergedTypes": SPECIAL_CHART_TYPES,
        });

        ProviderResult { values, text, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_metadata() {
        let provider = ChartTypesProvider;
        assert_eq!(provider.name(), "CHART_TYPES");
        assert_eq!(provider.position(), 50);
    }

    #[tokio::test]
    async fn test_get_lists_all_types() {
        let provider = ChartTypesProvider;
        let params = ProviderParams {
            conversation_id: "test".to_string(),
            agent_id: "test".to_string(),
        };

        let result = provider.get(params).await;
        assert!(result.text.contains("SID"));
        assert!(result.text.contains("WAYPOINT LIST"));
        assert_eq!(result.values["chartTypeCount"], "14");
    }
}
