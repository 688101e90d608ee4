use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    fn similes(&self) -> Vec<&'static str>;
    fn description(&self) -> &'static str;
    async fn validate(&self, message_text: &str) -> bool;
    async fn handler(&self, params: Value) -> Result<Value, String>;
    fn examples(&self) -> Vec<ActionExample>;
}

pub struct ActionExample {
    pub input: String,
    pub output: String,
}

pub struct QueryChartsAction;

#[async_trait]
impl Action for QueryChartsAction {
    fn name(&self) -> &'static str {
        "QUERY_EAIP_CHARTS"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["LIST_CHARTS", "FIND_CHARTS", "SEARCH_EAIP"]
    }

    fn description(&self) -> &'static str {
        "List an airport's aeronautical charts by ICAO code, optionally filtered by chart type, runway or filename keyword"
    }

    async fn validate(&self, _message_text: &str) -> bool {
        true
    }

    async fn handler(&self, params: Value) -> Result<Value, String> {
        let icao = params
            .get("icao")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "Missing 'icao' parameter".to_string())?;

        Ok(serde_json::json!({
            "action": "QUERY_EAIP_CHARTS",
            "icao": icao.to_uppercase(),
            "search": params.get("search").and_then(|v| v.as_str()),
            "status": "pending_query"
        }))
    }

    fn examples(&self) -> Vec<ActionExample> {
        vec![
            ActionExample {
                input: "Show me the charts for ZBAA".to_string(),
                output: "Here are the charts available for Beijing Capital".to_string(),
            },
            ActionExample {
                input: "Any IAC charts for runway 36L at ZBAA?".to_string(),
                output: "Listing the 36L approach charts now".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_metadata() {
        let action = QueryChartsAction;
        assert_eq!(action.name(), "QUERY_EAIP_CHARTS");
        assert!(action.similes().contains(&"LIST_CHARTS"));
    }

    #[tokio::test]
    async fn test_handler_requires_icao() {
        let action = QueryChartsAction;
        let result = action.handler(serde_json::json!({})).await;
        assert!(result.is_err());

        let result = action
            .handler(serde_json::json!({"icao": "zbaa"}))
            .await
            .unwrap();
        assert_eq!(result["icao"], "ZBAA");
    }
}
