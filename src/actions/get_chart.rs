use super::query_charts::{Action, ActionExample};
use async_trait::async_trait;
use serde_json::Value;

pub struct GetChartAction;

#[async_trait]
impl Action for GetChartAction {
    fn name(&self) -> &'static str {
        "GET_EAIP_CHART"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["SHOW_CHART", "RENDER_CHART", "OPEN_CHART"]
    }

    fn description(&self) -> &'static str {
        "Render a single aeronautical chart as an image, selected by index id or chart code"
    }

    async fn validate(&self, _message_text: &str) -> bool {
        true
    }

    async fn handler(&self, params: Value) -> Result<Value, String> {
        let icao = params
            .get("icao")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "Missing 'icao' parameter".to_string())?;

        let doc_id = params.get("id").and_then(|v| v.as_str());
        let code = params.get("code").and_then(|v| v.as_str());
        if doc_id.is_none() && code.is_none() {
            return Err("Missing 'id' or 'code' parameter".to_string());
        }

        Ok(serde_json::json!({
            "action": "GET_EAIP_CHART",
            "icao": icao.to_uppercase(),
            "id": doc_id,
            "code": code,
            "status": "pending_render"
        }))
    }

    fn examples(&self) -> Vec<ActionExample> {
        vec![
            ActionExample {
                input: "Show chart 12 for ZBAA".to_string(),
                output: "Rendering chart 12 now".to_string(),
            },
            ActionExample {
                input: "Open the 7A03 approach plate at ZBAA".to_string(),
                output: "Here is the chart with code 7A03".to_string(),
            },
        ]
    }
}
