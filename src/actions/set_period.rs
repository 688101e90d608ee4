use super::query_charts::{Action, ActionExample};
use async_trait::async_trait;
use serde_json::Value;

pub struct SetPeriodAction;

#[async_trait]
impl Action for SetPeriodAction {
    fn name(&self) -> &'static str {
        "SET_EAIP_PERIOD"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["UPDATE_AIRAC", "SWITCH_CYCLE"]
    }

    fn description(&self) -> &'static str {
        "Switch the active AIRAC cycle and refresh airport chart indices. Admin only."
    }

    async fn validate(&self, _message_text: &str) -> bool {
        true
    }

    async fn handler(&self, params: Value) -> Result<Value, String> {
        let period = params
            .get("period")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "Missing 'period' parameter".to_string())?;

        if period.len() != 4 || !period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("Invalid period format: {}", period));
        }

        Ok(serde_json::json!({
            "action": "SET_EAIP_PERIOD",
            "period": period,
            "status": "pending_update"
        }))
    }

    fn examples(&self) -> Vec<ActionExample> {
        vec![ActionExample {
            input: "Switch the chart data to cycle 2506".to_string(),
            output: "Updating to AIRAC period 2506".to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_metadata() {
        let action = SetPeriodAction;
        assert_eq!(action.name(), "SET_EAIP_PERIOD");
    }

    #[tokio::test]
    async fn test_handler_validates_period() {
        let action = SetPeriodAction;
        assert!(action
            .handler(serde_json::json!({"period": "25x5"}))
            .await
            .is_err());
        assert!(action
            .handler(serde_json::json!({"period": "2505"}))
            .await
            .is_ok());
    }
}
