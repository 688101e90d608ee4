pub mod get_chart;
pub mod query_charts;
pub mod set_period;

pub use get_chart::GetChartAction;
pub use query_charts::{Action, ActionExample, QueryChartsAction};
pub use set_period::SetPeriodAction;

pub fn get_eaip_action_names() -> Vec<&'static str> {
    vec!["QUERY_EAIP_CHARTS", "GET_EAIP_CHART", "SET_EAIP_PERIOD"]
}
