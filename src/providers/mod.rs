pub mod chart_types;

pub use chart_types::{ChartTypesProvider, Provider, ProviderParams, ProviderResult};
