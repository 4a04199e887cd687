//! Projection engine for year-by-year investment statements

mod state;
mod engine;
mod statements;
mod metrics;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, PROPERTY_TAX_RATE};
pub use statements::{CashFlowYear, IncomeStatementYear, ProjectionResult};
pub use metrics::{Metrics, PaybackAnalysis};
