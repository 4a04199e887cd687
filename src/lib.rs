//! Property Sim - Multi-year projection of a leveraged real-estate purchase
//!
//! This library provides:
//! - Loan amortization (equal payment and equal principal methods)
//! - Year-by-year income statements and cash-flow statements
//! - Investment metrics (gross yield, repayment ratio, payback)
//! - Named scenario storage and parallel scenario comparison
//! - CSV export of statements and schedules

pub mod error;
pub mod loan;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{Result, SimError};
pub use inputs::InvestmentInputs;
pub use loan::{AmortizationEngine, AmortizationSchedule, LoanTerms, RepaymentMethod};
pub use projection::{Metrics, ProjectionEngine, ProjectionResult};
pub use scenario::{ScenarioRunner, ScenarioStore};
