//! Loan amortization for the acquisition financing

mod state;
mod schedule;

pub use state::LoanState;
pub use schedule::{
    AmortizationEngine, AmortizationSchedule, AmortizationYear, LoanTerms, RepaymentMethod,
};
