//! Running balance state for a month-by-month amortization

/// State of a loan at a point in time during amortization
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Months already paid (0 before the first installment)
    pub month: u32,

    /// Outstanding balance, never clamped. Floating drift can leave this a
    /// hair below zero at the end of the term.
    pub balance: f64,

    /// Periodic (monthly) interest rate as a decimal
    pub monthly_rate: f64,
}

impl LoanState {
    /// Initialize state at drawdown
    pub fn new(principal: f64, monthly_rate: f64) -> Self {
        Self {
            month: 0,
            balance: principal,
            monthly_rate,
        }
    }

    /// Interest accrued on the outstanding balance for the coming month
    pub fn accrued_interest(&self) -> f64 {
        self.balance * self.monthly_rate
    }

    /// Apply the principal portion of one installment and advance a month
    pub fn repay(&mut self, principal_portion: f64) {
        self.balance -= principal_portion;
        self.month += 1;
    }

    /// Balance as reported to consumers, floored at zero
    pub fn reported_balance(&self) -> f64 {
        self.balance.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_balance_clamps_but_state_keeps_residual() {
        let mut state = LoanState::new(100.0, 0.01);
        state.repay(100.000_001);

        assert_eq!(state.month, 1);
        assert!(state.balance < 0.0);
        assert_eq!(state.reported_balance(), 0.0);
    }

    #[test]
    fn test_interest_uses_running_balance() {
        let mut state = LoanState::new(1_000.0, 0.01);
        assert!((state.accrued_interest() - 10.0).abs() < 1e-12);

        state.repay(500.0);
        assert!((state.accrued_interest() - 5.0).abs() < 1e-12);
    }
}
