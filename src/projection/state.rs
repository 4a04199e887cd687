//! Running totals carried from one projection year to the next

use crate::inputs::InvestmentInputs;

/// Cumulative figures at the end of the last projected year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Last completed projection year (0 before year 1)
    pub year: u32,

    /// Sum of net profit over completed years
    pub cumulative_net_profit: f64,

    /// Acquisition outlay plus the sum of annual net cash flows
    pub cumulative_cash_flow: f64,
}

impl ProjectionState {
    /// Seed the cash position with the purchase price and renovation.
    /// Closing costs are booked as a year-1 expense instead.
    pub fn from_inputs(inputs: &InvestmentInputs) -> Self {
        Self {
            year: 0,
            cumulative_net_profit: 0.0,
            cumulative_cash_flow: -(inputs.property_price + inputs.initial_renovation),
        }
    }

    /// Fold one year's bottom lines into the running sums
    pub fn advance_year(&mut self, net_profit: f64, annual_net_cash_flow: f64) {
        self.year += 1;
        self.cumulative_net_profit += net_profit;
        self.cumulative_cash_flow += annual_net_cash_flow;
    }
}
