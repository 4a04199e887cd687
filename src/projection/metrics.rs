//! Summary investment metrics derived from the projected statements

use serde::{Deserialize, Serialize};

use super::statements::{CashFlowYear, IncomeStatementYear};
use crate::inputs::InvestmentInputs;
use crate::loan::AmortizationSchedule;

/// Headline figures for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// First-year effective rent over price, in percent
    pub gross_yield: f64,
    /// First-year effective rent over price plus acquisition costs, in percent
    pub gross_yield_with_costs: f64,
    /// First-year loan service over first-year effective rent, in percent
    pub repayment_ratio: f64,

    pub first_year_net_profit: f64,
    pub first_year_cash_flow: f64,
    pub final_cumulative_profit: f64,
    pub final_cumulative_cash_flow: f64,

    /// Sum of annual net cash flow for years 2 through 5
    pub five_year_payback: f64,
    pub five_year_payback_achieved: bool,
    /// Initial investment divided by the year-2 cash flow.
    /// This is a one-year approximation, not a cumulative payback solve.
    pub payback_years: Option<f64>,

    pub initial_investment: f64,
}

/// Reading of the payback figures for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaybackAnalysis {
    /// Years 2-5 recover the initial investment
    Achieved,
    /// Not within five years; estimated years at the year-2 cash flow
    EstimatedYears(f64),
    /// Year-2 cash flow is not positive
    NotRecoverable,
}

fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

impl Metrics {
    /// Derive metrics once the full statement sequences exist
    pub fn derive(
        inputs: &InvestmentInputs,
        schedule: &AmortizationSchedule,
        income_statements: &[IncomeStatementYear],
        cash_flows: &[CashFlowYear],
    ) -> Self {
        let first_year_rent = inputs.annual_rent * (inputs.occupancy_rate_percent / 100.0);
        let acquisition_cost =
            inputs.property_price + inputs.closing_costs + inputs.initial_renovation;

        let first_year_loan_payment = if inputs.loan_period > 0 {
            schedule.year(1).map(|y| y.total_payment).unwrap_or(0.0)
        } else {
            0.0
        };

        let initial_investment = inputs.initial_investment();

        // Index 1 is year 2
        let payback_years = cash_flows
            .get(1)
            .map(|cf| cf.annual_net_cash_flow)
            .filter(|&flow| flow > 0.0)
            .map(|flow| initial_investment / flow);

        let (five_year_payback, five_year_payback_achieved) = if cash_flows.len() >= 5 {
            let sum: f64 = cash_flows[1..5].iter().map(|cf| cf.annual_net_cash_flow).sum();
            (sum, sum >= initial_investment)
        } else {
            (0.0, false)
        };

        Self {
            gross_yield: percent_of(first_year_rent, inputs.property_price),
            gross_yield_with_costs: percent_of(first_year_rent, acquisition_cost),
            repayment_ratio: percent_of(first_year_loan_payment, first_year_rent),
            first_year_net_profit: income_statements.first().map(|s| s.net_profit).unwrap_or(0.0),
            first_year_cash_flow: cash_flows.first().map(|cf| cf.annual_net_cash_flow).unwrap_or(0.0),
            final_cumulative_profit: income_statements
                .last()
                .map(|s| s.cumulative_net_profit)
                .unwrap_or(0.0),
            final_cumulative_cash_flow: cash_flows
                .last()
                .map(|cf| cf.cumulative_cash_flow)
                .unwrap_or(-(inputs.property_price + inputs.initial_renovation)),
            five_year_payback,
            five_year_payback_achieved,
            payback_years,
            initial_investment,
        }
    }

    pub fn payback_analysis(&self) -> PaybackAnalysis {
        if self.five_year_payback_achieved {
            PaybackAnalysis::Achieved
        } else if let Some(years) = self.payback_years {
            PaybackAnalysis::EstimatedYears(years)
        } else {
            PaybackAnalysis::NotRecoverable
        }
    }
}
