//! Per-year income statement and cash-flow statement records

use serde::{Deserialize, Serialize};

use super::metrics::Metrics;

/// Accrual view of one projection year
///
/// Expenses include loan interest and depreciation but not principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementYear {
    pub year: u32,

    // Revenue
    pub rent_income: f64,
    pub other_income: f64,
    pub total_revenue: f64,

    // Expenses
    pub management_fees: f64,
    pub repair_advertising: f64,
    /// Annual running costs (monthly input × 12)
    pub running_costs: f64,
    pub insurance: f64,
    pub property_tax: f64,
    pub closing_costs: f64,
    pub interest_payment: f64,
    pub depreciation: f64,
    pub total_expenses: f64,

    // Tax
    pub pre_tax_income: f64,
    pub income_deduction: f64,
    pub taxable_income: f64,
    pub income_tax: f64,

    // Bottom line
    pub net_profit: f64,
    pub cumulative_net_profit: f64,
}

/// Cash view of one projection year
///
/// Loan service counts principal and interest; depreciation is excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowYear {
    pub year: u32,

    // Inflows
    pub rent_income: f64,
    pub other_income: f64,
    pub total_income: f64,

    // Outflows
    pub management_fees: f64,
    pub repair_advertising: f64,
    pub running_costs: f64,
    pub insurance: f64,
    pub property_tax: f64,
    pub closing_costs: f64,
    pub principal_repayment: f64,
    pub interest_payment: f64,
    pub renovation_costs: f64,
    pub income_tax: f64,
    pub total_expenses: f64,

    // Bottom line
    pub annual_net_cash_flow: f64,
    pub cumulative_cash_flow: f64,
    /// Loan balance at year end (zero once repaid)
    pub remaining_loan: f64,
}

/// Complete projection result, handed to every consumer explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Ordered by ascending year starting at 1
    pub income_statements: Vec<IncomeStatementYear>,

    /// Ordered by ascending year starting at 1
    pub cash_flows: Vec<CashFlowYear>,

    pub metrics: Metrics,
}

impl ProjectionResult {
    pub fn years(&self) -> usize {
        self.cash_flows.len()
    }

    /// (year, annual net cash flow, cumulative cash flow) for charting
    pub fn cash_flow_series(&self) -> Vec<(u32, f64, f64)> {
        self.cash_flows
            .iter()
            .map(|cf| (cf.year, cf.annual_net_cash_flow, cf.cumulative_cash_flow))
            .collect()
    }

    /// First year in which cumulative cash flow turns non-negative
    pub fn break_even_year(&self) -> Option<u32> {
        self.cash_flows
            .iter()
            .find(|cf| cf.cumulative_cash_flow >= 0.0)
            .map(|cf| cf.year)
    }

    pub fn total_income_tax(&self) -> f64 {
        self.income_statements.iter().map(|s| s.income_tax).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.income_statements.iter().map(|s| s.interest_payment).sum()
    }
}
