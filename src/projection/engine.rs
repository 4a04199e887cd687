//! Core projection engine for year-by-year income and cash-flow statements

use crate::inputs::InvestmentInputs;
use crate::loan::AmortizationSchedule;
use super::metrics::Metrics;
use super::state::ProjectionState;
use super::statements::{CashFlowYear, IncomeStatementYear, ProjectionResult};

/// Combined fixed-asset and city-planning levy on assessed value
pub const PROPERTY_TAX_RATE: f64 = 0.017;

/// Loan figures attributed to one projection year
#[derive(Debug, Clone, Copy, Default)]
struct LoanLine {
    interest: f64,
    principal: f64,
    remaining_balance: f64,
}

/// Operating expenses common to both statements
#[derive(Debug, Clone, Copy)]
struct OperatingCosts {
    management_fees: f64,
    repair_advertising: f64,
    running_costs: f64,
    insurance: f64,
    property_tax: f64,
    closing_costs: f64,
}

impl OperatingCosts {
    fn total(&self) -> f64 {
        self.management_fees
            + self.repair_advertising
            + self.running_costs
            + self.insurance
            + self.property_tax
            + self.closing_costs
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    inputs: InvestmentInputs,
}

impl ProjectionEngine {
    pub fn new(inputs: InvestmentInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &InvestmentInputs {
        &self.inputs
    }

    /// Amortize the configured loan and project against it
    pub fn run(&self) -> ProjectionResult {
        let schedule = self.inputs.loan_terms().schedule();
        self.project(&schedule)
    }

    /// Project every year of the horizon against a precomputed schedule
    pub fn project(&self, schedule: &AmortizationSchedule) -> ProjectionResult {
        let horizon = self.inputs.projection_years;
        let mut state = ProjectionState::from_inputs(&self.inputs);
        let mut income_statements = Vec::with_capacity(horizon as usize);
        let mut cash_flows = Vec::with_capacity(horizon as usize);

        for year in 1..=horizon {
            let (income, cash) = self.project_year(year, schedule, &mut state);
            income_statements.push(income);
            cash_flows.push(cash);
        }

        let metrics = Metrics::derive(&self.inputs, schedule, &income_statements, &cash_flows);

        log::debug!(
            "projected {} years: final cumulative cash flow {:.0}, gross yield {:.2}%",
            horizon,
            state.cumulative_cash_flow,
            metrics.gross_yield
        );

        ProjectionResult {
            income_statements,
            cash_flows,
            metrics,
        }
    }

    /// Build both statements for one year and roll the running sums forward
    fn project_year(
        &self,
        year: u32,
        schedule: &AmortizationSchedule,
        state: &mut ProjectionState,
    ) -> (IncomeStatementYear, CashFlowYear) {
        let inputs = &self.inputs;

        let rent_income = self.effective_rent(year);
        let other_income = inputs.other_income;
        let total_revenue = rent_income + other_income;

        let loan = self.loan_line(year, schedule);
        let depreciation = self.depreciation(year);
        let costs = self.operating_costs(year);

        // Income statement: accrual basis
        let total_expenses = costs.total() + loan.interest + depreciation;
        let pre_tax_income = total_revenue - total_expenses;
        let taxable_income = (pre_tax_income - inputs.income_deduction).max(0.0);
        let income_tax = self.income_tax(taxable_income);
        let net_profit = pre_tax_income - income_tax;

        // Cash flow: full loan service, no depreciation
        let renovation_costs = if year == 1 { inputs.initial_renovation } else { 0.0 };
        let cash_expenses =
            costs.total() + loan.principal + loan.interest + renovation_costs + income_tax;
        let annual_net_cash_flow = total_revenue - cash_expenses;

        state.advance_year(net_profit, annual_net_cash_flow);

        let income = IncomeStatementYear {
            year,
            rent_income,
            other_income,
            total_revenue,
            management_fees: costs.management_fees,
            repair_advertising: costs.repair_advertising,
            running_costs: costs.running_costs,
            insurance: costs.insurance,
            property_tax: costs.property_tax,
            closing_costs: costs.closing_costs,
            interest_payment: loan.interest,
            depreciation,
            total_expenses,
            pre_tax_income,
            income_deduction: inputs.income_deduction,
            taxable_income,
            income_tax,
            net_profit,
            cumulative_net_profit: state.cumulative_net_profit,
        };

        let cash = CashFlowYear {
            year,
            rent_income,
            other_income,
            total_income: total_revenue,
            management_fees: costs.management_fees,
            repair_advertising: costs.repair_advertising,
            running_costs: costs.running_costs,
            insurance: costs.insurance,
            property_tax: costs.property_tax,
            closing_costs: costs.closing_costs,
            principal_repayment: loan.principal,
            interest_payment: loan.interest,
            renovation_costs,
            income_tax,
            total_expenses: cash_expenses,
            annual_net_cash_flow,
            cumulative_cash_flow: state.cumulative_cash_flow,
            remaining_loan: loan.remaining_balance,
        };

        (income, cash)
    }

    /// Rent after compound decline and vacancy: `rent·(1−d)^(y−1)·occupancy`
    pub fn effective_rent(&self, year: u32) -> f64 {
        let inputs = &self.inputs;
        let decline = 1.0 - inputs.rent_decline_rate_percent / 100.0;
        let exponent = year.saturating_sub(1) as i32;
        inputs.annual_rent * decline.powi(exponent) * (inputs.occupancy_rate_percent / 100.0)
    }

    /// Straight-line depreciation while the period runs, zero afterwards
    pub fn depreciation(&self, year: u32) -> f64 {
        let period = self.inputs.depreciation_period_years;
        if period == 0 || year > period {
            0.0
        } else {
            self.inputs.building_depreciation_base / period as f64
        }
    }

    /// Flat levy on land and building, no reassessment
    pub fn property_tax(&self) -> f64 {
        (self.inputs.land_value + self.inputs.building_value) * PROPERTY_TAX_RATE
    }

    /// Flat-rate tax, never negative and with no loss carryforward
    pub fn income_tax(&self, taxable_income: f64) -> f64 {
        if taxable_income <= 0.0 {
            0.0
        } else {
            taxable_income * self.inputs.income_tax_rate_percent / 100.0
        }
    }

    fn loan_line(&self, year: u32, schedule: &AmortizationSchedule) -> LoanLine {
        if year > self.inputs.loan_period {
            return LoanLine::default();
        }
        schedule
            .year(year)
            .map(|row| LoanLine {
                interest: row.interest_paid,
                principal: row.principal_paid,
                remaining_balance: row.ending_balance,
            })
            .unwrap_or_default()
    }

    fn operating_costs(&self, year: u32) -> OperatingCosts {
        let inputs = &self.inputs;
        OperatingCosts {
            management_fees: inputs.management_fees,
            repair_advertising: inputs.repair_advertising,
            running_costs: inputs.running_costs_monthly * 12.0,
            insurance: inputs.insurance,
            property_tax: self.property_tax(),
            closing_costs: if year == 1 { inputs.closing_costs } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::RepaymentMethod;
    use crate::projection::PaybackAnalysis;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn run(inputs: InvestmentInputs) -> ProjectionResult {
        ProjectionEngine::new(inputs).run()
    }

    #[test]
    fn test_projection_length_matches_horizon() {
        let result = run(InvestmentInputs::example());

        assert_eq!(result.income_statements.len(), 10);
        assert_eq!(result.cash_flows.len(), 10);
        for (i, (income, cash)) in result.income_statements.iter().zip(&result.cash_flows).enumerate() {
            assert_eq!(income.year, i as u32 + 1);
            assert_eq!(cash.year, i as u32 + 1);
        }
    }

    #[test]
    fn test_rent_decays_compounding() {
        let result = run(InvestmentInputs::example());

        assert_relative_eq!(result.income_statements[0].rent_income, 2_280_000.0, epsilon = 1e-6);
        let expected_year_10 = 2_280_000.0 * 0.995_f64.powi(9);
        assert_relative_eq!(result.income_statements[9].rent_income, expected_year_10, epsilon = 1e-6);
        assert_abs_diff_eq!(result.income_statements[9].rent_income, 2_179_428.24, epsilon = 0.01);
    }

    #[test]
    fn test_first_year_line_items() {
        let result = run(InvestmentInputs::example());
        let income = &result.income_statements[0];
        let cash = &result.cash_flows[0];

        assert_relative_eq!(income.running_costs, 180_000.0);
        assert_relative_eq!(income.property_tax, 476_000.0, epsilon = 1e-6);
        assert_relative_eq!(income.closing_costs, 900_000.0);
        assert_relative_eq!(income.depreciation, 20_000_000.0 / 12.0, epsilon = 1e-6);
        assert_relative_eq!(cash.renovation_costs, 500_000.0);

        // One-time items only in year 1
        assert_eq!(result.income_statements[1].closing_costs, 0.0);
        assert_eq!(result.cash_flows[1].renovation_costs, 0.0);
    }

    #[test]
    fn test_income_statement_totals_reconcile() {
        let result = run(InvestmentInputs::example());

        for s in &result.income_statements {
            let expenses = s.management_fees
                + s.repair_advertising
                + s.running_costs
                + s.insurance
                + s.property_tax
                + s.closing_costs
                + s.interest_payment
                + s.depreciation;
            assert_relative_eq!(s.total_expenses, expenses, epsilon = 1e-6);
            assert_relative_eq!(s.pre_tax_income, s.total_revenue - s.total_expenses, epsilon = 1e-6);
            assert_relative_eq!(s.taxable_income, (s.pre_tax_income - s.income_deduction).max(0.0), epsilon = 1e-6);
            assert_relative_eq!(s.income_tax, s.taxable_income * 0.20, epsilon = 1e-6);
            assert!(s.income_tax >= 0.0);
        }
    }

    #[test]
    fn test_cash_flow_uses_principal_and_excludes_depreciation() {
        let result = run(InvestmentInputs::example());

        for (s, cf) in result.income_statements.iter().zip(&result.cash_flows) {
            let expected = cf.total_income
                - (s.total_expenses - s.depreciation)
                - cf.principal_repayment
                - cf.renovation_costs
                - s.income_tax;
            assert_relative_eq!(cf.annual_net_cash_flow, expected, epsilon = 1e-6);
            assert_relative_eq!(cf.income_tax, s.income_tax);
        }
    }

    #[test]
    fn test_cumulative_sums_are_prefix_sums() {
        let inputs = InvestmentInputs::example();
        let seed = -(inputs.property_price + inputs.initial_renovation);
        let result = run(inputs);

        let mut cash = seed;
        let mut profit = 0.0;
        for (s, cf) in result.income_statements.iter().zip(&result.cash_flows) {
            cash += cf.annual_net_cash_flow;
            profit += s.net_profit;
            assert_relative_eq!(cf.cumulative_cash_flow, cash, epsilon = 1e-6);
            assert_relative_eq!(s.cumulative_net_profit, profit, epsilon = 1e-6);
        }
        assert_relative_eq!(result.metrics.final_cumulative_cash_flow, cash, epsilon = 1e-6);
        assert_relative_eq!(result.metrics.final_cumulative_profit, profit, epsilon = 1e-6);
    }

    #[test]
    fn test_no_loan_means_zero_loan_lines() {
        let inputs = InvestmentInputs {
            loan_amount: 0.0,
            loan_period: 0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        for (s, cf) in result.income_statements.iter().zip(&result.cash_flows) {
            assert_eq!(s.interest_payment, 0.0);
            assert_eq!(cf.principal_repayment, 0.0);
            assert_eq!(cf.remaining_loan, 0.0);
        }
        assert_eq!(result.metrics.repayment_ratio, 0.0);
        assert_relative_eq!(result.metrics.initial_investment, 31_400_000.0);
    }

    #[test]
    fn test_loan_shorter_than_horizon() {
        let inputs = InvestmentInputs {
            loan_period: 3,
            projection_years: 6,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        assert!(result.cash_flows[2].principal_repayment > 0.0);
        assert_abs_diff_eq!(result.cash_flows[2].remaining_loan, 0.0, epsilon = 1.0);
        for cf in &result.cash_flows[3..] {
            assert_eq!(cf.principal_repayment, 0.0);
            assert_eq!(cf.interest_payment, 0.0);
            assert_eq!(cf.remaining_loan, 0.0);
        }
    }

    #[test]
    fn test_depreciation_stops_after_period() {
        let inputs = InvestmentInputs {
            depreciation_period_years: 4,
            building_depreciation_base: 4_000_000.0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        for s in &result.income_statements[..4] {
            assert_relative_eq!(s.depreciation, 1_000_000.0);
        }
        for s in &result.income_statements[4..] {
            assert_eq!(s.depreciation, 0.0);
        }
    }

    #[test]
    fn test_zero_depreciation_period_is_finite() {
        let inputs = InvestmentInputs {
            depreciation_period_years: 0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        for s in &result.income_statements {
            assert_eq!(s.depreciation, 0.0);
            assert!(s.net_profit.is_finite());
        }
    }

    #[test]
    fn test_deduction_floors_taxable_income() {
        let inputs = InvestmentInputs {
            income_deduction: 1e12,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        for s in &result.income_statements {
            assert_eq!(s.taxable_income, 0.0);
            assert_eq!(s.income_tax, 0.0);
        }
    }

    #[test]
    fn test_equal_principal_schedule_flows_through() {
        let inputs = InvestmentInputs {
            repayment_method: RepaymentMethod::EqualPrincipal,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        for cf in &result.cash_flows {
            assert_abs_diff_eq!(cf.principal_repayment, 960_000.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(result.cash_flows[0].remaining_loan, 23_040_000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_metrics_for_reference_scenario() {
        let result = run(InvestmentInputs::example());
        let m = &result.metrics;

        assert_relative_eq!(m.gross_yield, 7.6, epsilon = 1e-9);
        assert_relative_eq!(m.gross_yield_with_costs, 2_280_000.0 / 31_400_000.0 * 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.repayment_ratio, 1_292_016.194 / 2_280_000.0 * 100.0, epsilon = 1e-3);
        assert_relative_eq!(m.initial_investment, 7_400_000.0);
        assert_relative_eq!(m.first_year_net_profit, result.income_statements[0].net_profit);
        assert_relative_eq!(m.first_year_cash_flow, result.cash_flows[0].annual_net_cash_flow);

        let expected_five_year: f64 = result.cash_flows[1..5].iter().map(|cf| cf.annual_net_cash_flow).sum();
        assert_relative_eq!(m.five_year_payback, expected_five_year, epsilon = 1e-6);
    }

    #[test]
    fn test_five_year_payback_not_achieved() {
        let result = run(InvestmentInputs::example());
        let m = &result.metrics;

        // Reference scenario keeps well under 100k a year after debt service
        assert!(!m.five_year_payback_achieved);
        assert!(m.five_year_payback < m.initial_investment);
        assert!(!matches!(m.payback_analysis(), PaybackAnalysis::Achieved));
    }

    #[test]
    fn test_five_year_payback_achieved_with_higher_rent() {
        let inputs = InvestmentInputs {
            annual_rent: 6_000_000.0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);
        let m = &result.metrics;

        assert!(m.five_year_payback >= m.initial_investment);
        assert!(m.five_year_payback_achieved);
        assert_eq!(m.payback_analysis(), PaybackAnalysis::Achieved);
    }

    #[test]
    fn test_payback_years_uses_year_two_cash_flow_only() {
        let inputs = InvestmentInputs {
            annual_rent: 3_600_000.0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);
        let year_two = result.cash_flows[1].annual_net_cash_flow;
        assert!(year_two > 0.0);

        let years = result.metrics.payback_years.unwrap();
        assert_relative_eq!(years, 7_400_000.0 / year_two, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_year_two_flow_is_not_recoverable() {
        let inputs = InvestmentInputs {
            annual_rent: 1_000_000.0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        assert!(result.cash_flows[1].annual_net_cash_flow <= 0.0);
        assert_eq!(result.metrics.payback_years, None);
        assert_eq!(result.metrics.payback_analysis(), PaybackAnalysis::NotRecoverable);
    }

    #[test]
    fn test_short_horizon_skips_payback_metrics() {
        let inputs = InvestmentInputs {
            projection_years: 1,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        assert_eq!(result.cash_flows.len(), 1);
        assert_eq!(result.metrics.payback_years, None);
        assert_eq!(result.metrics.five_year_payback, 0.0);
        assert!(!result.metrics.five_year_payback_achieved);
    }

    #[test]
    fn test_zero_horizon_is_empty_but_defined() {
        let inputs = InvestmentInputs {
            projection_years: 0,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        assert!(result.cash_flows.is_empty());
        assert!(result.income_statements.is_empty());
        assert_eq!(result.metrics.first_year_net_profit, 0.0);
        assert_relative_eq!(result.metrics.final_cumulative_cash_flow, -30_500_000.0);
    }

    #[test]
    fn test_break_even_year() {
        let inputs = InvestmentInputs {
            annual_rent: 6_000_000.0,
            projection_years: 15,
            ..InvestmentInputs::example()
        };
        let result = run(inputs);

        assert!(result.cash_flows[10].cumulative_cash_flow < 0.0);
        assert_eq!(result.break_even_year(), Some(12));
        assert_eq!(run(InvestmentInputs::example()).break_even_year(), None);
    }

    #[test]
    fn test_result_totals() {
        let result = run(InvestmentInputs::example());
        let schedule = InvestmentInputs::example().loan_terms().schedule();
        let expected_interest: f64 = schedule.years()[..10].iter().map(|y| y.interest_paid).sum();

        assert_relative_eq!(result.total_interest(), expected_interest, epsilon = 1e-6);
        assert!(result.total_income_tax() >= 0.0);
        assert_eq!(result.cash_flow_series().len(), 10);
    }

    #[test]
    fn test_project_against_external_schedule() {
        let engine = ProjectionEngine::new(InvestmentInputs::example());
        let result = engine.project(&AmortizationSchedule::empty());

        // Loan years without a schedule row contribute nothing
        assert_eq!(result.cash_flows[0].interest_payment, 0.0);
        assert_eq!(result.metrics.repayment_ratio, 0.0);
    }
}
