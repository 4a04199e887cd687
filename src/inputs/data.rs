//! Investment input record as supplied by the form layer

use serde::{Deserialize, Serialize};

use crate::loan::{LoanTerms, RepaymentMethod};

fn default_occupancy_rate() -> f64 {
    100.0
}

/// Flat record of everything a projection needs
///
/// Field names serialize in camelCase with the percent and monthly fields
/// keeping their historical short keys (`occupancyRate`, `runningCosts`, ...),
/// so records saved by the form layer load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentInputs {
    // Acquisition
    pub property_price: f64,
    #[serde(default)]
    pub initial_renovation: f64,
    #[serde(default)]
    pub closing_costs: f64,

    // Financing
    #[serde(default)]
    pub loan_amount: f64,
    /// Annual loan rate in percent
    #[serde(rename = "interestRate", default)]
    pub interest_rate_percent: f64,
    /// Loan term in years
    #[serde(default)]
    pub loan_period: u32,
    #[serde(default)]
    pub repayment_method: RepaymentMethod,

    // Revenue
    pub annual_rent: f64,
    #[serde(default)]
    pub other_income: f64,
    #[serde(rename = "occupancyRate", default = "default_occupancy_rate")]
    pub occupancy_rate_percent: f64,
    /// Compound annual rent decline in percent
    #[serde(rename = "rentDeclineRate", default)]
    pub rent_decline_rate_percent: f64,

    // Operating expenses (annual unless noted)
    #[serde(default)]
    pub management_fees: f64,
    #[serde(default)]
    pub repair_advertising: f64,
    #[serde(rename = "runningCosts", default)]
    pub running_costs_monthly: f64,
    #[serde(default)]
    pub insurance: f64,

    // Tax basis
    #[serde(default)]
    pub building_depreciation_base: f64,
    #[serde(rename = "depreciationPeriod", default)]
    pub depreciation_period_years: u32,
    #[serde(default)]
    pub land_value: f64,
    #[serde(default)]
    pub building_value: f64,
    #[serde(rename = "taxRate", default)]
    pub income_tax_rate_percent: f64,
    #[serde(default)]
    pub income_deduction: f64,

    // Horizon
    pub projection_years: u32,
}

impl InvestmentInputs {
    /// Reference scenario: a 30M yen apartment, 80% financed over 25 years.
    /// The building is 10 years into a 22-year statutory life, so its
    /// 20M assessed value depreciates over the remaining 12 years.
    pub fn example() -> Self {
        Self {
            property_price: 30_000_000.0,
            initial_renovation: 500_000.0,
            closing_costs: 900_000.0,
            loan_amount: 24_000_000.0,
            interest_rate_percent: 2.5,
            loan_period: 25,
            repayment_method: RepaymentMethod::EqualPayment,
            annual_rent: 2_400_000.0,
            other_income: 0.0,
            occupancy_rate_percent: 95.0,
            rent_decline_rate_percent: 0.5,
            management_fees: 120_000.0,
            repair_advertising: 100_000.0,
            running_costs_monthly: 15_000.0,
            insurance: 30_000.0,
            building_depreciation_base: 20_000_000.0,
            depreciation_period_years: 12,
            land_value: 10_000_000.0,
            building_value: 18_000_000.0,
            income_tax_rate_percent: 20.0,
            income_deduction: 0.0,
            projection_years: 10,
        }
    }

    /// Financing terms for the amortization engine
    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.loan_amount,
            self.interest_rate_percent,
            self.loan_period,
            self.repayment_method,
        )
    }

    /// Equity put in at acquisition, net of the loan
    pub fn initial_investment(&self) -> f64 {
        self.property_price + self.initial_renovation + self.closing_costs - self.loan_amount
    }

    /// Resolve fee inputs given either as fixed amounts or as a share of rent
    pub fn with_expenses(mut self, management: ExpenseBasis, repair_advertising: ExpenseBasis) -> Self {
        self.management_fees = management.resolve(self.annual_rent);
        self.repair_advertising = repair_advertising.resolve(self.annual_rent);
        self
    }

    /// Replace the depreciation base and period with values derived from the
    /// building's age
    pub fn with_depreciation(mut self, basis: DepreciationBasis) -> Self {
        self.building_depreciation_base = basis.assessed_value;
        self.depreciation_period_years = basis.remaining_period();
        self
    }
}

/// How a recurring expense was entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ExpenseBasis {
    /// Fixed annual amount
    Fixed(f64),
    /// Percentage of the annual contract rent (5.0 = 5%)
    PercentOfRent(f64),
}

impl ExpenseBasis {
    pub fn resolve(&self, annual_rent: f64) -> f64 {
        match *self {
            ExpenseBasis::Fixed(amount) => amount,
            ExpenseBasis::PercentOfRent(pct) => annual_rent * pct / 100.0,
        }
    }
}

/// Straight-line depreciation inputs derived from a used building's age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationBasis {
    pub building_age: u32,
    /// Statutory useful life for the construction type (22 for wood frame)
    pub statutory_life: u32,
    pub assessed_value: f64,
}

impl DepreciationBasis {
    pub fn from_building_age(building_age: u32, statutory_life: u32, assessed_value: f64) -> Self {
        Self {
            building_age,
            statutory_life,
            assessed_value,
        }
    }

    /// Years of depreciation left: statutory life less age, floored at zero
    pub fn remaining_period(&self) -> u32 {
        self.statutory_life.saturating_sub(self.building_age)
    }

    pub fn annual_amount(&self) -> f64 {
        match self.remaining_period() {
            0 => 0.0,
            years => self.assessed_value / years as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_investment() {
        let inputs = InvestmentInputs::example();
        assert_relative_eq!(inputs.initial_investment(), 7_400_000.0);
    }

    #[test]
    fn test_percent_of_rent_expenses() {
        let inputs = InvestmentInputs::example()
            .with_expenses(ExpenseBasis::PercentOfRent(5.0), ExpenseBasis::Fixed(80_000.0));

        assert_relative_eq!(inputs.management_fees, 120_000.0);
        assert_relative_eq!(inputs.repair_advertising, 80_000.0);
    }

    #[test]
    fn test_depreciation_from_building_age() {
        let basis = DepreciationBasis::from_building_age(10, 22, 20_000_000.0);
        assert_eq!(basis.remaining_period(), 12);
        assert_relative_eq!(basis.annual_amount(), 20_000_000.0 / 12.0);

        let inputs = InvestmentInputs::example().with_depreciation(basis);
        assert_eq!(inputs.depreciation_period_years, 12);
        assert_relative_eq!(inputs.building_depreciation_base, 20_000_000.0);
    }

    #[test]
    fn test_example_depreciation_follows_building_age() {
        let example = InvestmentInputs::example();
        let derived = example
            .clone()
            .with_depreciation(DepreciationBasis::from_building_age(10, 22, 20_000_000.0));
        assert_eq!(example, derived);
    }

    #[test]
    fn test_fully_depreciated_building() {
        let basis = DepreciationBasis {
            building_age: 30,
            statutory_life: 22,
            assessed_value: 5_000_000.0,
        };
        assert_eq!(basis.remaining_period(), 0);
        assert_eq!(basis.annual_amount(), 0.0);
    }

    #[test]
    fn test_deserializes_form_record_with_defaults() {
        let json = r#"{
            "propertyPrice": 30000000,
            "loanAmount": 24000000,
            "interestRate": 2.5,
            "loanPeriod": 25,
            "repaymentMethod": "equal-principal",
            "annualRent": 2400000,
            "runningCosts": 15000,
            "projectionYears": 10,
            "buildingAge": 10
        }"#;
        let inputs: InvestmentInputs = serde_json::from_str(json).unwrap();

        assert_eq!(inputs.repayment_method, RepaymentMethod::EqualPrincipal);
        assert_relative_eq!(inputs.interest_rate_percent, 2.5);
        assert_relative_eq!(inputs.running_costs_monthly, 15_000.0);
        assert_relative_eq!(inputs.occupancy_rate_percent, 100.0);
        assert_eq!(inputs.other_income, 0.0);
        assert_eq!(inputs.depreciation_period_years, 0);
    }
}
