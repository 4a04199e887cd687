//! Year-indexed amortization schedules
//!
//! Installments are simulated month by month against the running balance and
//! then bucketed into loan years of 12 months each.

use serde::{Deserialize, Serialize};

use super::state::LoanState;

/// How the loan is repaid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentMethod {
    /// Annuity: constant total installment, interest share shrinking over time
    #[default]
    EqualPayment,
    /// Constant principal installment, total installment declining over time
    EqualPrincipal,
}

impl RepaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "equal-payment",
            RepaymentMethod::EqualPrincipal => "equal-principal",
        }
    }
}

/// Financing terms for the acquisition loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount financed
    pub principal: f64,

    /// Nominal annual rate in percent (2.5 = 2.5%)
    pub annual_rate_percent: f64,

    /// Term in whole years
    pub term_years: u32,

    pub method: RepaymentMethod,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32, method: RepaymentMethod) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
            method,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Constant monthly installment under the annuity method
    ///
    /// `P·r / (1 − (1+r)^−n)`, falling back to straight division when the
    /// rate is zero. The discount term goes through `ln_1p`/`exp_m1` so it
    /// stays accurate for rates near zero.
    pub fn annuity_payment(&self) -> f64 {
        let n = self.total_months();
        if n == 0 {
            return 0.0;
        }
        let r = self.monthly_rate();
        if r == 0.0 {
            return self.principal / n as f64;
        }
        let discount = -(-(n as f64) * r.ln_1p()).exp_m1();
        self.principal * r / discount
    }

    /// Constant monthly principal installment under the equal principal method
    pub fn level_principal(&self) -> f64 {
        let n = self.total_months();
        if n == 0 {
            0.0
        } else {
            self.principal / n as f64
        }
    }

    /// Build the full schedule for these terms
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationEngine::new(*self).compute()
    }
}

/// One year of the amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationYear {
    /// Loan year (1-indexed)
    pub year: u32,
    pub total_payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub starting_balance: f64,
    /// Balance after the year's last installment, floored at zero
    pub ending_balance: f64,
}

/// Eagerly materialized, year-indexed amortization table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    years: Vec<AmortizationYear>,
}

impl AmortizationSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Row for a 1-indexed loan year, if the loan is still running
    pub fn year(&self, year: u32) -> Option<&AmortizationYear> {
        if year == 0 {
            return None;
        }
        self.years.get(year as usize - 1)
    }

    pub fn years(&self) -> &[AmortizationYear] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationYear> {
        self.years.iter()
    }

    pub fn total_interest(&self) -> f64 {
        self.years.iter().map(|y| y.interest_paid).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.years.iter().map(|y| y.principal_paid).sum()
    }

    pub fn total_payments(&self) -> f64 {
        self.years.iter().map(|y| y.total_payment).sum()
    }

    /// Ending balance of the last year (zero for an empty schedule)
    pub fn final_balance(&self) -> f64 {
        self.years.last().map(|y| y.ending_balance).unwrap_or(0.0)
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationYear;
    type IntoIter = std::slice::Iter<'a, AmortizationYear>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.iter()
    }
}

/// Monthly split of an installment into (interest, principal)
#[derive(Debug, Clone, Copy)]
enum Installment {
    Annuity { payment: f64 },
    LevelPrincipal { principal: f64 },
}

impl Installment {
    fn for_terms(terms: &LoanTerms) -> Self {
        match terms.method {
            RepaymentMethod::EqualPayment => Installment::Annuity {
                payment: terms.annuity_payment(),
            },
            RepaymentMethod::EqualPrincipal => Installment::LevelPrincipal {
                principal: terms.level_principal(),
            },
        }
    }

    fn split(&self, state: &LoanState) -> (f64, f64) {
        let interest = state.accrued_interest();
        match *self {
            Installment::Annuity { payment } => (interest, payment - interest),
            Installment::LevelPrincipal { principal } => (interest, principal),
        }
    }
}

/// Amortization engine for a single loan
pub struct AmortizationEngine {
    terms: LoanTerms,
}

impl AmortizationEngine {
    pub fn new(terms: LoanTerms) -> Self {
        Self { terms }
    }

    /// Convenience entry point taking the raw loan parameters
    pub fn compute_for(
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        method: RepaymentMethod,
    ) -> AmortizationSchedule {
        Self::new(LoanTerms::new(principal, annual_rate_percent, term_years, method)).compute()
    }

    /// Simulate every installment and aggregate into one row per loan year
    pub fn compute(&self) -> AmortizationSchedule {
        let terms = &self.terms;
        let installment = Installment::for_terms(terms);
        let mut state = LoanState::new(terms.principal, terms.monthly_rate());
        let mut years = Vec::with_capacity(terms.term_years as usize);

        for year in 1..=terms.term_years {
            let starting_balance = state.reported_balance();
            let mut interest_paid = 0.0;
            let mut principal_paid = 0.0;

            for _month in 1..=12 {
                let (interest, principal) = installment.split(&state);
                interest_paid += interest;
                principal_paid += principal;
                // Keep the unclamped balance as state so drift does not compound
                state.repay(principal);
            }

            years.push(AmortizationYear {
                year,
                total_payment: principal_paid + interest_paid,
                principal_paid,
                interest_paid,
                starting_balance,
                ending_balance: state.reported_balance(),
            });
        }

        log::debug!(
            "amortized {:.2} over {} years ({}), residual balance {:e}",
            terms.principal,
            terms.term_years,
            terms.method.as_str(),
            state.balance
        );

        AmortizationSchedule { years }
    }
}
