//! Input checks run before a projection
//!
//! The engine accepts any record; these are the checks the form layer
//! applies so that users see every problem at once.

use super::InvestmentInputs;
use crate::error::{Result, SimError, ValidationIssue};

/// Collect every violated rule for the record
pub fn check(inputs: &InvestmentInputs) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !inputs.property_price.is_finite() || inputs.property_price <= 0.0 {
        issues.push(ValidationIssue::new("propertyPrice", "must be a positive finite number"));
    }
    if inputs.loan_amount < 0.0 {
        issues.push(ValidationIssue::new("loanAmount", "must not be negative"));
    }
    if inputs.interest_rate_percent < 0.0 {
        issues.push(ValidationIssue::new("interestRate", "must not be negative"));
    }
    if !(0.0..=100.0).contains(&inputs.occupancy_rate_percent) {
        issues.push(ValidationIssue::new("occupancyRate", "must be between 0 and 100"));
    }
    if inputs.projection_years < 1 {
        issues.push(ValidationIssue::new("projectionYears", "must be at least 1"));
    }

    for (field, value) in [
        ("propertyPrice", inputs.property_price),
        ("annualRent", inputs.annual_rent),
        ("occupancyRate", inputs.occupancy_rate_percent),
    ] {
        if value.is_nan() {
            issues.push(ValidationIssue::new(field, "is not a number"));
        }
    }

    issues
}

/// Reject the record if any rule is violated
pub fn validate(inputs: &InvestmentInputs) -> Result<()> {
    let issues = check(inputs);
    if issues.is_empty() {
        Ok(())
    } else {
        log::warn!("rejected inputs with {} issue(s)", issues.len());
        Err(SimError::Validation(issues))
    }
}
