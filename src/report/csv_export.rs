//! CSV export of projection results
//!
//! Statements are written with one row per line item and one column per
//! year. Amounts are rounded to whole currency units here and nowhere else.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loan::AmortizationSchedule;
use crate::projection::{CashFlowYear, IncomeStatementYear, ProjectionResult};

type IncomeField = fn(&IncomeStatementYear) -> f64;
type CashField = fn(&CashFlowYear) -> f64;

/// Income statement line items in display order
pub const INCOME_STATEMENT_ROWS: &[(&str, IncomeField)] = &[
    ("Rent income", |s: &IncomeStatementYear| s.rent_income),
    ("Other income", |s: &IncomeStatementYear| s.other_income),
    ("Total revenue", |s: &IncomeStatementYear| s.total_revenue),
    ("Management fees", |s: &IncomeStatementYear| s.management_fees),
    ("Repairs and advertising", |s: &IncomeStatementYear| s.repair_advertising),
    ("Running costs", |s: &IncomeStatementYear| s.running_costs),
    ("Insurance", |s: &IncomeStatementYear| s.insurance),
    ("Property tax", |s: &IncomeStatementYear| s.property_tax),
    ("Closing costs", |s: &IncomeStatementYear| s.closing_costs),
    ("Interest", |s: &IncomeStatementYear| s.interest_payment),
    ("Depreciation", |s: &IncomeStatementYear| s.depreciation),
    ("Total expenses", |s: &IncomeStatementYear| s.total_expenses),
    ("Pre-tax income", |s: &IncomeStatementYear| s.pre_tax_income),
    ("Income deduction", |s: &IncomeStatementYear| s.income_deduction),
    ("Taxable income", |s: &IncomeStatementYear| s.taxable_income),
    ("Income tax", |s: &IncomeStatementYear| s.income_tax),
    ("Net profit", |s: &IncomeStatementYear| s.net_profit),
    ("Cumulative net profit", |s: &IncomeStatementYear| s.cumulative_net_profit),
];

/// Cash-flow statement line items in display order
pub const CASH_FLOW_ROWS: &[(&str, CashField)] = &[
    ("Rent income", |c: &CashFlowYear| c.rent_income),
    ("Other income", |c: &CashFlowYear| c.other_income),
    ("Total income", |c: &CashFlowYear| c.total_income),
    ("Management fees", |c: &CashFlowYear| c.management_fees),
    ("Repairs and advertising", |c: &CashFlowYear| c.repair_advertising),
    ("Running costs", |c: &CashFlowYear| c.running_costs),
    ("Insurance", |c: &CashFlowYear| c.insurance),
    ("Property tax", |c: &CashFlowYear| c.property_tax),
    ("Closing costs", |c: &CashFlowYear| c.closing_costs),
    ("Principal repayment", |c: &CashFlowYear| c.principal_repayment),
    ("Interest", |c: &CashFlowYear| c.interest_payment),
    ("Renovation", |c: &CashFlowYear| c.renovation_costs),
    ("Income tax", |c: &CashFlowYear| c.income_tax),
    ("Total expenses", |c: &CashFlowYear| c.total_expenses),
    ("Annual net cash flow", |c: &CashFlowYear| c.annual_net_cash_flow),
    ("Cumulative cash flow", |c: &CashFlowYear| c.cumulative_cash_flow),
    ("Remaining loan", |c: &CashFlowYear| c.remaining_loan),
];

/// Whole-unit rendering without a negative zero
pub fn round_amount(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

fn write_table<W, T>(
    writer: W,
    title: &str,
    years: &[T],
    year_of: fn(&T) -> u32,
    rows: &[(&str, fn(&T) -> f64)],
) -> Result<()>
where
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![title.to_string()];
    header.extend(years.iter().map(|y| year_of(y).to_string()));
    csv_writer.write_record(&header)?;

    for (label, field) in rows {
        let mut record = vec![label.to_string()];
        record.extend(years.iter().map(|y| round_amount(field(y))));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_income_statement<W: Write>(writer: W, statements: &[IncomeStatementYear]) -> Result<()> {
    write_table(writer, "Income statement", statements, |s| s.year, INCOME_STATEMENT_ROWS)
}

pub fn write_cash_flow<W: Write>(writer: W, cash_flows: &[CashFlowYear]) -> Result<()> {
    write_table(writer, "Cash flow statement", cash_flows, |c| c.year, CASH_FLOW_ROWS)
}

/// Both statements, separated by a blank line
pub fn write_combined<W: Write>(mut writer: W, result: &ProjectionResult) -> Result<()> {
    write_income_statement(&mut writer, &result.income_statements)?;
    writer.write_all(b"\n")?;
    write_cash_flow(&mut writer, &result.cash_flows)?;
    Ok(())
}

/// `year,annualNetCashFlow,cumulativeCashFlow` rows for charting
pub fn write_cash_flow_series<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["year", "annualNetCashFlow", "cumulativeCashFlow"])?;
    for (year, annual, cumulative) in result.cash_flow_series() {
        csv_writer.write_record([
            year.to_string(),
            round_amount(annual),
            round_amount(cumulative),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_schedule<W: Write>(writer: W, schedule: &AmortizationSchedule) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "year",
        "totalPayment",
        "principalPaid",
        "interestPaid",
        "startingBalance",
        "endingBalance",
    ])?;
    for row in schedule {
        csv_writer.write_record([
            row.year.to_string(),
            round_amount(row.total_payment),
            round_amount(row.principal_paid),
            round_amount(row.interest_paid),
            round_amount(row.starting_balance),
            round_amount(row.ending_balance),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write every export into `dir`, returning the files written
pub fn export_all(
    dir: &Path,
    result: &ProjectionResult,
    schedule: &AmortizationSchedule,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let income_path = dir.join("income_statement.csv");
    write_income_statement(File::create(&income_path)?, &result.income_statements)?;

    let cash_path = dir.join("cash_flow.csv");
    write_cash_flow(File::create(&cash_path)?, &result.cash_flows)?;

    let combined_path = dir.join("all_statements.csv");
    write_combined(File::create(&combined_path)?, result)?;

    let series_path = dir.join("cash_flow_series.csv");
    write_cash_flow_series(File::create(&series_path)?, result)?;

    let schedule_path = dir.join("amortization.csv");
    write_schedule(File::create(&schedule_path)?, schedule)?;

    let written = vec![income_path, cash_path, combined_path, series_path, schedule_path];
    log::info!("wrote {} export file(s) to {}", written.len(), dir.display());
    Ok(written)
}
