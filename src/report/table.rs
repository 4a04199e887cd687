//! Plain-text tables for the terminal

use std::fmt::Write;

use crate::loan::AmortizationSchedule;
use crate::projection::{Metrics, PaybackAnalysis, ProjectionResult};
use crate::scenario::ScenarioComparison;

/// Round to whole units and group thousands with commas
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

type MetricCell = fn(&Metrics) -> String;

/// Metric rows shared by the single-scenario block and the comparison table
const METRIC_ROWS: &[(&str, MetricCell)] = &[
    ("Gross yield", |m: &Metrics| format_percent(m.gross_yield)),
    ("Gross yield incl. costs", |m: &Metrics| format_percent(m.gross_yield_with_costs)),
    ("Repayment ratio", |m: &Metrics| format_percent(m.repayment_ratio)),
    ("First-year net profit", |m: &Metrics| format_currency(m.first_year_net_profit)),
    ("First-year cash flow", |m: &Metrics| format_currency(m.first_year_cash_flow)),
    ("Final cumulative profit", |m: &Metrics| format_currency(m.final_cumulative_profit)),
    ("Final cumulative cash flow", |m: &Metrics| format_currency(m.final_cumulative_cash_flow)),
    ("Initial investment", |m: &Metrics| format_currency(m.initial_investment)),
    ("Cash flow years 2-5", |m: &Metrics| format_currency(m.five_year_payback)),
];

pub fn format_metrics(metrics: &Metrics) -> String {
    let mut out = String::new();
    for (label, cell) in METRIC_ROWS {
        let _ = writeln!(out, "  {:<28} {:>16}", label, cell(metrics));
    }

    let verdict = match metrics.payback_analysis() {
        PaybackAnalysis::Achieved => "recovered within five years".to_string(),
        PaybackAnalysis::EstimatedYears(years) => {
            format!("about {:.1} years at the year-2 cash flow", years)
        }
        PaybackAnalysis::NotRecoverable => "not recoverable (cash flow is not positive)".to_string(),
    };
    let _ = writeln!(out, "  {:<28} {:>16}", "Payback", verdict);
    out
}

/// Condensed per-year view of both statements
pub fn format_statements(result: &ProjectionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>16} {:>14}",
        "Year", "Revenue", "Interest", "Income tax", "Net profit", "Net CF", "Cumulative CF", "Loan"
    );
    let _ = writeln!(out, "{}", "-".repeat(112));

    for (income, cash) in result.income_statements.iter().zip(&result.cash_flows) {
        let _ = writeln!(
            out,
            "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>16} {:>14}",
            income.year,
            format_currency(income.total_revenue),
            format_currency(income.interest_payment),
            format_currency(income.income_tax),
            format_currency(income.net_profit),
            format_currency(cash.annual_net_cash_flow),
            format_currency(cash.cumulative_cash_flow),
            format_currency(cash.remaining_loan),
        );
    }
    out
}

pub fn format_schedule(schedule: &AmortizationSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>14} {:>16}",
        "Year", "Payment", "Principal", "Interest", "Remaining"
    );
    let _ = writeln!(out, "{}", "-".repeat(66));
    for row in schedule {
        let _ = writeln!(
            out,
            "{:>4} {:>14} {:>14} {:>14} {:>16}",
            row.year,
            format_currency(row.total_payment),
            format_currency(row.principal_paid),
            format_currency(row.interest_paid),
            format_currency(row.ending_balance),
        );
    }
    let _ = writeln!(
        out,
        "Total interest: {}",
        format_currency(schedule.total_interest())
    );
    out
}

/// One metric per row, one scenario per column
pub fn format_comparison(comparisons: &[ScenarioComparison]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<28}", "Metric");
    for c in comparisons {
        let _ = write!(out, " {:>16}", c.name);
    }
    let _ = writeln!(out);

    let five_year: (&str, MetricCell) = ("Five-year payback", |m: &Metrics| {
        let verdict = if m.five_year_payback_achieved { "achieved" } else { "not achieved" };
        verdict.to_string()
    });

    for (label, cell) in METRIC_ROWS.iter().chain(std::iter::once(&five_year)) {
        let _ = write!(out, "{:<28}", label);
        for c in comparisons {
            let _ = write!(out, " {:>16}", cell(&c.metrics));
        }
        let _ = writeln!(out);
    }
    out
}
