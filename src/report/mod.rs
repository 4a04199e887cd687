//! Rendering of projection results for export and the terminal

pub mod csv_export;
mod table;

pub use csv_export::{
    export_all, write_cash_flow, write_cash_flow_series, write_combined, write_income_statement,
    write_schedule,
};
pub use table::{
    format_comparison, format_currency, format_metrics, format_percent, format_schedule,
    format_statements,
};
