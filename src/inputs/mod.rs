//! Investment inputs, form-side helpers and input loading

mod data;
mod validate;
pub mod loader;

pub use data::{DepreciationBasis, ExpenseBasis, InvestmentInputs};
pub use loader::{load_inputs, load_inputs_csv_from_reader, load_inputs_json_from_reader};
pub use validate::{check, validate};
