//! Load an input record from JSON or from a two-column `field,value` CSV

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Number, Value};

use super::InvestmentInputs;
use crate::error::{Result, SimError};

/// Raw CSV row: one input field per line
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    field: String,
    value: String,
}

impl CsvRow {
    /// Integers stay integers so they can fill `u32` fields
    fn json_value(&self) -> Value {
        let raw = self.value.trim();
        if let Ok(n) = raw.parse::<u64>() {
            Value::Number(n.into())
        } else if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            Value::Number(n)
        } else {
            Value::String(raw.to_string())
        }
    }
}

/// Load inputs from a file, choosing the format by extension (`.csv` or JSON)
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<InvestmentInputs> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let inputs = if is_csv {
        load_inputs_csv_from_reader(file)?
    } else {
        load_inputs_json_from_reader(file)?
    };
    log::info!("loaded inputs from {}", path.display());
    Ok(inputs)
}

/// Load a single JSON record from any reader
pub fn load_inputs_json_from_reader<R: Read>(reader: R) -> Result<InvestmentInputs> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a `field,value` CSV from any reader
pub fn load_inputs_csv_from_reader<R: Read>(reader: R) -> Result<InvestmentInputs> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut record = Map::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        if row.field.is_empty() {
            return Err(SimError::Parse("empty field name in inputs CSV".to_string()));
        }
        record.insert(row.field.clone(), row.json_value());
    }

    Ok(serde_json::from_value(Value::Object(record))?)
}
