//! Named scenario persistence
//!
//! Scenarios live in one JSON document keyed by name. Saving under an
//! existing name replaces the record (last write wins).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::inputs::InvestmentInputs;

/// Default store file in the working directory
pub const DEFAULT_STORE_PATH: &str = "scenarios.json";

/// A saved input record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub inputs: InvestmentInputs,
    pub timestamp: DateTime<Utc>,
}

/// Whether a save created a new record or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Overwritten,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    scenarios: Vec<NamedScenario>,
    /// Name of the last saved or loaded scenario
    #[serde(default)]
    current: Option<String>,
}

/// File-backed collection of named scenarios
#[derive(Debug)]
pub struct ScenarioStore {
    path: PathBuf,
    document: StoreDocument,
}

impl ScenarioStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                StoreDocument::default()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            StoreDocument::default()
        };

        log::debug!(
            "opened scenario store {} with {} scenario(s)",
            path.display(),
            document.scenarios.len()
        );
        Ok(Self { path, document })
    }

    /// Open the store in the working directory
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_STORE_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save `inputs` under `name`, replacing any record with that name
    pub fn save(&mut self, name: &str, inputs: InvestmentInputs) -> Result<SaveOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SimError::InvalidScenarioName);
        }

        let scenario = NamedScenario {
            name: name.to_string(),
            inputs,
            timestamp: Utc::now(),
        };

        let mut next = self.document.clone();
        let outcome = match self.position(name) {
            Some(index) => {
                next.scenarios[index] = scenario;
                SaveOutcome::Overwritten
            }
            None => {
                next.scenarios.push(scenario);
                SaveOutcome::Created
            }
        };
        next.current = Some(name.to_string());
        self.commit(next)?;

        match outcome {
            SaveOutcome::Created => log::info!("saved scenario \"{}\"", name),
            SaveOutcome::Overwritten => log::info!("overwrote scenario \"{}\"", name),
        }
        Ok(outcome)
    }

    /// Look up a scenario and mark it as current
    pub fn load(&mut self, name: &str) -> Result<NamedScenario> {
        let scenario = self
            .get(name)
            .cloned()
            .ok_or_else(|| SimError::ScenarioNotFound(name.to_string()))?;

        let mut next = self.document.clone();
        next.current = Some(scenario.name.clone());
        self.commit(next)?;
        Ok(scenario)
    }

    pub fn get(&self, name: &str) -> Option<&NamedScenario> {
        self.position(name).map(|i| &self.document.scenarios[i])
    }

    /// All scenarios in the order they were first saved
    pub fn list(&self) -> &[NamedScenario] {
        &self.document.scenarios
    }

    pub fn len(&self) -> usize {
        self.document.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.scenarios.is_empty()
    }

    /// The last saved or loaded scenario, if it still exists
    pub fn current(&self) -> Option<&NamedScenario> {
        self.document.current.as_deref().and_then(|name| self.get(name))
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| SimError::ScenarioNotFound(name.to_string()))?;

        let mut next = self.document.clone();
        let removed = next.scenarios.remove(index);
        if next.current.as_deref() == Some(removed.name.as_str()) {
            next.current = None;
        }
        self.commit(next)?;
        log::info!("deleted scenario \"{}\"", removed.name);
        Ok(())
    }

    /// Names are matched after trimming, the same way `save` stores them
    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.document.scenarios.iter().position(|s| s.name == name)
    }

    /// Write `next` to disk and only then make it the in-memory document
    fn commit(&mut self, next: StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(&next)?;
        fs::write(&self.path, json)?;
        self.document = next;
        Ok(())
    }
}
