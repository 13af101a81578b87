//! TOML configuration.
//!
//! ```toml
//! [schema]
//! source_name = "xmlName"
//! target_name = "jsonName"
//!
//! [states]
//! replace_builtin = false
//!
//! [states.names]
//! Ontario = "ON"
//!
//! [conversion]
//! today = "2024-06-15"
//!
//! [output]
//! pretty = true
//! ```
//!
//! Every section and key is optional.

use crate::compiler::MappingCompiler;
use crate::conversion::{Clock, ConversionEngine, FixedClock, StateAbbreviations, SystemClock};
use crate::record::SchemaAttributes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attribute names read from mapping schema nodes
    pub schema: SchemaAttributes,
    pub states: StatesConfig,
    pub conversion: ConversionConfig,
    pub output: OutputConfig,
}

/// Data-driven state abbreviation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatesConfig {
    /// Start from an empty table instead of the built-in US states
    pub replace_builtin: bool,
    /// Full name → abbreviation
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Fixed "today" for age calculation; the system date when unset
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> crate::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml_str(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn state_table(&self) -> StateAbbreviations {
        let mut states = if self.states.replace_builtin {
            StateAbbreviations::empty()
        } else {
            StateAbbreviations::default()
        };
        states.extend(&self.states.names);
        states
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.conversion.today {
            Some(today) => Arc::new(FixedClock::new(today)),
            None => Arc::new(SystemClock),
        }
    }

    pub fn conversion_engine(&self) -> ConversionEngine {
        ConversionEngine::with_defaults(self.state_table(), self.clock())
    }

    pub fn compiler(&self) -> MappingCompiler {
        MappingCompiler::with_attributes(self.schema.clone())
    }
}
