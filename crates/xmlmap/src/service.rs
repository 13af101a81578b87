//! End-to-end XML to JSON conversion.

use crate::config::Config;
use crate::conversion::ConversionEngine;
use crate::node::XmlNode;
use crate::table::MappingTable;
use crate::transform::Transformer;
use crate::value::OutputValue;
use std::path::Path;
use tracing::debug;

/// A compiled mapping schema plus the conversion engine to apply it with.
///
/// Build once per schema and reuse for any number of input documents; the
/// service is immutable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct XmlToJson {
    table: MappingTable,
    engine: ConversionEngine,
}

impl XmlToJson {
    pub fn new(table: MappingTable, engine: ConversionEngine) -> Self {
        Self { table, engine }
    }

    /// Compile `schema` with the default configuration.
    pub fn from_schema(schema: &XmlNode) -> crate::Result<Self> {
        Self::from_schema_with_config(schema, &Config::default())
    }

    pub fn from_schema_with_config(schema: &XmlNode, config: &Config) -> crate::Result<Self> {
        let table = config.compiler().compile(schema)?;
        Ok(Self::new(table, config.conversion_engine()))
    }

    pub fn from_schema_str(xml: &str) -> crate::Result<Self> {
        Self::from_schema_str_with_config(xml, &Config::default())
    }

    pub fn from_schema_str_with_config(xml: &str, config: &Config) -> crate::Result<Self> {
        let schema = XmlNode::parse(xml)?;
        Self::from_schema_with_config(&schema, config)
    }

    pub fn from_schema_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::from_schema_file_with_config(path, &Config::default())
    }

    pub fn from_schema_file_with_config(
        path: impl AsRef<Path>,
        config: &Config,
    ) -> crate::Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading mapping schema");
        let xml = std::fs::read_to_string(path)?;
        Self::from_schema_str_with_config(&xml, config)
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn engine(&self) -> &ConversionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ConversionEngine {
        &mut self.engine
    }

    pub fn transform(&self, input: &XmlNode) -> OutputValue {
        Transformer::new(&self.table, &self.engine).transform(input)
    }

    pub fn transform_str(&self, xml: &str) -> crate::Result<OutputValue> {
        let input = XmlNode::parse(xml)?;
        Ok(self.transform(&input))
    }

    pub fn transform_file(&self, path: impl AsRef<Path>) -> crate::Result<OutputValue> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Transforming input document");
        let xml = std::fs::read_to_string(path)?;
        self.transform_str(&xml)
    }

    /// Transform `xml` and serialize the result.
    pub fn convert_str(&self, xml: &str, pretty: bool) -> crate::Result<String> {
        let value = self.transform_str(xml)?;
        to_json_string(&value, pretty)
    }
}

/// Serialize an output value as JSON text.
pub fn to_json_string(value: &OutputValue, pretty: bool) -> crate::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
