//! # xmlmap
//!
//! Schema-driven XML to JSON transformation.
//!
//! A mapping schema, itself an XML document, declares which paths of the input
//! document survive the transform, what shape they take in the output, and
//! how scalar values are converted.
//!
//! ## Architecture
//!
//! 1. **Compile** - Turn the mapping schema into a flat table keyed by dotted path
//! 2. **Transform** - Walk the input tree alongside the table, building the output
//! 3. **Convert** - Turn raw leaf text into typed values through a conversion registry
//!
//! ## Modules
//!
//! - `node`: owned element tree for schema and input documents
//! - `compiler`: mapping schema → `MappingTable`
//! - `transform`: input tree + table → `OutputValue`
//! - `conversion`: `(source type, target type)` conversion registry
//! - `service`: end-to-end facade
//!
//! ## Usage
//!
//! ```
//! use xmlmap::XmlToJson;
//!
//! let service = XmlToJson::from_schema_str(r#"
//!     <mapping>
//!       <array xmlName="dish" jsonName="dishes">
//!         <element xmlName="name" xmlDataType="STRING" jsonName="title" jsonDataType="STRING"/>
//!       </array>
//!     </mapping>"#)?;
//!
//! let json = service.convert_str(
//!     "<menu><dish><name>Burrito</name></dish><dish><name>Curry</name></dish></menu>",
//!     false,
//! )?;
//! assert_eq!(json, r#"{"dishes":[{"title":"Burrito"},{"title":"Curry"}]}"#);
//! # Ok::<(), xmlmap::MappingError>(())
//! ```

pub mod compiler;
pub mod config;
pub mod conversion;
pub mod node;
pub mod record;
pub mod service;
pub mod table;
pub mod transform;
pub mod value;

use thiserror::Error;

pub use compiler::{compile, MappingCompiler, SchemaError};
pub use config::Config;
pub use conversion::{ConversionEngine, FieldConversion, TypeTag};
pub use node::{XmlContent, XmlNode};
pub use record::{MappingRecord, NodeKind, SchemaAttributes};
pub use service::{to_json_string, XmlToJson};
pub use table::{join_path, MappingTable};
pub use transform::{transform, Transformer, NOT_MAPPED_KEY};
pub use value::{OutputObject, OutputValue};

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Mapping schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MappingError>;
