//! Mapping schema compiler.
//!
//! Walks the schema tree once, carrying the dotted path of source names, and
//! registers one [`MappingRecord`] per recognized schema node. A container's
//! descendants are registered before the container itself. When a malformed
//! schema declares the same path twice, the later declaration wins.

use crate::node::XmlNode;
use crate::record::{MappingRecord, NodeKind, SchemaAttributes};
use crate::table::{join_path, MappingTable};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that make a mapping schema unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A recognized schema node lacks a required attribute
    #[error("{kind} node at '{path}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        kind: NodeKind,
        attribute: String,
        path: String,
    },

    /// A name attribute is present but empty
    #[error("{kind} node at '{path}' has an empty '{attribute}' attribute")]
    EmptyAttribute {
        kind: NodeKind,
        attribute: String,
        path: String,
    },
}

impl SchemaError {
    fn missing(kind: NodeKind, attribute: &str, path: &str) -> Self {
        Self::MissingAttribute {
            kind,
            attribute: attribute.to_string(),
            path: path.to_string(),
        }
    }

    fn empty(kind: NodeKind, attribute: &str, path: &str) -> Self {
        Self::EmptyAttribute {
            kind,
            attribute: attribute.to_string(),
            path: path.to_string(),
        }
    }
}

/// Compiles mapping schemas into [`MappingTable`]s.
#[derive(Debug, Clone, Default)]
pub struct MappingCompiler {
    attributes: SchemaAttributes,
}

impl MappingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom attribute names instead of `xmlName`/`jsonName`/...
    pub fn with_attributes(attributes: SchemaAttributes) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &SchemaAttributes {
        &self.attributes
    }

    /// Compile the schema rooted at `root`. The root element itself is only a
    /// container; its children are the top-level declarations.
    pub fn compile(&self, root: &XmlNode) -> Result<MappingTable, SchemaError> {
        let mut table = MappingTable::new();
        for child in root.children() {
            self.compile_node(child, "", &mut table)?;
        }

        debug!(entries = table.len(), "Compiled mapping table");
        for (path, record) in table.iter() {
            trace!(path, ?record, "Mapping entry");
        }

        Ok(table)
    }

    fn compile_node(
        &self,
        node: &XmlNode,
        prefix: &str,
        table: &mut MappingTable,
    ) -> Result<(), SchemaError> {
        let Some(kind) = NodeKind::from_tag(&node.tag) else {
            return Ok(());
        };

        let record = self.build_record(node, kind, prefix)?;
        let path = join_path(prefix, &record.source_name);

        if kind.is_container() {
            for child in node.children() {
                self.compile_node(child, &path, table)?;
            }
        }

        table.insert(path, record);
        Ok(())
    }

    fn build_record(
        &self,
        node: &XmlNode,
        kind: NodeKind,
        prefix: &str,
    ) -> Result<MappingRecord, SchemaError> {
        let attrs = &self.attributes;

        let source_name = required_name(node, kind, &attrs.source_name, prefix)?;
        let path = join_path(prefix, &source_name);
        let target_name = required_name(node, kind, &attrs.target_name, &path)?;

        let (source_data_type, target_data_type) = match kind {
            NodeKind::Element => (
                Some(required(node, kind, &attrs.source_data_type, &path)?.to_string()),
                Some(required(node, kind, &attrs.target_data_type, &path)?.to_string()),
            ),
            NodeKind::Object | NodeKind::Array => (
                node.attribute(&attrs.source_data_type).map(str::to_string),
                node.attribute(&attrs.target_data_type).map(str::to_string),
            ),
        };

        Ok(MappingRecord {
            source_name,
            node_kind: kind,
            source_data_type,
            target_name,
            target_data_type,
        })
    }
}

/// Compile with the default attribute names.
pub fn compile(root: &XmlNode) -> Result<MappingTable, SchemaError> {
    MappingCompiler::new().compile(root)
}

fn required<'a>(
    node: &'a XmlNode,
    kind: NodeKind,
    attribute: &str,
    path: &str,
) -> Result<&'a str, SchemaError> {
    node.attribute(attribute)
        .ok_or_else(|| SchemaError::missing(kind, attribute, path))
}

fn required_name(
    node: &XmlNode,
    kind: NodeKind,
    attribute: &str,
    path: &str,
) -> Result<String, SchemaError> {
    let value = required(node, kind, attribute, path)?;
    if value.is_empty() {
        return Err(SchemaError::empty(kind, attribute, path));
    }
    Ok(value.to_string())
}
