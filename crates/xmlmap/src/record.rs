//! Mapping records: one declared field of the mapping schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of node a schema entry declares. Drives transformer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Scalar leaf, converted through the conversion engine
    Element,
    /// Single nested structure
    Object,
    /// Repeated structure
    Array,
}

impl NodeKind {
    /// The schema tag declaring this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Element => "element",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        }
    }

    /// Recognize a schema tag. Matching is exact; anything else is not a
    /// mapping node.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "element" => Some(NodeKind::Element),
            "object" => Some(NodeKind::Object),
            "array" => Some(NodeKind::Array),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Element)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::from_tag(s).ok_or_else(|| format!("unknown node kind '{}'", s))
    }
}

/// How to turn one input node into one output entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Tag name in the input tree
    pub source_name: String,
    pub node_kind: NodeKind,
    /// Conversion source tag; only meaningful for [`NodeKind::Element`]
    pub source_data_type: Option<String>,
    /// Key written into the output object
    pub target_name: String,
    pub target_data_type: Option<String>,
}

/// Attribute names the compiler reads from each schema node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchemaAttributes {
    pub source_name: String,
    pub source_data_type: String,
    pub target_name: String,
    pub target_data_type: String,
}

impl Default for SchemaAttributes {
    fn default() -> Self {
        Self {
            source_name: "xmlName".to_string(),
            source_data_type: "xmlDataType".to_string(),
            target_name: "jsonName".to_string(),
            target_data_type: "jsonDataType".to_string(),
        }
    }
}
