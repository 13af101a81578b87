//! Tree transformer.
//!
//! Walks the input tree alongside the compiled [`MappingTable`]. Each element
//! is looked up by its position path (the dotted chain of actual input tag
//! names) and dispatched on the record's [`NodeKind`]. Nodes without a record
//! are dropped together with their subtree.
//!
//! Structural mismatches never fail: an array or object whose input node has
//! no mapped children simply comes out empty.

use crate::conversion::ConversionEngine;
use crate::node::XmlNode;
use crate::record::NodeKind;
use crate::table::{join_path, MappingTable};
use crate::value::{OutputObject, OutputValue};
use tracing::trace;

/// Key reserved for values that were not mapped. A root object holding only
/// this key is unwrapped to its value.
pub const NOT_MAPPED_KEY: &str = "notMapped";

/// Applies a compiled mapping table to input trees.
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'a> {
    table: &'a MappingTable,
    engine: &'a ConversionEngine,
}

impl<'a> Transformer<'a> {
    pub fn new(table: &'a MappingTable, engine: &'a ConversionEngine) -> Self {
        Self { table, engine }
    }

    /// Transform the document rooted at `root`. The root element is a
    /// wrapper; its children are matched against the top-level declarations.
    pub fn transform(&self, root: &XmlNode) -> OutputValue {
        let mut out = OutputObject::new();
        self.visit_children(root, &mut out, "");
        unwrap_not_mapped(out)
    }

    fn visit_children(&self, node: &XmlNode, dest: &mut OutputObject, position: &str) {
        for child in node.children() {
            self.visit(child, dest, position);
        }
    }

    fn visit(&self, node: &XmlNode, dest: &mut OutputObject, position: &str) {
        let Some(record) = self.table.lookup(position, &node.tag) else {
            trace!(position, tag = %node.tag, "No mapping, dropping node");
            return;
        };

        match record.node_kind {
            NodeKind::Element => {
                let value = self.engine.convert(
                    record.source_data_type.as_deref(),
                    record.target_data_type.as_deref(),
                    Some(&node.text_content()),
                );
                dest.insert(record.target_name.as_str(), value);
            }
            NodeKind::Object => {
                let path = join_path(position, &node.tag);
                dest.object_entry(&record.target_name, |object| {
                    self.visit_children(node, object, &path)
                });
            }
            NodeKind::Array => {
                let path = join_path(position, &node.tag);
                let mut item = OutputObject::new();
                self.visit_children(node, &mut item, &path);
                dest.array_entry(&record.target_name, |items| {
                    items.push(OutputValue::Object(item))
                });
            }
        }
    }
}

/// Transform with a one-off transformer.
pub fn transform(table: &MappingTable, engine: &ConversionEngine, root: &XmlNode) -> OutputValue {
    Transformer::new(table, engine).transform(root)
}

fn unwrap_not_mapped(mut root: OutputObject) -> OutputValue {
    if root.len() == 1 && root.contains_key(NOT_MAPPED_KEY) {
        if let Some(value) = root.remove(NOT_MAPPED_KEY) {
            return value;
        }
    }
    OutputValue::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(schema: &str, input: &str) -> serde_json::Value {
        let table = compile(&XmlNode::parse(schema).unwrap()).unwrap();
        let engine = ConversionEngine::new();
        let root = XmlNode::parse(input).unwrap();
        serde_json::Value::from(transform(&table, &engine, &root))
    }

    const DISH_SCHEMA: &str = r#"
        <mapping>
          <array xmlName="dish" jsonName="dishJson">
            <array xmlName="ingredients" jsonName="ingredientsJson">
              <element xmlName="ingredientName" xmlDataType="STRING"
                       jsonName="ingredientNameJson" jsonDataType="STRING"/>
            </array>
          </array>
        </mapping>"#;

    #[test]
    fn test_nested_arrays() {
        let output = run(
            DISH_SCHEMA,
            r#"<menu>
                 <dish><ingredients><ingredientName>Chicken</ingredientName></ingredients></dish>
                 <dish><ingredients><ingredientName>Tomato puree</ingredientName></ingredients></dish>
               </menu>"#,
        );

        assert_eq!(
            output,
            json!({
                "dishJson": [
                    {"ingredientsJson": [{"ingredientNameJson": "Chicken"}]},
                    {"ingredientsJson": [{"ingredientNameJson": "Tomato puree"}]}
                ]
            })
        );
    }

    #[test]
    fn test_mixed_content_element_keeps_text_order() {
        let output = run(
            r#"<mapping>
                 <element xmlName="name" xmlDataType="STRING" jsonName="n" jsonDataType="STRING"/>
               </mapping>"#,
            "<r><name>Chicken <b>hot</b> wings</name></r>",
        );
        assert_eq!(output, json!({"n": "Chicken hot wings"}));
    }

    #[test]
    fn test_sibling_arrays_share_target() {
        let output = run(
            DISH_SCHEMA,
            r#"<menu>
                 <dish>
                   <ingredients><ingredientName>Chicken</ingredientName></ingredients>
                   <ingredients><ingredientName>Beans</ingredientName></ingredients>
                 </dish>
               </menu>"#,
        );

        assert_eq!(
            output,
            json!({
                "dishJson": [{
                    "ingredientsJson": [
                        {"ingredientNameJson": "Chicken"},
                        {"ingredientNameJson": "Beans"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_unmapped_nodes_dropped() {
        let output = run(
            DISH_SCHEMA,
            r#"<menu>
                 <secret>drop me</secret>
                 <dish>
                   <price>10</price>
                   <ingredients><ingredientName>Rice</ingredientName><note>x</note></ingredients>
                 </dish>
               </menu>"#,
        );

        assert_eq!(
            output,
            json!({"dishJson": [{"ingredientsJson": [{"ingredientNameJson": "Rice"}]}]})
        );
    }

    #[test]
    fn test_array_without_children_is_empty_object() {
        let output = run(DISH_SCHEMA, "<menu><dish/></menu>");
        assert_eq!(output, json!({"dishJson": [{}]}));
    }

    #[test]
    fn test_objects_and_conversions() {
        let output = run(
            r#"<mapping>
                 <object xmlName="person" jsonName="personJson">
                   <element xmlName="age" xmlDataType="STRING" jsonName="ageJson" jsonDataType="INTEGER"/>
                   <element xmlName="gender" xmlDataType="GENDERABBREV" jsonName="genderJson" jsonDataType="GENDERFULL"/>
                   <object xmlName="address" jsonName="addressJson">
                     <element xmlName="state" xmlDataType="STATEFULL" jsonName="stateJson" jsonDataType="STATEABBREV"/>
                   </object>
                 </object>
               </mapping>"#,
            r#"<people>
                 <person>
                   <age>42</age>
                   <gender>f</gender>
                   <address><state>Ohio</state></address>
                 </person>
               </people>"#,
        );

        assert_eq!(
            output,
            json!({
                "personJson": {
                    "ageJson": 42,
                    "genderJson": "female",
                    "addressJson": {"stateJson": "OH"}
                }
            })
        );
    }

    #[test]
    fn test_repeated_object_merges_into_one() {
        let output = run(
            r#"<mapping>
                 <object xmlName="meta" jsonName="metaJson">
                   <element xmlName="a" xmlDataType="STRING" jsonName="a" jsonDataType="STRING"/>
                   <element xmlName="b" xmlDataType="STRING" jsonName="b" jsonDataType="STRING"/>
                 </object>
               </mapping>"#,
            "<doc><meta><a>1</a></meta><meta><b>2</b></meta></doc>",
        );

        assert_eq!(output, json!({"metaJson": {"a": "1", "b": "2"}}));
    }

    #[test]
    fn test_array_of_scalars_and_bad_integer() {
        let output = run(
            r#"<mapping>
                 <array xmlName="score" jsonName="scores">
                   <element xmlName="value" xmlDataType="STRING" jsonName="value" jsonDataType="INTEGER"/>
                 </array>
               </mapping>"#,
            "<doc><score><value>7</value></score><score><value>n/a</value></score></doc>",
        );

        assert_eq!(output, json!({"scores": [{"value": 7}, {"value": null}]}));
    }

    #[test]
    fn test_not_mapped_root_is_unwrapped() {
        let mut root = OutputObject::new();
        root.array_entry(NOT_MAPPED_KEY, |items| items.push(OutputValue::from("a")));
        assert_eq!(
            unwrap_not_mapped(root),
            OutputValue::Array(vec![OutputValue::from("a")])
        );

        let mut root = OutputObject::new();
        root.insert(NOT_MAPPED_KEY, OutputValue::Null);
        root.insert("other", OutputValue::Null);
        assert_eq!(unwrap_not_mapped(root.clone()), OutputValue::Object(root));
    }

    #[test]
    fn test_empty_input_gives_empty_object() {
        let output = run(DISH_SCHEMA, "<menu/>");
        assert_eq!(output, json!({}));
    }
}
