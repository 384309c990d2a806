use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Version of the node/edge layout written to the store. Bump when the shape of
/// [`Node`] or [`Edge`] changes so older rows are detected instead of misread.
pub const GRAPH_SCHEMA_VERSION: i32 = 1;

/// Node `type` that marks the starting step of a quest.
pub const ROOT_NODE_TYPE: &str = "input";

/// Keys the renderer may attach beyond the ones this crate reads.
pub type ExtraFields = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One element of the combined graph array.
///
/// On the wire the two shapes are untagged; an object carrying a `source` field is an
/// edge, anything else is a node. Keys this crate does not read are carried along
/// untouched. Only elements that cannot be classified fail: non-objects, objects
/// without an `id`, and edges without both ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GraphElement {
    Node(Node),
    Edge(Edge),
}

impl<'de> Deserialize<'de> for GraphElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Some(object) = value.as_object() else {
            return Err(D::Error::custom(format!(
                "graph element must be an object, got {value}"
            )));
        };

        if object.contains_key("source") {
            serde_json::from_value(value)
                .map(GraphElement::Edge)
                .map_err(|e| D::Error::custom(format!("invalid edge: {e}")))
        } else {
            serde_json::from_value(value)
                .map(GraphElement::Node)
                .map_err(|e| D::Error::custom(format!("invalid node: {e}")))
        }
    }
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.kind.as_deref() == Some(ROOT_NODE_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_with_source_is_an_edge() {
        let element: GraphElement = serde_json::from_str(
            r#"{"id": "e1-2", "source": "1", "target": "2", "animated": true}"#,
        )
        .unwrap();

        let GraphElement::Edge(edge) = element else {
            panic!("expected edge");
        };
        assert_eq!((edge.source.as_str(), edge.target.as_str()), ("1", "2"));
        assert_eq!(edge.extra.get("animated"), Some(&Value::Bool(true)));
    }

    #[test]
    fn element_without_source_is_a_node() {
        let element: GraphElement = serde_json::from_str(
            r#"{"id": "1", "type": "input", "data": {"label": "探求の始まり", "subject": "総合"}}"#,
        )
        .unwrap();

        let GraphElement::Node(node) = element else {
            panic!("expected node");
        };
        assert!(node.is_root());
        assert_eq!(node.data.unwrap().subject.as_deref(), Some("総合"));
    }

    #[test]
    fn node_without_type_is_not_root() {
        let node: Node =
            serde_json::from_str(r#"{"id": "2", "data": {"label": "なぜ？", "subject": "物理"}}"#)
                .unwrap();
        assert_eq!(node.kind, None);
        assert!(!node.is_root());
    }

    #[test]
    fn renderer_fields_survive_a_round_trip() {
        let raw = serde_json::json!([
            {
                "id": "1",
                "type": "group",
                "position": { "x": 0, "y": 40 },
                "data": { "label": "a", "subject": "総合", "color": "#fff" }
            },
            { "id": "2" },
            { "id": "e1-2", "source": "1", "target": "2", "type": "smoothstep", "animated": "yes" }
        ]);

        let elements: Vec<GraphElement> = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(elements[0], GraphElement::Node(_)));
        assert!(matches!(elements[1], GraphElement::Node(_)));
        assert!(matches!(elements[2], GraphElement::Edge(_)));

        assert_eq!(serde_json::to_value(&elements).unwrap(), raw);
    }

    #[test]
    fn unclassifiable_elements_are_rejected() {
        // edge missing its target
        assert!(serde_json::from_str::<GraphElement>(r#"{"id": "e", "source": "1"}"#).is_err());
        // node without an id
        assert!(serde_json::from_str::<GraphElement>(r#"{"data": {"label": "a"}}"#).is_err());
        // not an object at all
        assert!(serde_json::from_str::<GraphElement>("1").is_err());
    }

    #[test]
    fn serialization_keeps_wire_shape() {
        let node = GraphElement::Node(Node {
            id: "1".to_string(),
            kind: Some(ROOT_NODE_TYPE.to_string()),
            data: Some(NodeData {
                label: Some("q".to_string()),
                subject: Some("総合".to_string()),
                extra: ExtraFields::new(),
            }),
            extra: ExtraFields::new(),
        });
        let edge = GraphElement::Edge(Edge {
            id: "e1-2".to_string(),
            source: "1".to_string(),
            target: "2".to_string(),
            extra: ExtraFields::new(),
        });

        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"id":"1","type":"input","data":{"label":"q","subject":"総合"}}"#
        );
        assert_eq!(
            serde_json::to_string(&edge).unwrap(),
            r#"{"id":"e1-2","source":"1","target":"2"}"#
        );
    }
}
