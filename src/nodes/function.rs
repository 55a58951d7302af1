use serde::{Deserialize, Serialize};

use crate::{DecisionNode, NodeKind, Result};

/// Content of a generic function node.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionContent {
    pub source: String,
}

impl FunctionContent {
    pub fn new(source: String) -> Self {
        Self {
            source,
        }
    }

    /// Build the function node replacing `original`, keeping its id, name and position.
    pub fn into_node(
        self,
        original: &DecisionNode,
    ) -> Result<DecisionNode> {
        Ok(DecisionNode {
            id: original.id.clone(),
            name: original.name.clone(),
            position: original.position,
            kind: NodeKind::FunctionNode,
            content: Some(serde_json::to_value(self)?),
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::FunctionContent;
    use crate::{DecisionNode, NodeKind};

    #[test]
    fn test_into_node_keeps_identity() {
        let original = DecisionNode::new("n1", "apiRequest1", NodeKind::ApiRequestNode).with_position(12.5, -3.0).with_content(json!({ "url": "x" }));

        let node = FunctionContent::new("export const handler = async () => 1;".to_string()).into_node(&original).unwrap();

        assert_eq!(node.id, "n1");
        assert_eq!(node.name, "apiRequest1");
        assert_eq!(node.position, original.position);
        assert_eq!(node.kind, NodeKind::FunctionNode);
        assert_eq!(node.content, Some(json!({ "source": "export const handler = async () => 1;" })));
    }
}
