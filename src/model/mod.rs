mod edge;
mod graph;
mod node;

pub use edge::DecisionEdge;
pub use graph::DecisionGraph;
pub use node::{DecisionNode, NodeKind, Position};
