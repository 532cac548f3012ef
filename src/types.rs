//! Core domain types for jsonscope.
//!
//! Everything here is a derived, read-only artifact: graphs and index entries
//! are rebuilt from scratch whenever the input value or configuration changes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Semantic shape of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    /// All kinds, in classification-table order.
    pub const ALL: [NodeKind; 6] = [
        Self::Object,
        Self::Array,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Null,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }

    /// Parse from a loose string (case-insensitive, common aliases accepted).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "object" | "dict" | "map" => Some(Self::Object),
            "array" | "list" => Some(Self::Array),
            "string" | "str" => Some(Self::String),
            "number" | "int" | "float" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            "null" | "none" => Some(Self::Null),
            _ => None,
        }
    }

    /// Objects and arrays.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Visual style for structural nodes of this kind.
    pub fn style(&self) -> NodeStyle {
        let (shape, color) = match self {
            Self::Object => (NodeShape::Dot, "#4f7cac"),
            Self::Array => (NodeShape::Diamond, "#9b5de5"),
            Self::String => (NodeShape::Ellipse, "#2a9d8f"),
            Self::Number => (NodeShape::Triangle, "#e9c46a"),
            Self::Boolean => (NodeShape::Square, "#f4a261"),
            Self::Null => (NodeShape::Star, "#8d99ae"),
        };
        let size = if self.is_container() {
            CONTAINER_NODE_SIZE
        } else {
            LEAF_NODE_SIZE
        };
        NodeStyle { shape, color, size }
    }

    /// Visual style for the synthetic value node of a leaf of this kind.
    pub fn value_style(&self) -> NodeStyle {
        NodeStyle {
            shape: NodeShape::Box,
            color: self.style().color,
            size: LEAF_NODE_SIZE,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// Rendered size of object and array nodes.
pub const CONTAINER_NODE_SIZE: u32 = 24;

/// Rendered size of leaf and value nodes.
pub const LEAF_NODE_SIZE: u32 = 12;

/// Node shape understood by common network renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Dot,
    Diamond,
    Ellipse,
    Triangle,
    Square,
    Star,
    Box,
}

/// Shape, color and size for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub shape: NodeShape,
    pub color: &'static str,
    pub size: u32,
}

/// Highlight state attached after a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// No search active.
    #[default]
    Normal,
    /// Matches a query, or sits below a match.
    Emphasized,
    /// Unrelated to the current matches.
    Dimmed,
}

impl Emphasis {
    pub fn border_width(&self) -> u32 {
        match self {
            Self::Emphasized => 3,
            Self::Normal | Self::Dimmed => 1,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Self::Dimmed => 0.25,
            Self::Normal | Self::Emphasized => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A node in the exploration graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Path of the location (`root` for the root, `<path>#value` for value nodes).
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Tooltip: path and kind.
    pub title: String,
    /// Synthetic bubble carrying a leaf's value.
    pub value_node: bool,
    #[serde(flatten)]
    pub style: NodeStyle,
    pub emphasis: Emphasis,
}

/// Parent → child relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Bounded graph view of a JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Set when the node budget declined at least one node; the graph is a
    /// partial view.
    pub truncated: bool,
}

impl Graph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// One reachable location in the path index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Node id form of the path (`root` for the root).
    pub path: String,
    pub kind: NodeKind,
    pub preview: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
