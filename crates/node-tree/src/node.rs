use derive_more::Constructor;
use nodewrangler_layout::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable handle of a node inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Broad family a node kind belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Reroutes and frames, no logic of their own
    Layout,
    Input,
    /// Material, world, composite and viewer outputs
    Output,
    Shader,
    Texture,
    Color,
    Vector,
    Converter,
    /// Group nodes and group sockets
    Group,
    Other,
}

impl Category {
    fn as_str(self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Input => "input",
            Category::Output => "output",
            Category::Shader => "shader",
            Category::Texture => "texture",
            Category::Color => "color",
            Category::Vector => "vector",
            Category::Converter => "converter",
            Category::Group => "group",
            Category::Other => "other",
        }
    }
}

/// Type tag of a node, e.g. `shader:diffuse` or `layout:frame`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Constructor)]
pub struct NodeType {
    pub category: Category,
    pub kind: String,
}

impl NodeType {
    pub fn reroute() -> Self {
        Self::new(Category::Layout, "reroute".into())
    }

    pub fn frame() -> Self {
        Self::new(Category::Layout, "frame".into())
    }

    pub fn is_reroute(&self) -> bool {
        self.category == Category::Layout && self.kind == "reroute"
    }

    pub fn is_frame(&self) -> bool {
        self.category == Category::Layout && self.kind == "frame"
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category.as_str(), self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTypeError(String);

impl fmt::Display for ParseNodeTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node type {:?}, expected `category:kind`", self.0)
    }
}

impl std::error::Error for ParseNodeTypeError {}

impl FromStr for NodeType {
    type Err = ParseNodeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNodeTypeError(s.to_string());
        let (category, kind) = s.split_once(':').ok_or_else(err)?;
        if kind.is_empty() {
            return Err(err());
        }

        let category = match category {
            "layout" => Category::Layout,
            "input" => Category::Input,
            "output" => Category::Output,
            "shader" => Category::Shader,
            "texture" => Category::Texture,
            "color" => Category::Color,
            "vector" => Category::Vector,
            "converter" => Category::Converter,
            "group" => Category::Group,
            "other" => Category::Other,
            _ => return Err(err()),
        };

        Ok(Self::new(category, kind.to_string()))
    }
}

/// A node of the tree
///
/// `location` is relative to the parent frame, if any. Use
/// [`GraphStore::absolute_location`](crate::GraphStore::absolute_location)
/// to resolve it in tree space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub node_type: NodeType,
    pub location: Point,
    pub size: Vec2,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub select: bool,
}

/// Directed connection from an output port to an input port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Constructor)]
pub struct Link {
    pub from_node: NodeId,
    pub from_port: usize,
    pub to_node: NodeId,
    pub to_port: usize,
}

impl Link {
    pub fn touches(&self, node: NodeId) -> bool {
        self.from_node == node || self.to_node == node
    }
}
