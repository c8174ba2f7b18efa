use crate::{Point, Vec2};
use petgraph::graphmap::DiGraphMap;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Errors reported when a scene is inconsistent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError<N>
where
    N: fmt::Debug,
{
    /// A node is laid out or linked but the scene has no box for it
    #[error("no geometry for node {0:?}")]
    UnknownNode(N),
}

/// Geometry of a single node as seen by the layout engines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    /// Top-left corner
    pub position: Point,
    /// Width and height, the box spans `[x, x + w] × [y - h, y]`
    pub size: Vec2,
    /// Frames are grouping containers and do not take part in the flow
    pub frame: bool,
}

impl NodeBox {
    pub fn new(position: Point, size: Vec2) -> Self {
        Self {
            position,
            size,
            frame: false,
        }
    }

    pub fn frame(position: Point, size: Vec2) -> Self {
        Self {
            position,
            size,
            frame: true,
        }
    }

    /// Size with degenerate components replaced by zero
    pub fn extent(&self) -> Vec2 {
        self.size.sanitized()
    }

    /// Same box moved to `position`
    pub fn at(self, position: Point) -> Self {
        Self { position, ..self }
    }
}

/// An owned snapshot of the nodes to lay out
///
/// `nodes` is the working set in iteration order. `boxes` holds the geometry
/// of the working set and of every node a link touches, including nodes that
/// are outside the working set and therefore never move. `links` are
/// `(source, destination)` pairs in iteration order.
#[derive(Debug, Clone)]
pub struct Scene<N>
where
    N: Copy + Ord + Hash,
{
    pub nodes: Vec<N>,
    pub boxes: HashMap<N, NodeBox>,
    pub links: Vec<(N, N)>,
}

impl<N> Default for Scene<N>
where
    N: Copy + Ord + Hash,
{
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            boxes: HashMap::new(),
            links: Vec::new(),
        }
    }
}

impl<N> Scene<N>
where
    N: Copy + Ord + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the working set
    pub fn add_node(&mut self, node: N, geometry: NodeBox) {
        if self.boxes.insert(node, geometry).is_none() || !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    /// Provide geometry for a node that links touch but that must not move
    pub fn add_fixed(&mut self, node: N, geometry: NodeBox) {
        self.boxes.insert(node, geometry);
    }

    pub fn add_link(&mut self, from: N, to: N) {
        self.links.push((from, to));
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every referenced node has a box
    pub fn validate(&self) -> Result<(), LayoutError<N>> {
        let referenced = self
            .nodes
            .iter()
            .chain(self.links.iter().flat_map(|(from, to)| [from, to]));

        for node in referenced {
            if !self.boxes.contains_key(node) {
                return Err(LayoutError::UnknownNode(*node));
            }
        }

        Ok(())
    }

    /// Build the link graph, inserting nodes in a deterministic order
    ///
    /// Working-set nodes come first in iteration order, then the link
    /// endpoints in link order.
    pub fn graph(&self) -> DiGraphMap<N, ()> {
        let mut graph = DiGraphMap::new();
        for &node in &self.nodes {
            graph.add_node(node);
        }
        for &(from, to) in &self.links {
            graph.add_edge(from, to, ());
        }
        graph
    }

    /// Nodes with at least one incoming link, and with at least one outgoing link
    pub(crate) fn linked_ends(&self) -> (HashSet<N>, HashSet<N>) {
        let mut has_input = HashSet::new();
        let mut has_output = HashSet::new();
        for &(from, to) in &self.links {
            has_output.insert(from);
            has_input.insert(to);
        }
        (has_input, has_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> NodeBox {
        NodeBox::new(Point::zero(), Vec2::new(1.0, 1.0))
    }

    #[test]
    fn validate_reports_missing_geometry() {
        let mut scene = Scene::new();
        scene.add_node(1, unit());
        scene.add_link(1, 2);
        assert_eq!(scene.validate(), Err(LayoutError::UnknownNode(2)));

        scene.add_fixed(2, unit());
        assert_eq!(scene.validate(), Ok(()));
        assert_eq!(scene.nodes, vec![1]);
    }

    #[test]
    fn re_adding_a_node_keeps_a_single_entry() {
        let mut scene = Scene::new();
        scene.add_node(7, unit());
        scene.add_node(7, unit().at(Point::new(3.0, 3.0)));
        assert_eq!(scene.nodes, vec![7]);
        assert_eq!(scene.boxes[&7].position, Point::new(3.0, 3.0));
    }

    #[test]
    fn graph_contains_fixed_endpoints() {
        let mut scene = Scene::new();
        scene.add_node('b', unit());
        scene.add_fixed('a', unit());
        scene.add_link('a', 'b');

        let graph = scene.graph();
        assert!(graph.contains_edge('a', 'b'));
        assert_eq!(graph.node_count(), 2);
    }
}
