use crate::{Link, Node, NodeId, NodeType, TreeError};
use nodewrangler_layout::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// The node tree an operator works on
///
/// Hosts implement this over their own scene graph. [`NodeTree`] is an
/// in-memory implementation.
pub trait GraphStore {
    /// Every node, in storage order
    fn list_nodes(&self) -> Vec<Node>;

    /// Every link, in storage order
    fn list_links(&self) -> Vec<Link>;

    fn node(&self, id: NodeId) -> Option<&Node>;

    /// Delete a node, bridging its first linked input to the nodes it fed
    fn delete_and_reconnect(&mut self, id: NodeId) -> Result<(), TreeError>;

    fn delete(&mut self, id: NodeId) -> Result<(), TreeError>;

    fn set_selection(&mut self, id: NodeId, select: bool) -> Result<(), TreeError>;

    /// Move a node, `location` being relative to its parent
    fn set_location(&mut self, id: NodeId, location: Point) -> Result<(), TreeError>;

    /// Location of a node in tree space, walking up its parent chain
    fn absolute_location(&self, id: NodeId) -> Result<Point, TreeError>
    where
        Self: Sized,
    {
        resolve_absolute(self, id, &HashMap::new())
    }
}

/// Walk up the parent chain of `id`, summing local locations
///
/// A node found in `overrides` contributes its overridden absolute location
/// and ends the walk.
pub fn resolve_absolute<S: GraphStore>(
    store: &S,
    id: NodeId,
    overrides: &HashMap<NodeId, Point>,
) -> Result<Point, TreeError> {
    let mut total = Vec2::zero();
    let mut visited = HashSet::new();
    let mut current = Some(id);

    while let Some(node_id) = current {
        if let Some(absolute) = overrides.get(&node_id) {
            return Ok(*absolute + total);
        }

        let node = store.node(node_id).ok_or(TreeError::UnknownNode(node_id))?;
        if !visited.insert(node_id) {
            return Err(TreeError::ParentCycle {
                node: id,
                parent: node_id,
            });
        }

        total = Vec2::new(total.x + node.location.x, total.y + node.location.y);
        current = node.parent;
    }

    Ok(Point::zero() + total)
}

/// In-memory node tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTree {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tree from its RON representation
    ///
    /// Snapshots are held to the same rules as trees built through this API:
    /// ids and names are unique, links and parents point at known nodes and
    /// parent chains end. When several links feed the same input port, the
    /// last one wins.
    pub fn from_ron(text: &str) -> Result<Self, TreeError> {
        let mut tree: NodeTree = ron::from_str(text)?;

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for node in &tree.nodes {
            if !ids.insert(node.id) {
                return Err(TreeError::DuplicateId(node.id));
            }
            if !names.insert(node.name.as_str()) {
                return Err(TreeError::DuplicateName(node.name.clone()));
            }
        }

        for link in &tree.links {
            for id in [link.from_node, link.to_node] {
                if !ids.contains(&id) {
                    return Err(TreeError::UnknownNode(id));
                }
            }
        }

        for node in &tree.nodes {
            tree.check_parent_chain(node.id)?;
        }

        let mut inputs = HashSet::new();
        let before = tree.links.len();
        let mut links: Vec<Link> = tree
            .links
            .into_iter()
            .rev()
            .filter(|l| inputs.insert((l.to_node, l.to_port)))
            .collect();
        links.reverse();
        if links.len() < before {
            debug!("Dropped {} links into already linked inputs", before - links.len());
        }
        tree.links = links;

        Ok(tree)
    }

    /// Walk up from `id`, failing on unknown parents or loops
    fn check_parent_chain(&self, id: NodeId) -> Result<(), TreeError> {
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            if !visited.insert(node_id) {
                return Err(TreeError::ParentCycle {
                    node: id,
                    parent: node_id,
                });
            }
            current = self
                .node(node_id)
                .ok_or(TreeError::UnknownNode(node_id))?
                .parent;
        }
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String, TreeError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// One past the highest id, or the lowest free one once that runs out
    fn next_id(&self) -> Result<NodeId, TreeError> {
        let Some(highest) = self.nodes.iter().map(|n| n.id.0).max() else {
            return Ok(NodeId(0));
        };

        highest
            .checked_add(1)
            .or_else(|| {
                let used: HashSet<u32> = self.nodes.iter().map(|n| n.id.0).collect();
                (0..u32::MAX).find(|id| !used.contains(id))
            })
            .map(NodeId)
            .ok_or(TreeError::IdsExhausted)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(TreeError::UnknownNode(id))
    }

    fn ensure(&self, id: NodeId) -> Result<(), TreeError> {
        self.node(id).map(|_| ()).ok_or(TreeError::UnknownNode(id))
    }

    /// Add an unselected, unparented node
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        node_type: NodeType,
        location: Point,
        size: Vec2,
    ) -> Result<NodeId, TreeError> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(TreeError::DuplicateName(name));
        }

        let id = self.next_id()?;
        trace!("Adding {node_type} node {name:?} as {id:?}");
        self.nodes.push(Node {
            id,
            name,
            node_type,
            location,
            size,
            parent: None,
            select: false,
        });
        Ok(id)
    }

    /// Connect an output port to an input port
    ///
    /// An input port holds a single link: an existing link into the same
    /// port is replaced.
    pub fn link(
        &mut self,
        from: NodeId,
        from_port: usize,
        to: NodeId,
        to_port: usize,
    ) -> Result<(), TreeError> {
        self.ensure(from)?;
        self.ensure(to)?;

        self.links
            .retain(|l| !(l.to_node == to && l.to_port == to_port));
        self.links.push(Link::new(from, from_port, to, to_port));
        Ok(())
    }

    /// Change the parent frame of a node, keeping its absolute location
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), TreeError> {
        let absolute = self.absolute_location(id)?;

        let parent_location = match parent {
            Some(parent_id) => {
                // The new parent must not be the node itself or one of its descendants
                let mut ancestor = Some(parent_id);
                while let Some(ancestor_id) = ancestor {
                    if ancestor_id == id {
                        return Err(TreeError::ParentCycle {
                            node: id,
                            parent: parent_id,
                        });
                    }
                    ancestor = self
                        .node(ancestor_id)
                        .ok_or(TreeError::UnknownNode(ancestor_id))?
                        .parent;
                }
                self.absolute_location(parent_id)?
            }
            None => Point::zero(),
        };

        let node = self.node_mut(id)?;
        node.parent = parent;
        node.location = Point::zero() + (absolute - parent_location);
        Ok(())
    }
}

impl GraphStore for NodeTree {
    fn list_nodes(&self) -> Vec<Node> {
        self.nodes.clone()
    }

    fn list_links(&self) -> Vec<Link> {
        self.links.clone()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn delete_and_reconnect(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.ensure(id)?;

        let source = self
            .links
            .iter()
            .filter(|l| l.to_node == id && l.from_node != id)
            .min_by_key(|l| l.to_port)
            .map(|l| (l.from_node, l.from_port));
        let targets: Vec<(NodeId, usize)> = self
            .links
            .iter()
            .filter(|l| l.from_node == id && l.to_node != id)
            .map(|l| (l.to_node, l.to_port))
            .collect();

        self.delete(id)?;

        if let Some((from, from_port)) = source {
            for (to, to_port) in targets {
                self.link(from, from_port, to, to_port)?;
            }
        }
        Ok(())
    }

    fn delete(&mut self, id: NodeId) -> Result<(), TreeError> {
        let location = self.absolute_location(id)?;
        debug!("Deleting {id:?}");

        // Children keep their place in tree space
        for node in self.nodes.iter_mut().filter(|n| n.parent == Some(id)) {
            node.parent = None;
            node.location = node.location + (location - Point::zero());
        }

        self.links.retain(|l| !l.touches(id));
        self.nodes.retain(|n| n.id != id);
        Ok(())
    }

    fn set_selection(&mut self, id: NodeId, select: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.select = select;
        Ok(())
    }

    fn set_location(&mut self, id: NodeId, location: Point) -> Result<(), TreeError> {
        self.node_mut(id)?.location = location;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use test_log::test;

    fn shader(tree: &mut NodeTree, name: &str, x: f32, y: f32) -> NodeId {
        tree.add_node(
            name,
            NodeType::new(Category::Shader, "mix".into()),
            Point::new(x, y),
            Vec2::new(100.0, 50.0),
        )
        .unwrap()
    }

    #[test]
    fn names_are_unique() {
        let mut tree = NodeTree::new();
        shader(&mut tree, "Mix", 0.0, 0.0);
        let err = tree
            .add_node("Mix", NodeType::frame(), Point::zero(), Vec2::zero())
            .unwrap_err();
        assert!(matches!(err, TreeError::DuplicateName(name) if name == "Mix"));
    }

    #[test]
    fn input_ports_hold_a_single_link() {
        let mut tree = NodeTree::new();
        let a = shader(&mut tree, "A", 0.0, 0.0);
        let b = shader(&mut tree, "B", 0.0, 0.0);
        let c = shader(&mut tree, "C", 0.0, 0.0);

        tree.link(a, 0, c, 1).unwrap();
        tree.link(b, 0, c, 1).unwrap();
        tree.link(a, 0, c, 2).unwrap();

        assert_eq!(tree.links(), &[Link::new(b, 0, c, 1), Link::new(a, 0, c, 2)]);
        assert!(matches!(
            tree.link(a, 0, NodeId(42), 0),
            Err(TreeError::UnknownNode(NodeId(42)))
        ));
    }

    #[test]
    fn absolute_location_walks_parents() {
        let mut tree = NodeTree::new();
        let outer = tree
            .add_node("Outer", NodeType::frame(), Point::new(100.0, 100.0), Vec2::zero())
            .unwrap();
        let inner = tree
            .add_node("Inner", NodeType::frame(), Point::new(10.0, 20.0), Vec2::zero())
            .unwrap();
        let node = shader(&mut tree, "Node", 1.0, 2.0);

        tree.set_parent(inner, Some(outer)).unwrap();
        tree.set_parent(node, Some(inner)).unwrap();

        // Re-parenting keeps absolute locations
        assert_eq!(tree.absolute_location(node).unwrap(), Point::new(1.0, 2.0));
        assert_eq!(tree.node(inner).unwrap().location, Point::new(-90.0, -80.0));
        assert_eq!(tree.node(node).unwrap().location, Point::new(-9.0, -18.0));

        tree.set_location(outer, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(tree.absolute_location(node).unwrap(), Point::new(-99.0, -98.0));
    }

    #[test]
    fn parent_cycles_are_rejected() {
        let mut tree = NodeTree::new();
        let a = tree
            .add_node("A", NodeType::frame(), Point::zero(), Vec2::zero())
            .unwrap();
        let b = tree
            .add_node("B", NodeType::frame(), Point::zero(), Vec2::zero())
            .unwrap();
        tree.set_parent(b, Some(a)).unwrap();

        assert!(matches!(
            tree.set_parent(a, Some(b)),
            Err(TreeError::ParentCycle { .. })
        ));
        assert!(matches!(
            tree.set_parent(a, Some(a)),
            Err(TreeError::ParentCycle { .. })
        ));
    }

    #[test]
    fn overrides_end_the_parent_walk() {
        let mut tree = NodeTree::new();
        let frame = tree
            .add_node("Frame", NodeType::frame(), Point::new(50.0, 50.0), Vec2::zero())
            .unwrap();
        let node = shader(&mut tree, "Node", 60.0, 40.0);
        tree.set_parent(node, Some(frame)).unwrap();

        let overrides = HashMap::from([(frame, Point::new(0.0, 0.0))]);
        assert_eq!(
            resolve_absolute(&tree, node, &overrides).unwrap(),
            Point::new(10.0, -10.0)
        );
    }

    #[test]
    fn deleting_a_frame_keeps_children_in_place() {
        let mut tree = NodeTree::new();
        let frame = tree
            .add_node("Frame", NodeType::frame(), Point::new(50.0, 50.0), Vec2::zero())
            .unwrap();
        let node = shader(&mut tree, "Node", 60.0, 40.0);
        tree.set_parent(node, Some(frame)).unwrap();

        tree.delete(frame).unwrap();

        let node = tree.node(node).unwrap();
        assert_eq!(node.parent, None);
        assert_eq!(node.location, Point::new(60.0, 40.0));
    }

    #[test]
    fn delete_and_reconnect_bridges_links() {
        let mut tree = NodeTree::new();
        let a = shader(&mut tree, "A", 0.0, 0.0);
        let reroute = tree
            .add_node("Reroute", NodeType::reroute(), Point::zero(), Vec2::zero())
            .unwrap();
        let b = shader(&mut tree, "B", 0.0, 0.0);
        let c = shader(&mut tree, "C", 0.0, 0.0);
        tree.link(a, 2, reroute, 0).unwrap();
        tree.link(reroute, 0, b, 0).unwrap();
        tree.link(reroute, 0, c, 3).unwrap();

        tree.delete_and_reconnect(reroute).unwrap();

        assert!(tree.node(reroute).is_none());
        assert_eq!(tree.links(), &[Link::new(a, 2, b, 0), Link::new(a, 2, c, 3)]);
    }

    #[test]
    fn delete_and_reconnect_without_input_only_deletes() {
        let mut tree = NodeTree::new();
        let reroute = tree
            .add_node("Reroute", NodeType::reroute(), Point::zero(), Vec2::zero())
            .unwrap();
        let b = shader(&mut tree, "B", 0.0, 0.0);
        let c = shader(&mut tree, "C", 0.0, 0.0);
        tree.link(reroute, 0, b, 0).unwrap();
        tree.link(b, 0, c, 0).unwrap();

        tree.delete_and_reconnect(reroute).unwrap();

        assert!(tree.node(reroute).is_none());
        assert_eq!(tree.links(), &[Link::new(b, 0, c, 0)]);
    }

    fn snapshot(nodes: &[(u32, &str, Option<u32>)], links: &[(u32, u32, usize)]) -> String {
        let nodes: Vec<String> = nodes
            .iter()
            .map(|(id, name, parent)| {
                let parent = match parent {
                    Some(p) => format!("Some(({p}))"),
                    None => "None".to_string(),
                };
                format!(
                    "(id: ({id}), name: \"{name}\", node_type: (category: shader, kind: \"mix\"), \
                     location: (x: 0.0, y: 0.0), size: (x: 100.0, y: 50.0), parent: {parent}, select: false)"
                )
            })
            .collect();
        let links: Vec<String> = links
            .iter()
            .map(|(from, to, port)| {
                format!("(from_node: ({from}), from_port: 0, to_node: ({to}), to_port: {port})")
            })
            .collect();
        format!("(nodes: [{}], links: [{}])", nodes.join(", "), links.join(", "))
    }

    #[test]
    fn loading_keeps_the_last_link_into_an_input() {
        let text = snapshot(
            &[(0, "A", None), (1, "B", None), (2, "C", None)],
            &[(0, 2, 0), (1, 2, 0), (0, 2, 1)],
        );

        let tree = NodeTree::from_ron(&text).unwrap();

        assert_eq!(
            tree.links(),
            &[
                Link::new(NodeId(1), 0, NodeId(2), 0),
                Link::new(NodeId(0), 0, NodeId(2), 1)
            ]
        );
    }

    #[test]
    fn loading_rejects_links_to_unknown_nodes() {
        let text = snapshot(&[(0, "A", None)], &[(0, 7, 0)]);
        assert!(matches!(
            NodeTree::from_ron(&text),
            Err(TreeError::UnknownNode(NodeId(7)))
        ));
    }

    #[test]
    fn loading_rejects_bad_parents() {
        let looped = snapshot(&[(0, "A", Some(1)), (1, "B", Some(0))], &[]);
        assert!(matches!(
            NodeTree::from_ron(&looped),
            Err(TreeError::ParentCycle { node: NodeId(0), .. })
        ));

        let orphan = snapshot(&[(0, "A", Some(5))], &[]);
        assert!(matches!(
            NodeTree::from_ron(&orphan),
            Err(TreeError::UnknownNode(NodeId(5)))
        ));
    }

    #[test]
    fn loading_rejects_duplicate_ids() {
        let text = snapshot(&[(3, "A", None), (3, "B", None)], &[]);
        assert!(matches!(
            NodeTree::from_ron(&text),
            Err(TreeError::DuplicateId(NodeId(3)))
        ));
    }

    #[test]
    fn ids_past_the_highest_reuse_free_slots() {
        let text = snapshot(&[(0, "A", None), (u32::MAX, "Z", None)], &[]);
        let mut tree = NodeTree::from_ron(&text).unwrap();

        let b = shader(&mut tree, "B", 0.0, 0.0);

        assert_eq!(b, NodeId(1));
        assert_eq!(tree.nodes().len(), 3);
    }

    #[test]
    fn ron_snapshots_round_trip() {
        let mut tree = NodeTree::new();
        let a = shader(&mut tree, "A", 1.5, -2.0);
        let b = shader(&mut tree, "B", 0.0, 0.0);
        tree.link(a, 0, b, 0).unwrap();
        tree.set_selection(b, true).unwrap();

        let text = tree.to_ron().unwrap();
        let loaded = NodeTree::from_ron(&text).unwrap();

        assert_eq!(loaded.nodes(), tree.nodes());
        assert_eq!(loaded.links(), tree.links());
        assert!(matches!(
            NodeTree::from_ron("(nodes: [oops], links: [])"),
            Err(TreeError::Ron(_))
        ));
    }
}
