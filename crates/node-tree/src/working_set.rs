use crate::{GraphStore, Link, Node, NodeId};
use std::collections::{HashMap, HashSet};

/// The nodes and links one operator invocation works on
///
/// Nodes are the selected ones, or every node when nothing is selected.
/// They are sorted by name and links by source name, so results do not
/// depend on storage order. Links are not filtered: they include every link
/// of the tree.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl WorkingSet {
    pub fn collect<S: GraphStore>(store: &S) -> Self {
        let all = store.list_nodes();
        let names: HashMap<NodeId, String> =
            all.iter().map(|n| (n.id, n.name.clone())).collect();

        let mut nodes: Vec<Node> = all.iter().filter(|n| n.select).cloned().collect();
        if nodes.is_empty() {
            nodes = all;
        }
        nodes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut links = store.list_links();
        // Stable, links of one source keep their storage order
        links.sort_by(|a, b| names.get(&a.from_node).cmp(&names.get(&b.from_node)));

        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> HashSet<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, NodeTree, NodeType};
    use nodewrangler_layout::{Point, Vec2};
    use test_log::test;

    fn tree() -> (NodeTree, [NodeId; 3]) {
        let mut tree = NodeTree::new();
        let kind = NodeType::new(Category::Color, "mix".into());
        let c = tree.add_node("C", kind.clone(), Point::zero(), Vec2::zero()).unwrap();
        let a = tree.add_node("A", kind.clone(), Point::zero(), Vec2::zero()).unwrap();
        let b = tree.add_node("B", kind, Point::zero(), Vec2::zero()).unwrap();
        tree.link(c, 0, a, 0).unwrap();
        tree.link(b, 1, c, 0).unwrap();
        tree.link(b, 0, a, 1).unwrap();
        (tree, [a, b, c])
    }

    fn names(set: &WorkingSet) -> Vec<&str> {
        set.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn falls_back_to_every_node() {
        let (tree, _) = tree();
        let set = WorkingSet::collect(&tree);
        assert_eq!(names(&set), ["A", "B", "C"]);
    }

    #[test]
    fn selection_restricts_nodes_but_not_links() {
        let (mut tree, [a, _, c]) = tree();
        tree.set_selection(c, true).unwrap();
        tree.set_selection(a, true).unwrap();

        let set = WorkingSet::collect(&tree);
        assert_eq!(names(&set), ["A", "C"]);
        assert_eq!(set.links.len(), 3);
    }

    #[test]
    fn links_are_sorted_by_source_name() {
        let (tree, [a, b, c]) = tree();
        let set = WorkingSet::collect(&tree);
        assert_eq!(
            set.links,
            vec![
                Link::new(b, 1, c, 0),
                Link::new(b, 0, a, 1),
                Link::new(c, 0, a, 0),
            ]
        );
    }
}
