//! The process graph container.
//!
//! [`ProcessGraph`] is the diagram's view of the process model: nodes and
//! control links held in a directed graph, plus ordered data links, text
//! elements, global variables, and the single persisted lane-geometry
//! string. The process engine owns the semantics of this model; the
//! diagram only reads it during a rebuild and writes geometry annotations
//! back onto it when persisting.
//!
//! Structural consistency at the node level is enforced here: adding a
//! link whose endpoint *node* is undefined is an error. A link whose
//! endpoint *socket* or *parameter* is missing is accepted; the
//! synchronizer tolerates that inconsistency and skips the link during a
//! rebuild.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;
use petgraph::graph::{DiGraph, NodeIndex};

use flowlane_core::identifier::Id;
use flowlane_core::process::{
    ControlLink, DataLink, DataLinkEnd, Node, ProcessVariable, TextElement,
};

use crate::error::FlowlaneError;

/// The process model a diagram is synchronized against.
#[derive(Debug, Default)]
pub struct ProcessGraph {
    graph: DiGraph<Node, ControlLink>,
    node_id_map: HashMap<Id, NodeIndex>,
    data_links: Vec<DataLink>,
    text_elements: Vec<TextElement>,
    variables: IndexMap<Id, ProcessVariable>,
    geometry: Option<String>,
}

impl ProcessGraph {
    /// Creates an empty process graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to the graph.
    ///
    /// # Errors
    ///
    /// Returns [`FlowlaneError::Graph`] if a node with the same identifier
    /// already exists.
    pub fn add_node(&mut self, node: Node) -> Result<(), FlowlaneError> {
        if self.node_id_map.contains_key(&node.id()) {
            return Err(FlowlaneError::Graph(format!(
                "duplicate node `{}`",
                node.id()
            )));
        }
        let id = node.id();
        let index = self.graph.add_node(node);
        self.node_id_map.insert(id, index);
        trace!(node = id.to_string(); "Added node to process graph");
        Ok(())
    }

    /// Adds a control link between two sockets.
    ///
    /// Socket existence is not checked; the synchronizer handles missing
    /// socket representations leniently.
    ///
    /// # Errors
    ///
    /// Returns [`FlowlaneError::Graph`] if either endpoint node is
    /// undefined.
    pub fn add_control_link(&mut self, link: ControlLink) -> Result<(), FlowlaneError> {
        let (Some(&source), Some(&target)) = (
            self.node_id_map.get(&link.source().node),
            self.node_id_map.get(&link.target().node),
        ) else {
            return Err(FlowlaneError::Graph(format!(
                "control link `{}` refers to undefined nodes: {} -> {}",
                link.id(),
                link.source().node,
                link.target().node
            )));
        };
        self.graph.add_edge(source, target, link);
        Ok(())
    }

    /// Adds a data link between parameters and/or variables.
    ///
    /// # Errors
    ///
    /// Returns [`FlowlaneError::Graph`] if an endpoint refers to an
    /// undefined node or variable.
    pub fn add_data_link(&mut self, link: DataLink) -> Result<(), FlowlaneError> {
        for end in [link.source(), link.target()] {
            match end {
                DataLinkEnd::Param(param) => {
                    if !self.node_id_map.contains_key(&param.node) {
                        return Err(FlowlaneError::Graph(format!(
                            "data link `{}` refers to undefined node `{}`",
                            link.id(),
                            param.node
                        )));
                    }
                }
                DataLinkEnd::Variable(variable) => {
                    if !self.variables.contains_key(&variable) {
                        return Err(FlowlaneError::Graph(format!(
                            "data link `{}` refers to undefined variable `{}`",
                            link.id(),
                            variable
                        )));
                    }
                }
            }
        }
        self.data_links.push(link);
        Ok(())
    }

    /// Adds a free-standing text element.
    pub fn add_text(&mut self, text: TextElement) {
        self.text_elements.push(text);
    }

    /// Adds a global process variable.
    ///
    /// # Errors
    ///
    /// Returns [`FlowlaneError::Graph`] if a variable with the same
    /// identifier already exists.
    pub fn add_variable(&mut self, variable: ProcessVariable) -> Result<(), FlowlaneError> {
        if self.variables.contains_key(&variable.id()) {
            return Err(FlowlaneError::Graph(format!(
                "duplicate variable `{}`",
                variable.id()
            )));
        }
        self.variables.insert(variable.id(), variable);
        Ok(())
    }

    /// Returns an iterator over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.node_id_map
            .get(&id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    /// Looks up a node by identifier for mutation.
    pub fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        let index = *self.node_id_map.get(&id)?;
        self.graph.node_weight_mut(index)
    }

    /// Checks whether a node with the given identifier exists.
    pub fn contains_node(&self, id: Id) -> bool {
        self.node_id_map.contains_key(&id)
    }

    /// Returns an iterator over all control links in insertion order.
    pub fn control_links(&self) -> impl Iterator<Item = &ControlLink> {
        self.graph.edge_weights()
    }

    /// Looks up a control link by identifier for mutation.
    pub fn control_link_mut(&mut self, id: Id) -> Option<&mut ControlLink> {
        self.graph.edge_weights_mut().find(|link| link.id() == id)
    }

    /// Returns an iterator over all data links in insertion order.
    pub fn data_links(&self) -> impl Iterator<Item = &DataLink> {
        self.data_links.iter()
    }

    /// Looks up a data link by identifier for mutation.
    pub fn data_link_mut(&mut self, id: Id) -> Option<&mut DataLink> {
        self.data_links.iter_mut().find(|link| link.id() == id)
    }

    /// Returns an iterator over all text elements in insertion order.
    pub fn text_elements(&self) -> impl Iterator<Item = &TextElement> {
        self.text_elements.iter()
    }

    /// Looks up a text element by identifier for mutation.
    pub fn text_element_mut(&mut self, id: Id) -> Option<&mut TextElement> {
        self.text_elements.iter_mut().find(|text| text.id() == id)
    }

    /// Returns an iterator over all process variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &ProcessVariable> {
        self.variables.values()
    }

    /// Looks up a process variable by identifier.
    pub fn variable(&self, id: Id) -> Option<&ProcessVariable> {
        self.variables.get(&id)
    }

    /// Returns the persisted lane-geometry string, if any.
    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Replaces the persisted lane-geometry string.
    pub fn set_geometry(&mut self, geometry: Option<String>) {
        self.geometry = geometry;
    }
}

#[cfg(test)]
mod tests {
    use flowlane_core::process::{ParamRef, SocketRef};

    use super::*;

    fn node(name: &str) -> Node {
        Node::new(Id::new(name), name)
    }

    #[test]
    fn test_graph_new() {
        let graph = ProcessGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.control_links().count(), 0);
        assert!(graph.geometry().is_none());
    }

    #[test]
    fn test_add_node_and_lookup() {
        let mut graph = ProcessGraph::new();
        graph.add_node(node("a")).unwrap();
        graph.add_node(node("b")).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains_node(Id::new("a")));
        assert!(graph.node(Id::new("b")).is_some());
        assert!(graph.node(Id::new("missing")).is_none());
    }

    #[test]
    fn test_add_node_rejects_duplicates() {
        let mut graph = ProcessGraph::new();
        graph.add_node(node("a")).unwrap();

        let result = graph.add_node(node("a"));
        assert!(matches!(result, Err(FlowlaneError::Graph(_))));
    }

    #[test]
    fn test_nodes_iterate_in_insertion_order() {
        let mut graph = ProcessGraph::new();
        for name in ["first", "second", "third"] {
            graph.add_node(node(name)).unwrap();
        }

        let names: Vec<&str> = graph.nodes().map(Node::name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_control_link_requires_nodes() {
        let mut graph = ProcessGraph::new();
        graph.add_node(node("a")).unwrap();

        let link = ControlLink::new(
            Id::new("flow"),
            SocketRef::new(Id::new("a"), Id::new("out")),
            SocketRef::new(Id::new("ghost"), Id::new("in")),
        );
        assert!(matches!(
            graph.add_control_link(link),
            Err(FlowlaneError::Graph(_))
        ));
    }

    #[test]
    fn test_control_link_does_not_check_sockets() {
        let mut graph = ProcessGraph::new();
        graph.add_node(node("a")).unwrap();
        graph.add_node(node("b")).unwrap();

        // Neither node declares any sockets; the link is still accepted.
        let link = ControlLink::new(
            Id::new("flow"),
            SocketRef::new(Id::new("a"), Id::new("out")),
            SocketRef::new(Id::new("b"), Id::new("in")),
        );
        assert!(graph.add_control_link(link).is_ok());
        assert_eq!(graph.control_links().count(), 1);
    }

    #[test]
    fn test_data_link_requires_variable() {
        let mut graph = ProcessGraph::new();
        graph.add_node(node("a")).unwrap();

        let link = DataLink::new(
            Id::new("d1"),
            DataLinkEnd::Variable(Id::new("undefined")),
            DataLinkEnd::Param(ParamRef::new(Id::new("a"), Id::new("in"), Id::new("amount"))),
        );
        assert!(matches!(
            graph.add_data_link(link),
            Err(FlowlaneError::Graph(_))
        ));
    }

    #[test]
    fn test_variable_registration() {
        let mut graph = ProcessGraph::new();
        graph
            .add_variable(ProcessVariable::new(Id::new("total")))
            .unwrap();

        assert!(graph.variable(Id::new("total")).is_some());
        assert!(matches!(
            graph.add_variable(ProcessVariable::new(Id::new("total"))),
            Err(FlowlaneError::Graph(_))
        ));
    }

    #[test]
    fn test_geometry_round_trip() {
        let mut graph = ProcessGraph::new();
        graph.set_geometry(Some("vline:10,20".to_string()));
        assert_eq!(graph.geometry(), Some("vline:10,20"));

        graph.set_geometry(None);
        assert!(graph.geometry().is_none());
    }
}
