//! Process-model vocabulary.
//!
//! These are the types the process engine exchanges with the diagram:
//! nodes with entry/exit sockets and parameters, control links between
//! sockets, data links between parameters and variables, free-standing
//! text elements, and global process variables. The diagram never owns the
//! process model; it reads these types during a rebuild and writes
//! geometry annotations back onto them when persisting.
//!
//! Geometry annotations are opaque strings from the engine's point of
//! view; their concrete codecs live in [`crate::geometry`].

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Whether a socket accepts incoming control flow or emits outgoing flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketKind {
    /// Control flow enters the node through this socket.
    #[default]
    Entry,
    /// Control flow leaves the node through this socket.
    Exit,
}

/// A named parameter of a socket, optionally bound to an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    id: Id,
    expression: Option<String>,
}

impl Param {
    /// Creates an unbound parameter.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            expression: None,
        }
    }

    /// Sets the bound expression (builder style).
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Returns the parameter identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the bound expression, if any.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Replaces the bound expression.
    pub fn set_expression(&mut self, expression: Option<String>) {
        self.expression = expression;
    }
}

/// A node's named connection point for control-flow links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    id: Id,
    kind: SocketKind,
    params: Vec<Param>,
}

impl Socket {
    /// Creates an empty socket.
    pub fn new(id: Id, kind: SocketKind) -> Self {
        Self {
            id,
            kind,
            params: Vec::new(),
        }
    }

    /// Adds a parameter (builder style).
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Returns the socket identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns whether this is an entry or exit socket.
    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    /// Returns the parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Looks up a parameter by identifier.
    pub fn param(&self, id: Id) -> Option<&Param> {
        self.params.iter().find(|p| p.id == id)
    }
}

/// A process node: an activity, decision, or similar step in the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    name: String,
    sockets: Vec<Socket>,
    geometry: Option<String>,
}

impl Node {
    /// Creates a node with no sockets.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sockets: Vec::new(),
            geometry: None,
        }
    }

    /// Adds a socket (builder style).
    pub fn with_socket(mut self, socket: Socket) -> Self {
        self.sockets.push(socket);
        self
    }

    /// Sets the geometry annotation (builder style).
    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Returns the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sockets in declaration order.
    pub fn sockets(&self) -> &[Socket] {
        &self.sockets
    }

    /// Looks up a socket by identifier.
    pub fn socket(&self, id: Id) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.id == id)
    }

    /// Returns the persisted geometry annotation, if any.
    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Replaces the persisted geometry annotation.
    pub fn set_geometry(&mut self, geometry: Option<String>) {
        self.geometry = geometry;
    }
}

/// Identity of a socket within the process graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    pub node: Id,
    pub socket: Id,
}

impl SocketRef {
    pub fn new(node: Id, socket: Id) -> Self {
        Self { node, socket }
    }
}

/// Identity of a parameter within the process graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamRef {
    pub node: Id,
    pub socket: Id,
    pub param: Id,
}

impl ParamRef {
    pub fn new(node: Id, socket: Id, param: Id) -> Self {
        Self {
            node,
            socket,
            param,
        }
    }
}

/// A control-flow link connecting an exit socket to an entry socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlLink {
    id: Id,
    source: SocketRef,
    target: SocketRef,
    geometry: Option<String>,
}

impl ControlLink {
    pub fn new(id: Id, source: SocketRef, target: SocketRef) -> Self {
        Self {
            id,
            source,
            target,
            geometry: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> SocketRef {
        self.source
    }

    pub fn target(&self) -> SocketRef {
        self.target
    }

    /// Returns the persisted path annotation, if any.
    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Replaces the persisted path annotation.
    pub fn set_geometry(&mut self, geometry: Option<String>) {
        self.geometry = geometry;
    }
}

/// One endpoint of a data link: a node parameter or a global variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataLinkEnd {
    Param(ParamRef),
    Variable(Id),
}

/// A data-flow link between parameters and/or process variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataLink {
    id: Id,
    source: DataLinkEnd,
    target: DataLinkEnd,
    geometry: Option<String>,
}

impl DataLink {
    pub fn new(id: Id, source: DataLinkEnd, target: DataLinkEnd) -> Self {
        Self {
            id,
            source,
            target,
            geometry: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn source(&self) -> DataLinkEnd {
        self.source
    }

    pub fn target(&self) -> DataLinkEnd {
        self.target
    }

    /// Returns the persisted path annotation, if any.
    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    /// Replaces the persisted path annotation.
    pub fn set_geometry(&mut self, geometry: Option<String>) {
        self.geometry = geometry;
    }
}

/// A free-standing text annotation on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    id: Id,
    text: String,
    geometry: Option<String>,
}

impl TextElement {
    pub fn new(id: Id, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            geometry: None,
        }
    }

    /// Sets the geometry annotation (builder style).
    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    pub fn set_geometry(&mut self, geometry: Option<String>) {
        self.geometry = geometry;
    }
}

/// A global process variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessVariable {
    id: Id,
}

impl ProcessVariable {
    pub fn new(id: Id) -> Self {
        Self { id }
    }

    pub fn id(&self) -> Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_socket_param_lookup() {
        let node = Node::new(Id::new("charge"), "Charge card").with_socket(
            Socket::new(Id::new("in"), SocketKind::Entry)
                .with_param(Param::new(Id::new("amount")).with_expression("order.total")),
        );

        let socket = node.socket(Id::new("in")).unwrap();
        assert_eq!(socket.kind(), SocketKind::Entry);

        let param = socket.param(Id::new("amount")).unwrap();
        assert_eq!(param.expression(), Some("order.total"));

        assert!(node.socket(Id::new("missing")).is_none());
        assert!(socket.param(Id::new("missing")).is_none());
    }

    #[test]
    fn test_geometry_annotations() {
        let mut node = Node::new(Id::new("n"), "Node").with_geometry("10,20,120,60");
        assert_eq!(node.geometry(), Some("10,20,120,60"));

        node.set_geometry(None);
        assert!(node.geometry().is_none());
    }

    #[test]
    fn test_control_link_endpoints() {
        let link = ControlLink::new(
            Id::new("flow1"),
            SocketRef::new(Id::new("a"), Id::new("out")),
            SocketRef::new(Id::new("b"), Id::new("in")),
        );
        assert_eq!(link.source().node, Id::new("a"));
        assert_eq!(link.target().socket, Id::new("in"));
    }

    #[test]
    fn test_data_link_ends() {
        let link = DataLink::new(
            Id::new("d1"),
            DataLinkEnd::Variable(Id::new("total")),
            DataLinkEnd::Param(ParamRef::new(Id::new("a"), Id::new("in"), Id::new("amount"))),
        );
        assert!(matches!(link.source(), DataLinkEnd::Variable(_)));
        assert!(matches!(link.target(), DataLinkEnd::Param(_)));
    }
}
