//! The diagram element model.
//!
//! A [`DiagramElement`] is one renderable unit in a diagram: a node, a
//! socket or parameter sub-part of a node, a connection spline, a text
//! label, or a swim-lane divider. Elements form a containment tree (node ⊃
//! sockets ⊃ parameters) and carry an optional non-owning reference to the
//! process-graph entity they represent. Dividers are the only kind with no
//! graph counterpart.
//!
//! The kind set is a closed capability variant ([`ElementKind`]) rather
//! than an open inheritance hierarchy; the engine dispatches over it for
//! stacking, hit-testing, and decoration.

use std::fmt;

use bitflags::bitflags;

use crate::divider::DividerLine;
use crate::geometry::{Point, Rect};
use crate::identifier::Id;
use crate::process::SocketKind;

/// Stable handle for a [`DiagramElement`] within its diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an element id from a raw counter value.
    ///
    /// Ids are minted by the owning diagram; this constructor exists for
    /// the engine crate and for tests.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Visibility and annotation state carried by a diagram element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        /// The element is rendered at all.
        const VISIBLE = 1 << 0;
        /// A parameter visual receives its value from a process variable.
        const VARIABLE_SOURCE = 1 << 1;
        /// A parameter visual writes its value to a process variable.
        const VARIABLE_TARGET = 1 << 2;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Identity of a process-graph entity, used as the key of the
/// representation side-table mapping entities to their elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Node(Id),
    Socket { node: Id, socket: Id },
    Param { node: Id, socket: Id, param: Id },
    ControlLink(Id),
    DataLink(Id),
    Text(Id),
    Variable(Id),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node `{id}`"),
            Self::Socket { node, socket } => write!(f, "socket `{node}.{socket}`"),
            Self::Param {
                node,
                socket,
                param,
            } => write!(f, "param `{node}.{socket}.{param}`"),
            Self::ControlLink(id) => write!(f, "control link `{id}`"),
            Self::DataLink(id) => write!(f, "data link `{id}`"),
            Self::Text(id) => write!(f, "text `{id}`"),
            Self::Variable(id) => write!(f, "variable `{id}`"),
        }
    }
}

/// Per-kind state of a parameter visual.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamVisual {
    expression: Option<String>,
    variable_sources: Vec<Id>,
    variable_targets: Vec<Id>,
}

impl ParamVisual {
    /// Creates a parameter visual with the given bound expression.
    pub fn new(expression: Option<String>) -> Self {
        Self {
            expression,
            ..Self::default()
        }
    }

    /// Returns the bound expression, if any.
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Variables feeding this parameter.
    pub fn variable_sources(&self) -> &[Id] {
        &self.variable_sources
    }

    /// Variables written by this parameter.
    pub fn variable_targets(&self) -> &[Id] {
        &self.variable_targets
    }

    /// Records a variable feeding this parameter.
    pub fn add_variable_source(&mut self, variable: Id) {
        self.variable_sources.push(variable);
    }

    /// Records a variable written by this parameter.
    pub fn add_variable_target(&mut self, variable: Id) {
        self.variable_targets.push(variable);
    }
}

/// Per-kind state of a connection visual (control or data link spline).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkVisual {
    path: Vec<Point>,
}

impl LinkVisual {
    /// Creates a connection visual with the given path.
    pub fn new(path: Vec<Point>) -> Self {
        Self { path }
    }

    /// Returns the path points of the spline.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Replaces the path points of the spline.
    pub fn set_path(&mut self, path: Vec<Point>) {
        self.path = path;
    }
}

/// Per-kind state of a text label visual.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextVisual {
    text: String,
}

impl TextVisual {
    /// Creates a text visual with the given content.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the text content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The closed set of diagram element kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A process node body.
    Node,
    /// A socket sub-part of a node.
    Socket(SocketKind),
    /// A parameter sub-part of a socket.
    Param(ParamVisual),
    /// A control-flow connection spline.
    ControlLink(LinkVisual),
    /// A data-flow connection spline.
    DataLink(LinkVisual),
    /// A free-standing text label.
    Text(TextVisual),
    /// A swim-lane divider line.
    Divider(DividerLine),
}

impl ElementKind {
    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Socket(_) => "socket",
            Self::Param(_) => "param",
            Self::ControlLink(_) => "control-link",
            Self::DataLink(_) => "data-link",
            Self::Text(_) => "text",
            Self::Divider(_) => "divider",
        }
    }

    /// True for connection splines (control and data links).
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ControlLink(_) | Self::DataLink(_))
    }

    /// True for text labels.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// True for swim-lane dividers.
    pub fn is_divider(&self) -> bool {
        matches!(self, Self::Divider(_))
    }
}

/// One renderable unit in a diagram.
///
/// Elements are owned exclusively by their diagram; the optional
/// [`EntityRef`] is a non-owning identity used for lookups, never for
/// lifetime management.
#[derive(Debug, Clone)]
pub struct DiagramElement {
    id: ElementId,
    kind: ElementKind,
    bounds: Rect,
    z_value: usize,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    entity: Option<EntityRef>,
    flags: ElementFlags,
}

impl DiagramElement {
    /// Creates a new element of the given kind with default state:
    /// zero bounds, z-value 0, no parent, no entity, visible.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            bounds: Rect::default(),
            z_value: 0,
            parent: None,
            children: Vec::new(),
            entity: None,
            flags: ElementFlags::default(),
        }
    }

    /// Sets the represented entity (builder style).
    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Sets the bounding rectangle (builder style).
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns the stable handle of this element.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the kind of this element.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Returns mutable access to the kind payload.
    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Returns the bounding rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replaces the bounding rectangle.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Returns the current stacking rank (0 = furthest back).
    pub fn z_value(&self) -> usize {
        self.z_value
    }

    /// Assigns a new stacking rank.
    pub fn set_z_value(&mut self, z_value: usize) {
        self.z_value = z_value;
    }

    /// Returns the containment parent, if any.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Sets the containment parent.
    pub fn set_parent(&mut self, parent: Option<ElementId>) {
        self.parent = parent;
    }

    /// Returns the contained child elements.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Records a contained child element.
    pub fn add_child(&mut self, child: ElementId) {
        self.children.push(child);
    }

    /// Drops a contained child element.
    pub fn remove_child(&mut self, child: ElementId) {
        self.children.retain(|&c| c != child);
    }

    /// Returns the represented process entity, if any.
    pub fn entity(&self) -> Option<EntityRef> {
        self.entity
    }

    /// Returns the status bitmask.
    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Returns mutable access to the status bitmask.
    pub fn flags_mut(&mut self) -> &mut ElementFlags {
        &mut self.flags
    }

    /// Returns the divider payload for divider elements.
    pub fn divider(&self) -> Option<&DividerLine> {
        match &self.kind {
            ElementKind::Divider(divider) => Some(divider),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_defaults() {
        let element = DiagramElement::new(ElementId::from_raw(1), ElementKind::Node);
        assert_eq!(element.z_value(), 0);
        assert!(element.parent().is_none());
        assert!(element.entity().is_none());
        assert!(element.flags().contains(ElementFlags::VISIBLE));
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ElementKind::ControlLink(LinkVisual::default()).is_connection());
        assert!(ElementKind::DataLink(LinkVisual::default()).is_connection());
        assert!(!ElementKind::Node.is_connection());

        assert!(ElementKind::Text(TextVisual::new("label")).is_text());
        assert!(ElementKind::Divider(DividerLine::horizontal(10.0, 100.0)).is_divider());
        assert!(!ElementKind::Node.is_divider());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ElementKind::Node.name(), "node");
        assert_eq!(ElementKind::Param(ParamVisual::default()).name(), "param");
        assert_eq!(
            ElementKind::Divider(DividerLine::vertical(5.0, 10.0)).name(),
            "divider"
        );
    }

    #[test]
    fn test_child_bookkeeping() {
        let mut node = DiagramElement::new(ElementId::from_raw(1), ElementKind::Node);
        let socket = ElementId::from_raw(2);
        let other = ElementId::from_raw(3);

        node.add_child(socket);
        node.add_child(other);
        assert_eq!(node.children(), &[socket, other]);

        node.remove_child(socket);
        assert_eq!(node.children(), &[other]);
    }

    #[test]
    fn test_param_variable_annotations() {
        let mut param = ParamVisual::new(Some("order.total".to_string()));
        assert_eq!(param.expression(), Some("order.total"));

        param.add_variable_source(Id::new("total"));
        param.add_variable_target(Id::new("result"));
        assert_eq!(param.variable_sources(), &[Id::new("total")]);
        assert_eq!(param.variable_targets(), &[Id::new("result")]);
    }

    #[test]
    fn test_entity_ref_display() {
        let socket = EntityRef::Socket {
            node: Id::new("a"),
            socket: Id::new("out"),
        };
        assert_eq!(socket.to_string(), "socket `a.out`");
    }
}
