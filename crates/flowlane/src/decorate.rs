//! Selection and decoration policy.
//!
//! Decoration never mutates an element. [`InteractionState`] holds the
//! externally owned interactive state (hover, selection, drag), and
//! [`DecorationPolicy`] derives the visual emphasis for any element from
//! it as pure queries, evaluated per repaint and never cached:
//!
//! - frame emphasis for selected or hovered elements,
//! - brightened fill for (group-)selected elements and their sub-parts,
//! - forced visibility of a socket's flow connector while it takes part
//!   in an interaction,
//! - the expression badge on parameters with a non-trivial bound
//!   expression.
//!
//! The policy borrows its collaborators explicitly; there is no global
//! decoration manager.

use std::collections::HashSet;

use flowlane_core::element::{ElementId, ElementKind};

use crate::diagram::Diagram;

/// Expression values that stand for "default/unset" and must not be
/// badged.
fn is_trivial_expression(expression: &str) -> bool {
    matches!(expression, "null" | "\"\"" | "false" | "0")
}

/// The externally owned interactive state a diagram view feeds into the
/// decoration policy.
#[derive(Debug, Default)]
pub struct InteractionState {
    hovered: Option<ElementId>,
    selected: HashSet<ElementId>,
    drag_participants: HashSet<ElementId>,
}

impl InteractionState {
    /// Creates an empty interaction state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently hovered element, if any.
    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Replaces the hovered element.
    pub fn set_hovered(&mut self, element: Option<ElementId>) {
        self.hovered = element;
    }

    /// Adds an element to the selection.
    pub fn select(&mut self, element: ElementId) {
        self.selected.insert(element);
    }

    /// Removes an element from the selection.
    pub fn deselect(&mut self, element: ElementId) {
        self.selected.remove(&element);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Membership test against the selection set.
    pub fn is_selected(&self, element: ElementId) -> bool {
        self.selected.contains(&element)
    }

    /// Marks an element as taking part in a drag-and-drop interaction.
    pub fn begin_drag(&mut self, element: ElementId) {
        self.drag_participants.insert(element);
    }

    /// Clears an element's drag participation.
    pub fn end_drag(&mut self, element: ElementId) {
        self.drag_participants.remove(&element);
    }

    /// Membership test against the drag-participant set.
    pub fn is_drag_participant(&self, element: ElementId) -> bool {
        self.drag_participants.contains(&element)
    }
}

/// Frame emphasis of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTreatment {
    /// The element is selected.
    Selected,
    /// The element is merely hovered.
    Hovered,
}

/// Pure decoration queries over a diagram and its interaction state.
#[derive(Debug, Clone, Copy)]
pub struct DecorationPolicy<'a> {
    diagram: &'a Diagram,
    state: &'a InteractionState,
}

impl<'a> DecorationPolicy<'a> {
    /// Creates a policy over the given diagram and interaction state.
    pub fn new(diagram: &'a Diagram, state: &'a InteractionState) -> Self {
        Self { diagram, state }
    }

    /// True iff the element takes part in the selection domain: it bears
    /// a process entity. Dividers do not.
    pub fn is_selectable(&self, element: ElementId) -> bool {
        self.diagram
            .element(element)
            .is_some_and(|e| e.entity().is_some())
    }

    /// Direct membership test against the selection.
    pub fn is_selected(&self, element: ElementId) -> bool {
        self.state.is_selected(element)
    }

    /// Direct identity test against the hovered element.
    pub fn is_hovered(&self, element: ElementId) -> bool {
        self.state.hovered() == Some(element)
    }

    /// True if the element or any of its containment ancestors is
    /// selected.
    pub fn is_ancestor_selected(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if self.state.is_selected(id) {
                return true;
            }
            current = self.diagram.element(id).and_then(|e| e.parent());
        }
        false
    }

    /// True if the socket itself, its owning node, or any of its
    /// contained parameter visuals is selected.
    pub fn is_socket_relative_selected(&self, socket: ElementId) -> bool {
        let Some(element) = self.diagram.element(socket) else {
            return false;
        };
        if self.state.is_selected(socket) {
            return true;
        }
        if element.parent().is_some_and(|node| self.state.is_selected(node)) {
            return true;
        }
        element
            .children()
            .iter()
            .any(|&param| self.state.is_selected(param))
    }

    /// Frame emphasis: selected wins over hovered; elements outside the
    /// selection domain get none.
    pub fn frame_treatment(&self, element: ElementId) -> Option<FrameTreatment> {
        if !self.is_selectable(element) {
            return None;
        }
        if self.is_selected(element) {
            Some(FrameTreatment::Selected)
        } else if self.is_hovered(element) {
            Some(FrameTreatment::Hovered)
        } else {
            None
        }
    }

    /// Brightened fill applies whenever the element or an ancestor is
    /// selected, so a group selection lights up contained sub-elements.
    pub fn fill_brightened(&self, element: ElementId) -> bool {
        self.is_ancestor_selected(element)
    }

    /// Whether a socket's normally hidden flow connector must be shown:
    /// while the socket takes part in a drag, while the socket or its
    /// node is selected, or while any link incident on the socket is
    /// selected.
    pub fn flow_connector_visible(&self, socket: ElementId) -> bool {
        if self.state.is_drag_participant(socket) {
            return true;
        }
        if self.is_ancestor_selected(socket) {
            return true;
        }
        self.diagram
            .incident_links(socket)
            .iter()
            .any(|&link| self.state.is_selected(link))
    }

    /// Whether a parameter carries the expression badge: its bound
    /// expression exists and is not one of the default-value sentinels.
    pub fn expression_badge(&self, element: ElementId) -> bool {
        let Some(element) = self.diagram.element(element) else {
            return false;
        };
        let ElementKind::Param(visual) = element.kind() else {
            return false;
        };
        visual
            .expression()
            .is_some_and(|expression| !is_trivial_expression(expression))
    }
}
