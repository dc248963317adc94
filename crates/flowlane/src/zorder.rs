//! The stacking-order policy.
//!
//! Every top-level diagram element belongs to a [`ZOrderClass`]. Classes
//! are stacked back to front in declaration order: node bodies first,
//! then divider lines, then text labels, with connection splines in
//! front of everything. Within a class the previous z-value decides, so a
//! recompute is stable with respect to the prior order.
//!
//! Rendering walks the order forward (back to front); hit-testing walks it
//! in reverse, so connection splines are picked above the nodes they
//! cross while node sub-parts still win ties against their own node body.

use flowlane_core::element::{ElementId, ElementKind};

/// Stacking class of a diagram element.
///
/// The `Ord` derive uses declaration order, so the first variant stacks
/// furthest back and the last variant renders in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZOrderClass {
    /// Node bodies and anything without a more specific class.
    Base,
    /// Swim-lane divider lines.
    Line,
    /// Free-standing text labels.
    Text,
    /// Control- and data-link splines.
    Connection,
}

impl ZOrderClass {
    /// Returns the stacking class of an element kind.
    pub fn of(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::ControlLink(_) | ElementKind::DataLink(_) => Self::Connection,
            ElementKind::Text(_) => Self::Text,
            ElementKind::Divider(_) => Self::Line,
            ElementKind::Node | ElementKind::Socket(_) | ElementKind::Param(_) => Self::Base,
        }
    }

    /// Returns the numeric rank of this class (0 = furthest back).
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Returns a human-readable name for this class.
    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Line => "line",
            Self::Text => "text",
            Self::Connection => "connection",
        }
    }
}

/// Sorts `(id, class, previous z)` stacking entries into the new
/// back-to-front order.
///
/// Primary key: class rank ascending. Secondary key: previous z-value
/// ascending. The sort is stable, and the explicit secondary key keeps
/// the result well-defined even under a non-stable sort.
pub(crate) fn stacking_order(
    mut entries: Vec<(ElementId, ZOrderClass, usize)>,
) -> Vec<ElementId> {
    entries.sort_by_key(|&(_, class, z)| (class, z));
    entries.into_iter().map(|(id, _, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use flowlane_core::divider::DividerLine;
    use flowlane_core::element::{LinkVisual, ParamVisual, TextVisual};
    use flowlane_core::process::SocketKind;

    use super::*;

    #[test]
    fn test_class_of_kinds() {
        assert_eq!(ZOrderClass::of(&ElementKind::Node), ZOrderClass::Base);
        assert_eq!(
            ZOrderClass::of(&ElementKind::Socket(SocketKind::Entry)),
            ZOrderClass::Base
        );
        assert_eq!(
            ZOrderClass::of(&ElementKind::Param(ParamVisual::default())),
            ZOrderClass::Base
        );
        assert_eq!(
            ZOrderClass::of(&ElementKind::Divider(DividerLine::horizontal(1.0, 2.0))),
            ZOrderClass::Line
        );
        assert_eq!(
            ZOrderClass::of(&ElementKind::Text(TextVisual::new("note"))),
            ZOrderClass::Text
        );
        assert_eq!(
            ZOrderClass::of(&ElementKind::ControlLink(LinkVisual::default())),
            ZOrderClass::Connection
        );
        assert_eq!(
            ZOrderClass::of(&ElementKind::DataLink(LinkVisual::default())),
            ZOrderClass::Connection
        );
    }

    #[test]
    fn test_class_ranks_ascend_towards_front() {
        assert!(ZOrderClass::Base.rank() < ZOrderClass::Line.rank());
        assert!(ZOrderClass::Line.rank() < ZOrderClass::Text.rank());
        assert!(ZOrderClass::Text.rank() < ZOrderClass::Connection.rank());
    }

    #[test]
    fn test_stacking_order_groups_by_class() {
        let connection = ElementId::from_raw(1);
        let node = ElementId::from_raw(2);
        let text = ElementId::from_raw(3);
        let line = ElementId::from_raw(4);

        let order = stacking_order(vec![
            (connection, ZOrderClass::Connection, 0),
            (node, ZOrderClass::Base, 1),
            (text, ZOrderClass::Text, 2),
            (line, ZOrderClass::Line, 3),
        ]);

        assert_eq!(order, vec![node, line, text, connection]);
    }

    #[test]
    fn test_stacking_order_preserves_z_within_class() {
        let a = ElementId::from_raw(1);
        let b = ElementId::from_raw(2);
        let c = ElementId::from_raw(3);

        // All the same class; previous z decides.
        let order = stacking_order(vec![
            (a, ZOrderClass::Base, 5),
            (b, ZOrderClass::Base, 2),
            (c, ZOrderClass::Base, 9),
        ]);

        assert_eq!(order, vec![b, a, c]);
    }
}
