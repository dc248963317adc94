//! The diagram: element store and process-graph synchronizer.
//!
//! A [`Diagram`] exclusively owns its set of [`DiagramElement`]s. The
//! element map is ordered; its order is the diagram iteration order that
//! stacking recomputation and the lane-geometry codec work from. Alongside
//! the elements the diagram keeps the representation side-table (process
//! entity → element) and an index of the control links incident on each
//! socket element.
//!
//! [`Diagram::rebuild`] replaces the element set from a [`ProcessGraph`];
//! [`Diagram::persist`] writes geometry annotations back. Both are
//! tolerant of partially inconsistent graphs: links whose endpoints have
//! no representation are reported and skipped, never fatal, so a mid-edit
//! graph cannot break the redraw cycle.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info, warn};

use flowlane_core::divider::DividerLine;
use flowlane_core::element::{
    DiagramElement, ElementFlags, ElementId, ElementKind, EntityRef, LinkVisual, ParamVisual,
    TextVisual,
};
use flowlane_core::geometry::{Point, Rect, Size, encode_path};
use flowlane_core::identifier::Id;
use flowlane_core::process::{
    ControlLink, DataLink, DataLinkEnd, Node, ParamRef, SocketKind, TextElement,
};

use crate::codec;
use crate::config::AppConfig;
use crate::error::FlowlaneError;
use crate::structure::ProcessGraph;
use crate::zorder::{ZOrderClass, stacking_order};

/// Horizontal inset of parameter rows from the node edges.
const PARAM_INSET: f32 = 4.0;

/// Default size of a free-standing text label.
const TEXT_WIDTH: f32 = 100.0;
const TEXT_HEIGHT: f32 = 20.0;

/// Vertical gap between default-placed text labels.
const TEXT_GAP: f32 = 8.0;

/// How close a hit-test point must come to a connection spline.
const HIT_TOLERANCE: f32 = 3.0;

/// Summary of one synchronization pass.
///
/// The skipped links mirror what was sent to the diagnostic log: links
/// whose endpoint had no visual representation when they were processed.
#[derive(Debug, Default)]
pub struct SyncReport {
    nodes: usize,
    control_links: usize,
    data_links: usize,
    text_elements: usize,
    dividers: usize,
    skipped_links: Vec<Id>,
}

impl SyncReport {
    /// Number of node visuals created.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of control-link visuals created.
    pub fn control_links(&self) -> usize {
        self.control_links
    }

    /// Number of data links materialized (as connectors or annotations).
    pub fn data_links(&self) -> usize {
        self.data_links
    }

    /// Number of text visuals created.
    pub fn text_elements(&self) -> usize {
        self.text_elements
    }

    /// Number of dividers decoded from the lane-geometry string.
    pub fn dividers(&self) -> usize {
        self.dividers
    }

    /// Identities of the links that were skipped.
    pub fn skipped_links(&self) -> &[Id] {
        &self.skipped_links
    }

    /// True when every link in the graph found its representations.
    pub fn is_fully_resolved(&self) -> bool {
        self.skipped_links.is_empty()
    }
}

enum DataLinkOutcome {
    Materialized,
    Skipped,
}

/// The in-memory visual representation of a process graph.
#[derive(Debug, Default)]
pub struct Diagram {
    config: AppConfig,
    next_id: u64,
    elements: IndexMap<ElementId, DiagramElement>,
    representations: HashMap<EntityRef, ElementId>,
    incident_links: HashMap<ElementId, Vec<ElementId>>,
    link_endpoints: HashMap<ElementId, (ElementId, ElementId)>,
    z_bounds: (usize, usize),
}

impl Diagram {
    /// Creates an empty diagram with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the number of elements in the diagram.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the diagram has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over all elements in diagram order.
    pub fn elements(&self) -> impl Iterator<Item = &DiagramElement> {
        self.elements.values()
    }

    /// Looks up an element by handle.
    pub fn element(&self, id: ElementId) -> Option<&DiagramElement> {
        self.elements.get(&id)
    }

    /// Looks up an element by handle for mutation.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut DiagramElement> {
        self.elements.get_mut(&id)
    }

    /// Looks up the element representing a process entity.
    pub fn representation(&self, entity: EntityRef) -> Option<ElementId> {
        self.representations.get(&entity).copied()
    }

    /// Returns an iterator over all divider lines in diagram order.
    pub fn dividers(&self) -> impl Iterator<Item = &DividerLine> {
        self.elements.values().filter_map(DiagramElement::divider)
    }

    /// Returns the link elements incident on a socket or param element.
    ///
    /// Socket elements carry their incident control links, param elements
    /// their incident data-link connectors.
    pub fn incident_links(&self, endpoint: ElementId) -> &[ElementId] {
        self.incident_links
            .get(&endpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the (min, max) z-values recorded by the last recompute.
    pub fn z_bounds(&self) -> (usize, usize) {
        self.z_bounds
    }

    /// Adds a divider line to the diagram and restacks.
    pub fn add_divider(&mut self, divider: DividerLine) -> ElementId {
        let id = self.insert_divider(divider);
        self.recompute_z_order();
        id
    }

    /// Removes an element and its contained sub-elements.
    ///
    /// Control links incident on a removed socket are removed along with
    /// it. Returns `false` if the element is unknown.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let Some(parent) = self.elements.get(&id).map(DiagramElement::parent) else {
            return false;
        };
        if let Some(parent) = parent {
            if let Some(parent_element) = self.elements.get_mut(&parent) {
                parent_element.remove_child(id);
            }
        }
        self.remove_subtree(id);
        self.recompute_z_order();
        true
    }

    fn remove_subtree(&mut self, id: ElementId) {
        let Some(element) = self.elements.shift_remove(&id) else {
            return;
        };
        if let Some(entity) = element.entity() {
            self.representations.remove(&entity);
        }
        self.link_endpoints.remove(&id);

        let incident = self.incident_links.remove(&id).unwrap_or_default();
        for links in self.incident_links.values_mut() {
            links.retain(|&link| link != id);
        }
        for link in incident {
            self.remove_subtree(link);
        }
        for &child in element.children() {
            self.remove_subtree(child);
        }
    }

    /// Rebuilds the element set from a process graph.
    ///
    /// Existing elements are discarded. Dividers come from the graph's
    /// lane-geometry string; every node, resolvable link, and text element
    /// produces exactly one visual. Links whose socket or parameter has no
    /// representation are reported and skipped.
    ///
    /// # Errors
    ///
    /// Expected inconsistencies never error; the result is reserved for
    /// structural failures surfaced by collaborators.
    pub fn rebuild(&mut self, graph: &ProcessGraph) -> Result<SyncReport, FlowlaneError> {
        info!(nodes = graph.node_count(); "Rebuilding diagram from process graph");

        self.elements.clear();
        self.representations.clear();
        self.incident_links.clear();
        self.link_endpoints.clear();

        let mut report = SyncReport::default();

        for divider in codec::decode(graph.geometry()) {
            self.insert_divider(divider);
            report.dividers += 1;
        }

        for (index, node) in graph.nodes().enumerate() {
            self.build_node_visual(index, node);
            report.nodes += 1;
        }

        for link in graph.control_links() {
            if self.build_control_link(link) {
                report.control_links += 1;
            } else {
                report.skipped_links.push(link.id());
            }
        }

        for link in graph.data_links() {
            match self.build_data_link(link) {
                DataLinkOutcome::Materialized => report.data_links += 1,
                DataLinkOutcome::Skipped => report.skipped_links.push(link.id()),
            }
        }

        for (index, text) in graph.text_elements().enumerate() {
            self.build_text_visual(index, text);
            report.text_elements += 1;
        }

        self.recompute_z_order();
        self.layout_connectors();

        debug!(
            elements = self.elements.len(),
            skipped = report.skipped_links.len();
            "Diagram rebuilt",
        );
        Ok(report)
    }

    /// Writes geometry annotations back onto the process graph.
    ///
    /// The lane-geometry string is replaced (cleared when there are no
    /// dividers); node, text, and link entities receive their element's
    /// encoded bounds or path.
    ///
    /// # Errors
    ///
    /// Elements whose graph entity has gone missing are reported and
    /// skipped; the result is reserved for structural failures.
    pub fn persist(&self, graph: &mut ProcessGraph) -> Result<(), FlowlaneError> {
        graph.set_geometry(codec::encode(self.dividers()));

        for element in self.elements.values() {
            let Some(entity) = element.entity() else {
                continue;
            };
            match (element.kind(), entity) {
                (ElementKind::Node, EntityRef::Node(id)) => {
                    let geometry = element.bounds().to_geometry();
                    match graph.node_mut(id) {
                        Some(node) => node.set_geometry(Some(geometry)),
                        None => warn!(entity = entity.to_string(); "No graph entity to persist to"),
                    }
                }
                (ElementKind::Text(_), EntityRef::Text(id)) => {
                    let geometry = element.bounds().to_geometry();
                    match graph.text_element_mut(id) {
                        Some(text) => text.set_geometry(Some(geometry)),
                        None => warn!(entity = entity.to_string(); "No graph entity to persist to"),
                    }
                }
                (ElementKind::ControlLink(visual), EntityRef::ControlLink(id)) => {
                    let geometry = encode_path(visual.path());
                    match graph.control_link_mut(id) {
                        Some(link) => link.set_geometry(Some(geometry)),
                        None => warn!(entity = entity.to_string(); "No graph entity to persist to"),
                    }
                }
                (ElementKind::DataLink(visual), EntityRef::DataLink(id)) => {
                    let geometry = encode_path(visual.path());
                    match graph.data_link_mut(id) {
                        Some(link) => link.set_geometry(Some(geometry)),
                        None => warn!(entity = entity.to_string(); "No graph entity to persist to"),
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Reassigns stacking ranks across all top-level elements.
    ///
    /// Connection splines stack above text labels, which stack above
    /// divider lines, which stack above node bodies. Within a class the
    /// previous order is preserved, so calling this twice in a row is a
    /// no-op.
    pub fn recompute_z_order(&mut self) {
        let entries: Vec<(ElementId, ZOrderClass, usize)> = self
            .elements
            .values()
            .filter(|element| element.parent().is_none())
            .map(|element| (element.id(), ZOrderClass::of(element.kind()), element.z_value()))
            .collect();

        let order = stacking_order(entries);
        let max = order.len().saturating_sub(1);
        for (z_value, id) in order.into_iter().enumerate() {
            if let Some(element) = self.elements.get_mut(&id) {
                element.set_z_value(z_value);
            }
        }
        self.z_bounds = (0, max);
    }

    /// Moves an element in front of its stacking class.
    ///
    /// Socket and parameter sub-parts never outrank their owning node:
    /// bringing one of them to front resolves to the node-level ancestor
    /// first, keeping the containment grouping intact.
    pub fn bring_to_front(&mut self, id: ElementId) {
        let Some(element) = self.elements.get(&id) else {
            warn!(element = id.to_string(); "Cannot bring unknown element to front");
            return;
        };

        let target = if element.kind().is_connection() || element.kind().is_text() {
            id
        } else {
            self.node_level_ancestor(id)
        };

        // Move to the end of the underlying list, and raise the z-value
        // past the current maximum so the move survives the previous-z
        // tie-break on the next recompute.
        if let Some(moved) = self.elements.shift_remove(&target) {
            self.elements.insert(target, moved);
        }
        let max_z = self
            .elements
            .values()
            .filter(|element| element.parent().is_none())
            .map(DiagramElement::z_value)
            .max()
            .unwrap_or(0);
        if let Some(element) = self.elements.get_mut(&target) {
            element.set_z_value(max_z + 1);
        }

        self.recompute_z_order();
    }

    /// Returns the frontmost visible element containing the given point.
    ///
    /// Top-level elements are probed front to back (reverse z-order);
    /// within a node, contained socket and parameter sub-parts win ties
    /// over the node body.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        let mut top_level: Vec<&DiagramElement> = self
            .elements
            .values()
            .filter(|element| element.parent().is_none())
            .collect();
        top_level.sort_by_key(|element| std::cmp::Reverse(element.z_value()));

        for element in top_level {
            if !element.flags().contains(ElementFlags::VISIBLE) {
                continue;
            }
            if hits_element(element, point) {
                if let Some(hit) = self.child_at(element.id(), point) {
                    return Some(hit);
                }
                return Some(element.id());
            }
        }
        None
    }

    fn child_at(&self, id: ElementId, point: Point) -> Option<ElementId> {
        let element = self.elements.get(&id)?;
        for &child in element.children() {
            let Some(child_element) = self.elements.get(&child) else {
                continue;
            };
            if child_element.flags().contains(ElementFlags::VISIBLE)
                && child_element.bounds().contains(point)
            {
                return Some(self.child_at(child, point).unwrap_or(child));
            }
        }
        None
    }

    fn node_level_ancestor(&self, id: ElementId) -> ElementId {
        let mut current = id;
        while let Some(parent) = self.elements.get(&current).and_then(DiagramElement::parent) {
            current = parent;
        }
        current
    }

    fn mint_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId::from_raw(self.next_id)
    }

    fn insert_element(&mut self, element: DiagramElement) {
        if let Some(entity) = element.entity() {
            self.representations.insert(entity, element.id());
        }
        self.elements.insert(element.id(), element);
    }

    fn insert_divider(&mut self, divider: DividerLine) -> ElementId {
        let id = self.mint_id();
        let bounds = divider.bounds();
        let element =
            DiagramElement::new(id, ElementKind::Divider(divider)).with_bounds(bounds);
        self.insert_element(element);
        id
    }

    fn build_node_visual(&mut self, index: usize, node: &Node) {
        let bounds = self.node_bounds(index, node);

        let node_id = self.mint_id();
        let element = DiagramElement::new(node_id, ElementKind::Node)
            .with_entity(EntityRef::Node(node.id()))
            .with_bounds(bounds);
        self.insert_element(element);

        let socket_extent = self.config.layout().socket_extent();
        let param_height = self.config.layout().param_height();
        let entry_count = socket_count(node, SocketKind::Entry);
        let exit_count = socket_count(node, SocketKind::Exit);

        let mut entry_slot = 0usize;
        let mut exit_slot = 0usize;
        for socket in node.sockets() {
            let (slot, total, edge_y) = match socket.kind() {
                SocketKind::Entry => {
                    let slot = entry_slot;
                    entry_slot += 1;
                    (slot, entry_count, bounds.y())
                }
                SocketKind::Exit => {
                    let slot = exit_slot;
                    exit_slot += 1;
                    (slot, exit_count, bounds.y() + bounds.height())
                }
            };
            let step = bounds.width() / (total as f32 + 1.0);
            let center = Point::new(bounds.x() + step * (slot as f32 + 1.0), edge_y);
            let socket_bounds =
                Rect::from_center(center, Size::new(socket_extent, socket_extent));

            let socket_id = self.mint_id();
            let socket_element = DiagramElement::new(socket_id, ElementKind::Socket(socket.kind()))
                .with_entity(EntityRef::Socket {
                    node: node.id(),
                    socket: socket.id(),
                })
                .with_bounds(socket_bounds);
            self.attach_child(node_id, socket_element);

            for (row, param) in socket.params().iter().enumerate() {
                // Entry params stack downwards into the node, exit params
                // stack upwards.
                let row_y = match socket.kind() {
                    SocketKind::Entry => {
                        socket_bounds.y() + socket_bounds.height() + row as f32 * param_height
                    }
                    SocketKind::Exit => {
                        socket_bounds.y() - (row as f32 + 1.0) * param_height
                    }
                };
                let param_bounds = Rect::new(
                    bounds.x() + PARAM_INSET,
                    row_y,
                    bounds.width() - 2.0 * PARAM_INSET,
                    param_height,
                );

                let param_id = self.mint_id();
                let param_element = DiagramElement::new(
                    param_id,
                    ElementKind::Param(ParamVisual::new(
                        param.expression().map(str::to_string),
                    )),
                )
                .with_entity(EntityRef::Param {
                    node: node.id(),
                    socket: socket.id(),
                    param: param.id(),
                })
                .with_bounds(param_bounds);
                self.attach_child(socket_id, param_element);
            }
        }
    }

    fn attach_child(&mut self, parent: ElementId, mut child: DiagramElement) {
        child.set_parent(Some(parent));
        let child_id = child.id();
        self.insert_element(child);
        if let Some(parent_element) = self.elements.get_mut(&parent) {
            parent_element.add_child(child_id);
        }
    }

    fn node_bounds(&self, index: usize, node: &Node) -> Rect {
        let layout = self.config.layout();
        let fallback = Rect::new(
            layout.node_spacing() + index as f32 * (layout.node_width() + layout.node_spacing()),
            layout.node_spacing(),
            layout.node_width(),
            layout.node_height(),
        );
        match node.geometry() {
            Some(geometry) => match Rect::from_geometry(geometry) {
                Ok(bounds) => bounds,
                Err(reason) => {
                    warn!(
                        node = node.id().to_string(),
                        reason = reason;
                        "Unreadable node geometry, using default placement",
                    );
                    fallback
                }
            },
            None => fallback,
        }
    }

    fn build_control_link(&mut self, link: &ControlLink) -> bool {
        let source = EntityRef::Socket {
            node: link.source().node,
            socket: link.source().socket,
        };
        let target = EntityRef::Socket {
            node: link.target().node,
            socket: link.target().socket,
        };
        let (Some(source_element), Some(target_element)) =
            (self.representation(source), self.representation(target))
        else {
            warn!(
                link = link.id().to_string(),
                source = source.to_string(),
                target = target.to_string();
                "Skipping control link without a socket representation",
            );
            return false;
        };

        let id = self.mint_id();
        let element = DiagramElement::new(id, ElementKind::ControlLink(LinkVisual::default()))
            .with_entity(EntityRef::ControlLink(link.id()));
        self.insert_element(element);
        self.link_endpoints.insert(id, (source_element, target_element));
        self.incident_links
            .entry(source_element)
            .or_default()
            .push(id);
        self.incident_links
            .entry(target_element)
            .or_default()
            .push(id);
        true
    }

    fn build_data_link(&mut self, link: &DataLink) -> DataLinkOutcome {
        match (link.source(), link.target()) {
            (DataLinkEnd::Variable(variable), DataLinkEnd::Param(param)) => {
                self.annotate_param(link, param, variable, true)
            }
            (DataLinkEnd::Param(param), DataLinkEnd::Variable(variable)) => {
                self.annotate_param(link, param, variable, false)
            }
            (DataLinkEnd::Param(source), DataLinkEnd::Param(target)) => {
                let source_entity = EntityRef::Param {
                    node: source.node,
                    socket: source.socket,
                    param: source.param,
                };
                let target_entity = EntityRef::Param {
                    node: target.node,
                    socket: target.socket,
                    param: target.param,
                };
                let (Some(source_element), Some(target_element)) = (
                    self.representation(source_entity),
                    self.representation(target_entity),
                ) else {
                    warn!(
                        link = link.id().to_string(),
                        source = source_entity.to_string(),
                        target = target_entity.to_string();
                        "Skipping data link without a param representation",
                    );
                    return DataLinkOutcome::Skipped;
                };

                let id = self.mint_id();
                let element =
                    DiagramElement::new(id, ElementKind::DataLink(LinkVisual::default()))
                        .with_entity(EntityRef::DataLink(link.id()));
                self.insert_element(element);
                self.link_endpoints
                    .insert(id, (source_element, target_element));
                self.incident_links
                    .entry(source_element)
                    .or_default()
                    .push(id);
                self.incident_links
                    .entry(target_element)
                    .or_default()
                    .push(id);
                DataLinkOutcome::Materialized
            }
            (DataLinkEnd::Variable(_), DataLinkEnd::Variable(_)) => {
                warn!(
                    link = link.id().to_string();
                    "Skipping data link between two variables",
                );
                DataLinkOutcome::Skipped
            }
        }
    }

    /// Records a variable connection as an annotation on the param visual.
    /// No connector element is created for variable endpoints.
    fn annotate_param(
        &mut self,
        link: &DataLink,
        param: ParamRef,
        variable: Id,
        variable_is_source: bool,
    ) -> DataLinkOutcome {
        let entity = EntityRef::Param {
            node: param.node,
            socket: param.socket,
            param: param.param,
        };
        let Some(element_id) = self.representation(entity) else {
            warn!(
                link = link.id().to_string(),
                target = entity.to_string();
                "Skipping data link without a param representation",
            );
            return DataLinkOutcome::Skipped;
        };
        let Some(element) = self.elements.get_mut(&element_id) else {
            return DataLinkOutcome::Skipped;
        };

        if let ElementKind::Param(visual) = element.kind_mut() {
            if variable_is_source {
                visual.add_variable_source(variable);
            } else {
                visual.add_variable_target(variable);
            }
        }
        let flag = if variable_is_source {
            ElementFlags::VARIABLE_SOURCE
        } else {
            ElementFlags::VARIABLE_TARGET
        };
        element.flags_mut().insert(flag);
        DataLinkOutcome::Materialized
    }

    fn build_text_visual(&mut self, index: usize, text: &TextElement) {
        let layout = self.config.layout();
        let fallback = Rect::new(
            layout.node_spacing(),
            2.0 * layout.node_spacing()
                + layout.node_height()
                + index as f32 * (TEXT_HEIGHT + TEXT_GAP),
            TEXT_WIDTH,
            TEXT_HEIGHT,
        );
        let bounds = match text.geometry() {
            Some(geometry) => match Rect::from_geometry(geometry) {
                Ok(bounds) => bounds,
                Err(reason) => {
                    warn!(
                        text = text.id().to_string(),
                        reason = reason;
                        "Unreadable text geometry, using default placement",
                    );
                    fallback
                }
            },
            None => fallback,
        };

        let id = self.mint_id();
        let element = DiagramElement::new(id, ElementKind::Text(TextVisual::new(text.text())))
            .with_entity(EntityRef::Text(text.id()))
            .with_bounds(bounds);
        self.insert_element(element);
    }

    /// Recomputes connector spline paths from the current socket and
    /// parameter positions.
    fn layout_connectors(&mut self) {
        let mut paths: Vec<(ElementId, Point, Point)> = Vec::new();
        for (&link, &(source, target)) in &self.link_endpoints {
            let (Some(source_element), Some(target_element)) =
                (self.elements.get(&source), self.elements.get(&target))
            else {
                continue;
            };
            paths.push((
                link,
                source_element.bounds().center(),
                target_element.bounds().center(),
            ));
        }

        for (link, start, end) in paths {
            let Some(element) = self.elements.get_mut(&link) else {
                continue;
            };
            let path = vec![start, start.midpoint(end), end];
            let bounds = path_bounds(&path);
            if let ElementKind::ControlLink(visual) | ElementKind::DataLink(visual) =
                element.kind_mut()
            {
                visual.set_path(path);
            }
            element.set_bounds(bounds);
        }
    }
}

fn socket_count(node: &Node, kind: SocketKind) -> usize {
    node.sockets()
        .iter()
        .filter(|socket| socket.kind() == kind)
        .count()
}

fn path_bounds(path: &[Point]) -> Rect {
    let Some(first) = path.first() else {
        return Rect::default();
    };
    let mut bounds = Rect::new(first.x(), first.y(), 0.0, 0.0);
    for point in &path[1..] {
        bounds = bounds.union(Rect::new(point.x(), point.y(), 0.0, 0.0));
    }
    bounds
}

/// Connection splines are hit along their path, everything else by its
/// bounding rectangle.
fn hits_element(element: &DiagramElement, point: Point) -> bool {
    match element.kind() {
        ElementKind::ControlLink(visual) | ElementKind::DataLink(visual) => {
            path_hit(visual.path(), point)
        }
        _ => element.bounds().contains(point),
    }
}

fn path_hit(path: &[Point], point: Point) -> bool {
    path.windows(2)
        .any(|segment| distance_to_segment(point, segment[0], segment[1]) <= HIT_TOLERANCE)
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f32 {
    let (ab_x, ab_y) = (b.x() - a.x(), b.y() - a.y());
    let (ap_x, ap_y) = (point.x() - a.x(), point.y() - a.y());
    let length_sq = ab_x * ab_x + ab_y * ab_y;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        ((ap_x * ab_x + ap_y * ab_y) / length_sq).clamp(0.0, 1.0)
    };
    let (dx, dy) = (a.x() + t * ab_x - point.x(), a.y() + t * ab_y - point.y());
    (dx * dx + dy * dy).sqrt()
}
