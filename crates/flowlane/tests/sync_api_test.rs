//! Integration tests for the diagram synchronization API
//!
//! These tests exercise the public surface the way an embedding editor
//! would: build a process graph, rebuild the diagram, query decoration,
//! and persist geometry back.

use flowlane::divider::DividerLine;
use flowlane::element::EntityRef;
use flowlane::identifier::Id;
use flowlane::process::{
    ControlLink, DataLink, DataLinkEnd, Node, Param, ParamRef, ProcessVariable, Socket,
    SocketKind, SocketRef, TextElement,
};
use flowlane::{DecorationPolicy, Diagram, InteractionState, ProcessGraph};

fn order_process() -> ProcessGraph {
    let mut graph = ProcessGraph::new();
    graph
        .add_node(
            Node::new(Id::new("fetch"), "Fetch order")
                .with_socket(Socket::new(Id::new("in"), SocketKind::Entry))
                .with_socket(
                    Socket::new(Id::new("out"), SocketKind::Exit)
                        .with_param(Param::new(Id::new("order"))),
                ),
        )
        .expect("fresh node");
    graph
        .add_node(
            Node::new(Id::new("charge"), "Charge card")
                .with_socket(
                    Socket::new(Id::new("in"), SocketKind::Entry)
                        .with_param(Param::new(Id::new("amount")).with_expression("order.total")),
                )
                .with_socket(Socket::new(Id::new("out"), SocketKind::Exit)),
        )
        .expect("fresh node");
    graph
        .add_control_link(ControlLink::new(
            Id::new("flow1"),
            SocketRef::new(Id::new("fetch"), Id::new("out")),
            SocketRef::new(Id::new("charge"), Id::new("in")),
        ))
        .expect("valid link");
    graph
        .add_variable(ProcessVariable::new(Id::new("total")))
        .expect("fresh variable");
    graph
        .add_data_link(DataLink::new(
            Id::new("feed"),
            DataLinkEnd::Variable(Id::new("total")),
            DataLinkEnd::Param(ParamRef::new(
                Id::new("charge"),
                Id::new("in"),
                Id::new("amount"),
            )),
        ))
        .expect("valid link");
    graph.add_text(TextElement::new(Id::new("note"), "Manual review above 1000"));
    graph.set_geometry(Some("hline:140,600".to_string()));
    graph
}

#[test]
fn test_rebuild_and_query_round_trip() {
    let graph = order_process();
    let mut diagram = Diagram::default();

    let report = diagram.rebuild(&graph).expect("rebuild succeeds");
    assert_eq!(report.nodes(), 2);
    assert_eq!(report.control_links(), 1);
    assert_eq!(report.data_links(), 1);
    assert_eq!(report.text_elements(), 1);
    assert_eq!(report.dividers(), 1);
    assert!(report.is_fully_resolved());

    // Every graph node and text element has exactly one representation.
    for id in ["fetch", "charge"] {
        assert!(diagram.representation(EntityRef::Node(Id::new(id))).is_some());
    }
    assert!(diagram.representation(EntityRef::Text(Id::new("note"))).is_some());

    // Every element except dividers points back at a graph entity.
    for element in diagram.elements() {
        assert_eq!(element.entity().is_none(), element.kind().is_divider());
    }
}

#[test]
fn test_inconsistent_graph_does_not_abort_rebuild() {
    let mut graph = order_process();
    graph
        .add_control_link(ControlLink::new(
            Id::new("dangling"),
            SocketRef::new(Id::new("fetch"), Id::new("out")),
            SocketRef::new(Id::new("charge"), Id::new("missing")),
        ))
        .expect("node-level endpoints exist");

    let mut diagram = Diagram::default();
    let report = diagram.rebuild(&graph).expect("rebuild succeeds");

    assert_eq!(report.skipped_links(), &[Id::new("dangling")]);
    assert_eq!(report.control_links(), 1);
    // Everything after the bad link was still processed.
    assert_eq!(report.text_elements(), 1);
    assert_eq!(report.data_links(), 1);
}

#[test]
fn test_persist_round_trips_through_the_graph() {
    let mut graph = order_process();
    let mut diagram = Diagram::default();
    diagram.rebuild(&graph).expect("rebuild succeeds");

    diagram.add_divider(DividerLine::vertical(250.0, 480.0));
    diagram.persist(&mut graph).expect("persist succeeds");

    assert_eq!(graph.geometry(), Some("hline:140,600|vline:250,480"));
    assert!(graph.node(Id::new("fetch")).expect("node").geometry().is_some());

    // A fresh diagram built from the persisted graph shows the same lanes.
    let mut restored = Diagram::default();
    restored.rebuild(&graph).expect("rebuild succeeds");
    let dividers: Vec<String> = restored
        .dividers()
        .map(DividerLine::encode_geometry)
        .collect();
    assert_eq!(dividers, vec!["140,600".to_string(), "250,480".to_string()]);
}

#[test]
fn test_selection_decoration_over_the_public_surface() {
    let graph = order_process();
    let mut diagram = Diagram::default();
    diagram.rebuild(&graph).expect("rebuild succeeds");

    let node = diagram
        .representation(EntityRef::Node(Id::new("charge")))
        .expect("node representation");
    let socket = diagram
        .representation(EntityRef::Socket {
            node: Id::new("charge"),
            socket: Id::new("in"),
        })
        .expect("socket representation");
    let param = diagram
        .representation(EntityRef::Param {
            node: Id::new("charge"),
            socket: Id::new("in"),
            param: Id::new("amount"),
        })
        .expect("param representation");

    let mut state = InteractionState::new();
    state.select(node);

    let policy = DecorationPolicy::new(&diagram, &state);
    assert!(policy.fill_brightened(param));
    assert!(policy.is_socket_relative_selected(socket));
    assert!(policy.flow_connector_visible(socket));
    assert!(policy.expression_badge(param));
}
