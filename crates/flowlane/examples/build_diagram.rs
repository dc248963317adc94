//! Example: Synchronizing a diagram with a process graph
//!
//! This example builds a small order process programmatically, rebuilds
//! the diagram from it, inspects stacking and decoration, and persists
//! the geometry annotations back onto the graph.

use flowlane::divider::DividerLine;
use flowlane::element::EntityRef;
use flowlane::identifier::Id;
use flowlane::process::{
    ControlLink, DataLink, DataLinkEnd, Node, Param, ParamRef, ProcessVariable, Socket,
    SocketKind, SocketRef, TextElement,
};
use flowlane::{DecorationPolicy, Diagram, InteractionState, ProcessGraph};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Building process graph...\n");

    let mut graph = ProcessGraph::new();
    graph.add_node(
        Node::new(Id::new("fetch"), "Fetch order")
            .with_socket(Socket::new(Id::new("in"), SocketKind::Entry))
            .with_socket(
                Socket::new(Id::new("out"), SocketKind::Exit)
                    .with_param(Param::new(Id::new("order"))),
            ),
    )?;
    graph.add_node(
        Node::new(Id::new("charge"), "Charge card")
            .with_socket(
                Socket::new(Id::new("in"), SocketKind::Entry)
                    .with_param(Param::new(Id::new("amount")).with_expression("order.total")),
            )
            .with_socket(Socket::new(Id::new("out"), SocketKind::Exit)),
    )?;
    graph.add_control_link(ControlLink::new(
        Id::new("flow1"),
        SocketRef::new(Id::new("fetch"), Id::new("out")),
        SocketRef::new(Id::new("charge"), Id::new("in")),
    ))?;
    graph.add_variable(ProcessVariable::new(Id::new("total")))?;
    graph.add_data_link(DataLink::new(
        Id::new("feed"),
        DataLinkEnd::Variable(Id::new("total")),
        DataLinkEnd::Param(ParamRef::new(
            Id::new("charge"),
            Id::new("in"),
            Id::new("amount"),
        )),
    ))?;
    graph.add_text(TextElement::new(Id::new("note"), "Manual review above 1000"));
    graph.set_geometry(Some("hline:140,600".to_string()));

    // Rebuild the diagram from the graph.
    let mut diagram = Diagram::default();
    let report = diagram.rebuild(&graph)?;

    println!("Diagram rebuilt:");
    println!("  Nodes:         {}", report.nodes());
    println!("  Control links: {}", report.control_links());
    println!("  Data links:    {}", report.data_links());
    println!("  Text labels:   {}", report.text_elements());
    println!("  Dividers:      {}", report.dividers());
    println!("  Skipped links: {}", report.skipped_links().len());
    println!();

    // Stacking: connections front, nodes back.
    println!("Stacking (back to front):");
    let mut elements: Vec<_> = diagram
        .elements()
        .filter(|element| element.parent().is_none())
        .collect();
    elements.sort_by_key(|element| element.z_value());
    for element in elements {
        println!("  z={} {}", element.z_value(), element.kind().name());
    }
    println!();

    // Select the charge node and inspect the derived decoration.
    let node = diagram
        .representation(EntityRef::Node(Id::new("charge")))
        .expect("charge node is represented");
    let param = diagram
        .representation(EntityRef::Param {
            node: Id::new("charge"),
            socket: Id::new("in"),
            param: Id::new("amount"),
        })
        .expect("amount param is represented");

    let mut state = InteractionState::new();
    state.select(node);
    let policy = DecorationPolicy::new(&diagram, &state);

    println!("With the `charge` node selected:");
    println!("  param fill brightened: {}", policy.fill_brightened(param));
    println!("  param expression badge: {}", policy.expression_badge(param));
    println!();

    // Add a lane divider and persist everything back onto the graph.
    diagram.add_divider(DividerLine::vertical(250.0, 480.0));
    diagram.persist(&mut graph)?;

    println!("Persisted lane geometry: {:?}", graph.geometry());
    println!(
        "Persisted `fetch` bounds: {:?}",
        graph.node(Id::new("fetch")).and_then(Node::geometry)
    );

    Ok(())
}
