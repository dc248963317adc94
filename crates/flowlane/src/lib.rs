//! Flowlane - A process diagram model.
//!
//! Flowlane keeps an in-memory visual diagram consistent with an
//! underlying process graph. It covers the model side of a process
//! modeler: element synchronization, swim-lane geometry persistence,
//! stacking order, and selection decoration. Rendering and input handling
//! stay with the embedding view layer.
//!
//! # Example
//!
//! ```
//! use flowlane::{Diagram, ProcessGraph};
//! use flowlane::identifier::Id;
//! use flowlane::process::{Node, Socket, SocketKind};
//!
//! let mut graph = ProcessGraph::new();
//! graph
//!     .add_node(
//!         Node::new(Id::new("review"), "Review order")
//!             .with_socket(Socket::new(Id::new("in"), SocketKind::Entry)),
//!     )
//!     .expect("fresh node id");
//!
//! let mut diagram = Diagram::default();
//! let report = diagram.rebuild(&graph).expect("rebuild");
//! assert_eq!(report.nodes(), 1);
//! ```

pub mod codec;
pub mod config;

mod decorate;
mod diagram;
mod error;
mod structure;
mod zorder;

pub use flowlane_core::{color, divider, element, geometry, identifier, process};

pub use decorate::{DecorationPolicy, FrameTreatment, InteractionState};
pub use diagram::{Diagram, SyncReport};
pub use error::FlowlaneError;
pub use structure::ProcessGraph;
pub use zorder::ZOrderClass;
