//! Flowlane Core Types and Definitions
//!
//! This crate provides the foundational types and definitions for the
//! Flowlane process-diagram model. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types and annotation codecs ([`geometry`] module)
//! - **Dividers**: Swim-lane divider lines ([`divider`] module)
//! - **Elements**: The diagram element model ([`element`] module)
//! - **Process**: Process-model vocabulary shared with the engine ([`process`] module)

pub mod color;
pub mod divider;
pub mod element;
pub mod geometry;
pub mod identifier;
pub mod process;
