//! Plotgraph Core Types
//!
//! This crate provides the foundational types shared by the plotgraph crates:
//!
//! - **Identifiers**: string-interned node identifiers ([`identifier::Id`])
//! - **Document**: the in-memory XML element tree ([`document`] module)
//! - **Semantic**: nodes, edges and the story graph ([`semantic`] module)

pub mod document;
pub mod identifier;
pub mod semantic;
