//! The agent's belief about maze connectivity and path search over it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod graph;
mod search;

pub use graph::WorldGraph;
