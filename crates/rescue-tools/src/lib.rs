//! Tooling for the rescue agent: step traces and a text rendering of the agent's beliefs.
//!
//! Nothing here mutates agent state. Renderers take borrowed snapshots.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod mind;
pub mod trace;

pub use mind::{render_mind, MindView};
pub use trace::{NullTraceSink, TraceEvent, TraceKind, TraceLog, TraceSink, Tracer, VecTraceSink};
