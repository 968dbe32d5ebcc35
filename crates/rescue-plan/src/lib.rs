//! Orders the visits to remaining goals before heading for the exit.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod route;

pub use route::{representatives, Route, RoutePlanner};
