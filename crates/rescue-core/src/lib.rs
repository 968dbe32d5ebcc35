//! Value types, configuration and collaborator traits shared by the `rescue-*` crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod cell;
pub mod config;
pub mod env;
pub mod error;
pub mod observation;

pub use action::{AgentAction, Direction};
pub use cell::{Cell, GridBounds};
pub use config::{MazeConfig, SearchConfig};
pub use env::{Challenge, MazeEnv, RiddleSolver, StepResponse};
pub use error::{RescueError, Result};
pub use observation::{Bearing, Observation};
