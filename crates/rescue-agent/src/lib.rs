//! The rescue agent: goal localisation, the per-step controller, and an episode driver.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod controller;
pub mod episode;
pub mod locator;

pub use controller::AgentController;
pub use episode::{run_episode, EpisodeReport};
pub use locator::{reading_cells, GoalLocator, LocatorUpdate};
