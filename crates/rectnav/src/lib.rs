//! Continuous-space route planning and waypoint following around rectangular obstacles.
//!
//! Data flows one way: [`ValidityOracle`] -> [`PathSearch`] -> [`simplify`] ->
//! [`NavController`], which moves a [`NavAgent`] once per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod math;
pub mod obstacle;
pub mod route;
pub mod search;
pub mod simplify;
pub mod validity;

pub use agent::{NavAgent, SimAgent};
pub use config::{Heuristic, NavConfig, SearchConfig};
pub use controller::{NavController, NavState, NavStatus};
pub use error::PlanError;
pub use math::{Cell, Vec2};
pub use obstacle::{nearest_hit, segment_intersection_t, Obstacle, RectObstacle};
pub use route::Route;
pub use search::{PathSearch, SearchNode, SearchScratch};
pub use simplify::{has_line_of_sight, simplify};
pub use validity::{ValidityOracle, WorldBounds};
