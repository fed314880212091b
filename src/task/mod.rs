//! Task management for Taskboard.
//!
//! Tasks belong to exactly one owner and may carry subtasks one level deep.
//! Status changes go through a single rule that stamps the completion time on
//! entering `DONE` and clears it on leaving. Listings are returned in a stable
//! display order. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
