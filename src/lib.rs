//! Taskboard: personal task management core.
//!
//! This crate provides owner-scoped task records with validated fields,
//! a single status rule for completion timestamps, one level of subtasks
//! with cascade deletion, and a deterministic display order.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`config`]: Store selection from the environment
//! - [`task`]: Task creation, status lifecycle, ordering, and deletion

pub mod config;
pub mod task;
