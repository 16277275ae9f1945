//! Domain logic for YBoard: teacher assignments to promo modules.
//!
//! - [`rate`] -- effective hourly rate of a relation.
//! - [`workload`] -- coverage and cost figures per promo module.
//! - [`relation`] -- relation states, keys and inputs.
//! - [`relation_store`] -- storage seam for relations, plus an in-memory store.
//! - [`transition`] -- drag-and-drop moves between states.
//! - [`grouping`] / [`selection`] -- promo sections and the persisted selection.
//! - [`cv`] -- CV upload validation and storage.

pub mod cv;
pub mod error;
pub mod grouping;
pub mod promo;
pub mod rate;
pub mod relation;
pub mod relation_store;
pub mod roles;
pub mod selection;
pub mod transition;
pub mod types;
pub mod workload;
