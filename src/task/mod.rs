//! Task board management.
//!
//! Tasks are created, edited, deleted and moved one step at a time along an
//! ordered status workflow. The full collection is written to storage after
//! every successful change, and storage failures degrade to warnings rather
//! than errors. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
