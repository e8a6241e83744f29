//! Data access layer for the node store.

mod node_repository;

pub use node_repository::NodeRepository;
