//! Core services for traversal, queueing, batched writing, and progress

pub mod batch;
pub mod coordinator;
pub mod progress;
pub mod queue;
pub mod sink;
pub mod traverse;
