#![warn(missing_docs)]

//! QuarryFS cluster boundary: record types reported by the metadata service
//! and metrics subsystem, and the client traits the management console
//! consumes them through.

pub mod client;
pub mod error;
pub mod records;

pub use client::{MetaClient, MetricClient};
pub use error::{ClusterError, Result};
