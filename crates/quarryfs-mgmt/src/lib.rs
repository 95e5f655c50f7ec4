//! QuarryFS management subsystem: concurrent aggregation of cluster topology,
//! per-pool metrics and disk inventories for the operator console.

pub mod agent;
pub mod config;
pub mod disks;
pub mod error;
pub mod fanout;
pub mod paging;
pub mod pools;
pub mod topology;

pub use agent::Agent;
pub use error::{MgmtError, Result};
