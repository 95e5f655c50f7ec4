use thiserror::Error;

use quarryfs_cluster::ClusterError;

#[derive(Debug, Error)]
pub enum MgmtError {
    /// A remote call failed. Always fatal to the aggregation round that
    /// issued it; never retried here.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Cluster data referenced an entity that does not exist, e.g. a
    /// monitored instance with no registered hostname.
    #[error("inconsistent cluster data: {reason}")]
    Inconsistent { reason: String },

    /// A remote query exceeded the configured per-query timeout.
    #[error("remote query timed out after {timeout_ms}ms")]
    QueryTimeout { timeout_ms: u64 },

    /// Caller requested a page window with a zero dimension.
    #[error("invalid page window: size {size}, page {page}")]
    InvalidPageWindow { size: u32, page: u32 },

    /// A fan-out round finished with fewer results than dispatched queries
    /// and no reported error. Indicates a lost worker, not remote failure.
    #[error("aggregation round incomplete: expected {expected} results, received {received}")]
    Incomplete { expected: usize, received: usize },
}

pub type Result<T> = std::result::Result<T, MgmtError>;
