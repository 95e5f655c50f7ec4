//! Error type shared by the metadata-service and metrics clients.

use thiserror::Error;

/// Failure of a single remote call against the cluster.
///
/// The management console treats every variant as opaque: a failed call is
/// fatal to the aggregation round that issued it and is propagated unchanged.
#[derive(Debug, Clone, Error)]
pub enum ClusterError {
    /// The metadata service rejected or failed the request.
    #[error("metadata service error for {op}: {msg}")]
    Meta {
        /// Operation that failed, e.g. `ListPoolZones`.
        op: &'static str,
        /// Remote-reported failure detail.
        msg: String,
    },

    /// The metrics subsystem rejected or failed the query.
    #[error("metric query error for {target}: {msg}")]
    Metric {
        /// Pool name or instance the query addressed.
        target: String,
        /// Remote-reported failure detail.
        msg: String,
    },

    /// The remote endpoint could not be reached at all.
    #[error("cluster endpoint unreachable: {addr}")]
    Unreachable {
        /// Address of the endpoint that did not answer.
        addr: String,
    },

    /// The remote answered with something the client could not decode.
    #[error("malformed response from {op}: {reason}")]
    MalformedResponse {
        /// Operation whose response failed to decode.
        op: &'static str,
        /// Decode failure detail.
        reason: String,
    },
}

/// Result alias for cluster client calls.
pub type Result<T> = std::result::Result<T, ClusterError>;
