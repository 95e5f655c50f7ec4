//! Records reported by the metadata service and the metrics subsystem.
//!
//! These are wire-level views: the management console copies what it needs
//! into its own aggregate types and never mutates a record in place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Allocation policy currently applied to a logical pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocateStatus {
    /// New space may be allocated from the pool.
    Allow,
    /// The pool is closed to new allocations.
    Deny,
}

/// Storage class of a logical pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolType {
    /// Random-access block volumes.
    PageFile,
    /// Append-only replicated volumes.
    AppendFile,
    /// Append-only erasure-coded volumes.
    AppendEcFile,
}

/// A logical pool as listed by the metadata service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogicalPool {
    /// Logical pool identifier.
    pub id: u32,
    /// Physical pool the logical pool is carved from.
    pub physical_pool_id: u32,
    /// Human-readable pool name, unique within the cluster.
    pub name: String,
    /// Storage class.
    pub pool_type: PoolType,
    /// Creation timestamp as reported by the metadata service.
    pub create_time: String,
    /// Whether the pool accepts new allocations.
    pub allocate_status: AllocateStatus,
    /// Whether background scrubbing is enabled.
    pub scan_enabled: bool,
}

/// A zone within a physical pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Zone identifier.
    pub id: u32,
    /// Zone name.
    pub name: String,
}

/// A server registered in a zone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Server identifier.
    pub id: u32,
    /// Hostname the server registered under.
    pub hostname: String,
    /// Cluster-internal address.
    pub internal_ip: String,
    /// Cluster-internal port.
    pub internal_port: u32,
    /// Client-facing address.
    pub external_ip: String,
    /// Client-facing port.
    pub external_port: u32,
}

/// Health of a chunkserver's backing disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiskState {
    /// Disk is healthy.
    Normal,
    /// Disk reported I/O errors.
    Error,
}

/// A chunkserver as reported by the metadata service.
///
/// Attached verbatim to its owning server in the topology view; the console
/// never interprets these fields beyond serializing them back out.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkServerRecord {
    /// Chunkserver identifier.
    pub id: u32,
    /// Disk medium, e.g. `nvme` or `hdd`.
    pub disk_type: String,
    /// Address the chunkserver serves on.
    pub host_ip: String,
    /// Port the chunkserver serves on.
    pub port: u32,
    /// Registration status string, e.g. `READWRITE`.
    pub status: String,
    /// Backing disk health.
    pub disk_state: DiskState,
    /// Whether the chunkserver currently holds a metadata-service lease.
    pub online: bool,
    /// Mount point of the backing disk.
    pub mount_point: String,
}

/// Capacity figures for one pool, in bytes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PoolSpaceSample {
    /// Raw capacity of the pool.
    pub total: u64,
    /// Bytes currently allocated.
    pub used: u64,
}

/// Entity counts for one pool.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PoolItemCounts {
    /// Servers contributing to the pool.
    pub servers: u64,
    /// Chunkservers contributing to the pool.
    pub chunkservers: u64,
    /// Copysets placed in the pool.
    pub copysets: u64,
}

/// One timestamped throughput measurement for a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Seconds since the epoch.
    pub timestamp: u64,
    /// Read operations per second.
    pub read_iops: u64,
    /// Write operations per second.
    pub write_iops: u64,
    /// Read throughput in bytes per second.
    pub read_bps: u64,
    /// Write throughput in bytes per second.
    pub write_bps: u64,
}

/// Filesystem figures for one mounted device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileSystemInfo {
    /// Filesystem type, e.g. `ext4`.
    pub fs_type: String,
    /// Mount point of the device.
    pub mount_point: String,
    /// Total filesystem size in bytes.
    pub space_total: u64,
    /// Available bytes.
    pub space_avail: u64,
}

/// Device names per monitored instance, as enumerated by the node exporter.
pub type DiskDeviceMap = HashMap<String, Vec<String>>;

/// Filesystem info per device per monitored instance.
pub type FileSystemMap = HashMap<String, HashMap<String, FileSystemInfo>>;
