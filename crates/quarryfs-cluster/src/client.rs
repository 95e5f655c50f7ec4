//! Client traits for the two remote collaborators of the management console.
//!
//! The console never talks wire protocols itself: it is handed one
//! [`MetaClient`] and one [`MetricClient`] at construction and issues every
//! remote query through them. Tests substitute scripted stubs; production
//! wires in the RPC and metrics-scrape implementations.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::records::{
    ChunkServerRecord, DiskDeviceMap, FileSystemMap, LogicalPool, PerformanceSample,
    PoolItemCounts, PoolSpaceSample, ServerRecord, ZoneRecord,
};

/// Query surface of the cluster's metadata service.
///
/// Each method is one independent remote call; any call may fail on its own
/// and the caller must treat the error as opaque.
#[async_trait]
pub trait MetaClient: Send + Sync + 'static {
    /// List every logical pool in the cluster.
    async fn list_logical_pools(&self) -> Result<Vec<LogicalPool>>;

    /// List the zones of one physical pool.
    async fn list_pool_zones(&self, physical_pool_id: u32) -> Result<Vec<ZoneRecord>>;

    /// List the servers registered in one zone.
    async fn list_zone_servers(&self, zone_id: u32) -> Result<Vec<ServerRecord>>;

    /// List the chunkservers hosted on one server.
    async fn list_chunk_servers(&self, server_id: u32) -> Result<Vec<ChunkServerRecord>>;

    /// Total allocated size under a directory tree, plus the per-pool-id
    /// breakdown. Used with the recycle-bin path to compute reclaimable
    /// space per pool.
    async fn allocated_size(&self, path: &str) -> Result<(u64, HashMap<u32, u64>)>;
}

/// Query surface of the cluster's metrics subsystem.
#[async_trait]
pub trait MetricClient: Send + Sync + 'static {
    /// Capacity and usage of one pool, by pool name.
    async fn pool_space(&self, pool_name: &str) -> Result<PoolSpaceSample>;

    /// Server/chunkserver/copyset counts of one pool, by pool name.
    async fn pool_item_counts(&self, pool_name: &str) -> Result<PoolItemCounts>;

    /// Recent performance series of one pool, oldest sample first.
    async fn pool_performance(&self, pool_name: &str) -> Result<Vec<PerformanceSample>>;

    /// Enumerate disk devices per monitored instance. An empty filter selects
    /// every instance.
    async fn list_disks(&self, instance_filter: &str) -> Result<DiskDeviceMap>;

    /// Filesystem type, mount point and space figures per device per
    /// instance. An empty filter selects every instance.
    async fn filesystem_info(&self, instance_filter: &str) -> Result<FileSystemMap>;

    /// Resolve a hostname to its monitored instance label. An empty hostname
    /// resolves to the empty (match-all) filter.
    async fn instance_of_host(&self, hostname: &str) -> Result<String>;

    /// Map instance labels back to hostnames. Instances unknown to the
    /// monitor are absent from the returned map.
    async fn hosts_of_instances(&self, instances: &[String]) -> Result<HashMap<String, String>>;
}
