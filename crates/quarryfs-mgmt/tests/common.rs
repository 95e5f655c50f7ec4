//! Common test fixtures: a scripted in-process cluster implementing both
//! client traits, with per-call failure injection and response delays.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use quarryfs_cluster::records::{
    AllocateStatus, ChunkServerRecord, DiskDeviceMap, DiskState, FileSystemInfo, FileSystemMap,
    LogicalPool, PerformanceSample, PoolItemCounts, PoolSpaceSample, PoolType, ServerRecord,
    ZoneRecord,
};
use quarryfs_cluster::{ClusterError, MetaClient, MetricClient};

/// Calls that can be told to fail, identified by operation and key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FailPoint {
    PoolZones(u32),
    ZoneServers(u32),
    ChunkServers(u32),
    PoolSpace(String),
    PoolItemCounts(String),
    PoolPerformance(String),
    ListDisks,
}

#[derive(Default)]
pub struct StubCluster {
    pub pools: Vec<LogicalPool>,
    pub zones: HashMap<u32, Vec<ZoneRecord>>,
    pub servers: HashMap<u32, Vec<ServerRecord>>,
    pub chunk_servers: HashMap<u32, Vec<ChunkServerRecord>>,
    pub recyclable: HashMap<u32, u64>,
    pub space: HashMap<String, PoolSpaceSample>,
    pub counts: HashMap<String, PoolItemCounts>,
    pub performance: HashMap<String, Vec<PerformanceSample>>,
    pub devices: DiskDeviceMap,
    pub filesystems: FileSystemMap,
    pub host_of: HashMap<String, String>,
    pub fail_points: Vec<FailPoint>,
    /// Per-pool-name response delay, to force out-of-dispatch-order arrival.
    pub delay_ms: HashMap<String, u64>,
}

pub fn logical_pool(id: u32, physical: u32, name: &str) -> LogicalPool {
    LogicalPool {
        id,
        physical_pool_id: physical,
        name: name.to_string(),
        pool_type: PoolType::PageFile,
        create_time: "2023-02-15 10:00:00".to_string(),
        allocate_status: AllocateStatus::Allow,
        scan_enabled: true,
    }
}

pub fn zone(id: u32, name: &str) -> ZoneRecord {
    ZoneRecord {
        id,
        name: name.to_string(),
    }
}

pub fn server(id: u32, hostname: &str) -> ServerRecord {
    ServerRecord {
        id,
        hostname: hostname.to_string(),
        internal_ip: format!("10.0.0.{}", id),
        internal_port: 8200,
        external_ip: format!("192.168.0.{}", id),
        external_port: 8200,
    }
}

pub fn chunk_server(id: u32) -> ChunkServerRecord {
    ChunkServerRecord {
        id,
        disk_type: "nvme".to_string(),
        host_ip: "10.0.0.1".to_string(),
        port: 8200 + id,
        status: "READWRITE".to_string(),
        disk_state: DiskState::Normal,
        online: true,
        mount_point: format!("/data/cs{}", id),
    }
}

pub fn sample(timestamp: u64) -> PerformanceSample {
    PerformanceSample {
        timestamp,
        read_iops: 100,
        write_iops: 50,
        read_bps: 1 << 20,
        write_bps: 1 << 19,
    }
}

impl StubCluster {
    pub fn fail(mut self, point: FailPoint) -> Self {
        self.fail_points.push(point);
        self
    }

    pub fn add_disk(&mut self, inst: &str, host: &str, dev: &str) {
        self.devices
            .entry(inst.to_string())
            .or_default()
            .push(dev.to_string());
        self.host_of.insert(inst.to_string(), host.to_string());
    }

    pub fn add_filesystem(&mut self, inst: &str, dev: &str, fs_type: &str, total: u64, avail: u64) {
        self.filesystems
            .entry(inst.to_string())
            .or_default()
            .insert(
                dev.to_string(),
                FileSystemInfo {
                    fs_type: fs_type.to_string(),
                    mount_point: format!("/mnt/{}", dev),
                    space_total: total,
                    space_avail: avail,
                },
            );
    }

    fn check(&self, point: FailPoint) -> quarryfs_cluster::Result<()> {
        if self.fail_points.contains(&point) {
            return Err(ClusterError::Meta {
                op: "stub",
                msg: format!("injected failure at {:?}", point),
            });
        }
        Ok(())
    }

    async fn delay(&self, pool_name: &str) {
        if let Some(ms) = self.delay_ms.get(pool_name) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
    }
}

#[async_trait]
impl MetaClient for StubCluster {
    async fn list_logical_pools(&self) -> quarryfs_cluster::Result<Vec<LogicalPool>> {
        Ok(self.pools.clone())
    }

    async fn list_pool_zones(&self, physical_pool_id: u32) -> quarryfs_cluster::Result<Vec<ZoneRecord>> {
        self.check(FailPoint::PoolZones(physical_pool_id))?;
        Ok(self.zones.get(&physical_pool_id).cloned().unwrap_or_default())
    }

    async fn list_zone_servers(&self, zone_id: u32) -> quarryfs_cluster::Result<Vec<ServerRecord>> {
        self.check(FailPoint::ZoneServers(zone_id))?;
        Ok(self.servers.get(&zone_id).cloned().unwrap_or_default())
    }

    async fn list_chunk_servers(
        &self,
        server_id: u32,
    ) -> quarryfs_cluster::Result<Vec<ChunkServerRecord>> {
        self.check(FailPoint::ChunkServers(server_id))?;
        Ok(self.chunk_servers.get(&server_id).cloned().unwrap_or_default())
    }

    async fn allocated_size(&self, _path: &str) -> quarryfs_cluster::Result<(u64, HashMap<u32, u64>)> {
        Ok((self.recyclable.values().sum(), self.recyclable.clone()))
    }
}

#[async_trait]
impl MetricClient for StubCluster {
    async fn pool_space(&self, pool_name: &str) -> quarryfs_cluster::Result<PoolSpaceSample> {
        self.delay(pool_name).await;
        self.check(FailPoint::PoolSpace(pool_name.to_string()))?;
        Ok(self.space.get(pool_name).copied().unwrap_or_default())
    }

    async fn pool_item_counts(&self, pool_name: &str) -> quarryfs_cluster::Result<PoolItemCounts> {
        self.delay(pool_name).await;
        self.check(FailPoint::PoolItemCounts(pool_name.to_string()))?;
        Ok(self.counts.get(pool_name).copied().unwrap_or_default())
    }

    async fn pool_performance(
        &self,
        pool_name: &str,
    ) -> quarryfs_cluster::Result<Vec<PerformanceSample>> {
        self.delay(pool_name).await;
        self.check(FailPoint::PoolPerformance(pool_name.to_string()))?;
        Ok(self.performance.get(pool_name).cloned().unwrap_or_default())
    }

    async fn list_disks(&self, filter: &str) -> quarryfs_cluster::Result<DiskDeviceMap> {
        self.check(FailPoint::ListDisks)?;
        if filter.is_empty() {
            return Ok(self.devices.clone());
        }
        Ok(self
            .devices
            .iter()
            .filter(|(inst, _)| inst.as_str() == filter)
            .map(|(inst, devs)| (inst.clone(), devs.clone()))
            .collect())
    }

    async fn filesystem_info(&self, filter: &str) -> quarryfs_cluster::Result<FileSystemMap> {
        if filter.is_empty() {
            return Ok(self.filesystems.clone());
        }
        Ok(self
            .filesystems
            .iter()
            .filter(|(inst, _)| inst.as_str() == filter)
            .map(|(inst, by_dev)| (inst.clone(), by_dev.clone()))
            .collect())
    }

    async fn instance_of_host(&self, hostname: &str) -> quarryfs_cluster::Result<String> {
        if hostname.is_empty() {
            return Ok(String::new());
        }
        self.host_of
            .iter()
            .find(|(_, host)| host.as_str() == hostname)
            .map(|(inst, _)| inst.clone())
            .ok_or_else(|| ClusterError::Metric {
                target: hostname.to_string(),
                msg: "unknown host".to_string(),
            })
    }

    async fn hosts_of_instances(
        &self,
        instances: &[String],
    ) -> quarryfs_cluster::Result<HashMap<String, String>> {
        Ok(instances
            .iter()
            .filter_map(|inst| self.host_of.get(inst).map(|h| (inst.clone(), h.clone())))
            .collect())
    }
}
