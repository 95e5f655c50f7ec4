//! Dashboard view of logical pools: capacity, entity counts, performance.
//!
//! Built from the same pool listing as the topology tree but by an
//! independent pipeline; the two views are never synchronized after
//! construction. Each metric round fans out across all pools by pool name and
//! writes into the slot captured at dispatch time, so pools resolving out of
//! dispatch order can never swap figures.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use quarryfs_cluster::records::{AllocateStatus, LogicalPool, PerformanceSample, PoolType};
use quarryfs_cluster::{MetaClient, MetricClient};

use crate::error::Result;
use crate::fanout;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PoolSpace {
    pub total: u64,
    pub alloc: u64,
    pub recyclable: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolInfo {
    pub id: u32,
    pub physical_pool_id: u32,
    pub name: String,
    pub pool_type: PoolType,
    pub create_time: String,
    pub allocate_status: AllocateStatus,
    pub scan_enabled: bool,
    pub space: PoolSpace,
    pub server_count: u64,
    pub chunk_server_count: u64,
    pub copyset_count: u64,
    pub performance: Vec<PerformanceSample>,
}

impl PoolInfo {
    fn from_record(record: &LogicalPool) -> Self {
        Self {
            id: record.id,
            physical_pool_id: record.physical_pool_id,
            name: record.name.clone(),
            pool_type: record.pool_type,
            create_time: record.create_time.clone(),
            allocate_status: record.allocate_status,
            scan_enabled: record.scan_enabled,
            space: PoolSpace::default(),
            server_count: 0,
            chunk_server_count: 0,
            copyset_count: 0,
            performance: Vec::new(),
        }
    }
}

async fn fill_item_counts<C: MetricClient>(
    metric: &Arc<C>,
    infos: &mut [PoolInfo],
    timeout: Duration,
) -> Result<()> {
    let queries: Vec<_> = infos
        .iter()
        .map(|info| {
            let metric = Arc::clone(metric);
            let name = info.name.clone();
            async move { metric.pool_item_counts(&name).await }
        })
        .collect();

    let gathered = fanout::gather(queries, timeout).await?;
    for (info, counts) in infos.iter_mut().zip(gathered) {
        info.server_count = counts.servers;
        info.chunk_server_count = counts.chunkservers;
        info.copyset_count = counts.copysets;
    }
    Ok(())
}

/// Fill capacity figures. The reclaimable-space map is fetched once for the
/// whole request, keyed by pool id, then indexed per slot; the per-pool
/// space queries fan out as usual.
async fn fill_space<M: MetaClient, C: MetricClient>(
    meta: &Arc<M>,
    metric: &Arc<C>,
    recycle_bin_dir: &str,
    infos: &mut [PoolInfo],
    timeout: Duration,
) -> Result<()> {
    let (_, recyclable_by_pool) =
        fanout::single(meta.allocated_size(recycle_bin_dir), timeout).await?;

    let queries: Vec<_> = infos
        .iter()
        .map(|info| {
            let metric = Arc::clone(metric);
            let name = info.name.clone();
            async move { metric.pool_space(&name).await }
        })
        .collect();

    let gathered = fanout::gather(queries, timeout).await?;
    for (info, space) in infos.iter_mut().zip(gathered) {
        info.space.total = space.total;
        info.space.alloc = space.used;
        info.space.recyclable = recyclable_by_pool.get(&info.id).copied().unwrap_or(0);
    }
    Ok(())
}

async fn fill_performance<C: MetricClient>(
    metric: &Arc<C>,
    infos: &mut [PoolInfo],
    timeout: Duration,
) -> Result<()> {
    let queries: Vec<_> = infos
        .iter()
        .map(|info| {
            let metric = Arc::clone(metric);
            let name = info.name.clone();
            async move { metric.pool_performance(&name).await }
        })
        .collect();

    let gathered = fanout::gather(queries, timeout).await?;
    for (info, samples) in infos.iter_mut().zip(gathered) {
        // Samples are concatenated in source order, never merged.
        info.performance.extend(samples);
    }
    Ok(())
}

/// Resolve the dashboard view of every logical pool.
pub(crate) async fn assemble<M: MetaClient, C: MetricClient>(
    meta: &Arc<M>,
    metric: &Arc<C>,
    recycle_bin_dir: &str,
    timeout: Duration,
) -> Result<Vec<PoolInfo>> {
    let records = fanout::single(meta.list_logical_pools(), timeout).await?;
    let mut infos: Vec<PoolInfo> = records.iter().map(PoolInfo::from_record).collect();

    fill_item_counts(metric, &mut infos, timeout).await?;
    fill_space(meta, metric, recycle_bin_dir, &mut infos, timeout).await?;
    fill_performance(metric, &mut infos, timeout).await?;
    Ok(infos)
}
