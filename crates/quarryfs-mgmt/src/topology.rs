//! Four-level topology view: pool, zone, server, chunkserver.
//!
//! The tree is rebuilt from scratch on every request. Resolution is strictly
//! level by level: all zones for all pools in one fan-out round, then all
//! servers for all zones, then all chunkservers for all servers. A round's
//! width is exactly the number of parents the previous round discovered, and
//! no round starts before the previous one has fully resolved. The first
//! failure at any level discards the whole tree.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use quarryfs_cluster::records::{ChunkServerRecord, LogicalPool, PoolType, ServerRecord, ZoneRecord};
use quarryfs_cluster::MetaClient;

use crate::error::Result;
use crate::fanout;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pool {
    pub id: u32,
    pub physical_pool_id: u32,
    pub name: String,
    pub pool_type: PoolType,
    pub zones: Vec<Zone>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    pub servers: Vec<Server>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Server {
    pub id: u32,
    pub hostname: String,
    pub internal_ip: String,
    pub internal_port: u32,
    pub external_ip: String,
    pub external_port: u32,
    pub chunk_servers: Vec<ChunkServerRecord>,
}

impl Pool {
    fn from_record(record: &LogicalPool) -> Self {
        Self {
            id: record.id,
            physical_pool_id: record.physical_pool_id,
            name: record.name.clone(),
            pool_type: record.pool_type,
            zones: Vec::new(),
        }
    }
}

impl Zone {
    fn from_record(record: ZoneRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            servers: Vec::new(),
        }
    }
}

impl Server {
    fn from_record(record: ServerRecord) -> Self {
        Self {
            id: record.id,
            hostname: record.hostname,
            internal_ip: record.internal_ip,
            internal_port: record.internal_port,
            external_ip: record.external_ip,
            external_port: record.external_port,
            chunk_servers: Vec::new(),
        }
    }
}

/// One fan-out round over all pools: fetch each pool's zones.
async fn fetch_zones<M: MetaClient>(
    meta: &Arc<M>,
    pools: &mut [Pool],
    timeout: Duration,
) -> Result<()> {
    let queries: Vec<_> = pools
        .iter()
        .map(|pool| {
            let meta = Arc::clone(meta);
            let id = pool.physical_pool_id;
            async move { meta.list_pool_zones(id).await }
        })
        .collect();

    let gathered = fanout::gather(queries, timeout).await?;
    for (pool, zones) in pools.iter_mut().zip(gathered) {
        pool.zones = zones.into_iter().map(Zone::from_record).collect();
    }
    Ok(())
}

/// One fan-out round over all zones of all pools: fetch each zone's servers.
///
/// Slots are (pool, zone) index paths captured before dispatch, so a result
/// always lands in the zone it was dispatched for, whatever order results
/// arrive in.
async fn fetch_servers<M: MetaClient>(
    meta: &Arc<M>,
    pools: &mut [Pool],
    timeout: Duration,
) -> Result<()> {
    let mut paths = Vec::new();
    let mut queries = Vec::new();
    for (pi, pool) in pools.iter().enumerate() {
        for (zi, zone) in pool.zones.iter().enumerate() {
            paths.push((pi, zi));
            let meta = Arc::clone(meta);
            let id = zone.id;
            queries.push(async move { meta.list_zone_servers(id).await });
        }
    }

    let gathered = fanout::gather(queries, timeout).await?;
    for ((pi, zi), servers) in paths.into_iter().zip(gathered) {
        pools[pi].zones[zi].servers = servers.into_iter().map(Server::from_record).collect();
    }
    Ok(())
}

/// One fan-out round over all servers of all zones of all pools: fetch each
/// server's chunkservers, attached verbatim.
async fn fetch_chunk_servers<M: MetaClient>(
    meta: &Arc<M>,
    pools: &mut [Pool],
    timeout: Duration,
) -> Result<()> {
    let mut paths = Vec::new();
    let mut queries = Vec::new();
    for (pi, pool) in pools.iter().enumerate() {
        for (zi, zone) in pool.zones.iter().enumerate() {
            for (si, server) in zone.servers.iter().enumerate() {
                paths.push((pi, zi, si));
                let meta = Arc::clone(meta);
                let id = server.id;
                queries.push(async move { meta.list_chunk_servers(id).await });
            }
        }
    }

    let gathered = fanout::gather(queries, timeout).await?;
    for ((pi, zi, si), chunk_servers) in paths.into_iter().zip(gathered) {
        pools[pi].zones[zi].servers[si].chunk_servers = chunk_servers;
    }
    Ok(())
}

/// Resolve the full topology tree, level by level.
pub(crate) async fn assemble<M: MetaClient>(meta: &Arc<M>, timeout: Duration) -> Result<Vec<Pool>> {
    let records = fanout::single(meta.list_logical_pools(), timeout).await?;
    let mut pools: Vec<Pool> = records.iter().map(Pool::from_record).collect();

    fetch_zones(meta, &mut pools, timeout).await?;
    fetch_servers(meta, &mut pools, timeout).await?;
    fetch_chunk_servers(meta, &mut pools, timeout).await?;
    Ok(pools)
}
