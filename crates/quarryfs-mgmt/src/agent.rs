//! Console-facing facade over the aggregation pipelines.
//!
//! The agent owns explicit client handles for the metadata service and the
//! metrics subsystem; there is no process-wide connection state. Every
//! resolve rebuilds its view from scratch and returns either the complete
//! view or the first error the round observed, never partial data.

use std::sync::Arc;
use std::time::Duration;

use crate::config::MgmtConfig;
use crate::disks::{self, DiskInfo};
use crate::error::Result;
use crate::paging;
use crate::pools::{self, PoolInfo};
use crate::topology::{self, Pool};

use quarryfs_cluster::{MetaClient, MetricClient};

pub struct Agent<M, C> {
    meta: Arc<M>,
    metric: Arc<C>,
    config: MgmtConfig,
}

impl<M: MetaClient, C: MetricClient> Agent<M, C> {
    pub fn new(meta: Arc<M>, metric: Arc<C>) -> Self {
        Self::with_config(meta, metric, MgmtConfig::default())
    }

    pub fn with_config(meta: Arc<M>, metric: Arc<C>, config: MgmtConfig) -> Self {
        Self { meta, metric, config }
    }

    pub fn config(&self) -> &MgmtConfig {
        &self.config
    }

    fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.config.query_timeout_secs)
    }

    /// Resolve the pool/zone/server/chunkserver tree.
    pub async fn resolve_topology(&self) -> Result<Vec<Pool>> {
        let pools = topology::assemble(&self.meta, self.query_timeout())
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "topology resolution failed");
                err
            })?;
        tracing::info!(pools = pools.len(), "topology resolved");
        Ok(pools)
    }

    /// Resolve the dashboard view of every logical pool.
    pub async fn resolve_logical_pools(&self) -> Result<Vec<PoolInfo>> {
        let infos = pools::assemble(
            &self.meta,
            &self.metric,
            &self.config.recycle_bin_dir,
            self.query_timeout(),
        )
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "logical pool resolution failed");
            err
        })?;
        tracing::info!(pools = infos.len(), "logical pools resolved");
        Ok(infos)
    }

    /// Resolve the disk inventory, sorted by (hostname, device) and windowed
    /// to the requested 1-based page. An empty `hostname` selects all hosts.
    pub async fn resolve_disks(
        &self,
        page_size: u32,
        page_number: u32,
        hostname: &str,
    ) -> Result<Vec<DiskInfo>> {
        // Contract check before any remote work.
        paging::check_window(page_size, page_number)?;

        let gathered = disks::assemble(&self.metric, hostname, self.query_timeout())
            .await
            .map_err(|err| {
                tracing::warn!(hostname, error = %err, "disk resolution failed");
                err
            })?;
        tracing::info!(disks = gathered.len(), hostname, "disks resolved");
        paging::sort_and_window(
            gathered,
            |d| (d.hostname.clone(), d.device.clone()),
            page_size,
            page_number,
        )
    }
}
