//! Per-host disk inventory: device enumeration joined with filesystem data.
//!
//! Assembly is keyed by (instance, device) while merging, then flattened and
//! handed to the paging finisher, which owns the (hostname, device) ordering
//! guarantee. An instance the monitor reports devices for but cannot map back
//! to a hostname is a data-integrity error, surfaced rather than skipped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use quarryfs_cluster::MetricClient;

use crate::error::{MgmtError, Result};
use crate::fanout;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub hostname: String,
    pub device: String,
    pub file_system: String,
    pub mount_point: String,
    pub space_total: u64,
    pub space_avail: u64,
}

/// Gather the unordered disk inventory, optionally restricted to one host.
pub(crate) async fn assemble<C: MetricClient>(
    metric: &Arc<C>,
    hostname: &str,
    timeout: Duration,
) -> Result<Vec<DiskInfo>> {
    let instance = fanout::single(metric.instance_of_host(hostname), timeout).await?;

    let devices = fanout::single(metric.list_disks(&instance), timeout).await?;
    let instances: Vec<String> = devices.keys().cloned().collect();
    let host_of = fanout::single(metric.hosts_of_instances(&instances), timeout).await?;

    let mut merged: HashMap<String, HashMap<String, DiskInfo>> = HashMap::new();
    for (inst, devs) in devices {
        let hostname = host_of
            .get(&inst)
            .ok_or_else(|| MgmtError::Inconsistent {
                reason: format!("instance {} has no registered hostname", inst),
            })?
            .clone();
        let by_device = merged.entry(inst).or_default();
        for dev in devs {
            by_device.insert(
                dev.clone(),
                DiskInfo {
                    hostname: hostname.clone(),
                    device: dev,
                    ..DiskInfo::default()
                },
            );
        }
    }

    // Filesystem entries for devices the enumeration did not report are
    // dropped; the enumeration is the source of truth for what exists.
    let filesystems = fanout::single(metric.filesystem_info(&instance), timeout).await?;
    for (inst, by_device) in filesystems {
        if let Some(known) = merged.get_mut(&inst) {
            for (dev, fs) in by_device {
                if let Some(disk) = known.get_mut(&dev) {
                    disk.file_system = fs.fs_type;
                    disk.mount_point = fs.mount_point;
                    disk.space_total = fs.space_total;
                    disk.space_avail = fs.space_avail;
                }
            }
        }
    }

    Ok(merged
        .into_values()
        .flat_map(HashMap::into_values)
        .collect())
}
