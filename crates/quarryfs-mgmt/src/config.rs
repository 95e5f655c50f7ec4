use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MgmtConfig {
    pub meta_addrs: Vec<String>,
    pub metric_addr: String,
    pub recycle_bin_dir: String,
    pub query_timeout_secs: u64,
}

impl Default for MgmtConfig {
    fn default() -> Self {
        Self {
            meta_addrs: Vec::new(),
            metric_addr: String::from("127.0.0.1:9090"),
            recycle_bin_dir: String::from("/RecycleBin"),
            query_timeout_secs: 30,
        }
    }
}

impl MgmtConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match ext.to_lowercase().as_str() {
            "toml" => {
                let config: MgmtConfig = toml::from_str(&contents)?;
                Ok(config)
            }
            "json" => {
                let config: MgmtConfig = serde_json::from_str(&contents)?;
                Ok(config)
            }
            _ => anyhow::bail!("Unsupported config file extension: {}", ext),
        }
    }
}
