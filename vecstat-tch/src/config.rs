//! Configuration of [`RecordEpisodeStatisticsTch`](super::RecordEpisodeStatisticsTch).
use crate::Device;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`RecordEpisodeStatisticsTch`](super::RecordEpisodeStatisticsTch).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RecordEpisodeStatisticsTchConfig {
    /// Device on which returns and lengths are accumulated.
    pub device: Device,
}

impl Default for RecordEpisodeStatisticsTchConfig {
    fn default() -> Self {
        Self {
            device: Device::Cpu,
        }
    }
}

impl RecordEpisodeStatisticsTchConfig {
    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Constructs [`RecordEpisodeStatisticsTchConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RecordEpisodeStatisticsTchConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_config() -> Result<()> {
        let config = RecordEpisodeStatisticsTchConfig::default().device(Device::Cuda(1));

        let dir = TempDir::new("record_episode_statistics_tch")?;
        let path = dir.path().join("config.yaml");
        config.save(&path)?;
        let config_ = RecordEpisodeStatisticsTchConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
