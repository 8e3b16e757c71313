//! Configuration of [`RecordEpisodeStatistics`](super::RecordEpisodeStatistics).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`RecordEpisodeStatistics`](super::RecordEpisodeStatistics).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RecordEpisodeStatisticsConfig {
    /// Key of the remaining lives in the info of the environment.
    pub lives_key: String,

    /// If `false`, lives are ignored and episodes end with the done flag.
    pub detect_lives: bool,
}

impl Default for RecordEpisodeStatisticsConfig {
    fn default() -> Self {
        Self {
            lives_key: "lives".to_string(),
            detect_lives: true,
        }
    }
}

impl RecordEpisodeStatisticsConfig {
    /// Sets the key of the remaining lives.
    pub fn lives_key(mut self, v: impl Into<String>) -> Self {
        self.lives_key = v.into();
        self
    }

    /// Sets if lives are taken into account.
    pub fn detect_lives(mut self, v: bool) -> Self {
        self.detect_lives = v;
        self
    }

    /// Constructs [`RecordEpisodeStatisticsConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RecordEpisodeStatisticsConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
