//! Episode statistics of vectorized environments.
mod accumulator;
mod config;
mod ndarray_accumulator;
mod record;
pub use accumulator::{EpisodeAccumulator, EpisodeInfo, EpisodeStats};
pub use config::RecordEpisodeStatisticsConfig;
pub use ndarray_accumulator::NdarrayAccumulator;
pub use record::RecordEpisodeStatistics;
