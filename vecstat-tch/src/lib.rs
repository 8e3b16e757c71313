//! Episode statistics on [tch](https://crates.io/crates/tch) tensors.
//!
//! [`RecordEpisodeStatisticsTch`] keeps return and length of episodes on the
//! device where the rest of the training pipeline lives, so that recording
//! statistics does not move data between host and device at every step. Unlike
//! [`vecstat_core::RecordEpisodeStatistics`], it does not take lives into
//! account; episodes end with the done flag.
mod accumulator;
mod config;
mod record;
use serde::{Deserialize, Serialize};
pub use accumulator::TchAccumulator;
pub use config::RecordEpisodeStatisticsTchConfig;
pub use record::RecordEpisodeStatisticsTch;

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device for using tch.
///
/// This enum is added because [`tch::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The main GPU device.
    Cuda(usize),
}

impl From<tch::Device> for Device {
    fn from(device: tch::Device) -> Self {
        match device {
            tch::Device::Cuda(n) => Self::Cuda(n),
            _ => Self::Cpu,
        }
    }
}

impl From<Device> for tch::Device {
    fn from(device: Device) -> Self {
        match device {
            Device::Cpu => tch::Device::Cpu,
            Device::Cuda(n) => tch::Device::Cuda(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Device;

    #[test]
    fn test_device_conversion() {
        let d: tch::Device = Device::Cuda(1).into();
        assert_eq!(d, tch::Device::Cuda(1));
        assert_eq!(Device::from(tch::Device::Cpu), Device::Cpu);
        assert_eq!(Device::from(tch::Device::Cuda(0)), Device::Cuda(0));
    }
}
