#![warn(missing_docs)]
//! Episode statistics and interface adapters for vectorized environments.
//!
//! A vectorized environment drives `N` independent slots at once. This crate
//! provides wrappers placed between such an environment, implementing
//! [`VecEnv`], and a training loop:
//!
//! * [`RecordEpisodeStatistics`] accumulates episode return and length per slot
//!   and reports the totals of finished episodes in [`EpisodeInfo`]. For games
//!   emitting a `lives` counter, an episode ends when all lives are exhausted
//!   rather than when the done flag fires.
//! * [`VecAdapter`] turns an environment reporting metadata as a mapping of
//!   arrays ([`InfoDict`]) into the two-phase [`SplitStep`] interface with
//!   per-slot metadata ([`SlotInfo`]), resetting finished slots automatically
//!   and keeping their terminal observations.
//!
//! The statistics algorithm is written once in [`EpisodeStats`] over the
//! [`EpisodeAccumulator`] abstraction. This crate implements it on host arrays
//! ([`NdarrayAccumulator`]); the `vecstat-tch` crate implements it on device
//! tensors.
pub mod adapter;
pub mod dummy;
pub mod error;
pub mod info;
pub mod stats;

mod base;
pub use base::{Act, Obs, RecvEnv, SplitStep, Step, VecEnv};

mod array;
pub use array::{NdarrayAct, NdarrayObs};

pub use adapter::VecAdapter;
pub use error::VecEnvError;
pub use info::{InfoDict, InfoValue, SlotInfo, SlotValue};
pub use stats::{
    EpisodeAccumulator, EpisodeInfo, EpisodeStats, NdarrayAccumulator, RecordEpisodeStatistics,
    RecordEpisodeStatisticsConfig,
};
