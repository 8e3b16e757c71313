//! Core functionalities.
mod env;
mod step;
pub use env::{RecvEnv, SplitStep, VecEnv};
pub use step::Step;
use anyhow::Result;
use std::fmt::Debug;

/// A batch of observations, one for each slot of a vectorized environment.
///
/// The first axis of the underlying data is the slot axis.
pub trait Obs: Clone + Debug {
    /// Returns the number of observations in the object.
    fn len(&self) -> usize;

    /// Returns the observation of slot `ix` as a batch of length 1.
    fn slot(&self, ix: usize) -> Result<Self>;

    /// Overwrites slot `ix` with the first observation in `src`.
    ///
    /// `src` is typically the return value of a reset restricted to slot `ix`.
    fn set_slot(&mut self, ix: usize, src: &Self) -> Result<()>;
}

/// A batch of actions, one for each slot of a vectorized environment.
pub trait Act: Clone + Debug {
    /// Returns the number of actions in the object.
    fn len(&self) -> usize;
}
