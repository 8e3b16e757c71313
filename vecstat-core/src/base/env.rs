//! Environment.
use super::{Act, Obs, Step};
use anyhow::Result;

/// Represents a vectorized environment driving a fixed number of slots.
pub trait VecEnv {
    /// Configurations.
    type Config: Clone;

    /// Observations of all slots.
    type Obs: Obs;

    /// Actions for all slots.
    type Act: Act;

    /// Rewards of all slots.
    type Reward;

    /// Done flags of all slots.
    type Done;

    /// Information in the [`Step`] object.
    type Info;

    /// Builds an environment with a given random seed.
    ///
    /// The seed can only be given here; wrappers do not reseed environments.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// The number of slots.
    fn num_envs(&self) -> usize {
        1
    }

    /// Resets the environment.
    ///
    /// If `ixs` is `None`, all slots are reset. Otherwise only the given slots
    /// are reset and the returned observation has one entry per index in `ixs`.
    /// Environments not supporting slot-restricted reset return an error.
    fn reset(&mut self, ixs: Option<&[usize]>) -> Result<Self::Obs>;

    /// Performs an environment step on all slots.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;
}

/// A vectorized environment driven by send/receive rather than by step.
pub trait RecvEnv: VecEnv {
    /// Sends actions to the environment without waiting for the result.
    fn send(&mut self, a: &Self::Act) -> Result<()>;

    /// Receives the result of the last actions sent.
    ///
    /// If `reset` is `true`, the batch is produced as a reset result. If
    /// `return_info` is `false`, the info is left empty.
    fn recv(&mut self, reset: bool, return_info: bool) -> Result<Step<Self>>
    where
        Self: Sized;
}

/// Two-phase step interface expected by generic vectorized-environment consumers.
///
/// `step_async()` hands actions over, `step_wait()` returns the result.
pub trait SplitStep {
    /// The wrapped environment.
    type Env: VecEnv;

    /// Information returned from [`SplitStep::step_wait`].
    type Info;

    /// The number of slots.
    fn num_envs(&self) -> usize;

    /// Resets all slots.
    fn reset(&mut self) -> Result<<Self::Env as VecEnv>::Obs>;

    /// Stores actions to be applied by the next [`SplitStep::step_wait`].
    fn step_async(&mut self, a: <Self::Env as VecEnv>::Act);

    /// Applies the stored actions and returns the result.
    fn step_wait(&mut self) -> Result<Step<Self::Env, Self::Info>>;

    /// Seeds the environment.
    fn seed(&mut self, seed: Option<u64>);

    /// Performs [`SplitStep::step_async`] and [`SplitStep::step_wait`] in a row.
    fn step(&mut self, a: <Self::Env as VecEnv>::Act) -> Result<Step<Self::Env, Self::Info>> {
        self.step_async(a);
        self.step_wait()
    }
}
