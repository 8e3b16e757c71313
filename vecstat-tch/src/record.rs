//! Episode statistics on tensors.
use crate::{RecordEpisodeStatisticsTchConfig, TchAccumulator};
use anyhow::Result;
use log::{info, trace};
use tch::{Device, Tensor};
use vecstat_core::{EpisodeInfo, EpisodeStats, Step, VecEnv};

type StatsStep<E> = Step<E, EpisodeInfo<TchAccumulator, <E as VecEnv>::Info>>;

/// Records return and length of episodes of a vectorized environment
/// emitting tensors.
///
/// Statistics are kept in [`Tensor`]s on the given device, which must be the
/// device of the rewards and done flags of the environment. The done flag ends
/// an episode; lives are not taken into account.
pub struct RecordEpisodeStatisticsTch<E: VecEnv> {
    env: E,
    num_envs: usize,
    device: Device,
    stats: EpisodeStats<TchAccumulator>,
}

impl<E> RecordEpisodeStatisticsTch<E>
where
    E: VecEnv<Reward = Tensor, Done = Tensor>,
{
    /// Wraps an environment, accumulating statistics on `device`.
    pub fn new(env: E, device: Device) -> Result<Self> {
        let num_envs = env.num_envs();
        info!(
            "Records episode statistics of {} environments on {:?}",
            num_envs, device
        );

        let mut wrapper = Self {
            env,
            num_envs,
            device,
            stats: EpisodeStats::new(num_envs, &device)?,
        };
        wrapper.reset(false, None)?;
        Ok(wrapper)
    }

    /// Wraps an environment.
    pub fn with_config(env: E, config: RecordEpisodeStatisticsTchConfig) -> Result<Self> {
        Self::new(env, config.device.into())
    }

    /// Zero-fills the statistics of all slots.
    ///
    /// If `reset_env` is `true`, the environment is also reset with `ixs` and
    /// the observation is returned.
    pub fn reset(&mut self, reset_env: bool, ixs: Option<&[usize]>) -> Result<Option<E::Obs>> {
        trace!("RecordEpisodeStatisticsTch::reset()");
        self.stats = EpisodeStats::new(self.num_envs, &self.device)?;

        match reset_env {
            true => Ok(Some(self.env.reset(ixs)?)),
            false => Ok(None),
        }
    }

    /// Performs an environment step and records it.
    pub fn step(&mut self, a: &E::Act) -> Result<StatsStep<E>> {
        trace!("RecordEpisodeStatisticsTch::step()");
        let Step {
            obs,
            reward,
            is_done,
            info,
        } = self.env.step(a)?;
        let info = self.stats.record(&reward, &is_done, info)?;

        Ok(Step::new(obs, reward, is_done, info))
    }

    /// The number of slots.
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Device of the statistics.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Returns of the running episodes.
    pub fn episode_returns(&self) -> &Tensor {
        self.stats.running().returns()
    }

    /// Lengths of the running episodes.
    pub fn episode_lengths(&self) -> &Tensor {
        self.stats.running().lengths()
    }

    /// Returns reported at the last step.
    pub fn returned_episode_returns(&self) -> &Tensor {
        self.stats.returned().returns()
    }

    /// Lengths reported at the last step.
    pub fn returned_episode_lengths(&self) -> &Tensor {
        self.stats.returned().lengths()
    }

    /// The wrapped environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The wrapped environment.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Unwraps the environment.
    pub fn into_inner(self) -> E {
        self.env
    }
}
