//! Episode statistics on host arrays.
use super::{EpisodeInfo, EpisodeStats, NdarrayAccumulator, RecordEpisodeStatisticsConfig};
use crate::{error::VecEnvError, info::InfoDict, RecvEnv, Step, VecEnv};
use anyhow::Result;
use log::{debug, info, trace};
use ndarray::Array1;

type StatsStep<E> = Step<E, EpisodeInfo<NdarrayAccumulator, InfoDict>>;

/// Records return and length of episodes of a vectorized environment.
///
/// Every step returned from [`RecordEpisodeStatistics::step`] carries
/// [`EpisodeInfo`] with the return and length of the running episodes of all
/// slots. At the step where the episode of a slot ends, they are the totals of
/// that episode; the slot starts from zero at the next step.
///
/// # Lives
///
/// Some games, e.g., Atari, set the done flag every time a life is lost. If the
/// environment reports remaining lives in its info and their sum is positive at
/// the first step, an episode is considered finished only when the lives of the
/// slot reach zero. This decision is made once and kept for the lifetime of the
/// wrapper.
///
/// # Pull-based environments
///
/// For environments implementing [`RecvEnv`], [`RecordEpisodeStatistics::recv`]
/// records the results received from the environment in the same way.
pub struct RecordEpisodeStatistics<E: VecEnv> {
    env: E,
    num_envs: usize,
    stats: EpisodeStats<NdarrayAccumulator>,
    has_lives: Option<bool>,
    config: RecordEpisodeStatisticsConfig,
}

impl<E> RecordEpisodeStatistics<E>
where
    E: VecEnv<Reward = Array1<f32>, Done = Array1<bool>, Info = InfoDict>,
{
    /// Wraps an environment with the default configuration.
    pub fn new(env: E) -> Result<Self> {
        Self::with_config(env, RecordEpisodeStatisticsConfig::default())
    }

    /// Wraps an environment.
    ///
    /// The environment is not reset here.
    pub fn with_config(env: E, config: RecordEpisodeStatisticsConfig) -> Result<Self> {
        let num_envs = env.num_envs();
        info!("Records episode statistics of {} environments", num_envs);

        let mut wrapper = Self {
            env,
            num_envs,
            stats: EpisodeStats::new(num_envs, &())?,
            has_lives: None,
            config,
        };
        wrapper.reset(false, None)?;
        Ok(wrapper)
    }

    /// Zero-fills the statistics of all slots.
    ///
    /// If `reset_env` is `true`, the environment is also reset with `ixs` and
    /// the observation is returned. Otherwise the environment is untouched and
    /// `None` is returned.
    pub fn reset(&mut self, reset_env: bool, ixs: Option<&[usize]>) -> Result<Option<E::Obs>> {
        trace!("RecordEpisodeStatistics::reset()");
        self.stats = EpisodeStats::new(self.num_envs, &())?;

        match reset_env {
            true => Ok(Some(self.env.reset(ixs)?)),
            false => Ok(None),
        }
    }

    /// Performs an environment step and records it.
    pub fn step(&mut self, a: &E::Act) -> Result<StatsStep<E>> {
        trace!("RecordEpisodeStatistics::step()");
        let step = self.env.step(a)?;
        self.record_step(step)
    }

    fn record_step(&mut self, step: Step<E>) -> Result<StatsStep<E>> {
        let mask = match self.has_lives(&step.info)? {
            true => self.lives_exhausted(&step.info)?,
            false => step.is_done.clone(),
        };
        let Step {
            obs,
            reward,
            is_done,
            info,
        } = step;
        let info = self.stats.record(&reward, &mask, info)?;

        Ok(Step::new(obs, reward, is_done, info))
    }

    // Decided at the first step and never changed.
    fn has_lives(&mut self, info: &InfoDict) -> Result<bool> {
        if let Some(has_lives) = self.has_lives {
            return Ok(has_lives);
        }

        let has_lives = self.config.detect_lives
            && match info.numeric(&self.config.lives_key, self.num_envs)? {
                Some(lives) => lives.sum() > 0.0,
                None => false,
            };
        debug!("has_lives = {}", has_lives);
        self.has_lives = Some(has_lives);

        Ok(has_lives)
    }

    fn lives_exhausted(&self, info: &InfoDict) -> Result<Array1<bool>> {
        let key = &self.config.lives_key;
        let lives = info
            .numeric(key, self.num_envs)?
            .ok_or_else(|| VecEnvError::InfoKeyError(key.clone()))?;
        Ok(lives.mapv(|l| l == 0.0))
    }

    /// Returns `Some(true)` if episodes end when lives are exhausted,
    /// `None` before the first step.
    pub fn lives_detected(&self) -> Option<bool> {
        self.has_lives
    }

    /// The number of slots.
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Returns of the running episodes.
    pub fn episode_returns(&self) -> &Array1<f32> {
        self.stats.running().returns()
    }

    /// Lengths of the running episodes.
    pub fn episode_lengths(&self) -> &Array1<i32> {
        self.stats.running().lengths()
    }

    /// Returns reported at the last step.
    pub fn returned_episode_returns(&self) -> &Array1<f32> {
        self.stats.returned().returns()
    }

    /// Lengths reported at the last step.
    pub fn returned_episode_lengths(&self) -> &Array1<i32> {
        self.stats.returned().lengths()
    }

    /// Configuration.
    pub fn config(&self) -> &RecordEpisodeStatisticsConfig {
        &self.config
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

impl<E> RecordEpisodeStatistics<E>
where
    E: RecvEnv + VecEnv<Reward = Array1<f32>, Done = Array1<bool>, Info = InfoDict>,
{
    /// Sends actions to the environment.
    pub fn send(&mut self, a: &E::Act) -> Result<()> {
        trace!("RecordEpisodeStatistics::send()");
        self.env.send(a)
    }

    /// Receives results from the environment and records them.
    pub fn recv(&mut self, reset: bool, return_info: bool) -> Result<StatsStep<E>> {
        trace!("RecordEpisodeStatistics::recv()");
        let step = self.env.recv(reset, return_info)?;
        self.record_step(step)
    }
}
