//! Environment step.
use super::VecEnv;

/// Observation, reward and done flag of all slots after an environment step,
/// with some additional information.
///
/// The type of the information defaults to that of the environment. Wrappers
/// replace it with their own, e.g., [`EpisodeInfo`](crate::EpisodeInfo).
pub struct Step<E: VecEnv, I = <E as VecEnv>::Info> {
    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: E::Reward,

    /// Flag denoting if episode is done.
    pub is_done: E::Done,

    /// Information.
    pub info: I,
}

impl<E: VecEnv, I> Step<E, I> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, reward: E::Reward, is_done: E::Done, info: I) -> Self {
        Step {
            obs,
            reward,
            is_done,
            info,
        }
    }
}
