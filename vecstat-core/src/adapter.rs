//! Adapter to the two-phase step interface with per-slot information.
use crate::{
    error::VecEnvError,
    info::{InfoDict, SlotInfo},
    Obs, SplitStep, Step, VecEnv,
};
use anyhow::Result;
use log::{debug, trace};
use ndarray::Array1;

/// Presents a vectorized environment through [`SplitStep`].
///
/// The wrapped environment reports information as a mapping of arrays
/// ([`InfoDict`]); this adapter converts it into one [`SlotInfo`] per slot,
/// keeping array fields only. Slots whose episode is done are reset
/// immediately: the last observation of the episode is moved to
/// [`SlotInfo::terminal_observation`] and the observation of the slot is
/// replaced with the one after the reset.
///
/// The wrapped environment must support slot-restricted reset, see
/// [`VecEnv::reset`].
pub struct VecAdapter<E: VecEnv> {
    venv: E,
    num_envs: usize,
    actions: Option<E::Act>,
}

impl<E> VecAdapter<E>
where
    E: VecEnv<Done = Array1<bool>, Info = InfoDict>,
{
    /// Wraps an environment.
    pub fn new(venv: E) -> Self {
        let num_envs = venv.num_envs();
        debug!("VecAdapter with {} environments", num_envs);
        Self {
            venv,
            num_envs,
            actions: None,
        }
    }

    /// The wrapped environment.
    pub fn venv(&self) -> &E {
        &self.venv
    }

    /// Unwraps the environment.
    pub fn into_inner(self) -> E {
        self.venv
    }
}

impl<E> SplitStep for VecAdapter<E>
where
    E: VecEnv<Done = Array1<bool>, Info = InfoDict>,
{
    type Env = E;
    type Info = Vec<SlotInfo<E::Obs>>;

    fn num_envs(&self) -> usize {
        self.num_envs
    }

    fn reset(&mut self) -> Result<E::Obs> {
        trace!("VecAdapter::reset()");
        self.venv.reset(None)
    }

    fn step_async(&mut self, a: E::Act) {
        self.actions = Some(a);
    }

    fn step_wait(&mut self) -> Result<Step<E, Self::Info>> {
        trace!("VecAdapter::step_wait()");
        let a = self.actions.take().ok_or(VecEnvError::NoPendingAction)?;
        let Step {
            mut obs,
            reward,
            is_done,
            info,
        } = self.venv.step(&a)?;

        if is_done.len() != self.num_envs {
            return Err(VecEnvError::len_mismatch(self.num_envs, is_done.len()).into());
        }

        let mut infos = info.split(self.num_envs)?;
        for ix in 0..self.num_envs {
            if is_done[ix] {
                infos[ix].terminal_observation = Some(obs.slot(ix)?);
                let obs_reset = self.venv.reset(Some(&[ix][..]))?;
                obs.set_slot(ix, &obs_reset)?;
            }
        }

        Ok(Step::new(obs, reward, is_done, infos))
    }

    /// Does nothing; the seed of the environment is given to [`VecEnv::build`].
    fn seed(&mut self, seed: Option<u64>) {
        debug!("VecAdapter::seed({:?}) is ignored", seed);
    }
}
