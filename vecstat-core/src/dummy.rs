//! This module is used for tests.
//!
//! [`ScriptedVecEnv`] replays rewards, done flags and lives given in its
//! configuration. Observations encode the step count and the slot index, which
//! makes it easy to check where observations of a batch come from:
//!
//! * after the `t`-th step (1-based), every element of the observation of slot
//!   `i` is [`ScriptedVecEnv::obs_value`]`(t, i)`,
//! * after a reset, every element of the observation of slot `i` is
//!   [`ScriptedVecEnv::reset_value`]`(i)`.
use crate::{
    error::VecEnvError,
    info::{InfoDict, InfoValue},
    Act, NdarrayAct, NdarrayObs, RecvEnv, Step, VecEnv,
};
use anyhow::Result;
use log::trace;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Configuration of [`ScriptedVecEnv`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ScriptedVecEnvConfig {
    /// The number of slots.
    pub num_envs: usize,

    /// Dimension of the observation of a slot.
    pub obs_dim: usize,

    /// Rewards at each step, `rewards[t][i]` is for slot `i`.
    pub rewards: Vec<Vec<f32>>,

    /// Done flags at each step.
    pub dones: Vec<Vec<bool>>,

    /// Remaining lives at each step, not reported if `None`.
    pub lives: Option<Vec<Vec<i32>>>,

    /// If `false`, slot-restricted reset fails.
    pub slot_reset: bool,
}

impl Default for ScriptedVecEnvConfig {
    fn default() -> Self {
        Self {
            num_envs: 1,
            obs_dim: 1,
            rewards: vec![],
            dones: vec![],
            lives: None,
            slot_reset: true,
        }
    }
}

impl ScriptedVecEnvConfig {
    /// Sets the number of slots.
    pub fn num_envs(mut self, v: usize) -> Self {
        self.num_envs = v;
        self
    }

    /// Sets the dimension of observations.
    pub fn obs_dim(mut self, v: usize) -> Self {
        self.obs_dim = v;
        self
    }

    /// Sets rewards.
    pub fn rewards(mut self, v: Vec<Vec<f32>>) -> Self {
        self.rewards = v;
        self
    }

    /// Sets done flags.
    pub fn dones(mut self, v: Vec<Vec<bool>>) -> Self {
        self.dones = v;
        self
    }

    /// Sets remaining lives.
    pub fn lives(mut self, v: Option<Vec<Vec<i32>>>) -> Self {
        self.lives = v;
        self
    }

    /// Sets if slot-restricted reset is supported.
    pub fn slot_reset(mut self, v: bool) -> Self {
        self.slot_reset = v;
        self
    }

    fn check(&self) -> Result<()> {
        let n_steps = self.rewards.len();
        if self.dones.len() != n_steps {
            return Err(VecEnvError::len_mismatch(n_steps, self.dones.len()).into());
        }
        if let Some(lives) = &self.lives {
            if lives.len() != n_steps {
                return Err(VecEnvError::len_mismatch(n_steps, lives.len()).into());
            }
            if let Some(v) = lives.iter().find(|v| v.len() != self.num_envs) {
                return Err(VecEnvError::len_mismatch(self.num_envs, v.len()).into());
            }
        }
        for (r, d) in self.rewards.iter().zip(self.dones.iter()) {
            if r.len() != self.num_envs || d.len() != self.num_envs {
                return Err(VecEnvError::ShapeMismatch {
                    expected: self.num_envs.to_string(),
                    actual: format!("({}, {})", r.len(), d.len()),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Scripted vectorized environment.
///
/// Besides the scripted lives, its info has `step` (an array holding the step
/// count), `elapsed` (a scalar) and `name` (a string).
pub struct ScriptedVecEnv {
    config: ScriptedVecEnvConfig,
    t: usize,
    pending: Option<NdarrayAct>,
    actions: Vec<NdarrayAct>,
    reset_calls: Vec<Option<Vec<usize>>>,
}

impl ScriptedVecEnv {
    /// Value of observations of slot `ix` after the `t`-th step.
    pub fn obs_value(t: usize, ix: usize) -> f32 {
        (100 * t + ix) as f32
    }

    /// Value of observations of slot `ix` after a reset.
    pub fn reset_value(ix: usize) -> f32 {
        -1.0 - ix as f32
    }

    /// The number of steps taken.
    pub fn steps(&self) -> usize {
        self.t
    }

    /// Actions given to the environment so far.
    pub fn actions(&self) -> &[NdarrayAct] {
        &self.actions
    }

    /// Arguments of the reset calls so far.
    pub fn reset_calls(&self) -> &[Option<Vec<usize>>] {
        &self.reset_calls
    }

    fn obs(&self, ixs: &[usize], value: impl Fn(usize) -> f32) -> NdarrayObs {
        let obs = Array2::from_shape_fn((ixs.len(), self.config.obs_dim), |(i, _)| {
            value(ixs[i])
        });
        NdarrayObs(obs.into_dyn())
    }

    fn info(&self, t: usize) -> InfoDict {
        let n = self.config.num_envs;
        let mut info = InfoDict::empty();
        info.insert("step", Array1::from_elem(n, t as i32));
        info.insert("elapsed", InfoValue::Scalar(t as f32));
        info.insert("name", InfoValue::String("scripted".to_string()));
        if let Some(lives) = &self.config.lives {
            info.insert("lives", Array1::from(lives[t - 1].clone()));
        }
        info
    }

    fn advance(&mut self, a: &NdarrayAct, return_info: bool) -> Result<Step<Self>> {
        if a.len() != self.config.num_envs {
            return Err(VecEnvError::ShapeMismatch {
                expected: format!("[{}, ..]", self.config.num_envs),
                actual: format!("{:?}", a.0.shape()),
            }
            .into());
        }
        if self.t >= self.config.rewards.len() {
            return Err(VecEnvError::ScriptExhausted(self.t).into());
        }

        let t = self.t;
        self.t += 1;
        self.actions.push(a.clone());

        let ixs = (0..self.config.num_envs).collect::<Vec<_>>();
        let obs = self.obs(&ixs, |ix| Self::obs_value(t + 1, ix));
        let reward = Array1::from(self.config.rewards[t].clone());
        let is_done = Array1::from(self.config.dones[t].clone());
        let info = match return_info {
            true => self.info(t + 1),
            false => InfoDict::empty(),
        };

        Ok(Step::new(obs, reward, is_done, info))
    }
}

impl VecEnv for ScriptedVecEnv {
    type Config = ScriptedVecEnvConfig;
    type Obs = NdarrayObs;
    type Act = NdarrayAct;
    type Reward = Array1<f32>;
    type Done = Array1<bool>;
    type Info = InfoDict;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        config.check()?;
        Ok(Self {
            config: config.clone(),
            t: 0,
            pending: None,
            actions: vec![],
            reset_calls: vec![],
        })
    }

    fn num_envs(&self) -> usize {
        self.config.num_envs
    }

    fn reset(&mut self, ixs: Option<&[usize]>) -> Result<NdarrayObs> {
        trace!("ScriptedVecEnv::reset({:?})", ixs);
        self.reset_calls.push(ixs.map(|ixs| ixs.to_vec()));

        match ixs {
            None => {
                let ixs = (0..self.config.num_envs).collect::<Vec<_>>();
                Ok(self.obs(&ixs, Self::reset_value))
            }
            Some(_) if !self.config.slot_reset => {
                Err(VecEnvError::Unsupported("slot-restricted reset".to_string()).into())
            }
            Some(ixs) => {
                let len = self.config.num_envs;
                if let Some(&ix) = ixs.iter().find(|&&ix| ix >= len) {
                    return Err(VecEnvError::SlotOutOfRange { ix, len }.into());
                }
                Ok(self.obs(ixs, Self::reset_value))
            }
        }
    }

    fn step(&mut self, a: &NdarrayAct) -> Result<Step<Self>> {
        trace!("ScriptedVecEnv::step()");
        self.advance(a, true)
    }
}

impl RecvEnv for ScriptedVecEnv {
    fn send(&mut self, a: &NdarrayAct) -> Result<()> {
        self.pending = Some(a.clone());
        Ok(())
    }

    fn recv(&mut self, reset: bool, return_info: bool) -> Result<Step<Self>> {
        trace!("ScriptedVecEnv::recv({}, {})", reset, return_info);
        if reset {
            let n = self.config.num_envs;
            let obs = self.reset(None)?;
            return Ok(Step::new(
                obs,
                Array1::zeros(n),
                Array1::from_elem(n, false),
                InfoDict::empty(),
            ));
        }

        let a = self.pending.take().ok_or(VecEnvError::NoPendingAction)?;
        self.advance(&a, return_info)
    }
}
