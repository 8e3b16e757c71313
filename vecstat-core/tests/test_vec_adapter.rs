use anyhow::Result;
use ndarray::{arr1, ArrayD, Axis, IxDyn};
use test_log::test;
use vecstat_core::{
    dummy::{ScriptedVecEnv, ScriptedVecEnvConfig},
    NdarrayAct, NdarrayObs, Obs, SlotValue, SplitStep, VecAdapter, VecEnv, VecEnvError,
};

fn act(n: usize) -> NdarrayAct {
    NdarrayAct(ArrayD::zeros(IxDyn(&[n])))
}

fn config() -> ScriptedVecEnvConfig {
    ScriptedVecEnvConfig::default()
        .num_envs(3)
        .obs_dim(2)
        .rewards(vec![vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]])
        .dones(vec![vec![false, true, false], vec![true, true, true]])
}

fn slot_is(obs: &NdarrayObs, ix: usize, value: f32) -> bool {
    obs.0.index_axis(Axis(0), ix).iter().all(|&v| v == value)
}

#[test]
fn test_done_slot_is_reset_with_terminal_observation() -> Result<()> {
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);
    assert_eq!(env.num_envs(), 3);

    env.step_async(act(3));
    let step = env.step_wait()?;

    // Only slot 1 is reset
    assert!(slot_is(&step.obs, 0, ScriptedVecEnv::obs_value(1, 0)));
    assert!(slot_is(&step.obs, 1, ScriptedVecEnv::reset_value(1)));
    assert!(slot_is(&step.obs, 2, ScriptedVecEnv::obs_value(1, 2)));
    assert_eq!(env.venv().reset_calls(), &[Some(vec![1])]);

    let terminal = step.info[1].terminal_observation.as_ref().unwrap();
    assert_eq!(terminal.len(), 1);
    assert!(slot_is(terminal, 0, ScriptedVecEnv::obs_value(1, 1)));
    assert!(step.info[0].terminal_observation.is_none());
    assert!(step.info[2].terminal_observation.is_none());

    assert_eq!(step.reward, arr1(&[1f32, 2., 3.]));
    assert_eq!(step.is_done, arr1(&[false, true, false]));
    Ok(())
}

#[test]
fn test_info_is_split_per_slot() -> Result<()> {
    let config = config().lives(Some(vec![vec![5, 4, 3], vec![0, 0, 0]]));
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config, 0)?);
    let step = env.step(act(3))?;

    assert_eq!(step.info.len(), 3);
    for (ix, info) in step.info.iter().enumerate() {
        // `elapsed` and `name` are not arrays
        let mut keys = info.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["lives".to_string(), "step".to_string()]);
        assert_eq!(info.get("step"), Some(&SlotValue::I32(1)));
        assert_eq!(info.get("lives"), Some(&SlotValue::I32(5 - ix as i32)));
    }
    Ok(())
}

#[test]
fn test_all_slots_done() -> Result<()> {
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);
    env.step(act(3))?;
    let step = env.step(act(3))?;

    for ix in 0..3 {
        assert!(slot_is(&step.obs, ix, ScriptedVecEnv::reset_value(ix)));
        let terminal = step.info[ix].terminal_observation.as_ref().unwrap();
        assert!(slot_is(terminal, 0, ScriptedVecEnv::obs_value(2, ix)));
    }
    assert_eq!(
        env.venv().reset_calls(),
        &[Some(vec![1]), Some(vec![0]), Some(vec![1]), Some(vec![2])]
    );
    Ok(())
}

#[test]
fn test_split_step_equals_step() -> Result<()> {
    let mut env1 = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);
    let mut env2 = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);

    for _ in 0..2 {
        env1.step_async(act(3));
        let s1 = env1.step_wait()?;
        let s2 = env2.step(act(3))?;
        assert_eq!(s1.obs, s2.obs);
        assert_eq!(s1.reward, s2.reward);
        assert_eq!(s1.is_done, s2.is_done);
        assert_eq!(s1.info, s2.info);
    }
    assert_eq!(env1.venv().actions(), env2.venv().actions());
    Ok(())
}

#[test]
fn test_step_async_does_not_step() -> Result<()> {
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);
    env.step_async(act(3));
    assert_eq!(env.venv().steps(), 0);
    env.step_wait()?;
    assert_eq!(env.venv().steps(), 1);

    // Actions are consumed by step_wait()
    let err = env.step_wait().err().unwrap();
    assert!(matches!(
        err.downcast_ref::<VecEnvError>(),
        Some(VecEnvError::NoPendingAction)
    ));
    Ok(())
}

#[test]
fn test_reset_and_seed() -> Result<()> {
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config(), 0)?);
    env.seed(Some(7));
    env.seed(None);

    let obs = env.reset()?;
    assert_eq!(obs.len(), 3);
    assert!((0..3).all(|ix| slot_is(&obs, ix, ScriptedVecEnv::reset_value(ix))));
    assert_eq!(env.venv().reset_calls(), &[None]);
    Ok(())
}

#[test]
fn test_slot_reset_unsupported() -> Result<()> {
    let mut env = VecAdapter::new(ScriptedVecEnv::build(&config().slot_reset(false), 0)?);
    let err = env.step(act(3)).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<VecEnvError>(),
        Some(VecEnvError::Unsupported(_))
    ));
    Ok(())
}
