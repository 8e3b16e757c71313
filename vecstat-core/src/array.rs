//! Observation and action on host arrays.
use crate::{Act, Obs, VecEnvError};
use anyhow::Result;
use ndarray::{ArrayD, Axis, Slice};

#[derive(Clone, Debug, PartialEq)]
/// Observation, the first axis is the slot axis.
pub struct NdarrayObs(pub ArrayD<f32>);

impl Obs for NdarrayObs {
    fn len(&self) -> usize {
        self.0.shape().first().copied().unwrap_or(0)
    }

    fn slot(&self, ix: usize) -> Result<Self> {
        if ix >= self.len() {
            return Err(VecEnvError::SlotOutOfRange { ix, len: self.len() }.into());
        }
        let a = self.0.slice_axis(Axis(0), Slice::from(ix..ix + 1));
        Ok(Self(a.to_owned()))
    }

    fn set_slot(&mut self, ix: usize, src: &Self) -> Result<()> {
        if ix >= self.len() {
            return Err(VecEnvError::SlotOutOfRange { ix, len: self.len() }.into());
        }
        if src.len() == 0 || src.0.shape()[1..] != self.0.shape()[1..] {
            return Err(VecEnvError::ShapeMismatch {
                expected: format!("[_, {:?}]", &self.0.shape()[1..]),
                actual: format!("{:?}", src.0.shape()),
            }
            .into());
        }
        self.0
            .index_axis_mut(Axis(0), ix)
            .assign(&src.0.index_axis(Axis(0), 0));
        Ok(())
    }
}

impl From<ArrayD<f32>> for NdarrayObs {
    fn from(a: ArrayD<f32>) -> Self {
        Self(a)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Action, the first axis is the slot axis.
pub struct NdarrayAct(pub ArrayD<f32>);

impl Act for NdarrayAct {
    fn len(&self) -> usize {
        self.0.shape().first().copied().unwrap_or(0)
    }
}

impl From<ArrayD<f32>> for NdarrayAct {
    fn from(a: ArrayD<f32>) -> Self {
        Self(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, IxDyn};

    #[test]
    fn test_slot_and_set_slot() -> Result<()> {
        let mut obs = NdarrayObs(arr2(&[[0f32, 1.], [2., 3.], [4., 5.]]).into_dyn());
        let s = obs.slot(1)?;
        assert_eq!(s.0.shape(), &[1, 2]);
        assert_eq!(s.0, arr2(&[[2f32, 3.]]).into_dyn());

        let src = NdarrayObs(arr2(&[[-1f32, -1.]]).into_dyn());
        obs.set_slot(1, &src)?;
        assert_eq!(obs.0, arr2(&[[0f32, 1.], [-1., -1.], [4., 5.]]).into_dyn());

        // The slot taken before is a copy
        assert_eq!(s.0, arr2(&[[2f32, 3.]]).into_dyn());
        Ok(())
    }

    #[test]
    fn test_zero_dimensional() {
        let mut obs = NdarrayObs(ArrayD::zeros(IxDyn(&[])));
        assert_eq!(obs.len(), 0);
        assert!(obs.slot(0).is_err());
        assert!(obs
            .set_slot(0, &NdarrayObs(ArrayD::zeros(IxDyn(&[1]))))
            .is_err());
        assert_eq!(NdarrayAct(ArrayD::zeros(IxDyn(&[]))).len(), 0);
        assert_eq!(NdarrayAct(ArrayD::zeros(IxDyn(&[4, 2]))).len(), 4);
    }

    #[test]
    fn test_set_slot_rejects_bad_input() {
        let mut obs = NdarrayObs(ArrayD::zeros(IxDyn(&[2, 3])));
        assert!(obs.slot(2).is_err());
        assert!(obs
            .set_slot(0, &NdarrayObs(ArrayD::zeros(IxDyn(&[1, 4]))))
            .is_err());
        assert!(obs
            .set_slot(5, &NdarrayObs(ArrayD::zeros(IxDyn(&[1, 3]))))
            .is_err());
    }
}
