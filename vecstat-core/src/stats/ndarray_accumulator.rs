//! Accumulator on host arrays.
use super::{EpisodeAccumulator, EpisodeInfo};
use crate::{error::VecEnvError, info::InfoDict};
use anyhow::Result;
use ndarray::{Array1, Zip};

/// Episode returns and lengths stored in [`ndarray`] arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct NdarrayAccumulator {
    returns: Array1<f32>,
    lengths: Array1<i32>,
}

impl NdarrayAccumulator {
    /// Episode returns.
    pub fn returns(&self) -> &Array1<f32> {
        &self.returns
    }

    /// Episode lengths.
    pub fn lengths(&self) -> &Array1<i32> {
        &self.lengths
    }

    fn check_len(&self, len: usize) -> Result<()> {
        match len == self.returns.len() {
            true => Ok(()),
            false => Err(VecEnvError::len_mismatch(self.returns.len(), len).into()),
        }
    }
}

impl EpisodeAccumulator for NdarrayAccumulator {
    type Device = ();
    type Rewards = Array1<f32>;
    type Mask = Array1<bool>;
    type Returns = Array1<f32>;
    type Lengths = Array1<i32>;

    fn zeros(n: usize, _device: &()) -> Result<Self> {
        Ok(Self {
            returns: Array1::zeros(n),
            lengths: Array1::zeros(n),
        })
    }

    fn len(&self) -> usize {
        self.returns.len()
    }

    fn accumulate(&mut self, rewards: &Array1<f32>) -> Result<()> {
        self.check_len(rewards.len())?;
        self.returns += rewards;
        self.lengths += 1;
        Ok(())
    }

    fn copy_from(&mut self, other: &Self) -> Result<()> {
        self.check_len(other.len())?;
        self.returns.assign(&other.returns);
        self.lengths.assign(&other.lengths);
        Ok(())
    }

    fn reset_masked(&mut self, mask: &Array1<bool>) -> Result<()> {
        self.check_len(mask.len())?;
        Zip::from(&mut self.returns)
            .and(&mut self.lengths)
            .and(mask)
            .for_each(|r, l, &m| {
                let keep = 1 - m as i32;
                *r *= keep as f32;
                *l *= keep;
            });
        Ok(())
    }

    fn snapshot(&self) -> Result<(Array1<f32>, Array1<i32>)> {
        Ok((self.returns.clone(), self.lengths.clone()))
    }
}

impl EpisodeInfo<NdarrayAccumulator, InfoDict> {
    /// Merges the episode statistics into the info of the environment.
    ///
    /// Returns and lengths are stored under keys `"r"` and `"l"`, overwriting
    /// fields with the same keys.
    pub fn into_info_dict(self) -> InfoDict {
        let mut stats = InfoDict::empty();
        stats.insert("r", self.r);
        stats.insert("l", self.l);

        let mut info = self.inner;
        info.merge_inplace(stats);
        info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::InfoValue;
    use ndarray::arr1;

    #[test]
    fn test_accumulate_and_reset() -> Result<()> {
        let mut acc = NdarrayAccumulator::zeros(3, &())?;
        acc.accumulate(&arr1(&[1.0, 2.0, 3.0]))?;
        acc.accumulate(&arr1(&[0.5, 0.5, 0.5]))?;
        assert_eq!(acc.returns(), &arr1(&[1.5f32, 2.5, 3.5]));
        assert_eq!(acc.lengths(), &arr1(&[2, 2, 2]));

        acc.reset_masked(&arr1(&[false, true, false]))?;
        assert_eq!(acc.returns(), &arr1(&[1.5f32, 0.0, 3.5]));
        assert_eq!(acc.lengths(), &arr1(&[2, 0, 2]));
        Ok(())
    }

    #[test]
    fn test_length_mismatch_is_error() -> Result<()> {
        let mut acc = NdarrayAccumulator::zeros(2, &())?;
        let err = acc.accumulate(&arr1(&[1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VecEnvError>(),
            Some(VecEnvError::ShapeMismatch { .. })
        ));
        assert!(acc.reset_masked(&arr1(&[true])).is_err());
        Ok(())
    }

    #[test]
    fn test_into_info_dict() -> Result<()> {
        let mut inner = InfoDict::empty();
        inner.insert("lives", arr1(&[3i32, 2]));
        let info = EpisodeInfo::<NdarrayAccumulator, _> {
            r: arr1(&[1.0, 0.0]),
            l: arr1(&[1, 1]),
            inner,
        };
        let info = info.into_info_dict();
        assert_eq!(info.len(), 3);
        assert_eq!(info.get_f32("r")?, &arr1(&[1.0f32, 0.0]));
        assert_eq!(info.get_i32("l")?, &arr1(&[1, 1]));
        assert_eq!(info.get_i32("lives")?, &arr1(&[3, 2]));
        Ok(())
    }

    #[test]
    fn test_into_info_dict_overwrites_same_keys() -> Result<()> {
        let mut inner = InfoDict::empty();
        inner.insert("r", InfoValue::String("raw".to_string()));
        let info = EpisodeInfo::<NdarrayAccumulator, _> {
            r: arr1(&[5.0]),
            l: arr1(&[2]),
            inner,
        }
        .into_info_dict();
        assert_eq!(info.len(), 2);
        assert_eq!(info.get_f32("r")?, &arr1(&[5.0f32]));
        Ok(())
    }

    #[test]
    fn test_snapshot_is_a_copy() -> Result<()> {
        let mut acc = NdarrayAccumulator::zeros(1, &())?;
        acc.accumulate(&arr1(&[2.0]))?;
        let (r, l) = acc.snapshot()?;
        acc.reset_masked(&arr1(&[true]))?;
        assert_eq!(r, arr1(&[2.0f32]));
        assert_eq!(l, arr1(&[1]));
        Ok(())
    }
}
