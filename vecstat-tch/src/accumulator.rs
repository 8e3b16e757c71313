//! Accumulator on tensors.
use anyhow::Result;
use tch::{Device, Kind, Tensor};
use vecstat_core::{EpisodeAccumulator, VecEnvError};

/// Episode returns and lengths stored in [`Tensor`]s.
///
/// Returns are `Kind::Float` and lengths are `Kind::Int`, both of shape `[n]`.
/// Rewards and done flags given to the accumulator must be on the same device.
#[derive(Debug)]
pub struct TchAccumulator {
    returns: Tensor,
    lengths: Tensor,
}

impl TchAccumulator {
    /// Episode returns.
    pub fn returns(&self) -> &Tensor {
        &self.returns
    }

    /// Episode lengths.
    pub fn lengths(&self) -> &Tensor {
        &self.lengths
    }

    fn check_size(&self, t: &Tensor) -> Result<(), VecEnvError> {
        match t.size() == self.returns.size() {
            true => Ok(()),
            false => Err(VecEnvError::ShapeMismatch {
                expected: format!("{:?}", self.returns.size()),
                actual: format!("{:?}", t.size()),
            }),
        }
    }

    /// The device where the buffers live.
    pub fn device(&self) -> Device {
        self.returns.device()
    }
}

impl EpisodeAccumulator for TchAccumulator {
    type Device = Device;
    type Rewards = Tensor;
    type Mask = Tensor;
    type Returns = Tensor;
    type Lengths = Tensor;

    fn zeros(n: usize, device: &Device) -> Result<Self> {
        let size = [n as i64];
        Ok(Self {
            returns: Tensor::f_zeros(&size, (Kind::Float, *device))?,
            lengths: Tensor::f_zeros(&size, (Kind::Int, *device))?,
        })
    }

    fn len(&self) -> usize {
        self.returns.size()[0] as _
    }

    fn accumulate(&mut self, rewards: &Tensor) -> Result<()> {
        self.check_size(rewards)?;
        let _ = self.returns.f_add_(rewards)?;
        let _ = self.lengths.f_add_scalar_(1i64)?;
        Ok(())
    }

    fn copy_from(&mut self, other: &Self) -> Result<()> {
        self.returns.f_copy_(&other.returns)?;
        self.lengths.f_copy_(&other.lengths)?;
        Ok(())
    }

    fn reset_masked(&mut self, mask: &Tensor) -> Result<()> {
        self.check_size(mask)?;
        let keep = mask.f_logical_not()?;
        let _ = self.returns.f_mul_(&keep.f_to_kind(Kind::Float)?)?;
        let _ = self.lengths.f_mul_(&keep.f_to_kind(Kind::Int)?)?;
        Ok(())
    }

    fn snapshot(&self) -> Result<(Tensor, Tensor)> {
        Ok((self.returns.copy(), self.lengths.copy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    fn to_vec_f32(t: &Tensor) -> Vec<f32> {
        Vec::<f32>::try_from(t).unwrap()
    }

    fn to_vec_i32(t: &Tensor) -> Vec<i32> {
        Vec::<i32>::try_from(t).unwrap()
    }

    #[test]
    fn test_zeros() -> Result<()> {
        let acc = TchAccumulator::zeros(4, &Device::Cpu)?;
        assert_eq!(acc.len(), 4);
        assert_eq!(acc.returns().kind(), Kind::Float);
        assert_eq!(acc.lengths().kind(), Kind::Int);
        assert_eq!(to_vec_f32(acc.returns()), vec![0.0; 4]);
        assert_eq!(to_vec_i32(acc.lengths()), vec![0; 4]);
        Ok(())
    }

    #[test]
    fn test_accumulate_and_reset() -> Result<()> {
        let mut acc = TchAccumulator::zeros(3, &Device::Cpu)?;
        acc.accumulate(&Tensor::from_slice(&[1f32, 2., 3.]))?;
        acc.accumulate(&Tensor::from_slice(&[0.5f32, 0.5, 0.5]))?;
        assert_eq!(to_vec_f32(acc.returns()), vec![1.5, 2.5, 3.5]);
        assert_eq!(to_vec_i32(acc.lengths()), vec![2, 2, 2]);

        acc.reset_masked(&Tensor::from_slice(&[false, true, false]))?;
        assert_eq!(to_vec_f32(acc.returns()), vec![1.5, 0.0, 3.5]);
        assert_eq!(to_vec_i32(acc.lengths()), vec![2, 0, 2]);

        // Float done flags are accepted as well
        acc.reset_masked(&Tensor::from_slice(&[1f32, 0., 0.]))?;
        assert_eq!(to_vec_i32(acc.lengths()), vec![0, 0, 2]);
        Ok(())
    }

    #[test]
    fn test_shape_mismatch() -> Result<()> {
        let mut acc = TchAccumulator::zeros(2, &Device::Cpu)?;
        assert!(acc.accumulate(&Tensor::from_slice(&[1f32])).is_err());
        assert!(acc.reset_masked(&Tensor::from_slice(&[true, false, true])).is_err());
        Ok(())
    }

    #[test]
    fn test_snapshot_is_a_copy() -> Result<()> {
        let mut acc = TchAccumulator::zeros(1, &Device::Cpu)?;
        acc.accumulate(&Tensor::from_slice(&[2f32]))?;
        let (r, l) = acc.snapshot()?;
        acc.reset_masked(&Tensor::from_slice(&[true]))?;
        assert_eq!(to_vec_f32(&r), vec![2.0]);
        assert_eq!(to_vec_i32(&l), vec![1]);
        Ok(())
    }
}
