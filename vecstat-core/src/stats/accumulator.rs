//! Backend-independent bookkeeping of episode return and length.
use anyhow::Result;
use std::fmt::Debug;

/// Per-slot episode return and length stored on some device.
///
/// Implemented on host arrays by [`NdarrayAccumulator`](super::NdarrayAccumulator)
/// and on device tensors in the `vecstat-tch` crate.
pub trait EpisodeAccumulator: Sized {
    /// Where the buffers live.
    type Device: Clone + Debug;

    /// Rewards of all slots, as emitted by the environment.
    type Rewards: ?Sized;

    /// Per-slot flags, `true` for slots to be reset.
    type Mask: ?Sized;

    /// Copy of the returns handed to callers.
    type Returns: Debug;

    /// Copy of the lengths handed to callers.
    type Lengths: Debug;

    /// Creates zero-filled buffers for `n` slots.
    fn zeros(n: usize, device: &Self::Device) -> Result<Self>;

    /// The number of slots.
    fn len(&self) -> usize;

    /// Adds `rewards` to the returns and 1 to the lengths of all slots.
    fn accumulate(&mut self, rewards: &Self::Rewards) -> Result<()>;

    /// Overwrites the buffers with those of `other`.
    fn copy_from(&mut self, other: &Self) -> Result<()>;

    /// Multiplies the buffers by `1 - mask`.
    fn reset_masked(&mut self, mask: &Self::Mask) -> Result<()>;

    /// Returns copies of the buffers.
    fn snapshot(&self) -> Result<(Self::Returns, Self::Lengths)>;
}

/// Information attached to steps by the episode statistics wrappers.
///
/// `r` and `l` are the return and length of the episodes as of the current
/// step, taken before slots with finished episodes are reset. They are copies
/// owned by the caller.
#[derive(Debug, Clone)]
pub struct EpisodeInfo<A: EpisodeAccumulator, I> {
    /// Episode returns.
    pub r: A::Returns,

    /// Episode lengths.
    pub l: A::Lengths,

    /// Information of the wrapped environment.
    pub inner: I,
}

/// Running and returned accumulators of all slots.
///
/// [`EpisodeStats::record`] implements a single bookkeeping step:
///
/// 1. add rewards to the running returns and 1 to the running lengths,
/// 2. copy the running buffers into the returned buffers,
/// 3. reset the running buffers of slots flagged in the mask,
/// 4. hand copies of the returned buffers to the caller.
///
/// Lengths are incremented for every slot, including slots finished at a
/// previous step and not yet reset.
pub struct EpisodeStats<A> {
    running: A,
    returned: A,
}

impl<A: EpisodeAccumulator> EpisodeStats<A> {
    /// Creates zero-filled statistics for `n` slots.
    pub fn new(n: usize, device: &A::Device) -> Result<Self> {
        Ok(Self {
            running: A::zeros(n, device)?,
            returned: A::zeros(n, device)?,
        })
    }

    /// The number of slots.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Records a step and returns the episode statistics to be reported.
    pub fn record<I>(
        &mut self,
        rewards: &A::Rewards,
        mask: &A::Mask,
        inner: I,
    ) -> Result<EpisodeInfo<A, I>> {
        self.running.accumulate(rewards)?;
        self.returned.copy_from(&self.running)?;
        self.running.reset_masked(mask)?;
        let (r, l) = self.returned.snapshot()?;
        Ok(EpisodeInfo { r, l, inner })
    }

    /// Returns and lengths of the episodes in progress.
    pub fn running(&self) -> &A {
        &self.running
    }

    /// Returns and lengths reported at the last step.
    pub fn returned(&self) -> &A {
        &self.returned
    }
}
