//! Metadata returned with environment steps.
//!
//! Vectorized backends usually report metadata as a mapping from field name to
//! an array across slots ([`InfoDict`]), whereas many consumers expect one
//! mapping per slot ([`SlotInfo`]). [`InfoDict::split`] converts the former
//! into the latter.
use crate::error::VecEnvError;
use anyhow::Result;
use ndarray::{Array1, ArrayD, Axis};
use num_traits::AsPrimitive;
use std::collections::{hash_map::Keys, HashMap};

/// A value stored in [`InfoDict`].
///
/// Array variants hold one element per slot along their first axis. The other
/// variants are values shared by all slots.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// `f32` array across slots.
    F32(Array1<f32>),

    /// `i32` array across slots, e.g., lives.
    I32(Array1<i32>),

    /// Boolean array across slots.
    Bool(Array1<bool>),

    /// Array whose first axis is the slot axis.
    ArrayD(ArrayD<f32>),

    /// A single floating-point value.
    Scalar(f32),

    /// A single integer value.
    Int(i64),

    /// A text value.
    String(String),
}

impl InfoValue {
    /// Returns `true` if the value holds one element per slot.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Self::F32(_) | Self::I32(_) | Self::Bool(_) | Self::ArrayD(_)
        )
    }

    /// The length of the slot axis, `None` for non-array values.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::F32(a) => Some(a.len()),
            Self::I32(a) => Some(a.len()),
            Self::Bool(a) => Some(a.len()),
            Self::ArrayD(a) => Some(a.shape().first().copied().unwrap_or(0)),
            _ => None,
        }
    }

    /// Takes the element of slot `ix`, `None` for non-array values.
    pub fn slot(&self, ix: usize) -> Option<SlotValue> {
        match self {
            Self::F32(a) => a.get(ix).map(|v| SlotValue::F32(*v)),
            Self::I32(a) => a.get(ix).map(|v| SlotValue::I32(*v)),
            Self::Bool(a) => a.get(ix).map(|v| SlotValue::Bool(*v)),
            Self::ArrayD(a) => match a.ndim() > 0 && ix < a.shape()[0] {
                true => Some(SlotValue::ArrayD(a.index_axis(Axis(0), ix).to_owned())),
                false => None,
            },
            _ => None,
        }
    }
}

impl From<Array1<f32>> for InfoValue {
    fn from(a: Array1<f32>) -> Self {
        Self::F32(a)
    }
}

impl From<Array1<i32>> for InfoValue {
    fn from(a: Array1<i32>) -> Self {
        Self::I32(a)
    }
}

impl From<Array1<bool>> for InfoValue {
    fn from(a: Array1<bool>) -> Self {
        Self::Bool(a)
    }
}

/// Metadata of all slots, a mapping from field name to [`InfoValue`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoDict(HashMap<String, InfoValue>);

impl InfoDict {
    /// Creates an empty dictionary.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a dictionary from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, InfoValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair.
    pub fn insert(&mut self, k: impl Into<String>, v: impl Into<InfoValue>) {
        self.0.insert(k.into(), v.into());
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&InfoValue> {
        self.0.get(k)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, String, InfoValue> {
        self.0.keys()
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges another dictionary into this one, overwriting existing keys.
    pub fn merge_inplace(&mut self, other: InfoDict) {
        self.0.extend(other.0);
    }

    /// Gets an `f32` array.
    pub fn get_f32(&self, k: &str) -> Result<&Array1<f32>, VecEnvError> {
        match self.0.get(k) {
            Some(InfoValue::F32(a)) => Ok(a),
            Some(_) => Err(VecEnvError::InfoValueTypeError("F32".to_string())),
            None => Err(VecEnvError::InfoKeyError(k.to_string())),
        }
    }

    /// Gets an `i32` array.
    pub fn get_i32(&self, k: &str) -> Result<&Array1<i32>, VecEnvError> {
        match self.0.get(k) {
            Some(InfoValue::I32(a)) => Ok(a),
            Some(_) => Err(VecEnvError::InfoValueTypeError("I32".to_string())),
            None => Err(VecEnvError::InfoKeyError(k.to_string())),
        }
    }

    /// Gets a numeric field as an `f32` array of length `n`.
    ///
    /// Numeric arrays are cast element-wise, scalars are broadcast to all
    /// slots. Returns `Ok(None)` if the key does not exist.
    pub fn numeric(&self, k: &str, n: usize) -> Result<Option<Array1<f32>>, VecEnvError> {
        let a = match self.0.get(k) {
            None => return Ok(None),
            Some(InfoValue::F32(a)) => a.clone(),
            Some(InfoValue::I32(a)) => cast(a),
            Some(InfoValue::Bool(a)) => a.mapv(|b| b as i32 as f32),
            Some(InfoValue::Scalar(v)) => Array1::from_elem(n, *v),
            Some(InfoValue::Int(v)) => Array1::from_elem(n, *v as f32),
            Some(_) => return Err(VecEnvError::InfoValueTypeError("numeric".to_string())),
        };
        if a.len() != n {
            return Err(VecEnvError::len_mismatch(n, a.len()));
        }
        Ok(Some(a))
    }

    /// Converts the dictionary into one [`SlotInfo`] per slot.
    ///
    /// Slot `i` receives element `i` of every array field. Non-array fields are
    /// dropped. An array field with fewer than `n` elements is an error.
    pub fn split<O>(&self, n: usize) -> Result<Vec<SlotInfo<O>>> {
        let mut infos: Vec<SlotInfo<O>> = (0..n).map(|_| SlotInfo::empty()).collect();
        for (k, v) in self.0.iter().filter(|(_, v)| v.is_array()) {
            for (ix, info) in infos.iter_mut().enumerate() {
                let x = v
                    .slot(ix)
                    .ok_or_else(|| VecEnvError::len_mismatch(n, v.len().unwrap_or(0)))?;
                info.insert(k.clone(), x);
            }
        }
        Ok(infos)
    }
}

fn cast<T: AsPrimitive<f32>>(a: &Array1<T>) -> Array1<f32> {
    a.mapv(|x| x.as_())
}

/// A value of a single slot in [`SlotInfo`].
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    /// `f32` value.
    F32(f32),

    /// `i32` value.
    I32(i32),

    /// Boolean value.
    Bool(bool),

    /// Array of a single slot.
    ArrayD(ArrayD<f32>),
}

/// Metadata of a single slot.
///
/// `O` is the observation type of the environment; it is used for the
/// observation kept when the slot is reset automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotInfo<O> {
    values: HashMap<String, SlotValue>,

    /// The last observation of the episode before the slot was reset.
    pub terminal_observation: Option<O>,
}

impl<O> SlotInfo<O> {
    /// Creates an empty info.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
            terminal_observation: None,
        }
    }

    /// Inserts a key-value pair.
    pub fn insert(&mut self, k: impl Into<String>, v: SlotValue) {
        self.values.insert(k.into(), v);
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&SlotValue> {
        self.values.get(k)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, String, SlotValue> {
        self.values.keys()
    }

    /// The number of fields, the terminal observation not included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the info has neither fields nor terminal observation.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.terminal_observation.is_none()
    }
}
