use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use serde_pickle::{DeOptions, SerOptions};

use crate::error::{ConvertError, Result};

pub const MIN_ARRAYS: usize = 6;

/// The trained model as pickled by the learner: a dict holding the raw
/// weight arrays under `"ars"` and the output scale under `"scale"`.
/// Any other keys in the dict are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickledModel {
    pub ars: Vec<ByteBuf>,
    pub scale: f64,
}

impl PickledModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_reader(&mut file)
    }

    pub fn from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let model: Self = serde_pickle::from_slice(bytes, DeOptions::new())?;
        model.check_arrays()?;
        Ok(model)
    }

    pub fn check_arrays(&self) -> Result<()> {
        if self.ars.len() < MIN_ARRAYS {
            return Err(ConvertError::TooFewArrays {
                found: self.ars.len(),
            });
        }

        Ok(())
    }

    pub fn to_pickle(&self) -> Result<Vec<u8>> {
        Ok(serde_pickle::to_vec(self, SerOptions::new())?)
    }

    pub fn array(&self, idx: usize) -> Option<&[u8]> {
        self.ars.get(idx).map(|array| array.as_slice())
    }
}
