use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pickle could not be decoded, or did not match the expected shape
    /// (missing `ars`/`scale`, wrong value types).
    #[error("invalid model pickle: {0}")]
    Pickle(#[from] serde_pickle::Error),

    #[error("model has {found} arrays in `ars`, need at least 6")]
    TooFewArrays { found: usize },

    #[error("scale {0} does not quantise to a byte (expected 0 <= scale < 1)")]
    ScaleOutOfRange(f64),

    #[error("bad magic {0:02x?}, not a .moon network")]
    BadMagic([u8; 4]),

    #[error("network ends inside section `{section}`")]
    Truncated { section: &'static str },

    #[error("unexpected data after scale byte")]
    TrailingData,
}
