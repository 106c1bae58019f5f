pub mod cli;
mod convert;
mod error;
mod format;
mod model;

pub use convert::{
    convert_file, output_path, write_network, Conversion, INPUT_SUFFIX, OUTPUT_SUFFIX,
};
pub use error::{ConvertError, Result};
pub use format::{
    quantise_scale, MoonNetwork, ENGINE_FILE_SIZE, ENGINE_LAYOUT, MAGIC, SECTION_SOURCES,
};
pub use model::{PickledModel, MIN_ARRAYS};
