use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{error::Result, format::MoonNetwork, model::PickledModel};

pub const INPUT_SUFFIX: &str = ".pickle";
pub const OUTPUT_SUFFIX: &str = ".moon";

/// `model.pickle` becomes `model.moon`, anything else just gets `.moon`
/// appended.
pub fn output_path(input: &str) -> String {
    let stem = input.strip_suffix(INPUT_SUFFIX).unwrap_or(input);
    format!("{stem}{OUTPUT_SUFFIX}")
}

pub struct Conversion {
    pub output: PathBuf,
    pub network: MoonNetwork,
    pub written: usize,
}

/// Converts a pickled model into a `.moon` network next to it. The output
/// file is only created once the input has decoded cleanly.
pub fn convert_file(input: &str) -> Result<Conversion> {
    let output = PathBuf::from(output_path(input));

    let model = PickledModel::load(input)?;
    let network = MoonNetwork::from_model(&model)?;

    for (name, bytes) in network.sections() {
        log::debug!("{name}: {} bytes", bytes.len());
    }

    write_network(&network, &output)?;

    Ok(Conversion {
        output,
        written: network.serialised_len(),
        network,
    })
}

pub fn write_network(network: &MoonNetwork, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    network.serialise_into(&mut writer)?;
    writer.flush()?;
    Ok(())
}
