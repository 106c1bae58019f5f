use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use moonnet::{cli, MoonNetwork, Result};

/// Print the section layout of a .moon network.
#[derive(Parser)]
#[command(name = "inspect", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    #[arg(value_name = "FILE")]
    network: PathBuf,
}

fn inspect(path: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    let network = MoonNetwork::deserialise_from(&mut reader)?;

    println!("{}", path.display());
    for (name, bytes) in network.sections() {
        println!("  {name:<8}{:>5} bytes", bytes.len());
    }
    println!(
        "  {:<8}{:>5} ({:.4})",
        "scale",
        network.scale(),
        f32::from(network.scale()) / 256.0
    );
    println!("  {:<8}{:>5} bytes", "total", network.serialised_len());

    Ok(())
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Args>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    cli::init_logging();

    match inspect(&args.network) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => cli::report(&err),
    }
}
