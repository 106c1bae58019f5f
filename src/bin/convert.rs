use std::process::ExitCode;

use clap::Parser;
use moonnet::{cli, convert_file};

/// Convert a pickled model into a .moon network for the engine.
#[derive(Parser)]
#[command(name = "convert", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Pickled model; `<name>.pickle` is written to `<name>.moon`
    #[arg(value_name = "FILE-NAME")]
    input: String,
}

fn main() -> ExitCode {
    let args = match cli::parse_args::<Args>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    cli::init_logging();

    match convert_file(&args.input) {
        Ok(conversion) => {
            log::info!(
                "{} -> {} ({} bytes, scale byte {})",
                args.input,
                conversion.output.display(),
                conversion.written,
                conversion.network.scale(),
            );

            ExitCode::SUCCESS
        }
        Err(err) => cli::report(&err),
    }
}
