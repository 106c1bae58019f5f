use std::{ffi::OsString, process::ExitCode};

use clap::{CommandFactory, Parser};
use env_logger::Env;

/// Exit status for bad usage as well as failed conversions.
pub const FAILURE: u8 = 1;

pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Parses a command line holding exactly one path. The raw argument count
/// is checked before clap sees anything, so `--` counts as an argument and
/// any other count is a usage error with exit status 1.
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<T: Parser>(
    args: impl IntoIterator<Item = OsString>,
) -> Result<T, ExitCode> {
    let mut args: Vec<OsString> = args.into_iter().collect();

    if args.len() != 2 {
        eprintln!("{}", T::command().render_usage());
        return Err(ExitCode::from(FAILURE));
    }

    // the lone argument goes in after `--`, so names like `-m.pickle` or
    // `--help` stay paths
    args.insert(1, OsString::from("--"));

    T::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        ExitCode::from(FAILURE)
    })
}

pub fn report(err: &crate::ConvertError) -> ExitCode {
    log::debug!("{err:?}");
    eprintln!("error: {err}");
    ExitCode::from(FAILURE)
}
