use std::io;
use std::process;

use clap::error::ErrorKind;
use clap::CommandFactory;
use log::LevelFilter;
use rcurl::{run, Args, CliError, Config};

fn main() {
    let args = match Args::parse_from_argv(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };
    init_logging(args.verbose);

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    let stdout = io::stdout();
    if let Err(e) = run(&config, &mut stdout.lock()) {
        fail(e);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).format_timestamp(None);
    if verbose {
        builder
            .filter_module("rcurl", LevelFilter::Debug)
            .filter_module("rcurl_core", LevelFilter::Debug);
    }
    builder.init();
}

fn fail(e: CliError) -> ! {
    eprintln!("{e}");
    if matches!(e, CliError::MissingUrl) {
        eprintln!("Usage: rcurl [options] URL");
        let _ = Args::command().print_help();
    }
    process::exit(e.exit_code());
}
