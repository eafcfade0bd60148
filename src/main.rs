#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! tagdump: fetch Instagram posts for a hashtag newer than a date into a delimited file.

mod cli;
mod commands;
mod errors;
mod export;
mod feed;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose, cli.quiet);

    let ctx = OutputCtx::new(cli.json);

    match commands::run(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_app_error(&err);
            write_error(&error_output, &ctx);
            std::process::exit(err.exit_code());
        }
    }
}
