mod app;
mod cli;
mod domain;
mod gateway;
mod infra;
#[cfg(test)]
mod test_support;
mod ui;
mod usecases;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    infra::secrets::install_panic_redaction_hook();

    match app::run(cli::Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("pchat: {error:#}");
            ExitCode::FAILURE
        }
    }
}
