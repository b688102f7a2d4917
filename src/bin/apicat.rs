//! `apicat` command-line entry point.
//!
//! Response bodies and listings go to stdout; logs and errors go to stderr
//! (set `RUST_LOG=debug` for request tracing).

use apicat::commands::{run, Cli};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.stdout.as_bytes()) {
                log::error!("failed to write output: {}", e);
                return ExitCode::FAILURE;
            }
            let _ = stdout.flush();
            ExitCode::from(output.exit_code)
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
