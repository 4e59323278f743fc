//! Binary entrypoint that launches the voxrelay agent server.

use std::process::ExitCode;

use voxrelay_agent::start_voxrelay_agent;

fn main() -> ExitCode {
    start_voxrelay_agent::run()
}
