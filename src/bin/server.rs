//! Voxrelay server binary for deployments that expect an explicit bin name.
//! Run with: cargo run --bin voxrelay-server

use std::process::ExitCode;

use voxrelay_agent::start_voxrelay_agent;

fn main() -> ExitCode {
    start_voxrelay_agent::run()
}
