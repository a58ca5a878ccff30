//! Canvas agent server binary.
//! Run with: cargo run --bin canvas-agent-server

use std::process::ExitCode;

use canvas_agent::start_canvas_agent;

fn main() -> ExitCode {
    start_canvas_agent::run()
}
