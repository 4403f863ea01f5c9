#![warn(missing_docs)]
//! Command line driver: runs the fetch jobs named in the manifest against the real world.

use std::fmt::Write as _;
use std::process::ExitCode;

use datafetch::entry;
use datafetch::reporting::{ErrorExt as _, WriteExt as _};
use datafetch::world::DefaultWorld;

#[tokio::main]
async fn main() -> ExitCode {
    let world = DefaultWorld::new();
    match entry::run(world).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut msg = String::new();
            write!(msg.hanging_indent("  "), "{}", error.error_chain())
                .expect("writing to a string failed");
            eprintln!("error: {msg}");
            ExitCode::FAILURE
        }
    }
}
