#![cfg_attr(not(feature = "test"), warn(missing_docs))]
//! A tool for fetching remote datasets: batch ZIP downloads and HTML directory-listing scraping.

pub mod args;
pub mod entry;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod pipeline;
mod pipelines;
pub mod reporting;
mod utils;
pub mod world;

// re-export the actual pipelines from the top level
pub use pipelines::*;

#[cfg(feature = "test")]
pub use test_utils::*;

#[cfg(feature = "test")]
mod test_utils {
    use std::error::Error;
    use std::fmt::Display;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Never type, see https://github.com/rust-lang/rust/issues/35121
    #[derive(Debug)]
    pub enum Never {}

    impl Display for Never {
        fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match *self {}
        }
    }

    impl Error for Never {}

    /// An in-memory log that can be inspected after a run. Clones share the same buffer.
    #[derive(Debug, Clone, Default)]
    pub struct VecLog(Arc<Mutex<Vec<u8>>>);

    impl VecLog {
        /// Creates an empty log.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns the logged bytes, lossily converted to a string.
        pub fn get_lossy(&self) -> String {
            let data = self.0.lock().expect("log mutex poisoned");
            String::from_utf8_lossy(&data).into_owned()
        }
    }

    impl io::Write for VecLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut data = self.0.lock().expect("log mutex poisoned");
            data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
