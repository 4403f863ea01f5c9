//! Interfaces for reporting progress and errors through the CLI

use std::error::Error;
use std::fmt;
use std::io;

/// A sink for progress output. A `Log` value is a _handle_: cheap to obtain from the world and
/// safe to write from the task that owns it. [io::Stderr] is the production implementation.
pub trait Log: io::Write + Send + 'static {}

impl<T: io::Write + Send + 'static> Log for T {}

/// Writes one line of progress output to a [Log] handle.
#[macro_export]
macro_rules! log {
    ($log:expr, $($arg:tt)*) => {{
        use ::std::io::Write as _;
        writeln!($log, $($arg)*).expect("writing to the log failed");
    }};
}

pub trait ErrorExt {
    fn error_chain(&self) -> ErrorChain<&Self> {
        ErrorChain(self)
    }
}

impl<T: Error + ?Sized> ErrorExt for T {}

pub trait WriteExt {
    fn indents<F, H>(&mut self, first: F, hanging: H) -> IndentWriter<'_, F, H, Self> {
        IndentWriter {
            first: Some(first),
            hanging,
            f: self,
        }
    }

    fn hanging_indent<I>(&mut self, indent: I) -> IndentWriter<'_, &'static str, I, Self> {
        self.indents("", indent)
    }
}

impl<T: fmt::Write> WriteExt for T {}

pub struct ErrorChain<T>(T);

impl<T> fmt::Display for ErrorChain<T>
where
    T: Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut error: Option<&dyn Error> = self.0.source();
        while let Some(e) = error {
            writeln!(f)?;
            write!(f, "{}", e)?;
            error = e.source();
        }
        Ok(())
    }
}

pub struct IndentWriter<'a, F, H, W: ?Sized> {
    first: Option<F>,
    hanging: H,
    f: &'a mut W,
}

impl<F, H, W> fmt::Write for IndentWriter<'_, F, H, W>
where
    F: fmt::Display,
    H: fmt::Display,
    W: fmt::Write,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(first) = self.first.take() {
            write!(self.f, "{}", first)?;
        }
        let mut lines = s.split('\n');
        write!(self.f, "{}", lines.next().unwrap())?;
        for line in lines {
            write!(self.f, "\n{}{}", self.hanging, line)?;
        }
        Ok(())
    }
}
