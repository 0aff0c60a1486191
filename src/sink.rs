//! Output destinations for rendered tables.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use is_terminal::IsTerminal;

/// A writable character sink for rendered table output.
///
/// The renderer itself only depends on [`io::Write`]; this enum is the
/// concrete sink used by the convenience constructors, covering the
/// destinations table output actually goes to. File sinks are buffered
/// and flushed when the buffer is dropped or the renderer is finished.
#[derive(Debug)]
pub enum Sink {
    /// Standard output.
    Stdout(Stdout),
    /// An append-mode file.
    File(BufWriter<File>),
    /// An in-memory buffer.
    Buffer(Vec<u8>),
}

impl Sink {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Sink::Stdout(io::stdout())
    }

    /// Sink appending to the file at `path`, creating it if missing.
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Sink::File(BufWriter::new(file)))
    }

    /// Empty in-memory sink.
    pub fn buffer() -> Self {
        Sink::Buffer(Vec::new())
    }

    /// Whether extended box-drawing glyphs are a safe default here.
    ///
    /// True only for stdout attached to a terminal. Files, pipes, and
    /// buffers get the ASCII set since their eventual consumer may not
    /// render box-drawing characters.
    pub fn supports_extended_glyphs(&self) -> bool {
        match self {
            Sink::Stdout(out) => out.is_terminal(),
            Sink::File(_) | Sink::Buffer(_) => false,
        }
    }

    /// The bytes written so far, for buffer sinks.
    pub fn buffer_contents(&self) -> Option<&[u8]> {
        match self {
            Sink::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(out) => out.write(buf),
            Sink::File(file) => file.write(buf),
            Sink::Buffer(bytes) => bytes.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.flush(),
            Sink::File(file) => file.flush(),
            Sink::Buffer(bytes) => bytes.flush(),
        }
    }
}
