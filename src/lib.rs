//! gridline - streaming box-drawing table renderer
//!
//! Renders tabular data as fixed-width text with box-drawing borders,
//! writing to the console, a file, or any [`std::io::Write`] sink.
//! Tables are consumed incrementally: fix the shape and formatting up
//! front, then stream cell values one at a time. The renderer tracks
//! position internally and emits the title block, column headers, row
//! numbers, dividers, and the closing border at the right points on its
//! own.
//!
//! # Example
//!
//! ```
//! use gridline::{Sink, TableRenderer};
//!
//! let mut table = TableRenderer::with_sink("Scores", 2, 2, Sink::buffer())?;
//! table
//!     .set_column_header(0, "A")?
//!     .set_column_header(1, "B")?;
//! table.write_cell(1)?.write_cell(2)?;
//! table.write_cell(3)?.write_cell(4)?;
//! assert!(table.is_complete());
//! # Ok::<(), gridline::Error>(())
//! ```

pub mod error;
pub mod glyphs;
pub mod renderer;
pub mod sink;

// Re-export commonly used types
pub use error::{Error, Result};
pub use glyphs::GlyphSet;
pub use renderer::TableRenderer;
pub use sink::Sink;
