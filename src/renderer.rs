//! The streaming table renderer.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::glyphs::GlyphSet;
use crate::sink::Sink;

const DEFAULT_COLUMN_WIDTH: usize = 5;
const ROW_NUMBER_WIDTH: usize = 3;

/// Renders a fixed-shape table incrementally, one cell at a time.
///
/// The table's shape is fixed at construction and its formatting is
/// configured before the first cell is written. The first
/// [`write_cell`](TableRenderer::write_cell) call freezes the layout,
/// emits the title block and column headers, and every subsequent call
/// emits row boundaries, dividers, and the closing border on its own as
/// the cell counter advances. Once `rows * cols` cells have been
/// written the table is complete and further writes are an error.
///
/// Not internally synchronized; wrap in a lock for shared use.
#[derive(Debug)]
pub struct TableRenderer<W: Write> {
    sink: W,
    title: String,
    rows: usize,
    cols: usize,
    headers: Vec<Option<String>>,
    widths: Vec<usize>,
    cells_written: usize,
    table_width: Option<usize>,
    show_row_numbers: bool,
    show_row_dividers: bool,
    show_column_numbers: bool,
    show_column_dividers: bool,
    glyphs: GlyphSet,
}

impl TableRenderer<Sink> {
    /// Renderer writing to standard output.
    ///
    /// Extended box-drawing glyphs are selected when stdout is a
    /// terminal, the ASCII set otherwise (redirected output lands in a
    /// file or pipe whose consumer may not render them).
    pub fn new(title: impl Into<String>, rows: usize, cols: usize) -> Result<Self> {
        let sink = Sink::stdout();
        let extended = sink.supports_extended_glyphs();
        let mut renderer = Self::with_sink(title, rows, cols, sink)?;
        renderer.use_extended_glyphs(extended);
        Ok(renderer)
    }

    /// Renderer appending to the file at `path`, with ASCII glyphs.
    pub fn to_file(
        title: impl Into<String>,
        rows: usize,
        cols: usize,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::with_sink(title, rows, cols, Sink::file(path)?)
    }
}

impl<W: Write> TableRenderer<W> {
    /// Renderer writing into an arbitrary sink, with ASCII glyphs.
    ///
    /// Fails with [`Error::InvalidDimensions`] unless both counts are
    /// positive.
    pub fn with_sink(
        title: impl Into<String>,
        rows: usize,
        cols: usize,
        sink: W,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            sink,
            title: title.into(),
            rows,
            cols,
            headers: vec![None; cols],
            widths: vec![DEFAULT_COLUMN_WIDTH; cols],
            cells_written: 0,
            table_width: None,
            show_row_numbers: true,
            show_row_dividers: false,
            show_column_numbers: true,
            show_column_dividers: true,
            glyphs: GlyphSet::ASCII,
        })
    }

    /// Set a column header. The column's width is reset to the header's
    /// character count, so headers decide column widths unless a width
    /// is set explicitly afterwards.
    pub fn set_column_header(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<&mut Self> {
        self.check_column(index)?;
        let text = text.into();
        self.widths[index] = text.chars().count();
        self.headers[index] = Some(text);
        Ok(self)
    }

    /// Set the width of one column, or of every column when `column` is
    /// `None`. A width of zero is accepted and renders a zero-width
    /// field.
    pub fn set_column_width(&mut self, width: usize, column: Option<usize>) -> Result<&mut Self> {
        match column {
            Some(index) => {
                self.check_column(index)?;
                self.widths[index] = width;
            }
            None => {
                for w in &mut self.widths {
                    *w = width;
                }
            }
        }
        Ok(self)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Show a leading column with the zero-based row index. On by
    /// default.
    pub fn show_row_numbers(&mut self, show: bool) -> &mut Self {
        self.show_row_numbers = show;
        self
    }

    /// Emit a horizontal divider line between rows. Off by default.
    pub fn show_row_dividers(&mut self, show: bool) -> &mut Self {
        self.show_row_dividers = show;
        self
    }

    /// Render unset column headers as the zero-based column index
    /// rather than blank. On by default; headers set explicitly are
    /// unaffected.
    pub fn show_column_numbers(&mut self, show: bool) -> &mut Self {
        self.show_column_numbers = show;
        self
    }

    /// Emit vertical dividers between columns and at the table edges.
    /// On by default. When disabled, border rows render as plain
    /// horizontal rules at the narrower table width.
    pub fn show_column_dividers(&mut self, show: bool) -> &mut Self {
        self.show_column_dividers = show;
        self
    }

    /// Replace the border character set.
    pub fn set_glyphs(&mut self, glyphs: GlyphSet) -> &mut Self {
        self.glyphs = glyphs;
        self
    }

    /// Switch between [`GlyphSet::EXTENDED`] and [`GlyphSet::ASCII`].
    pub fn use_extended_glyphs(&mut self, extended: bool) -> &mut Self {
        self.glyphs = if extended {
            GlyphSet::EXTENDED
        } else {
            GlyphSet::ASCII
        };
        self
    }

    /// Number of cells written so far.
    pub fn cells_written(&self) -> usize {
        self.cells_written
    }

    /// Whether every cell has been written and the closing border
    /// emitted.
    pub fn is_complete(&self) -> bool {
        self.cells_written == self.capacity()
    }

    /// The total character width of the rendered table, frozen at the
    /// first cell write. `None` until then.
    pub fn table_width(&self) -> Option<usize> {
        self.table_width
    }

    /// Write the next cell value, right-aligned in its column.
    ///
    /// The first call emits the header block; the call that fills the
    /// last cell emits the closing border and flushes the sink. Content
    /// wider than its column widens that field rather than being
    /// truncated. Fails with [`Error::TableComplete`] once the table is
    /// full.
    pub fn write_cell(&mut self, value: impl Display) -> Result<&mut Self> {
        if self.is_complete() {
            return Err(Error::TableComplete {
                capacity: self.capacity(),
            });
        }
        if self.cells_written == 0 {
            self.emit_header()?;
        }

        let col = self.cells_written % self.cols;
        let div = self.divider();
        if col == 0 {
            let row = self.cells_written / self.cols;
            let rnw = ROW_NUMBER_WIDTH;
            write!(self.sink, "\n{div}")?;
            if self.show_row_numbers {
                write!(self.sink, "{row:>rnw$}{div}")?;
            }
        }
        let width = self.widths[col];
        write!(self.sink, "{value:>width$}{div}")?;
        self.cells_written += 1;

        // The final cell gets the closing border; an interior divider is
        // only emitted for full rows before that, never both.
        if self.is_complete() {
            self.emit_closing_border()?;
            self.sink.flush()?;
        } else if self.show_row_dividers && self.cells_written % self.cols == 0 {
            self.emit_row_divider()?;
        }
        Ok(self)
    }

    /// Write one cell per item. Stops at the first error.
    pub fn write_row<I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.write_cell(value)?;
        }
        Ok(self)
    }

    /// Flush the sink, surfacing any buffered write error.
    pub fn finish(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Consume the renderer and return its sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    fn check_column(&self, index: usize) -> Result<()> {
        if index >= self.cols {
            return Err(Error::IndexOutOfRange {
                index,
                columns: self.cols,
            });
        }
        Ok(())
    }

    fn divider(&self) -> String {
        if self.show_column_dividers {
            self.glyphs.vertical.to_string()
        } else {
            String::new()
        }
    }

    /// Sum of the column widths plus the divider and row-number
    /// columns. Computed once, when the header is emitted.
    fn compute_table_width(&self) -> usize {
        let mut width: usize = self.widths.iter().sum();
        if self.show_column_dividers {
            width += self.cols + 1;
        }
        if self.show_row_numbers {
            width += ROW_NUMBER_WIDTH;
            if self.show_column_dividers {
                width += 1;
            }
        }
        width
    }

    /// Emit the one-time block above the data rows: top border, centered
    /// title, header junction, column headers, and the divider the first
    /// data row hangs under. The last line is left unterminated since
    /// data rows start with their own newline.
    fn emit_header(&mut self) -> Result<()> {
        let width = self.compute_table_width();
        self.table_width = Some(width);

        let g = self.glyphs;
        let top = self.solid_border(width);
        let title = self.title_row(width);
        let header_junction = self.border_row(width, g.mid_left, g.top_mid, g.mid_right);
        let headers = self.header_row();
        let post_header = self.border_row(width, g.mid_left, g.mid_mid, g.mid_right);

        writeln!(self.sink, "{top}")?;
        writeln!(self.sink, "{title}")?;
        writeln!(self.sink, "{header_junction}")?;
        writeln!(self.sink, "{headers}")?;
        write!(self.sink, "{post_header}")?;
        Ok(())
    }

    fn emit_row_divider(&mut self) -> Result<()> {
        let g = self.glyphs;
        let width = self.table_width.unwrap_or(0);
        let line = self.border_row(width, g.mid_left, g.mid_mid, g.mid_right);
        write!(self.sink, "\n{line}")?;
        Ok(())
    }

    fn emit_closing_border(&mut self) -> Result<()> {
        let g = self.glyphs;
        let width = self.table_width.unwrap_or(0);
        let line = self.border_row(width, g.bottom_left, g.bottom_mid, g.bottom_right);
        writeln!(self.sink, "\n{line}")?;
        Ok(())
    }

    /// Top border: corners joined by an unbroken horizontal run.
    fn solid_border(&self, width: usize) -> String {
        if !self.show_column_dividers {
            return run(self.glyphs.horizontal, width);
        }
        let mut line = String::new();
        line.push(self.glyphs.top_left);
        line.push_str(&run(self.glyphs.horizontal, width.saturating_sub(2)));
        line.push(self.glyphs.top_right);
        line
    }

    /// The title centered between the outer dividers. The left margin
    /// never drops below one space; an overlong title overflows the
    /// border rather than being truncated.
    fn title_row(&self, width: usize) -> String {
        let edges: usize = if self.show_column_dividers { 2 } else { 0 };
        let title_len = self.title.chars().count();
        let avail = width as isize - edges as isize - title_len as isize;
        let margin = (avail / 2).max(1) as usize;
        let right = (avail - margin as isize).max(0) as usize;

        let div = self.divider();
        format!(
            "{div}{empty:margin$}{title}{empty:right$}{div}",
            empty = "",
            title = self.title,
        )
    }

    /// A border row with junctions at the row-number and column
    /// boundaries. With column dividers disabled there are no
    /// boundaries, so the row is a plain horizontal rule.
    fn border_row(&self, width: usize, left: char, mid: char, right: char) -> String {
        if !self.show_column_dividers {
            return run(self.glyphs.horizontal, width);
        }
        let h = self.glyphs.horizontal;
        let mut line = String::new();
        line.push(left);
        if self.show_row_numbers {
            line.push_str(&run(h, ROW_NUMBER_WIDTH));
            line.push(mid);
        }
        for (i, &w) in self.widths.iter().enumerate() {
            line.push_str(&run(h, w));
            line.push(if i + 1 == self.cols { right } else { mid });
        }
        line
    }

    /// The column header row, with a blank cell over the row numbers.
    fn header_row(&self) -> String {
        let div = self.divider();
        let mut line = String::new();
        line.push_str(&div);
        if self.show_row_numbers {
            line.push_str(&" ".repeat(ROW_NUMBER_WIDTH));
            line.push_str(&div);
        }
        for (i, &w) in self.widths.iter().enumerate() {
            let text = match &self.headers[i] {
                Some(text) => text.clone(),
                None if self.show_column_numbers => i.to_string(),
                None => String::new(),
            };
            line.push_str(&format!("{text:>w$}"));
            line.push_str(&div);
        }
        line
    }
}

fn run(glyph: char, count: usize) -> String {
    let mut s = String::with_capacity(count);
    for _ in 0..count {
        s.push(glyph);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_renderer(title: &str, rows: usize, cols: usize) -> TableRenderer<Vec<u8>> {
        TableRenderer::with_sink(title, rows, cols, Vec::new()).unwrap()
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = TableRenderer::with_sink("t", 0, 3, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimensions { rows: 0, cols: 3 }
        ));
        let err = TableRenderer::with_sink("t", 3, 0, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimensions { rows: 3, cols: 0 }
        ));
    }

    #[test]
    fn test_header_sets_column_width() {
        let mut table = buffer_renderer("t", 1, 3);
        table.set_column_header(1, "status").unwrap();
        assert_eq!(table.widths, vec![5, 6, 5]);
    }

    #[test]
    fn test_header_index_out_of_range() {
        let mut table = buffer_renderer("t", 1, 3);
        let err = table.set_column_header(5, "x").unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfRange {
                index: 5,
                columns: 3
            }
        ));
    }

    #[test]
    fn test_set_column_width_single_and_all() {
        let mut table = buffer_renderer("t", 1, 3);
        table.set_column_width(9, Some(1)).unwrap();
        assert_eq!(table.widths, vec![5, 9, 5]);
        table.set_column_width(7, None).unwrap();
        assert_eq!(table.widths, vec![7, 7, 7]);
        assert!(table.set_column_width(7, Some(3)).is_err());
    }

    #[test]
    fn test_table_width_frozen_at_first_write() {
        let mut table = buffer_renderer("t", 2, 2);
        assert_eq!(table.table_width(), None);
        table.write_cell("a").unwrap();
        // 2 * 5 wide columns, 3 dividers, row-number column plus its
        // divider.
        assert_eq!(table.table_width(), Some(17));
        table.set_column_width(10, None).unwrap();
        table.write_cell("b").unwrap();
        assert_eq!(table.table_width(), Some(17));
    }

    #[test]
    fn test_table_width_without_row_numbers() {
        let mut table = buffer_renderer("t", 1, 2);
        table.show_row_numbers(false);
        table.write_cell("a").unwrap();
        assert_eq!(table.table_width(), Some(13));
    }

    #[test]
    fn test_completion_state_machine() {
        let mut table = buffer_renderer("t", 2, 2);
        for value in 1..=4 {
            assert!(!table.is_complete());
            table.write_cell(value).unwrap();
        }
        assert!(table.is_complete());
        assert_eq!(table.cells_written(), 4);
        let err = table.write_cell(5).unwrap_err();
        assert!(matches!(err, Error::TableComplete { capacity: 4 }));
    }

    #[test]
    fn test_title_margin_centering() {
        let mut table = buffer_renderer("Test", 1, 3);
        table.set_column_width(4, None).unwrap();
        // Table width 20: title "Test" sits behind a 7-space margin.
        let row = table.title_row(20);
        assert_eq!(row, "|       Test       |");
        assert_eq!(row.chars().count(), 20);
    }

    #[test]
    fn test_title_margin_clamps_to_one() {
        let table = buffer_renderer("a title wider than the table", 1, 1);
        let row = table.title_row(9);
        assert!(row.starts_with("| a title"));
        assert!(row.ends_with('|'));
    }

    #[test]
    fn test_last_cell_emits_border_not_divider() {
        let mut table = buffer_renderer("t", 2, 2);
        table.show_row_dividers(true).use_extended_glyphs(true);
        table.write_row(["a", "b", "c", "d"]).unwrap();
        let output = String::from_utf8(table.into_sink()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        // Cross junctions appear under the headers and after the first
        // row; the final row is followed by the closing border only.
        assert_eq!(lines.iter().filter(|line| line.contains('┼')).count(), 2);
        assert_eq!(lines[lines.len() - 2], "│  1│    c│    d│");
        assert_eq!(*lines.last().unwrap(), "└───┴─────┴─────┘");
    }

    #[test]
    fn test_row_boundary_emits_row_number() {
        let mut table = buffer_renderer("t", 2, 3);
        table.write_row(1..=4).unwrap();
        let output = String::from_utf8(table.into_sink()).unwrap();
        // Cell index 3 opened the second visual row.
        assert!(output.contains("\n|  1|    4"));
    }
}
