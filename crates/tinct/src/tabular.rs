//! Styled tables with box-drawing borders.
//!
//! Cells may contain plain text or markup tags; widths are computed from
//! visible lengths so styled content lines up. Column, row, and table styles
//! are space-separated tag lists like `"bold cyan"`, expanded through the
//! styler at render time.

use crate::error::Error;
use crate::styler::Styler;
use tinct_markup::visible_len;

/// Border character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Rounded,
    Square,
    Double,
    Heavy,
    /// Horizontal rules only.
    Minimal,
    /// No visible borders.
    None,
}

struct BoxChars {
    tl: char,
    tr: char,
    bl: char,
    br: char,
    h: char,
    v: char,
    lt: char,
    rt: char,
    tt: char,
    bt: char,
    cross: char,
}

impl BoxStyle {
    fn chars(self) -> BoxChars {
        match self {
            BoxStyle::Rounded => BoxChars {
                tl: '╭', tr: '╮', bl: '╰', br: '╯',
                h: '─', v: '│', lt: '├', rt: '┤',
                tt: '┬', bt: '┴', cross: '┼',
            },
            BoxStyle::Square => BoxChars {
                tl: '┌', tr: '┐', bl: '└', br: '┘',
                h: '─', v: '│', lt: '├', rt: '┤',
                tt: '┬', bt: '┴', cross: '┼',
            },
            BoxStyle::Double => BoxChars {
                tl: '╔', tr: '╗', bl: '╚', br: '╝',
                h: '═', v: '║', lt: '╠', rt: '╣',
                tt: '╦', bt: '╩', cross: '╬',
            },
            BoxStyle::Heavy => BoxChars {
                tl: '┏', tr: '┓', bl: '┗', br: '┛',
                h: '━', v: '┃', lt: '┣', rt: '┫',
                tt: '┳', bt: '┻', cross: '╋',
            },
            BoxStyle::Minimal => BoxChars {
                tl: ' ', tr: ' ', bl: ' ', br: ' ',
                h: '─', v: ' ', lt: ' ', rt: ' ',
                tt: ' ', bt: ' ', cross: ' ',
            },
            BoxStyle::None => BoxChars {
                tl: ' ', tr: ' ', bl: ' ', br: ' ',
                h: ' ', v: ' ', lt: ' ', rt: ' ',
                tt: ' ', bt: ' ', cross: ' ',
            },
        }
    }
}

/// Cell text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// Strategy for content wider than its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Truncate with a trailing ellipsis.
    #[default]
    Ellipsis,
    /// Truncate silently.
    Crop,
}

/// A table column, built with chained setters.
///
/// ```rust
/// use tinct::tabular::{Column, Justify};
///
/// let col = Column::new("Size").justify(Justify::Right).max_width(12);
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    header: String,
    style: Option<String>,
    justify: Justify,
    overflow: Overflow,
    width: Option<usize>,
    min_width: Option<usize>,
    max_width: Option<usize>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            style: None,
            justify: Justify::Left,
            overflow: Overflow::Ellipsis,
            width: None,
            min_width: None,
            max_width: None,
        }
    }

    /// Space-separated style tags applied to every cell in this column.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Fixed width; skips content-based sizing.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

#[derive(Debug, Clone)]
struct Row {
    cells: Vec<String>,
    style: Option<String>,
}

/// A styled table.
///
/// ```rust
/// use tinct::{Styler, tabular::{Table, Column}};
///
/// let mut styler = Styler::new();
/// styler.disable();
///
/// let mut table = Table::new().title("Users");
/// table.add_column(Column::new("Name").style("bold"));
/// table.add_column(Column::new("Email"));
/// table.add_row(["Alice", "alice@example.com"])?;
/// table.add_row(["Bob", "bob@example.com"])?;
/// let rendered = table.render(&styler);
/// assert!(rendered.contains("Alice"));
/// # Ok::<(), tinct::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    title: Option<String>,
    caption: Option<String>,
    style: Option<String>,
    title_style: String,
    caption_style: String,
    header_style: Option<String>,
    border_style: Option<String>,
    show_header: bool,
    show_lines: bool,
    padding: (usize, usize),
    expand: bool,
    min_width: Option<usize>,
    box_style: BoxStyle,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            title: None,
            caption: None,
            style: None,
            title_style: "bold".to_string(),
            caption_style: "dim".to_string(),
            header_style: Some("bold".to_string()),
            border_style: None,
            show_header: true,
            show_lines: false,
            padding: (0, 1),
            expand: false,
            min_width: None,
            box_style: BoxStyle::Rounded,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    // ==================== Configuration ====================

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Default style tags for cells not covered by a column or row style.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn title_style(mut self, style: impl Into<String>) -> Self {
        self.title_style = style.into();
        self
    }

    pub fn caption_style(mut self, style: impl Into<String>) -> Self {
        self.caption_style = style.into();
        self
    }

    pub fn header_style(mut self, style: impl Into<String>) -> Self {
        self.header_style = Some(style.into());
        self
    }

    pub fn border_style(mut self, style: impl Into<String>) -> Self {
        self.border_style = Some(style.into());
        self
    }

    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Draw separator rules between data rows.
    pub fn show_lines(mut self, show: bool) -> Self {
        self.show_lines = show;
        self
    }

    /// (vertical, horizontal) cell padding. Only the horizontal component
    /// affects single-line rendering.
    pub fn padding(mut self, padding: (usize, usize)) -> Self {
        self.padding = padding;
        self
    }

    /// Grow columns to fill the terminal width.
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn box_style(mut self, box_style: BoxStyle) -> Self {
        self.box_style = box_style;
        self
    }

    // ==================== Content ====================

    /// Appends a column. Existing rows are back-filled with empty cells.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
        for row in &mut self.rows {
            row.cells.push(String::new());
        }
    }

    /// Appends a data row. Short rows pad with empty cells; rows with more
    /// cells than columns are rejected.
    pub fn add_row<I, S>(&mut self, cells: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_styled_row(cells, None)
    }

    /// Like [`add_row`](Self::add_row) with a style applied to every cell.
    pub fn add_styled_row<I, S>(&mut self, cells: I, style: Option<String>) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        if cells.len() > self.columns.len() {
            return Err(Error::TooManyCells {
                expected: self.columns.len(),
                got: cells.len(),
            });
        }
        cells.resize(self.columns.len(), String::new());
        self.rows.push(Row { cells, style });
        Ok(())
    }

    /// Replaces the value of one cell.
    pub fn update_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<(), Error> {
        if row >= self.rows.len() || col >= self.columns.len() {
            return Err(Error::CellOutOfBounds { row, col });
        }
        self.rows[row].cells[col] = value.into();
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    // ==================== Rendering ====================

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                if let Some(fixed) = col.width {
                    return fixed;
                }
                let mut width = col.min_width.unwrap_or(0).max(visible_len(&col.header));
                for row in &self.rows {
                    width = width.max(visible_len(&row.cells[i]));
                }
                if let Some(max) = col.max_width {
                    width = width.min(max);
                }
                width
            })
            .collect();

        // Distribute extra space for min_width / expand.
        let mut target = self.min_width.unwrap_or(0);
        if self.expand {
            let terminal = terminal_size::terminal_size()
                .map(|(w, _)| w.0 as usize)
                .unwrap_or(80);
            // Borders and padding around every column.
            let chrome = self.columns.len() + 1 + self.columns.len() * self.padding.1 * 2;
            target = target.max(terminal.saturating_sub(chrome));
        }
        let total: usize = widths.iter().sum();
        if !widths.is_empty() && total < target {
            let per_col = (target - total) / widths.len();
            for w in &mut widths {
                *w += per_col;
            }
        }
        widths
    }

    fn apply_style(&self, styler: &Styler, text: &str, style: &str) -> String {
        let mut wrapped = text.to_string();
        for tag in style.split_whitespace().rev() {
            wrapped = format!("<{0}>{1}</{0}>", tag, wrapped);
        }
        styler.format(&wrapped)
    }

    fn fit(&self, text: &str, width: usize, overflow: Overflow) -> String {
        if visible_len(text) <= width {
            return text.to_string();
        }
        match overflow {
            Overflow::Ellipsis if width > 0 => {
                let mut out: String = text.chars().take(width - 1).collect();
                out.push('…');
                out
            }
            _ => text.chars().take(width).collect(),
        }
    }

    fn justify(&self, text: &str, width: usize, align: Justify) -> String {
        let len = visible_len(text);
        if len >= width {
            return text.to_string();
        }
        let pad = width - len;
        match align {
            Justify::Left => format!("{}{}", text, " ".repeat(pad)),
            Justify::Right => format!("{}{}", " ".repeat(pad), text),
            Justify::Center => {
                let left = pad / 2;
                format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
            }
        }
    }

    fn render_rule(
        &self,
        styler: &Styler,
        widths: &[usize],
        left: char,
        mid: char,
        right: char,
        junction: char,
    ) -> String {
        let pad = self.padding.1;
        let mut line = String::new();
        line.push(left);
        for (i, width) in widths.iter().enumerate() {
            line.extend(std::iter::repeat(mid).take(width + pad * 2));
            if i < widths.len() - 1 {
                line.push(junction);
            }
        }
        line.push(right);

        match &self.border_style {
            Some(style) => self.apply_style(styler, &line, style),
            None => line,
        }
    }

    fn render_cells(
        &self,
        styler: &Styler,
        widths: &[usize],
        cells: &[String],
        uniform_style: Option<&str>,
        row_style: Option<&str>,
    ) -> String {
        let chars = self.box_style.chars();
        let v = match &self.border_style {
            Some(style) => self.apply_style(styler, &chars.v.to_string(), style),
            None => chars.v.to_string(),
        };
        let pad = " ".repeat(self.padding.1);

        let mut line = String::new();
        line.push_str(&v);
        for ((cell, col), width) in cells.iter().zip(&self.columns).zip(widths) {
            let fitted = self.fit(cell, *width, col.overflow);
            let justified = self.justify(&fitted, *width, col.justify);

            // Precedence: uniform (header) > column > row > table style.
            let style = uniform_style
                .or(col.style.as_deref())
                .or(row_style)
                .or(self.style.as_deref());
            let styled = match style {
                Some(style) => self.apply_style(styler, &justified, style),
                None => justified,
            };

            line.push_str(&pad);
            line.push_str(&styled);
            line.push_str(&pad);
            line.push_str(&v);
        }
        line
    }

    /// Renders the table to a multi-line string.
    pub fn render(&self, styler: &Styler) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let widths = self.column_widths();
        let chars = self.box_style.chars();
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(self.apply_style(styler, title, &self.title_style));
        }

        lines.push(self.render_rule(styler, &widths, chars.tl, chars.h, chars.tr, chars.tt));

        if self.show_header {
            let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
            lines.push(self.render_cells(
                styler,
                &widths,
                &headers,
                self.header_style.as_deref(),
                None,
            ));
            lines.push(self.render_rule(styler, &widths, chars.lt, chars.h, chars.rt, chars.cross));
        }

        for (i, row) in self.rows.iter().enumerate() {
            lines.push(self.render_cells(styler, &widths, &row.cells, None, row.style.as_deref()));
            if self.show_lines && i < self.rows.len() - 1 {
                lines.push(self.render_rule(
                    styler,
                    &widths,
                    chars.lt,
                    chars.h,
                    chars.rt,
                    chars.cross,
                ));
            }
        }

        lines.push(self.render_rule(styler, &widths, chars.bl, chars.h, chars.br, chars.bt));

        if let Some(caption) = &self.caption {
            lines.push(self.apply_style(styler, caption, &self.caption_style));
        }

        lines.join("\n")
    }
}
