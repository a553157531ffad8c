//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible window over the projected
//! lines and scrolls it only when the cursor gets too close to an edge.

use std::ops::Range;

/// Rows kept between the cursor and the window edge by default.
pub const DEFAULT_MARGIN: usize = 3;

/// Manages the visible portion of the projection.
///
/// The viewport tracks:
/// - Terminal dimensions (width, height)
/// - First visible virtual line
/// - Total projected lines
/// - Scroll margin
///
/// # Example
///
/// ```
/// use vj::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 10, 100);
/// assert_eq!(vp.visible_range(), 0..10);
///
/// // Moving the cursor to row 7 leaves less than the margin below it.
/// vp.scroll_down(7);
/// assert_eq!(vp.offset(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
    margin: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Viewport {
    /// Create a new viewport with the default margin.
    ///
    /// # Arguments
    ///
    /// * `width` - Terminal width in columns
    /// * `height` - Rows available for the tree
    /// * `total_lines` - Lines in the current projection
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Use `margin` rows of scroll margin instead of the default.
    #[must_use]
    pub const fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// First visible virtual line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Configured margin.
    pub const fn margin(&self) -> usize {
        self.margin
    }

    /// Margin in effect at the current height.
    ///
    /// Windows too short to hold the margin above and below the cursor
    /// plus a few rows scroll without one.
    pub const fn effective_margin(&self) -> usize {
        if self.height as usize <= self.margin.saturating_mul(2).saturating_add(3) {
            0
        } else {
            self.margin
        }
    }

    /// Range of visible virtual lines, clamped to the projection.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = self
            .offset
            .saturating_add(self.height as usize)
            .min(self.total_lines);
        start..end
    }

    /// The visible part of `lines`.
    pub fn slice<'a, T>(&self, lines: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(lines.len());
        let start = range.start.min(end);
        &lines[start..end]
    }

    /// Rows below the last projected line, drawn as filler.
    pub fn blank_rows(&self) -> usize {
        (self.height as usize).saturating_sub(self.visible_range().len())
    }

    /// Screen row of `virtual_line`, if it is on screen.
    pub fn row_of(&self, virtual_line: usize) -> Option<usize> {
        self.visible_range()
            .contains(&virtual_line)
            .then(|| virtual_line - self.offset)
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }

        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset.min(max_offset) as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    /// Scroll so the cursor keeps the margin below it.
    pub const fn scroll_down(&mut self, cursor: usize) {
        let height = self.height as usize;
        let wanted = cursor.saturating_add(1 + self.effective_margin());
        if wanted > self.offset.saturating_add(height) {
            self.offset = wanted.saturating_sub(height);
        }
    }

    /// Scroll so the cursor keeps the margin above it.
    pub const fn scroll_up(&mut self, cursor: usize) {
        let margin = self.effective_margin();
        if cursor < self.offset.saturating_add(margin) {
            self.offset = cursor.saturating_sub(margin);
        }
    }

    /// Bring the cursor into view from either direction.
    pub const fn reveal(&mut self, cursor: usize) {
        self.scroll_down(cursor);
        self.scroll_up(cursor);
    }

    /// Resize the viewport, keeping the cursor on screen.
    pub fn resize(&mut self, width: u16, height: u16, cursor: usize) {
        self.width = width;
        self.height = height;
        if cursor.saturating_add(3) >= self.offset.saturating_add(height as usize) {
            self.offset = cursor.saturating_add(1).saturating_sub(height as usize);
        }
        tracing::debug!(
            width,
            height,
            offset = self.offset,
            margin = self.effective_margin(),
            "viewport resized"
        );
    }

    /// Update the number of projected lines after a fold edit or reload.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Calculate the maximum offset that still fills the window.
    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
