//! Character frame and viewport types

use std::fmt;

use crate::consts::{MAX_VIEW_HEIGHT, MAX_VIEW_WIDTH, MIN_VIEW_HEIGHT, MIN_VIEW_WIDTH};
use crate::error::{EngineError, EngineResult};

/// Frame dimensions in characters, always within the supported limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Clamp a host-requested size into the supported range
    pub fn clamped(width: i64, height: i64) -> Self {
        let w = width.clamp(MIN_VIEW_WIDTH as i64, MAX_VIEW_WIDTH as i64) as usize;
        let h = height.clamp(MIN_VIEW_HEIGHT as i64, MAX_VIEW_HEIGHT as i64) as usize;
        if w as i64 != width || h as i64 != height {
            log::debug!("Viewport {}x{} clamped to {}x{}", width, height, w, h);
        }
        Self { width: w, height: h }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Fixed-size grid of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Frame {
    /// Blank frame covering `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            cells: vec![' '; viewport.width * viewport.height],
        }
    }

    /// Rebuild a frame from its rows (used when restoring a pinned frame)
    pub fn from_rows(rows: &[String]) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if !(MIN_VIEW_WIDTH..=MAX_VIEW_WIDTH).contains(&width) || !(MIN_VIEW_HEIGHT..=MAX_VIEW_HEIGHT).contains(&height) {
            return Err(EngineError::invalid_state(format!("frame {}x{} outside viewport limits", width, height)));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(row.chars());
            if cells.len() - before != width {
                return Err(EngineError::invalid_state(format!("frame row {} is not {} characters wide", y, width)));
            }
        }
        if cells.iter().any(|c| c.is_control()) {
            return Err(EngineError::invalid_state("frame contains control characters"));
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = ch;
        }
    }

    /// Write `text` starting at `(x, y)`, clipped to the frame
    pub fn put_str(&mut self, x: usize, y: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i, y, ch);
        }
    }

    /// Write `text` horizontally centred on row `y`; text wider than the frame is clipped on both sides
    pub fn put_centered(&mut self, y: usize, text: &str) {
        let len = text.chars().count();
        if len <= self.width {
            self.put_str((self.width - len) / 2, y, text);
        } else {
            let skip = (len - self.width) / 2;
            let clipped: String = text.chars().skip(skip).take(self.width).collect();
            self.put_str(0, y, &clipped);
        }
    }

    /// Row `y` as a string
    pub fn row(&self, y: usize) -> String {
        match self.idx(0, y) {
            Some(start) => self.cells[start..start + self.width].iter().collect(),
            None => String::new(),
        }
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row(y)).collect()
    }
}

/// Rows joined with a newline after each one
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for ch in row {
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_clamps() {
        let vp = Viewport::clamped(0, -5);
        assert_eq!((vp.width(), vp.height()), (MIN_VIEW_WIDTH, MIN_VIEW_HEIGHT));
        let vp = Viewport::clamped(10_000, 10_000);
        assert_eq!((vp.width(), vp.height()), (MAX_VIEW_WIDTH, MAX_VIEW_HEIGHT));
        let vp = Viewport::clamped(80, 24);
        assert_eq!((vp.width(), vp.height()), (80, 24));
    }

    #[test]
    fn test_display_shape() {
        let mut frame = Frame::new(Viewport::clamped(10, 4));
        frame.put_str(0, 0, "█▓▒");
        let text = frame.to_string();
        let lines: Vec<&str> = text.split_terminator('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
        assert!(text.ends_with('\n'));
        assert!(lines[0].starts_with("█▓▒"));
    }

    #[test]
    fn test_put_centered_clips() {
        let mut frame = Frame::new(Viewport::clamped(8, 4));
        frame.put_centered(1, "ab");
        assert_eq!(frame.row(1), "   ab   ");
        frame.put_centered(2, "0123456789");
        assert_eq!(frame.row(2), "12345678");
        frame.put_centered(9, "ignored");
        assert_eq!(frame.rows().len(), 4);
    }

    #[test]
    fn test_from_rows_round_trip() {
        let mut frame = Frame::new(Viewport::clamped(12, 5));
        frame.put_centered(2, "LEVEL 1");
        let back = Frame::from_rows(&frame.rows()).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let mut rows = Frame::new(Viewport::clamped(12, 5)).rows();
        rows[3].push('x');
        assert!(Frame::from_rows(&rows).is_err());
        assert!(Frame::from_rows(&[]).is_err());
    }
}
