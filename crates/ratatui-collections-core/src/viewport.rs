use std::ops::Range;

/// Offset of a window of `height` rows that keeps `selected` visible.
///
/// Scrolls only as far as needed. The result is clamped to `0..=len.saturating_sub(height)`.
pub fn sync_to_selection(
    selected: Option<usize>,
    offset: usize,
    height: usize,
    len: usize,
) -> usize {
    let height = height.max(1);
    let offset = match selected {
        Some(i) if i < offset => i,
        Some(i) if i - offset >= height => i + 1 - height,
        _ => offset,
    };
    offset.min(max_offset(height, len))
}

fn max_offset(height: usize, len: usize) -> usize {
    len.saturating_sub(height)
}

/// A bounded-height window over an ordered collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self {
            offset: 0,
            height: height.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the window, then scrolls so `selected` stays visible.
    pub fn set_height(&mut self, height: usize, selected: Option<usize>, len: usize) {
        self.height = height.max(1);
        self.sync(selected, len);
    }

    pub fn sync(&mut self, selected: Option<usize>, len: usize) {
        self.offset = sync_to_selection(selected, self.offset, self.height, len);
    }

    /// The offset clamped to `len` without mutating, for read-only render paths.
    pub fn clamped_offset(&self, len: usize) -> usize {
        self.offset.min(max_offset(self.height, len))
    }

    /// Half-open range of indices to render.
    pub fn visible_window(&self, len: usize) -> Range<usize> {
        let start = self.clamped_offset(len);
        start..(start + self.height).min(len)
    }

    pub fn has_more_above(&self, len: usize) -> bool {
        self.clamped_offset(len) > 0
    }

    pub fn has_more_below(&self, len: usize) -> bool {
        self.clamped_offset(len) + self.height < len
    }

    /// Scroll progress as a percentage of the last visible row, or `None` when everything fits.
    pub fn percent(&self, len: usize) -> Option<u8> {
        if len == 0 || len <= self.height {
            return None;
        }
        let bottom = self.visible_window(len).end as f64;
        let pct = (bottom / len as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
