use std::ops::Range;

/// Vertical scroll state for a region whose content may outgrow its viewport.
///
/// Heights are in rows. The extent always equals the content height and the
/// offset is kept within `0..=max_offset()` whenever either height changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollRegion {
    content_height: usize,
    viewport_height: usize,
    offset: usize,
}

impl ScrollRegion {
    pub fn new(content_height: usize, viewport_height: usize) -> Self {
        Self {
            content_height,
            viewport_height,
            offset: 0,
        }
    }

    /// Record a new content height. Returns `true` when the extent changed.
    pub fn set_content_height(&mut self, height: usize) -> bool {
        let changed = self.content_height != height;
        self.content_height = height;
        self.clamp();
        changed
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp();
    }

    pub fn extent(&self) -> usize {
        self.content_height
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.max_offset() > 0
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Rows of content currently visible.
    pub fn visible(&self) -> Range<usize> {
        let end = (self.offset + self.viewport_height).min(self.content_height);
        self.offset.min(end)..end
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp();
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.page_step() as isize);
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-(self.page_step() as isize));
    }

    pub fn home(&mut self) {
        self.offset = 0;
    }

    pub fn end(&mut self) {
        self.offset = self.max_offset();
    }

    // Keep one row of context when paging
    fn page_step(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
