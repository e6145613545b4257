//! Selection and scrolling for the text log list.

/// Selected row of the text log, clamped to the current row count.
///
/// Row 0 is the newest message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InboxScroll {
    selected: usize,
    rows: usize,
    page_height: usize,
}

impl InboxScroll {
    /// Selected row index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of rows the list currently has.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Update the row count after a re-render, keeping the selection valid.
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    /// Record how many rows fit in the visible list area.
    pub fn set_page_height(&mut self, height: usize) {
        self.page_height = height;
    }

    /// Move the selection by half the visible height.
    pub fn half_page_down(&mut self) {
        self.scroll_by(self.half_page() as isize);
    }

    /// Move the selection back by half the visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_by(-(self.half_page() as isize));
    }

    /// Select the first row.
    pub fn to_top(&mut self) {
        self.selected = 0;
    }

    /// Select the last row.
    pub fn to_bottom(&mut self) {
        self.selected = self.rows.saturating_sub(1);
    }

    fn half_page(&self) -> usize {
        (self.page_height / 2).max(1)
    }

    fn scroll_by(&mut self, amount: isize) {
        let last = self.rows.saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(amount).min(last);
    }
}
