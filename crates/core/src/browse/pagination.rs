use serde::Serialize;

/// The page links to show around the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pages: Vec<u32>,
    current_page: u32,
    total_pages: u32,
}

impl PageWindow {
    /// At most `max_visible` consecutive pages, centred on `current_page`
    /// and shifted left when close to the last page.
    pub fn compute(current_page: u32, total_pages: u32, max_visible: u32) -> Self {
        let last = total_pages.max(1);
        let max_visible = max_visible.clamp(1, last);
        let current = current_page.clamp(1, last);

        let mut start = current.saturating_sub(max_visible / 2).max(1);
        let end = start.saturating_add(max_visible - 1).min(last);
        if end - start + 1 < max_visible && start > 1 {
            start = end.saturating_sub(max_visible - 1).max(1);
        }

        Self {
            pages: (start..=end).collect(),
            current_page: current,
            total_pages,
        }
    }

    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// First/previous links are live.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Next/last links are live.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_centred() {
        let window = PageWindow::compute(10, 20, 5);
        assert_eq!(window.pages(), &[8, 9, 10, 11, 12]);
        assert!(window.has_previous());
        assert!(window.has_next());
    }

    #[test]
    fn test_window_at_start() {
        let window = PageWindow::compute(1, 20, 5);
        assert_eq!(window.pages(), &[1, 2, 3, 4, 5]);
        assert!(!window.has_previous());
    }

    #[test]
    fn test_window_shifted_near_end() {
        let window = PageWindow::compute(19, 20, 5);
        assert_eq!(window.pages(), &[16, 17, 18, 19, 20]);

        let window = PageWindow::compute(20, 20, 5);
        assert_eq!(window.pages(), &[16, 17, 18, 19, 20]);
        assert!(!window.has_next());
    }

    #[test]
    fn test_window_fewer_pages_than_slots() {
        let window = PageWindow::compute(2, 3, 5);
        assert_eq!(window.pages(), &[1, 2, 3]);
    }

    #[test]
    fn test_window_even_size() {
        let window = PageWindow::compute(5, 10, 4);
        assert_eq!(window.pages(), &[3, 4, 5, 6]);
    }

    #[test]
    fn test_window_wider_than_page_count() {
        let window = PageWindow::compute(3, 10, u32::MAX);
        assert_eq!(window.pages(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(window.current_page(), 3);

        let window = PageWindow::compute(u32::MAX, u32::MAX, 5);
        assert_eq!(window.pages().len(), 5);
        assert_eq!(window.pages().last(), Some(&u32::MAX));
        assert!(!window.has_next());
    }
}
