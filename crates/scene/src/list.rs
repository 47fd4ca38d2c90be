/// Current-page state for a paginated list view.
///
/// This is the UI boundary the pagination contract talks about: the page
/// resets to 1 whenever the underlying filtered sequence is replaced, and
/// next/previous requests are clamped instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Call whenever the filtered item set changes (every viewport
    /// recompute); otherwise the page could point past the new end.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn next(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListState;

    #[test]
    fn next_and_prev_are_clamped() {
        let mut s = ListState::new();
        s.prev();
        assert_eq!(s.page(), 1);
        s.next(2);
        assert_eq!(s.page(), 2);
        s.next(2);
        assert_eq!(s.page(), 2);
        s.prev();
        assert_eq!(s.page(), 1);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut s = ListState::new();
        s.next(5);
        s.next(5);
        s.reset();
        assert_eq!(s.page(), 1);
    }
}
