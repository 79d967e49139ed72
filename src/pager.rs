// Pagination / windowing core
//
// Every paginated list in the dashboard (channel product contribution,
// refund-heavy products, top sellers, rising products) shares this state.
// Each list view owns its own Pager - App just renders and routes input.
//
// Design principles:
// 1. Component owns state (App is agnostic)
// 2. 1-indexed pages, fixed page size per list
// 3. Navigation clamps at the boundaries, never wraps
// 4. Switching the underlying list identity resets to page 1

/// Fixed page size used by every product list in the dashboard
pub const PAGE_SIZE: usize = 5;

/// Pagination state for a single list view
///
/// Invariant: `1 <= current <= page_count(total)` whenever `total > 0`.
/// The pager does not hold the item count - callers pass the current
/// `total` so a regenerated (possibly shorter) list can never be
/// indexed past its end.
#[derive(Debug, Clone)]
pub struct Pager {
    /// Current page (1-indexed)
    current: usize,

    /// Items per page (constant for the lifetime of the pager)
    page_size: usize,
}

impl Pager {
    /// Create a pager on page 1
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }

    /// Current page (1-indexed)
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of pages for `total` items (0 when the list is empty)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Whether page-number controls should be rendered at all.
    /// A single page (or an empty list) renders no control row.
    pub fn has_controls(&self, total: usize) -> bool {
        self.page_count(total) > 1
    }

    /// Page numbers to render: every page from 1 to the last, no
    /// truncation. Lists are capped at 50 items so this stays small.
    pub fn page_numbers(&self, total: usize) -> std::ops::RangeInclusive<usize> {
        1..=self.page_count(total)
    }

    /// Whether the previous-page control is disabled
    pub fn at_first(&self) -> bool {
        self.current == 1
    }

    /// Whether the next-page control is disabled
    pub fn at_last(&self, total: usize) -> bool {
        self.current >= self.page_count(total)
    }

    /// Index window of the visible slice: `[(current-1)*size, current*size)`
    /// clamped to `total`. Empty (never negative-length) when the page
    /// points past the end.
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.current - 1).saturating_mul(self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Visible slice of `items` for the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.window(items.len())]
    }

    /// Go to the previous page (no-op on page 1)
    pub fn prev(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Go to the next page (no-op on the last page)
    pub fn next(&mut self, total: usize) {
        if !self.at_last(total) {
            self.current += 1;
        }
    }

    /// Jump to a specific page, clamped to `[1, page_count]`
    pub fn set(&mut self, page: usize, total: usize) {
        let last = self.page_count(total).max(1);
        self.current = page.clamp(1, last);
    }

    /// Reset to page 1. Must be called whenever the underlying list
    /// identity changes (tab/category switch), so the pager can never
    /// point past the end of a freshly generated shorter list.
    pub fn reset(&mut self) {
        self.current = 1;
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_matches_ceiling() {
        let pager = Pager::default();
        assert_eq!(pager.page_count(0), 0);
        assert_eq!(pager.page_count(3), 1);
        assert_eq!(pager.page_count(5), 1);
        assert_eq!(pager.page_count(6), 2);
        assert_eq!(pager.page_count(25), 5);
        assert_eq!(pager.page_count(50), 10);
    }

    #[test]
    fn controls_hidden_for_single_page() {
        let pager = Pager::default();
        assert!(!pager.has_controls(0));
        assert!(!pager.has_controls(3));
        assert!(!pager.has_controls(5));
        assert!(pager.has_controls(6));
        assert!(pager.has_controls(25));
    }

    #[test]
    fn page_numbers_render_every_page() {
        let pager = Pager::default();
        let pages: Vec<usize> = pager.page_numbers(25).collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn window_length_never_exceeds_page_size() {
        let mut pager = Pager::default();
        // total=25: page 3 shows items 11-15 (indices 10-14)
        pager.set(3, 25);
        assert_eq!(pager.window(25), 10..15);

        // last partial page
        pager.set(5, 23);
        let w = pager.window(23);
        assert_eq!(w, 20..23);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn window_on_short_list_shows_everything() {
        let pager = Pager::default();
        // total=3: single page, all 3 items visible
        assert_eq!(pager.window(3), 0..3);
        assert!(!pager.has_controls(3));
    }

    #[test]
    fn window_is_empty_past_the_end() {
        let mut pager = Pager::default();
        pager.set(5, 25);
        // List regenerated shorter without a reset - window must be
        // empty, not panic or go negative
        let w = pager.window(8);
        assert!(w.is_empty());
    }

    #[test]
    fn slice_returns_expected_items() {
        let items: Vec<usize> = (0..25).collect();
        let mut pager = Pager::default();
        pager.set(3, items.len());
        assert_eq!(pager.slice(&items), &[10, 11, 12, 13, 14]);
    }

    #[test]
    fn navigation_clamps_at_boundaries() {
        let mut pager = Pager::default();
        assert!(pager.at_first());
        pager.prev();
        assert_eq!(pager.current(), 1);

        pager.set(5, 25);
        assert!(pager.at_last(25));
        pager.next(25);
        assert_eq!(pager.current(), 5);
    }

    #[test]
    fn boundary_flags() {
        let mut pager = Pager::default();
        assert!(pager.at_first());
        assert!(!pager.at_last(25));

        pager.next(25);
        assert!(!pager.at_first());
        assert!(!pager.at_last(25));

        pager.set(5, 25);
        assert!(pager.at_last(25));
    }

    #[test]
    fn reset_returns_to_page_one() {
        let mut pager = Pager::default();
        pager.set(4, 25);
        pager.reset();
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn set_clamps_out_of_range_pages() {
        let mut pager = Pager::default();
        pager.set(99, 25);
        assert_eq!(pager.current(), 5);
        pager.set(0, 25);
        assert_eq!(pager.current(), 1);
        // Empty list: stays on page 1
        pager.set(7, 0);
        assert_eq!(pager.current(), 1);
    }
}
