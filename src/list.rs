//! Generic controller for a focusable, scrollable, wrap-around list.
//!
//! One instance backs the connections list and one the menu. The controller
//! owns selection and scroll state only; row labels are rebuilt by the owner
//! whenever the backing data or language changes, so the two can never hold
//! diverging copies.

/// A display row bound to an activation payload
#[derive(Clone, Debug)]
pub struct ListRow<A> {
    pub label: String,
    pub action: A,
}

impl<A> ListRow<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

#[derive(Debug)]
pub struct ListController<A> {
    rows: Vec<ListRow<A>>,
    selected: Option<usize>,
    offset: usize,
    viewport: usize,
}

impl<A> Default for ListController<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ListController<A> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            offset: 0,
            viewport: usize::MAX,
        }
    }

    pub fn with_rows(rows: Vec<ListRow<A>>) -> Self {
        let mut controller = Self::new();
        controller.set_rows(rows);
        controller
    }

    /// Replace all rows, keeping the selection index where possible
    pub fn set_rows(&mut self, rows: Vec<ListRow<A>>) {
        self.rows = rows;
        self.selected = if self.rows.is_empty() {
            None
        } else {
            Some(self.selected.unwrap_or(0).min(self.rows.len() - 1))
        };
        self.update_scroll();
    }

    pub fn rows(&self) -> &[ListRow<A>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.selected = Some(index.min(self.rows.len() - 1));
            self.update_scroll();
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Tell the controller how many rows fit on screen. Called by the
    /// renderer before reading `scroll_offset`.
    pub fn set_viewport(&mut self, height: usize) {
        self.viewport = height.max(1);
        self.update_scroll();
    }

    /// Advance the selection, wrapping past the last row to the first
    pub fn move_next(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some((selected + 1) % self.rows.len());
            self.update_scroll();
        }
    }

    /// Retreat the selection, wrapping before the first row to the last
    pub fn move_previous(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(if selected == 0 {
                self.rows.len() - 1
            } else {
                selected - 1
            });
            self.update_scroll();
        }
    }

    /// The payload bound to the current row; `None` when the list is empty
    pub fn activate(&self) -> Option<&A> {
        self.selected.map(|i| &self.rows[i].action)
    }

    pub fn insert_at(&mut self, index: usize, row: ListRow<A>) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
        self.selected = match self.selected {
            // First real row replaces the placeholder and takes the selection
            None => Some(index),
            Some(selected) if index <= selected => Some(selected + 1),
            Some(selected) => Some(selected),
        };
        self.update_scroll();
    }

    pub fn remove_at(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        self.selected = if self.rows.is_empty() {
            None
        } else {
            match self.selected {
                Some(selected) if selected > index => Some(selected - 1),
                // Removed at or before the selection: stay at the same index,
                // clamped to the new last row
                Some(selected) => Some(selected.min(self.rows.len() - 1)),
                None => None,
            }
        };
        self.update_scroll();
    }

    pub fn replace_at(&mut self, index: usize, row: ListRow<A>) {
        if index < self.rows.len() {
            self.rows[index] = row;
        }
    }

    /// Keep the selected row inside the visible window
    fn update_scroll(&mut self) {
        let Some(selected) = self.selected else {
            self.offset = 0;
            return;
        };
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset.saturating_add(self.viewport) {
            self.offset = selected + 1 - self.viewport;
        }
        // Rows may have been removed above the window
        let max_offset = self.rows.len().saturating_sub(self.viewport);
        self.offset = self.offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(labels: &[&str]) -> ListController<usize> {
        ListController::with_rows(
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| ListRow::new(*l, i))
                .collect(),
        )
    }

    #[test]
    fn empty_list_has_no_selection_and_no_activation() {
        let controller: ListController<usize> = ListController::new();
        assert_eq!(controller.selected(), None);
        assert!(controller.activate().is_none());
    }

    #[test]
    fn move_next_wraps_back_to_start() {
        for start in 0..3 {
            let mut controller = list(&["a", "b", "c"]);
            controller.select(start);
            for _ in 0..controller.len() {
                controller.move_next();
            }
            assert_eq!(controller.selected(), Some(start));
        }
    }

    #[test]
    fn move_previous_wraps_to_last() {
        let mut controller = list(&["a", "b", "c"]);
        controller.select(0);
        controller.move_previous();
        assert_eq!(controller.selected(), Some(2));
    }

    #[test]
    fn moves_are_noops_on_empty_list() {
        let mut controller: ListController<usize> = ListController::new();
        controller.move_next();
        controller.move_previous();
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn insert_into_empty_selects_the_row() {
        let mut controller: ListController<usize> = ListController::new();
        controller.insert_at(0, ListRow::new("h1", 0));
        assert_eq!(controller.selected(), Some(0));
        assert_eq!(controller.activate(), Some(&0));
    }

    #[test]
    fn removing_selected_last_row_moves_selection_back() {
        let mut controller = list(&["a", "b", "c"]);
        controller.select(2);
        controller.remove_at(2);
        assert_eq!(controller.selected(), Some(1));
        assert_eq!(controller.len(), 2);
    }

    #[test]
    fn removing_before_selection_shifts_it_down() {
        let mut controller = list(&["a", "b", "c"]);
        controller.select(2);
        controller.remove_at(0);
        assert_eq!(controller.selected(), Some(1));
        assert_eq!(controller.rows()[1].label, "c");
    }

    #[test]
    fn removing_only_row_clears_selection() {
        let mut controller = list(&["a"]);
        controller.remove_at(0);
        assert_eq!(controller.selected(), None);
        assert!(controller.is_empty());
    }

    #[test]
    fn replace_keeps_selection_and_order() {
        let mut controller = list(&["a", "b", "c"]);
        controller.select(1);
        controller.replace_at(0, ListRow::new("a2", 0));
        assert_eq!(controller.selected(), Some(1));
        assert_eq!(controller.rows()[0].label, "a2");
        assert_eq!(controller.rows()[2].label, "c");
    }

    #[test]
    fn scroll_offset_tracks_selection() {
        let mut controller = list(&["a", "b", "c", "d", "e", "f"]);
        controller.set_viewport(3);
        assert_eq!(controller.scroll_offset(), 0);

        controller.select(4);
        assert_eq!(controller.scroll_offset(), 2);

        controller.select(0);
        assert_eq!(controller.scroll_offset(), 0);

        // Wrapping from the top lands on the last row and scrolls to it
        controller.move_previous();
        assert_eq!(controller.selected(), Some(5));
        assert_eq!(controller.scroll_offset(), 3);
    }

    #[test]
    fn selection_always_in_bounds_after_mutations() {
        let mut controller = list(&["a", "b", "c", "d"]);
        controller.select(3);
        controller.remove_at(3);
        controller.remove_at(2);
        controller.insert_at(0, ListRow::new("x", 9));
        if let Some(selected) = controller.selected() {
            assert!(selected < controller.len());
        }
    }
}
