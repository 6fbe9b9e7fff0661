//! Draft text of the search box, kept in step with the confirmed query

/// Local draft of the search input
///
/// Edits stay local; the only way they reach the route is an explicit
/// submission through [`super::navigator::SearchNavigator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStateSync {
    draft: String,
}

impl QueryStateSync {
    pub fn new(initial_query: &str) -> Self {
        Self {
            draft: initial_query.to_string(),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The confirmed query changed from outside (link, back/forward, or our
    /// own submission echoing back). Any uncommitted edit is dropped.
    pub fn on_external_query_change(&mut self, new_query: &str) {
        if self.draft != new_query {
            self.draft.clear();
            self.draft.push_str(new_query);
        }
    }

    pub fn on_keystroke(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn on_backspace(&mut self) {
        self.draft.pop();
    }

    /// Whole-value edit as delivered by a text input widget
    pub fn on_input(&mut self, value: String) {
        self.draft = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_change_overwrites_uncommitted_edit() {
        let mut sync = QueryStateSync::new("matrix");
        for c in " reloaded".chars() {
            sync.on_keystroke(c);
        }
        assert_eq!(sync.draft(), "matrix reloaded");

        sync.on_external_query_change("heat");
        assert_eq!(sync.draft(), "heat");
    }

    #[test]
    fn test_external_change_to_empty_clears_draft() {
        let mut sync = QueryStateSync::new("");
        sync.on_input("half typed".to_string());
        sync.on_external_query_change("");
        assert_eq!(sync.draft(), "");
    }

    #[test]
    fn test_keystrokes_edit_in_place() {
        let mut sync = QueryStateSync::default();
        sync.on_keystroke('h');
        sync.on_keystroke('e');
        sync.on_keystroke('x');
        sync.on_backspace();
        sync.on_keystroke('a');
        sync.on_keystroke('t');
        assert_eq!(sync.draft(), "heat");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut sync = QueryStateSync::default();
        sync.on_backspace();
        assert_eq!(sync.draft(), "");
    }
}
