//! Sidebar view-model
//!
//! Plain data plus the derivations between fields. Anything that depends on
//! the registry takes it as an argument, and the category index is rebuilt
//! each time, so derived lists never go stale against the host.

use node_pack_core::{
    filter_categories, summarize, CategoryIndex, NodeTypeRegistry, Summary, DEFAULT_COLUMNS,
    MAX_COLUMNS, MIN_COLUMNS,
};

/// Everything the sidebar displays
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarState {
    pub search_query: String,
    /// Every known category, sorted
    pub all_categories: Vec<String>,
    /// Categories matching the search query
    pub filtered_categories: Vec<String>,
    pub selected: Option<String>,
    /// Column slider value, always within `MIN_COLUMNS..=MAX_COLUMNS`
    pub column_count: u32,
    pub summary: Summary,
    /// A load session is in flight; the load trigger is disabled
    pub loading: bool,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            all_categories: Vec::new(),
            filtered_categories: Vec::new(),
            selected: None,
            column_count: DEFAULT_COLUMNS,
            summary: Summary::default(),
            loading: false,
        }
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_count(mut self, count: u32) -> Self {
        self.set_column_count(count);
        self
    }

    /// Re-read the registry: category list, filter, selection and summary.
    ///
    /// The current selection is kept if it still matches the filter,
    /// otherwise the first match is selected.
    pub fn refresh(&mut self, registry: &dyn NodeTypeRegistry) {
        let index = CategoryIndex::build(registry);
        self.all_categories = index.categories();
        self.filtered_categories = filter_categories(&self.all_categories, &self.search_query);

        let still_visible = self
            .selected
            .as_ref()
            .is_some_and(|s| self.filtered_categories.contains(s));
        if !still_visible {
            self.selected = self.filtered_categories.first().cloned();
        }

        self.summary = summarize(self.selected.as_deref(), &index);
    }

    /// Change the search query; selects the first match (or nothing).
    pub fn set_search_query(&mut self, query: &str, registry: &dyn NodeTypeRegistry) {
        self.search_query = query.to_string();
        self.apply_search(registry);
    }

    /// Re-run the filter after `search_query` was edited in place.
    pub fn apply_search(&mut self, registry: &dyn NodeTypeRegistry) {
        let index = CategoryIndex::build(registry);
        self.all_categories = index.categories();
        self.filtered_categories = filter_categories(&self.all_categories, &self.search_query);
        self.selected = self.filtered_categories.first().cloned();
        self.summary = summarize(self.selected.as_deref(), &index);
    }

    /// Select a category from the dropdown and refresh the summary.
    pub fn select_category(&mut self, category: &str, registry: &dyn NodeTypeRegistry) {
        self.selected = Some(category.to_string());
        self.refresh_summary(registry);
    }

    pub fn refresh_summary(&mut self, registry: &dyn NodeTypeRegistry) {
        let index = CategoryIndex::build(registry);
        self.summary = summarize(self.selected.as_deref(), &index);
    }

    pub fn set_column_count(&mut self, count: u32) {
        self.column_count = count.clamp(MIN_COLUMNS, MAX_COLUMNS);
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
