use crate::engine;
use crate::links;
use crate::query::{self, QueryParams};
use crate::recommend::RecommendationIndex;
use crate::selection::{self, Action, Selection};
use crate::stats::{InstanceRecord, InstanceStats};
use crate::ui::detail;
use crate::ui::menu::{ChoiceMenu, Selector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

/// Lifecycle of the view. Nothing is computed before mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Ready,
}

/// Which part of the screen receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Filters,
}

/// Rows taken by everything except list entries: header(3) + comparison(1)
/// + filter bar(3) + list borders(2) + status(1).
pub const LIST_OVERHEAD: u16 = 10;

/// Main application state.
pub struct App {
    pub stats: InstanceStats,
    pub recommendations: RecommendationIndex,
    rng: StdRng,

    pub phase: Phase,
    pub selection: Selection,
    /// Indices into `stats.instances`, in display order.
    pub displayed: Vec<usize>,

    pub should_quit: bool,
    pub show_help: bool,
    pub focus: Focus,
    pub active_selector: Selector,
    pub menu: Option<ChoiceMenu>,

    // List view state
    pub list_selected: usize, // Index within visible page
    pub list_offset: usize,   // Offset into displayed
    pub page_size: usize,
    pub filters_visible: bool,
    /// Last known terminal area
    pub screen: Rect,

    // Details modal; index into stats.instances
    pub details: Option<usize>,
    pub detail_scroll: u16,

    pub status_msg: String,
}

impl App {
    pub fn new(stats: InstanceStats, recommendations: RecommendationIndex) -> Self {
        Self::with_rng(stats, recommendations, StdRng::from_entropy())
    }

    /// Same as `new`, with a fixed seed for the random order.
    pub fn seeded(stats: InstanceStats, recommendations: RecommendationIndex, seed: u64) -> Self {
        Self::with_rng(stats, recommendations, StdRng::seed_from_u64(seed))
    }

    fn with_rng(stats: InstanceStats, recommendations: RecommendationIndex, rng: StdRng) -> Self {
        Self {
            stats,
            recommendations,
            rng,

            phase: Phase::Uninitialized,
            selection: Selection::default(),
            displayed: Vec::new(),

            should_quit: false,
            show_help: false,
            focus: Focus::List,
            active_selector: Selector::Topic,
            menu: None,

            list_selected: 0,
            list_offset: 0,
            page_size: 20, // Updated on first resize
            filters_visible: true,
            screen: Rect::new(0, 0, 80, 24),

            details: None,
            detail_scroll: 0,

            status_msg: String::new(),
        }
    }

    /// Resolve the initial selection and build the first list.
    pub fn mount(&mut self, params: &QueryParams) {
        if self.phase == Phase::Ready {
            tracing::warn!("view already mounted");
            return;
        }
        self.selection = query::resolve(params);
        self.phase = Phase::Ready;
        tracing::info!(selection = ?self.selection, "mounted");
        self.recompute();
        if self.selection.scroll {
            self.scroll_to_filters();
        }
    }

    /// Move focus to the filter bar if it is on screen; otherwise do nothing.
    pub fn scroll_to_filters(&mut self) {
        if !self.filters_visible {
            tracing::debug!("filter bar not visible, skipping scroll");
            return;
        }
        self.focus = Focus::Filters;
        self.active_selector = Selector::Topic;
    }

    /// Apply a selection change and rebuild the list.
    pub fn dispatch(&mut self, action: Action) {
        if self.phase != Phase::Ready {
            tracing::warn!(?action, "ignoring action before mount");
            return;
        }
        self.selection = selection::update(&self.selection, action);
        self.recompute();
    }

    pub fn change_sort(&mut self, name: &str) {
        self.dispatch(Action::ChangeSort(name.to_string()));
    }

    pub fn change_topic(&mut self, name: &str) {
        self.dispatch(Action::ChangeTopic(name.to_string()));
    }

    pub fn change_language(&mut self, code: &str) {
        self.dispatch(Action::ChangeLanguage(code.to_string()));
    }

    pub fn reset_all(&mut self) {
        self.dispatch(Action::ResetAll);
    }

    /// Route a menu choice to the matching transition.
    pub fn apply_choice(&mut self, selector: Selector, value: &str) {
        match selector {
            Selector::Topic => self.change_topic(value),
            Selector::Language => self.change_language(value),
            Selector::Sort => self.change_sort(value),
        }
    }

    fn recompute(&mut self) {
        self.displayed = engine::compute_indices(
            &self.stats.instances,
            &self.recommendations,
            &self.selection,
            &mut self.rng,
        );
        self.list_offset = 0;
        self.list_selected = 0;
        self.details = None;
        self.detail_scroll = 0;

        self.status_msg = if self.displayed.is_empty() {
            "No servers found".to_string()
        } else {
            format!("{} servers", self.displayed.len())
        };
    }

    /// Instances in display order.
    pub fn displayed_instances(&self) -> impl Iterator<Item = &InstanceRecord> {
        self.displayed.iter().map(|&i| &self.stats.instances[i])
    }

    /// The current page of displayed instances.
    pub fn visible_page(&self) -> impl Iterator<Item = &InstanceRecord> {
        let end = (self.list_offset + self.page_size).min(self.displayed.len());
        self.displayed[self.list_offset.min(end)..end]
            .iter()
            .map(|&i| &self.stats.instances[i])
    }

    fn page_len(&self) -> usize {
        self.displayed
            .len()
            .saturating_sub(self.list_offset)
            .min(self.page_size)
    }

    fn last_page_start(&self) -> usize {
        (self.displayed.len().saturating_sub(1) / self.page_size) * self.page_size
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.displayed.get(self.list_offset + self.list_selected).copied()
    }

    pub fn selected_instance(&self) -> Option<&InstanceRecord> {
        self.selected_index().map(|i| &self.stats.instances[i])
    }

    pub fn details_instance(&self) -> Option<&InstanceRecord> {
        self.details.map(|i| &self.stats.instances[i])
    }

    /// Record a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.update_page_size(height);
        self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
    }

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let new_size = terminal_height.saturating_sub(LIST_OVERHEAD) as usize;
        self.page_size = new_size.max(1);
        self.filters_visible = terminal_height >= LIST_OVERHEAD;
        if !self.filters_visible && self.focus == Focus::Filters {
            self.focus = Focus::List;
        }
        // Keep the selected entry in view
        let absolute = self.list_offset + self.list_selected;
        self.list_offset = (absolute / self.page_size) * self.page_size;
        self.list_selected = absolute - self.list_offset;
    }

    /// Move selection down in the list.
    pub fn list_next(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        if self.list_selected + 1 < self.page_len() {
            self.list_selected += 1;
        } else {
            // Next page
            let new_offset = self.list_offset + self.page_size;
            if new_offset < self.displayed.len() {
                self.list_offset = new_offset;
                self.list_selected = 0;
            }
        }
    }

    /// Move selection up in the list.
    pub fn list_prev(&mut self) {
        if self.list_selected > 0 {
            self.list_selected -= 1;
        } else if self.list_offset > 0 {
            // Prev page
            self.list_offset = self.list_offset.saturating_sub(self.page_size);
            self.list_selected = self.page_len().saturating_sub(1);
        }
    }

    pub fn list_page_down(&mut self) {
        let new_offset = self.list_offset + self.page_size;
        if new_offset < self.displayed.len() {
            self.list_offset = new_offset;
            self.list_selected = 0;
        } else {
            self.list_last();
        }
    }

    pub fn list_page_up(&mut self) {
        self.list_offset = self.list_offset.saturating_sub(self.page_size);
        self.list_selected = 0;
    }

    pub fn list_first(&mut self) {
        self.list_offset = 0;
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        if self.displayed.is_empty() {
            return;
        }
        self.list_offset = self.last_page_start();
        self.list_selected = self.page_len().saturating_sub(1);
    }

    /// Show the details modal for the selected instance.
    pub fn open_details(&mut self) {
        if let Some(i) = self.selected_index() {
            self.details = Some(i);
            self.detail_scroll = 0;
        }
    }

    pub fn close_details(&mut self) {
        self.details = None;
        self.detail_scroll = 0;
    }

    pub fn open_menu(&mut self, selector: Selector) {
        self.active_selector = selector;
        self.menu = Some(ChoiceMenu::new(selector, &self.selection));
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::List if self.filters_visible => Focus::Filters,
            _ => Focus::List,
        };
    }

    /// Join link of the instance under the modal, else the selected row.
    fn join_target(&self) -> Option<String> {
        self.details_instance()
            .or_else(|| self.selected_instance())
            .map(InstanceRecord::join_url)
    }

    pub fn open_join_link(&mut self) {
        if let Some(url) = self.join_target() {
            self.status_msg = if links::open_in_browser(&url) {
                format!("Opening: {}", url)
            } else {
                format!("Link: {} (no browser available)", url)
            };
        }
    }

    pub fn yank_join_link(&mut self) {
        if let Some(url) = self.join_target() {
            self.status_msg = if links::copy_to_clipboard(&url) {
                format!("Copied: {}", url)
            } else {
                format!("Link: {} (clipboard not available)", url)
            };
        }
    }

    pub fn max_detail_scroll(&self) -> u16 {
        self.details_instance()
            .map_or(0, |instance| detail::max_scroll(instance, self.screen))
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(1)
            .min(self.max_detail_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(20)
            .min(self.max_detail_scroll());
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(20);
    }
}
