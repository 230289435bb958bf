//! App state and core application logic
//!
//! Manages the screen navigation stack and routes keyboard input to the
//! feed, search and detail controllers. Anything that needs the network or
//! a timer is returned as an [`Effect`] for the event loop to run; results
//! come back as [`AppEvent`]s.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{Catalog, CatalogError};
use crate::detail::DetailLoader;
use crate::feed::{FeedController, FeedResponse};
use crate::models::{DetailView, Title, DEFAULT_IMAGE_BASE};
use crate::paging::{ApplyOutcome, PageRequest};
use crate::search::{DebounceTicket, SearchController, SearchRequest, SearchResponse, TextChange};

/// Start loading the next page when the selection is this close to the end
pub const LOAD_MORE_THRESHOLD: usize = 5;

// =============================================================================
// App State Enum
// =============================================================================

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Popular titles feed
    #[default]
    Home,
    /// Search input and results
    Search,
    /// Detail view for one title
    Detail,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Effects and Events
// =============================================================================

/// Work the event loop must start on behalf of the app
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchFeed(PageRequest),
    Search(SearchRequest),
    ScheduleDebounce(DebounceTicket),
    CancelDebounce,
    /// Start the fetch for the current detail loader
    LoadDetail,
}

/// Completions delivered back to the app
#[derive(Debug)]
pub enum AppEvent {
    Feed(FeedResponse),
    Search(SearchResponse),
    DebounceElapsed(DebounceTicket),
    Detail {
        title_id: u64,
        result: Result<DetailView, CatalogError>,
    },
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if visible_height > 0 && self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Whether the selection is within `threshold` items of the end
    pub fn near_end(&self, threshold: usize) -> bool {
        self.len > 0 && self.selected + threshold >= self.len
    }
}

// =============================================================================
// Search Input
// =============================================================================

/// Single-line text buffer with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TextInput {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App<C: ?Sized> {
    /// Current state/screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Transient message for the status bar
    pub error: Option<String>,

    pub feed: FeedController<C>,
    pub feed_list: ListState,

    pub search: SearchController<C>,
    pub search_input: TextInput,
    pub search_list: ListState,

    /// Loader for the detail screen; one per visit
    pub detail: Option<DetailLoader<C>>,
    /// Vertical scroll of the detail body
    pub detail_scroll: u16,

    pub image_base: String,
    catalog: Arc<C>,
}

impl<C: Catalog + ?Sized + 'static> App<C> {
    /// Create a new App instance
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            state: AppState::Home,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            feed: FeedController::new(Arc::clone(&catalog)),
            feed_list: ListState::default(),
            search: SearchController::new(Arc::clone(&catalog)),
            search_input: TextInput::default(),
            search_list: ListState::default(),
            detail: None,
            detail_scroll: 0,
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            catalog,
        }
    }

    /// Use a custom minimum search length
    pub fn with_min_query_len(mut self, min_len: usize) -> Self {
        self.search = SearchController::with_min_len(Arc::clone(&self.catalog), min_len);
        self
    }

    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = base.into();
        self
    }

    /// Initial feed load
    pub fn start(&mut self) -> Effect {
        Effect::FetchFeed(self.feed.begin_refresh())
    }

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state);
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous state
    pub fn back(&mut self) -> bool {
        // If in editing mode, exit editing first
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            if self.state == AppState::Detail {
                self.detail = None;
                self.detail_scroll = 0;
            }
            self.state = prev;
            true
        } else {
            false
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if self.state == AppState::Home {
            self.navigate(AppState::Search);
        }
        if self.state == AppState::Search {
            self.input_mode = InputMode::Editing;
        }
    }

    /// Title under the cursor on the current list screen
    pub fn selected_title(&self) -> Option<&Title> {
        match self.state {
            AppState::Home => self.feed.items().get(self.feed_list.selected),
            AppState::Search => self.search.items().get(self.search_list.selected),
            AppState::Detail => None,
        }
    }

    /// Open the detail screen for `title_id`
    pub fn open_detail(&mut self, title_id: u64) -> Effect {
        self.detail = Some(DetailLoader::new(Arc::clone(&self.catalog), title_id));
        self.detail_scroll = 0;
        self.navigate(AppState::Detail);
        Effect::LoadDetail
    }

    fn feed_load_more(&mut self) -> Option<Effect> {
        if !self.feed_list.near_end(LOAD_MORE_THRESHOLD) {
            return None;
        }
        self.feed.begin_load_more().map(Effect::FetchFeed)
    }

    fn search_load_more(&mut self) -> Option<Effect> {
        if !self.search_list.near_end(LOAD_MORE_THRESHOLD) {
            return None;
        }
        self.search.begin_load_more().map(Effect::Search)
    }

    // -------------------------------------------------------------------------
    // Async completions
    // -------------------------------------------------------------------------

    /// Apply a completion from the event loop
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::Feed(response) => {
                let fresh = response.request.mode == crate::paging::FetchMode::Fresh;
                if self.feed.apply(response) == ApplyOutcome::Applied {
                    if fresh {
                        self.feed_list.reset();
                    }
                    self.feed_list.set_len(self.feed.items().len());
                }
                None
            }
            AppEvent::Search(response) => {
                let fresh = response.request.page.mode == crate::paging::FetchMode::Fresh;
                match self.search.apply(response) {
                    ApplyOutcome::Applied => {
                        if fresh {
                            self.search_list.reset();
                        }
                        self.search_list.set_len(self.search.items().len());
                    }
                    ApplyOutcome::Failed => {
                        if let Some(msg) = self.search.last_error() {
                            self.error = Some(format!("Search failed: {}", msg));
                        }
                    }
                    ApplyOutcome::Stale => {}
                }
                None
            }
            AppEvent::DebounceElapsed(ticket) => self.search.debounce_elapsed(ticket).map(Effect::Search),
            AppEvent::Detail { title_id, result } => {
                if let Some(loader) = self.detail.as_mut().filter(|d| d.title_id() == title_id) {
                    loader.finish(result);
                }
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        // Clear error on any keypress
        self.error = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.search.submit().map(Effect::Search)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.clear();
                self.search.clear();
                self.search_list.set_len(0);
                Some(Effect::CancelDebounce)
            }
            KeyCode::Char(c) => {
                self.search_input.insert(c);
                Some(self.text_changed())
            }
            KeyCode::Backspace => self.search_input.backspace().then(|| self.text_changed()),
            KeyCode::Delete => self.search_input.delete().then(|| self.text_changed()),
            KeyCode::Left => {
                self.search_input.left();
                None
            }
            KeyCode::Right => {
                self.search_input.right();
                None
            }
            KeyCode::Home => {
                self.search_input.home();
                None
            }
            KeyCode::End => {
                self.search_input.end();
                None
            }
            _ => None,
        }
    }

    fn text_changed(&mut self) -> Effect {
        match self.search.on_text_change(self.search_input.value.clone()) {
            TextChange::Cleared => {
                self.search_list.set_len(0);
                Effect::CancelDebounce
            }
            TextChange::Scheduled(ticket) => Effect::ScheduleDebounce(ticket),
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return None;
            }
            KeyCode::Char('/') | KeyCode::Char('s') if self.state != AppState::Detail => {
                self.focus_search();
                return None;
            }
            KeyCode::Esc => {
                self.back();
                return None;
            }
            _ => {}
        }

        match self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Search => self.handle_search_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.feed_list.up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.feed_list.down();
                self.feed_load_more()
            }
            KeyCode::PageUp => {
                self.feed_list.page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.feed_list.page_down(10);
                self.feed_load_more()
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.feed_list.last();
                self.feed_load_more()
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.feed_list.first();
                None
            }
            KeyCode::Char('r') => Some(Effect::FetchFeed(self.feed.begin_refresh())),
            KeyCode::Enter => {
                let id = self.selected_title()?.id;
                Some(self.open_detail(id))
            }
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.search_list.up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search_list.down();
                self.search_load_more()
            }
            KeyCode::PageUp => {
                self.search_list.page_up(10);
                None
            }
            KeyCode::PageDown => {
                self.search_list.page_down(10);
                self.search_load_more()
            }
            KeyCode::Enter => {
                let id = self.selected_title()?.id;
                Some(self.open_detail(id))
            }
            KeyCode::Char('i') => {
                self.input_mode = InputMode::Editing;
                None
            }
            _ => None,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(10);
            }
            KeyCode::Backspace => {
                self.back();
            }
            _ => {}
        }
        None
    }
}

impl<C: ?Sized> std::fmt::Debug for App<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("nav_stack", &self.nav_stack)
            .field("input_mode", &self.input_mode)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
