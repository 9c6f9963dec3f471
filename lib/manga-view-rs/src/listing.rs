use crate::FetchError;
use crate::MangaSource;
use gomanga::Manga;
use gomanga::MangaList;
use gomanga::SearchResults;
use manga_plus_util::AbortJoinHandle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing::error;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// How long query input must be stable before a search runs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

pub const LIST_EMPTY_MESSAGE: &str = "No manga data available at the moment";
pub const LIST_FAILED_MESSAGE: &str =
    "The website is currently unavailable due to an unknown issue. Please try again later.";
pub const SEARCH_EMPTY_MESSAGE: &str = "No results found for your search";
pub const SEARCH_FAILED_MESSAGE: &str = "Search is currently unavailable. Please try again later.";

/// Format a user query as an api search keyword.
///
/// Runs of whitespace become a single `_`.
/// Returns `None` for a blank query.
pub fn format_keyword(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    Some(WHITESPACE_REGEX.replace_all(query, "_").into_owned())
}

/// The phase of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// Nothing was requested yet
    Idle,

    /// A manga list page is loading
    LoadingList,

    /// Search results are loading
    LoadingSearch,

    /// The fetch failed
    Failed { message: &'static str },

    /// The fetch worked, but there was nothing to show
    Empty { message: &'static str },

    /// Results are ready
    Ready,
}

/// The state of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    pub status: ListingStatus,

    /// The manga to show a card for
    pub manga: Vec<Manga>,

    /// The page numbers to show a button for
    pub pagination: Vec<u32>,

    /// The selected manga list page
    pub current_page: u32,

    /// The active search query, empty when listing
    pub query: String,

    /// Whether the results come from a search
    pub searching: bool,
}

impl ListingState {
    /// Returns true if a fetch is in progress
    pub fn is_loading(&self) -> bool {
        matches!(
            self.status,
            ListingStatus::LoadingList | ListingStatus::LoadingSearch
        )
    }

    /// The text to show while loading
    pub fn loading_message(&self) -> &'static str {
        if self.searching {
            "Searching manga..."
        } else {
            "Loading manga..."
        }
    }

    /// The failure or empty message, if any
    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            ListingStatus::Failed { message } | ListingStatus::Empty { message } => Some(message),
            _ => None,
        }
    }

    /// Whether the pagination buttons should be shown.
    pub fn show_pagination(&self) -> bool {
        !self.searching && !self.pagination.is_empty()
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            status: ListingStatus::Idle,
            manga: Vec::new(),
            pagination: Vec::new(),
            current_page: 1,
            query: String::new(),
            searching: false,
        }
    }
}

/// The manga list and search results.
///
/// Every fetch takes a generation token when it starts.
/// Only the fetch holding the newest token may update the state,
/// so a slow, superseded response is dropped instead of replacing newer results.
///
/// A view rendered once per request only needs [`ListingView::select_page`],
/// [`ListingView::search`] and [`ListingView::state`].
/// The debounced [`ListingView::input_query`] and [`ListingView::subscribe`]
/// are for long-lived, interactive callers that keep one view across inputs.
pub struct ListingView<S> {
    inner: Arc<Inner<S>>,
    debounce: std::sync::Mutex<Option<AbortJoinHandle<()>>>,
}

impl<S> ListingView<S>
where
    S: MangaSource,
{
    /// Make a new view with the default debounce delay.
    pub fn new(source: S) -> Self {
        Self::with_debounce(source, DEFAULT_DEBOUNCE)
    }

    /// Make a new view with the given debounce delay.
    pub fn with_debounce(source: S, debounce_delay: Duration) -> Self {
        let (state, _rx) = tokio::sync::watch::channel(ListingState::default());

        Self {
            inner: Arc::new(Inner {
                source,
                state,
                generation: AtomicU64::new(0),
                debounce_delay,
            }),
            debounce: std::sync::Mutex::new(None),
        }
    }

    /// Get a copy of the current state.
    pub fn state(&self) -> ListingState {
        self.inner.state.borrow().clone()
    }

    /// Watch the state.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<ListingState> {
        self.inner.state.subscribe()
    }

    /// Select a page and load it, leaving search mode.
    pub async fn load_page(&self, page: u32) {
        self.cancel_debounce();
        self.inner.load_list(page).await;
    }

    /// Select a page.
    ///
    /// The page is only loaded if no search is active.
    pub async fn select_page(&self, page: u32) {
        let mut searching = false;
        self.inner.state.send_if_modified(|state| {
            searching = state.searching;
            let changed = state.current_page != page;
            state.current_page = page;
            changed
        });

        if !searching {
            self.inner.load_list(page).await;
        }
    }

    /// Search right away.
    ///
    /// A blank query loads the selected manga list page instead.
    pub async fn search(&self, query: &str) {
        self.cancel_debounce();
        self.inner.apply_query(query).await;
    }

    /// Search once input has been stable for the debounce delay.
    ///
    /// Each call restarts the delay, dropping the previous pending search.
    /// This must be called from within a tokio runtime.
    pub fn input_query(&self, query: impl Into<String>) {
        let query = query.into();
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.debounce_delay).await;
            inner.apply_query(&query).await;
        });

        let previous = self
            .debounce
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(AbortJoinHandle::new(handle));
        drop(previous);
    }

    /// Drop the pending debounced search, if any.
    pub fn cancel_debounce(&self) {
        let pending = self
            .debounce
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        drop(pending);
    }
}

impl<S> std::fmt::Debug for ListingView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingView")
            .field("state", &*self.inner.state.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

struct Inner<S> {
    source: S,
    state: tokio::sync::watch::Sender<ListingState>,
    generation: AtomicU64,
    debounce_delay: Duration,
}

impl<S> Inner<S>
where
    S: MangaSource,
{
    /// Start a fetch, returning its generation token.
    fn begin<F>(&self, update: F) -> u64
    where
        F: FnOnce(&mut ListingState),
    {
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            update(state);
        });
        token
    }

    /// Finish a fetch.
    ///
    /// Returns false if the fetch was superseded, in which case the state is untouched.
    fn finish<F>(&self, token: u64, update: F) -> bool
    where
        F: FnOnce(&mut ListingState),
    {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != token {
                return false;
            }

            update(state);
            true
        })
    }

    async fn load_list(&self, page: u32) {
        let token = self.begin(|state| {
            state.status = ListingStatus::LoadingList;
            state.current_page = page;
            state.query.clear();
            state.searching = false;
        });

        let result = self.source.manga_list(page).await;
        if let Err(error) = result.as_ref() {
            error!("failed to fetch manga list page {page}: {error}");
        }

        let applied = self.finish(token, move |state| apply_list(state, result));
        if !applied {
            debug!("discarding superseded manga list page {page}");
        }
    }

    async fn apply_query(&self, query: &str) {
        let keyword = match format_keyword(query) {
            Some(keyword) => keyword,
            None => {
                let page = self.state.borrow().current_page;
                self.load_list(page).await;
                return;
            }
        };

        let token = self.begin(|state| {
            state.status = ListingStatus::LoadingSearch;
            state.query = query.trim().into();
            state.searching = true;
        });

        let result = self.source.search(&keyword).await;
        if let Err(error) = result.as_ref() {
            error!("failed to search for \"{keyword}\": {error}");
        }

        let applied = self.finish(token, move |state| apply_search(state, result));
        if !applied {
            debug!("discarding superseded search for \"{keyword}\"");
        }
    }
}

fn apply_list(state: &mut ListingState, result: Result<MangaList, FetchError>) {
    match result {
        Ok(list) if !list.data.is_empty() => {
            state.manga = list.data;
            state.pagination = list.pagination;
            state.status = ListingStatus::Ready;
        }
        Ok(list) => {
            state.manga.clear();
            state.pagination = list.pagination;
            state.status = ListingStatus::Empty {
                message: LIST_EMPTY_MESSAGE,
            };
        }
        Err(_error) => {
            state.manga.clear();
            state.status = ListingStatus::Failed {
                message: LIST_FAILED_MESSAGE,
            };
        }
    }
}

fn apply_search(state: &mut ListingState, result: Result<SearchResults, FetchError>) {
    state.pagination.clear();
    match result {
        Ok(results) => {
            state.status = if results.manga.is_empty() {
                ListingStatus::Empty {
                    message: SEARCH_EMPTY_MESSAGE,
                }
            } else {
                ListingStatus::Ready
            };
            state.manga = results.manga;
        }
        Err(_error) => {
            state.manga.clear();
            state.status = ListingStatus::Failed {
                message: SEARCH_FAILED_MESSAGE,
            };
        }
    }
}
