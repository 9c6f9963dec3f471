//! View models for the manga reader.
//!
//! Each view owns the state of one page: what was fetched,
//! whether it is still loading, and which message to show when it failed.
//! Rendering is left to the caller.

mod detail;
pub mod extract;
mod hint;
mod listing;
mod reader;
mod route;
mod source;

pub use self::detail::resolve_latest_chapter;
pub use self::detail::DetailStatus;
pub use self::detail::DetailView;
pub use self::detail::HintSource;
pub use self::detail::InfoItem;
pub use self::detail::ResolvedHint;
pub use self::detail::DETAIL_FAILED_MESSAGE;
pub use self::detail::NO_CHAPTERS_MESSAGE;
pub use self::hint::HintStore;
pub use self::hint::DEFAULT_HINT_CAPACITY;
pub use self::hint::DEFAULT_HINT_TTL;
pub use self::listing::format_keyword;
pub use self::listing::ListingState;
pub use self::listing::ListingStatus;
pub use self::listing::ListingView;
pub use self::listing::DEFAULT_DEBOUNCE;
pub use self::listing::LIST_EMPTY_MESSAGE;
pub use self::listing::LIST_FAILED_MESSAGE;
pub use self::listing::SEARCH_EMPTY_MESSAGE;
pub use self::listing::SEARCH_FAILED_MESSAGE;
pub use self::reader::ReaderStatus;
pub use self::reader::ReaderView;
pub use self::reader::NO_PAGES_MESSAGE;
pub use self::reader::READER_FAILED_MESSAGE;
pub use self::route::Route;
pub use self::source::MangaSource;

/// An error that may occur while fetching data for a view
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The gomanga api failed
    #[error(transparent)]
    Gomanga(#[from] gomanga::Error),

    /// Another source failed
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
