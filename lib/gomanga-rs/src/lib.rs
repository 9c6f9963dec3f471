mod client;
mod detail;
mod lenient;
mod manga;
mod scalar;

pub use self::client::Client;
pub use self::client::DEFAULT_BASE_URL;
pub use self::detail::MangaDetail;
pub use self::manga::ChapterLink;
pub use self::manga::LatestChapter;
pub use self::manga::Manga;
pub use self::manga::MangaList;
pub use self::manga::SearchResults;
pub use self::scalar::Scalar;
pub use self::scalar::TextOrList;
pub use url::Url;

/// The library error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A HTTP error, including non-success statuses and invalid json bodies
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The body was not valid json
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The base url cannot have path segments appended to it
    #[error("the base url \"{0}\" cannot be a base")]
    CannotBeABase(Url),

    /// The base url is not http or https
    #[error("the base url \"{0}\" does not use http or https")]
    UnsupportedScheme(Url),
}
