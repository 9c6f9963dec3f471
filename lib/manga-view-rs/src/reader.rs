use crate::extract;
use crate::MangaSource;
use crate::Route;
use tracing::error;
use tracing::warn;

pub const READER_FAILED_MESSAGE: &str = "Failed to load chapter";
pub const NO_PAGES_MESSAGE: &str = "No pages found in this chapter";

/// The phase of a reader view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderStatus {
    Loading,

    /// The chapter could not be fetched
    Failed { message: &'static str },

    /// The chapter was fetched, but no page images were recognized
    NoPages { message: &'static str },

    /// Page image urls, in reading order
    Ready { pages: Vec<String> },
}

/// The pages of one chapter.
#[derive(Debug, Clone)]
pub struct ReaderView {
    id: String,
    chapter: u32,
    status: ReaderStatus,
}

impl ReaderView {
    /// Make a view that has not loaded yet.
    pub fn new(id: impl Into<String>, chapter: u32) -> Self {
        Self {
            id: id.into(),
            chapter,
            status: ReaderStatus::Loading,
        }
    }

    /// Fetch a chapter and extract its pages.
    pub async fn load<S>(source: &S, id: &str, chapter: u32) -> Self
    where
        S: MangaSource,
    {
        let mut view = Self::new(id, chapter);
        view.status = match source.chapter(id, chapter).await {
            Ok(payload) => match extract::chapter_pages(&payload) {
                Some(pages) => ReaderStatus::Ready { pages: pages.urls },
                None => {
                    warn!("no pages found in chapter {chapter} of \"{id}\"");
                    ReaderStatus::NoPages {
                        message: NO_PAGES_MESSAGE,
                    }
                }
            },
            Err(error) => {
                error!("failed to fetch chapter {chapter} of \"{id}\": {error}");
                ReaderStatus::Failed {
                    message: READER_FAILED_MESSAGE,
                }
            }
        };

        view
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn status(&self) -> &ReaderStatus {
        &self.status
    }

    /// The page image urls, empty unless ready
    pub fn pages(&self) -> &[String] {
        match &self.status {
            ReaderStatus::Ready { pages } => pages,
            _ => &[],
        }
    }

    /// Whether there is a previous chapter to go to
    pub fn has_previous(&self) -> bool {
        self.chapter > 1
    }

    /// The previous chapter, unless this is the first one
    pub fn previous(&self) -> Option<Route> {
        self.has_previous().then(|| Route::Reader {
            id: self.id.clone(),
            chapter: self.chapter - 1,
        })
    }

    /// The next chapter.
    ///
    /// This is not checked against the chapter list;
    /// going past the last chapter leads to a view that fails to load.
    pub fn next(&self) -> Route {
        Route::Reader {
            id: self.id.clone(),
            chapter: self.chapter.saturating_add(1),
        }
    }

    /// The details of this manga
    pub fn detail_route(&self) -> Route {
        Route::detail(self.id.clone())
    }
}
