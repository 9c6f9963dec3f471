use std::fmt::Write;

/// A page of the reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The landing page
    Landing,

    /// The manga list, or search results if there is a query
    Home { page: u32, query: Option<String> },

    /// The details of a manga
    Detail {
        id: String,

        /// The latest chapter, carried over from the listing
        latest: Option<String>,

        /// Whether chapters are listed newest first
        reversed: bool,
    },

    /// A chapter of a manga
    Reader { id: String, chapter: u32 },
}

impl Route {
    /// The first page of the manga list
    pub fn home() -> Self {
        Self::Home {
            page: 1,
            query: None,
        }
    }

    /// The details of a manga, without a hint
    pub fn detail(id: impl Into<String>) -> Self {
        Self::Detail {
            id: id.into(),
            latest: None,
            reversed: false,
        }
    }

    /// Get the href of this route.
    ///
    /// Path segments and query values are percent-encoded.
    pub fn href(&self) -> String {
        match self {
            Self::Landing => "/".into(),
            Self::Home { page, query } => {
                let mut href = String::from("/home");
                let mut params = QueryParams::new(&mut href);
                if *page != 1 {
                    params.push("page", &page.to_string());
                }
                if let Some(query) = query.as_deref().filter(|query| !query.trim().is_empty()) {
                    params.push("q", query);
                }
                href
            }
            Self::Detail {
                id,
                latest,
                reversed,
            } => {
                let mut href = format!("/manga/{}", urlencoding::encode(id));
                let mut params = QueryParams::new(&mut href);
                if let Some(latest) = latest.as_deref().filter(|latest| !latest.is_empty()) {
                    params.push("latest", latest);
                }
                if *reversed {
                    params.push("order", "desc");
                }
                href
            }
            Self::Reader { id, chapter } => {
                format!("/manga/{}/read/{chapter}", urlencoding::encode(id))
            }
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.href())
    }
}

/// A helper to append query params to an href
struct QueryParams<'a> {
    href: &'a mut String,
    first: bool,
}

impl<'a> QueryParams<'a> {
    fn new(href: &'a mut String) -> Self {
        Self { href, first: true }
    }

    fn push(&mut self, key: &str, value: &str) {
        let separator = if self.first { '?' } else { '&' };
        self.first = false;

        // Writing to a String cannot fail.
        let _ = write!(self.href, "{separator}{key}={}", urlencoding::encode(value));
    }
}
