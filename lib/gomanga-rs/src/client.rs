use crate::Error;
use crate::MangaDetail;
use crate::MangaList;
use crate::SearchResults;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use url::Url;

/// The public gomanga api.
pub const DEFAULT_BASE_URL: &str = "https://gomanga-api.vercel.app/api/";

/// The gomanga client
#[derive(Debug, Clone)]
pub struct Client {
    /// The inner http client
    pub client: reqwest::Client,

    base_url: Url,
}

impl Client {
    /// Make a new client for the public api
    pub fn new() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("invalid default base url");
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Make a new client for an api mounted at `base_url`.
    ///
    /// This may also point at a proxy exposing the same paths.
    pub fn with_base_url(base_url: Url) -> Result<Self, Error> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::UnsupportedScheme(base_url));
        }
        if base_url.cannot_be_a_base() {
            return Err(Error::CannotBeABase(base_url));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// The base url requests are made against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the url for the given path segments.
    ///
    /// Segments are percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Get the json at the given path segments.
    ///
    /// A non-success status is an error.
    pub async fn get_json<T>(&self, segments: &[&str]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        Ok(self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Get the json at the given path segments, without parsing it into a type.
    ///
    /// The body is only checked to be valid json, and is otherwise kept as it was sent.
    pub async fn get_raw_json(&self, segments: &[&str]) -> Result<Box<RawValue>, Error> {
        let url = self.endpoint(segments)?;
        let text = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Get a page of the manga list.
    ///
    /// `page` starts at 1.
    pub async fn get_manga_list(&self, page: u32) -> Result<MangaList, Error> {
        self.get_json(&["manga-list", &page.to_string()]).await
    }

    /// Search for manga.
    ///
    /// The keyword is sent as-is; the api expects words to be joined with `_`.
    pub async fn search(&self, keyword: &str) -> Result<SearchResults, Error> {
        self.get_json(&["search", keyword]).await
    }

    /// Get the details of a manga
    pub async fn get_manga(&self, id: &str) -> Result<MangaDetail, Error> {
        self.get_json(&["manga", id]).await
    }

    /// Get a chapter.
    ///
    /// The shape of the chapter payload is not fixed, so it is returned as raw json.
    pub async fn get_chapter(&self, id: &str, chapter: &str) -> Result<serde_json::Value, Error> {
        self.get_json(&["manga", id, chapter]).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
