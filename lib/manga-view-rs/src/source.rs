use crate::FetchError;
use gomanga::MangaDetail;
use gomanga::MangaList;
use gomanga::SearchResults;
use std::future::Future;

/// Somewhere views can fetch manga from.
pub trait MangaSource: Send + Sync + 'static {
    /// Get a page of the manga list
    fn manga_list(&self, page: u32) -> impl Future<Output = Result<MangaList, FetchError>> + Send;

    /// Search with an already formatted keyword
    fn search(
        &self,
        keyword: &str,
    ) -> impl Future<Output = Result<SearchResults, FetchError>> + Send;

    /// Get the details of a manga
    fn manga(&self, id: &str) -> impl Future<Output = Result<MangaDetail, FetchError>> + Send;

    /// Get the raw payload of a chapter
    fn chapter(
        &self,
        id: &str,
        chapter: u32,
    ) -> impl Future<Output = Result<serde_json::Value, FetchError>> + Send;
}

impl MangaSource for gomanga::Client {
    async fn manga_list(&self, page: u32) -> Result<MangaList, FetchError> {
        Ok(self.get_manga_list(page).await?)
    }

    async fn search(&self, keyword: &str) -> Result<SearchResults, FetchError> {
        Ok(gomanga::Client::search(self, keyword).await?)
    }

    async fn manga(&self, id: &str) -> Result<MangaDetail, FetchError> {
        Ok(self.get_manga(id).await?)
    }

    async fn chapter(&self, id: &str, chapter: u32) -> Result<serde_json::Value, FetchError> {
        Ok(self.get_chapter(id, &chapter.to_string()).await?)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use gomanga::LatestChapter;
    use gomanga::Manga;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Make a manga summary
    pub fn manga(id: &str, latest_chapter: Option<&str>) -> Manga {
        Manga {
            id: id.into(),
            slug: None,
            title: id.to_uppercase(),
            img_url: format!("https://example.com/{id}.jpg"),
            latest_chapter: latest_chapter.map(|chapter| LatestChapter::Text(chapter.into())),
            description: None,
        }
    }

    /// An in-memory source.
    ///
    /// Anything not registered fails to fetch.
    #[derive(Debug, Default)]
    pub struct FakeSource {
        lists: HashMap<u32, MangaList>,
        searches: HashMap<String, (Duration, Vec<Manga>)>,
        details: HashMap<String, MangaDetail>,
        chapters: HashMap<(String, u32), serde_json::Value>,
        calls: std::sync::Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub fn with_list(mut self, page: u32, pagination: &[u32], data: Vec<Manga>) -> Self {
            self.lists.insert(
                page,
                MangaList {
                    pagination: pagination.to_vec(),
                    data,
                },
            );
            self
        }

        pub fn with_search(mut self, keyword: &str, delay: Duration, manga: Vec<Manga>) -> Self {
            self.searches.insert(keyword.into(), (delay, manga));
            self
        }

        pub fn with_detail(mut self, id: &str, detail: MangaDetail) -> Self {
            self.details.insert(id.into(), detail);
            self
        }

        pub fn with_chapter(mut self, id: &str, chapter: u32, payload: serde_json::Value) -> Self {
            self.chapters.insert((id.into(), chapter), payload);
            self
        }

        /// The requests made so far, like "search/one_piece"
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn missing(what: String) -> FetchError {
        FetchError::Other(format!("{what} not found").into())
    }

    impl MangaSource for FakeSource {
        async fn manga_list(&self, page: u32) -> Result<MangaList, FetchError> {
            self.record(format!("manga-list/{page}"));
            self.lists
                .get(&page)
                .cloned()
                .ok_or_else(|| missing(format!("page {page}")))
        }

        async fn search(&self, keyword: &str) -> Result<SearchResults, FetchError> {
            self.record(format!("search/{keyword}"));
            let (delay, manga) = self
                .searches
                .get(keyword)
                .cloned()
                .ok_or_else(|| missing(format!("keyword \"{keyword}\"")))?;
            tokio::time::sleep(delay).await;

            Ok(SearchResults {
                keyword: keyword.into(),
                count: manga.len() as u64,
                manga,
            })
        }

        async fn manga(&self, id: &str) -> Result<MangaDetail, FetchError> {
            self.record(format!("manga/{id}"));
            self.details
                .get(id)
                .cloned()
                .ok_or_else(|| missing(format!("manga \"{id}\"")))
        }

        async fn chapter(&self, id: &str, chapter: u32) -> Result<serde_json::Value, FetchError> {
            self.record(format!("manga/{id}/{chapter}"));
            self.chapters
                .get(&(id.to_string(), chapter))
                .cloned()
                .ok_or_else(|| missing(format!("chapter {chapter} of \"{id}\"")))
        }
    }
}
