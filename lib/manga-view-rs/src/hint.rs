use gomanga::LatestChapter;
use gomanga::Manga;
use manga_plus_util::TimedLruMap;
use std::num::NonZeroUsize;
use std::time::Duration;

/// The default number of remembered hints
pub const DEFAULT_HINT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(capacity) => capacity,
    None => panic!("capacity is 0"),
};

/// The default time a hint is remembered for
pub const DEFAULT_HINT_TTL: Duration = Duration::from_secs(30 * 60);

/// Latest chapter hints, keyed by manga id.
///
/// A hint saves the detail view from guessing the chapter count from the detail payload.
/// Hints are best-effort: they are never checked against the api.
#[derive(Debug)]
pub struct HintStore {
    map: TimedLruMap<String, String>,
}

impl HintStore {
    /// Make a new [`HintStore`].
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            map: TimedLruMap::new(capacity, ttl),
        }
    }

    /// The storage key of a manga's hint
    pub fn storage_key(id: &str) -> String {
        format!("manga-{id}-latest")
    }

    /// Remember the latest chapter of a manga.
    ///
    /// Empty chapters are ignored.
    pub fn remember(&self, id: &str, chapter: &str) {
        if chapter.is_empty() {
            return;
        }

        self.map.insert(Self::storage_key(id), chapter.into());
    }

    /// Remember the latest chapter of every listed manga that has one.
    pub fn remember_listing(&self, manga: &[Manga]) {
        for manga in manga {
            if let Some(chapter) = manga
                .latest_chapter
                .as_ref()
                .and_then(LatestChapter::chapter)
            {
                self.remember(&manga.id, &chapter);
            }
        }
    }

    /// Recall the latest chapter of a manga.
    pub fn recall(&self, id: &str) -> Option<String> {
        self.map.get(Self::storage_key(id).as_str())
    }

    /// Forget the latest chapter of a manga.
    pub fn forget(&self, id: &str) -> Option<String> {
        self.map.remove(Self::storage_key(id).as_str())
    }
}

impl Default for HintStore {
    fn default() -> Self {
        Self::new(DEFAULT_HINT_CAPACITY, DEFAULT_HINT_TTL)
    }
}
