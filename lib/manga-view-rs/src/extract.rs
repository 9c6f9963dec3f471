//! Ordered extraction rules for api payloads whose shape is not fixed.
//!
//! Rules are evaluated top to bottom and the first one that produces a usable value wins.

use gomanga::LatestChapter;
use gomanga::MangaDetail;
use gomanga::Scalar;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+").unwrap());

/// The largest chapter count that will be synthesized.
pub const MAX_CHAPTER_COUNT: u32 = 10_000;

/// A detail field that may identify the latest chapter.
#[derive(Debug, Clone, Copy)]
pub struct LatestChapterRule {
    /// The json name of the field
    pub field: &'static str,

    extract: fn(&MangaDetail) -> Option<String>,
}

impl LatestChapterRule {
    /// Get a non-empty value for this rule.
    pub fn apply(&self, detail: &MangaDetail) -> Option<String> {
        (self.extract)(detail).filter(|value| !value.is_empty())
    }
}

/// Detail fields that may hold the latest chapter, by priority.
pub const LATEST_CHAPTER_RULES: &[LatestChapterRule] = &[
    LatestChapterRule {
        field: "latestChapter",
        extract: latest_chapter_field,
    },
    LatestChapterRule {
        field: "chapterCount",
        extract: chapter_count_field,
    },
    LatestChapterRule {
        field: "totalChapters",
        extract: total_chapters_field,
    },
    LatestChapterRule {
        field: "lastChapter",
        extract: last_chapter_field,
    },
];

fn latest_chapter_field(detail: &MangaDetail) -> Option<String> {
    detail
        .latest_chapter
        .as_ref()
        .and_then(LatestChapter::chapter)
        .map(Into::into)
}

fn chapter_count_field(detail: &MangaDetail) -> Option<String> {
    detail.chapter_count.as_ref().map(Scalar::to_string)
}

fn total_chapters_field(detail: &MangaDetail) -> Option<String> {
    detail.total_chapters.as_ref().map(Scalar::to_string)
}

fn last_chapter_field(detail: &MangaDetail) -> Option<String> {
    detail.last_chapter.as_ref().map(Scalar::to_string)
}

/// Find the latest chapter in a detail payload.
///
/// Returns the matching field name and its value.
pub fn latest_chapter(detail: &MangaDetail) -> Option<(&'static str, String)> {
    LATEST_CHAPTER_RULES
        .iter()
        .find_map(|rule| Some((rule.field, rule.apply(detail)?)))
}

/// Get the number of chapters from a latest chapter string, like "chapter-12".
///
/// This is the first run of digits, clamped to [`MAX_CHAPTER_COUNT`].
/// Strings without digits have 0 chapters.
pub fn chapter_count(latest_chapter: &str) -> u32 {
    DIGITS_REGEX
        .find(latest_chapter)
        .map_or(0, |digits| {
            // The match is only digits, so this only fails on overflow.
            digits
                .as_str()
                .parse::<u32>()
                .map_or(MAX_CHAPTER_COUNT, |count| count.min(MAX_CHAPTER_COUNT))
        })
}

/// Chapter payload fields that may hold the page list, by priority.
pub const PAGE_FIELDS: &[&str] = &[
    "images",
    "pages",
    "pictures",
    "imageUrls",
    "chapterImages",
    "imgs",
];

/// A way to get an image url from one element of a page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRule {
    /// The element is the url
    Url,

    /// The element is an object with the url in this property
    Property(&'static str),
}

impl PageRule {
    /// Try to get a non-empty url from an element.
    pub fn resolve(self, element: &Value) -> Option<&str> {
        let url = match self {
            Self::Url => element.as_str()?,
            Self::Property(name) => element.get(name)?.as_str()?,
        };

        (!url.is_empty()).then_some(url)
    }
}

/// Ways to get an image url from a page list element, by priority.
pub const PAGE_RULES: &[PageRule] = &[
    PageRule::Url,
    PageRule::Property("img"),
    PageRule::Property("url"),
];

/// Get the image url of a page list element.
pub fn page_url(element: &Value) -> Option<&str> {
    PAGE_RULES.iter().find_map(|rule| rule.resolve(element))
}

/// Pages extracted from a chapter payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPages {
    /// The field the pages came from
    pub field: &'static str,

    /// Image urls, in reading order
    pub urls: Vec<String>,
}

/// Get the page image urls from a chapter payload.
///
/// This uses the first field in [`PAGE_FIELDS`] that is an array with at least one usable url.
/// Elements that no rule can resolve are skipped.
pub fn chapter_pages(payload: &Value) -> Option<ChapterPages> {
    PAGE_FIELDS.iter().find_map(|&field| {
        let urls: Vec<String> = payload
            .get(field)?
            .as_array()?
            .iter()
            .filter_map(page_url)
            .map(String::from)
            .collect();

        (!urls.is_empty()).then_some(ChapterPages { field, urls })
    })
}
