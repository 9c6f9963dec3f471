use crate::Scalar;
use std::borrow::Cow;

/// A page of the manga list
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MangaList {
    /// The page numbers that can be requested
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub pagination: Vec<u32>,

    /// The manga on this page
    #[serde(default)]
    pub data: Vec<Manga>,
}

/// Search results
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchResults {
    /// The keyword, as the api understood it
    #[serde(default)]
    pub keyword: String,

    /// The number of results
    #[serde(default)]
    pub count: u64,

    /// The results
    #[serde(default)]
    pub manga: Vec<Manga>,
}

/// A manga summary, as it appears in listings and search results
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct Manga {
    pub id: String,

    /// A separate slug, if the api provides one
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub title: String,

    /// The cover image url
    #[serde(rename = "imgUrl", default, deserialize_with = "crate::lenient::or_default")]
    pub img_url: String,

    #[serde(rename = "latestChapter", default, deserialize_with = "crate::lenient::or_default")]
    pub latest_chapter: Option<LatestChapter>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub description: Option<String>,
}

/// The latest chapter of a manga.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum LatestChapter {
    /// A display string, usually something like "chapter-12"
    Text(String),

    /// Recent chapters, newest first
    Links(Vec<ChapterLink>),
}

impl LatestChapter {
    /// The text to show for this value.
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            Self::Text(text) => text.as_str(),
            Self::Links(links) => links.first()?.name.as_str(),
        };

        (!label.is_empty()).then_some(label)
    }

    /// The chapter identifier to use as a navigation hint.
    ///
    /// For links, this is the chapter of the newest entry,
    /// falling back to its name.
    pub fn chapter(&self) -> Option<Cow<'_, str>> {
        let chapter = match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Links(links) => {
                let link = links.first()?;
                match link.chapter.as_ref() {
                    Some(Scalar::Number(number)) => Cow::Owned(number.to_string()),
                    Some(Scalar::Text(text)) if !text.is_empty() => Cow::Borrowed(text.as_str()),
                    _ => Cow::Borrowed(link.name.as_str()),
                }
            }
        };

        (!chapter.is_empty()).then_some(chapter)
    }
}

/// A link to a chapter
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ChapterLink {
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub chapter: Option<Scalar>,
}
