use crate::LatestChapter;
use crate::Scalar;
use crate::TextOrList;

/// The details of a manga.
///
/// The api is inconsistent about which of these fields it sends and how,
/// so every field is optional and a field of the wrong type is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct MangaDetail {
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub title: Option<String>,

    /// An alternate title field
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub name: Option<String>,

    /// The cover image url
    #[serde(
        rename = "imageUrl",
        alias = "imgUrl",
        default,
        deserialize_with = "crate::lenient::or_default"
    )]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub author: Option<TextOrList>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub status: Option<String>,

    /// The last update time, either a display string or a timestamp
    #[serde(rename = "updatedAt", default, deserialize_with = "crate::lenient::or_default")]
    pub updated_at: Option<Scalar>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub views: Option<Scalar>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub genres: Option<TextOrList>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub rating: Option<Scalar>,

    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub description: Option<String>,

    #[serde(rename = "chapterCount", default, deserialize_with = "crate::lenient::or_default")]
    pub chapter_count: Option<Scalar>,

    #[serde(rename = "totalChapters", default, deserialize_with = "crate::lenient::or_default")]
    pub total_chapters: Option<Scalar>,

    #[serde(rename = "lastChapter", default, deserialize_with = "crate::lenient::or_default")]
    pub last_chapter: Option<Scalar>,

    #[serde(rename = "latestChapter", default, deserialize_with = "crate::lenient::or_default")]
    pub latest_chapter: Option<LatestChapter>,
}

impl MangaDetail {
    /// The title, falling back to the name field.
    pub fn display_title(&self) -> Option<&str> {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|title| !title.is_empty())
    }
}
