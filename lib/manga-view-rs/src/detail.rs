use crate::extract;
use crate::HintStore;
use crate::MangaSource;
use crate::Route;
use gomanga::MangaDetail;
use gomanga::Scalar;
use tracing::error;

pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load manga";
pub const NO_CHAPTERS_MESSAGE: &str = "No chapters available";

/// Where a latest chapter hint came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSource {
    /// Carried over by navigation
    Navigation,

    /// Remembered in the hint store
    Stored,

    /// Read from this field of the detail payload
    Field(&'static str),
}

/// A latest chapter hint and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHint {
    pub source: HintSource,
    pub value: String,
}

/// Pick the latest chapter hint.
///
/// The navigation hint wins, then the stored hint, then the detail payload.
/// Empty hints are skipped.
pub fn resolve_latest_chapter(
    navigation: Option<&str>,
    stored: Option<String>,
    detail: Option<&MangaDetail>,
) -> Option<ResolvedHint> {
    if let Some(value) = navigation.filter(|value| !value.is_empty()) {
        return Some(ResolvedHint {
            source: HintSource::Navigation,
            value: value.into(),
        });
    }

    if let Some(value) = stored.filter(|value| !value.is_empty()) {
        return Some(ResolvedHint {
            source: HintSource::Stored,
            value,
        });
    }

    let (field, value) = extract::latest_chapter(detail?)?;
    Some(ResolvedHint {
        source: HintSource::Field(field),
        value,
    })
}

/// The phase of a detail view
#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Loading,
    Failed { message: &'static str },
    Ready(Box<MangaDetail>),
}

/// One line of the information list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub label: &'static str,
    pub value: String,
}

/// The details and chapter list of one manga.
#[derive(Debug, Clone)]
pub struct DetailView {
    id: String,
    status: DetailStatus,
    latest: Option<ResolvedHint>,
    chapter_count: u32,
    reversed: bool,
}

impl DetailView {
    /// Make a view that has not loaded yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: DetailStatus::Loading,
            latest: None,
            chapter_count: 0,
            reversed: false,
        }
    }

    /// Fetch a manga and size its chapter list.
    ///
    /// `navigation_hint` is the latest chapter carried over from the listing, if any.
    pub async fn load<S>(
        source: &S,
        hints: &HintStore,
        id: &str,
        navigation_hint: Option<&str>,
    ) -> Self
    where
        S: MangaSource,
    {
        let mut view = Self::new(id);

        let detail = match source.manga(id).await {
            Ok(detail) => Some(detail),
            Err(error) => {
                error!("failed to fetch manga \"{id}\": {error}");
                view.status = DetailStatus::Failed {
                    message: DETAIL_FAILED_MESSAGE,
                };
                None
            }
        };

        let stored = if navigation_hint.map_or(true, str::is_empty) {
            hints.recall(id)
        } else {
            None
        };
        view.latest = resolve_latest_chapter(navigation_hint, stored, detail.as_ref());
        view.chapter_count = view
            .latest
            .as_ref()
            .map_or(0, |latest| extract::chapter_count(&latest.value));

        if let Some(detail) = detail {
            view.status = DetailStatus::Ready(Box::new(detail));
        }

        view
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    /// The latest chapter hint the chapter list was sized from
    pub fn latest(&self) -> Option<&ResolvedHint> {
        self.latest.as_ref()
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapter_count
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Flip the chapter order.
    pub fn toggle_reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    /// Set the chapter order.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// The label of the reverse control
    pub fn reverse_label(&self) -> &'static str {
        if self.reversed {
            "Undo reverse"
        } else {
            "Reverse order"
        }
    }

    /// The chapter numbers to list, in display order.
    ///
    /// Chapters are assumed to be numbered 1 to the chapter count with no gaps.
    pub fn chapters(&self) -> Vec<u32> {
        let chapters = 1..=self.chapter_count;
        if self.reversed {
            chapters.rev().collect()
        } else {
            chapters.collect()
        }
    }

    /// The reader route of a chapter
    pub fn chapter_route(&self, chapter: u32) -> Route {
        Route::Reader {
            id: self.id.clone(),
            chapter,
        }
    }

    /// The route that shows this view with the chapter order flipped
    pub fn toggle_reverse_route(&self) -> Route {
        Route::Detail {
            id: self.id.clone(),
            latest: self
                .latest
                .as_ref()
                .filter(|latest| latest.source == HintSource::Navigation)
                .map(|latest| latest.value.clone()),
            reversed: !self.reversed,
        }
    }

    fn detail(&self) -> Option<&MangaDetail> {
        match &self.status {
            DetailStatus::Ready(detail) => Some(&**detail),
            _ => None,
        }
    }

    /// The title, falling back to the id
    pub fn title(&self) -> &str {
        self.detail()
            .and_then(MangaDetail::display_title)
            .unwrap_or(self.id.as_str())
    }

    /// The cover image url
    pub fn cover_url(&self) -> Option<&str> {
        self.detail()?
            .image_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }

    /// The information list, skipping missing fields
    pub fn info(&self) -> Vec<InfoItem> {
        let Some(detail) = self.detail() else {
            return Vec::new();
        };

        let fields = [
            ("Author", detail.author.as_ref().map(ToString::to_string)),
            ("Status", detail.status.clone()),
            ("Last Updated", detail.updated_at.as_ref().map(ToString::to_string)),
            ("Views", detail.views.as_ref().map(format_views)),
            ("Genres", detail.genres.as_ref().map(ToString::to_string)),
            ("Rating", detail.rating.as_ref().map(ToString::to_string)),
        ];

        fields
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value.filter(|value| !value.is_empty())?;
                Some(InfoItem { label, value })
            })
            .collect()
    }
}

/// Format a view count, grouping the digits of whole numbers by thousands.
fn format_views(views: &Scalar) -> String {
    let Scalar::Number(number) = views else {
        return views.to_string();
    };

    match (number.as_u64(), number.as_i64()) {
        (Some(n), _) => group_digits(n),
        (None, Some(n)) => format!("-{}", group_digits(n.unsigned_abs())),
        _ => number.to_string(),
    }
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
