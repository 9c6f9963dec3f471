//! Html renderers for already-loaded view state.

use gomanga::LatestChapter;
use gomanga::Manga;
use manga_view::DetailStatus;
use manga_view::DetailView;
use manga_view::ListingState;
use manga_view::ListingStatus;
use manga_view::ReaderStatus;
use manga_view::ReaderView;
use manga_view::Route;
use manga_view::NO_CHAPTERS_MESSAGE;
use std::borrow::Cow;
use std::fmt::Write;

/// Escape text for use in html text or a quoted attribute.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Wrap a page body in a document.
pub fn document(title: &str, with_header: bool, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let _ = write!(html, "<title>{}</title>", escape(title));
    html.push_str("<link rel=\"stylesheet\" href=\"/style.css\"></head><body>");
    if with_header {
        html.push_str(&header());
    }
    let _ = write!(html, "<main>{body}</main></body></html>");
    html
}

fn header() -> String {
    format!(
        "<header class=\"header\"><a class=\"logo\" href=\"{}\">MANGA</a></header>",
        Route::home()
    )
}

pub fn landing() -> String {
    format!(
        "<section class=\"landing\"><h1>MANGA <span>PLUS</span></h1>\
         <p>Your Gateway to Unlimited Manga</p>\
         <a class=\"start-button\" href=\"{}\">Start Reading</a></section>",
        Route::home()
    )
}

fn search_form(query: &str) -> String {
    format!(
        "<form class=\"search\" action=\"{}\" method=\"get\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search manga...\" value=\"{}\">\
         <button type=\"submit\">Search</button></form>",
        Route::home(),
        escape(query)
    )
}

/// A card linking to the details of a manga, carrying its latest chapter.
pub fn manga_card(manga: &Manga) -> String {
    let latest_chapter = manga.latest_chapter.as_ref();
    let route = Route::Detail {
        id: manga.id.clone(),
        latest: latest_chapter
            .and_then(LatestChapter::chapter)
            .map(Cow::into_owned),
        reversed: false,
    };

    let mut html = String::new();
    let _ = write!(html, "<a class=\"manga-card\" href=\"{}\">", escape(&route.href()));
    html.push_str("<div class=\"cover\">");
    if !manga.img_url.is_empty() {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(&manga.img_url),
            escape(&manga.title)
        );
    }
    if let Some(label) = latest_chapter.and_then(LatestChapter::label) {
        let _ = write!(html, "<span class=\"latest-chapter\">{}</span>", escape(label));
    }
    let _ = write!(html, "</div><h3>{}</h3></a>", escape(&manga.title));
    html
}

fn pagination(state: &ListingState) -> String {
    let mut html = String::from("<nav class=\"pagination\">");
    for &page in state.pagination.iter() {
        let route = Route::Home { page, query: None };
        let class = if page == state.current_page {
            "page-button active"
        } else {
            "page-button"
        };
        let _ = write!(html, "<a class=\"{class}\" href=\"{route}\">{page}</a>");
    }
    html.push_str("</nav>");
    html
}

/// The manga list or search results.
pub fn listing(state: &ListingState) -> String {
    let mut html = search_form(&state.query);

    if state.is_loading() {
        let _ = write!(html, "<p class=\"loading\">{}</p>", state.loading_message());
    } else if let Some(message) = state.message() {
        let class = match state.status {
            ListingStatus::Failed { .. } => "message error",
            _ => "message",
        };
        let _ = write!(html, "<p class=\"{class}\">{message}</p>");
    } else if state.status == ListingStatus::Ready {
        html.push_str("<div class=\"manga-grid\">");
        for manga in state.manga.iter() {
            html.push_str(&manga_card(manga));
        }
        html.push_str("</div>");
    }

    if state.show_pagination() {
        html.push_str(&pagination(state));
    }

    html
}

/// The details and chapter list of a manga.
pub fn detail(view: &DetailView) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<a class=\"back\" href=\"{}\">Back</a>",
        Route::home()
    );

    match view.status() {
        DetailStatus::Loading => {
            html.push_str("<p class=\"loading\">Loading manga...</p>");
            return html;
        }
        DetailStatus::Failed { message } => {
            let _ = write!(html, "<p class=\"message error\">{message}</p>");
            return html;
        }
        DetailStatus::Ready(_) => {}
    }

    html.push_str("<section class=\"manga-detail\">");
    if let Some(cover_url) = view.cover_url() {
        let _ = write!(
            html,
            "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
            escape(cover_url),
            escape(view.title())
        );
    }
    let _ = write!(html, "<div class=\"info\"><h1>{}</h1><dl>", escape(view.title()));
    for item in view.info() {
        let _ = write!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            item.label,
            escape(&item.value)
        );
    }
    html.push_str("</dl></div></section>");

    let _ = write!(
        html,
        "<section class=\"chapters\"><div class=\"chapters-header\"><h2>Chapters</h2>\
         <a class=\"reverse-button\" href=\"{}\">{}</a></div>",
        escape(&view.toggle_reverse_route().href()),
        view.reverse_label()
    );
    let chapters = view.chapters();
    if chapters.is_empty() {
        let _ = write!(html, "<p class=\"message\">{NO_CHAPTERS_MESSAGE}</p>");
    } else {
        html.push_str("<ul class=\"chapter-list\">");
        for chapter in chapters {
            let _ = write!(
                html,
                "<li><a class=\"chapter-link\" href=\"{}\">Chapter {chapter}</a></li>",
                escape(&view.chapter_route(chapter).href())
            );
        }
        html.push_str("</ul>");
    }
    html.push_str("</section>");

    html
}

fn reader_navigation(view: &ReaderView) -> String {
    let mut html = String::from("<nav class=\"reader-nav\">");
    let _ = write!(
        html,
        "<a class=\"nav-button\" href=\"{}\">Chapters</a>",
        escape(&view.detail_route().href())
    );
    match view.previous() {
        Some(previous) => {
            let _ = write!(
                html,
                "<a class=\"nav-button\" href=\"{}\">Previous</a>",
                escape(&previous.href())
            );
        }
        None => html.push_str("<span class=\"nav-button disabled\">Previous</span>"),
    }
    let _ = write!(
        html,
        "<a class=\"nav-button\" href=\"{}\">Next</a></nav>",
        escape(&view.next().href())
    );
    html
}

/// The pages of a chapter, between navigation bars.
pub fn reader(view: &ReaderView) -> String {
    let navigation = reader_navigation(view);

    let mut html = String::new();
    let _ = write!(html, "<h1>Chapter {}</h1>", view.chapter());
    html.push_str(&navigation);

    match view.status() {
        ReaderStatus::Loading => html.push_str("<p class=\"loading\">Loading chapter...</p>"),
        ReaderStatus::Failed { message } => {
            let _ = write!(html, "<p class=\"message error\">{message}</p>");
        }
        ReaderStatus::NoPages { message } => {
            let _ = write!(html, "<p class=\"message\">{message}</p>");
        }
        ReaderStatus::Ready { pages } => {
            html.push_str("<div class=\"pages\">");
            for (i, page) in pages.iter().enumerate() {
                let _ = write!(
                    html,
                    "<img class=\"page\" src=\"{}\" alt=\"Page {}\" loading=\"lazy\">",
                    escape(page),
                    i + 1
                );
            }
            html.push_str("</div>");
        }
    }

    html.push_str(&navigation);
    html
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn escapes() {
        assert!(matches!(escape("Solo Leveling"), Cow::Borrowed(_)));
        assert_eq!(
            escape("<b>\"Tom & Jerry's\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn header_links_home() {
        let html = document("Manga Plus", true, "");
        assert!(html.contains("<a class=\"logo\" href=\"/home\">MANGA</a>"));
        assert!(!html.contains("<img"));

        assert!(!document("Manga Plus", false, "").contains("class=\"header\""));
    }

    #[test]
    fn card_carries_latest_chapter() {
        let manga = Manga {
            id: "solo-leveling".into(),
            title: "Solo <Leveling>".into(),
            img_url: "https://example.com/solo.jpg".into(),
            latest_chapter: Some(LatestChapter::Text("chapter-200".into())),
            ..Default::default()
        };
        let html = manga_card(&manga);
        assert!(html.contains("href=\"/manga/solo-leveling?latest=chapter-200\""));
        assert!(html.contains("<span class=\"latest-chapter\">chapter-200</span>"));
        assert!(html.contains("<h3>Solo &lt;Leveling&gt;</h3>"));

        let bare = Manga {
            id: "a".into(),
            title: "A".into(),
            ..Default::default()
        };
        let html = manga_card(&bare);
        assert!(html.contains("<a class=\"manga-card\" href=\"/manga/a\">"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn reader_previous_is_disabled_on_first_chapter() {
        let html = reader(&ReaderView::new("x", 1));
        assert!(html.contains("<span class=\"nav-button disabled\">Previous</span>"));
        assert!(html.contains("href=\"/manga/x/read/2\">Next</a>"));

        let html = reader(&ReaderView::new("x", 4));
        assert!(!html.contains("disabled"));
        assert!(html.contains("href=\"/manga/x/read/3\">Previous</a>"));
    }
}
