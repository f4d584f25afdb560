//! Snapshot → HTML. Pure; no I/O.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::{Item, Snapshot};

pub fn page(snapshot: &Snapshot, title: &str, now: DateTime<Utc>) -> String {
    let mut html = String::with_capacity(512 + snapshot.len() * 512);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = encode_text(title)
    );

    if snapshot.is_empty() {
        html.push_str("<p class=\"empty\">Nothing to show yet.</p>\n");
    } else {
        html.push_str("<ol class=\"items\">\n");
        for item in &snapshot.items {
            row(&mut html, item, now);
        }
        html.push_str("</ol>\n");
    }

    let _ = write!(
        html,
        "<footer>Snapshot v{} &middot; updated {}</footer>\n</body>\n</html>\n",
        snapshot.version,
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    html
}

fn row(html: &mut String, item: &Item, now: DateTime<Utc>) {
    let _ = write!(
        html,
        "<li><a href=\"{}\">{}</a>",
        encode_double_quoted_attribute(item.link()),
        encode_text(item.display_title())
    );
    if let Some(domain) = item.domain() {
        let _ = write!(html, " <span class=\"domain\">({})</span>", encode_text(&domain));
    }
    let _ = write!(
        html,
        "<div class=\"meta\">{} points by {} {} | <a href=\"{}\">{} comments</a></div></li>\n",
        item.score,
        encode_text(&item.by),
        age(item.created_at, now),
        encode_double_quoted_attribute(&item.display_url),
        item.descendants
    );
}

/// "5 minutes ago" style age.
pub fn age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(created_at).num_seconds().max(0);
    let (n, unit) = match secs {
        s if s < 60 => return "just now".to_string(),
        s if s < 3600 => (s / 60, "minute"),
        s if s < 86400 => (s / 3600, "hour"),
        s => (s / 86400, "day"),
    };
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;

    fn story(id: u64, title: &str, url: &str) -> Item {
        let mut item = Item::new(id, ItemKind::Story, Utc::now());
        item.title = title.to_string();
        item.url = url.to_string();
        item.score = 42;
        item.by = "pg".to_string();
        item.with_display_url("https://news.ycombinator.com")
    }

    #[test]
    fn test_age() {
        let now = Utc::now();
        assert_eq!(age(now, now), "just now");
        assert_eq!(age(now - chrono::Duration::minutes(1), now), "1 minute ago");
        assert_eq!(age(now - chrono::Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(age(now - chrono::Duration::hours(3), now), "3 hours ago");
        assert_eq!(age(now - chrono::Duration::days(2), now), "2 days ago");
        assert_eq!(age(now + chrono::Duration::minutes(5), now), "just now");
    }

    #[test]
    fn test_empty_page() {
        let html = page(&Snapshot::empty(), "Top", Utc::now());
        assert!(html.contains("<title>Top</title>"));
        assert!(html.contains("Nothing to show yet."));
    }

    #[test]
    fn test_page_lists_items_in_order() {
        let snapshot = Snapshot::new(
            vec![
                story(2, "Second", "https://example.com/b"),
                story(1, "First", ""),
            ],
            Utc::now(),
        );
        let html = page(&snapshot, "Top", Utc::now());

        let second = html.find("Second").unwrap();
        let first = html.find("First").unwrap();
        assert!(second < first);
        assert!(html.contains("href=\"https://example.com/b\""));
        assert!(html.contains("(example.com)"));
        // no URL: title links to the discussion
        assert!(html.contains("href=\"https://news.ycombinator.com/item?id=1\">First</a>"));
        assert!(html.contains("42 points by pg"));
    }

    #[test]
    fn test_page_escapes_markup() {
        let snapshot = Snapshot::new(
            vec![story(1, "<script>alert(1)</script>", "https://e.com/?a=\"x\"")],
            Utc::now(),
        );
        let html = page(&snapshot, "A & B", Utc::now());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(!html.contains("a=\"x\""));
    }

    #[test]
    fn test_script_url_links_to_discussion() {
        let snapshot = Snapshot::new(
            vec![story(3, "Sneaky", "javascript:alert(document.cookie)")],
            Utc::now(),
        );
        let html = page(&snapshot, "Top", Utc::now());

        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"https://news.ycombinator.com/item?id=3\">Sneaky</a>"));
    }
}
