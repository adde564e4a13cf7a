//! Dev log feed rendering.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DevlogPost {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Trusted HTML authored with the site.
    pub body_html: String,
}

/// `2025-12-13` -> `Dec 13, 2025`. RFC 3339 timestamps use their own calendar date.
/// Anything unparseable reads "Unknown date".
pub fn format_post_date(date: &str) -> String {
    let date = date.trim();
    DateTime::parse_from_rfc3339(date)
        .map(|stamp| stamp.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .map(|day| day.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| "Unknown date".to_string())
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Window body for the dev log app. Posts render in the given order.
pub fn render_feed(posts: &[DevlogPost]) -> String {
    let mut html = String::from(
        "<section class=\"window-app window-app--devlog\" aria-label=\"Dev Log\">\
<header class=\"window-app__header\"><h1>Dev Log</h1><p>Patch notes &amp; progress updates.</p></header>\
<div class=\"devlog-feed\" aria-label=\"Dev log feed\">",
    );
    for post in posts {
        html.push_str(&format!(
            "<article class=\"devlog-entry\" data-post-id=\"{id}\"><div class=\"devlog-entry__inner\">\
<h2 class=\"devlog-entry__title\">{title}</h2>\
<div class=\"devlog-entry__body\">{body}</div>\
<div class=\"devlog-entry__date\">{date}</div></div></article>",
            id = escape_html(&post.id),
            title = escape_html(&post.title),
            body = post.body_html,
            date = format_post_date(&post.date),
        ));
    }
    html.push_str("</div></section>");
    html
}
