//! Server-rendered HTML pages
//!
//! Pages are plain `format!` templates. Anything that came from a user or
//! the database goes through [`text`] or [`attr`] before it is spliced in.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use fyyur_common::time::{format_datetime, DateFormat};

use crate::forms::is_web_link;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

/// Escape for element content
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape for a double-quoted attribute value
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

pub fn full_date(value: &NaiveDateTime) -> String {
    format_datetime(value, DateFormat::Full)
}

pub fn medium_date(value: &NaiveDateTime) -> String {
    format_datetime(value, DateFormat::Medium)
}

/// `<img>` tag for an optional image link, empty when there is none
pub fn image_tag(link: Option<&str>, alt: &str) -> String {
    match link.filter(|l| is_web_link(l)) {
        Some(link) => format!(
            r#"<img class="thumb" src="{}" alt="{}">"#,
            attr(link),
            attr(alt)
        ),
        None => String::new(),
    }
}

/// `<a>` tag for an optional external link
pub fn external_link(link: Option<&str>, label: &str) -> String {
    match link.filter(|l| is_web_link(l)) {
        Some(link) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            attr(link),
            text(label)
        ),
        None => format!(r#"<span class="muted">No {}</span>"#, text(label)),
    }
}

/// Genre badges
pub fn genre_list(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, text(g)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap page content in the shared layout
pub fn layout(title: &str, flash: Option<&str>, content: &str) -> String {
    let flash = match flash {
        Some(message) => format!(r#"<div class="flash">{}</div>"#, text(message)),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <style>
        * {{
            box-sizing: border-box;
        }}
        body {{
            margin: 0;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 12px 20px;
            display: flex;
            gap: 24px;
            align-items: center;
        }}
        header .brand {{
            font-size: 22px;
            font-weight: bold;
            color: #4a9eff;
        }}
        a {{
            color: #4a9eff;
            text-decoration: none;
        }}
        main {{
            padding: 20px;
            max-width: 960px;
        }}
        .flash {{
            background-color: #2d4a2d;
            border: 1px solid #3f6f3f;
            padding: 10px 14px;
            margin-bottom: 20px;
            border-radius: 4px;
        }}
        .genre {{
            display: inline-block;
            background-color: #333;
            border-radius: 10px;
            padding: 0 10px;
            font-size: 13px;
        }}
        .muted {{
            color: #888;
        }}
        .thumb {{
            max-width: 120px;
            max-height: 120px;
            border-radius: 4px;
        }}
        .show {{
            display: flex;
            gap: 12px;
            align-items: center;
            margin-bottom: 12px;
        }}
        form label {{
            display: block;
            margin-top: 10px;
        }}
        input, select, textarea {{
            background-color: #2a2a2a;
            color: #e0e0e0;
            border: 1px solid #3a3a3a;
            padding: 6px;
            width: 100%;
            max-width: 480px;
        }}
        input[type="checkbox"] {{
            width: auto;
        }}
        button {{
            margin-top: 14px;
            background-color: #4a9eff;
            color: #fff;
            border: none;
            padding: 8px 18px;
            border-radius: 4px;
            cursor: pointer;
        }}
        button.danger {{
            background-color: #c0392b;
        }}
        footer {{
            padding: 20px;
            font-size: 12px;
            color: #666;
            font-family: 'Courier New', monospace;
        }}
    </style>
</head>
<body>
    <header>
        <a class="brand" href="/">🔥 Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <a href="/venues/create">List a venue</a>
        <a href="/artists/create">List an artist</a>
        <a href="/shows/create">List a show</a>
    </header>
    <main>
        {flash}
        {content}
    </main>
    <footer>v{version} [{git_hash}] built {build_timestamp} ({build_profile})</footer>
</body>
</html>"#,
        title = text(title),
        flash = flash,
        content = content,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        build_timestamp = env!("BUILD_TIMESTAMP"),
        build_profile = env!("BUILD_PROFILE"),
    )
}

/// Name search box posting `search_term` to `action`
pub fn search_box(action: &str, placeholder: &str, term: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{action}">
    <input type="search" name="search_term" placeholder="{placeholder}" value="{term}">
    <button type="submit">Search</button>
</form>"#,
        action = attr(action),
        placeholder = attr(placeholder),
        term = attr(term),
    )
}

/// Results page shared by venue and artist search
pub fn search_results(
    title: &str,
    base_path: &str,
    term: &str,
    results: &fyyur_common::db::SearchResults,
) -> String {
    let items: String = results
        .data
        .iter()
        .map(|item| {
            format!(
                r#"<li><a href="{}/{}">{}</a></li>"#,
                base_path,
                item.id,
                text(&item.name)
            )
        })
        .collect();

    let content = format!(
        r#"{search}
<h3>Number of search results for "{term}": {count}</h3>
<ul class="results">{items}</ul>"#,
        search = search_box(&format!("{}/search", base_path), title, term),
        term = text(term),
        count = results.count,
        items = items,
    );

    layout(title, None, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_is_escaped() {
        let page = layout("Venues", Some("<script>alert(1)</script>"), "");
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_attribute_escaping() {
        let tag = image_tag(Some("https://example.com/a.jpg\" onerror=\"x"), "A & B");
        assert!(tag.contains("&quot; onerror=&quot;x"));
        assert!(tag.contains("A &amp; B"));
    }

    #[test]
    fn test_missing_link_renders_placeholder() {
        assert_eq!(external_link(None, "website"), r#"<span class="muted">No website</span>"#);
    }

    #[test]
    fn test_script_links_are_not_rendered() {
        let link = external_link(Some("javascript:alert(1)"), "website");
        assert!(!link.contains("href"));
        assert!(image_tag(Some("javascript:alert(1)"), "cover").is_empty());
    }
}
