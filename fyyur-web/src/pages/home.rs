use fyyur_common::db::EntityRef;

use super::{layout, search_box, text};

fn recent_list(heading: &str, base_path: &str, items: &[EntityRef]) -> String {
    if items.is_empty() {
        return format!(r#"<h3>{}</h3><p class="muted">Nothing listed yet.</p>"#, text(heading));
    }

    let entries: String = items
        .iter()
        .map(|item| format!(r#"<li><a href="{}/{}">{}</a></li>"#, base_path, item.id, text(&item.name)))
        .collect();
    format!("<h3>{}</h3><ul>{}</ul>", text(heading), entries)
}

/// Landing page: search boxes and the newest listings
pub fn home_page(flash: Option<&str>, recent_venues: &[EntityRef], recent_artists: &[EntityRef]) -> String {
    let content = format!(
        r#"<h1>Fyyur</h1>
<p>Discover and book live music venues and artists.</p>
{venue_search}
{artist_search}
{venues}
{artists}"#,
        venue_search = search_box("/venues/search", "Find a venue", ""),
        artist_search = search_box("/artists/search", "Find an artist", ""),
        venues = recent_list("Recently listed venues", "/venues", recent_venues),
        artists = recent_list("Recently listed artists", "/artists", recent_artists),
    );

    layout("Home", flash, &content)
}
