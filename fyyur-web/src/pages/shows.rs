use fyyur_common::db::ShowListing;

use super::{image_tag, layout, medium_date, text};

pub fn shows_page(flash: Option<&str>, shows: &[ShowListing]) -> String {
    let mut content = String::from("<h1>Shows</h1>");

    if shows.is_empty() {
        content.push_str(r#"<p class="muted">No shows scheduled.</p>"#);
    }

    for show in shows {
        content.push_str(&format!(
            r#"<div class="show">{image}<div><span class="muted">{when}</span><br><a href="/artists/{artist_id}">{artist}</a> playing at <a href="/venues/{venue_id}">{venue}</a></div></div>"#,
            image = image_tag(show.artist_image_link.as_deref(), &show.artist_name),
            when = text(&medium_date(&show.start_time)),
            artist_id = show.artist_id,
            artist = text(&show.artist_name),
            venue_id = show.venue_id,
            venue = text(&show.venue_name),
        ));
    }

    layout("Shows", flash, &content)
}
