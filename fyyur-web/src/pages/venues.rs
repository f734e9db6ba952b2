//! Venue listing and detail pages

use fyyur_common::db::{Area, ArtistShow, VenueDetail};

use super::{attr, external_link, full_date, genre_list, image_tag, layout, search_box, text};

pub fn venues_page(flash: Option<&str>, areas: &[Area]) -> String {
    let mut content = String::from("<h1>Venues</h1>");
    content.push_str(&search_box("/venues/search", "Find a venue", ""));

    if areas.is_empty() {
        content.push_str(r#"<p class="muted">No venues listed yet.</p>"#);
    }

    for area in areas {
        content.push_str(&format!("<h3>{}, {}</h3><ul>", text(&area.city), text(&area.state)));
        for venue in &area.venues {
            content.push_str(&format!(
                r#"<li><a href="/venues/{}">{}</a> <span class="muted">{} upcoming show(s)</span></li>"#,
                venue.id,
                text(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        content.push_str("</ul>");
    }

    layout("Venues", flash, &content)
}

fn show_entries(shows: &[ArtistShow]) -> String {
    shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show">{image}<div><a href="/artists/{id}">{name}</a><br><span class="muted">{when}</span></div></div>"#,
                image = image_tag(show.artist_image_link.as_deref(), &show.artist_name),
                id = show.artist_id,
                name = text(&show.artist_name),
                when = text(&full_date(&show.start_time)),
            )
        })
        .collect()
}

pub fn venue_page(flash: Option<&str>, detail: &VenueDetail) -> String {
    let venue = &detail.venue;

    let seeking = if venue.seeking_talent {
        format!(
            r#"<p><strong>Currently seeking talent</strong><br>{}</p>"#,
            text(venue.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        r#"<p class="muted">Not currently seeking talent</p>"#.to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
<p>{genres}</p>
{image}
<p>{address}<br>{city}, {state}<br>{phone}</p>
<p>{website} &middot; {facebook}</p>
{seeking}
<h2>{upcoming_count} Upcoming Show(s)</h2>
{upcoming}
<h2>{past_count} Past Show(s)</h2>
{past}
<p><a href="/venues/{id}/edit">Edit venue</a></p>
<form method="post" action="/venues/{id}/delete">
    <button class="danger" type="submit" title="Delete {name_attr}">Delete venue</button>
</form>"#,
        name = text(&venue.name),
        name_attr = attr(&venue.name),
        id = venue.id,
        genres = genre_list(&venue.genres),
        image = image_tag(venue.image_link.as_deref(), &venue.name),
        address = text(&venue.address),
        city = text(&venue.city),
        state = text(&venue.state),
        phone = text(&venue.phone),
        website = external_link(venue.website.as_deref(), "website"),
        facebook = external_link(venue.facebook_link.as_deref(), "Facebook page"),
        seeking = seeking,
        upcoming_count = detail.upcoming_shows_count,
        upcoming = show_entries(&detail.upcoming_shows),
        past_count = detail.past_shows_count,
        past = show_entries(&detail.past_shows),
    );

    layout(&venue.name, flash, &content)
}
