//! Artist listing and detail pages

use fyyur_common::db::{ArtistDetail, EntityRef, VenueShow};

use super::{attr, external_link, full_date, genre_list, image_tag, layout, search_box, text};

pub fn artists_page(flash: Option<&str>, artists: &[EntityRef]) -> String {
    let items: String = artists
        .iter()
        .map(|a| format!(r#"<li><a href="/artists/{}">{}</a></li>"#, a.id, text(&a.name)))
        .collect();

    let content = format!(
        "<h1>Artists</h1>{}<ul>{}</ul>",
        search_box("/artists/search", "Find an artist", ""),
        items
    );

    layout("Artists", flash, &content)
}

fn show_entries(shows: &[VenueShow]) -> String {
    shows
        .iter()
        .map(|show| {
            format!(
                r#"<div class="show">{image}<div><a href="/venues/{id}">{name}</a><br><span class="muted">{when}</span></div></div>"#,
                image = image_tag(show.venue_image_link.as_deref(), &show.venue_name),
                id = show.venue_id,
                name = text(&show.venue_name),
                when = text(&full_date(&show.start_time)),
            )
        })
        .collect()
}

pub fn artist_page(flash: Option<&str>, detail: &ArtistDetail) -> String {
    let artist = &detail.artist;

    let seeking = if artist.seeking_venue {
        format!(
            r#"<p><strong>Currently seeking performance venues</strong><br>{}</p>"#,
            text(artist.seeking_description.as_deref().unwrap_or(""))
        )
    } else {
        r#"<p class="muted">Not currently seeking performance venues</p>"#.to_string()
    };

    let content = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
<p>{genres}</p>
{image}
<p>{city}, {state}<br>{phone}</p>
<p>{website} &middot; {facebook}</p>
{seeking}
<h2>{upcoming_count} Upcoming Show(s)</h2>
{upcoming}
<h2>{past_count} Past Show(s)</h2>
{past}
<p><a href="/artists/{id}/edit">Edit artist</a></p>
<form method="post" action="/artists/{id}/delete">
    <button class="danger" type="submit" title="Delete {name_attr}">Delete artist</button>
</form>"#,
        name = text(&artist.name),
        name_attr = attr(&artist.name),
        id = artist.id,
        genres = genre_list(&artist.genres),
        image = image_tag(artist.image_link.as_deref(), &artist.name),
        city = text(&artist.city),
        state = text(&artist.state),
        phone = text(&artist.phone),
        website = external_link(artist.website.as_deref(), "website"),
        facebook = external_link(artist.facebook_link.as_deref(), "Facebook page"),
        seeking = seeking,
        upcoming_count = detail.upcoming_shows_count,
        upcoming = show_entries(&detail.upcoming_shows),
        past_count = detail.past_shows_count,
        past = show_entries(&detail.past_shows),
    );

    layout(&artist.name, flash, &content)
}
