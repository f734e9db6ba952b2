//! Create/edit forms, prefilled with submitted or stored values

use fyyur_common::choices::{GENRES, STATES};
use fyyur_common::db::EntityRef;

use crate::forms::{is_checked, ArtistForm, ShowForm, VenueForm};

use super::{attr, layout, text};

fn text_input(label: &str, name: &str, value: &str, required: bool) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}"{required}>"#,
        name = name,
        label = text(label),
        value = attr(value),
        required = if required { " required" } else { "" },
    )
}

fn optional_input(label: &str, name: &str, value: &Option<String>) -> String {
    text_input(label, name, value.as_deref().unwrap_or(""), false)
}

fn state_select(selected: &str) -> String {
    let options: String = STATES
        .iter()
        .map(|state| {
            let mark = if *state == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, state, mark)
        })
        .collect();

    format!(r#"<label for="state">State</label><select id="state" name="state" required>{}</select>"#, options)
}

fn genre_select(selected: &[String]) -> String {
    let options: String = GENRES
        .iter()
        .map(|genre| {
            let mark = if selected.iter().any(|g| g == genre) { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{2}</option>"#, attr(genre), mark, text(genre))
        })
        .collect();

    format!(
        r#"<label for="genres">Genres</label><select id="genres" name="genres" multiple required>{}</select>"#,
        options
    )
}

fn checkbox(label: &str, name: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{}" value="y"{}> {}</label>"#,
        name,
        if checked { " checked" } else { "" },
        text(label)
    )
}

fn entity_select(label: &str, name: &str, choices: &[EntityRef], selected: &str) -> String {
    let options: String = choices
        .iter()
        .map(|choice| {
            let id = choice.id.to_string();
            let mark = if id == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{} (#{})</option>"#, id, mark, text(&choice.name), id)
        })
        .collect();

    format!(
        r#"<label for="{name}">{label}</label><select id="{name}" name="{name}" required><option value="">Choose...</option>{options}</select>"#,
        name = name,
        label = text(label),
        options = options,
    )
}

/// Venue create/edit form posting to `action`
pub fn venue_form_page(title: &str, action: &str, flash: Option<&str>, form: &VenueForm) -> String {
    let content = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
{name}{city}{state}{address}{phone}{genres}{image}{facebook}{website}{seeking}{description}
<button type="submit">Save venue</button>
</form>"#,
        title = text(title),
        action = attr(action),
        name = text_input("Name", "name", &form.name, true),
        city = text_input("City", "city", &form.city, true),
        state = state_select(&form.state),
        address = text_input("Address", "address", &form.address, true),
        phone = text_input("Phone", "phone", &form.phone, true),
        genres = genre_select(&form.genres),
        image = optional_input("Image link", "image_link", &form.image_link),
        facebook = optional_input("Facebook link", "facebook_link", &form.facebook_link),
        website = optional_input("Website", "website", &form.website),
        seeking = checkbox("Looking for talent", "seeking_talent", is_checked(&form.seeking_talent)),
        description = optional_input("Seeking description", "seeking_description", &form.seeking_description),
    );

    layout(title, flash, &content)
}

/// Artist create/edit form posting to `action`
pub fn artist_form_page(title: &str, action: &str, flash: Option<&str>, form: &ArtistForm) -> String {
    let content = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
{name}{city}{state}{phone}{genres}{image}{facebook}{website}{seeking}{description}
<button type="submit">Save artist</button>
</form>"#,
        title = text(title),
        action = attr(action),
        name = text_input("Name", "name", &form.name, true),
        city = text_input("City", "city", &form.city, true),
        state = state_select(&form.state),
        phone = text_input("Phone", "phone", &form.phone, true),
        genres = genre_select(&form.genres),
        image = optional_input("Image link", "image_link", &form.image_link),
        facebook = optional_input("Facebook link", "facebook_link", &form.facebook_link),
        website = optional_input("Website", "website", &form.website),
        seeking = checkbox("Looking for venues", "seeking_venue", is_checked(&form.seeking_venue)),
        description = optional_input("Seeking description", "seeking_description", &form.seeking_description),
    );

    layout(title, flash, &content)
}

pub fn show_form_page(
    flash: Option<&str>,
    form: &ShowForm,
    artists: &[EntityRef],
    venues: &[EntityRef],
) -> String {
    let content = format!(
        r#"<h1>List a new show</h1>
<form method="post" action="/shows/create">
{artist}{venue}{start_time}
<button type="submit">Create show</button>
</form>"#,
        artist = entity_select("Artist", "artist_id", artists, &form.artist_id),
        venue = entity_select("Venue", "venue_id", venues, &form.venue_id),
        start_time = text_input("Start time (YYYY-MM-DD HH:MM)", "start_time", &form.start_time, true),
    );

    layout("New Show", flash, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_values_are_kept() {
        let form = VenueForm {
            name: "Blue \"Room\"".to_string(),
            state: "TX".to_string(),
            genres: vec!["Jazz".to_string()],
            seeking_talent: Some("y".to_string()),
            ..Default::default()
        };
        let page = venue_form_page("New Venue", "/venues/create", None, &form);

        assert!(page.contains(r#"value="Blue &quot;Room&quot;""#));
        assert!(page.contains(r#"<option value="TX" selected>TX</option>"#));
        assert!(page.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(page.contains(r#"name="seeking_talent" value="y" checked"#));
    }
}
