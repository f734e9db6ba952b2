//! Submitted form data and its validation
//!
//! Forms arrive as `application/x-www-form-urlencoded` with every field
//! optional at the decoding stage; `validator` decides what is missing or
//! malformed so a bad submission re-renders the form instead of failing
//! extraction. The multi-select `genres` field repeats its key and is
//! decoded with `axum_extra::extract::Form`.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use fyyur_common::choices::{is_known_genre, is_known_state};
use fyyur_common::db::{Artist, ArtistInput, ShowInput, Venue, VenueInput};
use fyyur_common::time::{parse_start_time, STORAGE_FORMAT};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VenueForm {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(length(min = 1, max = 120, message = "Address is required"))]
    pub address: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(url(message = "Invalid image URL"), custom(function = "validate_web_link"), length(max = 500))]
    pub image_link: Option<String>,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url(message = "Invalid Facebook URL"), custom(function = "validate_web_link"), length(max = 120))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "Invalid website URL"), custom(function = "validate_web_link"), length(max = 120))]
    pub website: Option<String>,
    pub seeking_talent: Option<String>,
    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Trim text fields and turn blank optional fields into `None`
    pub fn normalize(&mut self) {
        trim(&mut self.name);
        trim(&mut self.city);
        trim(&mut self.state);
        trim(&mut self.address);
        trim(&mut self.phone);
        blank_to_none(&mut self.image_link);
        blank_to_none(&mut self.facebook_link);
        blank_to_none(&mut self.website);
        blank_to_none(&mut self.seeking_talent);
        blank_to_none(&mut self.seeking_description);
    }

    pub fn into_input(self) -> VenueInput {
        VenueInput {
            seeking_talent: is_checked(&self.seeking_talent),
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            phone: self.phone,
            website: self.website,
            facebook_link: self.facebook_link,
            seeking_description: self.seeking_description,
            image_link: self.image_link,
            genres: self.genres,
        }
    }
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone(),
            website: venue.website.clone(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ArtistForm {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    #[validate(custom(function = "validate_state"))]
    pub state: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(url(message = "Invalid image URL"), custom(function = "validate_web_link"), length(max = 500))]
    pub image_link: Option<String>,
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,
    #[validate(url(message = "Invalid Facebook URL"), custom(function = "validate_web_link"), length(max = 120))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "Invalid website URL"), custom(function = "validate_web_link"), length(max = 120))]
    pub website: Option<String>,
    pub seeking_venue: Option<String>,
    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Trim text fields and turn blank optional fields into `None`
    pub fn normalize(&mut self) {
        trim(&mut self.name);
        trim(&mut self.city);
        trim(&mut self.state);
        trim(&mut self.phone);
        blank_to_none(&mut self.image_link);
        blank_to_none(&mut self.facebook_link);
        blank_to_none(&mut self.website);
        blank_to_none(&mut self.seeking_venue);
        blank_to_none(&mut self.seeking_description);
    }

    pub fn into_input(self) -> ArtistInput {
        ArtistInput {
            seeking_venue: is_checked(&self.seeking_venue),
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_description: self.seeking_description,
            genres: self.genres,
        }
    }
}

impl From<&Artist> for ArtistForm {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone(),
            website: artist.website.clone(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

/// Show submission; ids and time stay text until validated
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ShowForm {
    #[validate(custom(function = "validate_id"))]
    pub artist_id: String,
    #[validate(custom(function = "validate_id"))]
    pub venue_id: String,
    #[validate(custom(function = "validate_start_time"))]
    pub start_time: String,
}

impl ShowForm {
    /// Blank form with the start time preset to `now`
    pub fn starting_at(now: chrono::NaiveDateTime) -> Self {
        Self {
            start_time: now.format(STORAGE_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn normalize(&mut self) {
        trim(&mut self.artist_id);
        trim(&mut self.venue_id);
        trim(&mut self.start_time);
    }

    /// Convert a form that already passed [`Validate::validate`]
    pub fn to_input(&self) -> Option<ShowInput> {
        Some(ShowInput {
            artist_id: self.artist_id.parse().ok()?,
            venue_id: self.venue_id.parse().ok()?,
            start_time: parse_start_time(&self.start_time).ok()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// Names of the fields that failed, sorted for stable messages
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort();
    fields
}

/// Checkbox values sent by browsers and older form libraries
pub fn is_checked(value: &Option<String>) -> bool {
    matches!(value.as_deref(), Some("y" | "on" | "true" | "True" | "1"))
}

/// True for `http` and `https` links, the only schemes rendered as links
pub fn is_web_link(link: &str) -> bool {
    match link.split_once(':') {
        Some((scheme, _)) => scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"),
        None => false,
    }
}

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn blank_to_none(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if is_known_state(state) {
        Ok(())
    } else {
        Err(ValidationError::new("state").with_message("Unknown state".into()))
    }
}

/// Ten-digit North American number, optionally with a leading 1 and the
/// usual separators
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let separators_only = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'));
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let valid_digits = digits.len() == 10 || (digits.len() == 11 && digits[0] == '1');

    if separators_only && valid_digits {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("Invalid phone number".into()))
    }
}

fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.is_empty() {
        return Err(ValidationError::new("genres").with_message("Select at least one genre".into()));
    }
    if let Some(unknown) = genres.iter().find(|g| !is_known_genre(g.trim())) {
        let mut err = ValidationError::new("genres").with_message("Unknown genre".into());
        err.add_param("value".into(), unknown);
        return Err(err);
    }
    Ok(())
}

fn validate_web_link(link: &str) -> Result<(), ValidationError> {
    if is_web_link(link) {
        Ok(())
    } else {
        Err(ValidationError::new("scheme").with_message("Link must start with http:// or https://".into()))
    }
}

fn validate_id(id: &str) -> Result<(), ValidationError> {
    match id.parse::<i64>() {
        Ok(id) if id > 0 => Ok(()),
        _ => Err(ValidationError::new("id").with_message("Must be a positive id".into())),
    }
}

fn validate_start_time(start_time: &str) -> Result<(), ValidationError> {
    parse_start_time(start_time)
        .map(|_| ())
        .map_err(|_| ValidationError::new("start_time").with_message("Invalid date and time".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_venue() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_venue_passes() {
        let mut form = valid_venue();
        form.website = Some("https://www.themusicalhop.com".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_optional_links_are_dropped() {
        let mut form = valid_venue();
        form.facebook_link = Some("   ".to_string());
        form.normalize();
        assert!(form.facebook_link.is_none());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_named() {
        let mut form = valid_venue();
        form.state = "ZZ".to_string();
        form.phone = "call me".to_string();
        form.image_link = Some("not a url".to_string());

        let errors = form.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["image_link", "phone", "state"]);
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let mut form = valid_venue();
        form.name = "  ".to_string();
        form.normalize();
        let errors = form.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["name"]);
    }

    #[test]
    fn test_genres_must_come_from_choices() {
        let mut form = valid_venue();
        form.genres = vec!["Swing".to_string()];
        assert!(form.validate().is_err());

        form.genres.clear();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_links_must_be_http() {
        let mut form = valid_venue();
        form.website = Some("javascript:alert(document.cookie)".to_string());
        form.image_link = Some("data:text/html,<script>alert(1)</script>".to_string());
        form.facebook_link = Some("HTTPS://www.facebook.com/TheMusicalHop".to_string());

        let errors = form.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["image_link", "website"]);

        assert!(is_web_link("http://example.com"));
        assert!(!is_web_link("JavaScript:alert(1)"));
        assert!(!is_web_link("//example.com"));
    }

    #[test]
    fn test_phone_formats() {
        assert!(validate_phone("415-000-1234").is_ok());
        assert!(validate_phone("(415) 000 1234").is_ok());
        assert!(validate_phone("+1 415 000 1234").is_ok());
        assert!(validate_phone("000-1234").is_err());
        assert!(validate_phone("415-000-12345").is_err());
    }

    #[test]
    fn test_checkbox_values() {
        assert!(is_checked(&Some("y".to_string())));
        assert!(is_checked(&Some("True".to_string())));
        assert!(is_checked(&Some("on".to_string())));
        assert!(!is_checked(&Some("n".to_string())));
        assert!(!is_checked(&None));
    }

    #[test]
    fn test_venue_round_trips_into_input() {
        let mut form = valid_venue();
        form.seeking_talent = Some("y".to_string());
        let input = form.into_input();
        assert!(input.seeking_talent);
        assert_eq!(input.genres, vec!["Jazz", "Folk"]);
    }

    #[test]
    fn test_show_form() {
        let form = ShowForm {
            artist_id: "1".to_string(),
            venue_id: "3".to_string(),
            start_time: "2035-04-01 20:00:00".to_string(),
        };
        assert!(form.validate().is_ok());
        let input = form.to_input().unwrap();
        assert_eq!((input.artist_id, input.venue_id), (1, 3));

        let bad = ShowForm {
            artist_id: "abc".to_string(),
            venue_id: "0".to_string(),
            start_time: "tomorrow".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(invalid_fields(&errors), vec!["artist_id", "start_time", "venue_id"]);
    }
}
