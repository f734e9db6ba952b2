//! One-shot user notices carried between requests in a cookie

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie holding the pending message
pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Queue `message` for the next rendered page
pub fn set_flash(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, message.into()))
        .path("/")
        .http_only(true);
    jar.add(cookie)
}

/// Read the pending message and clear it
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());
    match message {
        Some(message) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(message)),
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_is_read_once() {
        let jar = set_flash(CookieJar::new(), "Venue The Musical Hop was successfully listed!");

        let (jar, message) = take_flash(jar);
        assert_eq!(message.as_deref(), Some("Venue The Musical Hop was successfully listed!"));

        let (_, message) = take_flash(jar);
        assert!(message.is_none());
    }
}
