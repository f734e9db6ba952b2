//! Fixed choices offered by the venue and artist forms

/// Genres a venue or artist may be tagged with
pub const GENRES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state codes (plus DC) accepted in the state field
pub const STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

pub fn is_known_genre(genre: &str) -> bool {
    GENRES.contains(&genre)
}

pub fn is_known_state(state: &str) -> bool {
    STATES.contains(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookup_is_exact() {
        assert!(is_known_genre("Jazz"));
        assert!(is_known_genre("Rock n Roll"));
        assert!(!is_known_genre("jazz"));
        assert!(!is_known_genre("Polka"));
    }

    #[test]
    fn test_state_lookup() {
        assert!(is_known_state("CA"));
        assert!(is_known_state("DC"));
        assert!(!is_known_state("ZZ"));
    }
}
