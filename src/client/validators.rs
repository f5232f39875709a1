//! Client-side form validation.
//!
//! Every check runs before a request is built; a failure is a
//! [`SharedError::ValidationError`] and nothing is sent.

use url::Url;

use crate::shared::catalog::{BookForm, TutorialForm};
use crate::shared::error::SharedError;
use crate::shared::library::MAX_PROGRESS;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Outcome of the password strength checks shown on the register screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_number: bool,
    pub min_len: bool,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        Self {
            has_upper: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            min_len: password.chars().count() >= MIN_PASSWORD_LEN,
        }
    }

    /// Number of satisfied checks, 0..=4
    pub fn score(&self) -> u8 {
        [self.has_upper, self.has_lower, self.has_number, self.min_len]
            .iter()
            .filter(|ok| **ok)
            .count() as u8
    }

    pub fn label(&self) -> &'static str {
        match self.score() {
            0 | 1 => "Weak",
            2 | 3 => "Medium",
            _ => "Strong",
        }
    }

    pub fn is_valid(&self) -> bool {
        self.score() == 4
    }
}

pub fn validate_registration(name: &str, email: &str, password: &str, photo: &str) -> Result<(), SharedError> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation(
            "form",
            "Name, email, and password are required",
        ));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(SharedError::validation("email", "Please enter a valid email address"));
    }
    if !PasswordStrength::of(password).is_valid() {
        return Err(SharedError::validation(
            "password",
            "Password must be at least 6 characters and include 1 capital, 1 small, and 1 number",
        ));
    }
    if photo.trim().is_empty() {
        return Err(SharedError::validation("photo", "Please upload a profile photo"));
    }
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), SharedError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SharedError::validation("form", "Email and password are required"));
    }
    Ok(())
}

fn parse_web_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

/// Accept only images hosted on imgbb (`i.ibb.co`, `*.ibb.co`)
pub fn is_imgbb_url(url: &str) -> bool {
    let Some(parsed) = parse_web_url(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => host == "i.ibb.co" || host.ends_with(".ibb.co") || host.contains("i.ibb.co"),
        None => false,
    }
}

/// Trimmed cover URL, or why it cannot be used
pub fn validate_imgbb_cover(url: &str) -> Result<String, SharedError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SharedError::validation("coverImage", "Paste an imgbb image URL first"));
    }
    if !is_imgbb_url(url) {
        return Err(SharedError::validation(
            "coverImage",
            "Only imgbb image links are allowed (i.ibb.co)",
        ));
    }
    Ok(url.to_string())
}

/// YouTube video id from `youtu.be/<id>`, `watch?v=<id>` or `/embed/<id>` links
pub fn youtube_id(url: &str) -> Option<String> {
    let parsed = parse_web_url(url)?;
    let host = parsed.host_str()?;
    let mut segments = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();

    if host.contains("youtu.be") {
        return (!segments.is_empty()).then(|| segments.remove(0).to_string());
    }

    if let Some((_, id)) = parsed.query_pairs().find(|(key, value)| key == "v" && !value.is_empty()) {
        return Some(id.into_owned());
    }

    segments
        .iter()
        .position(|s| *s == "embed")
        .and_then(|idx| segments.get(idx + 1))
        .map(|id| id.to_string())
}

pub fn validate_book_form(form: &BookForm) -> Result<(), SharedError> {
    let required = [
        ("title", &form.title, "Title is required"),
        ("author", &form.author, "Author is required"),
        ("genre", &form.genre, "Genre is required"),
        ("description", &form.description, "Description is required"),
        ("coverImage", &form.cover_image, "Cover image is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            return Err(SharedError::validation(field, message));
        }
    }
    Ok(())
}

pub fn validate_tutorial_form(form: &TutorialForm) -> Result<(), SharedError> {
    if form.title.trim().is_empty() {
        return Err(SharedError::validation("title", "Title required"));
    }
    if form.youtube_url.trim().is_empty() {
        return Err(SharedError::validation("youtubeUrl", "YouTube link required"));
    }
    if youtube_id(&form.youtube_url).is_none() {
        return Err(SharedError::validation("youtubeUrl", "Invalid YouTube URL"));
    }
    Ok(())
}

pub fn validate_genre_name(name: &str) -> Result<(), SharedError> {
    if name.trim().is_empty() {
        return Err(SharedError::validation("name", "Genre name required"));
    }
    Ok(())
}

pub fn validate_review(rating: u8, comment: &str) -> Result<(), SharedError> {
    if !(1..=5).contains(&rating) {
        return Err(SharedError::validation("rating", "Rating must be between 1 and 5"));
    }
    if comment.trim().is_empty() {
        return Err(SharedError::validation("comment", "Comment is required"));
    }
    Ok(())
}

pub fn validate_progress(value: u8) -> Result<u8, SharedError> {
    if value > MAX_PROGRESS {
        return Err(SharedError::validation(
            "progress",
            "Progress must be between 0 and 100",
        ));
    }
    Ok(value)
}
