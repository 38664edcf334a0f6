use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;

/// Maximum length of a group title.
pub const GROUP_TITLE_MAX_LEN: usize = 200;

/// Identifier of a group (SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A thematic community that collects posts from every author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Human-readable name, at most 200 characters.
    pub title: String,
    /// Unique URL segment (`/group/{slug}`).
    pub slug: String,
    /// Description and house rules of the group.
    pub description: String,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Request to create a group. Only `title` is required; the slug is derived
/// from it when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// Generate a URL-safe slug from a display name.
///
/// Rules:
/// - NFKD-decompose and drop whatever is not ASCII (`é` becomes `e`,
///   Cyrillic letters disappear)
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// The result may be empty; callers must then ask for an explicit slug.
///
/// # Examples
///
/// ```
/// use scribe_types::group::slugify;
///
/// assert_eq!(slugify("Leo Tolstoy Fans"), "leo-tolstoy-fans");
/// assert_eq!(slugify("  Cats & Dogs!"), "cats-dogs");
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// assert_eq!(slugify("Тестовая группа"), "");
/// ```
pub fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_hyphen = true;
    for c in name.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// A slug may only contain lowercase ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
