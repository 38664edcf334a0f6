use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::group::GroupId;
use crate::user::UserId;

/// Number of characters of the text used as a post's short display form.
pub const POST_PREVIEW_LEN: usize = 15;

/// Identifier of a post (SQLite rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The author of a post, as joined onto the post row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: UserId,
    pub username: String,
}

/// The group of a post, as joined onto the post row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
    pub title: String,
    pub slug: String,
}

/// A published post with its author and group already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    /// Set once on creation; edits never move it.
    pub pub_date: DateTime<Utc>,
    pub author: AuthorRef,
    pub group: Option<GroupRef>,
}

impl Post {
    /// First [`POST_PREVIEW_LEN`] characters of the text.
    pub fn preview(&self) -> String {
        self.text.chars().take(POST_PREVIEW_LEN).collect()
    }

    pub fn is_authored_by(&self, user: &UserId) -> bool {
        &self.author.id == user
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}

/// User-submitted post fields for create and edit.
///
/// Anything else in the request body (author, pub_date, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<GroupId>,
}

/// A validated post ready to be written, before the author is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPost {
    pub text: String,
    pub group: Option<GroupId>,
}

/// Label and help text for a post field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
}

pub const TEXT_FIELD: FieldMeta = FieldMeta {
    name: "text",
    label: "Text",
    help_text: "Share your thoughts here",
};

pub const PUB_DATE_FIELD: FieldMeta = FieldMeta {
    name: "pub_date",
    label: "Publication date",
    help_text: "When the thought was shared",
};

pub const AUTHOR_FIELD: FieldMeta = FieldMeta {
    name: "author",
    label: "Author",
    help_text: "Who came up with this?",
};

pub const GROUP_FIELD: FieldMeta = FieldMeta {
    name: "group",
    label: "Group",
    help_text: "Which group should this be published in?",
};

/// Metadata for every post field, in declaration order.
pub const POST_FIELDS: [FieldMeta; 4] = [TEXT_FIELD, PUB_DATE_FIELD, AUTHOR_FIELD, GROUP_FIELD];

/// Look up a post field's metadata by name.
pub fn post_field(name: &str) -> Option<&'static FieldMeta> {
    POST_FIELDS.iter().find(|f| f.name == name)
}
