use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MailchimpMemberTag {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// A list member as returned by `GET /3.0/lists/{list_id}/members`.
///
/// Only the fields the merger looks at are modelled; everything else in the
/// payload is ignored.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct MailchimpMember {
    pub id: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tags_count: u64,
    #[serde(default)]
    pub tags: Vec<MailchimpMemberTag>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct MailchimpListResponse {
    pub members: Vec<MailchimpMember>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MailchimpError {
    #[serde(default)]
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: Option<String>,
    pub instance: Option<String>,
}

impl Display for MailchimpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            format!(
                "{} ({}): {}",
                self.title,
                self.status,
                self.detail.clone().unwrap_or_default()
            )
            .as_str(),
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Active,
    Inactive,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagSpec {
    pub name: String,
    pub status: TagStatus,
}

impl TagSpec {
    pub fn active<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Active,
        }
    }

    pub fn inactive<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            status: TagStatus::Inactive,
        }
    }
}

/// Body of `POST /3.0/lists/{list_id}/members/{member_id}/tags`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberTagsUpdate {
    pub tags: Vec<TagSpec>,
}

/// A tagged member reduced to what the merger needs: its id and the names of
/// its tags, in the order Mailchimp reported them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedMember {
    pub id: String,
    pub tags: Vec<String>,
}
