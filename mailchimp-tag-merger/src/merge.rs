use crate::models::{CleanedMember, MailchimpMember, MemberTagsUpdate, TagSpec};

/// Tags retired by the merge.
pub const OLD_TAGS: [&str; 3] = [
    "event: Chamomile and Whiskey, Will Overman at Toast",
    "event: Will Overman Band Farewell Block Party & EP Release",
    "event: Will Overman Block Party",
];

/// Tags given to every member that carried at least one of [`OLD_TAGS`].
pub const NEW_TAGS: [&str; 3] = ["willoverman", "americana", "folk"];

/// The set of obsolete tags and the set of tags replacing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMerge {
    old_tags: Vec<String>,
    new_tags: Vec<String>,
}

impl Default for TagMerge {
    fn default() -> Self {
        Self::new(OLD_TAGS, NEW_TAGS)
    }
}

impl TagMerge {
    pub fn new<O, N>(old_tags: O, new_tags: N) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            old_tags: old_tags.into_iter().map(Into::into).collect(),
            new_tags: new_tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn old_tags(&self) -> &[String] {
        &self.old_tags
    }

    pub fn new_tags(&self) -> &[String] {
        &self.new_tags
    }

    /// Returns the obsolete tags the member carries, in the order of
    /// [`TagMerge::old_tags`].
    pub fn removed_tags(&self, member: &CleanedMember) -> Vec<String> {
        self.old_tags
            .iter()
            .filter(|tag| member.tags.contains(*tag))
            .cloned()
            .collect()
    }

    /// Decides what a merge would do to `member` without touching Mailchimp.
    pub fn preview(&self, member: &CleanedMember) -> MergeOutcome {
        let removed = self.removed_tags(member);
        if removed.is_empty() {
            return MergeOutcome::Unchanged;
        }

        MergeOutcome::Replaced {
            removed,
            added: self.new_tags.clone(),
        }
    }

    /// Builds the update body: every old tag inactive, then every new tag
    /// active.
    ///
    /// The whole old tag list is always sent, not only the tags the member
    /// actually carries. Mailchimp ignores deactivation of a tag the member
    /// doesn't have.
    pub fn update_payload(&self) -> MemberTagsUpdate {
        let tags = self
            .old_tags
            .iter()
            .map(TagSpec::inactive)
            .chain(self.new_tags.iter().map(TagSpec::active))
            .collect();

        MemberTagsUpdate { tags }
    }
}

/// What happened to a single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The member had none of the old tags, nothing was sent.
    Unchanged,
    Replaced {
        removed: Vec<String>,
        added: Vec<String>,
    },
}

/// Keeps only the members that have at least one tag, reduced to their id and
/// tag names.
pub fn clean(members: &[MailchimpMember]) -> Vec<CleanedMember> {
    members
        .iter()
        .filter(|member| !member.tags.is_empty())
        .map(|member| CleanedMember {
            id: member.id.clone(),
            tags: member.tags.iter().map(|tag| tag.name.clone()).collect(),
        })
        .collect()
}
