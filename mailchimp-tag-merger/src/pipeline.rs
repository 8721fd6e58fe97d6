use crate::{
    client::Client,
    merge::{clean, MergeOutcome, TagMerge},
};

/// Upper bound on members considered by a run.
pub const DEFAULT_MAX_MEMBERS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub max_members: usize,
    /// Log the replacements without sending them.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_members: DEFAULT_MAX_MEMBERS,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub tagged: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Fetches the list, then replaces the obsolete tags member by member.
///
/// Errors never abort the run: a failing page truncates the fetch and a
/// failing update is logged before moving on to the next member.
pub async fn run(client: &Client, merge: &TagMerge, options: &RunOptions) -> RunSummary {
    let members = client.fetch_all(options.max_members).await;
    let cleaned = clean(&members);

    let mut summary = RunSummary {
        fetched: members.len(),
        tagged: cleaned.len(),
        ..Default::default()
    };

    for member in &cleaned {
        let result = if options.dry_run {
            Ok(merge.preview(member))
        } else {
            client.merge_member_tags(member, merge).await
        };

        match result {
            Ok(MergeOutcome::Unchanged) => {
                summary.unchanged += 1;
            }
            Ok(MergeOutcome::Replaced { removed, added }) => {
                tracing::info!(
                    member_id = %member.id,
                    dry_run = options.dry_run,
                    "member ID: {}, removed tags: {:?}, added tags: {:?}",
                    member.id,
                    removed,
                    added
                );
                summary.replaced += 1;
            }
            Err(err) => {
                tracing::error!(member_id = %member.id, "Error: {err}");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        fetched = summary.fetched,
        tagged = summary.tagged,
        replaced = summary.replaced,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "tag merge finished"
    );

    summary
}
