mod logging;

use clap::Parser;
use mailchimp_tag_merger::{
    pipeline::{self, DEFAULT_MAX_MEMBERS},
    Client, PageSize, RunOptions, TagMerge,
};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "mailchimp-tag-merger")]
#[command(about = "A CLI tool to replace obsolete tags on the members of a mailchimp list")]
struct Cli {
    // Left unvalidated: bad or missing credentials show up as failed API calls.
    #[arg(short, long, env = "MAILCHIMP_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,
    #[arg(short, long, env = "MAILCHIMP_LIST_ID", default_value = "")]
    list_id: String,
    #[arg(short, long, env = "SERVER_PREFIX", default_value = "")]
    server_prefix: String,
    #[arg(
        short,
        long,
        env = "MAILCHIMP_BASE_URL",
        help = "Overrides the URL derived from the server prefix"
    )]
    base_url: Option<String>,
    #[arg(long, default_value_t = DEFAULT_MAX_MEMBERS)]
    max_members: usize,
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u16).range(1..=1000))]
    page_size: u16,
    #[arg(
        long = "old-tag",
        help = "Tag to retire (repeatable, replaces the built-in list)"
    )]
    old_tags: Vec<String>,
    #[arg(
        long = "new-tag",
        help = "Tag to add (repeatable, replaces the built-in list)"
    )]
    new_tags: Vec<String>,
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
    #[arg(long, help = "Log the changes without sending them to mailchimp")]
    dry_run: bool,
}

impl Cli {
    fn tag_merge(&self) -> TagMerge {
        let defaults = TagMerge::default();
        let old_tags = if self.old_tags.is_empty() {
            defaults.old_tags().to_vec()
        } else {
            self.old_tags.clone()
        };
        let new_tags = if self.new_tags.is_empty() {
            defaults.new_tags().to_vec()
        } else {
            self.new_tags.clone()
        };
        TagMerge::new(old_tags, new_tags)
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let _guard = logging::init(&args.log_dir)?;
    tracing::info!(list_id = %args.list_id, dry_run = args.dry_run, "starting tag merge");

    let client = match &args.base_url {
        Some(base_url) => Client::new(base_url.as_str(), &args.list_id, &args.api_key)?,
        None => Client::from_server_prefix(&args.server_prefix, &args.list_id, &args.api_key)?,
    }
    .with_page_size(PageSize::new(args.page_size.into()));

    let options = RunOptions {
        max_members: args.max_members,
        dry_run: args.dry_run,
    };
    let summary = pipeline::run(&client, &args.tag_merge(), &options).await;

    println!(
        "Fetched {} members, {} tagged, {} updated, {} unchanged, {} failed",
        summary.fetched, summary.tagged, summary.replaced, summary.unchanged, summary.failed
    );

    Ok(())
}
