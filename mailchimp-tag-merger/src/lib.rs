//! A client for replacing obsolete tags on the members of a Mailchimp list.
//!
//! ## Example
//!
//! ```no_run
//! use mailchimp_tag_merger::{pipeline, Client, RunOptions, TagMerge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_server_prefix("us11", "list-id", "api-abcd1234")?;
//!     let summary = pipeline::run(&client, &TagMerge::default(), &RunOptions::default()).await;
//!
//!     println!("Replaced tags on {} members", summary.replaced);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod merge;
pub mod models;
pub mod pipeline;

pub use client::{Client, PageSize};
pub use merge::{clean, MergeOutcome, TagMerge, NEW_TAGS, OLD_TAGS};
pub use models::CleanedMember;
pub use pipeline::{RunOptions, RunSummary};
