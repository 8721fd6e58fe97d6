use crate::{
    error::{Error, FetchMemberError, UpdateTagsError},
    merge::{MergeOutcome, TagMerge},
    models::{
        CleanedMember, MailchimpError, MailchimpListResponse, MailchimpMember, MemberTagsUpdate,
    },
};
use async_gen::gen;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{IntoUrl, Response, Url};
use std::{pin::pin, time::Duration};

/// Number of members requested per page. Mailchimp caps `count` at 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub const MAX: usize = 1000;

    /// Clamps `size` to the range Mailchimp accepts.
    pub fn new(size: usize) -> Self {
        Self(size.clamp(1, Self::MAX))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    members_url: Url,
    api_key: String,
    http: reqwest::Client,
    page_size: PageSize,
}

/// A Mailchimp client that can page through a list and rewrite member tags.
impl Client {
    /// Initializes a new client with the default page size.
    ///
    /// ## Errors
    ///
    /// Fails if `base_url` is not a valid URL or the HTTP client can't be built.
    /// A path on `base_url` is kept as a prefix of the API paths.
    pub fn new<U: IntoUrl, S: Into<String>>(
        base_url: U,
        list_id: S,
        api_key: S,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(Error::Http)?;

        let mut base_url = base_url.into_url().map_err(Error::BaseUrl)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let list_id: String = list_id.into();
        let members_url = base_url.join(&format!("3.0/lists/{list_id}/members"))?;

        Ok(Self {
            members_url,
            api_key: api_key.into(),
            http,
            page_size: Default::default(),
        })
    }

    /// Initializes a client for the data center named by `server_prefix`
    /// (e.g. `us11`).
    ///
    /// An empty prefix isn't rejected here: the client then talks to
    /// `https://api.mailchimp.com` and every call fails on Mailchimp's side.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use mailchimp_tag_merger::Client;
    ///
    /// let client = Client::from_server_prefix("us11", "list-id", "api-abcd1234").unwrap();
    /// ```
    pub fn from_server_prefix<S: Into<String>>(
        server_prefix: &str,
        list_id: S,
        api_key: S,
    ) -> Result<Self, Error> {
        let server_prefix = server_prefix.trim();
        let base_url = if server_prefix.is_empty() {
            "https://api.mailchimp.com".to_string()
        } else {
            format!("https://{server_prefix}.api.mailchimp.com")
        };
        Self::new(base_url, list_id, api_key)
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    async fn mailchimp_error(resp: Response) -> Result<MailchimpError, reqwest::Error> {
        resp.json::<MailchimpError>().await
    }

    /// Fetches a single page of members starting at `offset`.
    pub async fn list_members(
        &self,
        count: usize,
        offset: usize,
    ) -> Result<Vec<MailchimpMember>, FetchMemberError> {
        let resp = self
            .http
            .get(self.members_url.clone())
            .query(&[("count", count), ("offset", offset)])
            .basic_auth("anystring", Some(&self.api_key))
            .send()
            .await
            .map_err(|e| FetchMemberError::Request(offset, e))?;

        if !resp.status().is_success() {
            let body = Self::mailchimp_error(resp)
                .await
                .map_err(|e| FetchMemberError::Request(offset, e))?;
            return Err(FetchMemberError::Mailchimp(offset, body));
        }

        let body: MailchimpListResponse = resp
            .json()
            .await
            .map_err(|e| FetchMemberError::Request(offset, e))?;

        Ok(body.members)
    }

    /// Streams the members of the list, one page at a time, stopping once
    /// `max_members` have been requested, a short page comes back, or a
    /// request fails. A failure is yielded once and ends the stream.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use futures_util::StreamExt;
    /// use mailchimp_tag_merger::Client;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("https://us11.api.mailchimp.com", "list-id", "api-abcd1234").unwrap();
    ///     let stream = client.fetch_members(10_000);
    ///
    ///     stream.for_each(|member| async move {
    ///         match member {
    ///             Ok(member) => println!("Member: {:?}", member),
    ///             Err(err) => eprintln!("Error: {err}"),
    ///         }
    ///     })
    ///     .await;
    /// }
    /// ```
    pub fn fetch_members(
        &self,
        max_members: usize,
    ) -> impl Stream<Item = Result<MailchimpMember, FetchMemberError>> + '_ {
        let page_size = self.page_size.get();
        let mut offset = 0;

        let g = gen! {
            while offset < max_members {
                let members = match self.list_members(page_size, offset).await {
                    Ok(members) => members,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };

                let last_page = members.len() < page_size;
                for member in members.into_iter() {
                    yield Ok(member);
                }

                if last_page {
                    break;
                }

                offset += page_size;
            }

            ()
        };

        g.into_async_iter()
    }

    /// Eagerly collects every member of the list.
    ///
    /// Members are all fetched before any tag is touched because Mailchimp
    /// doesn't offer a stable pagination: rewriting members while paging
    /// could shift the offsets. A failing page is logged and ends the fetch,
    /// keeping whatever was collected before it.
    pub async fn fetch_all(&self, max_members: usize) -> Vec<MailchimpMember> {
        let mut members = vec![];
        let mut stream = pin!(self.fetch_members(max_members));
        while let Some(res) = stream.next().await {
            match res {
                Ok(member) => members.push(member),
                Err(err) => tracing::error!(error = %err, "member fetch stopped early"),
            }
        }

        tracing::info!(total = members.len(), "TOTAL ITEMS: {}", members.len());

        members
    }

    /// Sends a tag update for a single member.
    pub async fn update_member_tags(
        &self,
        member_id: &str,
        update: &MemberTagsUpdate,
    ) -> Result<(), UpdateTagsError> {
        let resp = self
            .http
            .post(format!("{}/{}/tags", self.members_url, member_id))
            .basic_auth("anystring", Some(&self.api_key))
            .json(update)
            .send()
            .await
            .map_err(|e| UpdateTagsError::Request(member_id.to_string(), e))?;

        if !resp.status().is_success() {
            let body = Self::mailchimp_error(resp)
                .await
                .map_err(|e| UpdateTagsError::Request(member_id.to_string(), e))?;
            return Err(UpdateTagsError::Mailchimp(member_id.to_string(), body));
        }

        Ok(())
    }

    /// Replaces the obsolete tags of `member`.
    ///
    /// Nothing is sent when the member carries none of the old tags.
    /// Otherwise a single request deactivates every old tag and activates
    /// every new one.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// use mailchimp_tag_merger::{CleanedMember, Client, TagMerge};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = Client::new("https://us11.api.mailchimp.com", "list-id", "api-abcd1234").unwrap();
    ///     let member = CleanedMember {
    ///         id: "a1".to_string(),
    ///         tags: vec!["event: Will Overman Block Party".to_string()],
    ///     };
    ///     match client.merge_member_tags(&member, &TagMerge::default()).await {
    ///         Ok(outcome) => println!("{outcome:?}"),
    ///         Err(err) => eprintln!("Error: {err}"),
    ///     }
    /// }
    /// ```
    pub async fn merge_member_tags(
        &self,
        member: &CleanedMember,
        merge: &TagMerge,
    ) -> Result<MergeOutcome, UpdateTagsError> {
        let outcome = merge.preview(member);
        if outcome == MergeOutcome::Unchanged {
            return Ok(outcome);
        }

        self.update_member_tags(&member.id, &merge.update_payload())
            .await?;

        Ok(outcome)
    }
}
