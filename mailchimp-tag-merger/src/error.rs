use crate::models::MailchimpError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid base URL: {0}")]
    BaseUrl(reqwest::Error),
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Unable to build the HTTP client: {0}")]
    Http(reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchMemberError {
    #[error("Request error while fetching members at offset {0}: {1}")]
    Request(usize, reqwest::Error),
    #[error("Mailchimp error while fetching members at offset {0}: {1}")]
    Mailchimp(usize, MailchimpError),
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateTagsError {
    #[error("Request error while updating tags of member {0}: {1}")]
    Request(String, reqwest::Error),
    #[error("Mailchimp error while updating tags of member {0}: {1}")]
    Mailchimp(String, MailchimpError),
}
