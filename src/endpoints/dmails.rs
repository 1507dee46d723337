//! Direct messages. Only messages owned by the logged in user are visible,
//! so every endpoint here requires login.

use serde_json::Value;

use crate::{
    request::{Endpoint, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("dmails.json", Verb::Get).authed();
const SHOW: Endpoint = Endpoint::new("dmails/{id}.json", Verb::Get).authed();
const CREATE: Endpoint = Endpoint::new("dmails.json", Verb::Post).authed();
const DELETE: Endpoint = Endpoint::new("dmails/{id}.json", Verb::Delete).authed();

/// Filters for [`Client::dmail_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DmailSearch {
    /// Message body contains the given terms.
    pub message_matches: Option<String>,
    /// Recipient name.
    pub to_name: Option<String>,
    /// Recipient id.
    pub to_id: Option<u64>,
    /// Sender name.
    pub from_name: Option<String>,
    /// Sender id.
    pub from_id: Option<u64>,
    /// Read or unread messages only.
    pub read: Option<bool>,
}

/// Resolves a message search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(search: &DmailSearch) -> Result<ResolvedRequest> {
    LIST.request()
        .params(
            RawParams::new()
                .with("search[message_matches]", search.message_matches.as_deref())
                .with("search[to_name]", search.to_name.as_deref())
                .with("search[to_id]", search.to_id)
                .with("search[from_name]", search.from_name.as_deref())
                .with("search[from_id]", search.from_id)
                .with("search[read]", search.read),
        )
        .build()
}

/// Resolves a single message lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves a message to `to_name`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn create(to_name: &str, title: &str, body: &str) -> Result<ResolvedRequest> {
    CREATE
        .request()
        .params(
            RawParams::new()
                .with("dmail[to_name]", to_name)
                .with("dmail[title]", title)
                .with("dmail[body]", body),
        )
        .build()
}

/// Resolves a message deletion.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn delete(id: u64) -> Result<ResolvedRequest> {
    DELETE.request().identifier(id).build()
}

impl<T: Transport> Client<T> {
    /// Lists the logged in user's messages.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn dmail_list(&self, search: &DmailSearch) -> Result<Value> {
        self.send(list(search)?).await
    }

    /// Fetches a single message.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn dmail_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Sends a message.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn dmail_create(&self, to_name: &str, title: &str, body: &str) -> Result<Value> {
        self.send(create(to_name, title, body)?).await
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn dmail_delete(&self, id: u64) -> Result<Value> {
        self.send(delete(id)?).await
    }
}
