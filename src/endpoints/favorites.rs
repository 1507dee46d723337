//! Favorites. Every endpoint here requires login.

use serde_json::Value;

use crate::{
    request::{Endpoint, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("favorites.json", Verb::Get).authed();
const ADD: Endpoint = Endpoint::new("favorites.json", Verb::Post).authed();
const REMOVE: Endpoint = Endpoint::new("favorites/{id}.json", Verb::Delete).authed();

/// Lists `user_id`'s favorites, or the logged in user's when `None`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(user_id: Option<u64>) -> Result<ResolvedRequest> {
    LIST.request().param("user_id", user_id).build()
}

/// Resolves favoriting `post_id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn add(post_id: u64) -> Result<ResolvedRequest> {
    ADD.request().param("post_id", post_id).build()
}

/// Resolves removing `post_id` from the favorites.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn remove(post_id: u64) -> Result<ResolvedRequest> {
    REMOVE.request().identifier(post_id).build()
}

impl<T: Transport> Client<T> {
    /// Lists favorited posts.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn favorite_list(&self, user_id: Option<u64>) -> Result<Value> {
        self.send(list(user_id)?).await
    }

    /// Favorites a post.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn favorite_add(&self, post_id: u64) -> Result<Value> {
        self.send(add(post_id)?).await
    }

    /// Removes a post from the favorites.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn favorite_remove(&self, post_id: u64) -> Result<Value> {
        self.send(remove(post_id)?).await
    }
}
