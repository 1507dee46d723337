//! Comments.
//!
//! The comment listing behaves differently depending on its `group_by`
//! mode, and each mode accepts a different set of search fields. That is
//! modelled by [`CommentListing`], so a listing can only carry the fields
//! its mode allows.

use std::str::FromStr;

use serde_json::Value;

use crate::{
    error::Error,
    request::{Endpoint, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("comments.json", Verb::Get);
const SHOW: Endpoint = Endpoint::new("comments/{id}.json", Verb::Get);
const CREATE: Endpoint = Endpoint::new("comments.json", Verb::Post).authed();
const UPDATE: Endpoint = Endpoint::new("comments/{id}.json", Verb::Put).authed();
const DELETE: Endpoint = Endpoint::new("comments/{id}.json", Verb::Delete).authed();

/// The `group_by` discriminator of the comment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// Recent comments.
    Comment,
    /// Posts that were recently commented on.
    Post,
}

impl GroupBy {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupBy::Comment => "comment",
            GroupBy::Post => "post",
        }
    }
}

impl FromStr for GroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "comment" => Ok(GroupBy::Comment),
            "post" => Ok(GroupBy::Post),
            other => Err(Error::InvalidGroupingMode(other.to_string())),
        }
    }
}

/// Search fields that only apply when grouping by comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSearch {
    /// Body contains the given terms.
    pub body_matches: Option<String>,
    /// The commented post.
    pub post_id: Option<u64>,
    /// The commented post's tags match the given terms.
    pub post_tags_match: Option<String>,
    /// Exact creator name.
    pub creator_name: Option<String>,
    /// Id of the comment's author.
    pub creator_id: Option<u64>,
}

/// A comment listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentListing {
    /// `group_by=comment` with its search fields.
    Comment(CommentSearch),
    /// `group_by=post`, optionally filtered by the post's tags.
    Post {
        /// The post's tags match the given terms.
        tags: Option<String>,
    },
}

impl CommentListing {
    /// Builds a listing from a textual mode. Fields that do not belong to
    /// the chosen mode are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupingMode`] unless `mode` is `comment` or `post`.
    pub fn from_mode(mode: &str, search: CommentSearch, tags: Option<String>) -> Result<Self> {
        Ok(match mode.parse::<GroupBy>()? {
            GroupBy::Comment => CommentListing::Comment(search),
            GroupBy::Post => CommentListing::Post { tags },
        })
    }

    /// The mode this listing groups by.
    pub fn group_by(&self) -> GroupBy {
        match self {
            CommentListing::Comment(_) => GroupBy::Comment,
            CommentListing::Post { .. } => GroupBy::Post,
        }
    }
}

/// Resolves a comment listing.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(listing: &CommentListing) -> Result<ResolvedRequest> {
    let params = RawParams::new().with("group_by", listing.group_by().as_str());
    let params = match listing {
        CommentListing::Comment(search) => params
            .with("search[body_matches]", search.body_matches.as_deref())
            .with("search[post_id]", search.post_id)
            .with("search[post_tags_match]", search.post_tags_match.as_deref())
            .with("search[creator_name]", search.creator_name.as_deref())
            .with("search[creator_id]", search.creator_id),
        CommentListing::Post { tags } => params.with("tags", tags.as_deref()),
    };
    LIST.request().params(params).build()
}

/// Resolves a single comment lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves a new comment on `post_id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn create(post_id: u64, body: &str, do_not_bump_post: Option<bool>) -> Result<ResolvedRequest> {
    CREATE
        .request()
        .params(
            RawParams::new()
                .with("comment[post_id]", post_id)
                .with("comment[body]", body)
                .with("comment[do_not_bump_post]", do_not_bump_post),
        )
        .build()
}

/// Resolves an edit of comment `id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn update(id: u64, body: &str, do_not_bump_post: Option<bool>) -> Result<ResolvedRequest> {
    UPDATE
        .request()
        .identifier(id)
        .params(
            RawParams::new()
                .with("comment[body]", body)
                .with("comment[do_not_bump_post]", do_not_bump_post),
        )
        .build()
}

/// Resolves a comment deletion.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn delete(id: u64) -> Result<ResolvedRequest> {
    DELETE.request().identifier(id).build()
}

impl<T: Transport> Client<T> {
    /// Lists comments, or recently commented posts.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn comment_list(&self, listing: &CommentListing) -> Result<Value> {
        self.send(list(listing)?).await
    }

    /// Fetches a single comment.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn comment_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Comments on a post. Requires login.
    ///
    /// Pass `do_not_bump_post = Some(true)` to keep the post from being
    /// bumped in the comment listing.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn comment_create(
        &self,
        post_id: u64,
        body: &str,
        do_not_bump_post: Option<bool>,
    ) -> Result<Value> {
        self.send(create(post_id, body, do_not_bump_post)?).await
    }

    /// Edits a comment. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn comment_update(
        &self,
        id: u64,
        body: &str,
        do_not_bump_post: Option<bool>,
    ) -> Result<Value> {
        self.send(update(id, body, do_not_bump_post)?).await
    }

    /// Deletes a comment. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn comment_delete(&self, id: u64) -> Result<Value> {
        self.send(delete(id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ParamValue, Params};

    fn str_map(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ParamValue::Str(v.to_string())))
            .collect()
    }

    #[test]
    fn comment_mode_keeps_only_supplied_search_fields() {
        let search = CommentSearch {
            body_matches: Some("cats".into()),
            ..CommentSearch::default()
        };
        let listing = CommentListing::from_mode("comment", search, None).unwrap();
        let request = list(&listing).unwrap();

        assert_eq!(request.path(), "comments.json");
        assert_eq!(
            request.params(),
            &str_map(&[("group_by", "comment"), ("search[body_matches]", "cats")])
        );
    }

    #[test]
    fn post_mode_drops_comment_fields() {
        let search = CommentSearch {
            body_matches: Some("cats".into()),
            creator_id: Some(1),
            ..CommentSearch::default()
        };
        let listing = CommentListing::from_mode("post", search, Some("touhou".into())).unwrap();
        let request = list(&listing).unwrap();

        assert_eq!(
            request.params(),
            &str_map(&[("group_by", "post"), ("tags", "touhou")])
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = CommentListing::from_mode("banana", CommentSearch::default(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupingMode(ref m) if m == "banana"));
        assert!("Comment".parse::<GroupBy>().is_err());
    }

    #[test]
    fn create_update_delete() {
        let request = create(3, "nice", None).unwrap();
        assert_eq!(request.verb(), Verb::Post);
        assert!(request.requires_auth());
        assert_eq!(request.params().len(), 2);

        let request = update(9, "edited", Some(true)).unwrap();
        assert_eq!(request.path(), "comments/9.json");
        assert_eq!(
            request.param("comment[do_not_bump_post]"),
            Some(&ParamValue::Bool(true))
        );
        assert!(request.param("comment[post_id]").is_none());

        let request = delete(9).unwrap();
        assert_eq!(request.verb(), Verb::Delete);
        assert!(request.params().is_empty());
    }
}
