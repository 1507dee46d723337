//! Posts, post flags and post appeals.
//!
//! # Example: tagging a post
//!
//! ```no_run
//! # async fn run() -> danbooru::Result<()> {
//! use danbooru::{config::Config, posts::PostUpdate, Client};
//!
//! let client = Client::new(&Config::default().with_credentials("alice", "api-key"))?;
//! let update = PostUpdate {
//!     tag_string: Some("1girl solo".into()),
//!     ..PostUpdate::default()
//! };
//! client.post_update(1234, &update).await?;
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::{
    request::{Endpoint, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("posts.json", Verb::Get);
const SHOW: Endpoint = Endpoint::new("posts/{id}.json", Verb::Get);
const UPDATE: Endpoint = Endpoint::new("posts/{id}.json", Verb::Put).authed();
const REVERT: Endpoint = Endpoint::new("posts/{id}/revert.json", Verb::Put).authed();
const COPY_NOTES: Endpoint = Endpoint::new("posts/{id}/copy_notes.json", Verb::Put).authed();
const VOTE: Endpoint = Endpoint::new("posts/{id}/votes.json", Verb::Post).authed();
const FLAG_LIST: Endpoint = Endpoint::new("post_flags.json", Verb::Get).authed();
const FLAG_CREATE: Endpoint = Endpoint::new("post_flags.json", Verb::Post).authed();
const APPEAL_LIST: Endpoint = Endpoint::new("post_appeals.json", Verb::Get).authed();
const APPEAL_CREATE: Endpoint = Endpoint::new("post_appeals.json", Verb::Post).authed();

/// Filters for [`Client::post_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSearch {
    /// Posts per page. The server caps this at 100.
    pub limit: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Any tag query that works on the site, meta-tags included.
    pub tags: Option<String>,
    /// Treat `tags` as one literal tag instead of parsing it.
    pub raw: Option<bool>,
}

/// Fields changed by [`Client::post_update`]. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    /// Space delimited tag list.
    pub tag_string: Option<String>,
    /// Rating name as the site spells it.
    pub rating: Option<String>,
    /// Source URL.
    pub source: Option<String>,
    /// Parent post id.
    pub parent_id: Option<u64>,
}

/// Direction of a post vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteScore {
    /// Upvote.
    Up,
    /// Downvote.
    Down,
}

impl VoteScore {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            VoteScore::Up => "up",
            VoteScore::Down => "down",
        }
    }
}

/// Filters for [`Client::post_flag_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSearch {
    /// Id of the user who flagged.
    pub creator_id: Option<u64>,
    /// Name of the user who flagged.
    pub creator_name: Option<String>,
    /// The flagged post.
    pub post_id: Option<u64>,
    /// Reason contains the given terms.
    pub reason_matches: Option<String>,
    /// Whether the flag has been resolved by a moderator.
    pub is_resolved: Option<bool>,
    /// `normal`, `unapproved` or `banned`.
    pub category: Option<String>,
}

/// Filters for [`Client::post_appeals_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppealSearch {
    /// Id of the user who appealed.
    pub creator_id: Option<u64>,
    /// Name of the user who appealed.
    pub creator_name: Option<String>,
    /// The appealed post.
    pub post_id: Option<u64>,
}

/// Resolves a post search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(search: &PostSearch) -> Result<ResolvedRequest> {
    LIST.request()
        .params(
            RawParams::new()
                .with("limit", search.limit)
                .with("page", search.page)
                .with("tags", search.tags.as_deref())
                .with("raw", search.raw),
        )
        .build()
}

/// Resolves a single post lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves a post update containing only the fields set in `update`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn update(id: u64, update: &PostUpdate) -> Result<ResolvedRequest> {
    UPDATE
        .request()
        .identifier(id)
        .params(
            RawParams::new()
                .with("post[tag_string]", update.tag_string.as_deref())
                .with("post[rating]", update.rating.as_deref())
                .with("post[source]", update.source.as_deref())
                .with("post[parent_id]", update.parent_id),
        )
        .build()
}

/// Resolves a revert of post `id` to `version_id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn revert(id: u64, version_id: u64) -> Result<ResolvedRequest> {
    REVERT
        .request()
        .identifier(id)
        .param("version_id", version_id)
        .build()
}

/// Resolves copying the notes of post `id` onto `other_post_id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn copy_notes(id: u64, other_post_id: u64) -> Result<ResolvedRequest> {
    COPY_NOTES
        .request()
        .identifier(id)
        .param("other_post_id", other_post_id)
        .build()
}

/// Resolves a vote on post `id`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn vote(id: u64, score: VoteScore) -> Result<ResolvedRequest> {
    VOTE.request()
        .identifier(id)
        .param("score", score.as_str())
        .build()
}

/// Resolves a post flag search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn flag_list(search: &FlagSearch) -> Result<ResolvedRequest> {
    FLAG_LIST
        .request()
        .params(
            RawParams::new()
                .with("search[creator_id]", search.creator_id)
                .with("search[creator_name]", search.creator_name.as_deref())
                .with("search[post_id]", search.post_id)
                .with("search[reason_matches]", search.reason_matches.as_deref())
                .with("search[is_resolved]", search.is_resolved)
                .with("search[category]", search.category.as_deref()),
        )
        .build()
}

/// Resolves flagging `post_id` for `reason`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn flag_create(post_id: u64, reason: &str) -> Result<ResolvedRequest> {
    FLAG_CREATE
        .request()
        .param("post_flag[post_id]", post_id)
        .param("post_flag[reason]", reason)
        .build()
}

/// Resolves a post appeal search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn appeal_list(search: &AppealSearch) -> Result<ResolvedRequest> {
    APPEAL_LIST
        .request()
        .params(
            RawParams::new()
                .with("search[creator_id]", search.creator_id)
                .with("search[creator_name]", search.creator_name.as_deref())
                .with("search[post_id]", search.post_id),
        )
        .build()
}

/// Resolves an appeal of `post_id` for `reason`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn appeal_create(post_id: u64, reason: &str) -> Result<ResolvedRequest> {
    APPEAL_CREATE
        .request()
        .param("post_appeal[post_id]", post_id)
        .param("post_appeal[reason]", reason)
        .build()
}

impl<T: Transport> Client<T> {
    /// Lists posts matching `search`.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_list(&self, search: &PostSearch) -> Result<Value> {
        self.send(list(search)?).await
    }

    /// Fetches a single post.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Updates a post. Requires login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationRequired`](crate::error::Error::AuthenticationRequired)
    /// without credentials, or any transport error.
    pub async fn post_update(&self, id: u64, fields: &PostUpdate) -> Result<Value> {
        self.send(update(id, fields)?).await
    }

    /// Reverts a post to a previous version. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_revert(&self, id: u64, version_id: u64) -> Result<Value> {
        self.send(revert(id, version_id)?).await
    }

    /// Copies the notes of post `id` onto `other_post_id`. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_copy_notes(&self, id: u64, other_post_id: u64) -> Result<Value> {
        self.send(copy_notes(id, other_post_id)?).await
    }

    /// Votes on a post. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_vote(&self, id: u64, score: VoteScore) -> Result<Value> {
        self.send(vote(id, score)?).await
    }

    /// Lists post flags. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_flag_list(&self, search: &FlagSearch) -> Result<Value> {
        self.send(flag_list(search)?).await
    }

    /// Flags a post. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_flag_create(&self, post_id: u64, reason: &str) -> Result<Value> {
        self.send(flag_create(post_id, reason)?).await
    }

    /// Lists post appeals. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_appeals_list(&self, search: &AppealSearch) -> Result<Value> {
        self.send(appeal_list(search)?).await
    }

    /// Appeals a post. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn post_appeals_create(&self, post_id: u64, reason: &str) -> Result<Value> {
        self.send(appeal_create(post_id, reason)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    fn keys(request: &ResolvedRequest) -> Vec<&str> {
        request.params().keys().map(String::as_str).collect()
    }

    #[test]
    fn empty_search_has_no_params() {
        let request = list(&PostSearch::default()).unwrap();
        assert_eq!(request.path(), "posts.json");
        assert_eq!(request.verb(), Verb::Get);
        assert!(!request.requires_auth());
        assert!(request.params().is_empty());
    }

    #[test]
    fn update_sends_only_supplied_fields() {
        let fields = PostUpdate {
            tag_string: Some("1girl solo".into()),
            parent_id: Some(99),
            ..PostUpdate::default()
        };
        let request = update(1234, &fields).unwrap();

        assert_eq!(request.path(), "posts/1234.json");
        assert_eq!(request.verb(), Verb::Put);
        assert!(request.requires_auth());
        assert_eq!(keys(&request), ["post[tag_string]", "post[parent_id]"]);
        assert_eq!(request.param("post[parent_id]"), Some(&ParamValue::UInt(99)));
    }

    #[test]
    fn update_uses_namespaced_source_key() {
        let fields = PostUpdate {
            source: Some("https://example.com/a.png".into()),
            ..PostUpdate::default()
        };
        let request = update(1, &fields).unwrap();
        assert_eq!(keys(&request), ["post[source]"]);
    }

    #[test]
    fn vote_sends_score() {
        let request = vote(5, VoteScore::Down).unwrap();
        assert_eq!(request.path(), "posts/5/votes.json");
        assert_eq!(request.verb(), Verb::Post);
        assert_eq!(request.param("score"), Some(&ParamValue::Str("down".into())));
    }

    #[test]
    fn revert_and_copy_notes() {
        let request = revert(5, 3).unwrap();
        assert_eq!(request.path(), "posts/5/revert.json");
        assert_eq!(request.param("version_id"), Some(&ParamValue::UInt(3)));

        let request = copy_notes(5, 6).unwrap();
        assert_eq!(request.path(), "posts/5/copy_notes.json");
        assert_eq!(request.param("other_post_id"), Some(&ParamValue::UInt(6)));
    }

    #[test]
    fn flag_and_appeal_searches_are_namespaced() {
        let request = flag_list(&FlagSearch {
            is_resolved: Some(false),
            category: Some("normal".into()),
            ..FlagSearch::default()
        })
        .unwrap();
        assert!(request.requires_auth());
        assert_eq!(keys(&request), ["search[is_resolved]", "search[category]"]);

        let request = appeal_list(&AppealSearch {
            post_id: Some(10),
            ..AppealSearch::default()
        })
        .unwrap();
        assert_eq!(request.path(), "post_appeals.json");
        assert_eq!(keys(&request), ["search[post_id]"]);
    }

    #[test]
    fn flag_and_appeal_create() {
        let request = flag_create(10, "bad tags").unwrap();
        assert_eq!(keys(&request), ["post_flag[post_id]", "post_flag[reason]"]);
        assert_eq!(request.verb(), Verb::Post);

        let request = appeal_create(10, "it's fine").unwrap();
        assert_eq!(keys(&request), ["post_appeal[post_id]", "post_appeal[reason]"]);
    }
}
