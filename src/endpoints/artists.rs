//! Artists.

use serde_json::Value;

use crate::{
    request::{Endpoint, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("artists.json", Verb::Get);
const SHOW: Endpoint = Endpoint::new("artists/{id}.json", Verb::Get);
const CREATE: Endpoint = Endpoint::new("artists.json", Verb::Post).authed();
const UPDATE: Endpoint = Endpoint::new("artists/{id}.json", Verb::Put).authed();
const DELETE: Endpoint = Endpoint::new("artists/{id}.json", Verb::Delete).authed();
const BANNED: Endpoint = Endpoint::new("artists/banned.json", Verb::Get);
const REVERT: Endpoint = Endpoint::new("artists/{id}/revert.json", Verb::Put).authed();

/// Sort order of an artist listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistOrder {
    /// Alphabetical.
    Name,
    /// Most recently updated first.
    UpdatedAt,
}

impl ArtistOrder {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtistOrder::Name => "name",
            ArtistOrder::UpdatedAt => "updated_at",
        }
    }
}

/// Filters for [`Client::artist_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistSearch {
    /// Sent as `search[name]`. The site interprets prefixes: a URL finds
    /// artists by URL, `name:`, `other:` and `group:` narrow the field, and
    /// `status:banned` finds banned artists.
    pub query: Option<String>,
    /// Artist id.
    pub id: Option<u64>,
    /// Name of the user who created the entry.
    pub creator_name: Option<String>,
    /// Id of the user who created the entry.
    pub creator_id: Option<u64>,
    /// Deleted artists are inactive.
    pub is_active: Option<bool>,
    /// Banned artists only, or none of them.
    pub is_banned: Option<bool>,
    /// Only artists with no posts.
    pub empty_only: Option<bool>,
    /// Sort order.
    pub order: Option<ArtistOrder>,
}

/// Optional artist fields, shared by creation and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFields {
    /// Comma delimited alternative names.
    pub other_names_comma: Option<String>,
    /// Circle or group the artist belongs to.
    pub group_name: Option<String>,
    /// Whitespace or newline delimited URLs.
    pub url_string: Option<String>,
}

impl ArtistFields {
    fn params(&self, name: Option<&str>) -> RawParams {
        RawParams::new()
            .with("artist[name]", name)
            .with("artist[other_names_comma]", self.other_names_comma.as_deref())
            .with("artist[group_name]", self.group_name.as_deref())
            .with("artist[url_string]", self.url_string.as_deref())
    }
}

/// Resolves an artist search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(search: &ArtistSearch) -> Result<ResolvedRequest> {
    LIST.request()
        .params(
            RawParams::new()
                .with("search[name]", search.query.as_deref())
                .with("search[id]", search.id)
                .with("search[creator_name]", search.creator_name.as_deref())
                .with("search[creator_id]", search.creator_id)
                .with("search[is_active]", search.is_active)
                .with("search[is_banned]", search.is_banned)
                .with("search[empty_only]", search.empty_only)
                .with("search[order]", search.order.map(ArtistOrder::as_str)),
        )
        .build()
}

/// Resolves a single artist lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves a new artist called `name`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn create(name: &str, fields: &ArtistFields) -> Result<ResolvedRequest> {
    CREATE.request().params(fields.params(Some(name))).build()
}

/// Resolves an artist update. `name` renames the artist when set.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn update(id: u64, name: Option<&str>, fields: &ArtistFields) -> Result<ResolvedRequest> {
    UPDATE
        .request()
        .identifier(id)
        .params(fields.params(name))
        .build()
}

/// Resolves an artist deletion.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn delete(id: u64) -> Result<ResolvedRequest> {
    DELETE.request().identifier(id).build()
}

/// Resolves the banned artist listing.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn banned() -> Result<ResolvedRequest> {
    BANNED.request().build()
}

/// Resolves a revert of artist `id` to `version_id`.
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

impl<T: Transport> Client<T> {
    /// Lists artists.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_list(&self, search: &ArtistSearch) -> Result<Value> {
        self.send(list(search)?).await
    }

    /// Fetches a single artist.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Creates an artist. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_create(&self, name: &str, fields: &ArtistFields) -> Result<Value> {
        self.send(create(name, fields)?).await
    }

    /// Updates an artist. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_update(
        &self,
        id: u64,
        name: Option<&str>,
        fields: &ArtistFields,
    ) -> Result<Value> {
        self.send(update(id, name, fields)?).await
    }

    /// Deletes an artist. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_delete(&self, id: u64) -> Result<Value> {
        self.send(delete(id)?).await
    }

    /// Shortcut for listing banned artists.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_banned(&self) -> Result<Value> {
        self.send(banned()?).await
    }

    /// Reverts an artist to a previous version. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn artist_revert(&self, id: u64, version_id: u64) -> Result<Value> {
        self.send(revert(id, version_id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn query_maps_to_search_name() {
        let request = list(&ArtistSearch {
            query: Some("status:banned".into()),
            order: Some(ArtistOrder::UpdatedAt),
            ..ArtistSearch::default()
        })
        .unwrap();
        assert!(!request.requires_auth());
        assert_eq!(
            request.param("search[name]"),
            Some(&ParamValue::Str("status:banned".into()))
        );
        assert_eq!(
            request.param("search[order]"),
            Some(&ParamValue::Str("updated_at".into()))
        );
        assert_eq!(request.params().len(), 2);
    }

    #[test]
    fn create_always_sends_name() {
        let request = create("kantoku", &ArtistFields::default()).unwrap();
        assert_eq!(request.verb(), Verb::Post);
        assert!(request.requires_auth());
        let keys: Vec<_> = request.params().keys().map(String::as_str).collect();
        assert_eq!(keys, ["artist[name]"]);
    }

    #[test]
    fn update_sends_only_supplied_fields() {
        let fields = ArtistFields {
            group_name: Some("5yen".into()),
            ..ArtistFields::default()
        };
        let request = update(77, None, &fields).unwrap();
        assert_eq!(request.path(), "artists/77.json");
        assert_eq!(request.verb(), Verb::Put);
        let keys: Vec<_> = request.params().keys().map(String::as_str).collect();
        assert_eq!(keys, ["artist[group_name]"]);
    }

    #[test]
    fn banned_revert_delete() {
        assert_eq!(banned().unwrap().path(), "artists/banned.json");

        let request = revert(77, 2).unwrap();
        assert_eq!(request.path(), "artists/77/revert.json");
        assert_eq!(request.param("version_id"), Some(&ParamValue::UInt(2)));

        let request = delete(77).unwrap();
        assert_eq!(request.verb(), Verb::Delete);
        assert!(request.requires_auth());
    }
}
