//! Notes placed on post images.

use std::str::FromStr;

use serde_json::Value;

use crate::{
    error::Error,
    request::{Endpoint, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("notes.json", Verb::Get);
const SHOW: Endpoint = Endpoint::new("notes/{id}.json", Verb::Get);
const CREATE: Endpoint = Endpoint::new("notes.json", Verb::Post).authed();
const UPDATE: Endpoint = Endpoint::new("notes/{id}.json", Verb::Put).authed();

/// The `group_by` mode of the note listing. The site defaults to `post`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteGroupBy {
    /// Individual notes.
    Note,
    /// Posts with notes.
    Post,
}

impl NoteGroupBy {
    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            NoteGroupBy::Note => "note",
            NoteGroupBy::Post => "post",
        }
    }
}

impl FromStr for NoteGroupBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "note" => Ok(NoteGroupBy::Note),
            "post" => Ok(NoteGroupBy::Post),
            other => Err(Error::InvalidGroupingMode(other.to_string())),
        }
    }
}

/// Filters for [`Client::note_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSearch {
    /// Listing mode.
    pub group_by: Option<NoteGroupBy>,
    /// Body contains the given terms.
    pub body_matches: Option<String>,
    /// The annotated post.
    pub post_id: Option<u64>,
    /// The annotated post's tags match the given terms.
    pub post_tags_match: Option<String>,
    /// Exact creator name.
    pub creator_name: Option<String>,
    /// Id of the note's author.
    pub creator_id: Option<u64>,
}

/// A new note. Coordinates are pixels from the top-left corner of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    /// The post to annotate.
    pub post_id: u64,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Box width.
    pub width: u32,
    /// Box height.
    pub height: u32,
    /// Note text. Basic HTML is allowed.
    pub body: String,
}

/// Fields changed by [`Client::note_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    /// New left edge.
    pub x: Option<u32>,
    /// New top edge.
    pub y: Option<u32>,
    /// New width.
    pub width: Option<u32>,
    /// New height.
    pub height: Option<u32>,
    /// New text.
    pub body: Option<String>,
}

/// Resolves a note search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(search: &NoteSearch) -> Result<ResolvedRequest> {
    LIST.request()
        .params(
            RawParams::new()
                .with("group_by", search.group_by.map(NoteGroupBy::as_str))
                .with("search[body_matches]", search.body_matches.as_deref())
                .with("search[post_id]", search.post_id)
                .with("search[post_tags_match]", search.post_tags_match.as_deref())
                .with("search[creator_name]", search.creator_name.as_deref())
                .with("search[creator_id]", search.creator_id),
        )
        .build()
}

/// Resolves a single note lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves a new note.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn create(note: &NewNote) -> Result<ResolvedRequest> {
    CREATE
        .request()
        .params(
            RawParams::new()
                .with("note[post_id]", note.post_id)
                .with("note[x]", note.x)
                .with("note[y]", note.y)
                .with("note[width]", note.width)
                .with("note[height]", note.height)
                .with("note[body]", note.body.as_str()),
        )
        .build()
}

/// Resolves an update containing only the fields set in `update`.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn update(id: u64, update: &NoteUpdate) -> Result<ResolvedRequest> {
    UPDATE
        .request()
        .identifier(id)
        .params(
            RawParams::new()
                .with("note[x]", update.x)
                .with("note[y]", update.y)
                .with("note[width]", update.width)
                .with("note[height]", update.height)
                .with("note[body]", update.body.as_deref()),
        )
        .build()
}

impl<T: Transport> Client<T> {
    /// Lists notes.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn note_list(&self, search: &NoteSearch) -> Result<Value> {
        self.send(list(search)?).await
    }

    /// Fetches a single note.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn note_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Places a note on a post. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn note_create(&self, note: &NewNote) -> Result<Value> {
        self.send(create(note)?).await
    }

    /// Moves, resizes or edits a note. Requires login.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn note_update(&self, id: u64, fields: &NoteUpdate) -> Result<Value> {
        self.send(update(id, fields)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn group_by_is_optional() {
        let request = list(&NoteSearch::default()).unwrap();
        assert!(request.params().is_empty());

        let request = list(&NoteSearch {
            group_by: Some("note".parse().unwrap()),
            post_id: Some(1),
            ..NoteSearch::default()
        })
        .unwrap();
        assert_eq!(request.param("group_by"), Some(&ParamValue::Str("note".into())));
        assert_eq!(request.param("search[post_id]"), Some(&ParamValue::UInt(1)));
    }

    #[test]
    fn unknown_group_by_is_rejected() {
        let err = "comment".parse::<NoteGroupBy>().unwrap_err();
        assert!(matches!(err, Error::InvalidGroupingMode(ref m) if m == "comment"));
    }

    #[test]
    fn create_sends_every_field() {
        let note = NewNote {
            post_id: 1,
            x: 10,
            y: 20,
            width: 30,
            height: 40,
            body: "translation".into(),
        };
        let request = create(&note).unwrap();
        assert_eq!(request.verb(), Verb::Post);
        assert!(request.requires_auth());
        assert_eq!(request.params().len(), 6);
        assert_eq!(request.param("note[y]"), Some(&ParamValue::UInt(20)));
    }

    #[test]
    fn update_hits_json_path_with_supplied_fields() {
        let request = update(
            4,
            &NoteUpdate {
                body: Some("fixed".into()),
                ..NoteUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(request.path(), "notes/4.json");
        let keys: Vec<_> = request.params().keys().map(String::as_str).collect();
        assert_eq!(keys, ["note[body]"]);
    }
}
