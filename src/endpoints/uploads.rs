//! Uploads. Every endpoint here requires login.

use serde_json::Value;

use crate::{
    error::Error,
    request::{Endpoint, FilePayload, FileSource, RawParams, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
    Client,
};

const LIST: Endpoint = Endpoint::new("uploads.json", Verb::Get).authed();
const SHOW: Endpoint = Endpoint::new("uploads/{id}.json", Verb::Get).authed();
const CREATE: Endpoint = Endpoint::new("uploads.json", Verb::Post).authed();

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "upload[file]";

/// Filters for [`Client::upload_list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSearch {
    /// Id of the uploading user.
    pub uploader_id: Option<u64>,
    /// Name of the uploading user.
    pub uploader_name: Option<String>,
    /// Exact source match.
    pub source: Option<String>,
}

/// A new upload. At least one of `file` and `source` must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
    /// Space delimited tag list.
    pub tag_string: String,
    /// Rating name as the site spells it.
    pub rating: String,
    /// The file to upload.
    pub file: Option<FileSource>,
    /// Source URL. The site downloads the file from here if `file` is unset.
    pub source: Option<String>,
    /// Parent post id.
    pub parent_id: Option<u64>,
}

impl NewUpload {
    /// An upload with tags and rating and nothing else.
    pub fn new<S: Into<String>, R: Into<String>>(tag_string: S, rating: R) -> Self {
        Self {
            tag_string: tag_string.into(),
            rating: rating.into(),
            file: None,
            source: None,
            parent_id: None,
        }
    }
}

/// Resolves an upload search.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn list(search: &UploadSearch) -> Result<ResolvedRequest> {
    LIST.request()
        .params(
            RawParams::new()
                .with("search[uploader_id]", search.uploader_id)
                .with("search[uploader_name]", search.uploader_name.as_deref())
                .with("search[source]", search.source.as_deref()),
        )
        .build()
}

/// Resolves a single upload lookup.
///
/// # Errors
///
/// Only fails if the request cannot be built.
pub fn show(id: u64) -> Result<ResolvedRequest> {
    SHOW.request().identifier(id).build()
}

/// Resolves an upload. The file, if any, travels as its own multipart field.
///
/// # Errors
///
/// Returns [`Error::MissingUploadSource`] if neither a file nor a source is set.
pub fn create(upload: NewUpload) -> Result<ResolvedRequest> {
    if upload.file.is_none() && upload.source.is_none() {
        return Err(Error::MissingUploadSource);
    }

    let mut builder = CREATE.request().params(
        RawParams::new()
            .with("upload[source]", upload.source)
            .with("upload[rating]", upload.rating)
            .with("upload[parent_id]", upload.parent_id)
            .with("upload[tag_string]", upload.tag_string),
    );
    if let Some(source) = upload.file {
        let payload = match source {
            FileSource::Path(path) => FilePayload::from_path(FILE_FIELD, path),
            FileSource::Bytes { file_name, data } => FilePayload::from_bytes(FILE_FIELD, file_name, data),
        };
        builder = builder.file(payload);
    }
    builder.build()
}

impl<T: Transport> Client<T> {
    /// Lists uploads.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn upload_list(&self, search: &UploadSearch) -> Result<Value> {
        self.send(list(search)?).await
    }

    /// Fetches a single upload.
    ///
    /// # Errors
    ///
    /// Returns any transport error.
    pub async fn upload_show(&self, id: u64) -> Result<Value> {
        self.send(show(id)?).await
    }

    /// Creates an upload.
    ///
    /// A file given by path is opened only while the request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingUploadSource`] before anything is sent if
    /// neither a file nor a source is set, or any transport error.
    pub async fn upload_create(&self, upload: NewUpload) -> Result<Value> {
        self.send(create(upload)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn needs_file_or_source() {
        let err = create(NewUpload::new("1girl", "g")).unwrap_err();
        assert!(matches!(err, Error::MissingUploadSource));
    }

    #[test]
    fn source_only_upload() {
        let upload = NewUpload {
            source: Some("https://example.com/a.png".into()),
            ..NewUpload::new("1girl", "g")
        };
        let request = create(upload).unwrap();

        assert!(request.file().is_none());
        let keys: Vec<_> = request.params().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["upload[source]", "upload[rating]", "upload[tag_string]"]
        );
    }

    #[test]
    fn file_is_attached_separately() {
        let upload = NewUpload {
            file: Some(FileSource::Path("/tmp/a.png".into())),
            parent_id: Some(4),
            ..NewUpload::new("1girl", "s")
        };
        let request = create(upload).unwrap();

        let file = request.file().unwrap();
        assert_eq!(file.field(), FILE_FIELD);
        assert_eq!(file.source(), &FileSource::Path("/tmp/a.png".into()));
        assert!(request.param(FILE_FIELD).is_none());
        assert!(request.param("upload[source]").is_none());
        assert_eq!(request.param("upload[parent_id]"), Some(&ParamValue::UInt(4)));
    }

    #[test]
    fn listing_requires_auth() {
        let request = list(&UploadSearch::default()).unwrap();
        assert!(request.requires_auth());
        assert!(request.params().is_empty());
        assert_eq!(show(8).unwrap().path(), "uploads/8.json");
    }
}
