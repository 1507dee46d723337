//! Request assembly.
//!
//! Every endpoint in this crate is a thin wrapper around [`RequestBuilder`]:
//! it names a path template, fills a [`RawParams`] mapping from its typed
//! arguments and lets [`RequestBuilder::build`] resolve the identifier slot
//! and prune the parameters the caller did not supply.
//!
//! # Example
//!
//! ```
//! use danbooru::request::{RawParams, RequestBuilder, Verb};
//!
//! let tags: Option<&str> = None;
//! let request = RequestBuilder::new("posts/{id}.json")
//!     .identifier(1234)
//!     .verb(Verb::Put)
//!     .auth(true)
//!     .params(RawParams::new().with("post[rating]", "s").with("post[tag_string]", tags))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.path(), "posts/1234.json");
//! assert_eq!(request.params().len(), 1);
//! ```

use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
    str::FromStr,
};

use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{error::Error, result::Result};

/// Placeholder for the positional identifier in a path template.
pub const SLOT: &str = "{id}";

/// Bytes escaped when an identifier is substituted into a path, so it stays
/// a single segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The HTTP verbs the remote API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Returns the upper-case wire name of the verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Returns `true` if parameters travel in the request body rather than
    /// the query string.
    pub fn sends_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(Error::InvalidVerb(s.to_string())),
        }
    }
}

impl AsRef<str> for Verb {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar parameter value. Values are never coerced; they are rendered
/// as-is when the transport encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free text, tag strings and enum names.
    Str(String),
    /// Signed integers.
    Int(i64),
    /// Unsigned integers, mostly record ids.
    UInt(u64),
    /// Rendered as `true`/`false`.
    Bool(bool),
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::UInt(u) => write!(f, "{u}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::UInt(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Conversion into a possibly absent parameter value.
///
/// `None` is the absent sentinel: the key is dropped by
/// [`RequestBuilder::build`]. Empty strings are *not* absent.
pub trait IntoParam {
    /// Converts `self`, returning `None` when the value was not supplied.
    fn into_param(self) -> Option<ParamValue>;
}

macro_rules! into_param {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoParam for $t {
                fn into_param(self) -> Option<ParamValue> {
                    Some(self.into())
                }
            }

            impl IntoParam for Option<$t> {
                fn into_param(self) -> Option<ParamValue> {
                    self.map(Into::into)
                }
            }
        )*
    };
}

into_param!(ParamValue, String, &str, &String, i32, i64, u32, u64, bool);

/// Caller-assembled parameters, some of which may be absent.
///
/// Insertion order is kept so the resolved request encodes keys in the
/// order the endpoint listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl RawParams {
    /// Returns an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`, keeping it even if `value` is absent.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: impl IntoParam) -> &mut Self {
        self.entries.push((key.into(), value.into_param()));
        self
    }

    /// Chaining form of [`RawParams::insert`].
    #[must_use]
    pub fn with<K: Into<String>>(mut self, key: K, value: impl IntoParam) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every absent entry.
    pub fn prune(self) -> Params {
        self.entries
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    }
}

/// The pruned mapping carried by a [`ResolvedRequest`].
pub type Params = IndexMap<String, ParamValue>;

/// Where the bytes of an uploaded file come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A file on disk, opened by the transport only while the request is sent.
    Path(PathBuf),
    /// In-memory contents.
    Bytes {
        /// File name reported in the multipart part.
        file_name: String,
        /// Raw file contents.
        data: Vec<u8>,
    },
}

/// A file attached as its own multipart field, never merged into the params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    field: String,
    source: FileSource,
}

impl FilePayload {
    /// A payload read from `path` when the request is dispatched.
    pub fn from_path<F: Into<String>, P: Into<PathBuf>>(field: F, path: P) -> Self {
        Self {
            field: field.into(),
            source: FileSource::Path(path.into()),
        }
    }

    /// A payload whose contents are already in memory.
    pub fn from_bytes<F: Into<String>, N: Into<String>>(field: F, file_name: N, data: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            source: FileSource::Bytes {
                file_name: file_name.into(),
                data,
            },
        }
    }

    /// The multipart field name, e.g. `upload[file]`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Where the contents come from.
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Splits the payload into its field name and source.
    pub fn into_parts(self) -> (String, FileSource) {
        (self.field, self.source)
    }
}

/// Static description of a remote resource: path template, verb and
/// whether stored credentials must be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    template: &'static str,
    verb: Verb,
    requires_auth: bool,
}

impl Endpoint {
    /// An endpoint that does not need credentials.
    pub const fn new(template: &'static str, verb: Verb) -> Self {
        Self {
            template,
            verb,
            requires_auth: false,
        }
    }

    /// Marks the endpoint as requiring login.
    #[must_use]
    pub const fn authed(self) -> Self {
        Self {
            requires_auth: true,
            ..self
        }
    }

    /// The path template.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// The verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Whether credentials are required.
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Starts a [`RequestBuilder`] preset from this descriptor.
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder::new(self.template)
            .verb(self.verb)
            .auth(self.requires_auth)
    }
}

/// Resolves a path template and raw parameters into a [`ResolvedRequest`].
///
/// The builder performs no I/O. The verb is kept as text until
/// [`build`](RequestBuilder::build) so that unsupported verbs are reported
/// as [`Error::InvalidVerb`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    template: String,
    identifier: Option<String>,
    params: RawParams,
    verb: String,
    requires_auth: bool,
    file: Option<FilePayload>,
}

impl RequestBuilder {
    /// Starts an unauthenticated `GET` for `template`.
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
            identifier: None,
            params: RawParams::new(),
            verb: Verb::Get.as_str().to_string(),
            requires_auth: false,
            file: None,
        }
    }

    /// Sets the value substituted into the template's `{id}` slot.
    ///
    /// The identifier is percent-encoded as a single path segment, so
    /// characters such as `/`, `?` and `#` cannot alter the URL structure.
    #[must_use]
    pub fn identifier<I: Display>(mut self, identifier: I) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    /// Replaces the raw parameter mapping.
    #[must_use]
    pub fn params(mut self, params: RawParams) -> Self {
        self.params = params;
        self
    }

    /// Appends a single raw parameter.
    #[must_use]
    pub fn param<K: Into<String>>(mut self, key: K, value: impl IntoParam) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Sets the verb, validated when the request is built.
    #[must_use]
    pub fn verb<V: AsRef<str>>(mut self, verb: V) -> Self {
        self.verb = verb.as_ref().to_string();
        self
    }

    /// Sets whether stored credentials must be attached.
    #[must_use]
    pub fn auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Attaches a file as a separate multipart field.
    #[must_use]
    pub fn file(mut self, file: FilePayload) -> Self {
        self.file = Some(file);
        self
    }

    /// Resolves the request.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPath`] if the template is empty.
    /// - [`Error::InvalidVerb`] if the verb is not `GET`, `POST`, `PUT` or `DELETE`.
    /// - [`Error::MissingIdentifier`] if the template has a slot and no
    ///   identifier was given.
    pub fn build(self) -> Result<ResolvedRequest> {
        if self.template.is_empty() {
            return Err(Error::EmptyPath);
        }
        let verb: Verb = self.verb.parse()?;

        let path = match (self.template.contains(SLOT), self.identifier) {
            (true, Some(id)) => {
                let segment = utf8_percent_encode(&id, SEGMENT).to_string();
                self.template.replacen(SLOT, &segment, 1)
            }
            (true, None) => return Err(Error::MissingIdentifier(self.template)),
            (false, Some(id)) => {
                log::warn!("identifier {id} ignored, `{}` has no slot", self.template);
                self.template
            }
            (false, None) => self.template,
        };

        let params = self.params.prune();
        log::debug!("resolved {verb} {path} with {} params", params.len());

        Ok(ResolvedRequest {
            path,
            params,
            verb,
            requires_auth: self.requires_auth,
            file: self.file,
        })
    }
}

/// A fully assembled request, ready to hand to a
/// [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub(crate) path: String,
    pub(crate) params: Params,
    pub(crate) verb: Verb,
    pub(crate) requires_auth: bool,
    pub(crate) file: Option<FilePayload>,
}

impl ResolvedRequest {
    /// The path relative to the site root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The pruned parameter mapping.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Looks up a single parameter.
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// The verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Whether credentials must be attached.
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// The attached file, if any.
    pub fn file(&self) -> Option<&FilePayload> {
        self.file.as_ref()
    }

    /// Takes the attached file out of the request.
    pub fn take_file(&mut self) -> Option<FilePayload> {
        self.file.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_pruned() {
        let none: Option<String> = None;
        let request = RequestBuilder::new("posts.json")
            .params(
                RawParams::new()
                    .with("tags", "cat_ears")
                    .with("limit", Some(20_u32))
                    .with("page", none)
                    .with("raw", Option::<bool>::None),
            )
            .build()
            .unwrap();

        assert_eq!(request.params().len(), 2);
        assert_eq!(request.param("tags"), Some(&ParamValue::Str("cat_ears".into())));
        assert_eq!(request.param("limit"), Some(&ParamValue::UInt(20)));
        assert!(request.param("page").is_none());
        assert!(request.param("raw").is_none());
    }

    #[test]
    fn raw_params_count_absent_entries() {
        let mut raw = RawParams::new();
        assert!(raw.is_empty());
        raw.insert("a", Option::<u32>::None).insert("b", 1_u32);
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.prune().len(), 1);
    }

    #[test]
    fn empty_strings_are_kept() {
        let request = RequestBuilder::new("posts.json")
            .param("tags", "")
            .build()
            .unwrap();
        assert_eq!(request.param("tags"), Some(&ParamValue::Str(String::new())));
    }

    #[test]
    fn kept_values_pass_through_unchanged() {
        let request = RequestBuilder::new("posts.json")
            .param("post[rating]", "not-a-rating")
            .param("search[is_active]", false)
            .param("search[id]", -3)
            .build()
            .unwrap();

        let keys: Vec<_> = request.params().keys().map(String::as_str).collect();
        assert_eq!(keys, ["post[rating]", "search[is_active]", "search[id]"]);
        assert_eq!(
            request.param("post[rating]"),
            Some(&ParamValue::Str("not-a-rating".into()))
        );
        assert_eq!(request.param("search[is_active]"), Some(&ParamValue::Bool(false)));
        assert_eq!(request.param("search[id]"), Some(&ParamValue::Int(-3)));
    }

    #[test]
    fn identifier_is_substituted() {
        let request = RequestBuilder::new("posts/{id}/revert.json")
            .identifier(42)
            .build()
            .unwrap();
        assert_eq!(request.path(), "posts/42/revert.json");

        let request = RequestBuilder::new("artists/{id}.json")
            .identifier("banned")
            .build()
            .unwrap();
        assert_eq!(request.path(), "artists/banned.json");
    }

    #[test]
    fn identifier_stays_one_path_segment() {
        let request = RequestBuilder::new("posts/{id}.json")
            .identifier("1.json?tags=x#")
            .build()
            .unwrap();
        assert_eq!(request.path(), "posts/1.json%3Ftags=x%23.json");

        let request = RequestBuilder::new("artists/{id}.json")
            .identifier("../users/1 a")
            .build()
            .unwrap();
        assert_eq!(request.path(), "artists/..%2Fusers%2F1%20a.json");
    }

    #[test]
    fn missing_identifier_fails() {
        let err = RequestBuilder::new("posts/{id}.json")
            .param("tags", "a")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier(ref t) if t == "posts/{id}.json"));
    }

    #[test]
    fn identifier_without_slot_is_ignored() {
        let request = RequestBuilder::new("artists/banned.json")
            .identifier(1)
            .build()
            .unwrap();
        assert_eq!(request.path(), "artists/banned.json");
    }

    #[test]
    fn empty_template_fails() {
        assert!(matches!(RequestBuilder::new("").build(), Err(Error::EmptyPath)));
    }

    #[test]
    fn verbs_are_validated() {
        for verb in ["GET", "post", "Put", "DELETE"] {
            assert!(RequestBuilder::new("a.json").verb(verb).build().is_ok());
        }
        for verb in ["PATCH", "HEAD", "", "GETS"] {
            let err = RequestBuilder::new("a.json").verb(verb).build().unwrap_err();
            assert!(matches!(err, Error::InvalidVerb(ref v) if v == verb));
        }
    }

    #[test]
    fn defaults_to_unauthenticated_get() {
        let request = RequestBuilder::new("posts.json").build().unwrap();
        assert_eq!(request.verb(), Verb::Get);
        assert!(!request.requires_auth());
        assert!(request.file().is_none());
    }

    #[test]
    fn endpoint_presets_verb_and_auth() {
        const DELETE: Endpoint = Endpoint::new("comments/{id}.json", Verb::Delete).authed();
        assert_eq!(DELETE.template(), "comments/{id}.json");
        assert_eq!(DELETE.verb(), Verb::Delete);
        assert!(DELETE.requires_auth());

        let request = DELETE.request().identifier(7).build().unwrap();
        assert_eq!(request.verb(), Verb::Delete);
        assert!(request.requires_auth());
        assert_eq!(request.path(), "comments/7.json");
    }

    #[test]
    fn file_stays_out_of_params() {
        let file = FilePayload::from_bytes("upload[file]", "a.png", vec![1, 2, 3]);
        let mut request = RequestBuilder::new("uploads.json")
            .verb(Verb::Post)
            .param("upload[rating]", "s")
            .file(file.clone())
            .build()
            .unwrap();

        assert!(request.param("upload[file]").is_none());
        assert_eq!(request.params().len(), 1);
        assert_eq!(file.clone().into_parts().0, "upload[file]");
        assert_eq!(request.take_file(), Some(file));
        assert!(request.file().is_none());
    }
}
