use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client as ReqwestClient, Method, Response, StatusCode, Url,
};
use serde_json::Value;
use tokio::{sync::Semaphore, task::JoinHandle, time::interval};

use crate::{
    config::{Config, REDACTED},
    error::Error,
    request::{FilePayload, FileSource, ResolvedRequest, Verb},
    result::Result,
    transport::Transport,
};

/// [`Transport`] over HTTP(S) with `reqwest`.
///
/// Query parameters are used for `GET` and `DELETE`, form bodies for
/// `POST` and `PUT`, and a multipart body whenever a file is attached.
/// Authenticated requests carry HTTP basic credentials.
pub struct HttpTransport {
    http: ReqwestClient,
    base: Url,
    credentials: Option<(String, String)>,
    limiter: Option<RateLimit>,
}

#[derive(Debug)]
pub(crate) struct RateLimit {
    pub(crate) permit: Arc<Semaphore>,
    pub(crate) replenisher: JoinHandle<()>,
}

impl RateLimit {
    /// Must be called from within a tokio runtime.
    pub(crate) fn new(every: Duration) -> Self {
        let permit = Arc::new(Semaphore::new(1));
        let clone = permit.clone();

        let replenisher = tokio::spawn(async move {
            let mut interval = interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if clone.available_permits() == 0 {
                    clone.add_permits(1);
                }
            }
        });

        Self {
            permit,
            replenisher,
        }
    }

    pub(crate) async fn acquire(&self) {
        // the semaphore is never closed
        if let Ok(permit) = self.permit.acquire().await {
            permit.forget();
        }
    }
}

impl Drop for RateLimit {
    fn drop(&mut self) {
        self.replenisher.abort();
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("http", &self.http)
            .field("base", &self.base)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|(user, _)| (user, REDACTED)),
            )
            .field("limiter", &self.limiter)
            .finish()
    }
}

impl HttpTransport {
    /// Builds a transport from `config`.
    ///
    /// When rate limiting is enabled this spawns a background task, so it
    /// must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the site URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let base = config.site.base_url()?;
        let http = ReqwestClient::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        let credentials = config
            .credentials()
            .map(|(user, key)| (user.to_string(), key.to_string()));
        let limiter = config.rate_limit().map(RateLimit::new);

        Ok(Self {
            http,
            base,
            credentials,
            limiter,
        })
    }

    /// The base URL every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    async fn dispatch(&self, request: ResolvedRequest) -> Result<Value> {
        let ResolvedRequest {
            path,
            params,
            verb,
            requires_auth,
            file,
        } = request;

        let credentials = if requires_auth {
            let creds = self
                .credentials
                .as_ref()
                .ok_or(Error::AuthenticationRequired)?;
            Some(creds)
        } else {
            None
        };

        let url = self.url_for(&path)?;
        let fields: Vec<(String, String)> = params
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();

        let mut builder = self.http.request(method(verb), url.clone());
        if let Some((user, key)) = credentials {
            builder = builder.basic_auth(user, Some(key));
        }
        builder = match file {
            Some(file) => builder.multipart(multipart(fields, file).await?),
            None if verb.sends_body() => builder.form(&fields),
            None => builder.query(&fields),
        };

        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }
        log::info!("request for {verb} {url} dispatched");
        let response = builder.send().await?;
        decode(response).await
    }
}

fn method(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
    }
}

/// Reads the file (if it lives on disk) and packs it next to the text fields.
/// The file handle is closed as soon as the read returns.
async fn multipart(fields: Vec<(String, String)>, file: FilePayload) -> Result<Form> {
    let (field, source) = file.into_parts();
    let part = match source {
        FileSource::Path(path) => {
            let data = tokio::fs::read(&path).await?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Part::bytes(data).file_name(name)
        }
        FileSource::Bytes { file_name, data } => Part::bytes(data).file_name(file_name),
    };

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value));
    Ok(form.part(field, part))
}

async fn decode(response: Response) -> Result<Value> {
    let status = response.status();
    log::info!("response status: {status}");
    let body = response.text().await?;

    match status {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
            if body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                serde_json::from_str(&body).map_err(Into::into)
            }
        }
        status => Err(Error::UnexpectedStatus {
            status,
            message: error_message(&body),
        }),
    }
}

/// Pulls `message` or `reason` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "reason"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"That record was not found."}"#),
            "That record was not found."
        );
        assert_eq!(error_message(r#"{"reason":"access denied"}"#), "access denied");
        assert_eq!(error_message("  <html>oops</html>\n"), "<html>oops</html>");
    }

    #[test]
    fn verbs_map_to_methods() {
        assert_eq!(method(Verb::Get), Method::GET);
        assert_eq!(method(Verb::Delete), Method::DELETE);
    }

    #[tokio::test]
    async fn paths_join_under_base() {
        let config = Config::new(crate::config::Site::Custom("http://localhost:3000/booru".into()))
            .with_rate_limit(Duration::ZERO);
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:3000/booru/");
        assert_eq!(
            transport.url_for("/posts/1.json").unwrap().as_str(),
            "http://localhost:3000/booru/posts/1.json"
        );
        assert!(!transport.has_credentials());
    }

    #[test]
    fn debug_hides_api_key() {
        let config = Config::default()
            .with_credentials("alice", "SECRETKEY")
            .with_rate_limit(Duration::ZERO);
        let client = crate::Client::new(&config).unwrap();

        let printed = format!("{client:?}");
        assert!(!printed.contains("SECRETKEY"));
        assert!(printed.contains("alice"));
        assert!(printed.contains(REDACTED));
    }
}
