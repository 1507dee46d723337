#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]
//! # danbooru
//!
//! danbooru is a wrapper library around the Danbooru imageboard API.
//!
//! This library covers:
//! - [`posts`], post flags and post appeals
//! - [`uploads`]
//! - [`comments`]
//! - [`favorites`]
//! - [`dmails`]
//! - [`artists`]
//! - [`notes`]
//!
//! Every endpoint method resolves a request with
//! [`RequestBuilder`](request::RequestBuilder), which drops any optional
//! parameter the caller did not supply, and hands it to the client's
//! [`Transport`](transport::Transport).
//!
//! ## Example: Listing the newest posts with a tag.
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use danbooru::{config::Config, posts::PostSearch, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(&Config::default())?;
//!
//!     let search = PostSearch {
//!         tags: Some("cat_ears".into()),
//!         limit: Some(5),
//!         ..PostSearch::default()
//!     };
//!     let posts = client.post_list(&search).await?;
//!     println!("{posts:#}");
//!     Ok(())
//! }
//! ```

/// Client module contains [`Client`], the entry point for every endpoint.
pub mod client;

/// Site presets and client configuration.
pub mod config;

/// Contains [`Error`]s that can be thrown by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

/// The production HTTP transport.
pub mod http;

pub mod request;

/// The seam between request assembly and network I/O.
pub mod transport;

pub mod endpoints;

pub(crate) mod result;

pub use client::Client;
pub use endpoints::*;
pub use error::Error;
pub use result::Result;
