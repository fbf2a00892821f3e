//! # Postmark Client
//! Asynchronous client for the Postmark transactional email HTTP API: send single or batched messages (literal bodies or stored templates), read bounces and statistics, and administer the server, its templates, inbound rules, and webhooks through [`Client`] and [`ClientBuilder`].
//!
//! ## Messages
//! Build a [`PostmarkMessage`] with its chained setters, or convert a generic [`MailMessage`] with `PostmarkMessage::from`. Attachments are base64-encoded on the way in ([`PostmarkMessage::add_attachment_path`] and friends); custom headers travel as a [`HeaderCollection`].
//!
//! ## Wire format
//! Request bodies are written by [`json::AsciiFormatter`], so every payload is plain ASCII: non-ASCII characters and `/` are escaped. Timestamps are read leniently (see [`json::date`]).
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest` with a per-request timeout; no retries are attempted.
//!
//! ## Logging
//! Requests, responses, and rejections are reported through `tracing`; install a subscriber in your application to see them.
//!
//! ## Errors
//! Calls the service rejects surface as [`Error::Api`], carrying the full [`PostmarkResponse`] with its [`PostmarkStatus`] classification (`UserError` for 4xx, `ServerError` for 5xx). Transport failures and timeouts are [`Error::Request`]; malformed bodies are [`Error::Json`]; attachment reads fail with [`Error::Io`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use postmark_client::{Client, PostmarkMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), postmark_client::Error> {
//!     let client = Client::new("server-token")?;
//!
//!     let mut message = PostmarkMessage::new("Sender <sender@example.com>")
//!         .to("receiver@example.com")
//!         .subject("Monthly report")
//!         .html_body("<p>Report attached.</p>")
//!         .tag("reports");
//!     message.add_attachment_path("report.pdf", Some("application/pdf"), None)?;
//!
//!     let response = client.send_message(&message).await?;
//!     println!("Sent: {:?}", response.message_id);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod json;
mod models;
pub mod validation;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::*;

/// Result type alias for Postmark operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
