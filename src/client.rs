//! Postmark async client implementation.

use crate::json;
use crate::models::{
    Bounce, BounceActivation, BounceDump, BounceQuery, BouncesPage, CreateInboundRule, DeliveryStats,
    EditServerRequest, InboundRule, InboundRuleListing, OutboundStats, PostmarkMessage,
    PostmarkResponse, Server, StatsQuery, Template, TemplateListing, TemplateRef, TemplateRequest,
    TemplateSummary, Webhook, WebhookListing,
};
use crate::validation::{EmailAddressSpecification, Specification};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";
const ACCOUNT_TOKEN_HEADER: &str = "X-Postmark-Account-Token";

/// Async client for the Postmark API.
///
/// Holds only immutable configuration; share it freely between tasks.
/// Use [`Client::new`] for defaults or [`Client::builder`] to override the
/// endpoint, timeout, proxy, or user agent.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    headers: HeaderMap,
    base_url: Url,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(server_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(server_token)
    }

    /// Create a client for `server_token` with default settings.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::Client;
    /// # fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(server_token: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(server_token).build()
    }

    /// Base URL every request is sent to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Send one message.
    ///
    /// Templated messages go to `/email/withTemplate`, everything else to
    /// `/email`. A rejected message yields [`Error::Api`] carrying the
    /// classified [`PostmarkResponse`].
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, PostmarkMessage};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// let message = PostmarkMessage::new("sender@example.com")
    ///     .to("receiver@example.com")
    ///     .subject("Hello")
    ///     .body("Hello from Rust");
    /// let response = client.send_message(&message).await?;
    /// println!("{:?}", response.message_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_message(&self, message: &PostmarkMessage) -> Result<PostmarkResponse> {
        self.check_sender(message);
        let path: &[&str] = if message.is_templated() {
            &["email", "withTemplate"]
        } else {
            &["email"]
        };

        let request = self.json_request(Method::POST, path, message)?;
        let (status, body) = self.execute_raw(request).await?;
        let response = json::from_str::<PostmarkResponse>(&body)?.classified(status);
        if !response.is_success() {
            return Err(api_error(response));
        }
        Ok(response)
    }

    /// Send several messages in one request.
    ///
    /// Returns one response per message, in input order. Per-message
    /// rejections are reported inside those responses; only a failure of the
    /// whole call is an error. Body and templated messages cannot be mixed.
    pub async fn send_messages(
        &self,
        messages: &[PostmarkMessage],
    ) -> Result<Vec<PostmarkResponse>> {
        if messages.is_empty() {
            return Ok(Vec::new());
        }
        let templated = messages.iter().filter(|m| m.is_templated()).count();
        if templated != 0 && templated != messages.len() {
            return Err(Error::MixedBatch);
        }
        for message in messages {
            self.check_sender(message);
        }

        let request = if templated == 0 {
            self.json_request(Method::POST, &["email", "batch"], messages)?
        } else {
            #[derive(Serialize)]
            struct TemplatedBatch<'a> {
                #[serde(rename = "Messages")]
                messages: &'a [PostmarkMessage],
            }
            self.json_request(
                Method::POST,
                &["email", "batchWithTemplates"],
                &TemplatedBatch { messages },
            )?
        };

        let (status, body) = self.execute_raw(request).await?;
        let responses: Vec<PostmarkResponse> = json::from_str(&body)?;
        if responses.len() != messages.len() {
            warn!(
                sent = messages.len(),
                received = responses.len(),
                "batch response count differs from request"
            );
        }
        Ok(responses
            .into_iter()
            .map(|response| response.classified(status))
            .collect())
    }

    /// Bounce counts per type plus the number of inactive addresses.
    pub async fn get_delivery_stats(&self) -> Result<DeliveryStats> {
        self.execute(self.request(Method::GET, &["deliverystats"]))
            .await
    }

    /// List bounces matching `query`.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{BounceQuery, BounceType, Client};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// let page = client
    ///     .get_bounces(&BounceQuery::new(50, 0).bounce_type(BounceType::HardBounce))
    ///     .await?;
    /// for bounce in page.bounces {
    ///     println!("{} {}", bounce.email, bounce.bounce_type);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_bounces(&self, query: &BounceQuery) -> Result<BouncesPage> {
        self.execute(self.request(Method::GET, &["bounces"]).query(query))
            .await
    }

    /// Look up one bounce by ID.
    pub async fn get_bounce(&self, bounce_id: i64) -> Result<Bounce> {
        let id = bounce_id.to_string();
        self.execute(self.request(Method::GET, &["bounces", &id]))
            .await
    }

    /// Raw SMTP source of a bounce, when Postmark still keeps it.
    pub async fn get_bounce_dump(&self, bounce_id: i64) -> Result<BounceDump> {
        let id = bounce_id.to_string();
        self.execute(self.request(Method::GET, &["bounces", &id, "dump"]))
            .await
    }

    /// Reactivate a bounced address so it can receive mail again.
    pub async fn activate_bounce(&self, bounce_id: i64) -> Result<BounceActivation> {
        let id = bounce_id.to_string();
        self.execute(self.request(Method::PUT, &["bounces", &id, "activate"]))
            .await
    }

    /// Sent, bounce, spam, open and click totals, optionally filtered.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, StatsQuery};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// let stats = client
    ///     .get_outbound_stats(&StatsQuery::new().tag("welcome"))
    ///     .await?;
    /// println!("{} sent, {} bounced", stats.sent, stats.bounced);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_outbound_stats(&self, query: &StatsQuery) -> Result<OutboundStats> {
        self.execute(self.request(Method::GET, &["stats", "outbound"]).query(query))
            .await
    }

    /// Settings of the server the token belongs to.
    pub async fn get_server(&self) -> Result<Server> {
        self.execute(self.request(Method::GET, &["server"])).await
    }

    /// Change server settings; only the fields set in `changes` are sent.
    pub async fn edit_server(&self, changes: &EditServerRequest) -> Result<Server> {
        self.execute(self.json_request(Method::PUT, &["server"], changes)?)
            .await
    }

    /// List templates, `count` at a time starting at `offset`.
    pub async fn get_templates(&self, count: u32, offset: u32) -> Result<TemplateListing> {
        let request = self
            .request(Method::GET, &["templates"])
            .query(&[("count", count), ("offset", offset)]);
        self.execute(request).await
    }

    /// Fetch one template with its content, by ID or alias.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, TemplateRef};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// let template = client
    ///     .get_template(&TemplateRef::Alias("welcome".into()))
    ///     .await?;
    /// println!("{} {:?}", template.name, template.subject);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_template(&self, template: &TemplateRef) -> Result<Template> {
        let segment = template_segment(template);
        self.execute(self.request(Method::GET, &["templates", &segment]))
            .await
    }

    pub async fn create_template(&self, template: &TemplateRequest) -> Result<TemplateSummary> {
        self.execute(self.json_request(Method::POST, &["templates"], template)?)
            .await
    }

    /// Update a template; fields left unset in `changes` keep their value.
    pub async fn edit_template(
        &self,
        template: &TemplateRef,
        changes: &TemplateRequest,
    ) -> Result<TemplateSummary> {
        let segment = template_segment(template);
        self.execute(self.json_request(Method::PUT, &["templates", &segment], changes)?)
            .await
    }

    pub async fn delete_template(&self, template: &TemplateRef) -> Result<PostmarkResponse> {
        let segment = template_segment(template);
        self.execute_response(self.request(Method::DELETE, &["templates", &segment]))
            .await
    }

    /// List inbound rules, `count` at a time starting at `offset`.
    pub async fn get_inbound_rules(&self, count: u32, offset: u32) -> Result<InboundRuleListing> {
        let request = self
            .request(Method::GET, &["triggers", "inboundrules"])
            .query(&[("count", count), ("offset", offset)]);
        self.execute(request).await
    }

    /// Block inbound mail from an address or a whole domain.
    pub async fn create_inbound_rule(&self, rule: &str) -> Result<InboundRule> {
        let body = CreateInboundRule { rule };
        self.execute(self.json_request(Method::POST, &["triggers", "inboundrules"], &body)?)
            .await
    }

    /// Remove an inbound rule.
    pub async fn delete_inbound_rule(&self, rule_id: i64) -> Result<PostmarkResponse> {
        let id = rule_id.to_string();
        self.execute_response(self.request(Method::DELETE, &["triggers", "inboundrules", &id]))
            .await
    }

    /// List webhooks, optionally limited to one message stream.
    pub async fn get_webhooks(&self, message_stream: Option<&str>) -> Result<WebhookListing> {
        let mut request = self.request(Method::GET, &["webhooks"]);
        if let Some(stream) = message_stream {
            request = request.query(&[("MessageStream", stream)]);
        }
        self.execute(request).await
    }

    pub async fn get_webhook(&self, webhook_id: i64) -> Result<Webhook> {
        let id = webhook_id.to_string();
        self.execute(self.request(Method::GET, &["webhooks", &id]))
            .await
    }

    /// Register a webhook and return it with its assigned ID.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, ContentTrigger, Webhook, WebhookTriggers};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("server-token")?;
    /// let webhook = Webhook::new("https://hooks.example.com/postmark")
    ///     .http_header("X-Secret", "s3cr3t")
    ///     .triggers(WebhookTriggers {
    ///         bounce: ContentTrigger { enabled: true, include_content: false },
    ///         ..Default::default()
    ///     });
    /// let created = client.create_webhook(&webhook).await?;
    /// println!("{:?}", created.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_webhook(&self, webhook: &Webhook) -> Result<Webhook> {
        self.execute(self.json_request(Method::POST, &["webhooks"], webhook)?)
            .await
    }

    /// Remove a webhook.
    pub async fn delete_webhook(&self, webhook_id: i64) -> Result<PostmarkResponse> {
        let id = webhook_id.to_string();
        self.execute_response(self.request(Method::DELETE, &["webhooks", &id]))
            .await
    }

    /// Base URL extended by `segments`, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request to the path built from `segments` with the auth headers attached.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "postmark request");
        self.http.request(method, url).headers(self.headers())
    }

    /// Start a request carrying `body` as ASCII-safe JSON.
    fn json_request<B>(&self, method: Method, segments: &[&str], body: &B) -> Result<RequestBuilder>
    where
        B: ?Sized + Serialize,
    {
        let payload = json::to_ascii_vec(body)?;
        Ok(self
            .request(method, segments)
            .header(CONTENT_TYPE, "application/json")
            .body(payload))
    }

    /// Send the request; non-2xx statuses become [`Error::Api`].
    async fn execute_raw(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "postmark response");

        if !status.is_success() {
            return Err(api_error(PostmarkResponse::from_error_body(status, &body)));
        }
        Ok((status, body))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (_, body) = self.execute_raw(request).await?;
        json::from_str(&body).map_err(Into::into)
    }

    /// Execute a call whose body is a generic [`PostmarkResponse`].
    async fn execute_response(&self, request: RequestBuilder) -> Result<PostmarkResponse> {
        let (status, body) = self.execute_raw(request).await?;
        let response = json::from_str::<PostmarkResponse>(&body)?.classified(status);
        if !response.is_success() {
            return Err(api_error(response));
        }
        Ok(response)
    }

    /// Warn about senders that are not shaped like an address.
    fn check_sender(&self, message: &PostmarkMessage) {
        if !EmailAddressSpecification.is_satisfied_by(message.from.as_str()) {
            warn!(from = %message.from, "sender is not a well-formed email address");
        }
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

fn api_error(response: PostmarkResponse) -> Error {
    warn!(
        status = ?response.status,
        code = response.error_code,
        message = %response.message,
        "postmark rejected the call"
    );
    Error::Api {
        response: Box::new(response),
    }
}

fn template_segment(template: &TemplateRef) -> String {
    match template {
        TemplateRef::Id(id) => id.to_string(),
        TemplateRef::Alias(alias) => alias.clone(),
    }
}

const BASE_URL: &str = "https://api.postmarkapp.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT_VALUE: &str = concat!("postmark-client-rs/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring a Postmark client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    server_token: String,
    account_token: Option<String>,
    base_url: String,
    timeout: Duration,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - `https://api.postmarkapp.com`
    /// - 30 second request timeout
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    pub fn new(server_token: impl Into<String>) -> Self {
        Self {
            server_token: server_token.into(),
            account_token: None,
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Also send an account-level token with every request.
    pub fn account_token(mut self, token: impl Into<String>) -> Self {
        self.account_token = Some(token.into());
        self
    }

    /// Override the API endpoint, e.g. to point at a mock server.
    ///
    /// The URL is validated by [`build`](Self::build).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Total time allowed per request. A timeout surfaces as [`Error::Request`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::time::Duration;
    /// # use postmark_client::Client;
    /// # fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::builder("server-token")
    ///     .timeout(Duration::from_secs(10))
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str());

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(self.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            SERVER_TOKEN_HEADER,
            token_header(&self.server_token, SERVER_TOKEN_HEADER)?,
        );
        if let Some(token) = &self.account_token {
            headers.insert(
                ACCOUNT_TOKEN_HEADER,
                token_header(token, ACCOUNT_TOKEN_HEADER)?,
            );
        }

        Ok(Client {
            http,
            headers,
            base_url,
            proxy: self.proxy,
        })
    }
}

fn token_header(token: &str, name: &'static str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token).map_err(|_| Error::InvalidHeader(name))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_urls_extend_the_base_path() {
        let client = Client::builder("token")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(client.url(&["email", "batch"]).as_str(), "http://localhost:8080/email/batch");
        assert_eq!(client.proxy(), None);

        let client = Client::builder("token")
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();
        assert_eq!(client.url(&["server"]).as_str(), "http://localhost:8080/api/server");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = Client::builder("token").base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));

        let err = Client::builder("token").base_url("mailto:x@example.com").build().unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = Client::new("bad\ntoken").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(SERVER_TOKEN_HEADER)));
    }

    #[test]
    fn headers_carry_tokens() {
        let client = Client::builder("server")
            .account_token("account")
            .build()
            .unwrap();
        let headers = client.headers();
        assert_eq!(headers[SERVER_TOKEN_HEADER], "server");
        assert_eq!(headers[ACCOUNT_TOKEN_HEADER], "account");
        assert!(headers[SERVER_TOKEN_HEADER].is_sensitive());
    }

    #[test]
    fn template_paths() {
        assert_eq!(template_segment(&TemplateRef::Id(42)), "42");
        assert_eq!(
            template_segment(&TemplateRef::Alias("welcome-v2".into())),
            "welcome-v2"
        );
    }

    #[test]
    fn template_alias_is_percent_encoded_in_the_path() {
        let client = Client::new("token").unwrap();
        let segment = template_segment(&TemplateRef::Alias("a/b?c#d".into()));
        assert_eq!(
            client.url(&["templates", &segment]).as_str(),
            "https://api.postmarkapp.com/templates/a%2Fb%3Fc%23d"
        );
    }
}
