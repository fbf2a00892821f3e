//! Request and response types exchanged with Postmark.

mod attachment;
mod bounces;
mod headers;
mod mail;
mod message;
mod response;
mod server;
mod stats;
mod templates;
mod triggers;
mod webhooks;

pub use attachment::{Attachment, DEFAULT_CONTENT_TYPE};
pub use bounces::{
    Bounce, BounceActivation, BounceCount, BounceDump, BounceQuery, BounceType, BouncesPage,
    DeliveryStats,
};
pub use headers::{HeaderCollection, MessageHeader};
pub use mail::{
    AlternateView, LEGACY_TAG_HEADER, MailAddress, MailAttachment, MailMessage, TAG_HEADER,
};
pub use message::{
    MessageContent, PostmarkMessage, RECIPIENT_SEPARATOR, TemplateRef, TrackLinks, html_encode,
    looks_like_html,
};
pub use response::{PostmarkResponse, PostmarkStatus};
pub use server::{EditServerRequest, Server};
pub use stats::{OutboundStats, StatsQuery};
pub use templates::{Template, TemplateInfo, TemplateListing, TemplateRequest, TemplateSummary, TemplateType};
pub(crate) use triggers::CreateInboundRule;
pub use triggers::{InboundRule, InboundRuleListing};
pub use webhooks::{
    ContentTrigger, EnabledTrigger, HttpAuth, OpenTrigger, Webhook, WebhookListing,
    WebhookTriggers,
};
