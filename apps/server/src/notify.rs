//! # Notification Dispatch
//!
//! Builds the message that tells a customer about their bill.
//!
//! The shipped dispatcher does not send anything itself: it returns a
//! WhatsApp click-to-chat link that the counter opens.

use async_trait::async_trait;
use capital_core::receipt::compose_share_message;
use capital_core::{Bill, StoreHeader};
use thiserror::Error;
use tracing::debug;
use url::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Contact '{0}' has no digits")]
    InvalidContact(String),

    #[error("Cannot build share link: {0}")]
    Url(#[from] url::ParseError),
}

/// Delivers (or prepares) a bill notification.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Returns a reference to the dispatched message, e.g. a link to open.
    async fn dispatch(
        &self,
        bill: &Bill,
        contact: Option<&str>,
        document_url: Option<&str>,
    ) -> Result<String, NotifyError>;
}

#[derive(Debug, Clone)]
pub struct WhatsAppLinkDispatcher {
    header: StoreHeader,
}

impl WhatsAppLinkDispatcher {
    pub fn new(header: StoreHeader) -> Self {
        WhatsAppLinkDispatcher { header }
    }
}

#[async_trait]
impl NotificationDispatcher for WhatsAppLinkDispatcher {
    /// `https://wa.me/<digits>?text=...`, or the generic `https://wa.me/?text=...`
    /// when there is no phone number.
    async fn dispatch(
        &self,
        bill: &Bill,
        contact: Option<&str>,
        document_url: Option<&str>,
    ) -> Result<String, NotifyError> {
        let base = match contact.map(str::trim).filter(|c| !c.is_empty()) {
            Some(phone) => {
                let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    return Err(NotifyError::InvalidContact(phone.to_string()));
                }
                format!("{}{}", WHATSAPP_BASE, digits)
            }
            None => WHATSAPP_BASE.to_string(),
        };

        let message = compose_share_message(bill, &self.header, document_url);
        let link = Url::parse_with_params(&base, &[("text", message.as_str())])?;

        debug!(bill_number = %bill.bill_number, "Share link composed");
        Ok(link.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_bill;

    #[tokio::test]
    async fn test_link_uses_phone_digits() {
        let dispatcher = WhatsAppLinkDispatcher::new(StoreHeader::default());
        let link = dispatcher
            .dispatch(&sample_bill(), Some("+91 98765-43210"), None)
            .await
            .unwrap();

        assert!(link.starts_with("https://wa.me/919876543210?text="));
        let url = Url::parse(&link).unwrap();
        let (_, text) = url.query_pairs().next().unwrap();
        assert!(text.contains("*Bill No:* INV-000001"));
        assert!(text.contains("Walk-in Customer"));
        assert!(!text.contains("Download"));
    }

    #[tokio::test]
    async fn test_generic_link_with_document() {
        let dispatcher = WhatsAppLinkDispatcher::new(StoreHeader::default());
        let link = dispatcher
            .dispatch(&sample_bill(), None, Some("file:///bills/INV-000001.txt"))
            .await
            .unwrap();

        assert!(link.starts_with("https://wa.me/?text="));
        let url = Url::parse(&link).unwrap();
        let (_, text) = url.query_pairs().next().unwrap();
        assert!(text.contains("file:///bills/INV-000001.txt"));
    }

    #[tokio::test]
    async fn test_contact_without_digits_rejected() {
        let dispatcher = WhatsAppLinkDispatcher::new(StoreHeader::default());
        let err = dispatcher
            .dispatch(&sample_bill(), Some("call me"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::InvalidContact(_)));
    }
}
