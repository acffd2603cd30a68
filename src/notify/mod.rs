//! Notification delivery.
//!
//! This module covers everything between a loop event and a delivered
//! alert:
//! - Alert bodies and subjects
//! - Carrier gateway lookup for SMS-over-email
//! - The SMTP submission path

pub mod carrier;
pub mod message;
pub mod smtp;

pub use carrier::{Carrier, format_sms_number};
pub use message::Alert;
pub use smtp::SmtpNotifier;

use async_trait::async_trait;

use crate::error::Result;

/// How alerts reach the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Plain email with a subject line
    Email,
    /// Text message through a carrier gateway; the subject stays empty
    /// so it does not eat into the SMS body
    Sms,
}

/// A resolved delivery target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub address: String,
    pub mode: DeliveryMode,
}

/// Delivery seam for alerts. The retry loop only talks to this trait,
/// which keeps it testable without a mail server.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert.
    async fn alert(&self, alert: &Alert) -> Result<()>;
}
