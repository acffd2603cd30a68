//! SMTP alert delivery.
//!
//! Submits alerts over STARTTLS with the sender's own account. The
//! password comes from the credential store; a freshly prompted one is
//! written back only after the relay accepts it.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};

use crate::config::RunConfig;
use crate::error::Result;
use crate::notify::{Alert, DeliveryMode, Notifier};
use crate::secrets::{Credential, CredentialStore};

/// Delivers alerts through an SMTP submission relay.
#[derive(Debug)]
pub struct SmtpNotifier {
    relay_host: String,
    relay_port: u16,
    sender: String,
    receiver: String,
    mode: DeliveryMode,
    credentials: CredentialStore,
}

impl SmtpNotifier {
    pub fn new(config: &RunConfig, mode: DeliveryMode, credentials: CredentialStore) -> Self {
        Self {
            relay_host: config.relay_host.clone(),
            relay_port: config.relay_port,
            sender: config.sender.clone(),
            receiver: config.receiver.clone(),
            mode,
            credentials,
        }
    }

    /// Build the outgoing message. SMS gateways get an empty subject so
    /// the whole text budget goes to the body.
    fn build_message(&self, alert: &Alert) -> Result<Message> {
        let subject = match self.mode {
            DeliveryMode::Email => alert.subject.as_str(),
            DeliveryMode::Sms => "",
        };
        let message = Message::builder()
            .from(self.sender.parse::<Mailbox>()?)
            .to(self.receiver.parse::<Mailbox>()?)
            .subject(subject)
            .body(alert.body.clone())?;
        Ok(message)
    }

    fn transport(&self, password: &str) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(self.sender.clone(), password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.relay_host)?
            .port(self.relay_port)
            .credentials(credentials)
            .build();
        Ok(transport)
    }

    /// Write a freshly prompted password back to the keyring. Runs only
    /// after the relay has accepted the login; keyring-sourced passwords
    /// are left untouched.
    fn persist_if_fresh(&self, credential: &Credential) -> Result<()> {
        if credential.freshly_entered() {
            self.credentials.store(credential.secret())?;
            info!("saved {} password to the keyring", self.sender);
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn alert(&self, alert: &Alert) -> Result<()> {
        let credential = self.credentials.get_or_prompt()?;
        let message = self.build_message(alert)?;
        let transport = self.transport(credential.secret())?;

        debug!(
            "submitting alert to {} via {}:{}",
            self.receiver, self.relay_host, self.relay_port
        );
        transport.send(message).await?;

        self.persist_if_fresh(&credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(receiver: &str) -> RunConfig {
        RunConfig {
            sender: "sender@example.com".to_string(),
            receiver: receiver.to_string(),
            relay_host: "smtp.gmail.com".to_string(),
            relay_port: 587,
            max_runs: 3,
            max_fails: 1,
            timeout: std::time::Duration::from_secs(1200),
            base_delay: std::time::Duration::from_secs(30),
        }
    }

    fn test_notifier(receiver: &str, mode: DeliveryMode) -> SmtpNotifier {
        crate::secrets::use_mock_store();
        let store = CredentialStore::new("alertr-smtp", "sender@example.com").unwrap();
        SmtpNotifier::new(&test_config(receiver), mode, store)
    }

    #[test]
    fn test_email_message_has_subject() {
        let notifier = test_notifier("someone@example.com", DeliveryMode::Email);
        let alert = Alert {
            subject: "alertr: run failed".to_string(),
            body: "Command failed at Mon Aug 25 1432h.".to_string(),
        };
        let message = notifier.build_message(&alert).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Subject: alertr: run failed"));
        assert!(rendered.contains("To: someone@example.com"));
        assert!(rendered.contains("From: sender@example.com"));
        assert!(rendered.contains("Command failed at Mon Aug 25 1432h."));
    }

    #[test]
    fn test_sms_message_has_empty_subject() {
        let notifier = test_notifier("1234567890@vtext.com", DeliveryMode::Sms);
        let alert = Alert {
            subject: "alertr: runs completed".to_string(),
            body: "All runs completed @ Mon Aug 25 1432h".to_string(),
        };
        let message = notifier.build_message(&alert).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(!rendered.contains("Subject: alertr"));
        assert!(rendered.contains("To: 1234567890@vtext.com"));
        assert!(rendered.contains("All runs completed @ Mon Aug 25 1432h"));
    }

    #[test]
    fn test_bad_receiver_address_is_an_error() {
        let notifier = test_notifier("not-an-address", DeliveryMode::Email);
        let alert = Alert {
            subject: "subject".to_string(),
            body: "body".to_string(),
        };
        assert!(notifier.build_message(&alert).is_err());
    }

    #[test]
    fn test_transport_builds_without_connecting() {
        let notifier = test_notifier("someone@example.com", DeliveryMode::Email);
        assert!(notifier.transport("secret").is_ok());
    }

    #[test]
    fn test_fresh_password_is_persisted() {
        crate::secrets::use_mock_store();
        let store = CredentialStore::new("alertr-smtp-fresh", "sender@example.com").unwrap();
        let notifier =
            SmtpNotifier::new(&test_config("someone@example.com"), DeliveryMode::Email, store);

        let credential = notifier
            .credentials
            .get_or_prompt_with(|_| Ok("typed-in".to_string()))
            .unwrap();
        assert!(credential.freshly_entered());

        notifier.persist_if_fresh(&credential).unwrap();
        assert_eq!(
            notifier.credentials.lookup().unwrap().as_deref(),
            Some("typed-in")
        );
    }

    #[test]
    fn test_keyring_password_is_not_rewritten() {
        crate::secrets::use_mock_store();
        let store = CredentialStore::new("alertr-smtp-hit", "sender@example.com").unwrap();
        let notifier =
            SmtpNotifier::new(&test_config("someone@example.com"), DeliveryMode::Email, store);

        let credential = Credential::from_keyring("already-there");
        notifier.persist_if_fresh(&credential).unwrap();
        assert!(notifier.credentials.lookup().unwrap().is_none());
    }
}
