//! Credential storage backed by the OS keyring.
//!
//! Passwords are looked up by service and account. A miss falls back to
//! a hidden terminal prompt; the entered password is only written back
//! after it has authenticated once, so a typo never poisons the store.

use keyring::Entry;
use log::debug;

use crate::error::Result;

/// Handle to one service/account slot in the OS keyring.
#[derive(Debug)]
pub struct CredentialStore {
    service: String,
    account: String,
    entry: Entry,
}

/// A password plus where it came from.
#[derive(Debug, Clone)]
pub struct Credential {
    secret: String,
    freshly_entered: bool,
}

impl Credential {
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// True when the password came from the prompt rather than the
    /// keyring and still needs to be stored after it proves valid.
    pub fn freshly_entered(&self) -> bool {
        self.freshly_entered
    }
}

#[cfg(test)]
impl Credential {
    pub(crate) fn from_keyring(secret: &str) -> Self {
        Self { secret: secret.to_string(), freshly_entered: false }
    }
}

impl CredentialStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Result<Self> {
        let service = service.into();
        let account = account.into();
        let entry = Entry::new(&service, &account)?;
        Ok(Self { service, account, entry })
    }

    /// Look up the stored password, if any.
    pub fn lookup(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Store the password for later runs.
    pub fn store(&self, secret: &str) -> Result<()> {
        debug!("storing {} password under service '{}'", self.account, self.service);
        self.entry.set_password(secret)?;
        Ok(())
    }

    /// Fetch the password, prompting on the terminal when the keyring
    /// has nothing for this account.
    pub fn get_or_prompt(&self) -> Result<Credential> {
        self.get_or_prompt_with(|prompt| rpassword::prompt_password(prompt))
    }

    /// [`get_or_prompt`](Self::get_or_prompt) with a caller-supplied
    /// prompt. The prompt runs only when the keyring has no entry, and
    /// the password it returns is not written back here; that happens
    /// once it has authenticated.
    pub fn get_or_prompt_with<F>(&self, prompt: F) -> Result<Credential>
    where
        F: FnOnce(&str) -> std::io::Result<String>,
    {
        if let Some(secret) = self.lookup()? {
            debug!("got {} password from keyring", self.account);
            return Ok(Credential { secret, freshly_entered: false });
        }
        let secret = prompt(&format!("provide your password for {}: ", self.account))?;
        Ok(Credential { secret, freshly_entered: true })
    }
}

/// Route keyring calls to the in-memory mock store. Mock state lives in
/// each `Entry`, so assertions must go through the store that did the
/// writing.
#[cfg(test)]
pub(crate) fn use_mock_store() {
    use std::sync::Once;

    static MOCK_STORE: Once = Once::new();
    MOCK_STORE.call_once(|| {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_is_none() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "nobody@example.com").unwrap();
        assert!(store.lookup().unwrap().is_none());
    }

    #[test]
    fn test_store_then_lookup() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "sender@example.com").unwrap();
        store.store("hunter2").unwrap();
        assert_eq!(store.lookup().unwrap().as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_get_or_prompt_uses_stored_password() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "stored@example.com").unwrap();
        store.store("from-keyring").unwrap();
        let credential = store.get_or_prompt().unwrap();
        assert_eq!(credential.secret(), "from-keyring");
        assert!(!credential.freshly_entered());
    }

    #[test]
    fn test_store_overwrites() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "rotate@example.com").unwrap();
        store.store("old").unwrap();
        store.store("new").unwrap();
        assert_eq!(store.lookup().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_miss_prompts_and_marks_fresh() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "fresh@example.com").unwrap();
        let credential = store
            .get_or_prompt_with(|prompt| {
                assert!(prompt.contains("fresh@example.com"));
                Ok("typed-in".to_string())
            })
            .unwrap();
        assert_eq!(credential.secret(), "typed-in");
        assert!(credential.freshly_entered());
        // Not written back yet; that only happens after a successful send.
        assert!(store.lookup().unwrap().is_none());
    }

    #[test]
    fn test_hit_never_prompts() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "hit@example.com").unwrap();
        store.store("from-keyring").unwrap();
        let credential = store
            .get_or_prompt_with(|_| panic!("prompt ran despite a stored password"))
            .unwrap();
        assert_eq!(credential.secret(), "from-keyring");
        assert!(!credential.freshly_entered());
    }

    #[test]
    fn test_prompt_error_propagates() {
        use_mock_store();
        let store = CredentialStore::new("alertr-test", "eof@example.com").unwrap();
        let result = store.get_or_prompt_with(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed"))
        });
        assert!(result.is_err());
    }
}
