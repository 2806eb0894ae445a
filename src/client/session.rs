use std::collections::HashMap;

pub const AUTH_TOKEN_KEY: &str = "auth-token";
pub const NAME_KEY: &str = "name";
pub const EMAIL_KEY: &str = "email";

/// Client-side session storage for the issued token and display identity.
/// Values live for the lifetime of the store, mirroring browser session
/// storage semantics.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_logged_in(&self) -> bool {
        self.values.contains_key(AUTH_TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_retrieves_values() {
        let mut session = SessionStore::new();
        session.set(AUTH_TOKEN_KEY, "tok");
        session.set(NAME_KEY, "A");
        assert_eq!(session.get(AUTH_TOKEN_KEY), Some("tok"));
        assert_eq!(session.get(NAME_KEY), Some("A"));
        assert!(session.is_logged_in());
    }

    #[test]
    fn clear_logs_out() {
        let mut session = SessionStore::new();
        session.set(AUTH_TOKEN_KEY, "tok");
        session.clear();
        assert!(!session.is_logged_in());
        assert_eq!(session.get(AUTH_TOKEN_KEY), None);
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut session = SessionStore::new();
        session.set(EMAIL_KEY, "a@x.com");
        assert_eq!(session.remove(EMAIL_KEY).as_deref(), Some("a@x.com"));
        assert_eq!(session.remove(EMAIL_KEY), None);
    }
}
