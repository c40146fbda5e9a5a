//! Login check for the chat front-end
//!
//! A single static credential pair; there is no user store.

use serde::Serialize;

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub identifier: String,
    pub metadata: IdentityMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityMetadata {
    pub role: String,
}

/// Credential check used at login
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity>;
}

/// Accepts exactly one username/password pair
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        if username == self.username && password == self.password {
            Some(Identity {
                identifier: username.to_string(),
                metadata: IdentityMetadata {
                    role: "admin".to_string(),
                },
            })
        } else {
            None
        }
    }
}
