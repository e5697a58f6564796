//! The set of identities that currently own a live connection.
//!
//! An identity is claimed before the password dialog and held by a
//! [`LoginGuard`]. The guard travels with the connection (session,
//! matchmaking queue, game) and removes the identity when dropped, so
//! every exit path releases it exactly once.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct LoggedInUsers {
    names: Arc<Mutex<HashSet<String>>>,
}

impl LoggedInUsers {
    pub fn new() -> Self {
        LoggedInUsers::default()
    }

    /// Atomically check-and-insert `name`.
    ///
    /// Returns `None` if the identity is already held by another connection.
    pub fn claim(&self, name: &str) -> Option<LoginGuard> {
        if !self.names().insert(name.to_string()) {
            return None;
        }
        Some(LoginGuard {
            users: self.clone(),
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().contains(name)
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    fn names(&self) -> MutexGuard<'_, HashSet<String>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof that this connection owns an identity.
pub struct LoginGuard {
    users: LoggedInUsers,
    name: String,
}

impl LoginGuard {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for LoginGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoginGuard").field(&self.name).finish()
    }
}

impl Drop for LoginGuard {
    fn drop(&mut self) {
        self.users.names().remove(&self.name);
        info!(player = %self.name, "logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_until_release() {
        let users = LoggedInUsers::new();

        let guard = users.claim("alice").unwrap();
        assert!(users.contains("alice"));
        assert!(users.claim("alice").is_none());
        assert!(users.claim("bob").is_some());

        drop(guard);
        assert!(!users.contains("alice"));
        assert!(users.claim("alice").is_some());
    }

    #[test]
    fn dropped_claims_leave_the_set_empty() {
        let users = LoggedInUsers::new();
        {
            let _a = users.claim("alice");
            let _b = users.claim("bob");
            assert_eq!(users.len(), 2);
        }
        assert!(users.is_empty());
    }
}
