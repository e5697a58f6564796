//! Errors that end a client session.
//!
//! Protocol mistakes (bad menu choice, wrong password, invalid move) are
//! handled in place and never show up here.

use thiserror::Error;

use crate::connection::ConnectionError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The client went away or the socket failed.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A collaborator failed. `reply` is the generic line sent to the
    /// client before disconnecting.
    #[error("collaborator failure: {source}")]
    Store {
        reply: &'static str,
        #[source]
        source: StoreError,
    },
}

impl SessionError {
    pub fn store(reply: &'static str, source: StoreError) -> Self {
        SessionError::Store { reply, source }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
