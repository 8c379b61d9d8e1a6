//! Session management.
//!
//! A `Session` is the explicit stand-in for "who is signed in". It is handed
//! to every component that needs an identity, and tearing it down cancels
//! every request issued under it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopsmart_commerce::{CustomerId, UserId};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::user::UserType;
use crate::AuthError;

/// The persistable part of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub user_type: UserType,
    pub established_at: DateTime<Utc>,
}

/// A signed-in user and the root token for their requests.
#[derive(Debug, Clone)]
pub struct Session {
    record: SessionRecord,
    token: CancellationToken,
}

impl Session {
    /// Start a session for a user.
    pub fn establish(user_id: UserId, user_type: UserType) -> Self {
        Self::from_record(SessionRecord {
            user_id,
            user_type,
            established_at: Utc::now(),
        })
    }

    /// Resume a session that was persisted earlier.
    pub fn from_record(record: SessionRecord) -> Self {
        info!(user_id = %record.user_id, user_type = %record.user_type, "session established");
        Self {
            record,
            token: CancellationToken::new(),
        }
    }

    /// End the session. In-flight requests issued under it fail with a
    /// cancellation error. Calling this twice is harmless.
    pub fn teardown(&self) {
        if !self.token.is_cancelled() {
            info!(user_id = %self.record.user_id, "session torn down");
            self.token.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn user_id(&self) -> &UserId {
        &self.record.user_id
    }

    pub fn user_type(&self) -> UserType {
        self.record.user_type
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.record.established_at
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    /// Token for one request: a child of the session's root token.
    pub fn request_token(&self) -> Result<CancellationToken, AuthError> {
        self.ensure_active()?;
        Ok(self.token.child_token())
    }

    /// The signed-in user id, if the session is active and of `user_type`.
    pub fn require(&self, user_type: UserType) -> Result<&UserId, AuthError> {
        self.ensure_active()?;
        if self.record.user_type != user_type {
            return Err(AuthError::WrongUserType {
                expected: user_type,
                actual: self.record.user_type,
            });
        }
        Ok(&self.record.user_id)
    }

    /// The customer id for customer-only operations.
    pub fn customer_id(&self) -> Result<&CustomerId, AuthError> {
        self.require(UserType::Customer)
    }

    fn ensure_active(&self) -> Result<(), AuthError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AuthError::SessionEnded)
        }
    }
}
