//! Authentication errors.

use thiserror::Error;

use crate::user::UserType;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email does not look like an address.
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// OTP is not exactly six digits.
    #[error("OTP must be exactly {0} digits")]
    InvalidOtpFormat(usize),

    /// Every allowed OTP request has been used.
    #[error("Maximum Exhaust reached Please try again later")]
    OtpExhausted,

    /// A new OTP was requested too soon after the last one.
    #[error("Please wait {remaining_secs}s before requesting another OTP")]
    ResendCoolingDown { remaining_secs: i64 },

    /// Verification attempted before any OTP was sent.
    #[error("Request an OTP before verifying")]
    OtpNotRequested,

    /// The session was torn down.
    #[error("session ended")]
    SessionEnded,

    /// No one is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// Signed in, but as the wrong kind of user.
    #[error("requires a {expected} session, signed in as {actual}")]
    WrongUserType { expected: UserType, actual: UserType },
}

impl AuthError {
    /// Check if this is an input problem the user can fix in place.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::InvalidEmail | AuthError::InvalidOtpFormat(_))
    }

    /// Check if this is an authorization failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::SessionEnded | AuthError::NotSignedIn | AuthError::WrongUserType { .. }
        )
    }
}
