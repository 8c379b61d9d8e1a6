//! Admin OTP login flow.
//!
//! The flow only tracks rules; the caller does the requests. Time is passed
//! in so the cooldown can be checked without waiting.

use chrono::{DateTime, Duration, Utc};
use shopsmart_commerce::validation::is_valid_email;
use tracing::debug;

use crate::AuthError;

/// Most OTPs one login attempt may request (first send plus resends).
pub const MAX_OTP_REQUESTS: u32 = 3;

/// Seconds a resend stays disabled after each send.
pub const RESEND_COOLDOWN_SECS: i64 = 30;

/// Digits in an OTP.
pub const OTP_LENGTH: usize = 6;

/// Progress of one admin sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpLogin {
    email: Option<String>,
    requests: u32,
    last_sent_at: Option<DateTime<Utc>>,
}

impl OtpLogin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check an email address before anything is sent.
    pub fn validate_email(email: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if is_valid_email(email) {
            Ok(email.to_string())
        } else {
            Err(AuthError::InvalidEmail)
        }
    }

    /// Reserve an OTP request for `email` at `now`.
    ///
    /// The request counts against the limit whether or not the send itself
    /// succeeds. The count and cooldown belong to the flow, not to an
    /// address: switching emails keeps both, and only [`reset`](Self::reset)
    /// clears them.
    pub fn request_otp(&mut self, email: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let email = Self::validate_email(email)?;

        if self.is_exhausted() {
            return Err(AuthError::OtpExhausted);
        }
        let remaining = self.resend_available_in(now);
        if remaining > Duration::zero() {
            return Err(AuthError::ResendCoolingDown {
                remaining_secs: ceil_secs(remaining),
            });
        }

        self.requests += 1;
        self.last_sent_at = Some(now);
        debug!(requests = self.requests, "otp requested");
        self.email = Some(email);
        Ok(())
    }

    /// Time until a resend is allowed; zero when allowed now.
    pub fn resend_available_in(&self, now: DateTime<Utc>) -> Duration {
        match self.last_sent_at {
            Some(sent) => {
                let ready_at = sent + Duration::seconds(RESEND_COOLDOWN_SECS);
                (ready_at - now).max(Duration::zero())
            }
            None => Duration::zero(),
        }
    }

    /// Check whether a resend would be accepted at `now`.
    pub fn can_resend(&self, now: DateTime<Utc>) -> bool {
        !self.is_exhausted() && self.resend_available_in(now) == Duration::zero()
    }

    pub fn is_exhausted(&self) -> bool {
        self.requests >= MAX_OTP_REQUESTS
    }

    pub fn requests_remaining(&self) -> u32 {
        MAX_OTP_REQUESTS.saturating_sub(self.requests)
    }

    /// Email the current OTP was sent to.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Check an entered OTP and return it trimmed.
    pub fn validate_otp(&self, otp: &str) -> Result<String, AuthError> {
        if self.email.is_none() {
            return Err(AuthError::OtpNotRequested);
        }
        let otp = otp.trim();
        if otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit()) {
            Ok(otp.to_string())
        } else {
            Err(AuthError::InvalidOtpFormat(OTP_LENGTH))
        }
    }

    /// Forget everything, e.g. after a successful sign-in.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn ceil_secs(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds();
    (millis + 999) / 1000
}
