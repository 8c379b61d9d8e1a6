//! Admin sign-in with an emailed one-time password.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shopsmart_auth::{AuthError, OtpLogin, Session, UserType};
use shopsmart_commerce::UserId;
use shopsmart_data::CancellationToken;
use tracing::{info, warn};

use crate::error::StorefrontError;
use crate::messages::{LOGIN_SUCCESSFUL, OTP_RESENT, OTP_SEND_FAILED, OTP_VERIFY_FAILED};
use crate::notify::{Notifier, Route, Toast};
use crate::services::Services;

/// Drives one admin login from email entry to an established session.
///
/// No session exists yet, so requests hang off a token owned by the
/// login itself; `cancel` abandons whatever is in flight.
pub struct AdminLogin {
    services: Services,
    notifier: Arc<dyn Notifier>,
    otp: OtpLogin,
    token: CancellationToken,
}

impl AdminLogin {
    pub fn new(services: Services, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            services,
            notifier,
            otp: OtpLogin::new(),
            token: CancellationToken::new(),
        }
    }

    pub fn otp(&self) -> &OtpLogin {
        &self.otp
    }

    /// Send (or resend) an OTP to `email`.
    ///
    /// A malformed address or a resend during the cooldown is returned for
    /// inline display without contacting the backend.
    pub async fn send_otp(&mut self, email: &str, now: DateTime<Utc>) -> Result<(), StorefrontError> {
        let email = OtpLogin::validate_email(email)?;
        let resend = self.otp.email() == Some(email.as_str());

        if let Err(err) = self.otp.request_otp(&email, now) {
            if err == AuthError::OtpExhausted {
                self.notifier.toast(Toast::warn("Warning", err.to_string()));
            }
            return Err(err.into());
        }

        let token = self.token.child_token();
        if let Err(err) = self.services.login.generate_otp(&email, &token).await {
            warn!(error = %err, "otp send failed");
            self.notifier.toast(Toast::error(OTP_SEND_FAILED));
            return Err(err.into());
        }

        info!(resend, remaining = self.otp.requests_remaining(), "otp sent");
        if resend {
            self.notifier.toast(Toast::info("OTP Resent", OTP_RESENT));
        }
        Ok(())
    }

    /// Check the entered OTP and establish an admin session.
    ///
    /// The session's user id is the one the backend returns, or the email
    /// when it returns none.
    pub async fn verify(&mut self, otp: &str) -> Result<Session, StorefrontError> {
        let otp = self.otp.validate_otp(otp)?;
        let email = self.otp.email().ok_or(AuthError::OtpNotRequested)?.to_string();

        let token = self.token.child_token();
        let response = match self.services.login.verify_otp(&email, &otp, &token).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "otp verification failed");
                self.notifier.toast(Toast::error(OTP_VERIFY_FAILED));
                return Err(err.into());
            }
        };

        let user_id = response.user_id.unwrap_or_else(|| UserId::new(email));
        let session = Session::establish(user_id, UserType::Admin);
        info!(user_id = %session.user_id(), "admin signed in");
        self.otp.reset();
        self.notifier.toast(Toast::success("Success", LOGIN_SUCCESSFUL));
        self.notifier.navigate(Route::Admin);
        Ok(session)
    }

    /// Abandon any request in flight.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::testing::{FakeBackend, RecordingNotifier};
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn login(backend: &Arc<FakeBackend>) -> (AdminLogin, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let login = AdminLogin::new(Services::from_backend(backend.clone()), notifier.clone());
        (login, notifier)
    }

    #[tokio::test]
    async fn test_invalid_email_sends_nothing() {
        let backend = FakeBackend::new();
        let (mut login, notifier) = login(&backend);

        let err = login.send_otp("ops@shopsmart", at(0)).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.call_count("generate_otp"), 0);
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_resend_rules() {
        let backend = FakeBackend::new();
        let (mut login, notifier) = login(&backend);

        login.send_otp("ops@shopsmart.sg", at(0)).await.unwrap();
        assert!(notifier.toasts().is_empty());

        let err = login.send_otp("ops@shopsmart.sg", at(10)).await.unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Auth(AuthError::ResendCoolingDown { remaining_secs: 20 })
        ));

        login.send_otp("ops@shopsmart.sg", at(30)).await.unwrap();
        assert_eq!(notifier.last_toast().unwrap().detail, OTP_RESENT);
        login.send_otp("ops@shopsmart.sg", at(60)).await.unwrap();

        let err = login.send_otp("ops@shopsmart.sg", at(90)).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(AuthError::OtpExhausted)));
        assert_eq!(notifier.last_toast().unwrap().severity, Severity::Warn);
        assert_eq!(backend.otp_emails().len(), 3);
    }

    #[tokio::test]
    async fn test_send_failure_toasts() {
        let backend = FakeBackend::new();
        backend.fail("generate_otp");
        let (mut login, notifier) = login(&backend);

        assert!(login.send_otp("ops@shopsmart.sg", at(0)).await.is_err());
        assert_eq!(notifier.last_toast().unwrap().detail, OTP_SEND_FAILED);
    }

    #[tokio::test]
    async fn test_verify_establishes_admin_session() {
        let backend = FakeBackend::new();
        backend.set_verified_user(Some(UserId::new("admin-7")));
        let (mut login, notifier) = login(&backend);
        login.send_otp("ops@shopsmart.sg", at(0)).await.unwrap();

        let session = login.verify("123456").await.unwrap();

        assert_eq!(session.user_id(), &UserId::new("admin-7"));
        assert_eq!(session.user_type(), UserType::Admin);
        assert_eq!(notifier.last_toast().unwrap().detail, LOGIN_SUCCESSFUL);
        assert_eq!(notifier.routes(), vec![Route::Admin]);
        assert_eq!(login.otp().email(), None);
    }

    #[tokio::test]
    async fn test_verify_falls_back_to_email() {
        let backend = FakeBackend::new();
        let (mut login, _) = login(&backend);
        login.send_otp("ops@shopsmart.sg", at(0)).await.unwrap();

        let session = login.verify("654321").await.unwrap();
        assert_eq!(session.user_id(), &UserId::new("ops@shopsmart.sg"));
    }

    #[tokio::test]
    async fn test_verify_rejects_bad_otp_locally() {
        let backend = FakeBackend::new();
        let (mut login, _) = login(&backend);

        assert!(matches!(
            login.verify("123456").await,
            Err(StorefrontError::Auth(AuthError::OtpNotRequested))
        ));

        login.send_otp("ops@shopsmart.sg", at(0)).await.unwrap();
        assert!(login.verify("12a456").await.unwrap_err().is_validation());
        assert_eq!(backend.call_count("verify_otp"), 0);
    }

    #[tokio::test]
    async fn test_verify_failure_toasts() {
        let backend = FakeBackend::new();
        backend.fail("verify_otp");
        let (mut login, notifier) = login(&backend);
        login.send_otp("ops@shopsmart.sg", at(0)).await.unwrap();

        assert!(login.verify("123456").await.is_err());
        assert_eq!(notifier.last_toast().unwrap().detail, OTP_VERIFY_FAILED);
        assert!(notifier.routes().is_empty());
    }
}
