//! Authentication module for ShopSmart.
//!
//! Provides the explicit session context and the admin OTP login rules.

mod error;
mod otp;
mod session;
mod user;

pub use error::AuthError;
pub use otp::{OtpLogin, MAX_OTP_REQUESTS, OTP_LENGTH, RESEND_COOLDOWN_SECS};
pub use session::{Session, SessionRecord};
pub use user::UserType;
