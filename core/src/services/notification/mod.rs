//! Outbound notifications sent during the account lifecycle.

mod mailer;

pub use mailer::{NoopMailer, VerificationMailer};
