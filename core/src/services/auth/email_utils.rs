//! Email helpers for log output.

/// Mask the local part of an email for logging
///
/// `alice@example.com` becomes `a***@example.com`. Input without an `@` is
/// masked entirely.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "*".repeat(email.chars().count()),
    }
}
