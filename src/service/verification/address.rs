//! Email address validation.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::verification::VerificationError;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-z\-0-9]+\.)+[a-z]{2,}))$"#,
        )
        .expect("email regex must compile")
    })
}

/// Checks syntax and domain of a submitted address.
///
/// Surrounding whitespace is ignored and the address is compared case-insensitively. The
/// part after `@` must equal one of `permitted_domains`; subdomains of a permitted domain
/// are not accepted unless listed themselves.
///
/// # Returns
/// - `Ok(String)` - The trimmed, lower-cased address
/// - `Err(VerificationError::InvalidEmail)` - Malformed address or foreign domain
pub fn validate_email(
    email: &str,
    permitted_domains: &[String],
) -> Result<String, VerificationError> {
    let address = email.trim().to_lowercase();

    if !email_re().is_match(&address) {
        return Err(VerificationError::InvalidEmail(email.trim().to_string()));
    }

    let permitted = address.rsplit_once('@').is_some_and(|(_, domain)| {
        permitted_domains
            .iter()
            .any(|allowed| allowed.as_str() == domain)
    });

    if !permitted {
        return Err(VerificationError::InvalidEmail(email.trim().to_string()));
    }

    Ok(address)
}
