use crate::core::error::Error;

pub(crate) fn hash(password: &str) -> Result<String, Error> {
    Ok(bcrypt::hash(password, 12)?)
}

/// Checks a candidate password against a stored bcrypt hash.
///
/// An empty or malformed stored hash never matches, accounts without a
/// usable password cannot be logged into.
pub(crate) fn verify(password: &str, password_hash: &str) -> bool {
    if password_hash.is_empty() {
        return false;
    }

    bcrypt::verify(password, password_hash).unwrap_or(false)
}
