use regex::Regex;
use std::sync::LazyLock;

use super::ValidationError;

// Aliases are stored upper-case so the alias segment of derived role names
// matches the stored value exactly.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

pub fn validate_company_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::NameEmpty);
    }

    if trimmed.len() > 128 {
        return Err(ValidationError::NameTooLong);
    }

    Ok(())
}

pub fn validate_role_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.is_empty() {
        return Err(ValidationError::AliasEmpty);
    }

    if alias.len() > 16 {
        return Err(ValidationError::AliasTooLong);
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(ValidationError::AliasInvalidFormat);
    }

    Ok(())
}
