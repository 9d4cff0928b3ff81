use super::ValidationError;

pub fn validate_login(login: &str) -> Result<(), ValidationError> {
    let trimmed = login.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::LoginEmpty);
    }

    if trimmed.len() > 64 {
        return Err(ValidationError::LoginTooLong);
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::LoginInvalidFormat);
    }

    Ok(())
}
