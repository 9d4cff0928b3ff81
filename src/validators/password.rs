use serde::{Deserialize, Serialize};

use super::ValidationError;

/// The special characters the credential policy counts.
const SPECIAL_CHARS: &str = "!@#$&*";

/// Configuration for password validation rules.
///
/// The default policy mirrors the platform's credential requirements:
/// at least 8 characters, 2 upper-case letters, 3 lower-case letters,
/// 2 digits, and 1 special character from `!@#$&*`.
///
/// # Examples
///
/// ```
/// use palisade::validators::PasswordPolicy;
///
/// let policy = PasswordPolicy::default();
/// assert!(policy.validate("Ab1!Ab1!cde").is_ok());
/// assert!(policy.validate("abcdefgh").is_err());
///
/// // Relaxed policy for a dev environment
/// let relaxed = PasswordPolicy::new().min_uppercase(0).min_special(0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length (default: 8)
    pub min_length: usize,
    /// Minimum number of upper-case letters (default: 2)
    pub min_uppercase: usize,
    /// Minimum number of lower-case letters (default: 3)
    pub min_lowercase: usize,
    /// Minimum number of ASCII digits (default: 2)
    pub min_digits: usize,
    /// Minimum number of special characters from `!@#$&*` (default: 1)
    pub min_special: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_uppercase: 2,
            min_lowercase: 3,
            min_digits: 2,
            min_special: 1,
        }
    }
}

impl PasswordPolicy {
    /// Creates a new password policy with the default requirements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum password length.
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = n;
        self
    }

    /// Sets the minimum number of upper-case letters.
    #[must_use]
    pub fn min_uppercase(mut self, n: usize) -> Self {
        self.min_uppercase = n;
        self
    }

    /// Sets the minimum number of lower-case letters.
    #[must_use]
    pub fn min_lowercase(mut self, n: usize) -> Self {
        self.min_lowercase = n;
        self
    }

    /// Sets the minimum number of digits.
    #[must_use]
    pub fn min_digits(mut self, n: usize) -> Self {
        self.min_digits = n;
        self
    }

    /// Sets the minimum number of special characters.
    #[must_use]
    pub fn min_special(mut self, n: usize) -> Self {
        self.min_special = n;
        self
    }

    /// Validates a password against this policy.
    ///
    /// Checks run in a fixed order (length, upper, lower, digits, special)
    /// and the first miss is reported. Pure; never touches stored state.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the first requirement the password
    /// does not meet.
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.chars().count() < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }

        if count(password, char::is_uppercase) < self.min_uppercase {
            return Err(ValidationError::PasswordTooFewUppercase(self.min_uppercase));
        }

        if count(password, char::is_lowercase) < self.min_lowercase {
            return Err(ValidationError::PasswordTooFewLowercase(self.min_lowercase));
        }

        if count(password, |c| c.is_ascii_digit()) < self.min_digits {
            return Err(ValidationError::PasswordTooFewDigits(self.min_digits));
        }

        if count(password, |c| SPECIAL_CHARS.contains(c)) < self.min_special {
            return Err(ValidationError::PasswordTooFewSpecial(self.min_special));
        }

        Ok(())
    }
}

fn count(password: &str, pred: impl Fn(char) -> bool) -> usize {
    password.chars().filter(|c| pred(*c)).count()
}

/// Validates a password using the default policy.
///
/// For custom thresholds, use [`PasswordPolicy`] directly.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}
