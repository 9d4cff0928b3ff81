//! Configuration for the access core.
//!
//! Bundles the tunable knobs — credential policy and password hashing
//! parameters — so an embedder configures them in one place and hands the
//! bundle to each action via its `with_config` constructor.
//!
//! # Example
//!
//! ```rust
//! use palisade::config::AccessConfig;
//! use palisade::validators::PasswordPolicy;
//!
//! // Platform defaults
//! let config = AccessConfig::default();
//!
//! // Or customize
//! let config = AccessConfig {
//!     password_policy: PasswordPolicy::new().min_length(12),
//!     ..Default::default()
//! };
//! ```

use crate::crypto::Argon2Hasher;
use crate::validators::PasswordPolicy;

/// Main configuration struct for the access core.
///
/// Use `AccessConfig::default()` for the platform's standard credential
/// requirements and hashing parameters.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    /// Credential-strength requirements applied before every
    /// password-setting mutation.
    pub password_policy: PasswordPolicy,

    /// Argon2id parameters used when hashing passwords.
    pub hasher: Argon2Hasher,
}

impl AccessConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with stricter security settings.
    ///
    /// Raises the minimum password length to 12 and uses the
    /// production-recommended Argon2id parameters.
    pub fn strict() -> Self {
        Self {
            password_policy: PasswordPolicy::new().min_length(12),
            hasher: Argon2Hasher::production(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_platform_policy() {
        let config = AccessConfig::default();

        assert_eq!(config.password_policy.min_length, 8);
        assert_eq!(config.password_policy.min_uppercase, 2);
        assert_eq!(config.password_policy.min_lowercase, 3);
        assert_eq!(config.password_policy.min_digits, 2);
        assert_eq!(config.password_policy.min_special, 1);
    }

    #[test]
    fn test_strict_config_raises_length() {
        let config = AccessConfig::strict();
        assert_eq!(config.password_policy.min_length, 12);
        assert!(config.password_policy.validate("Ab1!Ab1!cde").is_err());
        assert!(config.password_policy.validate("Ab1!Ab1!cdefg").is_ok());
    }
}
