use chrono::{DateTime, Utc};

/// Lifecycle events emitted by palisade actions.
///
/// Events are always fired after the corresponding write has succeeded. If
/// no listeners are registered, they are silently ignored (no-op). Register
/// listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum AccessEvent {
    // user lifecycle
    UserCreated {
        user_id: i64,
        login: String,
        at: DateTime<Utc>,
    },
    PasswordChanged {
        user_id: i64,
        at: DateTime<Utc>,
    },
    UserDisabled {
        user_id: i64,
        at: DateTime<Utc>,
    },
    UserDeleted {
        user_id: i64,
        login: String,
        at: DateTime<Utc>,
    },

    // tenant lifecycle
    CompanyProvisioned {
        company_id: i64,
        role_alias: String,
        at: DateTime<Utc>,
    },
    CompanyUpdated {
        company_id: i64,
        at: DateTime<Utc>,
    },
}

impl AccessEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserCreated { .. } => "user.created",
            Self::PasswordChanged { .. } => "user.password_changed",
            Self::UserDisabled { .. } => "user.disabled",
            Self::UserDeleted { .. } => "user.deleted",
            Self::CompanyProvisioned { .. } => "company.provisioned",
            Self::CompanyUpdated { .. } => "company.updated",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserCreated { at, .. }
            | Self::PasswordChanged { at, .. }
            | Self::UserDisabled { at, .. }
            | Self::UserDeleted { at, .. }
            | Self::CompanyProvisioned { at, .. }
            | Self::CompanyUpdated { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            AccessEvent::UserCreated {
                user_id: 1,
                login: "jdoe".to_owned(),
                at: now
            }
            .name(),
            "user.created"
        );

        assert_eq!(
            AccessEvent::PasswordChanged { user_id: 1, at: now }.name(),
            "user.password_changed"
        );

        assert_eq!(
            AccessEvent::UserDisabled { user_id: 1, at: now }.name(),
            "user.disabled"
        );

        assert_eq!(
            AccessEvent::UserDeleted {
                user_id: 1,
                login: "jdoe".to_owned(),
                at: now
            }
            .name(),
            "user.deleted"
        );

        assert_eq!(
            AccessEvent::CompanyProvisioned {
                company_id: 1,
                role_alias: "ACME".to_owned(),
                at: now
            }
            .name(),
            "company.provisioned"
        );

        assert_eq!(
            AccessEvent::CompanyUpdated { company_id: 1, at: now }.name(),
            "company.updated"
        );
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = AccessEvent::UserDisabled { user_id: 1, at: now };
        assert_eq!(event.timestamp(), now);
    }
}
