//! Authorization decisions.
//!
//! Every rule is an explicit, independently callable function taking the
//! acting identity as a parameter — there is no ambient "current user". The
//! pure role rules live in [`rules`]; the checks that consult the ACL store
//! live in [`engine`].

mod context;
mod engine;
mod rules;

pub use context::ActorContext;
pub use engine::{can_read, can_write, require_read, require_write};
pub use rules::{authorize_user_create, ensure_target_not_admin};
