//! Error handling module for the completion engine.
//!
//! The taxonomy mirrors how failures flow through dispatch:
//! - a condition that does not match is *not* an error, it is an
//!   [`Outcome::NoMatch`](crate::mission::Outcome) and dispatch moves on;
//! - evaluation failures are swallowed into a non-match unless eval-debug
//!   is enabled;
//! - action failures become an empty completion list unless debug is
//!   enabled;
//! - registration conflicts always fail fast at registration time.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ActionError, ConfigError, EvalError, RegistrationError, Result, RulelineError,
};
