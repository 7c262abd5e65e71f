//! Rule-Based Line Completion Library
//!
//! This library provides an extensible completion engine for interactive
//! shells: given the text a user has typed and the cursor position, it
//! decides which completion rule applies and produces the candidates to
//! offer. Rules ("missions") pair a condition with an action and a search
//! strategy; dispatch over the ordered rule list is first-match-wins.
//!
//! # Modules
//!
//! - `agent`: ordered mission registry and dispatch
//! - `cli`: command-line interface and argument parsing
//! - `config`: configuration management
//! - `error`: error types and handling
//! - `eval`: receiver-expression evaluation and host type reflection
//! - `input`: the per-request completion input value
//! - `mission`: completion rules and their variants
//! - `repl`: reedline integration and the bundled demo rule set
//! - `search`: candidate search/filter strategies
//!
//! # Example
//!
//! ```
//! use ruleline::{Agent, MissionSpec, StaticEvaluator};
//!
//! let mut evaluator = StaticEvaluator::new();
//! evaluator.bind("self", ());
//!
//! let mut agent = Agent::new(Box::new(evaluator));
//! agent
//!     .register(MissionSpec::method("shoot").action(|_input| {
//!         Ok(vec!["octopussy".to_string(), "goldfinger".to_string()])
//!     }))
//!     .unwrap();
//!
//! let completions = agent.complete("shoot oct", 9).unwrap();
//! assert_eq!(completions, vec!["octopussy".to_string()]);
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod input;
pub mod mission;
pub mod repl;
pub mod search;

// Re-export commonly used types
pub use agent::{Agent, Condition, MissionSpec, Placement, SpyReport};
pub use config::Config;
pub use error::{Result, RulelineError};
pub use eval::{Evaluator, StaticEvaluator, TypeDesc, TypeRegistry, Value};
pub use input::Input;
pub use mission::{Action, Mission, MissionKind, Outcome};
pub use search::SearchStrategy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
