use std::{fmt, io};

/// Crate-wide `Result` type using [`RulelineError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, RulelineError>;

/// Top-level error type for ruleline operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum RulelineError {
    /// Mission registration errors.
    Registration(RegistrationError),

    /// Receiver-expression evaluation errors (surfaced in eval-debug mode).
    Eval(EvalError),

    /// Completion-action errors (surfaced in debug mode).
    Action(ActionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Registration-specific errors.
///
/// Registration failures are fatal to the registration call, never to the
/// engine: an `Agent` is left unchanged when one of these is returned.
#[derive(Debug)]
pub enum RegistrationError {
    /// A mission with this name is already registered. Use the replace
    /// path (`recomplete`) to change an existing named mission.
    DuplicateName(String),

    /// Replace was requested for a name that does not exist and no
    /// condition was supplied to create the mission fresh.
    UnknownName(String),

    /// The registration carried no condition.
    MissingCondition,

    /// The registration carried no action and the variant has no default.
    MissingAction,

    /// A condition pattern failed to compile.
    InvalidPattern { pattern: String, message: String },

    /// A method spec could not be parsed (e.g. empty method name).
    InvalidMethodSpec(String),
}

/// Failure raised by an [`Evaluator`](crate::eval::Evaluator) while
/// resolving a receiver expression.
///
/// Outside eval-debug mode these never escape a mission: the mission
/// reports no match and dispatch falls through to the next one.
#[derive(Debug)]
pub struct EvalError {
    /// The expression that was being evaluated.
    pub expression: String,

    /// Underlying failure description from the evaluator.
    pub message: String,
}

impl EvalError {
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

/// Failure raised by a mission action while producing candidates.
///
/// Outside debug mode the owning mission converts this into an empty
/// completion list; the request is not passed on to other missions.
#[derive(Debug)]
pub struct ActionError {
    /// Failure description.
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Free-form configuration error.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for RulelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulelineError::Registration(e) => write!(f, "Registration error: {e}"),
            RulelineError::Eval(e) => write!(f, "{e}"),
            RulelineError::Action(e) => write!(f, "Action error: {e}"),
            RulelineError::Config(e) => write!(f, "Configuration error: {e}"),
            RulelineError::Io(e) => write!(f, "I/O error: {e}"),
            RulelineError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::DuplicateName(name) => {
                write!(
                    f,
                    "mission '{name}' already exists, use recomplete to replace it"
                )
            }
            RegistrationError::UnknownName(name) => {
                write!(f, "no mission named '{name}' to replace")
            }
            RegistrationError::MissingCondition => {
                write!(f, "a completion rule needs a condition")
            }
            RegistrationError::MissingAction => {
                write!(f, "a completion rule needs an action")
            }
            RegistrationError::InvalidPattern { pattern, message } => {
                write!(f, "invalid condition pattern '{pattern}': {message}")
            }
            RegistrationError::InvalidMethodSpec(spec) => {
                write!(f, "invalid method spec '{spec}'")
            }
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Evaluation of '{}' failed: {}",
            self.expression, self.message
        )
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RulelineError {}
impl std::error::Error for RegistrationError {}
impl std::error::Error for EvalError {}
impl std::error::Error for ActionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to RulelineError ========================= */

impl From<io::Error> for RulelineError {
    fn from(err: io::Error) -> Self {
        RulelineError::Io(err)
    }
}

impl From<RegistrationError> for RulelineError {
    fn from(err: RegistrationError) -> Self {
        RulelineError::Registration(err)
    }
}

impl From<EvalError> for RulelineError {
    fn from(err: EvalError) -> Self {
        RulelineError::Eval(err)
    }
}

impl From<ActionError> for RulelineError {
    fn from(err: ActionError) -> Self {
        RulelineError::Action(err)
    }
}

impl From<ConfigError> for RulelineError {
    fn from(err: ConfigError) -> Self {
        RulelineError::Config(err)
    }
}

impl From<String> for RulelineError {
    fn from(msg: String) -> Self {
        RulelineError::Generic(msg)
    }
}

impl From<&str> for RulelineError {
    fn from(msg: &str) -> Self {
        RulelineError::Generic(msg.to_owned())
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        ActionError { message }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        ActionError {
            message: message.to_owned(),
        }
    }
}
