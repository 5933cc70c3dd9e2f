use thiserror::Error;

use crate::types::BoxError;

/// Convenience result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, validating, resolving, or dispatching.
///
/// Every variant carries the identifying verb, argument, or value so a CLI
/// surface can render the message directly. The first failure always wins;
/// nothing in this crate aggregates or retries.
#[derive(Debug, Error)]
pub enum Error {
    /// Builder misuse, such as `done()` without a parent scope or an empty
    /// verb. Raised before any user input is processed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Structural validation of the built command tree failed.
    #[error("invalid command schema: {0}")]
    Schema(String),

    /// A verb token matched no command during hierarchy extraction.
    #[error("command '{verb}' not found")]
    CommandNotFound {
        /// The unrecognized token.
        verb: String,
    },

    /// Resolved input failed a required-argument or per-value check.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A second value with the same key pair was inserted into a resolved
    /// bag. Indicates a resolver bug rather than bad user input.
    #[error("argument with name '{name}' and abbreviation '{abbreviation}' is already present")]
    DuplicateArgumentValue {
        /// Long-form name of the colliding value.
        name: String,
        /// Abbreviation of the colliding value.
        abbreviation: String,
    },

    /// No handler was resolvable for the matched command and no default
    /// handler is configured.
    #[error("no handler found for command with verb '{verb}', and no default handler configured")]
    HandlerNotFound {
        /// Verb of the command that had no handler.
        verb: String,
    },

    /// A typed bag lookup found no value to parse.
    #[error("argument '{name}' has no value to parse as {target}")]
    MissingValue {
        /// Long-form name of the argument.
        name: String,
        /// Target type of the requested parse.
        target: &'static str,
    },

    /// A typed bag lookup failed to parse the raw value.
    #[error("could not parse value '{value}' of argument '{name}' as {target}")]
    ValueParse {
        /// Long-form name of the argument.
        name: String,
        /// The raw value that failed to parse.
        value: String,
        /// Target type of the requested parse.
        target: &'static str,
    },

    /// A command handler returned an error.
    #[error("handler for command '{verb}' failed")]
    Handler {
        /// Verb of the command whose handler failed.
        verb: String,
        /// The handler's own error.
        #[source]
        source: BoxError,
    },
}
