//! Schema type definitions for the command tree and its arguments.
//!
//! This module defines the immutable data model produced by the
//! [`CommandArgsBuilder`](crate::CommandArgsBuilder): argument definitions,
//! commands, and the root configuration. Once built, the model is shared
//! read-only by validation and resolution for the lifetime of one invocation.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::bag::ArgumentBag;
use crate::validate::ValidationOutcome;

/// Marker string recorded as the value of a switch occurrence.
pub const SWITCH_VALUE: &str = "true";

/// Boxed error type returned by command handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Async per-value validator attached to an argument definition.
///
/// Receives the raw resolved value (or `None` when the argument was present
/// without a value) and decides whether it is acceptable.
pub type ValidatorFn =
    Arc<dyn Fn(Option<&str>) -> BoxFuture<'static, ValidationOutcome> + Send + Sync>;

/// Inline async handler bound directly to a command instead of a registry key.
pub type InlineHandlerFn =
    Arc<dyn Fn(ArgumentBag) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Name and abbreviation pair identifying an argument.
///
/// Both keys match ASCII-case-insensitively. An empty abbreviation means the
/// argument has no short form.
///
/// # Examples
///
/// ```
/// use console_args::ArgumentKeys;
///
/// let keys = ArgumentKeys::from(("name", "n"));
/// assert_eq!(keys.name, "name");
///
/// let long_only = ArgumentKeys::from("tags");
/// assert!(long_only.abbreviation.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentKeys {
    /// Long-form name, selected with a `--` prefix.
    pub name: String,
    /// Short form, selected with a single `-` prefix. Empty when absent.
    pub abbreviation: String,
}

impl ArgumentKeys {
    /// Creates a key pair with both a name and an abbreviation.
    pub fn new(name: &str, abbreviation: &str) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        }
    }

    /// Creates a key pair with a name only.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: String::new(),
        }
    }
}

impl From<&str> for ArgumentKeys {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<(&str, &str)> for ArgumentKeys {
    fn from((name, abbreviation): (&str, &str)) -> Self {
        Self::new(name, abbreviation)
    }
}

impl fmt::Display for ArgumentKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name)?;
        if !self.abbreviation.is_empty() {
            write!(f, " -{}", self.abbreviation)?;
        }
        Ok(())
    }
}

/// Definition of a single argument on a command or in the global list.
///
/// Created once at configuration time and immutable thereafter. Switch
/// arguments never consume a following token and never carry a validator.
///
/// # Examples
///
/// ```
/// use console_args::{ArgumentSpec, validators};
///
/// let location = ArgumentSpec::required(("location", "l"), "Azure location")
///     .with_validator(validators::one_of(&["westeurope", "northeurope"]));
/// assert!(location.is_required);
/// assert!(location.validator.is_some());
///
/// let yes = ArgumentSpec::switch(("yes", "y"), "Do not prompt for confirmation");
/// assert!(yes.is_switch);
/// assert!(!yes.is_required);
/// ```
#[derive(Clone, Default)]
pub struct ArgumentSpec {
    /// Long-form name (non-empty).
    pub name: String,
    /// Short form; empty when the argument has none.
    pub abbreviation: String,
    /// Human-readable description for help rendering.
    pub description: String,
    /// Whether resolution must produce a value for this argument.
    pub is_required: bool,
    /// Whether presence alone is the signal; switches never take a value token.
    pub is_switch: bool,
    /// Optional async validator for the resolved raw value.
    pub validator: Option<ValidatorFn>,
}

impl ArgumentSpec {
    /// Creates a required value argument.
    pub fn required(keys: impl Into<ArgumentKeys>, description: &str) -> Self {
        let keys = keys.into();
        Self {
            name: keys.name,
            abbreviation: keys.abbreviation,
            description: description.to_string(),
            is_required: true,
            is_switch: false,
            validator: None,
        }
    }

    /// Creates an optional value argument.
    pub fn optional(keys: impl Into<ArgumentKeys>, description: &str) -> Self {
        let keys = keys.into();
        Self {
            name: keys.name,
            abbreviation: keys.abbreviation,
            description: description.to_string(),
            is_required: false,
            is_switch: false,
            validator: None,
        }
    }

    /// Creates a switch argument. Switches are never required and cannot
    /// carry a validator.
    pub fn switch(keys: impl Into<ArgumentKeys>, description: &str) -> Self {
        let keys = keys.into();
        Self {
            name: keys.name,
            abbreviation: keys.abbreviation,
            description: description.to_string(),
            is_required: false,
            is_switch: true,
            validator: None,
        }
    }

    /// Attaches an async validator. Ignored on switch arguments.
    pub fn with_validator(mut self, validator: ValidatorFn) -> Self {
        if !self.is_switch {
            self.validator = Some(validator);
        }
        self
    }

    /// Checks the long-form name against a key, ASCII-case-insensitively.
    pub fn matches_name(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
    }

    /// Checks the abbreviation against a key, ASCII-case-insensitively.
    /// An empty abbreviation never matches.
    pub fn matches_abbreviation(&self, key: &str) -> bool {
        !self.abbreviation.is_empty() && self.abbreviation.eq_ignore_ascii_case(key)
    }

    /// Returns the key pair of this definition.
    pub fn keys(&self) -> ArgumentKeys {
        ArgumentKeys::new(&self.name, &self.abbreviation)
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("abbreviation", &self.abbreviation)
            .field("description", &self.description)
            .field("is_required", &self.is_required)
            .field("is_switch", &self.is_switch)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// Handler bound to a command: either an opaque key into a
/// [`HandlerRegistry`](crate::HandlerRegistry) or an inline async closure.
#[derive(Clone)]
pub enum HandlerBinding {
    /// Key resolved through the handler registry at dispatch time.
    Registered(String),
    /// Closure invoked directly with the resolved argument bag.
    Inline(InlineHandlerFn),
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered(key) => f.debug_tuple("Registered").field(key).finish(),
            Self::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

/// A verb in the command tree with its arguments, sub-commands, and handler.
///
/// Sibling verbs are unique (case-insensitive); a leaf has no sub-commands.
#[derive(Clone, Default)]
pub struct CommandDefinition {
    /// The literal token a user types to select this command.
    pub verb: String,
    /// Human-readable description for help rendering.
    pub description: String,
    /// Arguments scoped to this command, in declaration order.
    pub arguments: Vec<ArgumentSpec>,
    /// Nested sub-commands, in declaration order.
    pub sub_commands: Vec<CommandDefinition>,
    /// Handler to run when this command is the deepest match; `None` falls
    /// back to the configured default handler.
    pub handler: Option<HandlerBinding>,
}

impl CommandDefinition {
    /// Finds an argument of this command by long-form name.
    pub fn find_argument_by_name(&self, key: &str) -> Option<&ArgumentSpec> {
        find_by_name(&self.arguments, key)
    }

    /// Finds an argument of this command by abbreviation.
    pub fn find_argument_by_abbreviation(&self, key: &str) -> Option<&ArgumentSpec> {
        find_by_abbreviation(&self.arguments, key)
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("verb", &self.verb)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("sub_commands", &self.sub_commands)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Configuration of the built-in help argument.
///
/// Enabled by default under `--help` / `-?`. When the resolver sees either
/// key it records a synthetic marker value instead of binding a declared
/// argument, and dispatch renders help instead of running a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultHelp {
    /// Whether the built-in help argument is active.
    pub is_enabled: bool,
    /// Long-form key for help.
    pub name: String,
    /// Short-form key for help.
    pub abbreviation: String,
}

impl Default for DefaultHelp {
    fn default() -> Self {
        Self {
            is_enabled: true,
            name: "help".to_string(),
            abbreviation: "?".to_string(),
        }
    }
}

impl DefaultHelp {
    /// Checks the help name against a long-form key.
    pub fn matches_name(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key)
    }

    /// Checks the help abbreviation against a short-form key.
    pub fn matches_abbreviation(&self, key: &str) -> bool {
        !self.abbreviation.is_empty() && self.abbreviation.eq_ignore_ascii_case(key)
    }
}

/// Root schema: the top-level commands, global arguments, default-help
/// settings, and the fallback handler.
#[derive(Clone, Default)]
pub struct CommandArgsConfig {
    /// Top-level commands.
    pub commands: Vec<CommandDefinition>,
    /// Arguments applicable to every command in the tree.
    pub global_arguments: Vec<ArgumentSpec>,
    /// Built-in help configuration.
    pub default_help: DefaultHelp,
    /// Handler used when the matched command has none of its own.
    pub default_handler: Option<HandlerBinding>,
}

impl fmt::Debug for CommandArgsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandArgsConfig")
            .field("commands", &self.commands)
            .field("global_arguments", &self.global_arguments)
            .field("default_help", &self.default_help)
            .field("default_handler", &self.default_handler)
            .finish()
    }
}

/// One resolved name/abbreviation/value triple, produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgumentValue {
    /// Long-form name of the matched definition.
    pub name: String,
    /// Abbreviation of the matched definition; empty when it has none.
    pub abbreviation: String,
    /// Raw value token, or `None` when no value was recorded.
    pub value: Option<String>,
}

impl ResolvedArgumentValue {
    /// Creates a resolved value.
    pub fn new(name: &str, abbreviation: &str, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            value: value.map(String::from),
        }
    }
}

impl fmt::Display for ResolvedArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Abbreviation: {}, Value: {}",
            self.name,
            self.abbreviation,
            self.value.as_deref().unwrap_or_default()
        )
    }
}

/// Finds an argument in a list by long-form name, case-insensitively.
pub(crate) fn find_by_name<'a>(
    arguments: &'a [ArgumentSpec],
    key: &str,
) -> Option<&'a ArgumentSpec> {
    arguments.iter().find(|argument| argument.matches_name(key))
}

/// Finds an argument in a list by abbreviation, case-insensitively.
/// Definitions without an abbreviation are never matched.
pub(crate) fn find_by_abbreviation<'a>(
    arguments: &'a [ArgumentSpec],
    key: &str,
) -> Option<&'a ArgumentSpec> {
    arguments
        .iter()
        .find(|argument| argument.matches_abbreviation(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_keys_conversions() {
        let keys: ArgumentKeys = ("output", "o").into();
        assert_eq!(keys.name, "output");
        assert_eq!(keys.abbreviation, "o");

        let keys: ArgumentKeys = "tags".into();
        assert_eq!(keys.name, "tags");
        assert!(keys.abbreviation.is_empty());
    }

    #[test]
    fn test_spec_matching_is_ascii_case_insensitive() {
        let spec = ArgumentSpec::optional(("Location", "L"), "");

        assert!(spec.matches_name("location"));
        assert!(spec.matches_name("LOCATION"));
        assert!(spec.matches_abbreviation("l"));
        assert!(!spec.matches_name("locale"));
    }

    #[test]
    fn test_empty_abbreviation_never_matches() {
        let spec = ArgumentSpec::optional("tags", "");

        assert!(!spec.matches_abbreviation(""));
        assert!(!spec.matches_abbreviation("t"));
    }

    #[test]
    fn test_switch_spec_refuses_validator() {
        let spec =
            ArgumentSpec::switch(("yes", "y"), "").with_validator(crate::validators::boolean());

        assert!(spec.validator.is_none());
    }

    #[test]
    fn test_default_help_defaults() {
        let help = DefaultHelp::default();

        assert!(help.is_enabled);
        assert_eq!(help.name, "help");
        assert_eq!(help.abbreviation, "?");
    }

    #[test]
    fn test_find_argument_on_command() {
        let command = CommandDefinition {
            verb: "create".into(),
            arguments: vec![
                ArgumentSpec::required(("name", "n"), ""),
                ArgumentSpec::optional("tags", ""),
            ],
            ..Default::default()
        };

        assert!(command.find_argument_by_name("NAME").is_some());
        assert!(command.find_argument_by_abbreviation("n").is_some());
        assert!(command.find_argument_by_abbreviation("t").is_none());
    }
}
