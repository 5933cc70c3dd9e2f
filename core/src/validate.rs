//! Structural and input validation for command configurations.
//!
//! Structural checks run once over the whole tree before any user input is
//! processed; input checks run once per invocation against the resolved
//! target command only. Every check short-circuits on the first violation —
//! the first discovered problem is reported and the rest stay invisible
//! until it is fixed.
//!
//! # Examples
//!
//! ```
//! use console_args::{CommandArgsBuilder, validate_user_configuration};
//!
//! let mut builder = CommandArgsBuilder::new();
//! builder.add_command().set_verb("group")?;
//! builder.add_command().set_verb("group")?;
//! let config = builder.build();
//!
//! let outcome = validate_user_configuration(&config);
//! assert!(!outcome.is_valid());
//! # Ok::<(), console_args::Error>(())
//! ```

use std::collections::HashSet;

use crate::bag::ArgumentBag;
use crate::types::{ArgumentSpec, CommandArgsConfig, CommandDefinition};

/// Result of one validation check: valid, or invalid with a message naming
/// the offending verb, argument, or value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The check passed.
    Valid,
    /// The check failed; the message identifies the violation.
    Invalid(String),
}

impl ValidationOutcome {
    /// Creates a passing outcome.
    pub fn ok() -> Self {
        Self::Valid
    }

    /// Creates a failing outcome with a non-empty message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Whether the check passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure message, when present.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// Runs all structural checks over a built configuration, in the observed
/// precedence order: tree duplications, then global uniqueness, then
/// global/local overlap.
pub fn validate_user_configuration(config: &CommandArgsConfig) -> ValidationOutcome {
    let outcome = validate_duplications_recursive(&config.commands);
    if !outcome.is_valid() {
        return outcome;
    }

    let outcome = validate_global_arguments_unique(&config.global_arguments);
    if !outcome.is_valid() {
        return outcome;
    }

    validate_global_arguments_do_not_overlap_recursive(&config.commands, &config.global_arguments)
}

/// Checks that sibling verbs are unique at every level of the tree and that
/// each command's own argument names and non-empty abbreviations are unique.
pub fn validate_duplications_recursive(commands: &[CommandDefinition]) -> ValidationOutcome {
    let mut seen = HashSet::new();
    for command in commands {
        let verb = command.verb.trim();
        if verb.is_empty() {
            // Unnamed commands never match a token, so they cannot collide.
            continue;
        }
        if !seen.insert(verb.to_ascii_lowercase()) {
            return ValidationOutcome::error(format!(
                "verb '{}' is not unique within its command group",
                command.verb
            ));
        }
    }

    for command in commands {
        let outcome = validate_argument_duplications(command);
        if !outcome.is_valid() {
            return outcome;
        }

        let outcome = validate_duplications_recursive(&command.sub_commands);
        if !outcome.is_valid() {
            return outcome;
        }
    }

    ValidationOutcome::ok()
}

/// Checks that global argument names and non-empty abbreviations are unique
/// among themselves.
pub fn validate_global_arguments_unique(global_arguments: &[ArgumentSpec]) -> ValidationOutcome {
    let mut names = HashSet::new();
    for argument in global_arguments {
        if !names.insert(argument.name.to_ascii_lowercase()) {
            return ValidationOutcome::error(format!(
                "argument name '{}' is duplicated on the global arguments",
                argument.name
            ));
        }
    }

    let mut abbreviations = HashSet::new();
    for argument in global_arguments {
        if argument.abbreviation.is_empty() {
            continue;
        }
        if !abbreviations.insert(argument.abbreviation.to_ascii_lowercase()) {
            return ValidationOutcome::error(format!(
                "argument abbreviation '{}' is duplicated on the global arguments",
                argument.abbreviation
            ));
        }
    }

    ValidationOutcome::ok()
}

/// Checks that no command-scoped argument anywhere in the tree shares a name
/// or non-empty abbreviation with a global argument.
pub fn validate_global_arguments_do_not_overlap_recursive(
    commands: &[CommandDefinition],
    global_arguments: &[ArgumentSpec],
) -> ValidationOutcome {
    let global_names: HashSet<String> = global_arguments
        .iter()
        .map(|argument| argument.name.to_ascii_lowercase())
        .collect();
    let global_abbreviations: HashSet<String> = global_arguments
        .iter()
        .filter(|argument| !argument.abbreviation.is_empty())
        .map(|argument| argument.abbreviation.to_ascii_lowercase())
        .collect();

    overlap_walk(commands, &global_names, &global_abbreviations)
}

fn overlap_walk(
    commands: &[CommandDefinition],
    global_names: &HashSet<String>,
    global_abbreviations: &HashSet<String>,
) -> ValidationOutcome {
    for command in commands {
        for argument in &command.arguments {
            if global_names.contains(&argument.name.to_ascii_lowercase()) {
                return ValidationOutcome::error(format!(
                    "argument name '{}' is declared on command with verb '{}' and as a global argument",
                    argument.name, command.verb
                ));
            }
            if !argument.abbreviation.is_empty()
                && global_abbreviations.contains(&argument.abbreviation.to_ascii_lowercase())
            {
                return ValidationOutcome::error(format!(
                    "argument abbreviation '{}' is declared on command with verb '{}' and as a global argument",
                    argument.abbreviation, command.verb
                ));
            }
        }

        let outcome = overlap_walk(&command.sub_commands, global_names, global_abbreviations);
        if !outcome.is_valid() {
            return outcome;
        }
    }

    ValidationOutcome::ok()
}

fn validate_argument_duplications(command: &CommandDefinition) -> ValidationOutcome {
    let mut names = HashSet::new();
    for argument in &command.arguments {
        if !names.insert(argument.name.to_ascii_lowercase()) {
            return ValidationOutcome::error(format!(
                "argument name '{}' is not unique on command with verb '{}'",
                argument.name, command.verb
            ));
        }
    }

    let mut abbreviations = HashSet::new();
    for argument in &command.arguments {
        if argument.abbreviation.is_empty() {
            continue;
        }
        if !abbreviations.insert(argument.abbreviation.to_ascii_lowercase()) {
            return ValidationOutcome::error(format!(
                "argument abbreviation '{}' is not unique on command with verb '{}'",
                argument.abbreviation, command.verb
            ));
        }
    }

    ValidationOutcome::ok()
}

/// Runs both input checks against the resolved target command: required
/// arguments first, then per-value validators.
pub async fn validate_input_values(
    command: &CommandDefinition,
    bag: &ArgumentBag,
) -> ValidationOutcome {
    let outcome = validate_required_arguments_set(command, bag);
    if !outcome.is_valid() {
        return outcome;
    }

    validate_argument_values(command, bag).await
}

/// Checks that every required argument of the target command has a resolved
/// value in the bag. The first missing argument is reported.
pub fn validate_required_arguments_set(
    command: &CommandDefinition,
    bag: &ArgumentBag,
) -> ValidationOutcome {
    for argument in &command.arguments {
        if argument.is_required && !bag.contains_name(&argument.name) {
            return ValidationOutcome::error(format!(
                "required argument '{}' is missing",
                argument.name
            ));
        }
    }

    ValidationOutcome::ok()
}

/// Awaits the validator of every argument present in the bag, strictly
/// sequentially in declaration order. The first rejection is reported with
/// the argument name and the rejected value.
pub async fn validate_argument_values(
    command: &CommandDefinition,
    bag: &ArgumentBag,
) -> ValidationOutcome {
    for argument in &command.arguments {
        let Some(resolved) = bag.get_by_name(&argument.name) else {
            continue;
        };
        let Some(validator) = &argument.validator else {
            continue;
        };

        let outcome = validator(resolved.value.as_deref()).await;
        if let ValidationOutcome::Invalid(message) = outcome {
            return ValidationOutcome::error(format!(
                "value '{}' for argument '{}' is invalid: {}",
                resolved.value.as_deref().unwrap_or_default(),
                argument.name,
                message
            ));
        }
    }

    ValidationOutcome::ok()
}
