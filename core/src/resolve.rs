//! Command resolution: hierarchy extraction and flag/value binding.
//!
//! Resolution walks the raw token list twice. The first pass follows verb
//! tokens down the command tree to the deepest match; the second binds flag
//! tokens to argument definitions, producing the [`ArgumentBag`] handed to
//! the handler.

use tracing::debug;

use crate::bag::ArgumentBag;
use crate::error::{Error, Result};
use crate::types::{
    ArgumentSpec, CommandDefinition, DefaultHelp, ResolvedArgumentValue, SWITCH_VALUE,
    find_by_abbreviation, find_by_name,
};

/// A flag token stripped of its dash prefix.
enum FlagKey<'a> {
    /// Long form, from a `--` prefix.
    Name(&'a str),
    /// Abbreviation, from a single `-` prefix.
    Abbreviation(&'a str),
}

fn classify(token: &str) -> Option<FlagKey<'_>> {
    if let Some(name) = token.strip_prefix("--") {
        Some(FlagKey::Name(name))
    } else {
        token.strip_prefix('-').map(FlagKey::Abbreviation)
    }
}

fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Walks verb tokens left to right and returns the matched command path,
/// root first.
///
/// A flag token skips itself and its following token, so a flag's value is
/// never mistaken for a verb. A non-flag token that matches no candidate
/// verb (ASCII-case-insensitively) fails with [`Error::CommandNotFound`].
/// An empty result means no verb was given at all.
///
/// # Examples
///
/// ```
/// use console_args::{CommandArgsBuilder, extract_command_hierarchy};
///
/// let mut builder = CommandArgsBuilder::new();
/// builder
///     .add_command()
///     .set_verb("group")?
///     .add_sub_command()?
///     .set_verb("create")?
///     .done()?;
/// let config = builder.build();
///
/// let args = vec!["group".to_string(), "create".to_string(), "--name".to_string(), "test".to_string()];
/// let hierarchy = extract_command_hierarchy(&config.commands, &args)?;
/// assert_eq!(hierarchy.len(), 2);
/// assert_eq!(hierarchy[1].verb, "create");
/// # Ok::<(), console_args::Error>(())
/// ```
pub fn extract_command_hierarchy<'a>(
    commands: &'a [CommandDefinition],
    args: &[String],
) -> Result<Vec<&'a CommandDefinition>> {
    let mut hierarchy = Vec::new();
    let mut candidates = commands;

    let mut index = 0;
    while index < args.len() {
        let token = &args[index];
        if is_flag(token) {
            // The token after a flag is its value, never a verb.
            index += 2;
            continue;
        }

        let command = candidates
            .iter()
            .find(|candidate| {
                !candidate.verb.trim().is_empty() && candidate.verb.eq_ignore_ascii_case(token)
            })
            .ok_or_else(|| Error::CommandNotFound { verb: token.clone() })?;

        debug!(verb = %command.verb, "matched verb");
        candidates = &command.sub_commands;
        hierarchy.push(command);
        index += 1;
    }

    Ok(hierarchy)
}

/// Binds flag tokens to argument definitions and returns the resolved bag.
///
/// Lookup precedence per flag key: the enabled default-help keys (recording
/// a synthetic help marker), then the global list, then the target command's
/// own arguments. Keys matching nothing are dropped without error to
/// tolerate pass-through flags.
///
/// A matched switch definition, or any matched flag whose next token is
/// itself a flag or absent, records the [`SWITCH_VALUE`] marker without
/// consuming a token; otherwise the next token is consumed as the value.
pub fn extract_argument_values(
    global_arguments: &[ArgumentSpec],
    command: &CommandDefinition,
    args: &[String],
    default_help: &DefaultHelp,
) -> Result<ArgumentBag> {
    let mut bag = ArgumentBag::new();

    let mut index = 0;
    while index < args.len() {
        let token = &args[index];
        index += 1;
        let Some(key) = classify(token) else {
            continue;
        };

        if default_help.is_enabled && matches_help(default_help, &key) {
            bag.add(ResolvedArgumentValue::new(
                &default_help.name,
                &default_help.abbreviation,
                Some(SWITCH_VALUE),
            ))?;
            continue;
        }

        let Some(argument) = lookup(global_arguments, command, &key) else {
            debug!(token = %token, "ignoring unrecognized flag");
            continue;
        };

        let next_is_value = index < args.len() && !is_flag(&args[index]);
        let value = if argument.is_switch || !next_is_value {
            SWITCH_VALUE.to_string()
        } else {
            let value = args[index].clone();
            index += 1;
            value
        };

        debug!(name = %argument.name, value = %value, "bound argument");
        bag.add(ResolvedArgumentValue::new(
            &argument.name,
            &argument.abbreviation,
            Some(&value),
        ))?;
    }

    Ok(bag)
}

fn matches_help(default_help: &DefaultHelp, key: &FlagKey<'_>) -> bool {
    match key {
        FlagKey::Name(name) => default_help.matches_name(name),
        FlagKey::Abbreviation(abbreviation) => default_help.matches_abbreviation(abbreviation),
    }
}

fn lookup<'a>(
    global_arguments: &'a [ArgumentSpec],
    command: &'a CommandDefinition,
    key: &FlagKey<'_>,
) -> Option<&'a ArgumentSpec> {
    match key {
        FlagKey::Name(name) => {
            find_by_name(global_arguments, name).or_else(|| find_by_name(&command.arguments, name))
        }
        FlagKey::Abbreviation(abbreviation) => find_by_abbreviation(global_arguments, abbreviation)
            .or_else(|| find_by_abbreviation(&command.arguments, abbreviation)),
    }
}
