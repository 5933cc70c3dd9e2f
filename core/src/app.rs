//! Top-level invocation flow: validate, resolve, then help or dispatch.

use tracing::debug;

use crate::error::{Error, Result};
use crate::handler::HandlerRegistry;
use crate::help::render_default_help;
use crate::resolve::{extract_argument_values, extract_command_hierarchy};
use crate::types::{CommandArgsConfig, CommandDefinition, HandlerBinding};
use crate::validate::{validate_input_values, validate_user_configuration};

/// Runs one full invocation against raw argument tokens.
///
/// The flow is fixed: structural validation of the configuration, hierarchy
/// extraction, value binding, input validation, then either help rendering
/// or handler dispatch. A configuration with no commands and no default
/// handler returns `Ok(())` without touching the input.
///
/// Dispatch resolves in order: the command's inline handler, its registered
/// key (an unregistered key falls through), the default inline handler, the
/// default registered key. When nothing resolves the invocation fails with
/// [`Error::HandlerNotFound`].
///
/// # Examples
///
/// ```
/// use console_args::{CommandArgsBuilder, HandlerRegistry, run};
///
/// # async fn invoke() -> console_args::Result<()> {
/// let mut builder = CommandArgsBuilder::new();
/// builder
///     .add_command()
///     .set_verb("greet")?
///     .add_optional_argument(("name", "n"), "Who to greet")?
///     .set_inline_handler(|bag| async move {
///         println!("hello, {}", bag.value_by_name("name").unwrap_or("world"));
///         Ok(())
///     })?;
/// let config = builder.build();
///
/// let args = vec!["greet".to_string(), "--name".to_string(), "you".to_string()];
/// run(&config, &HandlerRegistry::new(), &args).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run(
    config: &CommandArgsConfig,
    registry: &HandlerRegistry,
    args: &[String],
) -> Result<()> {
    if config.commands.is_empty() && config.default_handler.is_none() {
        debug!("nothing configured, skipping invocation");
        return Ok(());
    }

    let outcome = validate_user_configuration(config);
    if let Some(message) = outcome.message() {
        return Err(Error::Schema(message.to_string()));
    }

    let mut hierarchy = extract_command_hierarchy(&config.commands, args)?;
    let fallback = CommandDefinition::default();
    if hierarchy.is_empty() {
        // No verb given; resolve against an empty command so global flags
        // and the default handler still apply.
        hierarchy.push(&fallback);
    }
    let command = hierarchy[hierarchy.len() - 1];

    let bag = extract_argument_values(&config.global_arguments, command, args, &config.default_help)?;

    let outcome = validate_input_values(command, &bag).await;
    if let Some(message) = outcome.message() {
        return Err(Error::InvalidInput(message.to_string()));
    }

    let help = &config.default_help;
    if help.is_enabled
        && bag
            .value_by_name_or_abbreviation(&help.name, &help.abbreviation)
            .is_some()
    {
        println!(
            "{}",
            render_default_help(&hierarchy, &config.global_arguments)
        );
        return Ok(());
    }

    dispatch(config, registry, command, bag).await
}

async fn dispatch(
    config: &CommandArgsConfig,
    registry: &HandlerRegistry,
    command: &CommandDefinition,
    bag: crate::ArgumentBag,
) -> Result<()> {
    let verb = command.verb.clone();
    let wrap = |source| Error::Handler {
        verb: verb.clone(),
        source,
    };

    match &command.handler {
        Some(HandlerBinding::Inline(handler)) => {
            debug!(verb = %command.verb, "dispatching inline handler");
            return handler(bag).await.map_err(wrap);
        }
        Some(HandlerBinding::Registered(key)) => {
            if let Some(handler) = registry.get(key) {
                debug!(verb = %command.verb, key = %key, "dispatching registered handler");
                return handler.handle(&bag).await.map_err(wrap);
            }
            debug!(key = %key, "no handler registered under key, trying default handler");
        }
        None => {}
    }

    match &config.default_handler {
        Some(HandlerBinding::Inline(handler)) => {
            debug!(verb = %command.verb, "dispatching default inline handler");
            handler(bag).await.map_err(wrap)
        }
        Some(HandlerBinding::Registered(key)) => {
            let handler = registry.get(key).ok_or_else(|| Error::HandlerNotFound {
                verb: command.verb.clone(),
            })?;
            debug!(verb = %command.verb, key = %key, "dispatching default registered handler");
            handler.handle(&bag).await.map_err(wrap)
        }
        None => Err(Error::HandlerNotFound {
            verb: command.verb.clone(),
        }),
    }
}
