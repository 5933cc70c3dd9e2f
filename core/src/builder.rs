//! Fluent builder for assembling a [`CommandArgsConfig`].
//!
//! The builder keeps an explicit stack of open command scopes. `add_command`
//! opens a fresh top-level scope, `add_sub_command` nests a scope under the
//! current one, and `done` closes the current scope back into its parent.
//! `build` materializes any scopes still open, so finishing a chain without
//! walking back up is fine.

use std::future::Future;
use std::mem;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{
    ArgumentKeys, ArgumentSpec, BoxError, CommandArgsConfig, CommandDefinition, DefaultHelp,
    HandlerBinding, ValidatorFn,
};

/// Builds a [`CommandArgsConfig`] through a chained, scope-aware API.
///
/// Scope-dependent methods return `Result` so misuse, like `done()` at the
/// root level or an empty verb, fails at configuration time instead of
/// surfacing during resolution.
///
/// # Examples
///
/// ```
/// use console_args::CommandArgsBuilder;
///
/// let mut builder = CommandArgsBuilder::new();
/// builder
///     .add_global_switch_argument(("debug", "d"), "Increase logging verbosity")
///     .add_command()
///     .set_verb("group")?
///     .set_description("Manage resource groups")?
///     .add_sub_command()?
///     .set_verb("create")?
///     .add_required_argument(("name", "n"), "Name of the resource group")?
///     .set_handler("group.create")?
///     .done()?;
/// let config = builder.build();
///
/// assert_eq!(config.commands.len(), 1);
/// assert_eq!(config.commands[0].sub_commands[0].verb, "create");
/// # Ok::<(), console_args::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CommandArgsBuilder {
    commands: Vec<CommandDefinition>,
    scopes: Vec<CommandDefinition>,
    global_arguments: Vec<ArgumentSpec>,
    default_help: DefaultHelp,
    default_handler: Option<HandlerBinding>,
}

impl CommandArgsBuilder {
    /// Creates an empty builder with the default help configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new top-level command scope.
    ///
    /// Any scopes still open from a previous chain are closed first, so two
    /// consecutive `add_command` calls produce two sibling commands.
    pub fn add_command(&mut self) -> &mut Self {
        self.flush_open_scopes();
        self.scopes.push(CommandDefinition::default());
        self
    }

    /// Opens a sub-command scope nested under the current one.
    pub fn add_sub_command(&mut self) -> Result<&mut Self> {
        if self.scopes.is_empty() {
            return Err(Error::InvalidConfiguration(
                "no open command scope to nest a sub command under".to_string(),
            ));
        }
        self.scopes.push(CommandDefinition::default());
        Ok(self)
    }

    /// Closes the current scope, attaching it to its parent.
    pub fn done(&mut self) -> Result<&mut Self> {
        if self.scopes.len() < 2 {
            return Err(Error::InvalidConfiguration(
                "no parent command scope found, you are probably on root level already".to_string(),
            ));
        }

        let closed = self
            .scopes
            .pop()
            .ok_or_else(|| Error::InvalidConfiguration("no open command scope".to_string()))?;
        self.current_scope()?.sub_commands.push(closed);
        Ok(self)
    }

    /// Sets the verb of the current command scope. The verb must not be
    /// empty or whitespace-only.
    pub fn set_verb(&mut self, verb: &str) -> Result<&mut Self> {
        if verb.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "command verb must not be empty".to_string(),
            ));
        }
        self.current_scope()?.verb = verb.to_string();
        Ok(self)
    }

    /// Sets the description of the current command scope. The description
    /// must not be empty or whitespace-only.
    pub fn set_description(&mut self, description: &str) -> Result<&mut Self> {
        if description.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "command description must not be empty".to_string(),
            ));
        }
        self.current_scope()?.description = description.to_string();
        Ok(self)
    }

    /// Adds a fully specified argument to the current command scope.
    ///
    /// A validator attached to a switch definition is discarded.
    pub fn add_argument(&mut self, mut argument: ArgumentSpec) -> Result<&mut Self> {
        if argument.is_switch {
            argument.validator = None;
        }
        self.current_scope()?.arguments.push(argument);
        Ok(self)
    }

    /// Adds a required value argument to the current command scope.
    pub fn add_required_argument(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
    ) -> Result<&mut Self> {
        self.add_argument(ArgumentSpec::required(keys, description))
    }

    /// Adds a required value argument with a validator.
    pub fn add_required_argument_with(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
        validator: ValidatorFn,
    ) -> Result<&mut Self> {
        self.add_argument(ArgumentSpec::required(keys, description).with_validator(validator))
    }

    /// Adds an optional value argument to the current command scope.
    pub fn add_optional_argument(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
    ) -> Result<&mut Self> {
        self.add_argument(ArgumentSpec::optional(keys, description))
    }

    /// Adds an optional value argument with a validator.
    pub fn add_optional_argument_with(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
        validator: ValidatorFn,
    ) -> Result<&mut Self> {
        self.add_argument(ArgumentSpec::optional(keys, description).with_validator(validator))
    }

    /// Adds a switch argument to the current command scope.
    pub fn add_switch_argument(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
    ) -> Result<&mut Self> {
        self.add_argument(ArgumentSpec::switch(keys, description))
    }

    /// Binds the current command scope to a registered handler key.
    ///
    /// Replaces any handler previously bound to this scope.
    pub fn set_handler(&mut self, key: &str) -> Result<&mut Self> {
        self.current_scope()?.handler = Some(HandlerBinding::Registered(key.to_string()));
        Ok(self)
    }

    /// Binds the current command scope to an inline async handler.
    ///
    /// Replaces any handler previously bound to this scope.
    pub fn set_inline_handler<F, Fut>(&mut self, handler: F) -> Result<&mut Self>
    where
        F: Fn(crate::ArgumentBag) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + Send + 'static,
    {
        self.current_scope()?.handler = Some(HandlerBinding::Inline(Arc::new(move |bag| {
            Box::pin(handler(bag))
        })));
        Ok(self)
    }

    /// Adds a fully specified global argument. Globals apply to every
    /// command in the tree.
    pub fn add_global_argument(&mut self, mut argument: ArgumentSpec) -> &mut Self {
        if argument.is_switch {
            argument.validator = None;
        }
        self.global_arguments.push(argument);
        self
    }

    /// Adds a global switch argument.
    pub fn add_global_switch_argument(
        &mut self,
        keys: impl Into<ArgumentKeys>,
        description: &str,
    ) -> &mut Self {
        self.add_global_argument(ArgumentSpec::switch(keys, description))
    }

    /// Overrides the built-in help argument. The name must not be empty or
    /// whitespace-only; the abbreviation may be.
    pub fn add_default_help(
        &mut self,
        is_enabled: bool,
        name: &str,
        abbreviation: &str,
    ) -> Result<&mut Self> {
        if name.trim().is_empty() {
            return Err(Error::InvalidConfiguration(
                "default help name must not be empty".to_string(),
            ));
        }
        self.default_help = DefaultHelp {
            is_enabled,
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        };
        Ok(self)
    }

    /// Sets the registered handler key used when a matched command has no
    /// handler of its own.
    pub fn set_default_handler(&mut self, key: &str) -> &mut Self {
        self.default_handler = Some(HandlerBinding::Registered(key.to_string()));
        self
    }

    /// Sets an inline fallback handler used when a matched command has no
    /// handler of its own.
    pub fn set_default_inline_handler<F, Fut>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(crate::ArgumentBag) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), BoxError>> + Send + 'static,
    {
        self.default_handler = Some(HandlerBinding::Inline(Arc::new(move |bag| {
            Box::pin(handler(bag))
        })));
        self
    }

    /// Materializes the configuration, closing any scopes still open.
    ///
    /// The builder is left empty and reusable afterwards.
    pub fn build(&mut self) -> CommandArgsConfig {
        self.flush_open_scopes();
        CommandArgsConfig {
            commands: mem::take(&mut self.commands),
            global_arguments: mem::take(&mut self.global_arguments),
            default_help: mem::replace(&mut self.default_help, DefaultHelp::default()),
            default_handler: self.default_handler.take(),
        }
    }

    fn current_scope(&mut self) -> Result<&mut CommandDefinition> {
        self.scopes.last_mut().ok_or_else(|| {
            Error::InvalidConfiguration(
                "no open command scope, call add_command first".to_string(),
            )
        })
    }

    fn flush_open_scopes(&mut self) {
        while let Some(closed) = self.scopes.pop() {
            match self.scopes.last_mut() {
                Some(parent) => parent.sub_commands.push(closed),
                None => self.commands.push(closed),
            }
        }
    }
}
