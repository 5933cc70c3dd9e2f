//! Declarative command-line argument parsing and async command dispatch.
//!
//! Applications describe a tree of verbs (`group create`, `group delete`),
//! each with required, optional, and switch arguments, plus a list of global
//! arguments that apply everywhere. One call to [`run`] validates the
//! configuration, resolves the typed command path and argument values from
//! the raw tokens, validates the input, and dispatches to an async handler.
//!
//! Handlers are bound either inline as closures or through a
//! [`HandlerRegistry`] keyed by opaque strings, keeping command schemas
//! declarative and handler construction at the composition root.
//!
//! # Examples
//!
//! ```
//! use console_args::{CommandArgsBuilder, HandlerRegistry, validators};
//!
//! let mut builder = CommandArgsBuilder::new();
//! builder
//!     .add_global_switch_argument(("debug", "d"), "Increase logging verbosity")
//!     .add_command()
//!     .set_verb("group")?
//!     .set_description("Manage resource groups")?
//!     .add_sub_command()?
//!     .set_verb("create")?
//!     .add_required_argument(("name", "n"), "Name of the resource group")?
//!     .add_optional_argument_with(("retries", "r"), "Retry count", validators::unsigned())?
//!     .set_handler("group.create")?
//!     .done()?;
//! let config = builder.build();
//!
//! assert_eq!(config.commands[0].sub_commands[0].verb, "create");
//! # Ok::<(), console_args::Error>(())
//! ```

mod app;
mod bag;
mod builder;
mod error;
mod handler;
mod help;
mod resolve;
mod types;
mod validate;
pub mod validators;

pub use app::run;
pub use bag::ArgumentBag;
pub use builder::CommandArgsBuilder;
pub use error::{Error, Result};
pub use handler::{CommandHandler, HandlerRegistry};
pub use help::render_default_help;
pub use resolve::{extract_argument_values, extract_command_hierarchy};
pub use types::{
    ArgumentKeys, ArgumentSpec, BoxError, CommandArgsConfig, CommandDefinition, DefaultHelp,
    HandlerBinding, InlineHandlerFn, ResolvedArgumentValue, SWITCH_VALUE, ValidatorFn,
};
pub use validate::{
    ValidationOutcome, validate_argument_values, validate_duplications_recursive,
    validate_global_arguments_do_not_overlap_recursive, validate_global_arguments_unique,
    validate_input_values, validate_required_arguments_set, validate_user_configuration,
};
