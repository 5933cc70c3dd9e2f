//! Default help rendering for a matched command path.

use crate::types::{ArgumentSpec, CommandDefinition};

const TAB: &str = "    ";

/// Renders the built-in help text for a command path, root first.
///
/// Shows the full verb path, the deepest command's arguments, and the global
/// argument list. Sections without content are omitted.
///
/// # Examples
///
/// ```
/// use console_args::{ArgumentSpec, CommandDefinition, render_default_help};
///
/// let create = CommandDefinition {
///     verb: "create".into(),
///     description: "Create a resource group".into(),
///     arguments: vec![ArgumentSpec::required(("name", "n"), "Name of the group")],
///     ..Default::default()
/// };
/// let help = render_default_help(&[&create], &[]);
///
/// assert!(help.contains("create : Create a resource group"));
/// assert!(help.contains("--name -n [Required] : Name of the group"));
/// ```
pub fn render_default_help(
    hierarchy: &[&CommandDefinition],
    global_arguments: &[ArgumentSpec],
) -> String {
    let mut output = String::from("\n");

    if let Some(command) = hierarchy.last() {
        output.push_str("Command\n");
        let path = hierarchy
            .iter()
            .map(|command| command.verb.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(TAB);
        output.push_str(&path);
        if !command.description.is_empty() {
            output.push_str(" : ");
            output.push_str(&command.description);
        }
        output.push('\n');

        if !command.arguments.is_empty() {
            output.push_str("Arguments\n");
            for argument in &command.arguments {
                output.push_str(&render_argument(argument));
            }
        }
    }

    if !global_arguments.is_empty() {
        output.push_str("Global Arguments\n");
        for argument in global_arguments {
            output.push_str(&render_argument(argument));
        }
    }

    output
}

fn render_argument(argument: &ArgumentSpec) -> String {
    let mut row = format!("{TAB}--{}", argument.name);
    if !argument.abbreviation.is_empty() {
        row.push_str(" -");
        row.push_str(&argument.abbreviation);
    }
    if argument.is_required {
        row.push_str(" [Required]");
    }
    if !argument.description.is_empty() {
        row.push_str(" : ");
        row.push_str(&argument.description);
    }
    row.push('\n');
    row
}
