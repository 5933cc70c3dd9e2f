//! Sample application showing the full configuration and dispatch surface:
//! nested verbs, global arguments, validators, a registered handler, an
//! inline handler, and the built-in help.
//!
//! Try it with:
//!
//! ```text
//! console-args-demo group create --location westeurope -n test --debug
//! console-args-demo group delete -n test --yes
//! console-args-demo group create -?
//! ```

use async_trait::async_trait;
use console_args::{
    ArgumentBag, BoxError, CommandArgsBuilder, CommandArgsConfig, CommandHandler, HandlerRegistry,
    validators,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct GroupCreateHandler;

#[async_trait]
impl CommandHandler for GroupCreateHandler {
    async fn handle(&self, arguments: &ArgumentBag) -> Result<(), BoxError> {
        let name = arguments.value_by_name("name").unwrap_or_default();
        let location = arguments.value_by_name("location").unwrap_or_default();
        info!(name, location, "creating resource group");
        println!("created resource group '{name}' in '{location}'");
        for value in arguments.list() {
            println!("  {value}");
        }
        Ok(())
    }
}

fn configure() -> console_args::Result<CommandArgsConfig> {
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_global_argument(console_args::ArgumentSpec::optional(
            ("subscription", "s"),
            "Name or ID of the subscription",
        ))
        .add_global_argument(console_args::ArgumentSpec::optional(
            ("output", "o"),
            "Output format",
        ))
        .add_global_switch_argument(("debug", "d"), "Increase logging verbosity")
        .add_default_help(true, "help", "?")?
        .set_default_inline_handler(|_bag| async {
            println!("no command given, try --help");
            Ok(())
        })
        .add_command()
        .set_verb("group")?
        .set_description("Manage resource groups")?
        .add_sub_command()?
        .set_verb("create")?
        .set_description("Create a new resource group")?
        .add_required_argument(("location", "l"), "Location of the resource group")?
        .add_required_argument(("name", "n"), "Name of the resource group")?
        .add_optional_argument("managed-by", "ID of the resource managing this group")?
        .add_optional_argument("tags", "Space-separated tags")?
        .set_handler("group.create")?
        .done()?
        .add_sub_command()?
        .set_verb("delete")?
        .set_description("Delete a resource group")?
        .add_required_argument(("name", "n"), "Name of the resource group")?
        .add_optional_argument_with(
            ("force-deletion-types", "f"),
            "Resource types you want to force delete",
            validators::one_of(&[
                "Microsoft.Compute/virtualMachineScaleSets",
                "Microsoft.Compute/virtualMachines",
            ]),
        )?
        .add_switch_argument("no-wait", "Do not wait for the operation to finish")?
        .add_switch_argument(("yes", "y"), "Do not prompt for confirmation")?
        .set_inline_handler(|bag| async move {
            let name = bag.value_by_name("name").unwrap_or_default().to_string();
            println!("deleted resource group '{name}'");
            Ok(())
        })?
        .done()?;
    Ok(builder.build())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = configure();
    let result = match result {
        Ok(config) => {
            let mut registry = HandlerRegistry::new();
            registry.register("group.create", GroupCreateHandler);
            console_args::run(&config, &registry, &args).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
