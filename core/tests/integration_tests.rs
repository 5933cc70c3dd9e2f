use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use console_args::{
    ArgumentBag, BoxError, CommandArgsBuilder, CommandArgsConfig, CommandHandler, Error,
    HandlerRegistry, validators,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn to_args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}

#[derive(Clone, Default)]
struct CapturingHandler {
    calls: Arc<AtomicUsize>,
    last_bag: Arc<Mutex<Option<ArgumentBag>>>,
}

impl CapturingHandler {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_bag(&self) -> Option<ArgumentBag> {
        self.last_bag.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler for CapturingHandler {
    async fn handle(&self, arguments: &ArgumentBag) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bag.lock().unwrap() = Some(arguments.clone());
        Ok(())
    }
}

/// An `az group`-style configuration: global flags, nested verbs, required
/// and optional arguments, a choice-validated value, and switches.
fn group_config() -> CommandArgsConfig {
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_global_argument(console_args::ArgumentSpec::optional(
            ("output", "o"),
            "Output format",
        ))
        .add_global_switch_argument(("debug", "d"), "Increase logging verbosity")
        .add_command()
        .set_verb("group")
        .unwrap()
        .set_description("Manage resource groups")
        .unwrap()
        .add_sub_command()
        .unwrap()
        .set_verb("create")
        .unwrap()
        .add_required_argument(("location", "l"), "Location of the resource group")
        .unwrap()
        .add_required_argument(("name", "n"), "Name of the resource group")
        .unwrap()
        .add_optional_argument("managed-by", "Managing resource id")
        .unwrap()
        .set_handler("group.create")
        .unwrap()
        .done()
        .unwrap()
        .add_sub_command()
        .unwrap()
        .set_verb("delete")
        .unwrap()
        .add_required_argument(("name", "n"), "Name of the resource group")
        .unwrap()
        .add_optional_argument_with(
            ("force-deletion-types", "f"),
            "Resource types to force delete",
            validators::one_of(&[
                "Microsoft.Compute/virtualMachineScaleSets",
                "Microsoft.Compute/virtualMachines",
            ]),
        )
        .unwrap()
        .add_switch_argument(("yes", "y"), "Do not prompt for confirmation")
        .unwrap()
        .set_handler("group.delete")
        .unwrap()
        .done()
        .unwrap();
    builder.build()
}

// ---------------------------------------------------------------------------
// Full invocation flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_nested_verbs_dispatch_to_registered_handler() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.create", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&[
            "group",
            "create",
            "--location",
            "westeurope",
            "-n",
            "test",
            "--debug",
        ]),
    )
    .await
    .unwrap();

    assert_eq!(handler.calls(), 1);
    let bag = handler.last_bag().unwrap();
    assert_eq!(bag.value_by_name("location"), Some("westeurope"));
    assert_eq!(bag.value_by_name("name"), Some("test"));
    assert_eq!(bag.value_by_name("debug"), Some("true"));
}

#[tokio::test]
async fn test_verbs_and_flags_match_case_insensitively() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.create", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&["GROUP", "Create", "--Location", "westeurope", "-N", "test"]),
    )
    .await
    .unwrap();

    assert_eq!(handler.calls(), 1);
    let bag = handler.last_bag().unwrap();
    assert_eq!(bag.value_by_name("location"), Some("westeurope"));
    assert_eq!(bag.value_by_name("name"), Some("test"));
}

#[tokio::test]
async fn test_switch_records_marker_without_consuming_values() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.delete", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&["group", "delete", "--yes", "-n", "test"]),
    )
    .await
    .unwrap();

    let bag = handler.last_bag().unwrap();
    assert_eq!(bag.value_by_name("yes"), Some("true"));
    assert_eq!(bag.value_by_name("name"), Some("test"));
}

#[tokio::test]
async fn test_unknown_flags_are_ignored() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.delete", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&["group", "delete", "-n", "test", "--verbose", "high"]),
    )
    .await
    .unwrap();

    let bag = handler.last_bag().unwrap();
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.value_by_name("name"), Some("test"));
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_required_argument_is_rejected() {
    let mut registry = HandlerRegistry::new();
    registry.register("group.create", CapturingHandler::default());

    let err = console_args::run(
        &group_config(),
        &registry,
        &to_args(&["group", "create", "--location", "westeurope"]),
    )
    .await
    .unwrap_err();

    match err {
        Error::InvalidInput(message) => assert!(message.contains("name")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_choice_validator_rejects_unlisted_value() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.delete", handler.clone());

    let err = console_args::run(
        &group_config(),
        &registry,
        &to_args(&[
            "group",
            "delete",
            "-n",
            "test",
            "-f",
            "Microsoft.Storage/storageAccounts",
        ]),
    )
    .await
    .unwrap_err();

    match err {
        Error::InvalidInput(message) => {
            assert!(message.contains("force-deletion-types"));
            assert!(message.contains("Microsoft.Storage/storageAccounts"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_choice_validator_accepts_listed_value() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.delete", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&[
            "group",
            "delete",
            "-n",
            "test",
            "-f",
            "Microsoft.Compute/virtualMachines",
        ]),
    )
    .await
    .unwrap();

    assert_eq!(handler.calls(), 1);
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_help_suppresses_dispatch() {
    let handler = CapturingHandler::default();
    let mut registry = HandlerRegistry::new();
    registry.register("group.delete", handler.clone());

    console_args::run(
        &group_config(),
        &registry,
        &to_args(&["group", "delete", "-n", "test", "-?"]),
    )
    .await
    .unwrap();

    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_custom_help_keys() {
    let handler = CapturingHandler::default();
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_command()
        .set_verb("status")
        .unwrap()
        .set_handler("status")
        .unwrap()
        .add_default_help(true, "assist", "a")
        .unwrap();
    let config = builder.build();

    let mut registry = HandlerRegistry::new();
    registry.register("status", handler.clone());

    console_args::run(&config, &registry, &to_args(&["status", "--assist"]))
        .await
        .unwrap();
    assert_eq!(handler.calls(), 0);

    // The stock keys are replaced, so --help now dispatches normally.
    console_args::run(&config, &registry, &to_args(&["status", "--help"]))
        .await
        .unwrap();
    assert_eq!(handler.calls(), 1);
}

// ---------------------------------------------------------------------------
// Handler fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_default_handler_covers_unbound_commands() {
    let fallback = CapturingHandler::default();
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_command()
        .set_verb("status")
        .unwrap();
    builder.set_default_handler("fallback");
    let config = builder.build();

    let mut registry = HandlerRegistry::new();
    registry.register("fallback", fallback.clone());

    console_args::run(&config, &registry, &to_args(&["status"]))
        .await
        .unwrap();
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_missing_registration_surfaces_handler_not_found() {
    let err = console_args::run(
        &group_config(),
        &HandlerRegistry::new(),
        &to_args(&["group", "create", "-l", "westeurope", "-n", "test"]),
    )
    .await
    .unwrap_err();

    match err {
        Error::HandlerNotFound { verb } => assert_eq!(verb, "create"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_handler_failure_is_reported_with_verb() {
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_command()
        .set_verb("deploy")
        .unwrap()
        .set_inline_handler(|_bag| async { Err("deployment target unreachable".into()) })
        .unwrap();
    let config = builder.build();

    let err = console_args::run(&config, &HandlerRegistry::new(), &to_args(&["deploy"]))
        .await
        .unwrap_err();

    match err {
        Error::Handler { verb, source } => {
            assert_eq!(verb, "deploy");
            assert_eq!(source.to_string(), "deployment target unreachable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Schema validation at invocation time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_global_overlap_rejected_at_invocation() {
    let mut builder = CommandArgsBuilder::new();
    builder
        .add_global_switch_argument(("debug", "d"), "")
        .add_command()
        .set_verb("create")
        .unwrap()
        .add_optional_argument(("debug", "x"), "")
        .unwrap()
        .set_inline_handler(|_bag| async { Ok(()) })
        .unwrap();
    let config = builder.build();

    let err = console_args::run(&config, &HandlerRegistry::new(), &to_args(&["create"]))
        .await
        .unwrap_err();
    match err {
        Error::Schema(message) => assert!(message.contains("debug")),
        other => panic!("unexpected error: {other:?}"),
    }
}
