//! Built-in async value validators for common argument shapes.
//!
//! Each function returns a [`ValidatorFn`] ready to attach via
//! [`ArgumentSpec::with_validator`](crate::ArgumentSpec::with_validator).
//!
//! # Examples
//!
//! ```
//! use console_args::{ArgumentSpec, validators};
//!
//! let port = ArgumentSpec::required(("port", "p"), "Listen port")
//!     .with_validator(validators::unsigned());
//! assert!(port.validator.is_some());
//! ```

use std::str::FromStr;
use std::sync::Arc;

use crate::types::ValidatorFn;
use crate::validate::ValidationOutcome;

fn parseable<T>(type_name: &'static str) -> ValidatorFn
where
    T: FromStr + Send + 'static,
    <T as FromStr>::Err: Send,
{
    Arc::new(move |value| {
        let value = value.map(str::to_owned);
        Box::pin(async move {
            match value.as_deref().map(str::parse::<T>) {
                Some(Ok(_)) => ValidationOutcome::ok(),
                _ => ValidationOutcome::error(format!(
                    "value '{}' is not a valid {type_name}",
                    value.as_deref().unwrap_or_default()
                )),
            }
        })
    })
}

/// Accepts `true` or `false`.
pub fn boolean() -> ValidatorFn {
    parseable::<bool>("boolean")
}

/// Accepts any signed 64-bit integer.
pub fn integer() -> ValidatorFn {
    parseable::<i64>("integer")
}

/// Accepts any unsigned 64-bit integer.
pub fn unsigned() -> ValidatorFn {
    parseable::<u64>("unsigned integer")
}

/// Accepts any 64-bit float.
pub fn float() -> ValidatorFn {
    parseable::<f64>("float")
}

/// Accepts only values from a fixed choice list (exact match).
pub fn one_of(choices: &[&str]) -> ValidatorFn {
    let choices: Vec<String> = choices.iter().map(|choice| choice.to_string()).collect();
    Arc::new(move |value| {
        let value = value.map(str::to_owned);
        let choices = choices.clone();
        Box::pin(async move {
            match value.as_deref() {
                Some(candidate) if choices.iter().any(|choice| choice == candidate) => {
                    ValidationOutcome::ok()
                }
                _ => ValidationOutcome::error(format!(
                    "value '{}' is not one of: {}",
                    value.as_deref().unwrap_or_default(),
                    choices.join(", ")
                )),
            }
        })
    })
}
