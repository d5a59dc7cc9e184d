//! Environment variable binding driven by per-field annotations
//!
//! `envbind` populates the fields of a configuration struct from environment
//! variables. Callers describe the desired shape with `#[derive(EnvBind)]`
//! and per-field `#[env(...)]` annotations; the binder walks the structure in
//! declaration order, resolves each field's source string, converts it to the
//! field's type, and reports the first failure.
//!
//! # Features
//!
//! - **Declarative**: field annotations for key, default, required,
//!   expansion, and list separator
//! - **Type-directed conversion**: built-in scalar conversions, duration and
//!   URL extensions, sequences, and a textual opt-in trait for custom types
//! - **Conversion overrides**: a per-call registry keyed by concrete type,
//!   taking precedence over the built-ins
//! - **Fail-fast**: one error or success, with field name and type context
//!
//! # Example
//!
//! ```rust
//! use envbind::EnvBind;
//!
//! #[derive(Debug, Default, EnvBind)]
//! struct Config {
//!     #[env(key = "APP_HOST")]
//!     host: String,
//!
//!     #[env(key = "APP_PORT", default = "8080")]
//!     port: u16,
//!
//!     #[env(key = "APP_PEERS", separator = ";")]
//!     peers: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), envbind::Error> {
//! std::env::set_var("APP_HOST", "localhost");
//! std::env::set_var("APP_PEERS", "alpha;beta");
//!
//! let config = Config::from_env()?;
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.peers, vec!["alpha".to_string(), "beta".to_string()]);
//! # std::env::remove_var("APP_HOST");
//! # std::env::remove_var("APP_PEERS");
//! # Ok(())
//! # }
//! ```
//!
//! # Annotations
//!
//! ## `#[env(key = "NAME[,option...]")]`
//!
//! The environment variable to read. Trailing comma-separated options modify
//! resolution; the only supported option is `required`, which fails when the
//! variable is absent even if a default is declared. A field without a key
//! annotation resolves to the empty string and keeps its zero value.
//!
//! ## `#[env(default = "literal")]`
//!
//! Fallback literal used when the variable is absent. The literal goes
//! through the same conversion as an environment value, so it must parse as
//! the field's type.
//!
//! ## `#[env(expand = "true")]`
//!
//! Enables shell-style `${VAR}`/`$VAR` substitution on the resolved string
//! before conversion. Only the literal `"true"`, compared case-insensitively,
//! enables it.
//!
//! ## `#[env(separator = ";")]`
//!
//! Separator for `Vec` fields; defaults to `,`.
//!
//! ## `#[env(nested)]`
//!
//! Marks a sub-structure field. A plain nested field is recursed into when
//! its own key (if any) resolves to empty, letting inner fields apply their
//! own annotations. An `Option<Box<T>>` field marked nested is walked in
//! place when present and left untouched when absent.
//!
//! # Conversion precedence
//!
//! For each field, a registry override for the concrete type (see
//! [`parse_with`]) wins; otherwise the type's [`EnvValue`] implementation
//! applies — the built-in scalar table, the duration/URL extensions, or the
//! caller's own textual impl.

mod bind;
mod error;
mod registry;
mod resolve;
mod value;

pub use bind::{Binder, EnvBind, Observer};
pub use error::{BoxError, Error};
pub use registry::Registry;
pub use resolve::FieldMeta;
pub use value::{EnvValue, Kind};

pub use envbind_derive::EnvBind;

/// Bind `target`'s fields from the environment with no conversion overrides.
///
/// Equivalent to [`parse_with`] with an empty [`Registry`].
pub fn parse<T: EnvBind>(target: &mut T) -> Result<(), Error> {
    Binder::new().bind(target)
}

/// Bind `target`'s fields from the environment, layering `overrides` over
/// the built-in conversions.
///
/// An override registered for a concrete type takes precedence over that
/// type's [`EnvValue`] implementation.
pub fn parse_with<T: EnvBind>(target: &mut T, overrides: Registry) -> Result<(), Error> {
    Binder::with_registry(overrides).bind(target)
}
