//! Error types for environment variable binding

use std::any;

/// Boxed error returned by conversion functions and textual impls.
///
/// Conversion sources are heterogeneous (`ParseIntError`, `url::ParseError`,
/// caller-supplied closures, plain message strings), so they are carried
/// uniformly and re-wrapped with field context by the binder.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while binding a structure from the environment.
///
/// Binding is fail-fast: the first error aborts the walk and is returned to
/// the caller as-is. Fields written before the failing one keep their values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field whose key carries the `required` option has no corresponding
    /// environment variable, regardless of any declared default.
    #[error("environment variable '{key}' is required but not set")]
    MissingRequired {
        /// Name of the missing environment variable
        key: String,
    },

    /// An option token in a key annotation is not recognized.
    ///
    /// The only supported option is `required`; empty tokens are ignored.
    #[error("key option '{option}' is not supported")]
    UnsupportedOption {
        /// The offending option token
        option: String,
    },

    /// A conversion function or textual impl rejected a non-empty resolved
    /// value.
    #[error("failed to parse field '{field}' of type {type_name}: {source}")]
    Parse {
        /// Name of the field being bound
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
        /// Error reported by the conversion
        source: BoxError,
    },

    /// No conversion path exists for a field's type: no registry entry, and
    /// the type is a record rather than a textual or scalar value.
    #[error("no converter available for field '{field}' of type {type_name}")]
    NoConverter {
        /// Name of the field being bound
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
    },

    /// Sequences of boxed scalar elements are not supported.
    #[error("sequences of boxed scalar elements are not supported: field '{field}' of type {type_name}")]
    UnsupportedShape {
        /// Name of the field being bound
        field: &'static str,
        /// Declared type of the field
        type_name: &'static str,
    },
}

impl Error {
    pub(crate) fn parse<T>(field: &'static str, source: BoxError) -> Self {
        Self::Parse {
            field,
            type_name: any::type_name::<T>(),
            source,
        }
    }

    pub(crate) fn no_converter<T>(field: &'static str) -> Self {
        Self::NoConverter {
            field,
            type_name: any::type_name::<T>(),
        }
    }

    pub(crate) fn unsupported_shape<T>(field: &'static str) -> Self {
        Self::UnsupportedShape {
            field,
            type_name: any::type_name::<T>(),
        }
    }
}
