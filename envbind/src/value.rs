//! Value conversion: the scalar table and the textual capability

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::BoxError;

/// Classification of a bindable value type.
///
/// Scalar kinds correspond to the built-in conversion table entries;
/// [`Kind::Extension`] marks function-converted library types (durations,
/// URLs, addresses, paths); [`Kind::Text`] marks types that opted in by
/// implementing [`EnvValue`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    Extension,
    Text,
}

/// A type constructible from an environment variable's string value.
///
/// Implementations for the primitive scalar kinds and `String` form the
/// built-in conversion table. Durations, URLs, socket/IP addresses, and
/// paths ship as extension conversions. Any other type can opt in by
/// implementing this trait; no registration is needed:
///
/// ```rust
/// use envbind::{BoxError, EnvValue};
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Server,
///     Client,
/// }
///
/// impl EnvValue for Mode {
///     fn from_text(text: &str) -> Result<Self, BoxError> {
///         match text {
///             "server" => Ok(Mode::Server),
///             "client" => Ok(Mode::Client),
///             other => Err(format!("unknown mode '{other}'").into()),
///         }
///     }
/// }
///
/// assert_eq!(Mode::from_text("server").unwrap(), Mode::Server);
/// ```
///
/// Conversion must be pure: a function of the input string with no side
/// effects beyond the returned value or error.
pub trait EnvValue: Sized {
    /// Classification used for sequence element handling.
    const KIND: Kind = Kind::Text;

    /// Convert the resolved string into a value of this type.
    fn from_text(text: &str) -> Result<Self, BoxError>;
}

macro_rules! scalar_values {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_text(text: &str) -> Result<Self, BoxError> {
                    text.parse::<$ty>().map_err(BoxError::from)
                }
            }
        )*
    };
}

scalar_values! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
}

impl EnvValue for bool {
    const KIND: Kind = Kind::Bool;

    // Accepts the same literal set as the original boolean parser.
    fn from_text(text: &str) -> Result<Self, BoxError> {
        match text {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            other => Err(format!("invalid boolean literal '{other}'").into()),
        }
    }
}

impl EnvValue for Duration {
    const KIND: Kind = Kind::Extension;

    fn from_text(text: &str) -> Result<Self, BoxError> {
        humantime::parse_duration(text).map_err(BoxError::from)
    }
}

impl EnvValue for Url {
    const KIND: Kind = Kind::Extension;

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Url::parse(text).map_err(BoxError::from)
    }
}

impl EnvValue for SocketAddr {
    const KIND: Kind = Kind::Extension;

    fn from_text(text: &str) -> Result<Self, BoxError> {
        text.parse::<SocketAddr>().map_err(BoxError::from)
    }
}

impl EnvValue for IpAddr {
    const KIND: Kind = Kind::Extension;

    fn from_text(text: &str) -> Result<Self, BoxError> {
        text.parse::<IpAddr>().map_err(BoxError::from)
    }
}

impl EnvValue for PathBuf {
    const KIND: Kind = Kind::Extension;

    fn from_text(text: &str) -> Result<Self, BoxError> {
        Ok(PathBuf::from(text))
    }
}
