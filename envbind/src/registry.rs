//! Caller-supplied conversion overrides keyed by concrete target type

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;

type ErasedConvert = Arc<dyn Fn(&str) -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// Conversion functions layered over the built-in table and the textual
/// capability, keyed by concrete target type.
///
/// An entry registered for a type wins over that type's [`EnvValue`]
/// implementation, including the built-in scalar and extension entries.
///
/// ```rust
/// use envbind::Registry;
///
/// let mut registry = Registry::new();
/// registry.register(|text: &str| {
///     u32::from_str_radix(text.trim_start_matches("0x"), 16)
/// });
/// ```
///
/// [`EnvValue`]: crate::EnvValue
#[derive(Default, Clone)]
pub struct Registry {
    entries: HashMap<TypeId, ErasedConvert>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a conversion function for `T`, replacing any previous entry
    /// for the same type.
    pub fn register<T, E, F>(&mut self, convert: F) -> &mut Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let erased: ErasedConvert = Arc::new(move |text| {
            convert(text)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        });
        self.entries.insert(TypeId::of::<T>(), erased);
        self
    }

    /// Apply the registered conversion for `T`, if any.
    pub(crate) fn convert<T: 'static>(&self, text: &str) -> Option<Result<T, BoxError>> {
        let convert = self.entries.get(&TypeId::of::<T>())?;
        Some(convert(text).map(|boxed| {
            *boxed
                .downcast::<T>()
                .expect("converter registered for T yields T")
        }))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .finish()
    }
}
