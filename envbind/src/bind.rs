//! The binder: field walking, conversion dispatch, and collection handling

use std::fmt;

use crate::error::{BoxError, Error};
use crate::registry::Registry;
use crate::resolve::{resolve, FieldMeta};
use crate::value::{EnvValue, Kind};

/// Callback invoked after each successfully set field, with the field's
/// metadata and the resolved string that was converted.
pub type Observer = Box<dyn Fn(&FieldMeta, &str) + Send + Sync>;

/// A structure whose fields can be populated from the environment.
///
/// Implemented by `#[derive(EnvBind)]`; the generated `bind` walks the
/// fields in declaration order and stops at the first failure.
pub trait EnvBind {
    /// Bind this structure's fields using the given binder.
    fn bind(&mut self, binder: &Binder) -> Result<(), Error>;

    /// Allocate a default value and bind it with the baseline binder.
    fn from_env() -> Result<Self, Error>
    where
        Self: Default + Sized,
    {
        let mut target = Self::default();
        crate::parse(&mut target)?;
        Ok(target)
    }
}

impl<T: EnvBind> EnvBind for Box<T> {
    fn bind(&mut self, binder: &Binder) -> Result<(), Error> {
        (**self).bind(binder)
    }
}

/// Binding configuration: conversion overrides and an optional observation
/// callback.
///
/// The observer is scoped to this binder rather than being process-wide
/// state; concurrent binds with different binders never interfere.
///
/// ```rust
/// use envbind::{Binder, EnvBind};
///
/// #[derive(Default, EnvBind)]
/// struct Config {
///     #[env(key = "BINDER_DOC_PORT", default = "8080")]
///     port: u16,
/// }
///
/// let mut config = Config::default();
/// Binder::new()
///     .observer(|meta, value| eprintln!("{} <- {value}", meta.name))
///     .bind(&mut config)?;
/// assert_eq!(config.port, 8080);
/// # Ok::<(), envbind::Error>(())
/// ```
#[derive(Default)]
pub struct Binder {
    overrides: Registry,
    observer: Option<Observer>,
}

impl Binder {
    /// A binder with no overrides and no observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A binder applying the given conversion overrides.
    pub fn with_registry(overrides: Registry) -> Self {
        Self {
            overrides,
            observer: None,
        }
    }

    /// Attach an observation callback, replacing any previous one.
    pub fn observer(mut self, observer: impl Fn(&FieldMeta, &str) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Bind `target`'s fields from the environment.
    pub fn bind<T: EnvBind>(&self, target: &mut T) -> Result<(), Error> {
        target.bind(self)
    }

    fn convert<T: EnvValue + 'static>(&self, text: &str) -> Result<T, BoxError> {
        match self.overrides.convert::<T>(text) {
            Some(converted) => converted,
            None => T::from_text(text),
        }
    }

    // In sequences, textual elements keep their own conversion; only table
    // and extension kinds can be overridden per element.
    fn convert_element<T: EnvValue + 'static>(&self, part: &str) -> Result<T, BoxError> {
        if T::KIND == Kind::Text {
            T::from_text(part)
        } else {
            self.convert::<T>(part)
        }
    }

    fn notify(&self, meta: &FieldMeta, value: &str) {
        if let Some(observer) = &self.observer {
            observer(meta, value);
        }
    }

    /// Bind a scalar, extension, or textual field.
    #[doc(hidden)]
    pub fn bind_value<T: EnvValue + 'static>(
        &self,
        slot: &mut T,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        let value = resolve(meta)?;
        if value.is_empty() {
            return Ok(());
        }
        *slot = self
            .convert::<T>(&value)
            .map_err(|source| Error::parse::<T>(meta.name, source))?;
        self.notify(meta, &value);
        Ok(())
    }

    /// Bind an `Option` field; an empty resolution leaves it untouched.
    #[doc(hidden)]
    pub fn bind_optional<T: EnvValue + 'static>(
        &self,
        slot: &mut Option<T>,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        let value = resolve(meta)?;
        if value.is_empty() {
            return Ok(());
        }
        let converted = self
            .convert::<T>(&value)
            .map_err(|source| Error::parse::<T>(meta.name, source))?;
        *slot = Some(converted);
        self.notify(meta, &value);
        Ok(())
    }

    /// Bind a sequence field by splitting on the declared separator.
    #[doc(hidden)]
    pub fn bind_sequence<T: EnvValue + 'static>(
        &self,
        slot: &mut Vec<T>,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        let value = resolve(meta)?;
        if value.is_empty() {
            return Ok(());
        }
        let separator = effective_separator(meta);
        let mut converted = Vec::new();
        for part in value.split(separator) {
            let element = self
                .convert_element::<T>(part)
                .map_err(|source| Error::parse::<Vec<T>>(meta.name, source))?;
            converted.push(element);
        }
        *slot = converted;
        self.notify(meta, &value);
        Ok(())
    }

    /// Bind a sequence of boxed elements.
    ///
    /// Only textual element types are supported here; boxed scalar and
    /// extension elements are rejected rather than silently skipped.
    #[doc(hidden)]
    pub fn bind_boxed_sequence<T: EnvValue + 'static>(
        &self,
        slot: &mut Vec<Box<T>>,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        let value = resolve(meta)?;
        if value.is_empty() {
            return Ok(());
        }
        if T::KIND != Kind::Text {
            return Err(Error::unsupported_shape::<Vec<Box<T>>>(meta.name));
        }
        let separator = effective_separator(meta);
        let mut converted = Vec::new();
        for part in value.split(separator) {
            let element = T::from_text(part)
                .map_err(|source| Error::parse::<Vec<Box<T>>>(meta.name, source))?;
            converted.push(Box::new(element));
        }
        *slot = converted;
        self.notify(meta, &value);
        Ok(())
    }

    /// Bind a nested record field.
    ///
    /// An empty resolution recurses into the record with this binder; a
    /// non-empty one converts the whole record through a registry entry.
    #[doc(hidden)]
    pub fn bind_nested<T: EnvBind + 'static>(
        &self,
        slot: &mut T,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        let value = resolve(meta)?;
        if value.is_empty() {
            return slot.bind(self);
        }
        match self.overrides.convert::<T>(&value) {
            Some(Ok(whole)) => {
                *slot = whole;
                self.notify(meta, &value);
                Ok(())
            }
            Some(Err(source)) => Err(Error::parse::<T>(meta.name, source)),
            None => Err(Error::no_converter::<T>(meta.name)),
        }
    }

    /// Bind an owned sub-structure field.
    ///
    /// A present sub-structure is an independent binding root: it is
    /// re-entered through the top-level entry point, with the baseline
    /// registry and no observer. An absent one is not allocated; its key,
    /// if any, can only be satisfied by a registry entry for the boxed
    /// type.
    #[doc(hidden)]
    pub fn bind_owned<T: EnvBind + 'static>(
        &self,
        slot: &mut Option<Box<T>>,
        meta: &FieldMeta,
    ) -> Result<(), Error> {
        if let Some(nested) = slot.as_deref_mut() {
            return crate::parse(nested);
        }
        let value = resolve(meta)?;
        if value.is_empty() {
            return Ok(());
        }
        match self.overrides.convert::<Box<T>>(&value) {
            Some(Ok(whole)) => {
                *slot = Some(whole);
                self.notify(meta, &value);
                Ok(())
            }
            Some(Err(source)) => Err(Error::parse::<Box<T>>(meta.name, source)),
            None => Err(Error::no_converter::<Box<T>>(meta.name)),
        }
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("overrides", &self.overrides)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

fn effective_separator(meta: &FieldMeta) -> &'static str {
    if meta.separator.is_empty() {
        ","
    } else {
        meta.separator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn meta(key: &'static str, separator: &'static str) -> FieldMeta {
        FieldMeta {
            name: "field",
            key,
            default: "",
            expand: "",
            separator,
        }
    }

    #[test]
    #[serial]
    fn test_bind_value_skips_empty() {
        env::remove_var("BIND_SKIP");
        let binder = Binder::new();
        let mut slot = 7u32;
        binder.bind_value(&mut slot, &meta("BIND_SKIP", "")).unwrap();
        assert_eq!(slot, 7);
    }

    #[test]
    #[serial]
    fn test_bind_value_override_beats_builtin() {
        env::set_var("BIND_OVERRIDE", "0x10");
        let mut registry = Registry::new();
        registry.register(|text: &str| u32::from_str_radix(text.trim_start_matches("0x"), 16));
        let binder = Binder::with_registry(registry);

        let mut slot = 0u32;
        binder
            .bind_value(&mut slot, &meta("BIND_OVERRIDE", ""))
            .unwrap();
        assert_eq!(slot, 16);
        env::remove_var("BIND_OVERRIDE");
    }

    #[test]
    #[serial]
    fn test_bind_sequence_replaces_contents() {
        env::set_var("BIND_SEQ", "3|2|1");
        let binder = Binder::new();
        let mut slot = vec![9u8];
        binder.bind_sequence(&mut slot, &meta("BIND_SEQ", "|")).unwrap();
        assert_eq!(slot, vec![3, 2, 1]);
        env::remove_var("BIND_SEQ");
    }

    #[test]
    #[serial]
    fn test_bind_sequence_fails_fast_per_element() {
        env::set_var("BIND_SEQ_BAD", "1,x,3");
        let binder = Binder::new();
        let mut slot: Vec<i32> = Vec::new();
        let err = binder
            .bind_sequence(&mut slot, &meta("BIND_SEQ_BAD", ""))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(slot.is_empty());
        env::remove_var("BIND_SEQ_BAD");
    }

    #[test]
    #[serial]
    fn test_boxed_scalar_sequence_rejected() {
        env::set_var("BIND_BOXED", "1,2");
        let binder = Binder::new();
        let mut slot: Vec<Box<u8>> = Vec::new();
        let err = binder
            .bind_boxed_sequence(&mut slot, &meta("BIND_BOXED", ""))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape { .. }));
        env::remove_var("BIND_BOXED");
    }
}
