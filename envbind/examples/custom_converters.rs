//! Example demonstrating conversion overrides and textual types

use envbind::{Binder, BoxError, EnvBind, EnvValue, Registry};

// A type usable as a field by implementing EnvValue; no registration needed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum Compression {
    #[default]
    None,
    Gzip,
    Zstd,
}

impl EnvValue for Compression {
    fn from_text(text: &str) -> Result<Self, BoxError> {
        match text {
            "none" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "zstd" => Ok(Self::Zstd),
            other => Err(format!("unknown compression '{other}'").into()),
        }
    }
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Bound through the registry override below: accepts "64k", "8m", ...
    #[env(key = "BUFFER_SIZE", default = "64k")]
    buffer_size: u64,

    #[env(key = "COMPRESSION", default = "zstd")]
    compression: Compression,
}

fn parse_size(text: &str) -> Result<u64, String> {
    let (digits, factor) = match text.strip_suffix(['k', 'm']) {
        Some(digits) if text.ends_with('k') => (digits, 1024),
        Some(digits) => (digits, 1024 * 1024),
        None => (text, 1),
    };
    let base: u64 = digits.parse().map_err(|_| format!("invalid size '{text}'"))?;
    Ok(base * factor)
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("BUFFER_SIZE", "8m");

    let mut registry = Registry::new();
    registry.register(parse_size);

    let mut config = Config::default();
    Binder::with_registry(registry)
        .observer(|meta, value| println!("  set {} from '{value}'", meta.name))
        .bind(&mut config)?;

    println!("Buffer Size: {} bytes", config.buffer_size);
    println!("Compression: {:?}", config.compression);

    Ok(())
}
