//! Comprehensive example showing multiple features combined

use std::time::Duration;

use envbind::EnvBind;
use url::Url;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Required field
    #[env(key = "APP_NAME,required")]
    name: String,

    // Optional field
    #[env(key = "APP_VERSION")]
    version: Option<String>,

    // Default value
    #[env(key = "APP_PORT", default = "8080")]
    port: u16,

    // Duration and URL extension conversions
    #[env(key = "APP_TIMEOUT", default = "30s")]
    timeout: Duration,

    #[env(key = "APP_UPSTREAM", default = "https://upstream.internal/api")]
    upstream: Option<Url>,

    // Sequence with a custom separator
    #[env(key = "APP_PEERS", separator = ";")]
    peers: Vec<String>,

    // Shell-style expansion against the environment
    #[env(key = "APP_DATA_DIR", default = "${HOME}/.local/share/app", expand = "true")]
    data_dir: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("APP_PEERS", "alpha:7000;beta:7000");
    // APP_VERSION not set - will be None
    // APP_PORT, APP_TIMEOUT, APP_UPSTREAM, APP_DATA_DIR use their defaults

    let config = Config::from_env()?;

    println!("Comprehensive Configuration:");
    println!("  Name: {}", config.name);
    println!("  Version: {:?}", config.version);
    println!("  Port: {}", config.port);
    println!("  Timeout: {:?}", config.timeout);
    println!("  Upstream: {:?}", config.upstream);
    println!("  Peers: {:?}", config.peers);
    println!("  Data Dir: {}", config.data_dir);

    Ok(())
}
