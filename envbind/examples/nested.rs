//! Example demonstrating nested and owned sub-structures

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct CacheConfig {
    #[env(key = "CACHE_URL", default = "redis://localhost")]
    url: String,

    #[env(key = "CACHE_TTL_SECONDS", default = "60")]
    ttl_seconds: u64,
}

#[derive(Debug, Default, EnvBind)]
struct TlsConfig {
    #[env(key = "TLS_CERT_PATH,required")]
    cert_path: String,

    #[env(key = "TLS_KEY_PATH,required")]
    key_path: String,
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env(key = "SERVICE_NAME", default = "demo")]
    name: String,

    // Recursed into; inner fields apply their own annotations
    #[env(nested)]
    cache: CacheConfig,

    // Only bound when present; None means TLS stays disabled
    #[env(nested)]
    tls: Option<Box<TlsConfig>>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("CACHE_URL", "redis://cache.internal");

    let mut config = Config::default();
    envbind::parse(&mut config)?;

    println!("Service: {}", config.name);
    println!("Cache: {} (ttl {}s)", config.cache.url, config.cache.ttl_seconds);
    println!("TLS: {:?}", config.tls);

    // Allocate the owned section to opt in, then bind again
    std::env::set_var("TLS_CERT_PATH", "/etc/ssl/demo.crt");
    std::env::set_var("TLS_KEY_PATH", "/etc/ssl/demo.key");
    config.tls = Some(Box::default());
    envbind::parse(&mut config)?;

    if let Some(tls) = &config.tls {
        println!("TLS enabled: cert={} key={}", tls.cert_path, tls.key_path);
    }

    Ok(())
}
