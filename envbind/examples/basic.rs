//! Basic example: keys, defaults, and required fields

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Required: binding fails if DATABASE_URL is not set
    #[env(key = "DATABASE_URL,required")]
    database_url: String,

    // Falls back to the default when SERVER_ADDR is not set
    #[env(key = "SERVER_ADDR", default = "127.0.0.1:8080")]
    server_addr: String,

    #[env(key = "MAX_CONNECTIONS", default = "10")]
    max_connections: u32,

    // No annotation: keeps its zero value
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/app");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Addr: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug: {}", config.debug);

    Ok(())
}
