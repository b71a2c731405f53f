use std::{env, net::{SocketAddr, ToSocketAddrs as _}, path::PathBuf};

use sea_orm::ConnectOptions;
use tracing::info;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    /// Applies pending schema migrations before serving
    pub run_migrations: bool,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        run_migrations: load_run_migrations(),
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

/// Read on its own, the file has to be open before anything can be logged
pub fn load_trace_log() -> PathBuf {
    trace_log_path(env::var("TRACE_LOG").ok())
}

fn trace_log_path(var: Option<String>) -> PathBuf {
    var.filter(|var| !var.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("trace.log"))
}

fn load_run_migrations() -> bool {
    info!("Loading environment `RUN_MIGRATIONS`");

    env::var("RUN_MIGRATIONS")
        .map(|var| parse_flag(&var))
        .unwrap_or(false)
}

fn parse_flag(var: &str) -> bool {
    matches!(var.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
