use std::fs::OpenOptions;

use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait as _};
use sea_orm::Database;
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter, fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

mod config;
mod consts;
mod utils;

mod engine;
mod entity;
mod persistence;
mod pages;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(config::load_trace_log())?;

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(std::io::Error::other)?;

    let config::Config {
        host_address,
        database_opt,
        run_migrations,
    } = config::load();

    let database = Database::connect(database_opt).await
        .map_err(std::io::Error::other)?;

    if run_migrations {
        info!("Applying pending migrations");
        Migrator::up(&database, None).await
            .map_err(std::io::Error::other)?;
    }

    let database = web::Data::new(database);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .wrap(TracingLogger::default())
            .configure(pages::config)
    });

    let server = server.bind(host_address)?;
    for address in server.addrs() {
        info!("Listening on {}", address);
    }

    server.run().await
}
