mod config;
mod errors;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use crate::config::Config;
use crate::middleware::{create_cors, create_production_cors, RequestLogging};
use crate::routes::{api_v1_routes, public_routes};
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use chrono::Local;
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::io::{self, Write};
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        })
        .init();

    // 加载并校验配置
    let config = Config::from_env()?;
    config.validate()?;

    // 创建数据库连接池
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout))
        .connect(&config.database.url)
        .await?;

    // 执行数据库迁移
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let bind_address = config.bind_address();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_allowed_origins.clone();
    let app_state = web::Data::new(AppState::new(db_pool, config));

    info!("Starting tokopay server on {}", bind_address);
    if !cors_origins.is_empty() {
        info!("CORS restricted to {} configured origin(s)", cors_origins.len());
    }

    let mut server = HttpServer::new(move || {
        let cors = if cors_origins.is_empty() {
            create_cors()
        } else {
            create_production_cors(&cors_origins)
        };
        App::new()
            .app_data(app_state.clone())
            .wrap(cors)
            .wrap(RequestLogging)
            .service(api_v1_routes())
            .service(public_routes())
    })
    .bind(&bind_address)?;

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.run().await?;

    info!("Server stopped");
    Ok(())
}
