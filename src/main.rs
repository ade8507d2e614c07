mod calendar;
mod config;
mod pages;
mod scheduler;
mod state;
mod storybook;

use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::routing::{get, get_service};
use axum::Router;
use dotenvy::EnvLoader;
use tower_http::services::ServeDir;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = EnvLoader::new().load().unwrap_or_default();

    let timezone = dotenv
        .get("TIMEZONE")
        .cloned()
        .or_else(|| std::env::var("TIMEZONE").ok())
        .unwrap_or_else(|| "UTC".to_string());
    config::init_timezone(&timezone);

    let shared: state::SharedState = Arc::new(Mutex::new(state::CalendarState::new()));

    fs::create_dir_all("static")?;
    let static_dir = ServeDir::new("static");

    // build the application router
    let app = Router::new()
        .route("/", get(pages::planner_page))
        .nest("/planner", pages::router())
        .nest("/storybook", storybook::router())
        .with_state(shared)
        .nest_service("/static", get_service(static_dir));

    let bind_addr = dotenv
        .get("BIND_ADDR")
        .cloned()
        .or_else(|| std::env::var("BIND_ADDR").ok())
        .unwrap_or_else(|| "0.0.0.0:3000".to_string());
    println!("Listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
