mod cookies;
mod handlers;
mod host;

use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use common::config::AppConfig;
use console::transport::HttpTransport;
use console::ConsoleOptions;

use crate::host::AppState;

#[derive(Parser, Clone)]
#[command(name = "proxy-admin")]
pub struct Args {
    #[arg(long, default_value = "8081")]
    pub port: u16,

    /// Overrides `backend_url` from the config file.
    #[arg(long)]
    pub backend: Option<String>,

    #[arg(long, default_value = "console.toml")]
    pub config: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let port = args.port;

    let mut config = AppConfig::load(&args.config)?;
    if let Some(backend) = args.backend {
        config.backend_url = backend;
    }

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let transport = HttpTransport::new(client, &config.backend_url)?;

    log::info!("Proxy admin listening on http://localhost:{}", port);
    log::info!("Backend at {}", config.backend_url);

    let state = web::Data::new(AppState {
        transport,
        options: ConsoleOptions::from_config(&config),
    });

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(handlers::routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
