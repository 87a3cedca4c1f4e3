use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{debug, info};

use insurance_predictor::{
    config::ServerConfig, features::FEATURE_NAMES, http, model::Model, storage::PredictionLog,
    PredictionService,
};

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let model = Model::load(config.model_path())
        .context("a valid model artifact is required before serving")?;
    info!(
        "loaded {} from {}",
        model.describe(),
        config.model_path().display()
    );
    debug!("feature order: {}", FEATURE_NAMES.join(", "));

    let log = PredictionLog::new(config.database_path());
    info!("logging predictions to {}", log.path().display());

    let service = web::Data::new(PredictionService::new(Arc::new(model), log));

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(http::configure)
    });
    if let Some(workers) = config.workers() {
        server = server.workers(workers);
    }

    let (host, port) = config.bind_addr();
    let server = server
        .bind((host, port))
        .with_context(|| format!("cannot bind {host}:{port}"))?;
    info!("listening at {host}:{port}");

    server.run().await?;
    info!("server stopped");

    Ok(())
}
