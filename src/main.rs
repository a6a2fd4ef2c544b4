use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::io;
use std::sync::Arc;

mod api;
mod config;
mod errors;
mod models;
mod services;

use services::{
    balance_service::BalanceNormalizer, blockchain_service::BlockchainClient,
    network_config::get_network_config, query_service::QueryService,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env().map_err(into_io_error)?;
    let network = get_network_config(&config.alchemy_api_key, config.alchemy_rpc_url.as_deref())
        .map_err(into_io_error)?;
    let client = BlockchainClient::new(network).map_err(into_io_error)?;

    if let Err(e) = client.check_connection().await {
        warn!("{} is not reachable yet: {}", client.network_name(), e);
    }

    let normalizer = BalanceNormalizer::new(Arc::new(client), config.metadata_concurrency);
    let query_service = web::Data::new(QueryService::new(normalizer));
    let allowed_origins = config.allowed_origins.clone();

    info!(
        "Listening on {}:{} (metadata concurrency {})",
        config.host, config.port, config.metadata_concurrency
    );

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT]);
        App::new()
            .app_data(query_service.clone())
            .configure(api::config)
            .wrap(cors)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn into_io_error(e: errors::CustomError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}
