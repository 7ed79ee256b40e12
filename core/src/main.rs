mod cors;
mod health;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use api_billing::{BillingStore, PaymentGateway, PgBillingStore, PriceCache, StripeGateway};
use common::{env_config::Config, error::AppError};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, config.is_production())
        .await
        .expect("Failed to set up database");

    // Stripe and persistence seams shared by all workers
    let client = common::stripe::create_client(&config.stripe.secret_key);
    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(client));
    let store: Arc<dyn BillingStore> = Arc::new(PgBillingStore::new(pool.clone()));

    // one price cache for the whole process, not one per worker
    let price_cache = web::Data::new(PriceCache::new(config.stripe.product_id.clone()));

    log::info!(
        "Starting server on {}:{} ({})",
        config.server_host,
        config.server_port,
        config.environment
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::from(gateway.clone()))
            .app_data(web::Data::from(store.clone()))
            .app_data(price_cache.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .wrap(logger::middleware()) // 3rd
            .wrap(api_auth::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(health::get_health)
            .service(web::scope("/api").service(api_billing::mount_billing()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
