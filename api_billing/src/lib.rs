use actix_web::web::{self};

pub mod gateway;
pub mod store;
pub mod errors;

pub mod routes {
    pub mod billing;
    pub mod webhook;
}

pub mod services {
    pub mod checkout;
    pub mod customer;
    pub mod portal;
    pub mod prices;
    pub mod subscription;
    pub mod webhook;
}

pub mod dtos {
    pub mod billing;
}

pub mod models {
    pub mod price;
}

mod misc {
    pub(crate) mod stripe;
}

pub use gateway::{PaymentGateway, StripeGateway};
pub use services::prices::PriceCache;
pub use store::{BillingStore, PgBillingStore};

/// Billing routes. Expects `Arc<Config>`, `PriceCache`, `dyn PaymentGateway`
/// and `dyn BillingStore` to be registered as app data.
pub fn mount_billing() -> actix_web::Scope {
    web::scope("/billing")
        .service(routes::billing::get_prices)
        .service(routes::billing::post_checkout)
        .service(routes::billing::get_subscription)
        .service(routes::billing::post_cancel)
        .service(routes::billing::post_resume)
        .service(routes::billing::post_portal)
        .service(routes::webhook::post_webhook)
}
