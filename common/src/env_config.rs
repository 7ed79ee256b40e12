use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to boot the API: database connection details,
/// JWT settings, bind address, CORS and logging preferences, the public web
/// origin used for redirect targets, and the Stripe credentials.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Public origin of the web app, used to build checkout and portal redirects.
    pub web_url: String,
    /// Stripe configuration.
    pub stripe: StripeConfig,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
///
/// Tokens are issued by the account service; this side only verifies them.
pub struct JwtConfig {
    /// The secret key used to verify JWTs.
    pub secret: String,
}

#[derive(Clone, Debug)]
pub struct StripeConfig {
    /// Stripe secret key
    pub secret_key: String,
    /// Stripe webhook signing secret
    pub webhook_secret: String,
    /// Product whose active prices are offered on the billing page
    pub product_id: String,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// Reads the JWT configuration from environment variables:
    /// - `JWT_SECRET`: Required. The secret key for JWT verification.
    ///
    /// # Panics
    ///
    /// This function will panic if `JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
        }
    }
}

impl StripeConfig {
    /// # Panics
    ///
    /// Panics if `STRIPE_SECRET_KEY` or `STRIPE_PRODUCT_ID_FLUENT` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        StripeConfig {
            secret_key: env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set"),
            webhook_secret: env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_default(),
            product_id: env::var("STRIPE_PRODUCT_ID_FLUENT")
                .expect("STRIPE_PRODUCT_ID_FLUENT must be set"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: `development` or `production`
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT signing (via `JwtConfig::from_env()`)
    /// - `STRIPE_SECRET_KEY`, `STRIPE_PRODUCT_ID_FLUENT` (via `StripeConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 3000)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `WEB_URL`: Web app origin (default: "http://localhost:5173")
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: `WEB_URL`)
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `STRIPE_WEBHOOK_SECRET`: Webhook signing secret (default: empty, webhooks rejected)
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let web_url = env::var("WEB_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .trim_end_matches('/')
            .to_string();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| web_url.clone()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            web_url,
            stripe: StripeConfig::from_env(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
