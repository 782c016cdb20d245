use bridalgen::{logger, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_loaded = dotenv::dotenv().is_ok();

    if let Err(e) = logger::init_with_config(logger::LoggerConfig::from_env()) {
        eprintln!("{}", e);
    }
    if !env_loaded {
        log::warn!("No .env file found, using process environment");
    }

    let config = Config::from_env();
    logger::log_startup_info("bridalgen relay", env!("CARGO_PKG_VERSION"), &config);

    bridalgen::server::run(config).await
}
