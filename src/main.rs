use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use revovend_server::{services, settings, utils};

#[derive(Parser)]
struct Args {
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = settings::Settings::new(&args.config).expect("Could not load config file.");

    utils::init_logging().expect("Could not initialise logging.");

    let conn = PgPoolOptions::new()
        .max_connections(config.postgres.max_connections)
        .connect(&config.postgres.url)
        .await
        .expect("Could not connect to database.");

    log::info!("Starting services.");
    services::start_services(conn, config)
        .await
        .expect("Could not start services.");
}
