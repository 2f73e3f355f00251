use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use clap::Parser;
use playlist_api::config::ApiConfig;
use playlist_api::{database, rest_data_access, AppData};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = ApiConfig::parse();
    config.init_logger()?;

    let pool = database::connect(&config.database_url, config.max_db_connections).await?;
    let data = Data::new(AppData::new(pool));

    log::info!(
        "starting playlist api, ADDRESS: {}:{}",
        config.addr,
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .configure(rest_data_access::configure)
    })
    .bind((config.addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
