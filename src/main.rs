use std::net::TcpListener;

use env_logger::Env;
use scout::{configuration::get_configuration, services::ListingScraper, startup::run};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().map_err(std::io::Error::other)?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;
    log::info!(
        "Serving on {} with the {:?} engine",
        listener.local_addr()?,
        configuration.browser.engine
    );

    let scraper = ListingScraper::from_settings(&configuration);

    run(listener, scraper)?.await
}
