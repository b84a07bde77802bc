use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{api_route, health_check_route, home_route},
    services::ListingScraper,
};

pub fn run(listener: TcpListener, scraper: ListingScraper) -> Result<Server, std::io::Error> {
    let scraper = web::Data::new(scraper);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(health_check_route::health_check)
            .service(home_route::home)
            .service(home_route::search)
            .service(web::scope("/api").service(api_route::scrape))
            .app_data(scraper.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
