use std::{collections::HashMap, net::TcpListener};

use actix_web::{web, App, HttpResponse, HttpServer};

pub const CARDS_PER_PAGE: usize = 16;

/// Store whose first two result pages carry 16 listings each; every fourth
/// listing has no price.
pub fn spawn_store() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(|| App::new().route("/s", web::get().to(results_page)))
        .listen(listener)
        .expect("Failed to bind address")
        .run();
    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}/s", port)
}

async fn results_page(params: web::Query<HashMap<String, String>>) -> HttpResponse {
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let term = params.get("k").cloned().unwrap_or_default();

    let cards: String = match page {
        1 | 2 => (1..=CARDS_PER_PAGE)
            .map(|i| {
                let price = match i % 4 {
                    0 => String::new(),
                    _ => format!(r#"<span class="a-price-whole">{}99</span>"#, i),
                };
                format!(
                    r##"<div data-component-type="s-search-result">
                        <a href="/dp/{page}{i}"><h2><span>{term} {page}-{i}</span></h2></a>
                        {price}
                        <a aria-label="4.{i} out of 5 stars, {i}0 ratings" href="#"></a>
                        <span class="a-size-base s-underline-text">{i}0</span>
                    </div>"##
                )
            })
            .collect(),
        _ => String::new(),
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!("<html><body>{}</body></html>", cards))
}
