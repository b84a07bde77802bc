use actix_web::{get, post, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{domain::ListingRecord, routes::api_route::parse_limit, services::ListingScraper};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    query: String,
    limit: String,
    products: Option<Vec<ListingRow>>,
    error: Option<String>,
}

struct ListingRow {
    pub title: String,
    pub price: String,
    pub rating: String,
    pub reviews: String,
}

impl From<ListingRecord> for ListingRow {
    fn from(value: ListingRecord) -> Self {
        let rating = match value.parsed_rating() {
            Some(rating) => format!("{} / {}", rating.value, rating.scale),
            None => value.rating.unwrap_or("N/A".to_string()),
        };

        Self {
            title: value.title.unwrap_or("N/A".to_string()),
            price: value.price.unwrap_or("N/A".to_string()),
            rating,
            reviews: value.review_count.unwrap_or("N/A".to_string()),
        }
    }
}

#[derive(Deserialize)]
struct SearchForm {
    query: Option<String>,
    limit: Option<String>,
}

#[get("/")]
async fn home(scraper: web::Data<ListingScraper>) -> HttpResponse {
    render(IndexTemplate {
        query: String::new(),
        limit: scraper.default_limit().to_string(),
        products: None,
        error: None,
    })
}

#[post("/")]
async fn search(scraper: web::Data<ListingScraper>, form: web::Form<SearchForm>) -> HttpResponse {
    let form = form.into_inner();
    let query = form.query.unwrap_or_default().trim().to_string();
    let limit = form
        .limit
        .unwrap_or_else(|| scraper.default_limit().to_string());

    let mut template = IndexTemplate {
        query,
        limit,
        products: None,
        error: None,
    };

    if template.query.is_empty() {
        template.error = Some("Please enter a search term.".to_string());
        return render(template);
    }

    let result = async {
        let limit = parse_limit(Some(&template.limit), scraper.default_limit())?;
        scraper.collect(&template.query, limit).await
    }
    .await;

    match result {
        Ok(products) => {
            template.products = Some(products.into_iter().map(|p| p.into()).collect());
        }
        Err(e) => {
            log::error!("Scrape for '{}' failed: {:?}", template.query, e);
            template.error = Some(format!("{:#}", e));
        }
    }

    render(template)
}

fn render(template: IndexTemplate) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render index template: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
