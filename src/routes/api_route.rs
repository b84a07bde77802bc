use actix_web::{get, web, HttpResponse};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::services::ListingScraper;

#[derive(Deserialize)]
struct ScrapeQuery {
    query: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
        }
    }
}

#[get("/scrape")]
async fn scrape(
    params: web::Query<ScrapeQuery>,
    scraper: web::Data<ListingScraper>,
) -> HttpResponse {
    let Some(query) = params.query.as_deref().filter(|q| !q.trim().is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorBody::new("Missing 'query' parameter"));
    };

    let result = async {
        let limit = parse_limit(params.limit.as_deref(), scraper.default_limit())?;
        scraper.collect(query, limit).await
    }
    .await;

    match result {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => {
            log::error!("Scrape for '{}' failed: {:?}", query, e);
            HttpResponse::InternalServerError().json(ErrorBody::new(format!("{:#}", e)))
        }
    }
}

/// An absent or blank limit falls back to `default`.
pub fn parse_limit(raw: Option<&str>, default: usize) -> anyhow::Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(limit) => limit
            .parse()
            .with_context(|| format!("Invalid 'limit' parameter: {}", limit)),
    }
}
