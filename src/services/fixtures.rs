use scraper::{ElementRef, Html};
use url::Url;

use super::{page::select_all, SearchPage};

#[derive(Debug, Clone, Default)]
pub struct CardFixture {
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating_label: Option<String>,
    pub reviews: Option<String>,
}

impl CardFixture {
    pub fn full(i: usize) -> Self {
        CardFixture {
            title: Some(format!("Wireless Mouse {}", i)),
            price: Some("1,299".to_string()),
            rating_label: Some("4.3 out of 5 stars, 128 ratings".to_string()),
            reviews: Some("128".to_string()),
        }
    }

    pub fn empty() -> Self {
        CardFixture::default()
    }

    fn to_html(&self) -> String {
        let mut html = String::from(r#"<div data-component-type="s-search-result">"#);
        if let Some(title) = &self.title {
            html.push_str(&format!(r#"<a href="/dp/x"><h2><span>{}</span></h2></a>"#, title));
        }
        if let Some(price) = &self.price {
            html.push_str(&format!(
                r#"<span class="a-price"><span class="a-price-whole">{}</span></span>"#,
                price
            ));
        }
        if let Some(label) = &self.rating_label {
            html.push_str(&format!(r##"<a aria-label="{}" href="#"><i></i></a>"##, label));
        }
        if let Some(reviews) = &self.reviews {
            html.push_str(&format!(
                r#"<span class="a-size-base s-underline-text">{}</span>"#,
                reviews
            ));
        }
        html.push_str("</div>");
        html
    }
}

pub fn results_page(cards: &[CardFixture]) -> String {
    let cards: String = cards.iter().map(|c| c.to_html()).collect();
    format!(
        r#"<html><body><div class="s-main-slot">{}</div></body></html>"#,
        cards
    )
}

/// Serves canned result pages by their `page` query parameter. Pages past the
/// end are empty.
pub struct FixturePages {
    pages: Vec<String>,
    document: Html,
    pub visited: Vec<Url>,
    pub fail_on_page: Option<u32>,
}

impl FixturePages {
    pub fn new(pages: Vec<String>) -> Self {
        FixturePages {
            pages,
            document: Html::new_document(),
            visited: vec![],
            fail_on_page: None,
        }
    }

    pub fn visited_pages(&self) -> Vec<u32> {
        self.visited.iter().map(page_number).collect()
    }
}

fn page_number(url: &Url) -> u32 {
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(1)
}

impl SearchPage for FixturePages {
    type Card<'a> = ElementRef<'a>;

    async fn open(&mut self, url: &Url) -> anyhow::Result<()> {
        let page = page_number(url);
        self.visited.push(url.clone());

        if self.fail_on_page == Some(page) {
            anyhow::bail!("Connection reset while loading page {}", page);
        }

        let html = self
            .pages
            .get((page as usize).saturating_sub(1))
            .cloned()
            .unwrap_or_else(|| results_page(&[]));
        self.document = Html::parse_document(&html);
        Ok(())
    }

    async fn cards(&self, selector: &str) -> anyhow::Result<Vec<ElementRef<'_>>> {
        select_all(&self.document, selector)
    }
}
