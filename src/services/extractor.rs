use crate::domain::{rating_label, ListingRecord};

use super::{ListingCard, SearchPage};

pub const LISTING_CONTAINER: &str = r#"div[data-component-type="s-search-result"]"#;
pub const TITLE: &str = "a > h2 > span";
pub const PRICE: &str = r#"span[class="a-price-whole"]"#;
pub const RATING: &str = r#"a[aria-label*="out of 5 stars"]"#;
pub const REVIEW_COUNT: &str = r#"span[class="a-size-base s-underline-text"]"#;

/// Reads every listing card on an already loaded page, top to bottom.
pub async fn extract<P: SearchPage>(page: &P) -> anyhow::Result<Vec<ListingRecord>> {
    let cards = page.cards(LISTING_CONTAINER).await?;

    let mut records = Vec::with_capacity(cards.len());
    for card in cards.iter() {
        records.push(extract_card(card).await);
    }

    Ok(records)
}

pub async fn extract_card<C: ListingCard>(card: &C) -> ListingRecord {
    let rating = card
        .attr_of(RATING, "aria-label")
        .await
        .map(|label| rating_label(&label).to_string());

    ListingRecord {
        title: card.text_of(TITLE).await,
        price: card.text_of(PRICE).await,
        rating,
        review_count: card.text_of(REVIEW_COUNT).await,
    }
}
