use std::fmt;

use serde::{Deserialize, Serialize};

/// One listing card from a search results page. Every field is optional: a
/// card missing its price is still a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
    #[serde(rename = "Reviews")]
    pub review_count: Option<String>,
}

impl ListingRecord {
    pub fn parsed_rating(&self) -> Option<Rating> {
        self.rating.as_deref().and_then(Rating::parse)
    }
}

/// Reduces an accessibility label like `"4.3 out of 5 stars, 128 ratings"`
/// to the part before the first comma.
pub fn rating_label(aria_label: &str) -> &str {
    match aria_label.split_once(',') {
        Some((rating, _)) => rating,
        None => aria_label,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub value: f32,
    pub scale: f32,
}

impl Rating {
    /// Parses `"<value> out of <scale> stars"`. A trailing `, N ratings` is
    /// ignored.
    pub fn parse(label: &str) -> Option<Rating> {
        let label = rating_label(label).trim();
        let (value, rest) = label.split_once(" out of ")?;
        let scale = rest.split_whitespace().next()?;

        Some(Rating {
            value: value.trim().parse().ok()?,
            scale: scale.parse().ok()?,
        })
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of {} stars", self.value, self.scale)
    }
}
