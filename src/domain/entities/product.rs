use crate::domain::values::price::Price;
use serde::{Deserialize, Serialize};

/// A catalog entry. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub aisle_location: String,
    #[serde(default)]
    pub original_price: Price,
    #[serde(default)]
    pub discounted_price: Price,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub offer_type: Option<String>,
    #[serde(default)]
    pub is_clearance: bool,
}

impl ProductRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            product_id: id.into(),
            product_name: name.into(),
            product_image_url: String::new(),
            category: category.into(),
            aisle_location: String::new(),
            original_price: Price::default(),
            discounted_price: Price::default(),
            discount_percentage: 0.0,
            offer_type: None,
            is_clearance: false,
        }
    }

    /// Text representation used when embedding the catalog.
    pub fn searchable_text(&self) -> String {
        format!("{} in {}", self.product_name, self.category)
    }

    /// One grounding-context line for the generation prompt.
    pub fn context_line(&self) -> String {
        format!(
            "- Product: {}, Price: ${}, Category: {}, Location: Aisle {}",
            self.product_name, self.original_price, self.category, self.aisle_location
        )
    }
}

/// Product as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCard {
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "originalPrice")]
    pub original_price: f64,
    #[serde(rename = "discountedPrice")]
    pub discounted_price: f64,
    pub aisle_location: String,
}

impl From<&ProductRecord> for ProductCard {
    fn from(p: &ProductRecord) -> Self {
        Self {
            name: p.product_name.clone(),
            image_url: p.product_image_url.clone(),
            original_price: p.original_price.value(),
            discounted_price: p.discounted_price.value(),
            aisle_location: p.aisle_location.clone(),
        }
    }
}
