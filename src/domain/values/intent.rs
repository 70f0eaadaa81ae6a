//! Gender-intent classification for shopping queries.
//!
//! Classification is a case-insensitive substring test against an ordered
//! rule list. Order matters: `"men"` is a substring of `"women"`, so the
//! female rule is evaluated first and the two targeted intents are mutually
//! exclusive.

use crate::domain::entities::product::ProductRecord;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Female,
    Male,
    Unfiltered,
}

/// Ordered `(tokens, intent)` rules; the first rule with any matching token wins.
pub const INTENT_RULES: &[(&[&str], Intent)] = &[
    (&["women", "ladies"], Intent::Female),
    (&["men"], Intent::Male),
];

/// Category keywords a men's product must carry to be eligible.
pub const MENS_APPAREL_KEYWORDS: &[&str] = &["top", "shirt", "t-shirt", "tank"];

impl Intent {
    pub fn classify(query: &str) -> Intent {
        let q = query.to_lowercase();
        INTENT_RULES
            .iter()
            .find(|(tokens, _)| tokens.iter().any(|t| q.contains(t)))
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Unfiltered)
    }

    /// Whether `product` may be retrieved under this intent.
    pub fn admits(&self, product: &ProductRecord) -> bool {
        match self {
            Intent::Female => is_womens_product(product),
            Intent::Male => is_mens_product(product) && is_mens_apparel(product),
            Intent::Unfiltered => true,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Female => write!(f, "female"),
            Intent::Male => write!(f, "male"),
            Intent::Unfiltered => write!(f, "unfiltered"),
        }
    }
}

/// Name or category mentions "men", and nothing marks it as women's.
pub fn is_mens_product(product: &ProductRecord) -> bool {
    let name = product.product_name.to_lowercase();
    let category = product.category.to_lowercase();
    (name.contains("men") || category.contains("men"))
        && !(name.contains("women") || category.contains("women") || name.contains("ladies"))
}

pub fn is_womens_product(product: &ProductRecord) -> bool {
    product.product_name.to_lowercase().contains("women")
        || product.category.to_lowercase().contains("women")
}

fn is_mens_apparel(product: &ProductRecord) -> bool {
    let category = product.category.to_lowercase();
    MENS_APPAREL_KEYWORDS.iter().any(|kw| category.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str) -> ProductRecord {
        ProductRecord::new("id", name, category)
    }

    #[test]
    fn test_women_wins_over_men_substring() {
        assert_eq!(Intent::classify("Show me WOMEN's jackets"), Intent::Female);
        assert_eq!(Intent::classify("ladies sandals"), Intent::Female);
    }

    #[test]
    fn test_men_only() {
        assert_eq!(Intent::classify("find men's tanks"), Intent::Male);
    }

    #[test]
    fn test_no_gender_token() {
        assert_eq!(Intent::classify("where is the milk"), Intent::Unfiltered);
    }

    #[test]
    fn test_mens_product_excludes_womens() {
        assert!(is_mens_product(&product("Men's Cotton Tank", "Tops")));
        assert!(!is_mens_product(&product("Women's Blouse", "Tops")));
        assert!(!is_mens_product(&product("Ladies Menswear-Style Shirt", "Shirts")));
        assert!(!is_mens_product(&product("Graphic Tee", "Men > Women Tops")));
    }

    #[test]
    fn test_male_intent_requires_apparel_category() {
        assert!(Intent::Male.admits(&product("Men's Cotton Tank", "Tops")));
        assert!(Intent::Male.admits(&product("Classic Tee", "Men's T-Shirts")));
        assert!(!Intent::Male.admits(&product("Men's Running Shoe", "Footwear")));
    }

    #[test]
    fn test_female_intent_checks_name_or_category() {
        assert!(Intent::Female.admits(&product("Floral Dress", "Women's Clothing")));
        assert!(Intent::Female.admits(&product("Women's Blouse", "Tops")));
        assert!(!Intent::Female.admits(&product("Ladies Scarf", "Accessories")));
    }
}
