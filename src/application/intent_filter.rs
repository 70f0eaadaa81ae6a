use crate::domain::entities::product::ProductRecord;
use crate::domain::values::intent::Intent;
use std::collections::HashSet;

/// Products a query may retrieve, with the intent that selected them.
#[derive(Debug, Clone)]
pub struct Eligibility {
    pub intent: Intent,
    pub ids: HashSet<String>,
}

impl Eligibility {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub fn classify_and_filter(query_text: &str, catalog: &[ProductRecord]) -> Eligibility {
    let intent = Intent::classify(query_text);
    let ids = catalog
        .iter()
        .filter(|p| intent.admits(p))
        .map(|p| p.product_id.clone())
        .collect();
    Eligibility { intent, ids }
}
