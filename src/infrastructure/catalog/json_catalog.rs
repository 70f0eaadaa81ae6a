use crate::domain::entities::product::ProductRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::product_catalog::ProductCatalog;
use std::collections::HashMap;
use std::path::Path;

/// In-memory catalog backed by a JSON product list.
pub struct JsonCatalog {
    products: Vec<ProductRecord>,
    by_id: HashMap<String, usize>,
}

impl JsonCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Result<Self, DomainError> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (i, p) in products.iter().enumerate() {
            if by_id.insert(p.product_id.clone(), i).is_some() {
                return Err(DomainError::Artifact(format!(
                    "duplicate product id {} in catalog",
                    p.product_id
                )));
            }
        }
        Ok(Self { products, by_id })
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Artifact(format!("cannot read catalog {}: {e}", path.display()))
        })?;
        let products: Vec<ProductRecord> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::Artifact(format!("invalid catalog {}: {e}", path.display()))
        })?;
        Self::new(products)
    }

    pub fn save(products: &[ProductRecord], path: &Path) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(products)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl ProductCatalog for JsonCatalog {
    fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.by_id.get(id).map(|&i| &self.products[i])
    }

    fn all(&self) -> &[ProductRecord] {
        &self.products
    }
}
