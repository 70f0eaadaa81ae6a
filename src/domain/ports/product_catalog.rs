use crate::domain::entities::product::ProductRecord;

/// Read-only product lookup, populated once at startup.
pub trait ProductCatalog: Send + Sync {
    fn get(&self, id: &str) -> Option<&ProductRecord>;
    /// All records in load order.
    fn all(&self) -> &[ProductRecord];

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
