use serde::Serialize;

use crate::parser::specs::SpecKind;

/// One labeled product attribute, e.g. "Depth" / "10 in".
///
/// The kind is derived from the label at construction time and never changes;
/// two specifications with the same label always classify identically.
#[derive(Debug, Clone, Serialize)]
pub struct Specification {
    pub label: String,
    pub value: String,
    pub kind: SpecKind,
}

impl Specification {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        let kind = SpecKind::classify(&label);
        Specification {
            label,
            value: value.into(),
            kind,
        }
    }
}

/// One normalized product record, built once per crawl row.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub sku: String,
    pub short_description: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub manufacturer_image_url: String,
    /// Category as derived from the human-readable crumb, "Home " stripped.
    pub category: String,
    /// Crumb trail in document order, root anchor excluded.
    pub crumbs: Vec<String>,
    pub specifications: Vec<Specification>,
}

/// Output of one full normalization pass.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Every distinct specification label seen, sorted alphabetically.
    /// Sized and ordered for fixed output columns.
    pub specification_labels: Vec<String>,
    /// Longest crumb trail seen across all rows.
    pub max_crumb_count: usize,
}

impl Catalog {
    /// Keep only products whose category starts with the given label.
    /// The label columns are left untouched so output stays stable across
    /// filtered and unfiltered exports of the same input.
    pub fn retain_category(&mut self, label: &str) {
        self.products.retain(|p| p.category.starts_with(label));
    }
}
