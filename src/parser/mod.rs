pub mod crumbs;
pub mod specs;
pub mod text;

use std::collections::BTreeSet;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::PassError;
use crate::record::{Catalog, Product};
use crate::rows::{Field, RawRow};

const DESCRIPTION_LABEL: &str = "Description ";
const HOME_LABEL: &str = "Home ";

/// Knobs for one normalization pass.
pub struct PassOptions {
    pub currency_symbol: String,
    pub spec_delimiter: char,
}

impl Default for PassOptions {
    fn default() -> Self {
        PassOptions {
            currency_symbol: "$".to_string(),
            spec_delimiter: ':',
        }
    }
}

/// Normalize one raw row into a product. `row_number` is the 1-based data
/// row, used only to annotate failures.
pub fn normalize_row(
    row: &RawRow,
    row_number: usize,
    options: &PassOptions,
) -> Result<Product, PassError> {
    let crumbs = crumbs::extract(row.get(Field::CrumbRaw))
        .map_err(|source| PassError::Crumb { row: row_number, source })?;

    let specifications = specs::extract(row.get(Field::SpecsRaw), options.spec_delimiter)
        .map_err(|source| PassError::Specs { row: row_number, source })?;

    Ok(Product {
        sku: row.get(Field::Sku).to_string(),
        short_description: row.get(Field::ShortDesc).to_string(),
        description: text::strip_leading_label(row.get(Field::Desc), DESCRIPTION_LABEL)
            .to_string(),
        price: text::parse_currency(row.get(Field::Price), &options.currency_symbol),
        image_url: row.get(Field::Image).to_string(),
        manufacturer_image_url: row.get(Field::ManuImage).to_string(),
        category: text::strip_leading_label(row.get(Field::Crumb), HOME_LABEL).to_string(),
        crumbs,
        specifications,
    })
}

/// Run a full normalization pass over every row.
///
/// Rows normalize independently, so chunks go through rayon; the aggregate
/// fold then runs sequentially in input order, which keeps product order
/// and first-error selection deterministic no matter how workers finish.
/// Any row failure aborts the pass with no partial output.
pub fn run_pass(rows: &[RawRow], options: &PassOptions) -> Result<Catalog, PassError> {
    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut products = Vec::with_capacity(rows.len());
    let mut labels: BTreeSet<String> = BTreeSet::new();
    let mut max_crumb_count = 0;
    let mut row_number = 1;

    for chunk in rows.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .enumerate()
            .map(|(i, row)| normalize_row(row, row_number + i, options))
            .collect();

        for result in results {
            let product = result?;
            max_crumb_count = max_crumb_count.max(product.crumbs.len());
            for spec in &product.specifications {
                labels.insert(spec.label.clone());
            }
            products.push(product);
        }

        row_number += chunk.len();
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(Catalog {
        products,
        // BTreeSet iteration is already the alphabetical order the sink
        // needs for its fixed label columns.
        specification_labels: labels.into_iter().collect(),
        max_crumb_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::specs::SpecKind;

    const FIELD_COUNT: usize = 26;

    fn row(crumb: &str, price: &str, desc: &str, specs_raw: &str, crumb_raw: &str) -> RawRow {
        let mut fields = vec![String::new(); FIELD_COUNT];
        fields[Field::Crumb as usize] = crumb.to_string();
        fields[Field::Sku as usize] = "SKU-1".to_string();
        fields[Field::ShortDesc as usize] = "Short".to_string();
        fields[Field::Price as usize] = price.to_string();
        fields[Field::SpecsRaw as usize] = specs_raw.to_string();
        fields[Field::Desc as usize] = desc.to_string();
        fields[Field::CrumbRaw as usize] = crumb_raw.to_string();
        RawRow::new(fields)
    }

    fn good_row() -> RawRow {
        row(
            "Home Plumbing Sinks",
            "$129.99",
            "Description Drop-in sink",
            r#"<meta content="Material:Steel"/><meta content="Depth:10in"/>"#,
            r#"<a>Home</a><a>Plumbing Sinks</a><a>Kitchen</a>"#,
        )
    }

    #[test]
    fn normalize_row_builds_a_clean_product() {
        let product = normalize_row(&good_row(), 1, &PassOptions::default()).unwrap();
        assert_eq!(product.sku, "SKU-1");
        assert_eq!(product.category, "Plumbing Sinks");
        assert_eq!(product.description, "Drop-in sink");
        assert_eq!(product.price, 129.99);
        assert_eq!(product.crumbs, ["Plumbing Sinks", "Kitchen"]);
        assert_eq!(product.specifications[0].kind, SpecKind::Depth);
        assert_eq!(product.specifications[1].kind, SpecKind::Material);
    }

    #[test]
    fn pass_accumulates_labels_and_max_depth() {
        let rows = vec![
            good_row(),
            row(
                "Home Plumbing Faucets",
                "N/A",
                "No label here",
                r#"<meta content="Spout Type:Gooseneck"/><meta content="Depth:8in"/>"#,
                r#"<a>Home</a><a>Plumbing Faucets</a>"#,
            ),
        ];
        let catalog = run_pass(&rows, &PassOptions::default()).unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.max_crumb_count, 2);
        // Deduplicated across rows, alphabetical.
        assert_eq!(
            catalog.specification_labels,
            ["Depth", "Material", "Spout Type"]
        );
        // Lenient price path never fails the row.
        assert_eq!(catalog.products[1].price, 0.0);
        assert_eq!(catalog.products[1].description, "No label here");
    }

    #[test]
    fn crumb_failure_aborts_the_pass_with_row_context() {
        let rows = vec![
            good_row(),
            row("Home X", "$1", "Description x", "", "<p>no anchors</p>"),
        ];
        let err = run_pass(&rows, &PassOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PassError::Crumb {
                row: 2,
                source: ParseError::EmptyCrumbTrail
            }
        ));
    }

    #[test]
    fn spec_failure_aborts_the_pass_with_row_context() {
        let rows = vec![row(
            "Home X",
            "$1",
            "Description x",
            r#"content="NoDelimiterHere""#,
            "<a>Home</a><a>X</a>",
        )];
        let err = run_pass(&rows, &PassOptions::default()).unwrap_err();
        match err {
            PassError::Specs { row: 1, source } => {
                assert!(matches!(source, ParseError::MalformedSpecMarker { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_row_set_yields_an_empty_catalog() {
        let catalog = run_pass(&[], &PassOptions::default()).unwrap();
        assert!(catalog.products.is_empty());
        assert!(catalog.specification_labels.is_empty());
        assert_eq!(catalog.max_crumb_count, 0);
    }
}
