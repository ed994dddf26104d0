use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::record::{Catalog, Product};

/// Fixed columns written after the crumb block, in order.
const FIXED_HEADERS: &[&str] = &[
    "Category",
    "SKU",
    "Short Description",
    "Price",
    "Description",
    "Product Image Url",
    "Manufacturer Image Url",
];

/// Render the catalog as a delimited table.
///
/// Layout: `max_crumb_count` leading crumb columns, the fixed product
/// columns, then one column per distinct specification label (alphabetical).
/// Spec cells are filled by label lookup and left empty when a product
/// lacks that specification.
pub fn write_table(path: &Path, catalog: &Catalog, delimiter: char) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    write_row(&mut w, &header_row(catalog), delimiter)?;
    for product in &catalog.products {
        write_row(&mut w, &product_row(product, catalog), delimiter)?;
    }
    w.flush()?;

    info!(
        "Wrote {} products x {} columns to {}",
        catalog.products.len(),
        catalog.max_crumb_count + FIXED_HEADERS.len() + catalog.specification_labels.len(),
        path.display()
    );
    Ok(())
}

/// Render the catalog as JSON Lines, one product per line.
pub fn write_jsonl(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for product in &catalog.products {
        serde_json::to_writer(&mut w, product)?;
        writeln!(w)?;
    }
    w.flush()?;

    info!("Wrote {} products to {}", catalog.products.len(), path.display());
    Ok(())
}

fn header_row(catalog: &Catalog) -> Vec<String> {
    let mut headers = Vec::with_capacity(
        catalog.max_crumb_count + FIXED_HEADERS.len() + catalog.specification_labels.len(),
    );
    for i in 0..catalog.max_crumb_count {
        headers.push(crumb_header(i).to_string());
    }
    headers.extend(FIXED_HEADERS.iter().map(|h| h.to_string()));
    headers.extend(catalog.specification_labels.iter().cloned());
    headers
}

fn crumb_header(index: usize) -> &'static str {
    match index {
        0 => "Product Category",
        1 => "Product Type",
        _ => "Product Sub Type",
    }
}

fn product_row(product: &Product, catalog: &Catalog) -> Vec<String> {
    let mut row = Vec::with_capacity(
        catalog.max_crumb_count + FIXED_HEADERS.len() + catalog.specification_labels.len(),
    );

    for i in 0..catalog.max_crumb_count {
        row.push(product.crumbs.get(i).cloned().unwrap_or_default());
    }

    row.push(product.category.clone());
    row.push(product.sku.clone());
    row.push(product.short_description.clone());
    row.push(product.price.to_string());
    row.push(product.description.clone());
    row.push(product.image_url.clone());
    row.push(product.manufacturer_image_url.clone());

    let values: HashMap<&str, &str> = product
        .specifications
        .iter()
        .map(|s| (s.label.as_str(), s.value.as_str()))
        .collect();
    for label in &catalog.specification_labels {
        row.push(values.get(label.as_str()).unwrap_or(&"").to_string());
    }

    row
}

fn needs_quotes(field: &str, delimiter: char) -> bool {
    field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String], delimiter: char) -> std::io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", delimiter)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, delimiter) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Specification;

    fn sample_catalog() -> Catalog {
        Catalog {
            products: vec![Product {
                sku: "K-123".to_string(),
                short_description: "Kitchen sink, 33\"".to_string(),
                description: "Drop-in sink".to_string(),
                price: 129.99,
                image_url: "http://example.com/i.jpg".to_string(),
                manufacturer_image_url: String::new(),
                category: "Plumbing Sinks".to_string(),
                crumbs: vec!["Plumbing Sinks".to_string()],
                specifications: vec![Specification::new("Depth", "10 in")],
            }],
            specification_labels: vec!["Depth".to_string(), "Material".to_string()],
            max_crumb_count: 2,
        }
    }

    #[test]
    fn header_covers_crumbs_fixed_and_labels() {
        let headers = header_row(&sample_catalog());
        assert_eq!(headers[0], "Product Category");
        assert_eq!(headers[1], "Product Type");
        assert_eq!(headers[2], "Category");
        assert_eq!(headers[8], "Manufacturer Image Url");
        assert_eq!(&headers[9..], ["Depth", "Material"]);
    }

    #[test]
    fn product_row_pads_crumbs_and_fills_spec_cells_by_label() {
        let catalog = sample_catalog();
        let row = product_row(&catalog.products[0], &catalog);
        assert_eq!(row[0], "Plumbing Sinks");
        assert_eq!(row[1], ""); // padded to max_crumb_count
        assert_eq!(row[3], "K-123");
        assert_eq!(row[5], "129.99");
        assert_eq!(row[9], "10 in");
        assert_eq!(row[10], ""); // no Material spec on this product
    }

    #[test]
    fn cells_with_delimiters_or_quotes_are_escaped() {
        let mut buf = Vec::new();
        write_row(
            &mut buf,
            &["a,b".to_string(), "say \"hi\"".to_string(), "c".to_string()],
            ',',
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"a,b\",\"say \"\"hi\"\"\",c\n"
        );
    }
}
