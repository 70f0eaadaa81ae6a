//! Retailer CSV export → catalog records.
//!
//! Column positions follow the retailer's product export: price (2),
//! product id (3), image URL list as a JSON array (9), clearance flag (11),
//! category (13), product name (15).

use crate::domain::entities::product::ProductRecord;
use crate::domain::error::DomainError;
use crate::domain::values::price::Price;
use std::io::Read;

const COL_PRICE: usize = 2;
const COL_ID: usize = 3;
const COL_IMAGES: usize = 9;
const COL_CLEARANCE: usize = 11;
const COL_CATEGORY: usize = 13;
const COL_NAME: usize = 15;

/// Summary of one import run.
#[derive(Debug, Default, serde::Serialize)]
pub struct ImportReport {
    pub rows_read: usize,
    pub products: usize,
    pub skipped: Vec<String>,
}

pub fn import_csv<R: Read>(reader: R) -> Result<(Vec<ProductRecord>, ImportReport), DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut products = Vec::new();
    let mut report = ImportReport::default();

    for (line, row) in rdr.records().enumerate() {
        report.rows_read += 1;
        let row = row.map_err(|e| DomainError::Parse(format!("CSV row {}: {e}", line + 2)))?;
        if row.len() <= COL_NAME {
            tracing::warn!(row = line + 2, columns = row.len(), "skipping short CSV row");
            report.skipped.push(format!("row {}: only {} columns", line + 2, row.len()));
            continue;
        }
        products.push(parse_row(&row));
    }

    report.products = products.len();
    Ok((products, report))
}

fn parse_row(row: &csv::StringRecord) -> ProductRecord {
    let field = |i: usize| row.get(i).unwrap_or_default();

    let price = field(COL_PRICE)
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|v| Price::new(v).ok())
        .unwrap_or_default();

    let mut product = ProductRecord::new(field(COL_ID), field(COL_NAME), field(COL_CATEGORY));
    product.product_image_url = pick_image(field(COL_IMAGES));
    product.original_price = price;
    product.discounted_price = price;
    product.offer_type = Some("None".into());
    product.is_clearance = field(COL_CLEARANCE).trim().eq_ignore_ascii_case("true");
    product
}

/// First SEO `.jpeg` image, else the first image, else empty.
fn pick_image(raw: &str) -> String {
    let urls: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw).unwrap_or_default()
    } else {
        Vec::new()
    };
    urls.iter()
        .find(|u| u.contains("/seo/") && u.to_lowercase().ends_with(".jpeg"))
        .or_else(|| urls.first())
        .cloned()
        .unwrap_or_default()
}
