//! Stock lookup over a small in-memory inventory table.

use crate::models::{InventoryRow, StockStatus};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Built-in sample rows used when no inventory file is supplied.
pub fn sample_inventory() -> Vec<InventoryRow> {
    vec![
        row(
            "SKU-ANL-CH-200",
            "Anlene Chocolate",
            "200g",
            "pcs",
            "GUDANG_PUSAT",
            7,
            5,
            NaiveDate::from_ymd_opt(2025, 9, 22),
        ),
        row("SKU-ANL-CH-600", "Anlene Chocolate", "600g", "pcs", "GUDANG_PUSAT", 15, 5, None),
        row("SKU-PS5D-825", "PS5 Digital", "825GB", "unit", "GUDANG_PUSAT", 12, 3, None),
        row(
            "SKU-PS5D-825",
            "PS5 Digital",
            "825GB",
            "unit",
            "TOKO_BEKASI",
            2,
            3,
            NaiveDate::from_ymd_opt(2025, 9, 25),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn row(
    sku: &str,
    product_name: &str,
    variant: &str,
    uom: &str,
    location: &str,
    qty: u32,
    low_stock_threshold: u32,
    eta_restock: Option<NaiveDate>,
) -> InventoryRow {
    InventoryRow {
        sku: sku.to_string(),
        product_name: product_name.to_string(),
        variant: variant.to_string(),
        uom: uom.to_string(),
        location: location.to_string(),
        qty,
        low_stock_threshold,
        eta_restock,
    }
}

/// Read inventory rows from a JSON array file.
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory file {}", path.display()))?;
    let rows: Vec<InventoryRow> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse inventory file {}", path.display()))?;
    log::info!("Loaded {} inventory rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Rows matching `sku`, optionally restricted to one location. Both keys are
/// compared trimmed and case-insensitively.
pub fn check_item(rows: &[InventoryRow], sku: &str, location: Option<&str>) -> Vec<StockStatus> {
    let sku = sku.trim().to_uppercase();
    let location = location
        .map(|loc| loc.trim().to_uppercase())
        .filter(|loc| !loc.is_empty());

    rows.iter()
        .filter(|r| r.sku.trim().to_uppercase() == sku)
        .filter(|r| {
            location
                .as_ref()
                .map_or(true, |loc| r.location.trim().to_uppercase() == *loc)
        })
        .map(|r| StockStatus {
            sku: r.sku.clone(),
            product_name: r.product_name.clone(),
            variant: r.variant.clone(),
            uom: r.uom.clone(),
            location: r.location.clone(),
            qty: r.qty,
            low_stock: r.low_stock_threshold > 0 && r.qty <= r.low_stock_threshold,
            eta_restock: r.eta_restock.map(|d| d.format("%Y-%m-%d").to_string()),
        })
        .collect()
}
