//! Seed the product catalog from a YAML file.
//!
//! This command reads catalog rows from a YAML file, validates them, and
//! inserts them through the same repository the API server uses.
//!
//! # Environment Variables
//!
//! - `VINAYAK_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`, matching the server)

use std::path::Path;

use secrecy::SecretString;
use tracing::{error, info};

use rust_decimal::Decimal;
use vinayak_server::db::{self, PgProductRepository, ProductRepository};
use vinayak_server::models::NewProduct;

/// Seed catalog products from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML seed file
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, or database operations fail.
pub async fn products(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = std::env::var("VINAYAK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "VINAYAK_DATABASE_URL not set")?;

    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let rows: Vec<NewProduct> = serde_yaml::from_str(&content)?;

    info!(products = rows.len(), "Parsed seed file");

    let errors = validate_rows(&rows);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!("Seed file validated successfully");

    // Connect to database
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = PgProductRepository::new(pool);

    let mut inserted = 0_usize;
    let mut failed = Vec::new();
    for row in rows {
        let name = row.name.clone();
        match repo.create(row).await {
            Ok(product) => {
                inserted += 1;
                info!("  + {} ({})", product.name, product.category);
            }
            Err(e) => failed.push((name, e)),
        }
    }

    // Print summary
    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");

    if !failed.is_empty() {
        error!("  Errors: {}", failed.len());
        for (name, err) in &failed {
            error!("    - {name}: {err}");
        }
        return Err(format!("{} products failed to insert", failed.len()).into());
    }

    Ok(())
}

/// Check seed rows for problems the database would reject.
fn validate_rows(rows: &[NewProduct]) -> Vec<String> {
    let mut errors = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        if row.name.trim().is_empty() {
            errors.push(format!("row {idx}: name is empty"));
        }
        if row.price <= Decimal::ZERO {
            errors.push(format!("row {idx} ({}): price must be positive", row.name));
        }
    }
    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Vec<NewProduct> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parses_seed_rows() {
        let rows = parse(
            r"
- name: Kaju Katli
  description: Cashew fudge with silver leaf.
  price: 450.0
  category: sweets
  isFeatured: true

- name: Bhakarwadi
  price: 180.0
  category: namkeens
",
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Kaju Katli");
        assert!(rows[0].is_featured);
        assert_eq!(rows[1].description, None);
        assert!(!rows[1].is_featured);
        assert!(validate_rows(&rows).is_empty());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result: Result<Vec<NewProduct>, _> = serde_yaml::from_str(
            r"
- name: Cola
  price: 40.0
  category: beverages
",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_flags_bad_rows() {
        let rows = parse(
            r"
- name: '  '
  price: 100.0
  category: sweets

- name: Chakli
  price: 0.0
  category: namkeens
",
        );

        let errors = validate_rows(&rows);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("name is empty"));
        assert!(errors[1].contains("price must be positive"));
    }
}
