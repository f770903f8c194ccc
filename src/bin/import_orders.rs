//! Loads merchants and orders exported by the ordering backend into the
//! order history database.
//!
//! Usage: `import_orders <export.json>`

use std::env;
use std::fs;

use config::Config;
use dotenvy::dotenv;
use serde::Deserialize;

use pushkind_orders::db::{establish_connection_pool, run_migrations};
use pushkind_orders::domain::order::{NewCompany, NewOrder};
use pushkind_orders::models::config::ServerConfig;
use pushkind_orders::repository::errors::RepositoryResult;
use pushkind_orders::repository::{DieselRepository, OrderWriter};

/// Shape of the export file.
#[derive(Debug, Default, Deserialize)]
struct OrderExport {
    #[serde(default)]
    companies: Vec<NewCompany>,
    #[serde(default)]
    orders: Vec<NewOrder>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ImportSummary {
    companies: usize,
    orders: usize,
    failed: usize,
}

fn import<R>(export: OrderExport, repo: &R) -> RepositoryResult<ImportSummary>
where
    R: OrderWriter,
{
    let mut summary = ImportSummary::default();

    for new_company in &export.companies {
        let company = repo.create_company(new_company)?;
        log::info!("Created company {} ({})", company.name, company.id);
        summary.companies += 1;
    }

    for new_order in &export.orders {
        match repo.create_order(new_order) {
            Ok(order) => {
                log::info!(
                    "Imported order {} for customer {} with {} items",
                    order.id,
                    order.customer_id,
                    order.items.len()
                );
                summary.orders += 1;
            }
            Err(e) => {
                log::error!("Error importing order {}: {e}", new_order.id);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(path) = env::args().nth(1) else {
        log::error!("Usage: import_orders <export.json>");
        std::process::exit(2);
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let export = match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str::<OrderExport>(&raw).map_err(|e| e.to_string()))
    {
        Ok(export) => export,
        Err(err) => {
            log::error!("Failed to read export {path}: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    match import(export, &repo) {
        Ok(summary) => {
            log::info!(
                "Import finished: {} companies, {} orders, {} failed",
                summary.companies,
                summary.orders,
                summary.failed
            );
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Import aborted: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pushkind_orders::domain::order::{Company, Order};
    use pushkind_orders::domain::types::CompanyId;
    use pushkind_orders::repository::errors::RepositoryError;

    use super::*;

    const EXPORT: &str = r#"{
        "companies": [
            { "name": "Pizza Place", "slug": "pizza-place" },
            { "id": 7, "name": "Sushi Bar", "slug": "sushi-bar" }
        ],
        "orders": [
            {
                "id": "o1",
                "customerId": "customer-1",
                "createdAt": "2025-01-13T15:00:00Z",
                "status": "delivered",
                "companyId": 1,
                "items": [{ "productName": "Margherita", "quantity": 1, "subtotal": 4500 }],
                "total": 4500,
                "paymentMethod": "pix"
            },
            {
                "id": "o3",
                "customerId": "customer-1",
                "createdAt": "2025-01-15T15:00:00Z",
                "status": "delivered",
                "companyId": 7,
                "items": [{ "productName": "Salmon roll", "quantity": 2, "subtotal": 6000 }],
                "total": 6000,
                "paymentMethod": "card"
            },
            {
                "id": "o2",
                "customerId": "customer-1",
                "createdAt": "2025-01-14T15:00:00Z",
                "status": "pending",
                "companyId": 9,
                "items": [],
                "total": 0,
                "paymentMethod": "cash"
            }
        ]
    }"#;

    /// Accepts orders only for the companies it has created.
    #[derive(Default)]
    struct FakeWriter {
        companies: RefCell<Vec<Company>>,
    }

    impl OrderWriter for FakeWriter {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
            let mut companies = self.companies.borrow_mut();
            let id = match new_company.id {
                Some(id) => id,
                None => CompanyId::new(i32::try_from(companies.len() + 1).unwrap())?,
            };
            let company = Company {
                id,
                name: new_company.name.clone(),
                profile_image: new_company.profile_image.clone(),
                slug: new_company.slug.clone(),
            };
            companies.push(company.clone());
            Ok(company)
        }

        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order> {
            let company = self
                .companies
                .borrow()
                .iter()
                .find(|c| c.id == new_order.company_id)
                .cloned()
                .ok_or_else(|| RepositoryError::ConstraintViolation("FOREIGN KEY".into()))?;

            Ok(Order {
                id: new_order.id.clone(),
                customer_id: new_order.customer_id.clone(),
                created_at: new_order.created_at,
                status: new_order.status.clone(),
                company_id: new_order.company_id,
                company: Some(company),
                items: new_order.items.clone(),
                total: new_order.total,
                payment_method: new_order.payment_method.clone(),
                delivery_address: new_order.delivery_address.clone(),
            })
        }
    }

    #[test]
    fn failed_orders_are_counted_and_skipped() {
        let export: OrderExport = serde_json::from_str(EXPORT).unwrap();
        let repo = FakeWriter::default();

        let summary = import(export, &repo).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                companies: 2,
                orders: 2,
                failed: 1,
            }
        );
        assert_eq!(
            repo.companies.borrow()[0].slug.as_ref().map(|s| s.as_str()),
            Some("pizza-place")
        );
    }

    #[test]
    fn exported_company_ids_are_kept() {
        let export: OrderExport = serde_json::from_str(EXPORT).unwrap();
        let repo = FakeWriter::default();

        import(export, &repo).unwrap();

        let companies = repo.companies.borrow();
        assert_eq!(companies[1].id.get(), 7);
        assert_eq!(
            companies[1].slug.as_ref().map(|s| s.as_str()),
            Some("sushi-bar")
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let export: OrderExport = serde_json::from_str("{}").unwrap();
        let summary = import(export, &FakeWriter::default()).unwrap();
        assert_eq!(summary, ImportSummary::default());
    }
}
