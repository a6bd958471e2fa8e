use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value as JsonValue;

use posline_config::{AppConfig, PosConfig};
use posline_core::PosConfigId;
use posline_receipt::{BaseExport, finalize, project};
use posline_sales::Order;
use posline_salesperson::{CandidateLookup, DirectoryFile, InMemoryDirectory};

#[derive(Debug, Parser)]
#[command(
    name = "posline",
    about = "Project POS receipts and list salesperson candidates",
    after_help = "Examples:\n  posline project order.json base-export.json\n  posline candidates 3"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    #[command(about = "Print the receipt export for an order JSON file")]
    Project {
        order: PathBuf,
        #[arg(help = "Host export to extend (defaults to an empty object)")]
        base: Option<PathBuf>,
    },
    #[command(about = "List the salespersons selectable on a till")]
    Candidates { config_id: PosConfigId },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_directory(config: &AppConfig) -> anyhow::Result<InMemoryDirectory> {
    let file = match &config.salespersons_path {
        Some(path) => read_json::<DirectoryFile>(path)?,
        None => DirectoryFile::default(),
    };
    Ok(InMemoryDirectory::from_file(file))
}

/// Render the receipt export for an order file.
///
/// With a till configuration the receipt settings apply; without one the
/// plain projection is printed.
pub fn run_project(
    config: &AppConfig,
    order: &Path,
    base: Option<&Path>,
) -> anyhow::Result<JsonValue> {
    let order: Order = read_json(order)?;
    let base: BaseExport = match base {
        Some(path) => read_json(path)?,
        None => BaseExport::new(),
    };

    match &config.pos_config_path {
        Some(path) => {
            let pos_config: PosConfig = read_json(path)?;
            let receipt = finalize(&order, &pos_config, base);
            Ok(serde_json::json!({
                "order_id": receipt.order_id,
                "order_name": receipt.order_name,
                "date": receipt.date,
                "customer": receipt.customer,
                "export": receipt.export.to_value(),
            }))
        }
        None => Ok(project(&order, base).to_value()),
    }
}

pub async fn run_candidates(
    config: &AppConfig,
    config_id: &PosConfigId,
) -> anyhow::Result<JsonValue> {
    let directory = load_directory(config)?;
    let candidates = directory.candidates(Some(config_id)).await?;
    if candidates.is_empty() {
        tracing::warn!(config_id = %config_id, "no salespersons configured for this POS");
    }
    Ok(serde_json::to_value(candidates)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_temp(name: &str, value: &JsonValue) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("posline-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn order_json() -> JsonValue {
        json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "name": "Order 00001-001-0001",
            "created_at": "2026-01-05T10:00:00Z",
            "company": { "name": "<p>Acme</p>", "details": null },
            "lines": [
                { "id": 1, "product_name": "Tea", "quantity": 1, "unit_price": 300,
                  "attribution": { "person_id": 1, "person_name": "Alice", "image_ref": null } },
                { "id": 2, "product_name": "Cake", "quantity": 1, "unit_price": 450,
                  "attribution": { "person_id": 1, "person_name": "Alice", "image_ref": null } }
            ]
        })
    }

    #[test]
    fn parses_commands() {
        let cli = Cli::try_parse_from(["posline", "project", "o.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Project {
                order: PathBuf::from("o.json"),
                base: None
            }
        );

        let cli = Cli::try_parse_from(["posline", "project", "o.json", "b.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Project {
                order: PathBuf::from("o.json"),
                base: Some(PathBuf::from("b.json"))
            }
        );

        let cli = Cli::try_parse_from(["posline", "candidates", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Candidates {
                config_id: PosConfigId::from(3)
            }
        );
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(Cli::try_parse_from(["posline", "candidates", ""]).is_err());
        assert!(Cli::try_parse_from(["posline", "print"]).is_err());
        assert!(Cli::try_parse_from(["posline", "project"]).is_err());
    }

    #[test]
    fn project_without_till_config_prints_plain_projection() {
        let order = write_temp("order-plain.json", &order_json());
        let base = write_temp("base-plain.json", &json!({ "headerData": { "cashier": "Sam" } }));

        let value = run_project(&AppConfig::default(), &order, Some(&base)).unwrap();

        assert_eq!(value["headerData"]["cashier"], json!("Sam"));
        assert_eq!(value["headerData"]["company_name_clean"], json!("Acme"));
        assert_eq!(value["headerData"]["salespersons"], json!(["Alice"]));
    }

    #[test]
    fn project_with_till_config_applies_receipt_settings() {
        let order = write_temp("order-till.json", &order_json());
        let till = write_temp(
            "till.json",
            &json!({ "id": 1, "use_customized_receipt": false }),
        );
        let config = AppConfig {
            pos_config_path: Some(till),
            ..AppConfig::default()
        };

        let value = run_project(&config, &order, None).unwrap();

        assert_eq!(value["order_name"], json!("Order 00001-001-0001"));
        assert_eq!(value["export"], json!({}));
    }

    #[test]
    fn missing_order_file_reports_the_path() {
        let err = run_project(&AppConfig::default(), Path::new("/nonexistent/order.json"), None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/order.json"));
    }

    #[tokio::test]
    async fn candidates_come_from_the_directory_file() {
        let staff = write_temp(
            "staff.json",
            &json!({
                "salespersons": [{ "id": 1, "name": "Alice" }, { "id": 2, "name": "Bob" }],
                "pos_configs": [{
                    "id": 7,
                    "active_salesperson_feature": true,
                    "allowed_salesperson_ids": [2]
                }]
            }),
        );
        let config = AppConfig {
            salespersons_path: Some(staff),
            ..AppConfig::default()
        };

        let value = run_candidates(&config, &PosConfigId::from(7)).await.unwrap();

        assert_eq!(value, json!([{ "id": 2, "name": "Bob", "image_ref": null }]));
    }
}
