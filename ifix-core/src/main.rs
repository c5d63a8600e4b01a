use anyhow::Context;
use ifix_core::{Config, Marketplace, SeedData, init_logger_with_file};
use serde_json::json;
use shared::order::OrderStatus;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Logging
    init_logger_with_file(
        &config.log_level,
        config.log_json,
        config.log_dir.as_deref().map(Path::new),
    )?;
    tracing::info!(environment = %config.environment, "iFix demo starting");

    // 3. Seed
    let seed = match &config.seed_file {
        Some(path) => SeedData::from_file(path).with_context(|| format!("loading {path}"))?,
        None => SeedData::demo(),
    };
    let marketplace = Marketplace::from_config(&config);
    seed.load_into(&marketplace)?;

    // 4. Drive the active order to EVALUATED
    let order = marketplace
        .active_order()
        .context("seed has no active order")?;
    let technician_id = order.technician_id().to_string();

    for target in [
        OrderStatus::Accepted,
        OrderStatus::EnRoute,
        OrderStatus::InProgress,
        OrderStatus::Completed,
    ] {
        let current = marketplace
            .get_order(&order.id)
            .map(|o| o.current_status)
            .context("active order vanished")?;
        if current.can_transition_to(target) {
            marketplace
                .orders()
                .try_transition(&order.id, target, None)?;
        }
    }
    marketplace
        .orders()
        .try_evaluate(&order.id, 5, Some("Excelente atendimento!"))?;

    // 5. Report
    let report = json!({
        "order": marketplace.get_order(&order.id),
        "technician": marketplace.technician_profile(&technician_id),
        "audit_log": marketplace.audit_log(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
