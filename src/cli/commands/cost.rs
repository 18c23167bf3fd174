use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::cost::{CostDeriver, CostOrigin};
use crate::core::schedule::ScheduleLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::formatting::money;

/// `cost`: run the derivation read-only and explain which rule answered.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Cost {
        object,
        service,
        cost,
    } = cmd
    {
        let (pool, _session) = open_session(cfg)?;
        let deriver = CostDeriver::new(cfg.area_unit.clone());

        let quote = ScheduleLogic::preview(&pool, &deriver, *object, *service, cost.as_deref())?;

        let why = match quote.origin {
            CostOrigin::Explicit => "explicit cost given".to_string(),
            CostOrigin::AreaScaled => {
                format!("price per {} × object area", deriver.area_unit())
            }
            CostOrigin::Flat => "flat service price".to_string(),
            CostOrigin::AreaFallback => {
                "object has no area, flat service price used".to_string()
            }
            CostOrigin::Unresolvable => "service missing or without a price".to_string(),
        };

        if quote.origin == CostOrigin::Unresolvable {
            warning(format!("Cost: {} ({why})", money(quote.cost, &cfg.currency)));
        } else {
            info(format!("Cost: {} ({why})", money(quote.cost, &cfg.currency)));
        }
        println!("rule: {}", quote.origin);
    }

    Ok(())
}
