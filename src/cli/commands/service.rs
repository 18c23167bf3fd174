use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{Commands, ServiceArgs, ServiceCmd};
use crate::config::Config;
use crate::core::service::ServiceLogic;
use crate::errors::AppResult;
use crate::models::service::Service;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::formatting::{money, opt_or_dash};
use crate::utils::numeric::{parse_minutes, parse_non_negative};
use crate::utils::table::Table;

fn to_service(id: i64, args: &ServiceArgs) -> AppResult<Service> {
    Ok(Service {
        id,
        name: args.name.trim().to_string(),
        description: clean_opt(args.description.as_ref()),
        price_per_unit: parse_non_negative("price", args.price.as_ref())?,
        unit: clean_opt(args.unit.as_ref()),
        duration_minutes: parse_minutes("duration", args.duration.as_ref())?,
        notes: clean_opt(args.notes.as_ref()),
    })
}

fn fmt_price(s: &Service, currency: &str) -> String {
    match (&s.unit, s.price_per_unit) {
        (Some(unit), Some(_)) => format!("{} / {unit}", money(s.price_per_unit, currency)),
        _ => money(s.price_per_unit, currency),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Service { action } = cmd else {
        return Ok(());
    };

    let (mut pool, session) = open_session(cfg)?;

    match action {
        ServiceCmd::Add(args) => {
            let service = to_service(0, args)?;
            let id = ServiceLogic::add(&mut pool, &session, &service)?;
            success(format!("Service '{}' added (id {id})", service.name));
        }

        ServiceCmd::Edit { id, fields } => {
            let service = to_service(*id, fields)?;
            ServiceLogic::edit(&mut pool, &session, &service)?;
            success(format!("Service #{id} updated"));
        }

        ServiceCmd::Del { id, yes } => {
            if !confirmed(*yes, &format!("Delete service #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let service = ServiceLogic::delete(&mut pool, &session, *id)?;
            success(format!("Service '{}' deleted", service.name));
        }

        ServiceCmd::List => {
            let services = ServiceLogic::list(&pool)?;
            if services.is_empty() {
                warning("No services.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "NAME", "PRICE", "DURATION", "DESCRIPTION"]);
            for s in services {
                table.add_row(vec![
                    s.id.to_string(),
                    s.name.clone(),
                    fmt_price(&s, &cfg.currency),
                    s.duration_minutes
                        .map_or_else(|| "--".to_string(), |m| format!("{m} min")),
                    opt_or_dash(s.description.as_deref()),
                ]);
            }
            print!("{}", table.render());
        }

        ServiceCmd::Show { id } => {
            let s = ServiceLogic::get(&pool, *id)?;
            println!("Service #{}", s.id);
            println!("  Name:         {}", s.name);
            println!("  Description:  {}", opt_or_dash(s.description.as_deref()));
            println!("  Price:        {}", fmt_price(&s, &cfg.currency));
            println!(
                "  Duration:     {}",
                s.duration_minutes
                    .map_or_else(|| "--".to_string(), |m| format!("{m} min"))
            );
            if s.unit.as_deref() == Some(cfg.area_unit.as_str()) {
                println!("  Pricing:      scaled by object area");
            }
            println!("  Notes:        {}", opt_or_dash(s.notes.as_deref()));
        }
    }

    Ok(())
}
