use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{Commands, ScheduleArgs, ScheduleCmd, ScheduleFilterArgs};
use crate::config::Config;
use crate::core::cost::{CostDeriver, parse_explicit_cost};
use crate::core::schedule::{ScheduleLogic, check_range};
use crate::errors::{AppError, AppResult};
use crate::models::schedule::{ScheduleDraft, ScheduleFilter, ScheduleView};
use crate::models::schedule_status::ScheduleStatus;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::date::{parse_optional_date, parse_required_date};
use crate::utils::formatting::{describe_status, money, opt_or_dash};
use crate::utils::numeric::parse_minutes;
use crate::utils::table::Table;
use crate::utils::time::parse_optional_time;

fn parse_status(raw: &str) -> AppResult<ScheduleStatus> {
    ScheduleStatus::from_code(raw).ok_or_else(|| AppError::InvalidStatus(raw.to_string()))
}

fn to_draft(args: &ScheduleArgs) -> AppResult<ScheduleDraft> {
    let mut draft = ScheduleDraft::new(args.object, args.service, parse_required_date(&args.date)?);
    draft.employee_id = args.employee;
    draft.time = parse_optional_time(args.time.as_ref())?;
    draft.duration_minutes = parse_minutes("duration", args.duration.as_ref())?;
    if let Some(s) = &args.status {
        draft.status = parse_status(s)?;
    }
    draft.explicit_cost = args.cost.clone();
    draft.notes = clean_opt(args.notes.as_ref());
    Ok(draft)
}

pub(crate) fn to_filter(args: &ScheduleFilterArgs) -> AppResult<ScheduleFilter> {
    let filter = ScheduleFilter {
        status: args.status.as_deref().map(parse_status).transpose()?,
        from: parse_optional_date(args.from.as_ref())?,
        to: parse_optional_date(args.to.as_ref())?,
    };
    check_range(&filter)?;
    Ok(filter)
}

/// Shared by `schedule list`, the dashboard and the schedules report.
pub(crate) fn schedule_table(views: &[ScheduleView], currency: &str) -> Table {
    let mut table = Table::with_headers(&[
        "ID", "DATE", "TIME", "CLIENT", "OBJECT", "SERVICE", "EMPLOYEE", "STATUS", "COST",
    ]);
    for v in views {
        let s = &v.schedule;
        table.add_row(vec![
            s.id.to_string(),
            s.date_str(),
            s.time_str().unwrap_or_else(|| "--".to_string()),
            v.client_name.clone(),
            v.object_name.clone(),
            v.service_name.clone(),
            opt_or_dash(v.employee_name.as_deref()),
            describe_status(s.status),
            money(s.cost, currency),
        ]);
    }
    table
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Schedule { action } = cmd else {
        return Ok(());
    };

    let (mut pool, session) = open_session(cfg)?;
    let deriver = CostDeriver::new(cfg.area_unit.clone());

    match action {
        ScheduleCmd::Add(args) | ScheduleCmd::Edit { fields: args, .. } => {
            let id = match action {
                ScheduleCmd::Edit { id, .. } => Some(*id),
                _ => None,
            };
            let draft = to_draft(args)?;

            if draft.explicit_cost.is_some()
                && parse_explicit_cost(draft.explicit_cost.as_deref()).is_none()
            {
                warning("Ignoring --cost: not a non-negative number, deriving from the catalog");
            }

            let saved = ScheduleLogic::save(&mut pool, &session, &deriver, id, &draft)?;

            if saved.employee_inactive {
                warning("The assigned employee is inactive");
            }
            let verb = if id.is_some() { "updated" } else { "added" };
            success(format!(
                "Work order #{} {verb}: cost {} ({})",
                saved.id,
                money(saved.quote.cost, &cfg.currency),
                saved.quote.origin
            ));
        }

        ScheduleCmd::Del { id, yes } => {
            if !confirmed(*yes, &format!("Delete work order #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let s = ScheduleLogic::delete(&mut pool, &session, *id)?;
            success(format!("Work order #{} on {} deleted", s.id, s.date_str()));
        }

        ScheduleCmd::List { filter } => {
            let views = ScheduleLogic::list(&pool, &to_filter(filter)?)?;
            if views.is_empty() {
                warning("No work orders.");
                return Ok(());
            }
            print!("{}", schedule_table(&views, &cfg.currency).render());
        }

        ScheduleCmd::Show { id } => {
            let v = ScheduleLogic::get(&pool, *id)?;
            let s = &v.schedule;
            println!("Work order #{}", s.id);
            println!(
                "  When:      {} {}",
                s.date_str(),
                s.time_str().unwrap_or_default()
            );
            println!("  Client:    {} ({})", v.client_name, opt_or_dash(v.client_phone.as_deref()));
            println!("  Object:    {}, {}", v.object_name, v.object_address);
            println!("  Service:   {}", v.service_name);
            println!("  Employee:  {}", opt_or_dash(v.employee_name.as_deref()));
            println!(
                "  Duration:  {}",
                s.duration_minutes
                    .map_or_else(|| "--".to_string(), |m| format!("{m} min"))
            );
            println!("  Status:    {}", describe_status(s.status));
            println!("  Cost:      {}", money(s.cost, &cfg.currency));
            println!("  Notes:     {}", opt_or_dash(s.notes.as_deref()));
        }
    }

    Ok(())
}
