use crate::cli::commands::open_session;
use crate::cli::commands::schedule::{schedule_table, to_filter};
use crate::cli::parser::{Commands, ReportKind};
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, stat, warning};
use crate::utils::date::today;
use crate::utils::formatting::{money, opt_or_dash};
use crate::utils::table::Table;

fn print_table(table: Table, empty: &str) {
    if table.is_empty() {
        warning(empty);
    } else {
        print!("{}", table.render());
    }
}

/// `dashboard`
pub fn dashboard(cfg: &Config) -> AppResult<()> {
    let (pool, _session) = open_session(cfg)?;
    let d = ReportLogic::dashboard(&pool, today(), cfg.upcoming_limit)?;

    header("Dashboard");
    stat("Clients", d.clients_count);
    stat("Objects", d.objects_count);
    stat("Active employees", d.active_employees_count);
    stat("Services", d.services_count);
    stat("Scheduled work orders", d.scheduled_count);
    stat("Completed this month", d.completed_month);
    stat("Revenue this month", money(Some(d.revenue_month), &cfg.currency));

    header("Upcoming");
    print_table(
        schedule_table(&d.upcoming, &cfg.currency),
        "No upcoming work orders.",
    );
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Report { kind } = cmd else {
        return Ok(());
    };

    let (pool, _session) = open_session(cfg)?;
    let cur = cfg.currency.as_str();

    match kind {
        ReportKind::Clients => {
            let r = ReportLogic::clients(&pool)?;
            header("Clients report");

            let mut table =
                Table::with_headers(&["ID", "NAME", "PHONE", "OBJECTS", "ORDERS", "REVENUE"]);
            for row in r.rows {
                table.add_row(vec![
                    row.client.id.to_string(),
                    row.client.full_name,
                    opt_or_dash(row.client.phone.as_deref()),
                    row.objects_count.to_string(),
                    row.total_orders.to_string(),
                    money(Some(row.total_revenue), cur),
                ]);
            }
            print_table(table, "No clients.");

            header("Totals");
            stat("Clients", r.stats.total);
            stat("With phone", r.stats.with_phone);
            stat("With email", r.stats.with_email);
            stat("With at least one object", r.stats.with_objects);
        }

        ReportKind::Objects => {
            let r = ReportLogic::objects(&pool)?;
            header("Objects report");

            let mut table = Table::with_headers(&[
                "ID", "NAME", "CLIENT", "TYPE", "AREA", "ORDERS", "REVENUE", "LAST SERVICE",
            ]);
            for row in r.rows {
                table.add_row(vec![
                    row.object.id.to_string(),
                    row.object.name,
                    row.client_name,
                    row.object.object_type.label().to_string(),
                    row.object
                        .area
                        .map_or_else(|| "--".to_string(), |a| format!("{a:.2}")),
                    row.total_orders.to_string(),
                    money(Some(row.total_revenue), cur),
                    row.last_service_date
                        .map_or_else(|| "--".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                ]);
            }
            print_table(table, "No objects.");

            header("Totals");
            stat("Objects", r.stats.total);
            stat(
                "Total area",
                format!("{:.2} {}", r.stats.total_area, cfg.area_unit),
            );
            stat("With a completed service", r.stats.with_services);
            stat("Object types in use", r.stats.types_count);
        }

        ReportKind::Employees => {
            let r = ReportLogic::employees(&pool)?;
            header("Employees report");

            let mut table = Table::with_headers(&[
                "ID", "NAME", "STATUS", "ORDERS", "COMPLETED", "REVENUE",
            ]);
            for row in r.rows {
                table.add_row(vec![
                    row.employee.id.to_string(),
                    row.employee.full_name,
                    row.employee.status.label().to_string(),
                    row.total_orders.to_string(),
                    row.completed_orders.to_string(),
                    money(Some(row.total_revenue), cur),
                ]);
            }
            print_table(table, "No employees.");

            header("Totals");
            stat("Employees", r.stats.total);
            stat("Active", r.stats.active);
            stat("Inactive", r.stats.inactive);
            stat("Average salary (active)", money(Some(r.stats.avg_salary), cur));
            stat("Total salary (active)", money(Some(r.stats.total_salary), cur));
        }

        ReportKind::Services => {
            let r = ReportLogic::services(&pool)?;
            header("Services report");

            let mut table = Table::with_headers(&[
                "ID", "NAME", "PRICE", "UNIT", "ORDERS", "COMPLETED", "REVENUE",
            ]);
            for row in r.rows {
                table.add_row(vec![
                    row.service.id.to_string(),
                    row.service.name,
                    money(row.service.price_per_unit, cur),
                    opt_or_dash(row.service.unit.as_deref()),
                    row.total_orders.to_string(),
                    row.completed_orders.to_string(),
                    money(Some(row.total_revenue), cur),
                ]);
            }
            print_table(table, "No services.");

            header("Totals");
            stat("Services", r.stats.total);
            stat("Average price", money(Some(r.stats.avg_price), cur));
            stat("Completed orders", r.stats.completed_orders);
            stat("Revenue", money(Some(r.stats.total_revenue), cur));
        }

        ReportKind::Schedules { filter } => {
            let r = ReportLogic::schedules(&pool, &to_filter(filter)?, today())?;
            header("Work orders report");
            print_table(schedule_table(&r.rows, cur), "No work orders.");

            header("Totals");
            stat("Work orders", r.stats.total);
            stat("Scheduled", r.stats.scheduled);
            stat("Completed", r.stats.completed);
            stat("Cancelled", r.stats.cancelled);
            stat("Revenue", money(Some(r.stats.total_revenue), cur));
            stat("Revenue this month", money(Some(r.stats.revenue_month), cur));
            stat("Average completed order", money(Some(r.stats.avg_order_cost), cur));
        }
    }

    Ok(())
}
