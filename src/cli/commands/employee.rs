use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{Commands, EmployeeArgs, EmployeeCmd};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::employee_status::EmployeeStatus;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::date::parse_optional_date;
use crate::utils::formatting::{money, opt_or_dash};
use crate::utils::numeric::parse_non_negative;
use crate::utils::table::Table;

fn to_employee(id: i64, args: &EmployeeArgs) -> AppResult<Employee> {
    let status = match &args.status {
        Some(s) => {
            EmployeeStatus::from_code(s).ok_or_else(|| AppError::InvalidEmployeeStatus(s.clone()))?
        }
        None => EmployeeStatus::default(),
    };

    Ok(Employee {
        id,
        full_name: args.full_name.trim().to_string(),
        position: clean_opt(args.position.as_ref()),
        phone: clean_opt(args.phone.as_ref()),
        email: clean_opt(args.email.as_ref()),
        id_document: clean_opt(args.id_document.as_ref()),
        hire_date: parse_optional_date(args.hire_date.as_ref())?,
        salary: parse_non_negative("salary", args.salary.as_ref())?,
        status,
        notes: clean_opt(args.notes.as_ref()),
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let (mut pool, session) = open_session(cfg)?;

    match action {
        EmployeeCmd::Add(args) => {
            let employee = to_employee(0, args)?;
            let id = EmployeeLogic::add(&mut pool, &session, &employee)?;
            success(format!("Employee '{}' added (id {id})", employee.full_name));
        }

        EmployeeCmd::Edit { id, fields } => {
            let employee = to_employee(*id, fields)?;
            EmployeeLogic::edit(&mut pool, &session, &employee)?;
            success(format!("Employee #{id} updated"));
        }

        EmployeeCmd::Del { id, yes } => {
            if !confirmed(*yes, &format!("Delete employee #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let (employee, unassigned) = EmployeeLogic::delete(&mut pool, &session, *id)?;
            success(format!("Employee '{}' deleted", employee.full_name));
            if unassigned > 0 {
                warning(format!("{unassigned} work order(s) are now unassigned"));
            }
        }

        EmployeeCmd::List { active } => {
            let employees = if *active {
                EmployeeLogic::list_active(&pool)?
            } else {
                EmployeeLogic::list(&pool)?
            };
            if employees.is_empty() {
                warning("No employees.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "ID", "NAME", "POSITION", "PHONE", "HIRED", "SALARY", "STATUS",
            ]);
            for e in employees {
                table.add_row(vec![
                    e.id.to_string(),
                    e.full_name,
                    opt_or_dash(e.position.as_deref()),
                    opt_or_dash(e.phone.as_deref()),
                    e.hire_date
                        .map_or_else(|| "--".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                    money(e.salary, &cfg.currency),
                    e.status.label().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        EmployeeCmd::Show { id } => {
            let e = EmployeeLogic::get(&pool, *id)?;
            println!("Employee #{}", e.id);
            println!("  Name:      {}", e.full_name);
            println!("  Position:  {}", opt_or_dash(e.position.as_deref()));
            println!("  Phone:     {}", opt_or_dash(e.phone.as_deref()));
            println!("  Email:     {}", opt_or_dash(e.email.as_deref()));
            println!("  Document:  {}", opt_or_dash(e.id_document.as_deref()));
            println!(
                "  Hired:     {}",
                e.hire_date
                    .map_or_else(|| "--".to_string(), |d| d.format("%Y-%m-%d").to_string())
            );
            println!("  Salary:    {}", money(e.salary, &cfg.currency));
            println!("  Status:    {}", e.status.label());
            println!("  Notes:     {}", opt_or_dash(e.notes.as_deref()));
        }
    }

    Ok(())
}
