use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{Commands, ObjectArgs, ObjectCmd};
use crate::config::Config;
use crate::core::object::ObjectLogic;
use crate::errors::{AppError, AppResult};
use crate::models::object::Object;
use crate::models::object_type::ObjectType;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::formatting::opt_or_dash;
use crate::utils::numeric::parse_area;
use crate::utils::table::Table;

fn to_object(id: i64, args: &ObjectArgs, cfg: &Config) -> AppResult<Object> {
    let object_type = match &args.object_type {
        Some(t) => ObjectType::from_code(t).ok_or_else(|| AppError::InvalidObjectType(t.clone()))?,
        None => cfg.default_object_type,
    };

    Ok(Object {
        id,
        client_id: args.client,
        name: args.name.trim().to_string(),
        address: args.address.trim().to_string(),
        area: parse_area(args.area.as_ref())?,
        object_type,
        access_info: clean_opt(args.access_info.as_ref()),
        notes: clean_opt(args.notes.as_ref()),
    })
}

fn fmt_area(area: Option<f64>, unit: &str) -> String {
    area.map_or_else(|| "--".to_string(), |a| format!("{a:.2} {unit}"))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Object { action } = cmd else {
        return Ok(());
    };

    let (mut pool, session) = open_session(cfg)?;

    match action {
        ObjectCmd::Add(args) => {
            let object = to_object(0, args, cfg)?;
            let id = ObjectLogic::add(&mut pool, &session, &object)?;
            success(format!("Object '{}' added (id {id})", object.name));
        }

        ObjectCmd::Edit { id, fields } => {
            let object = to_object(*id, fields, cfg)?;
            ObjectLogic::edit(&mut pool, &session, &object)?;
            success(format!("Object #{id} updated"));
        }

        ObjectCmd::Del { id, yes } => {
            if !confirmed(*yes, &format!("Delete object #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let object = ObjectLogic::delete(&mut pool, &session, *id)?;
            success(format!("Object '{}' deleted", object.name));
        }

        ObjectCmd::List => {
            let items = ObjectLogic::list(&pool)?;
            if items.is_empty() {
                warning("No objects.");
                return Ok(());
            }

            let mut table =
                Table::with_headers(&["ID", "NAME", "CLIENT", "ADDRESS", "TYPE", "AREA"]);
            for item in items {
                let o = item.object;
                table.add_row(vec![
                    o.id.to_string(),
                    o.name,
                    item.client_name,
                    o.address,
                    o.object_type.label().to_string(),
                    fmt_area(o.area, &cfg.area_unit),
                ]);
            }
            print!("{}", table.render());
        }

        ObjectCmd::Show { id } => {
            let o = ObjectLogic::get(&pool, *id)?;
            println!("Object #{}", o.id);
            println!("  Name:     {}", o.name);
            println!("  Client:   #{}", o.client_id);
            println!("  Address:  {}", o.address);
            println!("  Type:     {}", o.object_type.label());
            println!("  Area:     {}", fmt_area(o.area, &cfg.area_unit));
            println!("  Access:   {}", opt_or_dash(o.access_info.as_deref()));
            println!("  Notes:    {}", opt_or_dash(o.notes.as_deref()));
        }
    }

    Ok(())
}
