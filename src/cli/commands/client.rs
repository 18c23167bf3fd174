use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{ClientArgs, ClientCmd, Commands};
use crate::config::Config;
use crate::core::client::ClientLogic;
use crate::errors::AppResult;
use crate::models::client::Client;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::formatting::opt_or_dash;
use crate::utils::table::Table;

/// Build the full row from the arguments; absent options become NULL.
fn to_client(id: i64, args: &ClientArgs) -> Client {
    Client {
        id,
        full_name: args.full_name.trim().to_string(),
        phone: clean_opt(args.phone.as_ref()),
        email: clean_opt(args.email.as_ref()),
        address: clean_opt(args.address.as_ref()),
        company_name: clean_opt(args.company_name.as_ref()),
        contact_person: clean_opt(args.contact_person.as_ref()),
        notes: clean_opt(args.notes.as_ref()),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };

    let (mut pool, session) = open_session(cfg)?;

    match action {
        ClientCmd::Add(args) => {
            let client = to_client(0, args);
            let id = ClientLogic::add(&mut pool, &session, &client)?;
            success(format!("Client '{}' added (id {id})", client.full_name));
        }

        ClientCmd::Edit { id, fields } => {
            let client = to_client(*id, fields);
            ClientLogic::edit(&mut pool, &session, &client)?;
            success(format!("Client #{id} updated"));
        }

        ClientCmd::Del { id, yes } => {
            if !confirmed(*yes, &format!("Delete client #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let client = ClientLogic::delete(&mut pool, &session, *id)?;
            success(format!("Client '{}' deleted", client.full_name));
        }

        ClientCmd::List => {
            let items = ClientLogic::list(&pool)?;
            if items.is_empty() {
                warning("No clients.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "ID", "NAME", "PHONE", "EMAIL", "COMPANY", "OBJECTS",
            ]);
            for item in items {
                let c = item.client;
                table.add_row(vec![
                    c.id.to_string(),
                    c.full_name,
                    opt_or_dash(c.phone.as_deref()),
                    opt_or_dash(c.email.as_deref()),
                    opt_or_dash(c.company_name.as_deref()),
                    item.objects_count.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ClientCmd::Show { id } => {
            let c = ClientLogic::get(&pool, *id)?;
            println!("Client #{}", c.id);
            println!("  Name:     {}", c.full_name);
            println!("  Phone:    {}", opt_or_dash(c.phone.as_deref()));
            println!("  Email:    {}", opt_or_dash(c.email.as_deref()));
            println!("  Address:  {}", opt_or_dash(c.address.as_deref()));
            println!("  Company:  {}", opt_or_dash(c.company_name.as_deref()));
            println!("  Contact:  {}", opt_or_dash(c.contact_person.as_deref()));
            println!("  Notes:    {}", opt_or_dash(c.notes.as_deref()));
        }
    }

    Ok(())
}
