use crate::cli::commands::{confirmed, open_session};
use crate::cli::parser::{Commands, UserCmd};
use crate::config::Config;
use crate::core::session::Session;
use crate::core::user::{NewUser, UserLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::ui::messages::{info, success, warning};
use crate::utils::clean_opt;
use crate::utils::formatting::opt_or_dash;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    match action {
        UserCmd::Register {
            username,
            password,
            full_name,
            email,
            role,
        } => {
            let role = match role {
                Some(r) => Role::from_code(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?,
                None => Role::default(),
            };
            let mut pool = DbPool::new(&cfg.database)?;
            let id = UserLogic::register(
                &mut pool,
                &NewUser {
                    username: username.clone(),
                    password: password.clone(),
                    full_name: full_name.clone(),
                    email: clean_opt(email.as_ref()),
                    role,
                },
            )?;
            success(format!("User '{}' registered (id {id})", username.trim()));
        }

        UserCmd::Login { username, password } => {
            let mut pool = DbPool::new(&cfg.database)?;
            let user = UserLogic::authenticate(&mut pool, username, password)?;
            Session::for_user(&user).save(&cfg.database)?;
            success(format!("Logged in as {} ({})", user.username, user.full_name));
        }

        UserCmd::Logout => {
            if Session::clear(&cfg.database)? {
                success("Logged out.");
            } else {
                info("No active session.");
            }
        }

        UserCmd::Whoami => {
            let session = Session::require(&cfg.database)?;
            println!(
                "{} ({}), role {}, since {}",
                session.username,
                session.full_name,
                session.role.to_db_str(),
                session.logged_in_at
            );
        }

        UserCmd::List => {
            let (pool, _session) = open_session(cfg)?;
            let users = UserLogic::list(&pool)?;
            if users.is_empty() {
                warning("No users.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "USERNAME", "NAME", "EMAIL", "ROLE"]);
            for u in users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username,
                    u.full_name,
                    opt_or_dash(u.email.as_deref()),
                    u.role.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        UserCmd::Del { id, yes } => {
            let (mut pool, session) = open_session(cfg)?;
            if !confirmed(*yes, &format!("Delete user #{id}?")) {
                info("Nothing deleted.");
                return Ok(());
            }
            let user = UserLogic::delete(&mut pool, &session, *id)?;
            if user.id == session.user_id {
                Session::clear(&cfg.database)?;
                warning("You deleted your own account; session closed.");
            }
            success(format!("User '{}' deleted", user.username));
        }
    }

    Ok(())
}
