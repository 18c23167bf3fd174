use crate::db::migrate::applied_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::count_all;
use crate::errors::AppResult;
use crate::models::entity::Entity;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

const COUNTED: [Entity; 6] = [
    Entity::Client,
    Entity::Object,
    Entity::Employee,
    Entity::Service,
    Entity::Schedule,
    Entity::User,
];

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{CYAN}• File:{RESET} {YELLOW}{db_path}{RESET}");
    println!("{CYAN}• Size:{RESET} {file_mb:.2} MB");

    println!("{CYAN}• Rows:{RESET}");
    for entity in COUNTED {
        let count = count_all(&pool.conn, entity)?;
        println!("    {:<10} {GREEN}{count}{RESET}", entity.table());
    }

    let (first, last): (Option<String>, Option<String>) = pool.conn.query_row(
        "SELECT MIN(scheduled_date), MAX(scheduled_date) FROM schedules",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let dash = || format!("{GREY}--{RESET}");
    println!("{CYAN}• Work order dates:{RESET}");
    println!("    from: {}", first.unwrap_or_else(dash));
    println!("    to:   {}", last.unwrap_or_else(dash));

    let migrations = applied_migrations(&pool.conn)?;
    println!(
        "{CYAN}• Migrations applied:{RESET} {}",
        migrations.len()
    );
    if let Some(latest) = migrations.last() {
        println!("    latest: {latest}");
    }

    println!();
    Ok(())
}
