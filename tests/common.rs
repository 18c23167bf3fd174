#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rcleanops::core::session::Session;
use rcleanops::db::initialize::init_db;
use rcleanops::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const USER: &str = "anna";
pub const PASSWORD: &str = "s3cret-pass";

pub fn rco() -> Command {
    cargo_bin_cmd!("rcleanops")
}

/// Create a unique test DB path inside the system temp dir and remove any leftover
/// database or session file from a previous run.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcleanops.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(Session::file_for(&db_path)).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `--test init` on a fresh database.
pub fn init_db_cli(db_path: &str) {
    rco()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the database, register the default operator and log in.
pub fn init_and_login(db_path: &str) {
    init_db_cli(db_path);

    rco()
        .args([
            "--db", db_path, "user", "register", "--username", USER, "--password", PASSWORD,
            "--name", "Anna Petrova",
        ])
        .assert()
        .success();

    rco()
        .args([
            "--db", db_path, "user", "login", "--username", USER, "--password", PASSWORD,
        ])
        .assert()
        .success();
}

/// Logged-in database with one client, one object of 50 sq.m, an area-priced
/// service (id 1, 5.00 per sq.m), a flat service (id 2, 1200) and an employee.
pub fn init_with_catalog(db_path: &str) {
    init_and_login(db_path);

    let steps: [&[&str]; 5] = [
        &["client", "add", "--name", "Ivan Sidorov", "--phone", "+7 900 000 00 00"],
        &[
            "object", "add", "--client", "1", "--name", "Head office", "--address",
            "Lenina 1", "--area", "50",
        ],
        &["service", "add", "--name", "Floor wash", "--price", "5", "--unit", "sq.m"],
        &["service", "add", "--name", "Window cleaning", "--price", "1200", "--unit", "visit"],
        &["employee", "add", "--name", "Olga Smirnova", "--position", "Cleaner"],
    ];

    for step in steps {
        rco().args(["--db", db_path]).args(step).assert().success();
    }
}

/// Fresh, migrated database opened through the library API.
pub fn fresh_pool(name: &str) -> (DbPool, Session) {
    let db_path = setup_test_db(name);
    let pool = DbPool::create(&db_path).expect("create db");
    init_db(&pool.conn).expect("init db");
    (pool, Session::system())
}
