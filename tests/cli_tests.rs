mod common;

use common::{PASSWORD, USER, init_and_login, init_db_cli, init_with_catalog, rco, setup_test_db};
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn test_init_is_idempotent() {
    let db_path = setup_test_db("cli_init_twice");

    rco()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied"));

    rco()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Migration applied").not());
}

#[test]
fn test_data_commands_need_a_database() {
    let db_path = setup_test_db("cli_no_database");

    rco()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .failure()
        .stderr(contains("Database unavailable"));
}

#[test]
fn test_data_commands_need_a_login() {
    let db_path = setup_test_db("cli_not_logged_in");
    init_db_cli(&db_path);

    rco()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .failure()
        .stderr(contains("Login required"));
}

#[test]
fn test_login_whoami_logout() {
    let db_path = setup_test_db("cli_session");
    init_and_login(&db_path);

    rco()
        .args(["--db", &db_path, "user", "whoami"])
        .assert()
        .success()
        .stdout(contains(USER).and(contains("manager")));

    rco()
        .args(["--db", &db_path, "user", "logout"])
        .assert()
        .success()
        .stdout(contains("Logged out"));

    rco()
        .args(["--db", &db_path, "user", "whoami"])
        .assert()
        .failure()
        .stderr(contains("Login required"));
}

#[test]
fn test_wrong_password_is_refused() {
    let db_path = setup_test_db("cli_wrong_password");
    init_and_login(&db_path);

    rco()
        .args([
            "--db", &db_path, "user", "login", "--username", USER, "--password", "nope-nope",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));

    rco()
        .args([
            "--db", &db_path, "user", "register", "--username", USER, "--password", PASSWORD,
            "--name", "Someone Else",
        ])
        .assert()
        .failure()
        .stderr(contains("already taken"));
}

#[test]
fn test_client_add_list_show() {
    let db_path = setup_test_db("cli_client_crud");
    init_with_catalog(&db_path);

    rco()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .success()
        .stdout(contains("Ivan Sidorov"));

    rco()
        .args(["--db", &db_path, "client", "edit", "1", "--name", "Ivan Sidorov"])
        .assert()
        .success();

    rco()
        .args(["--db", &db_path, "client", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Phone:    --"));
}

#[test]
fn test_client_with_objects_is_not_deleted() {
    let db_path = setup_test_db("cli_client_restrict");
    init_with_catalog(&db_path);

    rco()
        .args(["--db", &db_path, "client", "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Cannot delete"));
}

#[test]
fn test_object_rejects_bad_area() {
    let db_path = setup_test_db("cli_object_area");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "object", "add", "--client", "1", "--name", "Shed", "--address",
            "Yard", "--area", "-3",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid number for 'area'"));

    rco()
        .args([
            "--db", &db_path, "object", "add", "--client", "9", "--name", "Shed", "--address",
            "Yard",
        ])
        .assert()
        .failure()
        .stderr(contains("does not exist"));
}

#[test]
fn test_schedule_add_derives_cost() {
    let db_path = setup_test_db("cli_schedule_cost");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "1", "--employee",
            "1", "--date", "2025-03-10", "--time", "09:30",
        ])
        .assert()
        .success()
        .stdout(contains("250.00").and(contains("area-scaled")));

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "1", "--date",
            "2025-03-11", "--cost", "75.5",
        ])
        .assert()
        .success()
        .stdout(contains("75.50").and(contains("explicit")));

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "2", "--date",
            "2025-03-12", "--cost", "-5",
        ])
        .assert()
        .success()
        .stdout(contains("Ignoring --cost").and(contains("1200.00")));

    rco()
        .args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("Head office").and(contains("Olga Smirnova")));
}

#[test]
fn test_schedule_with_dangling_service_fails() {
    let db_path = setup_test_db("cli_schedule_dangling");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "42", "--date",
            "2025-03-10",
        ])
        .assert()
        .failure()
        .stderr(contains("does not exist"));

    rco()
        .args(["--db", &db_path, "schedule", "list"])
        .assert()
        .success()
        .stdout(contains("No work orders"));
}

#[test]
fn test_schedule_rejects_bad_date_and_status() {
    let db_path = setup_test_db("cli_schedule_bad_input");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "1", "--date",
            "10/03/2025",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "1", "--date",
            "2025-03-10", "--status", "paused",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid schedule status"));

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "1", "--date",
            "2025-03-10", "--time", "09:30:15",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));

    rco()
        .args([
            "--db", &db_path, "schedule", "list", "--from", "2025-04-01", "--to", "2025-03-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_cost_preview_reports_the_rule() {
    let db_path = setup_test_db("cli_cost_preview");
    init_with_catalog(&db_path);

    rco()
        .args(["--db", &db_path, "cost", "--object", "1", "--service", "2"])
        .assert()
        .success()
        .stdout(contains("1200.00").and(contains("rule: flat")));

    rco()
        .args(["--db", &db_path, "cost", "--object", "1", "--service", "99"])
        .assert()
        .success()
        .stdout(contains("rule: unresolvable"));
}

#[test]
fn test_dashboard_and_reports() {
    let db_path = setup_test_db("cli_reports");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "2", "--date",
            "2025-03-10", "--status", "completed",
        ])
        .assert()
        .success();

    rco()
        .args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Dashboard").and(contains("Active employees")));

    rco()
        .args(["--db", &db_path, "report", "schedules", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("Revenue").and(contains("1200.00")));

    rco()
        .args(["--db", &db_path, "report", "clients"])
        .assert()
        .success()
        .stdout(contains("Ivan Sidorov"));

    rco()
        .args([
            "--db", &db_path, "report", "schedules", "--from", "2025-04-01", "--to",
            "2025-03-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_employee_delete_unassigns_orders() {
    let db_path = setup_test_db("cli_employee_delete");
    init_with_catalog(&db_path);

    rco()
        .args([
            "--db", &db_path, "schedule", "add", "--object", "1", "--service", "2", "--employee",
            "1", "--date", "2025-03-10",
        ])
        .assert()
        .success();

    rco()
        .args(["--db", &db_path, "employee", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("1 work order(s) are now unassigned"));

    rco()
        .args(["--db", &db_path, "schedule", "show", "1"])
        .assert()
        .success()
        .stdout(contains("Employee:  --"));
}

#[test]
fn test_log_print_shows_operations() {
    let db_path = setup_test_db("cli_log");
    init_with_catalog(&db_path);

    rco()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("register"))
                .and(contains("login"))
                .and(contains(USER)),
        );
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db_info");
    init_with_catalog(&db_path);

    rco()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("Foreign keys consistent")));
}

#[test]
fn test_config_print() {
    rco()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("area_unit").and(contains("upcoming_limit")));
}
