mod common;

use common::fresh_pool;
use rcleanops::core::client::ClientLogic;
use rcleanops::core::employee::EmployeeLogic;
use rcleanops::core::object::ObjectLogic;
use rcleanops::core::schedule::ScheduleLogic;
use rcleanops::core::service::ServiceLogic;
use rcleanops::core::cost::{CostDeriver, CostOrigin};
use rcleanops::core::session::Session;
use rcleanops::db::pool::DbPool;
use rcleanops::errors::AppError;
use rcleanops::models::client::Client;
use rcleanops::models::employee::Employee;
use rcleanops::models::employee_status::EmployeeStatus;
use rcleanops::models::entity::Entity;
use rcleanops::models::object::Object;
use rcleanops::models::schedule::{ScheduleDraft, ScheduleFilter};
use rcleanops::models::schedule_status::ScheduleStatus;
use rcleanops::models::service::Service;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn client(name: &str) -> Client {
    Client {
        full_name: name.to_string(),
        phone: Some("+7 900 111 22 33".to_string()),
        ..Client::default()
    }
}

fn object(client_id: i64, area: Option<f64>) -> Object {
    Object {
        client_id,
        name: "Warehouse 3".to_string(),
        address: "Promzona 7".to_string(),
        area,
        ..Object::default()
    }
}

fn service(price: Option<f64>, unit: &str) -> Service {
    Service {
        name: format!("Cleaning per {unit}"),
        price_per_unit: price,
        unit: Some(unit.to_string()),
        ..Service::default()
    }
}

fn employee(name: &str, status: EmployeeStatus) -> Employee {
    Employee {
        full_name: name.to_string(),
        status,
        ..Employee::default()
    }
}

/// Client, 25 sq.m object and a 10.0 per sq.m service.
fn seed(pool: &mut DbPool, session: &Session) -> (i64, i64, i64) {
    let c = ClientLogic::add(pool, session, &client("Ivan Sidorov")).unwrap();
    let o = ObjectLogic::add(pool, session, &object(c, Some(25.0))).unwrap();
    let s = ServiceLogic::add(pool, session, &service(Some(10.0), "sq.m")).unwrap();
    (c, o, s)
}

fn schedule_count(pool: &DbPool) -> i64 {
    pool.conn
        .query_row("SELECT COUNT(*) FROM schedules", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn schedule_save_derives_and_stores_area_cost() {
    let (mut pool, session) = fresh_pool("store_area_cost");
    let (_, o, s) = seed(&mut pool, &session);
    let deriver = CostDeriver::new("sq.m");

    let saved = ScheduleLogic::save(
        &mut pool,
        &session,
        &deriver,
        None,
        &ScheduleDraft::new(o, s, date("2025-03-10")),
    )
    .unwrap();

    assert_eq!(saved.quote.cost, Some(250.0));
    assert_eq!(saved.quote.origin, CostOrigin::AreaScaled);

    let view = ScheduleLogic::get(&pool, saved.id).unwrap();
    assert_eq!(view.schedule.cost, Some(250.0));
    assert_eq!(view.schedule.status, ScheduleStatus::Scheduled);
    assert_eq!(view.client_name, "Ivan Sidorov");
}

#[test]
fn explicit_cost_is_stored_rounded_to_cents() {
    let (mut pool, session) = fresh_pool("store_explicit_cost");
    let (_, o, s) = seed(&mut pool, &session);

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.explicit_cost = Some("99.999".to_string());

    let saved =
        ScheduleLogic::save(&mut pool, &session, &CostDeriver::new("sq.m"), None, &draft).unwrap();
    assert_eq!(saved.quote.origin, CostOrigin::Explicit);
    assert_eq!(ScheduleLogic::get(&pool, saved.id).unwrap().schedule.cost, Some(100.0));
}

#[test]
fn huge_explicit_cost_is_stored_finite() {
    let (mut pool, session) = fresh_pool("store_huge_cost");
    let (_, o, s) = seed(&mut pool, &session);

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.explicit_cost = Some("1e307".to_string());

    let saved =
        ScheduleLogic::save(&mut pool, &session, &CostDeriver::new("sq.m"), None, &draft).unwrap();
    assert_eq!(saved.quote.cost, Some(1e307));

    let stored: f64 = pool
        .conn
        .query_row("SELECT cost FROM schedules WHERE id = ?1", [saved.id], |r| r.get(0))
        .unwrap();
    assert!(stored.is_finite());
    assert_eq!(stored, 1e307);
}

#[test]
fn service_without_price_stores_null_cost() {
    let (mut pool, session) = fresh_pool("store_null_cost");
    let (_, o, _) = seed(&mut pool, &session);
    let free = ServiceLogic::add(&mut pool, &session, &service(None, "visit")).unwrap();

    let saved = ScheduleLogic::save(
        &mut pool,
        &session,
        &CostDeriver::new("sq.m"),
        None,
        &ScheduleDraft::new(o, free, date("2025-03-11")),
    )
    .unwrap();

    assert_eq!(saved.quote.origin, CostOrigin::Unresolvable);
    assert_eq!(ScheduleLogic::get(&pool, saved.id).unwrap().schedule.cost, None);
}

#[test]
fn dangling_references_persist_nothing() {
    let (mut pool, session) = fresh_pool("store_dangling");
    let (_, o, s) = seed(&mut pool, &session);
    let deriver = CostDeriver::new("sq.m");

    let err = ScheduleLogic::save(
        &mut pool,
        &session,
        &deriver,
        None,
        &ScheduleDraft::new(999, s, date("2025-03-10")),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::ReferenceNotFound {
            entity: Entity::Object,
            id: 999
        }
    ));

    let err = ScheduleLogic::save(
        &mut pool,
        &session,
        &deriver,
        None,
        &ScheduleDraft::new(o, 999, date("2025-03-10")),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::ReferenceNotFound {
            entity: Entity::Service,
            ..
        }
    ));

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.employee_id = Some(77);
    let err = ScheduleLogic::save(&mut pool, &session, &deriver, None, &draft).unwrap_err();
    assert!(matches!(
        err,
        AppError::ReferenceNotFound {
            entity: Entity::Employee,
            ..
        }
    ));

    assert_eq!(schedule_count(&pool), 0);
}

#[test]
fn edit_rewrites_the_row_and_derives_cost_again() {
    let (mut pool, session) = fresh_pool("store_schedule_edit");
    let (_, o, s) = seed(&mut pool, &session);
    let deriver = CostDeriver::new("sq.m");

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.explicit_cost = Some("75.5".to_string());
    draft.notes = Some("key at reception".to_string());
    let id = ScheduleLogic::save(&mut pool, &session, &deriver, None, &draft)
        .unwrap()
        .id;

    let mut edit = ScheduleDraft::new(o, s, date("2025-03-12"));
    edit.status = ScheduleStatus::Completed;
    let saved = ScheduleLogic::save(&mut pool, &session, &deriver, Some(id), &edit).unwrap();
    assert_eq!(saved.id, id);

    let row = ScheduleLogic::get(&pool, id).unwrap().schedule;
    assert_eq!(row.date, date("2025-03-12"));
    assert_eq!(row.status, ScheduleStatus::Completed);
    assert_eq!(row.cost, Some(250.0));
    assert_eq!(row.notes, None);
}

#[test]
fn editing_a_missing_schedule_is_not_found() {
    let (mut pool, session) = fresh_pool("store_schedule_missing");
    let (_, o, s) = seed(&mut pool, &session);

    let err = ScheduleLogic::save(
        &mut pool,
        &session,
        &CostDeriver::new("sq.m"),
        Some(5),
        &ScheduleDraft::new(o, s, date("2025-03-10")),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            entity: Entity::Schedule,
            id: 5
        }
    ));
}

#[test]
fn inactive_employee_is_flagged_but_accepted() {
    let (mut pool, session) = fresh_pool("store_inactive_employee");
    let (_, o, s) = seed(&mut pool, &session);
    let e = EmployeeLogic::add(
        &mut pool,
        &session,
        &employee("Pavel Orlov", EmployeeStatus::Inactive),
    )
    .unwrap();

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.employee_id = Some(e);
    let saved =
        ScheduleLogic::save(&mut pool, &session, &CostDeriver::new("sq.m"), None, &draft).unwrap();
    assert!(saved.employee_inactive);
}

#[test]
fn client_with_objects_cannot_be_deleted() {
    let (mut pool, session) = fresh_pool("store_client_restrict");
    let (c, _, _) = seed(&mut pool, &session);

    let err = ClientLogic::delete(&mut pool, &session, c).unwrap_err();
    assert!(matches!(
        err,
        AppError::DeleteRestricted {
            entity: Entity::Client,
            dependents: 1,
            dependent_entity: Entity::Object,
            ..
        }
    ));
    assert!(ClientLogic::get(&pool, c).is_ok());
}

#[test]
fn objects_and_services_with_schedules_cannot_be_deleted() {
    let (mut pool, session) = fresh_pool("store_schedule_restrict");
    let (_, o, s) = seed(&mut pool, &session);
    ScheduleLogic::save(
        &mut pool,
        &session,
        &CostDeriver::new("sq.m"),
        None,
        &ScheduleDraft::new(o, s, date("2025-03-10")),
    )
    .unwrap();

    assert!(matches!(
        ObjectLogic::delete(&mut pool, &session, o).unwrap_err(),
        AppError::DeleteRestricted {
            entity: Entity::Object,
            ..
        }
    ));
    assert!(matches!(
        ServiceLogic::delete(&mut pool, &session, s).unwrap_err(),
        AppError::DeleteRestricted {
            entity: Entity::Service,
            ..
        }
    ));
}

#[test]
fn deleting_an_employee_unassigns_their_schedules() {
    let (mut pool, session) = fresh_pool("store_employee_set_null");
    let (_, o, s) = seed(&mut pool, &session);
    let e = EmployeeLogic::add(
        &mut pool,
        &session,
        &employee("Olga Smirnova", EmployeeStatus::Active),
    )
    .unwrap();

    let mut draft = ScheduleDraft::new(o, s, date("2025-03-10"));
    draft.employee_id = Some(e);
    let id = ScheduleLogic::save(&mut pool, &session, &CostDeriver::new("sq.m"), None, &draft)
        .unwrap()
        .id;

    let (deleted, unassigned) = EmployeeLogic::delete(&mut pool, &session, e).unwrap();
    assert_eq!(deleted.full_name, "Olga Smirnova");
    assert_eq!(unassigned, 1);

    let view = ScheduleLogic::get(&pool, id).unwrap();
    assert_eq!(view.schedule.employee_id, None);
    assert_eq!(view.employee_name, None);
}

#[test]
fn client_edit_replaces_every_field() {
    let (mut pool, session) = fresh_pool("store_client_full_row");
    let id = ClientLogic::add(&mut pool, &session, &client("Ivan Sidorov")).unwrap();

    let edited = Client {
        id,
        full_name: "Ivan S. Sidorov".to_string(),
        ..Client::default()
    };
    ClientLogic::edit(&mut pool, &session, &edited).unwrap();

    let stored = ClientLogic::get(&pool, id).unwrap();
    assert_eq!(stored.full_name, "Ivan S. Sidorov");
    assert_eq!(stored.phone, None);
}

#[test]
fn editing_a_missing_client_is_not_found() {
    let (mut pool, session) = fresh_pool("store_client_missing");
    let ghost = Client {
        id: 12,
        ..client("Nobody")
    };
    assert!(matches!(
        ClientLogic::edit(&mut pool, &session, &ghost).unwrap_err(),
        AppError::NotFound {
            entity: Entity::Client,
            id: 12
        }
    ));
}

#[test]
fn object_needs_a_client_and_a_positive_area() {
    let (mut pool, session) = fresh_pool("store_object_checks");

    assert!(matches!(
        ObjectLogic::add(&mut pool, &session, &object(3, Some(10.0))).unwrap_err(),
        AppError::ReferenceNotFound {
            entity: Entity::Client,
            id: 3
        }
    ));

    let c = ClientLogic::add(&mut pool, &session, &client("Ivan Sidorov")).unwrap();
    for bad in [0.0, -4.0, f64::NAN] {
        assert!(matches!(
            ObjectLogic::add(&mut pool, &session, &object(c, Some(bad))).unwrap_err(),
            AppError::InvalidNumeric { field: "area", .. }
        ));
    }
    assert!(ObjectLogic::add(&mut pool, &session, &object(c, None)).is_ok());
}

#[test]
fn negative_service_price_is_rejected() {
    let (mut pool, session) = fresh_pool("store_service_price");
    assert!(matches!(
        ServiceLogic::add(&mut pool, &session, &service(Some(-1.0), "visit")).unwrap_err(),
        AppError::InvalidNumeric { .. }
    ));
}

#[test]
fn status_column_rejects_foreign_tokens() {
    let (mut pool, session) = fresh_pool("store_status_check");
    let (_, o, s) = seed(&mut pool, &session);

    let res = pool.conn.execute(
        "INSERT INTO schedules (object_id, service_id, scheduled_date, status, created_at)
         VALUES (?1, ?2, '2025-03-10', 'done-ish', datetime('now'))",
        rusqlite::params![o, s],
    );
    assert!(res.is_err());
}

#[test]
fn schedule_list_is_newest_first_and_filterable() {
    let (mut pool, session) = fresh_pool("store_schedule_list");
    let (_, o, s) = seed(&mut pool, &session);
    let deriver = CostDeriver::new("sq.m");

    for (d, status) in [
        ("2025-03-01", ScheduleStatus::Completed),
        ("2025-03-20", ScheduleStatus::Scheduled),
        ("2025-03-10", ScheduleStatus::Cancelled),
    ] {
        let mut draft = ScheduleDraft::new(o, s, date(d));
        draft.status = status;
        ScheduleLogic::save(&mut pool, &session, &deriver, None, &draft).unwrap();
    }

    let all = ScheduleLogic::list(&pool, &ScheduleFilter::default()).unwrap();
    let dates: Vec<String> = all.iter().map(|v| v.schedule.date_str()).collect();
    assert_eq!(dates, ["2025-03-20", "2025-03-10", "2025-03-01"]);

    let filter = ScheduleFilter {
        from: Some(date("2025-03-05")),
        to: Some(date("2025-03-31")),
        ..ScheduleFilter::default()
    };
    assert_eq!(ScheduleLogic::list(&pool, &filter).unwrap().len(), 2);

    let filter = ScheduleFilter {
        status: Some(ScheduleStatus::Completed),
        ..ScheduleFilter::default()
    };
    let done = ScheduleLogic::list(&pool, &filter).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].schedule.date_str(), "2025-03-01");
}

#[test]
fn every_write_leaves_an_audit_line() {
    let (mut pool, session) = fresh_pool("store_audit");
    seed(&mut pool, &session);

    let adds: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'add' AND actor = 'system'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(adds, 3);
}

#[test]
fn schedule_list_rejects_inverted_range() {
    let (pool, _session) = fresh_pool("store_inverted_range");
    let filter = ScheduleFilter {
        from: Some(date("2025-04-01")),
        to: Some(date("2025-03-01")),
        ..ScheduleFilter::default()
    };

    assert!(matches!(
        ScheduleLogic::list(&pool, &filter).unwrap_err(),
        AppError::InvalidDate(_)
    ));
}

#[test]
fn malformed_stored_time_names_its_column() {
    let (mut pool, session) = fresh_pool("store_bad_time_column");
    let (_, o, s) = seed(&mut pool, &session);
    let saved = ScheduleLogic::save(
        &mut pool,
        &session,
        &CostDeriver::new("sq.m"),
        None,
        &ScheduleDraft::new(o, s, date("2025-03-10")),
    )
    .unwrap();

    pool.conn
        .execute(
            "UPDATE schedules SET scheduled_time = '9h30' WHERE id = ?1",
            [saved.id],
        )
        .unwrap();

    // scheduled_time is the sixth column of the schedule view
    match ScheduleLogic::get(&pool, saved.id).unwrap_err() {
        AppError::Db(rusqlite::Error::FromSqlConversionFailure(idx, _, err)) => {
            assert_eq!(idx, 5);
            assert!(err.to_string().contains("9h30"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
