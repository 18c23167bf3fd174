mod common;

use chrono::NaiveDate;
use common::fresh_pool;
use rcleanops::core::client::ClientLogic;
use rcleanops::core::cost::CostDeriver;
use rcleanops::core::employee::EmployeeLogic;
use rcleanops::core::object::ObjectLogic;
use rcleanops::core::report::ReportLogic;
use rcleanops::core::schedule::ScheduleLogic;
use rcleanops::core::service::ServiceLogic;
use rcleanops::core::session::Session;
use rcleanops::db::pool::DbPool;
use rcleanops::errors::AppError;
use rcleanops::models::client::Client;
use rcleanops::models::employee::Employee;
use rcleanops::models::employee_status::EmployeeStatus;
use rcleanops::models::object::Object;
use rcleanops::models::schedule::{ScheduleDraft, ScheduleFilter};
use rcleanops::models::schedule_status::ScheduleStatus;
use rcleanops::models::service::Service;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

struct Fixture {
    object: i64,
    priced: i64,
    unpriced: i64,
}

fn fixture(pool: &mut DbPool, session: &Session) -> Fixture {
    let c = ClientLogic::add(
        pool,
        session,
        &Client {
            full_name: "Ivan Sidorov".to_string(),
            email: Some("ivan@example.com".to_string()),
            ..Client::default()
        },
    )
    .unwrap();
    ClientLogic::add(
        pool,
        session,
        &Client {
            full_name: "Maria Kuznetsova".to_string(),
            ..Client::default()
        },
    )
    .unwrap();

    let object = ObjectLogic::add(
        pool,
        session,
        &Object {
            client_id: c,
            name: "Head office".to_string(),
            address: "Lenina 1".to_string(),
            area: Some(40.0),
            ..Object::default()
        },
    )
    .unwrap();

    let priced = ServiceLogic::add(
        pool,
        session,
        &Service {
            name: "Window cleaning".to_string(),
            price_per_unit: Some(1200.0),
            unit: Some("visit".to_string()),
            ..Service::default()
        },
    )
    .unwrap();
    let unpriced = ServiceLogic::add(
        pool,
        session,
        &Service {
            name: "Inspection".to_string(),
            ..Service::default()
        },
    )
    .unwrap();

    EmployeeLogic::add(
        pool,
        session,
        &Employee {
            full_name: "Olga Smirnova".to_string(),
            salary: Some(50000.0),
            ..Employee::default()
        },
    )
    .unwrap();
    EmployeeLogic::add(
        pool,
        session,
        &Employee {
            full_name: "Pavel Orlov".to_string(),
            salary: Some(90000.0),
            status: EmployeeStatus::Inactive,
            ..Employee::default()
        },
    )
    .unwrap();

    Fixture {
        object,
        priced,
        unpriced,
    }
}

fn add_order(
    pool: &mut DbPool,
    session: &Session,
    object: i64,
    service: i64,
    day: &str,
    status: ScheduleStatus,
    cost: Option<&str>,
) {
    let mut draft = ScheduleDraft::new(object, service, date(day));
    draft.status = status;
    draft.explicit_cost = cost.map(str::to_string);
    ScheduleLogic::save(pool, session, &CostDeriver::new("sq.m"), None, &draft).unwrap();
}

#[test]
fn revenue_counts_completed_orders_with_null_as_zero() {
    let (mut pool, session) = fresh_pool("report_revenue");
    let f = fixture(&mut pool, &session);

    add_order(&mut pool, &session, f.object, f.priced, "2025-03-03", ScheduleStatus::Completed, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-02-14", ScheduleStatus::Completed, Some("300.5"));
    add_order(&mut pool, &session, f.object, f.unpriced, "2025-03-04", ScheduleStatus::Completed, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-03-05", ScheduleStatus::Cancelled, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-03-28", ScheduleStatus::Scheduled, None);

    let report =
        ReportLogic::schedules(&pool, &ScheduleFilter::default(), date("2025-03-15")).unwrap();

    let expected: f64 = report
        .rows
        .iter()
        .filter(|v| v.schedule.status == ScheduleStatus::Completed)
        .map(|v| v.schedule.cost.unwrap_or(0.0))
        .sum();

    assert_eq!(report.stats.total_revenue, expected);
    assert_eq!(report.stats.total_revenue, 1500.5);
    assert_eq!(report.stats.revenue_month, 1200.0);
    assert_eq!(report.stats.total, 5);
    assert_eq!(report.stats.completed, 3);
    assert_eq!(report.stats.cancelled, 1);
    assert_eq!(report.stats.scheduled, 1);
    // mean of 1200 and 300.5; the NULL cost is left out
    assert_eq!(report.stats.avg_order_cost, 750.25);
}

#[test]
fn dashboard_counts_this_month_and_lists_upcoming() {
    let (mut pool, session) = fresh_pool("report_dashboard");
    let f = fixture(&mut pool, &session);

    add_order(&mut pool, &session, f.object, f.priced, "2025-03-02", ScheduleStatus::Completed, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-02-27", ScheduleStatus::Completed, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-03-01", ScheduleStatus::Scheduled, None);
    for day in ["2025-03-20", "2025-03-16", "2025-04-02"] {
        add_order(&mut pool, &session, f.object, f.priced, day, ScheduleStatus::Scheduled, None);
    }

    let d = ReportLogic::dashboard(&pool, date("2025-03-15"), 2).unwrap();

    assert_eq!(d.clients_count, 2);
    assert_eq!(d.objects_count, 1);
    assert_eq!(d.active_employees_count, 1);
    assert_eq!(d.services_count, 2);
    assert_eq!(d.scheduled_count, 4);
    assert_eq!(d.completed_month, 1);
    assert_eq!(d.revenue_month, 1200.0);

    let upcoming: Vec<String> = d.upcoming.iter().map(|v| v.schedule.date_str()).collect();
    assert_eq!(upcoming, ["2025-03-16", "2025-03-20"]);
}

#[test]
fn entity_reports_aggregate_per_row() {
    let (mut pool, session) = fresh_pool("report_entities");
    let f = fixture(&mut pool, &session);

    add_order(&mut pool, &session, f.object, f.priced, "2025-03-03", ScheduleStatus::Completed, None);
    add_order(&mut pool, &session, f.object, f.priced, "2025-03-09", ScheduleStatus::Scheduled, None);

    let clients = ReportLogic::clients(&pool).unwrap();
    assert_eq!(clients.stats.total, 2);
    assert_eq!(clients.stats.with_email, 1);
    assert_eq!(clients.stats.with_objects, 1);
    let ivan = clients
        .rows
        .iter()
        .find(|r| r.client.full_name == "Ivan Sidorov")
        .unwrap();
    assert_eq!(ivan.objects_count, 1);
    assert_eq!(ivan.total_orders, 2);
    assert_eq!(ivan.total_revenue, 1200.0);

    let objects = ReportLogic::objects(&pool).unwrap();
    assert_eq!(objects.stats.total_area, 40.0);
    assert_eq!(objects.stats.with_services, 1);
    assert_eq!(objects.rows[0].last_service_date, Some(date("2025-03-09")));

    let employees = ReportLogic::employees(&pool).unwrap();
    assert_eq!(employees.stats.active, 1);
    assert_eq!(employees.stats.inactive, 1);
    assert_eq!(employees.stats.avg_salary, 50000.0);
    assert_eq!(employees.stats.total_salary, 50000.0);

    let services = ReportLogic::services(&pool).unwrap();
    assert_eq!(services.stats.total, 2);
    assert_eq!(services.stats.avg_price, 1200.0);
    assert_eq!(services.stats.completed_orders, 1);
    assert_eq!(services.stats.total_revenue, 1200.0);
}

#[test]
fn inverted_date_range_is_rejected() {
    let (pool, _session) = fresh_pool("report_bad_range");
    let filter = ScheduleFilter {
        from: Some(date("2025-03-31")),
        to: Some(date("2025-03-01")),
        ..ScheduleFilter::default()
    };

    assert!(matches!(
        ReportLogic::schedules(&pool, &filter, date("2025-03-15")).unwrap_err(),
        AppError::InvalidDate(_)
    ));
}
