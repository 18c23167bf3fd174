pub mod client;
pub mod employee;
pub mod employee_status;
pub mod entity;
pub mod object;
pub mod object_type;
pub mod report;
pub mod role;
pub mod schedule;
pub mod schedule_status;
pub mod service;
pub mod user;
