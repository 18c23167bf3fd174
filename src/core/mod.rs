pub mod backup;
pub mod client;
pub mod cost;
pub mod employee;
pub mod log;
pub mod object;
pub mod report;
pub mod schedule;
pub mod service;
pub mod session;
pub mod user;
