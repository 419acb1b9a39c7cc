//! REST backend for recording workplace accidents together with the
//! employees, projects and reference catalogs they point at.

pub mod cases;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
