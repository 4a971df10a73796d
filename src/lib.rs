#![doc = "The `dailytasks` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic for the Daily Tasks"]
#![doc = "application: local key-value persistence, account registration and"]
#![doc = "login, the per-user task board with named lists, and the derived"]
#![doc = "progress statistic. It is used by the main binary (`main.rs`), which"]
#![doc = "wraps the command handlers in a small interactive prompt."]

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;
