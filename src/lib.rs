pub mod config;
pub mod dashboard;
pub mod errors;
pub mod forecast;
pub mod initialization;
pub mod logging;
pub mod manager_owm;
pub mod models;

pub use forecast::aggregate;
