pub mod assignments;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod parser;
pub mod resolver;
pub mod state;
pub mod task;
pub mod work_item;
