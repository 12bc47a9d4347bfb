pub mod action;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod headless;
pub mod notify;
pub mod services;
pub mod theme;
pub mod tui;
