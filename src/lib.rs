pub mod catalog;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod runner;
pub mod scheduler;
pub mod shell;
pub mod source;
pub mod ui;
pub mod upload;
pub mod workflow;
