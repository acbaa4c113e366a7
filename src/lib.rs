//! MealScout - a terminal client for a recipe product recommendation service.
//!
//! Collects ingredient tags and nutrition filters in a TUI form, asks the
//! remote recommendation service for matching products, and renders the
//! results as product cards.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tasks;
pub mod ui;
