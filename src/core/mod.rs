//! Core types: diagram model, catalog, configuration and focus state.

pub mod catalog;
pub mod components;
pub mod config;
pub mod model;
pub mod state;
