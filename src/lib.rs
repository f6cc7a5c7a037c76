//! TriFit Library
//!
//! Core functionality for nutrition, fasting and workout tracking.

pub mod build_info;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod store;
pub mod tools;
pub mod tracking;
