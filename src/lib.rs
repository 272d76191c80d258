//! Calculation engine for GranaApp.
//!
//! This crate computes overtime pay with a stacked night-shift premium,
//! month-by-month compound-interest projections and portfolio rentability,
//! and serves them over a small JSON HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
