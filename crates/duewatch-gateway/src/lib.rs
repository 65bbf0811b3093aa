//! # DueWatch Gateway
//!
//! Minimal HTTP surface over the pipeline:
//! - `GET /` runs the pipeline synchronously and returns the
//!   line-per-record plain-text report (500 on store failure),
//! - `GET /status` answers without touching the pipeline,
//! - anything else is 404.
//!
//! Pure dispatch: every decision lives in `duewatch-pipeline`.

mod routes;
mod server;

pub use server::{AppState, build_router, serve};
