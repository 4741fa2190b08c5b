//! Life Journal dashboard: record cards, pagination, and a remote code runner.
//!
//! The journal backend exposes four record endpoints and a code execution
//! endpoint:
//!
//! | Endpoint | Card shows |
//! |----------|------------|
//! | `GET /api/conversations` | Title, Summary, Created At |
//! | `GET /api/facts` | Text, Confirmed, Created At |
//! | `GET /api/todos` | Task, Completed, Created At |
//! | `GET /api/lifelogs` | Title, Description, Tags, Created At |
//! | `POST /execute` | stdout / stderr of the submitted code |
//!
//! This crate renders those records into HTML cards, drives paging with a
//! per-endpoint counter, and submits editor contents for execution. The page
//! is modelled as a [`document::Document`] of named containers, rendering is
//! a pure data-to-markup mapping, and all HTTP goes through the
//! [`fetcher::ApiClient`] trait so the whole flow runs against a mock in tests.
//!
//! # Modules
//!
//! - [`config`]: configuration from TOML files and environment variables
//! - [`records`]: endpoint, record and envelope types
//! - [`render`]: card, stats and date rendering
//! - [`document`]: the in-memory page and its element IDs
//! - [`fetcher`]: paginated GET requests and pagination controls
//! - [`runner`]: code submission to `/execute`
//! - [`dashboard`]: UI event dispatch tying the above together
//! - [`server`]: axum server for the dashboard page

pub mod config;
pub mod dashboard;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod records;
pub mod render;
pub mod runner;
pub mod server;
