//! Admin API for the shoe-inventory catalog
//!
//! A single service combining admin authentication (argon2 password hashes,
//! HS256 bearer tokens), product CRUD over PostgreSQL, image hosting through
//! an S3-compatible object store, and on-demand dashboard aggregates.

pub mod error;
pub mod forms;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod upload;
pub mod validation;
