//! Core entry point for the warranty_card crate.
//!
//! A [`record::WarrantyRecord`] is decoded from a request, laid out on a fixed
//! single page by [`builder::CardBuilder`] and persisted by
//! [`generator::DocumentGenerator`]. The [`server`] module exposes the same
//! operation over HTTP.

pub mod builder;
pub mod config;
pub mod elements;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod layout;
pub mod record;
pub mod server;
pub mod winansi;

pub use error::{Error, Result};
