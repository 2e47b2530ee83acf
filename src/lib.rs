//! Folio - A small portfolio backend
//!
//! Blog, projects, testimonials, resume metadata, a contact inbox and an AI
//! assistant that answers visitor questions about the portfolio.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
