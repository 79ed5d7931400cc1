//! HTTP request handlers

pub mod chaos_admin;
pub mod health;
pub mod orders;
