//! Profile of the authenticated user.

pub mod handlers;
pub mod service;
