// Student résumés: one per student, built from a form and/or an uploaded PDF.

pub mod handlers;
pub mod models;
pub mod service;
pub mod storage;
