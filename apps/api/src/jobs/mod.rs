// Job postings: recruiter CRUD, public listing and keyword search.

pub mod handlers;
pub mod models;
pub mod search;
pub mod service;
