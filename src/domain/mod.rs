pub mod adapters;
pub mod models;
