// src/lib.rs

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod service;
pub mod test_utils;
