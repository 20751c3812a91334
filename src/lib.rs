// src/lib.rs

//! Cheque register table library

pub mod app;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod store;
pub mod surface;
pub mod utils;
