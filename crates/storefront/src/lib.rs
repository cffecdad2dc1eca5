//! Urban Store storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart_store;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
