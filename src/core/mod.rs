//! Core geographic utilities

pub mod coordinates;
