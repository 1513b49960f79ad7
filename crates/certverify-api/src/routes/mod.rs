//! # API Route Modules
//!
//! - `verify`: certificate lookup and record listing. There is no route
//!   for inserting records.

pub mod verify;
