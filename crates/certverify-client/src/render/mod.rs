//! Presentation of lookup results: a terminal [`view`] and the [`pdf`]
//! verification report.

pub mod pdf;
pub mod view;
