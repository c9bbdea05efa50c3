//! Rendering of debate results

pub mod console;
pub mod decision_record;
pub mod formatter;
