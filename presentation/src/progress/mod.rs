//! Progress reporting while a council runs

pub mod reporter;
