pub mod envelope;
pub mod fixtures;
pub mod resource;
pub mod schedule;
pub mod school_data;
