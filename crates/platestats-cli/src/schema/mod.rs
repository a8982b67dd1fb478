pub mod plate_collection;
pub mod report;
