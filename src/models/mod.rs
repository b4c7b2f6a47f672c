pub mod entry;
pub mod location;
pub mod organization;
pub mod project;
pub mod report;
pub mod user;
