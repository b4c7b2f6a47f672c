pub mod colors;
pub mod date;
pub mod duration;
pub mod path;
pub mod table;
