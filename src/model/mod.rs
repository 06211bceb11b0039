pub mod dims;
pub mod profile;
