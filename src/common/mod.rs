pub mod file_utils;
pub mod version;
