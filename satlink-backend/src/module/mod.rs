pub mod info;
pub mod tle;
pub mod upstream;
