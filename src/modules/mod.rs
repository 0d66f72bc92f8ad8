pub mod overlay;
pub mod stream;
