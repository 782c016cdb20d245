pub mod api;
pub mod common;
pub mod image;

pub use api::*;
pub use common::*;
pub use image::*;
