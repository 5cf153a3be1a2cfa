//! Small shared helpers: integer bit math and the workspace's map types.

pub mod bits;
pub mod map;

pub use map::{Map, Set};
