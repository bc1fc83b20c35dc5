#![doc = include_str!("../README.md")]

pub use sg_path as path;
pub use sg_reflect as reflect;
