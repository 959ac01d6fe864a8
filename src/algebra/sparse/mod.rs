#![allow(non_snake_case)]

mod core;
pub use self::core::*;
mod export;
pub use export::*;
mod matrix_math;
mod products;

#[cfg(feature = "parallel")]
mod parallel;
