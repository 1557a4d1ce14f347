pub mod play;
pub mod raw;
pub mod vocab;

#[cfg(test)]
pub mod proptest_gen;

pub use play::*;
pub use vocab::*;
