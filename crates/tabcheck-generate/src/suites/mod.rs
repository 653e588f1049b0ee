pub mod negative;
pub mod pairwise;
pub mod random;
