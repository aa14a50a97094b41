pub mod random;

pub use random::SessionRandom;
