pub mod forces;
pub mod random;
pub mod sampler;
pub mod star;

pub use random::RandomUtil;
pub use star::Star;
