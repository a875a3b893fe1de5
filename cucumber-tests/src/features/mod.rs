pub mod scenario;
pub mod suite;
pub mod world;

pub use world::VideoGameWorld;
