pub mod states;
pub mod coordinate;
pub mod params;
pub mod error;
pub mod hierarchy;
pub mod forces;
pub mod integrator;
pub mod lead;
pub mod world;
pub mod engine;
pub mod scenario;
