pub mod game;
pub mod locomotion;
pub mod physics;
pub mod timers;
pub mod traffic;
