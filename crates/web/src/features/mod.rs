pub mod athletes;
pub mod certificates;
pub mod debug;
pub mod events;
pub mod teams;
