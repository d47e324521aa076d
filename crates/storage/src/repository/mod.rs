pub mod athlete;
pub mod certificate;
pub mod event;
pub mod team;
