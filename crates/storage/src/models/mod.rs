pub mod athlete;
pub mod certificate;
pub mod event;
pub mod status;
pub mod team;

pub use athlete::Athlete;
pub use certificate::{Certificate, CertificateIdentity, StoreId};
pub use event::{Event, Winner};
pub use status::LifecycleStatus;
pub use team::TeamStanding;
