pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod stores;

pub use error::{Result, StorageError};
pub use stores::{CertificateStores, Database};
