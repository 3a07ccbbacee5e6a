//! Local persistence for saved API credentials.

mod credentials_store;
mod error;

pub use credentials_store::{CREDENTIALS_FILE_NAME, CredentialsStore};
pub use error::PersistenceError;
