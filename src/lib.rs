pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod paraphraser;
pub mod prompt;
pub mod server;
pub mod transport;

pub use config::{Config, ProviderCredential, Shell};
pub use error::{ParaphraseError, Result};
pub use paraphraser::{CompletionSettings, Paraphraser};
pub use transport::{ModelCatalog, ProviderTransport, Transport};
