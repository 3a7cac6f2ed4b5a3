use {
    crate::{
        config::PixConfig,
        persistence::{Persistence, error::RepositoryError},
        transfer::TransferUseCase,
    },
    std::sync::Arc,
};

pub mod config;
pub mod logging;
mod macros;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod transfer;

/// Engine facade: wires the SQLite store into the transfer use-case from a
/// loaded configuration. An embedding transport layer holds one of these.
pub struct PixCore {
    pub transfers: TransferUseCase,
    pub config: PixConfig,
}

impl PixCore {
    pub fn new(config: PixConfig) -> Result<Self, RepositoryError> {
        let store = Arc::new(Persistence::new(&config.persistence.db_path)?);
        let transfers = TransferUseCase::new(store.clone(), store);

        Ok(PixCore { transfers, config })
    }
}
