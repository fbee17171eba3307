use thiserror::Error;

use common::error::Error as KernelError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Channel sender failed: Receiver has been dropped.")]
    ChannelSendFailed,

    #[error("Snapshot {id} is invalid: {source}")]
    InvalidSnapshot {
        id: u64,
        #[source]
        source: KernelError,
    },

    #[error("Snapshot {0} does not grow: rate per operation must exceed 1.")]
    NoGrowth(u64),

    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
