use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("mean arrival interval must be > 0 (got {0})")]
    InvalidArrivalInterval(f64),
    #[error("duration must be > 0 minutes")]
    InvalidDuration,
    #[error("{station} server count must be >= 1 (got {count})")]
    InvalidServerCount { station: String, count: u32 },
    #[error("{station} mean service time must be > 0 (got {value})")]
    InvalidServiceTime { station: String, value: f64 },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
