use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A graph, search or telemetry call failed or timed out.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// A search yielded nothing, snapping found no node, or no path exists.
    #[error("{0}")]
    NotFound(String),
    /// Candidates exist, but all of them exceed the search radius.
    #[error("no '{query}' within {radius_km} km")]
    OutOfRange { query: String, radius_km: f64 },
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ProviderUnavailable(err.to_string())
    }
}
