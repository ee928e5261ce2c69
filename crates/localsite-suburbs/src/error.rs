use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuburbError {
    #[error("suburb catalogue not found at {path}")]
    CatalogueMissing { path: String },

    #[error("failed to read suburb catalogue at {path}: {source}")]
    CatalogueIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse suburb catalogue at {path}: {source}")]
    CatalogueParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("suburb catalogue has duplicate id {id} ({first} and {second})")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },

    #[error("no catalogue suburb matches '{term}'")]
    NoMatch { term: String },

    #[error("best-match resolution called with no candidates")]
    EmptyCandidates,

    #[error("geocoding is not supported with static suburb data (address: {address})")]
    GeocodingNotSupported { address: String },

    #[error("unknown suburb id {0}")]
    UnknownSuburb(u32),
}
