/// Failure while reversing a layer payload's encoding or compression.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("invalid zlib stream: {0}")]
    InvalidCompression(std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed markup: {0}")]
    Parse(String),

    #[error("<{tag}> is missing required attribute '{name}'")]
    MissingAttribute { tag: String, name: &'static str },

    #[error("<{tag}> attribute '{name}' has invalid value {value:?}")]
    InvalidAttribute {
        tag: String,
        name: &'static str,
        value: String,
    },

    #[error("layer '{layer}': {source}")]
    Decode {
        layer: String,
        #[source]
        source: DecodeError,
    },

    #[error("layer '{layer}': decoded {actual} bytes, expected {expected}")]
    Size {
        layer: String,
        expected: usize,
        actual: usize,
    },
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
