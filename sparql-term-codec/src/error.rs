use rdf_model::{BlankNodeIdParseError, IriParseError, LanguageTagParseError};
use std::io;

/// An error raised while encoding or decoding a single RDF term in one of the
/// SPARQL Query Results term shapes (JSON or XML).
#[derive(Debug, thiserror::Error)]
pub enum TermCodecError {
    #[error("invalid IRI '{value}': {error}")]
    Iri {
        #[source]
        error: IriParseError,
        value: String,
    },
    #[error("invalid blank node identifier '{value}': {error}")]
    BlankNode {
        #[source]
        error: BlankNodeIdParseError,
        value: String,
    },
    #[error("invalid language tag '{value}': {error}")]
    LanguageTag {
        #[source]
        error: LanguageTagParseError,
        value: String,
    },
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Msg(String),
}

impl TermCodecError {
    pub(crate) fn msg(msg: impl Into<String>) -> Self {
        Self::Msg(msg.into())
    }
}

impl From<TermCodecError> for io::Error {
    fn from(error: TermCodecError) -> Self {
        match error {
            TermCodecError::Xml(quick_xml::Error::Io(error)) => {
                std::sync::Arc::try_unwrap(error).unwrap_or_else(|e| Self::new(e.kind(), e))
            }
            error => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}
