//! Streaming readers and writers for the line-based RDF serializations
//! (N-Triples, N-Quads) and the terse, prefix-driven ones (Turtle, TriG).
//!
//! Every parser in this crate is built with a [`Strictness`] choice: `Strict`
//! rejects any input that deviates from the grammar, `Lenient` recovers from
//! the handful of malformed-but-common patterns real-world RDF publishers
//! produce (relative IRIs with illegal characters, duplicate `@prefix`
//! declarations, …), never silently dropping a well-formed statement.

#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod chunker;
mod lexer;
mod line_formats;
pub mod nquads;
pub mod ntriples;
mod terse;
mod toolkit;
pub mod trig;
pub mod turtle;

pub use crate::nquads::{NQuadsParser, NQuadsSerializer};
pub use crate::ntriples::{NTriplesParser, NTriplesSerializer};
pub use crate::toolkit::{TextPosition, TurtleParseError, TurtleSyntaxError};
pub use crate::trig::{TriGParser, TriGSerializer};
pub use crate::turtle::{TurtleParser, TurtleSerializer};
pub use rdf_model::Strictness;

pub(crate) const MIN_BUFFER_SIZE: usize = 4096;
pub(crate) const MAX_BUFFER_SIZE: usize = 4096 * 4096;
#[expect(clippy::decimal_literal_representation)]
pub(crate) const MIN_PARALLEL_CHUNK_SIZE: usize = 16384;
