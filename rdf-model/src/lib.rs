#![doc = include_str!("../README.md")]
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod blank_node;
pub mod dataset;
pub mod graph;
mod interning;
mod iri;
mod literal;
mod named_node;
mod parser;
mod strictness;
mod triple;
pub mod vocab;

pub use crate::blank_node::{BlankNode, BlankNodeIdParseError, BlankNodeRef};
pub use crate::dataset::Dataset;
pub use crate::graph::Graph;
pub use crate::iri::{
    is_rfc3986_uri_reference, is_rfc3987_iri_reference, normalize as normalize_iri, Iri,
    IriParseError, IriRef,
};
pub use crate::literal::{
    validate_language_tag, LanguageTagParseError, Literal, LiteralRef,
};
pub use crate::named_node::{NamedNode, NamedNodeRef};
pub use crate::parser::TermParseError;
pub use crate::strictness::Strictness;
pub use crate::triple::{
    GraphName, GraphNameRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef, Subject,
    SubjectRef, Term, TermRef, TryFromTermError, Triple, TripleRef,
};
