//! A streaming reader for the [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/)
//! serialization.
//!
//! RDF/XML serialization is out of scope: this crate only reads it, and
//! normalizes whatever it reads into [`rdf-model`](../rdf_model/index.html)
//! terms and quads.

#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod parser;
mod utils;

pub use error::{RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
pub use parser::{FromReadRdfXmlReader, RdfXmlParser};
