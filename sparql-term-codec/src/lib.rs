//! Per-term encoders and decoders for the [SPARQL Query Results JSON](https://www.w3.org/TR/sparql11-results-json/)
//! and [XML](http://www.w3.org/TR/rdf-sparql-XMLres/) term shapes.
//!
//! This crate covers only the term-level codec, not the surrounding results
//! envelope (`head`/`results`/`boolean`), the bindings table, or the CSV/TSV
//! tabular formats — those are out of scope.

#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod json;
mod xml;

pub use crate::error::TermCodecError;
pub use crate::json::{decode_term_json, encode_term_json};
pub use crate::xml::{decode_term_xml, encode_term_xml};
