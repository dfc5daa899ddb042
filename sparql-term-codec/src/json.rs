//! Per-term [SPARQL Query Results JSON](https://www.w3.org/TR/sparql11-results-json/)
//! shape: `{"type":"uri"|"bnode"|"literal", "value":..., [language], [datatype]}`.

use crate::error::TermCodecError;
use rdf_model::vocab::{rdf, xsd};
use rdf_model::{BlankNode, Literal, NamedNode, Term, TermRef};
use serde_json::{Map, Value};

/// Encodes a single RDF term using the SPARQL JSON results term shape.
pub fn encode_term_json(term: TermRef<'_>) -> Value {
    let mut object = Map::with_capacity(3);
    match term {
        TermRef::NamedNode(iri) => {
            object.insert("type".into(), "uri".into());
            object.insert("value".into(), iri.as_str().into());
        }
        TermRef::BlankNode(bnode) => {
            object.insert("type".into(), "bnode".into());
            object.insert("value".into(), bnode.as_str().into());
        }
        TermRef::Literal(literal) => {
            object.insert("type".into(), "literal".into());
            object.insert("value".into(), literal.value().into());
            if let Some(language) = literal.language() {
                object.insert("language".into(), language.into());
            } else if literal.datatype() != xsd::STRING && literal.datatype() != rdf::LANG_STRING {
                object.insert("datatype".into(), literal.datatype().as_str().into());
            }
        }
    }
    Value::Object(object)
}

/// Decodes a single RDF term from the SPARQL JSON results term shape.
pub fn decode_term_json(value: &Value) -> Result<Term, TermCodecError> {
    let object = value
        .as_object()
        .ok_or_else(|| TermCodecError::msg("a SPARQL JSON term must be a JSON object"))?;
    let get_str = |key: &str| -> Result<&str, TermCodecError> {
        object
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| TermCodecError::msg(format!("term object is missing a '{key}' string")))
    };
    match get_str("type")? {
        "uri" => {
            let value = get_str("value")?;
            NamedNode::new(value)
                .map(Term::from)
                .map_err(|error| TermCodecError::Iri {
                    error,
                    value: value.to_owned(),
                })
        }
        "bnode" => {
            let value = get_str("value")?;
            BlankNode::new(value)
                .map(Term::from)
                .map_err(|error| TermCodecError::BlankNode {
                    error,
                    value: value.to_owned(),
                })
        }
        "literal" | "typed-literal" => {
            let value = get_str("value")?.to_owned();
            if let Some(language) = object.get("language").and_then(Value::as_str) {
                Literal::new_language_tagged_literal(value, language)
                    .map(Term::from)
                    .map_err(|error| TermCodecError::LanguageTag {
                        error,
                        value: language.to_owned(),
                    })
            } else if let Some(datatype) = object.get("datatype").and_then(Value::as_str) {
                NamedNode::new(datatype)
                    .map(|datatype| Term::from(Literal::new_typed_literal(value, datatype)))
                    .map_err(|error| TermCodecError::Iri {
                        error,
                        value: datatype.to_owned(),
                    })
            } else {
                Ok(Term::from(Literal::new_simple_literal(value)))
            }
        }
        other => Err(TermCodecError::msg(format!(
            "unsupported SPARQL JSON term type: '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_an_iri() {
        let term = Term::from(NamedNode::new("http://example.com/").unwrap());
        let encoded = encode_term_json(term.as_ref());
        assert_eq!(encoded, json!({"type": "uri", "value": "http://example.com/"}));
        assert_eq!(decode_term_json(&encoded).unwrap(), term);
    }

    #[test]
    fn round_trips_a_plain_literal() {
        let term = Term::from(Literal::new_simple_literal("hello"));
        let encoded = encode_term_json(term.as_ref());
        assert_eq!(encoded, json!({"type": "literal", "value": "hello"}));
        assert_eq!(decode_term_json(&encoded).unwrap(), term);
    }

    #[test]
    fn round_trips_a_language_tagged_literal() {
        let term = Term::from(Literal::new_language_tagged_literal("bonjour", "fr").unwrap());
        let encoded = encode_term_json(term.as_ref());
        assert_eq!(
            encoded,
            json!({"type": "literal", "value": "bonjour", "language": "fr"})
        );
        assert_eq!(decode_term_json(&encoded).unwrap(), term);
    }

    #[test]
    fn round_trips_a_typed_literal() {
        let term = Term::from(Literal::new_typed_literal("42", xsd::INTEGER));
        let encoded = encode_term_json(term.as_ref());
        assert_eq!(
            encoded,
            json!({"type": "literal", "value": "42", "datatype": xsd::INTEGER.as_str()})
        );
        assert_eq!(decode_term_json(&encoded).unwrap(), term);
    }

    #[test]
    fn round_trips_a_blank_node() {
        let term = Term::from(BlankNode::new("b1").unwrap());
        let encoded = encode_term_json(term.as_ref());
        assert_eq!(encoded, json!({"type": "bnode", "value": "b1"}));
        assert_eq!(decode_term_json(&encoded).unwrap(), term);
    }

    #[test]
    fn rejects_an_unknown_type() {
        let value = json!({"type": "unsupported", "value": "x"});
        assert!(decode_term_json(&value).is_err());
    }
}
