//! Per-term [SPARQL Query Results XML](http://www.w3.org/TR/rdf-sparql-XMLres/)
//! shape: `<uri>`/`<bnode>`/`<literal xml:lang="..." datatype="...">`.

use crate::error::TermCodecError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rdf_model::{BlankNode, Literal, NamedNode, Term, TermRef};
use std::io::{BufRead, Write};

/// Writes a single RDF term using the SPARQL XML results term shape.
pub fn encode_term_xml(
    term: TermRef<'_>,
    writer: &mut Writer<impl Write>,
) -> Result<(), TermCodecError> {
    match term {
        TermRef::NamedNode(iri) => {
            writer.write_event(Event::Start(BytesStart::new("uri")))?;
            writer.write_event(Event::Text(BytesText::new(iri.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("uri")))?;
        }
        TermRef::BlankNode(bnode) => {
            writer.write_event(Event::Start(BytesStart::new("bnode")))?;
            writer.write_event(Event::Text(BytesText::new(bnode.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("bnode")))?;
        }
        TermRef::Literal(literal) => {
            let mut tag = BytesStart::new("literal");
            if let Some(language) = literal.language() {
                tag.push_attribute(("xml:lang", language));
            } else if !literal.is_plain() {
                tag.push_attribute(("datatype", literal.datatype().as_str()));
            }
            writer.write_event(Event::Start(tag))?;
            writer.write_event(Event::Text(BytesText::new(literal.value())))?;
            writer.write_event(Event::End(BytesEnd::new("literal")))?;
        }
    }
    Ok(())
}

/// Reads a single RDF term from the SPARQL XML results term shape, starting
/// right before its opening `<uri>`/`<bnode>`/`<literal>` tag.
pub fn decode_term_xml(reader: &mut Reader<impl BufRead>) -> Result<Term, TermCodecError> {
    reader.config_mut().expand_empty_elements = true;
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_event_into(&mut buffer)? {
            Event::Start(tag) => {
                let name = tag.name();
                return match name.as_ref() {
                    b"uri" => {
                        let value = read_text(reader, "uri")?;
                        NamedNode::new(value.clone())
                            .map(Term::from)
                            .map_err(|error| TermCodecError::Iri { error, value })
                    }
                    b"bnode" => {
                        let value = read_text(reader, "bnode")?;
                        BlankNode::new(value.clone())
                            .map(Term::from)
                            .map_err(|error| TermCodecError::BlankNode { error, value })
                    }
                    b"literal" => {
                        let mut language = None;
                        let mut datatype = None;
                        for attribute in tag.attributes() {
                            let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
                            match attribute.key.as_ref() {
                                b"xml:lang" => {
                                    language = Some(attribute.unescape_value()?.into_owned())
                                }
                                b"datatype" => {
                                    datatype = Some(attribute.unescape_value()?.into_owned())
                                }
                                _ => {}
                            }
                        }
                        let value = read_text(reader, "literal")?;
                        build_literal(value, language, datatype)
                    }
                    other => Err(TermCodecError::msg(format!(
                        "unexpected SPARQL XML term tag: '{}'",
                        String::from_utf8_lossy(other)
                    ))),
                };
            }
            Event::Eof => {
                return Err(TermCodecError::msg(
                    "unexpected end of document while reading a term",
                ));
            }
            _ => {}
        }
    }
}

/// Reads the text content of an element up to and including its matching end tag.
/// An element with no text content (`<uri></uri>` or `<uri/>`) yields the empty string.
fn read_text(reader: &mut Reader<impl BufRead>, tag: &str) -> Result<String, TermCodecError> {
    let mut value = String::new();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let event = reader.read_event_into(&mut buffer)?;
        match event {
            Event::Text(text) => value.push_str(&text.unescape()?),
            Event::End(end) if end.name().as_ref() == tag.as_bytes() => return Ok(value),
            Event::Eof => {
                return Err(TermCodecError::msg(format!(
                    "unexpected end of document inside <{tag}>"
                )));
            }
            _ => {}
        }
    }
}

fn build_literal(
    value: String,
    language: Option<String>,
    datatype: Option<String>,
) -> Result<Term, TermCodecError> {
    if let Some(language) = language {
        Literal::new_language_tagged_literal(value, language.clone())
            .map(Term::from)
            .map_err(|error| TermCodecError::LanguageTag {
                error,
                value: language,
            })
    } else if let Some(datatype) = datatype {
        NamedNode::new(datatype.clone())
            .map(|datatype| Term::from(Literal::new_typed_literal(value, datatype)))
            .map_err(|error| TermCodecError::Iri {
                error,
                value: datatype,
            })
    } else {
        Ok(Term::from(Literal::new_simple_literal(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_model::vocab::xsd;

    fn round_trip(term: Term) {
        let mut buffer = Vec::new();
        let mut writer = Writer::new(&mut buffer);
        encode_term_xml(term.as_ref(), &mut writer).unwrap();
        let mut reader = Reader::from_reader(buffer.as_slice());
        reader.config_mut().trim_text(false);
        assert_eq!(decode_term_xml(&mut reader).unwrap(), term);
    }

    #[test]
    fn round_trips_an_iri() {
        round_trip(Term::from(NamedNode::new("http://example.com/").unwrap()));
    }

    #[test]
    fn round_trips_a_blank_node() {
        round_trip(Term::from(BlankNode::new("b1").unwrap()));
    }

    #[test]
    fn round_trips_a_plain_literal() {
        round_trip(Term::from(Literal::new_simple_literal("hello")));
    }

    #[test]
    fn round_trips_a_language_tagged_literal() {
        round_trip(Term::from(
            Literal::new_language_tagged_literal("bonjour", "fr").unwrap(),
        ));
    }

    #[test]
    fn round_trips_a_typed_literal() {
        round_trip(Term::from(Literal::new_typed_literal("42", xsd::INTEGER)));
    }
}
