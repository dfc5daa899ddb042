//! A closed set of RDF literal datatype instances.
//!
//! A [`DatatypeInstance`] is derived on demand from a literal's
//! `(datatype, lexical, language)` triple. It is the only place in this
//! workspace that assigns meaning to a literal's lexical form beyond byte
//! comparison: `xsd:string` and `rdf:langString` treat the lexical form as
//! already canonical, `rdf:XMLLiteral` canonicalizes it via exclusive XML
//! C14N, and every other datatype IRI falls back to [`DatatypeInstance::Unknown`],
//! whose canonical form is the lexical form unchanged.
//!
//! This deliberately does not implement the full XSD value-space tower
//! (numeric, temporal, duration types): term ordering and equality in this
//! workspace only need a canonical-form string, not a materialized typed
//! value for every XSD datatype.

#![deny(unsafe_code)]

use rdf_model::vocab::{rdf, xsd};
use rdf_model::NamedNodeRef;

/// A literal's value, classified into the closed set of datatypes this
/// workspace gives special meaning to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatatypeInstance {
    /// `xsd:string`: the canonical form is the lexical form.
    String(String),
    /// `rdf:langString`: the canonical form is the lexical form; the
    /// language tag itself lives on the literal, not here.
    LangString(String),
    /// `rdf:XMLLiteral`: the canonical form is the lexical form parsed as
    /// `<root>{lexical}</root>` and re-emitted via exclusive XML C14N.
    XmlLiteral(String),
    /// Any other datatype IRI: canonical form equals the lexical form.
    Unknown(String),
}

impl DatatypeInstance {
    /// Classifies a literal's components into the closed set of datatype
    /// instances and eagerly computes its canonical form.
    ///
    /// `rdf:XMLLiteral` literals that fail to parse as XML fall back to
    /// [`DatatypeInstance::Unknown`], per the C1 spec's "fails as the
    /// unknown variant if parsing fails".
    pub fn from_literal(lexical: &str, datatype: NamedNodeRef<'_>, language: Option<&str>) -> Self {
        if language.is_some() || datatype == rdf::LANG_STRING {
            Self::LangString(lexical.to_owned())
        } else if datatype == xsd::STRING {
            Self::String(lexical.to_owned())
        } else if datatype == rdf::XML_LITERAL {
            match xml_c14n::canonicalize_lexical_form(lexical) {
                Ok(canonical) => Self::XmlLiteral(canonical),
                Err(_) => Self::Unknown(lexical.to_owned()),
            }
        } else {
            Self::Unknown(lexical.to_owned())
        }
    }

    /// The canonical-form string used by value equality and by the
    /// term-ordering's literal sub-order.
    pub fn canonical_form(&self) -> &str {
        match self {
            Self::String(s) | Self::LangString(s) | Self::XmlLiteral(s) | Self::Unknown(s) => s,
        }
    }

    /// Category used to order literals by datatype kind: `xsd:string` <
    /// `rdf:langString` < everything else, per the term-ordering rule.
    pub fn order_category(&self) -> u8 {
        match self {
            Self::String(_) => 0,
            Self::LangString(_) => 1,
            Self::XmlLiteral(_) | Self::Unknown(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_is_its_own_canonical_form() {
        let instance = DatatypeInstance::from_literal("hello", xsd::STRING, None);
        assert_eq!(instance, DatatypeInstance::String("hello".to_owned()));
        assert_eq!(instance.canonical_form(), "hello");
    }

    #[test]
    fn lang_string_classified_by_language_presence() {
        let instance = DatatypeInstance::from_literal("bonjour", rdf::LANG_STRING, Some("fr"));
        assert_eq!(instance, DatatypeInstance::LangString("bonjour".to_owned()));
    }

    #[test]
    fn xml_literal_canonicalizes_attribute_order() {
        let instance =
            DatatypeInstance::from_literal(r#"<a z="1" a="2"/>"#, rdf::XML_LITERAL, None);
        assert_eq!(
            instance.canonical_form(),
            r#"<a a="2" z="1"></a>"#
        );
    }

    #[test]
    fn malformed_xml_literal_falls_back_to_unknown() {
        let instance = DatatypeInstance::from_literal("<a>", rdf::XML_LITERAL, None);
        assert!(matches!(instance, DatatypeInstance::Unknown(_)));
    }

    #[test]
    fn unknown_datatype_canonical_form_is_lexical_form() {
        let gyear = NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#gYear");
        let instance = DatatypeInstance::from_literal("2020", gyear, None);
        assert_eq!(instance, DatatypeInstance::Unknown("2020".to_owned()));
    }

    #[test]
    fn order_categories_are_string_then_lang_string_then_other() {
        let s = DatatypeInstance::from_literal("a", xsd::STRING, None);
        let l = DatatypeInstance::from_literal("a", rdf::LANG_STRING, Some("en"));
        let u = DatatypeInstance::from_literal(
            "a",
            NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#integer"),
            None,
        );
        assert!(s.order_category() < l.order_category());
        assert!(l.order_category() < u.order_category());
    }
}
