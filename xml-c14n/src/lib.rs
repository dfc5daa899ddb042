//! Parsing and canonical serialization of small XML fragments.
//!
//! This crate backs the `rdf:XMLLiteral` datatype: its lexical form is an XML
//! fragment, and two XML fragments are the *same value* iff their exclusive
//! canonical forms are byte-identical. It is intentionally not a general
//! XML toolkit: fragments are parsed into a tiny tree (no processing
//! instructions, no comments, no DTD) and canonicalization only implements
//! the subset of [Exclusive XML Canonicalization](https://www.w3.org/TR/xml-exc-c14n/)
//! that RDF/XML Literal values need: element/attribute namespace-qualified
//! names, sorted attributes, hoisted namespace declarations, and the
//! standard character/attribute-value escaping.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use std::collections::BTreeSet;
use std::fmt::Write as _;

#[derive(thiserror::Error, Debug)]
pub enum XmlC14nError {
    #[error("invalid XML fragment: {0}")]
    InvalidXml(#[from] quick_xml::Error),
    #[error("invalid UTF-8 in XML fragment: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("XML fragment ended inside an open element")]
    UnexpectedEof,
}

/// A namespace-qualified name: `{namespace}local` with an optional preferred prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local_name: String,
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualifiedName,
    /// Namespace declarations written directly on this element (`xmlns`/`xmlns:p`).
    pub namespace_decls: Vec<(Option<String>, String)>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A parsed fragment: the top-level sequence of nodes (what RDF/XML calls the
/// "inner XML" of a `parseType="Literal"` property element).
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub children: Vec<Node>,
}

/// Parses `xml` as the content of an element, given the namespace bindings
/// already in scope at that point in the ambient document (spec C8 calls
/// this "preserving namespaces in scope at the content root").
pub fn parse_fragment(
    xml: &str,
    inherited_namespaces: &[(Option<String>, String)],
) -> Result<Fragment, XmlC14nError> {
    let mut wrapper = String::from("<rdftk-c14n-root");
    for (prefix, uri) in inherited_namespaces {
        match prefix {
            Some(prefix) => {
                let _ = write!(wrapper, " xmlns:{prefix}=\"{}\"", escape_attr(uri));
            }
            None => {
                let _ = write!(wrapper, " xmlns=\"{}\"", escape_attr(uri));
            }
        }
    }
    wrapper.push('>');
    wrapper.push_str(xml);
    wrapper.push_str("</rdftk-c14n-root>");

    let mut reader = NsReader::from_str(&wrapper);
    reader.config_mut().trim_text(false);
    let mut stack: Vec<Element> = Vec::new();
    let mut root_children = Vec::new();
    let mut depth = 0usize;
    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => {
                if depth != 0 {
                    return Err(XmlC14nError::UnexpectedEof);
                }
                break;
            }
            Event::Start(start) => {
                let element = build_element(&reader, &start)?;
                depth += 1;
                if depth == 1 {
                    // the synthetic wrapper itself: its children are our fragment
                    stack.push(Element {
                        name: element.name,
                        namespace_decls: Vec::new(),
                        attributes: Vec::new(),
                        children: Vec::new(),
                    });
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(start) => {
                let element = build_element(&reader, &start)?;
                push_child(&mut stack, &mut root_children, Node::Element(element));
            }
            Event::End(_) => {
                depth -= 1;
                let finished = stack.pop().expect("matching start for end event");
                if depth == 0 {
                    root_children = finished.children;
                } else {
                    push_child(&mut stack, &mut root_children, Node::Element(finished));
                }
            }
            Event::Text(text) => {
                let unescaped = text.unescape()?.into_owned();
                if !unescaped.is_empty() {
                    push_child(&mut stack, &mut root_children, Node::Text(unescaped));
                }
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(cdata.as_ref())?.to_owned();
                push_child(&mut stack, &mut root_children, Node::Text(text));
            }
            _ => {}
        }
    }
    Ok(Fragment {
        children: root_children,
    })
}

fn push_child(stack: &mut [Element], root_children: &mut Vec<Node>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else {
        root_children.push(node);
    }
}

fn build_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, XmlC14nError> {
    let (ns, local) = reader.resolve_element(start.name());
    let raw_name = std::str::from_utf8(start.name().as_ref())?.to_owned();
    let prefix = raw_name.split_once(':').map(|(p, _)| p.to_owned());
    let namespace = match ns {
        ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_owned()),
        _ => None,
    };
    let mut namespace_decls = Vec::new();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlC14nError::InvalidXml(e.into()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        if key == "xmlns" {
            namespace_decls.push((None, value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespace_decls.push((Some(prefix.to_owned()), value));
        } else {
            let (attr_ns, _) = reader.resolve_attribute(attr.key);
            let attr_prefix = key.split_once(':').map(|(p, _)| p.to_owned());
            let attr_local = key.rsplit(':').next().unwrap_or(key).to_owned();
            let attr_namespace = match attr_ns {
                ResolveResult::Bound(ns) => Some(std::str::from_utf8(ns.as_ref())?.to_owned()),
                _ => None,
            };
            attributes.push(Attribute {
                name: QualifiedName {
                    namespace: attr_namespace,
                    prefix: attr_prefix,
                    local_name: attr_local,
                },
                value,
            });
        }
    }
    Ok(Element {
        name: QualifiedName {
            namespace,
            prefix,
            local_name: std::str::from_utf8(local.as_ref())?.to_owned(),
        },
        namespace_decls,
        attributes,
        children: Vec::new(),
    })
}

/// Produces the exclusive canonical form of a fragment's top-level nodes,
/// concatenated in document order, with every namespace declaration that was
/// in scope at the fragment's root hoisted onto each outermost emitted
/// element (child text nodes need no declarations).
pub fn canonicalize_fragment(
    fragment: &Fragment,
    inherited_namespaces: &[(Option<String>, String)],
) -> String {
    let mut out = String::new();
    for child in &fragment.children {
        match child {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(element) => {
                let used = used_prefixes(element);
                let hoisted: Vec<_> = inherited_namespaces
                    .iter()
                    .filter(|(prefix, _)| used.contains(prefix))
                    .cloned()
                    .collect();
                write_element(&mut out, element, &hoisted, true);
            }
        }
    }
    out
}

fn used_prefixes(element: &Element) -> BTreeSet<Option<String>> {
    let mut set = BTreeSet::new();
    fn visit(element: &Element, set: &mut BTreeSet<Option<String>>) {
        set.insert(element.name.prefix.clone());
        for attr in &element.attributes {
            if attr.name.prefix.is_some() {
                set.insert(attr.name.prefix.clone());
            }
        }
        for child in &element.children {
            if let Node::Element(child) = child {
                visit(child, set);
            }
        }
    }
    visit(element, &mut set);
    set
}

fn write_element(
    out: &mut String,
    element: &Element,
    extra_namespace_decls: &[(Option<String>, String)],
    is_outermost: bool,
) {
    let qname = qualified_name(&element.name.prefix, &element.name.local_name);
    let _ = write!(out, "<{qname}");

    let mut decls: Vec<(Option<String>, String)> = element.namespace_decls.clone();
    if is_outermost {
        let declared_prefixes: BTreeSet<_> = decls.iter().map(|(p, _)| p.clone()).collect();
        for (prefix, uri) in extra_namespace_decls {
            if !declared_prefixes.contains(prefix) {
                decls.push((prefix.clone(), uri.clone()));
            }
        }
    }
    decls.sort_by(|a, b| a.0.cmp(&b.0));
    for (prefix, uri) in &decls {
        match prefix {
            Some(prefix) => {
                let _ = write!(out, " xmlns:{prefix}=\"{}\"", escape_attr(uri));
            }
            None => {
                let _ = write!(out, " xmlns=\"{}\"", escape_attr(uri));
            }
        }
    }

    let mut attrs = element.attributes.clone();
    attrs.sort_by(|a, b| {
        let a_key = qualified_name(&a.name.prefix, &a.name.local_name);
        let b_key = qualified_name(&b.name.prefix, &b.name.local_name);
        a_key.cmp(&b_key)
    });
    for attr in &attrs {
        let attr_qname = qualified_name(&attr.name.prefix, &attr.name.local_name);
        let _ = write!(out, " {attr_qname}=\"{}\"", escape_attr(&attr.value));
    }
    out.push('>');

    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(child) => write_element(out, child, &[], false),
        }
    }

    let _ = write!(out, "</{qname}>");
}

fn qualified_name(prefix: &Option<String>, local_name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local_name}"),
        _ => local_name.to_owned(),
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}

/// Convenience: canonicalizes a bare lexical `rdf:XMLLiteral` form with no
/// inherited namespace context (the common case once a document has been
/// fully parsed and every namespace used in the literal is declared inline).
pub fn canonicalize_lexical_form(xml: &str) -> Result<String, XmlC14nError> {
    let fragment = parse_fragment(xml, &[])?;
    Ok(canonicalize_fragment(&fragment, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_simple_element() {
        let out = canonicalize_lexical_form("<a><b>1</b></a>").unwrap();
        assert_eq!(out, "<a><b>1</b></a>");
    }

    #[test]
    fn sorts_attributes() {
        let out = canonicalize_lexical_form(r#"<a z="1" a="2"/>"#).unwrap();
        assert_eq!(out, r#"<a a="2" z="1"></a>"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let out = canonicalize_lexical_form(r#"<a x="&amp;&lt;">&lt;hi&gt;</a>"#).unwrap();
        assert_eq!(out, r#"<a x="&amp;&lt;">&lt;hi&gt;</a>"#);
    }

    #[test]
    fn hoists_inherited_namespace_onto_outermost_children() {
        let fragment = parse_fragment(
            "<p:a><p:b/></p:a>",
            &[(Some("p".to_owned()), "http://example.com/".to_owned())],
        )
        .unwrap();
        let out = canonicalize_fragment(
            &fragment,
            &[(Some("p".to_owned()), "http://example.com/".to_owned())],
        );
        assert_eq!(
            out,
            r#"<p:a xmlns:p="http://example.com/"><p:b></p:b></p:a>"#
        );
    }

    #[test]
    fn does_not_duplicate_locally_redeclared_namespace() {
        let fragment = parse_fragment(
            r#"<p:a xmlns:p="http://local/"><p:b/></p:a>"#,
            &[(Some("p".to_owned()), "http://example.com/".to_owned())],
        )
        .unwrap();
        let out = canonicalize_fragment(
            &fragment,
            &[(Some("p".to_owned()), "http://example.com/".to_owned())],
        );
        assert_eq!(out, r#"<p:a xmlns:p="http://local/"><p:b></p:b></p:a>"#);
    }
}
