/// Whether a parser or canonicalizer rejects any grammar/encoding deviation
/// (`Strict`, the default) or recovers from the common real-world syntax
/// errors it knows how to repair (`Lenient`).
///
/// Threaded as a builder parameter into every streaming parser in this
/// workspace (N-Triples, N-Quads, Turtle, TriG, RDF/XML) in place of a
/// single process-wide "unchecked" toggle, so a program parsing both a
/// trusted and an untrusted source can hold the two parsers to different
/// standards at the same time. Resource-limit and usage errors are always
/// surfaced regardless of `Strictness`; it only governs grammar and
/// encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Strict,
    Lenient,
}

impl Strictness {
    #[inline]
    pub fn is_lenient(self) -> bool {
        self == Self::Lenient
    }
}
