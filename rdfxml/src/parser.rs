use crate::error::{RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
use crate::id_registry::IdRegistry;
use crate::iri_resolve;
use crate::ncname::{is_nc_name, is_utf8, is_whitespace};
use oxilangtag::LanguageTag;
use oxiri::{Iri, IriParseError};
use quick_xml::escape::unescape_with;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::*;
use quick_xml::name::{LocalName, QName, ResolveResult};
use quick_xml::{Error, NsReader, Writer};
use rdf_model::vocab::rdf;
use rdf_model::{BaseDirection, BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term, Triple};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::rc::Rc;
use std::str;
#[cfg(feature = "async-tokio")]
use tokio::io::{AsyncRead, BufReader as AsyncBufReader};

/// Mirrors bytes as they stream past, so a [`RdfXmlSyntaxError`] can be given a line/column
/// instead of just the byte offset `quick_xml` tracks natively. Bytes older than the start of
/// the line containing the last successfully-finished event are dropped, so this stays bounded
/// by the current line length plus whatever read-ahead the underlying buffered reader performs,
/// not by document size. Inert when position tracking is disabled.
#[derive(Debug, Default)]
struct PositionTrackingState {
    buf: Vec<u8>,
    buf_start_offset: u64,
    committed_line: u64,
}

impl PositionTrackingState {
    /// Folds every byte up to `end_offset` into `committed_line`, then discards everything
    /// before the start of the line `end_offset` falls on.
    fn trim_to(&mut self, end_offset: u64) {
        let upto = end_offset.saturating_sub(self.buf_start_offset) as usize;
        let upto = upto.min(self.buf.len());
        let mut keep_from = 0;
        for (i, &b) in self.buf[..upto].iter().enumerate() {
            if b == b'\n' {
                self.committed_line += 1;
                keep_from = i + 1;
            }
        }
        self.buf.drain(..keep_from);
        self.buf_start_offset += keep_from as u64;
    }

    /// The line/column/offset of `offset`, which must not be older than the last [`Self::trim_to`] call.
    fn position_at(&self, offset: u64) -> TextPosition {
        let rel = offset.saturating_sub(self.buf_start_offset) as usize;
        let rel = rel.min(self.buf.len());
        let mut line = self.committed_line;
        let mut line_start = 0;
        for (i, &b) in self.buf[..rel].iter().enumerate() {
            if b == b'\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        let column = str::from_utf8(&self.buf[line_start..rel])
            .map(|s| s.chars().count() as u64)
            .unwrap_or((rel - line_start) as u64);
        TextPosition { line, column, offset }
    }
}

/// A [`Read`]/[`AsyncRead`] wrapper that copies every byte it serves into a shared
/// [`PositionTrackingState`]. Copying is skipped entirely (`state` is `None`) when
/// [`RdfXmlParser::track_position`] is disabled.
struct PositionTrackingRead<R> {
    inner: R,
    state: Option<Rc<RefCell<PositionTrackingState>>>,
}

impl<R: Read> Read for PositionTrackingRead<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if let Some(state) = &self.state {
            state.borrow_mut().buf.extend_from_slice(&buf[..n]);
        }
        Ok(n)
    }
}

#[cfg(feature = "async-tokio")]
impl<R: AsyncRead + Unpin> AsyncRead for PositionTrackingRead<R> {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        let poll = std::pin::Pin::new(&mut this.inner).poll_read(cx, buf);
        if poll.is_ready() {
            if let Some(state) = &this.state {
                state.borrow_mut().buf.extend_from_slice(&buf.filled()[before..]);
            }
        }
        poll
    }
}

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_ANNOTATION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#annotation";
const RDF_ANNOTATION_NODE_ID: &str =
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#annotationNodeID";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
const RDF_VERSION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#version";
const ITS_DIR: &str = "http://www.w3.org/2005/11/its#dir";

const RESERVED_RDF_ELEMENTS: [&str; 11] = [
    RDF_ABOUT,
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_DATATYPE,
    RDF_ID,
    RDF_LI,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RDF,
    RDF_RESOURCE,
];
const RESERVED_RDF_ATTRIBUTES: [&str; 5] =
    [RDF_ABOUT_EACH, RDF_ABOUT_EACH_PREFIX, RDF_LI, RDF_RDF, RDF_RESOURCE];

/// How aggressively produced IRIs are checked for syntactic validity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum IriValidationStrategy {
    /// Validate with the same rules as ordinary IRI references (the default).
    #[default]
    Pragmatic,
    /// Same validator, kept as a distinct variant so a stricter checker can be swapped in later
    /// without changing the public surface.
    Strict,
    /// Skip IRI validation entirely; whatever string is produced is used as-is.
    None,
}

/// Where an RDF 1.2 annotation (`rdf:annotation`/`rdf:annotationNodeID`) attaches.
#[derive(Clone, Debug)]
enum Annotation {
    Resource(NamedNode),
    BlankNode(BlankNode),
}

impl From<Annotation> for Subject {
    fn from(annotation: Annotation) -> Self {
        match annotation {
            Annotation::Resource(iri) => Self::NamedNode(iri),
            Annotation::BlankNode(bnode) => Self::BlankNode(bnode),
        }
    }
}

#[derive(Clone, Debug)]
enum NodeOrText {
    Node(Subject),
    Text(String),
}

/// A streaming RDF/XML 1.1 and 1.2 parser.
///
/// It reads the document incrementally: besides the active-tag stack and the set of seen
/// `rdf:ID` values, no document state is kept in memory.
#[must_use]
pub struct RdfXmlParser {
    base_iri: Option<String>,
    default_graph: GraphName,
    unchecked: bool,
    track_position: bool,
    validate_uri: bool,
    iri_validation_strategy: IriValidationStrategy,
    allow_duplicate_rdf_ids: bool,
}

impl Default for RdfXmlParser {
    fn default() -> Self {
        Self {
            base_iri: None,
            default_graph: GraphName::DefaultGraph,
            unchecked: false,
            track_position: true,
            validate_uri: true,
            iri_validation_strategy: IriValidationStrategy::default(),
            allow_duplicate_rdf_ids: false,
        }
    }
}

impl RdfXmlParser {
    /// Builds a new [`RdfXmlParser`] with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base IRI the document is resolved against before any `xml:base` is seen.
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        let base_iri = base_iri.into();
        Iri::parse(base_iri.as_str())?;
        self.base_iri = Some(base_iri);
        Ok(self)
    }

    /// Assumes the document is well-formed and its IRIs valid, to skip most validation.
    ///
    /// If the document is not actually valid, broken quads might be emitted instead of errors.
    #[inline]
    pub fn unchecked(mut self) -> Self {
        self.unchecked = true;
        self
    }

    /// Whether parse errors carry a line/column position (default `true`).
    #[inline]
    pub fn track_position(mut self, track: bool) -> Self {
        self.track_position = track;
        self
    }

    /// The graph every emitted quad is placed in (default: the default graph).
    #[inline]
    pub fn default_graph(mut self, graph: impl Into<GraphName>) -> Self {
        self.default_graph = graph.into();
        self
    }

    /// Whether produced IRIs are validated at all (default `true`).
    #[inline]
    pub fn validate_uri(mut self, validate: bool) -> Self {
        self.validate_uri = validate;
        self
    }

    /// Which strategy is used to validate produced IRIs, when [`Self::validate_uri`] is enabled.
    #[inline]
    pub fn iri_validation_strategy(mut self, strategy: IriValidationStrategy) -> Self {
        self.iri_validation_strategy = strategy;
        self
    }

    /// If `true`, a repeated `rdf:ID` value in the same base scope is silently accepted instead
    /// of raising [`crate::error::RdfXmlSyntaxError`].
    #[inline]
    pub fn allow_duplicate_rdf_ids(mut self, allow: bool) -> Self {
        self.allow_duplicate_rdf_ids = allow;
        self
    }

    /// Parses a document from a [`Read`] implementation.
    pub fn parse_read<R: Read>(self, read: R) -> FromReadRdfXmlReader<R> {
        let position_state = self
            .track_position
            .then(|| Rc::new(RefCell::new(PositionTrackingState::default())));
        let tracked = PositionTrackingRead { inner: read, state: position_state.clone() };
        FromReadRdfXmlReader {
            results: Vec::new(),
            reader: self.parse(BufReader::new(tracked), position_state),
            reader_buffer: Vec::new(),
        }
    }

    /// Parses a document from a [`tokio::io::AsyncRead`] implementation.
    #[cfg(feature = "async-tokio")]
    pub fn parse_tokio_async_read<R: AsyncRead + Unpin>(
        self,
        read: R,
    ) -> FromTokioAsyncReadRdfXmlReader<R> {
        let position_state = self
            .track_position
            .then(|| Rc::new(RefCell::new(PositionTrackingState::default())));
        let tracked = PositionTrackingRead { inner: read, state: position_state.clone() };
        FromTokioAsyncReadRdfXmlReader {
            results: Vec::new(),
            reader: self.parse(AsyncBufReader::new(tracked), position_state),
            reader_buffer: Vec::new(),
        }
    }

    fn parse<T>(
        &self,
        reader: T,
        position_state: Option<Rc<RefCell<PositionTrackingState>>>,
    ) -> RdfXmlReader<T> {
        let mut reader = NsReader::from_reader(reader);
        reader.config_mut().expand_empty_elements = true;
        let validate = self.validate_uri && self.iri_validation_strategy != IriValidationStrategy::None;
        RdfXmlReader {
            reader,
            state: vec![RdfXmlState::Doc {
                base_iri: self.base_iri.clone(),
            }],
            namespace_scopes: vec![Vec::new()],
            custom_entities: HashMap::new(),
            in_literal_depth: 0,
            known_rdf_id: IdRegistry::default(),
            triple_sinks: Vec::new(),
            rdf_version: None,
            is_end: false,
            unchecked: self.unchecked,
            position_state,
            validate,
            default_graph: self.default_graph.clone(),
            allow_duplicate_rdf_ids: self.allow_duplicate_rdf_ids,
        }
    }
}

/// Parses a document from a [`Read`] implementation. Built with [`RdfXmlParser::parse_read`].
#[must_use]
pub struct FromReadRdfXmlReader<R: Read> {
    results: Vec<Quad>,
    reader: RdfXmlReader<BufReader<PositionTrackingRead<R>>>,
    reader_buffer: Vec<u8>,
}

impl<R: Read> Iterator for FromReadRdfXmlReader<R> {
    type Item = Result<Quad, RdfXmlParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(quad) = self.results.pop() {
                return Some(Ok(quad));
            } else if self.reader.is_end {
                return None;
            }
            if let Err(e) = self.parse_step() {
                return Some(Err(e));
            }
        }
    }
}

impl<R: Read> FromReadRdfXmlReader<R> {
    /// The current byte position in the input.
    pub fn buffer_position(&self) -> u64 {
        self.reader.reader.buffer_position() as u64
    }

    /// The `rdf:version` value declared by the document, if any was seen so far.
    pub fn rdf_version(&self) -> Option<&str> {
        self.reader.rdf_version.as_deref()
    }

    fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let start_offset = self.buffer_position();
        let result = self
            .reader
            .reader
            .read_event_into(&mut self.reader_buffer)
            .map_err(RdfXmlParseError::from)
            .and_then(|event| self.reader.parse_event(event, &mut self.results));
        self.reader.finish_step(start_offset, result)
    }
}

/// Parses a document from a [`tokio::io::AsyncRead`] implementation. Built with
/// [`RdfXmlParser::parse_tokio_async_read`].
#[cfg(feature = "async-tokio")]
#[must_use]
pub struct FromTokioAsyncReadRdfXmlReader<R: AsyncRead + Unpin> {
    results: Vec<Quad>,
    reader: RdfXmlReader<AsyncBufReader<PositionTrackingRead<R>>>,
    reader_buffer: Vec<u8>,
}

#[cfg(feature = "async-tokio")]
impl<R: AsyncRead + Unpin> FromTokioAsyncReadRdfXmlReader<R> {
    /// Reads the next quad, or `None` once the document is exhausted.
    pub async fn next(&mut self) -> Option<Result<Quad, RdfXmlParseError>> {
        loop {
            if let Some(quad) = self.results.pop() {
                return Some(Ok(quad));
            } else if self.reader.is_end {
                return None;
            }
            if let Err(e) = self.parse_step().await {
                return Some(Err(e));
            }
        }
    }

    /// The current byte position in the input.
    pub fn buffer_position(&self) -> u64 {
        self.reader.reader.buffer_position() as u64
    }

    /// The `rdf:version` value declared by the document, if any was seen so far.
    pub fn rdf_version(&self) -> Option<&str> {
        self.reader.rdf_version.as_deref()
    }

    async fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let start_offset = self.buffer_position();
        let result = match self
            .reader
            .reader
            .read_event_into_async(&mut self.reader_buffer)
            .await
        {
            Ok(event) => self.reader.parse_event(event, &mut self.results),
            Err(error) => Err(RdfXmlParseError::from(error)),
        };
        self.reader.finish_step(start_offset, result)
    }
}

enum RdfXmlState {
    Doc {
        base_iri: Option<String>,
    },
    Rdf {
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
    },
    NodeElt {
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        li_counter: u64,
    },
    PropertyElt {
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        object: Option<NodeOrText>,
        id_attr: Option<NamedNode>,
        datatype_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
    },
    ParseTypeCollectionPropertyElt {
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        objects: Vec<Subject>,
        id_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
    },
    ParseTypeLiteralPropertyElt {
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        writer: Writer<Vec<u8>>,
        id_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
    },
    ParseTypeTriplePropertyElt {
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        id_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
    },
}

impl RdfXmlState {
    fn base_iri(&self) -> Option<&str> {
        match self {
            Self::Doc { base_iri }
            | Self::Rdf { base_iri, .. }
            | Self::NodeElt { base_iri, .. }
            | Self::PropertyElt { base_iri, .. }
            | Self::ParseTypeCollectionPropertyElt { base_iri, .. }
            | Self::ParseTypeLiteralPropertyElt { base_iri, .. }
            | Self::ParseTypeTriplePropertyElt { base_iri, .. } => base_iri.as_deref(),
        }
    }

    fn language(&self) -> Option<&String> {
        match self {
            Self::Doc { .. } => None,
            Self::Rdf { language, .. }
            | Self::NodeElt { language, .. }
            | Self::PropertyElt { language, .. }
            | Self::ParseTypeCollectionPropertyElt { language, .. }
            | Self::ParseTypeLiteralPropertyElt { language, .. }
            | Self::ParseTypeTriplePropertyElt { language, .. } => language.as_ref(),
        }
    }

    fn direction(&self) -> Option<BaseDirection> {
        match self {
            Self::Doc { .. } => None,
            Self::Rdf { direction, .. }
            | Self::NodeElt { direction, .. }
            | Self::PropertyElt { direction, .. }
            | Self::ParseTypeCollectionPropertyElt { direction, .. }
            | Self::ParseTypeLiteralPropertyElt { direction, .. }
            | Self::ParseTypeTriplePropertyElt { direction, .. } => *direction,
        }
    }
}

struct RdfXmlReader<R> {
    reader: NsReader<R>,
    state: Vec<RdfXmlState>,
    /// Namespace bindings declared on each element of `state`, in the same order, so a
    /// `parseType="Literal"` block can make its outermost serialized child self-contained by
    /// injecting whatever was in scope at the property element (RDF/XML grammar §7.2).
    namespace_scopes: Vec<Vec<(Option<String>, String)>>,
    custom_entities: HashMap<String, String>,
    in_literal_depth: usize,
    known_rdf_id: IdRegistry,
    /// Active `rdf:parseType="Triple"` buffers: while non-empty, emitted triples are captured
    /// here instead of pushed to the output, so they can become a single triple term.
    triple_sinks: Vec<Vec<Triple>>,
    rdf_version: Option<String>,
    is_end: bool,
    unchecked: bool,
    position_state: Option<Rc<RefCell<PositionTrackingState>>>,
    validate: bool,
    default_graph: GraphName,
    allow_duplicate_rdf_ids: bool,
}

impl<R> RdfXmlReader<R> {
    fn parse_event(&mut self, event: Event<'_>, results: &mut Vec<Quad>) -> Result<(), RdfXmlParseError> {
        match event {
            Event::Start(event) => self.parse_start_event(&event, results),
            Event::End(event) => self.parse_end_event(&event, results),
            Event::Empty(_) => Err(RdfXmlSyntaxError::msg(
                "the XML reader must expand empty elements",
            )
            .into()),
            Event::Text(event) => self.parse_text_event(&event),
            Event::CData(event) => self.parse_text_event(&event.escape()?),
            Event::Comment(_) | Event::PI(_) => Ok(()),
            Event::Decl(decl) => {
                if let Some(encoding) = decl.encoding() {
                    if !is_utf8(&encoding?) {
                        return Err(
                            RdfXmlSyntaxError::msg("only UTF-8 is supported by this parser").into(),
                        );
                    }
                }
                Ok(())
            }
            Event::DocType(dt) => self.parse_doctype(&dt),
            Event::Eof => {
                self.is_end = true;
                Ok(())
            }
        }
    }

    /// Called once per SAX event with the byte offset it started at and the outcome of handling
    /// it. On success, folds the now fully-consumed bytes into the position tracker (if enabled)
    /// so it stays bounded; on a syntax error, attaches the `[start_offset, now)` position to it.
    fn finish_step(
        &mut self,
        start_offset: u64,
        result: Result<(), RdfXmlParseError>,
    ) -> Result<(), RdfXmlParseError> {
        let end_offset = self.reader.buffer_position() as u64;
        match result {
            Ok(()) => {
                if let Some(state) = &self.position_state {
                    state.borrow_mut().trim_to(end_offset);
                }
                Ok(())
            }
            Err(RdfXmlParseError::Syntax(error)) => Err(if let Some(state) = &self.position_state {
                let state = state.borrow();
                error.with_position(state.position_at(start_offset)..state.position_at(end_offset))
            } else {
                error
            }
            .into()),
            Err(other) => Err(other),
        }
    }

    /// Emits a triple into the current sink: the innermost `rdf:parseType="Triple"` buffer if
    /// one is active, otherwise the output stream under the configured default graph.
    fn emit(&mut self, triple: Triple, results: &mut Vec<Quad>) {
        if let Some(sink) = self.triple_sinks.last_mut() {
            sink.push(triple);
        } else {
            results.push(triple.in_graph(self.default_graph.clone()));
        }
    }

    fn parse_doctype(&mut self, dt: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        for input in self.reader.decoder().decode(dt.as_ref())?.split('<').skip(1) {
            if let Some(input) = input.strip_prefix("!ENTITY") {
                let input = input.trim_start().strip_prefix('%').unwrap_or(input);
                let (entity_name, input) = input
                    .trim_start()
                    .split_once(|c: char| c.is_ascii_whitespace())
                    .ok_or_else(|| {
                        RdfXmlSyntaxError::msg(
                            "<!ENTITY declarations must contain both a name and a value",
                        )
                    })?;
                let input = input.trim_start().strip_prefix('"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg("<!ENTITY values must be enclosed in double quotes")
                })?;
                let (entity_value, input) = input.split_once('"').ok_or_else(|| {
                    RdfXmlSyntaxError::msg("<!ENTITY values must be enclosed in double quotes")
                })?;
                input
                    .trim_start()
                    .strip_prefix('>')
                    .ok_or_else(|| RdfXmlSyntaxError::msg("<!ENTITY declarations must end with >"))?;
                let entity_value = unescape_with(entity_value, |e| self.resolve_entity(e))
                    .map_err(quick_xml::Error::from)?;
                self.custom_entities
                    .insert(entity_name.to_owned(), entity_value.to_string());
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn parse_start_event(
        &mut self,
        event: &BytesStart<'_>,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        #[derive(PartialEq, Eq)]
        enum RdfXmlParseType {
            Default,
            Collection,
            Literal,
            Resource,
            Triple,
            Other,
        }

        enum RdfXmlNextProduction {
            Rdf,
            NodeElt,
            PropertyElt { subject: Subject },
        }

        if matches!(self.state.last(), Some(RdfXmlState::ParseTypeLiteralPropertyElt { .. })) {
            // Computed before the `writer` borrow below: the outermost serialized element is made
            // self-contained by injecting whatever was bound on the property element or an
            // ancestor and isn't already declared here.
            let injected_namespaces =
                if self.in_literal_depth == 0 { self.in_scope_namespaces() } else { Vec::new() };
            let mut clean_event =
                BytesStart::new(self.reader.decoder().decode(event.name().as_ref())?.to_string());
            let mut declared_names = Vec::new();
            for attr in event.attributes() {
                let attr = attr.map_err(Error::InvalidAttr)?;
                declared_names.push(attr.key.as_ref().to_vec());
                clean_event.push_attribute(attr);
            }
            for (prefix, uri) in injected_namespaces {
                let name = match &prefix {
                    Some(prefix) => format!("xmlns:{prefix}"),
                    None => "xmlns".to_owned(),
                };
                if !declared_names.iter().any(|declared| declared == name.as_bytes()) {
                    clean_event.push_attribute((name.as_str(), uri.as_str()));
                }
            }
            let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) = self.state.last_mut()
            else {
                unreachable!("checked above");
            };
            writer.write_event(Event::Start(clean_event))?;
            self.in_literal_depth += 1;
            return Ok(());
        }

        let tag_name = self.resolve_tag_name(event.name())?;

        let (mut language, mut base_iri, mut direction) = if let Some(current) = self.state.last() {
            (
                current.language().cloned(),
                current.base_iri().map(str::to_owned),
                current.direction(),
            )
        } else {
            (None, None, None)
        };

        let mut id_attr = None;
        let mut node_id_attr = None;
        let mut about_attr = None;
        let mut property_attrs = Vec::new();
        let mut resource_attr = None;
        let mut datatype_attr = None;
        let mut parse_type = RdfXmlParseType::Default;
        let mut type_attr = None;
        let mut annotation_attr = None;
        let mut annotation_node_id_attr = None;
        let mut new_namespaces = Vec::new();

        for attribute in event.attributes() {
            let attribute = attribute.map_err(Error::InvalidAttr)?;
            if attribute.key.as_ref().starts_with(b"xml") {
                if attribute.key.as_ref() == b"xml:lang" {
                    let tag = self.convert_attribute(&attribute)?;
                    language = if tag.is_empty() {
                        None
                    } else if self.unchecked {
                        Some(tag.to_ascii_lowercase())
                    } else {
                        Some(
                            LanguageTag::parse(tag.to_ascii_lowercase())
                                .map_err(|error| {
                                    RdfXmlSyntaxError::invalid_language_tag(tag, error)
                                })?
                                .into_inner(),
                        )
                    };
                } else if attribute.key.as_ref() == b"xml:base" {
                    let value = self.convert_attribute(&attribute)?;
                    base_iri = Some(self.resolve_base(&base_iri, value)?);
                } else if attribute.key.as_ref() == b"xmlns" {
                    let value = self.convert_attribute(&attribute)?;
                    new_namespaces.push((None, value));
                } else if let Some(prefix) = attribute.key.as_ref().strip_prefix(b"xmlns:") {
                    let prefix = self.reader.decoder().decode(prefix)?.to_string();
                    let value = self.convert_attribute(&attribute)?;
                    new_namespaces.push((Some(prefix), value));
                } else {
                    // other xml:* attributes are not used by this parser
                }
            } else {
                let attribute_url = self.resolve_attribute_name(attribute.key)?;
                if attribute_url == ITS_DIR {
                    let value = self.convert_attribute(&attribute)?;
                    direction = if value.is_empty() {
                        None
                    } else {
                        Some(BaseDirection::parse(&value).ok_or_else(|| {
                            RdfXmlSyntaxError::invalid_direction(value.clone())
                        })?)
                    };
                } else if *attribute_url == *RDF_ID {
                    let mut id = self.convert_attribute(&attribute)?;
                    if !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name(id).into());
                    }
                    id.insert(0, '#');
                    id_attr = Some(id);
                } else if *attribute_url == *RDF_BAG_ID {
                    return Err(RdfXmlSyntaxError::unsupported("rdf:bagID").into());
                } else if *attribute_url == *RDF_NODE_ID {
                    let id = self.convert_attribute(&attribute)?;
                    if !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name(id).into());
                    }
                    node_id_attr = Some(BlankNode::new_unchecked(id));
                } else if *attribute_url == *RDF_ABOUT {
                    about_attr = Some(attribute);
                } else if *attribute_url == *RDF_RESOURCE {
                    resource_attr = Some(attribute);
                } else if *attribute_url == *RDF_DATATYPE {
                    datatype_attr = Some(attribute);
                } else if *attribute_url == *RDF_ANNOTATION {
                    annotation_attr = Some(attribute);
                } else if *attribute_url == *RDF_ANNOTATION_NODE_ID {
                    let id = self.convert_attribute(&attribute)?;
                    if !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name(id).into());
                    }
                    annotation_node_id_attr = Some(BlankNode::new_unchecked(id));
                } else if *attribute_url == *RDF_VERSION {
                    let version = self.convert_attribute(&attribute)?;
                    if self.rdf_version.is_none() {
                        self.rdf_version = Some(version);
                    }
                } else if *attribute_url == *RDF_PARSE_TYPE {
                    parse_type = match attribute.value.as_ref() {
                        b"Collection" => RdfXmlParseType::Collection,
                        b"Literal" => RdfXmlParseType::Literal,
                        b"Resource" => RdfXmlParseType::Resource,
                        b"Triple" => RdfXmlParseType::Triple,
                        _ => RdfXmlParseType::Other,
                    };
                } else if attribute_url == rdf::TYPE.as_str() {
                    type_attr = Some(attribute);
                } else if *attribute_url == *RDF_ABOUT_EACH {
                    return Err(RdfXmlSyntaxError::unsupported("rdf:aboutEach").into());
                } else if *attribute_url == *RDF_ABOUT_EACH_PREFIX {
                    return Err(RdfXmlSyntaxError::unsupported("rdf:aboutEachPrefix").into());
                } else if *attribute_url == *RDF_LI {
                    return Err(RdfXmlSyntaxError::unsupported("rdf:li as an attribute").into());
                } else if RESERVED_RDF_ATTRIBUTES.contains(&&*attribute_url) {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "{attribute_url} is not a valid attribute"
                    ))
                    .into());
                } else {
                    property_attrs.push((self.parse_iri(attribute_url)?, self.convert_attribute(&attribute)?));
                }
            }
        }

        let id_attr = match id_attr {
            Some(iri) => {
                let iri = self.resolve_iri(&base_iri, iri)?;
                self.claim_rdf_id(&iri)?;
                Some(iri)
            }
            None => None,
        };
        let about_attr = match about_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let resource_attr = match resource_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let datatype_attr = match datatype_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let type_attr = match type_attr {
            Some(attr) => Some(self.convert_iri_attribute(&base_iri, &attr)?),
            None => None,
        };
        let annotation = match (annotation_attr, annotation_node_id_attr) {
            (Some(attr), None) => Some(Annotation::Resource(self.convert_iri_attribute(&base_iri, &attr)?)),
            (None, Some(bnode)) => Some(Annotation::BlankNode(bnode)),
            (None, None) => None,
            (Some(_), Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_property(
                    "property element",
                    "rdf:annotation",
                    "rdf:annotationNodeID",
                )
                .into())
            }
        };

        if !matches!(parse_type, RdfXmlParseType::Default)
            && (resource_attr.is_some()
                || datatype_attr.is_some()
                || node_id_attr.is_some()
                || !property_attrs.is_empty())
        {
            return Err(RdfXmlSyntaxError::conflicting_property(
                "property element",
                "rdf:parseType",
                "rdf:resource, rdf:nodeID, rdf:datatype or a property attribute",
            )
            .into());
        }
        if datatype_attr.is_some() && !property_attrs.is_empty() {
            return Err(RdfXmlSyntaxError::conflicting_property(
                "property element",
                "rdf:datatype",
                "a property attribute",
            )
            .into());
        }
        if resource_attr.is_some() && node_id_attr.is_some() {
            return Err(RdfXmlSyntaxError::conflicting_property(
                "property element",
                "rdf:resource",
                "rdf:nodeID",
            )
            .into());
        }

        let expected_production = match self.state.last() {
            Some(RdfXmlState::Doc { .. }) => RdfXmlNextProduction::Rdf,
            Some(
                RdfXmlState::Rdf { .. }
                | RdfXmlState::PropertyElt { .. }
                | RdfXmlState::ParseTypeCollectionPropertyElt { .. }
                | RdfXmlState::ParseTypeTriplePropertyElt { .. },
            ) => RdfXmlNextProduction::NodeElt,
            Some(RdfXmlState::NodeElt { subject, .. }) => {
                RdfXmlNextProduction::PropertyElt { subject: subject.clone() }
            }
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { .. }) => {
                return Err(RdfXmlSyntaxError::msg(
                    "rdf:parseType=\"Literal\" content is not RDF/XML content",
                )
                .into());
            }
            None => {
                return Err(RdfXmlSyntaxError::msg("the document is not balanced").into());
            }
        };

        let new_state = match expected_production {
            RdfXmlNextProduction::Rdf => {
                if tag_name == RDF_RDF {
                    RdfXmlState::Rdf {
                        base_iri,
                        language,
                        direction,
                    }
                } else if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) {
                    return Err(RdfXmlSyntaxError::illegal_node_name(tag_name).into());
                } else {
                    self.build_node_elt(
                        self.parse_iri(tag_name)?,
                        base_iri,
                        language,
                        direction,
                        id_attr,
                        node_id_attr,
                        about_attr,
                        type_attr,
                        property_attrs,
                        results,
                    )?
                }
            }
            RdfXmlNextProduction::NodeElt => {
                if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) {
                    return Err(RdfXmlSyntaxError::illegal_node_name(tag_name).into());
                }
                self.build_node_elt(
                    self.parse_iri(tag_name)?,
                    base_iri,
                    language,
                    direction,
                    id_attr,
                    node_id_attr,
                    about_attr,
                    type_attr,
                    property_attrs,
                    results,
                )?
            }
            RdfXmlNextProduction::PropertyElt { subject } => {
                let iri = if tag_name == RDF_LI {
                    let Some(RdfXmlState::NodeElt { li_counter, .. }) = self.state.last_mut() else {
                        return Err(RdfXmlSyntaxError::illegal_property_name(tag_name).into());
                    };
                    *li_counter += 1;
                    rdf::li_member_property(*li_counter)
                } else if RESERVED_RDF_ELEMENTS.contains(&&*tag_name) || tag_name == RDF_DESCRIPTION {
                    return Err(RdfXmlSyntaxError::illegal_property_name(tag_name).into());
                } else {
                    self.parse_iri(tag_name)?
                };
                match parse_type {
                    RdfXmlParseType::Default => {
                        if resource_attr.is_some() || node_id_attr.is_some() || !property_attrs.is_empty() {
                            let object = match (resource_attr, node_id_attr) {
                                (Some(resource_attr), None) => Subject::from(resource_attr),
                                (None, Some(node_id_attr)) => node_id_attr.into(),
                                (None, None) => BlankNode::default().into(),
                                (Some(_), Some(_)) => unreachable!("checked above"),
                            };
                            self.emit_property_attrs(&object, property_attrs, &language, &direction, results);
                            if let Some(type_attr) = type_attr {
                                self.emit(Triple::new(object.clone(), rdf::TYPE.clone(), type_attr), results);
                            }
                            RdfXmlState::PropertyElt {
                                iri,
                                base_iri,
                                language,
                                direction,
                                subject,
                                object: Some(NodeOrText::Node(object)),
                                id_attr,
                                datatype_attr,
                                annotation,
                            }
                        } else {
                            RdfXmlState::PropertyElt {
                                iri,
                                base_iri,
                                language,
                                direction,
                                subject,
                                object: None,
                                id_attr,
                                datatype_attr,
                                annotation,
                            }
                        }
                    }
                    RdfXmlParseType::Literal | RdfXmlParseType::Other => {
                        RdfXmlState::ParseTypeLiteralPropertyElt {
                            iri,
                            base_iri,
                            language,
                            direction,
                            subject,
                            writer: Writer::new(Vec::new()),
                            id_attr,
                            annotation,
                        }
                    }
                    RdfXmlParseType::Resource => self.build_parse_type_resource_property_elt(
                        iri, base_iri, language, direction, subject, id_attr, annotation, results,
                    ),
                    RdfXmlParseType::Collection => RdfXmlState::ParseTypeCollectionPropertyElt {
                        iri,
                        base_iri,
                        language,
                        direction,
                        subject,
                        objects: Vec::new(),
                        id_attr,
                        annotation,
                    },
                    RdfXmlParseType::Triple => {
                        if self.rdf_version.is_none() {
                            return Err(RdfXmlSyntaxError::msg(
                                "rdf:parseType=\"Triple\" requires an rdf:version declaration in scope",
                            )
                            .into());
                        }
                        self.triple_sinks.push(Vec::new());
                        RdfXmlState::ParseTypeTriplePropertyElt {
                            iri,
                            base_iri,
                            language,
                            direction,
                            subject,
                            id_attr,
                            annotation,
                        }
                    }
                }
            }
        };
        self.state.push(new_state);
        self.namespace_scopes.push(new_namespaces);
        Ok(())
    }

    /// Namespace bindings in scope right now, outermost first, with an inner declaration of the
    /// same prefix shadowing an outer one. Used to make the outermost element of a
    /// `parseType="Literal"` serialization self-contained.
    fn in_scope_namespaces(&self) -> Vec<(Option<String>, String)> {
        let mut bindings: Vec<(Option<String>, String)> = Vec::new();
        for scope in &self.namespace_scopes {
            for (prefix, uri) in scope {
                bindings.retain(|(p, _)| p != prefix);
                bindings.push((prefix.clone(), uri.clone()));
            }
        }
        bindings
    }

    fn parse_end_event(&mut self, event: &BytesEnd<'_>, results: &mut Vec<Quad>) -> Result<(), RdfXmlParseError> {
        if self.in_literal_depth > 0 {
            if let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) = self.state.last_mut() {
                writer.write_event(Event::End(BytesEnd::new(
                    self.reader.decoder().decode(event.name().as_ref())?,
                )))?;
                self.in_literal_depth -= 1;
                return Ok(());
            }
        }
        self.namespace_scopes.pop();
        if let Some(current_state) = self.state.pop() {
            self.end_state(current_state, results)?;
        }
        Ok(())
    }

    fn parse_text_event(&mut self, event: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        let text = event.unescape_with(|e| self.resolve_entity(e))?.to_string();
        match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt { object, .. }) => {
                if !event.iter().copied().all(is_whitespace) {
                    *object = Some(NodeOrText::Text(text));
                }
                Ok(())
            }
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) => {
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                Ok(())
            }
            _ => {
                if event.iter().copied().all(is_whitespace) {
                    Ok(())
                } else {
                    Err(RdfXmlSyntaxError::msg(format!("unexpected text content: '{text}'")).into())
                }
            }
        }
    }

    fn end_state(&mut self, state: RdfXmlState, results: &mut Vec<Quad>) -> Result<(), RdfXmlParseError> {
        match state {
            RdfXmlState::PropertyElt {
                iri,
                language,
                direction,
                subject,
                id_attr,
                datatype_attr,
                object,
                annotation,
                ..
            } => {
                let object = match object {
                    Some(NodeOrText::Node(node)) => Term::from(node),
                    Some(NodeOrText::Text(text)) => {
                        self.new_literal(text, language, direction, datatype_attr).into()
                    }
                    None => self.new_literal(String::new(), language, direction, datatype_attr).into(),
                };
                let triple = Triple::new(subject, iri, object);
                self.emit_or_reify(triple, id_attr, annotation, results)?;
            }
            RdfXmlState::ParseTypeCollectionPropertyElt {
                iri,
                subject,
                id_attr,
                objects,
                annotation,
                ..
            } => {
                let mut current_node = Subject::from(rdf::NIL.clone());
                for object in objects.into_iter().rev() {
                    let link = Subject::from(BlankNode::default());
                    self.emit(Triple::new(link.clone(), rdf::FIRST.clone(), object), results);
                    self.emit(Triple::new(link.clone(), rdf::REST.clone(), current_node), results);
                    current_node = link;
                }
                let triple = Triple::new(subject, iri, current_node);
                self.emit_or_reify(triple, id_attr, annotation, results)?;
            }
            RdfXmlState::ParseTypeLiteralPropertyElt {
                iri,
                subject,
                id_attr,
                writer,
                annotation,
                ..
            } => {
                let object = writer.into_inner();
                if object.is_empty() {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "no content found for the rdf:XMLLiteral value of {iri}"
                    ))
                    .into());
                }
                let literal = Literal::new_typed_literal(
                    str::from_utf8(&object)
                        .map_err(|_| {
                            RdfXmlSyntaxError::msg("the XML literal is not valid UTF-8")
                        })?
                        .to_owned(),
                    rdf::XML_LITERAL.clone(),
                );
                let triple = Triple::new(subject, iri, literal);
                self.emit_or_reify(triple, id_attr, annotation, results)?;
            }
            RdfXmlState::ParseTypeTriplePropertyElt {
                iri,
                subject,
                id_attr,
                annotation,
                ..
            } => {
                let collected = self.triple_sinks.pop().unwrap_or_default();
                let [inner]: [Triple; 1] = collected
                    .try_into()
                    .map_err(|c: Vec<Triple>| RdfXmlSyntaxError::wrong_triple_term_count(c.len()))?;
                let triple = Triple::new(subject, iri, inner);
                self.emit_or_reify(triple, id_attr, annotation, results)?;
            }
            RdfXmlState::NodeElt { subject, .. } => match self.state.last_mut() {
                Some(RdfXmlState::PropertyElt { object, .. }) => {
                    *object = Some(NodeOrText::Node(subject));
                }
                Some(RdfXmlState::ParseTypeCollectionPropertyElt { objects, .. }) => {
                    objects.push(subject);
                }
                _ => {}
            },
            RdfXmlState::Doc { .. } | RdfXmlState::Rdf { .. } => {}
        }
        Ok(())
    }

    /// Emits `triple`, then its legacy reification quads (`rdf:ID`) or its RDF 1.2 annotation
    /// quad (`rdf:annotation`/`rdf:annotationNodeID`), if either was present.
    fn emit_or_reify(
        &mut self,
        triple: Triple,
        id_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
        results: &mut Vec<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        if let Some(id_attr) = id_attr {
            self.reify(&triple, id_attr, results);
        }
        if let Some(annotation) = annotation {
            let reifier = Subject::from(annotation);
            self.emit(Triple::new(reifier, rdf::REIFIES.clone(), Term::from(triple.clone())), results);
        }
        self.emit(triple, results);
        Ok(())
    }

    fn reify(&mut self, triple: &Triple, statement_id: NamedNode, results: &mut Vec<Quad>) {
        self.emit(
            Triple::new(statement_id.clone(), rdf::TYPE.clone(), rdf::STATEMENT.clone()),
            results,
        );
        self.emit(
            Triple::new(statement_id.clone(), rdf::SUBJECT.clone(), triple.subject.clone()),
            results,
        );
        self.emit(
            Triple::new(statement_id.clone(), rdf::PREDICATE.clone(), triple.predicate.clone()),
            results,
        );
        self.emit(
            Triple::new(statement_id, rdf::OBJECT.clone(), triple.object.clone()),
            results,
        );
    }

    fn emit_property_attrs(
        &mut self,
        subject: &Subject,
        literal_attributes: Vec<(NamedNode, String)>,
        language: &Option<String>,
        direction: &Option<BaseDirection>,
        results: &mut Vec<Quad>,
    ) {
        for (predicate, value) in literal_attributes {
            let literal = match (language.clone(), *direction) {
                (Some(language), Some(direction)) => {
                    Literal::new_directional_language_tagged_literal_unchecked(value, language, direction)
                }
                (Some(language), None) => Literal::new_language_tagged_literal_unchecked(value, language),
                (None, _) => Literal::new_simple_literal(value),
            };
            self.emit(Triple::new(subject.clone(), predicate, literal), results);
        }
    }

    fn new_literal(
        &self,
        value: String,
        language: Option<String>,
        direction: Option<BaseDirection>,
        datatype: Option<NamedNode>,
    ) -> Literal {
        if let Some(datatype) = datatype {
            Literal::new_typed_literal(value, datatype)
        } else if let Some(language) = language {
            match direction {
                Some(direction) => {
                    Literal::new_directional_language_tagged_literal_unchecked(value, language, direction)
                }
                None => Literal::new_language_tagged_literal_unchecked(value, language),
            }
        } else {
            Literal::new_simple_literal(value)
        }
    }

    fn claim_rdf_id(&mut self, iri: &NamedNode) -> Result<(), RdfXmlSyntaxError> {
        if !self.known_rdf_id.claim(iri.as_str()) && !self.allow_duplicate_rdf_ids {
            return Err(RdfXmlSyntaxError::duplicate_id(iri.as_str()));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node_elt(
        &mut self,
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        id_attr: Option<NamedNode>,
        node_id_attr: Option<BlankNode>,
        about_attr: Option<NamedNode>,
        type_attr: Option<NamedNode>,
        property_attrs: Vec<(NamedNode, String)>,
        results: &mut Vec<Quad>,
    ) -> Result<RdfXmlState, RdfXmlSyntaxError> {
        let subject = match (id_attr, node_id_attr, about_attr) {
            (Some(id_attr), None, None) => Subject::from(id_attr),
            (None, Some(node_id_attr), None) => node_id_attr.into(),
            (None, None, Some(about_attr)) => about_attr.into(),
            (None, None, None) => BlankNode::default().into(),
            (Some(_), Some(_), _) => {
                return Err(RdfXmlSyntaxError::conflicting_subject(
                    "node element",
                    "rdf:ID",
                    "rdf:nodeID",
                ))
            }
            (_, Some(_), Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_subject(
                    "node element",
                    "rdf:nodeID",
                    "rdf:about",
                ))
            }
            (Some(_), _, Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_subject(
                    "node element",
                    "rdf:ID",
                    "rdf:about",
                ))
            }
        };

        self.emit_property_attrs(&subject, property_attrs, &language, &direction, results);

        if let Some(type_attr) = type_attr {
            self.emit(Triple::new(subject.clone(), rdf::TYPE.clone(), type_attr), results);
        }
        if iri != *RDF_DESCRIPTION {
            self.emit(Triple::new(subject.clone(), rdf::TYPE.clone(), iri), results);
        }
        Ok(RdfXmlState::NodeElt {
            base_iri,
            language,
            direction,
            subject,
            li_counter: 0,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_parse_type_resource_property_elt(
        &mut self,
        iri: NamedNode,
        base_iri: Option<String>,
        language: Option<String>,
        direction: Option<BaseDirection>,
        subject: Subject,
        id_attr: Option<NamedNode>,
        annotation: Option<Annotation>,
        results: &mut Vec<Quad>,
    ) -> RdfXmlState {
        let object = BlankNode::default();
        let triple = Triple::new(subject, iri, object.clone());
        if let Some(id_attr) = id_attr {
            self.reify(&triple, id_attr, results);
        }
        if let Some(annotation) = annotation {
            let reifier = Subject::from(annotation);
            self.emit(Triple::new(reifier, rdf::REIFIES.clone(), Term::from(triple.clone())), results);
        }
        self.emit(triple, results);
        RdfXmlState::NodeElt {
            base_iri,
            language,
            direction,
            subject: object.into(),
            li_counter: 0,
        }
    }

    fn resolve_tag_name(&self, qname: QName<'_>) -> Result<String, RdfXmlParseError> {
        let (namespace, local_name) = self.reader.resolve_element(qname);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_attribute_name(&self, qname: QName<'_>) -> Result<String, RdfXmlParseError> {
        let (namespace, local_name) = self.reader.resolve_attribute(qname);
        self.resolve_ns_name(namespace, local_name)
    }

    fn resolve_ns_name(
        &self,
        namespace: ResolveResult<'_>,
        local_name: LocalName<'_>,
    ) -> Result<String, RdfXmlParseError> {
        match namespace {
            ResolveResult::Bound(ns) => {
                let mut value = Vec::with_capacity(ns.as_ref().len() + local_name.as_ref().len());
                value.extend_from_slice(ns.as_ref());
                value.extend_from_slice(local_name.as_ref());
                Ok(unescape_with(&self.reader.decoder().decode(&value)?, |e| self.resolve_entity(e))
                    .map_err(quick_xml::Error::from)?
                    .to_string())
            }
            ResolveResult::Unbound => {
                Err(RdfXmlSyntaxError::msg("XML namespaces are required in RDF/XML").into())
            }
            ResolveResult::Unknown(v) => Err(RdfXmlSyntaxError::msg(format!(
                "unknown namespace prefix '{}'",
                self.reader.decoder().decode(&v)?
            ))
            .into()),
        }
    }

    fn convert_attribute(&self, attribute: &Attribute<'_>) -> Result<String, RdfXmlParseError> {
        Ok(attribute
            .decode_and_unescape_value_with(&self.reader, |e| self.resolve_entity(e))?
            .into_owned())
    }

    fn convert_iri_attribute(
        &self,
        base_iri: &Option<String>,
        attribute: &Attribute<'_>,
    ) -> Result<NamedNode, RdfXmlParseError> {
        Ok(self.resolve_iri(base_iri, self.convert_attribute(attribute)?)?)
    }

    /// Resolves `xml:base`'s own value against the parent's base IRI, then validates it.
    fn resolve_base(&self, base_iri: &Option<String>, value: String) -> Result<String, RdfXmlSyntaxError> {
        let resolved = iri_resolve::resolve(&value, base_iri.as_deref())?;
        if self.validate {
            Iri::parse(resolved.as_str())
                .map_err(|error| RdfXmlSyntaxError::invalid_iri(resolved.clone(), error))?;
        }
        Ok(resolved)
    }

    /// Resolves a relative reference against `base_iri` per the RDF/XML-specific algorithm
    /// (§4.1), then validates the result.
    fn resolve_iri(&self, base_iri: &Option<String>, relative: String) -> Result<NamedNode, RdfXmlSyntaxError> {
        let resolved = iri_resolve::resolve(&relative, base_iri.as_deref())?;
        self.parse_iri(resolved)
    }

    /// Validates (unless disabled) a string that is already absolute, e.g. one produced by
    /// namespace-qualified-name expansion.
    fn parse_iri(&self, value: String) -> Result<NamedNode, RdfXmlSyntaxError> {
        if self.validate {
            Ok(NamedNode::new_unchecked(
                Iri::parse(value.clone())
                    .map_err(|error| RdfXmlSyntaxError::invalid_iri(value, error))?
                    .into_inner(),
            ))
        } else {
            Ok(NamedNode::new_unchecked(value))
        }
    }

    fn resolve_entity(&self, e: &str) -> Option<&str> {
        self.custom_entities.get(e).map(String::as_str)
    }
}
