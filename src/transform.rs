//! The XML walk-and-replace pipeline.
//!
//! The document is streamed once: every event is copied through to an
//! in-memory buffer, except the text of `fullName` children of `customValue`
//! elements, which is looked up in the mapping and rewritten on a hit.
//! Copying events through verbatim keeps the input's namespace declaration
//! (and formatting) intact, so the output never grows a synthetic prefix.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::name::{LocalName, ResolveResult};
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;

use crate::error::{Error, Result};
use crate::mapping::Mapping;

const VALUE_TAG: &[u8] = b"customValue";
const LABEL_TAG: &[u8] = b"fullName";

/// Counters accumulated during one walk over the document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// `customValue` elements located directly under the root.
    pub found: usize,
    /// Labels whose trimmed text matched a mapping key.
    pub replaced: usize,
    /// Labels with non-empty text that matched no mapping key.
    pub not_found: usize,
}

/// The outcome of applying a mapping: run counters plus the serialized
/// document, which is only persisted on a non-dry run.
#[derive(Debug)]
pub struct Transformed {
    pub stats: RunStats,
    document: Vec<u8>,
}

impl Transformed {
    /// The serialized document bytes.
    pub fn document(&self) -> &[u8] {
        &self.document
    }

    /// Serialize the document into `out_dir`, creating the directory
    /// recursively if needed. The output name comes from [`output_path`].
    pub fn write(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(out_dir).map_err(|source| Error::WriteFailure {
            path: out_dir.to_path_buf(),
            source,
        })?;

        let output = output_path(input, out_dir);
        fs::write(&output, &self.document).map_err(|source| Error::WriteFailure {
            path: output.clone(),
            source,
        })?;

        Ok(output)
    }
}

/// Lookup strategy fixed once from the root element: either tags resolve
/// against the document's default namespace URI, or all lookups are
/// unqualified. It is never re-detected per element.
#[derive(Debug)]
enum NameScope {
    Qualified(Vec<u8>),
    Unqualified,
}

impl NameScope {
    fn from_root(resolve: &ResolveResult<'_>) -> Self {
        match resolve {
            ResolveResult::Bound(uri) => NameScope::Qualified(uri.as_ref().to_vec()),
            _ => NameScope::Unqualified,
        }
    }

    fn matches(&self, resolve: &ResolveResult<'_>, name: LocalName<'_>, expected: &[u8]) -> bool {
        if name.as_ref() != expected {
            return false;
        }
        match (self, resolve) {
            (NameScope::Qualified(uri), ResolveResult::Bound(bound)) => {
                bound.as_ref() == uri.as_slice()
            }
            (NameScope::Unqualified, ResolveResult::Unbound) => true,
            _ => false,
        }
    }
}

/// Read the input document, reporting a missing or unreadable file.
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::MissingFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Every occurrence of `.xml` in the input base name becomes
/// `_converted.xml`, not just a trailing suffix.
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let base = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    out_dir.join(base.replace(".xml", "_converted.xml"))
}

/// Apply `mapping` to one GlobalValueSet document.
///
/// In dry-run mode the counters are computed exactly as in a real run, but
/// no text node is rewritten. The serialized output always starts with an
/// XML declaration; the input's own declaration is passed through and one is
/// synthesized when absent.
pub fn apply(xml: &str, mapping: &Mapping, dry_run: bool) -> Result<Transformed> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut writer = Writer::new(Vec::new());
    let mut stats = RunStats::default();
    let mut scope: Option<NameScope> = None;
    let mut depth = 0usize;
    let mut in_value = false;
    // Text buffer for the fullName element currently being captured.
    // fullName is a text-only element in this metadata shape.
    let mut label: Option<String> = None;
    let mut first = true;

    loop {
        let (resolve, event) = reader.read_resolved_event().map_err(xml_error)?;

        if first && !matches!(event, Event::Eof) {
            first = false;
            if !matches!(event, Event::Decl(_)) {
                let decl = BytesDecl::new("1.0", Some("UTF-8"), None);
                writer.write_event(Event::Decl(decl)).map_err(xml_error)?;
            }
        }

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                match depth {
                    0 => {
                        if scope.is_some() {
                            return Err(Error::InvalidXml(
                                "content after the root element".to_string(),
                            ));
                        }
                        scope = Some(NameScope::from_root(&resolve));
                    }
                    1 => {
                        if scope
                            .as_ref()
                            .is_some_and(|s| s.matches(&resolve, e.local_name(), VALUE_TAG))
                        {
                            stats.found += 1;
                            in_value = true;
                        }
                    }
                    2 => {
                        if in_value
                            && label.is_none()
                            && scope
                                .as_ref()
                                .is_some_and(|s| s.matches(&resolve, e.local_name(), LABEL_TAG))
                        {
                            label = Some(String::new());
                        }
                    }
                    _ => {}
                }
                depth += 1;
                writer.write_event(Event::Start(e)).map_err(xml_error)?;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    if scope.is_some() {
                        return Err(Error::InvalidXml(
                            "content after the root element".to_string(),
                        ));
                    }
                    scope = Some(NameScope::from_root(&resolve));
                } else if depth == 1
                    && scope
                        .as_ref()
                        .is_some_and(|s| s.matches(&resolve, e.local_name(), VALUE_TAG))
                {
                    // A self-closing customValue has no fullName child, so it
                    // only counts as found.
                    stats.found += 1;
                }
                writer.write_event(Event::Empty(e)).map_err(xml_error)?;
            }
            Event::End(e) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::InvalidXml("unexpected closing tag at document root".to_string())
                })?;
                if depth == 2 {
                    if let Some(text) = label.take() {
                        let replacement = lookup(&text, mapping, &mut stats);
                        let output = match replacement {
                            Some(replacement) if !dry_run => replacement,
                            _ => text.as_str(),
                        };
                        writer
                            .write_event(Event::Text(BytesText::new(output)))
                            .map_err(xml_error)?;
                        // Only the first fullName per customValue is a target.
                        in_value = false;
                    }
                } else if depth == 1 {
                    in_value = false;
                }
                writer.write_event(Event::End(e)).map_err(xml_error)?;
            }
            Event::Text(t) => {
                if let Some(buffer) = label.as_mut() {
                    buffer.push_str(&t.unescape().map_err(xml_error)?);
                } else {
                    if depth == 0
                        && !t
                            .as_ref()
                            .iter()
                            .all(|&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
                    {
                        return Err(Error::InvalidXml(
                            "character data outside the root element".to_string(),
                        ));
                    }
                    writer.write_event(Event::Text(t)).map_err(xml_error)?;
                }
            }
            Event::CData(t) => {
                if let Some(buffer) = label.as_mut() {
                    let bytes = t.into_inner();
                    buffer.push_str(&String::from_utf8_lossy(&bytes));
                } else {
                    writer.write_event(Event::CData(t)).map_err(xml_error)?;
                }
            }
            other => writer.write_event(other).map_err(xml_error)?,
        }
    }

    if scope.is_none() {
        return Err(Error::InvalidXml("no root element found".to_string()));
    }
    if depth != 0 {
        return Err(Error::InvalidXml("unexpected end of document".to_string()));
    }

    Ok(Transformed {
        stats,
        document: writer.into_inner(),
    })
}

/// Decide what happens to one captured label and bump the counters.
///
/// Blank text is the documented benign skip: it touches no counter and the
/// original text is written back unchanged.
fn lookup<'a>(text: &str, mapping: &'a Mapping, stats: &mut RunStats) -> Option<&'a str> {
    let original = text.trim();
    if original.is_empty() {
        return None;
    }
    match mapping.get(original) {
        Some(replacement) => {
            stats.replaced += 1;
            Some(replacement)
        }
        None => {
            stats.not_found += 1;
            None
        }
    }
}

fn xml_error(err: impl fmt::Display) -> Error {
    Error::InvalidXml(err.to_string())
}
