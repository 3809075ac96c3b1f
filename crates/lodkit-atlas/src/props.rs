//! Prop names from YTYP / props XML files.
//!
//! Every `<Item>` element contributes the text of its first direct `<name>`
//! child, which is how archetype definitions are listed in YTYP XML exports.
//! Directory scans keep only `CBaseArchetypeDef` items.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

/// `type` attribute of the archetype items collected by directory scans.
const BASE_ARCHETYPE_TYPE: &str = "CBaseArchetypeDef";

/// File name suffix of YTYP XML exports.
const YTYP_XML_SUFFIX: &str = ".ytyp.xml";

struct Frame {
    /// Output slot reserved for an accepted `<Item>` element.
    item_slot: Option<usize>,
    name_seen: bool,
}

/// The `<name>` element currently being read.
struct Capture {
    depth: usize,
    slot: usize,
    text: String,
}

/// Extract prop names, trimmed, in the document order of their `<Item>`
/// elements. Blank names are skipped.
pub fn load_prop_names(xml: &str) -> Result<Vec<String>> {
    let names = collect_item_names(xml, |_| Ok(true))?;
    debug!(count = names.len(), "loaded prop names");
    Ok(names)
}

/// Read a props XML file and extract its prop names.
pub fn load_prop_names_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    load_prop_names(&fs::read_to_string(path)?)
}

/// Like [`load_prop_names`], but only `<Item type="CBaseArchetypeDef">`
/// elements contribute.
pub fn load_archetype_names(xml: &str) -> Result<Vec<String>> {
    collect_item_names(xml, is_base_archetype)
}

/// Archetype names of every `*.ytyp.xml` file below `dir`, recursively.
///
/// Names are lowercased, deduplicated and sorted ignoring case. Empty files,
/// unreadable entries and files that fail to parse are skipped with a
/// warning. Fails only when `dir` itself is not a readable directory.
pub fn load_archetype_names_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    if !fs::metadata(dir)?.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", dir.display()),
        )));
    }

    let mut unique = BTreeSet::new();
    let mut scanned = 0usize;

    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_ytyp_xml(path) {
            continue;
        }

        let xml = match fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable YTYP file");
                continue;
            }
        };
        if xml.is_empty() {
            continue;
        }

        match load_archetype_names(&xml) {
            Ok(names) => {
                scanned += 1;
                unique.extend(names.into_iter().map(|name| name.to_lowercase()));
            }
            Err(e) => warn!(file = %path.display(), error = %e, "skipping malformed YTYP file"),
        }
    }

    let mut names: Vec<String> = unique.into_iter().collect();
    names.sort_by_cached_key(|name| name.to_uppercase());

    debug!(dir = %dir.display(), files = scanned, count = names.len(), "scanned YTYP archetypes");
    Ok(names)
}

fn is_ytyp_xml(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(YTYP_XML_SUFFIX))
}

fn is_base_archetype(item: &BytesStart<'_>) -> Result<bool> {
    let kind = item
        .try_get_attribute("type")
        .map_err(|e| Error::Xml(e.to_string()))?;
    Ok(kind.is_some_and(|attr| attr.value.eq_ignore_ascii_case(BASE_ARCHETYPE_TYPE.as_bytes())))
}

/// Names of the `<Item>` elements `accept` keeps, in the document order of
/// their start tags.
fn collect_item_names<F>(xml: &str, mut accept: F) -> Result<Vec<String>>
where
    F: FnMut(&BytesStart<'_>) -> Result<bool>,
{
    let mut reader = Reader::from_str(xml);

    // One slot per accepted <Item>, filled when its name closes.
    let mut slots: Vec<Option<String>> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let tag = e.name();
                if capture.is_none() {
                    if let Some(slot) = claim_item_name(&mut stack, tag.as_ref()) {
                        capture = Some(Capture {
                            depth: stack.len() + 1,
                            slot,
                            text: String::new(),
                        });
                    }
                }
                let item_slot = if tag.as_ref() == b"Item" && accept(&e)? {
                    slots.push(None);
                    Some(slots.len() - 1)
                } else {
                    None
                };
                stack.push(Frame {
                    item_slot,
                    name_seen: false,
                });
            }
            Ok(Event::Empty(e)) => {
                // <name/> still claims the item's name, just a blank one.
                if capture.is_none() {
                    claim_item_name(&mut stack, e.name().as_ref());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(capture) = capture.as_mut() {
                    let unescaped = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    capture.text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => {
                if capture.as_ref().is_some_and(|c| c.depth == stack.len()) {
                    if let Some(done) = capture.take() {
                        let name = done.text.trim();
                        if !name.is_empty() {
                            slots[done.slot] = Some(name.to_string());
                        }
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // declarations, comments, processing instructions
            Err(e) => {
                return Err(Error::Xml(format!(
                    "parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// If `tag` is the first `<name>` directly inside an accepted `<Item>`, mark
/// it seen and return the item's output slot.
fn claim_item_name(stack: &mut [Frame], tag: &[u8]) -> Option<usize> {
    if tag != b"name" {
        return None;
    }
    let parent = stack.last_mut()?;
    if parent.name_seen {
        return None;
    }
    let slot = parent.item_slot?;
    parent.name_seen = true;
    Some(slot)
}
