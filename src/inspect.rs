//! Reads generated cards back with `lopdf`.
//!
//! The inspection walks the content stream of every page and records what
//! was drawn: text strings (`Tj`/`TJ`), text origins (`Td`) and image
//! placements (`Do`).

use lopdf::content::Content;
use lopdf::{Document, Object};

use crate::error::Result;
use crate::winansi;

/// Summary of what a rendered card contains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardInspection {
    pub page_count: usize,
    /// `Title` entry of the document information dictionary.
    pub title: Option<String>,
    /// MediaBox of the first page in points.
    pub media_box: Option<[f64; 4]>,
    /// Text strings in drawing order.
    pub text_lines: Vec<String>,
    /// Text origins in points, in drawing order.
    pub text_origins: Vec<(f64, f64)>,
    pub image_count: usize,
}

impl CardInspection {
    /// Returns whether any drawn line equals `line`.
    pub fn contains_line(&self, line: &str) -> bool {
        self.text_lines.iter().any(|candidate| candidate == line)
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(*value as f64),
        _ => None,
    }
}

fn text(object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(winansi::decode(bytes)),
        _ => None,
    }
}

fn info_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => winansi::decode(bytes),
    }
}

fn title(document: &Document) -> Option<String> {
    let info = match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_dictionary(*id).ok()?,
        Object::Dictionary(dictionary) => dictionary,
        _ => return None,
    };
    match info.get(b"Title").ok()? {
        Object::String(bytes, _) => Some(info_string(bytes)),
        _ => None,
    }
}

fn media_box(document: &Document, page: lopdf::ObjectId) -> Option<[f64; 4]> {
    let values = document
        .get_dictionary(page)
        .ok()?
        .get(b"MediaBox")
        .ok()?
        .as_array()
        .ok()?;
    match values.iter().map(number).collect::<Option<Vec<_>>>()?.as_slice() {
        [a, b, c, d] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}

/// Parses `bytes` as a PDF and summarizes its drawing operations.
pub fn inspect_card(bytes: &[u8]) -> Result<CardInspection> {
    let document = Document::load_mem(bytes)?;
    let pages = document.get_pages();
    let mut inspection = CardInspection {
        page_count: pages.len(),
        title: title(&document),
        media_box: pages
            .values()
            .next()
            .and_then(|page| media_box(&document, *page)),
        ..CardInspection::default()
    };

    for page in pages.values() {
        let content = Content::decode(&document.get_page_content(*page)?)?;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tj" => inspection
                    .text_lines
                    .extend(operation.operands.iter().filter_map(text)),
                "TJ" => {
                    let joined: String = operation
                        .operands
                        .iter()
                        .filter_map(|operand| operand.as_array().ok())
                        .flatten()
                        .filter_map(text)
                        .collect();
                    inspection.text_lines.push(joined);
                }
                "Td" => {
                    if let [x, y] = operation.operands.as_slice() {
                        if let (Some(x), Some(y)) = (number(x), number(y)) {
                            inspection.text_origins.push((x, y));
                        }
                    }
                }
                "Do" => inspection.image_count += 1,
                _ => {}
            }
        }
    }

    Ok(inspection)
}
