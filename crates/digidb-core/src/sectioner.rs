//! Document sectioner for the stats database markdown
//!
//! A single pass over the document tracks which tier and attribute section
//! each table belongs to. Consecutive table rows are buffered and handed to
//! the tier's column parser when the table ends: on the next non-table text
//! line, on a new section heading, or at end of document.

use crate::error::{Error, Result};
use crate::record::{Attribute, Stage};
use crate::tiers::{is_table_chrome, is_table_row, parse_table, TableOutcome, TableRow};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Tier section headings, matched anywhere in a line
pub const TIER_HEADINGS: &[(&str, Stage)] = &[
    ("## 3. In-Training Tier", Stage::InTraining),
    ("## 4. Rookie Tier", Stage::Rookie),
    ("## 5. Champion Tier", Stage::Champion),
    ("## 6. Ultimate Tier", Stage::Ultimate),
    ("## 7. Mega Tier", Stage::Mega),
    ("## 8. Ultra Tier", Stage::Ultra),
];

/// Section number of the last tier; any later numbered `##` heading ends the tiers
pub const LAST_TIER_SECTION: u32 = 8;

/// Attribute subsection headings, matched anywhere in a line
pub const ATTRIBUTE_HEADINGS: &[(&str, Attribute)] = &[
    ("### Vaccine Attribute", Attribute::Vaccine),
    ("### Data Attribute", Attribute::Data),
    ("### Virus Attribute", Attribute::Virus),
    ("### Free Attribute", Attribute::Free),
];

/// What a single document line means to the sectioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    TierHeading(Stage),
    /// A numbered section past the last tier
    TierEnd,
    AttributeHeading(Attribute),
    TableRow,
    Blank,
    Text,
}

/// Classify a line. Headings take precedence over table rows.
pub fn classify_line(line: &str) -> LineKind {
    if let Some((_, stage)) = TIER_HEADINGS.iter().find(|(h, _)| line.contains(h)) {
        return LineKind::TierHeading(*stage);
    }
    if section_number(line).is_some_and(|n| n > LAST_TIER_SECTION) {
        return LineKind::TierEnd;
    }
    if let Some((_, attr)) = ATTRIBUTE_HEADINGS.iter().find(|(h, _)| line.contains(h)) {
        return LineKind::AttributeHeading(*attr);
    }
    if is_table_row(line) {
        return LineKind::TableRow;
    }
    if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text
    }
}

/// Number of a `## N.` heading
fn section_number(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("## ")?;
    let (number, _) = rest.split_once('.')?;
    number.parse().ok()
}

/// Section state carried through the scan
#[derive(Debug, Clone, Default)]
pub struct SectionContext<'a> {
    pub tier: Option<Stage>,
    pub attribute: Option<Attribute>,
    buffer: Vec<TableRow<'a>>,
    table_open: bool,
}

impl<'a> SectionContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows buffered for the table currently being read
    pub fn buffered(&self) -> &[TableRow<'a>] {
        &self.buffer
    }

    pub fn table_open(&self) -> bool {
        self.table_open
    }

    /// Apply one document line, appending any completed table to `out`
    pub fn step(&mut self, line_no: usize, line: &'a str, out: &mut TableOutcome) {
        match classify_line(line) {
            LineKind::TierHeading(stage) => {
                self.flush(out);
                debug!(line = line_no, %stage, "entering tier");
                self.tier = Some(stage);
                self.attribute = None;
            }
            LineKind::TierEnd => {
                self.flush(out);
                debug!(line = line_no, "leaving tier sections");
                self.tier = None;
                self.attribute = None;
            }
            LineKind::AttributeHeading(attribute) => {
                self.flush(out);
                debug!(line = line_no, %attribute, "entering attribute section");
                self.attribute = Some(attribute);
            }
            LineKind::TableRow if self.tier.is_some() => {
                if !is_table_chrome(line) {
                    self.buffer.push(TableRow::new(line_no, line));
                }
                self.table_open = true;
            }
            LineKind::Text if self.table_open => self.flush(out),
            LineKind::TableRow | LineKind::Blank | LineKind::Text => {}
        }
    }

    /// Parse and clear the buffered table.
    ///
    /// A no-op for an empty buffer; rows buffered without a known tier and
    /// attribute are dropped.
    pub fn flush(&mut self, out: &mut TableOutcome) {
        let rows = std::mem::take(&mut self.buffer);
        self.table_open = false;
        if rows.is_empty() {
            return;
        }

        match (self.tier, self.attribute) {
            (Some(stage), Some(attribute)) => {
                let parsed = parse_table(stage, &rows, attribute);
                debug!(
                    %stage,
                    %attribute,
                    rows = rows.len(),
                    records = parsed.records.len(),
                    "parsed table"
                );
                out.extend(parsed);
            }
            _ => debug!(
                rows = rows.len(),
                first_line = rows[0].line_no,
                "dropping table outside an attribute section"
            ),
        }
    }
}

/// Parse a whole database document into records
pub fn parse_document(text: &str) -> TableOutcome {
    let mut ctx = SectionContext::new();
    let mut out = TableOutcome::default();

    for (i, line) in text.lines().enumerate() {
        ctx.step(i + 1, line, &mut out);
    }
    ctx.flush(&mut out);

    out
}

/// Read and parse a database file
pub fn parse_database<P: AsRef<Path>>(path: P) -> Result<TableOutcome> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_document(&text))
}
