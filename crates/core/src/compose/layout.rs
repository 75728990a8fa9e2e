//! Layout state machine
//!
//! The document flows strictly forward through fixed blocks: header,
//! customer details, one table per product group, notes, attribution
//! footer. A vertical cursor tracks the remaining space on the current
//! page; a block that does not fit its minimum height opens a new page
//! first, and group tables split at row boundaries with their header row
//! repeated on each continuation page.
//!
//! Output is deterministic: the caller supplies the timestamp embedded in
//! the header, the font set is fixed, and identical requests produce
//! identical bytes.

use chrono::{DateTime, FixedOffset};
use tilequote_domain::constants::{
    base_width_weight, BLANK_PLACEHOLDER, HEADER_DATE_TIME_FORMAT,
};
use tilequote_domain::{
    Column, ColumnKey, Identity, ProductGroup, ProductRecord, QuotationForm, QuoteError, Result,
};

use super::pdf::{text_width, DocumentBuilder, Font, PAGE_HEIGHT, PAGE_WIDTH};
use crate::extract::cell_value;
use crate::overlay::PricingOverlay;

const MARGIN: f64 = 40.0;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

const TITLE_SIZE: f64 = 16.0;
const COMPANY_SIZE: f64 = 12.0;
const BODY_SIZE: f64 = 9.0;
const LABEL_SIZE: f64 = 10.0;
const FOOTER_SIZE: f64 = 7.5;

const ROW_HEIGHT: f64 = 18.0;
const HEADER_ROW_HEIGHT: f64 = 20.0;
const GROUP_LABEL_HEIGHT: f64 = 16.0;
const LINE_HEIGHT: f64 = 14.0;
const BLOCK_GAP: f64 = 10.0;
const CELL_PAD: f64 = 4.0;

const RULE_WIDTH: f64 = 0.8;
const GRID_WIDTH: f64 = 0.5;

// The attribution line sits at a fixed offset from the bottom page edge,
// below the content margin, so it can never overlap the notes block.
const FOOTER_BASELINE: f64 = 26.0;
const FOOTER_CLEARANCE: f64 = 10.0;

/// Everything one compose run needs, borrowed from the session and the
/// fetched tenant snapshot. `generated_at` is caller-supplied so the
/// embedded date/time (and therefore the output bytes) are reproducible.
#[derive(Debug)]
pub struct ComposeRequest<'a> {
    pub form: &'a QuotationForm,
    pub columns: &'a [Column],
    pub groups: &'a [ProductGroup],
    pub overlay: &'a PricingOverlay,
    pub identity: Option<&'a Identity>,
    pub company_name: Option<&'a str>,
    pub generated_at: DateTime<FixedOffset>,
}

/// Compose the paginated document.
///
/// Fails only on internal invariant violations (`QuoteError::Composition`),
/// e.g. an empty visible-column set reaching the renderer; user data never
/// causes an error here.
pub fn compose(req: &ComposeRequest<'_>) -> Result<Vec<u8>> {
    let composer = Composer::new(req)?;
    Ok(composer.run())
}

/// Per-cell horizontal alignment. Composite size/category cells read as
/// prose and align left; every other cell (row numbers, attributes,
/// prices) is centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

fn alignment(key: ColumnKey) -> Align {
    match key {
        ColumnKey::SizeCategory => Align::Left,
        _ => Align::Center,
    }
}

#[derive(Debug)]
struct ColumnSpec {
    key: ColumnKey,
    label: String,
    width: f64,
    align: Align,
}

/// Normalized column widths for one visible-column set.
///
/// Each visible column takes a share of the content width proportional to
/// its fixed base weight. Recomputed per distinct column set; never global
/// state.
fn column_widths(columns: &[&Column]) -> Result<Vec<f64>> {
    let total: f64 = columns.iter().map(|c| base_width_weight(c.key)).sum();
    if total <= f64::EPSILON {
        return Err(QuoteError::Composition(
            "column width normalization over a zero total weight".into(),
        ));
    }
    Ok(columns.iter().map(|c| CONTENT_WIDTH * base_width_weight(c.key) / total).collect())
}

struct Composer<'a> {
    req: &'a ComposeRequest<'a>,
    cols: Vec<ColumnSpec>,
    doc: DocumentBuilder,
    cursor: f64,
}

impl<'a> Composer<'a> {
    fn new(req: &'a ComposeRequest<'a>) -> Result<Self> {
        let visible: Vec<&Column> = req.columns.iter().filter(|c| c.visible).collect();
        if visible.is_empty() {
            return Err(QuoteError::Composition(
                "no visible columns reached the renderer".into(),
            ));
        }
        let widths = column_widths(&visible)?;
        let cols = visible
            .iter()
            .zip(widths)
            .map(|(column, width)| ColumnSpec {
                key: column.key,
                label: column.label.clone(),
                width,
                align: alignment(column.key),
            })
            .collect();

        Ok(Self { req, cols, doc: DocumentBuilder::new(), cursor: PAGE_HEIGHT - MARGIN })
    }

    fn run(mut self) -> Vec<u8> {
        self.new_page();
        self.emit_header();
        self.emit_customer_block();
        for group in self.req.groups {
            self.emit_group(group);
        }
        self.emit_notes();
        self.emit_attribution();
        self.doc.finish()
    }

    fn new_page(&mut self) {
        self.doc.new_page();
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Open a new page unless `needed` vertical space remains.
    fn ensure(&mut self, needed: f64) {
        if self.cursor - needed < MARGIN {
            self.new_page();
        }
    }

    fn emit_header(&mut self) {
        if let Some(company) = self.req.company_name {
            self.cursor -= COMPANY_SIZE;
            let x = MARGIN + (CONTENT_WIDTH - text_width(company, Font::Bold, COMPANY_SIZE)) / 2.0;
            self.doc.page_mut().text(x, self.cursor, Font::Bold, COMPANY_SIZE, company);
            self.cursor -= 6.0;
        }

        self.cursor -= TITLE_SIZE;
        let title = "QUOTATION";
        let title_x = MARGIN + (CONTENT_WIDTH - text_width(title, Font::Bold, TITLE_SIZE)) / 2.0;
        let stamp = self.req.generated_at.format(HEADER_DATE_TIME_FORMAT).to_string();
        let stamp_x = PAGE_WIDTH - MARGIN - text_width(&stamp, Font::Regular, BODY_SIZE);

        let page = self.doc.page_mut();
        page.text(title_x, self.cursor, Font::Bold, TITLE_SIZE, title);
        page.text(stamp_x, self.cursor, Font::Regular, BODY_SIZE, &stamp);

        self.cursor -= 8.0;
        let rule_y = self.cursor;
        self.doc.page_mut().line(MARGIN, rule_y, PAGE_WIDTH - MARGIN, rule_y, RULE_WIDTH);
        self.cursor -= BLOCK_GAP;
    }

    /// Two lines of labelled customer fields. Empty fields render the
    /// fixed underscore run so the printout can be completed by hand.
    fn emit_customer_block(&mut self) {
        let form = self.req.form;
        let fields: [(&str, &str); 4] = [
            ("Customer", &form.customer_name),
            ("Mobile", &form.mobile),
            ("Reference", &form.reference),
            ("Sales Person", &form.salesperson),
        ];

        for pair in fields.chunks(2) {
            self.ensure(LINE_HEIGHT);
            self.cursor -= LINE_HEIGHT;
            let y = self.cursor;
            let page = self.doc.page_mut();
            for (slot, (label, value)) in pair.iter().enumerate() {
                let x = MARGIN + (slot as f64) * (CONTENT_WIDTH / 2.0);
                page.text(x, y, Font::Bold, BODY_SIZE, &format!("{label}:"));
                let label_w = text_width(&format!("{label}:"), Font::Bold, BODY_SIZE);
                page.text(x + label_w + 4.0, y, Font::Regular, BODY_SIZE, or_placeholder(value));
            }
        }
        self.cursor -= BLOCK_GAP;
    }

    fn emit_group(&mut self, group: &ProductGroup) {
        // Minimum to start the block on this page: label, table header and
        // one data row. Anything less opens a fresh page.
        self.ensure(GROUP_LABEL_HEIGHT + HEADER_ROW_HEIGHT + ROW_HEIGHT);

        self.cursor -= GROUP_LABEL_HEIGHT;
        let label_y = self.cursor + 3.0;
        self.doc.page_mut().text(MARGIN, label_y, Font::Bold, LABEL_SIZE, &group.name);

        self.emit_table_header();
        for (index, product) in group.products.iter().enumerate() {
            if self.cursor - ROW_HEIGHT < MARGIN {
                // Split at a row boundary; the header row repeats on each
                // continuation page for this group.
                self.new_page();
                self.emit_table_header();
            }
            self.emit_row(index, product);
        }
        self.cursor -= BLOCK_GAP;
    }

    fn emit_table_header(&mut self) {
        let bottom = self.cursor - HEADER_ROW_HEIGHT;
        let page = self.doc.page_mut();
        let mut x = MARGIN;
        for spec in &self.cols {
            page.rect(x, bottom, spec.width, HEADER_ROW_HEIGHT, GRID_WIDTH);
            let text = fit_text(&spec.label, Font::Bold, BODY_SIZE, spec.width - 2.0 * CELL_PAD);
            let text_x = x + (spec.width - text_width(&text, Font::Bold, BODY_SIZE)).max(0.0) / 2.0;
            page.text(text_x, bottom + 6.5, Font::Bold, BODY_SIZE, &text);
            x += spec.width;
        }
        self.cursor = bottom;
    }

    fn emit_row(&mut self, index: usize, product: &ProductRecord) {
        let cells: Vec<String> = self
            .cols
            .iter()
            .map(|spec| cell_value(product, spec.key, Some(index), self.req.overlay))
            .collect();

        let bottom = self.cursor - ROW_HEIGHT;
        let page = self.doc.page_mut();
        let mut x = MARGIN;
        for (spec, raw) in self.cols.iter().zip(&cells) {
            page.rect(x, bottom, spec.width, ROW_HEIGHT, GRID_WIDTH);
            let text = fit_text(raw, Font::Regular, BODY_SIZE, spec.width - 2.0 * CELL_PAD);
            let text_x = match spec.align {
                Align::Left => x + CELL_PAD,
                Align::Center => {
                    x + (spec.width - text_width(&text, Font::Regular, BODY_SIZE)).max(0.0) / 2.0
                }
            };
            page.text(text_x, bottom + 5.5, Font::Regular, BODY_SIZE, &text);
            x += spec.width;
        }
        self.cursor = bottom;
    }

    /// Notes lines appear only when the user supplied real content; an
    /// all-empty form omits the whole block rather than printing blank
    /// lines or placeholder text.
    fn emit_notes(&mut self) {
        let form = self.req.form;
        let mut lines: Vec<String> = Vec::new();
        if !form.tax.trim().is_empty() {
            lines.push(format!("Tax: {}", form.tax.trim()));
        }
        if !form.payment_days.trim().is_empty() {
            lines.push(format!("Payment: {} Days", form.payment_days.trim()));
        }
        if !form.remark.trim().is_empty() {
            lines.push(form.remark.trim().to_string());
        }
        if lines.is_empty() {
            return;
        }

        self.ensure(GROUP_LABEL_HEIGHT + LINE_HEIGHT);
        self.cursor -= GROUP_LABEL_HEIGHT;
        let heading_y = self.cursor + 3.0;
        self.doc.page_mut().text(MARGIN, heading_y, Font::Bold, LABEL_SIZE, "Notes:");

        for line in &lines {
            self.ensure(LINE_HEIGHT);
            self.cursor -= LINE_HEIGHT;
            let y = self.cursor;
            self.doc.page_mut().text(MARGIN + 8.0, y, Font::Regular, BODY_SIZE, line);
        }
    }

    /// Small italic line naming the generating user, emitted last at a
    /// fixed offset from the bottom edge. Omitted entirely when no
    /// identity was supplied.
    fn emit_attribution(&mut self) {
        let Some(identity) = self.req.identity else {
            return;
        };
        let line = match identity.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(phone) => format!("Generated by {} ({})", identity.display_name, phone),
            None => format!("Generated by {}", identity.display_name),
        };

        if self.cursor < FOOTER_BASELINE + FOOTER_CLEARANCE {
            self.new_page();
        }
        let x = MARGIN + (CONTENT_WIDTH - text_width(&line, Font::Oblique, FOOTER_SIZE)) / 2.0;
        self.doc.page_mut().text(x, FOOTER_BASELINE, Font::Oblique, FOOTER_SIZE, &line);
    }
}

fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        BLANK_PLACEHOLDER
    } else {
        trimmed
    }
}

/// Truncate `text` with an ASCII ellipsis so it fits `max_width` points.
fn fit_text(text: &str, font: Font, size: f64, max_width: f64) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut kept: String = text.to_string();
    while !kept.is_empty() {
        kept.pop();
        let candidate = format!("{}...", kept.trim_end());
        if text_width(&candidate, font, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}
