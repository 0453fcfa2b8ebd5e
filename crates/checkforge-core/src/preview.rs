//! Preview composition.
//!
//! [`render_preview`] places every template element at its base box plus the
//! layout offset and fills it with drawing primitives. The result is a plain
//! value tree; turning it into pixels is the render crate's job.

use crate::element::ElementId;
use crate::fields::CheckFields;
use crate::layout::Layout;
use crate::validation::format_amount;
use chrono::{Datelike, NaiveDate};
use kurbo::{Point, Rect, Size, Vec2};

/// Template resolution in pixels per inch.
pub const PIXELS_PER_INCH: f64 = 96.0;
/// The full template page, 8.5in × 11in.
pub const PAGE_SIZE: Size = Size::new(816.0, 1056.0);
/// Height of the check section at the top of the page, 3.5in.
pub const CHECK_SECTION_HEIGHT: f64 = 336.0;
/// Thickness of the border between the check and the stub.
const SECTION_BORDER: f64 = 2.0;
/// Top of the stub section.
pub const STUB_TOP: f64 = CHECK_SECTION_HEIGHT + SECTION_BORDER;

const CHECK_PADDING: f64 = 12.0;
const STUB_PADDING: f64 = 16.0;

const SMALL: f64 = 12.0;
const BODY: f64 = 14.0;
const LARGE: f64 = 18.0;
const LINE_HEIGHT: f64 = 18.0;

/// Horizontal alignment of a text run relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Typeface family of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Sans,
    Mono,
}

/// How a text run is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub family: FontFamily,
    pub anchor: TextAnchor,
}

impl TextStyle {
    fn new(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn mono(mut self) -> Self {
        self.family = FontFamily::Mono;
        self
    }

    fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// A drawing primitive. Coordinates are relative to the owning element's
/// top-left corner; text origins sit on the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        origin: Point,
        text: String,
        style: TextStyle,
    },
    Line {
        from: Point,
        to: Point,
    },
    Rect {
        rect: Rect,
        filled: bool,
    },
}

fn text(x: f64, y: f64, content: impl Into<String>, style: TextStyle) -> Primitive {
    Primitive::Text {
        origin: Point::new(x, y),
        text: content.into(),
        style,
    }
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Primitive {
    Primitive::Line {
        from: Point::new(x0, y0),
        to: Point::new(x1, y1),
    }
}

/// One positioned template element.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewElement {
    pub id: ElementId,
    /// Page-space box of the element after applying its layout offset.
    pub bounds: Rect,
    pub primitives: Vec<Primitive>,
}

/// A complete preview of one check page.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTree {
    pub size: Size,
    /// Page decoration drawn beneath the elements.
    pub background: Vec<Primitive>,
    /// Elements in paint order.
    pub elements: Vec<PreviewElement>,
}

impl PreviewTree {
    pub fn element(&self, id: ElementId) -> Option<&PreviewElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Topmost element whose box contains `point`.
    pub fn element_at(&self, point: Point) -> Option<&PreviewElement> {
        self.elements.iter().rev().find(|e| e.bounds.contains(point))
    }

    /// The page as a rectangle at the origin.
    pub fn page_rect(&self) -> Rect {
        self.size.to_rect()
    }
}

/// Base box of an element before any layout offset.
pub fn base_bounds(id: ElementId) -> Rect {
    let right = PAGE_SIZE.width - CHECK_PADDING;
    let stub_left = STUB_PADDING;
    let stub_right = PAGE_SIZE.width - STUB_PADDING;
    let top = CHECK_PADDING;
    match id {
        ElementId::Logo => Rect::new(12.0, top, 76.0, top + 48.0),
        ElementId::CompanyInfo => Rect::new(80.0, top, 290.0, top + 62.0),
        ElementId::ReimbursementType => Rect::new(300.0, top, 520.0, top + 22.0),
        ElementId::CheckNumber => Rect::new(right - 160.0, top, right, top + 22.0),
        ElementId::Date => Rect::new(right - 160.0, 50.0, right, 72.0),
        ElementId::PayToLine => Rect::new(12.0, 100.0, PAGE_SIZE.width - 120.0, 130.0),
        ElementId::Amount => Rect::new(right - 100.0, 100.0, right, 132.0),
        ElementId::AmountWords => Rect::new(12.0, 140.0, PAGE_SIZE.width - 80.0, 166.0),
        ElementId::ParticipantInfo => Rect::new(12.0, 180.0, 312.0, 240.0),
        ElementId::Signature => Rect::new(right - 192.0, 180.0, right, 222.0),
        ElementId::MicrLine => {
            let width = 420.0;
            let left = (PAGE_SIZE.width - width) / 2.0;
            let bottom = CHECK_SECTION_HEIGHT - CHECK_PADDING;
            Rect::new(left, bottom - 26.0, left + width, bottom)
        }
        ElementId::StubParticipant => {
            Rect::new(stub_left, STUB_TOP + 16.0, stub_right, STUB_TOP + 110.0)
        }
        ElementId::ClaimsTable => Rect::new(stub_left, STUB_TOP + 120.0, stub_right, STUB_TOP + 250.0),
        ElementId::BalancesTable => {
            Rect::new(stub_left, STUB_TOP + 280.0, stub_right, STUB_TOP + 390.0)
        }
    }
}

/// Format an amount as dollars with two decimals; unparseable input renders
/// as `$0.00`.
pub fn format_currency(amount: &str) -> String {
    format!("${}", format_amount(amount))
}

/// Format an ISO date as `M/D/YYYY`. Values already containing `/` and
/// values that are not ISO dates are shown as entered.
pub fn format_date(date: &str) -> String {
    if date.contains('/') {
        return date.to_string();
    }
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        Err(_) => date.to_string(),
    }
}

fn table(title: &str, headers: &[&str], rows: &[Vec<String>], width: f64) -> Vec<Primitive> {
    let column = width / headers.len() as f64;
    let mut primitives = vec![text(0.0, BODY, title, TextStyle::new(BODY).bold())];
    let header_y = BODY + 20.0;
    for (i, header) in headers.iter().enumerate() {
        primitives.push(text(i as f64 * column, header_y, *header, TextStyle::new(SMALL).bold()));
    }
    primitives.push(line(0.0, header_y + 5.0, width, header_y + 5.0));
    for (r, row) in rows.iter().enumerate() {
        let y = header_y + 5.0 + LINE_HEIGHT * (r as f64 + 1.0);
        for (i, cell) in row.iter().enumerate() {
            primitives.push(text(i as f64 * column, y, cell.as_str(), TextStyle::new(SMALL)));
        }
    }
    primitives
}

fn element_primitives(id: ElementId, fields: &CheckFields, size: Size) -> Vec<Primitive> {
    let w = size.width;
    let h = size.height;
    let amount = format_currency(&fields.amount);
    let date = format_date(&fields.date);
    match id {
        ElementId::Logo => {
            let center = TextStyle::new(SMALL).bold().anchored(TextAnchor::Middle);
            vec![
                Primitive::Rect {
                    rect: size.to_rect(),
                    filled: true,
                },
                text(w / 2.0, 20.0, fields.account_holder.as_str(), center),
                text(w / 2.0, 36.0, "LOGO", center),
            ]
        }
        ElementId::CompanyInfo => {
            let mut primitives = vec![text(0.0, BODY, fields.bank_name.as_str(), TextStyle::new(BODY).bold())];
            for (i, address_line) in fields.address.lines().enumerate() {
                let y = BODY + LINE_HEIGHT * (i as f64 + 1.0);
                primitives.push(text(0.0, y, address_line, TextStyle::new(SMALL)));
            }
            primitives
        }
        ElementId::ReimbursementType => vec![text(
            0.0,
            BODY,
            fields.reimbursement_type.as_str(),
            TextStyle::new(BODY).bold(),
        )],
        ElementId::CheckNumber => vec![text(
            w,
            BODY,
            format!("No: {}", fields.check_number),
            TextStyle::new(BODY).anchored(TextAnchor::End),
        )],
        ElementId::Date => vec![text(
            w,
            BODY,
            format!("DATE: {date}"),
            TextStyle::new(BODY).anchored(TextAnchor::End),
        )],
        ElementId::PayToLine => vec![
            text(0.0, 18.0, "PAY TO THE ORDER OF", TextStyle::new(BODY).bold()),
            text(170.0, 18.0, fields.pay_to.as_str(), TextStyle::new(BODY)),
            line(165.0, 24.0, w, 24.0),
        ],
        ElementId::Amount => vec![
            Primitive::Rect {
                rect: size.to_rect(),
                filled: false,
            },
            text(
                w - 10.0,
                22.0,
                amount,
                TextStyle::new(LARGE).bold().anchored(TextAnchor::End),
            ),
        ],
        ElementId::AmountWords => vec![
            text(0.0, 16.0, fields.amount_words.as_str(), TextStyle::new(BODY)),
            line(0.0, h - 2.0, w, h - 2.0),
        ],
        ElementId::ParticipantInfo => vec![
            text(0.0, BODY, fields.pay_to.as_str(), TextStyle::new(BODY)),
            text(0.0, BODY + LINE_HEIGHT, fields.participant_id.as_str(), TextStyle::new(BODY)),
        ],
        ElementId::Signature => {
            let center = TextStyle::new(LARGE).anchored(TextAnchor::Middle);
            vec![
                text(w / 2.0, 26.0, fields.signature.as_str(), center),
                line(0.0, h - 6.0, w, h - 6.0),
            ]
        }
        ElementId::MicrLine => vec![text(
            w / 2.0,
            20.0,
            format!(
                "\u{2446}{}\u{2446} \u{2448}{}\u{2448}",
                fields.routing_number, fields.account_number
            ),
            TextStyle::new(LARGE).bold().mono().anchored(TextAnchor::Middle),
        )],
        ElementId::StubParticipant => {
            let right = TextStyle::new(BODY).anchored(TextAnchor::End);
            vec![
                text(0.0, BODY, fields.pay_to.as_str(), TextStyle::new(BODY)),
                text(
                    0.0,
                    BODY + LINE_HEIGHT,
                    format!("Participant Account ID: {}", fields.account_number),
                    TextStyle::new(BODY),
                ),
                text(0.0, BODY + LINE_HEIGHT * 2.0, fields.participant_id.as_str(), TextStyle::new(BODY)),
                text(w, BODY + LINE_HEIGHT * 3.0, format!("No. {}", fields.check_number), right),
                text(w, BODY + LINE_HEIGHT * 4.0, format!("Date: {date}"), right),
            ]
        }
        ElementId::ClaimsTable => {
            let row = vec![
                fields.reimbursement_type.clone(),
                date.clone(),
                amount.clone(),
                amount.clone(),
                "$0.00".to_string(),
                "$0.00".to_string(),
                amount.clone(),
            ];
            let mut primitives = table(
                "Claims Included In this Payment",
                &[
                    "Plan",
                    "Date Of Service",
                    "Claim Amount",
                    "Paid",
                    "Pending",
                    "Denied",
                    "Amt This Cycle",
                ],
                &[row],
                w,
            );
            primitives.push(text(
                w,
                h - 8.0,
                format!("Total: {amount}"),
                TextStyle::new(BODY).bold().anchored(TextAnchor::End),
            ));
            primitives
        }
        ElementId::BalancesTable => {
            let row = vec![
                fields.reimbursement_type.clone(),
                "-".to_string(),
                amount.clone(),
                amount,
                "$0.00".to_string(),
                "$0.00".to_string(),
                "-".to_string(),
            ];
            table(
                "Current Year Account Balances",
                &[
                    "Plan",
                    "Eligible Amount",
                    "Submitted",
                    "Paid",
                    "Pending",
                    "Denied",
                    "Plan Year Balance",
                ],
                &[row],
                w,
            )
        }
    }
}

/// Compose the preview of `fields` with elements shifted by `layout`.
///
/// Elements missing from the layout sit at their base position. The result
/// depends only on the inputs.
pub fn render_preview(fields: &CheckFields, layout: &Layout) -> PreviewTree {
    let elements = ElementId::ALL
        .into_iter()
        .map(|id| {
            let offset = layout.position(id).to_vec2();
            let bounds = base_bounds(id) + offset;
            PreviewElement {
                id,
                bounds,
                primitives: element_primitives(id, fields, bounds.size()),
            }
        })
        .collect();

    let divider_y = CHECK_SECTION_HEIGHT + SECTION_BORDER / 2.0;
    PreviewTree {
        size: PAGE_SIZE,
        background: vec![
            Primitive::Rect {
                rect: PAGE_SIZE.to_rect(),
                filled: false,
            },
            line(0.0, divider_y, PAGE_SIZE.width, divider_y),
        ],
        elements,
    }
}

/// Offset that moves an element's base box to `top_left`.
pub fn offset_for(id: ElementId, top_left: Point) -> Vec2 {
    top_left - base_bounds(id).origin()
}
