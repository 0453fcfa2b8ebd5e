//! SVG serialization of preview trees.

use crate::{RenderError, RenderResult};
use checkforge_core::preview::{FontFamily, Primitive, PreviewTree, TextAnchor, TextStyle};
use std::fmt::{self, Write};

const STROKE: &str = "#9ca3af";
const FILL: &str = "#e5e7eb";
const INK: &str = "#111827";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn font_family(family: FontFamily) -> &'static str {
    match family {
        FontFamily::Sans => "Arial, Helvetica, sans-serif",
        FontFamily::Mono => "Courier New, Courier, monospace",
    }
}

fn text_anchor(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn text_attrs(style: &TextStyle) -> String {
    format!(
        r#"font-family="{}" font-size="{}" font-weight="{}" text-anchor="{}" fill="{INK}""#,
        font_family(style.family),
        style.size,
        if style.bold { "bold" } else { "normal" },
        text_anchor(style.anchor),
    )
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Text { origin, text, style } => writeln!(
            out,
            r#"<text x="{}" y="{}" {}>{}</text>"#,
            origin.x,
            origin.y,
            text_attrs(style),
            escape(text)
        ),
        Primitive::Line { from, to } => writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{STROKE}" stroke-width="1"/>"#,
            from.x, from.y, to.x, to.y
        ),
        Primitive::Rect { rect, filled } => {
            let paint = if *filled {
                format!(r#"fill="{FILL}""#)
            } else {
                format!(r#"fill="none" stroke="{STROKE}" stroke-width="1""#)
            };
            writeln!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {paint}/>"#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            )
        }
    }
}

fn write_tree(out: &mut String, tree: &PreviewTree) -> fmt::Result {
    let (width, height) = (tree.size.width, tree.size.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(out, r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#)?;

    for primitive in &tree.background {
        write_primitive(out, primitive)?;
    }
    for element in &tree.elements {
        writeln!(
            out,
            r#"<g id="{}" transform="translate({} {})">"#,
            element.id, element.bounds.x0, element.bounds.y0
        )?;
        for primitive in &element.primitives {
            write_primitive(out, primitive)?;
        }
        out.push_str("</g>\n");
    }
    out.push_str("</svg>\n");
    Ok(())
}

/// Serialize a preview as a standalone SVG document in page pixels.
pub fn to_svg(tree: &PreviewTree) -> RenderResult<String> {
    let mut out = String::new();
    write_tree(&mut out, tree).map_err(|e| RenderError::Svg(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkforge_core::preview::render_preview;
    use checkforge_core::{CheckFields, ElementId, Layout};
    use kurbo::Point;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"A & B <"x">"#), "A &amp; B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn test_svg_has_page_size_and_groups() {
        let tree = render_preview(&CheckFields::sample(), &Layout::default());
        let svg = to_svg(&tree).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 816 1056""#));
        assert_eq!(svg.matches("<g id=").count(), tree.elements.len());
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_offset_moves_group() {
        let mut layout = Layout::default();
        layout.set(ElementId::Logo, Point::new(40.0, 30.0));
        let tree = render_preview(&CheckFields::default(), &layout);
        let logo = tree.element(ElementId::Logo).unwrap();
        let svg = to_svg(&tree).unwrap();
        assert!(svg.contains(&format!(
            r#"transform="translate({} {})""#,
            logo.bounds.x0, logo.bounds.y0
        )));
        assert_eq!(logo.bounds.x0, 52.0);
    }

    #[test]
    fn test_payee_text_is_escaped() {
        let mut fields = CheckFields::sample();
        fields.pay_to = "Smith & Sons".to_string();
        let svg = to_svg(&render_preview(&fields, &Layout::default())).unwrap();
        assert!(svg.contains("Smith &amp; Sons"));
        assert!(!svg.contains("Smith & Sons"));
    }
}
