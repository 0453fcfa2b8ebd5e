//! Standalone layout documents for sharing layouts between installations.

use crate::element::ElementId;
use crate::ids::timestamp_now;
use crate::layout::Layout;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Document type tag every layout file must carry.
pub const LAYOUT_FILE_TYPE: &str = "check-template-layout";
/// Format version written into exported files.
pub const LAYOUT_FILE_VERSION: &str = "1.0";

/// Errors reading or writing layout files.
#[derive(Debug, Error)]
pub enum LayoutFileError {
    #[error("Failed to parse layout file: {0}")]
    Parse(String),
    #[error("Invalid layout file format")]
    InvalidFormat,
    #[error("IO error: {0}")]
    Io(String),
}

/// On-disk layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFile {
    pub layout: Layout,
    pub exported_at: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl LayoutFile {
    /// Wrap a layout for export, stamped with the current time.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            exported_at: timestamp_now(),
            version: LAYOUT_FILE_VERSION.to_string(),
            kind: LAYOUT_FILE_TYPE.to_string(),
        }
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Serialize a layout as a layout file document.
pub fn export_layout(layout: &Layout) -> Result<String, LayoutFileError> {
    LayoutFile::new(layout.clone())
        .to_json()
        .map_err(|e| LayoutFileError::Parse(e.to_string()))
}

/// Parse a layout file document and return the layout it carries.
///
/// The document must be tagged `check-template-layout` and hold a `layout`
/// field; other fields are informational.
pub fn import_layout(json: &str) -> Result<Layout, LayoutFileError> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| LayoutFileError::Parse(e.to_string()))?;

    let tagged = document.get("type").and_then(Value::as_str) == Some(LAYOUT_FILE_TYPE);
    let mut layout = match document.get("layout") {
        Some(layout) if tagged && !layout.is_null() => layout.clone(),
        _ => return Err(LayoutFileError::InvalidFormat),
    };

    // Saved layouts carry `savedAt` and `id` next to the element entries.
    if let Some(entries) = layout.as_object_mut() {
        entries.retain(|key, _| {
            let known = key.parse::<ElementId>().is_ok();
            if !known {
                log::warn!("Ignoring unknown layout key '{key}'");
            }
            known
        });
    }

    serde_json::from_value(layout).map_err(|e| LayoutFileError::Parse(e.to_string()))
}

/// Default file name for an exported layout.
pub fn default_file_name() -> String {
    format!("check-layout-{}.json", Utc::now().timestamp_millis())
}

/// Write a layout file to `path`.
pub fn write_layout_file(path: &Path, layout: &Layout) -> Result<(), LayoutFileError> {
    let json = export_layout(layout)?;
    std::fs::write(path, json)
        .map_err(|e| LayoutFileError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read the layout carried by the layout file at `path`.
pub fn read_layout_file(path: &Path) -> Result<Layout, LayoutFileError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| LayoutFileError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    import_layout(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use serde_json::json;

    #[test]
    fn test_round_trip_reproduces_layout() {
        let mut layout = Layout::defaults();
        layout.set(ElementId::Amount, Point::new(200.0, 80.0));
        layout.set(ElementId::MicrLine, Point::new(12.5, 3.25));

        let json = export_layout(&layout).unwrap();
        assert_eq!(import_layout(&json).unwrap(), layout);
    }

    #[test]
    fn test_export_document_shape() {
        let json = export_layout(&Layout::defaults()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], json!("check-template-layout"));
        assert_eq!(value["version"], json!("1.0"));
        assert!(value["exportedAt"].is_string());
        assert!(value["layout"]["logo"].is_object());
    }

    #[test]
    fn test_import_rejects_wrong_type() {
        let doc = json!({
            "layout": { "logo": { "x": 1, "y": 2 } },
            "version": "1.0",
            "type": "something-else"
        });
        let result = import_layout(&doc.to_string());
        assert!(matches!(result, Err(LayoutFileError::InvalidFormat)));
    }

    #[test]
    fn test_import_rejects_missing_layout() {
        let doc = json!({ "type": "check-template-layout" });
        assert!(matches!(
            import_layout(&doc.to_string()),
            Err(LayoutFileError::InvalidFormat)
        ));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(import_layout("{oops"), Err(LayoutFileError::Parse(_))));
    }

    #[test]
    fn test_import_accepts_partial_layout() {
        let doc = json!({
            "layout": { "amount": { "x": 200, "y": 80 } },
            "type": "check-template-layout"
        });
        let layout = import_layout(&doc.to_string()).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.get(ElementId::Amount), Some(Point::new(200.0, 80.0)));
    }

    #[test]
    fn test_import_ignores_saved_layout_metadata() {
        let doc = json!({
            "layout": {
                "amount": { "x": 200, "y": 80 },
                "savedAt": "2025-08-19T14:03:07.512Z",
                "id": "layout_1755612187512_abc123def"
            },
            "exportedAt": "2025-08-19T14:05:00.000Z",
            "version": "1.0",
            "type": "check-template-layout"
        });
        let layout = import_layout(&doc.to_string()).unwrap();
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.get(ElementId::Amount), Some(Point::new(200.0, 80.0)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_file_name());
        let mut layout = Layout::defaults();
        layout.set(ElementId::Logo, Point::new(4.0, 5.0));

        write_layout_file(&path, &layout).unwrap();
        assert_eq!(read_layout_file(&path).unwrap(), layout);
    }
}
