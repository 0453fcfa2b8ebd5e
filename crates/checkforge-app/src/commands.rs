//! Subcommand implementations over an injected store.

use crate::cli::LayoutAction;
use crate::error::{AppError, AppResult};
use checkforge_core::layout_file::{default_file_name, read_layout_file, write_layout_file};
use checkforge_core::validation::validate_lookup_query;
use checkforge_core::words::amount_text_to_words;
use checkforge_core::{
    CheckFields, KeyValueStore, Layout, LayoutStore, LookupOutcome, Maintenance, RecordLookup, Settings,
};
use checkforge_render::{Exporter, Rasterizer};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read check fields from a JSON file, filling in the amount in words when
/// it is missing.
pub fn read_fields(path: &Path) -> AppResult<CheckFields> {
    let json = std::fs::read_to_string(path)?;
    let mut fields: CheckFields = serde_json::from_str(&json)?;
    if fields.amount_words.is_empty() {
        fields.amount_words = amount_text_to_words(&fields.amount).unwrap_or_default();
    }
    Ok(fields)
}

fn saved_layout<S: KeyValueStore + ?Sized>(store: &Arc<S>, name: &str) -> AppResult<Layout> {
    LayoutStore::new(Arc::clone(store))
        .load(name)?
        .map(|saved| saved.layout.merge_with_defaults())
        .ok_or_else(|| AppError::Input(format!("No saved layout named '{name}'")))
}

pub fn export<S, R>(
    store: Arc<S>,
    rasterizer: R,
    fields_path: &Path,
    layout_name: Option<&str>,
    out_dir: &Path,
    out: &mut impl Write,
) -> AppResult<PathBuf>
where
    S: KeyValueStore + ?Sized,
    R: Rasterizer,
{
    let fields = read_fields(fields_path)?;
    let layout = match layout_name {
        Some(name) => saved_layout(&store, name)?,
        None => Layout::defaults(),
    };
    let scale = Settings::new(Arc::clone(&store)).designer_config()?.raster_scale;

    let outcome = Exporter::new(rasterizer, store)
        .with_scale(scale)
        .export(&fields, &layout, out_dir)?;
    writeln!(out, "Exported {}", outcome.path.display())?;
    writeln!(out, "Record {} (hash {})", outcome.record.id, outcome.record.hash)?;
    Ok(outcome.path)
}

/// Look up a record. Returns whether it was found.
pub fn verify<S: KeyValueStore + ?Sized>(store: Arc<S>, query: &str, out: &mut impl Write) -> AppResult<bool> {
    validate_lookup_query(query).map_err(AppError::Input)?;

    let outcome = RecordLookup::new(store).search(query);
    writeln!(out, "{}", outcome.message())?;
    match outcome {
        LookupOutcome::Verified(record) => {
            writeln!(out, "  id:        {}", record.id)?;
            writeln!(out, "  exported:  {}", record.timestamp)?;
            writeln!(out, "  file:      {}", record.filename)?;
            writeln!(out, "  hash:      {}", record.hash)?;
            writeln!(out, "  pay to:    {}", record.check_data.pay_to)?;
            writeln!(out, "  amount:    {}", record.check_data.amount)?;
            writeln!(out, "  check no.: {}", record.check_data.check_number)?;
            Ok(true)
        }
        LookupOutcome::NotFound => Ok(false),
        LookupOutcome::Error(message) => Err(AppError::Input(message)),
    }
}

pub fn layout<S: KeyValueStore + ?Sized>(store: Arc<S>, action: LayoutAction, out: &mut impl Write) -> AppResult<()> {
    let layouts = LayoutStore::new(Arc::clone(&store));
    match action {
        LayoutAction::List => {
            for (name, saved) in layouts.all()? {
                writeln!(out, "{name}\t{}\t{} elements", saved.saved_at, saved.layout.len())?;
            }
        }
        LayoutAction::Delete { name } => {
            layouts.delete(&name)?;
            writeln!(out, "Deleted layout '{name}'")?;
        }
        LayoutAction::Export { name, file } => {
            let layout = saved_layout(&store, &name)?;
            let path = file.unwrap_or_else(|| PathBuf::from(default_file_name()));
            write_layout_file(&path, &layout)?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        LayoutAction::Import { file, name } => {
            let layout = read_layout_file(&file)?;
            layouts.save(&name, &layout)?;
            writeln!(out, "Saved layout '{name}' ({} elements)", layout.len())?;
        }
    }
    Ok(())
}

pub fn stats<S: KeyValueStore + ?Sized>(store: Arc<S>, out: &mut impl Write) -> AppResult<()> {
    let stats = Maintenance::new(store).stats()?;
    for (label, collection) in [
        ("templates", stats.templates),
        ("exports", stats.exports),
        ("settings", stats.settings),
    ] {
        writeln!(out, "{label:<10}{:>6} entries{:>10} bytes", collection.count, collection.size)?;
    }
    writeln!(out, "{:<10}{:>30} bytes", "total", stats.total_size())?;
    Ok(())
}

pub fn cleanup<S: KeyValueStore + ?Sized>(store: Arc<S>, days: i64, out: &mut impl Write) -> AppResult<()> {
    if days < 0 {
        return Err(AppError::Input("Retention days must not be negative".to_string()));
    }
    let report = Maintenance::new(store).cleanup(days, Utc::now())?;
    writeln!(
        out,
        "Removed {} export records, {} remaining",
        report.removed, report.remaining
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkforge_core::export::new_record;
    use checkforge_core::layout_file::export_layout;
    use checkforge_core::{ElementId, ExportRecords, MemoryStore};
    use checkforge_render::{RasterImage, RenderResult};

    struct Blank;

    impl Rasterizer for Blank {
        fn rasterize(&self, _svg: &str, _scale: f32) -> RenderResult<RasterImage> {
            Ok(RasterImage {
                width: 2,
                height: 1,
                rgb: vec![255; 6],
            })
        }
    }

    fn write_fields(dir: &Path) -> PathBuf {
        let path = dir.join("fields.json");
        std::fs::write(
            &path,
            r#"{"payTo": "Grace Hopper", "amount": "120.50", "checkNumber": "1042"}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_read_fields_fills_amount_words() {
        let dir = tempfile::tempdir().unwrap();
        let fields = read_fields(&write_fields(dir.path())).unwrap();
        assert_eq!(fields.pay_to, "Grace Hopper");
        assert_eq!(fields.amount_words, "One hundred twenty dollars and 50/100");
        assert_eq!(fields.memo, "");
    }

    #[test]
    fn test_export_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let mut out = Vec::new();

        let path = export(store.clone(), Blank, &write_fields(dir.path()), None, dir.path(), &mut out).unwrap();
        assert!(path.exists());
        assert_eq!(ExportRecords::new(store.clone()).all().unwrap().len(), 1);

        let mut out = Vec::new();
        assert!(verify(store.clone(), "grace", &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Check verified successfully"));
        assert!(text.contains("1042"));

        let mut out = Vec::new();
        assert!(!verify(store, "nobody", &mut out).unwrap());
    }

    #[test]
    fn test_export_with_unknown_layout() {
        let dir = tempfile::tempdir().unwrap();
        let err = export(
            Arc::new(MemoryStore::new()),
            Blank,
            &write_fields(dir.path()),
            Some("missing"),
            dir.path(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn test_verify_rejects_blank_and_long_queries() {
        let store = Arc::new(MemoryStore::new());
        let err = verify(store.clone(), "   ", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
        let err = verify(store, &"9".repeat(101), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn test_verify_single_digit_check_number() {
        let store = Arc::new(MemoryStore::new());
        let fields = CheckFields {
            pay_to: "Grace Hopper".to_string(),
            amount: "12.00".to_string(),
            check_number: "7".to_string(),
            ..CheckFields::default()
        };
        ExportRecords::new(store.clone())
            .append(new_record(&fields, "Grace_Hopper_Check.pdf", Utc::now()))
            .unwrap();

        let mut out = Vec::new();
        assert!(verify(store, "7", &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("check no.: 7"));
    }

    #[test]
    fn test_cleanup_with_huge_retention() {
        let store = Arc::new(MemoryStore::new());
        ExportRecords::new(store.clone())
            .append(new_record(&CheckFields::sample(), "a.pdf", Utc::now()))
            .unwrap();

        let mut out = Vec::new();
        cleanup(store, 100_000_000, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Removed 0 export records, 1 remaining\n");
    }

    #[test]
    fn test_layout_import_export_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let file = dir.path().join("in.json");
        let partial: Layout = serde_json::from_str(r#"{"amount": {"x": 40.0, "y": -10.0}}"#).unwrap();
        let moved = partial.merge_with_defaults();
        assert_eq!(moved.position(ElementId::Amount).x, 40.0);
        std::fs::write(&file, export_layout(&moved).unwrap()).unwrap();

        layout(store.clone(), LayoutAction::Import { file, name: "wide".into() }, &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        layout(store.clone(), LayoutAction::List, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("wide\t"));

        let target = dir.path().join("out.json");
        layout(
            store.clone(),
            LayoutAction::Export { name: "wide".into(), file: Some(target.clone()) },
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(read_layout_file(&target).unwrap(), moved);

        layout(store.clone(), LayoutAction::Delete { name: "wide".into() }, &mut Vec::new()).unwrap();
        assert!(LayoutStore::new(store).names().unwrap().is_empty());
    }

    #[test]
    fn test_stats_and_cleanup() {
        let store = Arc::new(MemoryStore::new());
        let mut out = Vec::new();
        stats(store.clone(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("exports"));
        assert!(text.contains("total"));

        let mut out = Vec::new();
        cleanup(store.clone(), 30, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Removed 0 export records, 0 remaining\n");
        assert!(matches!(cleanup(store, -1, &mut Vec::new()), Err(AppError::Input(_))));
    }
}
