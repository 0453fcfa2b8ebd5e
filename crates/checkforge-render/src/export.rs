//! The export pipeline: preview, rasterize, assemble, write, record.

use crate::pdf::build_check_pdf;
use crate::raster::Rasterizer;
use crate::svg::to_svg;
use crate::RenderResult;
use checkforge_core::export::{ensure_exportable, export_filename, new_record};
use checkforge_core::preview::render_preview;
use checkforge_core::{
    CheckFields, ExportError, ExportRecords, KeyValueStore, Layout, PersistenceError, ProvenanceRecord,
};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default raster density, two device pixels per template pixel.
pub const DEFAULT_SCALE: f32 = 2.0;

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub record: ProvenanceRecord,
}

/// Exports checks as PDF files and records their provenance.
pub struct Exporter<R: Rasterizer, S: KeyValueStore + ?Sized> {
    rasterizer: R,
    records: ExportRecords<S>,
    scale: f32,
}

impl<R: Rasterizer, S: KeyValueStore + ?Sized> Exporter<R, S> {
    pub fn new(rasterizer: R, store: Arc<S>) -> Self {
        Self {
            rasterizer,
            records: ExportRecords::new(store),
            scale: DEFAULT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Render `fields` placed by `layout` into PDF bytes.
    pub fn render_pdf(&self, fields: &CheckFields, layout: &Layout) -> RenderResult<Vec<u8>> {
        let tree = render_preview(fields, layout);
        let image = self.rasterizer.rasterize(&to_svg(&tree)?, self.scale)?;
        build_check_pdf(&image)
    }

    /// Export into `out_dir` with the current time.
    pub fn export(&self, fields: &CheckFields, layout: &Layout, out_dir: &Path) -> Result<ExportOutcome, ExportError> {
        self.export_at(fields, layout, out_dir, Utc::now())
    }

    /// Export into `out_dir` as of `now`.
    ///
    /// Nothing is written and no record is kept unless the PDF is fully
    /// assembled.
    pub fn export_at(
        &self,
        fields: &CheckFields,
        layout: &Layout,
        out_dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<ExportOutcome, ExportError> {
        ensure_exportable(fields)?;

        let bytes = self.render_pdf(fields, layout).map_err(|e| {
            log::error!("PDF export failed: {e}");
            ExportError::from(e)
        })?;

        let filename = export_filename(&fields.pay_to, now);
        let path = out_dir.join(&filename);
        std::fs::write(&path, &bytes).map_err(|e| PersistenceError::Io(format!("{}: {e}", path.display())))?;

        let record = new_record(fields, &filename, now);
        self.records.append(record.clone())?;
        log::info!("Exported {} ({} bytes, hash {})", filename, bytes.len(), record.hash);

        Ok(ExportOutcome { path, record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RasterImage, RenderError};
    use checkforge_core::MemoryStore;
    use chrono::TimeZone;

    struct Failing;

    impl Rasterizer for Failing {
        fn rasterize(&self, _svg: &str, _scale: f32) -> RenderResult<RasterImage> {
            Err(RenderError::Raster("no canvas".to_string()))
        }
    }

    struct Blank;

    impl Rasterizer for Blank {
        fn rasterize(&self, _svg: &str, _scale: f32) -> RenderResult<RasterImage> {
            Ok(RasterImage {
                width: 4,
                height: 2,
                rgb: vec![255; 24],
            })
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 19, 14, 3, 7).unwrap()
    }

    #[test]
    fn test_failed_rasterization_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let exporter = Exporter::new(Failing, store.clone());

        let err = exporter
            .export_at(&CheckFields::sample(), &Layout::default(), dir.path(), now())
            .unwrap_err();
        assert!(matches!(err, ExportError::Rasterization(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(ExportRecords::new(store).all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_fields_disable_export() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(Blank, Arc::new(MemoryStore::new()));
        let mut fields = CheckFields::sample();
        fields.amount.clear();

        let err = exporter
            .export_at(&fields, &Layout::default(), dir.path(), now())
            .unwrap_err();
        assert!(matches!(err, ExportError::Disabled(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_file_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let exporter = Exporter::new(Blank, store.clone());

        let outcome = exporter
            .export_at(&CheckFields::sample(), &Layout::default(), dir.path(), now())
            .unwrap();
        assert_eq!(
            outcome.path.file_name().unwrap(),
            "Sample_Payee_Name_Check_2025-08-19T14-03-07.pdf"
        );
        assert!(std::fs::read(&outcome.path).unwrap().starts_with(b"%PDF"));

        let records = ExportRecords::new(store).all().unwrap();
        assert_eq!(records, vec![outcome.record]);
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let exporter = Exporter::new(Blank, Arc::new(MemoryStore::new()));
        let err = exporter
            .export_at(&CheckFields::sample(), &Layout::default(), &missing, now())
            .unwrap_err();
        assert!(matches!(err, ExportError::Persistence(PersistenceError::Io(_))));
    }
}
