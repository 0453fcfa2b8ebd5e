//! CheckForge Core Library
//!
//! Platform-agnostic data structures and logic for the CheckForge check
//! designer: element layouts, drag positioning, preview composition,
//! provenance records and their persistence.

pub mod designer;
pub mod drag;
pub mod element;
pub mod export;
pub mod fields;
pub mod fingerprint;
pub mod ids;
pub mod layout;
pub mod layout_file;
pub mod layout_store;
pub mod lookup;
pub mod maintenance;
pub mod preview;
pub mod records;
pub mod settings;
pub mod snap;
pub mod store;
pub mod templates;
pub mod validation;
pub mod words;

pub use designer::Designer;
pub use drag::{DragCommit, DragController, DragSettings, DragState};
pub use element::{ElementId, default_positions};
pub use export::{ExportError, export_filename};
pub use fields::{CheckField, CheckFields};
pub use fingerprint::fingerprint;
pub use layout::{Layout, LayoutStats, LayoutValidation, SavedLayout};
pub use layout_file::{LayoutFile, LayoutFileError};
pub use layout_store::{LayoutStore, Preset};
pub use lookup::{LookupOutcome, RecordLookup};
pub use maintenance::{Maintenance, StorageStats};
pub use preview::{PreviewElement, PreviewTree};
pub use records::{CleanupReport, ExportRecords, ProvenanceRecord};
pub use settings::{DesignerConfig, Settings};
pub use store::{KeyValueStore, MemoryStore, PersistenceError, StoreResult};
pub use templates::{BaseTemplate, Template, TemplateError, TemplateStore};
pub use validation::{FormValidation, validate_check_form};
pub use words::amount_to_words;
