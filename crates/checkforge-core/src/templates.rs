//! Saved check templates and the built-in template gallery.

use crate::element::ElementId;
use crate::fields::CheckFields;
use crate::ids::{generate_id, timestamp_now};
use crate::layout::Layout;
use crate::store::{
    KeyValueStore, PersistenceError, StoreResult, TEMPLATES_KEY, read_collection,
    write_collection,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Template errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Please customize the layout before saving a template")]
    EmptyLayout,
    #[error("Invalid template: {0}")]
    Invalid(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// A named set of check fields, optionally with a custom layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: CheckFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Changes applied by [`TemplateStore::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub data: Option<CheckFields>,
    pub layout: Option<Layout>,
}

/// Saved templates under `checkTemplates`, in creation order.
pub struct TemplateStore<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Clone for TemplateStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> TemplateStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn all(&self) -> StoreResult<Vec<Template>> {
        read_collection(&*self.store, TEMPLATES_KEY)
    }

    /// Save a new template and return it.
    pub fn save(&self, name: &str, data: CheckFields, layout: Option<Layout>) -> TemplateResult<Template> {
        if name.trim().is_empty() {
            return Err(TemplateError::Invalid("Template name is required".to_string()));
        }

        let now = timestamp_now();
        let template = Template {
            id: generate_id("template"),
            name: name.to_string(),
            data,
            layout,
            created_at: now.clone(),
            updated_at: Some(now),
        };

        let mut templates = self.all()?;
        templates.push(template.clone());
        write_collection(&*self.store, TEMPLATES_KEY, &templates)?;
        log::debug!("Saved template {:?} as {}", template.name, template.id);
        Ok(template)
    }

    /// Apply `changes` to the template `id` and bump its update time.
    pub fn update(&self, id: &str, changes: TemplateUpdate) -> TemplateResult<Template> {
        let mut templates = self.all()?;
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        if let Some(name) = changes.name {
            template.name = name;
        }
        if let Some(data) = changes.data {
            template.data = data;
        }
        if let Some(layout) = changes.layout {
            template.layout = Some(layout);
        }
        template.updated_at = Some(timestamp_now());

        let updated = template.clone();
        write_collection(&*self.store, TEMPLATES_KEY, &templates)?;
        Ok(updated)
    }

    /// Delete the template `id`. Deleting a missing id is a no-op.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut templates = self.all()?;
        let before = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() != before {
            write_collection(&*self.store, TEMPLATES_KEY, &templates)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<Template>> {
        Ok(self.all()?.into_iter().find(|t| t.id == id))
    }

    /// Remove every template.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(TEMPLATES_KEY)
    }
}

/// A gallery category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

/// A built-in starting point for a design.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub layout: Layout,
}

/// Gallery categories, starting with the catch-all `all`.
pub fn template_categories() -> Vec<TemplateCategory> {
    vec![
        TemplateCategory { id: "all", name: "All Templates", color: "gray" },
        TemplateCategory { id: "reimbursement", name: "Reimbursement", color: "blue" },
        TemplateCategory { id: "healthcare", name: "Healthcare", color: "green" },
        TemplateCategory { id: "benefits", name: "Benefits", color: "purple" },
        TemplateCategory { id: "business", name: "Business", color: "indigo" },
        TemplateCategory { id: "personal", name: "Personal", color: "pink" },
        TemplateCategory { id: "payroll", name: "Payroll", color: "yellow" },
    ]
}

fn layout_of(offsets: &[(ElementId, f64, f64)]) -> Layout {
    let mut layout = Layout::defaults();
    for &(id, x, y) in offsets {
        layout.set(id, Point::new(x, y));
    }
    layout
}

/// The built-in template gallery.
pub fn base_templates() -> Vec<BaseTemplate> {
    vec![
        BaseTemplate {
            id: "standard-reimbursement",
            name: "Standard Reimbursement",
            category: "reimbursement",
            description: "Check with a claims stub for expense reimbursements",
            layout: Layout::defaults(),
        },
        BaseTemplate {
            id: "medical-claim",
            name: "Medical Claim",
            category: "healthcare",
            description: "Participant details up front for healthcare claim payouts",
            layout: layout_of(&[
                (ElementId::ParticipantInfo, 0.0, -20.0),
                (ElementId::ReimbursementType, 0.0, 10.0),
            ]),
        },
        BaseTemplate {
            id: "benefits-payout",
            name: "Benefits Payout",
            category: "benefits",
            description: "Balances table moved up for benefit account statements",
            layout: layout_of(&[
                (ElementId::BalancesTable, 0.0, -40.0),
                (ElementId::ClaimsTable, 0.0, 40.0),
            ]),
        },
        BaseTemplate {
            id: "business-voucher",
            name: "Business Voucher",
            category: "business",
            description: "Company block and logo side by side",
            layout: layout_of(&[
                (ElementId::CompanyInfo, 20.0, 0.0),
                (ElementId::Logo, 10.0, 10.0),
            ]),
        },
        BaseTemplate {
            id: "personal-check",
            name: "Personal Check",
            category: "personal",
            description: "Personal check with the date and number pulled inward",
            layout: layout_of(&[
                (ElementId::Date, -30.0, 0.0),
                (ElementId::CheckNumber, -30.0, 0.0),
            ]),
        },
        BaseTemplate {
            id: "payroll-stub",
            name: "Payroll Stub",
            category: "payroll",
            description: "Payroll check with the stub participant block widened",
            layout: layout_of(&[
                (ElementId::StubParticipant, 0.0, -10.0),
                (ElementId::Signature, -20.0, 0.0),
            ]),
        },
    ]
}

/// Templates belonging to `category`; `"all"` keeps every template.
pub fn filter_by_category(templates: &[BaseTemplate], category: &str) -> Vec<BaseTemplate> {
    templates
        .iter()
        .filter(|t| category == "all" || t.category == category)
        .cloned()
        .collect()
}
