//! Persisted store state

use card_model::builtin::builtin_templates;
use card_model::{CardTemplate, TemplateId};
use serde::{Deserialize, Serialize};

/// The whole template collection plus the active/selected ids.
///
/// This is exactly what gets saved under the storage key:
/// `{ "templates": [...], "activeTemplateId": ..., "selectedTemplateId": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSnapshot {
    #[serde(default)]
    pub templates: Vec<CardTemplate>,
    #[serde(default)]
    pub active_template_id: Option<TemplateId>,
    #[serde(default)]
    pub selected_template_id: Option<TemplateId>,
}

impl TemplateSnapshot {
    /// A fresh snapshot holding only the built-in templates
    pub fn with_builtins() -> Self {
        Self {
            templates: builtin_templates(),
            active_template_id: None,
            selected_template_id: None,
        }
    }

    pub fn get(&self, id: &TemplateId) -> Option<&CardTemplate> {
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TemplateId) -> Option<&mut CardTemplate> {
        self.templates.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.get(id).is_some()
    }

    /// Re-register any built-in template missing from the collection.
    ///
    /// Persisted copies of built-ins are kept as they are, since they may
    /// carry committed edits. Returns the number of templates added.
    pub fn ensure_builtins(&mut self) -> usize {
        let missing: Vec<CardTemplate> = builtin_templates()
            .into_iter()
            .filter(|b| !self.contains(&b.id))
            .collect();
        let added = missing.len();

        // Built-ins lead the list, in registry order
        for (offset, template) in missing.into_iter().enumerate() {
            let at = offset.min(self.templates.len());
            self.templates.insert(at, template);
        }
        added
    }

    /// Drop active/selected ids that no longer point at a template
    pub fn prune_dangling_ids(&mut self) {
        if let Some(id) = &self.active_template_id {
            if !self.contains(id) {
                self.active_template_id = None;
            }
        }
        if let Some(id) = &self.selected_template_id {
            if !self.contains(id) {
                self.selected_template_id = None;
            }
        }
    }
}

impl Default for TemplateSnapshot {
    fn default() -> Self {
        Self::with_builtins()
    }
}
