//! Template store service
//!
//! Holds the canonical template collection in a watch channel. Reads borrow
//! the current snapshot; writes clone it, apply the change, swap the new
//! snapshot in and then save it through the persistence port.

use crate::{KeyValueStore, MemoryStore, Result, StoreConfig, StoreError, TemplateSnapshot};
use card_model::builtin::{default_template, is_builtin_id};
use card_model::{
    CardElement, CardSide, CardTemplate, Face, NewTemplate, TemplateCategory, TemplateId,
    TemplatePatch,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// Suffix appended to the name of a duplicated template
pub const COPY_SUFFIX: &str = " (Copy)";

/// The template model store
pub struct TemplateStore {
    config: StoreConfig,
    persistence: Arc<dyn KeyValueStore>,
    state: watch::Sender<Arc<TemplateSnapshot>>,
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("config", &self.config)
            .field("templates", &self.state.borrow().templates.len())
            .finish()
    }
}

impl TemplateStore {
    /// Open a store, loading any previously saved state.
    ///
    /// Missing or unreadable state falls back to the built-in templates.
    /// Built-ins missing from saved state are re-registered.
    pub fn open(config: StoreConfig, persistence: Arc<dyn KeyValueStore>) -> Self {
        let mut snapshot = load_snapshot(persistence.as_ref(), &config.storage_key);
        let restored = snapshot.ensure_builtins();
        if restored > 0 {
            tracing::debug!("Re-registered {} built-in templates", restored);
        }
        snapshot.prune_dangling_ids();

        let (state, _) = watch::channel(Arc::new(snapshot));
        Self {
            config,
            persistence,
            state,
        }
    }

    /// A store backed by memory only, with default settings
    pub fn in_memory() -> Self {
        Self::open(StoreConfig::default(), Arc::new(MemoryStore::new()))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<TemplateSnapshot> {
        self.state.borrow().clone()
    }

    /// Observe every committed snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<TemplateSnapshot>> {
        self.state.subscribe()
    }

    /// All templates, built-ins first
    pub fn list_templates(&self) -> Vec<CardTemplate> {
        self.snapshot().templates.clone()
    }

    pub fn get_template(&self, id: &TemplateId) -> Option<CardTemplate> {
        self.snapshot().get(id).cloned()
    }

    pub fn template_exists(&self, id: &TemplateId) -> bool {
        self.snapshot().contains(id)
    }

    /// Look up a template, falling back to the configured default and then
    /// to the built-in default
    pub fn template_or_default(&self, id: &TemplateId) -> CardTemplate {
        let snapshot = self.snapshot();
        if let Some(template) = snapshot.get(id) {
            return template.clone();
        }

        tracing::warn!("Template {} not found, using default template", id);
        snapshot
            .get(&self.config.default_template_id)
            .cloned()
            .unwrap_or_else(default_template)
    }

    /// Create a custom template
    pub fn create_template(&self, new: NewTemplate) -> Result<CardTemplate> {
        let template = new.build();
        template.validate()?;

        self.write(|snapshot| {
            snapshot.templates.push(template.clone());
            Ok(template)
        })
    }

    /// Apply a partial update
    pub fn update_template(&self, id: &TemplateId, patch: TemplatePatch) -> Result<CardTemplate> {
        self.write(|snapshot| {
            let template = snapshot
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            patch.apply_to(template);
            template.validate()?;
            Ok(template.clone())
        })
    }

    /// Copy a template under a fresh id. The copy is always a custom template.
    pub fn duplicate_template(&self, id: &TemplateId) -> Result<CardTemplate> {
        self.write(|snapshot| {
            let source = snapshot
                .get(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            let now = Utc::now();
            let mut copy = source.clone();
            copy.id = TemplateId::generate();
            copy.name = format!("{}{}", source.name, COPY_SUFFIX);
            copy.is_built_in = false;
            copy.created_at = now;
            copy.updated_at = now;

            snapshot.templates.push(copy.clone());
            Ok(copy)
        })
    }

    /// Delete a custom template. Built-ins are rejected and left untouched.
    pub fn delete_template(&self, id: &TemplateId) -> Result<()> {
        self.write(|snapshot| {
            let template = snapshot
                .get(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            if template.is_built_in || is_builtin_id(id) {
                return Err(StoreError::ImmutableTemplate(id.to_string()));
            }

            snapshot.templates.retain(|t| &t.id != id);
            snapshot.prune_dangling_ids();
            Ok(())
        })
    }

    pub fn set_active_template(&self, id: &TemplateId) -> Result<()> {
        self.write(|snapshot| {
            if !snapshot.contains(id) {
                return Err(StoreError::NotFound(id.to_string()));
            }
            snapshot.active_template_id = Some(id.clone());
            Ok(())
        })
    }

    /// Track the template highlighted in a picker, independent of the active one
    pub fn select_template(&self, id: Option<&TemplateId>) -> Result<()> {
        self.write(|snapshot| {
            if let Some(id) = id {
                if !snapshot.contains(id) {
                    return Err(StoreError::NotFound(id.to_string()));
                }
            }
            snapshot.selected_template_id = id.cloned();
            Ok(())
        })
    }

    pub fn active_template_id(&self) -> Option<TemplateId> {
        self.snapshot().active_template_id.clone()
    }

    pub fn selected_template_id(&self) -> Option<TemplateId> {
        self.snapshot().selected_template_id.clone()
    }

    /// The active template, or the default template when none is active
    pub fn active_template(&self) -> CardTemplate {
        match self.active_template_id() {
            Some(id) => self.template_or_default(&id),
            None => self.template_or_default(&self.config.default_template_id),
        }
    }

    /// Case-insensitive search over names and descriptions
    pub fn search_templates(&self, query: &str) -> Vec<CardTemplate> {
        let query = query.trim().to_lowercase();
        self.snapshot()
            .templates
            .iter()
            .filter(|t| {
                query.is_empty()
                    || t.name.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn templates_in_category(&self, category: TemplateCategory) -> Vec<CardTemplate> {
        self.snapshot()
            .templates
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Replace one side's entire element array in a single write
    pub fn replace_side_elements(
        &self,
        id: &TemplateId,
        face: Face,
        elements: Vec<CardElement>,
    ) -> Result<()> {
        let count = elements.len();
        self.write(|snapshot| {
            let template = snapshot
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            let side = template.side_mut(face);
            side.elements = elements;
            side.validate()?;
            template.touch();
            Ok(())
        })?;

        tracing::debug!("Committed {} elements to {} ({})", count, id, face);
        Ok(())
    }

    pub fn set_side_background(
        &self,
        id: &TemplateId,
        face: Face,
        color: impl Into<String>,
        image: Option<String>,
    ) -> Result<()> {
        let color = color.into();
        self.write(|snapshot| {
            let template = snapshot
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            let side: &mut CardSide = template.side_mut(face);
            side.background_color = color;
            side.background_image = image;
            template.touch();
            Ok(())
        })
    }

    /// Serialize one template as pretty JSON
    pub fn export_template_json(&self, id: &TemplateId) -> Result<String> {
        let template = self
            .get_template(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(serde_json::to_string_pretty(&template)?)
    }

    /// Import a template from JSON.
    ///
    /// The import is always a custom template. A colliding id is replaced
    /// with a fresh one.
    pub fn import_template_json(&self, json: &str) -> Result<CardTemplate> {
        let mut template: CardTemplate = serde_json::from_str(json)?;
        template.is_built_in = false;
        template.validate()?;

        self.write(|snapshot| {
            if snapshot.contains(&template.id) || is_builtin_id(&template.id) {
                template.id = TemplateId::generate();
            }
            template.touch();
            snapshot.templates.push(template.clone());
            Ok(template)
        })
    }

    /// Save the current snapshot through the persistence port
    pub fn save(&self) -> Result<()> {
        let snapshot = self.snapshot();
        let json = serde_json::to_string(snapshot.as_ref())?;

        self.persistence
            .save(&self.config.storage_key, &json)
            .map_err(|e| {
                tracing::warn!("Failed to persist templates: {}", e);
                StoreError::Persistence(e.to_string())
            })
    }

    /// Apply `op` to a copy of the current snapshot and publish it on success.
    ///
    /// A failed op leaves the published snapshot untouched and notifies no one.
    /// A failed save leaves the new snapshot published and reports
    /// [`StoreError::Persistence`].
    fn write<T>(&self, op: impl FnOnce(&mut TemplateSnapshot) -> Result<T>) -> Result<T> {
        let mut outcome = None;

        self.state.send_if_modified(|current| {
            let mut next = (**current).clone();
            match op(&mut next) {
                Ok(value) => {
                    *current = Arc::new(next);
                    outcome = Some(Ok(value));
                    true
                }
                Err(e) => {
                    outcome = Some(Err(e));
                    false
                }
            }
        });

        let value = outcome
            .unwrap_or_else(|| Err(StoreError::Persistence("write was not applied".into())))?;

        if self.config.persist_on_write {
            self.save()?;
        }
        Ok(value)
    }
}

fn load_snapshot(persistence: &dyn KeyValueStore, key: &str) -> TemplateSnapshot {
    match persistence.load(key) {
        Ok(Some(json)) => match serde_json::from_str::<TemplateSnapshot>(&json) {
            Ok(snapshot) => {
                tracing::debug!("Loaded {} templates from {}", snapshot.templates.len(), key);
                snapshot
            }
            Err(e) => {
                tracing::warn!("Failed to parse saved templates, using built-ins: {}", e);
                TemplateSnapshot::with_builtins()
            }
        },
        Ok(None) => TemplateSnapshot::with_builtins(),
        Err(e) => {
            tracing::warn!("Failed to load saved templates, using built-ins: {}", e);
            TemplateSnapshot::with_builtins()
        }
    }
}
