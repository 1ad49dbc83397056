//! Card templates
//!
//! A template is a named, persisted pair of sides. Built-in templates ship with
//! the application and cannot be deleted; custom templates are created by the
//! user directly or by duplicating another template.

use crate::{CardSide, Face, Result, TemplateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Template categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Professional,
    Creative,
    Minimal,
    Custom,
}

impl Default for TemplateCategory {
    fn default() -> Self {
        Self::Custom
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Professional => write!(f, "professional"),
            Self::Creative => write!(f, "creative"),
            Self::Minimal => write!(f, "minimal"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl From<&str> for TemplateCategory {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "professional" => Self::Professional,
            "creative" => Self::Creative,
            "minimal" => Self::Minimal,
            _ => Self::Custom,
        }
    }
}

/// A named two-sided card layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_built_in: bool,
    #[serde(default)]
    pub category: TemplateCategory,
    pub front: CardSide,
    pub back: CardSide,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardTemplate {
    /// Create a new custom template with empty white sides
    pub fn new(id: impl Into<TemplateId>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_built_in: false,
            category: TemplateCategory::Custom,
            front: CardSide::default(),
            back: CardSide::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: TemplateCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_front(mut self, front: CardSide) -> Self {
        self.front = front;
        self
    }

    pub fn with_back(mut self, back: CardSide) -> Self {
        self.back = back;
        self
    }

    /// Borrow one side
    pub fn side(&self, face: Face) -> &CardSide {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
        }
    }

    /// Mutably borrow one side
    pub fn side_mut(&mut self, face: Face) -> &mut CardSide {
        match face {
            Face::Front => &mut self.front,
            Face::Back => &mut self.back,
        }
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate both sides
    pub fn validate(&self) -> Result<()> {
        self.front.validate()?;
        self.back.validate()
    }
}

/// Fields supplied when creating a template; anything omitted gets a default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<TemplateCategory>,
    #[serde(default)]
    pub front: Option<CardSide>,
    #[serde(default)]
    pub back: Option<CardSide>,
}

impl NewTemplate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: TemplateCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_front(mut self, front: CardSide) -> Self {
        self.front = Some(front);
        self
    }

    pub fn with_back(mut self, back: CardSide) -> Self {
        self.back = Some(back);
        self
    }

    /// Build a custom template with a fresh id
    pub fn build(self) -> CardTemplate {
        let mut template = CardTemplate::new(
            TemplateId::generate(),
            self.name.unwrap_or_else(|| "Untitled Card".to_string()),
        );
        template.description = self.description.unwrap_or_default();
        template.category = self.category.unwrap_or_default();
        if let Some(front) = self.front {
            template.front = front;
        }
        if let Some(back) = self.back {
            template.back = back;
        }
        template
    }
}

/// A partial update of a template's editable fields.
///
/// Identity, built-in status and timestamps cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<TemplateCategory>,
    #[serde(default)]
    pub front: Option<CardSide>,
    #[serde(default)]
    pub back: Option<CardSide>,
}

impl TemplatePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn side(face: Face, side: CardSide) -> Self {
        match face {
            Face::Front => Self {
                front: Some(side),
                ..Default::default()
            },
            Face::Back => Self {
                back: Some(side),
                ..Default::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TemplatePatch::default()
    }

    /// Apply the patch in place and bump `updated_at`
    pub fn apply_to(self, template: &mut CardTemplate) {
        if let Some(name) = self.name {
            template.name = name;
        }
        if let Some(description) = self.description {
            template.description = description;
        }
        if let Some(category) = self.category {
            template.category = category;
        }
        if let Some(front) = self.front {
            template.front = front;
        }
        if let Some(back) = self.back {
            template.back = back;
        }
        template.touch();
    }
}
