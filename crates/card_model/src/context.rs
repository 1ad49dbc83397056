//! Profile data snapshot that element bindings resolve against

use serde::{Deserialize, Serialize};

/// A labelled link shown on a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLink {
    pub label: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl QuickLink {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Read-only snapshot of profile fields supplied by the profile provider.
///
/// Empty strings and empty lists mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataContext {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub company_name: String,
    pub company_website: String,
    pub company_logo: String,
    pub profile_image: String,
    pub tagline: String,
    pub bio: String,
    pub email: String,
    pub phone: String,
    pub interests: Vec<String>,
    pub cta_text: String,
    pub quick_links: Vec<QuickLink>,
}

impl DataContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full name, deriving first and last name when they are empty
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        let mut parts = self.full_name.split_whitespace();
        if self.first_name.is_empty() {
            self.first_name = parts.next().unwrap_or_default().to_string();
        }
        if self.last_name.is_empty() {
            self.last_name = parts.collect::<Vec<_>>().join(" ");
        }
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_company(mut self, name: impl Into<String>, website: impl Into<String>) -> Self {
        self.company_name = name.into();
        self.company_website = website.into();
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image = url.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_interests(mut self, interests: Vec<String>) -> Self {
        self.interests = interests;
        self
    }

    pub fn with_quick_link(mut self, link: QuickLink) -> Self {
        self.quick_links.push(link);
        self
    }
}
