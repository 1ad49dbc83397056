//! Profile fields a binding may reference

use card_model::{DataContext, QuickLink};
use serde::{Deserialize, Serialize};

/// Separator used whenever a list-valued field is shown as one string.
///
/// Applies to every list field (`interests`, `quickLinks`) at every call site.
pub const LIST_SEPARATOR: &str = ", ";

/// A known [`DataContext`] key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FullName,
    FirstName,
    LastName,
    Role,
    CompanyName,
    CompanyWebsite,
    CompanyLogo,
    ProfileImage,
    Tagline,
    Bio,
    Email,
    Phone,
    Interests,
    CtaText,
    QuickLinks,
}

impl ProfileField {
    /// Every field, in binding picker order
    pub const ALL: [ProfileField; 15] = [
        Self::FullName,
        Self::FirstName,
        Self::LastName,
        Self::Role,
        Self::CompanyName,
        Self::CompanyWebsite,
        Self::CompanyLogo,
        Self::ProfileImage,
        Self::Tagline,
        Self::Bio,
        Self::Email,
        Self::Phone,
        Self::Interests,
        Self::CtaText,
        Self::QuickLinks,
    ];

    /// The identifier used inside `{{...}}`
    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Role => "role",
            Self::CompanyName => "companyName",
            Self::CompanyWebsite => "companyWebsite",
            Self::CompanyLogo => "companyLogo",
            Self::ProfileImage => "profileImage",
            Self::Tagline => "tagline",
            Self::Bio => "bio",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Interests => "interests",
            Self::CtaText => "ctaText",
            Self::QuickLinks => "quickLinks",
        }
    }

    /// Look up a field by its identifier (case-sensitive)
    pub fn from_key(key: &str) -> Option<ProfileField> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Human readable label for binding pickers
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Role => "Role",
            Self::CompanyName => "Company",
            Self::CompanyWebsite => "Company Website",
            Self::CompanyLogo => "Company Logo",
            Self::ProfileImage => "Profile Photo",
            Self::Tagline => "Tagline",
            Self::Bio => "Bio",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Interests => "Interests",
            Self::CtaText => "Call to Action",
            Self::QuickLinks => "Quick Links",
        }
    }

    /// Whether the field holds an image source rather than display text
    pub fn is_media(&self) -> bool {
        matches!(self, Self::CompanyLogo | Self::ProfileImage)
    }

    /// Read this field out of a context
    pub fn value_in(&self, ctx: &DataContext) -> FieldValue {
        match self {
            Self::FullName => FieldValue::Text(ctx.full_name.clone()),
            Self::FirstName => FieldValue::Text(ctx.first_name.clone()),
            Self::LastName => FieldValue::Text(ctx.last_name.clone()),
            Self::Role => FieldValue::Text(ctx.role.clone()),
            Self::CompanyName => FieldValue::Text(ctx.company_name.clone()),
            Self::CompanyWebsite => FieldValue::Text(ctx.company_website.clone()),
            Self::CompanyLogo => FieldValue::Text(ctx.company_logo.clone()),
            Self::ProfileImage => FieldValue::Text(ctx.profile_image.clone()),
            Self::Tagline => FieldValue::Text(ctx.tagline.clone()),
            Self::Bio => FieldValue::Text(ctx.bio.clone()),
            Self::Email => FieldValue::Text(ctx.email.clone()),
            Self::Phone => FieldValue::Text(ctx.phone.clone()),
            Self::Interests => FieldValue::List(ctx.interests.clone()),
            Self::CtaText => FieldValue::Text(ctx.cta_text.clone()),
            Self::QuickLinks => FieldValue::Links(ctx.quick_links.clone()),
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A value read from the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Links(Vec<QuickLink>),
}

impl FieldValue {
    /// Whether the value counts as "not provided"
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
            FieldValue::Links(links) => links.iter().all(|l| l.label.trim().is_empty()),
        }
    }

    /// Convert to the single display string used by every renderer
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => join_non_empty(items.iter().map(String::as_str)),
            FieldValue::Links(links) => join_non_empty(links.iter().map(|l| l.label.as_str())),
        }
    }
}

fn join_non_empty<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// An entry for a binding picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingOption {
    pub field: ProfileField,
    pub label: &'static str,
    /// The binding string to store on an element, e.g. `{{fullName}}`
    pub binding: String,
}

/// All bindable fields, optionally limited to media sources or to text
pub fn available_bindings(media: Option<bool>) -> Vec<BindingOption> {
    ProfileField::ALL
        .iter()
        .filter(|f| media.map_or(true, |m| f.is_media() == m))
        .map(|f| BindingOption {
            field: *f,
            label: f.label(),
            binding: format!("{{{{{}}}}}", f.key()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::from_key(field.key()), Some(field));
        }
        assert_eq!(ProfileField::from_key("FullName"), None);
    }

    #[test]
    fn test_list_display_uses_single_separator() {
        let value = FieldValue::List(vec!["hiking".into(), " ".into(), "chess".into()]);
        assert_eq!(value.to_display_string(), "hiking, chess");
    }

    #[test]
    fn test_links_display_labels() {
        let value = FieldValue::Links(vec![
            QuickLink::new("Blog", "https://example.com/blog"),
            QuickLink::new("GitHub", "https://github.com/example"),
        ]);
        assert_eq!(value.to_display_string(), "Blog, GitHub");
    }

    #[test]
    fn test_empty_detection() {
        assert!(FieldValue::Text("  ".into()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Text("x".into()).is_empty());
    }

    #[test]
    fn test_available_bindings() {
        let media = available_bindings(Some(true));
        assert_eq!(media.len(), 2);
        assert!(media.iter().any(|o| o.binding == "{{profileImage}}"));

        assert_eq!(available_bindings(None).len(), ProfileField::ALL.len());
        assert_eq!(available_bindings(Some(false)).len(), ProfileField::ALL.len() - 2);
    }
}
