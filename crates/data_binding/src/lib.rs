//! Data Binding
//!
//! This crate resolves element bindings against a profile [`DataContext`].
//!
//! # Features
//!
//! - Strict single-placeholder grammar: `{{identifier}}`, nothing else
//! - Catalogue of the profile fields a binding may reference
//! - One display rule for list-valued fields ([`LIST_SEPARATOR`])
//! - A total resolver that never fails: bad bindings resolve to `""`
//!
//! # Example
//!
//! ```rust
//! use card_model::DataContext;
//! use data_binding::resolve;
//!
//! let ctx = DataContext::new().with_full_name("Jane Doe");
//!
//! assert_eq!(resolve(Some("{{fullName}}"), None, &ctx), "Jane Doe");
//! assert_eq!(resolve(None, Some("Hello"), &ctx), "Hello");
//! assert_eq!(resolve(Some("{{nope}}"), Some("Hello"), &ctx), "");
//! ```
//!
//! [`DataContext`]: card_model::DataContext

mod binding;
mod error;
mod field;
mod resolver;

pub use binding::Binding;
pub use error::{BindingError, Result};
pub use field::{available_bindings, BindingOption, FieldValue, ProfileField, LIST_SEPARATOR};
pub use resolver::{resolve, resolve_element, resolve_media};
