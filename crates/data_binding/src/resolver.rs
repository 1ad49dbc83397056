//! Binding resolution
//!
//! Shared by the editing surface and the static renderer so both show exactly
//! the same string for the same element and context.

use crate::{Binding, BindingError};
use card_model::{CardElement, DataContext};

/// Resolve an element's display value.
///
/// - no binding, no content: `""`
/// - no binding: the literal `content`
/// - binding: the bound field's display string, `""` when the field is empty
///
/// A blank binding string counts as no binding. A malformed binding or an
/// unknown field resolves to `""` and logs a warning; this never fails.
pub fn resolve(binding: Option<&str>, content: Option<&str>, ctx: &DataContext) -> String {
    let binding = binding.filter(|b| !b.trim().is_empty());

    let Some(raw) = binding else {
        return content.unwrap_or_default().to_string();
    };

    match Binding::parse(raw) {
        Ok(binding) => {
            let value = binding.field.value_in(ctx);
            if value.is_empty() {
                String::new()
            } else {
                value.to_display_string()
            }
        }
        Err(BindingError::UnknownField(field)) => {
            tracing::warn!("Binding {:?} references unknown field {:?}", raw, field);
            String::new()
        }
        Err(err) => {
            tracing::warn!("Ignoring binding: {}", err);
            String::new()
        }
    }
}

/// Resolve an element's binding or content
pub fn resolve_element(element: &CardElement, ctx: &DataContext) -> String {
    resolve(element.data_binding.as_deref(), element.content.as_deref(), ctx)
}

/// Resolve an element to a media source, `None` when there is nothing to show
pub fn resolve_media(element: &CardElement, ctx: &DataContext) -> Option<String> {
    let source = resolve_element(element, ctx);
    let source = source.trim();
    if source.is_empty() {
        None
    } else {
        Some(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LIST_SEPARATOR;
    use card_model::{ElementKind, Geometry, QuickLink};
    use proptest::prelude::*;

    fn ctx() -> DataContext {
        DataContext::new()
            .with_full_name("Jane Doe")
            .with_interests(vec!["climbing".into(), "jazz".into()])
            .with_quick_link(QuickLink::new("Portfolio", "https://jane.example"))
    }

    #[test]
    fn test_bound_full_name() {
        assert_eq!(resolve(Some("{{fullName}}"), None, &ctx()), "Jane Doe");
    }

    #[test]
    fn test_empty_field_resolves_empty() {
        let mut ctx = ctx();
        ctx.full_name = String::new();
        assert_eq!(resolve(Some("{{fullName}}"), None, &ctx), "");
    }

    #[test]
    fn test_absent_binding_uses_content() {
        assert_eq!(resolve(None, Some("Call me"), &ctx()), "Call me");
        assert_eq!(resolve(None, None, &ctx()), "");
        assert_eq!(resolve(Some("  "), Some("fallback"), &ctx()), "fallback");
    }

    #[test]
    fn test_binding_takes_precedence_over_content() {
        assert_eq!(resolve(Some("{{fullName}}"), Some("literal"), &ctx()), "Jane Doe");
        // Even an empty bound value wins over content
        assert_eq!(resolve(Some("{{role}}"), Some("literal"), &ctx()), "");
    }

    #[test]
    fn test_bad_bindings_resolve_empty() {
        assert_eq!(resolve(Some("{{unknown}}"), Some("x"), &ctx()), "");
        assert_eq!(resolve(Some("{{fullName}} {{role}}"), None, &ctx()), "");
    }

    #[test]
    fn test_lists_join_with_separator() {
        assert_eq!(
            resolve(Some("{{interests}}"), None, &ctx()),
            format!("climbing{}jazz", LIST_SEPARATOR)
        );
        assert_eq!(resolve(Some("{{quickLinks}}"), None, &ctx()), "Portfolio");
    }

    #[test]
    fn test_resolve_media() {
        let image = CardElement::new("p", ElementKind::Image, Geometry::default())
            .with_binding("{{profileImage}}");
        assert_eq!(resolve_media(&image, &ctx()), None);

        let ctx = ctx().with_profile_image("https://cdn.example/jane.png");
        assert_eq!(
            resolve_media(&image, &ctx).as_deref(),
            Some("https://cdn.example/jane.png")
        );
    }

    proptest! {
        #[test]
        fn prop_resolve_is_pure(
            binding in ".{0,24}",
            content in proptest::option::of(".{0,12}"),
            name in ".{0,12}",
        ) {
            let ctx = DataContext::new().with_full_name(name);
            let first = resolve(Some(&binding), content.as_deref(), &ctx);
            let second = resolve(Some(&binding), content.as_deref(), &ctx);
            prop_assert_eq!(first, second);
        }
    }
}
