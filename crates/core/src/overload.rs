//! Display names for test cases: constructor/destructor labels plus
//! `_overload_<k>` suffixes for methods that share a name.

use crate::types::{MethodRecord, NOT_FOUND};

/// Compute one display name per record, index-aligned with `methods`.
///
/// - a name equal to `class_name` becomes `Constructor`, a name starting with
///   `~` becomes `Destructor`, anything else keeps its plain name;
/// - when several records share a plain name, each gets `_overload_<k>` where
///   `k` is the 1-based position of the first record in that set carrying the
///   same signature text. Byte-identical signatures therefore share a `k`.
pub fn display_names(class_name: &str, methods: &[MethodRecord]) -> Vec<String> {
    methods
        .iter()
        .map(|method| {
            let mut display = base_name(class_name, method);

            let same_name: Vec<&MethodRecord> =
                methods.iter().filter(|m| m.name == method.name).collect();
            if same_name.len() > 1 {
                let k = same_name
                    .iter()
                    .position(|m| m.signature == method.signature)
                    .map_or(1, |i| i + 1);
                display.push_str(&format!("_overload_{k}"));
            }
            display
        })
        .collect()
}

fn base_name(class_name: &str, method: &MethodRecord) -> String {
    match method.name.as_deref() {
        Some(name) if name == class_name => "Constructor".to_string(),
        Some(name) if name.starts_with('~') => "Destructor".to_string(),
        Some(name) if !name.is_empty() => name.to_string(),
        _ => NOT_FOUND.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, signature: &str) -> MethodRecord {
        MethodRecord { name: Some(name.into()), signature: Some(signature.into()) }
    }

    #[test]
    fn test_overloads_numbered_in_appearance_order() {
        let methods = vec![
            rec("Create", "Item &Create ( Ks ... args )"),
            rec("Create", "Item &Create ( const AspectFactory &factory, Ks ... args )"),
            rec("Destroy", "void Destroy ( Item &item )"),
        ];
        assert_eq!(
            display_names("DataStore", &methods),
            vec!["Create_overload_1", "Create_overload_2", "Destroy"]
        );
    }

    #[test]
    fn test_constructor_and_destructor_labels() {
        let methods = vec![rec("Widget", "Widget()"), rec("~Widget", "virtual ~Widget()")];
        assert_eq!(display_names("Widget", &methods), vec!["Constructor", "Destructor"]);
    }

    #[test]
    fn test_constructor_overloads_are_numbered() {
        let methods = vec![rec("Widget", "Widget()"), rec("Widget", "Widget(int size)")];
        assert_eq!(
            display_names("Widget", &methods),
            vec!["Constructor_overload_1", "Constructor_overload_2"]
        );
    }

    #[test]
    fn test_name_containing_class_name_is_not_a_constructor() {
        let methods = vec![rec("WidgetCount", "int WidgetCount()")];
        assert_eq!(display_names("Widget", &methods), vec!["WidgetCount"]);
    }

    #[test]
    fn test_identical_signatures_share_k() {
        let methods = vec![rec("Reset", "void Reset()"), rec("Reset", "void Reset()")];
        assert_eq!(
            display_names("Widget", &methods),
            vec!["Reset_overload_1", "Reset_overload_1"]
        );
    }

    #[test]
    fn test_missing_name_renders_placeholder() {
        let methods = vec![MethodRecord { name: None, signature: Some("int operator+(int rhs)".into()) }];
        assert_eq!(display_names("Widget", &methods), vec!["not found"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(display_names("Widget", &[]).is_empty());
    }
}
