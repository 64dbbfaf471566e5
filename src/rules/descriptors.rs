//! Descriptor table of every shipped rule.

use crate::diagnostics::{Category, DiagnosticDescriptor, Severity};

const fn rule(
    id: &'static str,
    title: &'static str,
    message_format: &'static str,
    category: Category,
    default_severity: Severity,
    description: &'static str,
) -> DiagnosticDescriptor {
    DiagnosticDescriptor {
        id,
        title,
        message_format,
        category,
        default_severity,
        enabled_by_default: true,
        description,
    }
}

// ============================================================================
// DEPENDENCY PROPERTIES
// ============================================================================

pub const WPF0001: DiagnosticDescriptor = rule(
    "WPF0001",
    "Backing field for a DependencyProperty should match registered name.",
    "Field '{0}' that is backing field for the DependencyProperty registered as '{1}' must be named '{1}Property'",
    Category::DependencyProperty,
    Severity::Warning,
    "A dependency property's backing field should be named with the name it is registered with suffixed by 'Property'.",
);

pub const WPF0002: DiagnosticDescriptor = rule(
    "WPF0002",
    "Backing field for a DependencyPropertyKey should match registered name.",
    "Field '{0}' that is backing field for the DependencyPropertyKey registered as '{1}' must be named '{1}PropertyKey'",
    Category::DependencyProperty,
    Severity::Warning,
    "A DependencyPropertyKey's backing field must be named with the name it is registered with suffixed by 'PropertyKey'.",
);

pub const WPF0003: DiagnosticDescriptor = rule(
    "WPF0003",
    "CLR property for a DependencyProperty should match registered name.",
    "Property '{0}' must be named '{1}'",
    Category::DependencyProperty,
    Severity::Warning,
    "A CLR property accessor for a DependencyProperty must have the same name as the DependencyProperty is registered with.",
);

pub const WPF0004: DiagnosticDescriptor = rule(
    "WPF0004",
    "CLR method for a DependencyProperty must match registered name.",
    "Method '{0}' must be named '{1}'",
    Category::DependencyProperty,
    Severity::Warning,
    "CLR methods for accessing a DependencyProperty must have names matching the name the DependencyProperty is registered with.",
);

pub const WPF0005: DiagnosticDescriptor = rule(
    "WPF0005",
    "Name of PropertyChangedCallback should match registered name.",
    "Method '{0}' should be named '{1}'",
    Category::DependencyProperty,
    Severity::Warning,
    "Name of PropertyChangedCallback should match registered name.",
);

pub const WPF0006: DiagnosticDescriptor = rule(
    "WPF0006",
    "Name of CoerceValueCallback should match registered name.",
    "Method '{0}' should be named '{1}'",
    Category::DependencyProperty,
    Severity::Warning,
    "Name of CoerceValueCallback should match registered name.",
);

pub const WPF0007: DiagnosticDescriptor = rule(
    "WPF0007",
    "Name of ValidateValueCallback should match registered name.",
    "Method '{0}' should be named '{1}'",
    Category::DependencyProperty,
    Severity::Warning,
    "Name of ValidateValueCallback should match registered name.",
);

pub const WPF0010: DiagnosticDescriptor = rule(
    "WPF0010",
    "Default value type must match registered type.",
    "Default value for '{0}' must be of type {1}",
    Category::DependencyProperty,
    Severity::Error,
    "A DependencyProperty is registered with a type and a default value. The type of the default value must be the same as the registered type.",
);

pub const WPF0011: DiagnosticDescriptor = rule(
    "WPF0011",
    "Containing type should be used as registered owner.",
    "Register containing type: '{0}' as owner.",
    Category::DependencyProperty,
    Severity::Warning,
    "When registering a DependencyProperty register containing type as owner type.",
);

pub const WPF0014: DiagnosticDescriptor = rule(
    "WPF0014",
    "SetValue must use registered type.",
    "SetValue must use registered type {0}",
    Category::DependencyProperty,
    Severity::Error,
    "Use a type that matches registered type when setting the value of a DependencyProperty.",
);

pub const WPF0015: DiagnosticDescriptor = rule(
    "WPF0015",
    "Registered owner type must inherit DependencyObject.",
    "{0}",
    Category::DependencyProperty,
    Severity::Error,
    "When registering a DependencyProperty owner type must be a subclass of DependencyObject.",
);

pub const WPF0023: DiagnosticDescriptor = rule(
    "WPF0023",
    "The callback is trivial, convert to lambda.",
    "Convert to lambda",
    Category::DependencyProperty,
    Severity::Info,
    "The callback is trivial, convert to lambda for better locality.",
);

pub const WPF0031: DiagnosticDescriptor = rule(
    "WPF0031",
    "DependencyPropertyKey member must be declared before DependencyProperty member.",
    "DependencyPropertyKey member '{0}' must be declared before '{1}'",
    Category::DependencyProperty,
    Severity::Error,
    "DependencyPropertyKey member must be declared before DependencyProperty member.",
);

pub const WPF0036: DiagnosticDescriptor = rule(
    "WPF0036",
    "Avoid side effects in CLR accessors.",
    "Avoid side effects in CLR accessors.",
    Category::DependencyProperty,
    Severity::Warning,
    "Bindings do not call accessors when updating value. Use callbacks.",
);

pub const WPF0041: DiagnosticDescriptor = rule(
    "WPF0041",
    "Set mutable dependency properties using SetCurrentValue.",
    "Use SetCurrentValue({0}, {1})",
    Category::DependencyProperty,
    Severity::Warning,
    "Prefer setting mutable dependency properties using SetCurrentValue.",
);

pub const WPF0043: DiagnosticDescriptor = rule(
    "WPF0043",
    "Don't set DataContext using SetCurrentValue.",
    "Use SetValue instead of SetCurrentValue for DataContext",
    Category::DependencyProperty,
    Severity::Warning,
    "Set DataContext using SetValue.",
);

// ============================================================================
// XMLNS
// ============================================================================

pub const WPF0050: DiagnosticDescriptor = rule(
    "WPF0050",
    "XmlnsPrefix must map to the same url as XmlnsDefinition.",
    "There is no [{0}] mapping to '{1}'",
    Category::XmlnsDefinition,
    Severity::Error,
    "[XmlnsPrefix] must have a corresponding [XmlnsDefinition] mapping to the same url.",
);

pub const WPF0051: DiagnosticDescriptor = rule(
    "WPF0051",
    "XmlnsDefinition must map to existing namespace.",
    "[XmlnsDefinition] maps to '{0}' that does not exist.",
    Category::XmlnsDefinition,
    Severity::Error,
    "XmlnsDefinition must map to existing namespace.",
);

// ============================================================================
// CONVERTERS AND MARKUP EXTENSIONS
// ============================================================================

pub const WPF0070: DiagnosticDescriptor = rule(
    "WPF0070",
    "Add default field to converter.",
    "Add default field to converter.",
    Category::ValueConverter,
    Severity::Info,
    "Add default field to converter.",
);

pub const WPF0071: DiagnosticDescriptor = rule(
    "WPF0071",
    "Add ValueConversion attribute.",
    "Add ValueConversion attribute.",
    Category::ValueConverter,
    Severity::Info,
    "Add ValueConversion attribute.",
);

pub const WPF0072: DiagnosticDescriptor = rule(
    "WPF0072",
    "ValueConversion must use correct types.",
    "ValueConversion must use correct types. Expected: {0}",
    Category::ValueConverter,
    Severity::Warning,
    "ValueConversion must use correct types.",
);

pub const WPF0080: DiagnosticDescriptor = rule(
    "WPF0080",
    "Add MarkupExtensionReturnType attribute.",
    "Add MarkupExtensionReturnType attribute.",
    Category::MarkupExtension,
    Severity::Info,
    "Add MarkupExtensionReturnType attribute.",
);

pub const WPF0081: DiagnosticDescriptor = rule(
    "WPF0081",
    "MarkupExtensionReturnType must use correct return type.",
    "MarkupExtensionReturnType must use correct return type. Expected: {0}",
    Category::MarkupExtension,
    Severity::Error,
    "MarkupExtensionReturnType must use correct return type.",
);

pub const WPF0083: DiagnosticDescriptor = rule(
    "WPF0083",
    "Add [ConstructorArgument].",
    "Add [ConstructorArgument(\"{0}\")]",
    Category::MarkupExtension,
    Severity::Info,
    "Add [ConstructorArgument] for the property.",
);

pub const WPF0085: DiagnosticDescriptor = rule(
    "WPF0085",
    "Target of [XamlSetTypeConverter] should exist and have correct signature.",
    "Expected a method with signature void {0}(object, XamlSetTypeConverterEventArgs).",
    Category::MarkupExtension,
    Severity::Error,
    "Target of [XamlSetTypeConverter] should exist and have correct signature.",
);

// ============================================================================
// ROUTED EVENTS
// ============================================================================

pub const WPF0100: DiagnosticDescriptor = rule(
    "WPF0100",
    "Backing field for a RoutedEvent should match registered name.",
    "Field '{0}' that is backing field for the RoutedEvent registered as '{1}' must be named '{1}Event'",
    Category::RoutedEvent,
    Severity::Warning,
    "A routed event's backing field should be named with the name it is registered with suffixed by 'Event'.",
);

pub const WPF0102: DiagnosticDescriptor = rule(
    "WPF0102",
    "Name of the event should match registered name.",
    "Event '{0}' must be named '{1}'",
    Category::RoutedEvent,
    Severity::Error,
    "Name of the event should match registered name.",
);

pub const WPF0103: DiagnosticDescriptor = rule(
    "WPF0103",
    "Use same event in add and remove.",
    "Add uses: '{0}', remove uses: '{1}'.",
    Category::RoutedEvent,
    Severity::Warning,
    "Use same event in add and remove.",
);

pub const WPF0104: DiagnosticDescriptor = rule(
    "WPF0104",
    "Call AddHandler in add.",
    "Call AddHandler in add.",
    Category::RoutedEvent,
    Severity::Warning,
    "Call AddHandler in add.",
);

pub const WPF0105: DiagnosticDescriptor = rule(
    "WPF0105",
    "Call RemoveHandler in remove.",
    "Call RemoveHandler in remove.",
    Category::RoutedEvent,
    Severity::Warning,
    "Call RemoveHandler in remove.",
);

// ============================================================================
// TEMPLATE PARTS
// ============================================================================

pub const WPF0131: DiagnosticDescriptor = rule(
    "WPF0131",
    "Use correct [TemplatePart] type.",
    "Use correct [TemplatePart] type.",
    Category::TemplatePart,
    Severity::Warning,
    "Use correct [TemplatePart] type.",
);

/// Every descriptor, ordered by id
pub const ALL: &[&DiagnosticDescriptor] = &[
    &WPF0001, &WPF0002, &WPF0003, &WPF0004, &WPF0005, &WPF0006, &WPF0007, &WPF0010, &WPF0011,
    &WPF0014, &WPF0015, &WPF0023, &WPF0031, &WPF0036, &WPF0041, &WPF0043, &WPF0050, &WPF0051,
    &WPF0070, &WPF0071, &WPF0072, &WPF0080, &WPF0081, &WPF0083, &WPF0085, &WPF0100, &WPF0102,
    &WPF0103, &WPF0104, &WPF0105, &WPF0131,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sorted_and_unique() {
        let ids: Vec<&str> = ALL.iter().map(|d| d.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_only_convert_to_lambda_is_info_among_dependency_property_rules() {
        let info: Vec<&str> = ALL
            .iter()
            .filter(|d| d.category == Category::DependencyProperty && d.default_severity == Severity::Info)
            .map(|d| d.id)
            .collect();
        assert_eq!(info, ["WPF0023"]);
    }
}
