//! WPF semantic resolution.
//!
//! Maps syntax to the canonical WPF concepts the rules reason about:
//!
//! - [`BackingFieldOrProperty`] - the static member holding a
//!   `DependencyProperty`, `DependencyPropertyKey` or `RoutedEvent`
//! - [`RegistrationCall`] - `Register*`, `AddOwner`, `OverrideMetadata` and
//!   `EventManager.RegisterRoutedEvent` invocations
//! - [`ClrProperty`] / [`ClrMethod`] - CLR wrappers and attached accessors
//! - [`PropertyMetadataCall`] / [`Callback`] - metadata and callback identity
//!
//! Every query returns `None` when the shape is not recognized. Unknown
//! never means wrong.

mod backing;
mod callbacks;
mod clr;
mod registration;
mod usage;

pub use backing::BackingFieldOrProperty;
pub use callbacks::{Callback, CallbackKind, PropertyMetadataCall};
pub use clr::{ClrMethod, ClrProperty, DependencyObjectCall, DependencyObjectCallKind};
pub use registration::{
    RegistrationCall, RegistrationKind, argument_for_parameter, is_read_only,
    try_get_registered_name, try_get_registered_type, try_get_registration,
};
pub use usage::{Reference, find_references, try_single_method_declaration, try_single_usage};

/// Metadata names of the framework types the rules look for.
pub mod known {
    pub const OBJECT: &str = "System.Object";
    pub const VOID: &str = "System.Void";
    pub const DEPENDENCY_OBJECT: &str = "System.Windows.DependencyObject";
    pub const DEPENDENCY_PROPERTY: &str = "System.Windows.DependencyProperty";
    pub const DEPENDENCY_PROPERTY_KEY: &str = "System.Windows.DependencyPropertyKey";
    pub const PROPERTY_METADATA: &str = "System.Windows.PropertyMetadata";
    pub const PROPERTY_CHANGED_CALLBACK: &str = "System.Windows.PropertyChangedCallback";
    pub const COERCE_VALUE_CALLBACK: &str = "System.Windows.CoerceValueCallback";
    pub const VALIDATE_VALUE_CALLBACK: &str = "System.Windows.ValidateValueCallback";
    pub const ROUTED_EVENT: &str = "System.Windows.RoutedEvent";
    pub const EVENT_MANAGER: &str = "System.Windows.EventManager";
    pub const UI_ELEMENT: &str = "System.Windows.UIElement";
    pub const FRAMEWORK_ELEMENT: &str = "System.Windows.FrameworkElement";
    pub const TEMPLATE_PART_ATTRIBUTE: &str = "System.Windows.TemplatePartAttribute";
    pub const VALUE_CONVERTER: &str = "System.Windows.Data.IValueConverter";
    pub const MULTI_VALUE_CONVERTER: &str = "System.Windows.Data.IMultiValueConverter";
    pub const VALUE_CONVERSION_ATTRIBUTE: &str = "System.Windows.Data.ValueConversionAttribute";
    pub const MARKUP_EXTENSION: &str = "System.Windows.Markup.MarkupExtension";
    pub const MARKUP_EXTENSION_RETURN_TYPE_ATTRIBUTE: &str =
        "System.Windows.Markup.MarkupExtensionReturnTypeAttribute";
    pub const CONSTRUCTOR_ARGUMENT_ATTRIBUTE: &str =
        "System.Windows.Markup.ConstructorArgumentAttribute";
    pub const XMLNS_DEFINITION_ATTRIBUTE: &str = "System.Windows.Markup.XmlnsDefinitionAttribute";
    pub const XMLNS_PREFIX_ATTRIBUTE: &str = "System.Windows.Markup.XmlnsPrefixAttribute";
    pub const XAML_SET_TYPE_CONVERTER_ATTRIBUTE: &str =
        "System.Windows.Markup.XamlSetTypeConverterAttribute";
    pub const XAML_SET_TYPE_CONVERTER_EVENT_ARGS: &str =
        "System.Windows.Markup.XamlSetTypeConverterEventArgs";
}
