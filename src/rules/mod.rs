//! The WPF rule catalogue.
//!
//! Each analyzer owns a handful of related descriptors and is dispatched on
//! the node kinds it declares. [`registry`] holds all of them.

mod backing_member;
mod callbacks;
mod clr_method;
mod clr_property;
mod converter;
pub mod descriptors;
mod markup_extension;
mod metadata;
mod registration;
mod routed_event;
mod set_value;
mod template_part;
mod type_converter;
mod xmlns;

use once_cell::sync::Lazy;

use crate::diagnostics::{Analyzer, Registry};

pub use backing_member::BackingMemberAnalyzer;
pub use callbacks::CallbackAnalyzer;
pub use clr_method::ClrMethodAnalyzer;
pub use clr_property::ClrPropertyAnalyzer;
pub use converter::ValueConverterAnalyzer;
pub use markup_extension::MarkupExtensionAnalyzer;
pub use metadata::PropertyMetadataAnalyzer;
pub use registration::RegistrationAnalyzer;
pub use routed_event::RoutedEventAnalyzer;
pub use set_value::SetValueAnalyzer;
pub use template_part::TemplatePartAnalyzer;
pub use type_converter::XamlSetTypeConverterAnalyzer;
pub use xmlns::XmlnsAnalyzer;

pub(crate) use callbacks::trivial_body;
pub(crate) use converter::infer_conversion_types;
pub(crate) use set_value::{backing_reference, settable_backing};

/// Every analyzer of the catalogue
pub fn analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(BackingMemberAnalyzer),
        Box::new(ClrPropertyAnalyzer),
        Box::new(ClrMethodAnalyzer),
        Box::new(CallbackAnalyzer),
        Box::new(PropertyMetadataAnalyzer),
        Box::new(RegistrationAnalyzer),
        Box::new(SetValueAnalyzer),
        Box::new(XmlnsAnalyzer),
        Box::new(ValueConverterAnalyzer),
        Box::new(MarkupExtensionAnalyzer),
        Box::new(XamlSetTypeConverterAnalyzer),
        Box::new(RoutedEventAnalyzer),
        Box::new(TemplatePartAnalyzer),
    ]
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::new(analyzers()));

/// The shared registry of every analyzer
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[cfg(test)]
pub(crate) mod tests {
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::diagnostics::{
        AnalyzerConfig, Diagnostic, DiagnosticDescriptor, NodeContext,
    };
    use crate::hir::Compilation;
    use crate::parser::SyntaxKind;

    struct Only(&'static dyn Analyzer);

    impl Analyzer for Only {
        fn name(&self) -> &'static str {
            self.0.name()
        }

        fn descriptors(&self) -> &'static [&'static DiagnosticDescriptor] {
            self.0.descriptors()
        }

        fn kinds(&self) -> &'static [SyntaxKind] {
            self.0.kinds()
        }

        fn analyze(&self, ctx: &mut NodeContext<'_, '_>) {
            self.0.analyze(ctx)
        }
    }

    /// Run a single analyzer over one document
    pub(crate) fn analyze(analyzer: &'static dyn Analyzer, source: &str) -> Vec<Diagnostic> {
        let compilation = Compilation::from_text(source);
        let result = Registry::new(vec![Box::new(Only(analyzer))]).analyze_compilation(
            &compilation,
            &AnalyzerConfig::default(),
            &CancellationToken::new(),
        );
        assert!(result.failures.is_empty(), "{:?}", result.failures);
        result.diagnostics
    }

    pub(crate) fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_every_descriptor_has_an_analyzer() {
        let ids: Vec<&str> = registry().descriptors().map(|d| d.id).collect();
        let all: Vec<&str> = descriptors::ALL.iter().map(|d| d.id).collect();
        assert_eq!(ids, all);
    }

    #[test]
    fn test_valid_control_has_no_diagnostics() {
        let source = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar),
            typeof(int),
            typeof(FooControl),
            new PropertyMetadata(default(int), OnBarChanged, CoerceBar));

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }

        private static void OnBarChanged(DependencyObject d, DependencyPropertyChangedEventArgs e)
        {
            ((FooControl)d).InvalidateVisual();
        }

        private static object CoerceBar(DependencyObject d, object baseValue)
        {
            if (baseValue is int i && i < 0)
            {
                return 0;
            }

            return baseValue;
        }
    }
}"#;
        let compilation = Compilation::from_text(source);
        let result = registry().analyze_compilation(
            &compilation,
            &AnalyzerConfig::default(),
            &CancellationToken::new(),
        );
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert!(result.failures.is_empty());
    }
}
