//! Rule descriptors: the stable, public face of each rule.

use serde::{Deserialize, Serialize};

const HELP_LINK_BASE: &str =
    "https://github.com/DotNetAnalyzers/WpfAnalyzers/tree/master/documentation";

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hidden => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    DependencyProperty,
    RoutedEvent,
    XmlnsDefinition,
    ValueConverter,
    MarkupExtension,
    TemplatePart,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DependencyProperty => "WpfAnalyzers.DependencyProperty",
            Category::RoutedEvent => "WpfAnalyzers.RoutedEvent",
            Category::XmlnsDefinition => "WpfAnalyzers.XmlnsDefinition",
            Category::ValueConverter => "WpfAnalyzers.IValueConverter",
            Category::MarkupExtension => "WpfAnalyzers.MarkupExtension",
            Category::TemplatePart => "WpfAnalyzers.TemplatePart",
        }
    }
}

/// Static description of one rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Stable id, e.g. `WPF0003`
    pub id: &'static str,
    pub title: &'static str,
    /// Message with positional `{0}`, `{1}` placeholders
    pub message_format: &'static str,
    pub category: Category,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
    pub description: &'static str,
}

impl DiagnosticDescriptor {
    pub fn help_link(&self) -> String {
        help_link(self.id)
    }

    /// Substitute `{N}` with `args[N]`. Placeholders without an argument are
    /// kept as written.
    pub fn format_message(&self, args: &[&str]) -> String {
        format_message(self.message_format, args)
    }
}

/// Documentation page of a rule
pub fn help_link(id: &str) -> String {
    format!("{HELP_LINK_BASE}/{id}.md")
}

pub fn format_message(format: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let argument = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            Some((args.get(index)?, close))
        });
        match argument {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
