//! Built-in framework catalogue.
//!
//! The subset of BCL and WPF metadata the analyzers consult, written as C#
//! declaration stubs. The stubs go through the same parser and collector as
//! user documents, so framework dependency properties resolve exactly like
//! user-declared ones (registered name, type and owner included).

use once_cell::sync::Lazy;
use rowan::GreenNode;

use crate::parser::parse;

const SYSTEM: &str = r#"
namespace System
{
    public class Object
    {
        public Object();
        public virtual bool Equals(object obj);
        public virtual int GetHashCode();
        public virtual string ToString();
        public Type GetType();
    }
    public abstract class ValueType { }
    public abstract class Enum : ValueType { }
    public struct Void { }
    public struct Boolean { }
    public struct Byte { }
    public struct SByte { }
    public struct Char { }
    public struct Int16 { }
    public struct UInt16 { }
    public struct Int32 { public static readonly int MaxValue; public static readonly int MinValue; }
    public struct UInt32 { }
    public struct Int64 { }
    public struct UInt64 { }
    public struct Single { }
    public struct Double { public static readonly double NaN; public static bool IsNaN(double d); }
    public struct Decimal { }
    public struct Nullable<T> where T : struct { public bool HasValue { get; } public T Value { get; } }
    public struct DateTime { }
    public struct TimeSpan { }
    public struct Guid { }
    public sealed class String
    {
        public static readonly string Empty;
        public int Length { get; }
        public static bool IsNullOrEmpty(string value);
        public static string Format(string format, object arg0);
    }
    public abstract class Type
    {
        public string Name { get; }
        public string FullName { get; }
        public bool IsAssignableFrom(Type c);
    }
    public abstract class Delegate { }
    public abstract class MulticastDelegate : Delegate { }
    public abstract class Attribute { }
    public class EventArgs { public static readonly EventArgs Empty; }
    public delegate void EventHandler(object sender, EventArgs e);
    public delegate void EventHandler<TEventArgs>(object sender, TEventArgs e);
    public interface IServiceProvider { object GetService(Type serviceType); }
    public interface IDisposable { void Dispose(); }
    public class Exception { public Exception(); public Exception(string message); }
    public class ArgumentException : Exception { public ArgumentException(string message); }
    public class ArgumentNullException : ArgumentException { public ArgumentNullException(string paramName); }
    public class InvalidOperationException : Exception { public InvalidOperationException(string message); }
    public class NotSupportedException : Exception { public NotSupportedException(); public NotSupportedException(string message); }
    public class NotImplementedException : Exception { public NotImplementedException(); }
    public sealed class ObsoleteAttribute : Attribute { public ObsoleteAttribute(); public ObsoleteAttribute(string message); }
    public delegate void Action();
    public delegate void Action<T>(T obj);
    public delegate TResult Func<TResult>();
    public delegate TResult Func<T, TResult>(T arg);
    public static class Math { public static double Max(double a, double b); public static double Min(double a, double b); }
}

namespace System.Collections
{
    public interface IEnumerable { }
    public interface ICollection : IEnumerable { int Count { get; } }
    public interface IList : ICollection { }
}

namespace System.Collections.Generic
{
    public interface IEnumerable<T> : System.Collections.IEnumerable { }
    public interface IList<T> : IEnumerable<T> { }
    public class List<T> : IList<T>, System.Collections.IList { public List(); public void Add(T item); public int Count { get; } }
    public class Dictionary<TKey, TValue> { public Dictionary(); }
}

namespace System.Collections.ObjectModel
{
    public class Collection<T> : System.Collections.Generic.IList<T> { public Collection(); }
    public class ObservableCollection<T> : Collection<T> { public ObservableCollection(); }
}

namespace System.Globalization
{
    public class CultureInfo { public static CultureInfo InvariantCulture { get; } }
}

namespace System.ComponentModel
{
    public interface INotifyPropertyChanged { }
    public sealed class DesignerSerializationVisibilityAttribute : Attribute { }
    public class TypeConverter { }
}
"#;

const SYSTEM_WINDOWS: &str = r#"
namespace System.Windows
{
    using System;
    using System.Windows.Media;

    public class DependencyObject
    {
        public DependencyObject();
        public object GetValue(DependencyProperty dp);
        public void SetValue(DependencyProperty dp, object value);
        public void SetValue(DependencyPropertyKey key, object value);
        public void SetCurrentValue(DependencyProperty dp, object value);
        public void ClearValue(DependencyProperty dp);
        public void ClearValue(DependencyPropertyKey key);
        public void CoerceValue(DependencyProperty dp);
        public void InvalidateProperty(DependencyProperty dp);
        public object ReadLocalValue(DependencyProperty dp);
    }

    public sealed class DependencyProperty
    {
        public static readonly object UnsetValue;
        public string Name { get; }
        public Type PropertyType { get; }
        public Type OwnerType { get; }
        public bool ReadOnly { get; }
        public static DependencyProperty Register(string name, Type propertyType, Type ownerType);
        public static DependencyProperty Register(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata);
        public static DependencyProperty Register(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata, ValidateValueCallback validateValueCallback);
        public static DependencyPropertyKey RegisterReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata);
        public static DependencyPropertyKey RegisterReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata typeMetadata, ValidateValueCallback validateValueCallback);
        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType);
        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata);
        public static DependencyProperty RegisterAttached(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata, ValidateValueCallback validateValueCallback);
        public static DependencyPropertyKey RegisterAttachedReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata);
        public static DependencyPropertyKey RegisterAttachedReadOnly(string name, Type propertyType, Type ownerType, PropertyMetadata defaultMetadata, ValidateValueCallback validateValueCallback);
        public DependencyProperty AddOwner(Type ownerType);
        public DependencyProperty AddOwner(Type ownerType, PropertyMetadata typeMetadata);
        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata);
        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata, DependencyPropertyKey key);
        public PropertyMetadata GetMetadata(Type forType);
        public bool IsValidType(object value);
    }

    public sealed class DependencyPropertyKey
    {
        public DependencyProperty DependencyProperty { get; }
        public void OverrideMetadata(Type forType, PropertyMetadata typeMetadata);
    }

    public delegate void PropertyChangedCallback(DependencyObject d, DependencyPropertyChangedEventArgs e);
    public delegate object CoerceValueCallback(DependencyObject d, object baseValue);
    public delegate bool ValidateValueCallback(object value);

    public struct DependencyPropertyChangedEventArgs
    {
        public object NewValue { get; }
        public object OldValue { get; }
        public DependencyProperty Property { get; }
    }

    public class PropertyMetadata
    {
        public PropertyMetadata();
        public PropertyMetadata(object defaultValue);
        public PropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public PropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public PropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public object DefaultValue { get; set; }
    }

    public class UIPropertyMetadata : PropertyMetadata
    {
        public UIPropertyMetadata();
        public UIPropertyMetadata(object defaultValue);
        public UIPropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public UIPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public UIPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
    }

    public class FrameworkPropertyMetadata : UIPropertyMetadata
    {
        public FrameworkPropertyMetadata();
        public FrameworkPropertyMetadata(object defaultValue);
        public FrameworkPropertyMetadata(PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public FrameworkPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(object defaultValue, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback);
        public FrameworkPropertyMetadata(object defaultValue, FrameworkPropertyMetadataOptions flags, PropertyChangedCallback propertyChangedCallback, CoerceValueCallback coerceValueCallback);
    }

    public enum FrameworkPropertyMetadataOptions
    {
        None,
        AffectsMeasure,
        AffectsArrange,
        AffectsParentMeasure,
        AffectsParentArrange,
        AffectsRender,
        Inherits,
        BindsTwoWayByDefault,
    }

    public enum Visibility { Visible, Hidden, Collapsed }
    public enum HorizontalAlignment { Left, Center, Right, Stretch }

    public struct Thickness { public Thickness(double uniformLength); }
    public struct Size { public Size(double width, double height); }
    public struct Point { public Point(double x, double y); }

    public sealed class RoutedEvent { public string Name { get; } }
    public enum RoutingStrategy { Tunnel, Bubble, Direct }
    public delegate void RoutedEventHandler(object sender, RoutedEventArgs e);
    public delegate void RoutedPropertyChangedEventHandler<T>(object sender, RoutedPropertyChangedEventArgs<T> e);
    public class RoutedEventArgs : EventArgs
    {
        public RoutedEventArgs();
        public RoutedEventArgs(RoutedEvent routedEvent);
    }
    public class RoutedPropertyChangedEventArgs<T> : RoutedEventArgs { }

    public static class EventManager
    {
        public static RoutedEvent RegisterRoutedEvent(string name, RoutingStrategy routingStrategy, Type handlerType, Type ownerType);
        public static void RegisterClassHandler(Type classType, RoutedEvent routedEvent, Delegate handler);
    }

    public abstract class Freezable : DependencyObject { }

    public class UIElement : Visual
    {
        public static readonly DependencyProperty VisibilityProperty = DependencyProperty.Register("Visibility", typeof(Visibility), typeof(UIElement));
        public static readonly DependencyProperty IsEnabledProperty = DependencyProperty.Register("IsEnabled", typeof(bool), typeof(UIElement));
        public static readonly DependencyProperty OpacityProperty = DependencyProperty.Register("Opacity", typeof(double), typeof(UIElement));
        public Visibility Visibility { get { return (Visibility)GetValue(VisibilityProperty); } set { SetValue(VisibilityProperty, value); } }
        public bool IsEnabled { get { return (bool)GetValue(IsEnabledProperty); } set { SetValue(IsEnabledProperty, value); } }
        public double Opacity { get { return (double)GetValue(OpacityProperty); } set { SetValue(OpacityProperty, value); } }
        public void AddHandler(RoutedEvent routedEvent, Delegate handler);
        public void RemoveHandler(RoutedEvent routedEvent, Delegate handler);
        public void RaiseEvent(RoutedEventArgs e);
        public void InvalidateMeasure();
        public void InvalidateVisual();
    }

    public class FrameworkElement : UIElement
    {
        public static readonly DependencyProperty DataContextProperty = DependencyProperty.Register("DataContext", typeof(object), typeof(FrameworkElement));
        public static readonly DependencyProperty WidthProperty = DependencyProperty.Register("Width", typeof(double), typeof(FrameworkElement));
        public static readonly DependencyProperty HeightProperty = DependencyProperty.Register("Height", typeof(double), typeof(FrameworkElement));
        public static readonly DependencyProperty TagProperty = DependencyProperty.Register("Tag", typeof(object), typeof(FrameworkElement));
        public static readonly DependencyProperty NameProperty = DependencyProperty.Register("Name", typeof(string), typeof(FrameworkElement));
        public static readonly DependencyProperty StyleProperty = DependencyProperty.Register("Style", typeof(Style), typeof(FrameworkElement));
        public static readonly DependencyProperty MarginProperty = DependencyProperty.Register("Margin", typeof(Thickness), typeof(FrameworkElement));
        public static readonly DependencyProperty HorizontalAlignmentProperty = DependencyProperty.Register("HorizontalAlignment", typeof(HorizontalAlignment), typeof(FrameworkElement));
        public object DataContext { get { return GetValue(DataContextProperty); } set { SetValue(DataContextProperty, value); } }
        public double Width { get { return (double)GetValue(WidthProperty); } set { SetValue(WidthProperty, value); } }
        public double Height { get { return (double)GetValue(HeightProperty); } set { SetValue(HeightProperty, value); } }
        public object Tag { get { return GetValue(TagProperty); } set { SetValue(TagProperty, value); } }
        public string Name { get { return (string)GetValue(NameProperty); } set { SetValue(NameProperty, value); } }
        public Style Style { get { return (Style)GetValue(StyleProperty); } set { SetValue(StyleProperty, value); } }
        public Thickness Margin { get { return (Thickness)GetValue(MarginProperty); } set { SetValue(MarginProperty, value); } }
        public HorizontalAlignment HorizontalAlignment { get { return (HorizontalAlignment)GetValue(HorizontalAlignmentProperty); } set { SetValue(HorizontalAlignmentProperty, value); } }
        public object FindName(string name);
        public virtual void OnApplyTemplate();
    }

    public class FrameworkContentElement : DependencyObject { }

    public class Style { public Style(); }
    public class DataTemplate { }
    public class ResourceDictionary { }
    public class Window : System.Windows.Controls.ContentControl { public Window(); public void Show(); }
    public class Application { }

    public sealed class TemplatePartAttribute : Attribute
    {
        public TemplatePartAttribute();
        public string Name { get; set; }
        public Type Type { get; set; }
    }

    public sealed class StyleTypedPropertyAttribute : Attribute
    {
        public string Property { get; set; }
        public Type StyleTargetType { get; set; }
    }
}

namespace System.Windows.Media
{
    using System.Windows;

    public abstract class Visual : DependencyObject { }
    public struct Color { }
    public abstract class Brush : Freezable { }
    public sealed class SolidColorBrush : Brush { public SolidColorBrush(); public SolidColorBrush(Color color); }
    public static class Brushes { public static SolidColorBrush Red { get; } public static SolidColorBrush Transparent { get; } }
}

namespace System.Windows.Documents
{
    using System.Windows;

    public abstract class TextElement : FrameworkContentElement
    {
        public static readonly DependencyProperty FontSizeProperty = DependencyProperty.RegisterAttached("FontSize", typeof(double), typeof(TextElement));
        public static readonly DependencyProperty ForegroundProperty = DependencyProperty.RegisterAttached("Foreground", typeof(System.Windows.Media.Brush), typeof(TextElement));
        public static void SetFontSize(DependencyObject element, double value) { element.SetValue(FontSizeProperty, value); }
        public static double GetFontSize(DependencyObject element) { return (double)element.GetValue(FontSizeProperty); }
    }
}

namespace System.Windows.Controls
{
    using System.Windows;
    using System.Windows.Documents;
    using System.Windows.Media;

    public class Control : FrameworkElement
    {
        public static readonly DependencyProperty FontSizeProperty = TextElement.FontSizeProperty.AddOwner(typeof(Control));
        public static readonly DependencyProperty ForegroundProperty = TextElement.ForegroundProperty.AddOwner(typeof(Control));
        public static readonly DependencyProperty BackgroundProperty = DependencyProperty.Register("Background", typeof(Brush), typeof(Control));
        public double FontSize { get { return (double)GetValue(FontSizeProperty); } set { SetValue(FontSizeProperty, value); } }
        public Brush Foreground { get { return (Brush)GetValue(ForegroundProperty); } set { SetValue(ForegroundProperty, value); } }
        public Brush Background { get { return (Brush)GetValue(BackgroundProperty); } set { SetValue(BackgroundProperty, value); } }
        protected DependencyObject GetTemplateChild(string childName);
    }

    public class ContentControl : Control
    {
        public static readonly DependencyProperty ContentProperty = DependencyProperty.Register("Content", typeof(object), typeof(ContentControl));
        public object Content { get { return GetValue(ContentProperty); } set { SetValue(ContentProperty, value); } }
    }

    public class UserControl : ContentControl { }
    public class Button : ContentControl { }
    public class Label : ContentControl { }
    public class ItemsControl : Control { }
    public class ListBox : ItemsControl { }

    public class Decorator : FrameworkElement { }
    public class Border : Decorator
    {
        public static readonly DependencyProperty BorderThicknessProperty = DependencyProperty.Register("BorderThickness", typeof(Thickness), typeof(Border));
        public Thickness BorderThickness { get { return (Thickness)GetValue(BorderThicknessProperty); } set { SetValue(BorderThicknessProperty, value); } }
    }

    public abstract class Panel : FrameworkElement { }
    public class StackPanel : Panel { }
    public class Grid : Panel { }
    public class Canvas : Panel { }

    public class TextBlock : FrameworkElement
    {
        public static readonly DependencyProperty TextProperty = DependencyProperty.Register("Text", typeof(string), typeof(TextBlock));
        public string Text { get { return (string)GetValue(TextProperty); } set { SetValue(TextProperty, value); } }
    }

    public class TextBox : Control
    {
        public static readonly DependencyProperty TextProperty = DependencyProperty.Register("Text", typeof(string), typeof(TextBox));
        public string Text { get { return (string)GetValue(TextProperty); } set { SetValue(TextProperty, value); } }
    }

    public class Image : FrameworkElement { }
    public class ContentPresenter : FrameworkElement { }
}

namespace System.Windows.Controls.Primitives
{
    using System.Windows.Controls;

    public class Popup : System.Windows.FrameworkElement { }
    public abstract class ButtonBase : ContentControl { }
    public class ToggleButton : ButtonBase { }
}

namespace System.Windows.Data
{
    using System;
    using System.Globalization;

    public interface IValueConverter
    {
        object Convert(object value, Type targetType, object parameter, CultureInfo culture);
        object ConvertBack(object value, Type targetType, object parameter, CultureInfo culture);
    }

    public interface IMultiValueConverter
    {
        object Convert(object[] values, Type targetType, object parameter, CultureInfo culture);
        object[] ConvertBack(object value, Type[] targetTypes, object parameter, CultureInfo culture);
    }

    public sealed class ValueConversionAttribute : Attribute
    {
        public ValueConversionAttribute(Type sourceType, Type targetType);
        public Type SourceType { get; }
        public Type TargetType { get; }
        public Type ParameterType { get; set; }
    }

    public abstract class BindingBase : System.Windows.Markup.MarkupExtension { }
    public class Binding : BindingBase { public Binding(); public Binding(string path); }
}

namespace System.Windows.Markup
{
    using System;

    public abstract class MarkupExtension
    {
        public abstract object ProvideValue(IServiceProvider serviceProvider);
    }

    public sealed class MarkupExtensionReturnTypeAttribute : Attribute
    {
        public MarkupExtensionReturnTypeAttribute();
        public MarkupExtensionReturnTypeAttribute(Type returnType);
        public Type ReturnType { get; }
    }

    public sealed class ConstructorArgumentAttribute : Attribute
    {
        public ConstructorArgumentAttribute(string argumentName);
        public string ArgumentName { get; }
    }

    public sealed class XmlnsDefinitionAttribute : Attribute
    {
        public XmlnsDefinitionAttribute(string xmlNamespace, string clrNamespace);
        public string XmlNamespace { get; }
        public string ClrNamespace { get; }
        public string AssemblyName { get; set; }
    }

    public sealed class XmlnsPrefixAttribute : Attribute
    {
        public XmlnsPrefixAttribute(string xmlNamespace, string prefix);
        public string XmlNamespace { get; }
        public string Prefix { get; }
    }

    public sealed class XamlSetTypeConverterAttribute : Attribute
    {
        public XamlSetTypeConverterAttribute(string xamlSetTypeConverterHandler);
        public string XamlSetTypeConverterHandler { get; }
    }

    public class XamlSetTypeConverterEventArgs : EventArgs
    {
        public object TargetObject { get; }
    }

    public interface IProvideValueTarget
    {
        object TargetObject { get; }
        object TargetProperty { get; }
    }
}
"#;

/// One parsed framework document
pub struct FrameworkDocument {
    pub path: &'static str,
    pub text: &'static str,
    pub green: GreenNode,
}

/// Framework documents, parsed once per process
pub static FRAMEWORK: Lazy<Vec<FrameworkDocument>> = Lazy::new(|| {
    [("<framework>/System.cs", SYSTEM), ("<framework>/System.Windows.cs", SYSTEM_WINDOWS)]
        .into_iter()
        .map(|(path, text)| {
            let parsed = parse(text);
            if !parsed.ok() {
                tracing::warn!(path, errors = parsed.errors.len(), "framework stub has syntax errors");
            }
            FrameworkDocument {
                path,
                text,
                green: parsed.green,
            }
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_stubs_parse_cleanly() {
        for (name, text) in [("System", SYSTEM), ("System.Windows", SYSTEM_WINDOWS)] {
            let parsed = parse(text);
            assert!(parsed.ok(), "{name}: {:?}", parsed.errors);
        }
    }
}
