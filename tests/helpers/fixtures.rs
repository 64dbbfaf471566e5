//! Common WPF source fixtures for tests.

/// A control with a correctly declared `Bar` dependency property
pub const VALID_CONTROL: &str = r#"
namespace N
{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {
        /// <summary>Identifies the <see cref="Bar"/> dependency property.</summary>
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar),
            typeof(int),
            typeof(FooControl),
            new PropertyMetadata(default(int)));

        public int Bar
        {
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }
    }
}"#;

/// Plain C# without any WPF types
pub const PLAIN_CLASS: &str = r#"
namespace N
{
    using System;
    using System.Collections.Generic;

    public class Customer
    {
        private readonly List<string> names = new List<string>();

        public Customer(string name)
        {
            this.Name = name;
        }

        public string Name { get; set; }

        public int Count => this.names.Count;

        public void Add(string name)
        {
            if (name == null)
            {
                throw new ArgumentNullException(nameof(name));
            }

            this.names.Add(name);
        }
    }
}"#;

/// `FooControl` with the given members after `BarProperty` and `Bar`
pub fn control(members: &str) -> String {
    format!(
        r#"
namespace N
{{
    using System.Windows;
    using System.Windows.Controls;

    public class FooControl : Control
    {{
        public static readonly DependencyProperty BarProperty = DependencyProperty.Register(
            nameof(Bar), typeof(int), typeof(FooControl), new PropertyMetadata(default(int)));

        public int Bar
        {{
            get => (int)this.GetValue(BarProperty);
            set => this.SetValue(BarProperty, value);
        }}
{members}
    }}
}}"#
    )
}
