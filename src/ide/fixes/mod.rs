//! Built-in code fixes.

mod constructor_argument;
mod converter;
mod lambda;
mod owner;
mod rename;
mod set_value;

use super::fix_engine::CodeFixProvider;

pub use constructor_argument::ConstructorArgumentFix;
pub use converter::{ConversionTypeFix, DefaultFieldFix, ValueConversionFix};
pub use lambda::ConvertToLambdaFix;
pub use owner::OwnerTypeFix;
pub use rename::RenameFix;
pub use set_value::{UseSetCurrentValueFix, UseSetValueFix};

pub fn providers() -> Vec<Box<dyn CodeFixProvider>> {
    vec![
        Box::new(RenameFix),
        Box::new(OwnerTypeFix),
        Box::new(ConvertToLambdaFix),
        Box::new(UseSetCurrentValueFix),
        Box::new(UseSetValueFix),
        Box::new(DefaultFieldFix),
        Box::new(ValueConversionFix),
        Box::new(ConversionTypeFix),
        Box::new(ConstructorArgumentFix),
    ]
}
