//! Property metadata and the callbacks passed to it.

use super::known;
use super::registration::{RegistrationCall, argument_for_parameter};
use crate::hir::{Binding, SemanticModel, SymbolId, SymbolKind};
use crate::parser::{
    Argument, AstNode, Expr, IdentifierName, InvocationExpr, MemberAccessExpr,
    ObjectCreationExpr, SyntaxKind, SyntaxToken,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    PropertyChanged,
    CoerceValue,
    ValidateValue,
}

impl CallbackKind {
    /// Conventional method name for a property registered as `registered`
    pub fn expected_name(self, registered: &str) -> String {
        match self {
            Self::PropertyChanged => format!("On{registered}Changed"),
            Self::CoerceValue => format!("Coerce{registered}"),
            Self::ValidateValue => format!("Validate{registered}"),
        }
    }

    pub fn delegate_type(self) -> &'static str {
        match self {
            Self::PropertyChanged => known::PROPERTY_CHANGED_CALLBACK,
            Self::CoerceValue => known::COERCE_VALUE_CALLBACK,
            Self::ValidateValue => known::VALIDATE_VALUE_CALLBACK,
        }
    }
}

/// `new PropertyMetadata(..)` or any metadata type deriving from it.
#[derive(Debug, Clone)]
pub struct PropertyMetadataCall {
    creation: ObjectCreationExpr,
    constructor: SymbolId,
}

impl PropertyMetadataCall {
    pub fn try_create(creation: &ObjectCreationExpr, model: &SemanticModel<'_>) -> Option<Self> {
        let Binding::Member { symbol, .. } = model.bind(creation.syntax())? else {
            return None;
        };
        let symbols = model.symbols();
        if symbols.get(symbol).kind != SymbolKind::Constructor {
            return None;
        }
        let ty = symbols.self_type(symbols.containing_type(symbol)?);
        if !model.inherits_from(&ty, known::PROPERTY_METADATA) {
            return None;
        }
        Some(Self {
            creation: creation.clone(),
            constructor: symbol,
        })
    }

    pub fn creation(&self) -> &ObjectCreationExpr {
        &self.creation
    }

    fn argument(&self, model: &SemanticModel<'_>, parameter: &str) -> Option<Argument> {
        argument_for_parameter(
            &self.creation.arguments(),
            &model.symbols().get(self.constructor).parameters,
            parameter,
        )
    }

    pub fn default_value_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        self.argument(model, "defaultValue")
    }

    pub fn callback_argument(
        &self,
        kind: CallbackKind,
        model: &SemanticModel<'_>,
    ) -> Option<Argument> {
        match kind {
            CallbackKind::PropertyChanged => self.argument(model, "propertyChangedCallback"),
            CallbackKind::CoerceValue => self.argument(model, "coerceValueCallback"),
            CallbackKind::ValidateValue => None,
        }
    }

    /// The registration this metadata is passed to as metadata argument
    pub fn registration(&self, model: &SemanticModel<'_>) -> Option<RegistrationCall> {
        let argument = Argument::cast(self.creation.syntax().parent()?)?;
        let invocation = InvocationExpr::cast(argument.syntax().parent()?.parent()?)?;
        let call = RegistrationCall::try_create(&invocation, model)?;
        (call.metadata_argument(model)? == argument).then_some(call)
    }
}

/// A method passed as callback: `OnBarChanged`, `FooControl.OnBarChanged`
/// or `new PropertyChangedCallback(OnBarChanged)`.
#[derive(Debug, Clone)]
pub struct Callback {
    argument: Argument,
    name: Expr,
    method: SymbolId,
}

impl Callback {
    pub fn try_create(argument: &Argument, model: &SemanticModel<'_>) -> Option<Self> {
        let mut expr = argument.expr()?.unparenthesized();
        if let Some(creation) = ObjectCreationExpr::cast(expr.syntax().clone()) {
            let [inner] = <[Argument; 1]>::try_from(creation.arguments()).ok()?;
            expr = inner.expr()?.unparenthesized();
        }
        if !matches!(
            expr.kind(),
            SyntaxKind::IDENTIFIER_NAME | SyntaxKind::MEMBER_ACCESS_EXPR
        ) {
            return None;
        }
        let Binding::Member { symbol, .. } = model.bind(expr.syntax())? else {
            return None;
        };
        if model.symbols().get(symbol).kind != SymbolKind::Method {
            return None;
        }
        Some(Self {
            argument: argument.clone(),
            name: expr,
            method: symbol,
        })
    }

    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    pub fn method(&self) -> SymbolId {
        self.method
    }

    /// The expression naming the method
    pub fn name(&self) -> &Expr {
        &self.name
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        match self.name.kind() {
            SyntaxKind::IDENTIFIER_NAME => IdentifierName::cast(self.name.syntax().clone())?.token(),
            _ => MemberAccessExpr::cast(self.name.syntax().clone())?.name_token(),
        }
    }
}
