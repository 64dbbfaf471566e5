//! `GetValue`/`SetValue` calls and the CLR members wrapping them.

use super::backing::BackingFieldOrProperty;
use super::known;
use super::registration::argument_for_parameter;
use crate::hir::{SemanticModel, SymbolId};
use crate::parser::{
    AccessorDecl, Argument, AstNode, InvocationExpr, MethodDecl, PropertyDecl, SyntaxKind,
    SyntaxNode,
};
use crate::syntax::try_single;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyObjectCallKind {
    GetValue,
    SetValue,
    SetCurrentValue,
    ClearValue,
}

impl DependencyObjectCallKind {
    pub fn is_set(self) -> bool {
        matches!(self, Self::SetValue | Self::SetCurrentValue)
    }
}

/// An invocation of one of `DependencyObject`'s value methods.
#[derive(Debug, Clone)]
pub struct DependencyObjectCall {
    kind: DependencyObjectCallKind,
    invocation: InvocationExpr,
    method: SymbolId,
}

impl DependencyObjectCall {
    pub fn try_create(invocation: &InvocationExpr, model: &SemanticModel<'_>) -> Option<Self> {
        let kind = match invocation.method_name()?.as_str() {
            "GetValue" => DependencyObjectCallKind::GetValue,
            "SetValue" => DependencyObjectCallKind::SetValue,
            "SetCurrentValue" => DependencyObjectCallKind::SetCurrentValue,
            "ClearValue" => DependencyObjectCallKind::ClearValue,
            _ => return None,
        };
        let method = model.symbol(invocation.syntax())?;
        let symbols = model.symbols();
        let owner = symbols.containing_type(method)?;
        if symbols.type_by_name(known::DEPENDENCY_OBJECT) != Some(owner) {
            return None;
        }
        Some(Self {
            kind,
            invocation: invocation.clone(),
            method,
        })
    }

    pub fn kind(&self) -> DependencyObjectCallKind {
        self.kind
    }

    pub fn invocation(&self) -> &InvocationExpr {
        &self.invocation
    }

    /// The `dp` or `key` argument
    pub fn property_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        let arguments = self.invocation.arguments();
        let parameters = &model.symbols().get(self.method).parameters;
        argument_for_parameter(&arguments, parameters, "dp")
            .or_else(|| argument_for_parameter(&arguments, parameters, "key"))
    }

    pub fn value_argument(&self, model: &SemanticModel<'_>) -> Option<Argument> {
        argument_for_parameter(
            &self.invocation.arguments(),
            &model.symbols().get(self.method).parameters,
            "value",
        )
    }

    /// The member passed as property argument
    pub fn backing(&self, model: &SemanticModel<'_>) -> Option<BackingFieldOrProperty> {
        let expr = self.property_argument(model)?.expr()?;
        let symbol = model.symbol(expr.syntax())?;
        BackingFieldOrProperty::try_create_for_dependency_property(model.symbols(), symbol)
    }

    /// The overload taking a `DependencyPropertyKey`
    pub fn is_key_overload(&self, model: &SemanticModel<'_>) -> bool {
        let symbols = model.symbols();
        symbols
            .get(self.method)
            .parameters
            .first()
            .and_then(|p| p.ty.as_ref())
            .is_some_and(|ty| model.is_type(ty, known::DEPENDENCY_PROPERTY_KEY))
    }

    /// Called on `this`, explicitly or implicitly
    pub fn is_on_this(&self) -> bool {
        match self.invocation.receiver() {
            None => true,
            Some(receiver) => receiver.unparenthesized().kind() == SyntaxKind::THIS_EXPR,
        }
    }

    /// Called on the identifier `name`
    pub fn is_on(&self, name: &str) -> bool {
        self.invocation
            .receiver()
            .and_then(|r| r.unparenthesized().as_identifier())
            .is_some_and(|r| r.as_str() == name)
    }
}

fn calls_in(root: &SyntaxNode, model: &SemanticModel<'_>) -> Vec<DependencyObjectCall> {
    root.descendants()
        .filter_map(InvocationExpr::cast)
        .filter_map(|i| DependencyObjectCall::try_create(&i, model))
        .collect()
}

/// An instance property of a `DependencyObject` whose accessors go through
/// `GetValue` and `SetValue`.
#[derive(Debug, Clone)]
pub struct ClrProperty {
    declaration: PropertyDecl,
    symbol: SymbolId,
}

impl ClrProperty {
    pub fn try_create(property: &PropertyDecl, model: &SemanticModel<'_>) -> Option<Self> {
        if property.is_static() {
            return None;
        }
        let symbol = model.declared_symbol(property.syntax())?;
        let symbols = model.symbols();
        let owner = symbols.containing_type(symbol)?;
        if !model.inherits_from(&symbols.self_type(owner), known::DEPENDENCY_OBJECT) {
            return None;
        }
        let clr = Self {
            declaration: property.clone(),
            symbol,
        };
        (clr.get_call(model).is_some() || clr.set_call(model).is_some()).then_some(clr)
    }

    pub fn declaration(&self) -> &PropertyDecl {
        &self.declaration
    }

    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }

    pub fn accessor(&self, keyword: &str) -> Option<AccessorDecl> {
        self.declaration
            .accessors()
            .into_iter()
            .find(|a| a.keyword().as_deref() == Some(keyword))
    }

    fn accessor_calls(&self, keyword: &str, model: &SemanticModel<'_>) -> Vec<DependencyObjectCall> {
        let root = match (keyword, self.declaration.expression_body()) {
            ("get", Some(body)) => body.syntax().clone(),
            _ => match self.accessor(keyword) {
                Some(accessor) => accessor.syntax().clone(),
                None => return Vec::new(),
            },
        };
        calls_in(&root, model)
            .into_iter()
            .filter(DependencyObjectCall::is_on_this)
            .collect()
    }

    /// The single `GetValue` call of the getter
    pub fn get_call(&self, model: &SemanticModel<'_>) -> Option<DependencyObjectCall> {
        try_single(self.accessor_calls("get", model), |c| {
            c.kind() == DependencyObjectCallKind::GetValue
        })
    }

    /// The single `SetValue` or `SetCurrentValue` call of the setter
    pub fn set_call(&self, model: &SemanticModel<'_>) -> Option<DependencyObjectCall> {
        try_single(self.accessor_calls("set", model), |c| c.kind().is_set())
    }

    /// Member used by the getter, else by the setter
    pub fn backing(&self, model: &SemanticModel<'_>) -> Option<BackingFieldOrProperty> {
        self.get_call(model)
            .and_then(|c| c.backing(model))
            .or_else(|| self.set_call(model).and_then(|c| c.backing(model)))
    }
}

/// A static `GetX(element)` or `SetX(element, value)` accessor of an
/// attached property.
#[derive(Debug, Clone)]
pub struct ClrMethod {
    declaration: MethodDecl,
    call: DependencyObjectCall,
}

impl ClrMethod {
    pub fn try_create(method: &MethodDecl, model: &SemanticModel<'_>) -> Option<Self> {
        if !method.is_static() {
            return None;
        }
        let parameters = method.parameters();
        let element = parameters.first()?.name()?;
        let body = method
            .expression_body()
            .map(|e| e.syntax().clone())
            .or_else(|| method.body().map(|b| b.syntax().clone()))?;
        let calls = calls_in(&body, model)
            .into_iter()
            .filter(|c| c.is_on(&element));
        let call = match parameters.len() {
            1 => try_single(calls, |c| c.kind() == DependencyObjectCallKind::GetValue)?,
            2 => try_single(calls, |c| c.kind().is_set())?,
            _ => return None,
        };
        Some(Self {
            declaration: method.clone(),
            call,
        })
    }

    pub fn declaration(&self) -> &MethodDecl {
        &self.declaration
    }

    pub fn call(&self) -> &DependencyObjectCall {
        &self.call
    }

    pub fn is_getter(&self) -> bool {
        self.call.kind() == DependencyObjectCallKind::GetValue
    }

    pub fn backing(&self, model: &SemanticModel<'_>) -> Option<BackingFieldOrProperty> {
        self.call.backing(model)
    }
}
