//! Symbol table: declarations of namespaces, types and members.
//!
//! Symbols live in an arena indexed by [`SymbolId`]. Identity comparison is
//! id comparison, so the same declaration reached through different syntax
//! (partial classes, inherited members, framework metadata) is always equal.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::parser::SyntaxNodePtr;

// ============================================================================
// IDS AND KINDS
// ============================================================================

/// Index of a symbol in the [`SymbolTable`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type(TypeKind),
    Field,
    Property,
    Method,
    Constructor,
    Event,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(self, SymbolKind::Type(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    #[default]
    Private,
}

// ============================================================================
// TYPES
// ============================================================================

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named type with its type arguments
    Named { def: SymbolId, args: Vec<TypeRef> },
    Array(Box<TypeRef>),
    /// Type parameter `index` of the generic type or method `owner`
    TypeParam {
        owner: SymbolId,
        index: u32,
        name: SmolStr,
    },
    /// The type of the `null` literal
    Null,
}

impl TypeRef {
    pub fn named(def: SymbolId) -> Self {
        TypeRef::Named {
            def,
            args: Vec::new(),
        }
    }

    pub fn def(&self) -> Option<SymbolId> {
        match self {
            TypeRef::Named { def, .. } => Some(*def),
            _ => None,
        }
    }

    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// Replace type parameters of `owner` with `args`.
    pub fn substitute(&self, owner: SymbolId, args: &[TypeRef]) -> TypeRef {
        match self {
            TypeRef::TypeParam {
                owner: o, index, ..
            } if *o == owner => args
                .get(*index as usize)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeRef::Named { def, args: inner } => TypeRef::Named {
                def: *def,
                args: inner.iter().map(|a| a.substitute(owner, args)).collect(),
            },
            TypeRef::Array(element) => TypeRef::Array(Box::new(element.substitute(owner, args))),
            _ => self.clone(),
        }
    }

    /// Substitute using the type arguments of a constructed type.
    pub fn substitute_from(&self, constructed: &TypeRef) -> TypeRef {
        match constructed {
            TypeRef::Named { def, args } if !args.is_empty() => self.substitute(*def, args),
            _ => self.clone(),
        }
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

/// Where a symbol is declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolDecl {
    pub file: FileId,
    pub ptr: SyntaxNodePtr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: SmolStr,
    pub ty: Option<TypeRef>,
    pub has_default: bool,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub container: Option<SymbolId>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_abstract: bool,
    /// Field, property and event type, or method return type
    pub ty: Option<TypeRef>,
    pub parameters: Vec<ParamInfo>,
    pub type_params: Vec<SmolStr>,
    /// Base class first, then interfaces
    pub base_types: Vec<TypeRef>,
    pub members: Vec<SymbolId>,
    pub declarations: Vec<SymbolDecl>,
    /// Declared in the built-in framework catalogue rather than user code
    pub is_metadata: bool,
}

impl Symbol {
    pub(crate) fn new(name: SmolStr, kind: SymbolKind, container: Option<SymbolId>) -> Self {
        Self {
            name,
            kind,
            container,
            accessibility: Accessibility::Private,
            is_static: false,
            is_readonly: false,
            is_abstract: false,
            ty: None,
            parameters: Vec::new(),
            type_params: Vec::new(),
            base_types: Vec::new(),
            members: Vec::new(),
            declarations: Vec::new(),
            is_metadata: false,
        }
    }

    pub fn is_type(&self) -> bool {
        self.kind.is_type()
    }

    pub fn is_value_type(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Type(TypeKind::Struct) | SymbolKind::Type(TypeKind::Enum)
        )
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Arena of all symbols of a compilation plus lookup indexes.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    /// Declaration node → symbol
    by_decl: FxHashMap<SymbolDecl, SymbolId>,
    /// (container, name) → children, for namespaces and types
    children: FxHashMap<(SymbolId, SmolStr), Vec<SymbolId>>,
    global: Option<SymbolId>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        let mut table = Self::default();
        let global = table.alloc(Symbol::new(SmolStr::default(), SymbolKind::Namespace, None));
        table.global = Some(global);
        table
    }

    pub(crate) fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        if let Some(container) = symbol.container {
            self.children
                .entry((container, symbol.name.clone()))
                .or_default()
                .push(id);
            self.symbols[container.index()].members.push(id);
        }
        self.symbols.push(symbol);
        id
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub(crate) fn record_decl(&mut self, id: SymbolId, decl: SymbolDecl) {
        self.by_decl.insert(decl.clone(), id);
        self.symbols[id.index()].declarations.push(decl);
    }

    /// The global namespace
    pub fn global(&self) -> SymbolId {
        self.global.unwrap_or(SymbolId(0))
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }

    /// Symbol declared by the node at `decl`
    pub fn by_decl(&self, decl: &SymbolDecl) -> Option<SymbolId> {
        self.by_decl.get(decl).copied()
    }

    /// Direct children of a namespace or type named `name`
    pub fn children_named(&self, container: SymbolId, name: &str) -> &[SymbolId] {
        self.children
            .get(&(container, SmolStr::new(name)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nested namespace of `container`
    pub fn namespace(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        self.children_named(container, name)
            .iter()
            .copied()
            .find(|id| self.get(*id).kind == SymbolKind::Namespace)
    }

    /// Type of `container` with the given name and arity
    pub fn type_in(&self, container: SymbolId, name: &str, arity: usize) -> Option<SymbolId> {
        self.children_named(container, name).iter().copied().find(|id| {
            let symbol = self.get(*id);
            symbol.is_type() && symbol.type_params.len() == arity
        })
    }

    /// Namespace by dotted path from the global namespace
    pub fn namespace_by_path(&self, path: &str) -> Option<SymbolId> {
        let mut current = self.global();
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = self.namespace(current, segment)?;
        }
        Some(current)
    }

    /// Type by fully qualified metadata name, e.g. `System.Windows.DependencyObject`
    /// or `System.Nullable`1`.
    pub fn type_by_name(&self, qualified: &str) -> Option<SymbolId> {
        let (path, arity) = match qualified.split_once('`') {
            Some((path, arity)) => (path, arity.parse().ok()?),
            None => (qualified, 0),
        };
        let (ns, name) = path.rsplit_once('.').unwrap_or(("", path));
        let container = self
            .namespace_by_path(ns)
            .or_else(|| self.type_by_name(ns))?;
        self.type_in(container, name, arity)
    }

    /// `System.Windows.Controls.Control`
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let symbol = self.get(c);
            if !symbol.name.is_empty() {
                parts.push(symbol.name.as_str());
            }
            current = symbol.container;
        }
        parts.reverse();
        parts.join(".")
    }

    /// The type that declares a member, or the namespace containing a type
    pub fn containing_type(&self, id: SymbolId) -> Option<SymbolId> {
        let container = self.get(id).container?;
        self.get(container).is_type().then_some(container)
    }

    /// A generic type instantiated with its own type parameters.
    pub fn self_type(&self, def: SymbolId) -> TypeRef {
        let symbol = self.get(def);
        TypeRef::Named {
            def,
            args: symbol
                .type_params
                .iter()
                .enumerate()
                .map(|(i, name)| TypeRef::TypeParam {
                    owner: def,
                    index: i as u32,
                    name: name.clone(),
                })
                .collect(),
        }
    }

    /// Base class of a type, substituted for `ty`'s arguments
    pub fn base_class(&self, ty: &TypeRef) -> Option<TypeRef> {
        let def = ty.def()?;
        let symbol = self.get(def);
        symbol
            .base_types
            .iter()
            .find(|b| {
                b.def()
                    .is_some_and(|d| self.get(d).kind == SymbolKind::Type(TypeKind::Class))
            })
            .map(|b| b.substitute_from(ty))
    }

    /// `ty` followed by each base class, most derived first.
    pub fn base_chain(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut chain = vec![ty.clone()];
        let mut current = ty.clone();
        while let Some(base) = self.base_class(&current) {
            if chain.contains(&base) || chain.len() > 64 {
                break;
            }
            chain.push(base.clone());
            current = base;
        }
        chain
    }

    /// All base types (classes and interfaces), transitively, substituted.
    pub fn all_supertypes(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut out: Vec<TypeRef> = Vec::new();
        let mut stack = vec![ty.clone()];
        while let Some(current) = stack.pop() {
            let Some(def) = current.def() else { continue };
            for base in &self.get(def).base_types {
                let base = base.substitute_from(&current);
                if !out.contains(&base) && out.len() < 256 {
                    out.push(base.clone());
                    stack.push(base);
                }
            }
        }
        out
    }

    /// True when `ty` is `base` or derives from it (by definition, ignoring arguments).
    pub fn inherits_from(&self, ty: &TypeRef, base: SymbolId) -> bool {
        ty.def() == Some(base) || self.all_supertypes(ty).iter().any(|t| t.def() == Some(base))
    }

    /// C# display: keywords for predefined types, simple names otherwise.
    pub fn display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named { def, args } => {
                let qualified = self.qualified_name(*def);
                if let Some(keyword) = keyword_for(&qualified) {
                    return keyword.to_string();
                }
                if qualified == "System.Nullable" && args.len() == 1 {
                    return format!("{}?", self.display(&args[0]));
                }
                let name = self.get(*def).name.to_string();
                if args.is_empty() {
                    name
                } else {
                    let args: Vec<_> = args.iter().map(|a| self.display(a)).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            TypeRef::Array(element) => format!("{}[]", self.display(element)),
            TypeRef::TypeParam { name, .. } => name.to_string(),
            TypeRef::Null => "null".to_string(),
        }
    }
}

/// Predefined type keyword → metadata name
pub fn predefined_type(keyword: &str) -> Option<&'static str> {
    Some(match keyword {
        "bool" => "System.Boolean",
        "byte" => "System.Byte",
        "sbyte" => "System.SByte",
        "char" => "System.Char",
        "decimal" => "System.Decimal",
        "double" => "System.Double",
        "float" => "System.Single",
        "int" => "System.Int32",
        "uint" => "System.UInt32",
        "long" => "System.Int64",
        "ulong" => "System.UInt64",
        "short" => "System.Int16",
        "ushort" => "System.UInt16",
        "object" => "System.Object",
        "string" => "System.String",
        "void" => "System.Void",
        _ => return None,
    })
}

fn keyword_for(qualified: &str) -> Option<&'static str> {
    Some(match qualified {
        "System.Boolean" => "bool",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.Char" => "char",
        "System.Decimal" => "decimal",
        "System.Double" => "double",
        "System.Single" => "float",
        "System.Int32" => "int",
        "System.UInt32" => "uint",
        "System.Int64" => "long",
        "System.UInt64" => "ulong",
        "System.Int16" => "short",
        "System.UInt16" => "ushort",
        "System.Object" => "object",
        "System.String" => "string",
        "System.Void" => "void",
        _ => return None,
    })
}
