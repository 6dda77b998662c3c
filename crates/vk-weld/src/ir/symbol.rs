//! Symbol table: every named registry entity plus aliases
//!
//! Symbols keep first-registration order, which is the order they are
//! emitted in. The `used` flag on each symbol is the only state the
//! resolver changes.

use crate::diagnostics::DiagnosticsCollector;
use crate::ir::{is_primitive, primitive_spelling, Category, Payload, Symbol};
use indexmap::IndexMap;

/// Prefix stripped from type names on emission
const TYPE_PREFIX: &str = "Vk";

/// Table of registry symbols keyed by name
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
    aliases: IndexMap<String, String>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol; an existing symbol of the same name is kept
    ///
    /// Returns whether the symbol was added.
    pub fn register(&mut self, symbol: Symbol) -> bool {
        if self.symbols.contains_key(&symbol.name) {
            return false;
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        true
    }

    /// Record `name` as an alias of `target`
    pub fn register_alias(&mut self, name: impl Into<String>, target: impl Into<String>) -> bool {
        let name = name.into();
        if self.aliases.contains_key(&name) {
            return false;
        }
        self.aliases.insert(name, target.into());
        true
    }

    /// Map a primitive to its Rust spelling or chase one alias hop
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        if let Some(primitive) = primitive_spelling(name) {
            return primitive;
        }
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// Emission-ready spelling of a type name
    ///
    /// `Vk` is stripped from symbol names except for function pointers and
    /// platform types. Primitives and unknown names pass through resolved.
    pub fn spelling(&self, name: &str) -> String {
        let resolved = self.resolve(name);
        match self.symbols.get(resolved) {
            Some(symbol) if !symbol.category.keeps_registry_name() => resolved
                .strip_prefix(TYPE_PREFIX)
                .unwrap_or(resolved)
                .to_string(),
            _ => resolved.to_string(),
        }
    }

    /// Mark `name` and everything it depends on as used
    ///
    /// Primitives are ignored, unknown names are reported and skipped.
    /// A symbol is marked before its dependencies are visited, so cycles
    /// terminate.
    pub fn require(&mut self, name: &str, diagnostics: &mut DiagnosticsCollector) {
        if is_primitive(name) {
            return;
        }
        let name = self.resolve(name).to_string();

        let requires = match self.symbols.get_mut(&name) {
            None => {
                diagnostics.type_not_found(&name);
                return;
            }
            Some(symbol) if symbol.used => return,
            Some(symbol) => {
                symbol.used = true;
                symbol.requires.clone()
            }
        };

        for dependency in &requires {
            self.require(dependency, diagnostics);
        }
    }

    /// Symbols of the given categories in registration order
    pub fn iterate<'a>(
        &'a self,
        categories: &'a [Category],
        used_only: bool,
    ) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols
            .values()
            .filter(move |s| categories.contains(&s.category))
            .filter(move |s| !used_only || s.used)
    }

    /// Look up a symbol by its exact name
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Mutable lookup by exact name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    /// Look up a symbol after alias resolution
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(self.resolve(name))
    }

    /// Whether `name` (after alias resolution) has been required
    pub fn is_used(&self, name: &str) -> bool {
        self.lookup(name).map_or(false, |s| s.used)
    }

    /// Number of registered symbols, aliases excluded
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when no symbol is registered
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of symbols marked used
    pub fn used_count(&self) -> usize {
        self.symbols.values().filter(|s| s.used).count()
    }

    /// Decide which structs can derive `Debug`
    ///
    /// A struct qualifies when it has no fixed-size array or function
    /// pointer member, requires no union, and every struct it requires
    /// qualifies too. Iterates to a fixed point.
    pub fn infer_debug_derives(&mut self) {
        let structs: Vec<String> = self
            .iterate(&[Category::Struct], false)
            .map(|s| s.name.clone())
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for name in &structs {
                let Some(symbol) = self.symbols.get(name) else { continue };
                if symbol.derives_debug() || !self.can_derive_debug(symbol) {
                    continue;
                }
                if let Some(Symbol {
                    payload: Payload::Members { derive_debug, .. },
                    ..
                }) = self.symbols.get_mut(name)
                {
                    *derive_debug = true;
                    changed = true;
                }
            }
        }
    }

    fn can_derive_debug(&self, symbol: &Symbol) -> bool {
        let category_of = |name: &str| self.lookup(name).map(|s| s.category);

        let members_ok = symbol
            .members()
            .iter()
            .all(|m| !m.is_array() && category_of(&m.ty) != Some(Category::FuncPointer));

        members_ok
            && symbol.requires.iter().all(|r| match self.lookup(r) {
                Some(s) if s.category == Category::Union => false,
                Some(s) if s.category == Category::Struct => s.derives_debug(),
                _ => true,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::AnomalyCode;
    use crate::ir::{ArrayLength, Declaration, Enumeration, Shape};

    fn structure(name: &str, members: Vec<Declaration>) -> Symbol {
        let requires: Vec<String> = members.iter().map(|m| m.ty.clone()).collect();
        Symbol::new(
            name,
            Category::Struct,
            Payload::Members {
                members,
                derive_debug: false,
            },
        )
        .with_requires(requires)
    }

    fn handle(name: &str) -> Symbol {
        Symbol::new(name, Category::Handle, Payload::Handle { parent: None })
    }

    fn used_names(table: &SymbolTable) -> Vec<&str> {
        table
            .iterate(&[Category::Struct, Category::Handle, Category::Enum], true)
            .map(|s| s.name.as_str())
            .collect()
    }

    #[test]
    fn test_register_first_wins() {
        let mut table = SymbolTable::new();
        assert!(table.register(handle("VkDevice")));
        assert!(!table.register(structure("VkDevice", vec![])));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("VkDevice").unwrap().category, Category::Handle);
    }

    #[test]
    fn test_require_is_idempotent() {
        let mut table = SymbolTable::new();
        table.register(structure("VkA", vec![Declaration::value("b", "VkB")]));
        table.register(handle("VkB"));
        let mut diagnostics = DiagnosticsCollector::new();

        table.require("VkA", &mut diagnostics);
        let once = used_names(&table).join(",");
        table.require("VkA", &mut diagnostics);

        assert_eq!(used_names(&table).join(","), once);
        assert_eq!(table.used_count(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_require_cycle_terminates() {
        let mut table = SymbolTable::new();
        table.register(structure("VkA", vec![Declaration::value("b", "VkB")]));
        table.register(structure("VkB", vec![Declaration::value("a", "VkA")]));
        let mut diagnostics = DiagnosticsCollector::new();

        table.require("VkA", &mut diagnostics);

        assert!(table.is_used("VkA"));
        assert!(table.is_used("VkB"));
        assert_eq!(table.used_count(), 2);
    }

    #[test]
    fn test_alias_transparency() {
        let mut table = SymbolTable::new();
        table.register(Symbol::new(
            "VkPointClippingBehavior",
            Category::Enum,
            Payload::Enumeration(Enumeration::new("uint32_t")),
        ));
        table.register_alias("VkPointClippingBehaviorKHR", "VkPointClippingBehavior");
        let mut diagnostics = DiagnosticsCollector::new();

        table.require("VkPointClippingBehaviorKHR", &mut diagnostics);
        table.require("VkPointClippingBehavior", &mut diagnostics);

        assert_eq!(used_names(&table), ["VkPointClippingBehavior"]);
        assert_eq!(table.spelling("VkPointClippingBehaviorKHR"), "PointClippingBehavior");
    }

    #[test]
    fn test_unknown_and_primitive() {
        let mut table = SymbolTable::new();
        let mut diagnostics = DiagnosticsCollector::new();

        table.require("uint32_t", &mut diagnostics);
        assert!(diagnostics.is_empty());

        table.require("VkMissing", &mut diagnostics);
        table.require("VkMissing", &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.has(AnomalyCode::TypeNotFound));
    }

    #[test]
    fn test_spelling() {
        let mut table = SymbolTable::new();
        table.register(handle("VkInstance"));
        table.register(Symbol::new(
            "PFN_vkVoidFunction",
            Category::FuncPointer,
            Payload::Verbatim {
                spelling: "extern \"system\" fn() -> ()".to_string(),
            },
        ));

        assert_eq!(table.spelling("VkInstance"), "Instance");
        assert_eq!(table.spelling("PFN_vkVoidFunction"), "PFN_vkVoidFunction");
        assert_eq!(table.spelling("uint64_t"), "u64");
        assert_eq!(table.spelling("VkUnknown"), "VkUnknown");
    }

    #[test]
    fn test_iterate_keeps_registration_order() {
        let mut table = SymbolTable::new();
        for name in ["VkC", "VkA", "VkB"] {
            table.register(handle(name));
        }
        let names: Vec<&str> = table
            .iterate(&[Category::Handle], false)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["VkC", "VkA", "VkB"]);
        assert_eq!(table.iterate(&[Category::Handle], true).count(), 0);
    }

    #[test]
    fn test_debug_derive_fixed_point() {
        let mut table = SymbolTable::new();
        // registered before its dependency, needs a second pass
        table.register(structure("VkOuter", vec![Declaration::value("inner", "VkInner")]));
        table.register(structure("VkInner", vec![Declaration::value("x", "uint32_t")]));
        table.register(structure(
            "VkArray",
            vec![Declaration {
                name: "data".to_string(),
                ty: "float".to_string(),
                shape: Shape::Array(vec![ArrayLength::Literal(4)]),
            }],
        ));
        table.register(structure("VkHoldsArray", vec![Declaration::value("a", "VkArray")]));
        table.register(Symbol::new(
            "VkClearValue",
            Category::Union,
            Payload::Members {
                members: vec![],
                derive_debug: false,
            },
        ));
        table.register(structure("VkHoldsUnion", vec![Declaration::value("v", "VkClearValue")]));

        table.infer_debug_derives();

        assert!(table.get("VkOuter").unwrap().derives_debug());
        assert!(table.get("VkInner").unwrap().derives_debug());
        assert!(!table.get("VkArray").unwrap().derives_debug());
        assert!(!table.get("VkHoldsArray").unwrap().derives_debug());
        assert!(!table.get("VkHoldsUnion").unwrap().derives_debug());
        assert!(!table.get("VkClearValue").unwrap().derives_debug());
    }

    #[test]
    fn test_debug_derive_sees_through_aliases() {
        let mut table = SymbolTable::new();
        table.register(structure(
            "VkArray",
            vec![Declaration {
                name: "data".to_string(),
                ty: "float".to_string(),
                shape: Shape::Array(vec![ArrayLength::Literal(4)]),
            }],
        ));
        table.register_alias("VkArrayKHR", "VkArray");
        table.register(Symbol::new(
            "VkClearValue",
            Category::Union,
            Payload::Members {
                members: vec![],
                derive_debug: false,
            },
        ));
        table.register_alias("VkClearValueKHR", "VkClearValue");
        table.register(Symbol::new(
            "PFN_vkVoidFunction",
            Category::FuncPointer,
            Payload::Verbatim {
                spelling: "extern \"system\" fn() -> ()".to_string(),
            },
        ));
        table.register_alias("PFN_vkVoidFunctionKHR", "PFN_vkVoidFunction");
        table.register(structure("VkInner", vec![Declaration::value("x", "uint32_t")]));
        table.register_alias("VkInnerKHR", "VkInner");

        table.register(structure("VkViaStructAlias", vec![Declaration::value("a", "VkArrayKHR")]));
        table.register(structure("VkViaUnionAlias", vec![Declaration::value("v", "VkClearValueKHR")]));
        table.register(structure(
            "VkViaFuncPointerAlias",
            vec![Declaration::value("f", "PFN_vkVoidFunctionKHR")],
        ));
        table.register(structure("VkViaGoodAlias", vec![Declaration::value("i", "VkInnerKHR")]));

        table.infer_debug_derives();

        assert!(!table.get("VkViaStructAlias").unwrap().derives_debug());
        assert!(!table.get("VkViaUnionAlias").unwrap().derives_debug());
        assert!(!table.get("VkViaFuncPointerAlias").unwrap().derives_debug());
        assert!(table.get("VkViaGoodAlias").unwrap().derives_debug());
    }
}
