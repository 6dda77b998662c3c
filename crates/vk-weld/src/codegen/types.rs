//! Type and constant sections
//!
//! Every emitted item is `#[doc(hidden)]`; the generated crate documents
//! itself through the Vulkan reference rather than per item.

use crate::ir::{Category, Enumeration, Payload, Symbol, SymbolTable};

const HIDDEN: &str = "#[doc(hidden)] pub";

/// Generator for the type-level sections of the bindings
pub struct TypesGenerator<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> TypesGenerator<'a> {
    /// Create a new generator over a resolved symbol table
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// `pub type X = <underlying>;` for each used base type
    pub fn base_types(&self) -> String {
        let mut output = String::new();
        for symbol in self.symbols.iterate(&[Category::BaseType], true) {
            if let Payload::BaseType { underlying } = &symbol.payload {
                output.push_str(&format!(
                    "{} type {} = {};\n",
                    HIDDEN,
                    self.symbols.spelling(&symbol.name),
                    self.symbols.spelling(underlying)
                ));
            }
        }
        output
    }

    /// One constant per member; a type alias first when the enumeration
    /// is backed by an integer type
    pub fn enumeration(&self, name: Option<&str>, enumeration: &Enumeration) -> String {
        let mut output = String::new();

        if let (Some(name), Some(int_type)) = (name, &enumeration.int_type) {
            output.push_str(&format!(
                "{} type {} = {};\n",
                HIDDEN,
                self.symbols.spelling(name),
                self.symbols.spelling(int_type)
            ));
        }

        for member in &enumeration.members {
            output.push_str(&format!(
                "{} const {}: {} = {};\n",
                HIDDEN,
                member.rust_name(),
                member.value.scalar,
                member.value.text
            ));
        }
        output
    }

    /// `NULL_HANDLE`, then every used handle as a `u64` alias
    pub fn handles(&self) -> String {
        let mut output = format!("{} const NULL_HANDLE: u64 = 0;\n", HIDDEN);
        for symbol in self.symbols.iterate(&[Category::Handle], true) {
            output.push_str(&format!(
                "{} type {} = u64;\n",
                HIDDEN,
                self.symbols.spelling(&symbol.name)
            ));
        }
        output
    }

    pub fn function_pointers(&self) -> String {
        self.verbatim(Category::FuncPointer)
    }

    pub fn external_types(&self) -> String {
        self.verbatim(Category::External)
    }

    fn verbatim(&self, category: Category) -> String {
        let mut output = String::new();
        for symbol in self.symbols.iterate(&[category], true) {
            if let Payload::Verbatim { spelling } = &symbol.payload {
                output.push_str(&format!(
                    "{} type {} = {};\n",
                    HIDDEN,
                    self.symbols.spelling(&symbol.name),
                    spelling
                ));
            }
        }
        output
    }

    /// Used enums and bitmasks, interleaved in registration order
    pub fn enumerations(&self) -> String {
        let mut output = String::new();
        for symbol in self
            .symbols
            .iterate(&[Category::Bitmask, Category::Enum], true)
        {
            if let Some(enumeration) = symbol.enumeration() {
                output.push_str(&self.enumeration(Some(&symbol.name), enumeration));
                output.push('\n');
            }
        }
        output
    }

    /// Used structs and unions, interleaved in registration order
    pub fn structs(&self) -> String {
        let mut output = String::new();
        for symbol in self
            .symbols
            .iterate(&[Category::Struct, Category::Union], true)
        {
            output.push_str(&self.generate_struct(symbol));
        }
        output
    }

    fn generate_struct(&self, symbol: &Symbol) -> String {
        let mut output = String::new();

        output.push_str("#[doc(hidden)]\n");
        output.push_str("#[repr(C)]\n");
        if symbol.derives_debug() {
            output.push_str("#[derive(Debug, Copy, Clone)]\n");
        } else {
            output.push_str("#[derive(Copy, Clone)]\n");
        }

        let keyword = match symbol.category {
            Category::Union => "union",
            _ => "struct",
        };
        output.push_str(&format!(
            "pub {} {} {{\n",
            keyword,
            self.symbols.spelling(&symbol.name)
        ));
        for member in symbol.members() {
            output.push_str(&format!("  pub {},\n", member.resolve(self.symbols).render()));
        }
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{fixture, Registry};
    use crate::resolve::{Policy, Resolution};
    use pretty_assertions::assert_eq;

    fn resolution() -> Resolution {
        let registry = Registry::parse(fixture::REGISTRY.as_bytes()).unwrap();
        Resolution::resolve(&registry, &Policy::default()).unwrap()
    }

    #[test]
    fn test_base_types_and_handles() {
        let resolution = resolution();
        let gen = TypesGenerator::new(&resolution.symbols);

        assert_eq!(
            gen.base_types(),
            "#[doc(hidden)] pub type Flags = u32;\n\
             #[doc(hidden)] pub type Bool32 = u32;\n"
        );
        assert_eq!(
            gen.handles(),
            "#[doc(hidden)] pub const NULL_HANDLE: u64 = 0;\n\
             #[doc(hidden)] pub type Instance = u64;\n\
             #[doc(hidden)] pub type PhysicalDevice = u64;\n\
             #[doc(hidden)] pub type Device = u64;\n\
             #[doc(hidden)] pub type CommandPool = u64;\n\
             #[doc(hidden)] pub type SurfaceKHR = u64;\n"
        );
    }

    #[test]
    fn test_api_constants() {
        let resolution = resolution();
        let gen = TypesGenerator::new(&resolution.symbols);

        assert_eq!(
            gen.enumeration(None, &resolution.api_constants),
            "#[doc(hidden)] pub const MAX_PHYSICAL_DEVICE_NAME_SIZE: u32 = 256u32;\n\
             #[doc(hidden)] pub const UUID_SIZE: u32 = 16u32;\n\
             #[doc(hidden)] pub const LOD_CLAMP_NONE: f32 = 1000.0f32;\n\
             #[doc(hidden)] pub const REMAINING_MIP_LEVELS: u32 = !0u32;\n\
             #[doc(hidden)] pub const WHOLE_SIZE: u64 = !0u64;\n\
             #[doc(hidden)] pub const QUEUE_FAMILY_EXTERNAL: u32 = !0 - 1u32;\n"
        );
        assert_eq!(
            gen.enumeration(None, &resolution.extension_names).lines().next(),
            Some("#[doc(hidden)] pub const KHR_SURFACE_EXTENSION_NAME: &str = \"VK_KHR_surface\";")
        );
    }

    #[test]
    fn test_enumerations() {
        let resolution = resolution();
        let gen = TypesGenerator::new(&resolution.symbols);
        let output = gen.enumerations();

        assert!(output.starts_with(
            "#[doc(hidden)] pub type CommandPoolTrimFlags = Flags;\n\n\
             #[doc(hidden)] pub type SurfaceTransformFlagsKHR = Flags;\n\n\
             #[doc(hidden)] pub type Result = u32;\n\
             #[doc(hidden)] pub const SUCCESS: u32 = 0u32;\n"
        ));
        assert!(output.contains("#[doc(hidden)] pub const ERROR_OUT_OF_HOST_MEMORY: u32 = -1i32 as u32;\n"));
        assert!(output.contains("#[doc(hidden)] pub const SURFACE_TRANSFORM_SET_TYPE_BIT_EXT: u32 = 1 << 5;\n"));
        assert!(!output.contains("InternalAllocationType"));
    }

    #[test]
    fn test_structs() {
        let resolution = resolution();
        let gen = TypesGenerator::new(&resolution.symbols);
        let output = gen.structs();

        assert!(output.contains(
            "#[doc(hidden)]\n\
             #[repr(C)]\n\
             #[derive(Debug, Copy, Clone)]\n\
             pub struct InstanceCreateInfo {\n\
             \x20 pub sType: StructureType,\n\
             \x20 pub pNext: *const c_void,\n\
             \x20 pub flags: Flags,\n\
             \x20 pub pApplicationInfo: *const ApplicationInfo,\n\
             \x20 pub enabledExtensionCount: u32,\n\
             \x20 pub ppEnabledExtensionNames: *const *const c_char,\n\
             }\n"
        ));
        assert!(output.contains(
            "#[derive(Copy, Clone)]\n\
             pub struct PhysicalDeviceProperties {\n\
             \x20 pub apiVersion: u32,\n\
             \x20 pub deviceName: [c_char; MAX_PHYSICAL_DEVICE_NAME_SIZE as usize],\n\
             \x20 pub pipelineCacheUUID: [u8; UUID_SIZE as usize],\n\
             }\n"
        ));
        assert!(output.contains("#[derive(Copy, Clone)]\npub struct AllocationCallbacks {\n"));
        assert!(output.contains("  pub pfnAllocation: PFN_vkAllocationFunction,\n"));
    }

    #[test]
    fn test_verbatim_types() {
        let resolution = resolution();
        let gen = TypesGenerator::new(&resolution.symbols);

        assert_eq!(
            gen.function_pointers(),
            "#[doc(hidden)] pub type PFN_vkAllocationFunction = extern \"system\" fn(*mut c_void, usize, usize, SystemAllocationScope) -> *mut c_void;\n\
             #[doc(hidden)] pub type PFN_vkFreeFunction = extern \"system\" fn(*mut c_void, *mut c_void) -> ();\n"
        );
        assert_eq!(gen.external_types(), "");
    }
}
