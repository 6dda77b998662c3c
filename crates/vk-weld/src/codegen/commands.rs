//! Command section: version macros and the three dispatch tables
//!
//! `Core` loads the Vulkan loader with `libloading` and resolves global
//! commands from it. `InstanceExtensions` and `DeviceExtensions` resolve
//! through `vkGetInstanceProcAddr` / `vkGetDeviceProcAddr`. Every slot
//! starts out as a stub that panics, and a command gated on a version above
//! the requested one stays that way.

use crate::ir::{Command, CommandTable, DispatchLevel, SymbolTable};

const EXTERN_SYSTEM: &str = "extern \"system\" ";

const CORE_MISSING: &str =
    "Vulkan core not initialized, make sure to have a valid instance of Core";

/// `(file name, cfg predicate)` of the Vulkan loader per platform
const LOADER_LIBRARIES: &[(&str, &str)] = &[
    ("vulkan-1.dll", "windows"),
    ("libvulkan.so", "all(unix, not(target_os = \"android\"), not(target_os = \"macos\"))"),
    ("libvulkan.so", "target_os = \"android\""),
    ("libvulkan.1.dylib", "target_os = \"macos\""),
];

/// One dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Table {
    level: DispatchLevel,
    struct_name: &'static str,
}

impl Table {
    const CORE: Table = Table {
        level: DispatchLevel::Global,
        struct_name: "Core",
    };
    const INSTANCE: Table = Table {
        level: DispatchLevel::Instance,
        struct_name: "InstanceExtensions",
    };
    const DEVICE: Table = Table {
        level: DispatchLevel::Device,
        struct_name: "DeviceExtensions",
    };

    /// Field holding the dispatchable handle
    fn handle_field(&self) -> &'static str {
        match self.level {
            DispatchLevel::Global => "",
            DispatchLevel::Instance => "hinstance",
            DispatchLevel::Device => "hdevice",
        }
    }

    /// Registry name of the dispatchable handle
    fn handle_type(&self) -> &'static str {
        match self.level {
            DispatchLevel::Global => "",
            DispatchLevel::Instance => "VkInstance",
            DispatchLevel::Device => "VkDevice",
        }
    }

    /// Global forwarder used to look up this table's commands
    fn proc_addr(&self) -> &'static str {
        match self.level {
            DispatchLevel::Global => "",
            DispatchLevel::Instance => "GetInstanceProcAddr",
            DispatchLevel::Device => "GetDeviceProcAddr",
        }
    }
}

/// Generator for the command section
pub struct CommandsGenerator<'a> {
    commands: &'a CommandTable,
    symbols: &'a SymbolTable,
}

impl<'a> CommandsGenerator<'a> {
    /// Create a new generator over resolved tables
    pub fn new(commands: &'a CommandTable, symbols: &'a SymbolTable) -> Self {
        Self { commands, symbols }
    }

    /// Version macros, version constants and the three tables
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_version_macros());
        output.push_str(&self.generate_version_constants());
        output.push_str("\n\n");
        output.push_str(&self.generate_table(Table::CORE));
        output.push_str("\n\n");
        output.push_str(&self.generate_table(Table::INSTANCE));
        output.push_str("\n\n");
        output.push_str(&self.generate_table(Table::DEVICE));

        output
    }

    fn generate_version_macros(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Create a version number from a major, minor and patch number\n");
        output.push_str("#[macro_export]\n");
        output.push_str("macro_rules! make_version {\n");
        output.push_str(
            "  ($major:expr, $minor:expr, $patch:expr) => ((($major) << 22) | (($minor) << 12) | ($patch))\n",
        );
        output.push_str("}\n");

        for (name, body) in [
            ("major", "($ver >> 22)"),
            ("minor", "(($ver >> 12) & 0x3ff)"),
            ("patch", "($ver & 0xfff)"),
        ] {
            output.push_str(&format!(
                "/// Extract the {} number from a version created with [make_version]\n",
                name
            ));
            output.push_str("#[macro_export]\n");
            output.push_str(&format!("macro_rules! version_{} {{\n", name));
            output.push_str(&format!("  ($ver:expr) => {}\n", body));
            output.push_str("}\n");
        }

        output
    }

    /// One `VERSION_X_Y` constant per version gating an activated command
    pub fn generate_version_constants(&self) -> String {
        let mut output = String::new();
        for version in self.commands.versions() {
            output.push_str(&format!(
                "pub const {}: u32 = make_version!({}, {}, 0);\n",
                version.const_name(),
                version.major,
                version.minor
            ));
        }
        output
    }

    fn generate_table(&self, table: Table) -> String {
        let commands: Vec<&Command> = self.commands.activated_at(table.level).collect();
        let mut output = String::new();

        // struct definition
        match table.level {
            DispatchLevel::Global => {
                output.push_str("/// Vulkan core commands\n");
                output.push_str("///\n");
                output.push_str("/// Holds the loaded Vulkan library and a function pointer per core command.\n");
                output.push_str("/// At most one instance may exist at a time; the global command functions\n");
                output.push_str("/// forward to it.\n");
            }
            DispatchLevel::Instance | DispatchLevel::Device => {
                output.push_str(&format!("/// Vulkan {} extensions\n", table.level));
                output.push_str("#[derive(Clone, Copy)]\n");
            }
        }
        output.push_str(&format!("pub struct {} {{\n", table.struct_name));
        output.push_str("  #[allow(dead_code)]\n");
        match table.level {
            DispatchLevel::Global => {
                output.push_str("  lib: Option<libloading::Library>,\n");
                output.push_str("  feature: u32,\n");
            }
            _ => output.push_str(&format!(
                "  {}: {},\n",
                table.handle_field(),
                self.symbols.spelling(table.handle_type())
            )),
        }
        for command in &commands {
            output.push_str(&format!(
                "  {}: {},\n",
                ptr_name(command),
                self.fn_type(command)
            ));
        }
        output.push_str("}\n");

        // stubs for commands that are not loaded
        output.push_str("\n\n");
        for command in &commands {
            output.push_str(&self.generate_panic_stub(command));
        }

        output.push_str("\n\n");
        output.push_str(&self.generate_default(table, &commands));
        output.push_str("\n\n");
        output.push_str(&self.generate_impl(table, &commands));

        if table.level == DispatchLevel::Global {
            output.push_str(&generate_core_drop(table));
            output.push_str("\n\n");
            output.push_str(&format!(
                "static mut CORE: Option<*mut {}> = None;\n\n",
                table.struct_name
            ));
            for command in &commands {
                output.push_str(&self.generate_forwarder(command));
            }
        }

        output
    }

    fn generate_default(&self, table: Table, commands: &[&Command]) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl Default for {} {{\n", table.struct_name));
        output.push_str("  /// Every function pointer panics when called\n");
        output.push_str(&format!("  fn default() -> {} {{\n", table.struct_name));
        output.push_str(&format!("    {} {{\n", table.struct_name));
        match table.level {
            DispatchLevel::Global => {
                output.push_str("      lib: None,\n");
                output.push_str("      feature: 0,\n");
            }
            _ => output.push_str(&format!("      {}: NULL_HANDLE,\n", table.handle_field())),
        }
        for command in commands {
            output.push_str(&format!(
                "      {}: {},\n",
                ptr_name(command),
                panic_name(command)
            ));
        }
        output.push_str("    }\n");
        output.push_str("  }\n");
        output.push_str("}\n");

        output
    }

    fn generate_impl(&self, table: Table, commands: &[&Command]) -> String {
        let mut output = String::new();

        output.push_str(&format!("impl {} {{\n", table.struct_name));
        match table.level {
            DispatchLevel::Global => output.push_str(&self.generate_core_constructors(table, commands)),
            _ => output.push_str(&self.generate_extension_constructor(table, commands)),
        }
        output.push_str("\n\n");

        match table.level {
            DispatchLevel::Global => {
                output.push_str("  /// Version the commands were loaded for, see [make_version]\n");
                output.push_str("  pub fn get_feature(&self) -> u32 {\n");
                output.push_str("    self.feature\n");
                output.push_str("  }\n");
            }
            _ => {
                output.push_str(&format!("  /// Handle the {} were loaded for\n", table.struct_name));
                output.push_str(&format!(
                    "  pub fn get_handle(&self) -> {} {{\n",
                    self.symbols.spelling(table.handle_type())
                ));
                output.push_str(&format!("    self.{}\n", table.handle_field()));
                output.push_str("  }\n");
            }
        }
        output.push('\n');

        for command in commands {
            output.push_str(&indent(&self.generate_member(command), "  "));
        }
        output.push_str("}\n");

        output
    }

    fn generate_core_constructors(&self, table: Table, commands: &[&Command]) -> String {
        let latest = self
            .commands
            .latest_version()
            .map(|v| v.const_name())
            .unwrap_or_else(|| "make_version!(1, 0, 0)".to_string());

        let mut output = String::new();
        output.push_str("  /// Load core commands for the newest known version\n");
        output.push_str(&format!("  pub fn new() -> std::boxed::Box<{}> {{\n", table.struct_name));
        output.push_str(&format!("    Self::with_feature({})\n", latest));
        output.push_str("  }\n");
        output.push('\n');
        output.push_str("  /// Load core commands for the given version\n");
        output.push_str("  ///\n");
        output.push_str("  /// Commands introduced after `feature` keep their panicking stub.\n");
        output.push_str(&format!(
            "  pub fn with_feature(feature: u32) -> std::boxed::Box<{}> {{\n",
            table.struct_name
        ));
        for (library, predicate) in LOADER_LIBRARIES {
            output.push_str(&format!("    #[cfg({})]\n", predicate));
            output.push_str(&format!("    const LIBRARY: &str = \"{}\";\n", library));
        }
        output.push_str("    unsafe {\n");
        output.push_str("      let vk_dl = libloading::Library::new(LIBRARY).expect(\"vulkan not found\");\n");
        for command in commands {
            output.push_str(&indent(&self.generate_core_load(command), "      "));
        }
        output.push('\n');
        output.push_str(&format!("      let c = {} {{\n", table.struct_name));
        output.push_str("        lib: Some(vk_dl),\n");
        output.push_str("        feature,\n");
        for command in commands {
            output.push_str(&format!("        {},\n", ptr_name(command)));
        }
        output.push_str("      };\n");
        output.push('\n');
        output.push_str("      CORE = Some(std::boxed::Box::into_raw(std::boxed::Box::new(c)));\n");
        output.push_str("      std::boxed::Box::from_raw(CORE.unwrap())\n");
        output.push_str("    }\n");
        output.push_str("  }\n");
        output
    }

    fn generate_core_load(&self, command: &Command) -> String {
        let fn_type = self.fn_type(command);
        let mut output = String::new();
        output.push_str(&format!(
            "let {} = if feature < {} {{\n",
            ptr_name(command),
            self.version_const(command)
        ));
        output.push_str(&format!("  {} as {}\n", panic_name(command), fn_type));
        output.push_str("} else {\n");
        output.push_str(&format!(
            "  *vk_dl.get::<{}>(b\"{}\\0\").expect(\"could not find symbol for {}\")\n",
            fn_type,
            command.name(),
            command.name()
        ));
        output.push_str("};\n");
        output
    }

    fn generate_extension_constructor(&self, table: Table, commands: &[&Command]) -> String {
        let handle = table.handle_field();
        let mut output = String::new();

        output.push_str(&format!("  /// Load {} extensions for `{}`\n", table.level, handle));
        output.push_str("  ///\n");
        output.push_str("  /// Needs a live [Core]; its version gates which commands are loaded.\n");
        output.push_str(&format!(
            "  pub fn new({}: {}) -> {} {{\n",
            handle,
            self.symbols.spelling(table.handle_type()),
            table.struct_name
        ));
        if !commands.is_empty() {
            output.push_str("    let mut name;\n");
            output.push_str("    let mut ptr;\n");
        }
        output.push('\n');
        output.push_str("    unsafe {\n");
        output.push_str(&format!(
            "      let feature = (*CORE.expect(\"{}\")).feature;\n",
            CORE_MISSING
        ));
        for command in commands {
            output.push_str(&indent(&self.generate_extension_load(table, command), "      "));
        }
        output.push('\n');
        output.push_str(&format!("      {} {{\n", table.struct_name));
        output.push_str(&format!("        {},\n", handle));
        for command in commands {
            output.push_str(&format!("        {},\n", ptr_name(command)));
        }
        output.push_str("      }\n");
        output.push_str("    }\n");
        output.push_str("  }\n");

        output
    }

    fn generate_extension_load(&self, table: Table, command: &Command) -> String {
        let fn_type = self.fn_type(command);
        let mut output = String::new();
        output.push_str(&format!(
            "name = std::ffi::CString::new(\"{}\").unwrap();\n",
            command.name()
        ));
        output.push_str(&format!(
            "let {} = if feature < {} {{\n",
            ptr_name(command),
            self.version_const(command)
        ));
        output.push_str(&format!("  {} as {}\n", panic_name(command), fn_type));
        output.push_str("} else {\n");
        output.push_str(&format!(
            "  ptr = {}({}, name.as_ptr());\n",
            table.proc_addr(),
            table.handle_field()
        ));
        output.push_str("  if (ptr as *const c_void).is_null() {\n");
        output.push_str(&format!("    {} as {}\n", panic_name(command), fn_type));
        output.push_str("  } else {\n");
        output.push_str("    mem::transmute(ptr)\n");
        output.push_str("  }\n");
        output.push_str("};\n\n");
        output
    }

    fn generate_panic_stub(&self, command: &Command) -> String {
        let mut output = format!(
            "{}fn {}({}){} {{\n",
            EXTERN_SYSTEM,
            panic_name(command),
            self.params(command, |p| format!("_{}", p)),
            self.ret(command)
        );
        output.push_str(&format!("    panic!(\"extension {} not loaded\")\n", command.name()));
        output.push_str("}\n");
        output
    }

    fn generate_member(&self, command: &Command) -> String {
        let mut output = format!(
            "#[doc(hidden)] pub fn {}(&self, {}){} {{\n",
            command.prototype.rust_name(),
            self.params(command, str::to_string),
            self.ret(command)
        );
        output.push_str(&format!(
            "  (self.{})({})\n",
            ptr_name(command),
            self.arg_names(command)
        ));
        output.push_str("}\n");
        output
    }

    fn generate_forwarder(&self, command: &Command) -> String {
        let mut output = format!(
            "#[doc(hidden)] pub fn {}({}){} {{\n",
            command.prototype.rust_name(),
            self.params(command, str::to_string),
            self.ret(command)
        );
        output.push_str("  unsafe {\n");
        output.push_str(&format!("    let ptr = CORE.expect(\"{}\");\n", CORE_MISSING));
        output.push_str(&format!(
            "    ((*ptr).{})({})\n",
            ptr_name(command),
            self.arg_names(command)
        ));
        output.push_str("  }\n");
        output.push_str("}\n");
        output
    }

    /// `extern "system" fn(params) -> ret`
    fn fn_type(&self, command: &Command) -> String {
        format!(
            "{}fn({}){}",
            EXTERN_SYSTEM,
            self.params(command, str::to_string),
            self.ret(command)
        )
    }

    /// Rendered parameter list, with `rename` applied to each name
    fn params(&self, command: &Command, rename: impl Fn(&str) -> String) -> String {
        command
            .prototype
            .params
            .iter()
            .map(|p| {
                let mut resolved = p.resolve(self.symbols);
                resolved.name = rename(&resolved.name);
                resolved.render()
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn arg_names(&self, command: &Command) -> String {
        command
            .prototype
            .params
            .iter()
            .map(|p| p.resolve(self.symbols).name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn ret(&self, command: &Command) -> String {
        if command.prototype.returns_void() {
            String::new()
        } else {
            format!(" -> {}", self.symbols.spelling(&command.prototype.return_type))
        }
    }

    fn version_const(&self, command: &Command) -> String {
        command
            .feature()
            .map(|f| f.version.const_name())
            .unwrap_or_else(|| "VERSION_1_0".to_string())
    }
}

fn generate_core_drop(table: Table) -> String {
    let mut output = String::new();
    output.push_str(&format!("impl Drop for {} {{\n", table.struct_name));
    output.push_str("  fn drop(&mut self) {\n");
    output.push_str("    unsafe {\n");
    output.push_str("      CORE = None;\n");
    output.push_str("    }\n");
    output.push_str("  }\n");
    output.push_str("}\n");
    output
}

fn ptr_name(command: &Command) -> String {
    format!("{}_ptr", command.prototype.rust_name())
}

fn panic_name(command: &Command) -> String {
    format!("{}_panic", command.prototype.rust_name())
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{}{}\n", prefix, line)
            }
        })
        .collect()
}
