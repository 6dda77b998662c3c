//! Result classification section
//!
//! Splits the members of `VkResult` into `Success` (non-negative) and
//! `Error` (negative) enums and emits `make_result` plus the checking
//! macros around it.

use crate::ir::{EnumMember, Enumeration};

/// Generator for the result section
pub struct ResultGenerator<'a> {
    result: &'a Enumeration,
}

impl<'a> ResultGenerator<'a> {
    /// Create a new generator over the members of `VkResult`
    pub fn new(result: &'a Enumeration) -> Self {
        Self { result }
    }

    fn successes(&self) -> impl Iterator<Item = &EnumMember> {
        self.result.members.iter().filter(|m| !m.value.is_negative())
    }

    fn errors(&self) -> impl Iterator<Item = &EnumMember> {
        self.result.members.iter().filter(|m| m.value.is_negative())
    }

    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_macros());
        output.push_str("\n\n");
        output.push_str(&self.generate_make_result());
        output.push('\n');
        output.push_str(&self.generate_success());
        output.push('\n');
        output.push_str(&self.generate_error());

        output
    }

    fn generate_macros(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Wraps a call to a vulkan command and converts its result with [make_result].\n");
        output.push_str("///\n");
        output.push_str("/// Failures are printed with the file and line of the call.\n");
        output.push_str("#[macro_export]\n");
        output.push_str("macro_rules! vk_check {\n");
        output.push_str("  ($fn:expr) => {{\n");
        output.push_str("    let r = $crate::make_result($fn);\n");
        output.push_str("    if let Err(e) = r {\n");
        output.push_str("      println!(\n");
        output.push_str("        \"{} failed with {:?} in \\\"{}\\\" at line {}\",\n");
        output.push_str("        stringify!($fn),\n");
        output.push_str("        e,\n");
        output.push_str("        file!(),\n");
        output.push_str("        line!()\n");
        output.push_str("      );\n");
        output.push_str("    }\n");
        output.push_str("    r\n");
        output.push_str("  }};\n");
        output.push_str("}\n");
        output.push('\n');
        output.push_str("/// Same as [vk_check] but unwraps the result.\n");
        output.push_str("#[macro_export]\n");
        output.push_str("macro_rules! vk_uncheck {\n");
        output.push_str("  ($fn:expr) => {{ vk_check!($fn).unwrap() }};\n");
        output.push_str("}\n");

        output
    }

    fn generate_make_result(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Converts a vulkan return code into a `Result<Success, Error>`\n");
        output.push_str("pub fn make_result(r: crate::Result) -> std::result::Result<Success, Error> {\n");
        output.push_str("  match r {\n");
        for member in &self.result.members {
            let name = member.rust_name();
            if member.value.is_negative() {
                output.push_str(&format!("    {} => Err(Error::{}),\n", name, name));
            } else {
                output.push_str(&format!("    {} => Ok(Success::{}),\n", name, name));
            }
        }
        output.push_str("    _ => Err(Error::UNKNOWN),\n");
        output.push_str("  }\n");
        output.push_str("}\n");

        output
    }

    fn generate_success(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Successful return codes\n");
        output.push_str("#[derive(Debug, Clone, Copy)]\n");
        output.push_str("pub enum Success {\n");
        for member in self.successes() {
            output.push_str(&format!("  {},\n", member.rust_name()));
        }
        output.push_str("}\n");
        output.push_str("impl Success {\n");
        output.push_str("  /// The vulkan return code\n");
        output.push_str("  pub fn vk_result(&self) -> crate::Result {\n");
        output.push_str("    match self {\n");
        for member in self.successes() {
            output.push_str(&format!(
                "      Success::{} => crate::{},\n",
                member.rust_name(),
                member.rust_name()
            ));
        }
        output.push_str("    }\n");
        output.push_str("  }\n");
        output.push_str("}\n");

        output
    }

    fn generate_error(&self) -> String {
        let mut output = String::new();

        output.push_str("/// Unsuccessful return codes\n");
        output.push_str("#[derive(Debug, Clone, Copy)]\n");
        output.push_str("pub enum Error {\n");
        for member in self.errors() {
            output.push_str(&format!("  {},\n", member.rust_name()));
        }
        output.push_str("  UNKNOWN,\n");
        output.push_str("}\n");
        output.push_str("impl Error {\n");
        output.push_str("  /// The vulkan return code; `UNKNOWN` maps to the largest value\n");
        output.push_str("  pub fn vk_result(&self) -> crate::Result {\n");
        output.push_str("    match self {\n");
        for member in self.errors() {
            output.push_str(&format!(
                "      Error::{} => crate::{},\n",
                member.rust_name(),
                member.rust_name()
            ));
        }
        output.push_str("      Error::UNKNOWN => crate::Result::MAX,\n");
        output.push_str("    }\n");
        output.push_str("  }\n");
        output.push_str("}\n");

        output
    }
}
