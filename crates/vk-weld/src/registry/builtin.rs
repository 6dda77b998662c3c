//! Symbols the registry does not describe in a parseable form
//!
//! Function pointer typedefs are C syntax the declaration parser does not
//! handle, and platform types come from headers outside the registry. Both
//! are seeded with fixed Rust spellings.

use crate::ir::{Category, Declaration, Payload, Symbol};
use crate::registry::TypeEntry;

/// `(name, rust signature, requires)` for each built-in function pointer
const FUNCTION_POINTERS: &[(&str, &str, &[&str])] = &[
    ("PFN_vkVoidFunction", "extern \"system\" fn() -> ()", &[]),
    (
        "PFN_vkInternalAllocationNotification",
        "extern \"system\" fn(*mut c_void, usize, InternalAllocationType, SystemAllocationScope) -> ()",
        &["VkInternalAllocationType", "VkSystemAllocationScope"],
    ),
    (
        "PFN_vkInternalFreeNotification",
        "extern \"system\" fn(*mut c_void, usize, InternalAllocationType, SystemAllocationScope) -> ()",
        &["VkInternalAllocationType", "VkSystemAllocationScope"],
    ),
    (
        "PFN_vkReallocationFunction",
        "extern \"system\" fn(*mut c_void, *mut c_void, usize, usize, SystemAllocationScope) -> *mut c_void",
        &["VkSystemAllocationScope"],
    ),
    (
        "PFN_vkAllocationFunction",
        "extern \"system\" fn(*mut c_void, usize, usize, SystemAllocationScope) -> *mut c_void",
        &["VkSystemAllocationScope"],
    ),
    (
        "PFN_vkFreeFunction",
        "extern \"system\" fn(*mut c_void, *mut c_void) -> ()",
        &[],
    ),
    (
        "PFN_vkDebugReportCallbackEXT",
        "extern \"system\" fn(flags: DebugReportFlagsEXT, objectType: DebugReportObjectTypeEXT, object: u64, location: usize, messageCode: i32, pLayerPrefix: *mut c_char, pMessage: *mut c_char, pUserData: *mut c_void) -> Bool32",
        &["VkDebugReportFlagsEXT", "VkDebugReportObjectTypeEXT"],
    ),
    (
        "PFN_vkDebugUtilsMessengerCallbackEXT",
        "extern \"system\" fn(messageSeverity: DebugUtilsMessageSeverityFlagBitsEXT, messageTypes: DebugUtilsMessageTypeFlagsEXT, pCallbackData: *const DebugUtilsMessengerCallbackDataEXT, pUserData: *mut c_void) -> Bool32",
        &[
            "VkDebugUtilsMessageSeverityFlagBitsEXT",
            "VkDebugUtilsMessageTypeFlagsEXT",
            "VkDebugUtilsMessengerCallbackDataEXT",
        ],
    ),
];

/// Platform types and their Rust spelling
const PLATFORM_TYPES: &[(&str, &str)] = &[
    // Xlib
    ("Display", "c_void"),
    ("Window", "c_ulong"),
    ("RROutput", "c_ulong"),
    ("VisualID", "u32"),
    // xcb
    ("xcb_connection_t", "c_void"),
    ("xcb_window_t", "u32"),
    ("xcb_visualid_t", "u32"),
    // Wayland
    ("wl_display", "c_void"),
    ("wl_surface", "c_void"),
    // Win32
    ("HINSTANCE", "*mut c_void"),
    ("HWND", "*mut c_void"),
    ("HANDLE", "*mut c_void"),
    ("DWORD", "c_ulong"),
    ("LPVOID", "*mut c_void"),
    ("BOOL", "i32"),
    ("LPCWSTR", "*mut c_ushort"),
    // Android
    ("ANativeWindow", "c_void"),
    ("AHardwareBuffer", "c_void"),
    // Fuchsia
    ("zx_handle_t", "u32"),
];

const SECURITY_ATTRIBUTES: &str = "win32_SECURITY_ATTRIBUTES";

/// Built-in function pointer symbols
pub fn function_pointers() -> Vec<TypeEntry> {
    FUNCTION_POINTERS
        .iter()
        .map(|(name, signature, requires)| {
            TypeEntry::Symbol(
                Symbol::new(
                    *name,
                    Category::FuncPointer,
                    Payload::Verbatim {
                        spelling: signature.to_string(),
                    },
                )
                .with_requires(requires.iter().copied()),
            )
        })
        .collect()
}

/// Built-in platform symbols, including the Win32 `SECURITY_ATTRIBUTES`
/// struct and its alias
pub fn platform_types() -> Vec<TypeEntry> {
    let mut entries: Vec<TypeEntry> = PLATFORM_TYPES
        .iter()
        .map(|(name, spelling)| {
            TypeEntry::Symbol(Symbol::new(
                *name,
                Category::External,
                Payload::Verbatim {
                    spelling: spelling.to_string(),
                },
            ))
        })
        .collect();

    let members = vec![
        Declaration::value("nLength", "DWORD"),
        Declaration::value("lpSecurityDescriptor", "LPVOID"),
        Declaration::value("bInheritHandle", "BOOL"),
    ];
    entries.push(TypeEntry::Symbol(
        Symbol::new(
            SECURITY_ATTRIBUTES,
            Category::Struct,
            Payload::Members {
                members,
                derive_debug: false,
            },
        )
        .with_requires(["DWORD", "LPVOID", "BOOL"]),
    ));
    entries.push(TypeEntry::Alias {
        name: "SECURITY_ATTRIBUTES".to_string(),
        target: SECURITY_ATTRIBUTES.to_string(),
    });

    entries
}
