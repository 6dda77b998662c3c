//! Small synthetic registry used across the test suites
//!
//! Two core versions, then extensions in registry order: a disabled one,
//! `VK_KHR_surface`, an empty one, `VK_KHR_maintenance1` and
//! `VK_EXT_set_type`. The last is listed after `VK_KHR_surface` although it
//! sorts before it.

pub const REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
    <comment>Synthetic registry</comment>
    <types>
        <type name="vk_platform" category="include">#include "vk_platform.h"</type>
        <type category="define">#define <name>VK_API_VERSION_1_0</name> <type>VK_MAKE_VERSION</type>(1, 0, 0)</type>
        <type requires="vk_platform" name="uint32_t"/>
        <type category="basetype">typedef <type>uint32_t</type> <name>VkFlags</name>;</type>
        <type category="basetype">typedef <type>uint32_t</type> <name>VkBool32</name>;</type>
        <type category="basetype">typedef <type>uint64_t</type> <name>VkDeviceSize</name>;</type>
        <type category="basetype">typedef struct <name>MTLDevice_id</name>;</type>
        <type category="bitmask">typedef <type>VkFlags</type> <name>VkCommandPoolTrimFlags</name>;</type>
        <type category="bitmask" name="VkCommandPoolTrimFlagsKHR" alias="VkCommandPoolTrimFlags"/>
        <type category="bitmask" requires="VkSurfaceTransformFlagBitsKHR">typedef <type>VkFlags</type> <name>VkSurfaceTransformFlagsKHR</name>;</type>
        <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkInstance</name>)</type>
        <type category="handle" parent="VkInstance"><type>VK_DEFINE_HANDLE</type>(<name>VkPhysicalDevice</name>)</type>
        <type category="handle" parent="VkPhysicalDevice"><type>VK_DEFINE_HANDLE</type>(<name>VkDevice</name>)</type>
        <type category="handle" parent="VkDevice"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkCommandPool</name>)</type>
        <type category="handle" parent="VkInstance"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkSurfaceKHR</name>)</type>
        <type name="VkResult" category="enum"/>
        <type name="VkStructureType" category="enum"/>
        <type name="VkSystemAllocationScope" category="enum"/>
        <type name="VkInternalAllocationType" category="enum"/>
        <type name="VkSurfaceTransformFlagBitsKHR" category="enum"/>
        <type category="funcpointer">typedef void (VKAPI_PTR *<name>PFN_vkVoidFunction</name>)(void);</type>
        <type category="struct" name="VkBaseOutStructure">
            <member><type>VkStructureType</type> <name>sType</name></member>
            <member>struct <type>VkBaseOutStructure</type>* <name>pNext</name></member>
        </type>
        <type category="struct" name="VkApplicationInfo">
            <member><type>VkStructureType</type> <name>sType</name></member>
            <member>const <type>void</type>* <name>pNext</name></member>
            <member>const <type>char</type>* <name>pApplicationName</name></member>
            <member><type>uint32_t</type> <name>apiVersion</name></member>
        </type>
        <type category="struct" name="VkInstanceCreateInfo">
            <member><type>VkStructureType</type> <name>sType</name></member>
            <member>const <type>void</type>* <name>pNext</name></member>
            <member><type>VkFlags</type> <name>flags</name></member>
            <member>const <type>VkApplicationInfo</type>* <name>pApplicationInfo</name></member>
            <member><type>uint32_t</type> <name>enabledExtensionCount</name></member>
            <member>const <type>char</type>* const* <name>ppEnabledExtensionNames</name><comment>extension names</comment></member>
        </type>
        <type category="struct" name="VkAllocationCallbacks">
            <member><type>void</type>* <name>pUserData</name></member>
            <member><type>PFN_vkAllocationFunction</type> <name>pfnAllocation</name></member>
            <member><type>PFN_vkFreeFunction</type> <name>pfnFree</name></member>
        </type>
        <type category="struct" name="VkPhysicalDeviceProperties">
            <member><type>uint32_t</type> <name>apiVersion</name></member>
            <member><type>char</type> <name>deviceName</name>[<enum>VK_MAX_PHYSICAL_DEVICE_NAME_SIZE</enum>]</member>
            <member><type>uint8_t</type> <name>pipelineCacheUUID</name>[<enum>VK_UUID_SIZE</enum>]</member>
        </type>
        <type category="union" name="VkClearColorValue">
            <member><type>float</type> <name>float32</name>[4]</member>
            <member><type>uint32_t</type> <name>uint32</name>[4]</member>
        </type>
        <type category="struct" name="VkDisabledThingEXT">
            <member><type>VkStructureType</type> <name>sType</name></member>
        </type>
    </types>
    <enums name="API Constants">
        <enum value="256" name="VK_MAX_PHYSICAL_DEVICE_NAME_SIZE"/>
        <enum value="16" name="VK_UUID_SIZE"/>
        <enum value="1000.0f" name="VK_LOD_CLAMP_NONE"/>
        <enum value="(~0U)" name="VK_REMAINING_MIP_LEVELS"/>
        <enum value="(~0ULL)" name="VK_WHOLE_SIZE"/>
        <enum value="(~0U-1)" name="VK_QUEUE_FAMILY_EXTERNAL"/>
        <enum name="VK_QUEUE_FAMILY_EXTERNAL_KHR" alias="VK_QUEUE_FAMILY_EXTERNAL"/>
    </enums>
    <enums name="VkResult" type="enum">
        <enum value="0" name="VK_SUCCESS"/>
        <enum value="1" name="VK_NOT_READY"/>
        <enum value="-1" name="VK_ERROR_OUT_OF_HOST_MEMORY"/>
        <enum value="-3" name="VK_ERROR_INITIALIZATION_FAILED"/>
    </enums>
    <enums name="VkStructureType" type="enum">
        <enum value="0" name="VK_STRUCTURE_TYPE_APPLICATION_INFO"/>
        <enum value="1" name="VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO"/>
    </enums>
    <enums name="VkSystemAllocationScope" type="enum">
        <enum value="0" name="VK_SYSTEM_ALLOCATION_SCOPE_COMMAND"/>
    </enums>
    <enums name="VkInternalAllocationType" type="enum">
        <enum value="0" name="VK_INTERNAL_ALLOCATION_TYPE_EXECUTABLE"/>
    </enums>
    <enums name="VkSurfaceTransformFlagBitsKHR" type="bitmask">
        <enum bitpos="0" name="VK_SURFACE_TRANSFORM_IDENTITY_BIT_KHR"/>
        <enum bitpos="1" name="VK_SURFACE_TRANSFORM_ROTATE_90_BIT_KHR"/>
    </enums>
    <commands>
        <command>
            <proto><type>VkResult</type> <name>vkCreateInstance</name></proto>
            <param>const <type>VkInstanceCreateInfo</type>* <name>pCreateInfo</name></param>
            <param>const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>
            <param><type>VkInstance</type>* <name>pInstance</name></param>
        </command>
        <command>
            <proto><type>void</type> <name>vkDestroyInstance</name></proto>
            <param><type>VkInstance</type> <name>instance</name></param>
            <param>const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>
        </command>
        <command>
            <proto><type>VkResult</type> <name>vkEnumeratePhysicalDevices</name></proto>
            <param><type>VkInstance</type> <name>instance</name></param>
            <param><type>uint32_t</type>* <name>pPhysicalDeviceCount</name></param>
            <param><type>VkPhysicalDevice</type>* <name>pPhysicalDevices</name></param>
        </command>
        <command>
            <proto><type>void</type> <name>vkGetPhysicalDeviceProperties</name></proto>
            <param><type>VkPhysicalDevice</type> <name>physicalDevice</name></param>
            <param><type>VkPhysicalDeviceProperties</type>* <name>pProperties</name></param>
        </command>
        <command>
            <proto><type>VkResult</type> <name>vkEnumerateInstanceVersion</name></proto>
            <param><type>uint32_t</type>* <name>pApiVersion</name></param>
        </command>
        <command>
            <proto><type>void</type> <name>vkTrimCommandPool</name></proto>
            <param><type>VkDevice</type> <name>device</name></param>
            <param><type>VkCommandPool</type> <name>commandPool</name></param>
            <param><type>VkCommandPoolTrimFlags</type> <name>flags</name></param>
        </command>
        <command name="vkTrimCommandPoolKHR" alias="vkTrimCommandPool"/>
        <command>
            <proto><type>void</type> <name>vkDestroySurfaceKHR</name></proto>
            <param><type>VkInstance</type> <name>instance</name></param>
            <param><type>VkSurfaceKHR</type> <name>surface</name></param>
            <param>const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>
        </command>
        <command>
            <proto><type>VkResult</type> <name>vkGetPhysicalDeviceSurfaceSupportKHR</name></proto>
            <param><type>VkPhysicalDevice</type> <name>physicalDevice</name></param>
            <param><type>uint32_t</type> <name>queueFamilyIndex</name></param>
            <param><type>VkSurfaceKHR</type> <name>surface</name></param>
            <param><type>VkBool32</type>* <name>pSupported</name></param>
        </command>
        <command>
            <proto><type>void</type> <name>vkDisabledThingEXT</name></proto>
            <param><type>VkDevice</type> <name>device</name></param>
            <param>const <type>VkDisabledThingEXT</type>* <name>pInfo</name></param>
        </command>
        <command>
            <proto><type>void</type> <name>vkSetTypeEXT</name></proto>
            <param><type>VkDevice</type> <name>device</name></param>
            <param><type>VkStructureType</type> <name>type</name></param>
        </command>
    </commands>
    <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
        <require comment="Header boilerplate">
            <type name="vk_platform"/>
            <type name="VK_API_VERSION_1_0"/>
        </require>
        <require comment="Instance commands">
            <type name="VkResult"/>
            <command name="vkCreateInstance"/>
            <command name="vkDestroyInstance"/>
            <command name="vkEnumeratePhysicalDevices"/>
            <command name="vkGetPhysicalDeviceProperties"/>
        </require>
        <require comment="API constants">
            <enum name="VK_UUID_SIZE"/>
        </require>
    </feature>
    <feature api="vulkan" name="VK_VERSION_1_1" number="1.1">
        <require>
            <command name="vkEnumerateInstanceVersion"/>
            <command name="vkTrimCommandPool"/>
            <enum extends="VkStructureType" extnumber="157" offset="0" name="VK_STRUCTURE_TYPE_BIND_BUFFER_MEMORY_INFO"/>
            <enum extends="VkResult" extnumber="70" offset="0" dir="-" name="VK_ERROR_OUT_OF_POOL_MEMORY"/>
        </require>
    </feature>
    <extensions>
        <extension name="VK_EXT_disabled_thing" number="3" supported="disabled">
            <require>
                <enum value="1" name="VK_EXT_DISABLED_THING_SPEC_VERSION"/>
                <enum value="&quot;VK_EXT_disabled_thing&quot;" name="VK_EXT_DISABLED_THING_EXTENSION_NAME"/>
                <enum offset="0" extends="VkStructureType" name="VK_STRUCTURE_TYPE_DISABLED_THING_EXT"/>
                <type name="VkDisabledThingEXT"/>
                <command name="vkDisabledThingEXT"/>
                <command name="vkDestroySurfaceKHR"/>
            </require>
        </extension>
        <extension name="VK_KHR_surface" number="1" type="instance" supported="vulkan">
            <require>
                <enum value="25" name="VK_KHR_SURFACE_SPEC_VERSION"/>
                <enum value="&quot;VK_KHR_surface&quot;" name="VK_KHR_SURFACE_EXTENSION_NAME"/>
                <enum offset="0" extends="VkResult" dir="-" name="VK_ERROR_SURFACE_LOST_KHR"/>
                <type name="VkSurfaceKHR"/>
                <type name="VkSurfaceTransformFlagsKHR"/>
                <command name="vkDestroySurfaceKHR"/>
                <command name="vkGetPhysicalDeviceSurfaceSupportKHR"/>
            </require>
        </extension>
        <extension name="VK_NV_empty" number="4" type="device" supported="vulkan">
            <require>
                <enum value="1" name="VK_NV_EMPTY_SPEC_VERSION"/>
                <enum value="&quot;VK_NV_empty&quot;" name="VK_NV_EMPTY_EXTENSION_NAME"/>
            </require>
        </extension>
        <extension name="VK_KHR_maintenance1" number="70" type="device" supported="vulkan">
            <require>
                <enum value="2" name="VK_KHR_MAINTENANCE1_SPEC_VERSION"/>
                <enum value="&quot;VK_KHR_maintenance1&quot;" name="VK_KHR_MAINTENANCE1_EXTENSION_NAME"/>
                <enum offset="1" extends="VkResult" dir="-" name="VK_ERROR_OUT_OF_POOL_MEMORY"/>
                <type name="VkCommandPoolTrimFlagsKHR"/>
                <command name="vkTrimCommandPoolKHR"/>
            </require>
        </extension>
        <extension name="VK_EXT_set_type" number="99" type="device" supported="vulkan">
            <require>
                <enum value="1" name="VK_EXT_SET_TYPE_SPEC_VERSION"/>
                <enum value="&quot;VK_EXT_set_type&quot;" name="VK_EXT_SET_TYPE_EXTENSION_NAME"/>
                <enum bitpos="5" extends="VkSurfaceTransformFlagBitsKHR" name="VK_SURFACE_TRANSFORM_SET_TYPE_BIT_EXT"/>
                <enum offset="0" extends="VkStructureType" name="VK_STRUCTURE_TYPE_SET_TYPE_INFO_EXT"/>
                <type name="VkNotDeclaredEXT"/>
                <command name="vkSetTypeEXT" feature="VK_VERSION_1_1"/>
            </require>
        </extension>
    </extensions>
</registry>
"#;
