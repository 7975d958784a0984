
use ash::vk;
use ash::vk_make_version;
use ash::version::{InstanceV1_0, EntryV1_0};

use crate::context::debug::DebugType;
use crate::{vkuint, vkchar};
use crate::error::{VkResult, VkError};

use std::ffi::CString;
use std::ptr;

/// The configuration parameters used in the initialization of `vk::Instance`.
pub struct InstanceConfig {

    /// `api_version` is the highest version of Vulkan the application is designed to use.
    pub api_version: vkuint,
    /// `application_version` is the developer-supplied version number of the application.
    pub application_version: vkuint,
    /// `engine_version` is the developer-supplied version number of the engine used to create the application.
    pub engine_version: vkuint,
    pub application_name: String,
    pub engine_name: String,
    /// `require_layer_names` lists the instance layers that must be present, or instance creation is aborted.
    pub require_layer_names: Vec<String>,
    /// `debug` selects the debug tool wired into the vulkan backend.
    pub debug: DebugType,
}

impl Default for InstanceConfig {

    fn default() -> InstanceConfig {

        // validation is a build-configuration switch, not a runtime one.
        let (require_layer_names, debug) = if cfg!(debug_assertions) {
            (vec![String::from("VK_LAYER_LUNARG_standard_validation")], DebugType::DebugReport)
        } else {
            (Vec::new(), DebugType::None)
        };

        InstanceConfig {
            api_version         : vk_make_version!(1, 0, 0),
            application_version : vk_make_version!(1, 0, 0),
            engine_version      : vk_make_version!(1, 0, 0),
            application_name    : String::from("TRIANGLE DEMO"),
            engine_name         : String::from("NO ENGINE"),
            require_layer_names, debug,
        }
    }
}

/// Wrapper class for `vk::Instance` object.
pub struct VkInstance {

    /// handle of `vk::Instance`.
    pub(crate) handle: ash::Instance,
    /// the object used in instance creation defined in ash crate.
    pub(crate) entry: ash::Entry,
    /// the names of the vulkan layers enabled at instance creation, kept for logical device creation.
    pub(crate) enable_layer_names: Vec<CString>,
}

impl VkInstance {

    /// Initialize `vk::Instance` object.
    pub fn new(config: InstanceConfig) -> VkResult<VkInstance> {

        let entry = ash::Entry::new()
            .or(Err(VkError::unlink("Entry")))?;

        // all requested layers must be present before the instance is created.
        if is_all_instance_layer_support(&entry, &config.require_layer_names)? == false {
            return Err(VkError::unsupported("Validation Layer"))
        }

        let app_name = CString::new(config.application_name.as_bytes())
            .map_err(|_| VkError::other("Failed to cast application name to CString."))?;
        let engine_name = CString::new(config.engine_name.as_bytes())
            .map_err(|_| VkError::other("Failed to cast engine name to CString."))?;

        let application_info = vk::ApplicationInfo {
            s_type              : vk::StructureType::APPLICATION_INFO,
            p_next              : ptr::null(),
            p_application_name  : app_name.as_ptr(),
            application_version : config.application_version,
            p_engine_name       : engine_name.as_ptr(),
            engine_version      : config.engine_version,
            api_version         : config.api_version,
        };

        let enable_layer_names = layer_names_to_cstring(&config.require_layer_names)?;
        let enable_layer_names_ptr = crate::utils::cast::cstrings2ptrs(&enable_layer_names);
        let enable_extension_names = VkInstance::require_extensions(config.debug);

        let instance_ci = vk::InstanceCreateInfo {
            s_type                     : vk::StructureType::INSTANCE_CREATE_INFO,
            p_next                     : ptr::null(),
            flags                      : vk::InstanceCreateFlags::empty(),
            p_application_info         : &application_info,
            enabled_layer_count        : enable_layer_names_ptr.len() as _,
            pp_enabled_layer_names     : enable_layer_names_ptr.as_ptr(),
            enabled_extension_count    : enable_extension_names.len() as _,
            pp_enabled_extension_names : enable_extension_names.as_ptr(),
        };

        let handle = unsafe {
            entry.create_instance(&instance_ci, None)
                .or(Err(VkError::unlink("Instance")))?
        };

        let instance = VkInstance { entry, handle, enable_layer_names };
        Ok(instance)
    }

    /// List the instance extensions the window system and the debug tool need.
    fn require_extensions(debug: DebugType) -> Vec<*const vkchar> {

        let mut instance_extensions = vec![
            ash::extensions::khr::Surface::name(),
            crate::platforms::platform_surface_names(),
        ];

        match debug {
            | DebugType::DebugReport => instance_extensions.push(ash::extensions::ext::DebugReport::name()),
            | DebugType::DebugUtils  => instance_extensions.push(ash::extensions::ext::DebugUtils::name()),
            | DebugType::None => {},
        }

        instance_extensions.into_iter().map(|extension| {
            extension.as_ptr()
        }).collect()
    }

    /// Destroy the `vk::Instance` object.
    ///
    /// In Vulkan, all child objects created using the instance must have been destroyed
    /// prior to destroying the instance, so the destruction order is handled manually.
    pub(crate) unsafe fn discard(&self) {

        self.handle.destroy_instance(None);
    }
}

fn is_all_instance_layer_support(entry: &ash::Entry, required_layers: &[String]) -> VkResult<bool> {

    use crate::utils::cast::chars2string;

    let layer_properties = entry.enumerate_instance_layer_properties()
        .or(Err(VkError::query("Layer Properties")))?;

    let available_layer_names: Vec<String> = layer_properties.into_iter().map(|available_layer| {
        chars2string(&available_layer.layer_name)
    }).collect();

    let result = required_layers.iter().all(|required_layer_name| {

        available_layer_names.iter().any(|available_layer| {
            (*available_layer) == (*required_layer_name)
        })
    });

    Ok(result)
}

fn layer_names_to_cstring(layers: &[String]) -> VkResult<Vec<CString>> {

    let mut layer_names = Vec::with_capacity(layers.len());

    for layer in layers.iter() {
        let name_converted = CString::new(layer.as_bytes())
            .map_err(|_| VkError::other("Failed to cast instance layer name to CString."))?;
        layer_names.push(name_converted);
    }

    Ok(layer_names)
}
