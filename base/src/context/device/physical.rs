
use ash::vk;
use ash::version::InstanceV1_0;

use crate::context::instance::VkInstance;
use crate::context::surface::{VkSurface, SwapchainSupport};
use crate::context::device::queue::{QueueFamilyIndices, find_queue_families};
use crate::utils::cast::{chars2string, chars2cstring};
use crate::error::{VkResult, VkError};
use crate::vkuint;

use std::ffi::CString;

#[derive(Debug, Clone)]
pub struct PhysicalDevConfig {

    /// print the name and type of the selected device to console.
    pub print_device_properties: bool,
    /// the device extensions that a candidate must advertise to qualify.
    pub request_extensions: Vec<CString>,
}

impl Default for PhysicalDevConfig {

    fn default() -> PhysicalDevConfig {

        PhysicalDevConfig {
            print_device_properties: false,
            request_extensions: vec![
                DeviceExtensionType::Swapchain.name(),
            ],
        }
    }
}

/// Wrapper class for `vk::PhysicalDevice`, holding the queue family roles
/// resolved during device selection.
pub struct VkPhysicalDevice {

    pub handle: vk::PhysicalDevice,

    /// index of the queue family driving graphics commands.
    pub graphics_family: vkuint,
    /// index of the queue family presenting to the surface.
    pub present_family: vkuint,

    config: PhysicalDevConfig,
}

impl VkPhysicalDevice {

    /// Walk the devices reported by the driver and keep the first suitable one.
    ///
    /// Candidates are visited in enumeration order; there is no ranking among
    /// suitable devices.
    pub(crate) fn new(instance: &VkInstance, surface: &VkSurface, config: PhysicalDevConfig) -> VkResult<VkPhysicalDevice> {

        let candidate_devices = unsafe {
            instance.handle.enumerate_physical_devices()
                .or(Err(VkError::query("Physical Device")))?
        };

        for candidate in candidate_devices.into_iter() {

            let queue_indices = query_queue_families(instance, candidate, surface);
            let (graphics_family, present_family) = match (queue_indices.graphics, queue_indices.present) {
                | (Some(graphics), Some(present)) => (graphics, present),
                | _ => continue,
            };

            if is_all_extension_support(instance, candidate, &config.request_extensions)? == false {
                continue
            }

            // the capability report is only queried after the extension check
            // passed, since it is meaningless without swapchain support.
            if SwapchainSupport::query(surface, candidate)?.is_adequate() == false {
                continue
            }

            if config.print_device_properties {
                print_device_properties(instance, candidate);
            }

            let selected = VkPhysicalDevice {
                handle: candidate,
                graphics_family, present_family, config,
            };
            return Ok(selected)
        }

        Err(VkError::other("Failed to find a suitable Vulkan device."))
    }

    pub fn enable_extensions(&self) -> &Vec<CString> {
        &self.config.request_extensions
    }

    /// Whether the graphics and presentation roles landed on different
    /// families, which forces concurrent image sharing on the swapchain.
    pub fn has_split_queue_families(&self) -> bool {
        self.graphics_family != self.present_family
    }
}

fn query_queue_families(instance: &VkInstance, phy_device: vk::PhysicalDevice, surface: &VkSurface) -> QueueFamilyIndices {

    let families = unsafe {
        instance.handle.get_physical_device_queue_family_properties(phy_device)
    };

    find_queue_families(&families, |family_index| {
        surface.query_is_family_presentable(phy_device, family_index)
    })
}


// Physical Extension ----------------------------------------------------------------
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeviceExtensionType {
    Swapchain,
}

impl DeviceExtensionType {

    pub fn name(&self) -> CString {
        match self {
            | DeviceExtensionType::Swapchain => {
                CString::new("VK_KHR_swapchain").unwrap()
            },
        }
    }
}

fn is_all_extension_support(instance: &VkInstance, phy_device: vk::PhysicalDevice, request_extensions: &[CString]) -> VkResult<bool> {

    let query_extensions = unsafe {
        instance.handle.enumerate_device_extension_properties(phy_device)
            .or(Err(VkError::query("Device Extensions")))?
    };

    let available_extensions: Vec<CString> = query_extensions.into_iter().map(|extension| {
        chars2cstring(&extension.extension_name)
    }).collect();

    let result = missing_extensions(request_extensions, &available_extensions).is_empty();
    Ok(result)
}

/// Set difference of the required extensions against the advertised ones.
///
/// The device qualifies when the remainder is empty.
fn missing_extensions(request_extensions: &[CString], available_extensions: &[CString]) -> Vec<CString> {

    request_extensions.iter()
        .filter(|requested| available_extensions.contains(requested) == false)
        .cloned()
        .collect()
}
// -----------------------------------------------------------------------------------


// Physical Property -----------------------------------------------------------------
fn print_device_properties(instance: &VkInstance, phy_device: vk::PhysicalDevice) {

    let property = unsafe {
        instance.handle.get_physical_device_properties(phy_device)
    };

    let device_name = chars2string(&property.device_name);
    println!("[Info] Using device: {}", &device_name);

    let device_type = match property.device_type {
        | vk::PhysicalDeviceType::CPU            => "CPU",
        | vk::PhysicalDeviceType::INTEGRATED_GPU => "Integrated GPU",
        | vk::PhysicalDeviceType::DISCRETE_GPU   => "Discrete GPU",
        | vk::PhysicalDeviceType::VIRTUAL_GPU    => "Virtual GPU",
        | _ => "Unknown",
    };
    println!("[Info] Device Type: {}", device_type);
}
// -----------------------------------------------------------------------------------


#[cfg(test)]
mod test {

    use super::missing_extensions;
    use std::ffi::CString;

    fn names(raw: &[&str]) -> Vec<CString> {
        raw.iter().map(|name| CString::new(*name).unwrap()).collect()
    }

    #[test]
    fn device_without_swapchain_extension_is_missing_it() {

        let required = names(&["VK_KHR_swapchain"]);
        let available = names(&["VK_KHR_shader_draw_parameters", "VK_EXT_debug_marker"]);

        let remainder = missing_extensions(&required, &available);
        assert_eq!(remainder, names(&["VK_KHR_swapchain"]));
    }

    #[test]
    fn remainder_is_empty_when_all_extensions_are_advertised() {

        let required = names(&["VK_KHR_swapchain"]);
        let available = names(&["VK_EXT_debug_marker", "VK_KHR_swapchain"]);

        assert!(missing_extensions(&required, &available).is_empty());
    }

    #[test]
    fn empty_requirement_is_trivially_satisfied() {

        let available = names(&["VK_KHR_swapchain"]);
        assert!(missing_extensions(&[], &available).is_empty());
    }
}
