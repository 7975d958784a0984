
use ash::vk;
use ash::version::{DeviceV1_0, InstanceV1_0};

use crate::context::instance::VkInstance;
use crate::context::device::physical::VkPhysicalDevice;
use crate::error::{VkResult, VkError};
use crate::{vkuint, vkfloat};

use std::ptr;

pub struct VkLogicalDevice {

    pub handle: ash::Device,
    pub queues: QueueHandles,
}

/// The queues retrieved from the logical device, one per role.
///
/// When graphics and presentation share a family, both handles point at the
/// same underlying queue.
pub struct QueueHandles {
    pub graphics: VkQueue,
    pub present : VkQueue,
}

#[derive(Debug, Clone)]
pub struct VkQueue {
    pub handle: vk::Queue,
    pub family_index: vkuint,
}

impl VkLogicalDevice {

    /// Create the logical device over `phy`, requesting one queue per
    /// distinct queue family role.
    pub fn new(instance: &VkInstance, phy: &VkPhysicalDevice) -> VkResult<VkLogicalDevice> {

        const DEFAULT_QUEUE_PRIORITY: vkfloat = 1.0;

        let mut unique_families = vec![phy.graphics_family];
        if phy.has_split_queue_families() {
            unique_families.push(phy.present_family);
        }

        let queue_cis: Vec<vk::DeviceQueueCreateInfo> = unique_families.iter().map(|&family_index| {
            vk::DeviceQueueCreateInfo {
                s_type: vk::StructureType::DEVICE_QUEUE_CREATE_INFO,
                p_next: ptr::null(),
                flags : vk::DeviceQueueCreateFlags::empty(),
                queue_family_index: family_index,
                queue_count       : 1,
                p_queue_priorities: &DEFAULT_QUEUE_PRIORITY,
            }
        }).collect();

        use crate::utils::cast::cstrings2ptrs;
        let enable_layer_names = cstrings2ptrs(&instance.enable_layer_names);
        let enable_extension_names = cstrings2ptrs(phy.enable_extensions());

        // no optional device feature is needed to bring a swapchain up.
        let enable_features = vk::PhysicalDeviceFeatures::default();

        let device_ci = vk::DeviceCreateInfo {
            s_type                     : vk::StructureType::DEVICE_CREATE_INFO,
            p_next                     : ptr::null(),
            flags                      : vk::DeviceCreateFlags::empty(),
            queue_create_info_count    : queue_cis.len() as _,
            p_queue_create_infos       : queue_cis.as_ptr(),
            enabled_layer_count        : enable_layer_names.len() as _,
            pp_enabled_layer_names     : enable_layer_names.as_ptr(),
            enabled_extension_count    : enable_extension_names.len() as _,
            pp_enabled_extension_names : enable_extension_names.as_ptr(),
            p_enabled_features         : &enable_features,
        };

        let handle = unsafe {
            instance.handle.create_device(phy.handle, &device_ci, None)
                .or(Err(VkError::create("Logical Device")))?
        };

        let queues = QueueHandles {
            graphics: retrieve_queue(&handle, phy.graphics_family),
            present : retrieve_queue(&handle, phy.present_family),
        };

        let device = VkLogicalDevice { handle, queues };
        Ok(device)
    }

    pub fn discard(&self) {

        unsafe {
            self.handle.destroy_device(None);
        }
    }
}

fn retrieve_queue(device: &ash::Device, family_index: vkuint) -> VkQueue {

    let handle = unsafe {
        device.get_device_queue(family_index, 0)
    };

    VkQueue { handle, family_index }
}
