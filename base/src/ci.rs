
pub mod shader;
pub mod pipeline;


use crate::context::VkDevice;
use crate::VkResult;

pub(crate) trait VulkanCI<CI>: Sized {

    fn default_ci() -> CI;
}

/// A create-info wrapper that can build its Vulkan object against a device.
pub trait VkObjectBuildableCI {
    type ObjectType;

    fn build(&self, device: &VkDevice) -> VkResult<Self::ObjectType>;
}
