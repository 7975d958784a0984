
use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::{VkDevice, VkObjectDiscardable};
use crate::ci::{VulkanCI, VkObjectBuildableCI};
use crate::error::{VkResult, VkError};

use std::ptr;

// ---------------------------------------------------------------------------------------------------
/// Wrapper class for vk::PipelineLayoutCreateInfo.
#[derive(Debug, Clone)]
pub struct PipelineLayoutCI {

    ci: vk::PipelineLayoutCreateInfo,

    set_layouts   : Vec<vk::DescriptorSetLayout>,
    push_constants: Vec<vk::PushConstantRange>,
}

impl VulkanCI<vk::PipelineLayoutCreateInfo> for PipelineLayoutCI {

    fn default_ci() -> vk::PipelineLayoutCreateInfo {

        vk::PipelineLayoutCreateInfo {
            s_type: vk::StructureType::PIPELINE_LAYOUT_CREATE_INFO,
            p_next: ptr::null(),
            flags : vk::PipelineLayoutCreateFlags::empty(),
            set_layout_count          : 0,
            p_set_layouts             : ptr::null(),
            push_constant_range_count : 0,
            p_push_constant_ranges    : ptr::null(),
        }
    }
}

impl PipelineLayoutCI {

    /// An empty layout: no descriptor sets, no push constants.
    pub fn new() -> PipelineLayoutCI {

        PipelineLayoutCI {
            ci: PipelineLayoutCI::default_ci(),
            set_layouts   : Vec::new(),
            push_constants: Vec::new(),
        }
    }

    pub fn add_set_layout(mut self, set_layout: vk::DescriptorSetLayout) -> PipelineLayoutCI {
        self.set_layouts.push(set_layout); self
    }

    pub fn add_push_constants(mut self, range: vk::PushConstantRange) -> PipelineLayoutCI {
        self.push_constants.push(range); self
    }
}

impl VkObjectBuildableCI for PipelineLayoutCI {
    type ObjectType = vk::PipelineLayout;

    fn build(&self, device: &VkDevice) -> VkResult<vk::PipelineLayout> {

        let layout_ci = vk::PipelineLayoutCreateInfo {
            set_layout_count          : self.set_layouts.len() as _,
            p_set_layouts             : self.set_layouts.as_ptr(),
            push_constant_range_count : self.push_constants.len() as _,
            p_push_constant_ranges    : self.push_constants.as_ptr(),
            ..self.ci
        };

        let layout = unsafe {
            device.logic.handle.create_pipeline_layout(&layout_ci, None)
                .or(Err(VkError::create("Pipeline Layout")))?
        };
        Ok(layout)
    }
}

impl VkObjectDiscardable for vk::PipelineLayout {

    fn discard(self, device: &VkDevice) {
        unsafe {
            device.logic.handle.destroy_pipeline_layout(self, None);
        }
    }
}
// ---------------------------------------------------------------------------------------------------
