
use ash::vk;

use vkbase::context::{VulkanContext, VkDevice};
use vkbase::{VkResult, Workflow};

pub struct TriangleDemo {

    pipeline_layout: vk::PipelineLayout,
}

impl TriangleDemo {

    pub fn new(context: &VulkanContext) -> VkResult<TriangleDemo> {

        let pipeline_layout = crate::pipeline::setup_pipeline_state(&context.device, context.swapchain.dimension)?;

        let target = TriangleDemo { pipeline_layout };
        Ok(target)
    }
}

impl Workflow for TriangleDemo {

    fn deinit(&mut self, device: &VkDevice) -> VkResult<()> {

        device.discard(self.pipeline_layout);
        Ok(())
    }
}
