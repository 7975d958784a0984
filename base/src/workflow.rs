
mod window;
mod loops;

pub use self::window::{WindowContext, WindowConfig};
pub use self::loops::ProcPipeline;


use crate::context::VkDevice;
use crate::error::VkResult;

/// The hooks an application plugs into the bring-up driver.
///
/// There is no render hook: after `init` the driver just polls window events
/// until a quit signal arrives, then calls `deinit` before the Vulkan context
/// itself is torn down.
pub trait Workflow {

    fn init(&mut self, _device: &VkDevice) -> VkResult<()> {
        Ok(())
    }

    fn deinit(&mut self, device: &VkDevice) -> VkResult<()>;
}
