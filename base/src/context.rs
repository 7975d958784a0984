
pub use self::device::{VkDevice, VkLogicalDevice, VkPhysicalDevice};
pub use self::device::{VkQueue, QueueHandles, QueueFamilyIndices};
pub use self::device::VkObjectDiscardable;
pub use self::surface::{VkSurface, SwapchainSupport};
pub use self::swapchain::VkSwapchain;
pub use self::swapchain::{choose_surface_format, choose_present_mode, choose_swap_extent};

pub use self::instance::InstanceConfig;
pub use self::debug::{ValidationConfig, DebugType};
pub use self::device::{PhysicalDevConfig, DeviceExtensionType};
pub use self::swapchain::SwapchainConfig;

mod instance;
mod debug;
mod surface;
mod device;
mod swapchain;


use ash::version::DeviceV1_0;
use crate::workflow::WindowContext;
use crate::error::{VkResult, VkError};

#[derive(Default)]
pub struct VulkanConfig {

    instance  : InstanceConfig,
    debugger  : ValidationConfig,
    dev_phy   : PhysicalDevConfig,
    swapchain : SwapchainConfig,
}

/// Every Vulkan object of the bring-up sequence, owned for the whole run.
///
/// Construction order is fixed: instance, debugger, surface, device,
/// swapchain (with its image views). `discard` releases them in exact reverse
/// order; the builder releases any prefix of that sequence when a later step
/// fails.
pub struct VulkanContext {

    instance  : instance::VkInstance,
    debugger  : debug::VkDebugger,
    surface   : surface::VkSurface,

    pub swapchain: swapchain::VkSwapchain,
    pub device: device::VkDevice,
}

impl VulkanContext {

    pub fn new(window: &WindowContext) -> VulkanContextBuilder {

        VulkanContextBuilder {
            window,
            config: VulkanConfig::default(),
        }
    }

    pub(crate) fn wait_idle(&self) -> VkResult<()> {
        unsafe {
            self.device.logic.handle.device_wait_idle()
                .map_err(|_| VkError::device("Device Waiting Idle"))?;
        }

        Ok(())
    }

    /// Release every owned resource, newest first.
    pub fn discard(self) {

        self.swapchain.discard(&self.device);
        drop(self.swapchain);

        self.device.drop_self();

        unsafe {
            self.surface.discard();
        }
        self.debugger.discard();
        unsafe {
            self.instance.discard();
        }
    }
}

pub struct VulkanContextBuilder<'a> {

    window: &'a WindowContext,
    config: VulkanConfig,
}

impl<'a> VulkanContextBuilder<'a> {

    pub fn with_instance_config(mut self, config: InstanceConfig) -> VulkanContextBuilder<'a> {
        self.config.instance = config; self
    }

    pub fn with_debugger_config(mut self, config: ValidationConfig) -> VulkanContextBuilder<'a> {
        self.config.debugger = config; self
    }

    pub fn with_physical_device_config(mut self, config: PhysicalDevConfig) -> VulkanContextBuilder<'a> {
        self.config.dev_phy = config; self
    }

    pub fn with_swapchain_config(mut self, config: SwapchainConfig) -> VulkanContextBuilder<'a> {
        self.config.swapchain = config; self
    }

    /// Run the bring-up sequence in its fixed order.
    ///
    /// Each stage that fails unwinds the stages already created before the
    /// error is propagated, so an aborted bring-up releases exactly what it
    /// acquired.
    pub fn build(self) -> VkResult<VulkanContext> {

        let instance = instance::VkInstance::new(self.config.instance)?;

        let debugger = match debug::VkDebugger::new(&instance, self.config.debugger) {
            | Ok(debugger) => debugger,
            | Err(error) => {
                unsafe { instance.discard(); }
                return Err(error)
            },
        };

        let surface = match surface::VkSurface::new(&instance, &self.window.handle) {
            | Ok(surface) => surface,
            | Err(error) => {
                debugger.discard();
                unsafe { instance.discard(); }
                return Err(error)
            },
        };

        let device = match VulkanContextBuilder::build_device(&instance, &surface, self.config.dev_phy) {
            | Ok(device) => device,
            | Err(error) => {
                unsafe { surface.discard(); }
                debugger.discard();
                unsafe { instance.discard(); }
                return Err(error)
            },
        };

        let swapchain = match swapchain::VkSwapchain::new(&instance, &device, &surface, self.config.swapchain) {
            | Ok(swapchain) => swapchain,
            | Err(error) => {
                device.drop_self();
                unsafe { surface.discard(); }
                debugger.discard();
                unsafe { instance.discard(); }
                return Err(error)
            },
        };

        let context = VulkanContext { instance, debugger, surface, device, swapchain };
        Ok(context)
    }

    /// Select the physical device and create the logical device over it.
    ///
    /// Physical device selection creates nothing destroyable, so a failure in
    /// either half leaves no resource behind.
    fn build_device(instance: &instance::VkInstance, surface: &surface::VkSurface, config: PhysicalDevConfig) -> VkResult<device::VkDevice> {

        let phy = device::VkPhysicalDevice::new(instance, surface, config)?;
        let logic = device::VkLogicalDevice::new(instance, &phy)?;

        Ok(device::VkDevice { logic, phy })
    }
}
