
use ash::vk;

use crate::context::instance::VkInstance;
use crate::error::{VkResult, VkError};
use crate::vkuint;

/// Wrapper class for `vk::SurfaceKHR`.
pub struct VkSurface {

    /// the handle of `vk::SurfaceKHR`.
    pub(crate) handle: vk::SurfaceKHR,
    /// the extension loader providing creation and destruction of `vk::SurfaceKHR`.
    loader: ash::extensions::khr::Surface,
}

impl VkSurface {

    /// Initialize surface extension loader and `vk::SurfaceKHR` object.
    pub fn new(instance: &VkInstance, window: &winit::Window) -> VkResult<VkSurface> {

        use crate::platforms::generate_surface;

        let handle = unsafe {
            generate_surface(&instance.entry, &instance.handle, window)
                .or(Err(VkError::unlink("Platform Surface")))?
        };

        let loader = ash::extensions::khr::Surface::new(&instance.entry, &instance.handle);

        let surface = VkSurface { handle, loader };
        Ok(surface)
    }

    /// Query whether a queue family of a physical device can present to this surface.
    pub fn query_is_family_presentable(&self, physical_device: vk::PhysicalDevice, queue_family_index: vkuint) -> bool {

        unsafe {
            self.loader.get_physical_device_surface_support(physical_device, queue_family_index, self.handle)
        }
    }

    /// Destroy the `vk::SurfaceKHR` object.
    pub(crate) unsafe fn discard(&self) {
        self.loader.destroy_surface(self.handle, None);
    }
}

/// An immutable snapshot of what a (device, surface) pair can negotiate.
///
/// Queried fresh every time it is needed; nothing here is cached or mutated.
pub struct SwapchainSupport {

    /// extent bounds, image count bounds and the current (possibly undefined) extent.
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    /// the supported (pixel format, color space) pairs, in the order the driver reports them.
    pub formats: Vec<vk::SurfaceFormatKHR>,
    /// the supported presentation modes.
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SwapchainSupport {

    /// Take the capability snapshot for `physical_device` against this surface.
    pub fn query(surface: &VkSurface, physical_device: vk::PhysicalDevice) -> VkResult<SwapchainSupport> {

        let capabilities = unsafe {
            surface.loader.get_physical_device_surface_capabilities(physical_device, surface.handle)
                .or(Err(VkError::query("Surface Capabilities")))?
        };

        let formats = unsafe {
            surface.loader.get_physical_device_surface_formats(physical_device, surface.handle)
                .or(Err(VkError::query("Surface Formats")))?
        };

        let present_modes = unsafe {
            surface.loader.get_physical_device_surface_present_modes(physical_device, surface.handle)
                .or(Err(VkError::query("Surface Present Modes")))?
        };

        let support = SwapchainSupport { capabilities, formats, present_modes };
        Ok(support)
    }

    /// A device is only usable for presentation if it reports at least one
    /// surface format and at least one presentation mode.
    pub fn is_adequate(&self) -> bool {

        self.formats.is_empty() == false && self.present_modes.is_empty() == false
    }
}


#[cfg(test)]
mod test {

    use super::SwapchainSupport;
    use ash::vk;

    fn support_with(formats: Vec<vk::SurfaceFormatKHR>, present_modes: Vec<vk::PresentModeKHR>) -> SwapchainSupport {
        SwapchainSupport {
            capabilities: Default::default(),
            formats, present_modes,
        }
    }

    #[test]
    fn adequate_requires_at_least_one_format() {

        let support = support_with(Vec::new(), vec![vk::PresentModeKHR::FIFO]);
        assert_eq!(support.is_adequate(), false);
    }

    #[test]
    fn adequate_requires_at_least_one_present_mode() {

        let format = vk::SurfaceFormatKHR {
            format: vk::Format::B8G8R8A8_UNORM,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        };

        let support = support_with(vec![format], Vec::new());
        assert_eq!(support.is_adequate(), false);

        let support = support_with(vec![format], vec![vk::PresentModeKHR::FIFO]);
        assert!(support.is_adequate());
    }
}
