
use ash::vk;
use ash::version::DeviceV1_0;

use crate::context::instance::VkInstance;
use crate::context::device::VkDevice;
use crate::context::surface::{VkSurface, SwapchainSupport};
use crate::error::{VkResult, VkError};
use crate::vkuint;

use std::ptr;

/// the format every surface is asked for first.
const PREFERRED_SURFACE_FORMAT: vk::Format = vk::Format::B8G8R8A8_UNORM;
const PREFERRED_COLOR_SPACE: vk::ColorSpaceKHR = vk::ColorSpaceKHR::SRGB_NONLINEAR;

/// the reserved marker a surface reports when the swapchain dictates its own extent.
const EXTENT_UNDEFINED: vkuint = vkuint::max_value();

pub struct SwapchainConfig {

    /// the extent requested when the surface leaves the swapchain size negotiable.
    pub dimension_preference: vk::Extent2D,
}

impl Default for SwapchainConfig {

    fn default() -> SwapchainConfig {
        SwapchainConfig {
            dimension_preference: vk::Extent2D {
                width : 800,
                height: 600,
            },
        }
    }
}

pub struct VkSwapchain {

    /// handle of `vk::SwapchainKHR`.
    handle: vk::SwapchainKHR,
    /// the extension loader providing creation and destruction of `vk::SwapchainKHR`.
    loader: ash::extensions::khr::Swapchain,
    /// the 2D color views over the presentable images.
    ///
    /// The images themselves belong to the swapchain and die with it; only the
    /// views are destroyed explicitly.
    views: Vec<vk::ImageView>,
    /// the format of presentable images.
    pub format: vk::Format,
    /// the dimension of presentable images.
    pub dimension: vk::Extent2D,
}

impl VkSwapchain {

    pub(crate) fn new(instance: &VkInstance, device: &VkDevice, surface: &VkSurface, config: SwapchainConfig) -> VkResult<VkSwapchain> {

        let support = SwapchainSupport::query(surface, device.phy.handle)?;

        // the chosen (format, present mode, extent) triple is fixed for the
        // lifetime of the swapchain.
        let surface_format = choose_surface_format(&support.formats);
        let present_mode = choose_present_mode(&support.present_modes);
        let dimension = choose_swap_extent(&support.capabilities, config.dimension_preference);
        let image_count = desired_image_count(&support.capabilities);

        let family_indices = [device.phy.graphics_family, device.phy.present_family];
        let (sharing_mode, family_index_count, p_family_indices) = if device.phy.has_split_queue_families() {
            // images travel between the two families without explicit ownership transfers.
            (vk::SharingMode::CONCURRENT, family_indices.len() as vkuint, family_indices.as_ptr())
        } else {
            (vk::SharingMode::EXCLUSIVE, 0, ptr::null())
        };

        let swapchain_ci = vk::SwapchainCreateInfoKHR {
            s_type                   : vk::StructureType::SWAPCHAIN_CREATE_INFO_KHR,
            p_next                   : ptr::null(),
            flags                    : vk::SwapchainCreateFlagsKHR::empty(),
            surface                  : surface.handle,
            min_image_count          : image_count,
            image_format             : surface_format.format,
            image_color_space        : surface_format.color_space,
            image_extent             : dimension,
            image_array_layers       : 1,
            image_usage              : vk::ImageUsageFlags::COLOR_ATTACHMENT,
            image_sharing_mode       : sharing_mode,
            queue_family_index_count : family_index_count,
            p_queue_family_indices   : p_family_indices,
            pre_transform            : support.capabilities.current_transform,
            composite_alpha          : vk::CompositeAlphaFlagsKHR::OPAQUE,
            present_mode,
            // allow the implementation to discard rendering outside of the surface area.
            clipped                  : vk::TRUE,
            old_swapchain            : vk::SwapchainKHR::null(),
        };

        let loader = ash::extensions::khr::Swapchain::new(&instance.handle, &device.logic.handle);

        let handle = unsafe {
            loader.create_swapchain(&swapchain_ci, None)
                .or(Err(VkError::create("Swapchain")))?
        };

        // a failure while creating the views must not leak the swapchain itself.
        let views = match obtain_image_views(device, handle, &loader, surface_format.format) {
            | Ok(views) => views,
            | Err(error) => {
                unsafe { loader.destroy_swapchain(handle, None); }
                return Err(error)
            },
        };

        let result = VkSwapchain {
            handle, loader, views, dimension,
            format: surface_format.format,
        };
        Ok(result)
    }

    pub fn image_count(&self) -> usize {
        self.views.len()
    }

    /// Destroy the image views and the `vk::SwapchainKHR` object.
    pub(crate) fn discard(&self, device: &VkDevice) {

        unsafe {

            self.views.iter().for_each(|&view| {
                device.logic.handle.destroy_image_view(view, None);
            });

            self.loader.destroy_swapchain(self.handle, None);
        }
    }
}

fn obtain_image_views(device: &VkDevice, swapchain: vk::SwapchainKHR, loader: &ash::extensions::khr::Swapchain, format: vk::Format) -> VkResult<Vec<vk::ImageView>> {

    let image_handles = unsafe {
        loader.get_swapchain_images(swapchain)
            .or(Err(VkError::query("Swapchain Images")))?
    };

    let mut views = Vec::with_capacity(image_handles.len());

    for image_handle in image_handles.into_iter() {

        let view_ci = vk::ImageViewCreateInfo {
            s_type     : vk::StructureType::IMAGE_VIEW_CREATE_INFO,
            p_next     : ptr::null(),
            flags      : vk::ImageViewCreateFlags::empty(),
            image      : image_handle,
            view_type  : vk::ImageViewType::TYPE_2D,
            format,
            components : vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            },
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            },
        };

        let image_view = unsafe {
            device.logic.handle.create_image_view(&view_ci, None)
        };

        match image_view {
            | Ok(view) => views.push(view),
            | Err(_) => {
                // release the views created so far before reporting.
                views.iter().for_each(|&view| unsafe {
                    device.logic.handle.destroy_image_view(view, None);
                });
                return Err(VkError::create("Image View"))
            },
        }
    }

    Ok(views)
}


// Format/Mode/Extent selectors ------------------------------------------------------
/// Reduce the reported format list to the one the swapchain is created with.
///
/// A single entry with `vk::Format::UNDEFINED` is the driver's way of saying
/// any format is accepted, in which case the preferred pair is used outright.
/// Otherwise the first exact match of the preferred pair wins, and the first
/// reported entry is the fallback.
pub fn choose_surface_format(candidates: &[vk::SurfaceFormatKHR]) -> vk::SurfaceFormatKHR {

    if candidates.len() == 1 && candidates[0].format == vk::Format::UNDEFINED {
        return vk::SurfaceFormatKHR {
            format     : PREFERRED_SURFACE_FORMAT,
            color_space: PREFERRED_COLOR_SPACE,
        }
    }

    for candidate in candidates.iter() {
        if candidate.format == PREFERRED_SURFACE_FORMAT && candidate.color_space == PREFERRED_COLOR_SPACE {
            return *candidate
        }
    }

    candidates[0]
}

/// Reduce the reported present modes to the one the swapchain is created with.
///
/// Mailbox wins over everything as soon as it is seen. Immediate is only
/// remembered as a tentative best while the scan keeps going, so a mailbox
/// entry later in the list still takes over. FIFO is the fallback; the Vulkan
/// specification guarantees it is always available.
pub fn choose_present_mode(candidates: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {

    let mut best = vk::PresentModeKHR::FIFO;

    for candidate in candidates.iter() {

        if *candidate == vk::PresentModeKHR::MAILBOX {
            return vk::PresentModeKHR::MAILBOX
        }

        if *candidate == vk::PresentModeKHR::IMMEDIATE {
            best = vk::PresentModeKHR::IMMEDIATE;
        }
    }

    best
}

/// Settle the extent of the presentable images.
///
/// A defined current extent is binding. Only when the surface reports the
/// undefined marker is the preferred extent used, clamped per axis into the
/// bounds the surface supports.
pub fn choose_swap_extent(capabilities: &vk::SurfaceCapabilitiesKHR, preferred: vk::Extent2D) -> vk::Extent2D {

    if capabilities.current_extent.width != EXTENT_UNDEFINED {
        return capabilities.current_extent
    }

    use std::cmp::{max, min};

    vk::Extent2D {
        width : max(capabilities.min_image_extent.width,  min(capabilities.max_image_extent.width,  preferred.width)),
        height: max(capabilities.min_image_extent.height, min(capabilities.max_image_extent.height, preferred.height)),
    }
}

/// One more image than the minimum avoids waiting on the driver, as long as
/// the maximum bound (0 meaning unbounded) is respected.
fn desired_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> vkuint {

    let mut count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 && count > capabilities.max_image_count {
        count = capabilities.max_image_count;
    }

    count
}
// -----------------------------------------------------------------------------------


#[cfg(test)]
mod test {

    use super::*;

    fn pair(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR { format, color_space }
    }

    fn negotiable_capabilities(min: (vkuint, vkuint), max: (vkuint, vkuint)) -> vk::SurfaceCapabilitiesKHR {
        vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D { width: EXTENT_UNDEFINED, height: EXTENT_UNDEFINED },
            min_image_extent: vk::Extent2D { width: min.0, height: min.1 },
            max_image_extent: vk::Extent2D { width: max.0, height: max.1 },
            ..Default::default()
        }
    }

    #[test]
    fn format_sentinel_yields_preferred_pair() {

        // a lone undefined entry means any format goes, whatever color space it carries.
        let candidates = [pair(vk::Format::UNDEFINED, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT)];

        let chosen = choose_surface_format(&candidates);
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_UNORM);
        assert_eq!(chosen.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn format_preferred_pair_found_mid_list() {

        let candidates = [
            pair(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT),
            pair(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];

        let chosen = choose_surface_format(&candidates);
        assert_eq!(chosen.format, vk::Format::B8G8R8A8_UNORM);
        assert_eq!(chosen.color_space, vk::ColorSpaceKHR::SRGB_NONLINEAR);
    }

    #[test]
    fn format_requires_matching_color_space() {

        // right format, wrong color space: not a match, fall back to the first entry.
        let candidates = [
            pair(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            pair(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT),
        ];

        let chosen = choose_surface_format(&candidates);
        assert_eq!(chosen.format, vk::Format::R8G8B8A8_UNORM);
    }

    #[test]
    fn format_falls_back_to_first_entry() {

        let candidates = [pair(vk::Format::R8G8B8A8_UNORM, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT)];

        let chosen = choose_surface_format(&candidates);
        assert_eq!(chosen.format, vk::Format::R8G8B8A8_UNORM);
        assert_eq!(chosen.color_space, vk::ColorSpaceKHR::EXTENDED_SRGB_LINEAR_EXT);
    }

    #[test]
    fn present_mode_mailbox_dominates_in_any_order() {

        let orderings: [[vk::PresentModeKHR; 3]; 3] = [
            [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE, vk::PresentModeKHR::MAILBOX],
            [vk::PresentModeKHR::MAILBOX, vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE],
            [vk::PresentModeKHR::IMMEDIATE, vk::PresentModeKHR::MAILBOX, vk::PresentModeKHR::FIFO],
        ];

        for candidates in orderings.iter() {
            assert_eq!(choose_present_mode(candidates), vk::PresentModeKHR::MAILBOX);
        }
    }

    #[test]
    fn present_mode_mailbox_overrides_earlier_immediate() {

        // immediate is only a tentative pick; a mailbox entry later in the scan wins.
        let candidates = [vk::PresentModeKHR::IMMEDIATE, vk::PresentModeKHR::MAILBOX];
        assert_eq!(choose_present_mode(&candidates), vk::PresentModeKHR::MAILBOX);
    }

    #[test]
    fn present_mode_immediate_beats_fifo() {

        let candidates = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(choose_present_mode(&candidates), vk::PresentModeKHR::IMMEDIATE);
    }

    #[test]
    fn present_mode_defaults_to_fifo() {

        assert_eq!(choose_present_mode(&[vk::PresentModeKHR::FIFO]), vk::PresentModeKHR::FIFO);
        assert_eq!(choose_present_mode(&[]), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn extent_within_bounds_is_used_unchanged() {

        let capabilities = negotiable_capabilities((100, 100), (2000, 2000));

        let extent = choose_swap_extent(&capabilities, vk::Extent2D { width: 800, height: 600 });
        assert_eq!((extent.width, extent.height), (800, 600));
    }

    #[test]
    fn extent_is_clamped_up_to_minimum() {

        let capabilities = negotiable_capabilities((900, 900), (2000, 2000));

        let extent = choose_swap_extent(&capabilities, vk::Extent2D { width: 800, height: 600 });
        assert_eq!((extent.width, extent.height), (900, 900));
    }

    #[test]
    fn extent_is_clamped_down_to_maximum() {

        let capabilities = negotiable_capabilities((100, 100), (640, 480));

        let extent = choose_swap_extent(&capabilities, vk::Extent2D { width: 800, height: 600 });
        assert_eq!((extent.width, extent.height), (640, 480));
    }

    #[test]
    fn defined_extent_is_binding() {

        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D { width: 1024, height: 768 },
            min_image_extent: vk::Extent2D { width: 1, height: 1 },
            max_image_extent: vk::Extent2D { width: 16, height: 16 },
            ..Default::default()
        };

        // the surface dictates the extent; bounds and preference are ignored.
        let extent = choose_swap_extent(&capabilities, vk::Extent2D { width: 800, height: 600 });
        assert_eq!((extent.width, extent.height), (1024, 768));
    }

    #[test]
    fn image_count_is_one_over_minimum() {

        let capabilities = vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 0, // unbounded
            ..Default::default()
        };
        assert_eq!(desired_image_count(&capabilities), 3);
    }

    #[test]
    fn image_count_respects_maximum_bound() {

        let capabilities = vk::SurfaceCapabilitiesKHR {
            min_image_count: 3,
            max_image_count: 3,
            ..Default::default()
        };
        assert_eq!(desired_image_count(&capabilities), 3);
    }
}
