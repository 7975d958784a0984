
use ash::vk;

use crate::error::{VkResult, VkError};

pub struct WindowConfig {

    pub title: String,

    pub dimension: vk::Extent2D,

    pub is_resizable: bool,
}

impl Default for WindowConfig {

    fn default() -> WindowConfig {

        WindowConfig {
            title: String::from("VULKAN DEMO"),

            // the swapchain is never rebuilt, so the window keeps a fixed size.
            dimension: vk::Extent2D {
                width : 800,
                height: 600,
            },
            is_resizable: false,
        }
    }
}


pub struct WindowContext {

    pub(crate) event_loop: winit::EventsLoop,
    pub(crate) handle: winit::Window,
}

impl WindowContext {

    pub fn new(config: WindowConfig) -> VkResult<WindowContext> {

        let event_loop = winit::EventsLoop::new();

        let builder = winit::WindowBuilder::new()
            .with_title(config.title)
            .with_dimensions((config.dimension.width, config.dimension.height).into())
            .with_resizable(config.is_resizable);

        let window = WindowContext {
            handle: builder.build(&event_loop)
                .map_err(|e| VkError::window(e.to_string()))?,
            event_loop,
        };
        Ok(window)
    }
}
