
//! Vulkan Demo - Swapchain and pipeline state bring-up
//!
//! This program brings a Vulkan swapchain and the fixed function state of a
//! graphics pipeline up against a fixed-size window, then idles until the
//! window is closed. Nothing is rendered.

/// This module contains the application driven by the event loop.
mod example;
/// This module assembles the pipeline state.
mod pipeline;

const WINDOW_WIDTH : u32 = 800;
const WINDOW_HEIGHT: u32 = 600;
const WINDOW_TITLE: &'static str = "VULKAN DEMO";

fn main() {

    if let Err(error) = run() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn run() -> vkbase::VkResult<()> {

    let mut win_config = vkbase::WindowConfig::default();
    win_config.dimension.width  = WINDOW_WIDTH;
    win_config.dimension.height = WINDOW_HEIGHT;
    win_config.title = WINDOW_TITLE.to_string();

    let window = vkbase::WindowContext::new(win_config)?;

    let swapchain_config = vkbase::context::SwapchainConfig {
        dimension_preference: ash::vk::Extent2D {
            width : WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        },
    };

    let context = vkbase::context::VulkanContext::new(&window)
        .with_swapchain_config(swapchain_config)
        .build()?;

    let app = match example::TriangleDemo::new(&context) {
        | Ok(app) => app,
        | Err(error) => {
            // bring-up stops here; release the context before reporting.
            context.discard();
            return Err(error)
        },
    };

    let entry = vkbase::ProcPipeline::new(window, context);
    entry.launch(app)
}
