
use crate::context::VulkanContext;
use crate::workflow::Workflow;
use crate::workflow::window::WindowContext;
use crate::input::EventController;
use crate::utils::frame::FrameAction;
use crate::error::VkResult;


/// Drives an application from finished bring-up to teardown.
///
/// The driver owns the window and the Vulkan context; `launch` consumes it,
/// idles until a quit signal and then releases everything in reverse creation
/// order, the application's resources first.
pub struct ProcPipeline {

    window: WindowContext,
    vulkan: VulkanContext,
}

impl ProcPipeline {

    pub fn new(window: WindowContext, vulkan: VulkanContext) -> ProcPipeline {

        ProcPipeline { window, vulkan }
    }

    pub fn launch(mut self, mut app: impl Workflow) -> VkResult<()> {

        if let Err(error) = app.init(&self.vulkan.device) {
            // a failed init still tears down whatever the app and the context hold.
            let _ = app.deinit(&self.vulkan.device);
            self.vulkan.discard();
            return Err(error)
        }

        self.main_loop();

        self.vulkan.wait_idle()?;
        app.deinit(&self.vulkan.device)?;
        // free the application specific resources.
        drop(app);
        // and then free the vulkan context resources.
        self.vulkan.discard();

        Ok(())
    }

    /// Poll window events until the window asks to close or Escape is pressed.
    ///
    /// There is no frame pacing and no bounded iteration count; nothing is
    /// rendered while waiting.
    fn main_loop(&mut self) {

        let mut event_handler = EventController::default();

        'poll_marker: loop {

            self.window.event_loop.poll_events(|event| {
                event_handler.record_event(event);
            });

            match event_handler.current_action() {
                | FrameAction::Idle => {},
                | FrameAction::Terminal => {
                    break 'poll_marker
                },
            }

            if event_handler.key.is_key_pressed(winit::VirtualKeyCode::Escape) {
                break 'poll_marker
            }

            event_handler.tick_frame();
        }
    }
}
