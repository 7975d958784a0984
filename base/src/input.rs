
use smallvec::SmallVec;
use crate::utils::frame::FrameAction;

const SIMULTANEOUS_KEY_COUNT: usize = 12;


/// Collects the window events drained by one poll pass and reduces them to a
/// `FrameAction` for the main loop.
pub struct EventController {

    pub key: KeyHeap,

    action: FrameAction,
}

impl Default for EventController {

    fn default() -> EventController {

        EventController {
            key: Default::default(),
            action: FrameAction::Idle,
        }
    }
}

impl EventController {

    pub(crate) fn record_event(&mut self, event: winit::Event) {

        match event {
            | winit::Event::WindowEvent { event, .. } => {
                match event {
                    | winit::WindowEvent::KeyboardInput { input, .. } => {
                        if let Some(code) = input.virtual_keycode {
                            match input.state {
                                | winit::ElementState::Pressed  => {
                                    self.key.key_press(code);
                                },
                                | winit::ElementState::Released => {
                                    self.key.key_release(code);
                                },
                            }
                        }
                    },
                    | winit::WindowEvent::CloseRequested => {
                        self.action = FrameAction::Terminal;
                    },
                    | _ => (),
                }
            },
            | _ => {},
        }
    }

    pub(crate) fn tick_frame(&mut self) {

        self.action = FrameAction::Idle;
    }

    pub(crate) fn current_action(&self) -> FrameAction {
        self.action
    }
}


/// The keys currently held down, capped at a fixed simultaneous count.
pub struct KeyHeap {

    keys: SmallVec<[winit::VirtualKeyCode; SIMULTANEOUS_KEY_COUNT]>,
}

impl Default for KeyHeap {

    fn default() -> KeyHeap {
        KeyHeap { keys: SmallVec::new() }
    }
}

impl KeyHeap {

    fn key_press(&mut self, code: winit::VirtualKeyCode) {

        // if input key has been recorded, just ignore it.
        if self.keys.iter().any(|&key_code| key_code == code) {
            return
        }

        // if the key pool is full, just ignore the input key.
        if self.keys.len() < SIMULTANEOUS_KEY_COUNT {
            self.keys.push(code);
        }
    }

    fn key_release(&mut self, code: winit::VirtualKeyCode) {

        if let Some(index) = self.keys.iter().position(|&key_code| key_code == code) {
            self.keys.swap_remove(index);
        }
    }

    pub fn is_key_pressed(&self, code: winit::VirtualKeyCode) -> bool {

        self.keys.iter().any(|&key_code| key_code == code)
    }
}
