use meridian_types::{CartesianPoint2d, Point2};
use web_time::SystemTime;

use crate::control::{
    EventPropagation, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent, UserEventHandler,
};
use crate::map::Map;

const DRAG_THRESHOLD: f64 = 3.0;
const CLICK_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(200);
const DBL_CLICK_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(500);

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and dispatches them to the
/// registered handlers.
///
/// The processor tracks the input state between events: pointer position,
/// pressed buttons, click timing and the handler that consumed the current
/// drag. Drag events are only dispatched to the handler that consumed the
/// corresponding [`UserEvent::DragStarted`].
pub struct EventProcessor {
    handlers: Vec<Box<dyn UserEventHandler>>,
    pointer_position: Point2,
    pointer_pressed_position: Point2,

    buttons_state: MouseButtonsState,

    last_pressed_time: SystemTime,
    last_click_time: SystemTime,

    drag_target: Option<usize>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self {
            handlers: vec![],
            pointer_position: Default::default(),
            pointer_pressed_position: Default::default(),
            buttons_state: Default::default(),
            last_pressed_time: SystemTime::UNIX_EPOCH,
            last_click_time: SystemTime::UNIX_EPOCH,
            drag_target: None,
        }
    }
}

impl EventProcessor {
    /// Creates a new processor without any handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler to the end of the handler list.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Processes the raw event and dispatches the resulting user events.
    pub fn handle(&mut self, event: RawUserEvent, map: &mut Map) {
        let Some(user_events) = self.process(event) else {
            return;
        };

        for user_event in user_events {
            let mut drag_start_target = None;

            let initial_drag_delta = self.pointer_position - self.pointer_pressed_position;
            let mouse_event = self.get_mouse_event();

            for (index, handler) in self.handlers.iter_mut().enumerate() {
                if matches!(
                    user_event,
                    UserEvent::Drag(..) | UserEvent::DragEnded(..)
                ) {
                    match self.drag_target {
                        Some(target) if target == index => {}
                        _ => continue,
                    }
                }

                match handler.handle(&user_event, map) {
                    EventPropagation::Propagate => {}
                    EventPropagation::Stop => break,
                    EventPropagation::Consume => {
                        if let UserEvent::DragStarted(button, _) = &user_event {
                            drag_start_target = Some(index);

                            handler.handle(
                                &UserEvent::Drag(
                                    *button,
                                    initial_drag_delta,
                                    mouse_event.clone(),
                                ),
                                map,
                            );
                        }

                        break;
                    }
                }
            }

            if drag_start_target.is_some() {
                self.drag_target = drag_start_target;
            }

            if matches!(user_event, UserEvent::DragEnded(..)) {
                self.drag_target = None;
            }
        }
    }

    fn process(&mut self, event: RawUserEvent) -> Option<Vec<UserEvent>> {
        let now = SystemTime::now();
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.last_pressed_time = now;
                self.pointer_pressed_position = self.pointer_position;

                Some(vec![UserEvent::ButtonPressed(
                    button,
                    self.get_mouse_event(),
                )])
            }
            RawUserEvent::ButtonReleased(button) => {
                self.buttons_state.set_released(button);
                let mut events = vec![UserEvent::ButtonReleased(
                    button,
                    self.get_mouse_event(),
                )];

                if self.drag_target.is_some() {
                    events.push(UserEvent::DragEnded(button, self.get_mouse_event()));
                } else if (now.duration_since(self.last_pressed_time)).unwrap_or_default()
                    < CLICK_TIMEOUT
                {
                    events.push(UserEvent::Click(button, self.get_mouse_event()));

                    if (now.duration_since(self.last_click_time)).unwrap_or_default()
                        < DBL_CLICK_TIMEOUT
                    {
                        events.push(UserEvent::DoubleClick(button, self.get_mouse_event()));
                    }

                    self.last_click_time = now;
                }

                Some(events)
            }
            RawUserEvent::PointerMoved(position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;

                let mut events = vec![UserEvent::PointerMoved(self.get_mouse_event())];
                if let Some(button) = self.buttons_state.single_pressed() {
                    if self.drag_target.is_none()
                        && position.taxicab_distance(&self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        events.push(UserEvent::DragStarted(
                            button,
                            self.get_mouse_event_pos(self.pointer_pressed_position),
                        ));
                    }

                    if self.drag_target.is_some() {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.get_mouse_event(),
                        ));
                    }
                }

                Some(events)
            }
            RawUserEvent::Scroll(delta) => {
                Some(vec![UserEvent::Scroll(delta, self.get_mouse_event())])
            }
            RawUserEvent::KeyPressed(code) => Some(vec![UserEvent::KeyPressed(code)]),
            RawUserEvent::KeyReleased(code) => Some(vec![UserEvent::KeyReleased(code)]),
        }
    }

    fn get_mouse_event(&self) -> MouseEvent {
        self.get_mouse_event_pos(self.pointer_position)
    }

    fn get_mouse_event_pos(&self, screen_pointer_position: Point2) -> MouseEvent {
        MouseEvent {
            screen_pointer_position,
            buttons: self.buttons_state,
        }
    }
}
