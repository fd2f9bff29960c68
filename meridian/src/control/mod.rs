//! This module contains traits and structs that provide interactivity of a
//! Meridian map.
//!
//! User interaction handling is done in several steps:
//! 1. OS events are converted by the host windowing integration into the
//!    common [`RawUserEvent`] enum.
//! 2. `RawUserEvent` is given to the [`EventProcessor`], that converts it
//!    into a [`UserEvent`]. `EventProcessor` keeps track of input state
//!    (which mouse buttons are pressed, where the pointer is) and provides a
//!    more convenient way to handle user interactions for the application.
//! 3. `EventProcessor` has a list of [`UserEventHandler`]s, which change the
//!    state of the application based on the events.
//!
//! To write a user interaction logic, the app must provide an implementation
//! of the [`UserEventHandler`] trait and add it to the `EventProcessor`
//! handler list. The [`ShapeEditor`](editor::ShapeEditor) controller provided
//! by this crate is such a handler.

use maybe_sync::{MaybeSend, MaybeSync};
use meridian_types::{Point2, Vector2};

use crate::map::Map;

pub mod editor;
mod event_processor;

pub use event_processor::EventProcessor;

/// User input handler.
pub trait UserEventHandler {
    /// Handle the event.
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

impl<T: for<'a> FnMut(&'a UserEvent, &'a mut Map) -> EventPropagation> UserEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        self(event, map)
    }
}

/// Raw user interaction event. This type is an intermediate step between an
/// OS event and an event that will be processed by the application. It does
/// not provide any state information; the input state is tracked by the
/// [`EventProcessor`], which combines `RawUserEvent` with the state to
/// produce [`UserEvent`]s.
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved to the given screen pixel position.
    PointerMoved(Point2),
    /// Scroll was called (by a mouse wheel or touch pad scrolling). The
    /// number is the number of lines that the event would scroll if it was
    /// scrolling a text.
    Scroll(f64),
    /// A keyboard key was pressed.
    KeyPressed(KeyCode),
    /// A keyboard key was released.
    KeyReleased(KeyCode),
}

/// User interaction event. This is the main type that the application would
/// use through [`UserEventHandler`]s.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was clicked. This event is fired right after the
    /// [`UserEvent::ButtonReleased`] event if the release was shortly after
    /// the press event.
    Click(MouseButton, MouseEvent),
    /// A double click was done. This event is fired right after the second
    /// [`UserEvent::Click`] event if the second click was done shortly after
    /// the first one.
    DoubleClick(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),

    /// Drag started (user pressed a mouse button and moved the pointer
    /// around without releasing the button).
    DragStarted(MouseButton, MouseEvent),

    /// Mouse pointer moved after drag start was consumed. The vector is the
    /// screen pixel delta from the previous pointer position.
    Drag(MouseButton, Vector2, MouseEvent),

    /// Mouse button was released while dragging.
    DragEnded(MouseButton, MouseEvent),

    /// Scroll event is called. The number is number of text lines the scroll
    /// is requested for.
    Scroll(f64, MouseEvent),

    /// A keyboard key was pressed.
    KeyPressed(KeyCode),
    /// A keyboard key was released.
    KeyReleased(KeyCode),
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the
/// event.
#[derive(Debug)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
    /// Event should not be propagated to the next handler, and the current
    /// event handler should be considered the owner of the event. This is
    /// used to indicate that the handler takes ownership of the
    /// [`UserEvent::DragStarted`], so that all consequent drag events are
    /// only processed by this handler.
    Consume,
}

/// Mouse button enum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Right,
    /// Any other mouse button.
    Other,
}

/// Keyboard key enum.
///
/// Only the keys interaction controllers react to are distinguished; all
/// remaining keys are mapped to [`KeyCode::Other`] by the host integration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum KeyCode {
    /// The escape key.
    Escape,
    /// Any other keyboard key.
    Other,
}

/// State of the mouse at the moment of the event.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    /// Pointer position on the screen in pixels from the top-left corner.
    pub screen_pointer_position: Point2,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// State of a mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButtonState {
    /// Button is pressed.
    Pressed,
    /// Button is not pressed.
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Pressed);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Released);
    }

    fn set_state(&mut self, button: MouseButton, state: MouseButtonState) {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::Other => {}
        }
    }

    fn single_pressed(&self) -> Option<MouseButton> {
        let mut button = None;
        if self.left == MouseButtonState::Pressed && button.replace(MouseButton::Left).is_some() {
            return None;
        }
        if self.middle == MouseButtonState::Pressed && button.replace(MouseButton::Middle).is_some()
        {
            return None;
        }
        if self.right == MouseButtonState::Pressed && button.replace(MouseButton::Right).is_some() {
            return None;
        }

        button
    }
}

impl Default for MouseButtonsState {
    fn default() -> Self {
        Self {
            left: MouseButtonState::Released,
            middle: MouseButtonState::Released,
            right: MouseButtonState::Released,
        }
    }
}
