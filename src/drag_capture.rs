use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use web_sys::{Event, EventTarget};

use meshpaint_core::PointerSample;

use crate::input::pointer_sample;

pub(crate) type MoveHook = Rc<dyn Fn(PointerSample)>;
pub(crate) type EndHook = Rc<dyn Fn()>;

const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
const END_EVENTS: [&str; 3] = ["mouseup", "touchend", "touchcancel"];

/// Document-level listeners for one drag gesture. Dropping the value
/// unregisters every listener.
pub(crate) struct DragListeners {
    _listeners: Vec<EventListener>,
}

impl DragListeners {
    pub(crate) fn attach(target: &EventTarget, on_move: MoveHook, on_end: EndHook) -> Self {
        let options = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        let mut listeners = Vec::with_capacity(MOVE_EVENTS.len() + END_EVENTS.len());
        for name in MOVE_EVENTS {
            let on_move = on_move.clone();
            listeners.push(EventListener::new_with_options(
                target,
                name,
                options,
                move |event: &Event| {
                    let Some(sample) = pointer_sample(event) else {
                        return;
                    };
                    // keeps touch drags from scrolling the page
                    if event.type_() == "touchmove" {
                        event.prevent_default();
                    }
                    on_move(sample);
                },
            ));
        }
        for name in END_EVENTS {
            let on_end = on_end.clone();
            listeners.push(EventListener::new_with_options(
                target,
                name,
                options,
                move |_event: &Event| on_end(),
            ));
        }
        Self {
            _listeners: listeners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{MouseEvent, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn dispatch_mouse(target: &EventTarget, name: &str, x: i32, y: i32) {
        let init = MouseEventInit::new();
        init.set_client_x(x);
        init.set_client_y(y);
        let event = MouseEvent::new_with_mouse_event_init_dict(name, &init).expect("mouse event");
        target
            .dispatch_event(event.unchecked_ref())
            .expect("dispatch");
    }

    #[wasm_bindgen_test]
    fn dropping_listeners_stops_delivery() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let target: EventTarget = document.create_element("div").expect("div").into();
        let moves = Rc::new(Cell::new(0u32));
        let ends = Rc::new(Cell::new(0u32));
        let moves_hook = moves.clone();
        let ends_hook = ends.clone();
        let listeners = DragListeners::attach(
            &target,
            Rc::new(move |_sample| moves_hook.set(moves_hook.get() + 1)),
            Rc::new(move || ends_hook.set(ends_hook.get() + 1)),
        );

        dispatch_mouse(&target, "mousemove", 10, 10);
        dispatch_mouse(&target, "mouseup", 10, 10);
        assert_eq!((moves.get(), ends.get()), (1, 1));

        drop(listeners);
        dispatch_mouse(&target, "mousemove", 20, 20);
        dispatch_mouse(&target, "mouseup", 20, 20);
        assert_eq!((moves.get(), ends.get()), (1, 1));
    }
}
