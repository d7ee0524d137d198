use wasm_bindgen::JsCast;
use web_sys::{DomRect, Element, Event, MouseEvent, TouchEvent};

use meshpaint_core::{ContainerOrigin, PointerSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            PointerKind::Mouse => "mouse",
            PointerKind::Touch => "touch",
        }
    }
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn container_origin(element: &impl HasClientRect) -> ContainerOrigin {
    let rect = element.client_rect();
    ContainerOrigin {
        left: rect.left(),
        top: rect.top(),
    }
}

pub(crate) fn container_size(element: &impl HasClientRect) -> (f64, f64) {
    let rect = element.client_rect();
    (rect.width(), rect.height())
}

pub(crate) fn pointer_kind(event: &Event) -> Option<PointerKind> {
    if event.dyn_ref::<TouchEvent>().is_some() {
        return Some(PointerKind::Touch);
    }
    if event.dyn_ref::<MouseEvent>().is_some() {
        return Some(PointerKind::Mouse);
    }
    None
}

/// Viewport coordinates of a mouse or touch event. Touches read the first
/// active touch and fall back to the first changed one, which is the only
/// place an end event carries its point.
pub(crate) fn pointer_sample(event: &Event) -> Option<PointerSample> {
    if let Some(event) = event.dyn_ref::<TouchEvent>() {
        let touch = event
            .touches()
            .get(0)
            .or_else(|| event.changed_touches().get(0))?;
        return Some(PointerSample {
            client_x: touch.client_x() as f64,
            client_y: touch.client_y() as f64,
        });
    }
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(PointerSample {
        client_x: event.client_x() as f64,
        client_y: event.client_y() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshpaint_core::container_relative;
    use wasm_bindgen_test::*;
    use web_sys::MouseEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn mouse_sample_is_relative_to_container() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let container = document
            .create_element("div")
            .expect("create container");
        container
            .set_attribute(
                "style",
                "position: fixed; left: 100px; top: 50px; width: 200px; height: 100px;",
            )
            .expect("style container");
        document
            .body()
            .expect("body available")
            .append_child(&container)
            .expect("append container");

        let init = MouseEventInit::new();
        init.set_client_x(150);
        init.set_client_y(120);
        let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init)
            .expect("mouse event");
        let sample = pointer_sample(&event).expect("mouse sample");
        let origin = container_origin(&container);
        let position = container_relative(sample, origin);
        assert_eq!((position.x, position.y), (50.0, 70.0));
        assert_eq!(pointer_kind(&event), Some(PointerKind::Mouse));

        container.remove();
    }
}
