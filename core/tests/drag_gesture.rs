use std::cell::Cell;
use std::rc::Rc;

use meshpaint_core::{ContainerOrigin, DragController, PointerSample, Position, Studio};

struct CountingHandle {
    released: Rc<Cell<u32>>,
}

impl Drop for CountingHandle {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

fn handle(released: &Rc<Cell<u32>>) -> CountingHandle {
    CountingHandle {
        released: Rc::clone(released),
    }
}

#[test]
fn move_is_relative_to_container_origin() {
    let released = Rc::new(Cell::new(0));
    let mut studio = Studio::with_seed(0);
    let mut drag = DragController::new();
    assert!(drag.begin(|| handle(&released)));

    let origin = ContainerOrigin {
        left: 100.0,
        top: 50.0,
    };
    let sample = PointerSample {
        client_x: 150.0,
        client_y: 120.0,
    };
    let position = drag.drag_move(sample, origin).expect("dragging");
    studio.set_text_position(position);
    assert_eq!(studio.overlay().position(), Position::new(50.0, 70.0));
}

#[test]
fn positions_are_not_clamped() {
    let released = Rc::new(Cell::new(0));
    let mut drag = DragController::new();
    drag.begin(|| handle(&released));
    let origin = ContainerOrigin {
        left: 100.0,
        top: 50.0,
    };
    let position = drag
        .drag_move(
            PointerSample {
                client_x: 20.0,
                client_y: 4000.0,
            },
            origin,
        )
        .unwrap();
    assert_eq!(position, Position::new(-80.0, 3950.0));
}

#[test]
fn idle_controller_ignores_moves() {
    let mut drag: DragController<CountingHandle> = DragController::new();
    let sample = PointerSample {
        client_x: 1.0,
        client_y: 1.0,
    };
    assert_eq!(drag.drag_move(sample, ContainerOrigin::default()), None);
    assert!(!drag.end());
}

#[test]
fn subscription_released_once_per_gesture() {
    let released = Rc::new(Cell::new(0));
    let mut drag = DragController::new();
    for round in 1..=3 {
        assert!(drag.begin(|| handle(&released)));
        assert!(drag.is_dragging());
        assert!(drag.end());
        assert!(!drag.end());
        assert!(!drag.is_dragging());
        assert_eq!(released.get(), round);
    }
}

#[test]
fn second_start_while_dragging_is_ignored() {
    let released = Rc::new(Cell::new(0));
    let subscribed = Cell::new(0);
    let mut drag = DragController::new();
    assert!(drag.begin(|| {
        subscribed.set(subscribed.get() + 1);
        handle(&released)
    }));
    assert!(!drag.begin(|| {
        subscribed.set(subscribed.get() + 1);
        handle(&released)
    }));
    assert_eq!(subscribed.get(), 1);
    assert_eq!(released.get(), 0);
    drag.end();
    assert_eq!(released.get(), 1);
}

#[test]
fn teardown_mid_drag_releases_subscription() {
    let released = Rc::new(Cell::new(0));
    {
        let mut drag = DragController::new();
        drag.begin(|| handle(&released));
        assert_eq!(released.get(), 0);
    }
    assert_eq!(released.get(), 1);
}

