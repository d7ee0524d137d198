use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use web_sys::Element;

use meshpaint_core::{
    run_export, DragController, ExportArtifact, ExportError, ExportTicket, GradientDescription,
    HexColor, PointerSample, Position, Studio, TextOverlay,
};

use crate::app_router::InitConfig;
use crate::drag_capture::DragListeners;
use crate::export::{AnchorDownload, CanvasRasterizer};
use crate::input::{container_origin, container_size, PointerKind};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

/// What the view renders from.
#[derive(Clone, PartialEq)]
pub(crate) struct AppSnapshot {
    pub(crate) gradient: Option<GradientDescription>,
    pub(crate) history: Vec<GradientDescription>,
    pub(crate) overlay: TextOverlay,
    pub(crate) generating: bool,
    pub(crate) exporting: bool,
    pub(crate) dragging: bool,
}

struct PendingGeneration {
    id: u64,
    _timeout: Timeout,
}

/// Shared owner of the session [`Studio`] plus the browser resources tied
/// to it: generation timers, the drag gesture's listeners, and subscribers.
pub(crate) struct StudioCore {
    studio: RefCell<Studio>,
    drag: RefCell<DragController<DragListeners>>,
    pending: RefCell<Vec<PendingGeneration>>,
    next_timer_id: Cell<u64>,
    generate_delay_ms: u32,
    export_scale: u32,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
    self_ref: Weak<StudioCore>,
}

impl StudioCore {
    pub(crate) fn new(config: &InitConfig, seed: u64) -> Rc<Self> {
        gloo::console::log!(
            "studio",
            format!(
                "seed={seed} delay={}ms scale={}x",
                config.generate_delay_ms, config.export_scale
            )
        );
        Rc::new_cyclic(|self_ref| Self {
            studio: RefCell::new(Studio::with_seed(seed)),
            drag: RefCell::new(DragController::new()),
            pending: RefCell::new(Vec::new()),
            next_timer_id: Cell::new(1),
            generate_delay_ms: config.generate_delay_ms,
            export_scale: config.export_scale,
            subscribers: Rc::new(RefCell::new(Vec::new())),
            self_ref: self_ref.clone(),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        let studio = self.studio.borrow();
        AppSnapshot {
            gradient: studio.current().cloned(),
            history: studio.history().iter().cloned().collect(),
            overlay: studio.overlay().clone(),
            generating: studio.is_generating(),
            exporting: studio.is_exporting(),
            dragging: self.drag.borrow().is_dragging(),
        }
    }

    fn update<F>(&self, mutator: F)
    where
        F: FnOnce(&mut Studio),
    {
        {
            let mut studio = self.studio.borrow_mut();
            mutator(&mut studio);
        }
        self.notify();
    }

    /// Schedules a new gradient to appear after the configured delay.
    /// Earlier requests still pending are left to complete first.
    pub(crate) fn request_generation(&self) {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id.wrapping_add(1));
        let weak = self.self_ref.clone();
        let timeout = Timeout::new(self.generate_delay_ms, move || {
            if let Some(core) = weak.upgrade() {
                core.finish_generation(id);
            }
        });
        self.pending.borrow_mut().push(PendingGeneration {
            id,
            _timeout: timeout,
        });
        self.update(|studio| studio.begin_generation());
    }

    fn finish_generation(&self, id: u64) {
        let finished = {
            let mut pending = self.pending.borrow_mut();
            let before = pending.len();
            pending.retain(|entry| entry.id != id);
            pending.len() != before
        };
        if !finished {
            return;
        }
        self.update(|studio| {
            let gradient = studio.complete_generation();
            gloo::console::log!("gradient generated", gradient.layers().len() as u32);
        });
    }

    pub(crate) fn select_history(&self, index: usize) {
        self.update(|studio| {
            studio.select_history(index);
        });
    }

    pub(crate) fn set_text(&self, content: String) {
        self.update(|studio| studio.set_text(content));
    }

    pub(crate) fn set_font_size_px(&self, size: u32) {
        self.update(|studio| studio.set_font_size_px(size));
    }

    pub(crate) fn toggle_bold(&self) {
        self.update(Studio::toggle_bold);
    }

    pub(crate) fn toggle_italic(&self) {
        self.update(Studio::toggle_italic);
    }

    pub(crate) fn set_text_color(&self, color: HexColor) {
        self.update(|studio| studio.set_text_color(color));
    }

    pub(crate) fn remove_text(&self) {
        let removed = self.studio.borrow_mut().remove_text();
        if removed {
            self.notify();
        }
    }

    /// Starts dragging the overlay inside `preview`. Ignored while another
    /// gesture is active.
    pub(crate) fn begin_drag(&self, preview: Element, kind: PointerKind) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let weak_move = self.self_ref.clone();
        let weak_end = self.self_ref.clone();
        let started = self.drag.borrow_mut().begin(move || {
            DragListeners::attach(
                &document,
                Rc::new(move |sample| {
                    if let Some(core) = weak_move.upgrade() {
                        core.drag_move(&preview, sample);
                    }
                }),
                Rc::new(move || {
                    if let Some(core) = weak_end.upgrade() {
                        core.end_drag();
                    }
                }),
            )
        });
        if started {
            self.notify();
        } else {
            gloo::console::warn!("drag already active, ignoring", kind.label());
        }
    }

    fn drag_move(&self, preview: &Element, sample: PointerSample) {
        let origin = container_origin(preview);
        let position = self.drag.borrow_mut().drag_move(sample, origin);
        if let Some(position) = position {
            self.set_text_position(position);
        }
    }

    fn set_text_position(&self, position: Position) {
        self.update(|studio| studio.set_text_position(position));
    }

    pub(crate) fn end_drag(&self) {
        let ended = self.drag.borrow_mut().end();
        if ended {
            self.notify();
        }
    }

    /// Rasterizes the preview and downloads it. Returns `Busy` without side
    /// effects when an export is already running.
    pub(crate) async fn export_png(&self, preview: Option<Element>) -> Result<ExportArtifact, ExportError> {
        let ticket = self
            .studio
            .borrow()
            .export_gate()
            .acquire()?;
        self.notify();
        let result = match preview {
            Some(preview) => self.rasterize_and_download(ticket, &preview).await,
            None => Err(ExportError::MissingPreview),
        };
        self.notify();
        result
    }

    async fn rasterize_and_download(
        &self,
        ticket: ExportTicket,
        preview: &Element,
    ) -> Result<ExportArtifact, ExportError> {
        let (width, height) = container_size(preview);
        let scene = self.studio.borrow().export_scene(width, height);
        let rasterizer = CanvasRasterizer::new()?;
        let epoch_ms = js_sys::Date::now().max(0.0) as u64;
        run_export(
            ticket,
            &rasterizer,
            &AnchorDownload,
            scene,
            self.export_scale,
            epoch_ms,
        )
        .await
    }

    /// Cancels pending generations and releases any active drag.
    pub(crate) fn shutdown(&self) {
        let cancelled = std::mem::take(&mut *self.pending.borrow_mut());
        if !cancelled.is_empty() {
            gloo::console::log!("cancelled pending generations", cancelled.len() as u32);
        }
        drop(cancelled);
        self.studio.borrow_mut().cancel_pending_generations();
        self.drag.borrow_mut().end();
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
