use crate::color::HexColor;
use crate::drag::Position;
use crate::export::{ExportGate, ExportScene};
use crate::gradient::{GradientDescription, MeshGenerator};
use crate::history::GradientHistory;
use crate::overlay::TextOverlay;

/// All session state behind the editor: current gradient, history, text
/// overlay, and the two in-flight flags (generation and export).
#[derive(Debug)]
pub struct Studio {
    generator: MeshGenerator,
    current: Option<GradientDescription>,
    history: GradientHistory,
    overlay: TextOverlay,
    pending_generations: u32,
    export_gate: ExportGate,
}

impl Studio {
    pub fn new(generator: MeshGenerator) -> Self {
        Self {
            generator,
            current: None,
            history: GradientHistory::new(),
            overlay: TextOverlay::new(),
            pending_generations: 0,
            export_gate: ExportGate::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(MeshGenerator::from_seed(seed))
    }

    pub fn current(&self) -> Option<&GradientDescription> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &GradientHistory {
        &self.history
    }

    pub fn overlay(&self) -> &TextOverlay {
        &self.overlay
    }

    pub fn is_generating(&self) -> bool {
        self.pending_generations > 0
    }

    pub fn is_exporting(&self) -> bool {
        self.export_gate.is_busy()
    }

    pub fn export_gate(&self) -> &ExportGate {
        &self.export_gate
    }

    /// Marks a generation as scheduled. The result lands in
    /// [`Studio::complete_generation`] once the caller's delay elapses.
    pub fn begin_generation(&mut self) {
        self.pending_generations = self.pending_generations.saturating_add(1);
    }

    /// Generates, makes the result current, and records it. Completions
    /// apply in the order they fire, so the latest one stays visible.
    pub fn complete_generation(&mut self) -> &GradientDescription {
        let gradient = self.generator.next_gradient();
        self.pending_generations = self.pending_generations.saturating_sub(1);
        self.history.record(gradient.clone());
        self.current.insert(gradient)
    }

    pub fn cancel_pending_generations(&mut self) {
        self.pending_generations = 0;
    }

    /// Shows a history entry without touching the history itself.
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(gradient) = self.history.select(index) else {
            return false;
        };
        self.current = Some(gradient.clone());
        true
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.overlay.set_content(content);
    }

    pub fn set_font_size_px(&mut self, size: u32) {
        self.overlay.set_font_size_px(size);
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.overlay.set_bold(bold);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.overlay.set_italic(italic);
    }

    pub fn toggle_bold(&mut self) {
        let next = !self.overlay.bold();
        self.overlay.set_bold(next);
    }

    pub fn toggle_italic(&mut self) {
        let next = !self.overlay.italic();
        self.overlay.set_italic(next);
    }

    pub fn set_text_color(&mut self, color: HexColor) {
        self.overlay.set_color(color);
    }

    pub fn set_text_position(&mut self, position: Position) {
        self.overlay.set_position(position);
    }

    pub fn remove_text(&mut self) -> bool {
        self.overlay.clear_content()
    }

    pub fn export_scene(&self, width_px: f64, height_px: f64) -> ExportScene {
        let overlay = if self.overlay.is_visible() {
            Some(self.overlay.clone())
        } else {
            None
        };
        ExportScene {
            gradient: self.current.clone(),
            overlay,
            width_px,
            height_px,
        }
    }
}
