use std::cell::Cell;
use std::rc::Rc;

use crate::color::HexColor;
use crate::gradient::GradientDescription;
use crate::overlay::TextOverlay;

pub const EXPORT_FILE_PREFIX: &str = "mesh-gradient-with-text";
pub const EXPORT_SCALE_DEFAULT: u32 = 2;
pub const EXPORT_SCALE_MAX: u32 = 4;
pub const EXPORT_FALLBACK_BACKGROUND: HexColor = HexColor::BLACK;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,
    #[error("preview element is not mounted")]
    MissingPreview,
    #[error("preview has no area ({width}x{height})")]
    EmptyPreview { width: u32, height: u32 },
    #[error("rasterization failed: {0}")]
    Rasterize(String),
    #[error("download failed: {0}")]
    Download(String),
}

pub fn export_file_name(epoch_ms: u64) -> String {
    format!("{EXPORT_FILE_PREFIX}-{epoch_ms}.png")
}

/// What the preview currently shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportScene {
    pub gradient: Option<GradientDescription>,
    /// Only present when the overlay has text.
    pub overlay: Option<TextOverlay>,
    pub width_px: f64,
    pub height_px: f64,
}

/// Input handed to a [`Rasterizer`].
///
/// The scene is drawn in preview pixels under a `scale` transform anchored
/// at the top-left corner, onto an opaque `background`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRequest {
    pub scene: ExportScene,
    pub scale: u32,
    pub target_width: u32,
    pub target_height: u32,
    pub background: HexColor,
}

impl ExportRequest {
    pub fn new(scene: ExportScene, scale: u32) -> Result<Self, ExportError> {
        let scale = scale.clamp(1, EXPORT_SCALE_MAX);
        let width = scene.width_px.max(0.0).round() as u32;
        let height = scene.height_px.max(0.0).round() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyPreview { width, height });
        }
        Ok(Self {
            scene,
            scale,
            target_width: width * scale,
            target_height: height * scale,
            background: EXPORT_FALLBACK_BACKGROUND,
        })
    }
}

/// Rasterization collaborator.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    type Image;

    async fn rasterize(&self, request: &ExportRequest) -> Result<Self::Image, ExportError>;
}

/// Hands a finished image to the user (a download, a file, ...).
pub trait ExportSink<I> {
    fn deliver(&self, file_name: &str, image: I) -> Result<(), ExportError>;
}

/// Busy flag allowing at most one export in flight.
#[derive(Clone, Debug, Default)]
pub struct ExportGate {
    busy: Rc<Cell<bool>>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claims the gate, or fails with `Busy` while another export holds it.
    pub fn acquire(&self) -> Result<ExportTicket, ExportError> {
        if self.busy.replace(true) {
            return Err(ExportError::Busy);
        }
        Ok(ExportTicket {
            busy: Rc::clone(&self.busy),
        })
    }
}

/// Held while an export runs; dropping it clears the busy flag whether the
/// export succeeded or not.
#[derive(Debug)]
pub struct ExportTicket {
    busy: Rc<Cell<bool>>,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Rasterizes and delivers under an already acquired ticket, which is
/// released when this returns.
pub async fn run_export<R, K>(
    ticket: ExportTicket,
    rasterizer: &R,
    sink: &K,
    scene: ExportScene,
    scale: u32,
    epoch_ms: u64,
) -> Result<ExportArtifact, ExportError>
where
    R: Rasterizer,
    K: ExportSink<R::Image>,
{
    let _ticket = ticket;
    let request = ExportRequest::new(scene, scale)?;
    let image = rasterizer.rasterize(&request).await?;
    let file_name = export_file_name(epoch_ms);
    sink.deliver(&file_name, image)?;
    Ok(ExportArtifact {
        file_name,
        width: request.target_width,
        height: request.target_height,
    })
}
