pub mod color;
pub mod drag;
pub mod export;
pub mod gradient;
pub mod history;
pub mod overlay;
pub mod studio;

pub use color::{ColorParseError, HexColor, RGB24_MAX};
pub use drag::{container_relative, ContainerOrigin, DragController, PointerSample, Position};
pub use export::{
    export_file_name, run_export, ExportArtifact, ExportError, ExportGate, ExportRequest,
    ExportScene, ExportSink, ExportTicket, Rasterizer, EXPORT_FALLBACK_BACKGROUND,
    EXPORT_FILE_PREFIX, EXPORT_SCALE_DEFAULT, EXPORT_SCALE_MAX,
};
pub use gradient::{
    generate_gradient, GradientDescription, MeshGenerator, RadialLayer, SizingMode,
    LAYER_COUNT_MAX, LAYER_COUNT_MIN,
};
pub use history::{GradientHistory, HISTORY_CAPACITY};
pub use overlay::{
    wrap_lines, TextOverlay, FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, TEXT_MAX_WIDTH_RATIO,
};
pub use studio::Studio;
