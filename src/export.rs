use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement};

use meshpaint_core::{
    wrap_lines, ExportError, ExportRequest, ExportSink, GradientDescription, Rasterizer, TextOverlay,
    TEXT_MAX_WIDTH_RATIO,
};

const PNG_MIME: &str = "image/png";
/// Dim wash the preview draws over the gradient.
const PREVIEW_WASH: &str = "rgba(0, 0, 0, 0.1)";
const LINE_HEIGHT_RATIO: f64 = 1.2;

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Paints the preview scene onto an offscreen canvas and returns it as a
/// PNG data URL.
pub(crate) struct CanvasRasterizer {
    document: Document,
}

impl CanvasRasterizer {
    pub(crate) fn new() -> Result<Self, ExportError> {
        let document =
            document().ok_or_else(|| ExportError::Rasterize("document unavailable".to_string()))?;
        Ok(Self { document })
    }

    fn paint(&self, request: &ExportRequest) -> Result<String, JsValue> {
        let canvas: HtmlCanvasElement = self.document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(request.target_width);
        canvas.set_height(request.target_height);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let scale = request.scale as f64;
        ctx.scale(scale, scale)?;
        let width = request.target_width as f64 / scale;
        let height = request.target_height as f64 / scale;

        ctx.set_fill_style_str(&request.background.to_string());
        ctx.fill_rect(0.0, 0.0, width, height);
        if let Some(gradient) = request.scene.gradient.as_ref() {
            paint_gradient(&ctx, gradient, width, height)?;
        }
        ctx.set_fill_style_str(PREVIEW_WASH);
        ctx.fill_rect(0.0, 0.0, width, height);
        if let Some(overlay) = request.scene.overlay.as_ref() {
            paint_overlay(&ctx, overlay, width)?;
        }
        canvas.to_data_url_with_type(PNG_MIME)
    }
}

impl Rasterizer for CanvasRasterizer {
    type Image = String;

    async fn rasterize(&self, request: &ExportRequest) -> Result<String, ExportError> {
        self.paint(request)
            .map_err(|err| ExportError::Rasterize(js_err(err)))
    }
}

/// Distance from (cx, cy) to the farthest box corner, the ray length of a
/// CSS `circle` radial gradient.
pub(crate) fn farthest_corner(cx: f64, cy: f64, width: f64, height: f64) -> f64 {
    let dx = cx.max(width - cx);
    let dy = cy.max(height - cy);
    dx.hypot(dy)
}

fn paint_gradient(
    ctx: &CanvasRenderingContext2d,
    gradient: &GradientDescription,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    // CSS lists the top layer first
    for layer in gradient.layers().iter().rev() {
        let cx = width * layer.center_x_percent() as f64 / 100.0;
        let cy = height * layer.center_y_percent() as f64 / 100.0;
        let radius = farthest_corner(cx, cy, width, height) * layer.radius_percent() as f64 / 100.0;
        if radius <= 0.0 {
            continue;
        }
        let fill = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius)?;
        fill.add_color_stop(0.0, &layer.color().to_string())?;
        fill.add_color_stop(1.0, &layer.color().rgba_css(0.0))?;
        ctx.set_fill_style_canvas_gradient(&fill);
        ctx.fill_rect(0.0, 0.0, width, height);
    }
    Ok(())
}

/// Lines of overlay text as the preview wraps them inside `width`.
fn overlay_lines(
    ctx: &CanvasRenderingContext2d,
    overlay: &TextOverlay,
    width: f64,
) -> Result<Vec<String>, JsValue> {
    ctx.set_font(&overlay.font_shorthand());
    wrap_lines(overlay.content(), width * TEXT_MAX_WIDTH_RATIO, |text| {
        ctx.measure_text(text).map(|metrics| metrics.width())
    })
}

fn paint_overlay(
    ctx: &CanvasRenderingContext2d,
    overlay: &TextOverlay,
    width: f64,
) -> Result<(), JsValue> {
    let lines = overlay_lines(ctx, overlay, width)?;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(&overlay.color().to_string());
    let line_height = overlay.font_size_px() as f64 * LINE_HEIGHT_RATIO;
    let position = overlay.position();
    let first_y = position.y - line_height * (lines.len() as f64 - 1.0) / 2.0;
    for (idx, line) in lines.iter().enumerate() {
        ctx.fill_text(line, position.x, first_y + line_height * idx as f64)?;
    }
    Ok(())
}

/// Saves a data URL through a temporary `<a download>`.
pub(crate) struct AnchorDownload;

impl ExportSink<String> for AnchorDownload {
    fn deliver(&self, file_name: &str, image: String) -> Result<(), ExportError> {
        trigger_download(file_name, &image).map_err(|err| ExportError::Download(js_err(err)))
    }
}

fn trigger_download(file_name: &str, href: &str) -> Result<(), JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(href);
    link.set_download(file_name);
    link.set_attribute("style", "display: none;")?;
    body.append_child(&link)?;
    link.click();
    link.remove();
    Ok(())
}

pub(crate) async fn copy_to_clipboard(text: String) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let promise = window.navigator().clipboard().write_text(&text);
    JsFuture::from(promise).await.map_err(js_err)?;
    Ok(())
}
