use std::rc::Rc;
use std::str::FromStr;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, HtmlTextAreaElement, InputEvent, MouseEvent};
use yew::prelude::*;

use meshpaint_core::{
    ExportError, GradientDescription, HexColor, TextOverlay, FONT_SIZE_MAX, FONT_SIZE_MIN,
    TEXT_MAX_WIDTH_RATIO,
};

use crate::app_core::{AppSnapshot, StudioCore};
use crate::export::copy_to_clipboard;
use crate::input::{pointer_kind, PointerKind};

const APP_ROOT_ID: &str = "app";
const EXPORT_FAILED_ALERT: &str = "PNG download failed. Please try again.";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<StudioCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            gloo::console::error!("alert failed", err);
        }
    }
}

#[derive(Properties, PartialEq)]
struct PreviewProps {
    gradient: Option<GradientDescription>,
    overlay: TextOverlay,
    generating: bool,
    dragging: bool,
    preview_ref: NodeRef,
    on_drag_start: Callback<PointerKind>,
}

fn overlay_style(overlay: &TextOverlay, dragging: bool) -> String {
    let position = overlay.position();
    format!(
        "left: {}px; top: {}px; font-size: {}px; font-weight: {}; font-style: {}; color: {}; \
         transform: translate(-50%, -50%); white-space: pre-wrap; max-width: {}%; \
         word-break: break-word; user-select: none; -webkit-user-select: none; \
         touch-action: none; cursor: {};",
        position.x,
        position.y,
        overlay.font_size_px(),
        overlay.font_weight_css(),
        overlay.font_style_css(),
        overlay.color(),
        TEXT_MAX_WIDTH_RATIO * 100.0,
        if dragging { "grabbing" } else { "move" },
    )
}

#[function_component(GradientPreview)]
fn gradient_preview(props: &PreviewProps) -> Html {
    let text_ref = use_node_ref();
    {
        // registered directly so the listener is not passive
        let text_ref = text_ref.clone();
        let on_drag_start = props.on_drag_start.clone();
        use_effect_with(props.overlay.is_visible(), move |visible| {
            let listener = (*visible)
                .then(|| text_ref.cast::<Element>())
                .flatten()
                .map(|text| {
                    EventListener::new_with_options(
                        &text,
                        "touchstart",
                        EventListenerOptions::enable_prevent_default(),
                        move |event: &Event| {
                            // suppresses the emulated mouse events a tap would also fire
                            event.prevent_default();
                            on_drag_start.emit(pointer_kind(event).unwrap_or(PointerKind::Touch));
                        },
                    )
                });
            move || drop(listener)
        });
    }
    let background = props
        .gradient
        .as_ref()
        .map(GradientDescription::inline_style)
        .unwrap_or_default();
    let text_layer = if props.overlay.is_visible() {
        let onmousedown = {
            let on_drag_start = props.on_drag_start.clone();
            Callback::from(move |event: MouseEvent| {
                // no text selection while dragging
                event.prevent_default();
                on_drag_start.emit(PointerKind::Mouse);
            })
        };
        html! {
            <div
                class="preview-text"
                ref={text_ref}
                style={overlay_style(&props.overlay, props.dragging)}
                {onmousedown}
            >
                {props.overlay.content().to_string()}
            </div>
        }
    } else {
        html! {}
    };
    let spinner = if props.generating {
        html! {
            <div class="preview-busy">
                <div class="spinner"></div>
            </div>
        }
    } else {
        html! {}
    };
    html! {
        <div class="preview" ref={props.preview_ref.clone()}>
            <div class="preview-gradient" style={background}></div>
            <div class="preview-wash"></div>
            {text_layer}
            {spinner}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CodeProps {
    gradient: Option<GradientDescription>,
}

#[function_component(GradientCode)]
fn gradient_code(props: &CodeProps) -> Html {
    let declaration = props
        .gradient
        .as_ref()
        .map(GradientDescription::css_declaration)
        .unwrap_or_else(|| "background: ;".to_string());
    let onclick = {
        let declaration = declaration.clone();
        Callback::from(move |_: MouseEvent| {
            let declaration = declaration.clone();
            spawn_local(async move {
                if let Err(err) = copy_to_clipboard(declaration).await {
                    gloo::console::error!("failed to copy", err);
                }
            });
        })
    };
    html! {
        <section class="panel code-panel">
            <div class="panel-header">
                <div class="panel-title">{"CSS Output"}</div>
                <button class="small" {onclick}>{"Copy"}</button>
            </div>
            <pre class="code">{declaration}</pre>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ControlProps {
    generating: bool,
    on_generate: Callback<()>,
}

#[function_component(ControlPanel)]
fn control_panel(props: &ControlProps) -> Html {
    let onclick = props.on_generate.reform(|_: MouseEvent| ());
    let label = if props.generating {
        "Generating..."
    } else {
        "Generate New Gradient"
    };
    html! {
        <section class="panel">
            <h2>{"Controls"}</h2>
            <button class="wide" disabled={props.generating} {onclick}>{label}</button>
            <div class="about">
                <h3>{"About Static Gradients"}</h3>
                <p>{"Static gradients maintain a fixed appearance with layered radial gradients."}</p>
            </div>
        </section>
    }
}

#[derive(Properties)]
struct EditorProps {
    overlay: TextOverlay,
    core: Rc<StudioCore>,
}

impl PartialEq for EditorProps {
    fn eq(&self, other: &Self) -> bool {
        self.overlay == other.overlay && Rc::ptr_eq(&self.core, &other.core)
    }
}

#[function_component(TextEditorPanel)]
fn text_editor_panel(props: &EditorProps) -> Html {
    let overlay = &props.overlay;
    let oninput_text = {
        let core = props.core.clone();
        Callback::from(move |event: InputEvent| {
            let textarea: HtmlTextAreaElement = event.target_unchecked_into();
            core.set_text(textarea.value());
        })
    };
    let oninput_size = {
        let core = props.core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            match input.value().parse::<u32>() {
                Ok(size) => core.set_font_size_px(size),
                Err(_) => gloo::console::warn!("ignoring font size", input.value()),
            }
        })
    };
    let oninput_color = {
        let core = props.core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            match HexColor::from_str(&input.value()) {
                Ok(color) => core.set_text_color(color),
                Err(err) => gloo::console::warn!("ignoring text color", err.to_string()),
            }
        })
    };
    let onclick_bold = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.toggle_bold())
    };
    let onclick_italic = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.toggle_italic())
    };
    let onclick_remove = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| core.remove_text())
    };
    let (x, y) = overlay.position().rounded();
    let color = overlay.color().to_string();
    html! {
        <section class="panel">
            <h2>{"Text Editor"}</h2>
            <div class="field">
                <label>{"Text Content"}</label>
                <textarea
                    rows="3"
                    placeholder="Enter your text here..."
                    value={overlay.content().to_string()}
                    oninput={oninput_text}
                />
            </div>
            <div class="field">
                <label>{format!("Font Size: {}px", overlay.font_size_px())}</label>
                <input
                    type="range"
                    min={FONT_SIZE_MIN.to_string()}
                    max={FONT_SIZE_MAX.to_string()}
                    value={overlay.font_size_px().to_string()}
                    oninput={oninput_size}
                />
            </div>
            <div class="field">
                <label>{"Text Style"}</label>
                <div class="row">
                    <button
                        class={classes!("toggle", overlay.bold().then_some("active"))}
                        onclick={onclick_bold}
                    >
                        <strong>{"Bold"}</strong>
                    </button>
                    <button
                        class={classes!("toggle", overlay.italic().then_some("active"))}
                        onclick={onclick_italic}
                    >
                        <em>{"Italic"}</em>
                    </button>
                </div>
            </div>
            <div class="field">
                <label>{"Text Color"}</label>
                <div class="row">
                    <input type="color" value={color.clone()} oninput={oninput_color} />
                    <span class="muted">{color}</span>
                </div>
            </div>
            <div class="field">
                <label>{"Position (Drag text on preview)"}</label>
                <div class="muted">{format!("X: {x}px, Y: {y}px")}</div>
            </div>
            <button class="wide danger" disabled={!overlay.is_visible()} onclick={onclick_remove}>
                {"Remove Text"}
            </button>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct DownloadProps {
    exporting: bool,
    on_download: Callback<()>,
}

#[function_component(DownloadPanel)]
fn download_panel(props: &DownloadProps) -> Html {
    let onclick = props.on_download.reform(|_: MouseEvent| ());
    let label = if props.exporting {
        "Processing..."
    } else {
        "Download as PNG"
    };
    html! {
        <section class="panel">
            <h2>{"Download"}</h2>
            <button class="wide" disabled={props.exporting} {onclick}>{label}</button>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct HistoryProps {
    history: Vec<GradientDescription>,
    on_select: Callback<usize>,
}

#[function_component(HistoryPanel)]
fn history_panel(props: &HistoryProps) -> Html {
    let body = if props.history.is_empty() {
        html! { <p class="muted empty">{"No gradients generated yet"}</p> }
    } else {
        let items: Html = props
            .history
            .iter()
            .enumerate()
            .map(|(index, gradient)| {
                let onclick = props.on_select.reform(move |_: MouseEvent| index);
                html! {
                    <button key={index} class="history-item" {onclick}>
                        <div class="history-swatch" style={gradient.inline_style()}></div>
                    </button>
                }
            })
            .collect();
        html! { <div class="history-grid">{items}</div> }
    };
    html! {
        <section class="panel">
            <h2>{"History"}</h2>
            {body}
        </section>
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let app_snapshot = use_state(|| app_core.snapshot());
    let preview_ref = use_node_ref();
    {
        let app_core = app_core.clone();
        let app_snapshot = app_snapshot.clone();
        use_effect_with((), move |_| {
            let app_core_for_cb = app_core.clone();
            let subscription = app_core.subscribe(Rc::new(move || {
                app_snapshot.set(app_core_for_cb.snapshot());
            }));
            app_core.request_generation();
            move || {
                drop(subscription);
                app_core.shutdown();
            }
        });
    }
    let AppSnapshot {
        gradient,
        history,
        overlay,
        generating,
        exporting,
        dragging,
    } = (*app_snapshot).clone();

    let on_generate = {
        let app_core = app_core.clone();
        Callback::from(move |_: ()| app_core.request_generation())
    };
    let on_drag_start = {
        let app_core = app_core.clone();
        let preview_ref = preview_ref.clone();
        Callback::from(move |kind: PointerKind| {
            if let Some(preview) = preview_ref.cast::<Element>() {
                app_core.begin_drag(preview, kind);
            }
        })
    };
    let on_download = {
        let app_core = app_core.clone();
        let preview_ref = preview_ref.clone();
        Callback::from(move |_: ()| {
            let app_core = app_core.clone();
            let preview = preview_ref.cast::<Element>();
            spawn_local(async move {
                match app_core.export_png(preview).await {
                    Ok(artifact) => gloo::console::log!(
                        "exported",
                        artifact.file_name,
                        format!("{}x{}", artifact.width, artifact.height)
                    ),
                    Err(ExportError::Busy) => {}
                    Err(err) => {
                        gloo::console::error!("export failed", err.to_string());
                        alert(EXPORT_FAILED_ALERT);
                    }
                }
            });
        })
    };
    let on_select = {
        let app_core = app_core.clone();
        Callback::from(move |index: usize| app_core.select_history(index))
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1>{"Mesh Engine"}</h1>
                <span class="badge">{"Static Mode"}</span>
            </header>
            <main class="layout">
                <div class="main-column">
                    <GradientPreview
                        gradient={gradient.clone()}
                        overlay={overlay.clone()}
                        {generating}
                        {dragging}
                        preview_ref={preview_ref.clone()}
                        {on_drag_start}
                    />
                    <GradientCode gradient={gradient} />
                </div>
                <div class="side-column">
                    <ControlPanel {generating} {on_generate} />
                    <TextEditorPanel {overlay} core={app_core.clone()} />
                    <DownloadPanel {exporting} {on_download} />
                    <HistoryPanel {history} {on_select} />
                </div>
            </main>
        </div>
    }
}

pub(crate) fn run_app(core: Rc<StudioCore>) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(APP_ROOT_ID));
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, AppProps { core }).render();
        }
        None => {
            yew::Renderer::<App>::with_props(AppProps { core }).render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_router::InitConfig;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(core: Rc<StudioCore>) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append root");
        yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { core }).render();
        root
    }

    fn test_core() -> Rc<StudioCore> {
        let config = InitConfig {
            seed: Some(7),
            generate_delay_ms: 0,
            ..InitConfig::default()
        };
        StudioCore::new(&config, 7)
    }

    #[wasm_bindgen_test]
    fn overlay_style_centers_text_on_position() {
        let mut overlay = TextOverlay::new();
        overlay.set_content("hi");
        overlay.set_bold(true);
        let style = overlay_style(&overlay, false);
        assert!(style.starts_with("left: 50px; top: 50px; font-size: 24px; font-weight: bold;"));
        assert!(style.contains("translate(-50%, -50%)"));
        assert!(style.contains("max-width: 90%;"));
        assert!(style.contains("cursor: move;"));
    }

    #[wasm_bindgen_test]
    async fn mount_generates_first_gradient() {
        let core = test_core();
        let root = mount(core.clone());
        TimeoutFuture::new(50).await;

        let snapshot = core.snapshot();
        assert!(snapshot.gradient.is_some());
        assert_eq!(snapshot.history.len(), 1);
        assert!(!snapshot.generating);
        let swatches = root
            .query_selector_all(".history-swatch")
            .expect("query swatches");
        assert_eq!(swatches.length(), 1);
        let code = root
            .query_selector(".code")
            .expect("query code")
            .and_then(|node| node.text_content())
            .unwrap_or_default();
        assert!(code.starts_with("background: radial-gradient(circle at "));
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn remove_button_tracks_text_content() {
        let core = test_core();
        let root = mount(core.clone());
        TimeoutFuture::new(20).await;

        let remove_disabled = |root: &Element| {
            root.query_selector("button.danger")
                .ok()
                .flatten()
                .map(|button| button.has_attribute("disabled"))
        };
        assert_eq!(remove_disabled(&root), Some(true));
        assert!(root.query_selector(".preview-text").expect("query").is_none());

        core.set_text("Hello".to_string());
        TimeoutFuture::new(20).await;
        assert_eq!(remove_disabled(&root), Some(false));
        assert!(root.query_selector(".preview-text").expect("query").is_some());

        core.remove_text();
        TimeoutFuture::new(20).await;
        assert_eq!(remove_disabled(&root), Some(true));
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn touch_start_on_text_starts_drag_and_cancels_default() {
        let core = test_core();
        let root = mount(core.clone());
        core.set_text("Drag me".to_string());
        TimeoutFuture::new(20).await;

        let text = root
            .query_selector(".preview-text")
            .expect("query")
            .expect("text rendered");
        let init = web_sys::TouchEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        // desktop engines without touch support refuse to construct touch events
        let Ok(event) = web_sys::TouchEvent::new_with_event_init_dict("touchstart", &init) else {
            root.remove();
            return;
        };
        let not_cancelled = text.dispatch_event(event.as_ref()).expect("dispatch");
        assert!(!not_cancelled);
        assert!(core.snapshot().dragging);

        core.shutdown();
        root.remove();
    }
}
