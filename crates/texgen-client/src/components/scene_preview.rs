//! Full-resolution render of the graph output, refreshed on demand.

use std::cell::RefCell;
use std::rc::Rc;

use texgen_core::web::CanvasEngine;
use texgen_core::{EditorConfig, GraphEngine, NodeGraph};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::error::ClientError;
use crate::util::context_2d;

struct PreviewSession {
    engine: CanvasEngine,
    ctx: CanvasRenderingContext2d,
    config: EditorConfig,
}

impl PreviewSession {
    fn render(&mut self) -> Result<(), ClientError> {
        self.engine.render_scene(&mut self.ctx, self.config.scene)?;
        Ok(())
    }
}

#[derive(Properties, PartialEq)]
pub struct ScenePreviewProps {
    pub config: EditorConfig,
}

fn mount(canvas: &HtmlCanvasElement, config: &EditorConfig) -> Result<PreviewSession, ClientError> {
    canvas.set_width(config.scene.width);
    canvas.set_height(config.scene.height);

    let mut engine = CanvasEngine::new(NodeGraph::demo(config)?);
    engine.initialize()?;
    Ok(PreviewSession {
        engine,
        ctx: context_2d(canvas)?,
        config: config.clone(),
    })
}

fn render(session: &Rc<RefCell<Option<PreviewSession>>>) {
    let mut guard = session.borrow_mut();
    let Some(preview) = guard.as_mut() else {
        return;
    };
    match preview.render() {
        Ok(()) => tracing::info!(
            "Scene rendered at {}x{}",
            preview.config.scene.width,
            preview.config.scene.height
        ),
        Err(err) => tracing::error!("Scene render failed: {}", err),
    }
}

#[function_component(ScenePreview)]
pub fn scene_preview(props: &ScenePreviewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| None::<PreviewSession>);

    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        use_effect_with(props.config.clone(), move |config| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                match mount(&canvas, config) {
                    Ok(mounted) => *session.borrow_mut() = Some(mounted),
                    Err(err) => tracing::error!("Failed to start scene preview: {}", err),
                }
            }
            move || {
                session.borrow_mut().take();
            }
        });
    }

    let onclick = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| render(&session))
    };

    html! {
        <section class="scene-preview">
            <canvas ref={canvas_ref} />
            <button {onclick}>{ "Render" }</button>
        </section>
    }
}
