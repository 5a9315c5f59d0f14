//! Main application component.

use yew::prelude::*;

use crate::components::{NodeCanvas, ScenePreview};
use crate::hooks::use_editor_config;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_editor_config();

    // The two canvases own independent engines.
    html! {
        <main class="editor">
            <NodeCanvas config={(*config).clone()} />
            <ScenePreview config={(*config).clone()} />
        </main>
    }
}
