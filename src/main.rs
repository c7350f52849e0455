mod components;
mod config;
mod error;
mod input;
mod model;
mod puzzle;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
