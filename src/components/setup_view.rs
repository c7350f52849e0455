use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::{Difficulty, PIECE_CHOICES};
use crate::util::cerror;

pub const BUILTIN_IMAGES: [(&str, &str); 4] = [
    ("Mountains", "https://picsum.photos/id/1018/800/800"),
    ("Forest", "https://picsum.photos/id/1043/800/800"),
    ("Coast", "https://picsum.photos/id/1015/800/800"),
    ("City", "https://picsum.photos/id/1031/800/800"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct SetupViewProps {
    pub selected_image: Option<String>,
    pub pieces: u32,
    pub difficulty: Difficulty,
    pub on_select_image: Callback<String>,
    pub on_pieces: Callback<u32>,
    pub on_difficulty: Callback<Difficulty>,
    pub on_start: Callback<()>,
    pub on_show_tutorial: Callback<()>,
}

#[function_component(SetupView)]
pub fn setup_view(props: &SetupViewProps) -> Html {
    let on_upload = {
        let cb = props.on_select_image.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };
            let Some(file) = files.get(0) else {
                return;
            };
            if !file.type_().starts_with("image/") {
                cerror("upload ignored: not an image");
                return;
            }
            match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(url) => cb.emit(url),
                Err(_) => cerror("failed to read uploaded image"),
            }
        })
    };
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let tutorial_cb = {
        let cb = props.on_show_tutorial.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let uploaded = props
        .selected_image
        .as_ref()
        .is_some_and(|url| !BUILTIN_IMAGES.iter().any(|(_, u)| u == url));

    let option_style = |selected: bool| {
        format!(
            "border:3px solid {}; border-radius:8px; padding:0; cursor:pointer; background:none;",
            if selected { "#4CAF50" } else { "transparent" }
        )
    };
    let choice_style = |active: bool| {
        if active {
            "background:#4CAF50; color:#fff; border:1px solid #4CAF50; border-radius:6px; padding:6px 12px;"
        } else {
            "background:#fff; color:#333; border:1px solid #ccc; border-radius:6px; padding:6px 12px;"
        }
    };

    html! {
        <div style="max-width:720px; margin:0 auto; padding:24px; display:flex; flex-direction:column; gap:20px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h1 style="margin:0; color:#4CAF50;">{"Puzzle Art"}</h1>
                <button onclick={tutorial_cb}>{"How to play"}</button>
            </div>
            <section>
                <h3 style="margin:0 0 8px 0;">{"1. Choose an image"}</h3>
                <div style="display:flex; gap:10px; flex-wrap:wrap;">
                    { for BUILTIN_IMAGES.iter().map(|(name, url)| {
                        let selected = props.selected_image.as_deref() == Some(*url);
                        let cb = props.on_select_image.clone();
                        let url_owned = url.to_string();
                        html! {
                            <button title={*name} style={option_style(selected)} onclick={Callback::from(move |_| cb.emit(url_owned.clone()))}>
                                <img src={*url} alt={*name} style="display:block; width:120px; height:120px; object-fit:cover; border-radius:5px;" />
                            </button>
                        }
                    }) }
                </div>
                <label style="display:inline-block; margin-top:10px; cursor:pointer;">
                    <span>{ if uploaded { "Custom image selected, upload another: " } else { "Or upload your own: " } }</span>
                    <input type="file" accept="image/*" onchange={on_upload} />
                </label>
            </section>
            <section>
                <h3 style="margin:0 0 8px 0;">{"2. Number of pieces"}</h3>
                <div style="display:flex; gap:8px; flex-wrap:wrap;">
                    { for PIECE_CHOICES.iter().map(|n| {
                        let n = *n;
                        let cb = props.on_pieces.clone();
                        html! { <button style={choice_style(props.pieces == n)} onclick={Callback::from(move |_| cb.emit(n))}>{ n }</button> }
                    }) }
                </div>
            </section>
            <section>
                <h3 style="margin:0 0 8px 0;">{"3. Difficulty"}</h3>
                <div style="display:flex; gap:8px;">
                    { for [Difficulty::Easy, Difficulty::Hard].into_iter().map(|d| {
                        let cb = props.on_difficulty.clone();
                        html! { <button style={choice_style(props.difficulty == d)} onclick={Callback::from(move |_| cb.emit(d))}>{ d.label() }</button> }
                    }) }
                </div>
            </section>
            <button onclick={start_cb} disabled={props.selected_image.is_none()} style="align-self:center; font-size:18px; padding:10px 28px;">{"Start Puzzle"}</button>
        </div>
    }
}
