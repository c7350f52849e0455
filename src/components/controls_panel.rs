use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub paused: bool,
    pub can_hint: bool,
    pub on_hint: Callback<()>,
    pub on_toggle_pause: Callback<()>,
    pub on_new_game: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let hint_cb = {
        let cb = props.on_hint.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let new_game_cb = {
        let cb = props.on_new_game.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_label = if props.paused { "Resume" } else { "Pause" };
    html! {<div style="display:flex; gap:8px; justify-content:center; flex-wrap:wrap;">
        <button onclick={hint_cb} disabled={!props.can_hint}>{"Hint (-50)"}</button>
        <button onclick={pause_cb}>{ pause_label }</button>
        <button onclick={new_game_cb}>{"New Game"}</button>
        <div style="font-size:11px; opacity:0.7; align-self:center;">{"Hotkey: Space pause/resume"}</div>
    </div>}
}
