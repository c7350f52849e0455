use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct VictoryOverlayProps {
    pub elapsed_secs: u64,
    pub score: u64,
    pub time_bonus: u64,
    pub hints_used: u32,
    pub play_again: Callback<()>,
    pub new_puzzle: Callback<()>,
}

#[function_component]
pub fn VictoryOverlay(props: &VictoryOverlayProps) -> Html {
    let again_cb = props.play_again.clone();
    let again_btn = Callback::from(move |_| again_cb.emit(()));
    let new_btn = {
        let cb = props.new_puzzle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:#fff; border:2px solid #4CAF50; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px; box-shadow:0 6px 18px rgba(0,0,0,0.2);">
            <h2 style="margin:0 0 12px 0; color:#4CAF50;">{"Puzzle Complete!"}</h2>
            <p style="margin:4px 0;">{ format!("Time: {}", format_time(props.elapsed_secs)) }</p>
            <p style="margin:4px 0;">{ format!("Score: {}", props.score) }</p>
            { if props.time_bonus > 0 {
                html! { <p style="margin:4px 0; font-size:13px; opacity:0.75;">{ format!("Includes a time bonus of {}", props.time_bonus) }</p> }
            } else { html! {} } }
            { if props.hints_used > 0 {
                html! { <p style="margin:4px 0; font-size:13px; opacity:0.75;">{ format!("Hints used: {}", props.hints_used) }</p> }
            } else { html! {} } }
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={again_btn}>{"Play Again"}</button>
                <button onclick={new_btn}>{"New Puzzle"}</button>
            </div>
        </div>
    }
}
