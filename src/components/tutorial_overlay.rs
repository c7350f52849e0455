use yew::prelude::*;

const STEPS: [(&str, &str); 3] = [
    (
        "Pick an image",
        "Choose one of the pictures or upload your own, then pick how many pieces and a difficulty.",
    ),
    (
        "Drag the pieces",
        "Drag pieces with the mouse or a finger. Drop a piece close to its slot and it snaps in place. Easy mode shows the puzzle outline.",
    ),
    (
        "Score points",
        "Every piece earns 100 points and finishing fast adds a time bonus. A hint shows all slots for two seconds but costs 50 points.",
    ),
];

/// Zero-based step after pressing "next"; `None` closes the tutorial.
pub fn next_step(current: usize) -> Option<usize> {
    (current + 1 < STEPS.len()).then_some(current + 1)
}

pub fn prev_step(current: usize) -> usize {
    current.saturating_sub(1)
}

#[derive(Properties, PartialEq, Clone)]
pub struct TutorialOverlayProps {
    pub show: bool,
    pub on_close: Callback<()>,
}

#[function_component(TutorialOverlay)]
pub fn tutorial_overlay(props: &TutorialOverlayProps) -> Html {
    let step = use_state(|| 0_usize);
    {
        // reopening starts over
        let step = step.clone();
        use_effect_with(props.show, move |show| {
            if *show {
                step.set(0);
            }
            || ()
        });
    }
    if !props.show {
        return html! {};
    }
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let backdrop_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let prev_btn = {
        let step = step.clone();
        Callback::from(move |_| step.set(prev_step(*step)))
    };
    let next_btn = {
        let step = step.clone();
        let cb = props.on_close.clone();
        Callback::from(move |_| match next_step(*step) {
            Some(n) => step.set(n),
            None => cb.emit(()),
        })
    };
    let current = (*step).min(STEPS.len() - 1);
    let (title, body) = STEPS[current];
    let last = next_step(current).is_none();
    html! {
        <div onclick={backdrop_cb} style="position:fixed; inset:0; background:rgba(0,0,0,0.5); display:flex; align-items:center; justify-content:center; z-index:10;">
            <div onclick={Callback::from(|e: MouseEvent| e.stop_propagation())} style="background:#fff; padding:28px 36px; border-radius:14px; max-width:480px; width:90%; box-shadow:0 6px 18px rgba(0,0,0,0.3); font-size:14px; line-height:1.4; position:relative;">
                <button onclick={close_btn} style="position:absolute; top:8px; right:10px; border:none; background:none; font-size:18px; cursor:pointer;">{"×"}</button>
                <h2 style="margin:0 0 12px 0; font-size:20px; color:#4CAF50; text-align:center;">{ title }</h2>
                <p style="margin:4px 0 16px 0; text-align:center;">{ body }</p>
                <div style="display:flex; gap:6px; justify-content:center; margin-bottom:12px;">
                    { for (0..STEPS.len()).map(|i| {
                        let step = step.clone();
                        let color = if i == current { "#4CAF50" } else { "#ccc" };
                        html! { <span
                            onclick={Callback::from(move |_| step.set(i))}
                            style={format!("width:10px; height:10px; border-radius:50%; background:{}; cursor:pointer;", color)}
                        /> }
                    }) }
                </div>
                <div style="display:flex; gap:12px; justify-content:center;">
                    <button onclick={prev_btn} disabled={current == 0}>{"Previous"}</button>
                    <button onclick={next_btn}>{ if last { "Got it" } else { "Next" } }</button>
                </div>
            </div>
        </div>
    }
}
