use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudPanelProps {
    pub elapsed_secs: u64,
    pub score: u64,
    pub connected: usize,
    pub total: usize,
    pub image_url: String,
}

#[function_component]
pub fn HudPanel(props: &HudPanelProps) -> Html {
    let row_style = "display:flex; flex-direction:column; align-items:center; gap:2px;";
    let label_style = "font-size:11px; text-transform:uppercase; opacity:0.7;";
    let value_style = "font-size:20px; font-weight:600; font-variant-numeric:tabular-nums;";
    html! {
        <div style="display:flex; align-items:center; justify-content:space-between; gap:16px; background:#fff; border:1px solid #dee2e6; border-radius:8px; padding:8px 14px;">
            <div style="display:flex; gap:24px;">
                <div style={row_style}>
                    <span style={label_style}>{"Time"}</span>
                    <span style={value_style}>{ format_time(props.elapsed_secs) }</span>
                </div>
                <div style={row_style}>
                    <span style={label_style}>{"Score"}</span>
                    <span style={format!("{} color:#4CAF50;", value_style)}>{ props.score }</span>
                </div>
                <div style={row_style}>
                    <span style={label_style}>{"Pieces"}</span>
                    <span style={value_style}>{ format!("{}/{}", props.connected, props.total) }</span>
                </div>
            </div>
            <img src={props.image_url.clone()} alt="Reference" style="height:56px; max-width:96px; object-fit:contain; border-radius:4px; border:1px solid #dee2e6;" />
        </div>
    }
}
