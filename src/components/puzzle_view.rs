use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent,
};
use yew::prelude::*;

use super::{controls_panel::ControlsPanel, hud_panel::HudPanel};
use crate::error::EngineError;
use crate::input::{self, PointerInput, PointerPhase};
use crate::model::{GameConfig, SessionAction, SessionState};
use crate::puzzle::{EngineConfig, EngineEvent, ImageSize, PuzzleEngine, SurfaceMetrics};
use crate::render::{CanvasPainter, paint_scene};
use crate::state::TouchState;
use crate::util::{cerror, clog};

type Engine = PuzzleEngine<Timeout>;

#[derive(Properties, PartialEq, Clone)]
pub struct PuzzleViewProps {
    pub config: GameConfig,
    pub session: UseReducerHandle<SessionState>,
    pub on_victory: Callback<()>,
    pub on_new_game: Callback<()>,
    pub on_load_error: Callback<()>,
}

/// Sizes the backing store to the canvas' CSS box times the pixel ratio.
fn fit_canvas(canvas: &HtmlCanvasElement) -> SurfaceMetrics {
    let dpr = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| *r > 0.0)
        .unwrap_or(1.0);
    let width = (canvas.client_width().max(0) as f64 * dpr).round() as u32;
    let height = (canvas.client_height().max(0) as f64 * dpr).round() as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    SurfaceMetrics::new(width, height, dpr)
}

async fn load_image(url: &str) -> Result<HtmlImageElement, String> {
    let img = HtmlImageElement::new().map_err(|_| "failed to create image".to_string())?;
    img.set_cross_origin(Some("anonymous"));
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
    });
    img.set_src(url);
    JsFuture::from(promise)
        .await
        .map_err(|_| format!("failed to load image {url}"))?;
    Ok(img)
}

fn start_engine(
    config: &GameConfig,
    canvas: &HtmlCanvasElement,
    img: &HtmlImageElement,
) -> Result<Engine, EngineError> {
    let surface = fit_canvas(canvas);
    let image = ImageSize { width: img.natural_width(), height: img.natural_height() };
    let mut engine =
        PuzzleEngine::new(EngineConfig::new(config.pieces, config.difficulty), surface, image)?;
    let mut rng = SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64);
    engine.initialize(&mut rng)?;
    Ok(engine)
}

const LOAD_FAILED: &str = "Could not load the image. Please try another one.";

/// Logs `detail` and tells the user `message`.
fn report_failure(detail: &str, message: &str) {
    cerror(detail);
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Drops a spent timer outside of its own callback.
fn drop_later(timer: Timeout) {
    spawn_local(async move { drop(timer) });
}

#[function_component(PuzzleView)]
pub fn puzzle_view(props: &PuzzleViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let engine = use_mut_ref(|| None::<Engine>);
    let image = use_mut_ref(|| None::<HtmlImageElement>);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let touch_state = use_mut_ref(TouchState::default);
    let victory_timer = use_mut_ref(|| None::<Timeout>);

    // Mount: load the image, build the engine, wire input
    {
        let canvas_ref = canvas_ref.clone();
        let engine = engine.clone();
        let image = image.clone();
        let draw_ref = draw_ref.clone();
        let touch_state = touch_state.clone();
        let victory_timer = victory_timer.clone();
        let config = props.config.clone();
        let session = props.session.clone();
        let on_victory = props.on_victory.clone();
        let on_load_error = props.on_load_error.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let alive = Rc::new(Cell::new(true));

            let draw: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let engine = engine.clone();
                let image = image.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let Some(ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        return;
                    };
                    let slot = engine.borrow();
                    let picture = image.borrow();
                    let (Some(eng), Some(img)) = (slot.as_ref(), picture.as_ref()) else {
                        return;
                    };
                    if !eng.is_active() {
                        return;
                    }
                    let mut painter = CanvasPainter::new(&ctx, img, eng.surface().device_pixel_ratio);
                    paint_scene(&mut painter, &eng.scene());
                })
            };
            *draw_ref.borrow_mut() = Some(draw.clone());

            // Forward queued engine events to the session, then repaint.
            let settle: Rc<dyn Fn()> = {
                let engine = engine.clone();
                let draw = draw.clone();
                let session = session.clone();
                let victory_timer = victory_timer.clone();
                Rc::new(move || {
                    let (events, delay_ms) = match engine.borrow_mut().as_mut() {
                        Some(eng) => (eng.drain_events(), eng.tuning().victory_delay_ms),
                        None => return,
                    };
                    for event in events {
                        match event {
                            EngineEvent::PieceConnected { connected, total, .. } => {
                                clog(&format!("piece connected {connected}/{total}"));
                                session.dispatch(SessionAction::PieceConnected { connected });
                            }
                            EngineEvent::PuzzleComplete => {
                                clog("puzzle complete");
                                session.dispatch(SessionAction::Completed);
                                let on_victory = on_victory.clone();
                                *victory_timer.borrow_mut() =
                                    Some(Timeout::new(delay_ms, move || on_victory.emit(())));
                            }
                        }
                    }
                    draw();
                })
            };

            let route: Rc<dyn Fn(PointerInput)> = {
                let canvas = canvas.clone();
                let engine = engine.clone();
                let settle = settle.clone();
                Rc::new(move |pointer: PointerInput| {
                    let changed = {
                        let mut slot = engine.borrow_mut();
                        let Some(eng) = slot.as_mut() else {
                            return;
                        };
                        match (pointer.phase, pointer.client) {
                            (PointerPhase::Up | PointerPhase::Cancel, _) => eng.pointer_up(),
                            (phase, Some(client)) => {
                                let screen = input::canvas_screen_rect(&canvas);
                                let Some(at) =
                                    input::to_surface(client, screen, eng.surface().logical_size())
                                else {
                                    return;
                                };
                                if phase == PointerPhase::Down {
                                    eng.pointer_down(at)
                                } else {
                                    eng.pointer_move(at)
                                }
                            }
                            (_, None) => false,
                        }
                    };
                    if changed {
                        settle();
                    }
                })
            };

            // Mouse: press on the canvas, track and release anywhere
            let mousedown_cb = {
                let route = route.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    route(PointerInput {
                        phase: PointerPhase::Down,
                        client: Some(input::mouse_client(&e)),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();
            let mousemove_cb = {
                let route = route.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    route(PointerInput {
                        phase: PointerPhase::Move,
                        client: Some(input::mouse_client(&e)),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();
            let mouseup_cb = {
                let route = route.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    route(PointerInput { phase: PointerPhase::Up, client: None });
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            // Touch
            let touch_start_cb = {
                let route = route.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let pointer = touch_state.borrow_mut().start(&input::active_touches(&e));
                    if let Some(p) = pointer {
                        route(p);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                .ok();
            let touch_move_cb = {
                let route = route.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let pointer = touch_state.borrow_mut().moved(&input::active_touches(&e));
                    if let Some(p) = pointer {
                        route(p);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();
            let touch_end_cb = {
                let route = route.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let pointer =
                        touch_state.borrow_mut().ended(&input::changed_touch_ids(&e), false);
                    if let Some(p) = pointer {
                        route(p);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            let touch_cancel_cb = {
                let route = route.clone();
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let pointer =
                        touch_state.borrow_mut().ended(&input::changed_touch_ids(&e), true);
                    if let Some(p) = pointer {
                        route(p);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_cancel_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let resize_cb = {
                let canvas = canvas.clone();
                let engine = engine.clone();
                let draw = draw.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let surface = fit_canvas(&canvas);
                    if let Some(eng) = engine.borrow_mut().as_mut() {
                        if let Err(err) = eng.resize(surface) {
                            cerror(&format!("resize skipped: {err}"));
                        }
                    }
                    draw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            {
                let canvas = canvas.clone();
                let engine = engine.clone();
                let image = image.clone();
                let draw = draw.clone();
                let alive = alive.clone();
                spawn_local(async move {
                    let img = match load_image(&config.image_url).await {
                        Ok(img) => img,
                        Err(err) => {
                            if alive.get() {
                                report_failure(&err, LOAD_FAILED);
                                on_load_error.emit(());
                            }
                            return;
                        }
                    };
                    if !alive.get() {
                        return;
                    }
                    match start_engine(&config, &canvas, &img) {
                        Ok(fresh) => {
                            let region = fresh.layout().region;
                            clog(&format!(
                                "puzzle ready: {g}x{g} grid ({}), region {:.0}x{:.0} at ({:.0}, {:.0})",
                                fresh.difficulty().label(),
                                region.width,
                                region.height,
                                region.x,
                                region.y,
                                g = fresh.grid_size(),
                            ));
                            session.dispatch(SessionAction::Begin {
                                total_pieces: fresh.piece_count(),
                            });
                            *image.borrow_mut() = Some(img);
                            *engine.borrow_mut() = Some(fresh);
                            draw();
                        }
                        Err(err) => {
                            report_failure(&format!("could not start puzzle: {err}"), err.user_message());
                            on_load_error.emit(());
                        }
                    }
                });
            }

            // Cleanup
            move || {
                alive.set(false);
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_cancel_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(eng) = engine.borrow_mut().as_mut() {
                    eng.destroy();
                    clog("puzzle engine destroyed");
                }
                if let Some(timer) = victory_timer.borrow_mut().take() {
                    drop_later(timer);
                }
                *draw_ref.borrow_mut() = None;
                let _keep_alive = (
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &touch_cancel_cb,
                    &resize_cb,
                );
            }
        });
    }

    // Forward pause state to the engine
    {
        let engine = engine.clone();
        let draw_ref = draw_ref.clone();
        let paused = props.session.paused;
        use_effect_with(paused, move |_| {
            if let Some(eng) = engine.borrow_mut().as_mut() {
                if paused != eng.is_paused() {
                    if paused {
                        eng.pause();
                    } else {
                        eng.resume();
                    }
                    clog(if paused { "puzzle paused" } else { "puzzle resumed" });
                }
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    let on_hint: Callback<()> = {
        let engine = engine.clone();
        let draw_ref = draw_ref.clone();
        let session = props.session.clone();
        Callback::from(move |()| {
            if !session.is_playing() {
                return;
            }
            let expiry = {
                let weak = Rc::downgrade(&engine);
                let draw_ref = draw_ref.clone();
                move |delay_ms: u32| {
                    Timeout::new(delay_ms, move || {
                        let Some(engine) = weak.upgrade() else {
                            return;
                        };
                        let spent = engine.borrow_mut().as_mut().and_then(|e| e.expire_hint());
                        if let Some(timer) = spent {
                            drop_later(timer);
                            if let Some(f) = &*draw_ref.borrow() {
                                f();
                            }
                        }
                    })
                }
            };
            let shown = engine.borrow_mut().as_mut().is_some_and(|e| e.show_hint(expiry));
            if shown {
                session.dispatch(SessionAction::HintUsed);
                if let Some(f) = &*draw_ref.borrow() {
                    f();
                }
            }
        })
    };
    let on_toggle_pause: Callback<()> = {
        let session = props.session.clone();
        Callback::from(move |()| session.dispatch(SessionAction::TogglePause))
    };

    let s = &*props.session;
    html! {
        <div style="display:flex; flex-direction:column; gap:10px; width:100%; height:100vh; padding:12px; box-sizing:border-box;">
            <HudPanel
                elapsed_secs={s.elapsed_secs}
                score={s.score}
                connected={s.connected}
                total={props.config.pieces as usize}
                image_url={props.config.image_url.clone()}
            />
            <div style="position:relative; flex:1; min-height:0;">
                <canvas ref={canvas_ref.clone()} id="puzzle-canvas" style="display:block; width:100%; height:100%; touch-action:none; border-radius:8px; box-shadow:0 2px 10px rgba(0,0,0,0.1);"></canvas>
                { if s.paused {
                    html! { <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.45); color:#fff; font-size:28px; font-weight:600; border-radius:8px;">{"Paused"}</div> }
                } else { html! {} } }
            </div>
            <ControlsPanel
                paused={s.paused}
                can_hint={s.is_playing()}
                on_hint={on_hint}
                on_toggle_pause={on_toggle_pause}
                on_new_game={props.on_new_game.clone()}
            />
        </div>
    }
}
