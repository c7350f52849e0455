use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::{
    puzzle_view::PuzzleView, setup_view::SetupView, tutorial_overlay::TutorialOverlay,
    victory_overlay::VictoryOverlay,
};
use crate::config::{Difficulty, Settings};
use crate::model::{GameConfig, SessionAction, SessionState};
use crate::util::clog;

#[derive(PartialEq, Clone, Copy, Debug)]
enum Screen {
    Setup,
    Game,
    Victory,
}

#[function_component(App)]
pub fn app() -> Html {
    let screen = use_state(|| Screen::Setup);
    let session = use_reducer(SessionState::default);
    let settings = use_state(Settings::load);
    let selected_image = use_state(|| None::<String>);
    let game = use_state(|| None::<GameConfig>);
    // Bumped per start so "play again" remounts the puzzle view.
    let game_id = use_state(|| 0_u64);
    let show_tutorial = use_state(|| false);

    // First visit: show the tutorial once
    {
        let settings = settings.clone();
        let show_tutorial = show_tutorial.clone();
        use_effect_with((), move |_| {
            if !settings.tutorial_seen {
                show_tutorial.set(true);
                settings.set(Settings { tutorial_seen: true, ..(*settings).clone() });
            }
            || ()
        });
    }
    // Persist settings
    {
        let current = (*settings).clone();
        use_effect_with(current, move |s| {
            s.save();
            || ()
        });
    }
    // Game clock
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            let tick = Interval::new(1_000, move || session.dispatch(SessionAction::TickSecond));
            move || drop(tick)
        });
    }
    // Hotkeys
    {
        let session = session.clone();
        let show_tutorial = show_tutorial.clone();
        use_effect_with(*screen, move |screen| {
            let in_game = *screen == Screen::Game;
            let window = web_sys::window().expect("window");
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| match e.key().as_str() {
                " " if in_game => {
                    e.prevent_default();
                    session.dispatch(SessionAction::TogglePause);
                }
                "Escape" => show_tutorial.set(false),
                _ => {}
            }) as Box<dyn FnMut(_)>);
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            move || {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
            }
        });
    }
    // Pause when the tab is hidden; resuming stays with the player
    {
        let session = session.clone();
        use_effect_with(*screen, move |screen| {
            let in_game = *screen == Screen::Game;
            let document = web_sys::window().and_then(|w| w.document()).expect("document");
            let doc = document.clone();
            let visibility_cb = Closure::wrap(Box::new(move |_e: Event| {
                if in_game && doc.hidden() {
                    clog("tab hidden, pausing");
                    session.dispatch(SessionAction::SetPaused(true));
                }
            }) as Box<dyn FnMut(_)>);
            document
                .add_event_listener_with_callback(
                    "visibilitychange",
                    visibility_cb.as_ref().unchecked_ref(),
                )
                .ok();
            move || {
                let _ = document.remove_event_listener_with_callback(
                    "visibilitychange",
                    visibility_cb.as_ref().unchecked_ref(),
                );
            }
        });
    }

    let start_game = {
        let screen = screen.clone();
        let session = session.clone();
        let settings = settings.clone();
        let selected_image = selected_image.clone();
        let game = game.clone();
        let game_id = game_id.clone();
        Callback::from(move |()| {
            let Some(image_url) = (*selected_image).clone() else {
                return;
            };
            let config =
                GameConfig { image_url, pieces: settings.pieces, difficulty: settings.difficulty };
            clog(&format!("starting {} pieces, {}", config.pieces, config.difficulty.label()));
            session.dispatch(SessionAction::End);
            game.set(Some(config));
            game_id.set(*game_id + 1);
            screen.set(Screen::Game);
        })
    };
    let play_again = {
        let screen = screen.clone();
        let session = session.clone();
        let game_id = game_id.clone();
        Callback::from(move |()| {
            session.dispatch(SessionAction::End);
            game_id.set(*game_id + 1);
            screen.set(Screen::Game);
        })
    };
    let to_setup = {
        let screen = screen.clone();
        let session = session.clone();
        Callback::from(move |()| {
            session.dispatch(SessionAction::End);
            screen.set(Screen::Setup);
        })
    };
    let on_victory = {
        let screen = screen.clone();
        Callback::from(move |()| screen.set(Screen::Victory))
    };
    let on_select_image = {
        let selected_image = selected_image.clone();
        Callback::from(move |url: String| {
            if let Some(prev) = (*selected_image).as_ref() {
                if prev.starts_with("blob:") && *prev != url {
                    let _ = web_sys::Url::revoke_object_url(prev);
                }
            }
            selected_image.set(Some(url));
        })
    };
    let on_pieces = {
        let settings = settings.clone();
        Callback::from(move |pieces: u32| settings.set(Settings { pieces, ..(*settings).clone() }))
    };
    let on_difficulty = {
        let settings = settings.clone();
        Callback::from(move |difficulty: Difficulty| {
            settings.set(Settings { difficulty, ..(*settings).clone() })
        })
    };
    let open_tutorial = {
        let show_tutorial = show_tutorial.clone();
        Callback::from(move |()| show_tutorial.set(true))
    };
    let close_tutorial = {
        let show_tutorial = show_tutorial.clone();
        Callback::from(move |()| show_tutorial.set(false))
    };

    let content = match (*screen, (*game).clone()) {
        (Screen::Game, Some(config)) => html! {
            <PuzzleView
                key={*game_id}
                config={config}
                session={session.clone()}
                on_victory={on_victory}
                on_new_game={to_setup.clone()}
                on_load_error={to_setup.clone()}
            />
        },
        (Screen::Victory, Some(_)) => html! {
            <div style="position:relative; width:100vw; height:100vh;">
                <VictoryOverlay
                    elapsed_secs={session.elapsed_secs}
                    score={session.score}
                    time_bonus={session.time_bonus}
                    hints_used={session.hints_used}
                    play_again={play_again}
                    new_puzzle={to_setup.clone()}
                />
            </div>
        },
        _ => html! {
            <SetupView
                selected_image={(*selected_image).clone()}
                pieces={settings.pieces}
                difficulty={settings.difficulty}
                on_select_image={on_select_image}
                on_pieces={on_pieces}
                on_difficulty={on_difficulty}
                on_start={start_game}
                on_show_tutorial={open_tutorial}
            />
        },
    };

    html! {
        <div id="root" style="min-height:100vh; background:#f8f9fa; color:#333; font-family:sans-serif;">
            { content }
            <TutorialOverlay show={*show_tutorial} on_close={close_tutorial} />
        </div>
    }
}
