pub mod app;
pub mod controls_panel;
pub mod hud_panel;
pub mod puzzle_view;
pub mod setup_view;
pub mod tutorial_overlay;
pub mod victory_overlay;
