//! E2E tests for the input systems: clicks, keyboard shortcuts and pointer state across
//! diagram switches.

use archscope::core::catalog::Catalog;
use archscope::core::config::ViewerConfig;
use archscope::input::controller::{ArchView, ViewSignal};
use archscope::input::keys::view_keys_system;
use archscope::input::picking::{
    pointer_blocked_system, pointer_click_system, pointer_reset_system, PointerState,
};
use archscope::{ArchViewPlugin, ViewSet};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

#[derive(Resource, Default)]
struct Recorded(Vec<ViewSignal>);

fn record_signals(mut reader: MessageReader<ViewSignal>, mut recorded: ResMut<Recorded>) {
    recorded.0.extend(reader.read().cloned());
}

fn take_recorded(app: &mut App) -> Vec<ViewSignal> {
    std::mem::take(&mut app.world_mut().resource_mut::<Recorded>().0)
}

fn pointer_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<ViewSignal>()
        .init_resource::<PointerState>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Recorded>()
        .add_systems(
            Update,
            (pointer_click_system, record_signals).chain(),
        );
    app.world_mut().spawn((Window::default(), PrimaryWindow));
    app
}

fn keys_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<ViewSignal>()
        .insert_resource(Catalog::builtin().unwrap())
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<Recorded>()
        .add_systems(Update, (view_keys_system, record_signals).chain());
    app
}

fn move_cursor(app: &mut App, pos: Vec2) {
    let world = app.world_mut();
    let mut q = world.query_filtered::<&mut Window, With<PrimaryWindow>>();
    q.single_mut(world).unwrap().set_cursor_position(Some(pos));
}

fn mouse(app: &mut App, press: bool) {
    {
        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.clear();
        if press {
            buttons.press(MouseButton::Left);
        } else {
            buttons.release(MouseButton::Left);
        }
    }
    app.update();
}

fn tap(app: &mut App, key: KeyCode) -> Vec<ViewSignal> {
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.clear();
        keys.press(key);
    }
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
    take_recorded(app)
}

fn click_from(app: &mut App, press: Vec2, release: Vec2) -> Vec<ViewSignal> {
    move_cursor(app, press);
    mouse(app, true);
    move_cursor(app, release);
    mouse(app, false);
    take_recorded(app)
}

#[test]
fn e2e_click_on_hovered_node() {
    let mut app = pointer_app();
    app.world_mut().resource_mut::<PointerState>().over = Some("core".into());
    let signals = click_from(&mut app, Vec2::new(100.0, 100.0), Vec2::new(102.0, 101.0));
    assert_eq!(signals, vec![ViewSignal::Click("core".into())]);
}

#[test]
fn e2e_ui_owned_pointer_leaves_node() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_message::<ViewSignal>()
        .init_resource::<PointerState>()
        .init_resource::<Recorded>()
        .add_systems(Update, (pointer_blocked_system, record_signals).chain());
    app.world_mut().resource_mut::<PointerState>().over = Some("core".into());

    app.update();
    assert_eq!(take_recorded(&mut app), vec![ViewSignal::PointerLeave("core".into())]);
    assert!(app.world().resource::<PointerState>().over.is_none());

    app.update();
    assert!(take_recorded(&mut app).is_empty());
}

#[test]
fn e2e_background_click_is_miss() {
    let mut app = pointer_app();
    let signals = click_from(&mut app, Vec2::new(300.0, 200.0), Vec2::new(300.0, 203.9));
    assert_eq!(signals, vec![ViewSignal::PointerMiss]);
}

#[test]
fn e2e_drag_past_slop_is_not_a_click() {
    let mut app = pointer_app();
    assert!(click_from(&mut app, Vec2::new(300.0, 200.0), Vec2::new(304.0, 200.0)).is_empty());
    assert!(click_from(&mut app, Vec2::new(300.0, 200.0), Vec2::new(360.0, 250.0)).is_empty());
}

#[test]
fn e2e_release_without_press_is_ignored() {
    let mut app = pointer_app();
    move_cursor(&mut app, Vec2::new(50.0, 50.0));
    mouse(&mut app, false);
    assert!(take_recorded(&mut app).is_empty());
}

#[test]
fn e2e_keys_map_to_signals() {
    let mut app = keys_app();
    assert_eq!(tap(&mut app, KeyCode::Escape), vec![ViewSignal::ClearSelection]);
    assert_eq!(tap(&mut app, KeyCode::Tab), vec![ViewSignal::NextDiagram]);
    assert_eq!(
        tap(&mut app, KeyCode::Digit2),
        vec![ViewSignal::SelectDiagram("sweetcontrol".into())]
    );
    assert_eq!(
        tap(&mut app, KeyCode::Digit1),
        vec![ViewSignal::SelectDiagram("roomie".into())]
    );
    // only three built-in diagrams
    assert!(tap(&mut app, KeyCode::Digit9).is_empty());
    assert!(tap(&mut app, KeyCode::KeyQ).is_empty());
}

fn view_app() -> App {
    let config = ViewerConfig::default();
    let catalog = Catalog::builtin().unwrap();
    let view = ArchView::new(catalog.get_or_first("roomie"), &config);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(catalog)
        .insert_resource(view)
        .init_resource::<PointerState>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(ArchViewPlugin)
        .add_systems(
            Update,
            (pointer_reset_system, view_keys_system).in_set(ViewSet::Input),
        );
    app
}

#[test]
fn e2e_tab_switches_diagram() {
    let mut app = view_app();
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Tab);
    app.update();
    assert_eq!(app.world().resource::<ArchView>().arch().id, "sweetcontrol");
}

#[test]
fn e2e_diagram_switch_forgets_pointer() {
    let mut app = view_app();
    app.update();

    // cursor over a node id that exists in both roomie and sweetcontrol
    app.world_mut().write_message(ViewSignal::PointerEnter("cloudflare".into()));
    {
        let mut pointer = app.world_mut().resource_mut::<PointerState>();
        pointer.over = Some("cloudflare".into());
        pointer.press_pos = Some(Vec2::new(10.0, 10.0));
    }
    app.update();
    assert_eq!(
        app.world().resource::<ArchView>().focus().hovered(),
        Some("cloudflare")
    );

    app.world_mut().write_message(ViewSignal::SelectDiagram("sweetcontrol".into()));
    app.update();
    app.update();

    let pointer = app.world().resource::<PointerState>();
    assert_eq!(pointer.over, None);
    assert_eq!(pointer.press_pos, None);
    assert_eq!(app.world().resource::<ArchView>().focus().hovered(), None);
}

#[test]
fn e2e_pointer_kept_without_switch() {
    let mut app = view_app();
    app.update();
    app.world_mut().resource_mut::<PointerState>().over = Some("core".into());
    app.world_mut().write_message(ViewSignal::Click("core".into()));
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<PointerState>().over.as_deref(),
        Some("core")
    );
}
