mod support;

use map_core::cities::CITIES;
use map_core::navigation::SIGNUP_PAGE;
use map_core::promo_map::{PromoMapWidget, HIGHLIGHT_COLOR, MARKER_COLOR};
use map_core::scene::Scene;
use map_core::surface::{LayerId, MapEvent, PopupAction, PopupContent};

use support::widgets::promo_map;

#[test]
fn every_city_gets_a_gold_marker_with_a_popup() {
    let (map, _) = promo_map();
    assert_eq!(map.city_markers().count(), CITIES.len());

    for (city, marker) in map.city_markers() {
        let (center, style) = map.surface().circle(marker).expect("circle");
        assert_eq!(center, city.location);
        assert_eq!(style.fill_color, MARKER_COLOR);
        assert_eq!(style.radius, 6.0);
        assert_eq!(style.fill_opacity, 0.8);

        let Some(PopupContent::City(card)) = map.surface().popup(marker) else {
            panic!("{} should carry a city card", city.name);
        };
        assert_eq!(card.name, city.name);
        assert_eq!(card.action, PopupAction::Navigate(SIGNUP_PAGE.to_string()));
        assert!(map.pulse_ring(city.name).is_some());
    }
}

#[test]
fn highlight_changes_only_the_named_city() {
    let (mut map, _) = promo_map();
    let before: Vec<_> = map
        .city_markers()
        .map(|(city, marker)| (city.name, *map.surface().circle(marker).expect("circle").1))
        .collect();

    assert!(map.highlight_city("Lagos"));

    for (name, old_style) in before {
        let marker = map.city_marker(name).expect("marker");
        let (_, style) = map.surface().circle(marker).expect("circle");
        if name == "Lagos" {
            assert_eq!(style.fill_color, HIGHLIGHT_COLOR);
            assert_eq!(style.color, HIGHLIGHT_COLOR);
            assert_eq!(style.radius, 10.0);
            assert!(map.surface().is_popup_open(marker));
        } else {
            assert_eq!(*style, old_style, "{name} should be untouched");
            assert!(!map.surface().is_popup_open(marker));
        }
    }
}

#[test]
fn unknown_city_is_ignored() {
    let (mut map, _) = promo_map();
    let layers = map.surface().len();
    assert!(!map.highlight_city("Atlantis"));
    assert!(!map.highlight_city("lagos"));
    assert_eq!(map.surface().len(), layers);
    assert_eq!(map.surface().open_popups().count(), 0);
}

#[test]
fn hover_previews_and_restores_the_marker() {
    let (mut map, _) = promo_map();
    let marker = map.city_marker("Abuja").expect("marker");

    map.handle_event(MapEvent::HoverEnter(marker));
    let (_, style) = map.surface().circle(marker).expect("circle");
    assert_eq!(style.fill_color, HIGHLIGHT_COLOR);
    assert_eq!(style.radius, 6.0);
    assert!(map.surface().is_popup_open(marker));

    map.handle_event(MapEvent::HoverLeave(marker));
    let (_, style) = map.surface().circle(marker).expect("circle");
    assert_eq!(style.fill_color, MARKER_COLOR);
    assert!(!map.surface().is_popup_open(marker));
}

#[test]
fn hover_leave_after_highlight_restores_gold_but_keeps_size() {
    let (mut map, _) = promo_map();
    let marker = map.city_marker("Lagos").expect("marker");
    map.highlight_city("Lagos");

    map.hover_leave(marker);

    let (_, style) = map.surface().circle(marker).expect("circle");
    assert_eq!(style.fill_color, MARKER_COLOR);
    assert_eq!(style.radius, 10.0);
}

#[test]
fn hover_on_a_foreign_layer_is_ignored() {
    let (mut map, _) = promo_map();
    let ring = map.pulse_ring("Kano").expect("ring");
    let (_, before) = map.surface().circle(ring).map(|(c, s)| (c, *s)).expect("ring");
    map.hover_enter(ring);
    map.hover_enter(LayerId(123_456));
    let (_, after) = map.surface().circle(ring).expect("ring");
    assert_eq!(*after, before);
}

#[test]
fn popup_button_navigates_to_signup() {
    let (mut map, navigator) = promo_map();
    let marker = map.city_marker("Ibadan").expect("marker");
    let content = map.surface().popup(marker).cloned().expect("popup");
    let (label, action) = content.actions()[0];
    assert_eq!(label, "Ride in Ibadan");

    map.handle_event(MapEvent::PopupAction(action.clone()));

    assert_eq!(navigator.targets(), vec![SIGNUP_PAGE.to_string()]);
}

#[test]
fn pulse_rings_grow_and_wrap_every_frame() {
    let (mut map, _) = promo_map();
    let ring = map.pulse_ring("Lagos").expect("ring");
    let radius = |map: &PromoMapWidget<Scene>| {
        map.surface().circle(ring).expect("ring").1.radius
    };

    map.advance_to(16);
    assert!((radius(&map) - 8.0 * 1.10).abs() < 1e-9);

    // 20 frames reach the maximum scale, the next one snaps back.
    map.advance_to(16 * 19);
    assert!((radius(&map) - 16.0).abs() < 1e-9);
    map.advance_to(16 * 20);
    assert!((radius(&map) - 8.0).abs() < 1e-9);
}

#[test]
fn removing_a_city_stops_its_pulse() {
    let (mut map, _) = promo_map();
    let handle = map.pulse_handle("Kano").expect("handle");
    let ring = map.pulse_ring("Kano").expect("ring");
    let marker = map.city_marker("Kano").expect("marker");

    assert!(map.remove_city("Kano"));

    assert!(handle.is_cancelled());
    assert!(!map.surface().contains(ring));
    assert!(!map.surface().contains(marker));
    map.advance_to(1_000);
    assert!(!map.surface().contains(ring));
    assert!(map.pulse_ring("Lagos").is_some());
    assert!(!map.remove_city("Kano"));
}

#[test]
fn cancelled_handle_ends_the_animation_on_the_next_frame() {
    let (mut map, _) = promo_map();
    let handle = map.pulse_handle("Jos").expect("handle");
    let ring = map.pulse_ring("Jos").expect("ring");

    handle.cancel();
    map.advance_to(16);

    assert!(!map.surface().contains(ring));
    assert!(map.pulse_ring("Jos").is_none());
    assert!(map.city_marker("Jos").is_some());
}

#[test]
fn shutdown_cancels_every_pulse() {
    let (mut map, _) = promo_map();
    let handles: Vec<_> = CITIES
        .iter()
        .filter_map(|city| map.pulse_handle(city.name))
        .collect();

    map.shutdown();

    assert!(handles.iter().all(|handle| handle.is_cancelled()));
    assert!(map.surface().is_empty());
    assert!(!map.has_pending_timers());
}
