// End-to-end tests for section navigation, smooth scroll, and page chrome

mod common;

use common::harness::AppTestHarness;
use coreterm::events::AppEvent;
use coreterm::page::SectionId;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Duration;

#[test]
fn test_page_down_changes_section_and_completes_scroll() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.events();

    harness
        .send_key(KeyCode::PageDown, KeyModifiers::NONE)
        .unwrap();
    harness.advance(Duration::from_secs(2));

    assert_eq!(harness.app.page.active(), SectionId::Philosophy);
    let events = harness.events();
    assert!(events.contains(&AppEvent::SectionChange(SectionId::Philosophy)));
    assert!(events.contains(&AppEvent::SmoothScrollComplete));
}

#[test]
fn test_number_keys_jump_to_sections() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::Char('4'), KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));
    assert_eq!(harness.app.page.active(), SectionId::Roadmap);
    harness.assert_screen_contains("R O A D M A P");
}

#[test]
fn test_philosophy_section_reveals_its_copy() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.events();

    harness.send_key(KeyCode::Char('2'), KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(3));

    assert!(harness
        .events()
        .iter()
        .any(|e| matches!(e, AppEvent::ElementRevealed { id } if id == "philosophy")));
    harness.assert_screen_contains("T H E   P H I L O S O P H Y");
    harness.assert_screen_contains("there lies a fundamental essence");
}

#[test]
fn test_tokenomics_cards_stagger_in() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.events();

    harness.send_key(KeyCode::Char('3'), KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(3));

    let revealed: Vec<String> = harness
        .events()
        .into_iter()
        .filter_map(|e| match e {
            AppEvent::ElementRevealed { id } => Some(id),
            _ => None,
        })
        .collect();
    for i in 0..4 {
        assert!(revealed.contains(&format!("tokenomics-card-{}", i)));
    }
    harness.assert_screen_contains("Liquidity Pool");
    harness.assert_screen_contains("40%");
}

#[test]
fn test_reveals_fire_once_per_visit() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.events();

    harness.send_key(KeyCode::Char('2'), KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));
    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));
    harness.send_key(KeyCode::Char('2'), KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));

    let count = harness
        .events()
        .iter()
        .filter(|e| matches!(e, AppEvent::ElementRevealed { id } if id == "philosophy"))
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_nav_highlight_follows_active_section() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));
    assert_eq!(harness.app.page.nav.active(), SectionId::Community);
    harness.assert_screen_contains("C O M M U N I T Y");
}

#[test]
fn test_mouse_wheel_scrolls_and_cancels_animation() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();

    use crossterm::event::{MouseEvent, MouseEventKind};
    harness.app.handle_mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 50,
        row: 15,
        modifiers: KeyModifiers::NONE,
    });
    assert!(!harness.app.page.scroll.is_animating());
    // Wherever the cancelled animation left off, plus the wheel step
    let offset = harness.app.page.scroll.offset();
    assert!((3.0..4.0).contains(&offset), "offset was {}", offset);
}

#[test]
fn test_copy_contract_from_the_page() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.send_key(KeyCode::Char('c'), KeyModifiers::NONE).unwrap();
    assert_eq!(
        harness.app.clipboard_contents(),
        "4FdojUmXeaFMBG6yUaoufAC5Bz7u9AwnSAMizkx5pump"
    );
    harness.assert_screen_contains("copied");
}

#[test]
fn test_collapsed_nav_menu_flow() {
    // 60 columns: below the collapse threshold
    let mut harness = AppTestHarness::new(60, 30).unwrap();
    harness.assert_screen_not_contains("Tokenomics");

    harness.send_key(KeyCode::Char('m'), KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Tokenomics");

    // Selecting from the menu closes it and scrolls
    harness.click(5, 4); // row 4 = fourth menu entry (Roadmap)
    harness.advance(Duration::from_secs(2));
    assert!(!harness.app.page.nav.menu_open());
    assert_eq!(harness.app.page.active(), SectionId::Roadmap);
}

#[test]
fn test_stars_activate_past_philosophy_and_pause_on_blur() {
    let mut harness = AppTestHarness::new(120, 30).unwrap();
    assert!(!harness.app.stars.is_visible());

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.advance(Duration::from_secs(2));
    assert!(harness.app.stars.is_visible());

    harness.app.set_focused(false);
    assert!(harness.app.stars.is_paused());
    harness.app.set_focused(true);
    assert!(!harness.app.stars.is_paused());
}

#[test]
fn test_reduced_motion_jumps_instantly_and_stills_the_effects() {
    let mut config = coreterm::config::Config::default();
    config.splash.enabled = false;
    config.reduced_motion = true;
    config.terminal.typing_speed_ms = 0;
    let mut harness = AppTestHarness::with_config(config, 100, 30).unwrap();
    harness.events();

    // No scroll animation: the section changes on the next tick
    harness.send_key(KeyCode::Char('2'), KeyModifiers::NONE).unwrap();
    assert!(!harness.app.page.scroll.is_animating());
    assert_eq!(harness.app.page.active(), SectionId::Philosophy);

    // Reveals fire immediately, with no transition
    assert!(harness
        .events()
        .iter()
        .any(|e| matches!(e, AppEvent::ElementRevealed { id } if id == "philosophy")));
    harness.assert_screen_contains("there lies a fundamental essence");

    // The starfield stays dark even in its window
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    assert!(!harness.app.stars.is_visible());
}

#[test]
fn test_pointer_moves_drive_the_cursor_glyph() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    assert!(harness.app.cursor.position().is_none());
    harness.move_pointer(40, 12);
    let (x, y) = harness.app.cursor.position().unwrap();
    assert_eq!((x.round() as u16, y.round() as u16), (40, 12));
}
