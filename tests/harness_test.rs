// Test the AppTestHarness itself

mod common;

use common::harness::AppTestHarness;

#[test]
fn test_harness_creation() {
    let harness = AppTestHarness::new(100, 30).unwrap();
    assert!(!harness.app.should_quit());
}

#[test]
fn test_harness_render() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.render().unwrap();

    let screen = harness.screen_to_string();
    assert!(!screen.is_empty());
}

#[test]
fn test_hero_is_on_screen_at_startup() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("The essence of everything");
    harness.assert_screen_contains("Contract");
}

#[test]
fn test_status_bar_hints() {
    let mut harness = AppTestHarness::new(100, 30).unwrap();
    harness.assert_screen_contains("[t] terminal");
    harness.assert_screen_contains("[q] quit");
}
