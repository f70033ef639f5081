//! End-to-end tour flows through the public runtime API: a host-shaped
//! registry, frame-by-frame ticking, renderer-style subscriptions on the
//! coordinator's observables, and the event stream a real host would drain.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tourkit_core::config::TourConfig;
use tourkit_core::geometry::{Insets, Rect, Size, Vec2};
use tourkit_runtime::{ScrollHost, StepRegistry, TourController, TourEvent};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug)]
struct Registry {
    steps: Vec<(&'static str, Rect)>,
}

impl StepRegistry for Registry {
    fn first(&self) -> Option<String> {
        self.steps.first().map(|(n, _)| (*n).to_string())
    }

    fn contains(&self, name: &str) -> bool {
        self.steps.iter().any(|(n, _)| *n == name)
    }

    fn next_of(&self, name: &str) -> Option<String> {
        let i = self.steps.iter().position(|(n, _)| *n == name)?;
        self.steps.get(i + 1).map(|(n, _)| (*n).to_string())
    }

    fn prev_of(&self, name: &str) -> Option<String> {
        let i = self.steps.iter().position(|(n, _)| *n == name)?;
        self.steps.get(i.checked_sub(1)?).map(|(n, _)| (*n).to_string())
    }

    fn nth(&self, index: usize) -> Option<String> {
        self.steps.get(index).map(|(n, _)| (*n).to_string())
    }

    fn measure(&self, name: &str) -> Option<Rect> {
        self.steps.iter().find(|(n, _)| *n == name).map(|(_, r)| *r)
    }
}

fn three_step_controller() -> TourController<Registry> {
    let registry = Registry {
        steps: vec![
            ("intro", Rect::new(20.0, 40.0, 120.0, 48.0)),
            ("search", Rect::new(250.0, 90.0, 100.0, 36.0)),
            ("profile", Rect::new(300.0, 700.0, 64.0, 64.0)),
        ],
    };
    let mut c = TourController::new(registry, TourConfig::default());
    c.set_viewport(Size::new(400.0, 800.0), Insets::new(24.0, 16.0, 0.0, 0.0));
    c
}

fn run(c: &mut TourController<Registry>, frames: u32) {
    for _ in 0..frames {
        c.tick(FRAME);
    }
}

#[test]
fn full_walkthrough_visits_every_step_in_order() {
    let mut c = three_step_controller();
    c.start(None);
    run(&mut c, 40);
    c.next();
    run(&mut c, 40);
    c.next();
    run(&mut c, 40);
    c.next(); // past the end: no-op
    run(&mut c, 40);
    c.stop();

    let names: Vec<String> = c
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            TourEvent::StepChange { name } => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["intro", "search", "profile"]);
    assert!(!c.visible().get());
}

#[test]
fn mask_subscription_tracks_the_animated_cutout() {
    let mut c = three_step_controller();
    let positions = Rc::new(RefCell::new(Vec::new()));
    let positions2 = Rc::clone(&positions);
    let _sub = c
        .coordinator()
        .mask_position()
        .subscribe(move |v: &Vec2| positions2.borrow_mut().push(*v));

    c.start(None);
    run(&mut c, 40);

    let recorded = positions.borrow();
    // Animated move: many intermediate frames, monotone toward the target.
    assert!(recorded.len() > 5);
    let last = recorded.last().copied().unwrap();
    assert_eq!(last, Vec2::new(20.0, 40.0));
    assert!(recorded.first().copied().unwrap().x < last.x + 1.0);
}

#[test]
fn move_complete_fires_only_after_the_animation_settles() {
    let mut c = three_step_controller();
    c.start(None);

    // One frame in: measuring done, tweens running, not complete.
    run(&mut c, 2);
    assert!(c.is_transitioning());
    assert!(!c
        .take_events()
        .iter()
        .any(|e| matches!(e, TourEvent::MoveComplete { .. })));

    // Default 300ms animation: 20 more frames is plenty.
    run(&mut c, 25);
    assert!(!c.is_transitioning());
    assert!(c
        .take_events()
        .iter()
        .any(|e| matches!(e, TourEvent::MoveComplete { .. })));
}

#[test]
fn two_phase_height_correction_flips_a_near_bottom_tooltip() {
    let mut c = three_step_controller();
    c.start(Some("profile"));
    run(&mut c, 40);

    // "profile" sits at y=700 in an 800-tall container: the first pass
    // already anchors to the top side, but without a height it cannot
    // clamp. Reporting the height re-runs the engine with real clamps.
    c.report_tooltip_height(180.0);
    run(&mut c, 40);

    let p = c.placement().get().expect("placement published");
    assert!(p.tooltip.bottom.is_some());
    assert!(p.tooltip.top.is_none());
    // span fits: bottom + height <= container - insets.top - margin
    let bottom = f64::from(p.tooltip.bottom.unwrap());
    assert!(bottom + 180.0 <= 800.0 - 24.0 - 8.0 + 1.0);
}

#[test]
fn scroll_sync_runs_on_navigation_but_not_on_start() {
    struct Recorder(Rc<RefCell<Vec<f64>>>);
    impl ScrollHost for Recorder {
        fn request_scroll(&mut self, offset: f64) {
            self.0.borrow_mut().push(offset);
        }
    }

    let offsets = Rc::new(RefCell::new(Vec::new()));
    let mut c = three_step_controller();
    c.set_scroll_host(Box::new(Recorder(Rc::clone(&offsets))));

    c.start(None);
    run(&mut c, 40);
    assert!(offsets.borrow().is_empty());

    c.next();
    run(&mut c, 60);
    assert_eq!(*offsets.borrow(), vec![72.0]); // 90 - 36/2
}

#[test]
fn stop_mid_animation_leaves_no_residual_motion() {
    let mut c = three_step_controller();
    c.start(None);
    run(&mut c, 40);
    c.next();
    run(&mut c, 3); // mid-flight

    c.stop();
    let frozen = c.coordinator().mask_position().get();
    assert_eq!(frozen, Vec2::ZERO);

    run(&mut c, 40);
    assert_eq!(c.coordinator().mask_position().get(), Vec2::ZERO);
    assert!(!c.coordinator().is_animating());
}

#[test]
fn rapid_navigation_emits_one_transition_per_accepted_call() {
    let mut c = three_step_controller();
    c.start(None);
    run(&mut c, 40);
    c.take_events();

    // Burst of calls while the first accepted transition is in flight.
    c.next();
    c.next();
    c.prev();
    c.go_to_nth(2);
    run(&mut c, 40);

    let events = c.take_events();
    let changes = events
        .iter()
        .filter(|e| matches!(e, TourEvent::StepChange { .. }))
        .count();
    let completes = events
        .iter()
        .filter(|e| matches!(e, TourEvent::MoveComplete { .. }))
        .count();
    assert_eq!(changes, 1);
    assert_eq!(completes, 1);
    assert_eq!(c.current_step(), Some("search"));
}

#[test]
fn restart_after_stop_replays_the_tour() {
    let mut c = three_step_controller();
    c.start(None);
    run(&mut c, 40);
    c.stop();
    c.take_events();

    c.start(None);
    run(&mut c, 40);

    let events = c.take_events();
    assert_eq!(events.first(), Some(&TourEvent::Start));
    assert!(c.visible().get());
    assert_eq!(c.current_step(), Some("intro"));
}
