#![forbid(unsafe_code)]

//! Tour controller: the step-sequencing state machine.
//!
//! Drives `Idle → Starting → Active ⇄ Transitioning → Idle` against an
//! external step registry, cooperatively scheduled: the host calls
//! [`TourController::tick`] once per animation frame, and every suspension
//! point (start retries, measurement polls, scroll settle, animated moves)
//! advances there. There is no parallelism anywhere; the `transitioning`
//! flag checked-and-set within one frame is the only mutual exclusion.
//!
//! # Flag discipline
//!
//! `transitioning` is set when a transition begins and must be cleared on
//! every exit path: move completion (`finish_transition`), silent start
//! abort, and `stop()` (unconditionally). Navigation calls arriving while
//! the flag is set are dropped, not queued.
//!
//! # Ordering
//!
//! Within one transition, [`TourEvent::StepChange`] is queued strictly
//! before the move is invoked, which is strictly before
//! [`TourEvent::MoveComplete`]. Events are delivered in queue order via
//! [`TourController::take_events`].
//!
//! # Known risk
//!
//! The measurement poll has no upper bound: a target that never reports a
//! nonzero width keeps the transition pending until `stop()`.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use tourkit_core::config::TourConfig;
use tourkit_core::geometry::{Insets, Rect, Size};
use tourkit_core::placement::{Placement, PlacementOptions, compute_placement};

use crate::coordinator::{MoveHandle, TransitionCoordinator};
use crate::observable::Observable;

/// How many frames `start` waits for an unregistered step before giving
/// up silently (about two seconds at 60 fps).
pub const START_RETRY_BUDGET: u32 = 120;

/// Delay between requesting a scroll and re-measuring the target, so the
/// scroll motion has started before the move is computed.
const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Read-only view of the externally owned step registry.
///
/// Steps are ordered; `measure` returns `None` until the host layout can
/// produce a rect (callers additionally wait for a nonzero width).
pub trait StepRegistry {
    /// Name of the first step, if any steps are registered.
    fn first(&self) -> Option<String>;

    /// Whether a step with this name is registered.
    fn contains(&self, name: &str) -> bool;

    /// Name of the step after `name` in registry order.
    fn next_of(&self, name: &str) -> Option<String>;

    /// Name of the step before `name` in registry order.
    fn prev_of(&self, name: &str) -> Option<String>;

    /// Name of the step at `index` in registry order.
    fn nth(&self, index: usize) -> Option<String>;

    /// The step's current on-screen rect, or `None` while unavailable.
    fn measure(&self, name: &str) -> Option<Rect>;
}

/// A scrollable ancestor that can bring targets into view.
pub trait ScrollHost {
    /// Request a scroll to `offset`; must not block.
    fn request_scroll(&mut self, offset: f64);
}

/// Notifications queued by the controller, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    /// The tour became visible.
    Start,
    /// The current step changed; always precedes the matching
    /// `MoveComplete`.
    StepChange { name: String },
    /// The visual move for a step settled.
    MoveComplete { name: String },
    /// The backdrop outside the cutout was pressed.
    BackdropPress,
    /// The tour was stopped and its state reset.
    Stop,
}

enum Phase {
    Idle,
    /// Waiting for the requested step to appear in the registry.
    Starting {
        requested: Option<String>,
        attempts: u32,
    },
    /// Polling the step's rect until it has a nonzero width.
    Measuring { step: String, scroll: bool },
    /// Waiting out the scroll settle delay before re-measuring.
    Settling { step: String, remaining: Duration },
    /// Waiting for the coordinator's move to resolve.
    Moving { step: String, handle: MoveHandle },
    Active,
}

/// Sequences start/stop/next/prev/goto against a step registry.
pub struct TourController<R: StepRegistry> {
    registry: R,
    config: TourConfig,
    container: Size,
    insets: Insets,
    coordinator: TransitionCoordinator,
    scroll_host: Option<Box<dyn ScrollHost>>,
    phase: Phase,
    visible: Observable<bool>,
    placement: Observable<Option<Placement>>,
    current_step: Option<String>,
    transitioning: bool,
    last_known_tooltip_height: Option<f64>,
    /// Step and rect of the most recent placement computation, kept so a
    /// late tooltip-height report can re-run the engine for the same
    /// target — and only if that step is still current.
    last_measurement: Option<(String, Rect)>,
    transition_started: Option<Instant>,
    events: VecDeque<TourEvent>,
}

impl<R: StepRegistry> TourController<R> {
    /// Create a controller over a registry. Call
    /// [`set_viewport`](Self::set_viewport) before starting.
    #[must_use]
    pub fn new(registry: R, config: TourConfig) -> Self {
        let coordinator = TransitionCoordinator::new(config.animation_duration, config.easing);
        Self {
            registry,
            config,
            container: Size::default(),
            insets: Insets::default(),
            coordinator,
            scroll_host: None,
            phase: Phase::Idle,
            visible: Observable::new(false),
            placement: Observable::new(None),
            current_step: None,
            transitioning: false,
            last_known_tooltip_height: None,
            last_measurement: None,
            transition_started: None,
            events: VecDeque::new(),
        }
    }

    /// Update the container size and safe-area insets used for placement.
    pub fn set_viewport(&mut self, container: Size, insets: Insets) {
        self.container = container;
        self.insets = insets;
    }

    /// Register the scrollable ancestor used for scroll-into-view.
    pub fn set_scroll_host(&mut self, host: Box<dyn ScrollHost>) {
        self.scroll_host = Some(host);
    }

    /// Visibility cell; the host mounts the overlay when this first
    /// becomes `true` and unmounts it when `stop()` flips it back.
    #[must_use]
    pub fn visible(&self) -> &Observable<bool> {
        &self.visible
    }

    /// The latest computed placement, for tooltip/badge renderers.
    #[must_use]
    pub fn placement(&self) -> &Observable<Option<Placement>> {
        &self.placement
    }

    /// The coordinator whose mask vectors the mask renderer subscribes to.
    #[must_use]
    pub fn coordinator(&self) -> &TransitionCoordinator {
        &self.coordinator
    }

    /// Static configuration, including renderer-facing labels and colors.
    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// The registry this controller reads.
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable registry access (the registry is externally owned; this
    /// exists for hosts that embed it here).
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Name of the current step, if any.
    #[must_use]
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    /// Whether a transition is in flight (navigation is dropped while set).
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Drain all queued events in emission order.
    pub fn take_events(&mut self) -> Vec<TourEvent> {
        self.events.drain(..).collect()
    }

    /// Start the tour at `from_step`, or at the first registered step.
    ///
    /// If the step is not yet registered, retries once per tick up to
    /// [`START_RETRY_BUDGET`] frames, then aborts silently: the tour
    /// simply never becomes visible and the retry counter resets.
    pub fn start(&mut self, from_step: Option<&str>) {
        if self.transitioning {
            trace!("start dropped: transition in flight");
            return;
        }
        let requested = from_step.map(str::to_string);
        match self.resolve_start(requested.as_deref()) {
            Some(step) => self.begin_transition(step, false),
            None => {
                self.transitioning = true;
                self.phase = Phase::Starting {
                    requested,
                    attempts: 0,
                };
            }
        }
    }

    /// Advance to the next step in registry order. Dropped while a
    /// transition is in flight; a no-op on the last step.
    pub fn next(&mut self) {
        self.navigate(|registry, current| registry.next_of(current));
    }

    /// Return to the previous step. Same drop semantics as [`next`](Self::next).
    pub fn prev(&mut self) {
        self.navigate(|registry, current| registry.prev_of(current));
    }

    /// Jump to the step at `index` in registry order. Same drop semantics
    /// as [`next`](Self::next).
    pub fn go_to_nth(&mut self, index: usize) {
        self.navigate(|registry, _| registry.nth(index));
    }

    /// Stop the tour: hide the overlay, clear the transitioning flag
    /// unconditionally, and reset all geometry to zeroed defaults.
    pub fn stop(&mut self) {
        self.visible.set(false);
        self.transitioning = false;
        self.phase = Phase::Idle;
        self.current_step = None;
        self.last_known_tooltip_height = None;
        self.last_measurement = None;
        self.transition_started = None;
        self.placement.set(None);
        self.coordinator.reset();
        self.events.push_back(TourEvent::Stop);
        debug!("tour stopped");
    }

    /// Report a backdrop press from the mask renderer. Stops the tour when
    /// the config says outside taps dismiss.
    pub fn handle_backdrop_press(&mut self) {
        self.events.push_back(TourEvent::BackdropPress);
        if self.config.dismiss_on_backdrop_press {
            self.stop();
        }
    }

    /// Report the rendered tooltip's height.
    ///
    /// The first placement for a step runs with an unknown height and a
    /// coarse vertical heuristic; this callback re-runs the engine with
    /// the known height for a corrected, safe-area-respecting placement —
    /// but only if the step the measurement belonged to is still current.
    pub fn report_tooltip_height(&mut self, height: f64) {
        if !height.is_finite() || height <= 0.0 {
            return;
        }
        if self.last_known_tooltip_height == Some(height) {
            return;
        }
        self.last_known_tooltip_height = Some(height);

        let Some((step, rect)) = self.last_measurement.clone() else {
            return;
        };
        if self.current_step.as_deref() != Some(step.as_str()) {
            trace!(step = %step, "height report ignored: step no longer current");
            return;
        }

        trace!(step = %step, height, "correcting placement with known height");
        let placement = self.compute(rect);
        self.placement.set(Some(placement));
        let handle = self.coordinator.move_to(&placement, self.config.animated);

        // If the original move is still in flight it was just superseded;
        // the correction becomes the move we wait on.
        if matches!(self.phase, Phase::Moving { .. }) {
            if handle.is_resolved() {
                self.finish_transition(step);
            } else {
                self.phase = Phase::Moving { step, handle };
            }
        }
    }

    /// Advance one frame: drives tweens, start retries, measurement
    /// polls, scroll settling, and move completion.
    pub fn tick(&mut self, dt: Duration) {
        self.coordinator.tick(dt);

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => {}
            Phase::Active => self.phase = Phase::Active,
            Phase::Starting {
                requested,
                attempts,
            } => match self.resolve_start(requested.as_deref()) {
                Some(step) => self.begin_transition(step, false),
                None => {
                    let attempts = attempts + 1;
                    if attempts >= START_RETRY_BUDGET {
                        debug!(attempts, "start aborted: step never registered");
                        self.transitioning = false;
                    } else {
                        self.phase = Phase::Starting {
                            requested,
                            attempts,
                        };
                    }
                }
            },
            Phase::Measuring { step, scroll } => {
                match self.measure_nonzero(&step) {
                    Some(rect) if scroll && self.scroll_host.is_some() => {
                        let offset = (rect.y - rect.height / 2.0).max(0.0);
                        if let Some(host) = self.scroll_host.as_mut() {
                            host.request_scroll(offset);
                        }
                        self.phase = Phase::Settling {
                            step,
                            remaining: SCROLL_SETTLE_DELAY,
                        };
                    }
                    Some(rect) => self.invoke_move(step, rect),
                    // Not yet measurable: poll again next frame. Unbounded
                    // by design; see module docs.
                    None => self.phase = Phase::Measuring { step, scroll },
                }
            }
            Phase::Settling { step, remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    // Re-measure: the scroll moved the target.
                    match self.measure_nonzero(&step) {
                        Some(rect) => self.invoke_move(step, rect),
                        None => {
                            self.phase = Phase::Measuring {
                                step,
                                scroll: false,
                            }
                        }
                    }
                } else {
                    self.phase = Phase::Settling { step, remaining };
                }
            }
            Phase::Moving { step, handle } => {
                if handle.is_resolved() {
                    self.finish_transition(step);
                } else {
                    self.phase = Phase::Moving { step, handle };
                }
            }
        }
    }

    fn resolve_start(&self, requested: Option<&str>) -> Option<String> {
        match requested {
            Some(name) => self.registry.contains(name).then(|| name.to_string()),
            None => self.registry.first(),
        }
    }

    fn navigate(&mut self, resolve: impl FnOnce(&R, &str) -> Option<String>) {
        if self.transitioning {
            trace!("navigation dropped: transition in flight");
            return;
        }
        if !self.visible.get() {
            return;
        }
        let Some(current) = self.current_step.clone() else {
            return;
        };
        let Some(step) = resolve(&self.registry, &current) else {
            return;
        };
        self.begin_transition(step, true);
    }

    /// Synchronous head of a transition: flag, step update, notification.
    /// The asynchronous tail continues in `tick`.
    fn begin_transition(&mut self, step: String, scroll: bool) {
        self.transitioning = true;
        self.transition_started = Some(Instant::now());
        self.current_step = Some(step.clone());
        if !self.visible.get() {
            self.visible.set(true);
            self.events.push_back(TourEvent::Start);
        }
        debug!(step = %step, "step change");
        self.events.push_back(TourEvent::StepChange { name: step.clone() });
        self.phase = Phase::Measuring { step, scroll };
    }

    fn measure_nonzero(&self, step: &str) -> Option<Rect> {
        self.registry.measure(step).filter(|r| !r.is_unmeasured())
    }

    fn invoke_move(&mut self, step: String, rect: Rect) {
        self.last_measurement = Some((step.clone(), rect));
        let placement = self.compute(rect);
        self.placement.set(Some(placement));
        let handle = self.coordinator.move_to(&placement, self.config.animated);
        if handle.is_resolved() {
            self.finish_transition(step);
        } else {
            self.phase = Phase::Moving { step, handle };
        }
    }

    fn compute(&self, rect: Rect) -> Placement {
        compute_placement(
            rect,
            self.container,
            self.insets,
            &PlacementOptions::from_config(&self.config, self.last_known_tooltip_height),
        )
    }

    fn finish_transition(&mut self, step: String) {
        self.transitioning = false;
        self.phase = Phase::Active;
        if let Some(started) = self.transition_started.take() {
            debug!(
                step = %step,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "move complete"
            );
        }
        self.events.push_back(TourEvent::MoveComplete { name: step });
    }
}

impl<R: StepRegistry + std::fmt::Debug> std::fmt::Debug for TourController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourController")
            .field("current_step", &self.current_step)
            .field("visible", &self.visible.get())
            .field("transitioning", &self.transitioning)
            .field("last_known_tooltip_height", &self.last_known_tooltip_height)
            .finish_non_exhaustive()
    }
}
