//! Interaction state machine behind the widget.
//!
//! `InteractionController` owns every decision the page makes: counting decline
//! attempts, deriving the guilt level, scattering decoy images, picking guilt
//! messages, moving the decline control out of reach and switching into the
//! accepted state with its celebration. It never touches the DOM; operations
//! return [`Effect`]s for the view to perform, and deferred work is kept in a
//! deadline queue drained by [`InteractionController::tick`].
//!
//! All time arguments are milliseconds on one monotonic clock (the view passes
//! `performance.now()`).

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{AppConfig, Tuning};

pub mod celebration;
pub mod effects;
pub mod escalation;
pub mod messages;
pub mod placement;
pub mod scheduler;

pub use celebration::{FallingHeart, FloatingHeart, Tear};
pub use effects::{ConfettiBurst, Cue, Effect, Tone};
pub use escalation::{MAX_GUILT_LEVEL, Mood, Phase, guilt_level};
pub use placement::{CelebrationImage, DecoyImage, Point, ScatteredImage, Size};

use scheduler::{Task, TaskQueue};

/// Message currently on screen. `generation` identifies it for its pending clear.
#[derive(Clone, Debug, PartialEq)]
pub struct GuiltMessage {
    pub generation: u64,
    pub text: String,
}

/// Snapshot of the core interaction fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionState {
    pub accepted: bool,
    pub attempt_count: u32,
    pub guilt_level: u8,
    pub decline_visible: bool,
    pub decline_offset: Point,
}

pub struct InteractionController<R: Rng = ChaCha8Rng> {
    tuning: Tuning,
    decline_assets: Vec<String>,
    accept_assets: Vec<String>,
    rng: R,
    accepted: bool,
    attempts: u32,
    level: u8,
    decline_visible: bool,
    decline_offset: Point,
    decoys: Vec<DecoyImage>,
    celebration: Vec<CelebrationImage>,
    message: Option<GuiltMessage>,
    generation: u64,
    tasks: TaskQueue,
    floating_hearts: Vec<FloatingHeart>,
    tears: Vec<Tear>,
    falling_hearts: Vec<FallingHeart>,
    // bumped on every visible change so the view knows when to re-render
    revision: u64,
}

impl InteractionController<ChaCha8Rng> {
    pub fn with_seed(config: &AppConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> InteractionController<R> {
    pub fn new(config: &AppConfig, mut rng: R) -> Self {
        let floating_hearts = celebration::floating_hearts(&mut rng, config.tuning.floating_hearts);
        Self {
            tuning: config.tuning.clone(),
            decline_assets: config.decline_images.clone(),
            accept_assets: config.accept_images.clone(),
            rng,
            accepted: false,
            attempts: 0,
            level: 0,
            decline_visible: true,
            decline_offset: Point::default(),
            decoys: Vec::new(),
            celebration: Vec::new(),
            message: None,
            generation: 0,
            tasks: TaskQueue::default(),
            floating_hearts,
            tears: Vec::new(),
            falling_hearts: Vec::new(),
            revision: 0,
        }
    }

    /// One decline interaction (click, pointer enter or touch on the decline control).
    ///
    /// `container` is the current rendered size of the page container, used when
    /// the decline control has to move; `None` leaves it where it is.
    pub fn register_decline(&mut self, now_ms: f64, container: Option<Size>) -> Vec<Effect> {
        if self.accepted {
            return Vec::new();
        }
        self.attempts = self.attempts.saturating_add(1);
        let previous = self.level;
        self.level = guilt_level(self.attempts).max(previous);
        if self.level != previous {
            debug!("guilt level {previous} -> {} after {} attempts", self.level, self.attempts);
            if self.level == 4 {
                self.tears = celebration::tears(&mut self.rng, self.tuning.tears);
            } else {
                self.tears.clear();
            }
        }

        let mut effects = vec![Effect::Sound(Cue::Decline)];
        self.add_decoy();
        self.show_message(now_ms);

        if self.level == MAX_GUILT_LEVEL {
            let entry = escalation::level_entry(MAX_GUILT_LEVEL);
            if self.attempts >= entry.saturating_add(self.tuning.auto_accept_extra_attempts) {
                info!("giving up after {} declines", self.attempts);
                effects.extend(self.accept(now_ms));
                return effects;
            }
            if self.attempts == entry {
                self.tasks
                    .schedule(now_ms + self.tuning.hide_delay_ms, Task::HideDecline);
            }
        } else if self.level >= 2 {
            self.relocate_decline_control(container);
        }
        self.touch();
        effects
    }

    /// Move the decline control to a random offset inside the container.
    /// Returns false (and changes nothing) without a usable measurement.
    pub fn relocate_decline_control(&mut self, container: Option<Size>) -> bool {
        if self.accepted {
            return false;
        }
        let footprint = Size::new(self.tuning.decline_width_px, self.tuning.decline_height_px);
        match placement::relocation_offset(
            &mut self.rng,
            container,
            footprint,
            self.tuning.relocation_margin_px,
        ) {
            Some(offset) => {
                self.decline_offset = offset;
                self.touch();
                true
            }
            None => {
                debug!("container not measured; decline control stays put");
                false
            }
        }
    }

    /// Pointer position update. At guilt level 3 the decline control jumps away
    /// whenever the pointer comes within the proximity radius of its centre.
    pub fn pointer_moved(
        &mut self,
        pointer: Point,
        decline_center: Option<Point>,
        container: Option<Size>,
    ) -> bool {
        if self.accepted || self.level != 3 || !self.decline_visible {
            return false;
        }
        let Some(center) = decline_center else {
            return false;
        };
        if pointer.distance(center) < self.tuning.proximity_radius_px {
            self.relocate_decline_control(container)
        } else {
            false
        }
    }

    /// Terminal transition into the celebration. Calling it again does nothing.
    pub fn accept(&mut self, now_ms: f64) -> Vec<Effect> {
        if self.accepted {
            return Vec::new();
        }
        info!("accepted after {} declines", self.attempts);
        self.accepted = true;
        self.decoys.clear();
        self.tears.clear();
        // the last guilt message stays up until its own clear fires
        self.tasks.retain(|t| !matches!(t, Task::HideDecline));

        let slots = self.accept_assets.len();
        let stagger = self.tuning.celebration_stagger_ms;
        let rng = &mut self.rng;
        self.celebration = self
            .accept_assets
            .iter()
            .enumerate()
            .map(|(i, source)| CelebrationImage {
                image: placement::scatter(rng, source, i, slots),
                reveal_delay_ms: i as f64 * stagger,
            })
            .collect();
        self.falling_hearts = celebration::falling_hearts(&mut self.rng, self.tuning.falling_hearts);
        for offset in celebration::burst_offsets(&self.tuning) {
            self.tasks.schedule(now_ms + offset, Task::ConfettiBurst);
        }
        self.touch();
        vec![Effect::Sound(Cue::Celebrate)]
    }

    /// Run every deferred task due at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        for task in self.tasks.drain_due(now_ms) {
            match task {
                Task::ClearMessage { generation } => {
                    if self.message.as_ref().is_some_and(|m| m.generation == generation) {
                        self.message = None;
                        self.touch();
                    }
                }
                Task::HideDecline => {
                    if !self.accepted && self.decline_visible {
                        debug!("decline control hidden");
                        self.decline_visible = false;
                        self.touch();
                    }
                }
                Task::ConfettiBurst => {
                    if self.accepted {
                        effects.push(Effect::Confetti(celebration::confetti_burst(
                            &mut self.rng,
                            &self.tuning,
                        )));
                    }
                }
            }
        }
        effects
    }

    fn add_decoy(&mut self) {
        let slots = self.decline_assets.len();
        if slots == 0 {
            return;
        }
        let index = (self.attempts as usize - 1) % slots;
        let decoy = placement::scatter(&mut self.rng, &self.decline_assets[index], index, slots);
        self.decoys.push(decoy);
    }

    fn show_message(&mut self, now_ms: f64) {
        self.generation += 1;
        let text = messages::pick_message(&mut self.rng, self.level, self.attempts);
        self.message = Some(GuiltMessage {
            generation: self.generation,
            text,
        });
        self.tasks.schedule(
            now_ms + self.tuning.message_duration_ms,
            Task::ClearMessage {
                generation: self.generation,
            },
        );
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn state(&self) -> InteractionState {
        InteractionState {
            accepted: self.accepted,
            attempt_count: self.attempts,
            guilt_level: self.level,
            decline_visible: self.decline_visible,
            decline_offset: self.decline_offset,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.accepted {
            return Phase::Accepted;
        }
        match self.level {
            0 => Phase::Idle,
            l if l >= MAX_GUILT_LEVEL => {
                if self.decline_visible {
                    Phase::Vanishing
                } else {
                    Phase::Hidden
                }
            }
            l => Phase::Escalating(l),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempts
    }

    pub fn guilt_level(&self) -> u8 {
        self.level
    }

    pub fn decline_visible(&self) -> bool {
        self.decline_visible
    }

    pub fn decline_offset(&self) -> Point {
        self.decline_offset
    }

    pub fn decoys(&self) -> &[DecoyImage] {
        &self.decoys
    }

    pub fn celebration(&self) -> &[CelebrationImage] {
        &self.celebration
    }

    pub fn message(&self) -> Option<&GuiltMessage> {
        self.message.as_ref()
    }

    pub fn mood(&self) -> Mood {
        Mood::for_state(self.level, self.accepted)
    }

    pub fn accept_scale(&self) -> f64 {
        escalation::accept_scale(
            self.attempts,
            self.tuning.accept_growth_per_attempt,
            self.tuning.accept_max_scale,
        )
    }

    pub fn decline_label(&self) -> String {
        escalation::decline_label(self.level)
    }

    pub fn decline_scale(&self) -> f64 {
        escalation::decline_scale(self.level)
    }

    pub fn decline_opacity(&self) -> f64 {
        escalation::decline_opacity(self.level)
    }

    pub fn floating_hearts(&self) -> &[FloatingHeart] {
        &self.floating_hearts
    }

    pub fn tears(&self) -> &[Tear] {
        &self.tears
    }

    pub fn falling_hearts(&self) -> &[FallingHeart] {
        &self.falling_hearts
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Deadline of the earliest pending task, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.tasks.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Option<Size> = Some(Size {
        width: 1280.0,
        height: 800.0,
    });

    fn controller() -> InteractionController {
        InteractionController::with_seed(&AppConfig::default(), 42)
    }

    fn decline_n(c: &mut InteractionController, n: u32) {
        for i in 0..n {
            c.register_decline(i as f64 * 10.0, CONTAINER);
        }
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.accept_scale(), 1.0);
        assert!(c.decline_visible());
        assert!(c.message().is_none());
        assert_eq!(c.floating_hearts().len(), 20);
    }

    #[test]
    fn each_decline_adds_one_decoy_and_a_tone() {
        let mut c = controller();
        for n in 1..=15u32 {
            let effects = c.register_decline(n as f64, CONTAINER);
            assert_eq!(effects, vec![Effect::Sound(Cue::Decline)]);
            assert_eq!(c.decoys().len(), n as usize);
            assert_eq!(c.guilt_level(), guilt_level(n));
        }
    }

    #[test]
    fn decoy_sources_cycle_through_assets() {
        let cfg = AppConfig::default();
        let mut c = InteractionController::with_seed(&cfg, 1);
        decline_n(&mut c, 10);
        let len = cfg.decline_images.len();
        for (i, decoy) in c.decoys().iter().enumerate() {
            assert_eq!(decoy.source, cfg.decline_images[i % len]);
        }
    }

    #[test]
    fn first_levels_do_not_move_the_decline_control() {
        let mut c = controller();
        decline_n(&mut c, 2);
        assert_eq!(c.decline_offset(), Point::default());
        c.register_decline(100.0, CONTAINER);
        assert_eq!(c.guilt_level(), 2);
        assert_ne!(c.decline_offset(), Point::default());
    }

    #[test]
    fn missing_layout_leaves_offset_unchanged() {
        let mut c = controller();
        decline_n(&mut c, 2);
        c.register_decline(100.0, None);
        assert_eq!(c.guilt_level(), 2);
        assert_eq!(c.decline_offset(), Point::default());
        assert!(!c.relocate_decline_control(None));
    }

    #[test]
    fn level_three_dodges_a_nearby_pointer() {
        let mut c = controller();
        decline_n(&mut c, 6);
        assert_eq!(c.guilt_level(), 3);
        let before = c.decline_offset();
        let center = Point::new(600.0, 400.0);
        assert!(!c.pointer_moved(Point::new(800.0, 400.0), Some(center), CONTAINER));
        assert_eq!(c.decline_offset(), before);
        assert!(c.pointer_moved(Point::new(650.0, 430.0), Some(center), CONTAINER));
        assert_ne!(c.decline_offset(), before);
        assert!(!c.pointer_moved(Point::new(600.0, 400.0), None, CONTAINER));
    }

    #[test]
    fn proximity_only_matters_at_level_three() {
        let mut c = controller();
        decline_n(&mut c, 3);
        let center = Point::new(600.0, 400.0);
        assert!(!c.pointer_moved(center, Some(center), CONTAINER));
        decline_n(&mut c, 8);
        assert_eq!(c.guilt_level(), 4);
        assert!(!c.pointer_moved(center, Some(center), CONTAINER));
    }

    #[test]
    fn newer_message_survives_older_clear() {
        let mut c = controller();
        c.register_decline(0.0, CONTAINER);
        c.register_decline(1_000.0, CONTAINER);
        let second = c.message().cloned().unwrap();
        c.tick(2_000.0);
        assert_eq!(c.message(), Some(&second));
        c.tick(3_000.0);
        assert!(c.message().is_none());
    }

    #[test]
    fn reaching_level_five_hides_decline_after_delay() {
        let mut c = controller();
        decline_n(&mut c, 15);
        assert_eq!(c.phase(), Phase::Escalating(4));
        c.register_decline(1_000.0, CONTAINER);
        assert_eq!(c.phase(), Phase::Vanishing);
        assert_eq!(c.decline_opacity(), 0.0);
        c.tick(1_499.0);
        assert!(c.decline_visible());
        c.tick(1_500.0);
        assert!(!c.decline_visible());
        assert_eq!(c.phase(), Phase::Hidden);
    }

    #[test]
    fn nineteenth_decline_auto_accepts() {
        let mut c = controller();
        decline_n(&mut c, 18);
        assert!(!c.is_accepted());
        let effects = c.register_decline(500.0, CONTAINER);
        assert!(c.is_accepted());
        assert_eq!(c.phase(), Phase::Accepted);
        assert_eq!(
            effects,
            vec![Effect::Sound(Cue::Decline), Effect::Sound(Cue::Celebrate)]
        );
        assert!(c.decoys().is_empty());
        assert_eq!(c.attempt_count(), 19);
    }

    #[test]
    fn auto_accept_threshold_is_configurable() {
        let mut cfg = AppConfig::default();
        cfg.tuning.auto_accept_extra_attempts = 0;
        let mut c = InteractionController::with_seed(&cfg, 3);
        decline_n(&mut c, 16);
        assert!(c.is_accepted());
    }

    #[test]
    fn accept_without_declines_shows_full_celebration() {
        let cfg = AppConfig::default();
        let mut c = InteractionController::with_seed(&cfg, 9);
        let effects = c.accept(0.0);
        assert_eq!(effects, vec![Effect::Sound(Cue::Celebrate)]);
        assert_eq!(c.phase(), Phase::Accepted);
        assert_eq!(c.celebration().len(), cfg.accept_images.len());
        assert!(c.decoys().is_empty());
        assert_eq!(c.falling_hearts().len(), 30);
        assert_eq!(c.mood(), Mood::Excited);
        for (i, img) in c.celebration().iter().enumerate() {
            assert_eq!(img.reveal_delay_ms, i as f64 * 100.0);
            assert_eq!(img.image.source, cfg.accept_images[i]);
        }
    }

    #[test]
    fn acceptance_is_absorbing() {
        let mut c = controller();
        decline_n(&mut c, 4);
        c.accept(100.0);
        let snapshot = c.state();
        let celebration = c.celebration().to_vec();
        assert!(c.accept(200.0).is_empty());
        assert!(c.register_decline(300.0, CONTAINER).is_empty());
        assert!(!c.relocate_decline_control(CONTAINER));
        assert_eq!(c.state(), snapshot);
        assert!(c.decoys().is_empty());
        assert_eq!(c.celebration(), celebration.as_slice());
    }

    #[test]
    fn accept_keeps_message_until_its_clear_but_cancels_hide() {
        let mut c = controller();
        decline_n(&mut c, 16);
        let last = c.message().cloned().unwrap();
        c.accept(200.0);
        assert_eq!(c.message(), Some(&last));
        // 16th decline at 150ms, its message clears at 2150ms
        c.tick(2_149.0);
        assert_eq!(c.message(), Some(&last));
        c.tick(2_150.0);
        assert!(c.message().is_none());
        c.tick(10_000.0);
        assert!(c.decline_visible());
    }

    #[test]
    fn auto_accept_leaves_the_give_up_message_visible() {
        let mut c = controller();
        decline_n(&mut c, 19);
        assert!(c.is_accepted());
        let msg = c.message().expect("message after auto-accept");
        assert!(messages::messages_for(5).iter().any(|m| m.replace("{count}", "19") == msg.text));
    }

    #[test]
    fn level_four_relocates_but_level_five_does_not() {
        let mut c = controller();
        decline_n(&mut c, 10);
        let before = c.decline_offset();
        c.register_decline(200.0, CONTAINER);
        assert_eq!(c.guilt_level(), 4);
        assert_ne!(c.decline_offset(), before);

        decline_n(&mut c, 5);
        assert_eq!(c.attempt_count(), 16);
        let parked = c.decline_offset();
        for now in [300.0, 310.0] {
            c.register_decline(now, CONTAINER);
            assert_eq!(c.guilt_level(), 5);
            assert_eq!(c.decline_offset(), parked);
        }
        assert!(!c.is_accepted());
    }

    #[test]
    fn confetti_bursts_for_three_seconds() {
        let mut c = controller();
        c.accept(1_000.0);
        let mut bursts = 0;
        let mut t = 1_000.0;
        while t <= 6_000.0 {
            bursts += c
                .tick(t)
                .iter()
                .filter(|e| matches!(e, Effect::Confetti(_)))
                .count();
            t += 50.0;
        }
        assert_eq!(bursts, 11);
        assert!(c.next_deadline().is_none());
    }

    #[test]
    fn tears_only_at_level_four() {
        let mut c = controller();
        decline_n(&mut c, 10);
        assert!(c.tears().is_empty());
        c.register_decline(500.0, CONTAINER);
        assert_eq!(c.tears().len(), 10);
        decline_n(&mut c, 5);
        assert_eq!(c.guilt_level(), 5);
        assert!(c.tears().is_empty());
    }

    #[test]
    fn revision_changes_with_state() {
        let mut c = controller();
        let r0 = c.revision();
        c.register_decline(0.0, CONTAINER);
        let r1 = c.revision();
        assert_ne!(r0, r1);
        c.tick(1.0);
        assert_eq!(c.revision(), r1);
        c.tick(5_000.0);
        assert_ne!(c.revision(), r1);
    }
}
