// src/models/link.rs
//
// A directed, growing-then-fading connection between two points.
// Endpoints are indices into the owning field's point list.

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The link finished growing and should activate its destination.
    Reached { to: usize },
}

#[derive(Debug, Clone)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    progress: f32,
    opacity: f32,
    active: bool,
    growth_speed: f32,
    fade_speed: f32,
}

impl Link {
    pub fn new(from: usize, to: usize, growth_speed: f32, fade_speed: f32) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            opacity: 1.0,
            active: true,
            growth_speed,
            fade_speed,
        }
    }

    pub fn update(&mut self, dt: f32) -> Option<LinkEvent> {
        if self.active && self.progress < 1.0 {
            self.progress += self.growth_speed * dt;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                return Some(LinkEvent::Reached { to: self.to });
            }
        } else if !self.active && self.opacity > 0.0 {
            self.opacity = (self.opacity - self.fade_speed * dt).max(0.0);
        }
        None
    }

    /// Stops growth and starts the fade-out.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Where the drawn line currently ends.
    pub fn tip(&self, from: Vec2, to: Vec2) -> Vec2 {
        from + (to - from) * self.progress
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.progress > 0.0 && self.opacity > 0.0
    }

    /// Fully faded; the owner drops it on its next update.
    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic_and_fires_once() {
        let mut link = Link::new(0, 1, 0.003, 0.001);
        let mut last = link.progress();
        let mut fired = 0;

        for _ in 0..100 {
            if let Some(LinkEvent::Reached { to }) = link.update(16.0) {
                assert_eq!(to, 1);
                fired += 1;
            }
            assert!(link.progress() >= last);
            assert!(link.progress() <= 1.0);
            last = link.progress();
        }

        assert_eq!(fired, 1);
        assert_eq!(link.progress(), 1.0);
        // still active, so no fading yet
        assert_eq!(link.opacity(), 1.0);
    }

    #[test]
    fn test_no_fade_while_active() {
        let mut link = Link::new(0, 1, 0.0001, 0.5);
        for _ in 0..10 {
            link.update(16.0);
            assert!(link.is_active());
            assert_eq!(link.opacity(), 1.0);
        }
    }

    #[test]
    fn test_fade_terminates_in_bounded_ticks() {
        let fade_speed = 0.001;
        let dt = 16.0;
        let mut link = Link::new(0, 1, 0.003, fade_speed);
        link.update(dt);
        link.deactivate();

        let bound = (1.0_f32 / fade_speed / dt).ceil() as usize;
        let mut ticks = 0;
        while !link.is_spent() {
            let frozen = link.progress();
            assert!(link.update(dt).is_none());
            assert_eq!(link.progress(), frozen);
            ticks += 1;
            assert!(ticks <= bound, "fade took more than {} ticks", bound);
        }
        assert_eq!(link.opacity(), 0.0);
        assert!(!link.is_visible());
    }

    #[test]
    fn test_tip_interpolates() {
        let mut link = Link::new(0, 1, 0.01, 0.001);
        link.update(50.0);
        let tip = link.tip(vec2(0.0, 0.0), vec2(100.0, 40.0));
        assert!((tip.x - 50.0).abs() < 1e-4);
        assert!((tip.y - 20.0).abs() < 1e-4);
    }
}
