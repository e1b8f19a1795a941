// ABOUTME: Drag gesture recognizer for the quickslides engine
// ABOUTME: Turns one pointer or touch trajectory into at most one navigation intent

use crate::config::GestureConfig;
use crate::navigation::NavCommand;
use log::debug;

/// One pointer position, in pixels, with a millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub t_ms: u64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, t_ms: u64) -> Self {
        Self { x, y, t_ms }
    }
}

/// The discrete outcome of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    /// Finger moved left: advance.
    SwipeLeft,
    /// Finger moved right: go back.
    SwipeRight,
    /// Vertical drag past the exit distance.
    SwipeExit,
    None,
}

impl SwipeIntent {
    pub fn command(self) -> Option<NavCommand> {
        match self {
            SwipeIntent::SwipeLeft => Some(NavCommand::Next),
            SwipeIntent::SwipeRight => Some(NavCommand::Previous),
            SwipeIntent::SwipeExit => Some(NavCommand::Exit),
            SwipeIntent::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Visual state the host applies while the gesture runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    /// Horizontal "follow the finger" offset in pixels.
    pub offset_x: f32,
    /// Whether the normal slide transition animation should run.
    pub animate: bool,
}

impl GestureFrame {
    const RESTING: GestureFrame = GestureFrame {
        offset_x: 0.0,
        animate: true,
    };
}

#[derive(Debug, Clone)]
struct ActiveGesture {
    origin: PointerSample,
    axis: Option<Axis>,
    samples: Vec<PointerSample>,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    active: Option<ActiveGesture>,
    frame: GestureFrame,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
            frame: GestureFrame::RESTING,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.active.as_ref().and_then(|g| g.axis)
    }

    pub fn frame(&self) -> GestureFrame {
        self.frame
    }

    /// Pointer went down. Any gesture still in flight is discarded.
    pub fn begin(&mut self, sample: PointerSample) {
        self.active = Some(ActiveGesture {
            origin: sample,
            axis: None,
            samples: vec![sample],
        });
        self.frame = GestureFrame::RESTING;
    }

    /// Pointer moved while down.
    pub fn update(&mut self, sample: PointerSample) -> GestureFrame {
        let Some(gesture) = self.active.as_mut() else {
            return self.frame;
        };
        gesture.samples.push(sample);

        let dx = sample.x - gesture.origin.x;
        let dy = sample.y - gesture.origin.y;

        if gesture.axis.is_none() && dx.abs().max(dy.abs()) >= self.config.tap_slop_px {
            let axis = if dx.abs() >= dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            debug!("gesture: axis locked to {:?}", axis);
            gesture.axis = Some(axis);
        }

        self.frame = match gesture.axis {
            Some(Axis::Horizontal) => GestureFrame {
                offset_x: dx,
                animate: false,
            },
            _ => GestureFrame {
                offset_x: 0.0,
                animate: true,
            },
        };
        self.frame
    }

    /// Pointer released. Emits the gesture's single intent and resets the
    /// visual offset.
    pub fn end(&mut self, sample: PointerSample) -> SwipeIntent {
        if self.active.is_some() {
            self.update(sample);
        }
        let Some(gesture) = self.active.take() else {
            return SwipeIntent::None;
        };
        self.frame = GestureFrame::RESTING;

        let intent = self.interpret(&gesture, sample);
        debug!("gesture: ended with {:?}", intent);
        intent
    }

    /// Drop the gesture without emitting anything.
    pub fn cancel(&mut self) {
        self.active = None;
        self.frame = GestureFrame::RESTING;
    }

    fn interpret(&self, gesture: &ActiveGesture, release: PointerSample) -> SwipeIntent {
        let dx = release.x - gesture.origin.x;
        let dy = release.y - gesture.origin.y;

        match gesture.axis {
            // Never left the tap slop: a click, not a swipe.
            None => SwipeIntent::None,
            Some(Axis::Vertical) => {
                if dy.abs() > self.config.exit_distance_px {
                    SwipeIntent::SwipeExit
                } else {
                    SwipeIntent::None
                }
            }
            Some(Axis::Horizontal) => {
                let velocity = self.release_velocity(gesture, release);
                let far_enough = dx.abs() > self.config.swipe_distance_px;
                let fast_enough = velocity.abs() > self.config.swipe_velocity_px_per_ms;
                if !(far_enough || fast_enough) {
                    return SwipeIntent::None;
                }
                let direction = if far_enough { dx } else { velocity };
                if direction < 0.0 {
                    SwipeIntent::SwipeLeft
                } else {
                    SwipeIntent::SwipeRight
                }
            }
        }
    }

    /// Horizontal pixels per millisecond over the last velocity window.
    fn release_velocity(&self, gesture: &ActiveGesture, release: PointerSample) -> f32 {
        let window_start = release.t_ms.saturating_sub(self.config.velocity_window_ms);
        let reference = gesture
            .samples
            .iter()
            .find(|s| s.t_ms >= window_start && s.t_ms < release.t_ms);

        match reference {
            Some(reference) => {
                let dt = (release.t_ms - reference.t_ms) as f32;
                (release.x - reference.x) / dt
            }
            None => 0.0,
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(points: &[(f32, f32, u64)]) -> (GestureRecognizer, SwipeIntent) {
        let mut recognizer = GestureRecognizer::default();
        let (first, rest) = points.split_first().unwrap();
        recognizer.begin(PointerSample::new(first.0, first.1, first.2));
        let (last, middle) = rest.split_last().unwrap();
        for &(x, y, t) in middle {
            recognizer.update(PointerSample::new(x, y, t));
        }
        let intent = recognizer.end(PointerSample::new(last.0, last.1, last.2));
        (recognizer, intent)
    }

    #[test]
    fn test_short_slow_drag_is_none() {
        let (recognizer, intent) =
            drag(&[(100.0, 100.0, 0), (110.0, 100.0, 200), (130.0, 101.0, 400)]);
        assert_eq!(intent, SwipeIntent::None);
        assert_eq!(recognizer.frame().offset_x, 0.0);
        assert!(recognizer.frame().animate);
    }

    #[test]
    fn test_long_drag_right_is_swipe_right() {
        let (_, intent) = drag(&[
            (100.0, 100.0, 0),
            (150.0, 102.0, 300),
            (250.0, 104.0, 600),
        ]);
        assert_eq!(intent, SwipeIntent::SwipeRight);
        assert_eq!(intent.command(), Some(NavCommand::Previous));
    }

    #[test]
    fn test_long_drag_left_is_swipe_left() {
        let (_, intent) = drag(&[(300.0, 100.0, 0), (250.0, 100.0, 300), (150.0, 100.0, 600)]);
        assert_eq!(intent, SwipeIntent::SwipeLeft);
        assert_eq!(intent.command(), Some(NavCommand::Next));
    }

    #[test]
    fn test_fast_flick_counts_as_swipe() {
        // 40px total, but covered in 40ms.
        let (_, intent) = drag(&[(200.0, 100.0, 0), (188.0, 100.0, 10), (160.0, 100.0, 50)]);
        assert_eq!(intent, SwipeIntent::SwipeLeft);
    }

    #[test]
    fn test_tap_never_navigates() {
        let (_, intent) = drag(&[(100.0, 100.0, 0), (103.0, 102.0, 5)]);
        assert_eq!(intent, SwipeIntent::None);
    }

    #[test]
    fn test_vertical_drag_exits() {
        let (_, intent) = drag(&[(100.0, 100.0, 0), (102.0, 115.0, 50), (104.0, 260.0, 300)]);
        assert_eq!(intent, SwipeIntent::SwipeExit);
        assert_eq!(intent.command(), Some(NavCommand::Exit));
    }

    #[test]
    fn test_vertical_lock_ignores_later_horizontal_motion() {
        let (_, intent) = drag(&[
            (100.0, 100.0, 0),
            (102.0, 115.0, 50),
            (400.0, 200.0, 200),
            (500.0, 250.0, 300),
        ]);
        assert_eq!(intent, SwipeIntent::SwipeExit);
    }

    #[test]
    fn test_horizontal_lock_ignores_later_vertical_motion() {
        let (_, intent) = drag(&[
            (100.0, 100.0, 0),
            (115.0, 102.0, 50),
            (115.0, 400.0, 300),
            (118.0, 450.0, 600),
        ]);
        assert_ne!(intent, SwipeIntent::SwipeExit);
        assert_eq!(intent, SwipeIntent::None);
    }

    #[test]
    fn test_short_vertical_drag_is_none() {
        let (_, intent) = drag(&[(100.0, 100.0, 0), (100.0, 140.0, 300), (100.0, 160.0, 600)]);
        assert_eq!(intent, SwipeIntent::None);
    }

    #[test]
    fn test_horizontal_follow_disables_animation() {
        let mut recognizer = GestureRecognizer::default();
        recognizer.begin(PointerSample::new(100.0, 100.0, 0));
        let frame = recognizer.update(PointerSample::new(60.0, 102.0, 50));
        assert_eq!(recognizer.axis(), Some(Axis::Horizontal));
        assert_eq!(frame.offset_x, -40.0);
        assert!(!frame.animate);

        recognizer.end(PointerSample::new(60.0, 102.0, 900));
        assert_eq!(recognizer.frame(), GestureFrame::RESTING);
        assert!(!recognizer.is_active());
    }

    #[test]
    fn test_update_without_begin_is_ignored() {
        let mut recognizer = GestureRecognizer::default();
        let frame = recognizer.update(PointerSample::new(500.0, 0.0, 10));
        assert_eq!(frame, GestureFrame::RESTING);
        assert_eq!(recognizer.end(PointerSample::new(900.0, 0.0, 20)), SwipeIntent::None);
    }
}
