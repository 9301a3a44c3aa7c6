use std::time::{Duration, Instant};

pub const SLIDE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: usize,
    pub src: String,
}

impl Slide {
    /// The fixed slide set. Sources are placeholders hosted elsewhere and are
    /// only ever displayed, never fetched.
    pub fn fixed() -> Vec<Slide> {
        (0..SLIDE_COUNT)
            .map(|id| Slide {
                id,
                src: format!("https://picsum.photos/1200/600?random={}", id + 1),
            })
            .collect()
    }

    pub fn label(&self) -> String {
        format!("Slide {}", self.id + 1)
    }
}

/// Recurring schedule for automatic advancement. At most one schedule is
/// active; starting again replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    interval: Duration,
    due: Option<Instant>,
}

impl Autoplay {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        self.due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.due = None;
    }

    /// Returns `true` once per elapsed interval. Missed intervals collapse
    /// into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                let next = due + self.interval;
                self.due = Some(if next <= now {
                    now + self.interval
                } else {
                    next
                });
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Slide>,
    current: usize,
    autoplay: Autoplay,
    hovered: bool,
}

impl Carousel {
    pub fn new(interval: Duration) -> Self {
        Self {
            slides: Slide::fixed(),
            current: 0,
            autoplay: Autoplay::new(interval),
            hovered: false,
        }
    }

    pub fn init(&mut self, now: Instant) {
        self.autoplay.start(now);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.slides.len();
    }

    pub fn prev(&mut self) {
        let len = self.slides.len();
        self.current = (self.current + len - 1) % len;
    }

    /// Indices come from the rendered markers; anything else is ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.autoplay.stop();
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.hovered = false;
        self.autoplay.start(now);
    }

    /// Advances when autoplay is due. Returns whether the index moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.autoplay.poll(now) {
            self.next();
            return true;
        }
        false
    }

    pub fn teardown(&mut self) {
        self.autoplay.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(4000);

    fn carousel() -> Carousel {
        Carousel::new(INTERVAL)
    }

    #[test]
    fn starts_on_first_slide_without_timer() {
        let carousel = carousel();

        assert_eq!(0, carousel.current());
        assert!(!carousel.is_autoplaying());
        assert_eq!(SLIDE_COUNT, carousel.slides().len());
    }

    #[test]
    fn slides_use_seeded_sources() {
        let slides = Slide::fixed();

        assert_eq!("https://picsum.photos/1200/600?random=1", slides[0].src);
        assert_eq!("https://picsum.photos/1200/600?random=4", slides[3].src);
        assert_eq!("Slide 4", slides[3].label());
    }

    #[test]
    fn next_and_prev_are_inverse_for_every_index() {
        for start in 0..SLIDE_COUNT {
            let mut carousel = carousel();
            carousel.go_to(start);

            carousel.next();
            carousel.prev();
            assert_eq!(start, carousel.current());

            carousel.prev();
            carousel.next();
            assert_eq!(start, carousel.current());
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut carousel = carousel();

        carousel.prev();
        assert_eq!(SLIDE_COUNT - 1, carousel.current());

        carousel.next();
        assert_eq!(0, carousel.current());
    }

    #[test]
    fn go_to_sets_index_regardless_of_prior_state() {
        let mut carousel = carousel();

        for prior in 0..SLIDE_COUNT {
            for target in 0..SLIDE_COUNT {
                carousel.go_to(prior);
                carousel.go_to(target);
                assert_eq!(target, carousel.current());
            }
        }
    }

    #[test]
    fn go_to_ignores_unknown_index() {
        let mut carousel = carousel();
        carousel.go_to(2);

        carousel.go_to(SLIDE_COUNT);

        assert_eq!(2, carousel.current());
    }

    #[test]
    fn autoplay_advances_on_interval() {
        let start = Instant::now();
        let mut carousel = carousel();
        carousel.init(start);

        assert!(!carousel.tick(start + Duration::from_millis(3999)));
        assert!(carousel.tick(start + INTERVAL));
        assert_eq!(1, carousel.current());
        assert!(carousel.tick(start + INTERVAL * 2));
        assert_eq!(2, carousel.current());
    }

    #[test]
    fn hover_pauses_autoplay_for_any_duration() {
        let start = Instant::now();
        let mut carousel = carousel();
        carousel.init(start);

        carousel.pointer_enter();
        for seconds in [1, 4, 8, 60, 3600] {
            assert!(!carousel.tick(start + Duration::from_secs(seconds)));
        }
        assert_eq!(0, carousel.current());
        assert!(carousel.is_hovered());
    }

    #[test]
    fn leaving_resumes_on_the_same_interval() {
        let start = Instant::now();
        let mut carousel = carousel();
        carousel.init(start);
        carousel.pointer_enter();

        let left = start + Duration::from_secs(10);
        carousel.pointer_leave(left);

        assert!(!carousel.tick(left + Duration::from_millis(3999)));
        assert!(carousel.tick(left + INTERVAL));
        assert_eq!(1, carousel.current());
    }

    #[test]
    fn restarting_replaces_the_schedule() {
        let start = Instant::now();
        let mut autoplay = Autoplay::new(INTERVAL);

        autoplay.start(start);
        autoplay.start(start + Duration::from_secs(2));

        assert!(!autoplay.poll(start + INTERVAL));
        assert!(autoplay.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn missed_intervals_fire_once() {
        let start = Instant::now();
        let mut autoplay = Autoplay::new(INTERVAL);
        autoplay.start(start);

        let late = start + INTERVAL * 5;
        assert!(autoplay.poll(late));
        assert!(!autoplay.poll(late));
        assert!(autoplay.poll(late + INTERVAL));
    }

    #[test]
    fn teardown_clears_timer() {
        let start = Instant::now();
        let mut carousel = carousel();
        carousel.init(start);

        carousel.teardown();

        assert!(!carousel.is_autoplaying());
        assert!(!carousel.tick(start + INTERVAL * 3));
    }
}
