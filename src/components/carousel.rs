use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use super::Component;
use crate::{
    action::Action,
    app::AppState,
    carousel::{BehaviorRuntime, Carousel, PointerRuntime, RuntimeError, SLIDE_COUNT},
    config::Settings,
    layout,
    model::ViewMode,
    tui::{Frame, PointerCapture},
    utils::send_through_channel,
};

const FADE: Duration = Duration::from_millis(300);
const PALETTE: [Color; SLIDE_COUNT] = [Color::Blue, Color::Magenta, Color::Cyan, Color::Green];
const MARKER_WIDTH: u16 = 3;
const MARKER_GAP: u16 = 1;

struct Live {
    carousel: Carousel,
    changed_at: Option<Instant>,
}

impl Live {
    fn mount(interval: Duration, now: Instant) -> Self {
        let mut carousel = Carousel::new(interval);
        carousel.init(now);
        Self {
            carousel,
            changed_at: None,
        }
    }

    /// Runs `f` and starts the fade when the visible slide changed.
    fn apply(&mut self, now: Instant, f: impl FnOnce(&mut Carousel)) {
        let before = self.carousel.current();
        f(&mut self.carousel);
        if self.carousel.current() != before {
            self.changed_at = Some(now);
        }
    }

    fn fading(&self, now: Instant) -> bool {
        self.changed_at
            .is_some_and(|changed| now.saturating_duration_since(changed) < FADE)
    }
}

enum Region {
    Placeholder,
    Live(Live),
}

#[derive(Default)]
struct Controls {
    prev: Rect,
    next: Rect,
    markers: Vec<Rect>,
}

/// The gallery region. Until the pointer runtime has started it is a blank
/// block of the same size as the live gallery; if the runtime never comes up
/// it simply stays that way.
pub struct CarouselRegion {
    command_tx: Option<UnboundedSender<Action>>,
    runtime: Arc<dyn BehaviorRuntime>,
    interval: Duration,
    region: Region,
    starting: Option<JoinHandle<()>>,
    area: Rect,
    controls: Controls,
}

impl CarouselRegion {
    pub fn new(pointer: PointerCapture) -> Self {
        Self::with_runtime(Arc::new(PointerRuntime::new(pointer)))
    }

    pub fn with_runtime(runtime: Arc<dyn BehaviorRuntime>) -> Self {
        Self {
            command_tx: None,
            runtime,
            interval: Duration::from_millis(Settings::default().autoplay_interval_ms),
            region: Region::Placeholder,
            starting: None,
            area: Rect::default(),
            controls: Controls::default(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.region, Region::Live(_))
    }

    fn start_runtime(&mut self) {
        if self.starting.is_some() {
            return;
        }

        let start = self.runtime.start();
        let channel = self.command_tx.clone();
        self.starting = Some(tokio::spawn(async move {
            let action = match start.await {
                Ok(()) => Action::CarouselReady,
                Err(e) => Self::unavailable(e),
            };
            send_through_channel(&channel, action);
        }));
    }

    fn unavailable(error: RuntimeError) -> Action {
        log::warn!("Carousel runtime failed to start, keeping placeholder: {error}");
        Action::CarouselUnavailable(error.to_string())
    }

    fn mount(&mut self) {
        if let Region::Placeholder = self.region {
            log::info!("Carousel mounted");
            self.region = Region::Live(Live::mount(self.interval, Instant::now()));
        }
    }

    fn teardown(&mut self) {
        if let Some(starting) = self.starting.take() {
            starting.abort();
        }
        if let Region::Live(live) = &mut self.region {
            live.carousel.teardown();
        }
    }

    fn draw_placeholder(f: &mut Frame<'_>, area: Rect) {
        f.render_widget(Block::new().style(Style::new().bg(Color::DarkGray)), area);
    }

    fn draw_live(f: &mut Frame<'_>, area: Rect, live: &Live, controls: &mut Controls) {
        let carousel = &live.carousel;
        let slide = carousel.current_slide();
        let mut picture = Style::new().fg(Color::White).bg(PALETTE[slide.id]);
        if live.fading(Instant::now()) {
            picture = picture.add_modifier(Modifier::DIM);
        }

        let mut block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!("{} of {}", slide.label(), carousel.slides().len()));
        if !carousel.is_autoplaying() {
            block = block.title(Line::from("paused").right_aligned());
        }
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Block::new().style(picture), inner);

        let middle = inner.y + inner.height / 2;
        let caption = Paragraph::new(vec![
            Line::from(slide.label()).bold(),
            Line::from(slide.src.as_str()),
        ])
        .alignment(Alignment::Center)
        .style(picture);
        let caption_area = Rect::new(
            inner.x,
            middle.saturating_sub(1),
            inner.width,
            inner.height.min(2),
        );
        f.render_widget(caption, caption_area);

        if inner.width < 8 || inner.height < 3 {
            *controls = Controls::default();
            return;
        }

        let button = Style::new().black().on_white().bold();
        controls.prev = Rect::new(inner.x + 1, middle, 3, 1);
        controls.next = Rect::new(inner.right() - 4, middle, 3, 1);
        f.render_widget(Paragraph::new(" ‹ ").style(button), controls.prev);
        f.render_widget(Paragraph::new(" › ").style(button), controls.next);

        let count = carousel.slides().len() as u16;
        let total = count * MARKER_WIDTH + (count - 1) * MARKER_GAP;
        let start = inner.x + inner.width.saturating_sub(total) / 2;
        let row = inner.bottom() - 1;
        controls.markers = (0..count)
            .map(|i| {
                let x = start + i * (MARKER_WIDTH + MARKER_GAP);
                Rect::new(x, row, MARKER_WIDTH, 1)
            })
            .filter(|rect| rect.right() <= inner.right())
            .collect();
        for (i, rect) in controls.markers.iter().enumerate() {
            let marker = if i == carousel.current() {
                Paragraph::new("━━━").style(Style::new().white().bold())
            } else {
                Paragraph::new(" • ").style(Style::new().gray())
            };
            f.render_widget(marker, *rect);
        }
    }
}

impl Drop for CarouselRegion {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Component for CarouselRegion {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.command_tx = Some(tx);
        Ok(())
    }

    fn register_config_handler(&mut self, config: Settings) -> Result<()> {
        self.interval = Duration::from_millis(config.autoplay_interval_ms);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        let Region::Live(live) = &mut self.region else {
            return Ok(None);
        };
        if state.view() != ViewMode::List {
            return Ok(None);
        }

        let now = Instant::now();
        match key.code {
            KeyCode::Left => live.apply(now, Carousel::prev),
            KeyCode::Right => live.apply(now, Carousel::next),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                live.apply(now, |carousel| carousel.go_to(index))
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(
        &mut self,
        mouse: MouseEvent,
        _state: &AppState,
    ) -> Result<Option<Action>> {
        let Region::Live(live) = &mut self.region else {
            return Ok(None);
        };

        let now = Instant::now();
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let inside = self.area.contains(position);
                if inside && !live.carousel.is_hovered() {
                    live.carousel.pointer_enter();
                } else if !inside && live.carousel.is_hovered() {
                    live.carousel.pointer_leave(now);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.controls.prev.contains(position) {
                    live.apply(now, Carousel::prev);
                } else if self.controls.next.contains(position) {
                    live.apply(now, Carousel::next);
                } else if let Some(index) = self
                    .controls
                    .markers
                    .iter()
                    .position(|rect| rect.contains(position))
                {
                    live.apply(now, |carousel| carousel.go_to(index));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, state: &AppState, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ClientReady if state.is_interactive() => self.start_runtime(),
            Action::Resume if self.is_live() => {
                self.starting = None;
                self.start_runtime();
            }
            Action::CarouselReady => {
                self.starting = None;
                self.mount();
            }
            Action::CarouselUnavailable(reason) => {
                self.starting = None;
                log::debug!("Carousel stays static: {reason}");
            }
            Action::Tick => {
                if let Region::Live(live) = &mut self.region {
                    let now = Instant::now();
                    live.apply(now, |carousel| {
                        carousel.tick(now);
                    });
                }
            }
            Action::Quit => self.teardown(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect, _state: &AppState) -> Result<()> {
        let area = layout::page(area).carousel;
        self.area = area;

        match &self.region {
            Region::Placeholder => {
                self.controls = Controls::default();
                Self::draw_placeholder(f, area);
            }
            Region::Live(live) => Self::draw_live(f, area, live, &mut self.controls),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use futures::{future::BoxFuture, FutureExt};
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        components::testing::{render, screen_contains},
    };

    struct RejectingRuntime;

    impl BehaviorRuntime for RejectingRuntime {
        fn start(&self) -> BoxFuture<'static, Result<(), RuntimeError>> {
            async { Err(RuntimeError::PointerUnavailable) }.boxed()
        }
    }

    struct ReadyRuntime;

    impl BehaviorRuntime for ReadyRuntime {
        fn start(&self) -> BoxFuture<'static, Result<(), RuntimeError>> {
            async { Ok(()) }.boxed()
        }
    }

    fn interactive() -> AppState {
        let mut state = AppState::default();
        state.mark_interactive();
        state
    }

    fn live() -> CarouselRegion {
        let mut region = CarouselRegion::with_runtime(Arc::new(ReadyRuntime));
        region.update(&interactive(), Action::CarouselReady).unwrap();
        render(&mut region, &interactive(), 100, 40);
        region
    }

    fn current(region: &CarouselRegion) -> usize {
        match &region.region {
            Region::Live(live) => live.carousel.current(),
            Region::Placeholder => panic!("carousel is not mounted"),
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn placeholder_before_ready() {
        let mut region = CarouselRegion::with_runtime(Arc::new(ReadyRuntime));

        let lines = render(&mut region, &AppState::default(), 100, 40);

        assert!(!region.is_live());
        assert!(!screen_contains(&lines, "Slide"));
    }

    #[test]
    fn waits_for_interactivity() {
        let mut region = CarouselRegion::with_runtime(Arc::new(ReadyRuntime));

        region
            .update(&AppState::default(), Action::ClientReady)
            .unwrap();

        assert!(region.starting.is_none());
    }

    #[tokio::test]
    async fn rejected_runtime_keeps_placeholder() {
        let mut region = CarouselRegion::with_runtime(Arc::new(RejectingRuntime));
        let (tx, mut rx) = mpsc::unbounded_channel();
        region.register_action_handler(tx).unwrap();
        let state = interactive();

        region.update(&state, Action::ClientReady).unwrap();
        let action = rx.recv().await.unwrap();
        assert!(matches!(action, Action::CarouselUnavailable(_)));
        region.update(&state, action).unwrap();

        let lines = render(&mut region, &state, 100, 40);
        assert!(!region.is_live());
        assert!(!screen_contains(&lines, "Slide"));
    }

    #[tokio::test]
    async fn ready_runtime_mounts_gallery() {
        let mut region = CarouselRegion::with_runtime(Arc::new(ReadyRuntime));
        let (tx, mut rx) = mpsc::unbounded_channel();
        region.register_action_handler(tx).unwrap();
        let state = interactive();

        region.update(&state, Action::ClientReady).unwrap();
        let action = rx.recv().await.unwrap();
        assert_eq!(Action::CarouselReady, action);
        region.update(&state, action).unwrap();

        let lines = render(&mut region, &state, 100, 40);
        assert!(region.is_live());
        assert!(screen_contains(&lines, "Slide 1 of 4"));
        assert!(screen_contains(&lines, "https://picsum.photos/1200/600?random=1"));
    }

    #[test]
    fn arrow_keys_move_between_slides() {
        let mut region = live();
        let state = interactive();

        region
            .handle_key_event(KeyEvent::from(KeyCode::Left), &state)
            .unwrap();
        assert_eq!(SLIDE_COUNT - 1, current(&region));

        region
            .handle_key_event(KeyEvent::from(KeyCode::Right), &state)
            .unwrap();
        region
            .handle_key_event(KeyEvent::from(KeyCode::Char('3')), &state)
            .unwrap();
        assert_eq!(2, current(&region));
    }

    #[test]
    fn keys_ignored_outside_list_view() {
        let mut region = live();
        let mut state = interactive();
        state.set_view(ViewMode::Form);

        region
            .handle_key_event(KeyEvent::from(KeyCode::Right), &state)
            .unwrap();

        assert_eq!(0, current(&region));
    }

    #[test]
    fn clicking_controls() {
        let mut region = live();
        let state = interactive();
        let click = MouseEventKind::Down(MouseButton::Left);

        let next = region.controls.next;
        region
            .handle_mouse_event(mouse(click, next.x, next.y), &state)
            .unwrap();
        assert_eq!(1, current(&region));

        let marker = region.controls.markers[3];
        region
            .handle_mouse_event(mouse(click, marker.x + 1, marker.y), &state)
            .unwrap();
        assert_eq!(3, current(&region));

        let prev = region.controls.prev;
        region
            .handle_mouse_event(mouse(click, prev.x, prev.y), &state)
            .unwrap();
        assert_eq!(2, current(&region));
    }

    #[test]
    fn hovering_pauses_and_leaving_resumes() {
        let mut region = live();
        let state = interactive();
        let inside = region.area;

        region
            .handle_mouse_event(mouse(MouseEventKind::Moved, inside.x + 2, inside.y + 2), &state)
            .unwrap();
        let Region::Live(live) = &region.region else {
            panic!("carousel is not mounted");
        };
        assert!(live.carousel.is_hovered());
        assert!(!live.carousel.is_autoplaying());

        region
            .handle_mouse_event(mouse(MouseEventKind::Moved, 0, 39), &state)
            .unwrap();
        let Region::Live(live) = &region.region else {
            panic!("carousel is not mounted");
        };
        assert!(!live.carousel.is_hovered());
        assert!(live.carousel.is_autoplaying());
    }

    #[test]
    fn hovered_gallery_shows_paused() {
        let mut region = live();
        let state = interactive();
        let inside = region.area;

        assert!(!screen_contains(&render(&mut region, &state, 100, 40), "paused"));

        region
            .handle_mouse_event(mouse(MouseEventKind::Moved, inside.x + 2, inside.y + 2), &state)
            .unwrap();

        assert!(screen_contains(&render(&mut region, &state, 100, 40), "paused"));
    }

    #[test]
    fn quitting_clears_autoplay() {
        let mut region = live();

        region.update(&interactive(), Action::Quit).unwrap();

        let Region::Live(live) = &region.region else {
            panic!("carousel is not mounted");
        };
        assert!(!live.carousel.is_autoplaying());
    }

    #[test]
    fn only_active_marker_is_highlighted() {
        let mut region = live();
        let state = interactive();

        region
            .handle_key_event(KeyEvent::from(KeyCode::Char('2')), &state)
            .unwrap();
        let lines = render(&mut region, &state, 100, 40);

        let row = region.controls.markers[0].y as usize;
        assert_eq!(1, lines[row].matches("━━━").count());
        assert_eq!(3, lines[row].matches(" • ").count());
        assert!(screen_contains(&lines, "Slide 2 of 4"));
    }
}
