//! Sandbox state

use std::time::Duration;

use penspace::pointer::WidgetRef;
use penspace::{
    DrawingId, KeyboardStylus, SimpleWorld, StylusConfig, StylusRig, TaskQueue,
};
use tokio::runtime::Handle;
use tracing::info;

use crate::scene::{self, DONE_BUTTON, RESET_BUTTON, STYLUS_START, WRITE_BUTTON};

/// Delay of the mock translation service
const LOOKUP_DELAY: Duration = Duration::from_millis(800);

const MOCK_TRANSLATIONS: [&str; 5] = ["hola", "bonjour", "ciao", "hallo", "olá"];

/// Widgets the sandbox reacts to
#[derive(Debug, Clone, Copy)]
struct MenuButtons {
    write: Option<WidgetRef>,
    done: Option<WidgetRef>,
    reset: Option<WidgetRef>,
}

pub struct SimState {
    pub rig: StylusRig<SimpleWorld>,
    pub stylus: KeyboardStylus,
    lookups: TaskQueue<(DrawingId, String)>,
    buttons: MenuButtons,
    pub status_message: Option<String>,
}

impl SimState {
    pub fn new(config: StylusConfig, handle: Handle) -> Self {
        let (world, targets) = scene::build();
        let buttons = MenuButtons {
            write: targets.find_widget(WRITE_BUTTON),
            done: targets.find_widget(DONE_BUTTON),
            reset: targets.find_widget(RESET_BUTTON),
        };

        Self {
            rig: StylusRig::new(config, world).with_targets(targets),
            stylus: KeyboardStylus::at(STYLUS_START),
            lookups: TaskQueue::new(handle),
            buttons,
            status_message: None,
        }
    }

    /// Advance the rig one tick and react to what happened
    pub fn update(&mut self, dt: Duration) {
        self.rig.tick(&mut self.stylus, dt);

        // Read before widget handling; the Done button finalizes and queues
        // its own lookup.
        if let Some(id) = self.rig.finalized_this_tick() {
            self.queue_lookup(id);
        }
        if let Some(widget) = self.rig.activated_widget() {
            self.on_widget_activated(widget);
        }

        for (_, (id, text)) in self.lookups.drain() {
            if self.rig.set_recognized_text(id, text.as_str()) {
                self.status_message = Some(format!("{} reads \"{}\"", id, text));
            }
        }
    }

    fn on_widget_activated(&mut self, widget: WidgetRef) {
        let buttons = self.buttons;
        if Some(widget) == buttons.write {
            self.toggle_writer_mode();
        } else if Some(widget) == buttons.done {
            self.finalize();
            self.rig.set_drawing_enabled(false);
        } else if Some(widget) == buttons.reset {
            self.reset();
        }
    }

    pub fn toggle_writer_mode(&mut self) {
        let enabled = !self.rig.drawing_enabled();
        self.rig.set_drawing_enabled(enabled);
        self.status_message = Some(if enabled {
            "Writer mode: m toggles the pen, b finishes a word".to_string()
        } else {
            "Writer mode off: m near a word grabs it".to_string()
        });
    }

    pub fn toggle_ui_exclusive(&mut self) {
        let exclusive = self.rig.pointer_active();
        self.rig.set_ui_exclusive(exclusive);
        self.status_message = Some(
            if exclusive {
                "Pointer suspended"
            } else {
                "Pointer active"
            }
            .to_string(),
        );
    }

    pub fn finalize(&mut self) {
        match self.rig.finalize_current_drawing() {
            Some(id) => self.queue_lookup(id),
            None => self.status_message = Some("Nothing to finalize".to_string()),
        }
    }

    pub fn reset(&mut self) {
        self.lookups.cancel_all();
        self.rig.reset();
        self.stylus.reset();
        self.status_message = Some("Reset".to_string());
    }

    fn queue_lookup(&mut self, id: DrawingId) {
        let text = MOCK_TRANSLATIONS[(id.0 as usize) % MOCK_TRANSLATIONS.len()].to_string();
        self.lookups
            .spawn_after(LOOKUP_DELAY, async move { (id, text) });
        info!("Queued lookup for {}", id);
        self.status_message = Some(format!("Anchored {}, looking it up...", id));
    }

    pub fn pending_lookups(&self) -> usize {
        self.lookups.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn press(state: &mut SimState, code: KeyCode) {
        state.stylus.process_key(KeyEvent::new(code, KeyModifiers::empty()));
    }

    #[tokio::test]
    async fn test_writer_mode_toggle() {
        let mut state = SimState::new(StylusConfig::default(), Handle::current());
        assert!(!state.rig.drawing_enabled());
        state.toggle_writer_mode();
        assert!(state.rig.drawing_enabled());
        state.toggle_writer_mode();
        assert!(!state.rig.drawing_enabled());
    }

    #[tokio::test]
    async fn test_finalize_queues_lookup() {
        let mut state = SimState::new(StylusConfig::default(), Handle::current());
        state.rig.set_drawing_enabled(true);
        press(&mut state, KeyCode::Char('m'));
        for _ in 0..5 {
            state.update(ms(16));
        }
        assert!(state.rig.is_drawing());

        state.finalize();
        assert_eq!(state.rig.anchors().len(), 1);
        assert_eq!(state.pending_lookups(), 1);

        state.reset();
        assert_eq!(state.pending_lookups(), 0);
        assert!(state.rig.anchors().is_empty());
    }

    #[tokio::test]
    async fn test_done_button_queues_one_lookup() {
        let mut state = SimState::new(StylusConfig::default(), Handle::current());
        state.rig.set_drawing_enabled(true);

        press(&mut state, KeyCode::Char('m'));
        for _ in 0..5 {
            state.update(ms(16));
        }
        press(&mut state, KeyCode::Char('m'));
        for _ in 0..5 {
            state.update(ms(16));
        }
        assert!(!state.rig.is_drawing());

        // Raise the tip to the menu panel; the ray lands on Done
        for _ in 0..15 {
            press(&mut state, KeyCode::Up);
        }
        state.update(ms(16));
        assert_eq!(state.rig.hovered_widget(), state.buttons.done);

        press(&mut state, KeyCode::Char('f'));
        state.update(ms(16));
        state.update(ms(16));

        assert_eq!(state.rig.anchors().len(), 1);
        assert_eq!(state.pending_lookups(), 1);
        assert!(!state.rig.drawing_enabled());
    }
}
