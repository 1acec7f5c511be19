//! IAM Awakening entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use glam::Vec2;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use iam_awakening::notify::NOTIFICATION_TTL_MS;
    use iam_awakening::persistence::LocalStorage;
    use iam_awakening::platform::{
        Direction, KeyboardState, MobileButtons, sample, sample_directions, today,
    };
    use iam_awakening::quest::{NPCS, ZONES};
    use iam_awakening::sim::Effect;
    use iam_awakening::{GameLoop, LoopHandle, Notification, PlatformerStore, QuestStore, Tuning};

    /// Which game the page hosts
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Platformer,
        Quest,
    }

    /// Game instance holding all state
    struct Game {
        mode: Mode,
        platformer: PlatformerStore,
        quest: QuestStore,
        driver: GameLoop,
        keys: KeyboardState,
        buttons: MobileButtons,
        /// Last touch point of an ongoing drag on the quest map
        drag_from: Option<Vec2>,
        last_time: f64,
        play_time_acc: f64,
        notice_until: f64,
    }

    impl Game {
        fn new(mode: Mode) -> Self {
            let seed = js_sys::Date::now() as u64;
            let platformer = match LocalStorage::open() {
                Some(storage) => PlatformerStore::with_storage(Box::new(storage)),
                None => PlatformerStore::new(),
            };
            let quest = match LocalStorage::open() {
                Some(storage) => QuestStore::with_storage_or_else(Box::new(storage), || {
                    iam_awakening::quest::QuestState::new(seed)
                }),
                None => QuestStore::from_state(iam_awakening::quest::QuestState::new(seed)),
            };
            Self {
                mode,
                platformer,
                quest,
                driver: GameLoop::new(Tuning::default()),
                keys: KeyboardState::new(),
                buttons: MobileButtons::default(),
                drag_from: None,
                last_time: 0.0,
                play_time_acc: 0.0,
                notice_until: 0.0,
            }
        }

        fn dark_mode(&self) -> bool {
            match self.mode {
                Mode::Platformer => self.platformer.state().dark_mode,
                Mode::Quest => self.quest.state().dark_mode,
            }
        }

        fn update(&mut self, handle: LoopHandle, time: f64) {
            let dt = if self.last_time > 0.0 { time - self.last_time } else { 0.0 };
            self.last_time = time;

            let notes = match self.mode {
                Mode::Platformer => {
                    let input = sample(&self.keys, &self.buttons);
                    for effect in self.driver.frame(handle, &mut self.platformer, input, time) {
                        match effect {
                            Effect::AdvanceLevel { next } => log::info!("Advancing to level {}", next + 1),
                            Effect::Win => log::info!("Win screen shown"),
                            _ => {}
                        }
                    }
                    self.platformer.drain_notifications()
                }
                Mode::Quest => {
                    self.quest.move_player(&sample_directions(&self.keys, &self.buttons));
                    self.quest.collect_nearby_coins();
                    self.play_time_acc += dt;
                    if self.play_time_acc >= 1000.0 {
                        self.quest.add_play_time(self.play_time_acc / 1000.0);
                        self.play_time_acc = 0.0;
                    }
                    self.quest.drain_notifications()
                }
            };
            if let Some(last) = notes.last() {
                show_notification(last);
                self.notice_until = time + NOTIFICATION_TTL_MS;
            } else if self.notice_until > 0.0 && time >= self.notice_until {
                set_text("notification", "");
                self.notice_until = 0.0;
            }
        }

        fn update_hud(&self) {
            match self.mode {
                Mode::Platformer => {
                    let state = self.platformer.state();
                    set_text("hud-iam", &state.game_state.total_iam.to_string());
                    set_text(
                        "hud-level",
                        &format!("{}: {}", state.current_level_index + 1, state.current_level().name),
                    );
                    set_text(
                        "hud-coins",
                        &format!("{}/{}", state.collected_count(), state.current_coins.len()),
                    );
                    set_hidden("win-screen", !state.show_win_screen);
                }
                Mode::Quest => {
                    let state = self.quest.state();
                    set_text("hud-tokens", &state.iam_tokens.to_string());
                    set_text("hud-zone", state.current_zone().map(|z| z.name).unwrap_or_default());
                    set_text("hud-level", &state.stats.level.to_string());
                    set_text("hud-streak", &state.daily_login.streak.to_string());
                    set_hidden("daily-modal", state.daily_login.claimed);
                }
            }
        }

        fn toggle_dark_mode(&mut self) {
            match self.mode {
                Mode::Platformer => self.platformer.toggle_dark_mode(),
                Mode::Quest => self.quest.toggle_dark_mode(),
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn apply_dark_mode(on: bool) {
        if let Some(root) = document().and_then(|d| d.document_element()) {
            let _ = root.class_list().toggle_with_force("dark", on);
        }
    }

    fn show_notification(note: &Notification) {
        let text = match note.amount {
            Some(amount) => format!("{} {} +{} IAM", note.kind.icon(), note.message, amount),
            None => format!("{} {}", note.kind.icon(), note.message),
        };
        log::info!("{}", text);
        set_text("notification", &text);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("IAM Awakening starting...");

        let document = document().expect("no document");
        let mode = if document.get_element_by_id("quest-map").is_some() {
            Mode::Quest
        } else {
            Mode::Platformer
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let game = Rc::new(RefCell::new(Game::new(mode)));
        {
            let mut g = game.borrow_mut();
            g.platformer.watch(|s| s.dark_mode, |on| apply_dark_mode(*on));
            g.quest.watch(|s| s.dark_mode, |on| apply_dark_mode(*on));
            apply_dark_mode(g.dark_mode());
            if mode == Mode::Quest {
                g.quest.check_daily_login(today());
            }
        }

        setup_input_handlers(game.clone());
        setup_mobile_buttons(game.clone());
        setup_menu_buttons(game.clone());
        if mode == Mode::Quest {
            setup_quest_controls(game.clone());
        }
        setup_teardown(game.clone());

        let handle = game.borrow_mut().driver.start();
        request_animation_frame(game, handle);

        log::info!("IAM Awakening running ({:?})", mode);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                g.keys.key_down(&key);
                if g.mode == Mode::Quest && key.eq_ignore_ascii_case("e") {
                    let Some(npc) = g.quest.state().nearby_npc() else {
                        return;
                    };
                    if let Some(lines) = g.quest.interact_with_npc(npc.id) {
                        set_text("dialogue", &format!("{}: {}", npc.name, lines.join(" ")));
                    }
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.keys.clear();
                g.buttons = MobileButtons::default();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mobile_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };
        let bindings: [(&str, fn(&mut MobileButtons, bool)); 5] = [
            ("btn-left", |b, on| b.left = on),
            ("btn-right", |b, on| b.right = on),
            ("btn-jump", |b, on| b.jump = on),
            ("btn-up", |b, on| b.up = on),
            ("btn-down", |b, on| b.down = on),
        ];
        for (id, set) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (kind, pressed) in [
                ("touchstart", true),
                ("mousedown", true),
                ("touchend", false),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    set(&mut game.borrow_mut().buttons, pressed);
                });
                let _ = btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn on_click(document: &Document, id: &str, mut action: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| action());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        {
            let game = game.clone();
            on_click(&document, "dark-toggle", move || game.borrow_mut().toggle_dark_mode());
        }

        let level_count = game.borrow().platformer.state().levels.len();
        for index in 0..level_count {
            let game = game.clone();
            on_click(&document, &format!("level-btn-{index}"), move || {
                game.borrow_mut().platformer.set_current_level(index);
            });
        }

        {
            let game = game.clone();
            on_click(&document, "close-win-btn", move || game.borrow_mut().platformer.hide_win());
        }

        {
            // Restart supersedes the running loop with a fresh one
            let game = game.clone();
            on_click(&document, "restart-btn", move || {
                let handle = {
                    let mut g = game.borrow_mut();
                    g.driver.cancel();
                    match g.mode {
                        Mode::Platformer => g.platformer.reset_game(),
                        Mode::Quest => g.quest.reset_game(js_sys::Date::now() as u64),
                    }
                    g.driver.start()
                };
                request_animation_frame(game.clone(), handle);
            });
        }

        {
            let game = game.clone();
            on_click(&document, "claim-bonus-btn", move || game.borrow_mut().quest.claim_daily_bonus());
        }

        {
            let game = game.clone();
            on_click(&document, "quest-sidebar-btn", move || {
                let mut g = game.borrow_mut();
                g.quest.toggle_quest_sidebar();
                let open = g.quest.state().quest_sidebar_open;
                set_hidden("quest-sidebar", !open);
            });
        }

        {
            let game = game.clone();
            on_click(&document, "stats-btn", move || {
                let mut g = game.borrow_mut();
                g.quest.toggle_stats_panel();
                let open = g.quest.state().stats_panel_open;
                set_hidden("stats-panel", !open);
            });
        }

        for zone in &ZONES {
            let game = game.clone();
            on_click(&document, &format!("zone-btn-{}", zone.id), move || {
                game.borrow_mut().quest.set_current_zone(zone.id);
            });
        }
    }

    /// Direction pad taps, touch drag on the map and NPC clicks
    fn setup_quest_controls(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };

        for (name, direction) in [
            ("up", Direction::Up),
            ("down", Direction::Down),
            ("left", Direction::Left),
            ("right", Direction::Right),
        ] {
            let game = game.clone();
            on_click(&document, &format!("dpad-{name}"), move || {
                game.borrow_mut().quest.nudge_player(direction);
            });
        }

        for npc in &NPCS {
            let game = game.clone();
            on_click(&document, &format!("npc-{}", npc.id), move || {
                if let Some(lines) = game.borrow_mut().quest.interact_if_near(npc.id) {
                    set_text("dialogue", &format!("{}: {}", npc.name, lines.join(" ")));
                }
            });
        }

        let Some(map) = document.get_element_by_id("quest-map") else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                game.borrow_mut().drag_from = first_touch(&event);
            });
            let _ = map.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let (Some(from), Some(to)) = (g.drag_from, first_touch(&event)) else {
                    return;
                };
                g.quest.drag_player(to - from);
                g.drag_from = Some(to);
            });
            let _ = map.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().drag_from = None;
            });
            let _ = map.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn first_touch(event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().driver.cancel();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, handle: LoopHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, handle, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, handle: LoopHandle, time: f64) {
        {
            let mut g = game.borrow_mut();
            // A superseded chain simply stops rescheduling
            if !g.driver.is_live(handle) {
                return;
            }
            g.update(handle, time);
            g.update_hud();
        }

        request_animation_frame(game, handle);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("IAM Awakening (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the web version");

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use iam_awakening::platform::today;
    use iam_awakening::sim::{Effect, TickInput};
    use iam_awakening::{GameLoop, PlatformerStore, QuestStore, Tuning};

    /// Frame period used for the simulated clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 1200;

    /// Run the platformer holding right (hopping now and then), then a short quest session
    pub fn run(tuning_path: Option<String>) -> Result<(), Box<dyn Error>> {
        let tuning = match tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(&path)?)?
            }
            None => Tuning::default(),
        };

        let mut store = PlatformerStore::new();
        let mut driver = GameLoop::new(tuning);
        let handle = driver.start();

        for frame in 0..FRAMES {
            let input = TickInput {
                left: false,
                right: true,
                jump: frame % 45 == 0,
            };
            for effect in driver.frame(handle, &mut store, input, f64::from(frame) * FRAME_MS) {
                match effect {
                    Effect::CoinCollected { .. } => {}
                    other => log::info!("frame {}: {:?}", frame, other),
                }
            }
            for note in store.drain_notifications() {
                log::debug!("{} {}", note.kind.icon(), note.message);
            }
        }
        driver.cancel();

        let state = store.state();
        log::info!(
            "Platformer: level {}, x = {:.0}, {} IAM, {}/{} coins",
            state.current_level_index + 1,
            state.player.position.x,
            state.game_state.total_iam,
            state.collected_count(),
            state.current_coins.len()
        );

        let mut quest = QuestStore::new();
        quest.check_daily_login(today());
        quest.claim_daily_bonus();
        if let Some(lines) = quest.interact_with_npc("npc-guide") {
            log::info!("The Guide: {}", lines[0]);
        }
        quest.set_current_zone("crystal-caves");
        for note in quest.drain_notifications() {
            log::info!("{} {}", note.kind.icon(), note.message);
        }
        log::info!(
            "Quest: {} IAM, level {}, streak {}",
            quest.state().iam_tokens,
            quest.state().stats.level,
            quest.state().daily_login.streak
        );
        Ok(())
    }
}
