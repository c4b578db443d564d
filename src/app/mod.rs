// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` wires the screens to the session, the API client and the
//! feedback presenter, and owns the navigation history. Every
//! navigation funnels through [`App::open_route`], which enforces the
//! session guard, lets the arriving screen consume its result flags,
//! and builds the screen state - so deep links, redirects from the
//! service, and in-app links all behave identically.

pub mod message;
pub mod paths;
mod screen;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::auth::LoginData;
use crate::api::ApiClient;
use crate::config::{self, Config};
use crate::diagnostics::{self, EventKind};
use crate::nav::{self, History, Route};
use crate::session::Session;
use crate::ui::feedback::{Presenter, Severity, Toast};
use crate::ui::screens::{
    bookings, forgot_password, login, register, rooms, settings, users,
};
use iced::{time, window, Element, Subscription, Task, Theme};
use std::time::Duration;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1000;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 560;

/// Delay between a successful login and the redirect, so the success
/// message is visible.
const LOGIN_REDIRECT_DELAY: Duration = Duration::from_millis(800);

/// Delay before returning to the login screen after registration or a
/// password reset.
const AUTH_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// The active screen and its state.
#[derive(Debug)]
pub(crate) enum ScreenState {
    Login(login::State),
    Register(register::State),
    ForgotPassword(forgot_password::State),
    UserDashboard,
    AdminDashboard,
    Rooms(rooms::State),
    Users(users::State),
    Bookings(bookings::State),
    Settings(settings::State),
}

impl ScreenState {
    fn screen(&self) -> Screen {
        match self {
            ScreenState::Login(_) => Screen::Login,
            ScreenState::Register(_) => Screen::Register,
            ScreenState::ForgotPassword(_) => Screen::ForgotPassword,
            ScreenState::UserDashboard => Screen::UserDashboard,
            ScreenState::AdminDashboard => Screen::AdminDashboard,
            ScreenState::Rooms(_) => Screen::Rooms,
            ScreenState::Users(_) => Screen::Users,
            ScreenState::Bookings(_) => Screen::Bookings,
            ScreenState::Settings(_) => Screen::Settings,
        }
    }
}

/// Root application state.
pub struct App {
    config: Config,
    api: ApiClient,
    session: Session,
    history: History,
    screen: ScreenState,
    feedback: Presenter,
    diagnostics: diagnostics::Handle,
}

/// Builds the window settings.
fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait while
    // only consuming them once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state: preferences, stored session, the
    /// API client, and the starting route.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (mut config, config_warning) = config::load();
        if let Some(server) = flags.server {
            config.server.base_url = Some(server);
        }

        let diagnostics = diagnostics::Handle::new();
        let (session, session_warning) = Session::load();

        let mut api = ApiClient::new(&config).expect("failed to build the HTTP client");
        api.set_auth_token(session.auth_token.clone());

        let mut presenter = Presenter::new();
        presenter.set_diagnostics(diagnostics.clone());

        let mut app = App {
            config,
            api,
            session,
            history: History::new(Route::new("/login")),
            screen: ScreenState::Login(login::State::default()),
            feedback: presenter,
            diagnostics,
        };

        if let Some(warning) = config_warning {
            app.feedback
                .show_toast(Toast::new(warning).severity(Severity::Warning));
        }
        if let Some(warning) = session_warning {
            app.diagnostics.record(EventKind::Persistence, warning.as_str());
            app.feedback
                .show_toast(Toast::new(warning).severity(Severity::Warning));
        }

        let start = match flags.start_route.as_deref() {
            Some(raw) => match Route::parse(raw) {
                Ok(route) => Some(route),
                Err(error) => {
                    app.diagnostics
                        .record(EventKind::Other, format!("bad start route: {error}"));
                    None
                }
            },
            None => None,
        };
        let target = start.unwrap_or_else(|| app.default_route());

        // Replace the placeholder history entry rather than stacking on
        // top of it.
        let task = app.open_route(target, false);
        (app, task)
    }

    /// Where a fresh launch lands: the stored role's home page, or the
    /// login screen without a session.
    fn default_route(&self) -> Route {
        match &self.session.profile {
            Some(profile) if self.session.is_authenticated() => {
                Route::new(profile.role.home_path())
            }
            _ => Route::new("/login"),
        }
    }

    /// Navigates to `route`, enforcing the session guard and letting
    /// the arriving screen consume its result flags.
    fn open_route(&mut self, route: Route, push: bool) -> Task<Message> {
        let Some(screen) = Screen::for_path(route.path()) else {
            self.diagnostics
                .record(EventKind::Other, format!("no screen for route {route}"));
            let fallback = self.default_route();
            return self.open_route(fallback, push);
        };

        if screen.requires_auth() && !self.session.is_authenticated() {
            self.diagnostics.record(
                EventKind::Other,
                format!("navigation to {} without a session", route.path()),
            );
            return self.open_route(Route::new("/login"), push);
        }
        if screen.admin_only() && !self.session.is_admin() {
            self.feedback.show_banner(
                "You do not have permission to access the admin panel.",
                Severity::Danger,
            );
            return self.open_route(Route::new("/user/dashboard"), push);
        }

        if push {
            self.history.push(route);
        } else {
            self.history.replace(route);
        }

        self.enter_screen(screen)
    }

    /// Builds the state for an arriving screen and kicks off its
    /// initial work.
    fn enter_screen(&mut self, screen: Screen) -> Task<Message> {
        match screen {
            Screen::Login => {
                let (state, task) = login::State::enter(&self.api);
                self.screen = ScreenState::Login(state);
                task.map(Message::Login)
            }
            Screen::Register => {
                self.screen = ScreenState::Register(register::State::new());
                Task::none()
            }
            Screen::ForgotPassword => {
                self.screen = ScreenState::ForgotPassword(forgot_password::State::new());
                Task::none()
            }
            Screen::UserDashboard => {
                self.screen = ScreenState::UserDashboard;
                Task::none()
            }
            Screen::AdminDashboard => {
                self.screen = ScreenState::AdminDashboard;
                Task::none()
            }
            Screen::Rooms => {
                // One-shot result flags are presented and stripped
                // before the screen reads its filters from the route.
                nav::consume(
                    &mut self.history,
                    &rooms::message_table(),
                    &mut self.feedback,
                );
                let (state, task) = rooms::State::enter(&self.api, self.history.current());
                self.screen = ScreenState::Rooms(state);
                task.map(Message::Rooms)
            }
            Screen::Users => {
                let (state, task) = users::State::enter(&self.api);
                self.screen = ScreenState::Users(state);
                task.map(Message::Users)
            }
            Screen::Bookings => {
                let (state, task) = bookings::State::enter(&self.api);
                self.screen = ScreenState::Bookings(state);
                task.map(Message::Bookings)
            }
            Screen::Settings => {
                self.screen = ScreenState::Settings(settings::State::new());
                Task::none()
            }
        }
    }

    /// Stores the session from a successful login and schedules the
    /// redirect to the role's landing page.
    fn complete_login(&mut self, data: LoginData) -> Task<Message> {
        let home = Route::new(data.profile.role.home_path());

        self.session.auth_token = Some(data.token);
        self.session.profile = Some(data.profile);
        if let Some(warning) = self.session.save() {
            self.diagnostics.record(EventKind::Persistence, warning.as_str());
            self.feedback
                .show_toast(Toast::new(warning).severity(Severity::Warning));
        }
        self.api.set_auth_token(self.session.auth_token.clone());

        delayed_navigate(home, LOGIN_REDIRECT_DELAY)
    }

    fn title(&self) -> String {
        format!("{} - RoomDesk", self.screen.screen().title())
    }

    fn theme(&self) -> Theme {
        if self.config.general.theme.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        // Only tick while something can actually expire.
        if self.feedback.has_live_instances() {
            subscriptions.push(time::every(Duration::from_millis(100)).map(Message::Tick));
        }

        // Resend-code countdowns run on a one-second tick that stops
        // the moment the countdown completes.
        match &self.screen {
            ScreenState::Register(state) if state.countdown_active() => {
                subscriptions.push(
                    time::every(Duration::from_secs(1))
                        .map(|_| Message::Register(register::Message::CountdownTick)),
                );
            }
            ScreenState::ForgotPassword(state) if state.countdown_active() => {
                subscriptions.push(
                    time::every(Duration::from_secs(1))
                        .map(|_| Message::ForgotPassword(forgot_password::Message::CountdownTick)),
                );
            }
            _ => {}
        }

        Subscription::batch(subscriptions)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Screen messages are applied only while their screen is
            // current; results landing after a navigation are dropped.
            Message::Login(msg) => {
                let action = if let ScreenState::Login(state) = &mut self.screen {
                    Some(login::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(login::Action::Run(task)) => task.map(Message::Login),
                    Some(login::Action::Navigate(route)) => self.open_route(route, true),
                    Some(login::Action::LoggedIn(data)) => self.complete_login(*data),
                    Some(login::Action::None) | None => Task::none(),
                }
            }
            Message::Register(msg) => {
                let action = if let ScreenState::Register(state) = &mut self.screen {
                    Some(register::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(register::Action::Run(task)) => task.map(Message::Register),
                    Some(register::Action::Navigate(route)) => self.open_route(route, true),
                    Some(register::Action::Registered) => {
                        delayed_navigate(Route::new("/login"), AUTH_REDIRECT_DELAY)
                    }
                    Some(register::Action::None) | None => Task::none(),
                }
            }
            Message::ForgotPassword(msg) => {
                let action = if let ScreenState::ForgotPassword(state) = &mut self.screen {
                    Some(forgot_password::update(
                        state,
                        &self.api,
                        &mut self.feedback,
                        msg,
                    ))
                } else {
                    None
                };
                match action {
                    Some(forgot_password::Action::Run(task)) => task.map(Message::ForgotPassword),
                    Some(forgot_password::Action::Navigate(route)) => self.open_route(route, true),
                    Some(forgot_password::Action::ResetDone) => {
                        delayed_navigate(Route::new("/login"), AUTH_REDIRECT_DELAY)
                    }
                    Some(forgot_password::Action::None) | None => Task::none(),
                }
            }
            Message::Rooms(msg) => {
                let action = if let ScreenState::Rooms(state) = &mut self.screen {
                    Some(rooms::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(rooms::Action::Run(task)) => task.map(Message::Rooms),
                    Some(rooms::Action::Navigate(route)) => self.open_route(route, true),
                    Some(rooms::Action::None) | None => Task::none(),
                }
            }
            Message::Users(msg) => {
                let action = if let ScreenState::Users(state) = &mut self.screen {
                    Some(users::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(users::Action::Run(task)) => task.map(Message::Users),
                    Some(users::Action::None) | None => Task::none(),
                }
            }
            Message::Bookings(msg) => {
                let action = if let ScreenState::Bookings(state) = &mut self.screen {
                    Some(bookings::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(bookings::Action::Run(task)) => task.map(Message::Bookings),
                    Some(bookings::Action::None) | None => Task::none(),
                }
            }
            Message::Settings(msg) => {
                let action = if let ScreenState::Settings(state) = &mut self.screen {
                    Some(settings::update(state, &self.api, &mut self.feedback, msg))
                } else {
                    None
                };
                match action {
                    Some(settings::Action::Run(task)) => task.map(Message::Settings),
                    Some(settings::Action::None) | None => Task::none(),
                }
            }
            Message::Feedback(msg) => {
                self.feedback.handle_message(&msg);
                Task::none()
            }
            Message::Navigate(route) => self.open_route(route, true),
            Message::Logout => {
                self.session.clear();
                if let Some(warning) = self.session.save() {
                    self.diagnostics.record(EventKind::Persistence, warning.as_str());
                }
                self.api.set_auth_token(None);
                self.open_route(Route::new("/login"), true)
            }
            Message::Tick(_instant) => {
                self.feedback.tick();
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

/// Navigates after a fixed delay, so a success message has time to be
/// seen before the screen changes.
fn delayed_navigate(route: Route, delay: Duration) -> Task<Message> {
    Task::perform(
        async move {
            tokio::time::sleep(delay).await;
            route
        },
        Message::Navigate,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, UserProfile};
    use tempfile::tempdir;

    fn with_temp_dirs<F>(test: F)
    where
        F: FnOnce(),
    {
        // App construction reads the config/session env overrides.
        let _guard = paths::ENV_LOCK.lock().unwrap();
        let data_dir = tempdir().expect("data dir");
        let config_dir = tempdir().expect("config dir");
        std::env::set_var(paths::ENV_DATA_DIR, data_dir.path());
        std::env::set_var(paths::ENV_CONFIG_DIR, config_dir.path());

        test();

        std::env::remove_var(paths::ENV_DATA_DIR);
        std::env::remove_var(paths::ENV_CONFIG_DIR);
    }

    fn admin_session() -> Session {
        Session {
            auth_token: Some("tok".into()),
            profile: Some(UserProfile {
                user_id: 1,
                username: "alice".into(),
                avatar: None,
                role: Role::Admin,
                email: "alice@example.com".into(),
            }),
        }
    }

    fn user_session() -> Session {
        let mut session = admin_session();
        if let Some(profile) = session.profile.as_mut() {
            profile.role = Role::User;
        }
        session
    }

    #[test]
    fn fresh_launch_without_a_session_lands_on_login() {
        with_temp_dirs(|| {
            let (app, _task) = App::new(Flags::default());
            assert_eq!(app.screen.screen(), Screen::Login);
            assert_eq!(app.history.current().path(), "/login");
            assert_eq!(app.history.len(), 1);
        });
    }

    #[test]
    fn stored_admin_session_lands_on_the_admin_dashboard() {
        with_temp_dirs(|| {
            assert!(admin_session().save().is_none());
            let (app, _task) = App::new(Flags::default());
            assert_eq!(app.screen.screen(), Screen::AdminDashboard);
            assert_eq!(app.history.current().path(), "/admin");
        });
    }

    #[test]
    fn deep_link_to_admin_without_a_session_falls_back_to_login() {
        with_temp_dirs(|| {
            let (app, _task) = App::new(Flags {
                start_route: Some("/admin/rooms".into()),
                ..Flags::default()
            });
            assert_eq!(app.screen.screen(), Screen::Login);
            assert!(!app.diagnostics.is_empty());
        });
    }

    #[test]
    fn non_admin_is_bounced_from_the_admin_panel_with_a_banner() {
        with_temp_dirs(|| {
            assert!(user_session().save().is_none());
            let (app, _task) = App::new(Flags {
                start_route: Some("/admin/users".into()),
                ..Flags::default()
            });
            assert_eq!(app.screen.screen(), Screen::UserDashboard);
            assert!(app
                .feedback
                .banner(crate::ui::feedback::DEFAULT_REGION)
                .unwrap()
                .text()
                .contains("permission"));
        });
    }

    #[test]
    fn rooms_deep_link_with_a_flag_shows_the_banner_and_cleans_the_route() {
        with_temp_dirs(|| {
            assert!(admin_session().save().is_none());
            let (app, _task) = App::new(Flags {
                start_route: Some("/admin/rooms?success-add&location=HQ".into()),
                ..Flags::default()
            });

            assert_eq!(app.screen.screen(), Screen::Rooms);
            assert_eq!(
                app.feedback.banner(crate::ui::feedback::DEFAULT_REGION).unwrap().text(),
                "Meeting room was successfully added."
            );
            assert_eq!(
                app.history.current().to_string(),
                "/admin/rooms?location=HQ"
            );
            assert_eq!(app.history.len(), 1);
        });
    }

    #[test]
    fn logout_clears_the_session_and_returns_to_login() {
        with_temp_dirs(|| {
            assert!(admin_session().save().is_none());
            let (mut app, _task) = App::new(Flags::default());
            assert_eq!(app.screen.screen(), Screen::AdminDashboard);

            let _ = app.update(Message::Logout);

            assert_eq!(app.screen.screen(), Screen::Login);
            assert!(!app.session.is_authenticated());
            let (stored, _warning) = Session::load();
            assert!(!stored.is_authenticated());
        });
    }

    #[test]
    fn stale_screen_messages_are_dropped() {
        with_temp_dirs(|| {
            let (mut app, _task) = App::new(Flags::default());
            assert_eq!(app.screen.screen(), Screen::Login);

            // A settings result arriving while the login screen is
            // current must be a no-op.
            let _ = app.update(Message::Settings(settings::Message::BackupFinished(Ok(()))));
            assert_eq!(app.feedback.toast_count(), 0);
        });
    }

    #[test]
    fn unknown_start_route_falls_back_and_records_a_diagnostic() {
        with_temp_dirs(|| {
            let (app, _task) = App::new(Flags {
                start_route: Some("/no/such/page".into()),
                ..Flags::default()
            });
            assert_eq!(app.screen.screen(), Screen::Login);
            assert!(!app.diagnostics.is_empty());
        });
    }

    #[test]
    fn navigate_message_pushes_a_history_entry() {
        with_temp_dirs(|| {
            let (mut app, _task) = App::new(Flags::default());
            let _ = app.update(Message::Navigate(Route::new("/register")));

            assert_eq!(app.screen.screen(), Screen::Register);
            assert_eq!(app.history.len(), 2);
        });
    }

    #[test]
    fn tick_message_advances_feedback_timers() {
        with_temp_dirs(|| {
            let (mut app, _task) = App::new(Flags::default());
            app.feedback
                .show_toast(Toast::new("gone").delay(Duration::ZERO));
            assert_eq!(app.feedback.toast_count(), 1);

            let _ = app.update(Message::Tick(std::time::Instant::now()));
            assert_eq!(app.feedback.toast_count(), 0);
        });
    }

    #[test]
    fn server_flag_overrides_the_configured_base_url() {
        with_temp_dirs(|| {
            let (app, _task) = App::new(Flags {
                server: Some("https://rooms.example.com".into()),
                ..Flags::default()
            });
            assert_eq!(app.api.base_url(), "https://rooms.example.com");
        });
    }
}
