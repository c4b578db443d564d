// SPDX-License-Identifier: MPL-2.0
//! Account registration screen.
//!
//! Registration needs an emailed verification code. The "send code"
//! button validates the address first, then enters a 60 s cooldown
//! driven by a one-second tick; the tick subscription stops the moment
//! the countdown reaches zero. Submission is refused until a code has
//! been requested. Picking the `Admin` role reveals the admin-key field
//! the service demands for privileged accounts.

use crate::api::auth::{self, RegisterRequest, RegisterRole};
use crate::api::ApiClient;
use crate::error::Error;
use crate::nav::Route;
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing, FORM_WIDTH};
use crate::validate;
use iced::widget::{button, container, radio, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

/// Cooldown between verification-code requests.
pub const RESEND_COOLDOWN_SECS: u32 = 60;

#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    EmailChanged(String),
    CodeChanged(String),
    AdminKeyChanged(String),
    RoleSelected(RegisterRole),
    SendCode,
    CodeSent(Result<(), Error>),
    CountdownTick,
    Submit,
    RegisterFinished(Result<(), Error>),
    GoToLogin,
}

pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Route),
    /// Account created; the shell redirects to the login screen after a
    /// moment.
    Registered,
}

#[derive(Debug, Default)]
pub struct State {
    username: String,
    password: String,
    confirm_password: String,
    email: String,
    code: String,
    admin_key: String,
    role: RegisterRole,
    code_sent: bool,
    countdown: u32,
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-second countdown tick should be running.
    #[must_use]
    pub fn countdown_active(&self) -> bool {
        self.countdown > 0
    }

    fn send_code_label(&self) -> String {
        if self.countdown > 0 {
            format!("Resend ({}s)", self.countdown)
        } else {
            "Send Code".to_string()
        }
    }
}

pub fn update(
    state: &mut State,
    api: &ApiClient,
    feedback: &mut Presenter,
    message: Message,
) -> Action {
    match message {
        Message::UsernameChanged(value) => {
            state.username = value;
            Action::None
        }
        Message::PasswordChanged(value) => {
            state.password = value;
            Action::None
        }
        Message::ConfirmPasswordChanged(value) => {
            state.confirm_password = value;
            Action::None
        }
        Message::EmailChanged(value) => {
            state.email = value;
            Action::None
        }
        Message::CodeChanged(value) => {
            state.code = value;
            Action::None
        }
        Message::AdminKeyChanged(value) => {
            state.admin_key = value;
            Action::None
        }
        Message::RoleSelected(role) => {
            state.role = role;
            Action::None
        }
        Message::SendCode => {
            if state.countdown > 0 {
                return Action::None;
            }
            if !validate::is_valid_email(&state.email) {
                feedback.show_banner("Please enter a valid email address", Severity::Danger);
                return Action::None;
            }
            let api = api.clone();
            let email = state.email.clone();
            Action::Run(Task::perform(
                async move { auth::send_register_code(&api, &email).await },
                Message::CodeSent,
            ))
        }
        Message::CodeSent(Ok(())) => {
            state.code_sent = true;
            state.countdown = RESEND_COOLDOWN_SECS;
            feedback.show_banner(
                "Verification code sent. Please check your email.",
                Severity::Success,
            );
            Action::None
        }
        Message::CodeSent(Err(error)) => {
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::CountdownTick => {
            state.countdown = state.countdown.saturating_sub(1);
            Action::None
        }
        Message::Submit => {
            if !validate::all_present(&[
                &state.username,
                &state.password,
                &state.confirm_password,
                &state.email,
                &state.code,
            ]) {
                feedback.show_banner("Please fill in all required fields.", Severity::Danger);
                return Action::None;
            }
            if !validate::passwords_match(&state.password, &state.confirm_password) {
                feedback.show_banner("The passwords entered do not match.", Severity::Danger);
                return Action::None;
            }
            if !validate::is_valid_email(&state.email) {
                feedback.show_banner("Please enter a valid email address.", Severity::Danger);
                return Action::None;
            }
            if !state.code_sent {
                feedback.show_banner(
                    "Please obtain the email verification code first.",
                    Severity::Danger,
                );
                return Action::None;
            }
            if state.role == RegisterRole::Admin && state.admin_key.is_empty() {
                feedback.show_banner(
                    "Admin Key is required for admin registration.",
                    Severity::Danger,
                );
                return Action::None;
            }

            state.busy = true;
            let request = RegisterRequest {
                username: state.username.clone(),
                password: state.password.clone(),
                email: state.email.clone(),
                register_code: state.code.clone(),
                role: state.role,
                admin_key: (state.role == RegisterRole::Admin)
                    .then(|| state.admin_key.clone()),
            };
            let api = api.clone();
            Action::Run(Task::perform(
                async move { auth::register(&api, &request).await },
                Message::RegisterFinished,
            ))
        }
        Message::RegisterFinished(Ok(())) => {
            state.busy = false;
            feedback.show_banner(
                "Registration successful. Redirecting to login page...",
                Severity::Success,
            );
            Action::Registered
        }
        Message::RegisterFinished(Err(error)) => {
            state.busy = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::GoToLogin => Action::Navigate(Route::new("/login")),
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("Create an account").size(26);

    let username = text_input("Username", &state.username)
        .on_input(Message::UsernameChanged)
        .padding(spacing::SM);
    let password = text_input("Password", &state.password)
        .on_input(Message::PasswordChanged)
        .secure(true)
        .padding(spacing::SM);
    let confirm = text_input("Confirm password", &state.confirm_password)
        .on_input(Message::ConfirmPasswordChanged)
        .secure(true)
        .padding(spacing::SM);
    let email = text_input("Email", &state.email)
        .on_input(Message::EmailChanged)
        .padding(spacing::SM);

    let code_input = text_input("Verification code", &state.code)
        .on_input(Message::CodeChanged)
        .padding(spacing::SM);

    let mut send_code = button(text(state.send_code_label()).size(14))
        .padding([spacing::SM, spacing::MD])
        .style(button::secondary);
    if state.countdown == 0 {
        send_code = send_code.on_press(Message::SendCode);
    }

    let code_row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(container(code_input).width(Length::Fill))
        .push(send_code);

    let roles = Row::new()
        .spacing(spacing::MD)
        .push(radio(
            "User",
            RegisterRole::User,
            Some(state.role),
            Message::RoleSelected,
        ))
        .push(radio(
            "Admin",
            RegisterRole::Admin,
            Some(state.role),
            Message::RoleSelected,
        ));

    let mut form = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(username)
        .push(password)
        .push(confirm)
        .push(email)
        .push(code_row)
        .push(roles);

    if state.role == RegisterRole::Admin {
        form = form.push(
            text_input("Admin key", &state.admin_key)
                .on_input(Message::AdminKeyChanged)
                .secure(true)
                .padding(spacing::SM),
        );
    }

    let mut submit = button(
        container(text(if state.busy { "Creating..." } else { "Register" }))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(button::primary);
    if !state.busy {
        submit = submit.on_press(Message::Submit);
    }

    form = form.push(submit).push(
        button(text("Already have an account? Sign in").size(13))
            .on_press(Message::GoToLogin)
            .style(button::text),
    );

    scrollable(
        container(
            container(form)
                .width(Length::Fixed(FORM_WIDTH))
                .padding(spacing::LG)
                .style(|theme: &Theme| styles::card(theme)),
        )
        .width(Length::Fill)
        .padding(spacing::LG)
        .align_x(alignment::Horizontal::Center),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::feedback::DEFAULT_REGION;

    fn api() -> ApiClient {
        ApiClient::new(&Config::default()).expect("client")
    }

    fn filled_state() -> State {
        State {
            username: "bob".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            email: "bob@example.com".into(),
            code: "123456".into(),
            code_sent: true,
            ..State::default()
        }
    }

    #[test]
    fn send_code_rejects_a_bad_email() {
        let mut state = State::new();
        state.email = "not-an-email".into();
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::SendCode);

        assert!(matches!(action, Action::None));
        assert!(feedback.banner(DEFAULT_REGION).is_some());
        assert!(!state.code_sent);
    }

    #[test]
    fn send_code_is_ignored_during_cooldown() {
        let mut state = filled_state();
        state.countdown = 30;
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::SendCode);

        assert!(matches!(action, Action::None));
        assert!(feedback.banner(DEFAULT_REGION).is_none());
    }

    #[test]
    fn code_arrival_starts_the_cooldown() {
        let mut state = filled_state();
        state.code_sent = false;
        state.countdown = 0;
        let mut feedback = Presenter::new();

        update(&mut state, &api(), &mut feedback, Message::CodeSent(Ok(())));

        assert!(state.code_sent);
        assert_eq!(state.countdown, RESEND_COOLDOWN_SECS);
        assert!(state.countdown_active());
    }

    #[test]
    fn countdown_ticks_to_zero_and_stops() {
        let mut state = filled_state();
        state.countdown = 2;
        let mut feedback = Presenter::new();

        update(&mut state, &api(), &mut feedback, Message::CountdownTick);
        assert_eq!(state.countdown, 1);
        update(&mut state, &api(), &mut feedback, Message::CountdownTick);
        assert_eq!(state.countdown, 0);
        assert!(!state.countdown_active());

        // A stray tick after completion must not underflow.
        update(&mut state, &api(), &mut feedback, Message::CountdownTick);
        assert_eq!(state.countdown, 0);
    }

    #[test]
    fn submit_checks_run_in_the_page_order() {
        let api = api();
        let mut feedback = Presenter::new();

        let mut state = filled_state();
        state.code.clear();
        update(&mut state, &api, &mut feedback, Message::Submit);
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("required"));

        let mut state = filled_state();
        state.confirm_password = "other".into();
        update(&mut state, &api, &mut feedback, Message::Submit);
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("do not match"));

        let mut state = filled_state();
        state.email = "nope".into();
        update(&mut state, &api, &mut feedback, Message::Submit);
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("valid email"));

        let mut state = filled_state();
        state.code_sent = false;
        update(&mut state, &api, &mut feedback, Message::Submit);
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("verification code first"));
    }

    #[test]
    fn admin_registration_requires_the_admin_key() {
        let mut state = filled_state();
        state.role = RegisterRole::Admin;
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::Submit);

        assert!(matches!(action, Action::None));
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("Admin Key"));
    }

    #[test]
    fn complete_submission_goes_busy() {
        let mut state = filled_state();
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::Submit);

        assert!(matches!(action, Action::Run(_)));
        assert!(state.busy);
    }

    #[test]
    fn successful_registration_redirects() {
        let mut state = filled_state();
        state.busy = true;
        let mut feedback = Presenter::new();

        let action = update(
            &mut state,
            &api(),
            &mut feedback,
            Message::RegisterFinished(Ok(())),
        );

        assert!(matches!(action, Action::Registered));
        assert_eq!(
            feedback.banner(DEFAULT_REGION).unwrap().severity(),
            Severity::Success
        );
    }

    #[test]
    fn view_renders_for_both_roles() {
        let mut state = filled_state();
        let _ = view(&state);
        state.role = RegisterRole::Admin;
        let _ = view(&state);
    }
}
