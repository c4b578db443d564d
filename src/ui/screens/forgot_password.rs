// SPDX-License-Identifier: MPL-2.0
//! Password reset screen.
//!
//! Same verification-code mechanics as registration: the code request
//! validates the email first and then cools down for 60 s; submission
//! is refused until a code has been requested.

use crate::api::auth::{self, ResetPasswordRequest};
use crate::api::ApiClient;
use crate::error::Error;
use crate::nav::Route;
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing, FORM_WIDTH};
use crate::validate;
use iced::widget::{button, container, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

use super::register::RESEND_COOLDOWN_SECS;

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    CodeChanged(String),
    SendCode,
    CodeSent(Result<(), Error>),
    CountdownTick,
    Submit,
    ResetFinished(Result<(), Error>),
    GoToLogin,
}

pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Route),
    /// Password reset; the shell redirects to the login screen.
    ResetDone,
}

#[derive(Debug, Default)]
pub struct State {
    email: String,
    password: String,
    confirm_password: String,
    code: String,
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
        Message::EmailChanged(value) => {
            state.email = value;
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
        Message::CodeChanged(value) => {
            state.code = value;
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
                async move { auth::send_reset_code(&api, &email).await },
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
                &state.email,
                &state.password,
                &state.confirm_password,
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

            state.busy = true;
            let request = ResetPasswordRequest {
                email: state.email.clone(),
                password: state.password.clone(),
                forget_pwd_code: state.code.clone(),
            };
            let api = api.clone();
            Action::Run(Task::perform(
                async move { auth::reset_password(&api, &request).await },
                Message::ResetFinished,
            ))
        }
        Message::ResetFinished(Ok(())) => {
            state.busy = false;
            feedback.show_banner(
                "Password reset successfully. Redirecting to login page...",
                Severity::Success,
            );
            Action::ResetDone
        }
        Message::ResetFinished(Err(error)) => {
            state.busy = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::GoToLogin => Action::Navigate(Route::new("/login")),
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("Reset your password").size(26);

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

    let password = text_input("New password", &state.password)
        .on_input(Message::PasswordChanged)
        .secure(true)
        .padding(spacing::SM);
    let confirm = text_input("Confirm new password", &state.confirm_password)
        .on_input(Message::ConfirmPasswordChanged)
        .secure(true)
        .padding(spacing::SM);

    let mut submit = button(
        container(text(if state.busy {
            "Resetting..."
        } else {
            "Reset password"
        }))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(button::primary);
    if !state.busy {
        submit = submit.on_press(Message::Submit);
    }

    let form = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(email)
        .push(code_row)
        .push(password)
        .push(confirm)
        .push(submit)
        .push(
            button(text("Back to sign in").size(13))
                .on_press(Message::GoToLogin)
                .style(button::text),
        );

    container(
        container(form)
            .width(Length::Fixed(FORM_WIDTH))
            .padding(spacing::LG)
            .style(|theme: &Theme| styles::card(theme)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}
