// SPDX-License-Identifier: MPL-2.0
//! Sign-in screen: username, password and a captcha challenge.
//!
//! The captcha loads with the screen and reloads on demand, after any
//! failed attempt, and whenever the service rejects the login. A
//! successful login hands the token and profile to the app shell, which
//! stores the session and navigates to the role's landing page after a
//! short delay so the success message is visible.

use crate::api::auth::{self, Captcha, LoginData, LoginRequest};
use crate::api::ApiClient;
use crate::error::Error;
use crate::nav::Route;
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing, FORM_WIDTH};
use crate::validate;
use iced::widget::{button, container, image, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    UsernameChanged(String),
    PasswordChanged(String),
    CaptchaCodeChanged(String),
    RefreshCaptcha,
    CaptchaLoaded(Result<Captcha, Error>),
    Submit,
    LoginFinished(Result<LoginData, Error>),
    GoToRegister,
    GoToForgotPassword,
}

/// What the app shell should do after an update.
pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Route),
    /// Login succeeded; the shell stores the session and redirects.
    LoggedIn(Box<LoginData>),
}

#[derive(Debug, Default)]
pub struct State {
    username: String,
    password: String,
    captcha_code: String,
    captcha: Option<Captcha>,
    captcha_loading: bool,
    busy: bool,
}

impl State {
    /// Fresh state plus the initial captcha fetch.
    pub fn enter(api: &ApiClient) -> (Self, Task<Message>) {
        let state = Self {
            captcha_loading: true,
            ..Self::default()
        };
        (state, load_captcha(api))
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

fn load_captcha(api: &ApiClient) -> Task<Message> {
    let api = api.clone();
    Task::perform(
        async move { auth::fetch_captcha(&api).await },
        Message::CaptchaLoaded,
    )
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
        Message::CaptchaCodeChanged(value) => {
            state.captcha_code = value;
            Action::None
        }
        Message::RefreshCaptcha => {
            state.captcha_loading = true;
            Action::Run(load_captcha(api))
        }
        Message::CaptchaLoaded(Ok(captcha)) => {
            state.captcha_loading = false;
            state.captcha = Some(captcha);
            state.captcha_code.clear();
            Action::None
        }
        Message::CaptchaLoaded(Err(error)) => {
            state.captcha_loading = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::Submit => {
            let captcha_key = state
                .captcha
                .as_ref()
                .map(|captcha| captcha.key.clone())
                .unwrap_or_default();

            if !validate::all_present(&[
                &state.username,
                &state.password,
                &state.captcha_code,
                &captcha_key,
            ]) {
                feedback.show_banner("Please fill in all required fields", Severity::Danger);
                return Action::None;
            }

            state.busy = true;
            let request = LoginRequest {
                username: state.username.clone(),
                password: state.password.clone(),
                captcha_code: state.captcha_code.clone(),
                captcha_key,
            };
            let api = api.clone();
            Action::Run(Task::perform(
                async move { auth::login(&api, &request).await },
                Message::LoginFinished,
            ))
        }
        Message::LoginFinished(Ok(data)) => {
            state.busy = false;
            feedback.show_banner("Login successful, redirecting...", Severity::Success);
            Action::LoggedIn(Box::new(data))
        }
        Message::LoginFinished(Err(error)) => {
            state.busy = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            state.captcha_loading = true;
            Action::Run(load_captcha(api))
        }
        Message::GoToRegister => Action::Navigate(Route::new("/register")),
        Message::GoToForgotPassword => Action::Navigate(Route::new("/forgot-password")),
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("Sign in").size(26);

    let username = text_input("Username", &state.username)
        .on_input(Message::UsernameChanged)
        .padding(spacing::SM);

    let password = text_input("Password", &state.password)
        .on_input(Message::PasswordChanged)
        .secure(true)
        .padding(spacing::SM);

    let captcha_input = text_input("Captcha", &state.captcha_code)
        .on_input(Message::CaptchaCodeChanged)
        .on_submit(Message::Submit)
        .padding(spacing::SM)
        .width(Length::Fixed(140.0));

    let captcha_display: Element<'_, Message> = match &state.captcha {
        Some(captcha) => match captcha.image_bytes() {
            Some(bytes) => image(image::Handle::from_bytes(bytes))
                .width(Length::Fixed(140.0))
                .into(),
            None => text("captcha unavailable").size(13).into(),
        },
        None if state.captcha_loading => text("loading captcha...").size(13).into(),
        None => text("no captcha").size(13).into(),
    };

    let refresh = button(text("Refresh").size(13))
        .on_press(Message::RefreshCaptcha)
        .padding([spacing::XS, spacing::SM])
        .style(button::secondary);

    let captcha_row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(captcha_input)
        .push(captcha_display)
        .push(refresh);

    let mut submit = button(
        container(text(if state.busy { "Signing in..." } else { "Sign in" }))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(button::primary);
    if !state.busy {
        submit = submit.on_press(Message::Submit);
    }

    let links = Row::new()
        .spacing(spacing::MD)
        .push(
            button(text("Create an account").size(13))
                .on_press(Message::GoToRegister)
                .style(button::text),
        )
        .push(
            button(text("Forgot password?").size(13))
                .on_press(Message::GoToForgotPassword)
                .style(button::text),
        );

    let form = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(username)
        .push(password)
        .push(captcha_row)
        .push(submit)
        .push(links);

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
