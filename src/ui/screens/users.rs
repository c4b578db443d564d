// SPDX-License-Identifier: MPL-2.0
//! User accounts administration: lock and unlock with an optional
//! reason.
//!
//! An action asks for confirmation and a reason first. While it runs,
//! the acting row's button shows a busy label; on success the list is
//! reloaded, on failure the row is restored and the error surfaces
//! through the banner region.

use crate::api::admin::{self, LockAction, UserRow};
use crate::api::ApiClient;
use crate::error::Error;
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing};
use iced::widget::{button, container, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<UserRow>, Error>),
    RequestAction(u64, LockAction),
    ReasonChanged(String),
    ConfirmAction,
    CancelAction,
    ActionFinished {
        action: LockAction,
        result: Result<(), Error>,
    },
}

pub enum Action {
    None,
    Run(Task<Message>),
}

/// A lock/unlock waiting for the admin to confirm.
#[derive(Debug, Clone)]
struct PendingAction {
    user_id: u64,
    username: String,
    action: LockAction,
    reason: String,
}

#[derive(Debug, Default)]
pub struct State {
    rows: Vec<UserRow>,
    loading: bool,
    pending: Option<PendingAction>,
    /// Row an action is currently running against.
    acting: Option<u64>,
}

impl State {
    /// Fresh state plus the initial list fetch.
    pub fn enter(api: &ApiClient) -> (Self, Task<Message>) {
        let state = Self {
            loading: true,
            ..Self::default()
        };
        (state, load_users(api))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn load_users(api: &ApiClient) -> Task<Message> {
    let api = api.clone();
    Task::perform(async move { admin::list_users(&api).await }, Message::Loaded)
}

pub fn update(
    state: &mut State,
    api: &ApiClient,
    feedback: &mut Presenter,
    message: Message,
) -> Action {
    match message {
        Message::Loaded(Ok(rows)) => {
            state.loading = false;
            state.rows = rows;
            Action::None
        }
        Message::Loaded(Err(error)) => {
            state.loading = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::RequestAction(user_id, action) => {
            if state.acting.is_some() {
                return Action::None;
            }
            let username = state
                .rows
                .iter()
                .find(|row| row.id == user_id)
                .map(|row| row.username.clone())
                .unwrap_or_default();
            state.pending = Some(PendingAction {
                user_id,
                username,
                action,
                reason: String::new(),
            });
            Action::None
        }
        Message::ReasonChanged(value) => {
            if let Some(pending) = state.pending.as_mut() {
                pending.reason = value;
            }
            Action::None
        }
        Message::CancelAction => {
            state.pending = None;
            Action::None
        }
        Message::ConfirmAction => {
            let Some(pending) = state.pending.take() else {
                return Action::None;
            };
            state.acting = Some(pending.user_id);
            let api = api.clone();
            let action = pending.action;
            let user_id = pending.user_id;
            let reason = pending.reason;
            Action::Run(Task::perform(
                async move { admin::set_user_lock(&api, user_id, action, &reason).await },
                move |result| Message::ActionFinished { action, result },
            ))
        }
        Message::ActionFinished { action, result } => {
            state.acting = None;
            match result {
                Ok(()) => {
                    feedback.show_banner(
                        format!("User {} successfully!", action.past_tense()),
                        Severity::Success,
                    );
                    state.loading = true;
                    Action::Run(load_users(api))
                }
                Err(error) => {
                    feedback.show_banner(
                        format!("Failed to {} user: {}", action.as_str(), error),
                        Severity::Danger,
                    );
                    Action::None
                }
            }
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("User accounts").size(24);

    let mut column = Column::new().spacing(spacing::SM).push(title);

    if let Some(pending) = &state.pending {
        column = column.push(confirm_panel(pending));
    }

    if state.loading {
        column = column.push(text("Loading accounts...").size(14));
    } else if state.rows.is_empty() {
        column = column.push(text("No user accounts found.").size(14));
    } else {
        for row in &state.rows {
            column = column.push(user_row(row, state.acting));
        }
    }

    scrollable(container(column).padding(spacing::LG).width(Length::Fill)).into()
}

fn confirm_panel(pending: &PendingAction) -> Element<'_, Message> {
    let question = text(format!(
        "Are you sure you want to {} user \"{}\"?",
        pending.action.as_str(),
        pending.username
    ))
    .size(15);

    let reason = text_input("Reason (optional)", &pending.reason)
        .on_input(Message::ReasonChanged)
        .on_submit(Message::ConfirmAction)
        .padding(spacing::SM);

    let buttons = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text("Confirm").size(14))
                .on_press(Message::ConfirmAction)
                .padding([spacing::XS, spacing::MD])
                .style(button::danger),
        )
        .push(
            button(text("Cancel").size(14))
                .on_press(Message::CancelAction)
                .padding([spacing::XS, spacing::MD])
                .style(button::secondary),
        );

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(question)
            .push(reason)
            .push(buttons),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}

fn user_row(row: &UserRow, acting: Option<u64>) -> Element<'_, Message> {
    let identity = Column::new()
        .spacing(spacing::XS)
        .push(text(row.username.as_str()).size(15))
        .push(text(row.email.as_str()).size(13));

    let status = if row.locked {
        let label = match &row.lock_reason {
            Some(reason) if !reason.is_empty() => format!("Locked - {reason}"),
            _ => "Locked".to_string(),
        };
        text(label).size(13).style(|_theme: &Theme| text::Style {
            color: Some(styles::palette::DANGER),
        })
    } else {
        text("Active").size(13).style(|_theme: &Theme| text::Style {
            color: Some(styles::palette::SUCCESS),
        })
    };

    let next_action = if row.locked {
        LockAction::Unlock
    } else {
        LockAction::Lock
    };

    let is_acting = acting == Some(row.id);
    let label = if is_acting {
        "Working..."
    } else {
        match next_action {
            LockAction::Lock => "Lock",
            LockAction::Unlock => "Unlock",
        }
    };

    let mut action_button = button(text(label).size(14))
        .padding([spacing::XS, spacing::MD])
        .style(match next_action {
            LockAction::Lock => button::danger,
            LockAction::Unlock => button::secondary,
        });
    if acting.is_none() {
        action_button = action_button.on_press(Message::RequestAction(row.id, next_action));
    }

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(container(identity).width(Length::Fill))
            .push(status)
            .push(action_button),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}
