// SPDX-License-Identifier: MPL-2.0
//! Bookings administration: review details, approve, reject.
//!
//! The details view reads from the typed row fetched with the list -
//! nothing is re-scraped from rendered markup at click time. Rejection
//! demands a non-empty reason and a confirmation; both decisions reload
//! the list on success.

use crate::api::admin::{self, BookingRow, BookingStatus};
use crate::api::ApiClient;
use crate::error::Error;
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing};
use iced::widget::{button, container, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<BookingRow>, Error>),
    ShowDetails(u64),
    CloseDetails,
    Approve(u64),
    RequestReject(u64),
    RejectReasonChanged(String),
    ConfirmReject,
    CancelReject,
    DecisionFinished {
        verb: &'static str,
        result: Result<(), Error>,
    },
}

pub enum Action {
    None,
    Run(Task<Message>),
}

#[derive(Debug, Clone)]
struct PendingRejection {
    booking_id: u64,
    reason: String,
}

#[derive(Debug, Default)]
pub struct State {
    rows: Vec<BookingRow>,
    loading: bool,
    details: Option<u64>,
    rejecting: Option<PendingRejection>,
    busy: bool,
}

impl State {
    /// Fresh state plus the initial list fetch.
    pub fn enter(api: &ApiClient) -> (Self, Task<Message>) {
        let state = Self {
            loading: true,
            ..Self::default()
        };
        (state, load_bookings(api))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn load_bookings(api: &ApiClient) -> Task<Message> {
    let api = api.clone();
    Task::perform(
        async move { admin::list_bookings(&api).await },
        Message::Loaded,
    )
}

/// Badge severity for a booking state.
#[must_use]
pub fn status_severity(status: BookingStatus) -> Severity {
    match status {
        BookingStatus::Approved => Severity::Success,
        BookingStatus::Rejected => Severity::Danger,
        BookingStatus::Pending => Severity::Warning,
        BookingStatus::Cancelled => Severity::Light,
    }
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
        Message::ShowDetails(id) => {
            state.details = Some(id);
            Action::None
        }
        Message::CloseDetails => {
            state.details = None;
            Action::None
        }
        Message::Approve(id) => {
            if state.busy {
                return Action::None;
            }
            state.busy = true;
            let api = api.clone();
            Action::Run(Task::perform(
                async move { admin::approve_booking(&api, id).await },
                |result| Message::DecisionFinished {
                    verb: "approved",
                    result,
                },
            ))
        }
        Message::RequestReject(id) => {
            if state.busy {
                return Action::None;
            }
            state.rejecting = Some(PendingRejection {
                booking_id: id,
                reason: String::new(),
            });
            Action::None
        }
        Message::RejectReasonChanged(value) => {
            if let Some(rejecting) = state.rejecting.as_mut() {
                rejecting.reason = value;
            }
            Action::None
        }
        Message::CancelReject => {
            state.rejecting = None;
            Action::None
        }
        Message::ConfirmReject => {
            let Some(rejecting) = state.rejecting.take() else {
                return Action::None;
            };
            // Rejection without a reason is not sent at all.
            if rejecting.reason.trim().is_empty() {
                state.rejecting = Some(rejecting);
                return Action::None;
            }
            state.busy = true;
            let api = api.clone();
            Action::Run(Task::perform(
                async move {
                    admin::reject_booking(&api, rejecting.booking_id, &rejecting.reason).await
                },
                |result| Message::DecisionFinished {
                    verb: "rejected",
                    result,
                },
            ))
        }
        Message::DecisionFinished { verb, result } => {
            state.busy = false;
            match result {
                Ok(()) => {
                    feedback.show_banner(
                        format!("Booking {verb} successfully!"),
                        Severity::Success,
                    );
                    state.details = None;
                    state.loading = true;
                    Action::Run(load_bookings(api))
                }
                Err(error) => {
                    feedback.show_banner(
                        format!("Error deciding booking: {error}"),
                        Severity::Danger,
                    );
                    Action::None
                }
            }
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("Bookings").size(24);

    let mut column = Column::new().spacing(spacing::SM).push(title);

    if let Some(rejecting) = &state.rejecting {
        column = column.push(reject_panel(rejecting));
    }

    if let Some(details_id) = state.details {
        if let Some(row) = state.rows.iter().find(|row| row.id == details_id) {
            column = column.push(details_panel(row));
        }
    }

    if state.loading {
        column = column.push(text("Loading bookings...").size(14));
    } else if state.rows.is_empty() {
        column = column.push(text("No bookings found.").size(14));
    } else {
        for row in &state.rows {
            column = column.push(booking_row(row, state.busy));
        }
    }

    scrollable(container(column).padding(spacing::LG).width(Length::Fill)).into()
}

fn status_badge(status: BookingStatus) -> Element<'static, Message> {
    let severity = status_severity(status);
    let label = match status {
        BookingStatus::Pending => "PENDING",
        BookingStatus::Approved => "APPROVED",
        BookingStatus::Rejected => "REJECTED",
        BookingStatus::Cancelled => "CANCELLED",
    };
    container(
        text(label)
            .size(12)
            .style(move |_theme: &Theme| text::Style {
                color: Some(severity.text_color()),
            }),
    )
    .padding([2.0, spacing::SM])
    .style(move |_theme: &Theme| container::Style {
        background: Some(iced::Background::Color(severity.accent())),
        border: iced::Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
    .into()
}

fn details_panel(row: &BookingRow) -> Element<'_, Message> {
    let field = |label: &str, value: String| {
        Row::new()
            .spacing(spacing::SM)
            .push(text(format!("{label}:")).size(13))
            .push(text(value).size(13))
    };

    let details = Column::new()
        .spacing(spacing::XS)
        .push(field("Room", row.room_name.clone()))
        .push(field(
            "Location",
            row.room_location.clone().unwrap_or_else(|| "N/A".into()),
        ))
        .push(field("Requested by", row.username.clone()))
        .push(field("Email", row.user_email.clone()))
        .push(field("From", row.start_time.format(TIME_FORMAT).to_string()))
        .push(field("To", row.end_time.format(TIME_FORMAT).to_string()))
        .push(field(
            "Reason",
            row.reason.clone().unwrap_or_else(|| "N/A".into()),
        ))
        .push(field(
            "Created",
            row.created_at.format(TIME_FORMAT).to_string(),
        ));

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(text("Booking details").size(16))
                    .push(status_badge(row.status))
                    .push(container(text("")).width(Length::Fill))
                    .push(
                        button(text("Close").size(13))
                            .on_press(Message::CloseDetails)
                            .style(button::secondary),
                    ),
            )
            .push(details),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}

fn reject_panel(rejecting: &PendingRejection) -> Element<'_, Message> {
    let reason = text_input("Reason for rejection (required)", &rejecting.reason)
        .on_input(Message::RejectReasonChanged)
        .on_submit(Message::ConfirmReject)
        .padding(spacing::SM);

    let mut confirm = button(text("Reject booking").size(14))
        .padding([spacing::XS, spacing::MD])
        .style(button::danger);
    if !rejecting.reason.trim().is_empty() {
        confirm = confirm.on_press(Message::ConfirmReject);
    }

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text("Are you sure you want to reject this booking?").size(15))
            .push(reason)
            .push(
                Row::new().spacing(spacing::SM).push(confirm).push(
                    button(text("Cancel").size(14))
                        .on_press(Message::CancelReject)
                        .padding([spacing::XS, spacing::MD])
                        .style(button::secondary),
                ),
            ),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}

fn booking_row(row: &BookingRow, busy: bool) -> Element<'_, Message> {
    let summary = Column::new()
        .spacing(spacing::XS)
        .push(text(format!("{} - {}", row.room_name, row.username)).size(15))
        .push(
            text(format!(
                "{} to {}",
                row.start_time.format(TIME_FORMAT),
                row.end_time.format(TIME_FORMAT)
            ))
            .size(13),
        );

    let mut actions = Row::new().spacing(spacing::SM).push(
        button(text("Details").size(13))
            .on_press(Message::ShowDetails(row.id))
            .style(button::secondary),
    );

    if row.status == BookingStatus::Pending {
        let mut approve = button(text("Approve").size(13)).style(button::success);
        let mut reject = button(text("Reject").size(13)).style(button::danger);
        if !busy {
            approve = approve.on_press(Message::Approve(row.id));
            reject = reject.on_press(Message::RequestReject(row.id));
        }
        actions = actions.push(approve).push(reject);
    }

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(container(summary).width(Length::Fill))
            .push(status_badge(row.status))
            .push(actions),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}
