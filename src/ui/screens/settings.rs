// SPDX-License-Identifier: MPL-2.0
//! Service settings: sectioned forms saved independently.
//!
//! Saves are fire-and-forget and report through toasts. The backup
//! action shows an info toast immediately and a success toast when the
//! service reports completion, so the admin sees both phases.

use crate::api::admin::{self, SettingsSection};
use crate::api::ApiClient;
use crate::error::Error;
use crate::ui::feedback::{Presenter, Severity, Toast};
use crate::ui::styles::{self, spacing};
use crate::validate;
use iced::widget::{button, checkbox, container, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    SiteNameChanged(String),
    AnnouncementChanged(String),
    MaxAdvanceDaysChanged(String),
    MaxDurationHoursChanged(String),
    RegisterCodeChanged(String),
    GenerateRegisterCode,
    SmtpHostChanged(String),
    SmtpPortChanged(String),
    SenderChanged(String),
    AutoBackupToggled(bool),
    IntervalDaysChanged(String),
    SaveSection(SettingsSection),
    SectionSaved {
        section: SettingsSection,
        result: Result<(), Error>,
    },
    OpenTestEmail,
    TestEmailAddressChanged(String),
    CancelTestEmail,
    SendTestEmail,
    TestEmailSent {
        address: String,
        result: Result<(), Error>,
    },
    CreateBackup,
    BackupFinished(Result<(), Error>),
}

pub enum Action {
    None,
    Run(Task<Message>),
}

#[derive(Debug, Default)]
pub struct State {
    site_name: String,
    announcement: String,
    max_advance_days: String,
    max_duration_hours: String,
    register_code: String,
    smtp_host: String,
    smtp_port: String,
    sender: String,
    auto_backup: bool,
    interval_days: String,
    /// `Some` while the test-email dialog is open; holds the address.
    test_email: Option<String>,
    backup_running: bool,
    saving: Option<SettingsSection>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn section_values(&self, section: SettingsSection) -> Vec<(String, String)> {
        match section {
            SettingsSection::General => vec![
                ("siteName".into(), self.site_name.clone()),
                ("announcement".into(), self.announcement.clone()),
            ],
            SettingsSection::Reservation => vec![
                ("maxAdvanceDays".into(), self.max_advance_days.clone()),
                ("maxDurationHours".into(), self.max_duration_hours.clone()),
            ],
            SettingsSection::Admin => {
                vec![("adminRegisterCode".into(), self.register_code.clone())]
            }
            SettingsSection::Email => vec![
                ("smtpHost".into(), self.smtp_host.clone()),
                ("smtpPort".into(), self.smtp_port.clone()),
                ("sender".into(), self.sender.clone()),
            ],
            SettingsSection::AutoBackup => vec![
                ("enabled".into(), self.auto_backup.to_string()),
                ("intervalDays".into(), self.interval_days.clone()),
            ],
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
        Message::SiteNameChanged(value) => {
            state.site_name = value;
            Action::None
        }
        Message::AnnouncementChanged(value) => {
            state.announcement = value;
            Action::None
        }
        Message::MaxAdvanceDaysChanged(value) => {
            state.max_advance_days = value;
            Action::None
        }
        Message::MaxDurationHoursChanged(value) => {
            state.max_duration_hours = value;
            Action::None
        }
        Message::RegisterCodeChanged(value) => {
            state.register_code = value;
            Action::None
        }
        Message::GenerateRegisterCode => {
            // A fresh suggestion; the save posts it like any typed value.
            let stamp = chrono::Utc::now().timestamp().rem_euclid(10_000);
            state.register_code = format!("ADMIN{stamp:04}");
            Action::None
        }
        Message::SmtpHostChanged(value) => {
            state.smtp_host = value;
            Action::None
        }
        Message::SmtpPortChanged(value) => {
            state.smtp_port = value;
            Action::None
        }
        Message::SenderChanged(value) => {
            state.sender = value;
            Action::None
        }
        Message::AutoBackupToggled(value) => {
            state.auto_backup = value;
            Action::None
        }
        Message::IntervalDaysChanged(value) => {
            state.interval_days = value;
            Action::None
        }
        Message::SaveSection(section) => {
            if state.saving.is_some() {
                return Action::None;
            }
            state.saving = Some(section);
            let api = api.clone();
            let values = state.section_values(section);
            Action::Run(Task::perform(
                async move { admin::save_settings(&api, section, &values).await },
                move |result| Message::SectionSaved { section, result },
            ))
        }
        Message::SectionSaved { section, result } => {
            state.saving = None;
            match result {
                Ok(()) => {
                    feedback.show_toast(Toast::new(section.saved_message()));
                }
                Err(error) => {
                    feedback.show_toast(Toast::new(error.to_string()).severity(Severity::Danger));
                }
            }
            Action::None
        }
        Message::OpenTestEmail => {
            state.test_email = Some(String::new());
            Action::None
        }
        Message::TestEmailAddressChanged(value) => {
            if let Some(address) = state.test_email.as_mut() {
                *address = value;
            }
            Action::None
        }
        Message::CancelTestEmail => {
            state.test_email = None;
            Action::None
        }
        Message::SendTestEmail => {
            let Some(address) = state.test_email.clone() else {
                return Action::None;
            };
            if !validate::is_valid_email(&address) {
                feedback.show_banner("Please enter a valid email address", Severity::Danger);
                return Action::None;
            }
            state.test_email = None;
            let api = api.clone();
            let to = address.clone();
            Action::Run(Task::perform(
                async move { admin::send_test_email(&api, &to).await },
                move |result| Message::TestEmailSent {
                    address: address.clone(),
                    result,
                },
            ))
        }
        Message::TestEmailSent { address, result } => {
            match result {
                Ok(()) => {
                    feedback.show_toast(Toast::new(format!("Test email sent to {address}")));
                }
                Err(error) => {
                    feedback.show_toast(Toast::new(error.to_string()).severity(Severity::Danger));
                }
            }
            Action::None
        }
        Message::CreateBackup => {
            if state.backup_running {
                return Action::None;
            }
            state.backup_running = true;
            feedback.show_toast(
                Toast::new("Creating backup, please wait...").severity(Severity::Info),
            );
            let api = api.clone();
            Action::Run(Task::perform(
                async move { admin::create_backup(&api).await },
                Message::BackupFinished,
            ))
        }
        Message::BackupFinished(result) => {
            state.backup_running = false;
            match result {
                Ok(()) => {
                    feedback.show_toast(Toast::new("Backup created successfully."));
                }
                Err(error) => {
                    feedback.show_toast(Toast::new(error.to_string()).severity(Severity::Danger));
                }
            }
            Action::None
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let mut column = Column::new()
        .spacing(spacing::MD)
        .push(text("Service settings").size(24));

    if let Some(address) = &state.test_email {
        column = column.push(test_email_panel(address));
    }

    column = column
        .push(section_card(
            "General",
            SettingsSection::General,
            state.saving,
            Column::new()
                .spacing(spacing::SM)
                .push(labeled_input(
                    "Site name",
                    &state.site_name,
                    Message::SiteNameChanged,
                ))
                .push(labeled_input(
                    "Announcement",
                    &state.announcement,
                    Message::AnnouncementChanged,
                )),
        ))
        .push(section_card(
            "Reservations",
            SettingsSection::Reservation,
            state.saving,
            Column::new()
                .spacing(spacing::SM)
                .push(labeled_input(
                    "Max days in advance",
                    &state.max_advance_days,
                    Message::MaxAdvanceDaysChanged,
                ))
                .push(labeled_input(
                    "Max duration (hours)",
                    &state.max_duration_hours,
                    Message::MaxDurationHoursChanged,
                )),
        ))
        .push(section_card(
            "Administrators",
            SettingsSection::Admin,
            state.saving,
            Column::new().spacing(spacing::SM).push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(
                        container(labeled_input(
                            "Admin registration code",
                            &state.register_code,
                            Message::RegisterCodeChanged,
                        ))
                        .width(Length::Fill),
                    )
                    .push(
                        button(text("Generate").size(13))
                            .on_press(Message::GenerateRegisterCode)
                            .style(button::secondary),
                    ),
            ),
        ))
        .push(section_card(
            "Email",
            SettingsSection::Email,
            state.saving,
            Column::new()
                .spacing(spacing::SM)
                .push(labeled_input(
                    "SMTP host",
                    &state.smtp_host,
                    Message::SmtpHostChanged,
                ))
                .push(labeled_input(
                    "SMTP port",
                    &state.smtp_port,
                    Message::SmtpPortChanged,
                ))
                .push(labeled_input(
                    "Sender address",
                    &state.sender,
                    Message::SenderChanged,
                ))
                .push(
                    button(text("Send test email").size(13))
                        .on_press(Message::OpenTestEmail)
                        .style(button::secondary),
                ),
        ))
        .push(backup_card(state));

    scrollable(container(column).padding(spacing::LG).width(Length::Fill)).into()
}

fn labeled_input<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .padding(spacing::SM)
        .into()
}

fn section_card<'a>(
    title: &'a str,
    section: SettingsSection,
    saving: Option<SettingsSection>,
    body: Column<'a, Message>,
) -> Element<'a, Message> {
    let is_saving = saving == Some(section);
    let mut save = button(text(if is_saving { "Saving..." } else { "Save" }).size(14))
        .padding([spacing::XS, spacing::MD])
        .style(button::primary);
    if saving.is_none() {
        save = save.on_press(Message::SaveSection(section));
    }

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text(title).size(17))
            .push(body)
            .push(save),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}

fn backup_card(state: &State) -> Element<'_, Message> {
    let mut create = button(
        text(if state.backup_running {
            "Backing up..."
        } else {
            "Create backup now"
        })
        .size(14),
    )
    .padding([spacing::XS, spacing::MD])
    .style(button::secondary);
    if !state.backup_running {
        create = create.on_press(Message::CreateBackup);
    }

    let body = Column::new()
        .spacing(spacing::SM)
        .push(
            checkbox(state.auto_backup).label("Enable automatic backups")
                .on_toggle(Message::AutoBackupToggled),
        )
        .push(labeled_input(
            "Backup interval (days)",
            &state.interval_days,
            Message::IntervalDaysChanged,
        ))
        .push(create);

    section_card("Backups", SettingsSection::AutoBackup, state.saving, body)
}

fn test_email_panel(address: &str) -> Element<'_, Message> {
    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text("Send a test email").size(16))
            .push(
                text_input("Recipient address", address)
                    .on_input(Message::TestEmailAddressChanged)
                    .on_submit(Message::SendTestEmail)
                    .padding(spacing::SM),
            )
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(
                        button(text("Send").size(14))
                            .on_press(Message::SendTestEmail)
                            .padding([spacing::XS, spacing::MD])
                            .style(button::primary),
                    )
                    .push(
                        button(text("Cancel").size(14))
                            .on_press(Message::CancelTestEmail)
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
