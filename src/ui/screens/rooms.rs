// SPDX-License-Identifier: MPL-2.0
//! Meeting-room administration.
//!
//! Mutations follow the service's redirect protocol: each form post
//! answers with a redirect to this page carrying a result flag, the
//! screen navigates there, and the flag router turns the flag into a
//! banner on arrival (see [`message_table`]). Filters work the same way
//! the page does: they navigate to the same path with the filters as
//! query parameters, which flag cleanup leaves untouched.

use crate::api::rooms::{self, Room, RoomFilter, RoomForm};
use crate::api::ApiClient;
use crate::error::Error;
use crate::nav::{MessageTable, Route};
use crate::ui::feedback::{Presenter, Severity};
use crate::ui::styles::{self, spacing};
use crate::validate;
use iced::widget::{button, checkbox, container, scrollable, text, text_input, Column, Row};
use iced::{alignment, Element, Length, Task, Theme};

/// Path of this screen; redirects and filter navigations both target it.
pub const PATH: &str = "/admin/rooms";

/// The page's flag table, consumed on every arrival.
#[must_use]
pub fn message_table() -> MessageTable {
    MessageTable::new()
        .with(
            "success-add",
            "Meeting room was successfully added.",
            Severity::Success,
        )
        .with(
            "success-update",
            "Meeting room was successfully updated.",
            Severity::Success,
        )
        .with(
            "success-delete",
            "Meeting room was successfully deleted.",
            Severity::Success,
        )
        .with(
            "success-image",
            "Room image was successfully updated.",
            Severity::Success,
        )
        .with("error-add", "Failed to add meeting room.", Severity::Danger)
        .with(
            "error-update",
            "Failed to update meeting room.",
            Severity::Danger,
        )
        .with(
            "error-delete",
            "Failed to delete meeting room.",
            Severity::Danger,
        )
        .with(
            "error-image",
            "Failed to update room image.",
            Severity::Danger,
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Capacity,
    Location,
    Floor,
    Description,
    ImageUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Projector,
    Screen,
    Speaker,
    Computer,
    Whiteboard,
}

#[derive(Debug, Clone)]
enum Dialog {
    Add {
        form: RoomForm,
    },
    Edit {
        room_id: u64,
        form: RoomForm,
    },
    Image {
        room_id: u64,
        room_name: String,
        image_url: String,
    },
    Delete {
        room_id: u64,
        room_name: String,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Vec<Room>, Error>),
    FilterNameChanged(String),
    FilterLocationChanged(String),
    FilterFloorChanged(String),
    ApplyFilters,
    ClearFilters,
    OpenAdd,
    OpenEdit(u64),
    OpenImage(u64),
    OpenDelete(u64),
    CloseDialog,
    FormTextChanged(FormField, String),
    FormFeatureToggled(Feature, bool),
    ImageUrlChanged(String),
    Submit,
    SubmitFinished(Result<Route, Error>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Navigate(Route),
}

#[derive(Debug, Default)]
pub struct State {
    filter: RoomFilter,
    rooms: Vec<Room>,
    loading: bool,
    dialog: Option<Dialog>,
    busy: bool,
}

impl State {
    /// Fresh state for the given arrival route: filters are read back
    /// out of the query, then the matching list is fetched.
    pub fn enter(api: &ApiClient, route: &Route) -> (Self, Task<Message>) {
        let filter = RoomFilter::from_route(route);
        let state = Self {
            filter: filter.clone(),
            loading: true,
            ..Self::default()
        };
        (state, load_rooms(api, filter))
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

fn load_rooms(api: &ApiClient, filter: RoomFilter) -> Task<Message> {
    let api = api.clone();
    Task::perform(
        async move { rooms::list_rooms(&api, &filter).await },
        Message::Loaded,
    )
}

fn form_mut(dialog: &mut Dialog) -> Option<&mut RoomForm> {
    match dialog {
        Dialog::Add { form } | Dialog::Edit { form, .. } => Some(form),
        _ => None,
    }
}

pub fn update(
    state: &mut State,
    api: &ApiClient,
    feedback: &mut Presenter,
    message: Message,
) -> Action {
    match message {
        Message::Loaded(Ok(rooms)) => {
            state.loading = false;
            state.rooms = rooms;
            Action::None
        }
        Message::Loaded(Err(error)) => {
            state.loading = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
        Message::FilterNameChanged(value) => {
            state.filter.name = value;
            Action::None
        }
        Message::FilterLocationChanged(value) => {
            state.filter.location = value;
            Action::None
        }
        Message::FilterFloorChanged(value) => {
            state.filter.floor = value;
            Action::None
        }
        Message::ApplyFilters => {
            Action::Navigate(state.filter.apply_to(Route::new(PATH)))
        }
        Message::ClearFilters => Action::Navigate(Route::new(PATH)),
        Message::OpenAdd => {
            state.dialog = Some(Dialog::Add {
                form: RoomForm::default(),
            });
            Action::None
        }
        Message::OpenEdit(room_id) => {
            if let Some(room) = state.rooms.iter().find(|room| room.id == room_id) {
                state.dialog = Some(Dialog::Edit {
                    room_id,
                    form: RoomForm::from_room(room),
                });
            }
            Action::None
        }
        Message::OpenImage(room_id) => {
            if let Some(room) = state.rooms.iter().find(|room| room.id == room_id) {
                state.dialog = Some(Dialog::Image {
                    room_id,
                    room_name: room.room_name.clone(),
                    image_url: room.image_url.clone().unwrap_or_default(),
                });
            }
            Action::None
        }
        Message::OpenDelete(room_id) => {
            if let Some(room) = state.rooms.iter().find(|room| room.id == room_id) {
                state.dialog = Some(Dialog::Delete {
                    room_id,
                    room_name: room.room_name.clone(),
                });
            }
            Action::None
        }
        Message::CloseDialog => {
            state.dialog = None;
            Action::None
        }
        Message::FormTextChanged(field, value) => {
            if let Some(form) = state.dialog.as_mut().and_then(form_mut) {
                match field {
                    FormField::Name => form.room_name = value,
                    FormField::Capacity => form.capacity = value,
                    FormField::Location => form.location = value,
                    FormField::Floor => form.floor = value,
                    FormField::Description => form.description = value,
                    FormField::ImageUrl => form.image_url = value,
                }
            }
            Action::None
        }
        Message::FormFeatureToggled(feature, value) => {
            if let Some(form) = state.dialog.as_mut().and_then(form_mut) {
                match feature {
                    Feature::Projector => form.has_projector = value,
                    Feature::Screen => form.has_screen = value,
                    Feature::Speaker => form.has_speaker = value,
                    Feature::Computer => form.has_computer = value,
                    Feature::Whiteboard => form.has_whiteboard = value,
                }
            }
            Action::None
        }
        Message::ImageUrlChanged(value) => {
            if let Some(Dialog::Image { image_url, .. }) = state.dialog.as_mut() {
                *image_url = value;
            }
            Action::None
        }
        Message::Submit => {
            if state.busy {
                return Action::None;
            }
            let Some(dialog) = state.dialog.clone() else {
                return Action::None;
            };

            let task = match dialog {
                Dialog::Add { form } | Dialog::Edit { form, .. }
                    if !validate::all_present(&[&form.room_name, &form.capacity]) =>
                {
                    feedback.show_banner("Please fill in all required fields.", Severity::Danger);
                    return Action::None;
                }
                Dialog::Add { form } | Dialog::Edit { form, .. }
                    if form.capacity.parse::<u32>().is_err() =>
                {
                    feedback.show_banner("Capacity must be a whole number.", Severity::Danger);
                    return Action::None;
                }
                Dialog::Add { form } => {
                    let api = api.clone();
                    Task::perform(
                        async move { rooms::create_room(&api, &form).await },
                        Message::SubmitFinished,
                    )
                }
                Dialog::Edit { room_id, form } => {
                    let api = api.clone();
                    Task::perform(
                        async move { rooms::update_room(&api, room_id, &form).await },
                        Message::SubmitFinished,
                    )
                }
                Dialog::Image {
                    room_id, image_url, ..
                } => {
                    let api = api.clone();
                    Task::perform(
                        async move { rooms::update_room_image(&api, room_id, &image_url).await },
                        Message::SubmitFinished,
                    )
                }
                Dialog::Delete { room_id, .. } => {
                    let api = api.clone();
                    Task::perform(
                        async move { rooms::delete_room(&api, room_id).await },
                        Message::SubmitFinished,
                    )
                }
            };

            state.busy = true;
            Action::Run(task)
        }
        Message::SubmitFinished(Ok(route)) => {
            state.busy = false;
            state.dialog = None;
            // The service answered with the rooms page plus a result
            // flag; arriving there lets the flag router present it.
            Action::Navigate(route)
        }
        Message::SubmitFinished(Err(error)) => {
            state.busy = false;
            feedback.show_banner(error.to_string(), Severity::Danger);
            Action::None
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let title = text("Meeting rooms").size(24);

    let filters = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            text_input("Room name", &state.filter.name)
                .on_input(Message::FilterNameChanged)
                .on_submit(Message::ApplyFilters)
                .padding(spacing::SM),
        )
        .push(
            text_input("Location", &state.filter.location)
                .on_input(Message::FilterLocationChanged)
                .padding(spacing::SM),
        )
        .push(
            text_input("Floor", &state.filter.floor)
                .on_input(Message::FilterFloorChanged)
                .padding(spacing::SM)
                .width(Length::Fixed(90.0)),
        )
        .push(
            button(text("Apply").size(14))
                .on_press(Message::ApplyFilters)
                .style(button::primary),
        )
        .push(
            button(text("Clear").size(14))
                .on_press(Message::ClearFilters)
                .style(button::secondary),
        )
        .push(
            button(text("Add room").size(14))
                .on_press(Message::OpenAdd)
                .style(button::success),
        );

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(title)
        .push(filters);

    if let Some(dialog) = &state.dialog {
        column = column.push(dialog_panel(dialog, state.busy));
    }

    if state.loading {
        column = column.push(text("Loading rooms...").size(14));
    } else if state.rooms.is_empty() {
        column = column.push(text("No rooms match the current filters.").size(14));
    } else {
        for room in &state.rooms {
            column = column.push(room_row(room));
        }
    }

    scrollable(container(column).padding(spacing::LG).width(Length::Fill)).into()
}

fn features_summary(room: &Room) -> String {
    let mut features = Vec::new();
    if room.has_projector {
        features.push("projector");
    }
    if room.has_screen {
        features.push("screen");
    }
    if room.has_speaker {
        features.push("speaker");
    }
    if room.has_computer {
        features.push("computer");
    }
    if room.has_whiteboard {
        features.push("whiteboard");
    }
    if features.is_empty() {
        "no equipment".to_string()
    } else {
        features.join(", ")
    }
}

fn room_row(room: &Room) -> Element<'_, Message> {
    let mut place = Vec::new();
    if let Some(location) = &room.location {
        place.push(location.clone());
    }
    if let Some(floor) = &room.floor {
        place.push(format!("floor {floor}"));
    }
    let place = if place.is_empty() {
        "location unknown".to_string()
    } else {
        place.join(", ")
    };

    let summary = Column::new()
        .spacing(spacing::XS)
        .push(text(format!("{} (seats {})", room.room_name, room.capacity)).size(15))
        .push(text(format!("{place} - {}", features_summary(room))).size(13));

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text("Edit").size(13))
                .on_press(Message::OpenEdit(room.id))
                .style(button::secondary),
        )
        .push(
            button(text("Image").size(13))
                .on_press(Message::OpenImage(room.id))
                .style(button::secondary),
        )
        .push(
            button(text("Delete").size(13))
                .on_press(Message::OpenDelete(room.id))
                .style(button::danger),
        );

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(container(summary).width(Length::Fill))
            .push(actions),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(|theme: &Theme| styles::card(theme))
    .into()
}

fn dialog_panel(dialog: &Dialog, busy: bool) -> Element<'_, Message> {
    let (title, body): (String, Element<'_, Message>) = match dialog {
        Dialog::Add { form } => ("Add meeting room".to_string(), form_body(form)),
        Dialog::Edit { form, .. } => ("Edit meeting room".to_string(), form_body(form)),
        Dialog::Image {
            room_name,
            image_url,
            ..
        } => (
            format!("Update image for \"{room_name}\""),
            text_input("Image URL", image_url)
                .on_input(Message::ImageUrlChanged)
                .padding(spacing::SM)
                .into(),
        ),
        Dialog::Delete { room_name, .. } => (
            "Delete meeting room".to_string(),
            text(format!(
                "Are you sure you want to delete \"{room_name}\"? This cannot be undone."
            ))
            .size(14)
            .into(),
        ),
    };

    let submit_label = match (dialog, busy) {
        (_, true) => "Working...",
        (Dialog::Delete { .. }, _) => "Delete",
        _ => "Save",
    };
    let mut submit = button(text(submit_label).size(14))
        .padding([spacing::XS, spacing::MD])
        .style(match dialog {
            Dialog::Delete { .. } => button::danger,
            _ => button::primary,
        });
    if !busy {
        submit = submit.on_press(Message::Submit);
    }

    container(
        Column::new()
            .spacing(spacing::SM)
            .push(text(title).size(16))
            .push(body)
            .push(
                Row::new().spacing(spacing::SM).push(submit).push(
                    button(text("Cancel").size(14))
                        .on_press(Message::CloseDialog)
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

fn form_body(form: &RoomForm) -> Element<'_, Message> {
    let field = |placeholder, value, kind| {
        text_input(placeholder, value)
            .on_input(move |text| Message::FormTextChanged(kind, text))
            .padding(spacing::SM)
    };

    let features = Row::new()
        .spacing(spacing::MD)
        .push(
            checkbox(form.has_projector).label("Projector")
                .on_toggle(|value| Message::FormFeatureToggled(Feature::Projector, value)),
        )
        .push(
            checkbox(form.has_screen).label("Screen")
                .on_toggle(|value| Message::FormFeatureToggled(Feature::Screen, value)),
        )
        .push(
            checkbox(form.has_speaker).label("Speaker")
                .on_toggle(|value| Message::FormFeatureToggled(Feature::Speaker, value)),
        )
        .push(
            checkbox(form.has_computer).label("Computer")
                .on_toggle(|value| Message::FormFeatureToggled(Feature::Computer, value)),
        )
        .push(
            checkbox(form.has_whiteboard).label("Whiteboard")
                .on_toggle(|value| Message::FormFeatureToggled(Feature::Whiteboard, value)),
        );

    Column::new()
        .spacing(spacing::SM)
        .push(
            Row::new()
                .spacing(spacing::SM)
                .push(field("Room name", &form.room_name, FormField::Name))
                .push(
                    field("Capacity", &form.capacity, FormField::Capacity)
                        .width(Length::Fixed(110.0)),
                ),
        )
        .push(
            Row::new()
                .spacing(spacing::SM)
                .push(field("Location", &form.location, FormField::Location))
                .push(field("Floor", &form.floor, FormField::Floor).width(Length::Fixed(110.0))),
        )
        .push(features)
        .push(field("Description", &form.description, FormField::Description))
        .push(field("Image URL", &form.image_url, FormField::ImageUrl))
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

    fn sample_room(id: u64, name: &str) -> Room {
        Room {
            id,
            room_name: name.into(),
            capacity: 8,
            location: Some("HQ".into()),
            floor: Some("2".into()),
            has_projector: true,
            has_screen: false,
            has_speaker: false,
            has_computer: false,
            has_whiteboard: true,
            description: None,
            image_url: Some("/img/blue.jpg".into()),
        }
    }

    #[test]
    fn message_table_covers_all_eight_flags() {
        let table = message_table();
        assert_eq!(table.len(), 8);
        for key in [
            "success-add",
            "success-update",
            "success-delete",
            "success-image",
            "error-add",
            "error-update",
            "error-delete",
            "error-image",
        ] {
            assert!(table.keys().contains(&key), "missing {key}");
        }
    }

    #[test]
    fn enter_reads_filters_back_from_the_route() {
        let route = Route::parse("/admin/rooms?name=blue&floor=2").unwrap();
        let (state, _task) = State::enter(&api(), &route);
        assert_eq!(state.filter.name, "blue");
        assert_eq!(state.filter.floor, "2");
        assert!(state.filter.location.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn apply_filters_navigates_with_query_parameters() {
        let mut state = State::default();
        state.filter.name = "blue".into();
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::ApplyFilters);

        match action {
            Action::Navigate(route) => {
                assert_eq!(route.to_string(), "/admin/rooms?name=blue");
            }
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn clear_filters_navigates_to_the_bare_path() {
        let mut state = State::default();
        state.filter.name = "blue".into();
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::ClearFilters);

        match action {
            Action::Navigate(route) => assert_eq!(route.to_string(), PATH),
            _ => panic!("expected navigation"),
        }
    }

    #[test]
    fn edit_dialog_prefills_from_the_typed_row() {
        let mut state = State::default();
        state.rooms = vec![sample_room(4, "Blue Room")];
        let mut feedback = Presenter::new();

        update(&mut state, &api(), &mut feedback, Message::OpenEdit(4));

        match &state.dialog {
            Some(Dialog::Edit { room_id, form }) => {
                assert_eq!(*room_id, 4);
                assert_eq!(form.room_name, "Blue Room");
                assert_eq!(form.capacity, "8");
                assert!(form.has_whiteboard);
            }
            other => panic!("expected edit dialog, got {other:?}"),
        }
    }

    #[test]
    fn submit_requires_name_and_capacity() {
        let mut state = State::default();
        state.dialog = Some(Dialog::Add {
            form: RoomForm::default(),
        });
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::Submit);

        assert!(matches!(action, Action::None));
        assert!(!state.busy);
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("required"));
    }

    #[test]
    fn submit_rejects_a_non_numeric_capacity() {
        let mut state = State::default();
        state.dialog = Some(Dialog::Add {
            form: RoomForm {
                room_name: "Blue Room".into(),
                capacity: "lots".into(),
                ..RoomForm::default()
            },
        });
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::Submit);

        assert!(matches!(action, Action::None));
        assert!(feedback
            .banner(DEFAULT_REGION)
            .unwrap()
            .text()
            .contains("whole number"));
    }

    #[test]
    fn valid_submission_goes_busy() {
        let mut state = State::default();
        state.dialog = Some(Dialog::Add {
            form: RoomForm {
                room_name: "Blue Room".into(),
                capacity: "8".into(),
                ..RoomForm::default()
            },
        });
        let mut feedback = Presenter::new();

        let action = update(&mut state, &api(), &mut feedback, Message::Submit);

        assert!(matches!(action, Action::Run(_)));
        assert!(state.busy);
    }

    #[test]
    fn redirect_result_navigates_to_the_flagged_route() {
        let mut state = State::default();
        state.busy = true;
        state.dialog = Some(Dialog::Delete {
            room_id: 4,
            room_name: "Blue Room".into(),
        });
        let mut feedback = Presenter::new();

        let route = Route::parse("/admin/rooms?success-delete").unwrap();
        let action = update(
            &mut state,
            &api(),
            &mut feedback,
            Message::SubmitFinished(Ok(route)),
        );

        match action {
            Action::Navigate(route) => {
                assert!(route.has_param("success-delete"));
            }
            _ => panic!("expected navigation"),
        }
        assert!(state.dialog.is_none());
        assert!(!state.busy);
    }

    #[test]
    fn transport_failure_stays_on_the_page_with_a_banner() {
        let mut state = State::default();
        state.busy = true;
        let mut feedback = Presenter::new();

        let action = update(
            &mut state,
            &api(),
            &mut feedback,
            Message::SubmitFinished(Err(Error::Http("connection refused".into()))),
        );

        assert!(matches!(action, Action::None));
        assert!(feedback.banner(DEFAULT_REGION).is_some());
    }

    #[test]
    fn form_edits_land_in_the_open_dialog() {
        let mut state = State::default();
        state.dialog = Some(Dialog::Add {
            form: RoomForm::default(),
        });
        let mut feedback = Presenter::new();

        update(
            &mut state,
            &api(),
            &mut feedback,
            Message::FormTextChanged(FormField::Name, "Annex".into()),
        );
        update(
            &mut state,
            &api(),
            &mut feedback,
            Message::FormFeatureToggled(Feature::Speaker, true),
        );

        match &state.dialog {
            Some(Dialog::Add { form }) => {
                assert_eq!(form.room_name, "Annex");
                assert!(form.has_speaker);
            }
            other => panic!("expected add dialog, got {other:?}"),
        }
    }

    #[test]
    fn view_renders_each_dialog() {
        let mut state = State::default();
        state.rooms = vec![sample_room(1, "Blue Room"), sample_room(2, "Annex")];
        let _ = view(&state);

        for dialog in [
            Dialog::Add {
                form: RoomForm::default(),
            },
            Dialog::Edit {
                room_id: 1,
                form: RoomForm::from_room(&sample_room(1, "Blue Room")),
            },
            Dialog::Image {
                room_id: 1,
                room_name: "Blue Room".into(),
                image_url: String::new(),
            },
            Dialog::Delete {
                room_id: 1,
                room_name: "Blue Room".into(),
            },
        ] {
            state.dialog = Some(dialog);
            let _ = view(&state);
        }
    }
}
