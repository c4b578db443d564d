// SPDX-License-Identifier: MPL-2.0
//! Meeting-room administration endpoints.
//!
//! The list is a JSON endpoint; the mutating forms are posts against the
//! server-rendered room controllers, which answer with a redirect whose
//! `Location` names the rooms page plus a result flag
//! (`?success-add`, `?error-delete`, ...). Callers navigate to that
//! route and let the flag router present the outcome.

use super::{ApiClient, Envelope};
use crate::error::Result;
use crate::nav::Route;
use serde::Deserialize;

const LIST_PATH: &str = "/api/admin/rooms";
const ADD_PATH: &str = "/admin/rooms/add";
const UPDATE_PATH: &str = "/admin/rooms/update";
const DELETE_PATH: &str = "/admin/rooms/delete";
const UPDATE_IMAGE_PATH: &str = "/admin/rooms/updateImage";

/// One meeting room as the service reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    pub room_name: String,
    pub capacity: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub has_projector: bool,
    #[serde(default)]
    pub has_screen: bool,
    #[serde(default)]
    pub has_speaker: bool,
    #[serde(default)]
    pub has_computer: bool,
    #[serde(default)]
    pub has_whiteboard: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Server-side list filters. Empty fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub name: String,
    pub location: String,
    pub floor: String,
}

impl RoomFilter {
    /// Appends the non-empty filters to `route` as query parameters, the
    /// same way the rooms page encodes them when navigating.
    #[must_use]
    pub fn apply_to(&self, mut route: Route) -> Route {
        if !self.name.is_empty() {
            route = route.with_param("name", self.name.clone());
        }
        if !self.location.is_empty() {
            route = route.with_param("location", self.location.clone());
        }
        if !self.floor.is_empty() {
            route = route.with_param("floor", self.floor.clone());
        }
        route
    }

    /// Reads the filters back out of a route's query.
    #[must_use]
    pub fn from_route(route: &Route) -> Self {
        Self {
            name: route.param("name").unwrap_or_default().to_string(),
            location: route.param("location").unwrap_or_default().to_string(),
            floor: route.param("floor").unwrap_or_default().to_string(),
        }
    }
}

/// Fetches rooms matching `filter`.
pub async fn list_rooms(client: &ApiClient, filter: &RoomFilter) -> Result<Vec<Room>> {
    const FALLBACK: &str = "Failed to load meeting rooms.";
    let path = filter.apply_to(Route::new(LIST_PATH)).to_string();
    let envelope: Envelope<Vec<Room>> = client.get_envelope(&path, FALLBACK).await?;
    Ok(envelope.into_data(FALLBACK)?.unwrap_or_default())
}

/// Editable room fields, posted form-encoded like the page forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub room_name: String,
    pub capacity: String,
    pub location: String,
    pub floor: String,
    pub has_projector: bool,
    pub has_screen: bool,
    pub has_speaker: bool,
    pub has_computer: bool,
    pub has_whiteboard: bool,
    pub description: String,
    pub image_url: String,
}

impl RoomForm {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("roomName", self.room_name.clone()),
            ("capacity", self.capacity.clone()),
            ("location", self.location.clone()),
            ("floor", self.floor.clone()),
            ("hasProjector", self.has_projector.to_string()),
            ("hasScreen", self.has_screen.to_string()),
            ("hasSpeaker", self.has_speaker.to_string()),
            ("hasComputer", self.has_computer.to_string()),
            ("hasWhiteboard", self.has_whiteboard.to_string()),
            ("description", self.description.clone()),
            ("imageUrl", self.image_url.clone()),
        ]
    }

    /// Pre-fills the form from an existing room, for the edit dialog.
    #[must_use]
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_name: room.room_name.clone(),
            capacity: room.capacity.to_string(),
            location: room.location.clone().unwrap_or_default(),
            floor: room.floor.clone().unwrap_or_default(),
            has_projector: room.has_projector,
            has_screen: room.has_screen,
            has_speaker: room.has_speaker,
            has_computer: room.has_computer,
            has_whiteboard: room.has_whiteboard,
            description: room.description.clone().unwrap_or_default(),
            image_url: room.image_url.clone().unwrap_or_default(),
        }
    }
}

async fn post_room_form(
    client: &ApiClient,
    path: &str,
    owned: Vec<(&'static str, String)>,
    fallback: &str,
) -> Result<Route> {
    let fields: Vec<(&str, &str)> = owned
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    client.post_form_redirect(path, &fields, fallback).await
}

/// Creates a room; returns the redirect route carrying the result flag.
pub async fn create_room(client: &ApiClient, form: &RoomForm) -> Result<Route> {
    post_room_form(client, ADD_PATH, form.fields(), "Failed to add meeting room.").await
}

/// Updates a room; returns the redirect route carrying the result flag.
pub async fn update_room(client: &ApiClient, room_id: u64, form: &RoomForm) -> Result<Route> {
    let mut fields = form.fields();
    fields.insert(0, ("id", room_id.to_string()));
    post_room_form(
        client,
        UPDATE_PATH,
        fields,
        "Failed to update meeting room.",
    )
    .await
}

/// Deletes a room; returns the redirect route carrying the result flag.
pub async fn delete_room(client: &ApiClient, room_id: u64) -> Result<Route> {
    post_room_form(
        client,
        DELETE_PATH,
        vec![("id", room_id.to_string())],
        "Failed to delete meeting room.",
    )
    .await
}

/// Replaces a room's image; returns the redirect route carrying the
/// result flag.
pub async fn update_room_image(
    client: &ApiClient,
    room_id: u64,
    image_url: &str,
) -> Result<Route> {
    post_room_form(
        client,
        UPDATE_IMAGE_PATH,
        vec![("id", room_id.to_string()), ("imageUrl", image_url.to_string())],
        "Failed to update room image.",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_parses_with_missing_optionals() {
        let body = r#"{"id": 1, "roomName": "Blue Room", "capacity": 8}"#;
        let room: Room = serde_json::from_str(body).expect("parse");
        assert_eq!(room.room_name, "Blue Room");
        assert!(!room.has_projector);
        assert!(room.location.is_none());
    }

    #[test]
    fn filter_skips_empty_fields() {
        let filter = RoomFilter {
            name: "blue".into(),
            location: String::new(),
            floor: "2".into(),
        };
        let route = filter.apply_to(Route::new("/admin/rooms"));
        assert_eq!(route.to_string(), "/admin/rooms?name=blue&floor=2");
    }

    #[test]
    fn filter_round_trips_through_a_route() {
        let filter = RoomFilter {
            name: "Blue Room".into(),
            location: "HQ".into(),
            floor: String::new(),
        };
        let route = filter.apply_to(Route::new("/admin/rooms"));
        assert_eq!(RoomFilter::from_route(&route), filter);
    }

    #[test]
    fn form_fields_carry_feature_booleans_as_strings() {
        let form = RoomForm {
            room_name: "Blue Room".into(),
            capacity: "8".into(),
            has_projector: true,
            ..RoomForm::default()
        };
        let fields = form.fields();
        assert!(fields.contains(&("hasProjector", "true".to_string())));
        assert!(fields.contains(&("hasScreen", "false".to_string())));
    }

    #[test]
    fn form_prefills_from_a_room() {
        let room = Room {
            id: 4,
            room_name: "Annex".into(),
            capacity: 12,
            location: Some("HQ".into()),
            floor: None,
            has_projector: true,
            has_screen: false,
            has_speaker: false,
            has_computer: false,
            has_whiteboard: true,
            description: None,
            image_url: Some("/img/annex.jpg".into()),
        };
        let form = RoomForm::from_room(&room);
        assert_eq!(form.room_name, "Annex");
        assert_eq!(form.capacity, "12");
        assert_eq!(form.location, "HQ");
        assert!(form.floor.is_empty());
        assert!(form.has_whiteboard);
    }
}
