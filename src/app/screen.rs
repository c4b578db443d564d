// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration and the route-path mapping.

/// Screens the client can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    ForgotPassword,
    UserDashboard,
    AdminDashboard,
    Rooms,
    Users,
    Bookings,
    Settings,
}

impl Screen {
    /// Maps a route path to its screen. Unknown paths map to nothing;
    /// the shell falls back to a known route and records a diagnostic.
    #[must_use]
    pub fn for_path(path: &str) -> Option<Self> {
        match path {
            "/" | "/login" => Some(Screen::Login),
            "/register" => Some(Screen::Register),
            "/forgot-password" => Some(Screen::ForgotPassword),
            "/user/dashboard" => Some(Screen::UserDashboard),
            "/admin" => Some(Screen::AdminDashboard),
            "/admin/rooms" => Some(Screen::Rooms),
            "/admin/users" => Some(Screen::Users),
            "/admin/bookings" => Some(Screen::Bookings),
            "/admin/settings" => Some(Screen::Settings),
            _ => None,
        }
    }

    /// Whether the screen needs a signed-in session at all.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Login | Screen::Register | Screen::ForgotPassword)
    }

    /// Whether the screen is part of the admin panel. UI gating only;
    /// the service checks the token server-side on every call.
    #[must_use]
    pub fn admin_only(&self) -> bool {
        matches!(
            self,
            Screen::AdminDashboard
                | Screen::Rooms
                | Screen::Users
                | Screen::Bookings
                | Screen::Settings
        )
    }

    /// Window-title label.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign in",
            Screen::Register => "Register",
            Screen::ForgotPassword => "Reset password",
            Screen::UserDashboard => "Dashboard",
            Screen::AdminDashboard => "Admin",
            Screen::Rooms => "Meeting rooms",
            Screen::Users => "User accounts",
            Screen::Bookings => "Bookings",
            Screen::Settings => "Service settings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_map_to_screens() {
        assert_eq!(Screen::for_path("/login"), Some(Screen::Login));
        assert_eq!(Screen::for_path("/admin/rooms"), Some(Screen::Rooms));
        assert_eq!(Screen::for_path("/user/dashboard"), Some(Screen::UserDashboard));
        assert_eq!(Screen::for_path("/nope"), None);
    }

    #[test]
    fn auth_screens_are_open_to_everyone() {
        assert!(!Screen::Login.requires_auth());
        assert!(!Screen::Register.requires_auth());
        assert!(!Screen::ForgotPassword.requires_auth());
        assert!(Screen::UserDashboard.requires_auth());
    }

    #[test]
    fn admin_gating_covers_the_whole_panel() {
        for screen in [
            Screen::AdminDashboard,
            Screen::Rooms,
            Screen::Users,
            Screen::Bookings,
            Screen::Settings,
        ] {
            assert!(screen.admin_only());
            assert!(screen.requires_auth());
        }
        assert!(!Screen::UserDashboard.admin_only());
    }
}
