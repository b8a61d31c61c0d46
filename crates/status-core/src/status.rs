//! Phone and call status vocabulary
//!
//! Both vocabularies are closed enums with a total parser: any code that is
//! not recognized lands in the `Unknown` arm instead of producing an error,
//! so an unexpected upstream code still shows up in the channel and on the
//! dashboard.

use std::fmt;

/// Glyph shown for codes outside the vocabulary
pub const UNKNOWN_ICON: &str = "?";

/// Color applied to a status glyph on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    Red,
    Green,
}

impl ColorClass {
    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Red => "red",
            ColorClass::Green => "green",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known state of a phone/user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhoneStatus {
    #[default]
    Unknown,
    DndOn,
    DndOff,
    Offhook,
    Onhook,
    PausedOn,
    PausedOff,
    Login,
    Logout,
    AgentLogin,
    AgentLogout,
    AnsweringCall,
}

impl PhoneStatus {
    /// Every recognized status, in declaration order
    pub const ALL: [PhoneStatus; 11] = [
        PhoneStatus::DndOn,
        PhoneStatus::DndOff,
        PhoneStatus::Offhook,
        PhoneStatus::Onhook,
        PhoneStatus::PausedOn,
        PhoneStatus::PausedOff,
        PhoneStatus::Login,
        PhoneStatus::Logout,
        PhoneStatus::AgentLogin,
        PhoneStatus::AgentLogout,
        PhoneStatus::AnsweringCall,
    ];

    /// Classify a raw action code. Never fails; unrecognized codes are `Unknown`.
    pub fn parse(code: &str) -> Self {
        match code {
            "dnd-on" => PhoneStatus::DndOn,
            "dnd-off" => PhoneStatus::DndOff,
            "offhook" => PhoneStatus::Offhook,
            "onhook" => PhoneStatus::Onhook,
            "paused-on" => PhoneStatus::PausedOn,
            "paused-off" => PhoneStatus::PausedOff,
            "login" => PhoneStatus::Login,
            "logout" => PhoneStatus::Logout,
            "agent-login" => PhoneStatus::AgentLogin,
            "agent-logout" => PhoneStatus::AgentLogout,
            "answering-call" => PhoneStatus::AnsweringCall,
            _ => PhoneStatus::Unknown,
        }
    }

    /// Wire code of this status
    pub fn code(&self) -> &'static str {
        match self {
            PhoneStatus::Unknown => "unknown",
            PhoneStatus::DndOn => "dnd-on",
            PhoneStatus::DndOff => "dnd-off",
            PhoneStatus::Offhook => "offhook",
            PhoneStatus::Onhook => "onhook",
            PhoneStatus::PausedOn => "paused-on",
            PhoneStatus::PausedOff => "paused-off",
            PhoneStatus::Login => "login",
            PhoneStatus::Logout => "logout",
            PhoneStatus::AgentLogin => "agent-login",
            PhoneStatus::AgentLogout => "agent-logout",
            PhoneStatus::AnsweringCall => "answering-call",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PhoneStatus::DndOn => "🚫",
            PhoneStatus::DndOff => "✔",
            PhoneStatus::Offhook => "🕻",
            PhoneStatus::Onhook => "✔",
            PhoneStatus::PausedOn => "⏸",
            PhoneStatus::PausedOff => "✔",
            PhoneStatus::Login => "☎←",
            PhoneStatus::Logout => "☎→",
            PhoneStatus::AgentLogin => "⛟←",
            PhoneStatus::AgentLogout => "⛟→",
            PhoneStatus::AnsweringCall => "⚡",
            PhoneStatus::Unknown => UNKNOWN_ICON,
        }
    }

    pub fn color_class(&self) -> Option<ColorClass> {
        match self {
            PhoneStatus::DndOn | PhoneStatus::Offhook => Some(ColorClass::Red),
            PhoneStatus::DndOff | PhoneStatus::Onhook => Some(ColorClass::Green),
            _ => None,
        }
    }

    /// Icon as an HTML fragment, wrapped in a colored span when a color applies
    pub fn html(&self) -> String {
        match self.color_class() {
            Some(color) => format!("<span style=\"color: {}\">{}</span>", color, self.icon()),
            None => self.icon().to_string(),
        }
    }

    /// Chat message announcing that `user` entered this status
    pub fn message(&self, user: &str) -> String {
        match self {
            PhoneStatus::DndOn => format!("{} DND on", user),
            PhoneStatus::DndOff => format!("{} DND off", user),
            PhoneStatus::Offhook => format!("{} connected", user),
            PhoneStatus::Onhook => format!("{} disconnected", user),
            PhoneStatus::PausedOn => format!("{} paused", user),
            PhoneStatus::PausedOff => format!("{} unpaused", user),
            PhoneStatus::Login => format!("{} logged in", user),
            PhoneStatus::Logout => format!("{} logged out", user),
            PhoneStatus::AgentLogin => format!("{} logged in as agent", user),
            PhoneStatus::AgentLogout => format!("{} logged out as agent", user),
            PhoneStatus::AnsweringCall => format!("{} answers call", user),
            PhoneStatus::Unknown => format!("unknown phone status for user: {}", user),
        }
    }

    /// Offhook/onhook transitions, the noisy part of the feed
    pub fn is_connection_change(&self) -> bool {
        matches!(self, PhoneStatus::Offhook | PhoneStatus::Onhook)
    }
}

impl From<&str> for PhoneStatus {
    fn from(code: &str) -> Self {
        PhoneStatus::parse(code)
    }
}

impl fmt::Display for PhoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Transient call event for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CallStatus {
    IncomingCall,
    IncomingConference,
    UnknownExtension,
    #[default]
    Unknown,
}

impl CallStatus {
    /// Classify a raw action code. Never fails; unrecognized codes are `Unknown`.
    ///
    /// The short forms `incoming-conf` and `unknown-exten` are what the PBX
    /// dialplan scripts send and are accepted alongside the long forms.
    pub fn parse(code: &str) -> Self {
        match code {
            "incoming-call" => CallStatus::IncomingCall,
            "incoming-conference" | "incoming-conf" => CallStatus::IncomingConference,
            "unknown-extension" | "unknown-exten" => CallStatus::UnknownExtension,
            _ => CallStatus::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CallStatus::IncomingCall => "incoming-call",
            CallStatus::IncomingConference => "incoming-conference",
            CallStatus::UnknownExtension => "unknown-extension",
            CallStatus::Unknown => "unknown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CallStatus::IncomingCall => "←⍾",
            CallStatus::IncomingConference => "←⌘",
            CallStatus::UnknownExtension => "←?",
            CallStatus::Unknown => UNKNOWN_ICON,
        }
    }

    /// Chat message announcing a call for `user` from `number`
    pub fn message(&self, user: &str, number: &str) -> String {
        match self {
            CallStatus::IncomingCall | CallStatus::IncomingConference => {
                format!("incoming call for {} from {}", user, number)
            }
            CallStatus::UnknownExtension => {
                format!("incoming call for {} from unknown extension {}", user, number)
            }
            CallStatus::Unknown => {
                format!("unknown call status for user: {} number: {}", user, number)
            }
        }
    }
}

impl From<&str> for CallStatus {
    fn from(code: &str) -> Self {
        CallStatus::parse(code)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_codes_roundtrip_through_parse() {
        for status in PhoneStatus::ALL {
            assert_eq!(PhoneStatus::parse(status.code()), status);
        }
    }

    #[test]
    fn test_phone_status_table() {
        use ColorClass::{Green, Red};

        let table = [
            (PhoneStatus::DndOn, "🚫", Some(Red), "alice DND on"),
            (PhoneStatus::DndOff, "✔", Some(Green), "alice DND off"),
            (PhoneStatus::Offhook, "🕻", Some(Red), "alice connected"),
            (PhoneStatus::Onhook, "✔", Some(Green), "alice disconnected"),
            (PhoneStatus::PausedOn, "⏸", None, "alice paused"),
            (PhoneStatus::PausedOff, "✔", None, "alice unpaused"),
            (PhoneStatus::Login, "☎←", None, "alice logged in"),
            (PhoneStatus::Logout, "☎→", None, "alice logged out"),
            (PhoneStatus::AgentLogin, "⛟←", None, "alice logged in as agent"),
            (PhoneStatus::AgentLogout, "⛟→", None, "alice logged out as agent"),
            (PhoneStatus::AnsweringCall, "⚡", None, "alice answers call"),
        ];
        assert_eq!(table.len(), PhoneStatus::ALL.len());

        for (status, (expected, icon, color, message)) in PhoneStatus::ALL.into_iter().zip(table) {
            assert_eq!(status, expected);
            assert_eq!(status.icon(), icon, "{}", status);
            assert_eq!(status.color_class(), color, "{}", status);
            assert_eq!(status.message("alice"), message, "{}", status);
        }

        assert_eq!(PhoneStatus::Unknown.icon(), UNKNOWN_ICON);
        assert_eq!(PhoneStatus::Unknown.color_class(), None);
    }

    #[test]
    fn test_unrecognized_phone_code_falls_back_to_unknown() {
        for code in ["", "DND-ON", "dnd_on", "reboot", "offhook "] {
            let status = PhoneStatus::parse(code);
            assert_eq!(status, PhoneStatus::Unknown);
            assert_eq!(status.icon(), UNKNOWN_ICON);
            assert_eq!(status.message("alice"), "unknown phone status for user: alice");
        }
    }

    #[test]
    fn test_html_wraps_colored_glyphs_only() {
        assert_eq!(PhoneStatus::DndOn.html(), "<span style=\"color: red\">🚫</span>");
        assert_eq!(PhoneStatus::Onhook.html(), "<span style=\"color: green\">✔</span>");
        assert_eq!(PhoneStatus::PausedOn.html(), "⏸");
    }

    #[test]
    fn test_connection_changes() {
        let noisy: Vec<_> = PhoneStatus::ALL
            .into_iter()
            .filter(|s| s.is_connection_change())
            .collect();
        assert_eq!(noisy, vec![PhoneStatus::Offhook, PhoneStatus::Onhook]);
    }

    #[test]
    fn test_call_codes() {
        assert_eq!(CallStatus::parse("incoming-call"), CallStatus::IncomingCall);
        assert_eq!(CallStatus::parse("incoming-conference"), CallStatus::IncomingConference);
        assert_eq!(CallStatus::parse("incoming-conf"), CallStatus::IncomingConference);
        assert_eq!(CallStatus::parse("unknown-extension"), CallStatus::UnknownExtension);
        assert_eq!(CallStatus::parse("unknown-exten"), CallStatus::UnknownExtension);
        // phone codes are not call codes
        assert_eq!(CallStatus::parse("dnd-on"), CallStatus::Unknown);
    }

    #[test]
    fn test_call_status_table() {
        let table = [
            (CallStatus::IncomingCall, "←⍾", "incoming call for alice from 5551234"),
            (CallStatus::IncomingConference, "←⌘", "incoming call for alice from 5551234"),
            (
                CallStatus::UnknownExtension,
                "←?",
                "incoming call for alice from unknown extension 5551234",
            ),
            (
                CallStatus::Unknown,
                UNKNOWN_ICON,
                "unknown call status for user: alice number: 5551234",
            ),
        ];

        for (status, icon, message) in table {
            assert_eq!(status.icon(), icon, "{}", status);
            assert_eq!(status.message("alice", "5551234"), message, "{}", status);
            if status != CallStatus::Unknown {
                assert_eq!(CallStatus::parse(status.code()), status);
            }
        }
        assert_eq!(CallStatus::parse("hangup"), CallStatus::Unknown);
    }
}
