//! Fault values captured by a render boundary.

use std::any::Any;
use std::fmt;

use thiserror::Error;

use crate::sanitize::{sanitize_terminal_text, truncate_chars};

/// Upper bound on the characters kept from a fault message.
pub const MAX_FAULT_MESSAGE_CHARS: usize = 2000;

const UNKNOWN_PANIC: &str = "unknown panic";

/// A fault raised while rendering guarded content.
///
/// The message is sanitized and bounded at construction, so it is always
/// safe to print to a terminal or a log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Fault {
    message: String,
}

impl Fault {
    #[must_use]
    pub fn new(message: impl AsRef<str>) -> Self {
        let clean = sanitize_terminal_text(message.as_ref());
        let bounded = truncate_chars(&clean, MAX_FAULT_MESSAGE_CHARS);
        let message = if bounded.trim().is_empty() {
            UNKNOWN_PANIC.to_string()
        } else {
            bounded.into_owned()
        };
        Self { message }
    }

    /// Build a fault from a panic payload.
    ///
    /// `panic!` produces `&'static str` or `String` payloads; a `Fault`
    /// raised through `std::panic::panic_any` is taken as-is.
    #[must_use]
    pub fn from_panic_payload(payload: &(dyn Any + Send)) -> Self {
        if let Some(fault) = payload.downcast_ref::<Fault>() {
            fault.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            Self::new(s)
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Self::new(s)
        } else {
            Self::new(UNKNOWN_PANIC)
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Where in the guarded subtree a fault originated.
///
/// `components` lists the named render scopes that were active when the
/// fault was raised, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultContext {
    location: Option<String>,
    components: Vec<String>,
}

impl FaultContext {
    /// Returns `None` when there is nothing to report.
    #[must_use]
    pub fn new<I, S>(location: Option<&str>, components: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let location = location
            .map(|loc| sanitize_terminal_text(loc).into_owned())
            .filter(|loc| !loc.trim().is_empty());
        let components: Vec<String> = components
            .into_iter()
            .map(|name| sanitize_terminal_text(name.as_ref()).into_owned())
            .filter(|name| !name.trim().is_empty())
            .collect();

        if location.is_none() && components.is_empty() {
            None
        } else {
            Some(Self {
                location,
                components,
            })
        }
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl fmt::Display for FaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(location) = &self.location {
            write!(f, "panicked at {location}")?;
            first = false;
        }
        for name in &self.components {
            if !first {
                f.write_str("\n")?;
            }
            write!(f, "    in {name}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_and_string_payloads_keep_their_text() {
        let payload: Box<dyn Any + Send> = Box::new("x is undefined");
        assert_eq!(Fault::from_panic_payload(&*payload).message(), "x is undefined");

        let payload: Box<dyn Any + Send> = Box::new(String::from("index 7 out of range"));
        assert_eq!(
            Fault::from_panic_payload(&*payload).to_string(),
            "index 7 out of range"
        );
    }

    #[test]
    fn fault_payload_is_taken_as_is() {
        let payload: Box<dyn Any + Send> = Box::new(Fault::new("typed fault"));
        assert_eq!(Fault::from_panic_payload(&*payload), Fault::new("typed fault"));
    }

    #[test]
    fn opaque_payload_becomes_unknown_panic() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(Fault::from_panic_payload(&*payload).message(), "unknown panic");
    }

    #[test]
    fn message_is_sanitized() {
        let fault = Fault::new("bad\x1b]52;c;SGVsbG8=\x07 value\x1b[2J");
        assert_eq!(fault.message(), "bad value");
    }

    #[test]
    fn blank_message_becomes_unknown_panic() {
        assert_eq!(Fault::new("  \x1b[0m ").message(), "unknown panic");
    }

    #[test]
    fn long_message_is_bounded() {
        let fault = Fault::new("a".repeat(MAX_FAULT_MESSAGE_CHARS * 2));
        assert_eq!(fault.message().chars().count(), MAX_FAULT_MESSAGE_CHARS);
        assert!(fault.message().ends_with("..."));
    }

    #[test]
    fn empty_context_is_none() {
        assert!(FaultContext::new(None, Vec::<String>::new()).is_none());
        assert!(FaultContext::new(Some("  "), ["", " "]).is_none());
    }

    #[test]
    fn context_renders_location_then_components() {
        let ctx = FaultContext::new(
            Some("cli/src/demo.rs:88:17"),
            ["Gauge", "Dashboard", "FaultBoundary"],
        )
        .expect("context");
        assert_eq!(
            ctx.to_string(),
            "panicked at cli/src/demo.rs:88:17\n    in Gauge\n    in Dashboard\n    in FaultBoundary"
        );
    }

    #[test]
    fn context_without_location_starts_at_first_component() {
        let ctx = FaultContext::new(None, ["Gauge"]).expect("context");
        assert_eq!(ctx.location(), None);
        assert_eq!(ctx.to_string(), "    in Gauge");
    }
}
