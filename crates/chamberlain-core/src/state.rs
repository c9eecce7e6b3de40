// ── Door state vocabularies ──
//
// Three vocabularies meet here: the remote API's integer door-state codes,
// the bridge protocol's numeric characteristic values, and the lowercase
// labels used in log lines. All tables are fixed for the accessory's life.

use strum::{Display, IntoStaticStr};

use crate::error::CoreError;

// ── Remote vocabulary ────────────────────────────────────────────────

/// Remote codes reported by `doorstate`.
pub mod remote {
    pub const OPEN: i64 = 1;
    pub const CLOSED: i64 = 2;
    pub const OPENING: i64 = 4;
    pub const CLOSING: i64 = 5;

    /// Codes accepted by `desireddoorstate`. Closing is written as 0 even
    /// though a closed door reads back as 2.
    pub const SET_OPEN: i64 = 1;
    pub const SET_CLOSED: i64 = 0;
}

// ── Protocol vocabulary ──────────────────────────────────────────────

/// Observed door position as exposed through `doorstate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum CurrentDoorState {
    Open,
    Closed,
    Opening,
    Closing,
}

impl CurrentDoorState {
    pub const ALL: [Self; 4] = [Self::Open, Self::Closed, Self::Opening, Self::Closing];

    /// Human-readable label for log lines.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Whether the door has come to rest at `target`.
    ///
    /// Moving states never match, so a door that is opening toward an open
    /// target is still considered in transit.
    pub fn settled_at(self, target: TargetDoorState) -> bool {
        matches!(
            (self, target),
            (Self::Open, TargetDoorState::Open) | (Self::Closed, TargetDoorState::Closed)
        )
    }
}

/// Requested door position as written through `desireddoorstate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TargetDoorState {
    Open,
    Closed,
}

/// Numeric characteristic values of the bridge protocol.
///
/// Supplied by the host at construction. The defaults are the HomeKit
/// `CurrentDoorState` / `TargetDoorState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolCodes {
    pub current_open: u8,
    pub current_closed: u8,
    pub current_opening: u8,
    pub current_closing: u8,
    pub target_open: u8,
    pub target_closed: u8,
}

impl Default for ProtocolCodes {
    fn default() -> Self {
        Self {
            current_open: 0,
            current_closed: 1,
            current_opening: 2,
            current_closing: 3,
            target_open: 0,
            target_closed: 1,
        }
    }
}

impl ProtocolCodes {
    /// Check that both tables are bijective and that target values share
    /// the current values' numbering, which target labels rely on.
    pub fn validate(&self) -> Result<(), CoreError> {
        let current = [
            self.current_open,
            self.current_closed,
            self.current_opening,
            self.current_closing,
        ];
        for (i, a) in current.iter().enumerate() {
            if current.iter().skip(i + 1).any(|b| b == a) {
                return Err(CoreError::Config {
                    message: format!("current door state code {a} is used twice"),
                });
            }
        }

        if self.target_open == self.target_closed {
            return Err(CoreError::Config {
                message: format!(
                    "target door state code {} is used twice",
                    self.target_open
                ),
            });
        }

        if self.target_open != self.current_open || self.target_closed != self.current_closed {
            return Err(CoreError::Config {
                message: "target open/closed codes must equal current open/closed codes".into(),
            });
        }

        Ok(())
    }
}

// ── Translator ───────────────────────────────────────────────────────

/// Lookup tables between remote codes, protocol values and labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateTranslator {
    codes: ProtocolCodes,
}

impl StateTranslator {
    pub fn new(codes: ProtocolCodes) -> Result<Self, CoreError> {
        codes.validate()?;
        Ok(Self { codes })
    }

    pub fn codes(&self) -> &ProtocolCodes {
        &self.codes
    }

    /// Map a remote `doorstate` code. Codes outside `{1, 2, 4, 5}` are an
    /// explicit [`CoreError::UnknownDoorState`].
    pub fn remote_to_current(code: i64) -> Result<CurrentDoorState, CoreError> {
        match code {
            remote::OPEN => Ok(CurrentDoorState::Open),
            remote::CLOSED => Ok(CurrentDoorState::Closed),
            remote::OPENING => Ok(CurrentDoorState::Opening),
            remote::CLOSING => Ok(CurrentDoorState::Closing),
            other => Err(CoreError::UnknownDoorState { code: other }),
        }
    }

    /// Map a target to the code `desireddoorstate` expects.
    pub fn target_to_remote(target: TargetDoorState) -> i64 {
        match target {
            TargetDoorState::Open => remote::SET_OPEN,
            TargetDoorState::Closed => remote::SET_CLOSED,
        }
    }

    pub fn current_to_code(&self, state: CurrentDoorState) -> u8 {
        match state {
            CurrentDoorState::Open => self.codes.current_open,
            CurrentDoorState::Closed => self.codes.current_closed,
            CurrentDoorState::Opening => self.codes.current_opening,
            CurrentDoorState::Closing => self.codes.current_closing,
        }
    }

    pub fn current_from_code(&self, value: u8) -> Option<CurrentDoorState> {
        CurrentDoorState::ALL
            .into_iter()
            .find(|state| self.current_to_code(*state) == value)
    }

    pub fn target_to_code(&self, target: TargetDoorState) -> u8 {
        match target {
            TargetDoorState::Open => self.codes.target_open,
            TargetDoorState::Closed => self.codes.target_closed,
        }
    }

    pub fn target_from_code(&self, value: u8) -> Option<TargetDoorState> {
        if value == self.codes.target_open {
            Some(TargetDoorState::Open)
        } else if value == self.codes.target_closed {
            Some(TargetDoorState::Closed)
        } else {
            None
        }
    }

    /// Label a protocol value of either characteristic.
    pub fn label_of(&self, value: u8) -> Option<&'static str> {
        self.current_from_code(value).map(CurrentDoorState::label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_remote_codes_map_to_documented_states_and_labels() {
        let translator = StateTranslator::default();
        let cases = [
            (1, CurrentDoorState::Open, "open"),
            (2, CurrentDoorState::Closed, "closed"),
            (4, CurrentDoorState::Opening, "opening"),
            (5, CurrentDoorState::Closing, "closing"),
        ];

        for (code, state, label) in cases {
            let mapped = StateTranslator::remote_to_current(code).unwrap();
            assert_eq!(mapped, state);
            let value = translator.current_to_code(mapped);
            assert_eq!(translator.label_of(value), Some(label));
        }
    }

    #[test]
    fn unmapped_remote_codes_are_unknown() {
        for code in [0, 3, 6, -1] {
            let err = StateTranslator::remote_to_current(code).unwrap_err();
            assert!(matches!(err, CoreError::UnknownDoorState { code: c } if c == code));
        }
    }

    #[test]
    fn target_uses_write_convention_for_closed() {
        assert_eq!(StateTranslator::target_to_remote(TargetDoorState::Open), 1);
        assert_eq!(StateTranslator::target_to_remote(TargetDoorState::Closed), 0);
        assert_ne!(
            StateTranslator::target_to_remote(TargetDoorState::Closed),
            remote::CLOSED
        );
    }

    #[test]
    fn target_values_reuse_current_labels() {
        let translator = StateTranslator::default();
        let open = translator.target_to_code(TargetDoorState::Open);
        let closed = translator.target_to_code(TargetDoorState::Closed);
        assert_eq!(translator.label_of(open), Some("open"));
        assert_eq!(translator.label_of(closed), Some("closed"));
    }

    #[test]
    fn protocol_codes_round_trip_through_custom_table() {
        let codes = ProtocolCodes {
            current_open: 10,
            current_closed: 11,
            current_opening: 12,
            current_closing: 13,
            target_open: 10,
            target_closed: 11,
        };
        let translator = StateTranslator::new(codes).unwrap();
        assert_eq!(translator.current_from_code(12), Some(CurrentDoorState::Opening));
        assert_eq!(translator.target_from_code(11), Some(TargetDoorState::Closed));
        assert_eq!(translator.target_from_code(12), None);
        assert_eq!(translator.label_of(99), None);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let codes = ProtocolCodes {
            current_opening: 1,
            ..ProtocolCodes::default()
        };
        assert!(StateTranslator::new(codes).is_err());
    }

    #[test]
    fn target_codes_must_match_current_numbering() {
        let codes = ProtocolCodes {
            target_open: 2,
            ..ProtocolCodes::default()
        };
        assert!(matches!(
            StateTranslator::new(codes),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn target_display_matches_current_labels() {
        assert_eq!(TargetDoorState::Open.to_string(), CurrentDoorState::Open.label());
        assert_eq!(TargetDoorState::Closed.to_string(), CurrentDoorState::Closed.label());
    }

    #[test]
    fn only_resting_states_settle() {
        assert!(CurrentDoorState::Closed.settled_at(TargetDoorState::Closed));
        assert!(CurrentDoorState::Open.settled_at(TargetDoorState::Open));
        assert!(!CurrentDoorState::Opening.settled_at(TargetDoorState::Open));
        assert!(!CurrentDoorState::Closing.settled_at(TargetDoorState::Closed));
        assert!(!CurrentDoorState::Open.settled_at(TargetDoorState::Closed));
    }
}
