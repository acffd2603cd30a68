//! Carrier gateway table for SMS-over-email delivery.

use std::fmt;

use crate::error::{AlertrError, Result};

/// Mobile carriers with a known email-to-SMS gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    Verizon,
    Att,
    Tmobile,
    Sprint,
    Boost,
    Cricket,
}

impl Carrier {
    pub const ALL: [Carrier; 6] = [
        Carrier::Verizon,
        Carrier::Att,
        Carrier::Tmobile,
        Carrier::Sprint,
        Carrier::Boost,
        Carrier::Cricket,
    ];

    /// Look up a carrier by name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "verizon" => Ok(Carrier::Verizon),
            "att" => Ok(Carrier::Att),
            "tmobile" => Ok(Carrier::Tmobile),
            "sprint" => Ok(Carrier::Sprint),
            "boost" => Ok(Carrier::Boost),
            "cricket" => Ok(Carrier::Cricket),
            _ => {
                let supported = Carrier::ALL.map(|c| c.name()).join(", ");
                Err(AlertrError::UnknownCarrier(format!(
                    "{} (supported: {})",
                    name, supported
                )))
            }
        }
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Carrier::Verizon => "verizon",
            Carrier::Att => "att",
            Carrier::Tmobile => "tmobile",
            Carrier::Sprint => "sprint",
            Carrier::Boost => "boost",
            Carrier::Cricket => "cricket",
        }
    }

    /// SMS gateway domain for this carrier.
    pub fn gateway(&self) -> &'static str {
        match self {
            Carrier::Verizon => "vtext.com",
            Carrier::Att => "txt.att.net",
            Carrier::Tmobile => "tmomail.net",
            Carrier::Sprint => "messaging.sprintpcs.com",
            Carrier::Boost => "sms.myboostmobile.com",
            Carrier::Cricket => "sms.cricketwireless.net",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build a gateway address from a phone number.
///
/// Formatting characters `(`, `)`, and `-` are stripped; anything else
/// non-numeric rejects the number.
pub fn format_sms_number(number: &str, gateway: &str) -> Result<String> {
    let digits: String = number
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-'))
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AlertrError::InvalidRecipient(format!(
            "'{}' is not a phone number",
            number
        )));
    }
    Ok(format!("{}@{}", digits, gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_lookup_lowercase() {
        assert_eq!(Carrier::from_name("sprint").unwrap(), Carrier::Sprint);
        assert_eq!(Carrier::from_name("verizon").unwrap(), Carrier::Verizon);
    }

    #[test]
    fn test_carrier_lookup_is_case_insensitive() {
        assert_eq!(Carrier::from_name("SPRINT").unwrap(), Carrier::Sprint);
        assert_eq!(Carrier::from_name("SprINt").unwrap(), Carrier::Sprint);
        assert_eq!(Carrier::from_name("VeriZon").unwrap(), Carrier::Verizon);
    }

    #[test]
    fn test_carrier_lookup_rejects_unknown() {
        let err = Carrier::from_name("oobleck").unwrap_err();
        assert!(matches!(err, AlertrError::UnknownCarrier(_)));
        let err = Carrier::from_name("5G").unwrap_err();
        assert!(err.to_string().starts_with("Unknown carrier: 5G"));
        assert!(err.to_string().contains("verizon"));
    }

    #[test]
    fn test_every_carrier_has_a_gateway() {
        for carrier in Carrier::ALL {
            assert!(carrier.gateway().contains('.'));
            assert_eq!(Carrier::from_name(carrier.name()).unwrap(), carrier);
        }
    }

    #[test]
    fn test_format_sms_number_plain() {
        let addr = format_sms_number("1234567890", "sprint.com").unwrap();
        assert_eq!(addr, "1234567890@sprint.com");
    }

    #[test]
    fn test_format_sms_number_strips_punctuation() {
        let addr = format_sms_number("(123)456-7890", "sprint.com").unwrap();
        assert_eq!(addr, "1234567890@sprint.com");

        let addr = format_sms_number("(647)--)374)(", "sprint.com").unwrap();
        assert_eq!(addr, "647374@sprint.com");

        let addr = format_sms_number("3030)-342-5989", "sprint.com").unwrap();
        assert_eq!(addr, "30303425989@sprint.com");
    }

    #[test]
    fn test_format_sms_number_rejects_non_numeric() {
        let err = format_sms_number("not-a-number", "sprint.com").unwrap_err();
        assert!(matches!(err, AlertrError::InvalidRecipient(_)));
    }

    #[test]
    fn test_format_sms_number_rejects_empty() {
        assert!(format_sms_number("", "sprint.com").is_err());
        assert!(format_sms_number("()-", "sprint.com").is_err());
    }

    #[test]
    fn test_carrier_display() {
        assert_eq!(Carrier::Tmobile.to_string(), "tmobile");
    }
}
