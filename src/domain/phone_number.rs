use std::fmt::Debug;

#[derive(Debug, Clone)]
pub struct PhoneNumber(pub String);

impl PhoneNumber{
    // Loose check: digits plus the usual separators, at least three digits.
    // Reservations come from many countries so no numbering plan is enforced.
    pub fn parse(number: String) -> Result<PhoneNumber, String>{
        let number = number.trim().to_string();
        let allowed = number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
        let digits = number.chars().filter(|c| c.is_ascii_digit()).count();

        if allowed && digits >= 3 {
            Ok(Self(number))
        } else {
            Err(format!("{} is not a valid phone number", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
