use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct EmailAddress(pub String);

impl EmailAddress {
    pub fn parse(email: String) -> Result<EmailAddress, String>{
        let email = email.trim().to_string();
        if email.validate_email(){
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email address", email))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
