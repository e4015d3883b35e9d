use serde::Deserialize;

pub const NAME_MIN_LEN: usize = 3;
pub const MESSAGE_MAX_LEN: usize = 200;

/// Raw create payload. Everything is optional at the wire level; validation
/// decides what is actually acceptable.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A payload that passed validation, with the email already normalized
/// (trimmed, lowercased) and the message defaulted to empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validates a candidate payload against the field rules. All violations are
/// collected, not just the first.
pub fn validate(payload: SubmissionPayload) -> Result<NewSubmission, Vec<String>> {
    let mut errors = Vec::new();

    let name = payload.name.unwrap_or_default();
    if name.is_empty() {
        errors.push("Name is required".to_string());
    } else if name.chars().count() < NAME_MIN_LEN {
        errors.push(format!("Name must be at least {} characters", NAME_MIN_LEN));
    }

    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        errors.push("Email is required".to_string());
    } else if !email_shape_ok(&email) {
        errors.push("Invalid email".to_string());
    }

    let message = payload.message.unwrap_or_default();
    if message.chars().count() > MESSAGE_MAX_LEN {
        errors.push(format!("Message must be at most {} characters", MESSAGE_MAX_LEN));
    }

    if errors.is_empty() {
        Ok(NewSubmission { name, email, message })
    } else {
        Err(errors)
    }
}

/// Unanchored `local@domain.tld` shape check: some whitespace-free run must
/// contain a non-leading `@` followed by an interior dot. Every `@` and dot
/// position is considered, matching an unanchored pattern search.
fn email_shape_ok(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        token.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let rest = &token[at + 1..];
            rest.char_indices()
                .any(|(dot, d)| d == '.' && dot > 0 && dot + 1 < rest.len())
        })
    })
}
