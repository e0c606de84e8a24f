use crate::error::ModelError;

const MAX_NAME_LEN: usize = 63;

/// Validate a resource name against the orchestrator naming rules:
/// lowercase alphanumeric plus `-`, starting and ending with an
/// alphanumeric character, at most 63 characters.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(invalid(name, "name is empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid(
            name,
            &format!("name exceeds {} characters", MAX_NAME_LEN),
        ));
    }
    let valid_char =
        |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
    if !name.chars().all(valid_char) {
        return Err(invalid(
            name,
            "only lowercase alphanumeric characters and '-' allowed",
        ));
    }
    let first = name.chars().next().unwrap_or('-');
    let last = name.chars().last().unwrap_or('-');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid(
            name,
            "name must start and end with an alphanumeric character",
        ));
    }
    Ok(())
}

/// Rewrite an arbitrary string into a valid resource name: lowercase,
/// illegal characters replaced by `-`, trimmed to the length limit and
/// stripped of leading/trailing dashes.
pub fn sanitize_name(input: &str) -> String {
    let mut out: String = input
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' }
        })
        .collect();
    if out.len() > MAX_NAME_LEN {
        out.truncate(MAX_NAME_LEN);
    }
    out.trim_matches('-').to_string()
}

fn invalid(name: &str, reason: &str) -> ModelError {
    ModelError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for n in ["a", "myspace", "my-space-2", "0abc"] {
            assert!(validate_name(n).is_ok(), "{n} should be valid");
        }
    }

    #[test]
    fn rejects_bad_names() {
        for n in ["", "My-Space", "space_1", "-lead", "trail-", "a.b"] {
            assert!(validate_name(n).is_err(), "{n} should be invalid");
        }
        let long = "a".repeat(64);
        assert!(validate_name(&long).is_err());
    }

    #[test]
    fn sanitized_names_always_validate() {
        for raw in ["My Space", "queue_1", "..x..", "UPPER", "a&b=c"] {
            let s = sanitize_name(raw);
            assert!(validate_name(&s).is_ok(), "{raw} -> {s}");
        }
    }
}
