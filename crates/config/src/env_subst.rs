/// Replace `${ENV_VAR}` placeholders with values from the process
/// environment. Unresolvable or malformed placeholders are kept verbatim.
#[must_use]
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// [`substitute_env`] with an injectable lookup, so tests need not touch the
/// process environment.
pub(crate) fn substitute_env_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated: keep the tail untouched.
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "SPINDLE_BACKEND" => Some("http://users.internal:3000".to_string()),
            "PORT" => Some("8080".to_string()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_vars() {
        assert_eq!(
            substitute_env_with("base_url = \"${SPINDLE_BACKEND}\"\nport = ${PORT}", lookup),
            "base_url = \"http://users.internal:3000\"\nport = 8080"
        );
    }

    #[test]
    fn keeps_unknown_and_empty_placeholders() {
        assert_eq!(
            substitute_env_with("a=${NOPE} b=${}", lookup),
            "a=${NOPE} b=${}"
        );
    }

    #[test]
    fn keeps_unterminated_placeholder() {
        assert_eq!(substitute_env_with("x=${PORT y", lookup), "x=${PORT y");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(substitute_env("port = 4000"), "port = 4000");
    }
}
