//! GitHub Actions workflow commands (`::name key=value::message`).

pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

pub fn is_runner_debug() -> bool {
    std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1")
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

pub fn format_command(name: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", name);
    if !properties.is_empty() {
        let rendered: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{}={}", key, escape_property(value)))
            .collect();
        line.push(' ');
        line.push_str(&rendered.join(","));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_escape_percent_and_newlines() {
        assert_eq!(
            format_command("error", &[], "50% done\nthen failed"),
            "::error::50%25 done%0Athen failed"
        );
    }

    #[test]
    fn properties_also_escape_colon_and_comma() {
        assert_eq!(
            format_command("set-output", &[("name", "a:b,c")], "v"),
            "::set-output name=a%3Ab%2Cc::v"
        );
    }
}
