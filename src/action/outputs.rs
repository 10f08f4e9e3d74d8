use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::action::command::format_command;

/// Sets a step output, the way `@actions/core` does: appended to the file
/// named by `$GITHUB_OUTPUT`, or the legacy `::set-output` command when the
/// runner does not provide one.
pub fn set_output(name: &str, value: &str) -> std::io::Result<()> {
    match std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
        Some(path) => append_output(Path::new(&path), name, value),
        None => {
            println!("{}", format_command("set-output", &[("name", name)], value));
            Ok(())
        }
    }
}

pub fn append_output(path: &Path, name: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render_output(name, value).as_bytes())
}

fn render_output(name: &str, value: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}
