//! Command line parsing helpers.

use crate::git::{CommandError, CommandSpec};

/// Split a command line into an argv vector.
///
/// This uses Unix shell-style quoting rules. Callers should treat the returned
/// vector as an executable + arguments (not as a shell script).
///
/// # Errors
///
/// Returns an error if the line is empty or has unbalanced quotes
pub fn parse_command_line(command_line: &str) -> Result<Vec<String>, CommandError> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        return Err(CommandError::Rejected("Command line is empty".to_string()));
    }

    let argv = shell_words::split(trimmed)
        .map_err(|err| CommandError::Rejected(format!("Failed to parse command line: {err}")))?;
    if argv.is_empty() {
        return Err(CommandError::Rejected(
            "Command line produced no argv items".to_string(),
        ));
    }

    Ok(argv)
}

/// Expand a configured command template into a runnable spec.
///
/// The template is split first and `{{key}}` placeholders are substituted per
/// argument, so substituted values never introduce extra arguments.
///
/// # Errors
///
/// Returns an error if the template cannot be parsed
pub fn expand_template(template: &str, fields: &[(&str, &str)]) -> Result<CommandSpec, CommandError> {
    let argv = parse_command_line(template)?
        .into_iter()
        .map(|arg| {
            fields.iter().fold(arg, |arg, (key, value)| {
                arg.replace(&format!("{{{{{key}}}}}"), value)
            })
        })
        .collect();

    CommandSpec::from_argv(argv)
        .ok_or_else(|| CommandError::Rejected("Command line produced no argv items".to_string()))
}
