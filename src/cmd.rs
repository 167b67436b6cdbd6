//! External command execution.

use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::io::Write;
use std::process::{Command, Stdio};

/// Run `cmd` and feed `input` to its stdin.
///
/// Output streams are discarded: clipboard helpers such as `xclip` keep
/// running in the background and would otherwise hold the pipes open.
pub fn pipe_to(cmd: &str, input: &str) -> Result<(), Box<dyn Error>> {
    log::debug!("pipe_to({cmd}) {} bytes", input.len(), cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);
    let (program, args) = match cmds.split_first() {
        Some((program, args)) if !program.is_empty() => (program, args),
        _ => return Err("Empty command".into()),
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("cannot start {program}: {e}"))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
        // stdin dropped here so the child sees EOF
    }
    let status = child.wait()?;

    if status.success() {
        log::debug!("Success cmd: {cmd}");
        Ok(())
    } else {
        log::warn!(
            "{failed} to run {cmd} status={status}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        Err(format!("{program} exited with {status}").into())
    }
}

fn split_and_strip(input: &str) -> Vec<&str> {
    RE.find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
lazy_static! {
    static ref RE: Regex =
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex?");
}
