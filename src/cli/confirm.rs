//! Pre-run confirmation gate
//!
//! One yes/no prompt before any network activity, showing the total tile
//! count and whether the run will download or merely check. Bypassed by
//! the `--yes` flag.

use std::io::{self, BufRead, Write};

/// Ask the user to confirm the run. Accepts `y`/`yes` case-insensitively;
/// anything else declines.
pub fn confirm_run(total_tiles: u64, check_only: bool) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    confirm_run_with(&mut input, &mut io::stdout(), total_tiles, check_only)
}

/// Prompt on arbitrary streams so the gate is testable without a terminal
pub fn confirm_run_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    total_tiles: u64,
    check_only: bool,
) -> io::Result<bool> {
    let verb = if check_only { "checking" } else { "downloading" };
    write!(output, "Proceed with {} {} tiles? [yes/no] ", verb, total_tiles)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(reply: &str) -> (bool, String) {
        let mut input = reply.as_bytes();
        let mut output = Vec::new();
        let accepted = confirm_run_with(&mut input, &mut output, 21, false).unwrap();
        (accepted, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_variants_are_accepted() {
        assert!(ask("yes\n").0);
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("Y\n").0);
    }

    #[test]
    fn anything_else_declines() {
        assert!(!ask("no\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("yep\n").0);
    }

    #[test]
    fn prompt_names_the_verb_and_count() {
        let (_, prompt) = ask("no\n");
        assert_eq!(prompt, "Proceed with downloading 21 tiles? [yes/no] ");

        let mut input = "no\n".as_bytes();
        let mut output = Vec::new();
        confirm_run_with(&mut input, &mut output, 5, true).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Proceed with checking 5 tiles? [yes/no] "
        );
    }
}
