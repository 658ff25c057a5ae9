//! The interactive read-eval-print loop.
//!
//! Input is collected line by line until every `{` has been closed, then the
//! whole entry is handed to a single long-lived [`Interpreter`], so
//! definitions from earlier entries stay visible.

use std::io::{self, BufRead, Write};

use crate::Interpreter;

/// Prompt shown at the start of a new entry.
pub const PROMPT: &str = ">> ";
/// Prompt shown while an entry still has unclosed braces.
pub const CONTINUATION_PROMPT: &str = ".. ";

/// Counts `{` minus `}` in `source`, ignoring braces inside string literals
/// and comments.
///
/// A string left open at the end of a line stays open on the next one, as it
/// does in the lexer.
///
/// # Example
/// ```
/// use minilang::repl::brace_balance;
///
/// assert_eq!(brace_balance("def f() {"), 1);
/// assert_eq!(brace_balance("print(\"}\") # {"), 0);
/// assert_eq!(brace_balance("} }"), -2);
/// ```
#[must_use]
pub fn brace_balance(source: &str) -> i64 {
    let mut balance = 0;
    let mut in_string = false;
    let mut in_comment = false;

    for c in source.chars() {
        match c {
            '\n' => in_comment = false,
            _ if in_comment => {},
            '"' => in_string = !in_string,
            _ if in_string => {},
            '#' => in_comment = true,
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {},
        }
    }

    balance
}

/// Returns `true` once an entry has no unclosed braces.
#[must_use]
pub fn is_complete(source: &str) -> bool {
    brace_balance(source) <= 0
}

/// Runs the loop until `exit` or end of input.
///
/// Prompts, echoed results and error messages go to `out`; anything the
/// program itself prints goes to the interpreter's own output. A failing
/// entry is reported and the loop carries on with the next one.
///
/// # Errors
/// Returns an error only if reading `input` or writing `out` fails.
pub fn run<R: BufRead>(interpreter: &mut Interpreter, mut input: R, out: &mut dyn Write) -> io::Result<()> {
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut entry = String::new();
        if input.read_line(&mut entry)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        while !is_complete(&entry) {
            write!(out, "{CONTINUATION_PROMPT}")?;
            out.flush()?;
            if input.read_line(&mut entry)? == 0 {
                break;
            }
        }

        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" {
            return Ok(());
        }

        match interpreter.run(&entry) {
            Ok(value) if !value.is_null() => writeln!(out, "{value}")?,
            Ok(_) => {},
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, stdlib, util::SharedBuffer};

    fn transcript(input: &str) -> String {
        let buffer = SharedBuffer::new();
        let mut interpreter =
            Interpreter::new(&stdlib::registry(), Config::default(), Box::new(buffer.clone()));
        let mut out = buffer.clone();

        run(&mut interpreter, input.as_bytes(), &mut out).unwrap();
        buffer.contents()
    }

    #[test]
    fn braces_inside_strings_and_comments_are_ignored() {
        assert_eq!(brace_balance("let s = \"{{\""), 0);
        assert_eq!(brace_balance("# }\n{"), 1);
        assert_eq!(brace_balance("if (x) { print(\"#\") {"), 2);
    }

    #[test]
    fn completeness() {
        assert!(is_complete("print(1)"));
        assert!(!is_complete("while (1) {"));
        assert!(is_complete("while (1) {\n}"));
    }

    #[test]
    fn definitions_persist_between_entries() {
        let output = transcript("let x = 20\nx + 22\n");
        assert_eq!(output, ">> 20\n>> 42\n>> \n");
    }

    #[test]
    fn multi_line_entries_use_the_continuation_prompt() {
        let output = transcript("def double(n) {\nreturn n * 2\n}\ndouble(4)\nexit\n");
        assert_eq!(output, ">> .. .. >> 8\n>> ");
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let output = transcript("print(y)\nprint(1)\n");
        assert!(output.contains("undefined variable: y"));
        assert!(output.ends_with("1\n>> \n"));
    }
}
