use tiny_lex::{Error, Result, Scanner, TokenKind};
use std::{
    env,
    io::{self, Write},
};

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt(&mut stdout, &mut stderr)?,
        2 => match run_file(args[1].as_str(), &mut stdout, &mut stderr) {
            Ok(()) => {},
            // Lexical errors were already reported line by line.
            Err(e) if e.is_lexical() => std::process::exit(65),
            Err(e) => {
                writeln!(stderr, "{}", e)?;
                std::process::exit(74);
            },
        },
        _ => {
            writeln!(stdout, "Usage: tiny-lex [script]")?;
            std::process::exit(64);
        },
    };

    Ok(())
}

fn run_file(path: &str, out: &mut impl Write, err_out: &mut impl Write) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    run(contents.as_str(), out, err_out)
}

fn run_prompt(out: &mut impl Write, err_out: &mut impl Write) -> io::Result<()> {
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        buffer.clear();

        let num_bytes = stdin.read_line(&mut buffer)?;
        if num_bytes == 0 { break };

        match run(buffer.as_str(), out, err_out) {
            Err(e) if !e.is_lexical() => return Err(e.into()),
            _ => {},
        }
    }

    Ok(())
}

/// Prints every token of `source`. A lexical error is reported and the
/// rest of its line is skipped, so each bad line yields one diagnostic.
/// Returns the first lexical error once the whole source has been printed.
fn run(source: &str, out: &mut impl Write, err_out: &mut impl Write) -> Result<()> {
    let mut scanner = Scanner::new(source);
    let mut first_error: Option<Error> = None;

    loop {
        match scanner.next_token() {
            Ok(token) => {
                writeln!(out, "Token: {:?} Type: {}", token.lexeme(), token.kind())?;
                if token.kind() == TokenKind::EndOfInput { break }
            },
            Err(e) => {
                writeln!(err_out, "{}", e)?;
                scanner.skip_line();
                first_error.get_or_insert(e);
            },
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_lex::ErrorKind;

    fn run_to_strings(source: &str) -> (Result<()>, String, String) {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let result = run(source, &mut out, &mut err_out);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err_out).unwrap(),
        )
    }

    #[test]
    fn prints_each_token_with_its_type() {
        let (result, out, err_out) = run_to_strings("LET x = 1");
        assert!(result.is_ok());
        assert_eq!("", err_out);
        assert_eq!(
            "Token: \"LET\" Type: LET\n\
             Token: \"x\" Type: IDENT\n\
             Token: \"=\" Type: EQ\n\
             Token: \"1\" Type: NUMBER\n\
             Token: \"\\n\" Type: NEWLINE\n\
             Token: \"\" Type: EOF\n",
            out,
        );
    }

    #[test]
    fn one_diagnostic_per_bad_line() {
        let (result, out, err_out) = run_to_strings("x = 123.\ny = 5.\nz");
        let e = result.unwrap_err();
        assert!(e.is_lexical());
        assert!(matches!(e.kind(), ErrorKind::MalformedNumber { position: 7 }));

        assert_eq!(2, err_out.lines().count());
        assert!(out.contains("Token: \"z\" Type: IDENT"));
        assert!(out.ends_with("Token: \"\" Type: EOF\n"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let e = run_file("/nonexistent/tiny-lex/script.tl", &mut out, &mut err_out).unwrap_err();
        assert!(!e.is_lexical());
        assert!(matches!(e.kind(), ErrorKind::Io(_)));

        let io: io::Error = e.into();
        assert_eq!(io::ErrorKind::Other, io.kind());
    }
}
