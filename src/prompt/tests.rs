use super::*;
use crate::{
    terminal::{Key, ScriptedTerminal},
    validation::NonEmpty,
};

fn plain_config() -> PrompterConfig {
    PrompterConfig::builder().color(false).build()
}

fn prompter(lines: &[&str]) -> Prompter<ScriptedTerminal> {
    Prompter::with_terminal(ScriptedTerminal::with_lines(lines.iter().copied()), plain_config())
}

fn keyed(keys: &[Key]) -> Prompter<ScriptedTerminal> {
    Prompter::with_terminal(ScriptedTerminal::with_keys(keys.iter().copied()), plain_config())
}

fn only_digits(candidate: &str) -> ValidationResult {
    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid("digits only".into())
    }
}

/// Row the cursor ends on, relative to where output started, on a terminal
/// `width` columns wide. Follows the cursor moves prompts emit: line feeds,
/// autowrap, and `CSI n A/B/E/F/G`.
fn rows_advanced(transcript: &str, width: usize) -> isize {
    let mut row: isize = 0;
    let mut col: usize = 0;
    let mut chars = transcript.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\u{1b}' => {
                if chars.next_if_eq(&'[').is_none() {
                    continue;
                }
                let mut params = String::new();
                while let Some(p) = chars.next_if(|p| p.is_ascii_digit() || *p == '?' || *p == ';') {
                    params.push(p);
                }
                let n = params.parse::<isize>().unwrap_or(1);
                match chars.next() {
                    Some('A') => row -= n,
                    Some('B') => row += n,
                    Some('E') => (row, col) = (row + n, 0),
                    Some('F') => (row, col) = (row - n, 0),
                    Some('G') => col = usize::try_from(n - 1).unwrap_or(0),
                    _ => {}
                }
            }
            '\r' => col = 0,
            '\n' => (row, col) = (row + 1, 0),
            _ => {
                if col == width {
                    (row, col) = (row + 1, 0);
                }
                col += 1;
            }
        }
    }
    row
}

/// [`rows_advanced`] on a terminal too wide for anything to wrap.
fn net_lines(transcript: &str) -> isize {
    rows_advanced(transcript, usize::MAX)
}

#[test]
fn test_prompt_returns_trimmed_input() {
    let mut p = prompter(&["  hello world  "]);
    assert_eq!(p.prompt("Say something").unwrap(), "hello world");
}

#[test]
fn test_prompt_accepts_empty_input() {
    let mut p = prompter(&[""]);
    assert_eq!(p.prompt("Anything?").unwrap(), "");
}

#[test]
fn test_prompt_renders_question() {
    let mut p = prompter(&["ada"]);
    p.prompt("Name").unwrap();
    assert_eq!(p.terminal().transcript(), "? Name ada\n");
}

#[test]
fn test_prompt_input_closed() {
    let mut p = prompter(&[]);
    assert!(matches!(p.prompt("Name"), Err(PromptError::InputClosed)));
}

#[test]
fn test_validated_prompt_never_returns_invalid_input() {
    let mut p = prompter(&["abc", "12a", "", "42"]);

    assert_eq!(p.prompt_validated("Port", &only_digits).unwrap(), "42");
    assert_eq!(p.terminal().pending_lines(), 0);
    assert_eq!(p.terminal().transcript().matches("digits only").count(), 3);
}

#[test]
fn test_validated_prompt_fails_only_when_input_closes() {
    let mut p = prompter(&["abc", "def"]);
    assert!(matches!(
        p.prompt_validated("Port", &only_digits),
        Err(PromptError::InputClosed)
    ));
}

#[test]
fn test_validated_prompt_accepts_validator_structs() {
    let mut p = prompter(&["   ", "ada"]);
    let validator = NonEmpty::new("Name cannot be empty");

    assert_eq!(p.prompt_validated("Name", &validator).unwrap(), "ada");
    assert!(p.terminal().transcript().contains("✖ Name cannot be empty"));
}

#[test]
fn test_retries_do_not_grow_the_transcript() {
    let mut once = prompter(&["7"]);
    once.prompt_validated("Port", &only_digits).unwrap();

    let mut many = prompter(&["a", "b", "c", "d", "7"]);
    many.prompt_validated("Port", &only_digits).unwrap();

    assert_eq!(net_lines(&once.terminal().transcript()), 1);
    assert_eq!(net_lines(&many.terminal().transcript()), 1);
}

#[test]
fn test_error_line_is_cleared_on_success() {
    let mut p = prompter(&["x", "7"]);
    p.prompt_validated("Port", &only_digits).unwrap();

    let transcript = p.terminal().transcript();
    let last_error = transcript.rfind("digits only").unwrap();
    // CSI J after the final submission erases the stale error
    assert!(transcript[last_error..].ends_with("\u{1b}[J"));
}

#[test]
fn test_non_interactive_errors_are_appended() {
    let terminal = ScriptedTerminal::with_lines(["x", "7"]).non_interactive();
    let mut p = Prompter::with_terminal(terminal, plain_config());

    assert_eq!(p.prompt_validated("Port", &only_digits).unwrap(), "7");
    assert_eq!(
        p.terminal().transcript(),
        "? Port x\n✖ digits only\n? Port 7\n"
    );
}

#[test]
fn test_default_returned_unvalidated_on_empty_input() {
    let mut p = prompter(&[""]);
    let answer = p
        .prompt_with_default("Port", "not-a-number", &only_digits)
        .unwrap();

    assert_eq!(answer, "not-a-number");
}

#[test]
fn test_default_returned_when_submitted_untouched() {
    let mut p = prompter(&["8080"]);
    let rejects_all = |_: &str| ValidationResult::Invalid("never".into());

    assert_eq!(p.prompt_with_default("Port", "8080", &rejects_all).unwrap(), "8080");
}

#[test]
fn test_default_prompt_validates_other_input() {
    let mut p = prompter(&["abc", "9000"]);
    assert_eq!(
        p.prompt_with_default("Port", "8080", &only_digits).unwrap(),
        "9000"
    );
}

#[test]
fn test_empty_after_rejection_still_means_default() {
    let mut p = prompter(&["abc", ""]);
    assert_eq!(
        p.prompt_with_default("Port", "8080", &only_digits).unwrap(),
        "8080"
    );
}

#[test]
fn test_yes_or_no_empty_uses_default() {
    assert!(prompter(&[""]).yes_or_no("Continue?", true).unwrap());
    assert!(!prompter(&[""]).yes_or_no("Continue?", false).unwrap());
}

#[test]
fn test_yes_or_no_prefixes() {
    assert!(!prompter(&["n"]).yes_or_no("Continue?", true).unwrap());
    assert!(prompter(&["Y"]).yes_or_no("Continue?", false).unwrap());
    assert!(prompter(&["yes"]).yes_or_no("Continue?", false).unwrap());
    assert!(!prompter(&["NO"]).yes_or_no("Continue?", true).unwrap());
}

#[test]
fn test_yes_or_no_reprompts_on_unknown_answer() {
    let mut p = prompter(&["maybe", "n"]);

    assert!(!p.yes_or_no("Continue?", true).unwrap());
    assert!(p.terminal().transcript().contains("Please answer Yes or No"));
}

#[test]
fn test_yes_or_no_does_not_resolve_on_unknown_answer() {
    let mut p = prompter(&["maybe"]);
    assert!(matches!(
        p.yes_or_no("Continue?", true),
        Err(PromptError::InputClosed)
    ));
}

#[test]
fn test_yes_or_no_hint_marks_default() {
    let mut p = prompter(&[""]);
    p.yes_or_no("Continue?", true).unwrap();
    assert!(p.terminal().transcript().starts_with("? Continue? (Yes/no) "));
}

#[test]
fn test_yes_or_no_with_custom_labels() {
    let mut p = prompter(&["k"]);
    assert!(p
        .yes_or_no_with_labels("Keep changes?", false, "Keep", "Discard")
        .unwrap());

    let mut p = prompter(&["d"]);
    assert!(!p
        .yes_or_no_with_labels("Keep changes?", true, "Keep", "Discard")
        .unwrap());
}

#[test]
fn test_parse_answer_ambiguous_prefix() {
    assert_eq!(parse_answer("ye", "Yes", "Yeah-no"), None);
    assert_eq!(parse_answer("yes", "Yes", "Yes-but-no"), Some(true));
    assert_eq!(parse_answer("yes-", "Yes", "Yes-but-no"), Some(false));
    assert_eq!(parse_answer("x", "Yes", "No"), None);
}

#[test]
fn test_prompt_semver_accepts_valid_versions() {
    for version in ["1.2.3", "1.2.3-alpha.1", "1.2.3+build.5", "1.2.3-alpha+build"] {
        let mut p = prompter(&[version]);
        assert_eq!(p.prompt_semver("Version").unwrap(), version);
    }
}

#[test]
fn test_prompt_semver_reprompts_on_invalid_versions() {
    let mut p = prompter(&["1.2", "v1.2.3", "1.2.3.4", "", "2.0.0"]);

    assert_eq!(p.prompt_semver("Version").unwrap(), "2.0.0");
    assert_eq!(
        p.terminal()
            .transcript()
            .matches("is not a valid semantic version")
            .count(),
        4
    );
}

#[test]
fn test_prompt_semver_errors_only_on_closed_input() {
    let mut p = prompter(&["v1.2.3"]);
    assert!(matches!(
        p.prompt_semver("Version"),
        Err(PromptError::InputClosed)
    ));
}

#[test]
fn test_select_enter_confirms_default() {
    let mut p = keyed(&[Key::Enter]);
    assert_eq!(p.select("Color", true, 1, &["red", "green", "blue"]).unwrap(), Some(1));
}

#[test]
fn test_select_navigation() {
    let mut p = keyed(&[Key::Down, Key::Down, Key::Up, Key::Enter]);
    assert_eq!(p.select("Color", true, 0, &["red", "green", "blue"]).unwrap(), Some(1));

    let mut p = keyed(&[Key::Char('k'), Key::Enter]);
    assert_eq!(p.select("Color", true, 0, &["red", "green", "blue"]).unwrap(), Some(2));
}

#[test]
fn test_select_number_shortcut() {
    let mut p = keyed(&[Key::Char('3'), Key::Enter]);
    assert_eq!(p.select("Color", true, 0, &["red", "green", "blue"]).unwrap(), Some(2));
}

#[test]
fn test_prompt_list_none_returns_minus_one() {
    let mut p = keyed(&[Key::Char('0'), Key::Enter]);
    assert_eq!(
        p.prompt_list("Color", false, 0, &["red", "green", "blue"]).unwrap(),
        NO_SELECTION
    );

    let mut p = keyed(&[Key::Esc]);
    assert_eq!(p.prompt_list("Color", false, 0, &["red", "green"]).unwrap(), -1);

    let mut p = keyed(&[Key::Up, Key::Enter]);
    assert_eq!(p.prompt_list("Color", false, 0, &["red", "green"]).unwrap(), -1);
}

#[test]
fn test_required_list_never_returns_none() {
    let mut p = keyed(&[Key::Esc, Key::Char('0'), Key::Up, Key::Enter]);
    assert_eq!(p.prompt_list("Color", true, 0, &["red", "green", "blue"]).unwrap(), 2);
}

#[test]
fn test_optional_list_shows_none_row() {
    let mut p = keyed(&[Key::Enter]);
    p.select("Color", false, 0, &["red"]).unwrap();
    assert!(p.terminal().transcript().contains("(none)"));
}

#[test]
fn test_out_of_range_default_is_clamped() {
    for default_index in [-5, 999, 3] {
        let mut p = keyed(&[Key::Enter]);
        assert_eq!(
            p.prompt_list("Color", true, default_index, &["red", "green", "blue"]).unwrap(),
            0
        );
    }
}

#[test]
fn test_select_collapses_to_answer_line() {
    let mut p = keyed(&[Key::Down, Key::Enter]);
    p.select("Color", true, 0, &["red", "green"]).unwrap();

    let transcript = p.terminal().transcript();
    assert!(transcript.ends_with("? Color green\r\n"));
    assert_eq!(net_lines(&transcript), 1);
}

#[test]
fn test_select_interrupt_and_closed_input() {
    let mut p = keyed(&[Key::Interrupt]);
    assert!(matches!(
        p.select("Color", true, 0, &["red"]),
        Err(PromptError::Interrupted)
    ));

    let mut p = keyed(&[Key::Down]);
    assert!(matches!(
        p.select("Color", true, 0, &["red"]),
        Err(PromptError::InputClosed)
    ));
}

#[test]
fn test_select_empty_options() {
    let none: [&str; 0] = [];
    assert!(matches!(
        keyed(&[]).select("Color", true, 0, &none),
        Err(PromptError::NoOptions)
    ));
    assert_eq!(keyed(&[]).prompt_list("Color", false, 0, &none).unwrap(), -1);
}

#[test]
fn test_select_display_values() {
    #[derive(derive_more::Display)]
    enum Region {
        #[display("Europe (Frankfurt)")]
        EuCentral,
        #[display("US East (Virginia)")]
        UsEast,
    }

    let mut p = keyed(&[Key::Down, Key::Enter]);
    let regions = [Region::EuCentral, Region::UsEast];

    assert_eq!(p.select("Region", true, 0, &regions).unwrap(), Some(1));
    assert!(p.terminal().transcript().contains("US East (Virginia)"));
}

#[test]
fn test_select_lines_on_non_interactive_terminal() {
    let terminal = ScriptedTerminal::with_lines(["purple", "blue"]).non_interactive();
    let mut p = Prompter::with_terminal(terminal, plain_config());

    assert_eq!(p.select("Color", true, 0, &["red", "green", "blue"]).unwrap(), Some(2));
    let transcript = p.terminal().transcript();
    assert!(transcript.contains("> 1) red"));
    assert!(transcript.contains("  3) blue"));
    assert!(transcript.contains("\"purple\" is not one of the options"));
}

#[test]
fn test_select_lines_none_and_default() {
    let terminal = ScriptedTerminal::with_lines(["0"]).non_interactive();
    let mut p = Prompter::with_terminal(terminal, plain_config());
    assert_eq!(p.prompt_list("Color", false, 1, &["red", "green"]).unwrap(), -1);

    let terminal = ScriptedTerminal::with_lines([""]).non_interactive();
    let mut p = Prompter::with_terminal(terminal, plain_config());
    assert_eq!(p.prompt_list("Color", false, 1, &["red", "green"]).unwrap(), 1);
}

#[test]
fn test_prompts_refused_while_spinner_runs() {
    let mut p = prompter(&["ada"]);
    let spinner = p.start_spinner("Working").unwrap();

    assert!(matches!(p.prompt("Name"), Err(PromptError::TerminalBusy)));
    assert!(matches!(
        p.start_spinner("Again"),
        Err(PromptError::TerminalBusy)
    ));

    spinner.success("Done").unwrap();
    assert_eq!(p.prompt("Name").unwrap(), "ada");
}

#[test]
fn test_wrapped_error_returns_to_prompt_line() {
    let long_error = |candidate: &str| {
        if candidate == "7" {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid("e".repeat(50))
        }
    };
    let terminal = ScriptedTerminal::with_lines(["x", "y", "7"]).with_width(20);
    let mut p = Prompter::with_terminal(terminal, plain_config());

    assert_eq!(p.prompt_validated("Port", &long_error).unwrap(), "7");

    // "✖ " plus 50 columns wraps to 3 rows; the prompt row sits above them
    let transcript = p.terminal().transcript();
    assert!(transcript.contains("\u{1b}[3F"));
    assert_eq!(rows_advanced(&transcript, 20), 1);
}

#[test]
fn test_wrapped_answer_is_fully_replaced() {
    let terminal = ScriptedTerminal::with_lines(["x".repeat(30), "7".to_string()]).with_width(20);
    let mut p = Prompter::with_terminal(terminal, plain_config());

    assert_eq!(p.prompt_validated("Code", &only_digits).unwrap(), "7");
    assert_eq!(rows_advanced(&p.terminal().transcript(), 20), 1);
}

#[test]
fn test_list_with_wrapped_rows_collapses_to_one_line() {
    let terminal =
        ScriptedTerminal::with_keys([Key::Down, Key::Up, Key::Enter]).with_width(20);
    let mut p = Prompter::with_terminal(terminal, plain_config());
    let options = ["red", "a very long option label that wraps"];

    assert_eq!(p.select("Pick", true, 0, &options).unwrap(), Some(0));

    let transcript = p.terminal().transcript();
    assert!(transcript.ends_with("? Pick red\r\n"));
    assert_eq!(rows_advanced(&transcript, 20), 1);
}

#[test]
fn test_list_keys_are_read_in_one_session() {
    let mut p = keyed(&[Key::Down, Key::Down, Key::Enter]);
    p.select("Color", true, 0, &["red", "green", "blue"]).unwrap();

    assert_eq!(p.terminal().key_input_sessions(), 1);
    assert_eq!(p.terminal().stray_key_reads(), 0);
    assert!(!p.terminal().in_key_input());
}

#[test]
fn test_key_session_closed_on_interrupt() {
    let mut p = keyed(&[Key::Down, Key::Interrupt]);
    assert!(p.select("Color", true, 0, &["red", "green"]).is_err());
    assert!(!p.terminal().in_key_input());
}

#[test]
fn test_list_rows_end_with_carriage_return() {
    let mut p = keyed(&[Key::Enter]);
    p.select("Color", true, 0, &["red", "green"]).unwrap();

    let transcript = p.terminal().transcript();
    assert!(transcript.contains("> red\r\n"));
    assert!(transcript.contains("  green\r\n"));
}

#[test]
fn test_non_interactive_output_is_never_colored() {
    let terminal = ScriptedTerminal::with_lines(["x", "7"]).non_interactive();
    let config = PrompterConfig::builder().color(true).build();
    let mut p = Prompter::with_terminal(terminal, config);

    p.prompt_validated("Port", &only_digits).unwrap();
    assert!(!p.terminal().transcript().contains('\u{1b}'));
}
