// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-based presenter for terminals and scripted hosts.
//
// Every kind is rendered as text on the output stream and answered one line
// at a time from the input stream. The binary wires this to stdin and stderr
// so stdout stays reserved for the JSON response.

use std::io::{self, BufRead, Write};
use std::thread;

use xdialog_bridge::{Presenter, Surface, SurfaceLayout};
use xdialog_core::error::Result;
use xdialog_core::{DialogKind, DialogRequest};
use xdialog_session::EventSink;

/// Typed in answer to a prompt to cancel it.
pub const CANCEL_COMMAND: &str = ":cancel";

#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for ConsolePresenter {
    fn platform_name(&self) -> &str {
        "Console"
    }

    fn present(&self, surface: Surface, sink: EventSink) -> Result<()> {
        thread::Builder::new()
            .name(format!("xdialog-console-{}", surface.session_id))
            .spawn(move || {
                let stdin = io::stdin();
                if let Err(e) = run(&surface, &sink, stdin.lock(), io::stderr()) {
                    tracing::warn!(
                        session_id = %surface.session_id,
                        error = %e,
                        "console dialog failed"
                    );
                }
            })?;
        Ok(())
    }
}

/// Render `surface` on `output` and feed answers read from `input` into
/// `sink` until the session resolves. End of input cancels.
pub fn run<R: BufRead, W: Write>(
    surface: &Surface,
    sink: &EventSink,
    input: R,
    mut output: W,
) -> io::Result<()> {
    let request = &*surface.request;
    let mut lines = input.lines();

    if let Some(title) = request.title().filter(|t| !t.is_empty()) {
        writeln!(output, "== {title} ==")?;
    }
    let body = request.body_text();
    if !body.is_empty() {
        writeln!(output, "{body}")?;
    }

    let labels = request.button_labels();
    match surface.kind() {
        DialogKind::Alert => {
            write!(output, "[Enter] {}", labels.primary)?;
            output.flush()?;
            match lines.next().transpose()? {
                Some(_) => sink.confirm(),
                None => sink.cancel(),
            };
        }
        DialogKind::Confirm | DialogKind::Sheet => loop {
            write!(
                output,
                "{} / {} [y/n]: ",
                labels.primary,
                labels.secondary.unwrap_or_default()
            )?;
            output.flush()?;
            let Some(line) = lines.next().transpose()? else {
                sink.cancel();
                break;
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => {
                    sink.confirm();
                    break;
                }
                "n" | "no" => {
                    sink.cancel();
                    break;
                }
                _ => writeln!(output, "please answer y or n")?,
            }
        },
        DialogKind::Prompt => {
            if let DialogRequest::Prompt(prompt) = request {
                if let Some(placeholder) = &prompt.input_placeholder {
                    writeln!(output, "({placeholder})")?;
                }
            }
            let current = sink.snapshot().text.unwrap_or_default();
            if current.is_empty() {
                write!(output, "> ")?;
            } else {
                write!(output, "[{current}] > ")?;
            }
            output.flush()?;
            match lines.next().transpose()? {
                None => {
                    sink.cancel();
                }
                Some(line) if line.trim() == CANCEL_COMMAND => {
                    sink.cancel();
                }
                Some(line) => {
                    // An empty line keeps the pre-filled text.
                    if !line.is_empty() {
                        sink.text_changed(line);
                    }
                    sink.confirm();
                }
            }
        }
        DialogKind::SingleSelect | DialogKind::MultiSelect => {
            // An action sheet answers on the first tap.
            let answers_on_tap = surface.kind() == DialogKind::SingleSelect
                && surface.layout == SurfaceLayout::ActionSheet;
            let options = request.options();
            loop {
                let snapshot = sink.snapshot();
                for (i, option) in options.iter().enumerate() {
                    let mark = if snapshot.is_checked(&option.value) { "x" } else { " " };
                    writeln!(output, "  {:>2}. [{mark}] {}", i + 1, option.label)?;
                }
                if answers_on_tap {
                    write!(output, "number, or q to {}: ", labels.secondary.unwrap_or("cancel"))?;
                } else {
                    write!(
                        output,
                        "number to toggle, Enter to {}, q to {}: ",
                        labels.primary,
                        labels.secondary.unwrap_or("cancel")
                    )?;
                }
                output.flush()?;

                let Some(line) = lines.next().transpose()? else {
                    sink.cancel();
                    break;
                };
                let answer = line.trim();
                if answer.eq_ignore_ascii_case("q") {
                    sink.cancel();
                    break;
                }
                if answer.is_empty() && !answers_on_tap {
                    sink.confirm();
                    break;
                }
                let picked = answer
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| options.get(n.wrapping_sub(1)));
                match picked {
                    Some(option) => {
                        sink.option_tapped(option.value.clone());
                        if answers_on_tap {
                            sink.confirm();
                            break;
                        }
                    }
                    None => writeln!(output, "no option {answer:?}")?,
                }
            }
        }
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use xdialog_bridge::layout_for;
    use xdialog_core::{
        ConfirmRequest, DialogResult, MultiSelectRequest, PresentationMode, PromptRequest,
        ResolvedStyle, SelectOption, SingleSelectRequest,
    };
    use xdialog_session::PendingResult;

    fn open(request: DialogRequest) -> (Surface, EventSink, PendingResult) {
        let layout = layout_for(request.kind(), request.mode());
        let (sink, pending) = EventSink::open(request);
        let surface = Surface::new(
            sink.session_id(),
            sink.request(),
            ResolvedStyle::default(),
            layout,
        );
        (surface, sink, pending)
    }

    fn play(request: DialogRequest, input: &str) -> (DialogResult, String) {
        let (surface, sink, mut pending) = open(request);
        let mut output = Vec::new();
        run(&surface, &sink, Cursor::new(input), &mut output).unwrap();
        let result = pending.try_take().unwrap().unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    fn abc() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Apple", "a"),
            SelectOption::new("Banana", "b"),
            SelectOption::new("Cherry", "c"),
        ]
    }

    #[test]
    fn confirm_reprompts_until_yes_or_no() {
        let mut request = ConfirmRequest::new("Delete 3 files?");
        request.common.title = Some("Trash".into());
        let (result, output) = play(DialogRequest::Confirm(request), "maybe\nn\n");
        assert_eq!(result, DialogResult::Confirm { confirmed: false });
        assert!(output.contains("== Trash =="));
        assert!(output.contains("please answer y or n"));
    }

    #[test]
    fn prompt_takes_the_typed_line() {
        let (result, _) = play(DialogRequest::Prompt(PromptRequest::new("Name?")), "Ada\n");
        assert_eq!(
            result,
            DialogResult::Prompt {
                text: "Ada".into(),
                cancelled: false
            }
        );
    }

    #[test]
    fn empty_line_keeps_prefilled_text() {
        let mut request = PromptRequest::new("Rename");
        request.input_text = Some("draft.txt".into());
        let (result, output) = play(DialogRequest::Prompt(request), "\n");
        assert_eq!(
            result,
            DialogResult::Prompt {
                text: "draft.txt".into(),
                cancelled: false
            }
        );
        assert!(output.contains("[draft.txt]"));
    }

    #[test]
    fn cancel_command_cancels_prompt() {
        let (result, _) = play(DialogRequest::Prompt(PromptRequest::new("Name?")), ":cancel\n");
        assert!(result.is_cancelled());
    }

    #[test]
    fn multi_select_toggles_then_confirms() {
        let request = MultiSelectRequest::new("Fruit", abc());
        let (result, output) = play(DialogRequest::MultiSelect(request), "3\n1\n7\n1\n\n");
        assert_eq!(
            result,
            DialogResult::MultiSelect {
                values: vec!["c".into()],
                cancelled: false
            }
        );
        assert!(output.contains("no option \"7\""));
        assert!(output.contains("[x] Cherry"));
    }

    #[test]
    fn action_sheet_answers_on_first_pick() {
        let request = SingleSelectRequest::new("Fruit", abc());
        let (result, _) = play(DialogRequest::SingleSelect(request), "2\n");
        assert_eq!(
            result,
            DialogResult::SingleSelect {
                value: Some("b".into()),
                cancelled: false
            }
        );
    }

    #[test]
    fn fullscreen_single_select_waits_for_enter() {
        let mut request = SingleSelectRequest::new("Fruit", abc());
        request.common.mode = PresentationMode::Fullscreen;
        let (result, _) = play(DialogRequest::SingleSelect(request), "1\n3\n\n");
        assert_eq!(
            result,
            DialogResult::SingleSelect {
                value: Some("c".into()),
                cancelled: false
            }
        );
    }

    #[test]
    fn end_of_input_cancels() {
        let request = MultiSelectRequest::new("Fruit", abc());
        let (result, _) = play(DialogRequest::MultiSelect(request), "2\n");
        assert!(result.is_cancelled());
    }
}
