use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::judging::{CaseOutcome, SessionOutcome, TestVerdict};
use crate::problem::ProblemMeta;

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false;
    };
    match v.as_str() {
        "truecolor" | "24bit" => true,
        _ => false,
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for TestVerdict {
    fn color(&self) -> Color {
        use TestVerdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                Passed => Color::Green,
                Failed { .. } => Color::Yellow,
                Error { .. } => Color::Magenta,
            };
        }

        match self {
            Passed => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            Failed { .. } => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            Error { .. } => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
        }
    }
}

fn verdict_label(verdict: &TestVerdict) -> &'static str {
    use TestVerdict::*;
    match verdict {
        Passed => "OK",
        Failed { .. } => "WA",
        Error { .. } => "ERR",
    }
}

pub fn verdict_badge(verdict: &TestVerdict) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", verdict_label(verdict))
        .on_color(verdict.color())
        .bold()
        .color(fg)
}

pub fn print_problem_header(meta: &ProblemMeta) {
    println!("\n=== {} ===", meta.title.bold());
    println!("Time Limit: {}", meta.time_limit);
    println!("Memory Limit: {}\n", meta.memory_limit);
}

pub fn print_case_line(case: &CaseOutcome) {
    println!(
        "{}",
        format!(
            "Test case #{} ... {}{} [{}ms]",
            case.index + 1,
            verdict_badge(&case.verdict),
            " ".repeat(4usize.saturating_sub(verdict_label(&case.verdict).len() + 1)),
            case.elapsed.as_millis(),
        )
        .cyan()
    );
}

pub fn print_compile_log(log: &str) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    let bar = "━".repeat(cols as usize).red().bold();
    println!("{}", bar);
    if log.trim().is_empty() {
        println!("{}", "<no compiler diagnostics>".magenta().dimmed());
    } else {
        print!("{}", log);
        if !log.ends_with('\n') {
            println!();
        }
    }
    println!("{}", bar);
}

pub fn print_failure_detail(res: &CaseOutcome) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));

    const BOLD_LINE: &str = "━";
    const THIN_LINE: &str = "─";

    let bold_bar = BOLD_LINE.repeat(cols as usize).blue().bold();

    let title_color = Color::BrightYellow;
    println!(
        "\n{}: {} [{}ms]\n{}",
        format!("Test case #{}", res.index + 1)
            .color(title_color)
            .bold(),
        verdict_badge(&res.verdict),
        res.elapsed.as_millis(),
        bold_bar,
    );

    fn print_sub_title(s: &str, cols: usize) {
        println!(
            "{}{}",
            s.cyan().bold(),
            THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
        )
    }

    fn print_lines(entire_str: &str) {
        let lines: Vec<_> = entire_str.lines().collect();
        if lines.is_empty() {
            println!("{}", "<EMPTY>".magenta().dimmed());
            return;
        }
        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim_end();
            print!("{}", trimmed);

            let num_trailing_whitespace = line.len() - trimmed.len();
            if num_trailing_whitespace > 0 {
                print!(
                    "{}{}",
                    " ".repeat(num_trailing_whitespace).on_red(),
                    "(Trailing whitespace)".bright_red().bold()
                );
            }

            let is_last_line = i + 1 == lines.len();
            if is_last_line && !entire_str.ends_with('\n') {
                print!("{}", " Missing new line ".on_yellow().black().bold());
            }

            println!();
        }
    }

    match &res.verdict {
        TestVerdict::Failed {
            input,
            actual,
            expected,
        } => {
            print_sub_title("[input]", cols as usize);
            print_lines(input);

            print_sub_title("[your output]", cols as usize);
            print_lines(actual);

            print_sub_title("[expected output]", cols as usize);
            print_lines(expected);
        }
        TestVerdict::Error { input, message } => {
            print_sub_title("[error]", cols as usize);
            println!("{}", message.bright_red());

            print_sub_title("[input]", cols as usize);
            print_lines(input);
        }
        TestVerdict::Passed => {}
    }

    println!("{}", bold_bar);
}

pub fn print_session_summary(outcome: &SessionOutcome, num_total_test: usize) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    match outcome {
        SessionOutcome::AllPassed { count } => {
            let msg = format!("All {} tests passed ✨", count);
            print!("{}", msg.green());
        }
        SessionOutcome::Stopped(case) => {
            let msg = format!(
                "Failed at test case #{} ({}/{} passed) 💣",
                case.index + 1,
                case.index,
                num_total_test,
            );
            print!("{}", msg.bright_red());
        }
        SessionOutcome::CompileFailed { .. } => {
            print!("{}", "Compilation failed 💀".bright_red());
        }
        SessionOutcome::NoTestsFound => {
            print!("{}", "No test cases found".yellow());
        }
    }

    println!(" {}", bar);
}
