pub mod util {
    use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
    use std::io;

    fn theme() -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn ask_text(prompt: &str) -> io::Result<String> {
        Input::with_theme(&theme())
            .with_prompt(prompt)
            .interact_text()
    }

    pub fn ask_select(prompt: &str, items: &[String]) -> io::Result<usize> {
        Select::with_theme(&theme())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
    }

    pub fn ask_confirm(prompt: &str, default: bool) -> io::Result<bool> {
        Confirm::with_theme(&theme())
            .with_prompt(prompt)
            .default(default)
            .interact()
    }
}

pub use util::*;
