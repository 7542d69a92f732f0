//! Interactive operator menu.
//!
//! Thin glue between stdin and the [`UserAction`] port: one numbered
//! action per line, `6` or end-of-input exits. Nothing here is control
//! logic — unknown input just prints a notice and re-prompts.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::hal::UserAction;

/// The prompt printed before every read, reference wording preserved.
pub const MENU_PROMPT: &str =
    "\nAction [1: Fill_Water 2: Place_Pot 3: Remove_Pot 4: Press_BrewButton 5: Show_Status 6: Exit] : ";

/// Result of dispatching one line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Input handled (or blank), keep looping.
    Continue,
    /// Input was not a known action number.
    Unknown,
    /// Operator asked to exit.
    Exit,
}

/// Dispatch a single trimmed input line to the user-action port.
pub fn dispatch(hw: &mut impl UserAction, input: &str) -> MenuOutcome {
    match input {
        "1" => hw.fill_water(),
        "2" => hw.put_pot(),
        "3" => hw.remove_pot(),
        "4" => hw.press_brew_button(),
        "5" => hw.show_state(),
        "6" => return MenuOutcome::Exit,
        "" => {}
        _ => return MenuOutcome::Unknown,
    }
    MenuOutcome::Continue
}

/// The operator loop: prompt, read, dispatch, until exit or EOF.
pub fn run(hw: &mut impl UserAction) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", MENU_PROMPT);
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF — same as Exit.
        }
        match dispatch(hw, line.trim()) {
            MenuOutcome::Continue => {}
            MenuOutcome::Unknown => println!("Unknown action"),
            MenuOutcome::Exit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingActions {
        calls: Vec<&'static str>,
    }

    impl UserAction for RecordingActions {
        fn fill_water(&mut self) {
            self.calls.push("fill_water");
        }
        fn press_brew_button(&mut self) {
            self.calls.push("press_brew_button");
        }
        fn put_pot(&mut self) {
            self.calls.push("put_pot");
        }
        fn remove_pot(&mut self) {
            self.calls.push("remove_pot");
        }
        fn show_state(&self) {}
    }

    #[test]
    fn numbered_actions_dispatch() {
        let mut ua = RecordingActions::default();
        assert_eq!(dispatch(&mut ua, "1"), MenuOutcome::Continue);
        assert_eq!(dispatch(&mut ua, "2"), MenuOutcome::Continue);
        assert_eq!(dispatch(&mut ua, "3"), MenuOutcome::Continue);
        assert_eq!(dispatch(&mut ua, "4"), MenuOutcome::Continue);
        assert_eq!(
            ua.calls,
            vec!["fill_water", "put_pot", "remove_pot", "press_brew_button"]
        );
    }

    #[test]
    fn six_exits() {
        let mut ua = RecordingActions::default();
        assert_eq!(dispatch(&mut ua, "6"), MenuOutcome::Exit);
        assert!(ua.calls.is_empty());
    }

    #[test]
    fn garbage_is_unknown() {
        let mut ua = RecordingActions::default();
        assert_eq!(dispatch(&mut ua, "brew"), MenuOutcome::Unknown);
        assert_eq!(dispatch(&mut ua, "7"), MenuOutcome::Unknown);
        assert!(ua.calls.is_empty());
    }

    #[test]
    fn blank_line_reprompts() {
        let mut ua = RecordingActions::default();
        assert_eq!(dispatch(&mut ua, ""), MenuOutcome::Continue);
        assert!(ua.calls.is_empty());
    }
}
