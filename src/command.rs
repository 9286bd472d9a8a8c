//! Keyboard shortcut table.
//!
//! Maps key names (as reported by browser `KeyboardEvent.key`) to editor
//! commands. Routing keys away from text inputs is left to the host.

/// An editor action that can be bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Turn every pixel off
    Clear,
    /// Turn every pixel on
    Fill,
    /// Flip every pixel
    Invert,
    /// Switch to draw mode
    DrawMode,
    /// Switch to erase mode
    EraseMode,
    /// Show the previous frame
    StepBackward,
    /// Show the next frame
    StepForward,
    /// Start or stop playback
    TogglePlay,
    /// Append a blank frame after the current one
    AddFrame,
}

impl Command {
    /// Look up the command bound to a key.
    ///
    /// `ctrl_or_meta` reports whether Ctrl or Cmd is held; it keeps
    /// copy shortcuts from clearing the grid.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use cascii_core_edit::Command;
    ///
    /// assert_eq!(Command::from_key("n", false), Some(Command::AddFrame));
    /// assert_eq!(Command::from_key("c", true), None);
    /// ```
    pub fn from_key(key: &str, ctrl_or_meta: bool) -> Option<Command> {
        match key {
            "c" if !ctrl_or_meta => Some(Command::Clear),
            "f" => Some(Command::Fill),
            "i" => Some(Command::Invert),
            "d" => Some(Command::DrawMode),
            "e" => Some(Command::EraseMode),
            "ArrowLeft" => Some(Command::StepBackward),
            "ArrowRight" => Some(Command::StepForward),
            " " => Some(Command::TogglePlay),
            "n" => Some(Command::AddFrame),
            _ => None,
        }
    }

    /// Whether the host should suppress the key's default browser action.
    pub fn prevents_default(self) -> bool {
        matches!(
            self,
            Command::StepBackward | Command::StepForward | Command::TogglePlay
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        let table = [
            ("c", Command::Clear),
            ("f", Command::Fill),
            ("i", Command::Invert),
            ("d", Command::DrawMode),
            ("e", Command::EraseMode),
            ("ArrowLeft", Command::StepBackward),
            ("ArrowRight", Command::StepForward),
            (" ", Command::TogglePlay),
            ("n", Command::AddFrame),
        ];
        for (key, command) in table {
            assert_eq!(Command::from_key(key, false), Some(command), "key {key:?}");
        }
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(Command::from_key("c", true), None);
        assert_eq!(Command::from_key("x", false), None);
        assert_eq!(Command::from_key("N", false), None);
    }

    #[test]
    fn test_prevents_default() {
        assert!(Command::TogglePlay.prevents_default());
        assert!(!Command::Clear.prevents_default());
    }
}
