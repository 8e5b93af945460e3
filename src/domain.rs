use std::path::PathBuf;

/// The two partitions an entry can belong to. Column 0 receives files that
/// are still unmanaged, column 1 the files selected for management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Unmanaged,
    Managed,
}

impl Column {
    pub fn next(self) -> Self {
        match self {
            Self::Unmanaged => Self::Managed,
            Self::Managed => Self::Unmanaged,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Unmanaged => 0,
            Self::Managed => 1,
        }
    }

    pub fn is_managed(self) -> bool {
        matches!(self, Self::Managed)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Unmanaged => "Available Files",
            Self::Managed => "Managed by Stache",
        }
    }
}

/// One intended symlink, derived from a managed entry. Describing the
/// operation is all this type does; nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOperation {
    pub source: PathBuf,
    pub target_dir: PathBuf,
    pub target_path: PathBuf,
}

impl LinkOperation {
    pub fn describe(&self) -> [String; 2] {
        [
            format!(
                "Linking {} to {}",
                self.source.display(),
                self.target_dir.display()
            ),
            format!("Final location: {}", self.target_path.display()),
        ]
    }
}

/// The closed command set. Keys are bound to commands in the handlers; the
/// app dispatches over this enum and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchColumn,
    MoveUp,
    MoveDown,
    Toggle,
    EmitPlan,
    Rescan,
    ToggleHelp,
    Quit,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::SwitchColumn,
        Command::MoveUp,
        Command::MoveDown,
        Command::Toggle,
        Command::EmitPlan,
        Command::Rescan,
        Command::ToggleHelp,
        Command::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::SwitchColumn => "switch-column",
            Command::MoveUp => "move-up",
            Command::MoveDown => "move-down",
            Command::Toggle => "toggle",
            Command::EmitPlan => "emit-plan",
            Command::Rescan => "rescan",
            Command::ToggleHelp => "help",
            Command::Quit => "quit",
        }
    }

    pub fn key_hint(self) -> &'static str {
        match self {
            Command::SwitchColumn => "tab",
            Command::MoveUp => "k / up",
            Command::MoveDown => "j / down",
            Command::Toggle => "space / enter",
            Command::EmitPlan => "x",
            Command::Rescan => "r",
            Command::ToggleHelp => "?",
            Command::Quit => "q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::SwitchColumn => "focus the other column",
            Command::MoveUp => "move the cursor up",
            Command::MoveDown => "move the cursor down",
            Command::Toggle => "move the selected file to the other column",
            Command::EmitPlan => "print the symlink plan for managed files",
            Command::Rescan => "rescan the home directory",
            Command::ToggleHelp => "show or hide this help",
            Command::Quit => "quit",
        }
    }
}
