use std::fmt;

/// Screen currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// All projects with their summaries.
    #[default]
    ProjectList,
    /// Colors or URLs of the selected project.
    ProjectMenu,
    /// Hex colors of the selected project; Enter copies one.
    ColorList,
    /// Named links of the selected project; Enter copies the target.
    UrlList,
    /// Name prompt for a new project.
    AddProject,
    /// Hex prompt for a new color.
    AddColor,
    /// Two-field form for a new named link.
    AddUrl,
}

impl View {
    /// Every view, in declaration order.
    pub const ALL: [View; 7] = [
        View::ProjectList,
        View::ProjectMenu,
        View::ColorList,
        View::UrlList,
        View::AddProject,
        View::AddColor,
        View::AddUrl,
    ];

    /// True for the text-entry views, where printable keys are input.
    pub fn is_text_entry(self) -> bool {
        matches!(self, View::AddProject | View::AddColor | View::AddUrl)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            View::ProjectList => "project list",
            View::ProjectMenu => "project menu",
            View::ColorList => "color list",
            View::UrlList => "url list",
            View::AddProject => "add project",
            View::AddColor => "add color",
            View::AddUrl => "add url",
        };
        f.write_str(label)
    }
}

/// Entries of the per-project menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Opens [`View::ColorList`].
    Colors,
    /// Opens [`View::UrlList`].
    Urls,
}

impl MenuEntry {
    /// Menu entries in display order.
    pub const ALL: [MenuEntry; 2] = [MenuEntry::Colors, MenuEntry::Urls];

    /// Text shown in the menu.
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Colors => "Colors",
            MenuEntry::Urls => "URLs",
        }
    }

    /// Position of this entry in the menu.
    pub fn cursor(self) -> usize {
        match self {
            MenuEntry::Colors => 0,
            MenuEntry::Urls => 1,
        }
    }

    pub(crate) fn at(cursor: usize) -> Self {
        Self::ALL.get(cursor).copied().unwrap_or(MenuEntry::Colors)
    }
}

/// Field receiving input in the add-link form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlField {
    /// The link label.
    #[default]
    Name,
    /// The link target.
    Url,
}

impl UrlField {
    /// The other field; Tab switches focus with this.
    ///
    /// ```
    /// use diamonds_core::nav::UrlField;
    ///
    /// assert_eq!(UrlField::Name.toggle(), UrlField::Url);
    /// assert_eq!(UrlField::Url.toggle(), UrlField::Name);
    /// ```
    pub fn toggle(self) -> Self {
        match self {
            UrlField::Name => UrlField::Url,
            UrlField::Url => UrlField::Name,
        }
    }
}

/// Terminal-neutral key events understood by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Open, confirm or copy.
    Enter,
    /// Back out of the current view.
    Esc,
    /// Delete the last input character.
    Backspace,
    /// Switch fields in the add-link form.
    Tab,
    /// Move the cursor up; also `k` in list views.
    Up,
    /// Move the cursor down; also `j` in list views.
    Down,
    /// Ctrl+C; quits from every view.
    Interrupt,
}

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running.
    Continue,
    /// Leave the event loop and restore the terminal.
    Quit,
}

/// Cursor, selection and input buffers for the current screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Screen being shown.
    pub view: View,
    /// Index into the active list, or into [`MenuEntry::ALL`].
    pub cursor: usize,
    /// Project opened from the list; valid outside `ProjectList`/`AddProject`.
    pub selected_project: usize,
    /// Project name, hex color, or link target depending on the view.
    pub input: String,
    /// Link label while adding a URL.
    pub url_name: String,
    /// Field receiving input in [`View::AddUrl`].
    pub focused_field: UrlField,
    /// Shown once, then cleared by [`super::Navigator::acknowledge_status`].
    pub status: Option<String>,
}

impl NavState {
    /// Buffer that receives typed characters in the current view.
    pub(crate) fn active_buffer(&mut self) -> &mut String {
        match (self.view, self.focused_field) {
            (View::AddUrl, UrlField::Name) => &mut self.url_name,
            _ => &mut self.input,
        }
    }

    pub(crate) fn reset_buffers(&mut self) {
        self.input.clear();
        self.url_name.clear();
        self.focused_field = UrlField::Name;
    }
}
