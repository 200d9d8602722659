use tracing::{debug, warn};

use crate::{
    clipboard::ClipboardSink,
    models::{is_hex_color, NamedUrl, Project, HEX_COLOR_MAX_LEN},
    store::{ProjectStore, StoreError},
};

use super::state::{Key, MenuEntry, NavState, Outcome, UrlField, View};

/// Keys as interpreted by the list and menu views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListCommand {
    Up,
    Down,
    Confirm,
    Back,
    New,
    Quit,
}

impl ListCommand {
    fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up | Key::Char('k') => Some(Self::Up),
            Key::Down | Key::Char('j') => Some(Self::Down),
            Key::Enter => Some(Self::Confirm),
            Key::Esc => Some(Self::Back),
            Key::Char('n') => Some(Self::New),
            Key::Char('q') => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Owns the projects and routes each key to the handler for the current view.
pub struct Navigator<S, C> {
    projects: Vec<Project>,
    store: S,
    clipboard: C,
    state: NavState,
}

impl<S: ProjectStore, C: ClipboardSink> Navigator<S, C> {
    /// Load projects from `store` and start at the project list.
    pub fn new(store: S, clipboard: C) -> Result<Self, StoreError> {
        let projects = store.load()?;
        Ok(Self::with_projects(projects, store, clipboard))
    }

    /// Start from an already loaded project list.
    pub fn with_projects(projects: Vec<Project>, store: S, clipboard: C) -> Self {
        Self {
            projects,
            store,
            clipboard,
            state: NavState::default(),
        }
    }

    /// Projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Cursor, buffers and status for rendering.
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Screen currently shown.
    pub fn view(&self) -> View {
        self.state.view
    }

    /// Project opened from the list, if the current view has one.
    pub fn selected_project(&self) -> Option<&Project> {
        match self.state.view {
            View::ProjectList | View::AddProject => None,
            _ => self.projects.get(self.state.selected_project),
        }
    }

    /// Clear the status message once it has been drawn.
    pub fn acknowledge_status(&mut self) {
        self.state.status = None;
    }

    /// Length of the list the cursor moves over.
    pub fn active_len(&self) -> usize {
        match self.state.view {
            View::ProjectList | View::AddProject => self.projects.len(),
            View::ProjectMenu => MenuEntry::ALL.len(),
            View::ColorList | View::AddColor => {
                self.selected_project().map_or(0, |p| p.colors.len())
            }
            View::UrlList | View::AddUrl => self.selected_project().map_or(0, |p| p.urls.len()),
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key) -> Outcome {
        if key == Key::Interrupt {
            return Outcome::Quit;
        }

        let outcome = match self.state.view {
            View::ProjectList => self.handle_project_list(key),
            View::ProjectMenu => self.handle_project_menu(key),
            View::ColorList => self.handle_color_list(key),
            View::UrlList => self.handle_url_list(key),
            View::AddProject => self.handle_add_project(key),
            View::AddColor => self.handle_add_color(key),
            View::AddUrl => self.handle_add_url(key),
        };
        self.ensure_valid_selection();
        self.clamp_cursor();
        outcome
    }

    fn handle_project_list(&mut self, key: Key) -> Outcome {
        match ListCommand::from_key(key) {
            Some(ListCommand::Quit) => return Outcome::Quit,
            Some(ListCommand::Up) => self.move_cursor(-1),
            Some(ListCommand::Down) => self.move_cursor(1),
            Some(ListCommand::Confirm) => {
                if self.state.cursor < self.projects.len() {
                    self.state.selected_project = self.state.cursor;
                    self.state.cursor = 0;
                    self.set_view(View::ProjectMenu);
                }
            }
            Some(ListCommand::New) => {
                self.state.reset_buffers();
                self.set_view(View::AddProject);
            }
            Some(ListCommand::Back) | None => {}
        }
        Outcome::Continue
    }

    fn handle_project_menu(&mut self, key: Key) -> Outcome {
        match ListCommand::from_key(key) {
            Some(ListCommand::Quit) => return Outcome::Quit,
            Some(ListCommand::Up) => self.move_cursor(-1),
            Some(ListCommand::Down) => self.move_cursor(1),
            Some(ListCommand::Confirm) => {
                let next = match MenuEntry::at(self.state.cursor) {
                    MenuEntry::Colors => View::ColorList,
                    MenuEntry::Urls => View::UrlList,
                };
                self.state.cursor = 0;
                self.set_view(next);
            }
            Some(ListCommand::Back) => {
                self.state.cursor = self.state.selected_project;
                self.set_view(View::ProjectList);
            }
            Some(ListCommand::New) | None => {}
        }
        Outcome::Continue
    }

    fn handle_color_list(&mut self, key: Key) -> Outcome {
        match ListCommand::from_key(key) {
            Some(ListCommand::Quit) => return Outcome::Quit,
            Some(ListCommand::Up) => self.move_cursor(-1),
            Some(ListCommand::Down) => self.move_cursor(1),
            Some(ListCommand::Confirm) => {
                let color = self
                    .selected_project()
                    .and_then(|project| project.colors.get(self.state.cursor))
                    .cloned();
                if let Some(color) = color {
                    self.copy_to_clipboard(color);
                }
            }
            Some(ListCommand::New) => {
                self.state.reset_buffers();
                self.set_view(View::AddColor);
            }
            Some(ListCommand::Back) => {
                self.state.cursor = MenuEntry::Colors.cursor();
                self.set_view(View::ProjectMenu);
            }
            None => {}
        }
        Outcome::Continue
    }

    fn handle_url_list(&mut self, key: Key) -> Outcome {
        match ListCommand::from_key(key) {
            Some(ListCommand::Quit) => return Outcome::Quit,
            Some(ListCommand::Up) => self.move_cursor(-1),
            Some(ListCommand::Down) => self.move_cursor(1),
            Some(ListCommand::Confirm) => {
                let url = self
                    .selected_project()
                    .and_then(|project| project.urls.get(self.state.cursor))
                    .map(|named| named.url.clone());
                if let Some(url) = url {
                    self.copy_to_clipboard(url);
                }
            }
            Some(ListCommand::New) => {
                self.state.reset_buffers();
                self.set_view(View::AddUrl);
            }
            Some(ListCommand::Back) => {
                self.state.cursor = MenuEntry::Urls.cursor();
                self.set_view(View::ProjectMenu);
            }
            None => {}
        }
        Outcome::Continue
    }

    fn handle_add_project(&mut self, key: Key) -> Outcome {
        match key {
            Key::Esc => {
                self.state.reset_buffers();
                self.set_view(View::ProjectList);
            }
            Key::Enter => {
                if !self.state.input.is_empty() {
                    let name = std::mem::take(&mut self.state.input);
                    self.projects.push(Project::new(name));
                    self.persist();
                    self.set_view(View::ProjectList);
                }
            }
            _ => self.edit_buffer(key, None),
        }
        Outcome::Continue
    }

    fn handle_add_color(&mut self, key: Key) -> Outcome {
        match key {
            Key::Esc => {
                self.state.reset_buffers();
                self.set_view(View::ColorList);
            }
            Key::Enter => {
                if is_hex_color(&self.state.input) {
                    let color = std::mem::take(&mut self.state.input);
                    if let Some(project) = self.projects.get_mut(self.state.selected_project) {
                        project.colors.push(color);
                        self.state.cursor = project.colors.len() - 1;
                    }
                    self.persist();
                    self.set_view(View::ColorList);
                }
            }
            _ => self.edit_buffer(key, Some(HEX_COLOR_MAX_LEN)),
        }
        Outcome::Continue
    }

    fn handle_add_url(&mut self, key: Key) -> Outcome {
        match key {
            Key::Esc => {
                self.state.reset_buffers();
                self.set_view(View::UrlList);
            }
            Key::Tab => self.state.focused_field = self.state.focused_field.toggle(),
            Key::Enter => match self.state.focused_field {
                UrlField::Name => self.state.focused_field = UrlField::Url,
                UrlField::Url => {
                    if !self.state.url_name.is_empty() && !self.state.input.is_empty() {
                        let named = NamedUrl::new(
                            std::mem::take(&mut self.state.url_name),
                            std::mem::take(&mut self.state.input),
                        );
                        if let Some(project) = self.projects.get_mut(self.state.selected_project)
                        {
                            project.urls.push(named);
                            self.state.cursor = project.urls.len() - 1;
                        }
                        self.state.reset_buffers();
                        self.persist();
                        self.set_view(View::UrlList);
                    }
                }
            },
            _ => self.edit_buffer(key, None),
        }
        Outcome::Continue
    }

    fn edit_buffer(&mut self, key: Key, max_chars: Option<usize>) {
        let buffer = self.state.active_buffer();
        match key {
            Key::Backspace => {
                buffer.pop();
            }
            Key::Char(ch) if !ch.is_control() => {
                if max_chars.map_or(true, |max| buffer.chars().count() < max) {
                    buffer.push(ch);
                }
            }
            _ => {}
        }
    }

    fn copy_to_clipboard(&mut self, value: String) {
        match self.clipboard.write_text(&value) {
            Ok(()) => {
                self.state.status = Some(format!("Copied {value} to clipboard!"));
            }
            Err(err) => {
                warn!("clipboard write failed: {err}");
                self.state.status = Some(format!("Clipboard error: {err}"));
            }
        }
    }

    // A failed write keeps the in-memory change; the next save includes it.
    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.projects) {
            warn!("failed to persist projects: {err}");
            self.state.status = Some(format!("Error writing data: {err}"));
        }
    }

    fn set_view(&mut self, view: View) {
        debug!(from = %self.state.view, to = %view, "view transition");
        self.state.view = view;
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let next = self.state.cursor as isize + delta;
        if (0..len as isize).contains(&next) {
            self.state.cursor = next as usize;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.active_len();
        if len == 0 {
            self.state.cursor = 0;
        } else if self.state.cursor >= len {
            self.state.cursor = len - 1;
        }
    }

    fn ensure_valid_selection(&mut self) {
        let needs_project = !matches!(self.state.view, View::ProjectList | View::AddProject);
        if needs_project && self.state.selected_project >= self.projects.len() {
            self.state.reset_buffers();
            self.state.cursor = 0;
            self.set_view(View::ProjectList);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::Result;
    use tempfile::tempdir;

    use super::*;
    use crate::{clipboard::ClipboardError, store::JsonFileStore};

    #[derive(Clone, Default)]
    struct MemoryStore {
        saved: Rc<RefCell<Vec<Vec<Project>>>>,
        fail: bool,
    }

    impl MemoryStore {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn save_count(&self) -> usize {
            self.saved.borrow().len()
        }

        fn last(&self) -> Option<Vec<Project>> {
            self.saved.borrow().last().cloned()
        }
    }

    impl ProjectStore for MemoryStore {
        fn load(&self) -> Result<Vec<Project>, StoreError> {
            Ok(self.last().unwrap_or_default())
        }

        fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Write {
                    path: "data.json".into(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.saved.borrow_mut().push(projects.to_vec());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn write_text(&mut self, value: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".to_string()));
            }
            self.copied.borrow_mut().push(value.to_string());
            Ok(())
        }
    }

    type TestNavigator = Navigator<MemoryStore, RecordingClipboard>;

    fn navigator(projects: Vec<Project>) -> (TestNavigator, MemoryStore, RecordingClipboard) {
        let store = MemoryStore::default();
        let clipboard = RecordingClipboard::default();
        let nav = Navigator::with_projects(projects, store.clone(), clipboard.clone());
        (nav, store, clipboard)
    }

    fn sample_project() -> Project {
        let mut project = Project::new("Branding");
        project.colors = vec!["#1ABC9C".into(), "#FFF".into(), "#FF5733".into()];
        project.urls = vec![
            NamedUrl::new("Docs", "https://example.com/docs"),
            NamedUrl::new("Repo", "https://example.com/repo"),
        ];
        project
    }

    fn type_text<S: ProjectStore, C: ClipboardSink>(nav: &mut Navigator<S, C>, text: &str) {
        for ch in text.chars() {
            nav.handle_key(Key::Char(ch));
        }
    }

    fn open_first_project(nav: &mut TestNavigator, entry: MenuEntry) {
        nav.handle_key(Key::Enter);
        assert_eq!(nav.view(), View::ProjectMenu);
        if entry == MenuEntry::Urls {
            nav.handle_key(Key::Down);
        }
        nav.handle_key(Key::Enter);
    }

    #[test]
    fn adds_project_and_persists() {
        let (mut nav, store, _) = navigator(Vec::new());

        nav.handle_key(Key::Char('n'));
        assert_eq!(nav.view(), View::AddProject);
        type_text(&mut nav, "Branding");
        nav.handle_key(Key::Enter);

        assert_eq!(nav.view(), View::ProjectList);
        assert_eq!(nav.projects(), &[Project::new("Branding")]);
        assert_eq!(store.last(), Some(vec![Project::new("Branding")]));
        assert!(nav.state().input.is_empty());
    }

    #[test]
    fn project_count_matches_non_empty_submissions() {
        let (mut nav, store, _) = navigator(Vec::new());
        let names = ["One", "", "Two", "", "", "Three q j k n"];

        for name in names {
            nav.handle_key(Key::Char('n'));
            type_text(&mut nav, name);
            nav.handle_key(Key::Enter);
            if name.is_empty() {
                assert_eq!(nav.view(), View::AddProject);
                nav.handle_key(Key::Esc);
            }
        }

        assert_eq!(nav.projects().len(), 3);
        assert_eq!(store.save_count(), 3);
        assert_eq!(nav.projects()[2].name, "Three q j k n");
    }

    #[test]
    fn cancelling_add_project_discards_input() {
        let (mut nav, store, _) = navigator(Vec::new());
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "Draft");
        nav.handle_key(Key::Esc);

        assert_eq!(nav.view(), View::ProjectList);
        assert!(nav.projects().is_empty());
        assert!(nav.state().input.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn backspace_removes_whole_characters() {
        let (mut nav, _, _) = navigator(Vec::new());
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "Café");
        nav.handle_key(Key::Backspace);
        assert_eq!(nav.state().input, "Caf");

        for _ in 0..5 {
            nav.handle_key(Key::Backspace);
        }
        assert!(nav.state().input.is_empty());
    }

    #[test]
    fn confirm_on_empty_project_list_is_noop() {
        let (mut nav, _, _) = navigator(Vec::new());
        nav.handle_key(Key::Enter);
        assert_eq!(nav.view(), View::ProjectList);
        assert_eq!(nav.state().cursor, 0);
    }

    #[test]
    fn cursor_stops_at_list_boundaries() {
        let projects = vec![Project::new("A"), Project::new("B"), Project::new("C")];
        let (mut nav, _, _) = navigator(projects);

        nav.handle_key(Key::Up);
        assert_eq!(nav.state().cursor, 0);

        for _ in 0..10 {
            nav.handle_key(Key::Char('j'));
            assert!(nav.state().cursor < 3);
        }
        assert_eq!(nav.state().cursor, 2);

        nav.handle_key(Key::Down);
        assert_eq!(nav.state().cursor, 2);
        nav.handle_key(Key::Char('k'));
        assert_eq!(nav.state().cursor, 1);
    }

    #[test]
    fn menu_cursor_is_limited_to_two_entries() {
        let (mut nav, _, _) = navigator(vec![sample_project()]);
        nav.handle_key(Key::Enter);

        for _ in 0..4 {
            nav.handle_key(Key::Down);
        }
        assert_eq!(nav.state().cursor, 1);
        for _ in 0..4 {
            nav.handle_key(Key::Up);
        }
        assert_eq!(nav.state().cursor, 0);
    }

    #[test]
    fn selecting_project_opens_its_menu() {
        let (mut nav, _, _) = navigator(vec![Project::new("A"), sample_project()]);
        nav.handle_key(Key::Down);
        nav.handle_key(Key::Enter);

        assert_eq!(nav.view(), View::ProjectMenu);
        assert_eq!(nav.state().selected_project, 1);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.selected_project().map(|p| p.name.as_str()), Some("Branding"));
    }

    #[test]
    fn back_navigation_restores_positions() {
        let (mut nav, _, _) = navigator(vec![Project::new("A"), sample_project()]);
        nav.handle_key(Key::Down);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Down);
        nav.handle_key(Key::Enter);
        assert_eq!(nav.view(), View::UrlList);

        nav.handle_key(Key::Esc);
        assert_eq!(nav.view(), View::ProjectMenu);
        assert_eq!(nav.state().cursor, 1);

        nav.handle_key(Key::Esc);
        assert_eq!(nav.view(), View::ProjectList);
        assert_eq!(nav.state().cursor, 1);
    }

    #[test]
    fn confirm_copies_color_at_cursor() {
        let (mut nav, _, clipboard) = navigator(vec![sample_project()]);
        open_first_project(&mut nav, MenuEntry::Colors);
        assert_eq!(nav.view(), View::ColorList);

        nav.handle_key(Key::Down);
        nav.handle_key(Key::Enter);

        assert_eq!(clipboard.copied.borrow().as_slice(), ["#FFF".to_string()]);
        assert_eq!(
            nav.state().status.as_deref(),
            Some("Copied #FFF to clipboard!")
        );
        nav.acknowledge_status();
        assert!(nav.state().status.is_none());
    }

    #[test]
    fn confirm_copies_url_not_name() {
        let (mut nav, _, clipboard) = navigator(vec![sample_project()]);
        open_first_project(&mut nav, MenuEntry::Urls);
        assert_eq!(nav.view(), View::UrlList);

        nav.handle_key(Key::Char('j'));
        nav.handle_key(Key::Enter);
        assert_eq!(
            clipboard.copied.borrow().as_slice(),
            ["https://example.com/repo".to_string()]
        );
    }

    #[test]
    fn confirm_on_empty_color_list_copies_nothing() {
        let (mut nav, _, clipboard) = navigator(vec![Project::new("Empty")]);
        open_first_project(&mut nav, MenuEntry::Colors);
        nav.handle_key(Key::Enter);

        assert!(clipboard.copied.borrow().is_empty());
        assert!(nav.state().status.is_none());
        assert_eq!(nav.state().cursor, 0);
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let store = MemoryStore::default();
        let clipboard = RecordingClipboard {
            fail: true,
            ..RecordingClipboard::default()
        };
        let mut nav = Navigator::with_projects(vec![sample_project()], store, clipboard);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);

        let status = nav.state().status.clone().unwrap_or_default();
        assert!(status.starts_with("Clipboard error:"), "got {status}");
    }

    #[test]
    fn hex_validation_gates_add_color() {
        let cases = [
            ("#FFF", true),
            ("#FF5733", true),
            ("#FF57", false),
            ("FF5733", false),
        ];
        for (input, accepted) in cases {
            let (mut nav, store, _) = navigator(vec![Project::new("P")]);
            open_first_project(&mut nav, MenuEntry::Colors);
            nav.handle_key(Key::Char('n'));
            type_text(&mut nav, input);
            nav.handle_key(Key::Enter);

            if accepted {
                assert_eq!(nav.view(), View::ColorList, "{input}");
                assert_eq!(nav.projects()[0].colors, vec![input.to_string()]);
                assert_eq!(store.save_count(), 1);
            } else {
                assert_eq!(nav.view(), View::AddColor, "{input}");
                assert_eq!(nav.state().input, input);
                assert!(nav.projects()[0].colors.is_empty());
                assert!(nav.state().status.is_none());
                assert_eq!(store.save_count(), 0);
            }
        }
    }

    #[test]
    fn add_color_input_caps_at_seven_characters() {
        let (mut nav, _, _) = navigator(vec![Project::new("P")]);
        open_first_project(&mut nav, MenuEntry::Colors);
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "#FF57333");

        assert_eq!(nav.state().input, "#FF5733");
        nav.handle_key(Key::Enter);
        assert_eq!(nav.projects()[0].colors, vec!["#FF5733".to_string()]);
    }

    #[test]
    fn new_color_moves_cursor_to_it() {
        let (mut nav, _, _) = navigator(vec![sample_project()]);
        open_first_project(&mut nav, MenuEntry::Colors);
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "#000");
        nav.handle_key(Key::Enter);

        assert_eq!(nav.state().cursor, 3);
        assert_eq!(nav.projects()[0].colors[3], "#000");
    }

    #[test]
    fn cancelling_add_color_returns_to_list() {
        let (mut nav, store, _) = navigator(vec![sample_project()]);
        open_first_project(&mut nav, MenuEntry::Colors);
        nav.handle_key(Key::Down);
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "#123");
        nav.handle_key(Key::Esc);

        assert_eq!(nav.view(), View::ColorList);
        assert_eq!(nav.state().cursor, 1);
        assert!(nav.state().input.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn add_url_two_step_entry() {
        let (mut nav, store, _) = navigator(vec![sample_project()]);
        open_first_project(&mut nav, MenuEntry::Urls);
        nav.handle_key(Key::Char('n'));
        assert_eq!(nav.view(), View::AddUrl);

        type_text(&mut nav, "Docs");
        nav.handle_key(Key::Enter);
        assert_eq!(nav.state().focused_field, UrlField::Url);
        assert_eq!(nav.view(), View::AddUrl);

        type_text(&mut nav, "https://example.com");
        nav.handle_key(Key::Enter);

        assert_eq!(nav.view(), View::UrlList);
        let urls = &nav.projects()[0].urls;
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[2], NamedUrl::new("Docs", "https://example.com"));
        assert_eq!(nav.state().cursor, 2);
        assert_eq!(nav.state().focused_field, UrlField::Name);
        assert!(nav.state().url_name.is_empty() && nav.state().input.is_empty());
        assert_eq!(store.last().map(|p| p[0].urls.len()), Some(3));
    }

    #[test]
    fn add_url_with_empty_name_is_rejected() {
        let (mut nav, store, _) = navigator(vec![Project::new("P")]);
        open_first_project(&mut nav, MenuEntry::Urls);
        nav.handle_key(Key::Char('n'));

        nav.handle_key(Key::Enter);
        type_text(&mut nav, "https://example.com");
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Tab);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);

        assert_eq!(nav.view(), View::AddUrl);
        assert_eq!(nav.state().input, "https://example.com");
        assert!(nav.state().url_name.is_empty());
        assert!(nav.projects()[0].urls.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn add_url_tab_switches_typing_target() {
        let (mut nav, _, _) = navigator(vec![Project::new("P")]);
        open_first_project(&mut nav, MenuEntry::Urls);
        nav.handle_key(Key::Char('n'));

        type_text(&mut nav, "Nam");
        nav.handle_key(Key::Tab);
        type_text(&mut nav, "url");
        nav.handle_key(Key::Backspace);
        nav.handle_key(Key::Tab);
        type_text(&mut nav, "e");

        assert_eq!(nav.state().url_name, "Name");
        assert_eq!(nav.state().input, "ur");
        assert_eq!(nav.state().focused_field, UrlField::Name);
    }

    #[test]
    fn cancelling_add_url_resets_form() {
        let (mut nav, _, _) = navigator(vec![Project::new("P")]);
        open_first_project(&mut nav, MenuEntry::Urls);
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "Docs");
        nav.handle_key(Key::Tab);
        nav.handle_key(Key::Esc);

        assert_eq!(nav.view(), View::UrlList);
        assert!(nav.state().url_name.is_empty());
        assert_eq!(nav.state().focused_field, UrlField::Name);
    }

    #[test]
    fn write_failure_keeps_mutation_and_reports() {
        let mut nav = Navigator::with_projects(
            Vec::new(),
            MemoryStore::failing(),
            RecordingClipboard::default(),
        );
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "Kept");
        nav.handle_key(Key::Enter);

        assert_eq!(nav.view(), View::ProjectList);
        assert_eq!(nav.projects().len(), 1);
        let status = nav.state().status.clone().unwrap_or_default();
        assert!(status.starts_with("Error writing data:"), "got {status}");
    }

    #[test]
    fn quit_keys_depend_on_view() {
        let (mut nav, _, _) = navigator(vec![sample_project()]);
        assert_eq!(nav.handle_key(Key::Char('q')), Outcome::Quit);

        nav.handle_key(Key::Char('n'));
        assert_eq!(nav.handle_key(Key::Char('q')), Outcome::Continue);
        assert_eq!(nav.state().input, "q");
        assert_eq!(nav.handle_key(Key::Interrupt), Outcome::Quit);
    }

    #[test]
    fn every_view_accepts_every_key() {
        let keys = [
            Key::Char('x'),
            Key::Char('n'),
            Key::Enter,
            Key::Esc,
            Key::Backspace,
            Key::Tab,
            Key::Up,
            Key::Down,
        ];
        for view in View::ALL {
            for key in keys {
                let (mut nav, _, _) = navigator(vec![Project::new("Empty")]);
                nav.state.view = view;
                assert_eq!(nav.handle_key(key), Outcome::Continue, "{view} {key:?}");
                assert!(nav.state().cursor <= nav.active_len().saturating_sub(1));
            }
        }
    }

    #[test]
    fn scenario_persists_across_reload() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");

        let mut nav = Navigator::new(JsonFileStore::new(&path), RecordingClipboard::default())?;
        assert!(nav.projects().is_empty());

        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "Branding");
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Enter);
        nav.handle_key(Key::Char('n'));
        type_text(&mut nav, "#1ABC9C");
        nav.handle_key(Key::Enter);

        let reloaded = Navigator::new(JsonFileStore::new(&path), RecordingClipboard::default())?;
        assert_eq!(reloaded.projects().len(), 1);
        assert_eq!(reloaded.projects()[0].name, "Branding");
        assert_eq!(reloaded.projects()[0].colors, vec!["#1ABC9C".to_string()]);
        Ok(())
    }
}
