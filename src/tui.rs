use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::render::{self, DisplaySettings, Template};
use crate::store::Store;

struct BuilderState {
    selected: usize,
    scroll_offset: u16,
    settings: DisplaySettings,
    ats: bool,
    notice: Option<String>,
}

impl BuilderState {
    fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            settings: DisplaySettings::default(),
            ats: false,
            notice: None,
        }
    }

    fn next(&mut self, len: usize) {
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

fn section_items(store: &Store) -> Vec<String> {
    let data = store.data();
    vec![
        format!(
            "Personal      {} {}",
            data.personal_info.first_name, data.personal_info.last_name
        ),
        "Summary".to_string(),
        format!("Experience    ({})", data.work_experience.len()),
        format!("Education     ({})", data.education.len()),
        format!("Skills        ({})", data.skills.len()),
        format!("Languages     ({})", data.languages.len()),
        format!("Certifications ({})", data.certifications.len()),
        format!("References    ({})", data.references.len()),
        format!("Versions      ({})", store.versions().len()),
    ]
}

fn cycle_template(current: Template, step: isize) -> Template {
    let all = Template::all();
    let index = all.iter().position(|t| *t == current).unwrap_or(0) as isize;
    let next = (index + step).rem_euclid(all.len() as isize) as usize;
    all[next]
}

/// Interactive builder: section list on the left, live template preview on
/// the right. Template changes persist through the store; display settings
/// are transient render state.
pub fn run_builder(store: &mut Store) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut state = BuilderState::new();
    let result = run_loop(&mut terminal, &mut state, store);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut BuilderState,
    store: &mut Store,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, store, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            state.notice = None;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(section_items(store).len()),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Char('t') => {
                    let next = cycle_template(Template::parse(store.template()), 1);
                    if store.set_template(next.id()).is_ok() {
                        state.notice = Some(format!("Template: {}", next.id()));
                    }
                    state.scroll_offset = 0;
                }
                KeyCode::Char('T') => {
                    let prev = cycle_template(Template::parse(store.template()), -1);
                    if store.set_template(prev.id()).is_ok() {
                        state.notice = Some(format!("Template: {}", prev.id()));
                    }
                    state.scroll_offset = 0;
                }
                KeyCode::Char('a') => {
                    state.ats = !state.ats;
                    state.scroll_offset = 0;
                }
                KeyCode::Char('p') => {
                    state.settings.show_profile_picture = !state.settings.show_profile_picture;
                }
                KeyCode::Char('r') => {
                    state.settings.show_references = !state.settings.show_references;
                }
                KeyCode::Char('c') => {
                    state.settings.show_certifications = !state.settings.show_certifications;
                }
                KeyCode::Char('l') => {
                    state.settings.show_languages = !state.settings.show_languages;
                }
                KeyCode::Char('s') => {
                    let name = format!(
                        "Snapshot {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                    );
                    match store.save_version(&name) {
                        Ok(_) => state.notice = Some(format!("Saved version '{name}'")),
                        Err(_) => state.notice = Some("Failed to save version".to_string()),
                    }
                }
                _ => {}
            }
            list_state.select(Some(state.selected));
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &BuilderState, store: &Store, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(frame.area());

    // Left panel: sections
    let items: Vec<ListItem> = section_items(store)
        .into_iter()
        .map(ListItem::new)
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Resume "))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: rendered preview
    let template = Template::parse(store.template());
    let lines = if state.ats {
        render::render_ats(store.data())
    } else {
        render::render(template, store.data(), &state.settings)
    };

    let title = if state.ats {
        " Preview (ATS view) ".to_string()
    } else {
        format!(" Preview ({}) ", template.id())
    };

    let mut text_lines: Vec<Line> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            text_lines.push(Line::from(Span::styled(
                line.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        } else {
            text_lines.push(Line::from(line.clone()));
        }
    }

    let preview = Paragraph::new(Text::from(text_lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));

    frame.render_widget(preview, chunks[1]);

    // Footer help / notices
    let help_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let footer = match &state.notice {
        Some(notice) => format!(" {notice}"),
        None => " j/k:navigate  J/K:scroll  t/T:template  a:ats  p/r/c/l:toggles  s:save version  q:quit"
            .to_string(),
    };
    let help = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area[1]);
}
