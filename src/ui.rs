use crate::badges::{BadgeBar, ALL_LABEL};
use crate::catalog::{Catalog, Pokemon};
use crate::chains::{assemble, EvolutionChain};
use crate::config::UiConfig;
use crate::palette::{ColorToken, Palette};
use crate::view::{Tab, ViewController};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info};

pub const NOT_FOUND: &str = "Покемон не найден";
pub const SEARCH_PLACEHOLDER: &str = "Найти покемона...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Editing,
}

pub struct App<'a> {
    pub view: ViewController<'a>,
    pub chains: Vec<EvolutionChain<'a>>,
    pub pokedex_state: TableState,
    pub results_state: TableState,
    pub badge_cursor: usize,
    pub input_mode: InputMode,
    pub show_detail: bool,
    pub page_size: usize,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog, config: &UiConfig) -> Self {
        let mut pokedex_state = TableState::default();
        if !catalog.is_empty() {
            pokedex_state.select(Some(0));
        }
        let results_state = pokedex_state.clone();

        Self {
            view: ViewController::with_tab(catalog, config.start_tab),
            chains: assemble(catalog),
            pokedex_state,
            results_state,
            badge_cursor: 0,
            input_mode: InputMode::Browse,
            show_detail: false,
            page_size: config.page_size.max(1),
            should_quit: false,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.view.catalog()
    }

    pub fn badge_bar(&self) -> BadgeBar {
        BadgeBar::new(self.catalog(), self.view.selected_category())
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    /// Entry under the cursor of the active list, if the tab has one
    pub fn selected_pokemon(&self) -> Option<&'a Pokemon> {
        match self.view.active_tab() {
            Tab::Pokedex => self
                .pokedex_state
                .selected()
                .and_then(|i| self.catalog().all().get(i)),
            Tab::Search => self
                .results_state
                .selected()
                .and_then(|i| self.view.filtered().get(i).copied()),
            Tab::Evolutions => None,
        }
    }

    fn active_list(&mut self) -> Option<(usize, &mut TableState)> {
        match self.view.active_tab() {
            Tab::Pokedex => Some((self.catalog().len(), &mut self.pokedex_state)),
            Tab::Search => Some((self.view.filtered().len(), &mut self.results_state)),
            Tab::Evolutions => None,
        }
    }

    pub fn next(&mut self) {
        let Some((len, state)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let Some((len, state)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let step = self.page_size;
        let Some((len, state)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| (i + step).min(len - 1));
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let step = self.page_size;
        let Some((len, state)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(step));
        state.select(Some(i));
    }

    pub fn first(&mut self) {
        if let Some((len, state)) = self.active_list() {
            state.select(if len == 0 { None } else { Some(0) });
        }
    }

    pub fn last(&mut self) {
        if let Some((len, state)) = self.active_list() {
            state.select(len.checked_sub(1));
        }
    }

    // ========================================================================
    // SEARCH TAB
    // ========================================================================

    pub fn badge_left(&mut self) {
        let len = self.badge_bar().len();
        self.badge_cursor = if self.badge_cursor == 0 {
            len.saturating_sub(1)
        } else {
            self.badge_cursor - 1
        };
    }

    pub fn badge_right(&mut self) {
        let len = self.badge_bar().len();
        self.badge_cursor = if self.badge_cursor + 1 >= len {
            0
        } else {
            self.badge_cursor + 1
        };
    }

    /// Apply the badge under the cursor as the category filter
    pub fn activate_badge(&mut self) {
        let bar = self.badge_bar();
        if let Some(badge) = bar.get(self.badge_cursor) {
            info!(category = badge.label(), "category filter selected");
            self.view.select_category(badge.category);
            self.reset_results();
        }
    }

    pub fn clear_filters(&mut self) {
        self.view.clear_search();
        self.view.clear_category();
        self.badge_cursor = 0;
        self.reset_results();
    }

    fn reset_results(&mut self) {
        if self.view.is_empty_result() {
            self.results_state.select(None);
        } else {
            self.results_state.select(Some(0));
        }
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Browse,
            KeyCode::Backspace => {
                self.view.pop_search_char();
                self.reset_results();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.view.push_search_char(c);
                self.reset_results();
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let on_search = self.view.active_tab() == Tab::Search;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view.next_tab(),
            KeyCode::BackTab => self.view.previous_tab(),
            KeyCode::Char('1') => self.view.set_tab(Tab::Pokedex),
            KeyCode::Char('2') => self.view.set_tab(Tab::Evolutions),
            KeyCode::Char('3') => self.view.set_tab(Tab::Search),
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Char('/') if on_search => self.input_mode = InputMode::Editing,
            KeyCode::Char('c') if on_search => self.clear_filters(),
            KeyCode::Left | KeyCode::Char('h') if on_search => self.badge_left(),
            KeyCode::Right | KeyCode::Char('l') if on_search => self.badge_right(),
            KeyCode::Char(' ') if on_search => self.activate_badge(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => self.first(),
            KeyCode::End => self.last(),
            _ => {}
        }
        debug!(tab = self.view.active_tab().title(), key = ?key.code, "key handled");
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal UI failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.view.active_tab() {
        Tab::Pokedex => render_pokedex(f, chunks[1], app),
        Tab::Evolutions => render_evolutions(f, chunks[1], app),
        Tab::Search => render_search(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        " Покедекс  ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *tab == app.view.active_tab() {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(format!("{} {}", i + 1, tab.title()), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Всего: {}", app.catalog().len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

// ============================================================================
// POKEDEX TAB
// ============================================================================

fn render_pokedex(f: &mut Frame, area: Rect, app: &mut App) {
    let catalog = app.catalog();
    let items: Vec<&Pokemon> = catalog.all().iter().collect();
    let table = pokemon_table(&items, catalog.palette(), " Покедекс ", false);

    if app.show_detail {
        let content_chunks = split_detail(area);
        f.render_stateful_widget(table, content_chunks[0], &mut app.pokedex_state);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        f.render_stateful_widget(table, area, &mut app.pokedex_state);
    }
}

fn split_detail(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area)
}

fn pokemon_table(
    items: &[&Pokemon],
    palette: &Palette,
    title: &str,
    with_evolution: bool,
) -> Table<'static> {
    let mut headers = vec!["#", "Имя", "Типы"];
    if with_evolution {
        headers.push("Эволюция");
    }
    let header_cells = headers.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = items
        .iter()
        .map(|pokemon| {
            let mut cells = vec![
                Cell::from(pokemon.display_number())
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(pokemon.name)
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(Line::from(category_spans(pokemon, palette))),
            ];
            if with_evolution {
                cells.push(Cell::from(evolution_summary(pokemon)));
            }
            Row::new(cells).height(1)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Length(22),
    ];
    if with_evolution {
        widths.push(Constraint::Min(20));
    }

    Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title.to_string()),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ")
}

fn category_spans(pokemon: &Pokemon, palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(pokemon.categories.len() * 2);
    for (i, label) in pokemon.categories.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(badge_span(label, palette.color_for(label)));
    }
    spans
}

fn badge_span(label: &str, color: ColorToken) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(Color::White).bg(token_color(color)),
    )
}

pub fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Green => Color::Green,
        ColorToken::Purple => Color::Magenta,
        ColorToken::Red => Color::Red,
        ColorToken::Blue => Color::Blue,
        ColorToken::Yellow => Color::Yellow,
        ColorToken::Sky => Color::LightCyan,
        ColorToken::Gray => Color::Gray,
        ColorToken::Pink => Color::LightMagenta,
        ColorToken::Neutral => Color::DarkGray,
    }
}

fn evolution_summary(pokemon: &Pokemon) -> String {
    let Some(evolution) = pokemon.evolution else {
        return String::new();
    };

    let mut parts = Vec::new();
    if let Some(from) = evolution.from {
        parts.push(format!("← Из: {}", from));
    }
    if let Some(to) = evolution.to {
        parts.push(format!("→ В: {}", to));
    }
    parts.join("  ")
}

// ============================================================================
// EVOLUTIONS TAB
// ============================================================================

const CHAIN_HEIGHT: u16 = 8;

fn render_evolutions(f: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(app.chains.iter().map(|_| Constraint::Length(CHAIN_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Цепочки эволюции",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Узнай, как покемоны развиваются и становятся сильнее",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let palette = app.catalog().palette();
    for (chain, chunk) in app.chains.iter().zip(chunks.iter().skip(1)) {
        render_chain(f, *chunk, chain, palette);
    }
}

fn render_chain(f: &mut Frame, area: Rect, chain: &EvolutionChain, palette: &Palette) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints = Vec::with_capacity(chain.len() * 2);
    for link in &chain.links {
        constraints.push(Constraint::Min(18));
        if link.connector {
            constraints.push(Constraint::Length(5));
        }
    }

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    let mut cell = cells.iter();
    for link in &chain.links {
        let Some(card_area) = cell.next() else {
            break;
        };

        let pokemon = link.pokemon;
        let mut lines = vec![
            Line::from(Span::styled(
                pokemon.display_number(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                pokemon.name,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(category_spans(pokemon, palette)),
        ];
        if let Some(level) = link.level {
            lines.push(Line::from(Span::styled(
                format!("Ур. {}", level),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )));
        }

        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(card, *card_area);

        if link.connector {
            if let Some(arrow_area) = cell.next() {
                let arrow = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(""),
                    Line::from(Span::styled(
                        "→",
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )),
                ])
                .alignment(Alignment::Center);
                f.render_widget(arrow, *arrow_area);
            }
        }
    }
}

// ============================================================================
// SEARCH TAB
// ============================================================================

fn render_search(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Length(3), // Category badges
            Constraint::Min(0),    // Results
        ])
        .split(area);

    render_search_input(f, chunks[0], app);
    render_badge_bar(f, chunks[1], app);

    if app.view.is_empty_result() {
        render_not_found(f, chunks[2]);
        return;
    }

    let table = pokemon_table(
        app.view.filtered(),
        app.catalog().palette(),
        &format!(" Результаты: {} ", app.view.filtered().len()),
        true,
    );

    if app.show_detail {
        let content_chunks = split_detail(chunks[2]);
        f.render_stateful_widget(table, content_chunks[0], &mut app.results_state);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        f.render_stateful_widget(table, chunks[2], &mut app.results_state);
    }
}

fn render_search_input(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let text = if app.view.search().is_empty() && !editing {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.view.search().to_string())
    };

    let border = if editing { Color::Yellow } else { Color::White };
    let input = Paragraph::new(Line::from(vec![Span::raw(" 🔍 "), text])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Поиск "),
    );
    f.render_widget(input, area);

    if editing {
        let typed = app.view.search().chars().count() as u16;
        f.set_cursor(area.x + 5 + typed, area.y + 1);
    }
}

fn render_badge_bar(f: &mut Frame, area: Rect, app: &App) {
    let bar = app.badge_bar();
    let mut spans = Vec::with_capacity(bar.len() * 2);

    for (i, badge) in bar.badges.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }

        let mut style = if badge.selected {
            let bg = if badge.label() == ALL_LABEL {
                Color::Cyan
            } else {
                token_color(badge.color)
            };
            Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if i == app.badge_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        spans.push(Span::styled(format!(" {} ", badge.label()), style));
    }

    let badges = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Фильтр по типу "),
    );
    f.render_widget(badges, area);
}

fn render_not_found(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(vec![
        Line::from(""),
        Line::from("❓"),
        Line::from(""),
        Line::from(Span::styled(
            NOT_FOUND,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(placeholder, area);
}

// ============================================================================
// DETAIL & STATUS
// ============================================================================

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Подробно ");

    let Some(pokemon) = app.selected_pokemon() else {
        f.render_widget(Paragraph::new("Ничего не выбрано").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let catalog = app.catalog();

    let mut content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Номер: ", label),
            Span::raw(pokemon.display_number()),
        ]),
        Line::from(vec![
            Span::styled("  Имя: ", label),
            Span::raw(pokemon.name),
        ]),
        Line::from({
            let mut spans = vec![Span::styled("  Типы: ", label)];
            spans.extend(category_spans(pokemon, catalog.palette()));
            spans
        }),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Арт: ", label),
            Span::styled(truncate(pokemon.image, 60), Style::default().fg(Color::Green)),
        ]),
    ];

    if let Some(evolution) = pokemon.evolution {
        content.push(Line::from(""));
        content.push(Line::from("  ─────────────────────────────────────"));
        if let Some(from) = evolution.from {
            content.push(Line::from(vec![
                Span::styled("  ← Из: ", label),
                Span::raw(from),
            ]));
        }
        if let Some(to) = evolution.to {
            content.push(Line::from(vec![
                Span::styled("  → В: ", label),
                Span::raw(to),
            ]));
        }
        if let Some(level) = evolution.level {
            content.push(Line::from(vec![
                Span::styled("  Ур.: ", label),
                Span::raw(level.to_string()),
            ]));
        }

        let known: Vec<String> = catalog
            .successors(pokemon.id)
            .iter()
            .map(|p| format!("{} {}", p.display_number(), p.name))
            .collect();
        if !known.is_empty() {
            content.push(Line::from(vec![
                Span::styled("  В каталоге: ", label),
                Span::raw(known.join(", ")),
            ]));
        }
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Enter — закрыть",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut status_spans = Vec::new();

    let position = match app.view.active_tab() {
        Tab::Pokedex => Some((app.pokedex_state.selected(), app.catalog().len())),
        Tab::Search => Some((app.results_state.selected(), app.view.filtered().len())),
        Tab::Evolutions => None,
    };
    if let Some((selected, total)) = position {
        status_spans.push(Span::styled(
            format!(" {}/{} ", selected.map(|i| i + 1).unwrap_or(0), total),
            Style::default().fg(Color::Cyan),
        ));
        status_spans.push(Span::raw(" | "));
    }

    if app.view.active_tab() == Tab::Search {
        if let Some(category) = app.view.selected_category() {
            status_spans.push(Span::styled(
                format!("Тип: {}", category),
                Style::default().fg(Color::Green),
            ));
            status_spans.push(Span::raw(" | "));
        }

        if app.input_mode == InputMode::Editing {
            status_spans.push(Span::styled("Esc", key));
            status_spans.push(Span::raw(" Готово | "));
            status_spans.push(Span::styled("Backspace", key));
            status_spans.push(Span::raw(" Удалить"));
        } else {
            status_spans.push(Span::styled("/", key));
            status_spans.push(Span::raw(" Ввод | "));
            status_spans.push(Span::styled("←/→ Space", key));
            status_spans.push(Span::raw(" Тип | "));
            status_spans.push(Span::styled("c", key));
            status_spans.push(Span::raw(" Сброс | "));
        }
    }

    if app.input_mode == InputMode::Browse {
        status_spans.push(Span::styled("Tab", key));
        status_spans.push(Span::raw(" Вкладка | "));
        status_spans.push(Span::styled("↑/↓", key));
        status_spans.push(Span::raw(" Навигация | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Выход"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

/// Char-aware truncation, labels are mostly Cyrillic
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadOptions;
    use ratatui::backend::TestBackend;

    fn catalog() -> Catalog {
        Catalog::load(LoadOptions::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        press(app, KeyCode::Char('/'));
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Esc);
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(120, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tab_keys_switch_pages() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view.active_tab(), Tab::Evolutions);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.view.active_tab(), Tab::Pokedex);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view.active_tab(), Tab::Search);
    }

    #[test]
    fn test_typing_in_search_filters_results() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));

        type_text(&mut app, "пика");

        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.view.search(), "пика");
        assert_eq!(app.selected_pokemon().unwrap().name, "Пикачу");
    }

    #[test]
    fn test_q_is_typed_while_editing() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.view.search(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_badge_navigation_selects_category() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));

        // Все, Трава, Яд, Огонь, Полет, Вода
        for _ in 0..5 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.view.selected_category(), Some("Вода"));
        let names: Vec<&str> = app.view.filtered().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Сквиртл", "Вартортл", "Бластойз"]);

        // Wrap around to "Все"
        for _ in 0..4 {
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.view.selected_category(), None);
        assert_eq!(app.view.filtered().len(), catalog.len());
    }

    #[test]
    fn test_clear_filters_restores_catalog() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));
        type_text(&mut app, "zzz");
        assert!(app.view.is_empty_result());
        assert!(app.selected_pokemon().is_none());

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.view.filtered().len(), catalog.len());
        assert_eq!(app.results_state.selected(), Some(0));
    }

    #[test]
    fn test_list_navigation_wraps() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_pokemon().unwrap().name, "Мьюту");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_pokemon().unwrap().name, "Бульбазавр");
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected_pokemon().unwrap().id, 6);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.selected_pokemon().unwrap().id, 7);
    }

    #[test]
    fn test_empty_search_renders_placeholder() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));
        type_text(&mut app, "zzz");

        let screen = render(&mut app);
        assert!(screen.contains(NOT_FOUND));
        assert!(!screen.contains("Результаты"));
    }

    #[test]
    fn test_search_tab_renders_badges_and_results() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Char('3'));

        let screen = render(&mut app);
        assert!(screen.contains(SEARCH_PLACEHOLDER));
        assert!(screen.contains("Фильтр по типу"));
        assert!(screen.contains(ALL_LABEL));
        assert!(screen.contains("Результаты: 12"));
        assert!(screen.contains("Из: Пичу"));
    }

    #[test]
    fn test_evolutions_tab_renders_levels() {
        let catalog = catalog();
        let config = UiConfig {
            start_tab: Tab::Evolutions,
            ..UiConfig::default()
        };
        let mut app = App::new(&catalog, &config);

        let screen = render(&mut app);
        assert!(screen.contains("Цепочки эволюции"));
        assert!(screen.contains("Бульбазавр"));
        assert!(screen.contains("Ур. 16"));
        assert!(screen.contains("Ур. 32"));
        assert!(screen.contains("Ур. 36"));
        assert!(!screen.contains("Мьюту"));
    }

    #[test]
    fn test_detail_panel_shows_evolution() {
        let catalog = catalog();
        let mut app = App::new(&catalog, &UiConfig::default());
        press(&mut app, KeyCode::Enter);
        assert!(app.show_detail);

        let screen = render(&mut app);
        assert!(screen.contains("Подробно"));
        assert!(screen.contains("→ В: Ивизавр"));
        assert!(screen.contains("#002 Ивизавр"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Бульбазавр", 20), "Бульбазавр");
        assert_eq!(truncate("Бульбазавр", 7), "Буль...");
    }
}
