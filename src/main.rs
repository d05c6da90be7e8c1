use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph};

use mvp_terminal::charts::{
    ChartProps, Viewport, format_value, line, pie, player_info, radar, rank_bar, rank_scatter,
};
use mvp_terminal::config::DashboardConfig;
use mvp_terminal::dataset;
use mvp_terminal::hover::{ChartId, PointerTarget};
use mvp_terminal::palette::Rgb;
use mvp_terminal::playback::PlaybackClock;
use mvp_terminal::state::{DashEvent, Dashboard, LoadStatus};

struct App {
    state: Dashboard,
    config: DashboardConfig,
    should_quit: bool,
    frame_area: Rect,
}

impl App {
    fn new(config: DashboardConfig) -> Self {
        Self {
            state: Dashboard::from_config(&config),
            config,
            should_quit: false,
            frame_area: Rect::default(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(now),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(now),
            KeyCode::Char('t') => {
                self.state.cycle_team(true, now);
            }
            KeyCode::Char('T') => {
                self.state.cycle_team(false, now);
            }
            KeyCode::Char('[') => {
                self.state.nudge_min_year(-1, now);
            }
            KeyCode::Char(']') => {
                if !self.state.nudge_min_year(1, now) {
                    self.state.push_log("[INFO] Min year cannot pass max year");
                }
            }
            KeyCode::Char('{') => {
                if !self.state.nudge_max_year(-1, now) {
                    self.state.push_log("[INFO] Max year cannot drop below min year");
                }
            }
            KeyCode::Char('}') => {
                self.state.nudge_max_year(1, now);
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.state.toggle_only_single_team(now);
            }
            KeyCode::Left => self.state.step_hovered_year(false),
            KeyCode::Right => self.state.step_hovered_year(true),
            KeyCode::Esc => self.state.clear_hover(),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let dir = self.config.export_dir.clone();
                let _ = self.state.export_selected(&dir);
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let target = pointer_target(&self.state, self.frame_area, mouse.column, mouse.row);
        self.state.pointer_moved(target);
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = DashboardConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    dataset::spawn_loader(config.source.clone(), tx.clone());

    let mut app = App::new(config);
    app.state.mount();
    let source = app.config.source.describe();
    app.state.push_log(format!("[INFO] Loading {source}"));

    let res = {
        let _clock = PlaybackClock::spawn(app.config.tick(), tx);
        run_app(&mut terminal, &mut app, rx)
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<DashEvent>,
) -> io::Result<()> {
    let poll_rate = Duration::from_millis(20);

    loop {
        while let Ok(event) = rx.try_recv() {
            app.state.apply_event(event, Instant::now());
        }

        app.frame_area = terminal.size()?;
        terminal.draw(|f| ui(f, app))?;

        if event::poll(poll_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

struct ChartAreas {
    header: Rect,
    info: Rect,
    radar: Rect,
    progress: Rect,
    line: Rect,
    pie: Rect,
    scatter: Rect,
    ranks: Rect,
    console: Rect,
    footer: Rect,
}

fn chart_areas(area: Rect) -> ChartAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(48), Constraint::Percentage(52)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(42),
            Constraint::Percentage(36),
            Constraint::Min(4),
        ])
        .split(columns[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(right[1]);

    ChartAreas {
        header: rows[0],
        info: left[0],
        radar: left[1],
        progress: left[2],
        line: right[0],
        pie: bottom[0],
        scatter: bottom[1],
        ranks: right[2],
        console: rows[2],
        footer: rows[3],
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let areas = chart_areas(frame.size());
    let state = &app.state;
    let now = Instant::now();

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, areas.header);

    let records = state.selected_records();
    let props = ChartProps {
        records: &records,
        ranges: state.ranges(),
        hover: state.hover(),
    };

    render_player_info(frame, areas.info, state, now);
    render_radar(frame, areas.radar, &props, state.radar_intro(now));
    render_progress(frame, areas.progress, state);
    render_line(frame, areas.line, &props);
    render_pie(frame, areas.pie, &props);
    render_scatter(frame, areas.scatter, &props);
    render_ranks(frame, areas.ranks, &props);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, areas.console);

    let footer = Paragraph::new(
        "j/k Player | t/T Team | [ ] Min year | { } Max year | o Single team | ←/→ Year | Esc Clear | e Export | ? Help | q Quit",
    );
    frame.render_widget(footer, areas.footer);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &Dashboard) -> String {
    let filter = state.filter();
    let mut title = String::from("MVP RADAR");
    if state.chrome.chart_title_visible {
        title.push_str(" | MVP Voting 1981-2020");
    }
    if state.chrome.now_showing_visible {
        if let Some(player) = state.selected_player() {
            title.push_str(&format!(" | Now showing: {player}"));
        }
    }
    let line1 = format!("  .-.  {title}");
    let line2 = format!(
        " (   ) Team: {} | Years: {}-{} | Single team: {} | Players: {}",
        filter.team.label(),
        filter.min_year,
        filter.max_year,
        if filter.only_single_team { "on" } else { "off" },
        state.players().len()
    );
    let status = match &state.status {
        LoadStatus::Loading => "Loading dataset...".to_string(),
        LoadStatus::Ready if state.playback().is_paused() => "PAUSED".to_string(),
        LoadStatus::Ready => "PLAYING".to_string(),
        LoadStatus::Failed(_) => "No data".to_string(),
    };
    let line3 = format!("  '-'  {status}");
    format!("{line1}\n{line2}\n{line3}")
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn empty_message(state_hint: &str) -> Paragraph<'static> {
    Paragraph::new(state_hint.to_string()).style(Style::default().fg(Color::DarkGray))
}

fn render_player_info(frame: &mut Frame, area: Rect, state: &Dashboard, now: Instant) {
    let block = Block::default().borders(Borders::ALL).title("Now Showing");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.players().is_empty() {
        let hint = match state.status {
            LoadStatus::Loading => "Loading...",
            _ => "No players match the current filters",
        };
        frame.render_widget(empty_message(hint), inner);
        return;
    }

    let style = if state.label_opacity(now) >= 0.5 {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = player_info::caption_lines(state.label()).join("\n");
    frame.render_widget(Paragraph::new(text).style(style), inner);
}

fn render_progress(frame: &mut Frame, area: Rect, state: &Dashboard) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(state.progress().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, area);
}

fn canvas_block(title: &str) -> Block<'static> {
    Block::default().title(title.to_string()).borders(Borders::ALL)
}

fn draw_polyline(ctx: &mut Context, points: &[(f64, f64)], closed: bool, c: Color) {
    for pair in points.windows(2) {
        ctx.draw(&CanvasLine {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
            color: c,
        });
    }
    if closed && points.len() > 2 {
        let (first, last) = (points[0], points[points.len() - 1]);
        ctx.draw(&CanvasLine {
            x1: last.0,
            y1: last.1,
            x2: first.0,
            y2: first.1,
            color: c,
        });
    }
}

fn render_radar(frame: &mut Frame, area: Rect, props: &ChartProps<'_>, intro: f64) {
    if props.records.is_empty() {
        frame.render_widget(canvas_block("Radar"), area);
        return;
    }
    let scene = radar::scene(props, intro);
    let canvas = Canvas::default()
        .block(canvas_block("Radar"))
        .marker(Marker::Braille)
        .x_bounds(scene.viewport.x)
        .y_bounds(scene.viewport.y)
        .paint(|ctx| {
            for ring in &scene.rings {
                let circle: Vec<(f64, f64)> = (0..48)
                    .map(|i| pie::point_on_arc(i as f64 * std::f64::consts::TAU / 48.0, *ring))
                    .collect();
                draw_polyline(ctx, &circle, true, Color::DarkGray);
            }
            for axis in &scene.axes {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: axis.end.0,
                    y2: axis.end.1,
                    color: Color::DarkGray,
                });
                ctx.print(axis.label_at.0, axis.label_at.1, axis.label);
            }
            ctx.layer();
            for poly in scene.polygons.iter().filter(|p| !p.highlighted) {
                draw_polyline(ctx, &poly.vertices, true, color(poly.color));
            }
            for poly in scene.polygons.iter().filter(|p| p.highlighted) {
                draw_polyline(ctx, &poly.vertices, true, color(poly.color));
                ctx.draw(&Points {
                    coords: &poly.vertices,
                    color: Color::White,
                });
            }
            ctx.layer();
            for label in &scene.value_labels {
                ctx.print(label.at.0, label.at.1, label.text.clone());
            }
            if let Some(year) = &scene.center_label {
                ctx.print(
                    0.0,
                    0.0,
                    Span::styled(year.clone(), Style::default().add_modifier(Modifier::BOLD)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_line(frame: &mut Frame, area: Rect, props: &ChartProps<'_>) {
    let Some(scene) = line::scene(props) else {
        frame.render_widget(canvas_block("Trends"), area);
        return;
    };
    let canvas = Canvas::default()
        .block(canvas_block("Trends"))
        .marker(Marker::Braille)
        .x_bounds(scene.viewport.x)
        .y_bounds(scene.viewport.y)
        .paint(|ctx| {
            draw_polyline(ctx, &[(0.0, 0.0), (1.0, 0.0)], false, Color::Gray);
            draw_polyline(ctx, &[(0.0, 0.0), (0.0, 1.0)], false, Color::Gray);
            for tick in [0.0, 0.5, 1.0] {
                ctx.print(-0.1, tick, format!("{tick:.1}"));
            }
            for year in line::year_ticks(scene.years) {
                ctx.print(line::x_position(scene.years, year) - 0.03, -0.1, year.to_string());
            }
            ctx.layer();
            for series in &scene.series {
                let c = color(series.color);
                draw_polyline(ctx, &series.points, false, c);
                ctx.draw(&Points {
                    coords: &series.points,
                    color: c,
                });
                if let Some(last_point) = series.points.last() {
                    ctx.print(
                        last_point.0 + 0.03,
                        last_point.1,
                        Span::styled(series.metric.label(), Style::default().fg(c)),
                    );
                }
            }
            if let Some(x) = scene.hover_x {
                let mut y = 0.0;
                while y < 1.0 {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: y,
                        x2: x,
                        y2: (y + 0.04).min(1.0),
                        color: Color::White,
                    });
                    y += 0.08;
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn render_pie(frame: &mut Frame, area: Rect, props: &ChartProps<'_>) {
    let Some(scene) = pie::scene(props) else {
        frame.render_widget(canvas_block("Teams"), area);
        return;
    };
    let canvas = Canvas::default()
        .block(canvas_block("Teams"))
        .marker(Marker::Braille)
        .x_bounds(scene.viewport.x)
        .y_bounds(scene.viewport.y)
        .paint(|ctx| {
            for wedge in &scene.wedges {
                let c = color(wedge.color);
                let radius = wedge.radius();
                let mut angle = wedge.start;
                while angle < wedge.end {
                    let (x, y) = pie::point_on_arc(angle, radius);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: c,
                    });
                    angle += 0.03;
                }
            }
            ctx.layer();
            for wedge in scene.wedges.iter().filter(|w| w.highlighted) {
                let radius = wedge.radius();
                let mut outline = vec![(0.0, 0.0)];
                let steps = 24;
                for i in 0..=steps {
                    let angle = wedge.start + (wedge.end - wedge.start) * i as f64 / steps as f64;
                    outline.push(pie::point_on_arc(angle, radius));
                }
                draw_polyline(ctx, &outline, true, Color::Black);
            }
            if let Some(team) = &scene.card {
                ctx.print(
                    -0.1,
                    0.0,
                    Span::styled(
                        format!(" {team} "),
                        Style::default().fg(Color::Black).bg(Color::White),
                    ),
                );
            }
            if let Some((team, count)) = &scene.tooltip {
                ctx.print(
                    scene.viewport.x[0],
                    scene.viewport.y[1] - 0.1,
                    Span::styled(
                        format!(" {team} | Count: {count} "),
                        Style::default().fg(Color::White).bg(Color::DarkGray),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, props: &ChartProps<'_>) {
    let Some(scene) = rank_scatter::scene(props) else {
        frame.render_widget(canvas_block("PER vs MVP rank"), area);
        return;
    };
    let canvas = Canvas::default()
        .block(canvas_block("PER vs MVP rank"))
        .marker(Marker::Braille)
        .x_bounds(scene.viewport.x)
        .y_bounds(scene.viewport.y)
        .paint(|ctx| {
            let coords: Vec<(f64, f64)> = scene
                .points
                .iter()
                .filter(|p| !p.highlighted)
                .map(|p| (p.per_rank, p.mvp_rank))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Cyan,
            });
            for point in scene.points.iter().filter(|p| p.highlighted) {
                ctx.print(
                    point.per_rank,
                    point.mvp_rank,
                    Span::styled(
                        format!("● {}", point.year),
                        Style::default().fg(Color::Yellow),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_ranks(frame: &mut Frame, area: Rect, props: &ChartProps<'_>) {
    let Some(scene) = rank_bar::scene(props) else {
        frame.render_widget(canvas_block("Ranks"), area);
        return;
    };
    let bars: Vec<Bar> = scene
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .label(Line::from(bar.field.label()))
                .value(bar.rank.map(|r| r.round().max(0.0) as u64).unwrap_or(0))
                .text_value(format_value(bar.rank.unwrap_or(f64::NAN)))
                .style(Style::default().fg(Color::Magenta))
        })
        .collect();
    let chart = BarChart::default()
        .block(canvas_block(&format!("Ranks ({})", scene.year)))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(scene.max_rank.ceil() as u64);
    frame.render_widget(chart, area);
}

fn canvas_point(area: Rect, viewport: Viewport, column: u16, row: u16) -> Option<(f64, f64)> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    let fx = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
    let fy = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
    Some(viewport.point_at(fx, fy))
}

fn pointer_target(state: &Dashboard, frame_area: Rect, column: u16, row: u16) -> Option<PointerTarget> {
    let areas = chart_areas(frame_area);
    let records = state.selected_records();
    if records.is_empty() {
        return None;
    }
    let props = ChartProps {
        records: &records,
        ranges: state.ranges(),
        hover: state.hover(),
    };

    let radar_scene = radar::scene(&props, 1.0);
    if let Some(point) = canvas_point(areas.radar, radar_scene.viewport, column, row) {
        return radar::hit_test(&radar_scene, point).map(|year| PointerTarget::Year {
            chart: ChartId::Radar,
            year,
        });
    }
    if let Some(scene) = line::scene(&props) {
        if let Some(point) = canvas_point(areas.line, scene.viewport, column, row) {
            return line::hit_test(&scene, point).map(|year| PointerTarget::Year {
                chart: ChartId::Line,
                year,
            });
        }
    }
    if let Some(scene) = pie::scene(&props) {
        if let Some(point) = canvas_point(areas.pie, scene.viewport, column, row) {
            return pie::hit_test(&scene, point).map(|team| PointerTarget::Wedge { team });
        }
    }
    if let Some(scene) = rank_scatter::scene(&props) {
        if let Some(point) = canvas_point(areas.scatter, scene.viewport, column, row) {
            return rank_scatter::hit_test(&scene, point).map(|year| PointerTarget::Year {
                chart: ChartId::RankScatter,
                year,
            });
        }
    }
    None
}

fn console_text(state: &Dashboard) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "MVP Radar - Help",
        "",
        "Playback:",
        "  j/k or ↓/↑   Next / previous player",
        "  hover chart  Pause and highlight a season",
        "  ←/→          Step highlighted season",
        "  Esc          Clear highlight and resume",
        "",
        "Filters:",
        "  t / T        Next / previous team",
        "  [ / ]        Min year down / up",
        "  { / }        Max year down / up",
        "  o            Single-team players only",
        "",
        "  e            Export player to xlsx",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
