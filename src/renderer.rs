use crate::entities::{Body, BulletOwner, EnemyKind, Entity, Facing, Player};
use crate::scene::Scene;
use crate::world::FrameSnapshot;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Everything the renderer needs for one terminal frame
pub struct RenderView<'a> {
    pub snapshot: &'a FrameSnapshot,
    pub area: Rect,
    pub fps: u32,
}

/// Maps world pixels onto terminal cells inside `area`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    pub fn new(area: Rect, world_width: f32, world_height: f32) -> Self {
        Self {
            area,
            scale_x: area.width as f32 / world_width,
            scale_y: area.height as f32 / world_height,
        }
    }

    /// Cell under a world point, or `None` when it falls outside the area
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.scale_x).floor();
        let row = (y * self.scale_y).floor();
        if col < 0.0 || row < 0.0 || col >= self.area.width as f32 || row >= self.area.height as f32
        {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }

    /// Cells covered by a world rectangle, clipped to the area; at least one cell when visible
    pub fn rect(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
        let left = (x * self.scale_x).floor().max(0.0);
        let top = (y * self.scale_y).floor().max(0.0);
        let right = ((x + width) * self.scale_x)
            .ceil()
            .min(self.area.width as f32);
        let bottom = ((y + height) * self.scale_y)
            .ceil()
            .min(self.area.height as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }

    pub fn body_rect(&self, body: &Body) -> Option<Rect> {
        self.rect(body.x, body.y, body.width as f32, body.height as f32)
    }
}

fn fill(buffer: &mut Buffer, rect: Rect, symbol: char, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_char(symbol).set_style(style);
            }
        }
    }
}

fn put(buffer: &mut Buffer, cell: (u16, u16), symbol: char, style: Style) {
    if let Some(target) = buffer.cell_mut(cell) {
        target.set_char(symbol).set_style(style);
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to scene-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.snapshot.scene {
            Scene::Start => self.render_start(frame, view),
            Scene::Playing => self.render_game(frame, view),
            Scene::Paused => self.render_paused(frame, view),
            Scene::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_start(&self, frame: &mut Frame, view: &RenderView) {
        let text = vec![
            Line::from(""),
            Line::from("GALACTIC DEFENDER").centered().bold().cyan(),
            Line::from(""),
            Line::from("Run, jump and shoot your way through three levels")
                .centered()
                .white(),
            Line::from(""),
            Line::from(format!("High Score: {}", view.snapshot.high_score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("[Arrows/AD: Move] [Up/W: Jump] [Space: Fire] [P: Pause]")
                .centered()
                .dark_gray(),
            Line::from(""),
            Line::from("Press Enter to start").centered().white().bold(),
            Line::from("Press Esc to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                )
                .alignment(Alignment::Center),
            view.area,
        );
    }

    /// Draws the world and the HUD
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let snapshot = view.snapshot;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        // One row each for the HUD above and the footer below
        let framed_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let game_area = block.inner(framed_area);
        frame.render_widget(block, framed_area);

        let viewport = Viewport::new(game_area, snapshot.geometry.width, snapshot.geometry.height);
        let buffer = frame.buffer_mut();

        // Sparse starfield that drifts with the frame counter
        let drift = (snapshot.frame / 8) as u16;
        for y in 0..game_area.height {
            for x in 0..game_area.width {
                let hash = (x.wrapping_add(drift)).wrapping_mul(31) ^ y.wrapping_mul(17);
                if hash % 53 == 0 {
                    put(
                        buffer,
                        (game_area.x + x, game_area.y + y),
                        '.',
                        Style::default().fg(Color::DarkGray),
                    );
                }
            }
        }

        for platform in &snapshot.geometry.platforms {
            let bounds = platform.bounds();
            if let Some(rect) = viewport.rect(
                bounds.x as f32,
                bounds.y as f32,
                bounds.width as f32,
                bounds.height as f32,
            ) {
                fill(buffer, rect, '▀', Style::default().fg(Color::Gray));
            }
        }

        for entity in &snapshot.entities {
            Self::draw_entity(buffer, &viewport, entity);
        }

        Self::draw_player(buffer, &viewport, &snapshot.player, snapshot.frame);

        self.render_hud(frame, view);
    }

    fn draw_entity(buffer: &mut Buffer, viewport: &Viewport, entity: &Entity) {
        match entity {
            Entity::Enemy(enemy) => {
                let color = match enemy.kind {
                    EnemyKind::Basic => Color::Red,
                    EnemyKind::Fast => Color::Magenta,
                    EnemyKind::Boss => Color::Yellow,
                };
                let symbol = match enemy.kind {
                    EnemyKind::Basic => 'B',
                    EnemyKind::Fast => 'F',
                    EnemyKind::Boss => '#',
                };
                if let Some(rect) = viewport.body_rect(&enemy.body) {
                    fill(
                        buffer,
                        rect,
                        symbol,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    );
                }
            }
            Entity::Bullet(bullet) => {
                let (symbol, color) = match bullet.owner {
                    BulletOwner::Player => ('-', Color::LightYellow),
                    BulletOwner::Enemy => ('•', Color::LightRed),
                };
                if let Some(cell) = viewport.cell(bullet.body.center_x(), bullet.body.center_y()) {
                    put(buffer, cell, symbol, Style::default().fg(color));
                }
            }
            Entity::PowerUp(power_up) => {
                if let Some(rect) = viewport.body_rect(&power_up.body) {
                    let style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD);
                    fill(buffer, rect, ' ', style);
                    buffer.set_stringn(
                        rect.x,
                        rect.y,
                        power_up.kind.label(),
                        rect.width as usize,
                        style,
                    );
                }
            }
            Entity::Explosion(explosion) => {
                // Fade from hot to cool over the effect's lifetime
                let color = match explosion.progress() {
                    p if p < 0.33 => Color::Yellow,
                    p if p < 0.66 => Color::LightRed,
                    _ => Color::Red,
                };
                for particle in &explosion.particles {
                    if let Some(cell) = viewport.cell(particle.x, particle.y) {
                        put(buffer, cell, '*', Style::default().fg(color));
                    }
                }
            }
        }
    }

    fn draw_player(buffer: &mut Buffer, viewport: &Viewport, player: &Player, frame: u64) {
        // Blink while invincible after a hit
        if player.is_invincible() && frame % 6 < 3 {
            return;
        }
        let color = if player.is_shield_active() {
            Color::Cyan
        } else {
            Color::Green
        };
        if let Some(rect) = viewport.body_rect(&player.body) {
            fill(
                buffer,
                rect,
                '█',
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
            let eye_x = match player.facing {
                Facing::Right => rect.right().saturating_sub(1),
                Facing::Left => rect.left(),
            };
            put(
                buffer,
                (eye_x, rect.y),
                '▪',
                Style::default().fg(Color::Black).bg(color),
            );
        }
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let snapshot = view.snapshot;
        let player = &snapshot.player;

        let health_style = if player.health > 50 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if player.health > 25 {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Best: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::styled("  HP: ", label),
            Span::styled(format!("{}/{}", player.health, player.max_health()), health_style),
            Span::styled("  Level: ", label),
            Span::styled(snapshot.level.to_string(), value),
            Span::styled("  Wave: ", label),
            Span::styled(snapshot.wave.to_string(), value),
        ];

        let timers = [
            ("2x", player.timers.double_shot),
            ("SH", player.timers.shield),
            (">>", player.timers.speed_boost),
        ];
        for (badge, remaining) in timers {
            if remaining > 0 {
                spans.push(Span::styled(format!("  {badge} "), label));
                spans.push(Span::styled(
                    format!("{:.1}s", remaining as f32 / 1000.0),
                    Style::default().fg(Color::LightGreen),
                ));
            }
        }
        spans.push(Span::styled("  FPS: ", label));
        spans.push(Span::styled(view.fps.to_string(), value));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );

        let footer = if snapshot.boss_level && snapshot.boss_active {
            Line::from("!! BOSS INCOMING !!").centered().red().bold()
        } else {
            Line::from(vec![Span::styled(
                "[Arrows/AD: Move] [Up/W: Jump] [Space: Fire] [P: Pause]",
                label,
            )])
            .centered()
        };
        frame.render_widget(
            Paragraph::new(footer),
            Rect {
                x: area.x + 1,
                y: area.y + area.height.saturating_sub(1),
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
            Line::from("Press Esc to quit").centered().white(),
        ];

        let pause_area = Rect {
            x: area.x + (area.width / 2).saturating_sub(15),
            y: area.y + (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 7.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let snapshot = view.snapshot;
        let mut text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║        GAME OVER          ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", snapshot.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("High Score: {}", snapshot.high_score))
                .centered()
                .cyan()
                .bold(),
            Line::from(format!("Reached level {}, wave {}", snapshot.level, snapshot.wave))
                .centered()
                .white(),
        ];
        if snapshot.score > 0 && snapshot.score == snapshot.high_score {
            text.push(Line::from("New high score!").centered().green().bold());
        }
        text.extend([
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Esc to quit").centered().white(),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}
